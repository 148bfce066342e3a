//! Mapping of verification failures to HTTP responses.
//!
//! Only two responses exist. A server-side misconfiguration yields a generic
//! `500`; every other failure yields a generic `400`. The body never says which
//! check failed.

use beamgate_auth::BeamAuthError;

use crate::body::{GateBody, gate_body_from_string};

/// Body sent when the server itself is misconfigured.
pub const SERVER_FAULT_BODY: &str = "Something went wrong\n";

/// Body sent for every caller-facing verification failure.
pub const INVALID_REQUEST_BODY: &str = "invalid\n";

/// Content type of rejection responses.
pub const CONTENT_TYPE: &str = "text/plain; charset=utf-8";

/// Build the response for a rejected request.
///
/// # Examples
///
/// ```
/// use beamgate_auth::BeamAuthError;
/// use beamgate_http::rejection_response;
///
/// let resp = rejection_response(&BeamAuthError::SignatureVerifyFailed);
/// assert_eq!(resp.status(), http::StatusCode::BAD_REQUEST);
///
/// let resp = rejection_response(&BeamAuthError::SharedSecretMissing);
/// assert_eq!(resp.status(), http::StatusCode::INTERNAL_SERVER_ERROR);
/// ```
#[must_use]
pub fn rejection_response(err: &BeamAuthError) -> http::Response<GateBody> {
    let (status, body) = if err.is_server_fault() {
        (http::StatusCode::INTERNAL_SERVER_ERROR, SERVER_FAULT_BODY)
    } else {
        (http::StatusCode::BAD_REQUEST, INVALID_REQUEST_BODY)
    };

    let mut response = http::Response::new(gate_body_from_string(body));
    *response.status_mut() = status;

    let headers = response.headers_mut();
    headers.insert(
        http::header::CONTENT_TYPE,
        http::HeaderValue::from_static(CONTENT_TYPE),
    );
    headers.insert(
        http::header::X_CONTENT_TYPE_OPTIONS,
        http::HeaderValue::from_static("nosniff"),
    );

    response
}
