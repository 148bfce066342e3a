//! The protected endpoint.
//!
//! Every request that reaches [`ValidHandler`] has already passed signature
//! verification, so it simply acknowledges with `valid`.

use std::convert::Infallible;
use std::future::{Ready, ready};

use beamgate_http::{GateBody, gate_body_from_string};
use hyper::service::Service;

/// Body returned for every verified request.
pub const VALID_BODY: &str = "valid";

/// Downstream handler reached only by verified requests.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidHandler;

impl<B> Service<http::Request<B>> for ValidHandler {
    type Response = http::Response<GateBody>;
    type Error = Infallible;
    type Future = Ready<Result<Self::Response, Self::Error>>;

    fn call(&self, _req: http::Request<B>) -> Self::Future {
        ready(Ok(http::Response::new(gate_body_from_string(VALID_BODY))))
    }
}
