//! Gateway service in front of the protected handler.
//!
//! Health-check endpoints (`/health`, `/_health`) are answered directly so
//! orchestrators can probe the server without a relay signature. Every other
//! request goes through the [`BeamSignatureGate`].

use std::convert::Infallible;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use beamgate_auth::SharedSecretProvider;
use beamgate_http::{BeamSignatureGate, GateBody, gate_body_from_string};
use hyper::service::Service;

use crate::handler::ValidHandler;

/// Top-level service handed to hyper for every connection.
#[derive(Debug, Clone)]
pub struct GatewayService {
    gate: BeamSignatureGate<ValidHandler>,
}

impl GatewayService {
    /// Create a gateway that verifies requests against `secret_provider`.
    pub fn new(secret_provider: Arc<dyn SharedSecretProvider>) -> Self {
        Self {
            gate: BeamSignatureGate::new(ValidHandler, secret_provider),
        }
    }
}

impl<B> Service<http::Request<B>> for GatewayService {
    type Response = http::Response<GateBody>;
    type Error = Infallible;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn call(&self, req: http::Request<B>) -> Self::Future {
        // Intercept health checks at the gateway level.
        if is_health_check(req.method(), req.uri().path()) {
            return Box::pin(std::future::ready(Ok(health_check_response())));
        }

        self.gate.call(req)
    }
}

/// Check if the request is a health check probe.
fn is_health_check(method: &http::Method, path: &str) -> bool {
    *method == http::Method::GET && (path == "/health" || path == "/_health")
}

/// Produce the health check response.
fn health_check_response() -> http::Response<GateBody> {
    let body = serde_json::json!({ "status": "running" }).to_string();
    let mut response = http::Response::new(gate_body_from_string(body));
    response.headers_mut().insert(
        http::header::CONTENT_TYPE,
        http::HeaderValue::from_static("application/json"),
    );
    response
}
