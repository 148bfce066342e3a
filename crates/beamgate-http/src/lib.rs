//! Request gating for services behind a SORACOM Beam relay.
//!
//! [`BeamSignatureGate`] wraps any hyper [`Service`](hyper::service::Service)
//! and only lets a request through when its Beam signature verifies. Rejected
//! requests never reach the wrapped service; they are answered by
//! [`rejection_response`] instead.
//!
//! # Modules
//!
//! - [`body`] - The response body type shared by the gate and wrapped services
//! - [`gate`] - The gating service
//! - [`response`] - Mapping verification failures to HTTP responses

pub mod body;
pub mod gate;
pub mod response;

pub use body::{GateBody, gate_body_from_string};
pub use gate::{BeamSignatureGate, RejectionHook};
pub use response::rejection_response;
