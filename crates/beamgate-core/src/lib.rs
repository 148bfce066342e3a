//! Core configuration and error types for BeamGate.
//!
//! This crate holds the pieces shared by the verifier library and the server
//! binary: environment-driven configuration and the infrastructure error type.

mod config;
mod error;

pub use config::{BeamGateConfig, DEFAULT_SHARED_SECRET_VAR};
pub use error::{BeamGateError, BeamGateResult};
