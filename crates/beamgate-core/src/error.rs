//! Error types for the BeamGate core.

/// Core error type for BeamGate infrastructure.
#[derive(Debug, thiserror::Error)]
pub enum BeamGateError {
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Convenience result type for BeamGate operations.
pub type BeamGateResult<T> = Result<T, BeamGateError>;
