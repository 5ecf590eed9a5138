//! Configuration error types

use arcin_transport::TransportError;
use thiserror::Error;

/// Errors from configuration operations
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A field cannot be represented on the wire; raised before any device I/O
    #[error("Format error: {0}")]
    Format(String),

    /// Device payload is malformed or too short
    #[error("Decode error: {0}")]
    Decode(String),

    /// Transport layer error
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),
}

impl ConfigError {
    /// Whether the error happened before any device I/O was attempted
    pub fn is_format(&self) -> bool {
        matches!(self, Self::Format(_))
    }
}
