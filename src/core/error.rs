//! Error types for the voxel engine

use thiserror::Error;

/// Main error type for the engine
#[derive(Debug, Error)]
pub enum Error {
    /// Payload text is not well-formed JSON, or does not have the payload shape
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Payload parsed but violates a world invariant (bad key, wrong chunk length...)
    #[error("Malformed payload: {0}")]
    MalformedPayload(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
