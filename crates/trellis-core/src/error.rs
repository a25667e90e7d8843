//! Error types for Trellis

use thiserror::Error;

/// The main error type for Trellis operations
#[derive(Debug, Error)]
pub enum TrellisError {
    #[error("No render root reachable: {0}")]
    MissingRenderRoot(String),

    #[error("Frame handler error: {0}")]
    HandlerError(String),

    #[error("Render error: {0}")]
    RenderError(String),

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type alias for Trellis operations
pub type Result<T> = std::result::Result<T, TrellisError>;
