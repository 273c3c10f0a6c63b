//! Error types for Ridge

use thiserror::Error;

/// The main error type for Ridge operations
#[derive(Debug, Error)]
pub enum RidgeError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse config {path}: {message}")]
    ConfigParse { path: String, message: String },

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Grid size {size} exceeds the maximum of {max} supported by 32-bit indices")]
    GridTooLarge { size: u32, max: u32 },
}

/// Result type alias for Ridge operations
pub type Result<T> = std::result::Result<T, RidgeError>;
