//! Error types for U-Cartonize.

use thiserror::Error;

/// Result type alias for U-Cartonize operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while validating or solving a packing request.
///
/// Items that simply do not fit any carton are not errors; they are reported
/// as constraint violations on the returned plan.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid order line or item instance.
    #[error("Invalid item: {0}")]
    InvalidItem(String),

    /// Invalid carton type.
    #[error("Invalid carton: {0}")]
    InvalidCarton(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// No valid placement found.
    #[error("No valid placement found: {0}")]
    NoPlacement(String),

    /// Serialization error.
    #[cfg(feature = "serde")]
    #[error("Serialization error: {0}")]
    SerializationError(String),
}
