//! Error types for the share-card engine

use thiserror::Error;

/// Result type alias for engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in the share-card engine
#[derive(Error, Debug)]
pub enum Error {
    /// Failed to rasterize a composed card
    #[error("Rendering failed: {0}")]
    RenderError(String),

    /// Failed to encode the rasterized bitmap as PNG
    #[error("PNG encoding failed: {0}")]
    EncodeError(String),

    /// Failed to persist a download
    #[error("Download failed: {0}")]
    DownloadError(String),

    /// Failed to write to the clipboard
    #[error("Clipboard write failed: {0}")]
    ClipboardError(String),

    /// Network error
    #[error("Network error: {0}")]
    NetworkError(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}
