//! Unified error type for cellforge.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur during dataset generation.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// An asset path returned by the provider could not be decoded.
    ///
    /// Aborts the whole generation run; images already written stay on disk.
    #[error("Failed to decode asset {}: {source}", path.display())]
    AssetLoad {
        /// Path that failed to decode.
        path: PathBuf,
        /// Underlying decode error.
        source: image::ImageError,
    },

    /// A generated image could not be encoded or written.
    #[error("Failed to save image {}: {source}", path.display())]
    Save {
        /// Destination path.
        path: PathBuf,
        /// Underlying encode error.
        source: image::ImageError,
    },

    /// An asset directory contains no usable raster files.
    #[error("No raster images found in {}", path.display())]
    EmptyAssetDir {
        /// The directory that was scanned.
        path: PathBuf,
    },

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("Config error: {0}")]
    Config(String),

    /// Invalid argument.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}
