//! Error types for the signnet library.

use thiserror::Error;

/// Every failure the core or its collaborators can report.
///
/// The first three variants are caller contract violations raised by the
/// training engine itself. The remaining ones only come out of the dataset
/// and persistence helpers.
#[derive(Error, Debug)]
pub enum NetError {
    /// Mismatched layer sizes, kernel larger than a feature map, non-square
    /// vector lengths and other construction-time problems.
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// `backward` called without a pending forward pass.
    #[error("Invalid state: {message}")]
    InvalidState { message: String },

    /// A vector or matrix of the wrong size was handed in.
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("IO error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    #[error("Serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },

    #[error("Image error: {source}")]
    Image {
        #[from]
        source: image::ImageError,
    },

    /// Dataset layout problems (missing class folders, empty sets).
    #[error("Dataset error: {message}")]
    Dataset { message: String },
}

/// Result type alias for the signnet library.
pub type Result<T> = std::result::Result<T, NetError>;

impl NetError {
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn invalid_state<S: Into<String>>(message: S) -> Self {
        Self::InvalidState {
            message: message.into(),
        }
    }

    pub fn dimension_mismatch(expected: usize, actual: usize) -> Self {
        Self::DimensionMismatch { expected, actual }
    }

    pub fn dataset<S: Into<String>>(message: S) -> Self {
        Self::Dataset {
            message: message.into(),
        }
    }
}
