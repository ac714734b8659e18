//! Error types for extraction, composition and their file boundaries

use std::fmt;
use std::path::PathBuf;

/// Main error type for all toolkit operations
#[derive(Debug)]
pub enum TilecutError {
    /// Configuration file is absent or unreadable
    ///
    /// Callers treat this as non-fatal and fall back to defaults
    ConfigMissing {
        /// Path of the configuration file
        path: PathBuf,
        /// Why the file could not be used
        reason: String,
    },

    /// A required input path does not exist
    InputNotFound {
        /// Path that was looked up
        path: PathBuf,
    },

    /// Paired buffers disagree on width or height
    DimensionMismatch {
        /// What was being compared
        context: &'static str,
        /// Expected (width, height)
        expected: (u32, u32),
        /// Found (width, height)
        found: (u32, u32),
    },

    /// A tiling input disagrees with the first input's shape
    ShapeMismatch {
        /// Position of the offending input (0 = top-left)
        index: usize,
        /// Expected (width, height, channels)
        expected: (u32, u32, u8),
        /// Found (width, height, channels)
        found: (u32, u32, u8),
    },

    /// Unreadable image bytes or malformed embedded data
    Decode {
        /// What was being decoded
        item: String,
        /// Description of the failure
        reason: String,
    },

    /// Failed to write a JSON or text output
    Serialization {
        /// Output path
        path: PathBuf,
        /// Description of the failure
        reason: String,
    },

    /// Failed to load an image from the filesystem
    ImageLoad {
        /// Path to the image file
        path: PathBuf,
        /// Underlying image loading error
        source: image::ImageError,
    },

    /// Failed to save an image to disk
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },
}

impl fmt::Display for TilecutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConfigMissing { path, reason } => {
                write!(f, "Config '{}' unavailable: {reason}", path.display())
            }
            Self::InputNotFound { path } => {
                write!(f, "Input not found: '{}'", path.display())
            }
            Self::DimensionMismatch {
                context,
                expected,
                found,
            } => {
                write!(
                    f,
                    "Dimension mismatch in {context}: expected {}x{}, found {}x{}",
                    expected.0, expected.1, found.0, found.1
                )
            }
            Self::ShapeMismatch {
                index,
                expected,
                found,
            } => {
                write!(
                    f,
                    "Tile input {index} has shape {}x{}x{}, expected {}x{}x{}",
                    found.0, found.1, found.2, expected.0, expected.1, expected.2
                )
            }
            Self::Decode { item, reason } => {
                write!(f, "Failed to decode {item}: {reason}")
            }
            Self::Serialization { path, reason } => {
                write!(f, "Failed to write '{}': {reason}", path.display())
            }
            Self::ImageLoad { path, source } => {
                write!(f, "Failed to load image '{}': {source}", path.display())
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
                    path.display()
                )
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
        }
    }
}

impl std::error::Error for TilecutError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageLoad { source, .. } | Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for toolkit results
pub type Result<T> = std::result::Result<T, TilecutError>;

impl TilecutError {
    /// Whether a batch loop may skip the failing item and carry on
    pub const fn is_per_item(&self) -> bool {
        matches!(
            self,
            Self::Decode { .. }
                | Self::ImageLoad { .. }
                | Self::ImageExport { .. }
                | Self::Serialization { .. }
        )
    }
}

impl From<image::ImageError> for TilecutError {
    fn from(err: image::ImageError) -> Self {
        Self::ImageLoad {
            path: PathBuf::from("<memory>"),
            source: err,
        }
    }
}

impl From<std::io::Error> for TilecutError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

impl From<serde_json::Error> for TilecutError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode {
            item: "JSON document".to_string(),
            reason: err.to_string(),
        }
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> TilecutError {
    TilecutError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create a decode error for a named item
pub fn decode_error(item: impl Into<String>, reason: &impl ToString) -> TilecutError {
    TilecutError::Decode {
        item: item.into(),
        reason: reason.to_string(),
    }
}
