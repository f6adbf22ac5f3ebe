//! Error types for model building, synthesis and image I/O

use std::fmt;
use std::path::PathBuf;

/// Every failure the library and the command-line tool can report
#[derive(Debug)]
pub enum MarkovError {
    /// A source file could not be decoded
    ImageLoad {
        /// File being decoded
        path: PathBuf,
        /// Decoder error
        source: image::ImageError,
    },

    /// A generated grid could not be encoded or written
    ImageExport {
        /// Destination file
        path: PathBuf,
        /// Encoder error
        source: image::ImageError,
    },

    /// Image decoded fine but is not in a format this tool writes back
    UnsupportedFormat {
        /// File that was sniffed
        path: PathBuf,
        /// Detected format name
        format: String,
    },

    /// A user-supplied value is out of range or conflicts with another option
    InvalidParameter {
        /// Option or argument name
        parameter: &'static str,
        /// Rejected value as given
        value: String,
        /// What the value must satisfy
        reason: String,
    },

    /// Source pixels or model state cannot support the requested operation
    ///
    /// Raised for zero-area bounds and for synthesis from a model with no states.
    InvalidSourceData {
        /// What the source lacks
        reason: String,
    },

    /// A uniform random draw was requested from an empty sequence
    EmptySelection {
        /// What was being sampled
        what: &'static str,
    },

    /// Synthesis left cells unset and the caller required full coverage
    IncompleteCoverage {
        /// Number of cells never assigned a color
        unset: usize,
        /// Total number of cells in the output grid
        total: usize,
    },

    /// Reading a directory, opening a file or creating a directory failed
    FileSystem {
        /// Path the operation was applied to
        path: PathBuf,
        /// Short name of the operation
        operation: &'static str,
        /// I/O error from the operating system
        source: std::io::Error,
    },
}

impl fmt::Display for MarkovError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ImageLoad { path, source } => {
                write!(f, "Cannot decode '{}': {source}", path.display())
            }
            Self::ImageExport { path, source } => {
                write!(f, "Cannot write image '{}': {source}", path.display())
            }
            Self::UnsupportedFormat { path, format } => write!(
                f,
                "Unsupported image format '{format}' for '{}'; supported formats are: png",
                path.display()
            ),
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => write!(f, "Invalid {parameter} '{value}': {reason}"),
            Self::InvalidSourceData { reason } => write!(f, "Unusable source: {reason}"),
            Self::EmptySelection { what } => write!(f, "Cannot sample from an empty {what}"),
            Self::IncompleteCoverage { unset, total } => {
                write!(f, "Synthesis left {unset} of {total} pixels unset")
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => write!(f, "Cannot {operation} '{}': {source}", path.display()),
        }
    }
}

impl std::error::Error for MarkovError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageLoad { source, .. } | Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            Self::UnsupportedFormat { .. }
            | Self::InvalidParameter { .. }
            | Self::InvalidSourceData { .. }
            | Self::EmptySelection { .. }
            | Self::IncompleteCoverage { .. } => None,
        }
    }
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, MarkovError>;

impl From<std::io::Error> for MarkovError {
    fn from(source: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::new(),
            operation: "access",
            source,
        }
    }
}

/// Build an [`MarkovError::InvalidParameter`]
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> MarkovError {
    MarkovError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Build an [`MarkovError::InvalidSourceData`]
pub fn invalid_source(reason: &impl ToString) -> MarkovError {
    MarkovError::InvalidSourceData {
        reason: reason.to_string(),
    }
}
