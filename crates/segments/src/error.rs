//! Error types for the segments crate

// Rust 1.92 compiler bug: false positives for thiserror/miette derive macro fields
// https://github.com/rust-lang/rust/issues/147648
#![allow(unused_assignments)]

use crate::SegmentReference;
use miette::Diagnostic;
use std::path::Path;
use thiserror::Error;

/// Error type for segment operations
#[derive(Error, Debug, Diagnostic)]
pub enum Error {
    /// I/O error while laying out or copying segment files
    #[error("I/O {operation} failed{}", path.as_ref().map_or(String::new(), |p| format!(": {}", p.display())))]
    #[diagnostic(
        code(stratum::segments::io),
        help("Check file permissions and available disk space under the task directory")
    )]
    Io {
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
        /// Path that caused the error, if available
        path: Option<Box<Path>>,
        /// Operation that failed (e.g., "read", "copy", "create_dir_all")
        operation: String,
    },

    /// The puller could not obtain the segment's data
    #[error("Failed to pull segment {segment}: {message}")]
    #[diagnostic(
        code(stratum::segments::pull),
        help("Check that the segment's load spec points at reachable deep storage")
    )]
    Pull {
        /// Identifier of the segment being pulled
        segment: String,
        /// Error message describing the pull failure
        message: String,
    },

    /// The pulled artifact is not a recognizable index
    #[error("Unrecognized segment artifact at {}: {message}", path.display())]
    #[diagnostic(
        code(stratum::segments::format),
        help("The artifact may be corrupt or written by an unsupported index version")
    )]
    Format {
        /// Artifact that failed to resolve
        path: Box<Path>,
        /// Error message describing the format issue
        message: String,
    },

    /// Configuration or validation error
    #[error("Segment configuration error: {message}")]
    #[diagnostic(code(stratum::segments::config))]
    Configuration {
        /// Error message describing the configuration issue
        message: String,
    },

    /// A segment could not be materialized for a task
    #[error("Failed to load segment {}: {source}", segment.id())]
    #[diagnostic(
        code(stratum::segments::loading),
        help("No segments were returned; already fetched files were left in place")
    )]
    SegmentLoading {
        /// The segment that could not be obtained
        segment: Box<SegmentReference>,
        /// The pull or resolve failure
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Create a configuration error
    #[must_use]
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration {
            message: msg.into(),
        }
    }

    /// Create an I/O error with path context
    #[must_use]
    pub fn io(
        source: std::io::Error,
        path: impl AsRef<Path>,
        operation: impl Into<String>,
    ) -> Self {
        Self::Io {
            source,
            path: Some(path.as_ref().into()),
            operation: operation.into(),
        }
    }

    /// Create a pull error for a segment
    #[must_use]
    pub fn pull(segment: &SegmentReference, msg: impl Into<String>) -> Self {
        Self::Pull {
            segment: segment.id(),
            message: msg.into(),
        }
    }

    /// Create a format error for an artifact
    #[must_use]
    pub fn format(path: impl AsRef<Path>, msg: impl Into<String>) -> Self {
        Self::Format {
            path: path.as_ref().into(),
            message: msg.into(),
        }
    }

    /// Wrap a pull or resolve failure with the segment it belongs to
    #[must_use]
    pub fn segment_loading(segment: &SegmentReference, source: Self) -> Self {
        Self::SegmentLoading {
            segment: Box::new(segment.clone()),
            source: Box::new(source),
        }
    }

    /// The segment a loading failure is about, if any
    #[must_use]
    pub fn segment(&self) -> Option<&SegmentReference> {
        match self {
            Self::SegmentLoading { segment, .. } => Some(segment.as_ref()),
            _ => None,
        }
    }
}

/// Result type for segment operations
pub type Result<T> = std::result::Result<T, Error>;
