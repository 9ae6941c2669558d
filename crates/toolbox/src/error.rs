//! Error types for the toolbox crate

// Rust 1.92 compiler bug: false positives for thiserror/miette derive macro fields
// https://github.com/rust-lang/rust/issues/147648
#![allow(unused_assignments)]

use miette::Diagnostic;
use std::path::Path;
use thiserror::Error;

/// Error type for task toolbox operations
#[derive(Error, Debug, Diagnostic)]
pub enum Error {
    /// Task configuration or identity cannot produce a usable path
    #[error("Configuration error: {message}")]
    #[diagnostic(
        code(stratum::toolbox::config),
        help("Check the task base directories and the task id assigned by the scheduler")
    )]
    Configuration {
        /// Error message describing the configuration issue
        message: String,
    },

    /// Segment materialization failed
    #[error(transparent)]
    #[diagnostic(transparent)]
    Segments(#[from] stratum_segments::Error),

    /// I/O error while reading configuration
    #[error("I/O {operation} failed{}", path.as_ref().map_or(String::new(), |p| format!(": {}", p.display())))]
    #[diagnostic(code(stratum::toolbox::io))]
    Io {
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
        /// Path that caused the error, if available
        path: Option<Box<Path>>,
        /// Operation that failed
        operation: String,
    },

    /// Serialization error
    #[error("Serialization error: {message}")]
    #[diagnostic(code(stratum::toolbox::serialization))]
    Serialization {
        /// Error message describing the serialization issue
        message: String,
    },

    /// A task action was rejected or could not be delivered
    #[error("Task action {action} failed: {message}")]
    #[diagnostic(
        code(stratum::toolbox::action),
        help("The overlord may be unreachable or may have revoked the task's locks")
    )]
    Action {
        /// Type of the action that failed
        action: String,
        /// Error message from the action client
        message: String,
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

    /// Create a serialization error
    #[must_use]
    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::Serialization {
            message: msg.into(),
        }
    }

    /// Create a task action error
    #[must_use]
    pub fn action(action: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Action {
            action: action.into(),
            message: msg.into(),
        }
    }
}

/// Result type for toolbox operations
pub type Result<T> = std::result::Result<T, Error>;
