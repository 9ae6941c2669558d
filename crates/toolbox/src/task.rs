//! Task identity

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier the scheduler assigns to one task instance
///
/// The id becomes a directory name under the base task directory, so it must
/// be a single plain path component.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TaskId(String);

impl TaskId {
    /// Validate and wrap a task id
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] for an empty id, `.` or `..`, or an id
    /// containing a path separator or NUL.
    pub fn new(id: impl Into<String>) -> Result<Self> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(Error::configuration("task id must not be empty"));
        }
        if id == "." || id == ".." {
            return Err(Error::configuration(format!(
                "task id '{id}' is not a usable directory name"
            )));
        }
        if id.contains(['/', '\\', '\0']) {
            return Err(Error::configuration(format!(
                "task id '{id}' must not contain path separators"
            )));
        }
        Ok(Self(id))
    }

    /// Borrow the id as a string
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl TryFrom<String> for TaskId {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}

impl From<TaskId> for String {
    fn from(id: TaskId) -> Self {
        id.0
    }
}

impl AsRef<str> for TaskId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_scheduler_ids() {
        let id = TaskId::new("index_wikipedia_2024-01-01T00:00:00.000Z").unwrap();
        assert_eq!(id.as_str(), "index_wikipedia_2024-01-01T00:00:00.000Z");
        assert_eq!(id.to_string(), id.as_str());
    }

    #[test]
    fn test_rejects_empty() {
        assert!(TaskId::new("").is_err());
        assert!(TaskId::new("   ").is_err());
    }

    #[test]
    fn test_rejects_path_like_ids() {
        for bad in [".", "..", "a/b", "a\\b", "../escape", "nul\0"] {
            let err = TaskId::new(bad).unwrap_err();
            assert!(matches!(err, Error::Configuration { .. }), "{bad:?}");
        }
    }

    #[test]
    fn test_deserialize_validates() {
        let ok: TaskId = serde_json::from_str("\"index_task_7\"").unwrap();
        assert_eq!(ok.as_str(), "index_task_7");
        assert!(serde_json::from_str::<TaskId>("\"\"").is_err());
    }
}
