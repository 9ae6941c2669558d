//! Task configuration
//!
//! Static settings shared by every task on a node. Read from TOML:
//!
//! ```toml
//! baseDir = "/var/stratum"
//! baseTaskDir = "/var/stratum/tasks"   # optional
//! defaultRowFlushBoundary = 500000     # optional
//! ```
//!
//! Environment overrides (non-empty values win):
//! - `STRATUM_BASE_DIR` - Override `baseDir`
//! - `STRATUM_BASE_TASK_DIR` - Override `baseTaskDir`

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable overriding the base directory
pub const BASE_DIR_ENV: &str = "STRATUM_BASE_DIR";

/// Environment variable overriding the base task directory
pub const BASE_TASK_DIR_ENV: &str = "STRATUM_BASE_TASK_DIR";

/// Static configuration shared by all tasks on a node
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TaskConfig {
    /// Root of all node-local state
    pub base_dir: PathBuf,

    /// Directory holding one subdirectory per task
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_task_dir: Option<PathBuf>,

    /// Rows an indexing task buffers before persisting
    #[serde(default = "default_row_flush_boundary")]
    pub default_row_flush_boundary: u32,
}

fn default_row_flush_boundary() -> u32 {
    500_000
}

impl Default for TaskConfig {
    fn default() -> Self {
        Self {
            base_dir: std::env::temp_dir().join("stratum"),
            base_task_dir: None,
            default_row_flush_boundary: default_row_flush_boundary(),
        }
    }
}

impl TaskConfig {
    /// Create a configuration rooted at `base_dir`
    #[must_use]
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            ..Self::default()
        }
    }

    /// Set an explicit base task directory
    #[must_use]
    pub fn with_base_task_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.base_task_dir = Some(dir.into());
        self
    }

    /// Directory holding per-task directories
    ///
    /// Defaults to `<baseDir>/persistent/task`.
    #[must_use]
    pub fn base_task_dir(&self) -> PathBuf {
        self.base_task_dir
            .clone()
            .unwrap_or_else(|| self.base_dir.join("persistent").join("task"))
    }

    /// Parse and validate a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)
            .map_err(|e| Error::configuration(format!("invalid task config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::io(e, path, "read"))?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!(path = %path.display(), base_task_dir = %config.base_task_dir().display(), "Loaded task config");
        Ok(config)
    }

    /// Apply `STRATUM_BASE_DIR` and `STRATUM_BASE_TASK_DIR` overrides
    #[must_use]
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(dir) = std::env::var(BASE_DIR_ENV)
            && !dir.trim().is_empty()
        {
            self.base_dir = PathBuf::from(dir);
        }
        if let Ok(dir) = std::env::var(BASE_TASK_DIR_ENV)
            && !dir.trim().is_empty()
        {
            self.base_task_dir = Some(PathBuf::from(dir));
        }
        self
    }

    /// Reject directories that cannot hold task state
    pub fn validate(&self) -> Result<()> {
        if self.base_dir.as_os_str().is_empty() {
            return Err(Error::configuration("baseDir must not be empty"));
        }
        if let Some(dir) = &self.base_task_dir
            && dir.as_os_str().is_empty()
        {
            return Err(Error::configuration("baseTaskDir must not be empty"));
        }
        if self.default_row_flush_boundary == 0 {
            return Err(Error::configuration(
                "defaultRowFlushBoundary must be greater than zero",
            ));
        }
        Ok(())
    }
}
