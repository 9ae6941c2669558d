//! Turning pulled artifacts into queryable index locations

use crate::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// File recording the on-disk format version of an index directory
pub const VERSION_FILE: &str = "version.bin";

/// Index format versions [`DirectoryIndexFactory`] accepts
pub const SUPPORTED_INDEX_VERSIONS: [u32; 2] = [8, 9];

/// Resolves a local artifact into the path a task reads the segment from
pub trait QueryableIndexFactory: Send + Sync {
    /// Fails with [`Error::Format`] on corrupt or unrecognized artifacts.
    fn resolve(&self, artifact: &Path) -> Result<PathBuf>;
}

/// Accepts columnar index directories carrying a supported `version.bin`
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectoryIndexFactory;

impl DirectoryIndexFactory {
    /// Create the factory
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Read the big-endian format version of an index directory
    pub fn index_version(dir: &Path) -> Result<u32> {
        let path = dir.join(VERSION_FILE);
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(Error::format(dir, format!("missing {VERSION_FILE}")));
            }
            Err(e) => return Err(Error::io(e, &path, "read")),
        };
        let raw: [u8; 4] = bytes.as_slice().try_into().map_err(|_| {
            Error::format(
                dir,
                format!("{VERSION_FILE} holds {} bytes, expected 4", bytes.len()),
            )
        })?;
        Ok(u32::from_be_bytes(raw))
    }
}

impl QueryableIndexFactory for DirectoryIndexFactory {
    fn resolve(&self, artifact: &Path) -> Result<PathBuf> {
        if !artifact.is_dir() {
            return Err(Error::format(artifact, "not an index directory"));
        }
        let version = Self::index_version(artifact)?;
        if !SUPPORTED_INDEX_VERSIONS.contains(&version) {
            return Err(Error::format(
                artifact,
                format!("unsupported index version {version}"),
            ));
        }
        tracing::trace!(dir = %artifact.display(), version, "Resolved index directory");
        Ok(artifact.to_path_buf())
    }
}
