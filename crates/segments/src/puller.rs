//! Segment pullers
//!
//! A puller makes one segment's raw data present in a local directory. The
//! [`CachingPuller`] decorator adds the download-marker cache so a segment
//! that was fully fetched once is not fetched again.

use crate::{Error, Result, SegmentReference};
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the marker written while a segment download is in progress
pub const DOWNLOAD_START_MARKER: &str = "downloadStartMarker";

/// Fetches a segment's data into a local directory
pub trait SegmentPuller: Send + Sync {
    /// Ensure the segment's data is present under `target_dir` and return the
    /// local artifact path
    ///
    /// Fails with [`Error::Pull`] when the store is unreachable or the segment
    /// is unknown to it.
    fn pull(&self, segment: &SegmentReference, target_dir: &Path) -> Result<PathBuf>;

    /// Mark the data under `target_dir` as unusable so the next pull fetches
    /// it again
    fn invalidate(&self, _segment: &SegmentReference, _target_dir: &Path) -> Result<()> {
        Ok(())
    }
}

/// Skips the inner puller when a previous download of the segment completed
///
/// The inner puller must write the segment into `target_dir` itself; a cache
/// hit returns `target_dir` as the artifact.
#[derive(Debug, Clone)]
pub struct CachingPuller<P> {
    inner: P,
}

impl<P: SegmentPuller> CachingPuller<P> {
    /// Wrap a puller with the download-marker cache
    #[must_use]
    pub fn new(inner: P) -> Self {
        Self { inner }
    }

    /// The wrapped puller
    #[must_use]
    pub fn inner(&self) -> &P {
        &self.inner
    }
}

/// Whether `dir` holds a completed download
#[must_use]
pub fn is_loaded(dir: &Path) -> bool {
    if !dir.is_dir() || dir.join(DOWNLOAD_START_MARKER).exists() {
        return false;
    }
    fs::read_dir(dir).is_ok_and(|mut entries| entries.next().is_some())
}

impl<P: SegmentPuller> SegmentPuller for CachingPuller<P> {
    fn pull(&self, segment: &SegmentReference, target_dir: &Path) -> Result<PathBuf> {
        if is_loaded(target_dir) {
            tracing::debug!(
                segment = %segment,
                dir = %target_dir.display(),
                "Segment already present locally, skipping pull"
            );
            return Ok(target_dir.to_path_buf());
        }

        let marker = target_dir.join(DOWNLOAD_START_MARKER);
        if marker.exists() {
            tracing::debug!(
                segment = %segment,
                dir = %target_dir.display(),
                "Discarding incomplete download"
            );
            fs::remove_dir_all(target_dir)
                .map_err(|e| Error::io(e, target_dir, "remove_dir_all"))?;
        }

        fs::create_dir_all(target_dir).map_err(|e| Error::io(e, target_dir, "create_dir_all"))?;
        fs::write(&marker, b"").map_err(|e| Error::io(e, &marker, "write"))?;

        // A failed pull leaves the marker behind so the next attempt re-fetches.
        let artifact = self.inner.pull(segment, target_dir)?;

        fs::remove_file(&marker).map_err(|e| Error::io(e, &marker, "remove_file"))?;
        tracing::debug!(segment = %segment, artifact = %artifact.display(), "Pulled segment");
        Ok(artifact)
    }

    fn invalidate(&self, segment: &SegmentReference, target_dir: &Path) -> Result<()> {
        if !target_dir.is_dir() {
            return Ok(());
        }
        let marker = target_dir.join(DOWNLOAD_START_MARKER);
        fs::write(&marker, b"").map_err(|e| Error::io(e, &marker, "write"))?;
        tracing::debug!(segment = %segment, dir = %target_dir.display(), "Invalidated cached segment");
        Ok(())
    }
}
