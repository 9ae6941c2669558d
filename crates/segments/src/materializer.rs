//! Materializing segment lists into a local directory
//!
//! Each segment is laid out under `target_root/<storage dir>` (see
//! [`SegmentReference::storage_dir`]), pulled there by the injected
//! [`SegmentPuller`] and resolved by the injected [`QueryableIndexFactory`].
//! The first failure aborts the whole call; files fetched before it stay on
//! disk for the puller's cache to reuse.

use crate::factory::QueryableIndexFactory;
use crate::puller::SegmentPuller;
use crate::{Error, Result, SegmentReference};
use indexmap::IndexMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Local paths of materialized segments, in input order
///
/// A segment listed twice keeps the position of its first occurrence and the
/// path of its last.
pub type MaterializedSegments = IndexMap<SegmentReference, PathBuf>;

/// Reusable strategy turning segment references into local index paths
#[derive(Clone)]
pub struct SegmentMaterializer {
    puller: Arc<dyn SegmentPuller>,
    factory: Arc<dyn QueryableIndexFactory>,
}

impl std::fmt::Debug for SegmentMaterializer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SegmentMaterializer").finish_non_exhaustive()
    }
}

impl SegmentMaterializer {
    /// Create a materializer from a puller and an index factory
    #[must_use]
    pub fn new(puller: Arc<dyn SegmentPuller>, factory: Arc<dyn QueryableIndexFactory>) -> Self {
        Self { puller, factory }
    }

    /// Materialize `segments` under `target_root`
    ///
    /// Returns one entry per distinct segment. Fails with
    /// [`Error::SegmentLoading`] naming the first segment that could not be
    /// pulled or resolved; no partial map is returned.
    pub fn materialize(
        &self,
        target_root: &Path,
        segments: &[SegmentReference],
    ) -> Result<MaterializedSegments> {
        let mut materialized = MaterializedSegments::with_capacity(segments.len());
        for segment in segments {
            let path = self.load(target_root, segment).map_err(|source| {
                tracing::warn!(segment = %segment, error = %source, "Segment materialization failed");
                Error::segment_loading(segment, source)
            })?;
            materialized.insert(segment.clone(), path);
        }

        tracing::info!(
            root = %target_root.display(),
            requested = segments.len(),
            materialized = materialized.len(),
            "Materialized segments"
        );
        Ok(materialized)
    }

    fn load(&self, target_root: &Path, segment: &SegmentReference) -> Result<PathBuf> {
        let dir = target_root.join(segment.storage_dir()?);
        let artifact = self.puller.pull(segment, &dir)?;
        let path = match self.factory.resolve(&artifact) {
            Ok(path) => path,
            Err(err) => {
                if let Err(invalidate_err) = self.puller.invalidate(segment, &dir) {
                    tracing::warn!(
                        segment = %segment,
                        error = %invalidate_err,
                        "Failed to invalidate unresolvable segment"
                    );
                }
                return Err(err);
            }
        };
        tracing::debug!(segment = %segment, path = %path.display(), "Segment ready");
        Ok(path)
    }
}
