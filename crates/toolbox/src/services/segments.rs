//! Hooks for publishing, announcing and deleting segments

use crate::Result;
use std::path::Path;
use stratum_segments::SegmentReference;

/// Uploads a locally built index to deep storage
pub trait DataSegmentPusher: Send + Sync {
    /// Push the index in `index_dir` and return the segment with its final
    /// load spec and size
    fn push(&self, index_dir: &Path, segment: &SegmentReference) -> Result<SegmentReference>;
}

/// Deletes segment data from deep storage
pub trait DataSegmentKiller: Send + Sync {
    /// Remove the segment's data; removing absent data is not an error
    fn kill(&self, segment: &SegmentReference) -> Result<()>;
}

/// Advertises segments a task is serving to the rest of the cluster
pub trait DataSegmentAnnouncer: Send + Sync {
    /// Start advertising `segment`
    fn announce_segment(&self, segment: &SegmentReference) -> Result<()>;

    /// Stop advertising `segment`
    fn unannounce_segment(&self, segment: &SegmentReference) -> Result<()>;
}
