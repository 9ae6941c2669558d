//! Cluster view of which servers hold which segments

use std::sync::Arc;
use stratum_segments::SegmentReference;

/// Whether a callback wants further notifications
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallbackAction {
    /// Keep the callback registered
    Continue,
    /// Drop the callback after this notification
    Unregister,
}

/// Receives segment movements observed in the cluster
pub trait SegmentCallback: Send + Sync {
    /// `server` started serving `segment`
    fn segment_added(&self, server: &str, segment: &SegmentReference) -> CallbackAction;

    /// `server` stopped serving `segment`
    fn segment_removed(&self, server: &str, segment: &SegmentReference) -> CallbackAction;
}

/// Live view of segment placement, used by tasks waiting for handoff
pub trait ServerView: Send + Sync {
    /// Register a callback for future segment movements
    fn register_segment_callback(&self, callback: Arc<dyn SegmentCallback>);
}
