//! Task actions submitted to the overlord

use crate::{Result, TaskId};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use stratum_segments::{Interval, SegmentReference};

/// A request a task makes to the overlord on its own behalf
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum TaskAction {
    /// Acquire a lock on an interval of the task's data source
    LockAcquire {
        /// Interval to lock
        interval: Interval,
    },
    /// List the locks the task currently holds
    LockList,
    /// Release a previously acquired lock
    LockRelease {
        /// Interval to release
        interval: Interval,
    },
    /// List the segments currently used for a data source and interval
    SegmentListUsed {
        /// Data source to query
        data_source: String,
        /// Interval to query
        interval: Interval,
    },
    /// Publish newly built segments
    SegmentInsertion {
        /// Segments to publish
        segments: Vec<SegmentReference>,
    },
    /// Permanently remove segments from metadata
    SegmentNuke {
        /// Segments to remove
        segments: Vec<SegmentReference>,
    },
}

impl TaskAction {
    /// Wire name of the action type
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::LockAcquire { .. } => "lockAcquire",
            Self::LockList => "lockList",
            Self::LockRelease { .. } => "lockRelease",
            Self::SegmentListUsed { .. } => "segmentListUsed",
            Self::SegmentInsertion { .. } => "segmentInsertion",
            Self::SegmentNuke { .. } => "segmentNuke",
        }
    }
}

/// Submits actions for one task
pub trait TaskActionClient: Send + Sync {
    /// Submit an action and return the overlord's JSON reply
    fn submit(&self, action: TaskAction) -> Result<serde_json::Value>;
}

/// Binds action clients to task identities
///
/// Binding never fails; connection problems surface on first `submit`.
pub trait TaskActionClientFactory: Send + Sync {
    /// Create a client acting on behalf of `task_id`
    fn create(&self, task_id: &TaskId) -> Arc<dyn TaskActionClient>;
}
