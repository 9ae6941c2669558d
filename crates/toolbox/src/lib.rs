//! Per-task execution toolbox for stratum indexing tasks
//!
//! The scheduler on an indexing node builds one [`TaskToolboxFactory`] from
//! the node's configuration and collaborators, then one [`TaskToolbox`] per
//! dispatched task. A toolbox gives the task:
//! - Accessors for the shared collaborators (action client, emitter, segment
//!   hooks, server view, query engines, monitor scheduler, serializer)
//! - A deterministic, task-private working directory
//! - Materialization of remote segments into that directory
//!
//! All calls are synchronous and run on the caller's thread.

// TODO(toolbox-docs): Add # Errors documentation to config and mapper functions
#![expect(
    clippy::missing_errors_doc,
    reason = "Error documentation to be added incrementally"
)]

mod error;

pub mod config;
pub mod services;
pub mod task;
pub mod toolbox;

// Re-export error types at crate root
pub use error::{Error, Result};

// Re-export main types
pub use config::TaskConfig;
pub use services::TaskServices;
pub use task::TaskId;
pub use toolbox::{TaskToolbox, TaskToolboxFactory};

pub use stratum_segments::{MaterializedSegments, SegmentReference};
