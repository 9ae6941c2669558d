//! Collaborators a task reaches through its toolbox
//!
//! Every collaborator is a process-wide singleton owned by the node and shared
//! with each task as an `Arc<dyn …>`. Implementations handle their own
//! synchronization.

pub mod action;
pub mod emitter;
pub mod mapper;
pub mod monitor;
pub mod query;
pub mod segments;
pub mod server_view;

pub use self::action::{TaskAction, TaskActionClient, TaskActionClientFactory};
pub use self::emitter::{ServiceEmitter, ServiceEvent, Severity};
pub use self::mapper::JsonMapper;
pub use self::monitor::{Monitor, MonitorScheduler};
pub use self::query::{QueryRunnerFactory, QueryRunnerFactoryConglomerate};
pub use self::segments::{DataSegmentAnnouncer, DataSegmentKiller, DataSegmentPusher};
pub use self::server_view::{CallbackAction, SegmentCallback, ServerView};

use std::sync::Arc;

/// The node's collaborators, injected into every toolbox
#[derive(Clone)]
pub struct TaskServices {
    /// Binds action clients to tasks
    pub action_client_factory: Arc<dyn TaskActionClientFactory>,
    /// Metric and alert sink
    pub emitter: Arc<dyn ServiceEmitter>,
    /// Uploads built segments
    pub segment_pusher: Arc<dyn DataSegmentPusher>,
    /// Deletes segment data
    pub segment_killer: Arc<dyn DataSegmentKiller>,
    /// Advertises served segments
    pub segment_announcer: Arc<dyn DataSegmentAnnouncer>,
    /// Cluster view used to await handoff of new segments
    pub new_segment_server_view: Arc<dyn ServerView>,
    /// Query engines available to tasks that serve queries
    pub query_runner_factory_conglomerate: Arc<dyn QueryRunnerFactoryConglomerate>,
    /// Schedules periodic monitors
    pub monitor_scheduler: Arc<dyn MonitorScheduler>,
    /// Shared serializer
    pub json_mapper: JsonMapper,
}

impl std::fmt::Debug for TaskServices {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskServices")
            .field("json_mapper", &self.json_mapper)
            .finish_non_exhaustive()
    }
}
