//! The per-task toolbox
//!
//! A [`TaskToolbox`] is everything a running task needs to conduct its
//! business: the node's collaborators bound to the task's identity, and the
//! task's private working directory. One toolbox is built per dispatched task
//! by a [`TaskToolboxFactory`] and dropped when the task finishes.
//!
//! ```text
//! <baseTaskDir>/<taskId>/work/
//!   fetched_segments/
//!     <dataSource>/<start>_<end>/<version>/<partitionNum>/
//! ```

use crate::services::{
    DataSegmentAnnouncer, DataSegmentKiller, DataSegmentPusher, JsonMapper, MonitorScheduler,
    QueryRunnerFactoryConglomerate, ServerView, ServiceEmitter, TaskActionClient, TaskServices,
};
use crate::{Result, TaskConfig, TaskId};
use std::path::PathBuf;
use std::sync::Arc;
use stratum_segments::{MaterializedSegments, SegmentMaterializer, SegmentReference};

/// Name of the per-task working directory
pub const WORK_DIR: &str = "work";

/// Directory under the work directory receiving materialized segments
pub const FETCHED_SEGMENTS_DIR: &str = "fetched_segments";

/// Read-only bundle of collaborators for one task
#[derive(Debug, Clone)]
pub struct TaskToolbox {
    config: Arc<TaskConfig>,
    task_id: TaskId,
    services: TaskServices,
    materializer: Arc<SegmentMaterializer>,
}

impl TaskToolbox {
    /// Assemble a toolbox; performs no I/O
    #[must_use]
    pub fn new(
        config: Arc<TaskConfig>,
        task_id: TaskId,
        services: TaskServices,
        materializer: Arc<SegmentMaterializer>,
    ) -> Self {
        Self {
            config,
            task_id,
            services,
            materializer,
        }
    }

    /// Node-wide task configuration
    #[must_use]
    pub fn config(&self) -> &TaskConfig {
        &self.config
    }

    /// Identity of the task this toolbox serves
    #[must_use]
    pub fn task_id(&self) -> &TaskId {
        &self.task_id
    }

    /// A fresh action client acting on behalf of this task
    #[must_use]
    pub fn task_action_client(&self) -> Arc<dyn TaskActionClient> {
        self.services.action_client_factory.create(&self.task_id)
    }

    /// Metric and alert sink
    #[must_use]
    pub fn emitter(&self) -> &Arc<dyn ServiceEmitter> {
        &self.services.emitter
    }

    /// Uploads built segments to deep storage
    #[must_use]
    pub fn segment_pusher(&self) -> &Arc<dyn DataSegmentPusher> {
        &self.services.segment_pusher
    }

    /// Deletes segment data from deep storage
    #[must_use]
    pub fn segment_killer(&self) -> &Arc<dyn DataSegmentKiller> {
        &self.services.segment_killer
    }

    /// Advertises segments the task serves
    #[must_use]
    pub fn segment_announcer(&self) -> &Arc<dyn DataSegmentAnnouncer> {
        &self.services.segment_announcer
    }

    /// Cluster view for awaiting handoff of new segments
    #[must_use]
    pub fn new_segment_server_view(&self) -> &Arc<dyn ServerView> {
        &self.services.new_segment_server_view
    }

    /// Query engines available on this node
    #[must_use]
    pub fn query_runner_factory_conglomerate(&self) -> &Arc<dyn QueryRunnerFactoryConglomerate> {
        &self.services.query_runner_factory_conglomerate
    }

    /// Scheduler for periodic monitors
    #[must_use]
    pub fn monitor_scheduler(&self) -> &Arc<dyn MonitorScheduler> {
        &self.services.monitor_scheduler
    }

    /// Shared serializer
    #[must_use]
    pub fn json_mapper(&self) -> &JsonMapper {
        &self.services.json_mapper
    }

    /// `<baseTaskDir>/<taskId>/work`; may not exist yet
    #[must_use]
    pub fn task_work_dir(&self) -> PathBuf {
        self.config
            .base_task_dir()
            .join(self.task_id.as_str())
            .join(WORK_DIR)
    }

    /// Directory segments are materialized into
    #[must_use]
    pub fn fetched_segments_dir(&self) -> PathBuf {
        self.task_work_dir().join(FETCHED_SEGMENTS_DIR)
    }

    /// Make `segments` available as local files, in input order
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Segments`] wrapping the first segment that could
    /// not be pulled or resolved. Files fetched before the failure are left in
    /// place.
    pub fn materialize_segments(
        &self,
        segments: &[SegmentReference],
    ) -> Result<MaterializedSegments> {
        let _span = tracing::info_span!(
            "materialize_segments",
            task_id = %self.task_id,
            count = segments.len()
        )
        .entered();
        Ok(self
            .materializer
            .materialize(&self.fetched_segments_dir(), segments)?)
    }
}

/// Builds one toolbox per task from the node's shared collaborators
#[derive(Debug, Clone)]
pub struct TaskToolboxFactory {
    config: Arc<TaskConfig>,
    services: TaskServices,
    materializer: Arc<SegmentMaterializer>,
}

impl TaskToolboxFactory {
    /// Create a factory, validating the configuration once
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Configuration`] if the configured directories
    /// are unusable.
    pub fn new(
        config: TaskConfig,
        services: TaskServices,
        materializer: SegmentMaterializer,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config: Arc::new(config),
            services,
            materializer: Arc::new(materializer),
        })
    }

    /// Node-wide task configuration
    #[must_use]
    pub fn config(&self) -> &TaskConfig {
        &self.config
    }

    /// Build the toolbox for a dispatched task
    #[must_use]
    pub fn build(&self, task_id: TaskId) -> TaskToolbox {
        tracing::debug!(task_id = %task_id, "Building task toolbox");
        TaskToolbox::new(
            Arc::clone(&self.config),
            task_id,
            self.services.clone(),
            Arc::clone(&self.materializer),
        )
    }
}
