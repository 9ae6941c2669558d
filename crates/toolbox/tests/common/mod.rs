//! Fake collaborators shared by the toolbox integration tests.
#![allow(dead_code)]

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use stratum_segments::{
    CachingPuller, DirectoryIndexFactory, LocalDeepStoragePuller, SegmentMaterializer,
    SegmentReference,
};
use stratum_toolbox::services::{
    CallbackAction, DataSegmentAnnouncer, DataSegmentKiller, DataSegmentPusher, JsonMapper,
    Monitor, MonitorScheduler, QueryRunnerFactory, QueryRunnerFactoryConglomerate,
    SegmentCallback, ServerView, ServiceEmitter, ServiceEvent, TaskAction, TaskActionClient,
    TaskActionClientFactory,
};
use stratum_toolbox::{Result, TaskId, TaskServices};

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter(tracing_subscriber::EnvFilter::new("stratum=debug"))
        .try_init();
}

#[derive(Default)]
pub struct RecordingActionClientFactory {
    pub created: Mutex<Vec<TaskId>>,
}

struct EchoActionClient {
    task_id: TaskId,
}

impl TaskActionClient for EchoActionClient {
    fn submit(&self, action: TaskAction) -> Result<serde_json::Value> {
        Ok(serde_json::json!({
            "task": self.task_id.as_str(),
            "action": action.type_name(),
        }))
    }
}

impl TaskActionClientFactory for RecordingActionClientFactory {
    fn create(&self, task_id: &TaskId) -> Arc<dyn TaskActionClient> {
        self.created.lock().unwrap().push(task_id.clone());
        Arc::new(EchoActionClient {
            task_id: task_id.clone(),
        })
    }
}

#[derive(Default)]
pub struct RecordingEmitter {
    pub events: Mutex<Vec<ServiceEvent>>,
}

impl ServiceEmitter for RecordingEmitter {
    fn emit(&self, event: ServiceEvent) {
        self.events.lock().unwrap().push(event);
    }

    fn flush(&self) -> Result<()> {
        Ok(())
    }
}

pub struct NoopSegmentHooks;

impl DataSegmentPusher for NoopSegmentHooks {
    fn push(&self, _index_dir: &Path, segment: &SegmentReference) -> Result<SegmentReference> {
        Ok(segment.clone())
    }
}

impl DataSegmentKiller for NoopSegmentHooks {
    fn kill(&self, _segment: &SegmentReference) -> Result<()> {
        Ok(())
    }
}

impl DataSegmentAnnouncer for NoopSegmentHooks {
    fn announce_segment(&self, _segment: &SegmentReference) -> Result<()> {
        Ok(())
    }

    fn unannounce_segment(&self, _segment: &SegmentReference) -> Result<()> {
        Ok(())
    }
}

#[derive(Default)]
pub struct RecordingServerView {
    pub callbacks: Mutex<Vec<Arc<dyn SegmentCallback>>>,
}

impl ServerView for RecordingServerView {
    fn register_segment_callback(&self, callback: Arc<dyn SegmentCallback>) {
        self.callbacks.lock().unwrap().push(callback);
    }
}

pub struct AlwaysContinue;

impl SegmentCallback for AlwaysContinue {
    fn segment_added(&self, _server: &str, _segment: &SegmentReference) -> CallbackAction {
        CallbackAction::Continue
    }

    fn segment_removed(&self, _server: &str, _segment: &SegmentReference) -> CallbackAction {
        CallbackAction::Continue
    }
}

pub struct TimeseriesOnly;

struct TimeseriesFactory;

impl QueryRunnerFactory for TimeseriesFactory {
    fn query_type(&self) -> &str {
        "timeseries"
    }
}

impl QueryRunnerFactoryConglomerate for TimeseriesOnly {
    fn find_factory(&self, query_type: &str) -> Option<Arc<dyn QueryRunnerFactory>> {
        (query_type == "timeseries").then(|| Arc::new(TimeseriesFactory) as Arc<dyn QueryRunnerFactory>)
    }
}

#[derive(Default)]
pub struct RecordingMonitorScheduler {
    pub monitors: Mutex<Vec<Arc<dyn Monitor>>>,
}

impl MonitorScheduler for RecordingMonitorScheduler {
    fn add_monitor(&self, monitor: Arc<dyn Monitor>) {
        monitor.start();
        self.monitors.lock().unwrap().push(monitor);
    }

    fn remove_monitor(&self, monitor: &Arc<dyn Monitor>) {
        self.monitors
            .lock()
            .unwrap()
            .retain(|m| !Arc::ptr_eq(m, monitor));
        monitor.stop();
    }
}

pub struct Fakes {
    pub action_client_factory: Arc<RecordingActionClientFactory>,
    pub emitter: Arc<RecordingEmitter>,
    pub server_view: Arc<RecordingServerView>,
    pub monitor_scheduler: Arc<RecordingMonitorScheduler>,
    pub services: TaskServices,
}

pub fn fakes() -> Fakes {
    let action_client_factory = Arc::new(RecordingActionClientFactory::default());
    let emitter = Arc::new(RecordingEmitter::default());
    let server_view = Arc::new(RecordingServerView::default());
    let monitor_scheduler = Arc::new(RecordingMonitorScheduler::default());
    let hooks = Arc::new(NoopSegmentHooks);
    let services = TaskServices {
        action_client_factory: action_client_factory.clone(),
        emitter: emitter.clone(),
        segment_pusher: hooks.clone(),
        segment_killer: hooks.clone(),
        segment_announcer: hooks,
        new_segment_server_view: server_view.clone(),
        query_runner_factory_conglomerate: Arc::new(TimeseriesOnly),
        monitor_scheduler: monitor_scheduler.clone(),
        json_mapper: JsonMapper::new(),
    };
    Fakes {
        action_client_factory,
        emitter,
        server_view,
        monitor_scheduler,
        services,
    }
}

/// Materializer reading from filesystem deep storage at `storage`
pub fn local_materializer(storage: &Path) -> SegmentMaterializer {
    SegmentMaterializer::new(
        Arc::new(CachingPuller::new(LocalDeepStoragePuller::new(storage))),
        Arc::new(DirectoryIndexFactory::new()),
    )
}

/// Write a version 9 index into deep storage and return its reference
pub fn push_segment(storage: &Path, data_source: &str, day: u32, version: &str) -> SegmentReference {
    let rel = PathBuf::from(data_source)
        .join(format!("2024-01-{day:02}"))
        .join(version);
    let dir = storage.join(&rel);
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("version.bin"), 9u32.to_be_bytes()).unwrap();
    fs::write(dir.join("00000.smoosh"), format!("{data_source} {day}")).unwrap();
    segment_at(data_source, day, version, &rel.to_string_lossy())
}

/// Reference to a segment whose load spec points at `rel`, without writing it
pub fn segment_at(data_source: &str, day: u32, version: &str, rel: &str) -> SegmentReference {
    let mut load_spec = BTreeMap::new();
    load_spec.insert("type".to_string(), serde_json::json!("local"));
    load_spec.insert("path".to_string(), serde_json::json!(rel));
    let interval = format!("2024-01-{day:02}T00:00:00Z/2024-01-{:02}T00:00:00Z", day + 1)
        .parse()
        .unwrap();
    SegmentReference::new(data_source, interval, version).with_load_spec(load_spec)
}
