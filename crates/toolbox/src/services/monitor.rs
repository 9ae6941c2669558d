//! Periodic monitors

use super::ServiceEmitter;
use std::sync::Arc;

/// Periodically emits measurements
pub trait Monitor: Send + Sync {
    /// Called once when scheduled
    fn start(&self) {}

    /// Called once when removed
    fn stop(&self) {}

    /// Emit one round of measurements; returning `false` unschedules the monitor
    fn monitor(&self, emitter: &dyn ServiceEmitter) -> bool;
}

/// Runs monitors on the node's schedule
pub trait MonitorScheduler: Send + Sync {
    /// Start running `monitor`
    fn add_monitor(&self, monitor: Arc<dyn Monitor>);

    /// Stop running `monitor`; matched by pointer identity
    fn remove_monitor(&self, monitor: &Arc<dyn Monitor>);
}
