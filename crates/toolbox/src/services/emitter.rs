//! Service events (metrics and alerts)

use crate::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Alert severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Severity {
    /// Needs attention soon
    Anomaly,
    /// Needs attention now
    ComponentFailure,
    /// Service-wide outage
    ServiceFailure,
}

/// An event handed to the node's emitter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "feed", rename_all = "camelCase")]
pub enum ServiceEvent {
    /// A measured value
    #[serde(rename = "metrics")]
    Metric {
        /// When the value was measured
        timestamp: DateTime<Utc>,
        /// Metric name, e.g. `segment/fetch/time`
        metric: String,
        /// Measured value
        value: f64,
        /// Dimensions such as data source or task id
        dimensions: BTreeMap<String, String>,
    },
    /// Something operators should look at
    #[serde(rename = "alerts")]
    Alert {
        /// When the alert was raised
        timestamp: DateTime<Utc>,
        /// Alert severity
        severity: Severity,
        /// Human readable description
        description: String,
        /// Structured context
        data: serde_json::Value,
    },
}

impl ServiceEvent {
    /// Build a metric event stamped now
    #[must_use]
    pub fn metric(metric: impl Into<String>, value: f64) -> Self {
        Self::Metric {
            timestamp: Utc::now(),
            metric: metric.into(),
            value,
            dimensions: BTreeMap::new(),
        }
    }

    /// Build an alert event stamped now
    #[must_use]
    pub fn alert(severity: Severity, description: impl Into<String>) -> Self {
        Self::Alert {
            timestamp: Utc::now(),
            severity,
            description: description.into(),
            data: serde_json::Value::Null,
        }
    }

    /// Add a dimension to a metric; alerts are returned unchanged
    #[must_use]
    pub fn with_dimension(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        if let Self::Metric { dimensions, .. } = &mut self {
            dimensions.insert(key.into(), value.into());
        }
        self
    }

    /// Feed the event is routed to
    #[must_use]
    pub const fn feed(&self) -> &'static str {
        match self {
            Self::Metric { .. } => "metrics",
            Self::Alert { .. } => "alerts",
        }
    }
}

/// Sink for service events, shared by every task on the node
pub trait ServiceEmitter: Send + Sync {
    /// Queue an event for delivery
    fn emit(&self, event: ServiceEvent);

    /// Deliver queued events
    fn flush(&self) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metric_dimensions() {
        let event = ServiceEvent::metric("segment/fetch/count", 2.0)
            .with_dimension("dataSource", "wikipedia")
            .with_dimension("taskId", "index_task_7");
        match &event {
            ServiceEvent::Metric { dimensions, .. } => assert_eq!(dimensions.len(), 2),
            ServiceEvent::Alert { .. } => unreachable!(),
        }
        assert_eq!(event.feed(), "metrics");
    }

    #[test]
    fn test_alert_ignores_dimensions() {
        let event = ServiceEvent::alert(Severity::Anomaly, "slow segment fetch")
            .with_dimension("ignored", "yes");
        assert_eq!(event.feed(), "alerts");
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["feed"], "alerts");
        assert_eq!(json["severity"], "anomaly");
        assert!(json.get("ignored").is_none());
    }
}
