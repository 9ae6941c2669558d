//! Segment identities
//!
//! A [`SegmentReference`] names one immutable, versioned unit of columnar data
//! together with the location metadata a puller needs to fetch it. Identity is
//! the natural key `(data source, interval, version, partition number)`; the
//! remaining fields travel along for the puller and are ignored by equality,
//! hashing and ordering.

use crate::{Error, Result};
use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::path::{Component, Path, PathBuf};
use std::str::FromStr;

/// Half-open time range covered by a segment, serialized as `start/end`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Interval {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl Interval {
    /// Create an interval, rejecting an end before the start
    ///
    /// Bounds are truncated to millisecond precision, the precision of
    /// segment ids and storage directories.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self> {
        let (start, end) = (start.trunc_subsecs(3), end.trunc_subsecs(3));
        if end < start {
            return Err(Error::configuration(format!(
                "interval end {} is before start {}",
                format_instant(&end),
                format_instant(&start)
            )));
        }
        Ok(Self { start, end })
    }

    /// Inclusive start of the interval
    #[must_use]
    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    /// Exclusive end of the interval
    #[must_use]
    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }
}

fn format_instant(instant: &DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Millis, true)
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}",
            format_instant(&self.start),
            format_instant(&self.end)
        )
    }
}

impl FromStr for Interval {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let (start, end) = s
            .split_once('/')
            .ok_or_else(|| Error::configuration(format!("interval '{s}' is not start/end")))?;
        let parse = |part: &str| {
            DateTime::parse_from_rfc3339(part)
                .map(|dt| dt.with_timezone(&Utc))
                .map_err(|e| Error::configuration(format!("invalid instant '{part}': {e}")))
        };
        Self::new(parse(start)?, parse(end)?)
    }
}

impl TryFrom<String> for Interval {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Interval> for String {
    fn from(interval: Interval) -> Self {
        interval.to_string()
    }
}

/// How a segment relates to the other partitions of its interval
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum ShardSpec {
    /// The only segment for its interval and version
    #[default]
    None,
    /// One of an open-ended set of partitions
    Linear {
        /// Position of this partition
        partition_num: u32,
    },
    /// One of a fixed number of partitions
    Numbered {
        /// Position of this partition
        partition_num: u32,
        /// Total number of partitions in the set
        partitions: u32,
    },
}

impl ShardSpec {
    /// Partition number used in identifiers and storage paths
    #[must_use]
    pub const fn partition_num(&self) -> u32 {
        match self {
            Self::None => 0,
            Self::Linear { partition_num } | Self::Numbered { partition_num, .. } => *partition_num,
        }
    }
}

/// Identity and location metadata of one remote segment
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SegmentReference {
    data_source: String,
    interval: Interval,
    version: String,
    #[serde(default)]
    load_spec: BTreeMap<String, serde_json::Value>,
    #[serde(default)]
    dimensions: Vec<String>,
    #[serde(default)]
    metrics: Vec<String>,
    #[serde(default)]
    shard_spec: ShardSpec,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    binary_version: Option<u32>,
    #[serde(default)]
    size: u64,
}

impl SegmentReference {
    /// Create a reference with an unpartitioned shard spec and an empty load spec
    #[must_use]
    pub fn new(data_source: impl Into<String>, interval: Interval, version: impl Into<String>) -> Self {
        Self {
            data_source: data_source.into(),
            interval,
            version: version.into(),
            load_spec: BTreeMap::new(),
            dimensions: Vec::new(),
            metrics: Vec::new(),
            shard_spec: ShardSpec::None,
            binary_version: None,
            size: 0,
        }
    }

    /// Set the shard spec
    #[must_use]
    pub fn with_shard_spec(mut self, shard_spec: ShardSpec) -> Self {
        self.shard_spec = shard_spec;
        self
    }

    /// Set the load spec handed to pullers
    #[must_use]
    pub fn with_load_spec(mut self, load_spec: BTreeMap<String, serde_json::Value>) -> Self {
        self.load_spec = load_spec;
        self
    }

    /// Set the segment size in bytes
    #[must_use]
    pub fn with_size(mut self, size: u64) -> Self {
        self.size = size;
        self
    }

    /// Set the index binary version
    #[must_use]
    pub fn with_binary_version(mut self, binary_version: u32) -> Self {
        self.binary_version = Some(binary_version);
        self
    }

    /// Set the dimension and metric column names
    #[must_use]
    pub fn with_columns(mut self, dimensions: Vec<String>, metrics: Vec<String>) -> Self {
        self.dimensions = dimensions;
        self.metrics = metrics;
        self
    }

    /// Data source the segment belongs to
    #[must_use]
    pub fn data_source(&self) -> &str {
        &self.data_source
    }

    /// Time range covered by the segment
    #[must_use]
    pub fn interval(&self) -> &Interval {
        &self.interval
    }

    /// Version string of the segment
    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Shard spec of the segment
    #[must_use]
    pub fn shard_spec(&self) -> &ShardSpec {
        &self.shard_spec
    }

    /// Location metadata for pullers
    #[must_use]
    pub fn load_spec(&self) -> &BTreeMap<String, serde_json::Value> {
        &self.load_spec
    }

    /// Dimension column names
    #[must_use]
    pub fn dimensions(&self) -> &[String] {
        &self.dimensions
    }

    /// Metric column names
    #[must_use]
    pub fn metrics(&self) -> &[String] {
        &self.metrics
    }

    /// Index binary version, if recorded
    #[must_use]
    pub fn binary_version(&self) -> Option<u32> {
        self.binary_version
    }

    /// Segment size in bytes
    #[must_use]
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Stable identifier: `{dataSource}_{start}_{end}_{version}[_{partitionNum}]`
    #[must_use]
    pub fn id(&self) -> String {
        let mut id = format!(
            "{}_{}_{}_{}",
            self.data_source,
            format_instant(&self.interval.start),
            format_instant(&self.interval.end),
            self.version
        );
        let partition = self.shard_spec.partition_num();
        if partition != 0 {
            id.push('_');
            id.push_str(&partition.to_string());
        }
        id
    }

    /// Relative storage path: `{dataSource}/{start}_{end}/{version}/{partitionNum}`
    ///
    /// Fails if a component would escape the directory it is joined onto.
    pub fn storage_dir(&self) -> Result<PathBuf> {
        let range = format!(
            "{}_{}",
            format_instant(&self.interval.start),
            format_instant(&self.interval.end)
        );
        let partition = self.shard_spec.partition_num().to_string();
        let mut dir = PathBuf::new();
        for part in [self.data_source.as_str(), &range, &self.version, &partition] {
            if !is_plain_component(part) {
                return Err(Error::configuration(format!(
                    "segment {} has unusable path component '{part}'",
                    self.id()
                )));
            }
            dir.push(part);
        }
        Ok(dir)
    }

    fn natural_key(&self) -> (&str, &Interval, &str, u32) {
        (
            &self.data_source,
            &self.interval,
            &self.version,
            self.shard_spec.partition_num(),
        )
    }
}

fn is_plain_component(part: &str) -> bool {
    let mut components = Path::new(part).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(c)), None) if c == part
    )
}

impl PartialEq for SegmentReference {
    fn eq(&self, other: &Self) -> bool {
        self.natural_key() == other.natural_key()
    }
}

impl Eq for SegmentReference {}

impl Hash for SegmentReference {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.natural_key().hash(state);
    }
}

impl PartialOrd for SegmentReference {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SegmentReference {
    fn cmp(&self, other: &Self) -> Ordering {
        self.natural_key().cmp(&other.natural_key())
    }
}

impl fmt::Display for SegmentReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id())
    }
}
