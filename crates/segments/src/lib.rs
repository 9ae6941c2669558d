//! Segment identities and local materialization for stratum tasks
//!
//! This crate provides what a task needs to read remote segments as local
//! files:
//! - Segment references with a stable natural key and storage layout
//! - Pluggable pullers, including filesystem deep storage and a download cache
//! - Index factories that validate pulled artifacts
//! - The materializer that turns an ordered segment list into local paths
//!
//! # Layout
//!
//! A segment materialized under a root directory lands in
//! `<root>/<dataSource>/<start>_<end>/<version>/<partitionNum>/`.

// TODO(segments-docs): Add # Errors documentation to all fallible public functions
#![expect(
    clippy::missing_errors_doc,
    reason = "Error documentation to be added incrementally"
)]

mod error;
pub mod factory;
pub mod local;
pub mod materializer;
pub mod puller;
pub mod reference;

// Re-export error types at crate root
pub use error::{Error, Result};

// Re-export main types
pub use factory::{DirectoryIndexFactory, QueryableIndexFactory};
pub use local::LocalDeepStoragePuller;
pub use materializer::{MaterializedSegments, SegmentMaterializer};
pub use puller::{CachingPuller, SegmentPuller};
pub use reference::{Interval, SegmentReference, ShardSpec};
