//! Query engine registry

use std::sync::Arc;

/// Builds query runners for one query type
pub trait QueryRunnerFactory: Send + Sync {
    /// Query type handled, e.g. `timeseries`
    fn query_type(&self) -> &str;
}

/// Registry of query runner factories by query type
pub trait QueryRunnerFactoryConglomerate: Send + Sync {
    /// Factory for `query_type`, if the node supports it
    fn find_factory(&self, query_type: &str) -> Option<Arc<dyn QueryRunnerFactory>>;
}
