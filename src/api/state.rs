//! Application state for the HTTP surface

use crate::Config;
use crate::aggregator::Aggregator;
use crate::fetcher::PageSource;
use crate::types::FilterKeys;
use std::sync::Arc;

/// Shared application state accessible to all route handlers
///
/// Cloned for each request (cheap Arc clones). Nothing in here is mutated
/// after startup; each export builds its own batch state.
#[derive(Clone)]
pub struct AppState {
    /// Page fetching and full-dataset aggregation
    pub aggregator: Aggregator,

    /// Configuration (read-only)
    pub config: Arc<Config>,
}

impl AppState {
    /// Create a new AppState over `source`
    pub fn new(source: Arc<dyn PageSource>, config: Arc<Config>) -> Self {
        let aggregator = Aggregator::new(source, config.upstream.page_size);
        Self { aggregator, config }
    }

    /// Filter keys for an education code, using the configured category
    pub fn filter_for(&self, education_code: &str) -> FilterKeys {
        FilterKeys::new(education_code, self.config.upstream.category_code.as_str())
    }
}
