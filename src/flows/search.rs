//! Search flow - Every match for a query, without paging

use anyhow::Result;
use tracing::debug;

use crate::catalog::filter::filter_runs;
use crate::catalog::Catalog;
use crate::core::model::{ResultItem, ResultSet};
use crate::core::render::RenderConfig;
use crate::flows::emit;

/// Matching runs in dataset order, or the empty state
pub fn search_results(catalog: &Catalog, query: &str) -> ResultSet {
    let matches = filter_runs(catalog.runs(), query);
    debug!(query, matched = matches.len(), total = catalog.len(), "search");

    if matches.is_empty() {
        return std::iter::once(ResultItem::empty(query)).collect();
    }
    matches.into_iter().map(ResultItem::run).collect()
}

/// Run the search command
pub fn run_search(catalog: &Catalog, terms: &[String], config: RenderConfig) -> Result<()> {
    let query = terms.join(" ");
    emit(&search_results(catalog, &query), config);
    Ok(())
}
