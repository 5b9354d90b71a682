//! Statistics flow - Catalog totals by activity type

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::catalog::model::Section;
use crate::catalog::Catalog;
use crate::core::model::{ResultItem, ResultSet};
use crate::core::render::RenderConfig;
use crate::core::util::format_long_date;
use crate::flows::emit;

/// Catalog-wide statistics
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogStats {
    /// Total runs
    pub total_runs: usize,
    /// Runs per activity badge
    pub by_activity: BTreeMap<String, usize>,
    /// Runs with a goal set
    pub with_goal: usize,
    /// Runs with at least one music section
    pub with_music: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

/// Tally the catalog
pub fn calculate_catalog_stats(catalog: &Catalog) -> CatalogStats {
    let mut stats = CatalogStats {
        total_runs: catalog.len(),
        updated_at: catalog.updated_at().map(|d| d.to_string()),
        ..Default::default()
    };

    for run in catalog.runs() {
        *stats
            .by_activity
            .entry(run.activity_badge().to_string())
            .or_default() += 1;
        if run.goal().is_some() {
            stats.with_goal += 1;
        }
        if run
            .detail
            .content
            .iter()
            .any(|s| matches!(s, Section::Music { .. }))
        {
            stats.with_music += 1;
        }
    }

    stats
}

/// Stats as a single result item
pub fn stats_results(catalog: &Catalog) -> ResultSet {
    let stats = calculate_catalog_stats(catalog);

    let breakdown = stats
        .by_activity
        .iter()
        .map(|(activity, count)| format!("- {}: {}", activity, count))
        .collect::<Vec<_>>()
        .join("\n");

    let mut item = ResultItem::stats(format!("{} total runs available", stats.total_runs))
        .with_excerpt(breakdown);
    if let Some(date) = catalog.updated_at() {
        item = item.with_subtitle(format!("Last updated {}", format_long_date(date)));
    }
    if let Ok(data) = serde_json::to_value(&stats) {
        item = item.with_data(data);
    }

    std::iter::once(item).collect()
}

/// Run the stats command
pub fn run_stats(catalog: &Catalog, config: RenderConfig) -> Result<()> {
    emit(&stats_results(catalog), config);
    Ok(())
}
