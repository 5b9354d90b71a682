//! Flows module - Command handlers built on catalog and session state
//!
//! Provides:
//! - list: the list view (summary, revealed runs, empty state)
//! - search: plain filtering without paging
//! - detail: detail lookup by id
//! - session: replay an event script step by step
//! - stats: catalog statistics

pub mod detail;
pub mod list;
pub mod search;
pub mod session;
pub mod stats;

use tracing::debug;

use crate::core::model::ResultSet;
use crate::core::render::{RenderConfig, Renderer};

/// Render a result set to stdout
pub fn emit(result_set: &ResultSet, config: RenderConfig) {
    debug!(items = result_set.len(), format = ?config.format, "rendering");
    let output = Renderer::with_config(config).render(result_set);
    if !output.is_empty() {
        println!("{}", output);
    }
}
