//! Detail flow - Look up one run by id

use anyhow::Result;
use tracing::debug;

use crate::catalog::lookup::{find_run, Lookup};
use crate::catalog::Catalog;
use crate::core::model::{LaunchTemplate, ResultItem, ResultSet};
use crate::core::render::RenderConfig;
use crate::flows::emit;

/// The detail item, or the not-found item for an unknown id
pub fn detail_results(catalog: &Catalog, id: &str) -> ResultSet {
    let item = match find_run(catalog, id) {
        Lookup::Found(run) => ResultItem::detail(run),
        Lookup::NotFound => {
            debug!(id, "run not found");
            ResultItem::not_found(id)
        }
    };
    std::iter::once(item).collect()
}

/// Run the get command
pub fn run_get(
    catalog: &Catalog,
    id: &str,
    launch: Option<&LaunchTemplate>,
    config: RenderConfig,
) -> Result<()> {
    emit(&detail_results(catalog, id).with_launch_links(launch), config);
    Ok(())
}
