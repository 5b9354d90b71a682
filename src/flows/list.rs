//! List flow - The paged list view
//!
//! Builds a session at a location, optionally types a query and reports the
//! sentinel as visible a number of times, then emits whatever view the
//! session ends on.

use anyhow::Result;
use serde_json::json;
use tracing::debug;

use crate::catalog::Catalog;
use crate::core::model::{LaunchTemplate, ResultItem, ResultSet};
use crate::core::render::RenderConfig;
use crate::core::util::{format_long_date, pluralize};
use crate::flows::emit;
use crate::session::location::Location;
use crate::session::{DetailView, Event, ListView, Session, SessionConfig, View};

/// Headline for the list view
pub fn headline(catalog: &Catalog, list: &ListView<'_>) -> String {
    if list.query().current().is_empty() {
        format!("{} total runs available", catalog.len())
    } else {
        format!("Found {}", pluralize(list.filtered().len(), "run"))
    }
}

/// Footer-style progress line, if any
fn progress(list: &ListView<'_>) -> Option<String> {
    let matched = list.filtered().len();
    if list.all_shown() {
        Some(format!("Showing all {} runs", matched))
    } else if list.has_more() {
        Some(format!("Showing {} of {}", list.visible().len(), pluralize(matched, "run")))
    } else {
        None
    }
}

/// Result items for a list view: summary, then runs or the empty state
pub fn list_view_results(catalog: &Catalog, list: &ListView<'_>, location: &Location) -> ResultSet {
    let mut result_set = ResultSet::new();

    let mut summary = ResultItem::summary(headline(catalog, list), location.to_string()).with_data(json!({
        "query": list.query().current(),
        "filtering": list.query().is_filtering(),
        "total": catalog.len(),
        "matched": list.filtered().len(),
        "revealed": list.visible().len(),
        "page_size": list.reveal().page_size(),
        "has_more": list.has_more(),
        "all_shown": list.all_shown(),
        "updated_at": catalog.updated_at().map(|d| d.to_string()),
    }));
    if let Some(line) = progress(list) {
        summary = summary.with_subtitle(line);
    }
    if let Some(date) = catalog.updated_at() {
        summary = summary.with_excerpt(format!("Last updated {}", format_long_date(date)));
    }
    result_set.push(summary);

    if list.is_empty() {
        result_set.push(ResultItem::empty(list.query().current()));
    } else {
        result_set.extend(list.visible().iter().map(|run| ResultItem::run(run)));
    }

    result_set
}

/// Result items for whatever view the session is on
pub fn view_results(session: &Session<'_>) -> ResultSet {
    match session.view() {
        View::List(list) => list_view_results(session.catalog(), list, session.location()),
        View::Detail(DetailView::Found(run)) => std::iter::once(ResultItem::detail(run)).collect(),
        View::Detail(DetailView::NotFound { id }) => std::iter::once(ResultItem::not_found(id)).collect(),
    }
}

/// Drive a list session and collect its final view
pub fn list_results(
    catalog: &Catalog,
    location: Location,
    query: Option<&str>,
    scrolls: usize,
    config: SessionConfig,
) -> ResultSet {
    let mut session = Session::new(catalog, location, config);

    if let Some(query) = query {
        session.apply(&Event::Type(query.to_string()));
    }

    for _ in 0..scrolls {
        if !session.apply(&Event::Scroll(1.0)) {
            debug!("nothing left to reveal");
            break;
        }
    }

    view_results(&session)
}

/// Run the list command
pub fn run_list(
    catalog: &Catalog,
    location: Location,
    query: Option<&str>,
    scrolls: usize,
    session_config: SessionConfig,
    launch: Option<&LaunchTemplate>,
    config: RenderConfig,
) -> Result<()> {
    let result_set = list_results(catalog, location, query, scrolls, session_config);
    emit(&result_set.with_launch_links(launch), config);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::model::fixtures;
    use crate::core::model::Kind;

    fn catalog(n: usize) -> Catalog {
        Catalog::new(fixtures::runs(n)).unwrap()
    }

    fn kinds(set: &ResultSet) -> Vec<Kind> {
        set.items.iter().map(|i| i.kind).collect()
    }

    #[test]
    fn test_list_first_page() {
        let catalog = catalog(30);
        let set = list_results(&catalog, Location::root(), None, 0, SessionConfig::default());
        assert_eq!(set.len(), 13);
        assert_eq!(set.items[0].kind, Kind::Summary);
        assert_eq!(set.items[0].title.as_deref(), Some("30 total runs available"));
        assert_eq!(set.items[0].subtitle.as_deref(), Some("Showing 12 of 30 runs"));
        assert_eq!(set.items[1].id.as_deref(), Some("run-0"));
    }

    #[test]
    fn test_list_scrolls_until_all_shown() {
        let catalog = catalog(30);
        let set = list_results(&catalog, Location::root(), None, 5, SessionConfig::default());
        assert_eq!(set.len(), 31);
        assert_eq!(set.items[0].subtitle.as_deref(), Some("Showing all 30 runs"));
        assert_eq!(set.items[0].data.as_ref().unwrap()["has_more"], false);
    }

    #[test]
    fn test_list_with_query_headline() {
        let mut runs = fixtures::runs(5);
        runs[2].landing.title = "Interval Ladder".to_string();
        let catalog = Catalog::new(runs).unwrap();

        let set = list_results(
            &catalog,
            Location::root(),
            Some("interval"),
            0,
            SessionConfig::default(),
        );
        assert_eq!(set.items[0].title.as_deref(), Some("Found 1 run"));
        assert_eq!(set.items[0].path.as_deref(), Some("/?q=interval"));
        assert!(set.items[0].subtitle.is_none());
        assert_eq!(set.items[1].id.as_deref(), Some("run-2"));
    }

    #[test]
    fn test_list_empty_state() {
        let catalog = catalog(5);
        let set = list_results(&catalog, Location::root(), Some("zzz"), 0, SessionConfig::default());
        assert_eq!(kinds(&set), vec![Kind::Summary, Kind::Empty]);
        assert_eq!(set.items[0].title.as_deref(), Some("Found 0 runs"));
    }

    #[test]
    fn test_whitespace_query_headline_counts_all() {
        let catalog = catalog(3);
        let set = list_results(&catalog, Location::root(), Some("  "), 0, SessionConfig::default());
        assert_eq!(set.items[0].title.as_deref(), Some("Found 3 runs"));
        assert_eq!(set.items[0].path.as_deref(), Some("/"));
        assert_eq!(set.len(), 4);
    }

    #[test]
    fn test_list_at_detail_location() {
        let catalog = catalog(3);
        let set = list_results(&catalog, Location::for_run("run-1").unwrap(), None, 0, SessionConfig::default());
        assert_eq!(kinds(&set), vec![Kind::Detail]);

        let set = list_results(&catalog, Location::for_run("nope").unwrap(), None, 0, SessionConfig::default());
        assert_eq!(kinds(&set), vec![Kind::NotFound]);
    }

    #[test]
    fn test_updated_at_in_summary() {
        let catalog = catalog(2).with_updated_at(chrono::NaiveDate::from_ymd_opt(2025, 9, 16));
        let set = list_results(&catalog, Location::root(), None, 0, SessionConfig::default());
        assert_eq!(
            set.items[0].excerpt.as_deref(),
            Some("Last updated 16th September, 2025")
        );
    }
}
