//! Session flow - Replay an event script
//!
//! Emits one step item for the starting state and one per event, each with a
//! snapshot of the view it left behind.

use anyhow::{Context, Result};
use serde_json::{json, Value};
use std::fs;
use std::io::Read;
use std::path::Path;
use tracing::{info, warn};

use crate::catalog::Catalog;
use crate::core::model::{ItemError, LaunchTemplate, ResultItem, ResultSet};
use crate::core::render::RenderConfig;
use crate::flows::emit;
use crate::flows::list::view_results;
use crate::session::location::Location;
use crate::session::script::parse_script;
use crate::session::{DetailView, Event, Session, SessionConfig, View};

/// Snapshot of the session's current view
fn snapshot(session: &Session<'_>) -> (String, Value) {
    match session.view() {
        View::List(list) => {
            let visible: Vec<&str> = list.visible().iter().map(|run| run.id.as_str()).collect();
            let outcome = format!(
                "list: showing {} of {}",
                visible.len(),
                list.filtered().len()
            );
            let data = json!({
                "view": "list",
                "query": list.query().current(),
                "matched": list.filtered().len(),
                "revealed": visible.len(),
                "has_more": list.has_more(),
                "visible": visible,
            });
            (outcome, data)
        }
        View::Detail(DetailView::Found(run)) => (
            format!("detail: {}", run.id),
            json!({ "view": "detail", "id": run.id }),
        ),
        View::Detail(DetailView::NotFound { id }) => (
            format!("not found: {}", id),
            json!({ "view": "not_found", "id": id }),
        ),
    }
}

/// List events sent while a detail view is showing
fn misplaced(event: &Event, session: &Session<'_>) -> Option<ItemError> {
    let verb = match event {
        Event::Type(_) => "type",
        Event::Clear => "clear",
        Event::Scroll(_) => "scroll",
        _ => return None,
    };
    match session.view() {
        View::Detail(_) => Some(ItemError::new(
            "not_applicable",
            format!("`{}` only applies to the list view", verb),
        )),
        View::List(_) => None,
    }
}

fn step_item(index: usize, label: &str, handled: bool, session: &Session<'_>) -> ResultItem {
    let (outcome, mut data) = snapshot(session);
    if let Some(obj) = data.as_object_mut() {
        obj.insert("step".to_string(), json!(index));
        obj.insert("handled".to_string(), json!(handled));
        obj.insert("history".to_string(), json!(session.history().len()));
    }
    ResultItem::step(label, session.location().to_string(), outcome).with_data(data)
}

/// Replay `events` from `location`; optionally append the final view
pub fn session_results(
    catalog: &Catalog,
    location: Location,
    events: &[Event],
    config: SessionConfig,
    show_final: bool,
) -> ResultSet {
    let mut session = Session::new(catalog, location, config);
    let mut result_set = ResultSet::new();

    result_set.push(step_item(0, "start", true, &session));

    for (idx, event) in events.iter().enumerate() {
        let handled = session.apply(event);
        let mut item = step_item(idx + 1, &event.to_string(), handled, &session);
        if let Some(error) = misplaced(event, &session) {
            warn!(event = %event, "event ignored outside the list view");
            item = item.with_error(error);
        }
        result_set.push(item);
    }

    if show_final {
        result_set.extend(view_results(&session));
    }

    result_set
}

/// Read a script from a file, or stdin for `None`/`-`
fn read_script(script: Option<&Path>) -> Result<String> {
    match script {
        Some(path) if path != Path::new("-") => fs::read_to_string(path)
            .with_context(|| format!("Failed to read script: {}", path.display())),
        _ => {
            let mut input = String::new();
            std::io::stdin()
                .read_to_string(&mut input)
                .context("Failed to read script from stdin")?;
            Ok(input)
        }
    }
}

/// Run the session command
pub fn run_session(
    catalog: &Catalog,
    script: Option<&Path>,
    location: Location,
    show_final: bool,
    session_config: SessionConfig,
    launch: Option<&LaunchTemplate>,
    config: RenderConfig,
) -> Result<()> {
    let source = read_script(script)?;
    let events = parse_script(&source).context("Invalid session script")?;
    info!(events = events.len(), "replaying session");

    let result_set = session_results(catalog, location, &events, session_config, show_final);
    emit(&result_set.with_launch_links(launch), config);
    Ok(())
}
