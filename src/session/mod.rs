//! Session module - Browsing state driven by discrete events
//!
//! A [`Session`] owns everything that changes while browsing: the navigation
//! history, the query, the reveal count and the cached filtered set. Each
//! event is applied synchronously; nothing here blocks or spans more than one
//! call.

pub mod location;
pub mod query;
pub mod reveal;
pub mod script;

use std::fmt;
use tracing::debug;

use crate::catalog::filter::filter_runs;
use crate::catalog::lookup::{find_run, Lookup};
use crate::catalog::{Catalog, Run};
use location::{History, Location, NavigationMode, Route};
use query::QueryState;
use reveal::{RevealController, Sentinel, PAGE_SIZE, VISIBILITY_THRESHOLD};

/// Tunables for a browsing session
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionConfig {
    pub page_size: usize,
    pub threshold: f64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            page_size: PAGE_SIZE,
            threshold: VISIBILITY_THRESHOLD,
        }
    }
}

/// External events a session reacts to
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// New search input (raw)
    Type(String),
    /// Clear the search
    Clear,
    /// Sentinel visibility report, as a visible fraction
    Scroll(f64),
    /// Navigate to a run's detail view
    Open(String),
    /// History back
    Back,
    /// Navigate to the library root
    Home,
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Event::Type(text) => write!(f, "type {}", text),
            Event::Clear => f.write_str("clear"),
            Event::Scroll(fraction) => write!(f, "scroll {}", fraction),
            Event::Open(id) => write!(f, "open {}", id),
            Event::Back => f.write_str("back"),
            Event::Home => f.write_str("home"),
        }
    }
}

/// The list view: query, filtered set and reveal state
#[derive(Debug, Clone)]
pub struct ListView<'a> {
    query: QueryState,
    filtered: Vec<&'a Run>,
    reveal: RevealController,
}

impl<'a> ListView<'a> {
    fn new(catalog: &'a Catalog, location: &Location, page_size: usize) -> Self {
        let query = QueryState::from_location(location);
        let filtered = filter_runs(catalog.runs(), query.current());
        let reveal = RevealController::new(page_size, filtered.len());
        Self {
            query,
            filtered,
            reveal,
        }
    }

    pub fn query(&self) -> &QueryState {
        &self.query
    }

    /// Every run matching the query, in dataset order
    pub fn filtered(&self) -> &[&'a Run] {
        &self.filtered
    }

    /// Revealed prefix of the filtered set
    pub fn visible(&self) -> &[&'a Run] {
        self.reveal.visible(&self.filtered)
    }

    pub fn reveal(&self) -> &RevealController {
        &self.reveal
    }

    pub fn has_more(&self) -> bool {
        self.reveal.has_more(self.filtered.len())
    }

    pub fn all_shown(&self) -> bool {
        self.reveal.all_shown(self.filtered.len())
    }

    /// No run matches the query
    pub fn is_empty(&self) -> bool {
        self.filtered.is_empty()
    }

    fn set_query(&mut self, catalog: &'a Catalog, value: &str, history: &mut History) {
        if self.query.set_query(value, history) {
            self.filtered = filter_runs(catalog.runs(), self.query.current());
            self.reveal.on_query_change(self.filtered.len());
        }
    }

    fn near_end(&mut self) -> bool {
        self.reveal.on_near_end(self.filtered.len())
    }
}

/// The detail view for one id
#[derive(Debug, Clone, PartialEq)]
pub enum DetailView<'a> {
    Found(&'a Run),
    /// Terminal for this id; offers a way back to the library
    NotFound { id: String },
}

impl<'a> DetailView<'a> {
    fn lookup(catalog: &'a Catalog, id: &str) -> Self {
        match find_run(catalog, id) {
            Lookup::Found(run) => DetailView::Found(run),
            Lookup::NotFound => DetailView::NotFound { id: id.to_string() },
        }
    }
}

#[derive(Debug, Clone)]
pub enum View<'a> {
    List(ListView<'a>),
    Detail(DetailView<'a>),
}

/// One browsing session over a catalog
#[derive(Debug)]
pub struct Session<'a> {
    catalog: &'a Catalog,
    config: SessionConfig,
    sentinel: Sentinel,
    history: History,
    view: View<'a>,
}

impl<'a> Session<'a> {
    /// Start at `location`, building whichever view its route names
    pub fn new(catalog: &'a Catalog, location: Location, config: SessionConfig) -> Self {
        let view = build_view(catalog, &location, config.page_size);
        Self {
            catalog,
            config,
            sentinel: Sentinel::new(config.threshold),
            history: History::new(location),
            view,
        }
    }

    pub fn catalog(&self) -> &'a Catalog {
        self.catalog
    }

    pub fn view(&self) -> &View<'a> {
        &self.view
    }

    pub fn location(&self) -> &Location {
        self.history.current()
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Apply one event; false when it does not apply to the current view
    pub fn apply(&mut self, event: &Event) -> bool {
        let handled = match event {
            Event::Open(id) => match Location::for_run(id) {
                Some(location) => {
                    self.history.navigate(location, NavigationMode::Push);
                    self.view = View::Detail(DetailView::lookup(self.catalog, id));
                    true
                }
                None => false,
            },
            Event::Back => {
                let moved = self.history.back();
                if moved {
                    self.rebuild_view();
                }
                moved
            }
            Event::Home => {
                self.history.navigate(Location::root(), NavigationMode::Push);
                self.rebuild_view();
                true
            }
            Event::Type(_) | Event::Clear | Event::Scroll(_) => self.apply_to_list(event),
        };

        debug!(event = %event, handled, location = %self.history.current(), "event applied");
        handled
    }

    fn apply_to_list(&mut self, event: &Event) -> bool {
        let View::List(list) = &mut self.view else {
            return false;
        };

        match event {
            Event::Type(text) => {
                list.set_query(self.catalog, text, &mut self.history);
                true
            }
            Event::Clear => {
                list.set_query(self.catalog, "", &mut self.history);
                true
            }
            Event::Scroll(fraction) => {
                self.sentinel.is_triggered(*fraction) && list.has_more() && list.near_end()
            }
            _ => false,
        }
    }

    fn rebuild_view(&mut self) {
        self.view = build_view(self.catalog, self.history.current(), self.config.page_size);
    }
}

fn build_view<'a>(catalog: &'a Catalog, location: &Location, page_size: usize) -> View<'a> {
    match location.route() {
        Route::List => View::List(ListView::new(catalog, location, page_size)),
        Route::Detail(id) => View::Detail(DetailView::lookup(catalog, &id)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::model::fixtures;
    use location::QUERY_PARAM;

    fn catalog(n: usize) -> Catalog {
        Catalog::new(fixtures::runs(n)).unwrap()
    }

    fn list<'s, 'a>(session: &'s Session<'a>) -> &'s ListView<'a> {
        match session.view() {
            View::List(list) => list,
            other => panic!("expected list view, got {:?}", other),
        }
    }

    #[test]
    fn test_initial_list_view() {
        let catalog = catalog(30);
        let session = Session::new(&catalog, Location::root(), SessionConfig::default());
        let list = list(&session);
        assert_eq!(list.filtered().len(), 30);
        assert_eq!(list.visible().len(), 12);
        assert!(list.has_more());
    }

    #[test]
    fn test_scroll_reveals_pages() {
        let catalog = catalog(30);
        let mut session = Session::new(&catalog, Location::root(), SessionConfig::default());

        assert!(session.apply(&Event::Scroll(1.0)));
        assert_eq!(list(&session).visible().len(), 24);
        assert!(session.apply(&Event::Scroll(1.0)));
        assert_eq!(list(&session).visible().len(), 30);
        assert!(list(&session).all_shown());
        assert!(!session.apply(&Event::Scroll(1.0)));
        assert_eq!(list(&session).visible().len(), 30);
    }

    #[test]
    fn test_scroll_below_threshold_is_noop() {
        let catalog = catalog(30);
        let mut session = Session::new(&catalog, Location::root(), SessionConfig::default());
        assert!(!session.apply(&Event::Scroll(0.05)));
        assert_eq!(list(&session).visible().len(), 12);
    }

    #[test]
    fn test_query_from_location() {
        let mut runs = fixtures::runs(5);
        runs[1].landing.title = "Tempo Tuesday".to_string();
        let catalog = Catalog::new(runs).unwrap();

        let session = Session::new(
            &catalog,
            Location::parse("/?q=tempo").unwrap(),
            SessionConfig::default(),
        );
        let list = list(&session);
        assert_eq!(list.query().current(), "tempo");
        assert_eq!(list.filtered().len(), 1);
        assert_eq!(list.filtered()[0].id, "run-1");
    }

    #[test]
    fn test_query_change_resets_reveal() {
        let catalog = catalog(40);
        let mut session = Session::new(&catalog, Location::root(), SessionConfig::default());
        session.apply(&Event::Scroll(1.0));
        session.apply(&Event::Scroll(1.0));
        assert_eq!(list(&session).reveal().count(), 36);

        session.apply(&Event::Type("run".to_string()));
        assert_eq!(list(&session).reveal().count(), 12);

        session.apply(&Event::Scroll(1.0));
        session.apply(&Event::Type("5".to_string()));
        // Run 5, 15, 25, 35
        assert_eq!(list(&session).filtered().len(), 4);
        assert_eq!(list(&session).reveal().count(), 4);

        session.apply(&Event::Clear);
        assert_eq!(list(&session).reveal().count(), 12);
        assert_eq!(session.location().param(QUERY_PARAM), None);
    }

    #[test]
    fn test_type_writes_location() {
        let catalog = catalog(3);
        let mut session = Session::new(&catalog, Location::root(), SessionConfig::default());
        session.apply(&Event::Type("tempo".to_string()));
        assert_eq!(session.location().to_string(), "/?q=tempo");
        assert!(list(&session).is_empty());

        session.apply(&Event::Type(String::new()));
        assert_eq!(session.location().to_string(), "/");
        assert_eq!(list(&session).filtered().len(), 3);
    }

    #[test]
    fn test_open_and_back_restores_query() {
        let catalog = catalog(30);
        let mut session = Session::new(&catalog, Location::root(), SessionConfig::default());
        session.apply(&Event::Type("run".to_string()));
        session.apply(&Event::Scroll(1.0));
        assert_eq!(list(&session).visible().len(), 24);

        assert!(session.apply(&Event::Open("run-7".to_string())));
        assert_eq!(session.location().to_string(), "/run-7");
        match session.view() {
            View::Detail(DetailView::Found(run)) => assert_eq!(run.id, "run-7"),
            other => panic!("expected detail view, got {:?}", other),
        }

        assert!(session.apply(&Event::Back));
        assert_eq!(session.location().to_string(), "/?q=run");
        let list = list(&session);
        assert_eq!(list.query().current(), "run");
        assert_eq!(list.visible().len(), 12);
    }

    #[test]
    fn test_open_unknown_is_not_found() {
        let catalog = catalog(3);
        let mut session = Session::new(&catalog, Location::root(), SessionConfig::default());
        session.apply(&Event::Open("nonexistent-id".to_string()));
        match session.view() {
            View::Detail(detail) => assert_eq!(
                *detail,
                DetailView::NotFound {
                    id: "nonexistent-id".to_string()
                }
            ),
            other => panic!("expected detail view, got {:?}", other),
        }
    }

    #[test]
    fn test_list_events_ignored_in_detail() {
        let catalog = catalog(3);
        let mut session = Session::new(
            &catalog,
            Location::for_run("run-1").unwrap(),
            SessionConfig::default(),
        );
        assert!(!session.apply(&Event::Type("x".to_string())));
        assert!(!session.apply(&Event::Scroll(1.0)));
        assert!(!session.apply(&Event::Clear));
        assert_eq!(session.location().to_string(), "/run-1");
    }

    #[test]
    fn test_home_from_not_found() {
        let catalog = catalog(3);
        let mut session = Session::new(
            &catalog,
            Location::parse("/missing").unwrap(),
            SessionConfig::default(),
        );
        assert!(matches!(session.view(), View::Detail(DetailView::NotFound { .. })));

        assert!(session.apply(&Event::Home));
        assert_eq!(session.location().to_string(), "/");
        assert_eq!(list(&session).filtered().len(), 3);
    }

    #[test]
    fn test_open_escapes_id_in_location() {
        let mut runs = fixtures::runs(2);
        runs.push(fixtures::run("tempo#2", "Tempo", "Sub", "Coach"));
        let catalog = Catalog::new(runs).unwrap();
        let mut session = Session::new(&catalog, Location::root(), SessionConfig::default());

        assert!(session.apply(&Event::Open("tempo#2".to_string())));
        assert_eq!(session.location().to_string(), "/tempo%232");
        assert_eq!(session.location().route(), Route::Detail("tempo#2".to_string()));
        assert!(matches!(session.view(), View::Detail(DetailView::Found(run)) if run.id == "tempo#2"));
    }

    #[test]
    fn test_open_dot_segment_is_ignored() {
        let catalog = catalog(3);
        let mut session = Session::new(&catalog, Location::root(), SessionConfig::default());
        assert!(!session.apply(&Event::Open("..".to_string())));
        assert_eq!(session.location().to_string(), "/");
        assert!(matches!(session.view(), View::List(_)));
        assert_eq!(session.history().len(), 1);
    }

    #[test]
    fn test_back_at_start_is_noop() {
        let catalog = catalog(3);
        let mut session = Session::new(&catalog, Location::root(), SessionConfig::default());
        assert!(!session.apply(&Event::Back));
    }

    #[test]
    fn test_custom_page_size() {
        let catalog = catalog(10);
        let config = SessionConfig {
            page_size: 4,
            threshold: 0.5,
        };
        let mut session = Session::new(&catalog, Location::root(), config);
        assert_eq!(list(&session).visible().len(), 4);
        assert!(!session.apply(&Event::Scroll(0.4)));
        assert!(session.apply(&Event::Scroll(0.5)));
        assert_eq!(list(&session).visible().len(), 8);
    }
}
