//! Query state
//!
//! Owns the raw search text and is the only writer of the `q` location
//! parameter. The raw text is kept verbatim; trimming only decides whether
//! `q` is written or cleared.

use tracing::debug;

use crate::session::location::{History, Location, NavigationMode, QUERY_PARAM};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryState {
    current: String,
}

impl QueryState {
    /// Initialize from `q`; absent or empty means no query
    pub fn from_location(location: &Location) -> Self {
        Self {
            current: location
                .param(QUERY_PARAM)
                .filter(|q| !q.is_empty())
                .unwrap_or_default(),
        }
    }

    /// Raw query text as typed
    pub fn current(&self) -> &str {
        &self.current
    }

    /// True when the query narrows the result set
    pub fn is_filtering(&self) -> bool {
        !self.current.trim().is_empty()
    }

    /// Store a new query and write it through to the location.
    ///
    /// A non-blank value makes `q` (the raw text) the only parameter,
    /// replacing the history entry unless the previous query was empty. A
    /// blank value clears every parameter. Returns whether the stored query changed.
    pub fn set_query(&mut self, value: &str, history: &mut History) -> bool {
        let changed = self.current != value;

        if value.trim().is_empty() {
            let next = history.current().without_params();
            history.navigate(next, NavigationMode::Push);
        } else {
            let mode = if self.current.is_empty() {
                NavigationMode::Push
            } else {
                NavigationMode::Replace
            };
            let next = history.current().replace_params(QUERY_PARAM, value);
            history.navigate(next, mode);
        }

        debug!(query = value, location = %history.current(), changed, "query set");
        self.current = value.to_string();
        changed
    }
}
