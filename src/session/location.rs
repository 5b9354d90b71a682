//! Addressable location, navigation history and routes
//!
//! Locations are URLs resolved against a fixed local base, so `/`,
//! `/?q=tempo` and `/some-run` are all valid inputs.

use once_cell::sync::Lazy;
use std::fmt;
use url::{Position, Url};

/// Base every relative location resolves against
pub const BASE_URL: &str = "http://localhost/";

/// Location parameter that mirrors the search query
pub const QUERY_PARAM: &str = "q";

static BASE: Lazy<Url> = Lazy::new(|| Url::parse(BASE_URL).expect("Invalid BASE_URL"));

/// A location in the app (path plus query parameters)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    url: Url,
}

impl Location {
    /// Parse a relative (`/?q=x`) or absolute location
    pub fn parse(input: &str) -> Result<Self, url::ParseError> {
        Ok(Self {
            url: BASE.join(input)?,
        })
    }

    /// The list view with no parameters
    pub fn root() -> Self {
        Self { url: BASE.clone() }
    }

    /// Detail location for a run id; `None` when the id cannot be a path segment
    pub fn for_run(id: &str) -> Option<Self> {
        if !is_addressable(id) {
            return None;
        }
        let mut url = BASE.clone();
        url.path_segments_mut().ok()?.clear().push(id);
        Some(Self { url })
    }

    /// First value of a parameter, decoded
    pub fn param(&self, name: &str) -> Option<String> {
        self.url
            .query_pairs()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.into_owned())
    }

    /// Copy whose only parameter is `name=value`
    pub fn replace_params(&self, name: &str, value: &str) -> Self {
        let mut url = self.url.clone();
        url.query_pairs_mut().clear().append_pair(name, value);
        Self { url }
    }

    /// Copy with every parameter removed
    pub fn without_params(&self) -> Self {
        let mut url = self.url.clone();
        url.set_query(None);
        Self { url }
    }

    #[allow(dead_code)]
    pub fn has_params(&self) -> bool {
        self.url.query().is_some()
    }

    pub fn route(&self) -> Route {
        let path = self.url.path();
        if path == "/" || path.is_empty() {
            return Route::List;
        }
        Route::Detail(percent_decode(path.trim_start_matches('/')))
    }
}

impl Default for Location {
    fn default() -> Self {
        Self::root()
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url[Position::BeforePath..])
    }
}

/// Which view a location shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    List,
    /// Detail view for a run id
    Detail(String),
}

/// Whether `id` survives as a single path segment.
///
/// Empty ids and the dot segments `.` and `..` are normalized away when a
/// URL is parsed, so no location can name them.
pub fn is_addressable(id: &str) -> bool {
    !matches!(id, "" | "." | "..")
}

/// Decode `%XX` escapes in a path segment
fn percent_decode(input: &str) -> String {
    String::from_utf8_lossy(&urlencoding::decode_binary(input.as_bytes())).into_owned()
}

/// How a navigation affects history
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationMode {
    Push,
    Replace,
}

/// Linear navigation history with a cursor
#[derive(Debug, Clone)]
pub struct History {
    entries: Vec<Location>,
    cursor: usize,
}

impl History {
    pub fn new(initial: Location) -> Self {
        Self {
            entries: vec![initial],
            cursor: 0,
        }
    }

    pub fn current(&self) -> &Location {
        &self.entries[self.cursor]
    }

    /// Push drops any forward entries; replace overwrites the current one
    pub fn navigate(&mut self, location: Location, mode: NavigationMode) {
        match mode {
            NavigationMode::Push => {
                self.entries.truncate(self.cursor + 1);
                self.entries.push(location);
                self.cursor = self.entries.len() - 1;
            }
            NavigationMode::Replace => {
                self.entries[self.cursor] = location;
            }
        }
    }

    /// Step back; false when already at the first entry
    pub fn back(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        true
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
