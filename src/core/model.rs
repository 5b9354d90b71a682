//! Unified Result Model
//!
//! Every command maps its output to [`ResultItem`]s before rendering. Items
//! keep the order the command produced them in.

use serde::{Deserialize, Serialize};

use crate::catalog::model::Section;
use crate::catalog::Run;
use crate::core::util::strip_html;

/// The kind of result item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Kind {
    /// A run card in the list view
    Run,
    /// A run's detail view
    Detail,
    /// List header: counts, query and location
    Summary,
    /// No run matches the query
    Empty,
    /// Detail lookup miss
    NotFound,
    /// One replayed session event
    Step,
    /// Catalog statistics
    Stats,
}

/// Presentation metadata for run items
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Meta {
    /// Activity badge (`RUN` when the run has none)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub activity_type: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub goal: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub goal_unit: Option<String>,

    /// Featured image reference
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    /// External link that starts the run (detail items only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub launch_url: Option<String>,
}

impl Meta {
    fn for_run(run: &Run) -> Self {
        let goal = run.goal();
        Self {
            activity_type: Some(run.activity_badge().to_string()),
            goal,
            goal_unit: goal.map(|_| run.goal_unit().to_string()),
            image: Some(run.landing.featured_url.clone()).filter(|url| !url.is_empty()),
            launch_url: None,
        }
    }
}

/// Pattern for a run's launch link; `{id}` stands for the escaped run id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchTemplate(String);

impl LaunchTemplate {
    pub const PLACEHOLDER: &'static str = "{id}";

    pub fn parse(template: &str) -> Result<Self, String> {
        if !template.contains(Self::PLACEHOLDER) {
            return Err(format!(
                "launch URL template must contain {}: {}",
                Self::PLACEHOLDER,
                template
            ));
        }
        Ok(Self(template.to_string()))
    }

    pub fn url_for(&self, id: &str) -> String {
        self.0.replace(Self::PLACEHOLDER, &urlencoding::encode(id))
    }
}

/// Problem attached to a result item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemError {
    pub code: String,
    pub message: String,
}

impl ItemError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

/// The unified result item that all commands must produce
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultItem {
    pub kind: Kind,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,

    /// Location this item links to (detail route, or `/` for affordances)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    /// Plain-text body
    #[serde(skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,

    /// Structured payload (counts, snapshots, full records)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,

    pub meta: Meta,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<ItemError>,
}

impl ResultItem {
    fn new(kind: Kind) -> Self {
        Self {
            kind,
            id: None,
            title: None,
            subtitle: None,
            path: None,
            excerpt: None,
            data: None,
            meta: Meta::default(),
            errors: Vec::new(),
        }
    }

    /// A run card as the list view shows it
    pub fn run(run: &Run) -> Self {
        Self {
            id: Some(run.id.clone()),
            title: Some(run.landing.title.clone()),
            subtitle: Some(run.landing.subtitle.clone()),
            path: Some(run.route()),
            meta: Meta::for_run(run),
            ..Self::new(Kind::Run)
        }
    }

    /// A run's detail view, carrying the full record as data
    pub fn detail(run: &Run) -> Self {
        Self {
            id: Some(run.id.clone()),
            title: Some(run.detail.header_card.title.clone()),
            subtitle: Some(run.detail.header_card.subtitle.clone()),
            path: Some(run.route()),
            excerpt: Some(detail_text(run)),
            data: serde_json::to_value(run).ok(),
            meta: Meta::for_run(run),
            ..Self::new(Kind::Detail)
        }
    }

    /// List header
    pub fn summary(headline: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            title: Some(headline.into()),
            path: Some(location.into()),
            ..Self::new(Kind::Summary)
        }
    }

    /// Empty state; the path clears the search
    pub fn empty(query: &str) -> Self {
        Self {
            title: Some("No runs found".to_string()),
            subtitle: Some("Try adjusting your search terms or browse all available runs.".to_string()),
            path: Some("/".to_string()),
            data: Some(serde_json::json!({ "query": query })),
            ..Self::new(Kind::Empty)
        }
    }

    /// Not-found state; the path leads back to the library
    pub fn not_found(id: &str) -> Self {
        Self {
            id: Some(id.to_string()),
            title: Some("Run not found".to_string()),
            subtitle: Some("The run you're looking for doesn't exist.".to_string()),
            path: Some("/".to_string()),
            ..Self::new(Kind::NotFound)
        }
    }

    /// A replayed session step
    pub fn step(event: impl Into<String>, location: impl Into<String>, outcome: impl Into<String>) -> Self {
        Self {
            title: Some(event.into()),
            subtitle: Some(outcome.into()),
            path: Some(location.into()),
            ..Self::new(Kind::Step)
        }
    }

    pub fn stats(headline: impl Into<String>) -> Self {
        Self {
            title: Some(headline.into()),
            ..Self::new(Kind::Stats)
        }
    }

    pub fn with_subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }

    pub fn with_excerpt(mut self, excerpt: impl Into<String>) -> Self {
        self.excerpt = Some(excerpt.into());
        self
    }

    /// Set structured data payload
    pub fn with_data(mut self, data: serde_json::Value) -> Self {
        self.data = Some(data);
        self
    }

    pub fn with_error(mut self, error: ItemError) -> Self {
        self.errors.push(error);
        self
    }
}

/// Plain-text rendering of a run's content sections
fn detail_text(run: &Run) -> String {
    let mut blocks = Vec::new();

    for (index, section) in run.detail.content.iter().enumerate() {
        match section {
            Section::Text { title, body } => {
                if body.trim().is_empty() {
                    continue;
                }
                let heading = if index == 0 {
                    format!("📖 {}", title)
                } else {
                    title.clone()
                };
                blocks.push(format!("{}\n{}", heading, strip_html(body)));
            }
            Section::Music {
                title,
                url,
                providers,
            } => {
                let mut block = format!("🎵 {}", title);
                if !url.is_empty() {
                    block.push_str(&format!("\ncover: {}", url));
                }
                for provider in providers {
                    block.push_str(&format!("\n{}: {}", provider.kind.label(), provider.url));
                }
                blocks.push(block);
            }
        }
    }

    blocks.join("\n\n")
}

/// Result set containing multiple result items
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResultSet {
    pub items: Vec<ResultItem>,
}

impl ResultSet {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    pub fn push(&mut self, item: ResultItem) {
        self.items.push(item);
    }

    pub fn extend(&mut self, items: impl IntoIterator<Item = ResultItem>) {
        self.items.extend(items);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Fill in the launch link of every detail item
    pub fn with_launch_links(mut self, template: Option<&LaunchTemplate>) -> Self {
        let Some(template) = template else {
            return self;
        };
        for item in self.items.iter_mut().filter(|item| item.kind == Kind::Detail) {
            if let Some(id) = item.id.as_deref() {
                item.meta.launch_url = Some(template.url_for(id));
            }
        }
        self
    }
}

impl IntoIterator for ResultSet {
    type Item = ResultItem;
    type IntoIter = std::vec::IntoIter<ResultItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl FromIterator<ResultItem> for ResultSet {
    fn from_iter<T: IntoIterator<Item = ResultItem>>(iter: T) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}
