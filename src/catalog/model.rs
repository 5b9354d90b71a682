//! Catalog records
//!
//! Field names follow the dataset JSON (camelCase). Records are immutable once
//! loaded; every view borrows them from the [`Catalog`](super::Catalog).

use serde::{Deserialize, Serialize};

use crate::session::location::Location;

/// One guided run program
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Run {
    /// Unique, stable identifier (also the detail route segment)
    pub id: String,
    pub landing: Landing,
    pub detail: Detail,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<Properties>,
}

/// Fields shown in the list view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Landing {
    pub title: String,
    pub subtitle: String,
    #[serde(default)]
    pub featured_url: String,
}

/// Fields shown only in the detail view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Detail {
    pub header_card: HeaderCard,
    #[serde(default)]
    pub content: Vec<Section>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeaderCard {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
}

/// A block of detail content
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Section {
    Text {
        title: String,
        /// HTML fragment
        #[serde(default)]
        body: String,
    },
    Music {
        title: String,
        /// Cover image
        #[serde(default)]
        url: String,
        #[serde(default)]
        providers: Vec<Provider>,
    },
}

impl Section {
    /// Section title (the coach name for most text sections)
    pub fn title(&self) -> &str {
        match self {
            Section::Text { title, .. } | Section::Music { title, .. } => title,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Provider {
    pub url: String,
    #[serde(rename = "type")]
    pub kind: ProviderKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProviderKind {
    AppleMusic,
    Spotify,
}

impl ProviderKind {
    pub fn label(self) -> &'static str {
        match self {
            ProviderKind::AppleMusic => "Apple Music",
            ProviderKind::Spotify => "Spotify",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Properties {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activity_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goal: Option<f64>,
}

/// Badge shown for runs without an activity type
pub const DEFAULT_ACTIVITY: &str = "RUN";

impl Run {
    pub fn activity_type(&self) -> Option<&str> {
        self.properties
            .as_ref()
            .and_then(|p| p.activity_type.as_deref())
    }

    /// Activity badge as the list view shows it
    pub fn activity_badge(&self) -> &str {
        self.activity_type()
            .filter(|t| !t.is_empty())
            .unwrap_or(DEFAULT_ACTIVITY)
    }

    /// Non-zero goal, if any
    pub fn goal(&self) -> Option<f64> {
        self.properties
            .as_ref()
            .and_then(|p| p.goal)
            .filter(|g| *g != 0.0)
    }

    /// Unit for the goal badge: duration runs count seconds
    pub fn goal_unit(&self) -> &'static str {
        if self.activity_type() == Some("DURATION") {
            "seconds"
        } else {
            "units"
        }
    }

    /// Detail location for this run, escaped the way navigation escapes it
    pub fn route(&self) -> String {
        Location::for_run(&self.id)
            .unwrap_or_default()
            .to_string()
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    /// Build a run with a single text section titled `coach`
    pub fn run(id: &str, title: &str, subtitle: &str, coach: &str) -> Run {
        Run {
            id: id.to_string(),
            landing: Landing {
                title: title.to_string(),
                subtitle: subtitle.to_string(),
                featured_url: format!("https://img.example/{}.jpg", id),
            },
            detail: Detail {
                header_card: HeaderCard {
                    title: title.to_string(),
                    subtitle: subtitle.to_string(),
                    ..Default::default()
                },
                content: vec![Section::Text {
                    title: coach.to_string(),
                    body: "<p>Warm up.</p>".to_string(),
                }],
            },
            properties: None,
        }
    }

    /// `n` plain runs with ids `run-0..n`
    pub fn runs(n: usize) -> Vec<Run> {
        (0..n)
            .map(|i| run(&format!("run-{}", i), &format!("Run {}", i), "Easy miles", "Coach Bennett"))
            .collect()
    }
}
