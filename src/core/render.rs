//! Renderer module
//!
//! Renders ResultSet to different output formats: jsonl, json, md, raw

use crate::core::model::{Kind, ResultItem, ResultSet};
use crate::core::util::truncate_string;

/// Subtitles longer than this are clipped in list cards
const CARD_SUBTITLE_BYTES: usize = 160;

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Jsonl,
    Json,
    Markdown,
    Raw,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "jsonl" => Ok(OutputFormat::Jsonl),
            "json" => Ok(OutputFormat::Json),
            "md" | "markdown" => Ok(OutputFormat::Markdown),
            "raw" => Ok(OutputFormat::Raw),
            _ => Err(format!("Unknown format: {}", s)),
        }
    }
}

/// Render configuration combining format and options
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderConfig {
    pub format: OutputFormat,
    pub pretty: bool,
}

impl RenderConfig {
    #[allow(dead_code)]
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            pretty: false,
        }
    }

    pub fn with_pretty(format: OutputFormat, pretty: bool) -> Self {
        Self { format, pretty }
    }
}

/// Renderer for result sets
pub struct Renderer {
    config: RenderConfig,
}

impl Renderer {
    pub fn with_config(config: RenderConfig) -> Self {
        Self { config }
    }

    /// Render a result set to a string
    pub fn render(&self, result_set: &ResultSet) -> String {
        match self.config.format {
            OutputFormat::Jsonl => self.render_jsonl(result_set),
            OutputFormat::Json => self.render_json(result_set),
            OutputFormat::Markdown => self.render_markdown(result_set),
            OutputFormat::Raw => self.render_raw(result_set),
        }
    }

    /// Render as JSON Lines (one JSON object per line)
    fn render_jsonl(&self, result_set: &ResultSet) -> String {
        result_set
            .items
            .iter()
            .filter_map(|item| {
                if self.config.pretty {
                    serde_json::to_string_pretty(item).ok()
                } else {
                    serde_json::to_string(item).ok()
                }
            })
            .collect::<Vec<_>>()
            .join(if self.config.pretty { "\n\n" } else { "\n" })
    }

    /// Render as a single JSON array
    fn render_json(&self, result_set: &ResultSet) -> String {
        if self.config.pretty {
            serde_json::to_string_pretty(&result_set.items).unwrap_or_else(|_| "[]".to_string())
        } else {
            serde_json::to_string(&result_set.items).unwrap_or_else(|_| "[]".to_string())
        }
    }

    /// Render as Markdown, one block per item in result order
    fn render_markdown(&self, result_set: &ResultSet) -> String {
        let mut output = String::new();
        let mut in_list = false;

        for item in &result_set.items {
            let is_card = matches!(item.kind, Kind::Run | Kind::Step);
            if in_list && !is_card {
                output.push('\n');
            }
            in_list = is_card;

            match item.kind {
                Kind::Run => render_card_md(&mut output, item),
                Kind::Step => render_step_md(&mut output, item),
                Kind::Detail => render_detail_md(&mut output, item),
                Kind::Summary | Kind::Stats => render_header_md(&mut output, item),
                Kind::Empty | Kind::NotFound => render_notice_md(&mut output, item),
            }
        }

        output
    }

    /// Render as raw output (for debugging)
    fn render_raw(&self, result_set: &ResultSet) -> String {
        result_set
            .items
            .iter()
            .filter_map(|item| item.excerpt.clone().or_else(|| item.title.clone()))
            .collect::<Vec<_>>()
            .join("\n---\n")
    }
}

fn render_card_md(output: &mut String, item: &ResultItem) {
    output.push_str(&format!("- **{}**", item.title.as_deref().unwrap_or_default()));
    if let Some(badge) = &item.meta.activity_type {
        output.push_str(&format!(" `{}`", badge));
    }
    if let Some(path) = &item.path {
        output.push_str(&format!(" ({})", path));
    }
    output.push('\n');

    if let Some(subtitle) = item.subtitle.as_deref().filter(|s| !s.is_empty()) {
        let (clipped, truncated) = truncate_string(subtitle, CARD_SUBTITLE_BYTES);
        output.push_str("  ");
        output.push_str(&clipped);
        if truncated {
            output.push('…');
        }
        output.push('\n');
    }
}

fn render_step_md(output: &mut String, item: &ResultItem) {
    output.push_str(&format!(
        "- `{}` → `{}`: {}\n",
        item.title.as_deref().unwrap_or_default(),
        item.path.as_deref().unwrap_or_default(),
        item.subtitle.as_deref().unwrap_or_default()
    ));
    for error in &item.errors {
        output.push_str(&format!("  - **{}**: {}\n", error.code, error.message));
    }
}

fn render_detail_md(output: &mut String, item: &ResultItem) {
    output.push_str(&format!("# {}\n\n", item.title.as_deref().unwrap_or_default()));
    if let Some(subtitle) = item.subtitle.as_deref().filter(|s| !s.is_empty()) {
        output.push_str(subtitle);
        output.push_str("\n\n");
    }

    let mut badges = Vec::new();
    if let Some(activity) = &item.meta.activity_type {
        badges.push(format!("📊 {}", activity));
    }
    if let (Some(goal), Some(unit)) = (item.meta.goal, &item.meta.goal_unit) {
        badges.push(format!("🎯 {} {}", goal, unit));
    }
    if !badges.is_empty() {
        output.push_str(&badges.join(" · "));
        output.push_str("\n\n");
    }

    if let Some(excerpt) = item.excerpt.as_deref().filter(|e| !e.is_empty()) {
        output.push_str(excerpt);
        output.push_str("\n\n");
    }

    if let Some(url) = &item.meta.launch_url {
        output.push_str(&format!("Run 🏃: {}\n\n", url));
    }
}

fn render_header_md(output: &mut String, item: &ResultItem) {
    output.push_str(&format!("## {}\n\n", item.title.as_deref().unwrap_or_default()));
    if let Some(subtitle) = &item.subtitle {
        output.push_str(subtitle);
        output.push_str("\n\n");
    }
    if let Some(excerpt) = &item.excerpt {
        output.push_str(excerpt);
        output.push_str("\n\n");
    }
}

fn render_notice_md(output: &mut String, item: &ResultItem) {
    output.push_str(&format!("## {}\n\n", item.title.as_deref().unwrap_or_default()));
    if let Some(subtitle) = &item.subtitle {
        output.push_str(subtitle);
        output.push_str("\n\n");
    }
    let action = match item.kind {
        Kind::Empty => "Clear search",
        _ => "← Back to Library",
    };
    output.push_str(&format!(
        "{}: `{}`\n\n",
        action,
        item.path.as_deref().unwrap_or("/")
    ));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::model::fixtures;
    use crate::core::model::{ItemError, LaunchTemplate};

    fn sample_set() -> ResultSet {
        let mut set = ResultSet::new();
        set.push(ResultItem::summary("2 total runs available", "/"));
        set.push(ResultItem::run(&fixtures::run("a", "Easy Run", "Recovery", "Coach")));
        set.push(ResultItem::run(&fixtures::run("b", "Long Run", "Endurance", "Coach")));
        set
    }

    fn renderer(format: OutputFormat) -> Renderer {
        Renderer::with_config(RenderConfig::new(format))
    }

    #[test]
    fn test_render_jsonl() {
        let output = renderer(OutputFormat::Jsonl).render(&sample_set());
        assert_eq!(output.lines().count(), 3);
        assert!(output.lines().next().unwrap().contains(r#""kind":"summary""#));
        assert!(output.contains(r#""id":"b""#));
    }

    #[test]
    fn test_render_jsonl_pretty() {
        let config = RenderConfig::with_pretty(OutputFormat::Jsonl, true);
        let output = Renderer::with_config(config).render(&sample_set());
        assert!(output.contains("\n\n"));
        assert!(output.contains("  \"kind\""));
    }

    #[test]
    fn test_render_json() {
        let output = renderer(OutputFormat::Json).render(&sample_set());
        assert!(output.starts_with('['));
        assert!(output.ends_with(']'));
        let parsed: Vec<serde_json::Value> = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed.len(), 3);
    }

    #[test]
    fn test_render_markdown_list() {
        let output = renderer(OutputFormat::Markdown).render(&sample_set());
        assert!(output.starts_with("## 2 total runs available"));
        assert!(output.contains("- **Easy Run** `RUN` (/a)\n  Recovery\n"));
        assert!(output.contains("- **Long Run** `RUN` (/b)"));
    }

    #[test]
    fn test_render_markdown_clips_long_subtitle() {
        let long = "x".repeat(CARD_SUBTITLE_BYTES + 10);
        let mut set = ResultSet::new();
        set.push(ResultItem::run(&fixtures::run("a", "A", &long, "Coach")));
        let output = renderer(OutputFormat::Markdown).render(&set);
        assert!(output.contains('…'));
        assert!(!output.contains(&long));
    }

    #[test]
    fn test_render_markdown_detail() {
        let mut set = ResultSet::new();
        set.push(ResultItem::detail(&fixtures::run("a", "Easy Run", "Recovery", "Coach Amy")));
        let output = renderer(OutputFormat::Markdown).render(&set);
        assert!(output.starts_with("# Easy Run\n\nRecovery\n\n📊 RUN\n\n"));
        assert!(output.contains("📖 Coach Amy\nWarm up."));
    }

    #[test]
    fn test_render_markdown_detail_launch_link() {
        let run = fixtures::run("a", "Easy Run", "Recovery", "Coach Amy");
        let mut set = ResultSet::new();
        set.push(ResultItem::detail(&run));
        let output = renderer(OutputFormat::Markdown).render(&set);
        assert!(!output.contains("Run 🏃"));

        let template = LaunchTemplate::parse("app://run/{id}").unwrap();
        let output = renderer(OutputFormat::Markdown).render(&set.with_launch_links(Some(&template)));
        assert!(output.ends_with("Run 🏃: app://run/a\n\n"));
    }

    #[test]
    fn test_render_markdown_notices() {
        let mut set = ResultSet::new();
        set.push(ResultItem::empty("zzz"));
        set.push(ResultItem::not_found("gone"));
        let output = renderer(OutputFormat::Markdown).render(&set);
        assert!(output.contains("## No runs found"));
        assert!(output.contains("Clear search: `/`"));
        assert!(output.contains("## Run not found"));
        assert!(output.contains("← Back to Library: `/`"));
    }

    #[test]
    fn test_render_markdown_steps() {
        let mut set = ResultSet::new();
        set.push(ResultItem::step("open a", "/a", "detail: a"));
        set.push(
            ResultItem::step("scroll 1", "/a", "detail: a")
                .with_error(ItemError::new("not_applicable", "no list")),
        );
        let output = renderer(OutputFormat::Markdown).render(&set);
        assert_eq!(
            output,
            "- `open a` → `/a`: detail: a\n- `scroll 1` → `/a`: detail: a\n  - **not_applicable**: no list\n"
        );
    }

    #[test]
    fn test_render_raw() {
        let mut set = ResultSet::new();
        set.push(ResultItem::stats("3 total runs available").with_excerpt("RUN: 3"));
        set.push(ResultItem::not_found("x"));
        let output = renderer(OutputFormat::Raw).render(&set);
        assert_eq!(output, "RUN: 3\n---\nRun not found");
    }

    #[test]
    fn test_output_format_parse() {
        assert_eq!("jsonl".parse::<OutputFormat>().unwrap(), OutputFormat::Jsonl);
        assert_eq!("json".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("md".parse::<OutputFormat>().unwrap(), OutputFormat::Markdown);
        assert_eq!("MARKDOWN".parse::<OutputFormat>().unwrap(), OutputFormat::Markdown);
        assert_eq!("RAW".parse::<OutputFormat>().unwrap(), OutputFormat::Raw);
    }

    #[test]
    fn test_output_format_parse_invalid() {
        let result = "invalid".parse::<OutputFormat>();
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("Unknown format"));
    }

    #[test]
    fn test_render_config_default() {
        let config = RenderConfig::default();
        assert_eq!(config.format, OutputFormat::Jsonl);
        assert!(!config.pretty);
    }
}
