//! Multi-term run filter
//!
//! A query is split into lowercase terms; a run matches when every term is a
//! substring of its haystack (title, subtitle and section titles). Matching is
//! set membership only, so results keep dataset order.

use crate::catalog::Run;

/// Split a query into lowercase search terms; empty for a blank query
pub fn search_terms(query: &str) -> Vec<String> {
    query
        .trim()
        .to_lowercase()
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// Lowercase searchable text of a run
pub fn haystack(run: &Run) -> String {
    let sections = run
        .detail
        .content
        .iter()
        .map(|section| section.title())
        .collect::<Vec<_>>()
        .join(" ");

    format!(
        "{} {} {}",
        run.landing.title, run.landing.subtitle, sections
    )
    .to_lowercase()
}

/// True when every term occurs in the run's haystack
pub fn matches_terms(run: &Run, terms: &[String]) -> bool {
    let text = haystack(run);
    terms.iter().all(|term| text.contains(term.as_str()))
}

/// Filter runs by query, preserving order; a blank query keeps everything
pub fn filter_runs<'a>(runs: &'a [Run], query: &str) -> Vec<&'a Run> {
    let terms = search_terms(query);
    if terms.is_empty() {
        return runs.iter().collect();
    }

    runs.iter().filter(|run| matches_terms(run, &terms)).collect()
}
