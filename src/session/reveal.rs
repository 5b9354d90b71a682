//! Incremental reveal of a filtered result set
//!
//! The controller exposes a growing prefix of the results. It grows by one
//! page each time the sentinel placed after the last visible item reports
//! enough visibility, and is reset whenever the query changes.

/// Items revealed per page
pub const PAGE_SIZE: usize = 12;

/// Fraction of the sentinel that must be visible to trigger a reveal
pub const VISIBILITY_THRESHOLD: f64 = 0.1;

/// Reveal count over a result set of known length
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevealController {
    count: usize,
    page_size: usize,
}

impl RevealController {
    /// Start at one page, capped at `total`
    pub fn new(page_size: usize, total: usize) -> Self {
        let page_size = page_size.max(1);
        Self {
            count: page_size.min(total),
            page_size,
        }
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Back to one page for a freshly filtered set
    pub fn on_query_change(&mut self, total: usize) {
        self.count = self.page_size.min(total);
    }

    /// Reveal one more page; false when everything is already shown
    pub fn on_near_end(&mut self, total: usize) -> bool {
        if self.count >= total {
            return false;
        }
        self.count = (self.count + self.page_size).min(total);
        true
    }

    /// Leading slice of `items` currently revealed
    pub fn visible<'s, T>(&self, items: &'s [T]) -> &'s [T] {
        &items[..self.count.min(items.len())]
    }

    /// Whether the sentinel is rendered (more items remain)
    pub fn has_more(&self, total: usize) -> bool {
        self.count < total
    }

    /// Whether the "showing all" footer applies
    pub fn all_shown(&self, total: usize) -> bool {
        self.count >= total && total > self.page_size
    }
}

/// Viewport sentinel with a visibility threshold
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sentinel {
    threshold: f64,
}

impl Sentinel {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold: threshold.clamp(0.0, 1.0),
        }
    }

    #[allow(dead_code)]
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// True when a visibility report should reveal the next page
    pub fn is_triggered(&self, visible_fraction: f64) -> bool {
        visible_fraction > 0.0 && visible_fraction >= self.threshold
    }
}

impl Default for Sentinel {
    fn default() -> Self {
        Self::new(VISIBILITY_THRESHOLD)
    }
}
