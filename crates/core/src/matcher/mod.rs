//! Pattern search over document text
//!
//! The engine never touches a regex directly: every search goes through a
//! [`PatternMatcher`], so an editor can plug in its own scope-aware
//! expression engine. [`RegexMatcher`] is the stock implementation.

pub mod regex_matcher;

pub use regex_matcher::RegexMatcher;

use crate::{document::Document, error::Result, types::TextRange};

/// Extra constraints for a search
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FindOptions {
    /// Only report matches lying entirely inside this range
    pub range: Option<TextRange>,
}

impl FindOptions {
    pub fn within(range: TextRange) -> Self {
        Self { range: Some(range) }
    }
}

/// One pattern match with its capture groups, in absolute document offsets
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match {
    groups: Vec<Option<(TextRange, String)>>,
}

impl Match {
    /// Build a match from per-group captures; group 0 must be present
    pub fn new(groups: Vec<Option<(TextRange, String)>>) -> Self {
        debug_assert!(
            groups.first().is_some_and(Option::is_some),
            "a match always captures group 0"
        );
        Self { groups }
    }

    pub fn range(&self, group: usize) -> Option<TextRange> {
        self.groups.get(group)?.as_ref().map(|(range, _)| *range)
    }

    pub fn start(&self, group: usize) -> Option<usize> {
        self.range(group).map(|range| range.start)
    }

    pub fn end(&self, group: usize) -> Option<usize> {
        self.range(group).map(|range| range.end)
    }

    pub fn group(&self, group: usize) -> Option<&str> {
        self.groups
            .get(group)?
            .as_ref()
            .map(|(_, text)| text.as_str())
    }

    /// Number of groups the pattern declares, including group 0
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }
}

/// Searches a document for a pattern
pub trait PatternMatcher: Send + Sync {
    /// All matches at or after `start`, in document order
    fn find(
        &self,
        document: &Document,
        start: usize,
        pattern: &str,
        options: &FindOptions,
    ) -> Result<Vec<Match>>;

    /// First match at or after `start`
    fn find_match(
        &self,
        document: &Document,
        start: usize,
        pattern: &str,
        options: &FindOptions,
    ) -> Result<Option<Match>> {
        Ok(self
            .find(document, start, pattern, options)?
            .into_iter()
            .next())
    }

    /// Turn literal text into a pattern that matches exactly that text
    fn escape(&self, literal: &str) -> String {
        regex::escape(literal)
    }
}
