use super::{FindOptions, Match, PatternMatcher};
use crate::{
    document::Document,
    error::{Error, Result},
    types::TextRange,
};
use lru::LruCache;
use regex::{Regex, RegexBuilder};
use std::num::NonZeroUsize;
use std::sync::Mutex;
use tracing::trace;

const DEFAULT_CACHE_CAPACITY: usize = 64;

/// [`PatternMatcher`] backed by the `regex` crate
///
/// Patterns are compiled in multi-line mode (`^`/`$` match at line
/// boundaries) and kept in a small LRU cache, since the same handful of
/// `place`/`definition` patterns are searched over and over.
pub struct RegexMatcher {
    cache: Mutex<LruCache<String, Regex>>,
}

impl RegexMatcher {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CACHE_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            cache: Mutex::new(LruCache::new(capacity)),
        }
    }

    fn compile(&self, pattern: &str) -> Result<Regex> {
        let mut cache = self.cache.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(regex) = cache.get(pattern) {
            return Ok(regex.clone());
        }

        trace!("Compiling pattern: {}", pattern);
        let regex = RegexBuilder::new(pattern)
            .multi_line(true)
            .build()
            .map_err(|e| Error::InvalidPattern {
                pattern: pattern.to_string(),
                message: e.to_string(),
            })?;
        cache.put(pattern.to_string(), regex.clone());
        Ok(regex)
    }
}

impl Default for RegexMatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl PatternMatcher for RegexMatcher {
    fn find(
        &self,
        document: &Document,
        start: usize,
        pattern: &str,
        options: &FindOptions,
    ) -> Result<Vec<Match>> {
        let regex = self.compile(pattern)?;
        let bounds = options
            .range
            .unwrap_or_else(|| TextRange::new(0, document.len()));
        let search = document.snap_to_chars(TextRange::new(
            start.max(bounds.start),
            bounds.end.max(start),
        ));
        let haystack = document.substr(search);
        let shift = search.start;

        let matches = regex
            .captures_iter(haystack)
            .map(|captures| {
                let groups = captures
                    .iter()
                    .map(|group| {
                        group.map(|m| {
                            (
                                TextRange::new(shift + m.start(), shift + m.end()),
                                m.as_str().to_string(),
                            )
                        })
                    })
                    .collect();
                Match::new(groups)
            })
            .collect();
        Ok(matches)
    }
}
