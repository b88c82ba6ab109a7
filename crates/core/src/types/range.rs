use serde::{Deserialize, Serialize};
use std::fmt;

/// Half-open `[start, end)` byte range into a document
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TextRange {
    pub start: usize,
    pub end: usize,
}

impl TextRange {
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "range start {start} is past its end {end}");
        Self { start, end }
    }

    /// Empty range at a single point
    pub fn point(offset: usize) -> Self {
        Self::new(offset, offset)
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Check if an offset falls within this range (end inclusive, like a caret)
    pub fn contains_offset(&self, offset: usize) -> bool {
        offset >= self.start && offset <= self.end
    }

    /// Check if another range lies entirely within this one
    pub fn contains_range(&self, other: &TextRange) -> bool {
        other.start >= self.start && other.end <= self.end
    }

    /// Shift both ends forward by `delta`
    pub fn shifted(&self, delta: usize) -> Self {
        Self::new(self.start + delta, self.end + delta)
    }
}

impl fmt::Display for TextRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

impl From<std::ops::Range<usize>> for TextRange {
    fn from(range: std::ops::Range<usize>) -> Self {
        Self::new(range.start, range.end)
    }
}
