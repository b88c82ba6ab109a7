use serde::{Deserialize, Serialize};

use super::range::TextRange;

/// A located container region (e.g. a class body) in which keywords live
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Place {
    /// Absolute range of the whole `place` match
    pub range: TextRange,
    /// Full matched text
    pub value: String,
}

/// A single keyword found inside a place
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Occurrence {
    pub place: Place,
    /// Absolute range of the captured value; always inside `place.range`
    pub range: TextRange,
    pub value: String,
}

impl Occurrence {
    /// Place text truncated for list display
    pub fn place_preview(&self, max_chars: usize) -> String {
        self.place.value.chars().take(max_chars).collect()
    }
}
