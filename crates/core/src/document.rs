//! In-memory text document with the editor-level queries the engine needs

use crate::{
    error::{Error, Result},
    types::TextRange,
};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

/// A text buffer plus the settings map an editor would attach to its view
#[derive(Debug, Clone, Default)]
pub struct Document {
    text: String,
    path: Option<PathBuf>,
    settings: Map<String, Value>,
}

impl Document {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            path: None,
            settings: Map::new(),
        }
    }

    pub fn load_from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(Self::new(text).with_path(path))
    }

    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        std::fs::write(path, &self.text)?;
        Ok(())
    }

    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn with_settings(mut self, settings: Map<String, Value>) -> Self {
        self.settings = settings;
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn settings(&self) -> &Map<String, Value> {
        &self.settings
    }

    pub fn setting(&self, key: &str) -> Option<&Value> {
        self.settings.get(key)
    }

    pub fn set_setting(&mut self, key: impl Into<String>, value: Value) {
        self.settings.insert(key.into(), value);
    }

    /// MD5 of the current text, used to detect out-of-band changes
    pub fn fingerprint(&self) -> String {
        format!("{:x}", md5::compute(self.text.as_bytes()))
    }

    pub fn substr(&self, range: TextRange) -> &str {
        let range = self.snap_to_chars(range);
        &self.text[range.start..range.end]
    }

    /// The line containing `offset`, without its terminator
    pub fn line(&self, offset: usize) -> TextRange {
        let offset = self.clamp_offset(offset);
        let start = self.text[..offset].rfind('\n').map_or(0, |i| i + 1);
        let end = self.text[offset..]
            .find('\n')
            .map_or(self.text.len(), |i| offset + i);
        TextRange::new(start, end)
    }

    /// The word around `offset`; empty when the caret touches no word characters
    pub fn word(&self, offset: usize) -> TextRange {
        let offset = self.clamp_offset(offset);
        let start = self.text[..offset]
            .char_indices()
            .rev()
            .take_while(|(_, c)| is_word_char(*c))
            .last()
            .map_or(offset, |(i, _)| i);
        let end = self.text[offset..]
            .char_indices()
            .find(|(_, c)| !is_word_char(*c))
            .map_or(self.text.len(), |(i, _)| offset + i);
        TextRange::new(start, end)
    }

    pub fn insert(&mut self, offset: usize, text: &str) -> Result<()> {
        self.check_boundary(offset)?;
        self.text.insert_str(offset, text);
        Ok(())
    }

    pub fn erase(&mut self, range: TextRange) -> Result<()> {
        self.replace(range, "")
    }

    pub fn replace(&mut self, range: TextRange, text: &str) -> Result<()> {
        self.check_boundary(range.start)?;
        self.check_boundary(range.end)?;
        self.text.replace_range(range.start..range.end, text);
        Ok(())
    }

    fn clamp_offset(&self, offset: usize) -> usize {
        let mut offset = offset.min(self.text.len());
        while !self.text.is_char_boundary(offset) {
            offset -= 1;
        }
        offset
    }

    /// Clamp a range to the document and pull both ends back onto char boundaries
    pub fn snap_to_chars(&self, range: TextRange) -> TextRange {
        let start = self.clamp_offset(range.start);
        let end = self.clamp_offset(range.end).max(start);
        TextRange::new(start, end)
    }

    fn check_boundary(&self, offset: usize) -> Result<()> {
        if offset > self.text.len() || !self.text.is_char_boundary(offset) {
            return Err(Error::Other(format!(
                "Offset {offset} is not a character boundary in a document of {} bytes",
                self.text.len()
            )));
        }
        Ok(())
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}
