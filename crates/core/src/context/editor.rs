use super::ContextSubject;
use crate::{document::Document, types::TextRange};
use serde_json::Value;
use std::collections::BTreeMap;

/// Snapshot of the caret/selection a command was invoked with.
///
/// Values are captured up front so the context can be consulted while the
/// document itself is being edited (e.g. by a `new_place_fallback`).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EditorContext {
    values: BTreeMap<&'static str, Value>,
}

impl EditorContext {
    pub fn capture(document: &Document, selection: TextRange) -> Self {
        let selection = document.snap_to_chars(selection);
        let line = document.line(selection.start);
        let end_line = document.line(selection.end);

        let mut values = BTreeMap::new();
        values.insert("text", Value::from(document.substr(selection)));
        values.insert("selection_empty", Value::from(selection.is_empty()));
        values.insert(
            "preceding_text",
            Value::from(document.substr(TextRange::new(line.start, selection.start))),
        );
        values.insert(
            "following_text",
            Value::from(document.substr(TextRange::new(selection.end, end_line.end))),
        );
        values.insert("line", Value::from(document.substr(line)));

        if let Some(path) = document.path() {
            if let Some(name) = path.file_name() {
                values.insert("file_name", Value::from(name.to_string_lossy().into_owned()));
            }
            if let Some(ext) = path.extension() {
                values.insert("extension", Value::from(ext.to_string_lossy().into_owned()));
            }
        }

        Self { values }
    }
}

impl ContextSubject for EditorContext {
    fn query(&self, key: &str) -> Vec<Value> {
        self.values.get(key).cloned().into_iter().collect()
    }
}
