use keyword_core::{Document, Place, TextRange, commands::ListEntry, config::ConfigSource};

/// `line:column` (1-based) of a byte offset
pub fn location_label(document: &Document, offset: usize) -> String {
    let line = document.line(offset);
    let line_number = document.text()[..line.start].matches('\n').count() + 1;
    let column = document
        .substr(TextRange::new(line.start, offset))
        .chars()
        .count()
        + 1;
    format!("{line_number}:{column}")
}

/// One keyword per line: location, value and a preview of its place
pub fn format_entries(document: &Document, entries: &[ListEntry]) -> String {
    let mut out = String::new();
    for entry in entries {
        match &entry.occurrence {
            Some(occurrence) => out.push_str(&format!(
                "{:<8}  {}  [{}]\n",
                location_label(document, occurrence.range.start),
                entry.label,
                entry.detail.replace('\n', "⏎")
            )),
            None => out.push_str(&format!("{}\n", entry.label)),
        }
    }
    out
}

pub fn format_places(document: &Document, places: &[Place]) -> String {
    if places.is_empty() {
        return "No places found\n".to_string();
    }

    let mut out = String::new();
    for (i, place) in places.iter().enumerate() {
        out.push_str(&format!(
            "{}. {} (bytes {})\n",
            i + 1,
            location_label(document, place.range.start),
            place.range
        ));
        for line in place.value.lines() {
            out.push_str(&format!("   │ {line}\n"));
        }
    }
    out
}

pub fn format_config_sources(sources: &[ConfigSource]) -> String {
    if sources.is_empty() {
        return "   • (none)\n".to_string();
    }
    sources
        .iter()
        .map(|source| format!("   • {source}\n"))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use keyword_core::Occurrence;
    use std::path::PathBuf;

    #[test]
    fn test_location_label() {
        let doc = Document::new("ab\ncdé x\n");
        assert_eq!(location_label(&doc, 0), "1:1");
        assert_eq!(location_label(&doc, 8), "2:5");
    }

    #[test]
    fn test_format_entries() {
        let doc = Document::new("import os\nimport re\n");
        let place = Place {
            range: TextRange::new(0, 19),
            value: "import os\nimport re".to_string(),
        };
        let entries = vec![ListEntry {
            occurrence: Some(Occurrence {
                place,
                range: TextRange::new(17, 19),
                value: "re".to_string(),
            }),
            label: "re".to_string(),
            detail: "import os\nimport re".to_string(),
        }];

        insta::assert_snapshot!(format_entries(&doc, &entries), @"2:8       re  [import os⏎import re]");
    }

    #[test]
    fn test_format_config_sources() {
        let sources = [
            ConfigSource::Resource(PathBuf::from("/res/keyword-settings.json")),
            ConfigSource::Document,
        ];
        let text = format_config_sources(&sources);
        assert!(text.contains("/res/keyword-settings.json"));
        assert_eq!(text.lines().count(), 2);
    }
}
