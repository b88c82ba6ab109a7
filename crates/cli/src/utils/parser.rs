use keyword_core::Document;

/// A caret position given on the command line, 0-based
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    Line { line: usize, column: usize },
    Offset(usize),
}

impl Position {
    /// Byte offset in `document`, clamped to the line and the document
    pub fn to_offset(self, document: &Document) -> usize {
        match self {
            Position::Offset(offset) => offset.min(document.len()),
            Position::Line { line, column } => {
                let text = document.text();
                let Some(start) = line_start(text, line) else {
                    return text.len();
                };
                let line_end = text[start..].find('\n').map_or(text.len(), |i| start + i);
                text[start..line_end]
                    .char_indices()
                    .nth(column)
                    .map_or(line_end, |(i, _)| start + i)
            }
        }
    }
}

fn line_start(text: &str, line: usize) -> Option<usize> {
    if line == 0 {
        return Some(0);
    }
    text.match_indices('\n').nth(line - 1).map(|(i, _)| i + 1)
}

/// Parse `LINE[:COL]` (1-based) or `@OFFSET`
pub fn parse_position(arg: &str) -> Option<Position> {
    if let Some(offset) = arg.strip_prefix('@') {
        return offset.parse().ok().map(Position::Offset);
    }

    let (line, column) = match arg.split_once(':') {
        Some((line, column)) => (line, Some(column)),
        None => (arg, None),
    };
    let line: usize = line.parse().ok()?;
    let column: usize = match column {
        Some(column) => column.parse().ok()?,
        None => 1,
    };

    // Convert 1-based to 0-based
    Some(Position::Line {
        line: line.saturating_sub(1),
        column: column.saturating_sub(1),
    })
}

/// Split `FILE:LINE[:COL]` or `FILE@OFFSET` into the path and position
pub fn parse_location(arg: &str) -> (String, Option<Position>) {
    if let Some((path, offset)) = arg.rsplit_once('@') {
        if let Ok(offset) = offset.parse() {
            return (path.to_string(), Some(Position::Offset(offset)));
        }
    }

    // Try FILE:LINE:COL first, then FILE:LINE
    if let Some((rest, last)) = arg.rsplit_once(':') {
        if let Some((path, line)) = rest.rsplit_once(':') {
            if let Some(position) = parse_position(&format!("{line}:{last}")) {
                return (path.to_string(), Some(position));
            }
        }
        if let Some(position) = parse_position(last) {
            return (rest.to_string(), Some(position));
        }
    }

    (arg.to_string(), None)
}
