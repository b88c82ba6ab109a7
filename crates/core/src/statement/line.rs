use super::StatementResolver;
use crate::{document::Document, types::TextRange};

/// Language-agnostic statement resolver.
///
/// A statement starts at the first non-blank character of the line holding
/// the range start and runs to the end of the line on which every bracket
/// opened along the way has been closed. A line inside an unclosed `(` or
/// `[` continues the statement that opened it, so the statement starts on
/// that earlier line instead; a line inside `{` is a statement of its own.
/// A closing bracket with no opener in the statement ends it. Brackets
/// inside double-quoted strings are ignored. Blank lines have no statement.
#[derive(Debug, Clone, Copy, Default)]
pub struct LineStatementResolver;

impl LineStatementResolver {
    pub fn new() -> Self {
        Self
    }
}

impl StatementResolver for LineStatementResolver {
    fn get_statement(&self, document: &Document, range: TextRange) -> Option<TextRange> {
        let text = document.text();
        let mut line = document.line(range.start);
        let mut start = first_non_blank(text, line)?;

        let mut open = unclosed_brackets(&text[..line.start]);
        while let Some(&(position, '(' | '[')) = open.last() {
            line = document.line(position);
            start = first_non_blank(text, line)?;
            open.retain(|&(opener, _)| opener < line.start);
        }

        Some(TextRange::new(start, statement_end(text, start)))
    }
}

fn first_non_blank(text: &str, line: TextRange) -> Option<usize> {
    text[line.start..line.end]
        .char_indices()
        .find(|(_, c)| !c.is_whitespace())
        .map(|(i, _)| line.start + i)
}

/// Walk brackets outside double-quoted strings, reporting each with its offset
fn for_each_bracket(text: &str, mut visit: impl FnMut(usize, char) -> bool) {
    let mut in_string = false;
    let mut escaped = false;
    for (i, c) in text.char_indices() {
        if in_string {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }

        match c {
            '"' => in_string = true,
            '(' | '[' | '{' | ')' | ']' | '}' | '\n' => {
                if visit(i, c) {
                    return;
                }
            }
            _ => {}
        }
    }
}

/// Openers in `text` that are still unclosed at its end, innermost last
fn unclosed_brackets(text: &str) -> Vec<(usize, char)> {
    let mut open = Vec::new();
    for_each_bracket(text, |i, c| {
        match c {
            '(' | '[' | '{' => open.push((i, c)),
            ')' | ']' | '}' => {
                open.pop();
            }
            _ => {}
        }
        false
    });
    open
}

fn statement_end(text: &str, start: usize) -> usize {
    let mut end = text.len();
    let mut depth = 0usize;
    for_each_bracket(&text[start..], |i, c| {
        match c {
            '(' | '[' | '{' => depth += 1,
            ')' | ']' | '}' if depth == 0 => {
                end = start + text[start..start + i].trim_end().len();
                return true;
            }
            ')' | ']' | '}' => depth -= 1,
            '\n' if depth == 0 => {
                end = start + i;
                return true;
            }
            _ => {}
        }
        false
    });
    end
}
