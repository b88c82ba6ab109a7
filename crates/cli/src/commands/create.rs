use anyhow::{Result, bail};
use keyword_core::{
    BuiltinFallbacks, Keyword, RegexMatcher, SnippetTemplate, TextRange,
    commands::{Created, SnippetChooser, create_keyword, create_keyword_at_selection},
    resolver_for,
};
use std::path::Path;

use super::{EditOptions, Session};
use crate::config::Workspace;
use crate::display::location_label;
use crate::utils::{FixedChoice, StdinChooser, parse_location, parse_position};

pub fn create_command(
    workspace: &Workspace,
    file: &Path,
    keyword_type: &str,
    value: &str,
    snippet: Option<&str>,
    edit: EditOptions,
) -> Result<()> {
    let mut session = Session::open(workspace, file, keyword_type)?;
    let matcher = RegexMatcher::new();
    let statements = resolver_for(&session.document);
    let keyword = Keyword::new(&session.config, &matcher, statements.as_ref());
    let fallbacks = BuiltinFallbacks::new(&matcher);

    let snippet = snippet.map(SnippetTemplate::new);
    let created = create_keyword(
        &keyword,
        &mut session.document,
        &fallbacks,
        value,
        snippet.as_ref(),
    )?;
    report(&session, value, created.as_ref());

    session.finish(edit)
}

pub fn create_at_command(
    workspace: &Workspace,
    location: &str,
    keyword_type: &str,
    to: Option<&str>,
    choice: Option<usize>,
    edit: EditOptions,
) -> Result<()> {
    let (file, Some(caret)) = parse_location(location) else {
        bail!("Expected FILE:LINE[:COL] or FILE@OFFSET, got {location:?}");
    };
    let end = match to {
        Some(to) => match parse_position(to) {
            Some(end) => Some(end),
            None => bail!("Expected LINE[:COL] or @OFFSET for --to, got {to:?}"),
        },
        None => None,
    };

    let mut session = Session::open(workspace, Path::new(&file), keyword_type)?;
    let start = caret.to_offset(&session.document);
    let selection = match end {
        Some(end) => {
            let end = end.to_offset(&session.document);
            TextRange::new(start.min(end), start.max(end))
        }
        None => TextRange::point(start),
    };
    let label = if selection.is_empty() {
        session.document.substr(session.document.word(selection.end))
    } else {
        session.document.substr(selection)
    }
    .to_string();

    let matcher = RegexMatcher::new();
    let statements = resolver_for(&session.document);
    let keyword = Keyword::new(&session.config, &matcher, statements.as_ref());
    let fallbacks = BuiltinFallbacks::new(&matcher);

    let mut chooser: Box<dyn SnippetChooser> = match choice {
        Some(choice) => Box::new(FixedChoice(choice)),
        None => Box::new(StdinChooser),
    };
    let created = create_keyword_at_selection(
        &keyword,
        &mut session.document,
        &fallbacks,
        selection,
        chooser.as_mut(),
    )?;

    report(&session, &label, created.as_ref());

    session.finish(edit)
}

fn report(session: &Session, value: &str, created: Option<&Created>) {
    match created {
        Some(created) => eprintln!(
            "✅ Inserted \"{}\" at {}",
            created.snippet.text(),
            location_label(&session.document, created.position)
        ),
        None => eprintln!("ℹ️  Nothing inserted for \"{value}\""),
    }
}
