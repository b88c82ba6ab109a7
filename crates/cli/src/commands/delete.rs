use anyhow::Result;
use keyword_core::{Keyword, RegexMatcher, commands::delete_keyword, resolver_for};
use std::path::Path;

use super::{EditOptions, Session};
use crate::config::Workspace;

pub fn delete_command(
    workspace: &Workspace,
    file: &Path,
    keyword_type: &str,
    value: &str,
    edit: EditOptions,
) -> Result<()> {
    let mut session = Session::open(workspace, file, keyword_type)?;
    let matcher = RegexMatcher::new();
    let statements = resolver_for(&session.document);
    let keyword = Keyword::new(&session.config, &matcher, statements.as_ref());

    match delete_keyword(&keyword, &mut session.document, value)? {
        Some(remaining) => {
            let left = remaining.iter().filter(|e| e.occurrence.is_some()).count();
            eprintln!("✅ Deleted \"{value}\" ({left} left)");
        }
        None => eprintln!("❌ \"{value}\" not found"),
    }

    session.finish(edit)
}
