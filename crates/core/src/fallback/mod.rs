//! Remedial actions run when `new_place` cannot be found
//!
//! A keyword type may name a `new_place_fallback` command (for instance
//! "append an empty container") that prepares the document so the
//! `new_place` search can succeed on its single retry.

use crate::{
    config::NewPlaceFallback,
    document::Document,
    error::{Error, Result},
    matcher::{FindOptions, PatternMatcher},
};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::debug;

/// Executes a named remedial command against a document
pub trait FallbackRunner {
    fn run(&self, document: &mut Document, fallback: &NewPlaceFallback) -> Result<()>;
}

#[derive(Debug, Deserialize)]
struct AppendArgs {
    characters: String,
}

#[derive(Debug, Deserialize)]
struct InsertArgs {
    point: usize,
    characters: String,
}

#[derive(Debug, Deserialize)]
struct InsertAfterArgs {
    pattern: String,
    characters: String,
}

/// The stock commands: `append`, `insert` and `insert_after`
pub struct BuiltinFallbacks<'a> {
    matcher: &'a dyn PatternMatcher,
}

impl<'a> BuiltinFallbacks<'a> {
    pub fn new(matcher: &'a dyn PatternMatcher) -> Self {
        Self { matcher }
    }
}

impl FallbackRunner for BuiltinFallbacks<'_> {
    fn run(&self, document: &mut Document, fallback: &NewPlaceFallback) -> Result<()> {
        debug!("Running fallback command \"{}\"", fallback.command);

        match fallback.command.as_str() {
            "append" => {
                let args: AppendArgs = parse_args(fallback)?;
                let end = document.len();
                document.insert(end, &args.characters)
            }
            "insert" => {
                let args: InsertArgs = parse_args(fallback)?;
                document.insert(args.point, &args.characters)
            }
            "insert_after" => {
                let args: InsertAfterArgs = parse_args(fallback)?;
                let found =
                    self.matcher
                        .find_match(document, 0, &args.pattern, &FindOptions::default())?;
                match found.and_then(|m| m.end(0)) {
                    Some(end) => document.insert(end, &args.characters),
                    None => {
                        debug!("insert_after: pattern not found, document left unchanged");
                        Ok(())
                    }
                }
            }
            other => Err(Error::UnknownFallback(other.to_string())),
        }
    }
}

fn parse_args<T: DeserializeOwned>(fallback: &NewPlaceFallback) -> Result<T> {
    serde_json::from_value(fallback.args.clone()).map_err(|e| {
        Error::ConfigError(format!(
            "Invalid arguments for fallback \"{}\": {e}",
            fallback.command
        ))
    })
}
