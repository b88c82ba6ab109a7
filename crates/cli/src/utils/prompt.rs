use keyword_core::{SnippetTemplate, commands::SnippetChooser};
use std::io::{self, BufRead, Write};

/// Asks on stderr and reads a 1-based choice from stdin
pub struct StdinChooser;

impl SnippetChooser for StdinChooser {
    fn choose(&mut self, candidates: &[SnippetTemplate]) -> Option<usize> {
        eprintln!("Several snippets apply:");
        for (i, candidate) in candidates.iter().enumerate() {
            eprintln!("  {}. {}", i + 1, candidate.text());
        }
        eprint!("Choose [1-{}]: ", candidates.len());
        io::stderr().flush().ok();

        let mut answer = String::new();
        io::stdin().lock().read_line(&mut answer).ok()?;
        answer.trim().parse::<usize>().ok()?.checked_sub(1)
    }
}

/// A choice made up front with `--choice`, 1-based
pub struct FixedChoice(pub usize);

impl SnippetChooser for FixedChoice {
    fn choose(&mut self, candidates: &[SnippetTemplate]) -> Option<usize> {
        self.0
            .checked_sub(1)
            .filter(|index| *index < candidates.len())
    }
}
