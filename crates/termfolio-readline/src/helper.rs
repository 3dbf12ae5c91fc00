use std::borrow::Cow::{self, Borrowed, Owned};

use colored::Colorize;
use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Helper};

use termfolio_core::command::CommandRegistry;
use termfolio_core::session::compute_hints;

/// Shell-only commands, handled before anything reaches the session.
pub const META_COMMANDS: [&str; 4] = ["/form", "/theme", "/quit", "/exit"];

/// Completion, inline hints and highlighting for the portfolio prompt.
#[derive(Clone)]
pub struct FolioHelper {
    registry: &'static CommandRegistry,
}

impl FolioHelper {
    pub fn new(registry: &'static CommandRegistry) -> Self {
        Self { registry }
    }

    fn candidates(&self, line: &str) -> Vec<String> {
        if line.starts_with('/') {
            META_COMMANDS
                .iter()
                .filter(|cmd| cmd.starts_with(line))
                .map(|cmd| cmd.to_string())
                .collect()
        } else {
            compute_hints(self.registry, line)
        }
    }
}

impl Helper for FolioHelper {}

impl Completer for FolioHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line = &line[..pos];
        let start = line.len() - line.trim_start().len();
        let candidates = self
            .candidates(line.trim_start())
            .into_iter()
            .map(|keyword| Pair {
                display: keyword.clone(),
                replacement: keyword,
            })
            .collect();
        Ok((start, candidates))
    }
}

impl Highlighter for FolioHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        if self.registry.lookup(line).is_some() || META_COMMANDS.contains(&line.trim()) {
            Owned(line.bright_cyan().to_string())
        } else {
            Borrowed(line)
        }
    }

    fn highlight_hint<'h>(&self, hint: &'h str) -> Cow<'h, str> {
        Owned(hint.bright_black().to_string())
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

impl Hinter for FolioHelper {
    type Hint = String;

    /// Completes the first matching keyword inline.
    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        if pos < line.len() {
            return None;
        }
        let typed = line.trim_start();
        if typed.is_empty() || typed.contains(' ') {
            return None;
        }
        let lowered = typed.to_lowercase();
        self.candidates(typed)
            .into_iter()
            .find(|keyword| keyword.len() > lowered.len())
            .map(|keyword| keyword[lowered.len()..].to_string())
    }
}

impl Validator for FolioHelper {}
