//! Session domain model.

use serde::{Deserialize, Serialize};

use crate::command::Page;
use crate::portfolio::WELCOME_LINES;
use crate::state::{PersistedState, Theme};

/// What the transcript resets to once a `clear` delay elapses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClearMode {
    /// Nothing is left behind
    #[default]
    Empty,
    /// The welcome lines are shown again
    Welcome,
}

/// Interpreter phase, derived from the session contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Nothing pending
    Idle,
    /// The visitor has typed something
    Composing,
    /// A submitted command still has delayed work outstanding
    Dispatching,
}

/// A transition message being revealed one character per tick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypingReveal {
    pub message: String,
    /// Characters of `message` already written
    pub revealed: usize,
    /// Transcript line receiving the characters
    pub line: usize,
    pub destination: Page,
}

impl TypingReveal {
    pub fn is_complete(&self) -> bool {
        self.revealed >= self.message.chars().count()
    }

    pub fn revealed_text(&self) -> String {
        self.message.chars().take(self.revealed).collect()
    }
}

/// One visitor's terminal session on one page.
///
/// `theme`, `points` and `easter_egg_found` are restored from storage when the
/// session is created; everything else starts fresh on each page load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Session {
    pub page: Page,
    pub transcript: Vec<String>,
    pub theme: Theme,
    pub points: u32,
    pub easter_egg_found: bool,
    pub pending_input: String,
    pub hints: Vec<String>,
    pub typing: Option<TypingReveal>,
    /// Destination waiting for the settle delay to elapse
    pub navigation_pending: Option<Page>,
    pub clear_pending: bool,
}

impl Session {
    /// Creates a session for `page` with the restored persisted state.
    ///
    /// The home page opens with the welcome lines; other pages start with an
    /// empty transcript.
    pub fn new(page: Page, persisted: PersistedState) -> Self {
        let transcript = match page {
            Page::Home => welcome_transcript(),
            _ => Vec::new(),
        };
        Self {
            page,
            transcript,
            theme: persisted.theme,
            points: persisted.points,
            easter_egg_found: persisted.easter_egg_found,
            pending_input: String::new(),
            hints: Vec::new(),
            typing: None,
            navigation_pending: None,
            clear_pending: false,
        }
    }

    /// The fields written to durable storage.
    pub fn persisted(&self) -> PersistedState {
        PersistedState {
            theme: self.theme,
            points: self.points,
            easter_egg_found: self.easter_egg_found,
        }
    }

    pub fn phase(&self) -> Phase {
        if self.typing.is_some() || self.navigation_pending.is_some() || self.clear_pending {
            Phase::Dispatching
        } else if !self.pending_input.trim().is_empty() {
            Phase::Composing
        } else {
            Phase::Idle
        }
    }

    pub fn is_typing(&self) -> bool {
        self.typing.is_some()
    }
}

pub(crate) fn welcome_transcript() -> Vec<String> {
    WELCOME_LINES.iter().map(|line| line.to_string()).collect()
}
