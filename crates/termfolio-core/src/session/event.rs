use std::time::Duration;

use serde::Serialize;

use crate::command::Page;
use crate::state::PersistedState;

/// Discrete inputs the interpreter reacts to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Event {
    /// The input line changed (keystroke, paste, history recall).
    InputChanged(String),
    /// A hint was picked; it replaces the input line.
    HintSelected(String),
    /// The input line was submitted.
    Submit,
    /// Reveal the next character of the transition message.
    TypingTick,
    /// The settle delay after a reveal elapsed.
    NavigationSettled(Page),
    /// The clear delay elapsed.
    ClearElapsed,
    /// The header theme toggle, outside the terminal.
    ThemeButtonPressed,
}

/// Work the interpreter asks its host to perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Write the persisted fields (best-effort).
    Persist(PersistedState),
    /// Feed `event` back after `delay`, unless the session is torn down first.
    Schedule { delay: Duration, event: Event },
    /// Leave the current page.
    Navigate(Page),
    /// Open a URL in a new browsing context.
    OpenExternal(String),
}

/// Fixed pacing delays of the interpreter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timings {
    pub typing_interval: Duration,
    pub navigation_settle: Duration,
    pub clear_delay: Duration,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            typing_interval: Duration::from_millis(50),
            navigation_settle: Duration::from_millis(1000),
            clear_delay: Duration::from_millis(500),
        }
    }
}
