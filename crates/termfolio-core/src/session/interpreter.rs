//! The command interpreter: a pure `(Session, Event) -> Session` reducer.
//!
//! Delayed work (typing reveal, settle delay, clear delay) is never performed
//! here. The reducer returns [`Effect::Schedule`] requests and the host feeds
//! the scheduled event back in when the timer fires.

use crate::command::{CommandRegistry, EffectKind, Page};
use crate::portfolio::SKILLS;
use crate::session::event::{Effect, Event, Timings};
use crate::session::hints::compute_hints;
use crate::session::model::{welcome_transcript, ClearMode, Session, TypingReveal};

pub const NOT_RECOGNIZED: &str = "Command not recognized. Type \"help\" for available commands.";
pub const EASTER_EGG_FOUND: &str = "Congratulations! You found the Easter Egg! +10 points";
pub const EASTER_EGG_ALREADY_FOUND: &str =
    "You've already found the Easter Egg. Try something else!";
pub const EASTER_EGG_POINTS: u32 = 10;

/// Result of applying one event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub session: Session,
    pub effects: Vec<Effect>,
}

/// Resolves events against a command registry.
#[derive(Debug, Clone)]
pub struct Interpreter<'r> {
    registry: &'r CommandRegistry,
    timings: Timings,
    clear_mode: ClearMode,
}

impl<'r> Interpreter<'r> {
    pub fn new(registry: &'r CommandRegistry) -> Self {
        Self {
            registry,
            timings: Timings::default(),
            clear_mode: ClearMode::default(),
        }
    }

    pub fn with_timings(mut self, timings: Timings) -> Self {
        self.timings = timings;
        self
    }

    pub fn with_clear_mode(mut self, clear_mode: ClearMode) -> Self {
        self.clear_mode = clear_mode;
        self
    }

    pub fn registry(&self) -> &'r CommandRegistry {
        self.registry
    }

    pub fn timings(&self) -> Timings {
        self.timings
    }

    /// Applies `event` to `session`.
    pub fn apply(&self, mut session: Session, event: Event) -> Transition {
        let mut effects = Vec::new();

        match event {
            Event::InputChanged(input) | Event::HintSelected(input) => {
                session.hints = compute_hints(self.registry, &input);
                session.pending_input = input;
            }
            Event::Submit => self.submit(&mut session, &mut effects),
            Event::TypingTick => self.reveal_next(&mut session, &mut effects),
            Event::NavigationSettled(page) => {
                if session.navigation_pending == Some(page) {
                    session.navigation_pending = None;
                    effects.push(Effect::Navigate(page));
                }
            }
            Event::ClearElapsed => self.finish_clear(&mut session),
            Event::ThemeButtonPressed => {
                session.theme = session.theme.toggled();
                effects.push(Effect::Persist(session.persisted()));
            }
        }

        Transition { session, effects }
    }

    fn submit(&self, session: &mut Session, effects: &mut Vec<Effect>) {
        let line = session.pending_input.trim().to_lowercase();
        session.pending_input.clear();
        session.hints.clear();
        session.transcript.push(format!("$ {}", line));

        let Some(command) = self.registry.lookup(&line) else {
            session.transcript.push(NOT_RECOGNIZED.to_string());
            return;
        };

        session.transcript.push(command.description.clone());

        match &command.effect {
            EffectKind::Info => {}
            EffectKind::Navigate { page } => self.start_navigation(session, *page, effects),
            EffectKind::ClearTranscript => {
                if !session.clear_pending {
                    session.clear_pending = true;
                    effects.push(Effect::Schedule {
                        delay: self.timings.clear_delay,
                        event: Event::ClearElapsed,
                    });
                }
            }
            EffectKind::ToggleTheme => {
                session.theme = session.theme.toggled();
                session
                    .transcript
                    .push(format!("Switched to {} theme", session.theme));
                effects.push(Effect::Persist(session.persisted()));
            }
            EffectKind::OpenExternalLink { url, label } => {
                effects.push(Effect::OpenExternal(url.to_string()));
                session
                    .transcript
                    .push(format!("Opening {} in a new tab...", label));
            }
            EffectKind::ShowSkills => {
                session.transcript.push("My skills include:".to_string());
                session
                    .transcript
                    .extend(SKILLS.iter().map(|skill| skill.to_string()));
            }
            EffectKind::ToggleEasterEgg => {
                if session.easter_egg_found {
                    session.transcript.push(EASTER_EGG_ALREADY_FOUND.to_string());
                } else {
                    session.easter_egg_found = true;
                    session.points = session.points.saturating_add(EASTER_EGG_POINTS);
                    session.transcript.push(EASTER_EGG_FOUND.to_string());
                    effects.push(Effect::Persist(session.persisted()));
                }
            }
            EffectKind::ReportPoints => {
                session
                    .transcript
                    .push(format!("Your current points: {}", session.points));
            }
        }
    }

    fn start_navigation(&self, session: &mut Session, page: Page, effects: &mut Vec<Effect>) {
        // A newer destination supersedes a pending settle.
        session.navigation_pending = None;
        session.transcript.push(String::new());

        let tick_running = session.typing.is_some();
        session.typing = Some(TypingReveal {
            message: format!("Navigating to {} page...", page.name()),
            revealed: 0,
            line: session.transcript.len() - 1,
            destination: page,
        });

        if !tick_running {
            effects.push(Effect::Schedule {
                delay: self.timings.typing_interval,
                event: Event::TypingTick,
            });
        }
    }

    fn reveal_next(&self, session: &mut Session, effects: &mut Vec<Effect>) {
        let Some(mut reveal) = session.typing.take() else {
            return;
        };

        if let Some(ch) = reveal.message.chars().nth(reveal.revealed) {
            if let Some(line) = session.transcript.get_mut(reveal.line) {
                line.push(ch);
            }
            reveal.revealed += 1;
        }

        if reveal.is_complete() {
            session.navigation_pending = Some(reveal.destination);
            effects.push(Effect::Schedule {
                delay: self.timings.navigation_settle,
                event: Event::NavigationSettled(reveal.destination),
            });
        } else {
            session.typing = Some(reveal);
            effects.push(Effect::Schedule {
                delay: self.timings.typing_interval,
                event: Event::TypingTick,
            });
        }
    }

    fn finish_clear(&self, session: &mut Session) {
        if !session.clear_pending {
            return;
        }
        session.clear_pending = false;
        session.transcript = match self.clear_mode {
            ClearMode::Empty => Vec::new(),
            ClearMode::Welcome => welcome_transcript(),
        };

        // An in-flight reveal keeps going on a fresh line.
        if let Some(reveal) = session.typing.as_mut() {
            session.transcript.push(reveal.revealed_text());
            reveal.line = session.transcript.len() - 1;
        }
    }
}
