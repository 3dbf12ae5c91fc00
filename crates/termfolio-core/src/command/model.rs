//! Command domain models.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::FolioError;

/// A page of the portfolio that a command can navigate to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Page {
    Home,
    About,
    Projects,
    Contact,
    Chat,
    NotFound,
}

impl Page {
    /// Every page, in menu order.
    pub const ALL: [Page; 6] = [
        Page::Home,
        Page::About,
        Page::Projects,
        Page::Contact,
        Page::Chat,
        Page::NotFound,
    ];

    /// Short name used in transition messages and prompts.
    pub fn name(self) -> &'static str {
        match self {
            Page::Home => "home",
            Page::About => "about",
            Page::Projects => "projects",
            Page::Contact => "contact",
            Page::Chat => "chat",
            Page::NotFound => "notfound",
        }
    }

    /// Route path of the page (`home` lives at `/`).
    pub fn path(self) -> &'static str {
        match self {
            Page::Home => "/",
            Page::About => "/about",
            Page::Projects => "/projects",
            Page::Contact => "/contact",
            Page::Chat => "/chat",
            Page::NotFound => "/404",
        }
    }

    /// Resolves a route path. Unknown paths resolve to [`Page::NotFound`].
    pub fn from_path(path: &str) -> Page {
        let trimmed = path.trim().trim_end_matches('/');
        Page::ALL
            .into_iter()
            .find(|page| page.path().trim_end_matches('/') == trimmed)
            .unwrap_or(Page::NotFound)
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Page {
    type Err = FolioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Page::ALL
            .into_iter()
            .find(|page| page.name() == wanted)
            .ok_or_else(|| FolioError::not_found("page", s))
    }
}

/// The side effect a command triggers once it is dispatched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EffectKind {
    /// Only the description is shown
    Info,
    /// Typing reveal, settle delay, then a page transition
    Navigate { page: Page },
    /// Delayed reset of the transcript
    ClearTranscript,
    /// Flip between light and dark
    ToggleTheme,
    /// Open a fixed URL in a new browsing context
    OpenExternalLink {
        url: &'static str,
        label: &'static str,
    },
    /// Append the static skills list
    ShowSkills,
    /// One-time Easter egg discovery worth ten points
    ToggleEasterEgg,
    /// Append the current point total
    ReportPoints,
}

/// A command the interpreter understands.
///
/// Commands are immutable once the registry is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Command {
    /// Lowercase keyword typed by the visitor
    pub keyword: &'static str,
    /// Line appended to the transcript when the command runs
    pub description: String,
    /// What dispatching the command does
    pub effect: EffectKind,
}

impl Command {
    pub fn new(keyword: &'static str, description: impl Into<String>, effect: EffectKind) -> Self {
        Self {
            keyword,
            description: description.into(),
            effect,
        }
    }
}
