//! The command registry: keyword lookup and prefix search.
//!
//! The builtin registry is built once on first access and cached for the
//! lifetime of the process. Declared order is preserved everywhere because
//! hint display depends on it.

use std::collections::HashSet;
use std::sync::OnceLock;

use super::model::{Command, EffectKind, Page};
use crate::error::{FolioError, Result};
use crate::portfolio::content::GITHUB_URL;

/// An ordered, immutable set of commands.
#[derive(Debug, Clone)]
pub struct CommandRegistry {
    commands: Vec<Command>,
}

/// Static storage for the builtin registry (initialized once).
static BUILTIN_REGISTRY: OnceLock<CommandRegistry> = OnceLock::new();

impl CommandRegistry {
    /// Builds a registry from a custom command list.
    ///
    /// Keywords are normalized to lowercase for comparison; a duplicate
    /// keyword is rejected as a configuration error.
    pub fn new(commands: Vec<Command>) -> Result<Self> {
        let mut seen = HashSet::new();
        for command in &commands {
            let keyword = command.keyword.trim().to_lowercase();
            if keyword.is_empty() {
                return Err(FolioError::config("command keyword must not be empty"));
            }
            if !seen.insert(keyword) {
                return Err(FolioError::config(format!(
                    "duplicate command keyword '{}'",
                    command.keyword
                )));
            }
        }
        Ok(Self { commands })
    }

    /// Returns the builtin portfolio registry.
    pub fn builtin() -> &'static CommandRegistry {
        BUILTIN_REGISTRY.get_or_init(|| Self {
            commands: builtin_commands(),
        })
    }

    /// Resolves a submitted line. Matching is exact after trimming and
    /// lowercasing; `None` is the not-recognized path.
    pub fn lookup(&self, input: &str) -> Option<&Command> {
        let wanted = input.trim().to_lowercase();
        self.commands
            .iter()
            .find(|cmd| cmd.keyword.to_lowercase() == wanted)
    }

    /// All keywords whose lowercase form starts with `partial`, in declared order.
    ///
    /// An empty `partial` matches everything; the interpreter special-cases
    /// empty input before calling this.
    pub fn prefix_search(&self, partial: &str) -> Vec<&'static str> {
        let partial = partial.to_lowercase();
        self.commands
            .iter()
            .filter(|cmd| cmd.keyword.to_lowercase().starts_with(&partial))
            .map(|cmd| cmd.keyword)
            .collect()
    }

    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    pub fn keywords(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.commands.iter().map(|cmd| cmd.keyword)
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

const BUILTIN_KEYWORDS: [&str; 11] = [
    "home", "about", "projects", "contact", "chat", "skills", "clear", "theme", "github",
    "easter", "points",
];

fn builtin_commands() -> Vec<Command> {
    let help = format!("Available commands: {}", BUILTIN_KEYWORDS.join(", "));
    vec![
        Command::new("help", help, EffectKind::Info),
        Command::new(
            "home",
            "Navigate to home page",
            EffectKind::Navigate { page: Page::Home },
        ),
        Command::new(
            "about",
            "Navigate to about page",
            EffectKind::Navigate { page: Page::About },
        ),
        Command::new(
            "projects",
            "Navigate to projects page",
            EffectKind::Navigate {
                page: Page::Projects,
            },
        ),
        Command::new(
            "contact",
            "Navigate to contact page",
            EffectKind::Navigate {
                page: Page::Contact,
            },
        ),
        Command::new(
            "chat",
            "Navigate to chat page",
            EffectKind::Navigate { page: Page::Chat },
        ),
        Command::new("skills", "Display skills", EffectKind::ShowSkills),
        Command::new("clear", "Clear terminal", EffectKind::ClearTranscript),
        Command::new(
            "theme",
            "Toggle between light and dark theme",
            EffectKind::ToggleTheme,
        ),
        Command::new(
            "github",
            "Open GitHub profile",
            EffectKind::OpenExternalLink {
                url: GITHUB_URL,
                label: "GitHub profile",
            },
        ),
        Command::new(
            "easter",
            "Searching for hidden secrets...",
            EffectKind::ToggleEasterEgg,
        ),
        Command::new("points", "Checking your score...", EffectKind::ReportPoints),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_declared_order() {
        let keywords: Vec<_> = CommandRegistry::builtin().keywords().collect();
        assert_eq!(keywords[0], "help");
        assert_eq!(&keywords[1..], &BUILTIN_KEYWORDS[..]);
    }

    #[test]
    fn test_lookup_is_case_and_whitespace_insensitive() {
        let registry = CommandRegistry::builtin();
        for keyword in registry.keywords() {
            let plain = registry.lookup(keyword).unwrap();
            let upper = registry.lookup(&keyword.to_uppercase()).unwrap();
            let padded = registry.lookup(&format!("  {}  ", keyword)).unwrap();
            assert_eq!(plain, upper);
            assert_eq!(plain, padded);
        }
    }

    #[test]
    fn test_lookup_miss() {
        assert!(CommandRegistry::builtin().lookup("xyz").is_none());
        assert!(CommandRegistry::builtin().lookup("").is_none());
        assert!(CommandRegistry::builtin().lookup("help me").is_none());
    }

    #[test]
    fn test_prefix_search_preserves_declared_order() {
        let registry = CommandRegistry::builtin();
        assert_eq!(registry.prefix_search("pro"), vec!["projects"]);
        assert_eq!(registry.prefix_search("c"), vec!["contact", "chat", "clear"]);
        assert_eq!(registry.prefix_search("CH"), vec!["chat"]);
        assert!(registry.prefix_search("zz").is_empty());
    }

    #[test]
    fn test_help_lists_every_other_command() {
        let help = CommandRegistry::builtin().lookup("help").unwrap();
        assert_eq!(
            help.description,
            "Available commands: home, about, projects, contact, chat, skills, clear, theme, github, easter, points"
        );
    }

    #[test]
    fn test_custom_registry_rejects_duplicates() {
        let commands = vec![
            Command::new("ping", "pong", EffectKind::Info),
            Command::new("PING", "pong again", EffectKind::Info),
        ];
        let err = CommandRegistry::new(commands).unwrap_err();
        assert!(err.is_config());
    }

    #[test]
    fn test_custom_registry_rejects_blank_keyword() {
        let commands = vec![Command::new("  ", "nothing", EffectKind::Info)];
        assert!(CommandRegistry::new(commands).is_err());
    }
}
