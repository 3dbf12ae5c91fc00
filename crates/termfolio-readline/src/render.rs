//! Page layout and theme palettes.

use colored::{Color, ColoredString, Colorize};

use termfolio_core::command::Page;
use termfolio_core::portfolio::content::{
    social_links, ABOUT_PARAGRAPHS, CONTACT_INTRO, LOCATION, OWNER_NAME, OWNER_TITLE,
    PROJECTS_INTRO,
};
use termfolio_core::portfolio::{greeting_for_hour, PROJECTS, SKILLS};
use termfolio_core::session::{Session, NOT_RECOGNIZED};
use termfolio_core::state::Theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub text: Color,
    pub accent: Color,
    pub muted: Color,
    pub prompt: Color,
    pub error: Color,
}

impl Palette {
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Light => Self {
                text: Color::Black,
                accent: Color::Blue,
                muted: Color::BrightBlack,
                prompt: Color::Magenta,
                error: Color::Red,
            },
            Theme::Dark => Self {
                text: Color::White,
                accent: Color::BrightGreen,
                muted: Color::BrightBlack,
                prompt: Color::BrightCyan,
                error: Color::BrightRed,
            },
        }
    }

    /// Styles one transcript line.
    pub fn line(&self, line: &str) -> ColoredString {
        if line.starts_with("$ ") {
            line.color(self.prompt)
        } else if line == NOT_RECOGNIZED {
            line.color(self.error)
        } else {
            line.color(self.text)
        }
    }

    pub fn accent(&self, text: &str) -> ColoredString {
        text.color(self.accent).bold()
    }

    pub fn muted(&self, text: &str) -> ColoredString {
        text.color(self.muted)
    }
}

/// Header shown on every page.
pub fn header(session: &Session, hour: u32) -> Vec<String> {
    let mut lines = Vec::new();
    if session.page == Page::Home {
        lines.push(format!("{}!", greeting_for_hour(hour)));
    }
    lines.push(format!("{} | {}", OWNER_NAME, OWNER_TITLE));
    lines.push(format!(
        "{} | points: {} | theme: {}",
        LOCATION, session.points, session.theme
    ));
    lines
}

/// Static content of `page`, above the terminal.
pub fn page_body(page: Page) -> Vec<String> {
    match page {
        Page::Home => Vec::new(),
        Page::About => {
            let mut lines = vec!["About me".to_string(), String::new()];
            for paragraph in ABOUT_PARAGRAPHS {
                lines.push(paragraph.to_string());
                lines.push(String::new());
            }
            lines.push(format!("Skills: {}", SKILLS.join(", ")));
            lines
        }
        Page::Projects => {
            let mut lines = vec!["Projects".to_string(), PROJECTS_INTRO.to_string()];
            for project in PROJECTS {
                lines.push(String::new());
                lines.push(format!("{} ({})", project.name, project.role));
                lines.push(format!("  {}", project.description));
            }
            lines
        }
        Page::Contact => {
            let mut lines = vec!["Contact".to_string(), CONTACT_INTRO.to_string()];
            lines.extend(
                social_links()
                    .into_iter()
                    .map(|(label, target)| format!("  {}: {}", label, target)),
            );
            lines.push(String::new());
            lines.push("Type /form to send me a message.".to_string());
            lines
        }
        Page::Chat => vec![
            "Let's chat".to_string(),
            "Tell me about your project and I'll get back to you.".to_string(),
            String::new(),
            "Type /form to start.".to_string(),
        ],
        Page::NotFound => vec![
            "404 | This page could not be found.".to_string(),
            "Type \"home\" to go back.".to_string(),
        ],
    }
}

/// Footer links shown under the terminal on every page.
pub fn footer() -> String {
    social_links()
        .into_iter()
        .map(|(label, _)| label)
        .collect::<Vec<_>>()
        .join(" | ")
}
