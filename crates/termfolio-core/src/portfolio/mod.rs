//! Portfolio content and presentation helpers shared by every page.

pub mod content;
pub mod greeting;

pub use content::{Project, PROJECTS, SKILLS, WELCOME_LINES};
pub use greeting::greeting_for_hour;
