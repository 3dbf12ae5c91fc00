//! Visitor state that persists across sessions.

pub mod model;
pub mod repository;

pub use model::{PersistedState, Theme, EASTER_EGG_KEY, POINTS_KEY, THEME_KEY};
pub use repository::{KeyValueStore, StateRepository};
