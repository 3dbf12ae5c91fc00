//! Command definitions and the registry that resolves typed input.
//!
//! Every page shares one registry; only presentation differs per page.

pub mod model;
pub mod registry;

pub use model::{Command, EffectKind, Page};
pub use registry::CommandRegistry;
