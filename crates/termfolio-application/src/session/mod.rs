//! Session hosting: the actor that owns a [`Session`] and runs the
//! interpreter's effects.
//!
//! [`Session`]: termfolio_core::session::Session

mod runtime;
mod scheduler;

pub use runtime::{RuntimeSettings, SessionHandle, SessionRuntime, SessionUpdate};
pub use scheduler::Scheduler;
