//! The terminal session and the interpreter that drives it.

pub mod event;
pub mod hints;
pub mod interpreter;
pub mod model;

pub use event::{Effect, Event, Timings};
pub use hints::compute_hints;
pub use interpreter::{Interpreter, Transition, NOT_RECOGNIZED};
pub use model::{ClearMode, Phase, Session, TypingReveal};
