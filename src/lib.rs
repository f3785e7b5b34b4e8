//! padcalc: the engine behind a single-screen keypad calculator.
//!
//! The engine is a synchronous state machine: a host UI feeds it abstract
//! [`Key`] events and renders the [`Update`] it gets back (expression text,
//! cursor, live preview, committed results, memory notices). Evaluation is
//! stateless text plumbing: the display string is normalized (glyphs,
//! percent shorthand) and handed to the meval backend, with failures
//! suppressed in live previews and surfaced as `"Error"` only on equals.

pub mod buffer;
pub mod controller;
pub mod evaluation;
pub mod memory;
pub mod normalize;
pub mod theme;

pub use buffer::InputBuffer;
pub use controller::{Calculator, Committed, Key, Notice, Update};
pub use evaluation::{EvalError, Outcome, evaluate, format_number};
pub use memory::MemoryRegister;
pub use normalize::normalize;
pub use theme::ThemePrefs;
