//! Music Theory Note Questions
//!
//! Note writing and note identification question subtypes for a host
//! question engine: the note model, answer validation, random reference
//! notes per clef and all-or-nothing grading. Compiled as a WASM module for
//! the browser-side host and as an rlib for native use and tests.

pub mod api;
pub mod grading;
pub mod host;
pub mod models;
pub mod parse;
pub mod question;
pub mod random;

// Re-export commonly used types
pub use grading::{Grade, GradedState, GradingStrategy, NoteAllOrNothing};
pub use models::{Accidental, Clef, Letter, Note, Register, Response};
pub use parse::NoteValidationError;
pub use question::{AttemptState, NoteQuestion, QuestionConfig, QuestionError, QuestionKind};

use wasm_bindgen::prelude::*;

// This is like the `main` function, but for WASM modules.
#[wasm_bindgen(start)]
pub fn main() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    #[cfg(feature = "console_log")]
    if let Err(e) = console_log::init_with_level(log::Level::Debug) {
        api::helpers::log_error(&format!("failed to initialize logger: {}", e));
    }

    log::info!("Music theory note module initialized");
}
