//! Models module
//!
//! Value types for notes, clefs and submitted responses.

pub mod clef;
pub mod note;
pub mod response;

// Re-export commonly used types
pub use clef::{valid_registers, Clef};
pub use note::{Accidental, Letter, Note, Register};
pub use response::{ExpectedField, FieldType, Response};
