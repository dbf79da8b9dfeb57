//! Parsing and validation of submitted answers

pub mod note;

pub use note::{parse_note, validate, NoteValidationError};
