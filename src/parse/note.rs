//! Note answer validation
//!
//! Accepted grammar: one letter `A`-`G`, one accidental token (`n`, `#`, `b`,
//! `x`, `bb`) and one register digit `1`-`6`, with no whitespace. When the
//! register is not considered the digit is optional.
//!
//! Problems are reported in a fixed order: empty, whitespace, syntax.

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use crate::models::note::{Accidental, Letter, Note, Register};

static NOTE_WITH_REGISTER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([A-G])(n|#|b|x|bb)([1-6])$").expect("valid note regex"));

static NOTE_OPTIONAL_REGISTER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([A-G])(n|#|b|x|bb)([1-6])?$").expect("valid note regex"));

/// Why a raw note answer was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum NoteValidationError {
    /// Nothing was entered
    #[error("The answer is empty")]
    Empty,

    /// The answer contains a whitespace character
    #[error("The answer contains whitespace")]
    Whitespace,

    /// The answer does not follow the note grammar
    #[error("The answer is not a valid note")]
    InvalidSyntax,
}

impl NoteValidationError {
    /// Key of the user-facing message in the string catalogue
    pub fn string_key(&self) -> &'static str {
        match self {
            NoteValidationError::Empty => "validationerror_empty",
            NoteValidationError::Whitespace => "validationerror_whitespace",
            NoteValidationError::InvalidSyntax => "validationerror_invalidsyntax",
        }
    }
}

fn grammar(consider_register: bool) -> &'static Regex {
    if consider_register {
        &NOTE_WITH_REGISTER
    } else {
        &NOTE_OPTIONAL_REGISTER
    }
}

/// Validate a raw answer; `None` means the field was never submitted
pub fn validate(raw: Option<&str>, consider_register: bool) -> Result<(), NoteValidationError> {
    let text = match raw {
        None | Some("") => return Err(NoteValidationError::Empty),
        Some(text) => text,
    };

    if text.chars().any(char::is_whitespace) {
        return Err(NoteValidationError::Whitespace);
    }

    if !grammar(consider_register).is_match(text) {
        return Err(NoteValidationError::InvalidSyntax);
    }

    Ok(())
}

/// Parse an answer token into a `Note`
pub fn parse_note(text: &str, consider_register: bool) -> Result<Note, NoteValidationError> {
    validate(Some(text), consider_register)?;

    let captures = grammar(consider_register)
        .captures(text)
        .ok_or(NoteValidationError::InvalidSyntax)?;

    // Groups are constrained by the regex, so these conversions only fail on a
    // grammar/enum mismatch.
    let letter: Letter = captures[1]
        .parse()
        .map_err(|_| NoteValidationError::InvalidSyntax)?;
    let accidental: Accidental = captures[2]
        .parse()
        .map_err(|_| NoteValidationError::InvalidSyntax)?;

    let register = if consider_register {
        let register: Register = captures[3]
            .parse()
            .map_err(|_| NoteValidationError::InvalidSyntax)?;
        Some(register)
    } else {
        if captures.get(3).is_some() {
            log::debug!("ignoring register digit in '{}'", text);
        }
        None
    };

    Ok(Note::new(letter, accidental, register))
}
