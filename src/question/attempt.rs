//! Frozen per-attempt state
//!
//! Written to the host store once when the attempt starts and read back on
//! every later request, so a re-rendered attempt never re-randomizes.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::host::AttemptStateStore;
use crate::models::{Accidental, Clef, Letter, Note, Register};

pub const VAR_CLEF: &str = "_var_clef";
pub const VAR_CONSIDER_REGISTER: &str = "_var_considerregister";
pub const VAR_GIVEN_LETTER: &str = "_var_givennoteletter";
pub const VAR_GIVEN_ACCIDENTAL: &str = "_var_givennoteaccidental";
pub const VAR_GIVEN_REGISTER: &str = "_var_givennoteregister";
pub const VAR_OPTIONS_XML: &str = "_var_optionsxml";
pub const VAR_QUESTION_TEXT: &str = "_var_questiontext";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AttemptError {
    #[error("Attempt variable '{0}' is missing")]
    MissingVar(&'static str),

    #[error("Attempt variable '{key}' has invalid value '{value}'")]
    InvalidVar { key: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttemptState {
    pub clef: Clef,
    pub consider_register: bool,
    /// Carries a register exactly when `consider_register` is set
    pub given_note: Note,
    pub options_xml: String,
    pub question_text: String,
}

impl AttemptState {
    /// Write every attempt variable
    pub fn save(&self, store: &mut dyn AttemptStateStore) {
        let register = self
            .given_note
            .register
            .map(|r| r.to_string())
            .unwrap_or_default();

        store.set_var(VAR_CLEF, self.clef.as_str());
        store.set_var(VAR_CONSIDER_REGISTER, if self.consider_register { "1" } else { "0" });
        store.set_var(VAR_GIVEN_LETTER, self.given_note.letter.as_str());
        store.set_var(VAR_GIVEN_ACCIDENTAL, self.given_note.accidental.token());
        store.set_var(VAR_GIVEN_REGISTER, &register);
        store.set_var(VAR_OPTIONS_XML, &self.options_xml);
        store.set_var(VAR_QUESTION_TEXT, &self.question_text);
    }

    /// Read the state back from the store
    pub fn load(store: &dyn AttemptStateStore) -> Result<AttemptState, AttemptError> {
        let clef: Clef = parse_var(store, VAR_CLEF)?;
        let consider_register = match required(store, VAR_CONSIDER_REGISTER)?.as_str() {
            "1" | "true" => true,
            "0" | "false" | "" => false,
            other => {
                return Err(AttemptError::InvalidVar {
                    key: VAR_CONSIDER_REGISTER,
                    value: other.to_string(),
                })
            }
        };
        let letter: Letter = parse_var(store, VAR_GIVEN_LETTER)?;
        let accidental: Accidental = parse_var(store, VAR_GIVEN_ACCIDENTAL)?;
        let register = if consider_register {
            Some(parse_var::<Register>(store, VAR_GIVEN_REGISTER)?)
        } else {
            None
        };

        Ok(AttemptState {
            clef,
            consider_register,
            given_note: Note::new(letter, accidental, register),
            options_xml: required(store, VAR_OPTIONS_XML)?,
            question_text: required(store, VAR_QUESTION_TEXT)?,
        })
    }
}

fn required(store: &dyn AttemptStateStore, key: &'static str) -> Result<String, AttemptError> {
    store.get_var(key).ok_or(AttemptError::MissingVar(key))
}

fn parse_var<T: std::str::FromStr>(
    store: &dyn AttemptStateStore,
    key: &'static str,
) -> Result<T, AttemptError> {
    let value = required(store, key)?;
    value
        .parse()
        .map_err(|_| AttemptError::InvalidVar { key, value })
}
