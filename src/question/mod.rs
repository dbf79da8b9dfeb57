//! Note writing and note identification questions
//!
//! A `NoteQuestion` pairs a question kind with frozen attempt state and
//! implements the hooks the host question engine calls: expected fields,
//! completeness, sameness, grading, correct response, summary, validation
//! message and question text.
//!
//! - **Note writing**: the note is named in the question text and the student
//!   answers with one token such as `C#4`.
//! - **Note identification**: the note is drawn on a staff and the student picks
//!   letter, accidental and (optionally) register from separate fields.

pub mod attempt;
pub mod options;

pub use attempt::{AttemptError, AttemptState};

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

use crate::grading::{all_or_nothing, strategy_by_name, Grade, GradeParams, GradingStrategy};
use crate::host::{AttemptStateStore, StringLookup};
use crate::models::response::{ACCIDENTAL_FIELD, ANSWER_FIELD, LETTER_FIELD, REGISTER_FIELD};
use crate::models::{Accidental, Clef, ExpectedField, FieldType, Note, Response};
use crate::parse::note::validate;
use crate::random::{RandomChoice, RandomNoteGenerator};

/// Register used in the note writing correct response when the register is not considered
const DEFAULT_REGISTER: u8 = 4;

/// Lookup results are display HTML and go in unescaped
const NOTE_WRITE_TEXT_TEMPLATE: &str = "{{{prompt}}}: <b>{{{note}}}</b>";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuestionKind {
    NoteWrite,
    NoteIdentify,
}

impl QuestionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionKind::NoteWrite => "note-write",
            QuestionKind::NoteIdentify => "note-identify",
        }
    }

    /// Names of the grading strategies this kind can be graded with
    pub fn supported_grading_strategies(&self) -> &'static [&'static str] {
        match self {
            QuestionKind::NoteWrite | QuestionKind::NoteIdentify => &[all_or_nothing::NAME],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuestionError {
    #[error("Response is incomplete")]
    IncompleteResponse,

    #[error("Grading strategy '{strategy}' is not supported by {kind} questions")]
    UnsupportedStrategy { strategy: String, kind: &'static str },

    #[error("No clef to choose from")]
    EmptyClefSet,

    #[error("Given note {0} has no register but the register is considered")]
    MissingRegister(String),

    #[error("Failed to build renderer options: {0}")]
    Options(String),

    #[error(transparent)]
    Attempt(#[from] AttemptError),
}

fn default_clefs() -> Vec<Clef> {
    vec![Clef::Treble]
}

fn default_strategy() -> String {
    all_or_nothing::NAME.to_string()
}

/// Authoring-time question settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionConfig {
    pub kind: QuestionKind,
    #[serde(default)]
    pub consider_register: bool,
    /// Clefs a random variant may be drawn on
    #[serde(default = "default_clefs")]
    pub clef_random: Vec<Clef>,
    /// Authored note; when absent the note is drawn at random
    #[serde(default)]
    pub given_note: Option<Note>,
    /// Clef of an authored note
    #[serde(default)]
    pub clef: Option<Clef>,
    #[serde(default = "default_strategy")]
    pub grading_strategy: String,
}

impl QuestionConfig {
    pub fn new(kind: QuestionKind, consider_register: bool) -> Self {
        Self {
            kind,
            consider_register,
            clef_random: default_clefs(),
            given_note: None,
            clef: None,
            grading_strategy: default_strategy(),
        }
    }
}

pub struct NoteQuestion<'s> {
    kind: QuestionKind,
    state: AttemptState,
    strategy: Box<dyn GradingStrategy>,
    strings: &'s dyn StringLookup,
}

impl<'s> NoteQuestion<'s> {
    pub fn new(
        kind: QuestionKind,
        state: AttemptState,
        strategy_name: &str,
        strings: &'s dyn StringLookup,
    ) -> Result<Self, QuestionError> {
        Ok(Self {
            kind,
            state,
            strategy: resolve_strategy(kind, strategy_name)?,
            strings,
        })
    }

    /// Fix the variant for a new attempt and persist it
    ///
    /// The note is the authored one when the config has it, otherwise it is
    /// drawn from the config's clef set.
    pub fn start_attempt<R: RandomChoice + ?Sized>(
        config: &QuestionConfig,
        rng: &mut R,
        store: &mut dyn AttemptStateStore,
        strings: &'s dyn StringLookup,
    ) -> Result<Self, QuestionError> {
        let strategy = resolve_strategy(config.kind, &config.grading_strategy)?;

        let (clef, note) = match config.given_note {
            Some(note) => (config.clef.unwrap_or(Clef::Treble), note),
            None => RandomNoteGenerator::new(rng)
                .generate(&config.clef_random)
                .ok_or(QuestionError::EmptyClefSet)?,
        };

        let given_note = if config.consider_register {
            if note.register.is_none() {
                return Err(QuestionError::MissingRegister(note.to_token()));
            }
            note
        } else {
            note.without_register()
        };

        let options_xml =
            options::options_xml(config.kind, clef, config.consider_register, &given_note)
                .map_err(|e| QuestionError::Options(e.to_string()))?;
        let question_text = question_text(config.kind, &given_note, strings);

        let state = AttemptState {
            clef,
            consider_register: config.consider_register,
            given_note,
            options_xml,
            question_text,
        };
        state.save(store);
        log::info!(
            "started {} attempt: {} on {} clef",
            config.kind.as_str(),
            state.given_note,
            state.clef
        );

        Ok(Self {
            kind: config.kind,
            state,
            strategy,
            strings,
        })
    }

    /// Rebuild the question for an attempt already in progress
    pub fn from_attempt(
        config: &QuestionConfig,
        store: &dyn AttemptStateStore,
        strings: &'s dyn StringLookup,
    ) -> Result<Self, QuestionError> {
        let state = AttemptState::load(store)?;
        Self::new(config.kind, state, &config.grading_strategy, strings)
    }

    pub fn kind(&self) -> QuestionKind {
        self.kind
    }

    pub fn state(&self) -> &AttemptState {
        &self.state
    }

    fn consider_register(&self) -> bool {
        self.state.consider_register
    }

    pub fn expected_fields(&self) -> Vec<ExpectedField> {
        match self.kind {
            QuestionKind::NoteWrite => vec![ExpectedField {
                name: ANSWER_FIELD,
                field_type: FieldType::CleanHtml,
            }],
            QuestionKind::NoteIdentify => {
                let mut names = vec![LETTER_FIELD, ACCIDENTAL_FIELD];
                if self.consider_register() {
                    names.push(REGISTER_FIELD);
                }
                names
                    .into_iter()
                    .map(|name| ExpectedField {
                        name,
                        field_type: FieldType::Text,
                    })
                    .collect()
            }
        }
    }

    pub fn is_complete_response(&self, response: &Response) -> bool {
        match self.kind {
            QuestionKind::NoteWrite => validate(response.get(ANSWER_FIELD), self.consider_register()).is_ok(),
            QuestionKind::NoteIdentify => self
                .expected_fields()
                .iter()
                .all(|field| response.has_value(field.name)),
        }
    }

    pub fn is_same_response(&self, prev: &Response, next: &Response) -> bool {
        self.expected_fields()
            .iter()
            .all(|field| prev.same_at_key_missing_is_blank(next, field.name))
    }

    pub fn correct_response(&self) -> Response {
        let note = &self.state.given_note;
        match self.kind {
            QuestionKind::NoteWrite => {
                let register = match note.register {
                    Some(register) if self.consider_register() => register.value(),
                    _ => DEFAULT_REGISTER,
                };
                let answer = format!("{}{}{}", note.letter, note.accidental, register);
                Response::new().with(ANSWER_FIELD, &answer)
            }
            QuestionKind::NoteIdentify => {
                let mut response = Response::new()
                    .with(LETTER_FIELD, note.letter.as_str())
                    .with(ACCIDENTAL_FIELD, note.accidental.token());
                if let (true, Some(register)) = (self.consider_register(), note.register) {
                    response.insert(REGISTER_FIELD, &register.to_string());
                }
                response
            }
        }
    }

    /// Grade a complete response; incomplete responses are rejected
    pub fn grade_response(&self, response: &Response) -> Result<Grade, QuestionError> {
        if !self.is_complete_response(response) {
            return Err(QuestionError::IncompleteResponse);
        }

        let submitted = response.restricted_to(&self.expected_fields());
        let params = GradeParams {
            consider_register: self.consider_register(),
        };
        let grade = self
            .strategy
            .grade(&submitted, &self.correct_response(), params);
        log::debug!("graded {} response: {:?}", self.kind.as_str(), grade);
        Ok(grade)
    }

    /// Short text describing a response; empty when there is nothing to show
    pub fn summarise_response(&self, response: &Response) -> String {
        match self.kind {
            QuestionKind::NoteWrite => {
                let Some(answer) = response.get(ANSWER_FIELD) else {
                    return String::new();
                };
                let mut answer = answer.replace(' ', "");
                if !self.consider_register() && answer.ends_with(|c: char| c.is_ascii_digit()) {
                    answer.pop();
                }
                answer
            }
            QuestionKind::NoteIdentify => {
                if !self.is_complete_response(response) {
                    return String::new();
                }
                let letter = response.get_or_blank(LETTER_FIELD);
                let accidental = response.get_or_blank(ACCIDENTAL_FIELD);
                let accidental_key = match accidental.parse::<Accidental>() {
                    Ok(acc) => acc.string_key().to_string(),
                    Err(_) => format!("acc_{}", accidental.replace('#', "sharp")),
                };

                let mut summary = self.strings.lookup(&format!("note{}", letter), None);
                summary.push_str(&self.strings.lookup(&accidental_key, None));
                if self.consider_register() {
                    summary.push_str(response.get_or_blank(REGISTER_FIELD));
                }
                summary
            }
        }
    }

    /// Message prompting the student to fix the response; empty when it is valid
    pub fn validation_error(&self, response: &Response) -> String {
        match self.kind {
            QuestionKind::NoteWrite => {
                let answer = response.get(ANSWER_FIELD);
                match validate(answer, self.consider_register()) {
                    Ok(()) => String::new(),
                    Err(e) => self.strings.lookup(e.string_key(), answer),
                }
            }
            QuestionKind::NoteIdentify => {
                if self.is_complete_response(response) {
                    String::new()
                } else if self.consider_register() {
                    self.strings.lookup("validationerror_note_identify", None)
                } else {
                    self.strings.lookup("validationerror_note_identify_no_reg", None)
                }
            }
        }
    }

    /// Question text as frozen at attempt start
    pub fn question_text(&self) -> &str {
        &self.state.question_text
    }

    pub fn options_xml(&self) -> &str {
        &self.state.options_xml
    }
}

fn resolve_strategy(kind: QuestionKind, name: &str) -> Result<Box<dyn GradingStrategy>, QuestionError> {
    let unsupported = || QuestionError::UnsupportedStrategy {
        strategy: name.to_string(),
        kind: kind.as_str(),
    };
    if !kind.supported_grading_strategies().iter().any(|s| *s == name) {
        return Err(unsupported());
    }
    strategy_by_name(name).ok_or_else(unsupported)
}

/// Localized note name: letter, accidental sign (none for a natural), register if any
fn display_note(note: &Note, strings: &dyn StringLookup) -> String {
    let mut text = strings.lookup(&format!("note{}", note.letter), None);
    if note.accidental != Accidental::Natural {
        text.push_str(&strings.lookup(note.accidental.string_key(), None));
    }
    if let Some(register) = note.register {
        text.push_str(&register.to_string());
    }
    text
}

/// Question text shown for an attempt
pub fn question_text(kind: QuestionKind, given_note: &Note, strings: &dyn StringLookup) -> String {
    match kind {
        QuestionKind::NoteWrite => {
            let prompt = strings.lookup("questiontext_note_write", None);
            let note = display_note(given_note, strings);
            render_note_write_text(&prompt, &note).unwrap_or_else(|e| {
                log::warn!("failed to render question text: {}", e);
                format!("{}: <b>{}</b>", prompt, note)
            })
        }
        QuestionKind::NoteIdentify => {
            format!("{}:", strings.lookup("questiontext_note_identify", None))
        }
    }
}

fn render_note_write_text(prompt: &str, note: &str) -> Result<String, mustache::Error> {
    let mut context = HashMap::new();
    context.insert("prompt", prompt);
    context.insert("note", note);
    mustache::compile_str(NOTE_WRITE_TEXT_TEMPLATE)?.render_to_string(&context)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{EnglishStrings, MemoryAttemptStore};
    use crate::models::{Letter, Register};
    use crate::random::RngChoice;

    fn state(consider_register: bool, token: &str) -> AttemptState {
        let note = Note::parse(token, consider_register).unwrap();
        AttemptState {
            clef: Clef::Treble,
            consider_register,
            given_note: note,
            options_xml: String::new(),
            question_text: String::new(),
        }
    }

    fn question<'s>(
        kind: QuestionKind,
        consider_register: bool,
        token: &str,
        strings: &'s EnglishStrings,
    ) -> NoteQuestion<'s> {
        NoteQuestion::new(kind, state(consider_register, token), all_or_nothing::NAME, strings).unwrap()
    }

    #[test]
    fn test_unsupported_strategy() {
        let strings = EnglishStrings::new();
        let result = NoteQuestion::new(
            QuestionKind::NoteWrite,
            state(true, "C#4"),
            "partial_credit",
            &strings,
        );
        assert!(matches!(result, Err(QuestionError::UnsupportedStrategy { .. })));
    }

    #[test]
    fn test_note_write_text() {
        let strings = EnglishStrings::new();
        let note = Note::parse("C#4", true).unwrap();
        assert_eq!(
            question_text(QuestionKind::NoteWrite, &note, &strings),
            "Write the following note: <b>C♯4</b>"
        );
        let natural = Note::parse("Bn", false).unwrap();
        assert_eq!(
            question_text(QuestionKind::NoteWrite, &natural, &strings),
            "Write the following note: <b>B</b>"
        );
    }

    /// Host catalogue that names accidentals with HTML entities
    struct EntityStrings;

    impl StringLookup for EntityStrings {
        fn lookup(&self, key: &str, _a: Option<&str>) -> String {
            match key {
                "questiontext_note_write" => "Write <i>this</i> note".to_string(),
                "acc_sharp" => "&#9839;".to_string(),
                _ => key.trim_start_matches("note").to_string(),
            }
        }
    }

    #[test]
    fn test_note_write_text_keeps_lookup_markup() {
        let note = Note::parse("C#4", true).unwrap();
        assert_eq!(
            question_text(QuestionKind::NoteWrite, &note, &EntityStrings),
            "Write <i>this</i> note: <b>C&#9839;4</b>"
        );
    }

    #[test]
    fn test_note_write_summary_of_incomplete_answer() {
        let strings = EnglishStrings::new();
        let q = question(QuestionKind::NoteWrite, true, "C#4", &strings);
        let response = Response::new().with(ANSWER_FIELD, "H #4");
        assert!(!q.is_complete_response(&response));
        assert_eq!(q.summarise_response(&response), "H#4");
        assert_eq!(q.summarise_response(&Response::new()), "");
    }

    #[test]
    fn test_note_identify_text() {
        let strings = EnglishStrings::new();
        let note = Note::parse("Ebb3", true).unwrap();
        assert_eq!(
            question_text(QuestionKind::NoteIdentify, &note, &strings),
            "Identify the following note:"
        );
    }

    #[test]
    fn test_note_write_correct_response_defaults_register() {
        let strings = EnglishStrings::new();
        let q = question(QuestionKind::NoteWrite, false, "Fx", &strings);
        assert_eq!(q.correct_response().get(ANSWER_FIELD), Some("Fx4"));

        let q = question(QuestionKind::NoteWrite, true, "Fx2", &strings);
        assert_eq!(q.correct_response().get(ANSWER_FIELD), Some("Fx2"));
    }

    #[test]
    fn test_note_identify_correct_response() {
        let strings = EnglishStrings::new();
        let q = question(QuestionKind::NoteIdentify, true, "Ab5", &strings);
        let correct = q.correct_response();
        assert_eq!(correct.get(LETTER_FIELD), Some("A"));
        assert_eq!(correct.get(ACCIDENTAL_FIELD), Some("b"));
        assert_eq!(correct.get(REGISTER_FIELD), Some("5"));

        let q = question(QuestionKind::NoteIdentify, false, "Ab", &strings);
        assert_eq!(q.correct_response().get(REGISTER_FIELD), None);
    }

    #[test]
    fn test_start_attempt_with_authored_note() {
        let strings = EnglishStrings::new();
        let mut config = QuestionConfig::new(QuestionKind::NoteIdentify, true);
        config.given_note = Some(Note::new(Letter::D, Accidental::Sharp, Register::new(3)));
        config.clef = Some(Clef::Bass);

        let mut store = MemoryAttemptStore::new();
        let mut rng = RngChoice::seeded(0);
        let q = NoteQuestion::start_attempt(&config, &mut rng, &mut store, &strings).unwrap();
        assert_eq!(q.state().clef, Clef::Bass);
        assert_eq!(q.state().given_note.to_token(), "D#3");
        assert!(q.options_xml().contains("<clef>bass</clef>"));
    }

    #[test]
    fn test_start_attempt_authored_note_without_register() {
        let strings = EnglishStrings::new();
        let mut config = QuestionConfig::new(QuestionKind::NoteWrite, true);
        config.given_note = Some(Note::new(Letter::D, Accidental::Sharp, None));

        let mut store = MemoryAttemptStore::new();
        let mut rng = RngChoice::seeded(0);
        let result = NoteQuestion::start_attempt(&config, &mut rng, &mut store, &strings);
        assert!(matches!(result, Err(QuestionError::MissingRegister(_))));
        assert!(store.is_empty());
    }

    #[test]
    fn test_start_attempt_empty_clef_set() {
        let strings = EnglishStrings::new();
        let mut config = QuestionConfig::new(QuestionKind::NoteWrite, true);
        config.clef_random.clear();

        let mut store = MemoryAttemptStore::new();
        let mut rng = RngChoice::seeded(0);
        let result = NoteQuestion::start_attempt(&config, &mut rng, &mut store, &strings);
        assert!(matches!(result, Err(QuestionError::EmptyClefSet)));
    }

    #[test]
    fn test_random_note_drops_register_when_not_considered() {
        let strings = EnglishStrings::new();
        let config = QuestionConfig::new(QuestionKind::NoteWrite, false);
        let mut store = MemoryAttemptStore::new();
        let mut rng = RngChoice::seeded(3);
        let q = NoteQuestion::start_attempt(&config, &mut rng, &mut store, &strings).unwrap();
        assert_eq!(q.state().given_note.register, None);
    }

    #[test]
    fn test_config_from_json() {
        let json = r#"{"kind":"note-identify","considerRegister":true,"clefRandom":["bass","tenor"]}"#;
        let config: QuestionConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.kind, QuestionKind::NoteIdentify);
        assert!(config.consider_register);
        assert_eq!(config.clef_random, vec![Clef::Bass, Clef::Tenor]);
        assert_eq!(config.grading_strategy, all_or_nothing::NAME);
        assert_eq!(config.given_note, None);
    }
}
