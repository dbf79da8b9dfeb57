//! Exported question hooks
//!
//! # Arguments shared by most functions
//! - `config_js`: `QuestionConfig` object (`{kind, considerRegister, clefRandom, ...}`)
//! - `state_js`: attempt variables object returned by `startAttempt`
//! - `response_js`: flat `{field: value}` response object

use once_cell::sync::Lazy;
use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::api::helpers::{deserialize, serialize, to_js_error};
use crate::host::{EnglishStrings, MemoryAttemptStore};
use crate::models::Response;
use crate::parse::note::validate;
use crate::question::{NoteQuestion, QuestionConfig};
use crate::random::RngChoice;
use crate::{wasm_info, wasm_log};

static STRINGS: Lazy<EnglishStrings> = Lazy::new(EnglishStrings::new);

/// Result of `gradeResponse`
#[derive(Serialize, Clone, Debug)]
pub struct GradeResult {
    pub fraction: f64,
    pub state: &'static str,
}

fn load_question(config_js: JsValue, state_js: JsValue) -> Result<NoteQuestion<'static>, JsValue> {
    let config: QuestionConfig = deserialize(config_js, "Invalid question config")?;
    let store: MemoryAttemptStore = deserialize(state_js, "Invalid attempt state")?;
    NoteQuestion::from_attempt(&config, &store, &*STRINGS)
        .map_err(|e| to_js_error("Failed to restore attempt", e))
}

/// Start an attempt and return the attempt variables to persist
#[wasm_bindgen(js_name = startAttempt)]
pub fn start_attempt(config_js: JsValue) -> Result<JsValue, JsValue> {
    let config: QuestionConfig = deserialize(config_js, "Invalid question config")?;
    wasm_info!("startAttempt called: kind={}", config.kind.as_str());

    let mut rng = RngChoice::from_entropy().map_err(|e| to_js_error("No entropy source", e))?;
    let mut store = MemoryAttemptStore::new();
    NoteQuestion::start_attempt(&config, &mut rng, &mut store, &*STRINGS)
        .map_err(|e| to_js_error("Failed to start attempt", e))?;

    wasm_log!("  stored {} attempt variables", store.len());
    serialize(&store, "Failed to serialize attempt state")
}

#[wasm_bindgen(js_name = getQuestionText)]
pub fn get_question_text(config_js: JsValue, state_js: JsValue) -> Result<String, JsValue> {
    Ok(load_question(config_js, state_js)?.question_text().to_string())
}

#[wasm_bindgen(js_name = getOptionsXml)]
pub fn get_options_xml(config_js: JsValue, state_js: JsValue) -> Result<String, JsValue> {
    Ok(load_question(config_js, state_js)?.options_xml().to_string())
}

/// Expected fields as `[{name, type}]`
#[wasm_bindgen(js_name = getExpectedFields)]
pub fn get_expected_fields(config_js: JsValue, state_js: JsValue) -> Result<JsValue, JsValue> {
    let question = load_question(config_js, state_js)?;
    serialize(&question.expected_fields(), "Failed to serialize expected fields")
}

#[wasm_bindgen(js_name = isCompleteResponse)]
pub fn is_complete_response(
    config_js: JsValue,
    state_js: JsValue,
    response_js: JsValue,
) -> Result<bool, JsValue> {
    let question = load_question(config_js, state_js)?;
    let response: Response = deserialize(response_js, "Invalid response")?;
    Ok(question.is_complete_response(&response))
}

#[wasm_bindgen(js_name = isSameResponse)]
pub fn is_same_response(
    config_js: JsValue,
    state_js: JsValue,
    prev_js: JsValue,
    next_js: JsValue,
) -> Result<bool, JsValue> {
    let question = load_question(config_js, state_js)?;
    let prev: Response = deserialize(prev_js, "Invalid previous response")?;
    let next: Response = deserialize(next_js, "Invalid new response")?;
    Ok(question.is_same_response(&prev, &next))
}

/// Grade a response, returning `{fraction, state}`
#[wasm_bindgen(js_name = gradeResponse)]
pub fn grade_response(
    config_js: JsValue,
    state_js: JsValue,
    response_js: JsValue,
) -> Result<JsValue, JsValue> {
    let question = load_question(config_js, state_js)?;
    let response: Response = deserialize(response_js, "Invalid response")?;

    let grade = question
        .grade_response(&response)
        .map_err(|e| to_js_error("Cannot grade response", e))?;
    wasm_info!("gradeResponse: fraction={}", grade.fraction);

    serialize(
        &GradeResult {
            fraction: grade.fraction,
            state: grade.state.as_str(),
        },
        "Failed to serialize grade",
    )
}

#[wasm_bindgen(js_name = getCorrectResponse)]
pub fn get_correct_response(config_js: JsValue, state_js: JsValue) -> Result<JsValue, JsValue> {
    let question = load_question(config_js, state_js)?;
    serialize(&question.correct_response(), "Failed to serialize correct response")
}

#[wasm_bindgen(js_name = summariseResponse)]
pub fn summarise_response(
    config_js: JsValue,
    state_js: JsValue,
    response_js: JsValue,
) -> Result<String, JsValue> {
    let question = load_question(config_js, state_js)?;
    let response: Response = deserialize(response_js, "Invalid response")?;
    Ok(question.summarise_response(&response))
}

#[wasm_bindgen(js_name = getValidationError)]
pub fn get_validation_error(
    config_js: JsValue,
    state_js: JsValue,
    response_js: JsValue,
) -> Result<String, JsValue> {
    let question = load_question(config_js, state_js)?;
    let response: Response = deserialize(response_js, "Invalid response")?;
    Ok(question.validation_error(&response))
}

/// Validate a note token outside of any attempt
///
/// Returns the string key of the problem (`validationerror_empty`, ...) or
/// `undefined` when the token is valid.
#[wasm_bindgen(js_name = validateNote)]
pub fn validate_note(text: &str, consider_register: bool) -> Option<String> {
    validate(Some(text), consider_register)
        .err()
        .map(|e| e.string_key().to_string())
}
