//! WASM build test
//!
//! Exercises the exported API through JavaScript values.

#![cfg(target_arch = "wasm32")]

use musictheory_note::api::*;
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn config(json: &str) -> JsValue {
    let value: serde_json::Value = serde_json::from_str(json).unwrap();
    serde_wasm_bindgen::to_value(&value).unwrap()
}

#[wasm_bindgen_test]
fn test_validate_note() {
    assert_eq!(validate_note("C#4", true), None);
    assert_eq!(validate_note("", true).as_deref(), Some("validationerror_empty"));
    assert_eq!(validate_note("C #4", true).as_deref(), Some("validationerror_whitespace"));
    assert_eq!(validate_note("H#4", true).as_deref(), Some("validationerror_invalidsyntax"));
}

#[wasm_bindgen_test]
fn test_start_and_grade_correct_response() {
    let cfg = r#"{"kind":"note-write","considerRegister":true,"clefRandom":["treble","bass"]}"#;
    let state = start_attempt(config(cfg)).unwrap();

    let correct = get_correct_response(config(cfg), state.clone()).unwrap();
    assert!(is_complete_response(config(cfg), state.clone(), correct.clone()).unwrap());

    let grade = grade_response(config(cfg), state, correct).unwrap();
    let grade: serde_json::Value = serde_wasm_bindgen::from_value(grade).unwrap();
    assert_eq!(grade["fraction"], 1.0);
    assert_eq!(grade["state"], "gradedright");
}

#[wasm_bindgen_test]
fn test_invalid_config_is_rejected() {
    assert!(start_attempt(config(r#"{"kind":"chord-write"}"#)).is_err());
}
