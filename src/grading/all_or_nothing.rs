//! All-or-nothing grading for note questions
//!
//! Every submitted field must match its reference value. Without the register
//! only the letter and accidental take part: combined tokens are cut to their
//! first two characters and the discrete register field is skipped.
//!
//! The two-character cut means a double flat compares as a flat (`Cbb4` and
//! `Cb4` both become `Cb`). Tests pin this down.

use crate::grading::{Grade, GradeParams, GradingStrategy};
use crate::models::response::REGISTER_FIELD;
use crate::models::Response;

pub const NAME: &str = "note_allornothing";

/// Letter + accidental portion of a value
fn without_register(value: &str) -> &str {
    match value.char_indices().nth(2) {
        Some((idx, _)) => &value[..idx],
        None => value,
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoteAllOrNothing;

impl GradingStrategy for NoteAllOrNothing {
    fn name(&self) -> &'static str {
        NAME
    }

    fn grade(&self, response: &Response, correct: &Response, params: GradeParams) -> Grade {
        let mut fraction = 1.0;

        for (key, answer) in response.iter() {
            let expected = correct.get_or_blank(key);

            let matches = if params.consider_register {
                answer == expected
            } else if key == REGISTER_FIELD {
                continue;
            } else {
                without_register(answer) == without_register(expected)
            };

            if !matches {
                log::debug!("field '{}' mismatch: '{}' vs '{}'", key, answer, expected);
                fraction = 0.0;
            }
        }

        Grade::from_fraction(fraction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grading::GradedState;
    use crate::models::response::{ACCIDENTAL_FIELD, ANSWER_FIELD, LETTER_FIELD};

    fn fields(ltr: &str, acc: &str, reg: &str) -> Response {
        Response::new()
            .with(LETTER_FIELD, ltr)
            .with(ACCIDENTAL_FIELD, acc)
            .with(REGISTER_FIELD, reg)
    }

    fn with_register() -> GradeParams {
        GradeParams {
            consider_register: true,
        }
    }

    fn without() -> GradeParams {
        GradeParams {
            consider_register: false,
        }
    }

    #[test]
    fn test_identical_fields_are_right() {
        let grade = NoteAllOrNothing.grade(&fields("C", "#", "4"), &fields("C", "#", "4"), with_register());
        assert_eq!(grade.fraction, 1.0);
        assert_eq!(grade.state, GradedState::GradedRight);
    }

    #[test]
    fn test_register_mismatch_zeroes_everything() {
        let grade = NoteAllOrNothing.grade(&fields("C", "#", "5"), &fields("C", "#", "4"), with_register());
        assert_eq!(grade.fraction, 0.0);
        assert_eq!(grade.state, GradedState::GradedWrong);
    }

    #[test]
    fn test_accidental_mismatch_zeroes_everything() {
        let grade = NoteAllOrNothing.grade(&fields("C", "n", "4"), &fields("C", "#", "4"), with_register());
        assert_eq!(grade.fraction, 0.0);
    }

    #[test]
    fn test_register_ignored_when_not_considered() {
        let grade = NoteAllOrNothing.grade(&fields("C", "#", "9"), &fields("C", "#", "4"), without());
        assert_eq!(grade.fraction, 1.0);
    }

    #[test]
    fn test_letter_mismatch_without_register() {
        let grade = NoteAllOrNothing.grade(&fields("D", "#", "4"), &fields("C", "#", "4"), without());
        assert_eq!(grade.fraction, 0.0);
    }

    #[test]
    fn test_token_truncated_without_register() {
        let response = Response::new().with(ANSWER_FIELD, "C#5");
        let correct = Response::new().with(ANSWER_FIELD, "C#4");
        assert_eq!(NoteAllOrNothing.grade(&response, &correct, without()).fraction, 1.0);
        assert_eq!(NoteAllOrNothing.grade(&response, &correct, with_register()).fraction, 0.0);
    }

    #[test]
    fn test_token_without_register_digit() {
        let response = Response::new().with(ANSWER_FIELD, "Bb");
        let correct = Response::new().with(ANSWER_FIELD, "Bb4");
        assert_eq!(NoteAllOrNothing.grade(&response, &correct, without()).fraction, 1.0);
    }

    #[test]
    fn test_double_flat_truncates_to_flat() {
        // Known quirk of the two-character cut: the double flat collapses
        let response = Response::new().with(ANSWER_FIELD, "Cb4");
        let correct = Response::new().with(ANSWER_FIELD, "Cbb4");
        assert_eq!(NoteAllOrNothing.grade(&response, &correct, without()).fraction, 1.0);
        assert_eq!(NoteAllOrNothing.grade(&response, &correct, with_register()).fraction, 0.0);
    }

    #[test]
    fn test_missing_reference_value_compares_as_blank() {
        let response = Response::new().with("unexpected", "C");
        assert_eq!(NoteAllOrNothing.grade(&response, &Response::new(), with_register()).fraction, 0.0);

        let blank = Response::new().with("unexpected", "");
        assert_eq!(NoteAllOrNothing.grade(&blank, &Response::new(), with_register()).fraction, 1.0);
    }

    #[test]
    fn test_without_register_helper() {
        assert_eq!(without_register("C#4"), "C#");
        assert_eq!(without_register("C"), "C");
        assert_eq!(without_register(""), "");
    }
}
