//! Grading strategies
//!
//! A strategy compares a submitted response with the correct response and
//! returns a fraction with the matching graded state. Question kinds declare
//! which strategies they support by name.

pub mod all_or_nothing;

pub use all_or_nothing::NoteAllOrNothing;

use serde::{Deserialize, Serialize};

use crate::models::Response;

/// Outcome label the host shows next to a graded response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GradedState {
    #[serde(rename = "gradedright")]
    GradedRight,
    #[serde(rename = "gradedpartial")]
    GradedPartial,
    #[serde(rename = "gradedwrong")]
    GradedWrong,
}

impl GradedState {
    /// State for a fraction in [0, 1]
    pub fn for_fraction(fraction: f64) -> GradedState {
        if fraction >= 1.0 {
            GradedState::GradedRight
        } else if fraction > 0.0 {
            GradedState::GradedPartial
        } else {
            GradedState::GradedWrong
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GradedState::GradedRight => "gradedright",
            GradedState::GradedPartial => "gradedpartial",
            GradedState::GradedWrong => "gradedwrong",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Grade {
    pub fraction: f64,
    pub state: GradedState,
}

impl Grade {
    pub fn from_fraction(fraction: f64) -> Self {
        Self {
            fraction,
            state: GradedState::for_fraction(fraction),
        }
    }

    pub fn is_correct(&self) -> bool {
        self.state == GradedState::GradedRight
    }
}

/// Per-question options passed along to a strategy
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradeParams {
    pub consider_register: bool,
}

pub trait GradingStrategy {
    /// Name the question kinds refer to in their supported-strategy lists
    fn name(&self) -> &'static str;

    fn grade(&self, response: &Response, correct: &Response, params: GradeParams) -> Grade;
}

/// Look up a strategy by name
pub fn strategy_by_name(name: &str) -> Option<Box<dyn GradingStrategy>> {
    match name {
        all_or_nothing::NAME => Some(Box::new(NoteAllOrNothing)),
        _ => None,
    }
}
