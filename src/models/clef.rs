//! Clefs and the note range that is notatable on each of them
//!
//! The range of a clef runs from two ledger lines below the staff to two
//! ledger lines above it:
//!
//! | Clef   | Staff   | Range  |
//! |--------|---------|--------|
//! | treble | E4 - F5 | A3 - C6 |
//! | bass   | G2 - A3 | C2 - E4 |
//! | alto   | F3 - G4 | B2 - D5 |
//! | tenor  | D3 - E4 | G2 - B4 |

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::models::note::{Letter, Note, Register};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Clef {
    Treble,
    Bass,
    Alto,
    Tenor,
}

impl Clef {
    pub const ALL: [Clef; 4] = [Clef::Treble, Clef::Bass, Clef::Alto, Clef::Tenor];

    pub fn as_str(&self) -> &'static str {
        match self {
            Clef::Treble => "treble",
            Clef::Bass => "bass",
            Clef::Alto => "alto",
            Clef::Tenor => "tenor",
        }
    }

    /// Lowest and highest notatable (letter, register) on this clef
    fn bounds(&self) -> ((Letter, u8), (Letter, u8)) {
        match self {
            Clef::Treble => ((Letter::A, 3), (Letter::C, 6)),
            Clef::Bass => ((Letter::C, 2), (Letter::E, 4)),
            Clef::Alto => ((Letter::B, 2), (Letter::D, 5)),
            Clef::Tenor => ((Letter::G, 2), (Letter::B, 4)),
        }
    }

    /// Whether a letter in a given register can be written on this clef
    pub fn is_notatable(&self, letter: Letter, register: Register) -> bool {
        let ((low_letter, low_reg), (high_letter, high_reg)) = self.bounds();
        let position = Note::diatonic_position(letter, register);
        let low = low_reg as i32 * 7 + low_letter.step_from_c();
        let high = high_reg as i32 * 7 + high_letter.step_from_c();
        (low..=high).contains(&position)
    }

    /// Registers in which `letter` is notatable on this clef, ascending
    ///
    /// Never empty: every clef range spans more than an octave.
    pub fn valid_registers(&self, letter: Letter) -> Vec<Register> {
        Register::all()
            .filter(|register| self.is_notatable(letter, *register))
            .collect()
    }
}

impl fmt::Display for Clef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Clef {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "treble" => Ok(Clef::Treble),
            "bass" => Ok(Clef::Bass),
            "alto" => Ok(Clef::Alto),
            "tenor" => Ok(Clef::Tenor),
            _ => Err(format!("Invalid clef: '{}'. Expected one of: treble, bass, alto, tenor", s)),
        }
    }
}

/// Shorthand for `clef.valid_registers(letter)`
pub fn valid_registers(clef: Clef, letter: Letter) -> Vec<Register> {
    clef.valid_registers(letter)
}
