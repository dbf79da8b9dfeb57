//! Note value types: letter, accidental, register
//!
//! A `Note` serializes to a compact token: letter + accidental token + register,
//! e.g. `C#4`, `Bn5`, `Ebb3`. The register is omitted when the owning question
//! does not consider it (`C#`).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::parse::note::{parse_note, NoteValidationError};

/// One of the seven note names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Letter {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
}

impl Letter {
    /// All letters in alphabetical order (the order used for random selection)
    pub const ALL: [Letter; 7] = [
        Letter::A,
        Letter::B,
        Letter::C,
        Letter::D,
        Letter::E,
        Letter::F,
        Letter::G,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Letter::A => "A",
            Letter::B => "B",
            Letter::C => "C",
            Letter::D => "D",
            Letter::E => "E",
            Letter::F => "F",
            Letter::G => "G",
        }
    }

    /// Diatonic step within an octave, counting from C (C=0 .. B=6)
    ///
    /// Registers change between B and C, so `C4` is one step above `B3`.
    pub fn step_from_c(&self) -> i32 {
        match self {
            Letter::C => 0,
            Letter::D => 1,
            Letter::E => 2,
            Letter::F => 3,
            Letter::G => 4,
            Letter::A => 5,
            Letter::B => 6,
        }
    }
}

impl fmt::Display for Letter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Letter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "A" => Ok(Letter::A),
            "B" => Ok(Letter::B),
            "C" => Ok(Letter::C),
            "D" => Ok(Letter::D),
            "E" => Ok(Letter::E),
            "F" => Ok(Letter::F),
            "G" => Ok(Letter::G),
            _ => Err(format!("Invalid letter: '{}'. Expected one of: A, B, C, D, E, F, G", s)),
        }
    }
}

/// Accidental attached to a note
///
/// Tokens: `n` (natural), `#` (sharp), `b` (flat), `x` (double sharp),
/// `bb` (double flat). The natural is always written explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Accidental {
    #[serde(rename = "n")]
    Natural,
    #[serde(rename = "#")]
    Sharp,
    #[serde(rename = "b")]
    Flat,
    #[serde(rename = "x")]
    DoubleSharp,
    #[serde(rename = "bb")]
    DoubleFlat,
}

impl Accidental {
    pub const ALL: [Accidental; 5] = [
        Accidental::Natural,
        Accidental::Sharp,
        Accidental::Flat,
        Accidental::DoubleSharp,
        Accidental::DoubleFlat,
    ];

    /// Compact token used in answers and attempt state
    pub fn token(&self) -> &'static str {
        match self {
            Accidental::Natural => "n",
            Accidental::Sharp => "#",
            Accidental::Flat => "b",
            Accidental::DoubleSharp => "x",
            Accidental::DoubleFlat => "bb",
        }
    }

    /// Key of the display name in the string catalogue (`acc_sharp`, `acc_bb`, ...)
    pub fn string_key(&self) -> &'static str {
        match self {
            Accidental::Natural => "acc_n",
            Accidental::Sharp => "acc_sharp",
            Accidental::Flat => "acc_b",
            Accidental::DoubleSharp => "acc_x",
            Accidental::DoubleFlat => "acc_bb",
        }
    }
}

impl fmt::Display for Accidental {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.token())
    }
}

impl FromStr for Accidental {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "n" => Ok(Accidental::Natural),
            "#" => Ok(Accidental::Sharp),
            "b" => Ok(Accidental::Flat),
            "x" => Ok(Accidental::DoubleSharp),
            "bb" => Ok(Accidental::DoubleFlat),
            _ => Err(format!("Invalid accidental: '{}'. Expected one of: n, #, b, x, bb", s)),
        }
    }
}

/// Octave number of a note (1-6)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Register(u8);

impl Register {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 6;

    pub fn new(value: u8) -> Option<Register> {
        (Self::MIN..=Self::MAX).contains(&value).then_some(Register(value))
    }

    pub fn value(&self) -> u8 {
        self.0
    }

    /// Every register in ascending order
    pub fn all() -> impl Iterator<Item = Register> {
        (Self::MIN..=Self::MAX).map(Register)
    }
}

impl TryFrom<u8> for Register {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Register::new(value).ok_or_else(|| {
            format!("Invalid register: {} (must be {}-{})", value, Self::MIN, Self::MAX)
        })
    }
}

impl From<Register> for u8 {
    fn from(register: Register) -> u8 {
        register.0
    }
}

impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Register {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: u8 = s
            .parse()
            .map_err(|_| format!("Invalid register: '{}'", s))?;
        Register::try_from(value)
    }
}

/// A written note
///
/// `register` is `Some` exactly when the owning question considers the register.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Note {
    pub letter: Letter,
    pub accidental: Accidental,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub register: Option<Register>,
}

impl Note {
    pub fn new(letter: Letter, accidental: Accidental, register: Option<Register>) -> Self {
        Self {
            letter,
            accidental,
            register,
        }
    }

    /// Parse an answer token such as `C#4`
    ///
    /// With `consider_register` off a trailing register digit is accepted and
    /// dropped, so the result never carries a register.
    pub fn parse(text: &str, consider_register: bool) -> Result<Note, NoteValidationError> {
        parse_note(text, consider_register)
    }

    /// Compact token: letter + accidental + register (when present)
    pub fn to_token(&self) -> String {
        self.to_string()
    }

    /// Same note with the register dropped
    pub fn without_register(&self) -> Note {
        Note {
            register: None,
            ..*self
        }
    }

    /// Diatonic position counting from C1 = 7, used for clef range checks
    pub fn diatonic_position(letter: Letter, register: Register) -> i32 {
        register.value() as i32 * 7 + letter.step_from_c()
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.letter, self.accidental)?;
        if let Some(register) = self.register {
            write!(f, "{}", register)?;
        }
        Ok(())
    }
}

impl FromStr for Note {
    type Err = NoteValidationError;

    /// Parses with the register considered
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Note::parse(s, true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reg(value: u8) -> Register {
        Register::new(value).unwrap()
    }

    #[test]
    fn test_to_token_with_register() {
        let note = Note::new(Letter::C, Accidental::Sharp, Some(reg(4)));
        assert_eq!(note.to_token(), "C#4");

        let note = Note::new(Letter::B, Accidental::Natural, Some(reg(5)));
        assert_eq!(note.to_token(), "Bn5");

        let note = Note::new(Letter::E, Accidental::DoubleFlat, Some(reg(3)));
        assert_eq!(note.to_token(), "Ebb3");
    }

    #[test]
    fn test_to_token_without_register() {
        let note = Note::new(Letter::F, Accidental::DoubleSharp, None);
        assert_eq!(note.to_token(), "Fx");
    }

    #[test]
    fn test_roundtrip_all_notes_with_register() {
        for letter in Letter::ALL {
            for accidental in Accidental::ALL {
                for register in Register::all() {
                    let note = Note::new(letter, accidental, Some(register));
                    let parsed = Note::parse(&note.to_token(), true).unwrap();
                    assert_eq!(parsed, note, "roundtrip failed for {}", note);
                }
            }
        }
    }

    #[test]
    fn test_roundtrip_without_register() {
        for letter in Letter::ALL {
            for accidental in Accidental::ALL {
                let note = Note::new(letter, accidental, None);
                assert_eq!(Note::parse(&note.to_token(), false).unwrap(), note);
            }
        }
    }

    #[test]
    fn test_parse_drops_register_when_not_considered() {
        let note = Note::parse("G#5", false).unwrap();
        assert_eq!(note, Note::new(Letter::G, Accidental::Sharp, None));
    }

    #[test]
    fn test_register_bounds() {
        assert!(Register::new(0).is_none());
        assert!(Register::new(1).is_some());
        assert!(Register::new(6).is_some());
        assert!(Register::new(7).is_none());
        assert!("9".parse::<Register>().is_err());
        assert!("x".parse::<Register>().is_err());
    }

    #[test]
    fn test_accidental_tokens() {
        for accidental in Accidental::ALL {
            assert_eq!(accidental.token().parse::<Accidental>().unwrap(), accidental);
        }
        assert!("##".parse::<Accidental>().is_err());
        assert!("".parse::<Accidental>().is_err());
    }

    #[test]
    fn test_letter_from_str_rejects_lowercase_and_h() {
        assert_eq!("C".parse::<Letter>().unwrap(), Letter::C);
        assert!("c".parse::<Letter>().is_err());
        assert!("H".parse::<Letter>().is_err());
    }

    #[test]
    fn test_diatonic_position_crosses_octave_at_c() {
        let b3 = Note::diatonic_position(Letter::B, reg(3));
        let c4 = Note::diatonic_position(Letter::C, reg(4));
        assert_eq!(c4 - b3, 1);
    }

    #[test]
    fn test_serde_tokens() {
        let note = Note::new(Letter::D, Accidental::DoubleFlat, Some(reg(2)));
        let json = serde_json::to_string(&note).unwrap();
        assert_eq!(json, r#"{"letter":"D","accidental":"bb","register":2}"#);

        let parsed: Note = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, note);

        assert!(serde_json::from_str::<Register>("7").is_err());
    }
}
