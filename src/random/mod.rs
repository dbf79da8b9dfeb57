//! Random note generation
//!
//! The entropy source is injected through [`RandomChoice`]; this module only
//! supplies the candidate sets. The register is drawn from the registers in
//! which the chosen letter is notatable on the chosen clef.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64;

use crate::models::{Accidental, Clef, Letter, Note};

/// Uniform selection primitive
pub trait RandomChoice {
    /// Uniform index in `0..len`; `len` is never zero
    fn choose_index(&mut self, len: usize) -> usize;
}

/// Pick one element of a non-empty slice
pub fn pick<'a, T, R: RandomChoice + ?Sized>(rng: &mut R, items: &'a [T]) -> Option<&'a T> {
    if items.is_empty() {
        return None;
    }
    items.get(rng.choose_index(items.len()))
}

/// `RandomChoice` over any `rand` generator
#[derive(Debug, Clone)]
pub struct RngChoice<R> {
    rng: R,
}

impl<R: Rng> RngChoice<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RngChoice<Pcg64> {
    /// Deterministic generator, for reproducible variants and tests
    pub fn seeded(seed: u64) -> Self {
        Self::new(Pcg64::seed_from_u64(seed))
    }

    /// Generator seeded from the platform entropy source (`crypto.getRandomValues` in the browser)
    pub fn from_entropy() -> Result<Self, getrandom::Error> {
        let mut seed = [0u8; 32];
        getrandom::getrandom(&mut seed)?;
        Ok(Self::new(Pcg64::from_seed(seed)))
    }
}

impl<R: Rng> RandomChoice for RngChoice<R> {
    fn choose_index(&mut self, len: usize) -> usize {
        self.rng.gen_range(0..len)
    }
}

/// Draws reference notes for random question variants
pub struct RandomNoteGenerator<'r, R: RandomChoice + ?Sized> {
    rng: &'r mut R,
}

impl<'r, R: RandomChoice + ?Sized> RandomNoteGenerator<'r, R> {
    pub fn new(rng: &'r mut R) -> Self {
        Self { rng }
    }

    /// Choose a clef from the allowed set, then a note notatable on it
    ///
    /// Returns `None` when `clefs` is empty.
    pub fn generate(&mut self, clefs: &[Clef]) -> Option<(Clef, Note)> {
        let clef = *pick(&mut *self.rng, clefs)?;
        let note = self.generate_for_clef(clef);
        log::debug!("generated {} on {} clef", note, clef);
        Some((clef, note))
    }

    /// Note with letter, accidental and register drawn for one clef
    pub fn generate_for_clef(&mut self, clef: Clef) -> Note {
        let letter = self.pick_letter();
        let accidental = self.pick_accidental();
        let registers = clef.valid_registers(letter);
        // Every letter has at least one register on every clef.
        let register = pick(&mut *self.rng, &registers).copied();
        Note::new(letter, accidental, register)
    }

    fn pick_letter(&mut self) -> Letter {
        Letter::ALL[self.rng.choose_index(Letter::ALL.len())]
    }

    fn pick_accidental(&mut self) -> Accidental {
        Accidental::ALL[self.rng.choose_index(Accidental::ALL.len())]
    }
}
