//! Services the host question engine provides
//!
//! The crate never reaches for globals: attempt storage, display strings and
//! randomness are passed in through these traits.

pub mod store;
pub mod strings;

pub use store::{AttemptStateStore, MemoryAttemptStore};
pub use strings::{EnglishStrings, StringLookup};
