//! WASM API for note questions
//!
//! The host calls these functions from JavaScript. The API keeps no state of
//! its own: every call receives the question config and the attempt variables
//! returned by `startAttempt`, which the host persists between requests.
//!
//! - `helpers`: logging, serialization and error conversion
//! - `question`: the exported question hooks

pub mod helpers;
pub mod question;

pub use question::*;
