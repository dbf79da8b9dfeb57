//! Per-attempt key/value storage

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Variables the host persists for one question attempt
pub trait AttemptStateStore {
    fn set_var(&mut self, key: &str, value: &str);
    fn get_var(&self, key: &str) -> Option<String>;
}

/// Map-backed store; also the shape attempt state takes across the WASM boundary
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemoryAttemptStore {
    vars: BTreeMap<String, String>,
}

impl MemoryAttemptStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

impl AttemptStateStore for MemoryAttemptStore {
    fn set_var(&mut self, key: &str, value: &str) {
        self.vars.insert(key.to_string(), value.to_string());
    }

    fn get_var(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }
}
