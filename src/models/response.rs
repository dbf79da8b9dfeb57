//! Submitted responses and the field names questions expect
//!
//! A response is a flat map of field name to submitted text, the shape the
//! host hands over for every submission.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Single combined token field used by note writing (`C#4`)
pub const ANSWER_FIELD: &str = "answer";
/// Letter field used by note identification
pub const LETTER_FIELD: &str = "musictheory_answer_ltr";
/// Accidental field used by note identification
pub const ACCIDENTAL_FIELD: &str = "musictheory_answer_acc";
/// Register field used by note identification
pub const REGISTER_FIELD: &str = "musictheory_answer_reg";

/// Declared type of an expected field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    /// Free text that may carry markup and is cleaned by the host
    CleanHtml,
    /// Plain text
    Text,
}

/// An expected response field and its type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ExpectedField {
    pub name: &'static str,
    #[serde(rename = "type")]
    pub field_type: FieldType,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Response(BTreeMap<String, String>);

impl Response {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, key: &str, value: &str) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: &str, value: &str) {
        self.0.insert(key.to_string(), value.to_string());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Value of `key`, or the empty string when absent
    pub fn get_or_blank(&self, key: &str) -> &str {
        self.get(key).unwrap_or("")
    }

    /// True when the key is present with a non-empty value
    pub fn has_value(&self, key: &str) -> bool {
        !self.get_or_blank(key).is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Keep only the named fields
    pub fn restricted_to(&self, fields: &[ExpectedField]) -> Response {
        Response(
            self.0
                .iter()
                .filter(|(key, _)| fields.iter().any(|field| field.name == key.as_str()))
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        )
    }

    /// Compare one key of two responses, treating a missing key as blank
    pub fn same_at_key_missing_is_blank(&self, other: &Response, key: &str) -> bool {
        self.get_or_blank(key) == other.get_or_blank(key)
    }
}
