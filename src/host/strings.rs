//! Display string lookup
//!
//! Strings may carry a single `{{a}}` placeholder, rendered with mustache so
//! that user-supplied parameters are HTML-escaped.

use std::collections::HashMap;

/// Resolves a string key to display text
pub trait StringLookup {
    fn lookup(&self, key: &str, a: Option<&str>) -> String;
}

const ENGLISH: &[(&str, &str)] = &[
    ("questiontext_note_write", "Write the following note"),
    ("questiontext_note_identify", "Identify the following note"),
    ("noteA", "A"),
    ("noteB", "B"),
    ("noteC", "C"),
    ("noteD", "D"),
    ("noteE", "E"),
    ("noteF", "F"),
    ("noteG", "G"),
    ("acc_n", "♮"),
    ("acc_sharp", "♯"),
    ("acc_b", "♭"),
    ("acc_x", "𝄪"),
    ("acc_bb", "𝄫"),
    ("validationerror_empty", "Please enter an answer."),
    ("validationerror_whitespace", "Your answer must not contain any spaces."),
    (
        "validationerror_invalidsyntax",
        "The answer \"{{a}}\" is not a valid note. Enter a letter, an accidental (n, #, b, x or bb) and a register, for example C#4.",
    ),
    (
        "validationerror_note_identify",
        "Please select a letter name, an accidental and a register.",
    ),
    (
        "validationerror_note_identify_no_reg",
        "Please select a letter name and an accidental.",
    ),
];

/// Built-in English catalogue
#[derive(Debug, Clone)]
pub struct EnglishStrings {
    strings: HashMap<&'static str, &'static str>,
}

impl Default for EnglishStrings {
    fn default() -> Self {
        Self {
            strings: ENGLISH.iter().copied().collect(),
        }
    }
}

impl EnglishStrings {
    pub fn new() -> Self {
        Self::default()
    }

    fn render(template: &str, a: &str) -> Result<String, mustache::Error> {
        let mut context = HashMap::new();
        context.insert("a", a);
        mustache::compile_str(template)?.render_to_string(&context)
    }
}

impl StringLookup for EnglishStrings {
    fn lookup(&self, key: &str, a: Option<&str>) -> String {
        let Some(template) = self.strings.get(key) else {
            log::warn!("missing string '{}'", key);
            return format!("[[{}]]", key);
        };

        if !template.contains("{{") {
            return template.to_string();
        }

        match Self::render(template, a.unwrap_or("")) {
            Ok(text) => text,
            Err(e) => {
                log::warn!("failed to render string '{}': {}", key, e);
                template.to_string()
            }
        }
    }
}
