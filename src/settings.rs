//! Translation policy: display names and which types stay opaque.
use std::collections::HashMap;

use regex::Regex;
use serde::Deserialize;

use crate::source::simple_name;

// ------------------------------- Names ----------------------------------- //

/// Maps qualified source names to display names.
#[derive(Clone, Debug, Default)]
pub struct NameTranslator {
    overrides: HashMap<String, String>,
}

impl NameTranslator {
    pub fn register_class_name(&mut self, qualified: impl Into<String>, display: impl Into<String>) {
        self.overrides.insert(qualified.into(), display.into());
    }

    /// Explicit override, else the segment after the last `.` or `$`.
    pub fn translate_class_name(&self, qualified: &str) -> String {
        match self.overrides.get(qualified) {
            Some(name) => name.clone(),
            None => simple_name(qualified).to_owned(),
        }
    }
}

// ------------------------------ Patterns --------------------------------- //

/// Set of regexes, each matching a whole name.
#[derive(Clone, Debug, Default)]
pub struct PatternSet {
    patterns: Vec<Regex>,
}

impl PatternSet {
    pub fn add_pattern(&mut self, pattern: &str) -> Result<(), regex::Error> {
        self.patterns.push(Regex::new(&format!("^(?:{pattern})$"))?);
        Ok(())
    }

    pub fn matches(&self, name: &str) -> bool {
        self.patterns.iter().any(|rx| rx.is_match(name))
    }

    pub fn is_empty(&self) -> bool { self.patterns.is_empty() }
}

// ------------------------------ Settings --------------------------------- //

#[derive(Clone, Debug, Default)]
pub struct TranslationSettings {
    pub name_translator: NameTranslator,
    /// Matched against qualified source names.
    pub black_box_classes: PatternSet,
    /// Matched against translated display names.
    pub imported_classes: PatternSet,
}

impl TranslationSettings {
    pub fn new() -> Self { Self::default() }

    pub fn is_black_box_class(&self, qualified: &str) -> bool {
        self.black_box_classes.matches(qualified)
    }

    pub fn is_imported(&self, display_name: &str) -> bool {
        self.imported_classes.matches(display_name)
    }

    /// Layer a settings file on top of what is already configured.
    pub fn apply_file(&mut self, file: &SettingsFile) -> Result<(), regex::Error> {
        for pattern in &file.black_box {
            self.black_box_classes.add_pattern(pattern)?;
        }
        for pattern in &file.imported {
            self.imported_classes.add_pattern(pattern)?;
        }
        for (qualified, display) in &file.names {
            self.name_translator.register_class_name(qualified.clone(), display.clone());
        }
        Ok(())
    }
}

/// On-disk form of [`TranslationSettings`].
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SettingsFile {
    pub black_box: Vec<String>,
    pub imported: Vec<String>,
    /// qualified name → display name
    pub names: HashMap<String, String>,
}
