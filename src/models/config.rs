//! Document configuration
//!
//! The counts and string names used to build first-run documents and to pad
//! sections and measures during resize.

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

/// Initial shape of a new tab
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    pub start_sections: usize,
    pub start_measures: usize,
    pub start_strings: usize,
    pub start_notes_per_measure: usize,
    pub string_names: Vec<String>,
}

impl Default for Config {
    /// Standard-tuned six string guitar, one section of four 4-beat measures
    fn default() -> Self {
        Self {
            start_sections: 1,
            start_measures: 4,
            start_strings: 6,
            start_notes_per_measure: 4,
            string_names: ["e", "B", "G", "D", "A", "E"]
                .iter()
                .map(|name| name.to_string())
                .collect(),
        }
    }
}

impl Config {
    pub fn new(
        start_sections: usize,
        start_measures: usize,
        start_strings: usize,
        start_notes_per_measure: usize,
        string_names: Vec<String>,
    ) -> Self {
        Self {
            start_sections,
            start_measures,
            start_strings,
            start_notes_per_measure,
            string_names,
        }
    }

    /// Parse a (possibly partial) JSON config; missing fields take defaults
    pub fn from_json(json: &str) -> Result<Self, crate::errors::TabError> {
        let config: Config = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that this config builds documents satisfying the shape invariants
    pub fn validate(&self) -> Result<(), ConfigError> {
        let counts = [
            ("startSections", self.start_sections),
            ("startMeasures", self.start_measures),
            ("startStrings", self.start_strings),
            ("startNotesPerMeasure", self.start_notes_per_measure),
        ];
        if let Some(&(field, _)) = counts.iter().find(|(_, count)| *count == 0) {
            return Err(ConfigError::ZeroCount(field));
        }

        if self.start_strings != self.string_names.len() {
            return Err(ConfigError::StringCountMismatch {
                start_strings: self.start_strings,
                names: self.string_names.len(),
            });
        }

        Ok(())
    }
}
