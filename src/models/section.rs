//! Sections: named runs of measures sharing one set of string names

use serde::{Deserialize, Serialize};

use super::{clamp_count, resize_level, Config, Measure};
use crate::cursor::Selection;
use crate::errors::TabError;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    pub measures: Vec<Measure>,
    pub string_names: Vec<String>,
    pub name: String,
}

impl Section {
    pub fn new(measures: Vec<Measure>, string_names: Vec<String>, name: String) -> Self {
        Self {
            measures,
            string_names,
            name,
        }
    }

    /// Default section: the config's string names and `start_measures` default measures
    pub fn from_config(config: &Config) -> Result<Self, TabError> {
        config.validate()?;
        let mut section = Self::new(Vec::new(), config.string_names.clone(), String::new());
        for _ in 0..config.start_measures {
            section.add_default_measure(config)?;
        }
        Ok(section)
    }

    pub fn string_count(&self) -> usize {
        self.string_names.len()
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Append a measure; its string count must match the section's string names
    pub fn add_measure(&mut self, measure: Measure) -> Result<(), TabError> {
        self.check_shape(&measure)?;
        self.measures.push(measure);
        Ok(())
    }

    pub fn add_default_measure(&mut self, config: &Config) -> Result<(), TabError> {
        self.add_measure(Measure::from_config(config))
    }

    /// Truncate or pad with default measures to `count` (at least 1)
    ///
    /// The padding measure is shape-checked before anything is removed, so a
    /// config that doesn't fit this section leaves it untouched.
    pub fn set_measures(&mut self, count: usize, config: &Config) -> Result<(), TabError> {
        config.validate()?;
        let template = Measure::from_config(config);
        let count = clamp_count(count);
        if count > self.measures.len() {
            self.check_shape(&template)?;
        }
        resize_level(&mut self.measures, count, &template);
        Ok(())
    }

    /// Remove the measure at `index`
    ///
    /// Any `Selection` pointing at or past `index` is not adjusted; callers
    /// re-clamp with `Selection::clamp_to` afterwards.
    pub fn delete_measure(&mut self, index: usize) -> Option<Measure> {
        if index < self.measures.len() {
            Some(self.measures.remove(index))
        } else {
            None
        }
    }

    /// Point `selection` at the string named `letter`
    ///
    /// Tries an exact match, then a case-insensitive match, then a prefix
    /// match, taking the lowest index within each tier. Returns false and
    /// leaves the selection alone when nothing matches.
    pub fn select_string_with_name(&self, selection: &mut Selection, letter: &str) -> bool {
        let wanted = letter.to_lowercase();
        let mut case_match = None;
        let mut prefix_match = None;

        for (i, name) in self.string_names.iter().enumerate() {
            if name == letter {
                selection.selected_string = i;
                return true;
            } else if name.to_lowercase() == wanted {
                case_match.get_or_insert(i);
            } else if name.starts_with(letter) {
                prefix_match.get_or_insert(i);
            }
        }

        match case_match.or(prefix_match) {
            Some(i) => {
                selection.selected_string = i;
                true
            }
            None => false,
        }
    }

    fn check_shape(&self, measure: &Measure) -> Result<(), TabError> {
        if measure.string_count() != self.string_count() {
            return Err(TabError::ShapeMismatch {
                expected: self.string_count(),
                found: measure.string_count(),
            });
        }
        Ok(())
    }

    /// Check the shape invariants of every measure in this section
    pub(crate) fn validate(&self) -> Result<(), TabError> {
        if self.measures.is_empty() {
            return Err(TabError::EmptyLevel("section measures"));
        }
        for measure in &self.measures {
            self.check_shape(measure)?;
            if measure.beats == 0 {
                return Err(TabError::EmptyLevel("measure beats"));
            }
            if let Some(string) = measure.strings.iter().find(|s| s.notes.len() != measure.beats) {
                return Err(TabError::ShapeMismatch {
                    expected: measure.beats,
                    found: string.notes.len(),
                });
            }
        }
        Ok(())
    }
}
