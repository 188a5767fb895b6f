//! The tab document root
//!
//! A `Tab` owns its whole tree and is persisted as one unit. Its JSON form
//! (`encode`/`decode`) is the snapshot format used by the history log and the
//! payload sent to a remote sink.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{clamp_count, resize_level, Config, Note, Section};
use crate::cursor::Selection;
use crate::errors::TabError;

pub const DEFAULT_TAB_NAME: &str = "New Tab";

/// Asks the user before a destructive change
pub trait ConfirmGate {
    fn confirm(&mut self, message: &str) -> bool;
}

impl<F> ConfirmGate for F
where
    F: FnMut(&str) -> bool,
{
    fn confirm(&mut self, message: &str) -> bool {
        self(message)
    }
}

/// Result of a resize that may be declined at the confirmation gate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeOutcome {
    Resized,
    Declined,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Tab {
    pub id: String,
    pub config: Config,
    pub sections: Vec<Section>,
    pub name: String,
    pub capo: u32,
}

impl Tab {
    /// A default tab with a freshly minted identity
    pub fn new(config: Config) -> Result<Self, TabError> {
        Self::from_config(Uuid::new_v4().to_string(), config)
    }

    /// A default tab for `id`: `start_sections` default sections, no capo
    pub fn from_config(id: impl Into<String>, config: Config) -> Result<Self, TabError> {
        config.validate()?;
        let section = Section::from_config(&config)?;
        Ok(Self {
            id: id.into(),
            sections: vec![section; config.start_sections],
            config,
            name: DEFAULT_TAB_NAME.to_string(),
            capo: 0,
        })
    }

    pub fn set_capo(&mut self, capo: u32) {
        self.capo = capo;
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Truncate or pad with default sections to `count` (at least 1)
    ///
    /// Removing sections asks `gate` first; a declined confirmation leaves
    /// the tab untouched.
    pub fn set_sections(
        &mut self,
        count: usize,
        config: &Config,
        gate: &mut dyn ConfirmGate,
    ) -> Result<ResizeOutcome, TabError> {
        let count = clamp_count(count);

        if count < self.sections.len() {
            let message = format!(
                "are you sure you want to remove {} section(s)?",
                self.sections.len() - count
            );
            if !gate.confirm(&message) {
                log::debug!("section removal declined ({} -> {})", self.sections.len(), count);
                return Ok(ResizeOutcome::Declined);
            }
        }

        let template = Section::from_config(config)?;
        resize_level(&mut self.sections, count, &template);
        Ok(ResizeOutcome::Resized)
    }

    pub fn note_at(&self, selection: &Selection) -> Option<&Note> {
        self.sections
            .get(selection.selected_section)?
            .measures
            .get(selection.selected_measure)?
            .note(selection.selected_string, selection.selected_beat)
    }

    pub fn note_at_mut(&mut self, selection: &Selection) -> Option<&mut Note> {
        self.sections
            .get_mut(selection.selected_section)?
            .measures
            .get_mut(selection.selected_measure)?
            .note_mut(selection.selected_string, selection.selected_beat)
    }

    /// Canonical JSON encoding; identical trees encode to identical bytes
    pub fn encode(&self) -> Result<String, TabError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Decode a tab and check its shape invariants
    pub fn decode(encoded: &str) -> Result<Self, TabError> {
        let tab: Tab = serde_json::from_str(encoded)?;
        tab.config.validate()?;
        if tab.sections.is_empty() {
            return Err(TabError::EmptyLevel("tab sections"));
        }
        for section in &tab.sections {
            section.validate()?;
        }
        Ok(tab)
    }
}
