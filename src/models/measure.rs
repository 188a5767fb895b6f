//! Strings and measures
//!
//! A measure holds one `TabString` per instrument string. Every string in a
//! measure carries exactly `beats` notes; `set_beats` is the only way the
//! beat count changes and it resizes all strings together.

use serde::{Deserialize, Serialize};

use super::note::Note;
use super::{clamp_count, resize_level, Config};

/// The notes played on one instrument string within a measure
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct TabString {
    pub notes: Vec<Note>,
}

impl TabString {
    pub fn new(notes: Vec<Note>) -> Self {
        Self { notes }
    }

    /// A string of `notes_per_measure` empty notes
    pub fn empty(notes_per_measure: usize) -> Self {
        Self {
            notes: vec![Note::default(); notes_per_measure],
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Measure {
    pub strings: Vec<TabString>,
    pub beats: usize,
}

impl Measure {
    pub fn new(strings: Vec<TabString>, beats: usize) -> Self {
        Self { strings, beats }
    }

    /// Default measure: `start_strings` empty strings of `start_notes_per_measure` beats
    pub fn from_config(config: &Config) -> Self {
        let beats = config.start_notes_per_measure;
        Self {
            strings: vec![TabString::empty(beats); config.start_strings],
            beats,
        }
    }

    pub fn string_count(&self) -> usize {
        self.strings.len()
    }

    /// Resize every string to `beats` notes (at least 1), truncating or
    /// padding with empty notes
    pub fn set_beats(&mut self, beats: usize) {
        let beats = clamp_count(beats);
        let empty = Note::default();
        for string in &mut self.strings {
            resize_level(&mut string.notes, beats, &empty);
        }
        self.beats = beats;
    }

    pub fn note(&self, string: usize, beat: usize) -> Option<&Note> {
        self.strings.get(string)?.notes.get(beat)
    }

    pub fn note_mut(&mut self, string: usize, beat: usize) -> Option<&mut Note> {
        self.strings.get_mut(string)?.notes.get_mut(beat)
    }

    /// Whether every string holds exactly `beats` notes
    pub fn is_consistent(&self) -> bool {
        self.strings.iter().all(|s| s.notes.len() == self.beats)
    }
}
