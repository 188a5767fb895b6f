//! Cursor navigation over a tab
//!
//! A `Selection` is four free-floating coordinates (section, measure,
//! string, beat). It holds no reference to the tab: every transition reads
//! the tab's shape at call time. The tab behaves like a torus at each level.
//! Sections wrap within the tab, measures wrap within a section and cascade
//! into the neighbouring section, and beats wrap within a measure and
//! cascade into the neighbouring measure. Strings wrap without cascading.
//!
//! Moving between sections keeps the measure and beat indices as they were.
//! After a structural delete the caller must re-clamp with
//! [`Selection::clamp_to`]; transitions that hit stale coordinates return
//! [`TabError::StaleSelection`].

use serde::{Deserialize, Serialize};

use crate::errors::TabError;
use crate::models::{Measure, Section, Tab};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Wrap a one-step overflow back into `0..modulus`
///
/// Below zero lands on the last index, past the end lands on 0. Values
/// already in range are returned unchanged.
pub fn wrap(value: isize, modulus: usize) -> usize {
    if value < 0 {
        modulus.saturating_sub(1)
    } else if value as usize > modulus.saturating_sub(1) {
        0
    } else {
        value as usize
    }
}

/// Cursor position in a tab
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Selection {
    pub selected_section: usize,
    pub selected_measure: usize,
    pub selected_string: usize,
    pub selected_beat: usize,
}

impl Selection {
    pub fn new(section: usize, measure: usize, string: usize, beat: usize) -> Self {
        Self {
            selected_section: section,
            selected_measure: measure,
            selected_string: string,
            selected_beat: beat,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn first_measure(&mut self) {
        self.selected_measure = 0;
    }

    pub fn last_measure(&mut self, tab: &Tab) -> Result<(), TabError> {
        let measures = self.section(tab)?.measures.len();
        self.selected_measure = measures.saturating_sub(1);
        Ok(())
    }

    pub fn prev_section(&mut self, tab: &Tab) {
        self.selected_section = match self.selected_section {
            0 => tab.sections.len().saturating_sub(1),
            section => section - 1,
        };
    }

    pub fn next_section(&mut self, tab: &Tab) {
        self.selected_section += 1;
        if self.selected_section > tab.sections.len().saturating_sub(1) {
            self.selected_section = 0;
        }
    }

    /// Step back one measure, cascading to the previous section's last measure
    pub fn prev_measure(&mut self, tab: &Tab) -> Result<(), TabError> {
        if self.selected_measure == 0 {
            let before = *self;
            self.prev_section(tab);
            let result = self.last_measure(tab);
            if result.is_err() {
                *self = before;
            }
            result
        } else {
            self.selected_measure -= 1;
            Ok(())
        }
    }

    /// Step forward one measure, cascading to the next section's first measure
    pub fn next_measure(&mut self, tab: &Tab) -> Result<(), TabError> {
        let last = self.section(tab)?.measures.len().saturating_sub(1);
        self.selected_measure += 1;
        if self.selected_measure > last {
            self.next_section(tab);
            self.selected_measure = 0;
        }
        Ok(())
    }

    /// Move one step; on error the selection is left where it was
    pub fn move_cursor(&mut self, direction: Direction, tab: &Tab) -> Result<(), TabError> {
        let before = *self;
        let result = self.step(direction, tab);
        if result.is_err() {
            *self = before;
        }
        result
    }

    fn step(&mut self, direction: Direction, tab: &Tab) -> Result<(), TabError> {
        match direction {
            Direction::Up | Direction::Down => {
                let strings = self.measure(tab)?.string_count();
                let step = if direction == Direction::Up { -1 } else { 1 };
                self.selected_string = wrap(self.selected_string as isize + step, strings);
            }
            Direction::Left => {
                if self.selected_beat == 0 {
                    self.prev_measure(tab)?;
                    self.selected_beat = self.measure(tab)?.beats.saturating_sub(1);
                } else {
                    self.selected_beat -= 1;
                }
            }
            Direction::Right => {
                let last = self.measure(tab)?.beats.saturating_sub(1);
                self.selected_beat += 1;
                if self.selected_beat > last {
                    self.next_measure(tab)?;
                    self.selected_beat = 0;
                }
            }
        }
        Ok(())
    }

    /// Pull every coordinate back inside `tab`'s current shape
    pub fn clamp_to(&mut self, tab: &Tab) {
        self.selected_section = clamp_index(self.selected_section, tab.sections.len());
        let Some(section) = tab.sections.get(self.selected_section) else {
            self.reset();
            return;
        };

        self.selected_measure = clamp_index(self.selected_measure, section.measures.len());
        match section.measures.get(self.selected_measure) {
            Some(measure) => {
                self.selected_string = clamp_index(self.selected_string, measure.string_count());
                self.selected_beat = clamp_index(self.selected_beat, measure.beats);
            }
            None => {
                self.selected_string = 0;
                self.selected_beat = 0;
            }
        }
    }

    /// Whether these coordinates address a note in `tab`
    pub fn is_valid_for(&self, tab: &Tab) -> bool {
        tab.note_at(self).is_some()
    }

    fn section<'a>(&self, tab: &'a Tab) -> Result<&'a Section, TabError> {
        tab.sections.get(self.selected_section).ok_or_else(|| self.stale())
    }

    fn measure<'a>(&self, tab: &'a Tab) -> Result<&'a Measure, TabError> {
        self.section(tab)?
            .measures
            .get(self.selected_measure)
            .ok_or_else(|| self.stale())
    }

    fn stale(&self) -> TabError {
        TabError::StaleSelection {
            section: self.selected_section,
            measure: self.selected_measure,
        }
    }
}

fn clamp_index(index: usize, len: usize) -> usize {
    index.min(len.saturating_sub(1))
}
