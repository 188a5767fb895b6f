//! A single fret assignment on one string at one beat

use serde::{Deserialize, Serialize};

use crate::errors::TabError;

/// Number of distinct fret values reachable by increment/decrement (0-19)
pub const FRET_RANGE: u32 = 20;

/// One note: a fret number, or nothing played on this beat
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    /// Absent encodes as `null`, never as a missing field
    #[serde(default)]
    pub fret_number: Option<u32>,
}

impl Note {
    pub fn new(fret_number: Option<u32>) -> Self {
        Self { fret_number }
    }

    /// Step the fret up by one, wrapping 19 -> 0
    ///
    /// An empty note counts as fret 0, so it becomes 1.
    pub fn increment(&mut self) {
        let next = self.fret_number.unwrap_or(0) + 1;
        self.fret_number = Some(if next >= FRET_RANGE { 0 } else { next });
    }

    /// Step the fret down by one, wrapping 0 -> 19
    ///
    /// An empty note counts as fret 0, so it becomes 19.
    pub fn decrement(&mut self) {
        self.fret_number = Some(match self.fret_number.unwrap_or(0) {
            0 => FRET_RANGE - 1,
            fret => fret - 1,
        });
    }

    /// Enter a typed digit as the new fret, relative to the capo
    ///
    /// Frets are typed one digit at a time. When the note already holds
    /// `capo + 1` (a typed "1"), the new digit completes a two-digit fret:
    /// `10 + n + capo`. Otherwise the fret is simply `n + capo`. An empty
    /// note never matches, so it always takes the simple branch. A fret that
    /// would not fit in a `u32` is rejected and the note is left alone.
    pub fn add_number(&mut self, n: u32, capo: u32) -> Result<(), TabError> {
        if n > 9 {
            return Err(TabError::InvalidDigit(n));
        }

        let fret = match capo.checked_add(1) {
            Some(one) if self.fret_number == Some(one) => (10 + n).checked_add(capo),
            _ => n.checked_add(capo),
        };
        self.fret_number = Some(fret.ok_or(TabError::FretOverflow { digit: n, capo })?);
        Ok(())
    }

    pub fn set_null(&mut self) {
        self.fret_number = None;
    }

    pub fn is_null(&self) -> bool {
        self.fret_number.is_none()
    }
}
