//! Bounded snapshot history with deduplicated save and linear undo
//!
//! Each document identity gets `MAX_SAVES` rotating snapshot slots plus one
//! `SaveInfo` record. `num_saves` counts snapshots ever written since the
//! last truncation; `current_save` is the 1-based save the document is at.
//! Snapshot `k` (0-based) lives in slot `k % MAX_SAVES`, so anything older
//! than `num_saves - MAX_SAVES` has been overwritten and can't be undone to.
//!
//! Each call reads, updates and writes back the record under `&mut self`.
//! Two processes sharing one backing store can still race on the record.

use serde::{Deserialize, Serialize};

use crate::errors::HistoryError;
use crate::models::{Config, Tab};
use crate::storage::KeyValueStore;

/// Snapshot slots retained per document
pub const MAX_SAVES: usize = 20;

/// Per-document history counters
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SaveInfo {
    pub num_saves: usize,
    pub current_save: usize,
}

impl SaveInfo {
    /// Check that the state before `current_save` is still retained
    pub fn check_undo(&self) -> Result<(), UndoRefusal> {
        let target = self.current_save as i64 - 2;
        if target < self.num_saves as i64 - MAX_SAVES as i64 {
            return Err(UndoRefusal::RetentionExceeded);
        }
        if target < 0 {
            return Err(UndoRefusal::NoEarlierState);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved,
    /// The encoding matched the last snapshot; nothing was written
    Unchanged,
}

/// Why an undo left the document as it was
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UndoRefusal {
    /// The document has never been saved
    NoHistory,
    /// The target snapshot was overwritten by rotation
    RetentionExceeded,
    NoEarlierState,
    /// The target slot was missing or failed to decode
    SnapshotUnavailable,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UndoOutcome {
    Restored(Tab),
    Refused(UndoRefusal),
}

impl UndoOutcome {
    /// The restored tab, or `current` when the undo was refused
    pub fn restored_or(self, current: Tab) -> Tab {
        match self {
            UndoOutcome::Restored(tab) => tab,
            UndoOutcome::Refused(_) => current,
        }
    }

    pub fn is_restored(&self) -> bool {
        matches!(self, UndoOutcome::Restored(_))
    }
}

/// Snapshot slot for a 0-based save number
pub fn slot(save_number: usize) -> usize {
    save_number % MAX_SAVES
}

fn info_key(id: &str) -> String {
    format!("tab_history_{}", id)
}

fn snapshot_key(id: &str, slot: usize) -> String {
    format!("save_{}_{}", id, slot)
}

/// Rotating snapshot log over an injected key-value store
#[derive(Debug, Clone, Default)]
pub struct HistoryStore<S> {
    store: S,
}

impl<S: KeyValueStore> HistoryStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    pub fn save_info(&self, id: &str) -> Result<Option<SaveInfo>, HistoryError> {
        match self.store.get(&info_key(id))? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    fn write_info(&mut self, id: &str, info: &SaveInfo) -> Result<(), HistoryError> {
        let bytes = serde_json::to_vec(info)?;
        self.store.set(&info_key(id), &bytes)?;
        Ok(())
    }

    /// Snapshot `tab` unless it is identical to the last snapshot
    ///
    /// Saving after an undo discards the undone snapshots.
    pub fn save(&mut self, tab: &Tab) -> Result<SaveOutcome, HistoryError> {
        let encoded = tab.encode()?;
        let mut info = self.save_info(&tab.id)?.unwrap_or_default();

        let previous = match info.current_save.checked_sub(1) {
            Some(last) => self.store.get(&snapshot_key(&tab.id, slot(last)))?,
            None => None,
        };
        match previous {
            None => info = SaveInfo::default(),
            Some(bytes) if bytes == encoded.as_bytes() => {
                log::debug!("tab {} unchanged since save {}", tab.id, info.current_save);
                return Ok(SaveOutcome::Unchanged);
            }
            Some(_) => {}
        }

        self.store
            .set(&snapshot_key(&tab.id, slot(info.current_save)), encoded.as_bytes())?;
        if info.current_save < info.num_saves {
            info.num_saves = info.current_save;
        }
        info.num_saves += 1;
        info.current_save = info.num_saves;
        self.write_info(&tab.id, &info)?;

        log::info!(
            "saved tab {} (save {}, slot {})",
            tab.id,
            info.current_save,
            slot(info.current_save - 1)
        );
        Ok(SaveOutcome::Saved)
    }

    /// Step back one snapshot
    ///
    /// Refusals are normal outcomes, not errors. A snapshot that is missing
    /// or unreadable after the step also comes back as a refusal, with the
    /// record already moved back.
    pub fn undo(&mut self, id: &str) -> Result<UndoOutcome, HistoryError> {
        let Some(mut info) = self.save_info(id)? else {
            return Ok(UndoOutcome::Refused(UndoRefusal::NoHistory));
        };

        if let Err(refusal) = info.check_undo() {
            log::debug!(
                "undo refused for tab {}: {:?} (current {}, saves {})",
                id,
                refusal,
                info.current_save,
                info.num_saves
            );
            return Ok(UndoOutcome::Refused(refusal));
        }

        info.current_save -= 1;
        self.write_info(id, &info)?;

        match self.load(Some(info.current_save - 1), id) {
            Ok(Some(tab)) => Ok(UndoOutcome::Restored(tab)),
            Ok(None) => {
                log::warn!("undo target for tab {} is missing", id);
                Ok(UndoOutcome::Refused(UndoRefusal::SnapshotUnavailable))
            }
            Err(HistoryError::Document(err)) => {
                log::warn!("undo target for tab {} is unreadable: {}", id, err);
                Ok(UndoOutcome::Refused(UndoRefusal::SnapshotUnavailable))
            }
            Err(err) => Err(err),
        }
    }

    /// Load the snapshot for a 0-based save number, or the current one
    pub fn load(&self, index: Option<usize>, id: &str) -> Result<Option<Tab>, HistoryError> {
        let save_number = match index {
            Some(index) => index,
            None => match self.save_info(id)? {
                Some(info) if info.current_save > 0 => info.current_save - 1,
                _ => return Ok(None),
            },
        };

        match self.store.get(&snapshot_key(id, slot(save_number)))? {
            Some(bytes) => {
                let encoded = String::from_utf8_lossy(&bytes);
                Ok(Some(Tab::decode(&encoded)?))
            }
            None => Ok(None),
        }
    }

    /// The current snapshot for `id`, or a fresh tab built from `config`
    pub fn load_or_default(&self, id: &str, config: Config) -> Result<Tab, HistoryError> {
        match self.load(None, id)? {
            Some(tab) => {
                log::info!("loaded saved tab {}", id);
                Ok(tab)
            }
            None => {
                log::info!("no saved tab {}, creating a new one", id);
                Ok(Tab::from_config(id, config)?)
            }
        }
    }

    pub fn can_undo(&self, id: &str) -> Result<bool, HistoryError> {
        Ok(self
            .save_info(id)?
            .map_or(false, |info| info.check_undo().is_ok()))
    }
}
