//! JavaScript-facing tab editor
//!
//! `TabEditor` owns one tab, its cursor and a history log in
//! `window.localStorage`. Key handlers call one method per intent; the editor
//! re-clamps the cursor after every structural change and after undo.

use wasm_bindgen::prelude::*;

use super::helpers::{count_from_js, js_error, parse_direction, serialize, window_confirm};
use crate::cursor::Selection;
use crate::errors::TabError;
use crate::models::{Config, Note, ResizeOutcome, Tab};
use crate::remote::{sync_to_remote, RemotePayload, RemoteSink};
use crate::storage::LocalStorageStore;
use crate::undo::{HistoryStore, SaveOutcome, UndoOutcome};
use crate::{wasm_info, wasm_log, wasm_warn};

#[wasm_bindgen]
pub struct TabEditor {
    tab: Tab,
    selection: Selection,
    history: HistoryStore<LocalStorageStore>,
}

#[wasm_bindgen]
impl TabEditor {
    /// Open the last saved version of `id`, or a new default tab
    #[wasm_bindgen(js_name = loadOrDefault)]
    pub fn load_or_default(id: &str) -> Result<TabEditor, JsValue> {
        Self::open(id, Config::default())
    }

    /// Like `loadOrDefault`, building new tabs from a JSON config
    #[wasm_bindgen(js_name = loadWithConfig)]
    pub fn load_with_config(id: &str, config_json: &str) -> Result<TabEditor, JsValue> {
        let config = Config::from_json(config_json).map_err(|e| js_error("loadWithConfig", e))?;
        Self::open(id, config)
    }

    pub fn id(&self) -> String {
        self.tab.id.clone()
    }

    #[wasm_bindgen(js_name = moveCursor)]
    pub fn move_cursor(&mut self, direction: &str) -> Result<(), JsValue> {
        let direction = parse_direction(direction)?;
        self.selection
            .move_cursor(direction, &self.tab)
            .map_err(|e| js_error("moveCursor", e))
    }

    #[wasm_bindgen(js_name = firstMeasure)]
    pub fn first_measure(&mut self) {
        self.selection.first_measure();
    }

    #[wasm_bindgen(js_name = lastMeasure)]
    pub fn last_measure(&mut self) -> Result<(), JsValue> {
        self.selection
            .last_measure(&self.tab)
            .map_err(|e| js_error("lastMeasure", e))
    }

    #[wasm_bindgen(js_name = nextMeasure)]
    pub fn next_measure(&mut self) -> Result<(), JsValue> {
        self.selection
            .next_measure(&self.tab)
            .map_err(|e| js_error("nextMeasure", e))
    }

    #[wasm_bindgen(js_name = prevMeasure)]
    pub fn prev_measure(&mut self) -> Result<(), JsValue> {
        self.selection
            .prev_measure(&self.tab)
            .map_err(|e| js_error("prevMeasure", e))
    }

    #[wasm_bindgen(js_name = nextSection)]
    pub fn next_section(&mut self) {
        self.selection.next_section(&self.tab);
    }

    #[wasm_bindgen(js_name = prevSection)]
    pub fn prev_section(&mut self) {
        self.selection.prev_section(&self.tab);
    }

    /// Enter a typed digit on the selected note
    #[wasm_bindgen(js_name = typeDigit)]
    pub fn type_digit(&mut self, digit: u32) -> Result<(), JsValue> {
        let capo = self.tab.capo;
        self.edit_note("typeDigit", |note| note.add_number(digit, capo))
    }

    #[wasm_bindgen(js_name = incrementNote)]
    pub fn increment_note(&mut self) -> Result<(), JsValue> {
        self.edit_note("incrementNote", |note| {
            note.increment();
            Ok(())
        })
    }

    #[wasm_bindgen(js_name = decrementNote)]
    pub fn decrement_note(&mut self) -> Result<(), JsValue> {
        self.edit_note("decrementNote", |note| {
            note.decrement();
            Ok(())
        })
    }

    #[wasm_bindgen(js_name = clearNote)]
    pub fn clear_note(&mut self) -> Result<(), JsValue> {
        self.edit_note("clearNote", |note| {
            note.set_null();
            Ok(())
        })
    }

    /// Resize the selected measure
    #[wasm_bindgen(js_name = setBeats)]
    pub fn set_beats(&mut self, beats: i32) -> Result<(), JsValue> {
        let sel = self.selection;
        let measure = self
            .tab
            .sections
            .get_mut(sel.selected_section)
            .and_then(|section| section.measures.get_mut(sel.selected_measure))
            .ok_or_else(|| js_error("setBeats", stale(&sel)))?;
        measure.set_beats(count_from_js(beats));
        self.selection.clamp_to(&self.tab);
        Ok(())
    }

    /// Resize the selected section
    #[wasm_bindgen(js_name = setMeasures)]
    pub fn set_measures(&mut self, measures: i32) -> Result<(), JsValue> {
        let sel = self.selection;
        let config = self.tab.config.clone();
        let section = self
            .tab
            .sections
            .get_mut(sel.selected_section)
            .ok_or_else(|| js_error("setMeasures", stale(&sel)))?;
        section
            .set_measures(count_from_js(measures), &config)
            .map_err(|e| js_error("setMeasures", e))?;
        self.selection.clamp_to(&self.tab);
        Ok(())
    }

    /// Resize the tab; removing sections asks `window.confirm` first
    ///
    /// Returns false when the user declined.
    #[wasm_bindgen(js_name = setSections)]
    pub fn set_sections(&mut self, sections: i32) -> Result<bool, JsValue> {
        let config = self.tab.config.clone();
        let mut gate = |message: &str| window_confirm(message);
        let outcome = self
            .tab
            .set_sections(count_from_js(sections), &config, &mut gate)
            .map_err(|e| js_error("setSections", e))?;
        self.selection.clamp_to(&self.tab);
        Ok(outcome == ResizeOutcome::Resized)
    }

    #[wasm_bindgen(js_name = setCapo)]
    pub fn set_capo(&mut self, capo: u32) {
        self.tab.set_capo(capo);
    }

    #[wasm_bindgen(js_name = setName)]
    pub fn set_name(&mut self, name: &str) {
        self.tab.set_name(name);
    }

    /// Jump to the string named `letter` in the selected section
    #[wasm_bindgen(js_name = selectStringWithName)]
    pub fn select_string_with_name(&mut self, letter: &str) -> bool {
        match self.tab.sections.get(self.selection.selected_section) {
            Some(section) => section.select_string_with_name(&mut self.selection, letter),
            None => false,
        }
    }

    /// Snapshot the tab; false when nothing changed since the last save
    pub fn save(&mut self) -> Result<bool, JsValue> {
        let outcome = self.history.save(&self.tab).map_err(|e| js_error("save", e))?;
        Ok(outcome == SaveOutcome::Saved)
    }

    /// Restore the previous snapshot; false when undo was refused
    pub fn undo(&mut self) -> Result<bool, JsValue> {
        match self.history.undo(&self.tab.id).map_err(|e| js_error("undo", e))? {
            UndoOutcome::Restored(tab) => {
                self.tab = tab;
                self.selection.clamp_to(&self.tab);
                Ok(true)
            }
            UndoOutcome::Refused(reason) => {
                wasm_log!("undo refused: {:?}", reason);
                Ok(false)
            }
        }
    }

    /// The cursor as `{selectedSection, selectedMeasure, selectedString, selectedBeat}`
    pub fn selection(&self) -> Result<JsValue, JsValue> {
        serialize(&self.selection, "selection")
    }

    #[wasm_bindgen(js_name = toJson)]
    pub fn to_json(&self) -> Result<String, JsValue> {
        self.tab.encode().map_err(|e| js_error("toJson", e))
    }

    /// Request body for a remote save, for hosts that do their own fetch
    #[wasm_bindgen(js_name = remotePayload)]
    pub fn remote_payload(&self, token: &str) -> Result<String, JsValue> {
        RemotePayload::for_tab(&self.tab, token)
            .and_then(|payload| payload.to_json())
            .map_err(|e| js_error("remotePayload", e))
    }

    /// Send the tab through `put(endpoint, bodyJson)`, which returns truthy on success
    #[wasm_bindgen(js_name = syncToRemote)]
    pub fn sync_to_remote(
        &self,
        server_url: &str,
        token: &str,
        put: &js_sys::Function,
    ) -> Result<(), JsValue> {
        let mut sink = JsRemoteSink { put };
        sync_to_remote(&self.tab, &mut sink, server_url, token).map_err(|e| {
            wasm_warn!("{}", e);
            JsValue::from_str(&e.to_string())
        })
    }
}

impl TabEditor {
    fn open(id: &str, config: Config) -> Result<TabEditor, JsValue> {
        let store = LocalStorageStore::open().map_err(|e| js_error("open", e))?;
        let history = HistoryStore::new(store);
        let tab = history
            .load_or_default(id, config)
            .map_err(|e| js_error("open", e))?;
        wasm_info!("opened tab {} ({} sections)", tab.id, tab.sections.len());

        Ok(TabEditor {
            tab,
            selection: Selection::default(),
            history,
        })
    }

    fn edit_note(
        &mut self,
        context: &str,
        edit: impl FnOnce(&mut Note) -> Result<(), TabError>,
    ) -> Result<(), JsValue> {
        let sel = self.selection;
        let note = self
            .tab
            .note_at_mut(&sel)
            .ok_or_else(|| js_error(context, stale(&sel)))?;
        edit(note).map_err(|e| js_error(context, e))
    }
}

fn stale(selection: &Selection) -> TabError {
    TabError::StaleSelection {
        section: selection.selected_section,
        measure: selection.selected_measure,
    }
}

/// Remote sink backed by a JavaScript callback
struct JsRemoteSink<'a> {
    put: &'a js_sys::Function,
}

impl RemoteSink for JsRemoteSink<'_> {
    fn put(&mut self, endpoint: &str, payload: &RemotePayload) -> Result<(), String> {
        let body = payload.to_json().map_err(|e| e.to_string())?;
        let result = self
            .put
            .call2(
                &JsValue::NULL,
                &JsValue::from_str(endpoint),
                &JsValue::from_str(&body),
            )
            .map_err(|e| format!("{:?}", e))?;

        if result.is_truthy() {
            Ok(())
        } else {
            Err(format!("{} rejected the upload", endpoint))
        }
    }
}
