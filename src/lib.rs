//! Guitar Tablature Editor WASM Module
//!
//! A tab document (sections → measures → strings → notes), a wrapping
//! cursor over it, and a bounded snapshot history with deduplicated save
//! and linear undo.

pub mod api;
pub mod cursor;
pub mod errors;
pub mod models;
pub mod remote;
pub mod storage;
pub mod undo;

// Re-export commonly used types
pub use cursor::{Direction, Selection};
pub use errors::{ConfigError, HistoryError, StoreError, TabError};
pub use models::*;
pub use undo::{HistoryStore, SaveOutcome, UndoOutcome, UndoRefusal, MAX_SAVES};

use wasm_bindgen::prelude::*;

// This is like the `main` function, but for WASM modules.
#[wasm_bindgen(start)]
pub fn main() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    #[cfg(feature = "console_log")]
    if let Err(e) = console_log::init_with_level(log::Level::Debug) {
        web_sys::console::warn_1(&format!("logger already initialized: {}", e).into());
    }

    log::info!("Tab editor WASM module initialized");
}
