//! Tab editor WASM API
//!
//! The JavaScript-facing surface of the editor.
//!
//! # Module Structure
//!
//! - `helpers`: console logging macros, JS conversions and the `window.confirm` gate
//! - `editor`: `TabEditor`, one tab with its cursor and localStorage history

pub mod helpers;
pub mod editor;

pub use editor::TabEditor;
