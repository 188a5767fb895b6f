//! Models module for the tablature editor
//!
//! The document tree: tab → sections → measures → strings → notes. Each
//! level owns its children exclusively.

pub mod config;
pub mod measure;
pub mod note;
pub mod section;
pub mod tab;

// Re-export commonly used types
pub use config::Config;
pub use measure::{Measure, TabString};
pub use note::Note;
pub use section::Section;
pub use tab::{ConfirmGate, ResizeOutcome, Tab};

/// Every level of the tree holds at least one child after a resize
pub(crate) fn clamp_count(count: usize) -> usize {
    count.max(1)
}

/// Truncate or pad `items` with clones of `template` to exactly `len` (at
/// least 1); returns the resulting length
pub(crate) fn resize_level<T: Clone>(items: &mut Vec<T>, len: usize, template: &T) -> usize {
    let len = clamp_count(len);
    items.resize(len, template.clone());
    len
}
