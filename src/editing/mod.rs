//! Editing infrastructure
//!
//! This module contains the edit transaction machinery the tools write
//! through:
//! - Undo-scoped edits, opened lazily and committed once per glyph
//! - Undo/redo of committed edits

pub mod history;

// Re-export commonly used items
pub use history::{EditHistory, OpenEdit, UndoEntry};
