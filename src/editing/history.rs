//! Undo-scoped glyph edits
//!
//! Every mutation of a glyph happens between `begin` and `commit`. Beginning
//! an edit snapshots the glyph; committing records an undo entry holding the
//! snapshot and the edited state. Aborting hands the snapshot back so the
//! caller can restore it. Only one edit may be open at a time, which keeps
//! edits from leaking across glyphs.

use crate::core::errors::EditError;
use crate::font_source::GlyphData;

/// An edit that has been opened but not yet committed
#[derive(Clone, Debug)]
pub struct OpenEdit {
    pub title: String,
    pub glyph: String,
    pub before: GlyphData,
}

/// A committed, undoable change to one glyph
#[derive(Clone, Debug)]
pub struct UndoEntry {
    pub title: String,
    pub glyph: String,
    pub before: GlyphData,
    pub after: GlyphData,
}

#[derive(Clone, Debug, Default)]
pub struct EditHistory {
    open: Option<OpenEdit>,
    undo_stack: Vec<UndoEntry>,
    redo_stack: Vec<UndoEntry>,
}

impl EditHistory {
    pub fn begin(&mut self, title: &str, before: GlyphData) -> Result<(), EditError> {
        if let Some(open) = &self.open {
            return Err(EditError::AlreadyOpen(open.glyph.clone()));
        }
        self.open = Some(OpenEdit {
            title: title.to_string(),
            glyph: before.name.clone(),
            before,
        });
        Ok(())
    }

    /// Close the open edit, recording the glyph's new state
    pub fn commit(&mut self, after: GlyphData) -> Result<&UndoEntry, EditError> {
        let open = self.open.take().ok_or(EditError::NotOpen)?;
        self.redo_stack.clear();
        self.undo_stack.push(UndoEntry {
            title: open.title,
            glyph: open.glyph,
            before: open.before,
            after,
        });
        self.undo_stack.last().ok_or(EditError::NotOpen)
    }

    /// Drop the open edit and return its snapshot
    pub fn abort(&mut self) -> Result<OpenEdit, EditError> {
        self.open.take().ok_or(EditError::NotOpen)
    }

    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }

    /// Name of the glyph currently being edited
    pub fn open_glyph(&self) -> Option<&str> {
        self.open.as_ref().map(|edit| edit.glyph.as_str())
    }

    pub(crate) fn pop_undo(&mut self) -> Option<UndoEntry> {
        self.undo_stack.pop()
    }

    pub(crate) fn pop_redo(&mut self) -> Option<UndoEntry> {
        self.redo_stack.pop()
    }

    pub(crate) fn push_undo(&mut self, entry: UndoEntry) {
        self.undo_stack.push(entry);
    }

    pub(crate) fn push_redo(&mut self, entry: UndoEntry) {
        self.redo_stack.push(entry);
    }

    pub fn undo_len(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Titles of committed edits, oldest first
    pub fn undo_titles(&self) -> impl Iterator<Item = &str> {
        self.undo_stack.iter().map(|entry| entry.title.as_str())
    }

    /// Glyphs touched by committed edits, in commit order, without repeats
    pub fn edited_glyphs(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for entry in &self.undo_stack {
            if !names.contains(&entry.glyph.as_str()) {
                names.push(entry.glyph.as_str());
            }
        }
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_begin_twice_is_rejected() {
        let mut history = EditHistory::default();
        history.begin("first", GlyphData::new("a", 500.0)).unwrap();
        let err = history
            .begin("second", GlyphData::new("b", 500.0))
            .unwrap_err();
        assert_eq!(err, EditError::AlreadyOpen("a".to_string()));
        assert_eq!(history.open_glyph(), Some("a"));
    }

    #[test]
    fn test_commit_without_begin() {
        let mut history = EditHistory::default();
        assert_eq!(
            history.commit(GlyphData::new("a", 1.0)).unwrap_err(),
            EditError::NotOpen
        );
        assert!(history.abort().is_err());
    }

    #[test]
    fn test_commit_records_entry_and_clears_redo() {
        let mut history = EditHistory::default();
        history.push_redo(UndoEntry {
            title: "stale".into(),
            glyph: "x".into(),
            before: GlyphData::new("x", 0.0),
            after: GlyphData::new("x", 1.0),
        });
        history.begin("Widen /a", GlyphData::new("a", 500.0)).unwrap();
        let entry = history.commit(GlyphData::new("a", 600.0)).unwrap();
        assert_eq!(entry.before.width, 500.0);
        assert_eq!(entry.after.width, 600.0);
        assert!(!history.is_open());
        assert!(!history.can_redo());
        assert_eq!(history.undo_titles().collect::<Vec<_>>(), vec!["Widen /a"]);
    }

    #[test]
    fn test_edited_glyphs_are_unique() {
        let mut history = EditHistory::default();
        for name in ["a", "b", "a"] {
            history.begin("edit", GlyphData::new(name, 0.0)).unwrap();
            history.commit(GlyphData::new(name, 1.0)).unwrap();
        }
        assert_eq!(history.edited_glyphs(), vec!["a", "b"]);
        assert_eq!(history.undo_len(), 3);
    }
}
