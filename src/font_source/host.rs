//! The host-facing font interface
//!
//! The tools never touch a font document directly. They go through
//! `FontHost`, which exposes glyph lookup and the undo scope the host editor
//! provides. `FontData` is the in-memory implementation used by the command
//! line front end and by tests.

use crate::core::errors::EditError;
use crate::font_source::{FontData, FontInfo, GlyphData};

pub trait FontHost {
    fn glyph(&self, name: &str) -> Option<&GlyphData>;

    fn glyph_mut(&mut self, name: &str) -> Option<&mut GlyphData>;

    /// All glyph names in font order
    fn glyph_names(&self) -> Vec<String>;

    fn info(&self) -> &FontInfo;

    /// Open an undo-recordable edit of one glyph
    fn begin_edit(&mut self, glyph: &str, title: &str) -> Result<(), EditError>;

    /// Close the open edit and store an undo checkpoint
    fn commit_edit(&mut self) -> Result<(), EditError>;

    /// Close the open edit and restore the glyph as it was when it opened
    fn abort_edit(&mut self) -> Result<(), EditError>;
}

impl FontHost for FontData {
    fn glyph(&self, name: &str) -> Option<&GlyphData> {
        self.get(name)
    }

    fn glyph_mut(&mut self, name: &str) -> Option<&mut GlyphData> {
        self.get_mut(name)
    }

    fn glyph_names(&self) -> Vec<String> {
        self.iter().map(|g| g.name.clone()).collect()
    }

    fn info(&self) -> &FontInfo {
        &self.info
    }

    fn begin_edit(&mut self, glyph: &str, title: &str) -> Result<(), EditError> {
        let snapshot = self
            .get(glyph)
            .cloned()
            .ok_or_else(|| EditError::UnknownGlyph(glyph.to_string()))?;
        self.history.begin(title, snapshot)?;
        tracing::debug!("Opened edit '{}'", title);
        Ok(())
    }

    fn commit_edit(&mut self) -> Result<(), EditError> {
        let name = self
            .history
            .open_glyph()
            .ok_or(EditError::NotOpen)?
            .to_string();
        let after = self
            .get(&name)
            .cloned()
            .ok_or_else(|| EditError::UnknownGlyph(name.clone()))?;
        let entry = self.history.commit(after)?;
        tracing::debug!("Committed edit '{}'", entry.title);
        Ok(())
    }

    fn abort_edit(&mut self) -> Result<(), EditError> {
        let open = self.history.abort()?;
        tracing::debug!("Aborted edit '{}', restoring /{}", open.title, open.glyph);
        self.insert_glyph(open.before);
        Ok(())
    }
}

impl FontData {
    /// Revert the most recent committed edit
    pub fn undo(&mut self) -> Result<String, EditError> {
        if self.history.is_open() {
            return Err(EditError::AlreadyOpen(
                self.history.open_glyph().unwrap_or_default().to_string(),
            ));
        }
        let entry = self.history.pop_undo().ok_or(EditError::NothingToUndo)?;
        self.insert_glyph(entry.before.clone());
        let title = entry.title.clone();
        self.history.push_redo(entry);
        Ok(title)
    }

    /// Reapply the most recently undone edit
    pub fn redo(&mut self) -> Result<String, EditError> {
        if self.history.is_open() {
            return Err(EditError::AlreadyOpen(
                self.history.open_glyph().unwrap_or_default().to_string(),
            ));
        }
        let entry = self.history.pop_redo().ok_or(EditError::NothingToUndo)?;
        self.insert_glyph(entry.after.clone());
        let title = entry.title.clone();
        self.history.push_undo(entry);
        Ok(title)
    }
}
