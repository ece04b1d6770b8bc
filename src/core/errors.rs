//! Error types shared across the crate
//!
//! Library code reports failures through the typed enums below. Warnings
//! about malformed font data are values too, so they can be both logged and
//! handed back to callers that want to print a summary. The application
//! layer wraps everything in `anyhow` with file context.

use anyhow::Context;
use std::path::Path;
use thiserror::Error;

/// Non-fatal problems found in font data.
///
/// These are logged as they are found and never stop processing.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DataWarning {
    #[error("anchor with empty name at ({x}, {y}) in glyph '{glyph}', ignored")]
    EmptyAnchorName { glyph: String, x: f64, y: f64 },

    #[error("duplicate anchor name '{anchor}' in glyph '{glyph}', ignored")]
    DuplicateAnchor { glyph: String, anchor: String },

    #[error("no matching anchor for component '{component}' in glyph '{glyph}', offset reset to (0, 0)")]
    NoMatchingAnchor { glyph: String, component: String },

    #[error("component order mismatch in glyph '{glyph}' at index {index}: expected '{expected}', found '{found}'")]
    ComponentOrderMismatch {
        glyph: String,
        index: usize,
        expected: String,
        found: String,
    },
}

/// Invalid anchor names.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnchorNameError {
    #[error("anchor name must not be empty")]
    Empty,

    #[error("anchor name '{0}' has no opposite-side name")]
    NoMatchingName(String),
}

/// Failures of the undo-scoped edit history.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    #[error("an edit of glyph '{0}' is already open")]
    AlreadyOpen(String),

    #[error("no edit is open")]
    NotOpen,

    #[error("glyph '{0}' does not exist")]
    UnknownGlyph(String),

    #[error("nothing to undo")]
    NothingToUndo,
}

/// Errors that abort repositioning of a single glyph.
///
/// The glyph is left exactly as it was before the attempt; other glyphs in
/// the same batch are not affected.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RecomposeError {
    #[error("glyph '{0}' does not exist")]
    MissingGlyph(String),

    #[error("component '{component}' of glyph '{glyph}' refers to a missing base glyph")]
    MissingBaseGlyph { glyph: String, component: String },

    #[error("component list of glyph '{glyph}' changed while repositioning")]
    ComponentOrderMismatch {
        glyph: String,
        #[source]
        detail: DataWarning,
    },

    #[error(transparent)]
    Edit(#[from] EditError),
}

/// Errors from the anchor editing helpers.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnchorEditError {
    #[error("glyph '{0}' does not exist")]
    MissingGlyph(String),

    #[error("font has no {0} value")]
    MissingMetric(&'static str),

    #[error(transparent)]
    Name(#[from] AnchorNameError),

    #[error(transparent)]
    Data(#[from] DataWarning),

    #[error(transparent)]
    Edit(#[from] EditError),
}

/// Attach file context to I/O-ish results.
pub trait FileContext<T> {
    fn with_file_context(self, action: &str, path: &Path) -> anyhow::Result<T>;
}

impl<T, E> FileContext<T> for Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn with_file_context(self, action: &str, path: &Path) -> anyhow::Result<T> {
        self.with_context(|| format!("Failed to {action} {}", path.display()))
    }
}

/// Check that a path looks like a UFO source before handing it to norad.
pub fn validate_ufo_path(path: &Path) -> anyhow::Result<()> {
    if !path.exists() {
        anyhow::bail!(
            "Font source does not exist: {}\nMake sure the path is correct and the file exists.",
            path.display()
        );
    }
    if !path.is_dir() {
        anyhow::bail!(
            "Not a UFO directory: {}\nOnly UFO sources are supported.",
            path.display()
        );
    }
    if !path.join("metainfo.plist").exists() {
        anyhow::bail!(
            "Not a valid UFO directory: missing metainfo.plist in {}\nMake sure this is a valid UFO directory.",
            path.display()
        );
    }
    Ok(())
}
