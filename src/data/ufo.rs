//! UFO file I/O operations

use anyhow::Result;
use norad::Font;
use std::path::Path;
use tracing::debug;

use crate::core::errors::{validate_ufo_path, FileContext};
use crate::font_source::FontData;

/// Load a UFO font file from disk
pub fn load_ufo_from_path(path: impl AsRef<Path>) -> Result<Font> {
    let path = path.as_ref();
    validate_ufo_path(path)?;
    let font = Font::load(path).with_file_context("load", path)?;
    Ok(font)
}

/// A UFO source together with the editable model extracted from it
pub struct UfoSource {
    pub norad: Font,
    pub data: FontData,
}

impl UfoSource {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let norad = load_ufo_from_path(path)?;
        let data = FontData::from_norad_font(&norad);
        debug!(
            "Loaded '{}' with {} glyphs from {:?}",
            data.info.get_display_name(),
            data.len(),
            path
        );
        Ok(Self { norad, data })
    }

    /// Write every glyph touched by a committed edit back into the UFO
    /// and save it. Returns the number of glyphs written.
    pub fn save(&mut self, path: impl AsRef<Path>) -> Result<usize> {
        let path = path.as_ref();
        let edited = self.data.history().edited_glyphs();
        let written = self.data.write_to_norad_font(&mut self.norad, &edited);
        self.norad.save(path).with_file_context("save", path)?;
        debug!("Saved {} edited glyphs to {:?}", written, path);
        Ok(written)
    }
}
