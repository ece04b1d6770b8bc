//! UFO format conversion utilities
//!
//! This module contains conversion logic between the norad UFO types and
//! our font model. Reading copies everything the tools need; writing back
//! only touches what the tools may change (advance widths, component
//! offsets and anchors) so the rest of the source round-trips untouched.

use kurbo::{Point, Vec2};
use norad::Font;
use tracing::warn;

use crate::font_source::{AnchorData, ComponentData, FontData, FontInfo, GlyphData};

impl GlyphData {
    /// Convert from norad glyph
    pub fn from_norad_glyph(norad_glyph: &norad::Glyph) -> Self {
        let components = norad_glyph
            .components
            .iter()
            .map(ComponentData::from_norad_component)
            .collect();
        let anchors = norad_glyph
            .anchors
            .iter()
            .map(AnchorData::from_norad_anchor)
            .collect();

        Self {
            name: norad_glyph.name().to_string(),
            width: norad_glyph.width,
            components,
            anchors,
        }
    }

    /// Copy widths, offsets and anchor positions into a norad glyph
    pub fn write_to_norad_glyph(&self, norad_glyph: &mut norad::Glyph) {
        norad_glyph.width = self.width;

        if norad_glyph.components.len() == self.components.len() {
            for (target, source) in norad_glyph.components.iter_mut().zip(&self.components) {
                target.transform.x_offset = source.offset.x;
                target.transform.y_offset = source.offset.y;
            }
        } else {
            warn!(
                "Component count of '{}' differs from the source, components not written",
                self.name
            );
        }

        let same_names = norad_glyph.anchors.len() == self.anchors.len()
            && norad_glyph
                .anchors
                .iter()
                .zip(&self.anchors)
                .all(|(target, source)| anchor_name(target) == source.name);
        if same_names {
            for (target, source) in norad_glyph.anchors.iter_mut().zip(&self.anchors) {
                target.x = source.position.x;
                target.y = source.position.y;
            }
        } else {
            norad_glyph.anchors = self
                .anchors
                .iter()
                .filter_map(AnchorData::to_norad_anchor)
                .collect();
        }
    }
}

fn anchor_name(anchor: &norad::Anchor) -> String {
    anchor
        .name
        .as_ref()
        .map(|name| name.to_string())
        .unwrap_or_default()
}

impl AnchorData {
    pub fn from_norad_anchor(norad_anchor: &norad::Anchor) -> Self {
        Self {
            name: anchor_name(norad_anchor),
            position: Point::new(norad_anchor.x, norad_anchor.y),
        }
    }

    /// Convert back to a norad anchor; invalid names are dropped
    pub fn to_norad_anchor(&self) -> Option<norad::Anchor> {
        match norad::Name::new(&self.name) {
            Ok(name) => Some(norad::Anchor::new(
                self.position.x,
                self.position.y,
                Some(name),
                None,
                None,
            )),
            Err(e) => {
                warn!("Dropping anchor with invalid name '{}': {}", self.name, e);
                None
            }
        }
    }
}

impl ComponentData {
    pub fn from_norad_component(norad_component: &norad::Component) -> Self {
        let t = &norad_component.transform;
        Self {
            base_glyph: norad_component.base.to_string(),
            offset: Vec2::new(t.x_offset, t.y_offset),
            scale: [t.x_scale, t.xy_scale, t.yx_scale, t.y_scale],
        }
    }
}

impl FontData {
    /// Extract font data from the default layer of a norad Font
    pub fn from_norad_font(font: &Font) -> Self {
        let mut data = FontData::new();
        for glyph in font.default_layer().iter() {
            data.insert_glyph(GlyphData::from_norad_glyph(glyph));
        }

        for (first, seconds) in font.kerning.iter() {
            for (second, value) in seconds {
                data.kerning
                    .insert((first.to_string(), second.to_string()), *value);
            }
        }
        for (group, members) in font.groups.iter() {
            data.groups.insert(
                group.to_string(),
                members.iter().map(|m| m.to_string()).collect(),
            );
        }

        data.info = FontInfo::from_norad_font(font);
        data
    }

    /// Write the given glyphs back into a norad Font. Returns how many were
    /// found and written.
    pub fn write_to_norad_font(&self, font: &mut Font, glyphs: &[&str]) -> usize {
        let layer = font.default_layer_mut();
        let mut written = 0;
        for &name in glyphs {
            let (Some(source), Some(target)) = (self.get(name), layer.get_glyph_mut(name)) else {
                warn!("Glyph '{}' not found in UFO layer, skipped", name);
                continue;
            };
            source.write_to_norad_glyph(target);
            written += 1;
        }
        written
    }
}
