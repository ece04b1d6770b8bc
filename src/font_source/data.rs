//! Font data structures
//!
//! An in-memory stand-in for the font document a host editor owns. Only the
//! parts the anchor and composite tools read or write are modelled: advance
//! widths, components, anchors, kerning and groups.

use kurbo::{Point, Vec2};
use std::collections::{BTreeMap, HashMap};

use crate::editing::EditHistory;
use crate::font_source::metrics::FontInfo;

/// A named attachment point on a glyph
#[derive(Clone, Debug, PartialEq)]
pub struct AnchorData {
    pub name: String,
    pub position: Point,
}

impl AnchorData {
    pub fn new(name: impl Into<String>, x: f64, y: f64) -> Self {
        Self {
            name: name.into(),
            position: Point::new(x, y),
        }
    }
}

/// A reference to another glyph placed at an offset
#[derive(Clone, Debug, PartialEq)]
pub struct ComponentData {
    pub base_glyph: String,
    pub offset: Vec2,
    /// Linear part of the affine transform: xx, xy, yx, yy
    pub scale: [f64; 4],
}

impl ComponentData {
    pub fn new(base_glyph: impl Into<String>, x: f64, y: f64) -> Self {
        Self {
            base_glyph: base_glyph.into(),
            offset: Vec2::new(x, y),
            scale: [1.0, 0.0, 0.0, 1.0],
        }
    }
}

#[derive(Clone, Debug, PartialEq, Default)]
pub struct GlyphData {
    pub name: String,
    pub width: f64,
    pub components: Vec<ComponentData>,
    pub anchors: Vec<AnchorData>,
}

impl GlyphData {
    pub fn new(name: impl Into<String>, width: f64) -> Self {
        Self {
            name: name.into(),
            width,
            ..Default::default()
        }
    }

    pub fn with_anchor(mut self, name: &str, x: f64, y: f64) -> Self {
        self.anchors.push(AnchorData::new(name, x, y));
        self
    }

    pub fn with_component(mut self, base_glyph: &str, x: f64, y: f64) -> Self {
        self.components.push(ComponentData::new(base_glyph, x, y));
        self
    }

    pub fn is_composite(&self) -> bool {
        !self.components.is_empty()
    }

    /// Name of the first component's base glyph, or the glyph itself
    pub fn base_glyph_name(&self) -> &str {
        self.components
            .first()
            .map(|c| c.base_glyph.as_str())
            .unwrap_or(&self.name)
    }

    pub fn anchor(&self, name: &str) -> Option<&AnchorData> {
        self.anchors.iter().find(|a| a.name == name)
    }
}

/// A font: ordered glyphs plus kerning and groups
#[derive(Clone, Debug, Default)]
pub struct FontData {
    glyphs: Vec<GlyphData>,
    index: HashMap<String, usize>,
    /// Kerning values keyed by (left, right); either side may be a group
    pub kerning: BTreeMap<(String, String), f64>,
    /// Group name -> member glyph names
    pub groups: BTreeMap<String, Vec<String>>,
    pub info: FontInfo,
    pub(crate) history: EditHistory,
}

impl FontData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a glyph, replacing one with the same name in place
    pub fn insert_glyph(&mut self, glyph: GlyphData) {
        match self.index.get(&glyph.name) {
            Some(&idx) => self.glyphs[idx] = glyph,
            None => {
                self.index.insert(glyph.name.clone(), self.glyphs.len());
                self.glyphs.push(glyph);
            }
        }
    }

    pub fn with_glyph(mut self, glyph: GlyphData) -> Self {
        self.insert_glyph(glyph);
        self
    }

    pub fn with_kerning(mut self, left: &str, right: &str, value: f64) -> Self {
        self.kerning
            .insert((left.to_string(), right.to_string()), value);
        self
    }

    pub fn with_group(mut self, name: &str, members: &[&str]) -> Self {
        self.groups.insert(
            name.to_string(),
            members.iter().map(|m| m.to_string()).collect(),
        );
        self
    }

    pub fn get(&self, name: &str) -> Option<&GlyphData> {
        self.index.get(name).map(|&idx| &self.glyphs[idx])
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut GlyphData> {
        self.index.get(name).map(|&idx| &mut self.glyphs[idx])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Glyphs in font order
    pub fn iter(&self) -> impl Iterator<Item = &GlyphData> {
        self.glyphs.iter()
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    /// Names of all glyphs that have at least one component
    pub fn composite_names(&self) -> Vec<String> {
        self.glyphs
            .iter()
            .filter(|g| g.is_composite())
            .map(|g| g.name.clone())
            .collect()
    }

    pub fn history(&self) -> &EditHistory {
        &self.history
    }

    pub fn history_mut(&mut self) -> &mut EditHistory {
        &mut self.history
    }
}
