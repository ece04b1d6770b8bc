//! Font-wide anchor index
//!
//! Built once from a font snapshot and rebuilt wholesale when the glyph set
//! changes; it does not follow edits made after it was built. Besides the
//! position index it carries the hide-lists the overlay uses to decide which
//! anchors and attached glyphs to preview.

use kurbo::Point;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, warn};

use crate::anchors::naming::{is_mark_name, matching_name};
use crate::core::errors::DataWarning;
use crate::font_source::FontHost;

/// What a hide-list entry refers to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VisibilityKind {
    /// Anchor names
    Anchor,
    /// Base glyphs shown under a mark
    Glyph,
    /// Mark glyphs shown on a base
    Mark,
}

/// Names hidden from the preview, one list per kind
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HideLists {
    pub anchor: Vec<String>,
    pub glyph: Vec<String>,
    pub mark: Vec<String>,
}

impl HideLists {
    fn list(&self, kind: VisibilityKind) -> &Vec<String> {
        match kind {
            VisibilityKind::Anchor => &self.anchor,
            VisibilityKind::Glyph => &self.glyph,
            VisibilityKind::Mark => &self.mark,
        }
    }

    fn list_mut(&mut self, kind: VisibilityKind) -> &mut Vec<String> {
        match kind {
            VisibilityKind::Anchor => &mut self.anchor,
            VisibilityKind::Glyph => &mut self.glyph,
            VisibilityKind::Mark => &mut self.mark,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct AnchorRegistry {
    positions: HashMap<(String, String), Point>,
    anchor_glyphs: BTreeMap<String, Vec<String>>,
    hide_lists: HideLists,
    warnings: Vec<DataWarning>,
}

impl AnchorRegistry {
    /// Index every anchor of every glyph in the font
    pub fn from_font(font: &impl FontHost) -> Self {
        let mut registry = Self::default();
        for name in font.glyph_names() {
            let Some(glyph) = font.glyph(&name) else {
                continue;
            };
            for anchor in &glyph.anchors {
                if let Err(warning) =
                    registry.add_anchor(&glyph.name, &anchor.name, anchor.position)
                {
                    registry.warnings.push(warning);
                }
            }
        }
        debug!(
            "Indexed {} anchors with {} distinct names",
            registry.positions.len(),
            registry.anchor_glyphs.len()
        );
        registry
    }

    pub fn with_hide_lists(mut self, hide_lists: HideLists) -> Self {
        self.hide_lists = hide_lists;
        self
    }

    /// Record one anchor. Empty and duplicate names are rejected.
    pub fn add_anchor(
        &mut self,
        glyph: &str,
        name: &str,
        position: Point,
    ) -> Result<(), DataWarning> {
        if name.is_empty() {
            let warning = DataWarning::EmptyAnchorName {
                glyph: glyph.to_string(),
                x: position.x,
                y: position.y,
            };
            warn!("{warning}");
            return Err(warning);
        }
        let key = (glyph.to_string(), name.to_string());
        if self.positions.contains_key(&key) {
            let warning = DataWarning::DuplicateAnchor {
                glyph: glyph.to_string(),
                anchor: name.to_string(),
            };
            warn!("{warning}");
            return Err(warning);
        }
        self.positions.insert(key, position);
        self.anchor_glyphs
            .entry(name.to_string())
            .or_default()
            .push(glyph.to_string());
        Ok(())
    }

    /// Forget one anchor. Returns its position if it was known.
    pub fn remove_anchor(&mut self, glyph: &str, name: &str) -> Option<Point> {
        let position = self.positions.remove(&(glyph.to_string(), name.to_string()))?;
        if let Some(glyphs) = self.anchor_glyphs.get_mut(name) {
            glyphs.retain(|g| g != glyph);
            if glyphs.is_empty() {
                self.anchor_glyphs.remove(name);
            }
        }
        Some(position)
    }

    /// Warnings collected while building from a font
    pub fn warnings(&self) -> &[DataWarning] {
        &self.warnings
    }

    pub fn position(&self, glyph: &str, anchor: &str) -> Option<Point> {
        self.positions
            .get(&(glyph.to_string(), anchor.to_string()))
            .copied()
    }

    /// Sorted base-side anchor names
    pub fn anchor_names(&self) -> Vec<String> {
        self.anchor_glyphs
            .keys()
            .filter(|name| !is_mark_name(name))
            .cloned()
            .collect()
    }

    /// Glyphs carrying exactly this anchor name
    pub fn glyphs_with_anchor(&self, anchor: &str) -> &[String] {
        self.anchor_glyphs
            .get(anchor)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Glyphs that can attach through this anchor, i.e. the ones carrying
    /// the matching name
    pub fn glyphs_anchored_to(&self, anchor: &str) -> &[String] {
        match matching_name(anchor) {
            Ok(target) => self.glyphs_with_anchor(&target),
            Err(e) => {
                warn!("Cannot look up anchored glyphs: {e}");
                &[]
            }
        }
    }

    /// Sorted, de-duplicated glyphs for several anchor names.
    ///
    /// With `marks` set the names are flipped first, so passing base anchor
    /// names lists the marks that attach to them.
    pub fn anchored_glyphs_for(&self, anchors: &[&str], marks: bool) -> Vec<String> {
        let mut glyphs: Vec<String> = Vec::new();
        for &anchor in anchors {
            let target = if marks {
                match matching_name(anchor) {
                    Ok(target) => target,
                    Err(_) => continue,
                }
            } else {
                anchor.to_string()
            };
            glyphs.extend(self.glyphs_with_anchor(&target).iter().cloned());
        }
        glyphs.sort();
        glyphs.dedup();
        glyphs
    }

    pub fn hide_lists(&self) -> &HideLists {
        &self.hide_lists
    }

    pub fn visibility(&self, kind: VisibilityKind, name: &str, include_matching: bool) -> bool {
        let hidden = self.hide_lists.list(kind);
        if hidden.iter().any(|n| n == name) {
            return false;
        }
        if include_matching {
            if let Ok(matching) = matching_name(name) {
                return !hidden.contains(&matching);
            }
        }
        true
    }

    pub fn set_visibility(
        &mut self,
        kind: VisibilityKind,
        name: &str,
        visible: bool,
        include_matching: bool,
    ) {
        let matching = if include_matching {
            matching_name(name).ok()
        } else {
            None
        };
        let hidden = self.hide_lists.list_mut(kind);
        if visible {
            if let Some(idx) = hidden.iter().position(|n| n == name) {
                hidden.remove(idx);
                if let Some(matching) = matching {
                    hidden.retain(|n| *n != matching);
                }
            }
        } else if !hidden.iter().any(|n| n == name) {
            hidden.push(name.to_string());
            if let Some(matching) = matching {
                hidden.push(matching);
            }
        }
    }
}
