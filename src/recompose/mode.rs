//! Deciding how a composite's components are laid out

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::anchors::naming::base_name;

/// Glyphs whose components sit side by side.
const DEFAULT_SIDE_BY_SIDE: &[&str] = &[
    "uniFB00", "fi", "fl", "IJ", "ij", "napostrophe", "onequarter", "onehalf",
    "threequarters", "onethird", "twothirds", "uni2155", "uni2156", "uni2157",
    "uni2158", "uni2159", "uni215A", "oneeighth", "threeeighths", "fiveeighths",
    "seveneighths", "uni215F", "uni2150", "uni2151", "uni2152", "uni2189",
    "percent", "perthousand",
];

/// Glyphs whose advance is the sum of their components. Includes the
/// side-by-side set plus a few anchor-placed glyphs such as `dcaron`.
const DEFAULT_LIGATURES: &[&str] = &[
    "uniFB00", "fi", "fl", "dcaron", "lcaron", "IJ", "ij", "napostrophe",
    "onequarter", "onehalf", "threequarters", "onethird", "twothirds",
    "uni2155", "uni2156", "uni2157", "uni2158", "uni2159", "uni215A",
    "oneeighth", "threeeighths", "fiveeighths", "seveneighths", "uni215F",
    "uni2150", "uni2151", "uni2152", "uni2189", "percent", "perthousand",
];

const COMBINING_SUFFIX: &str = "comb";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CompositeMode {
    /// Components docked onto each other through anchor pairs
    MarkStack,
    /// Components placed next to each other, kerned
    Ligature,
}

/// Name lists that steer mode detection and the width policy
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecomposeRules {
    pub ligature_names: BTreeSet<String>,
    pub side_by_side_names: BTreeSet<String>,
}

impl Default for RecomposeRules {
    fn default() -> Self {
        Self {
            ligature_names: DEFAULT_LIGATURES.iter().map(|s| s.to_string()).collect(),
            side_by_side_names: DEFAULT_SIDE_BY_SIDE.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl RecomposeRules {
    pub fn mode_for(&self, glyph_name: &str) -> CompositeMode {
        let base = base_name(glyph_name);
        if self.side_by_side_names.contains(base)
            || (base.contains('_') && !base.ends_with(COMBINING_SUFFIX))
        {
            CompositeMode::Ligature
        } else {
            CompositeMode::MarkStack
        }
    }

    /// Should the composite's advance be the accumulated component widths?
    pub fn uses_total_width(&self, glyph_name: &str, mode: CompositeMode) -> bool {
        mode == CompositeMode::Ligature || self.ligature_names.contains(base_name(glyph_name))
    }
}
