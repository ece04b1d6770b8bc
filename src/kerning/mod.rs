//! Kerning lookup with group fallback
//!
//! Kerning pairs may name a glyph or a kerning group on either side. Groups
//! are recognised by prefix: `@MMK_L_`/`@MMK_R_` for left/right groups, with
//! the UFO3 `public.kern1.`/`public.kern2.` prefixes treated the same way.
//! Group membership is resolved once when the index is built.

use std::collections::{BTreeMap, HashMap};
use tracing::{debug, warn};

use crate::font_source::FontData;

pub const GROUP_PREFIX: &str = "@MMK_";
pub const LEFT_GROUP_PREFIX: &str = "@MMK_L_";
pub const RIGHT_GROUP_PREFIX: &str = "@MMK_R_";
pub const UFO_LEFT_GROUP_PREFIX: &str = "public.kern1.";
pub const UFO_RIGHT_GROUP_PREFIX: &str = "public.kern2.";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KernSide {
    Left,
    Right,
}

/// Is `name` a kerning group, optionally for a specific side?
pub fn is_kerning_group(name: &str, side: Option<KernSide>) -> bool {
    match side {
        None => {
            name.starts_with(GROUP_PREFIX)
                || name.starts_with(UFO_LEFT_GROUP_PREFIX)
                || name.starts_with(UFO_RIGHT_GROUP_PREFIX)
        }
        Some(KernSide::Left) => {
            name.starts_with(LEFT_GROUP_PREFIX) || name.starts_with(UFO_LEFT_GROUP_PREFIX)
        }
        Some(KernSide::Right) => {
            name.starts_with(RIGHT_GROUP_PREFIX) || name.starts_with(UFO_RIGHT_GROUP_PREFIX)
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct KerningIndex {
    pairs: HashMap<(String, String), f64>,
    left_groups: HashMap<String, String>,
    right_groups: HashMap<String, String>,
}

impl KerningIndex {
    pub fn new(
        kerning: &BTreeMap<(String, String), f64>,
        groups: &BTreeMap<String, Vec<String>>,
    ) -> Self {
        let mut left_groups = HashMap::new();
        let mut right_groups = HashMap::new();

        // BTreeMap iteration is sorted, so the alphabetically first group
        // wins when a glyph is listed twice on one side
        for (group, members) in groups {
            let side_map = if is_kerning_group(group, Some(KernSide::Left)) {
                &mut left_groups
            } else if is_kerning_group(group, Some(KernSide::Right)) {
                &mut right_groups
            } else {
                continue;
            };
            for glyph in members {
                if let Some(existing) = side_map.get(glyph) {
                    warn!(
                        "Glyph '{}' is in kerning groups '{}' and '{}', using '{}'",
                        glyph, existing, group, existing
                    );
                    continue;
                }
                side_map.insert(glyph.clone(), group.clone());
            }
        }

        debug!(
            "Built kerning index: {} pairs, {} left and {} right group members",
            kerning.len(),
            left_groups.len(),
            right_groups.len()
        );

        Self {
            pairs: kerning.iter().map(|(k, v)| (k.clone(), *v)).collect(),
            left_groups,
            right_groups,
        }
    }

    pub fn from_font(font: &FontData) -> Self {
        Self::new(&font.kerning, &font.groups)
    }

    pub fn group_for_glyph(&self, glyph: &str, side: KernSide) -> Option<&str> {
        let map = match side {
            KernSide::Left => &self.left_groups,
            KernSide::Right => &self.right_groups,
        };
        map.get(glyph).map(String::as_str)
    }

    fn pair(&self, left: &str, right: &str) -> Option<f64> {
        self.pairs
            .get(&(left.to_string(), right.to_string()))
            .copied()
    }

    /// Kerning between two glyphs, 0 when nothing applies.
    ///
    /// Lookup order: exact pair, left group with right glyph, left glyph
    /// with right group, both groups. The first hit is returned.
    pub fn kern_value(&self, left: &str, right: &str) -> f64 {
        if let Some(value) = self.pair(left, right) {
            return value;
        }
        let left_group = self.group_for_glyph(left, KernSide::Left);
        let right_group = self.group_for_glyph(right, KernSide::Right);

        if let Some(lg) = left_group {
            if let Some(value) = self.pair(lg, right) {
                return value;
            }
        }
        if let Some(rg) = right_group {
            if let Some(value) = self.pair(left, rg) {
                return value;
            }
        }
        if let (Some(lg), Some(rg)) = (left_group, right_group) {
            if let Some(value) = self.pair(lg, rg) {
                return value;
            }
        }
        0.0
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn font() -> FontData {
        FontData::new()
            .with_group("@MMK_L_f", &["f", "f.alt"])
            .with_group("@MMK_R_i", &["i", "idotless"])
            .with_group("@MMK_R_l", &["l"])
            .with_group("public.kern1.T", &["T"])
            .with_group("ordinary", &["a", "b"])
    }

    #[test]
    fn test_is_kerning_group() {
        assert!(is_kerning_group("@MMK_L_f", None));
        assert!(is_kerning_group("@MMK_L_f", Some(KernSide::Left)));
        assert!(!is_kerning_group("@MMK_L_f", Some(KernSide::Right)));
        assert!(is_kerning_group("@MMK_R_i", Some(KernSide::Right)));
        assert!(is_kerning_group("public.kern1.T", Some(KernSide::Left)));
        assert!(!is_kerning_group("ordinary", None));
        assert!(!is_kerning_group("f", None));
    }

    #[test]
    fn test_group_for_glyph() {
        let index = KerningIndex::from_font(&font());
        assert_eq!(index.group_for_glyph("f.alt", KernSide::Left), Some("@MMK_L_f"));
        assert_eq!(index.group_for_glyph("f", KernSide::Right), None);
        assert_eq!(index.group_for_glyph("i", KernSide::Right), Some("@MMK_R_i"));
        assert_eq!(index.group_for_glyph("T", KernSide::Left), Some("public.kern1.T"));
        assert_eq!(index.group_for_glyph("a", KernSide::Left), None);
    }

    #[test]
    fn test_exact_pair_wins() {
        let font = font()
            .with_kerning("f", "i", -20.0)
            .with_kerning("@MMK_L_f", "i", -10.0)
            .with_kerning("@MMK_L_f", "@MMK_R_i", -5.0);
        let index = KerningIndex::from_font(&font);
        assert_eq!(index.kern_value("f", "i"), -20.0);
    }

    #[test]
    fn test_left_group_before_group_pair() {
        let font = font()
            .with_kerning("@MMK_L_f", "i", -10.0)
            .with_kerning("@MMK_L_f", "@MMK_R_i", -5.0);
        let index = KerningIndex::from_font(&font);
        assert_eq!(index.kern_value("f", "i"), -10.0);
        assert_eq!(index.kern_value("f", "idotless"), -5.0);
    }

    #[test]
    fn test_right_group_fallback() {
        let font = font()
            .with_kerning("f", "@MMK_R_l", 15.0)
            .with_kerning("@MMK_L_f", "@MMK_R_l", 3.0);
        let index = KerningIndex::from_font(&font);
        assert_eq!(index.kern_value("f", "l"), 15.0);
        assert_eq!(index.kern_value("f.alt", "l"), 3.0);
    }

    #[test]
    fn test_no_match_is_zero() {
        let index = KerningIndex::from_font(&font().with_kerning("f", "i", -20.0));
        assert_eq!(index.kern_value("i", "f"), 0.0);
        assert_eq!(index.kern_value("a", "b"), 0.0);
        assert_eq!(index.kern_value("nonexistent", "f"), 0.0);
    }

    #[test]
    fn test_glyph_in_two_left_groups_keeps_first() {
        let font = FontData::new()
            .with_group("@MMK_L_b", &["x"])
            .with_group("@MMK_L_a", &["x"]);
        let index = KerningIndex::from_font(&font);
        assert_eq!(index.group_for_glyph("x", KernSide::Left), Some("@MMK_L_a"));
    }
}
