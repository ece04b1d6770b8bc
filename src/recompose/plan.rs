//! Computing target component offsets and advance width
//!
//! Planning only reads the font. It walks the components in order, carrying
//! the running width and, for mark stacks, the virtual anchor map from one
//! component to the next.

use kurbo::Vec2;
use tracing::{debug, warn};

use crate::core::errors::{DataWarning, RecomposeError};
use crate::font_source::{FontHost, GlyphData};
use crate::kerning::KerningIndex;
use crate::recompose::anchor_map::VirtualAnchorMap;
use crate::recompose::mode::{CompositeMode, RecomposeRules};

#[derive(Clone, Debug, PartialEq)]
pub struct ComponentPlacement {
    pub base_glyph: String,
    pub offset: Vec2,
    /// Base-side anchor the component docked on, for mark stacks
    pub docked_on: Option<String>,
}

/// Where every component of one composite should be, and how wide it is
#[derive(Clone, Debug, PartialEq)]
pub struct CompositePlan {
    pub glyph: String,
    pub mode: CompositeMode,
    pub placements: Vec<ComponentPlacement>,
    pub width: f64,
    pub warnings: Vec<DataWarning>,
}

fn resolve<'a, H: FontHost>(
    host: &'a H,
    glyph: &str,
    component: &str,
) -> Result<&'a GlyphData, RecomposeError> {
    host.glyph(component).ok_or_else(|| {
        let err = RecomposeError::MissingBaseGlyph {
            glyph: glyph.to_string(),
            component: component.to_string(),
        };
        warn!("{err}");
        err
    })
}

pub fn plan_composite<H: FontHost>(
    host: &H,
    glyph_name: &str,
    kerning: &KerningIndex,
    rules: &RecomposeRules,
) -> Result<CompositePlan, RecomposeError> {
    let glyph = host
        .glyph(glyph_name)
        .ok_or_else(|| RecomposeError::MissingGlyph(glyph_name.to_string()))?;
    let mode = rules.mode_for(glyph_name);

    let mut placements = Vec::with_capacity(glyph.components.len());
    let mut warnings = Vec::new();
    let mut anchor_map = VirtualAnchorMap::default();
    let mut total_width = 0.0;
    let mut previous: Option<&str> = None;

    for (i, component) in glyph.components.iter().enumerate() {
        let base = resolve(host, glyph_name, &component.base_glyph)?;
        let kern = previous
            .map(|prev| kerning.kern_value(prev, &component.base_glyph))
            .unwrap_or(0.0);

        let (offset, docked_on) = match mode {
            CompositeMode::Ligature => (Vec2::new((total_width + kern).round(), 0.0), None),
            CompositeMode::MarkStack if i == 0 => {
                anchor_map = VirtualAnchorMap::seeded(&base.anchors);
                (Vec2::ZERO, None)
            }
            CompositeMode::MarkStack => match anchor_map.dock(&base.anchors) {
                Some(docking) => {
                    let offset = docking.offset;
                    let anchor = docking.anchor.clone();
                    anchor_map = anchor_map.after_docking(&docking, &base.anchors);
                    (offset, Some(anchor))
                }
                None => {
                    let warning = DataWarning::NoMatchingAnchor {
                        glyph: glyph_name.to_string(),
                        component: component.base_glyph.clone(),
                    };
                    warn!("{warning}");
                    warnings.push(warning);
                    (Vec2::ZERO, None)
                }
            },
        };

        debug!(
            "  {} '{}' -> ({}, {})",
            i, component.base_glyph, offset.x, offset.y
        );
        placements.push(ComponentPlacement {
            base_glyph: component.base_glyph.clone(),
            offset,
            docked_on,
        });
        total_width += base.width + kern;
        previous = Some(component.base_glyph.as_str());
    }

    let width = if glyph.components.is_empty() {
        glyph.width
    } else if rules.uses_total_width(glyph_name, mode) {
        total_width
    } else {
        resolve(host, glyph_name, glyph.base_glyph_name())?.width
    };

    Ok(CompositePlan {
        glyph: glyph_name.to_string(),
        mode,
        placements,
        width,
        warnings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font_source::FontData;

    fn plan(font: &FontData, name: &str) -> CompositePlan {
        plan_composite(
            font,
            name,
            &KerningIndex::from_font(font),
            &RecomposeRules::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_missing_base_glyph() {
        let font = FontData::new()
            .with_glyph(GlyphData::new("aacute", 0.0).with_component("a", 0.0, 0.0));
        let err = plan_composite(
            &font,
            "aacute",
            &KerningIndex::default(),
            &RecomposeRules::default(),
        )
        .unwrap_err();
        assert_eq!(
            err,
            RecomposeError::MissingBaseGlyph {
                glyph: "aacute".into(),
                component: "a".into()
            }
        );
    }

    #[test]
    fn test_kerned_ligature_placement() {
        let font = FontData::new()
            .with_glyph(GlyphData::new("f", 300.0))
            .with_glyph(GlyphData::new("i", 250.0))
            .with_glyph(
                GlyphData::new("f_i", 0.0)
                    .with_component("f", 0.0, 0.0)
                    .with_component("i", 0.0, 0.0),
            )
            .with_kerning("f", "i", -20.4);
        let plan = plan(&font, "f_i");
        assert_eq!(plan.mode, CompositeMode::Ligature);
        assert_eq!(plan.placements[0].offset, Vec2::ZERO);
        assert_eq!(plan.placements[1].offset, Vec2::new(280.0, 0.0));
        assert!((plan.width - (300.0 + 250.0 - 20.4)).abs() < 1e-9);
    }

    #[test]
    fn test_stacked_marks_follow_the_chain() {
        let font = FontData::new()
            .with_glyph(GlyphData::new("a", 500.0).with_anchor("top", 250.0, 500.0))
            .with_glyph(
                GlyphData::new("dieresiscomb", 0.0)
                    .with_anchor("_top", 0.0, 480.0)
                    .with_anchor("top", 0.0, 600.0),
            )
            .with_glyph(GlyphData::new("acutecomb", 0.0).with_anchor("_top", 10.0, 500.0))
            .with_glyph(
                GlyphData::new("adieresisacute", 0.0)
                    .with_component("a", 0.0, 0.0)
                    .with_component("dieresiscomb", 0.0, 0.0)
                    .with_component("acutecomb", 0.0, 0.0),
            );
        let plan = plan(&font, "adieresisacute");
        assert_eq!(plan.mode, CompositeMode::MarkStack);
        assert_eq!(plan.placements[1].offset, Vec2::new(250.0, 20.0));
        assert_eq!(plan.placements[1].docked_on.as_deref(), Some("top"));
        // dieresis top lands at (250, 620); acute's _top at (10, 500)
        assert_eq!(plan.placements[2].offset, Vec2::new(240.0, 120.0));
        assert_eq!(plan.width, 500.0);
        assert!(plan.warnings.is_empty());
    }

    #[test]
    fn test_unmatched_mark_warns() {
        let font = FontData::new()
            .with_glyph(GlyphData::new("a", 500.0).with_anchor("top", 250.0, 500.0))
            .with_glyph(GlyphData::new("cedillacomb", 0.0).with_anchor("_bottom", 0.0, 0.0))
            .with_glyph(
                GlyphData::new("acedilla", 500.0)
                    .with_component("a", 0.0, 0.0)
                    .with_component("cedillacomb", 30.0, 0.0),
            );
        let plan = plan(&font, "acedilla");
        assert_eq!(plan.placements[1].offset, Vec2::ZERO);
        assert_eq!(plan.placements[1].docked_on, None);
        assert!(matches!(
            plan.warnings[0],
            DataWarning::NoMatchingAnchor { .. }
        ));
    }
}
