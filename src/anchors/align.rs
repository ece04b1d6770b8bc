//! Anchor editing operations
//!
//! The non-visual half of the anchor tool: adding anchors, lining selected
//! anchors up with points or font metrics, and nudging them. Each operation
//! edits one glyph inside one undo-scoped edit and leaves the glyph alone
//! when nothing would move.

use kurbo::{Point, Rect, Vec2};
use tracing::debug;

use crate::anchors::registry::AnchorRegistry;
use crate::core::errors::AnchorEditError;
use crate::font_source::{AnchorData, FontHost, MetricLine};

/// Nudge increments in font units
pub const NUDGE_DEFAULT: f64 = 10.0;
pub const NUDGE_SHIFT: f64 = 5.0;
pub const NUDGE_OPTION: f64 = 1.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NudgeModifier {
    #[default]
    None,
    Shift,
    Option,
}

impl NudgeModifier {
    pub fn increment(&self) -> f64 {
        match self {
            NudgeModifier::None => NUDGE_DEFAULT,
            NudgeModifier::Shift => NUDGE_SHIFT,
            NudgeModifier::Option => NUDGE_OPTION,
        }
    }
}

/// Point anchors are aligned to, rounded to whole units.
///
/// With no selection this is the middle of the advance at half cap height,
/// with one point the point itself, otherwise the centre of the selection's
/// bounding box.
pub fn reference_point(glyph_width: f64, cap_height: f64, selection: &[Point]) -> Point {
    let point = match selection {
        [] => Point::new(glyph_width / 2.0, cap_height / 2.0),
        [single] => *single,
        [first, rest @ ..] => rest
            .iter()
            .fold(Rect::from_points(*first, *first), |rect, p| rect.union_pt(*p))
            .center(),
    };
    point.round()
}

/// Suggest a name for an anchor placed at `point`.
///
/// Thirds of the glyph height give `bottom`/`center`/`top`, thirds of the
/// advance add `Left`/`Right`. Names already used in the glyph get `Attach`
/// appended.
pub fn guess_anchor_name(
    glyph_width: f64,
    y_max: f64,
    point: Point,
    existing: &[AnchorData],
) -> String {
    let horizontal = if point.x <= (glyph_width / 3.0).floor() {
        "Left"
    } else if point.x >= (glyph_width * 2.0 / 3.0).floor() {
        "Right"
    } else {
        ""
    };
    let vertical = if point.y <= (y_max / 3.0).floor() {
        "bottom"
    } else if point.y >= (y_max * 2.0 / 3.0).floor() {
        "top"
    } else {
        "center"
    };
    let mut name = format!("{vertical}{horizontal}");
    if existing.iter().any(|a| a.name == name) {
        name.push_str("Attach");
    }
    name
}

/// Register a new anchor and add it to the glyph
pub fn add_anchor<H: FontHost>(
    host: &mut H,
    registry: &mut AnchorRegistry,
    glyph: &str,
    name: &str,
    position: Point,
) -> Result<(), AnchorEditError> {
    if host.glyph(glyph).is_none() {
        return Err(AnchorEditError::MissingGlyph(glyph.to_string()));
    }
    host.begin_edit(glyph, &format!("Add anchor {name} to /{glyph}"))?;
    if let Err(warning) = registry.add_anchor(glyph, name, position) {
        host.abort_edit()?;
        return Err(warning.into());
    }
    if let Some(g) = host.glyph_mut(glyph) {
        g.anchors.push(AnchorData {
            name: name.to_string(),
            position,
        });
    }
    if let Err(e) = host.commit_edit() {
        registry.remove_anchor(glyph, name);
        return Err(e.into());
    }
    Ok(())
}

/// Move the named anchors of one glyph with `f`, inside one edit.
/// Returns how many anchors moved.
fn edit_anchors<H, F>(
    host: &mut H,
    glyph: &str,
    names: &[&str],
    title: &str,
    f: F,
) -> Result<usize, AnchorEditError>
where
    H: FontHost,
    F: Fn(Point) -> Point,
{
    let current = host
        .glyph(glyph)
        .ok_or_else(|| AnchorEditError::MissingGlyph(glyph.to_string()))?;
    let moves: Vec<(usize, Point)> = current
        .anchors
        .iter()
        .enumerate()
        .filter(|(_, a)| names.contains(&a.name.as_str()))
        .filter_map(|(i, a)| {
            let target = f(a.position);
            (target != a.position).then_some((i, target))
        })
        .collect();

    if moves.is_empty() {
        debug!("{title}: nothing to move");
        return Ok(0);
    }

    host.begin_edit(glyph, title)?;
    if let Some(g) = host.glyph_mut(glyph) {
        for (i, target) in &moves {
            g.anchors[*i].position = *target;
        }
    }
    host.commit_edit()?;
    debug!("{title}: moved {} anchors", moves.len());
    Ok(moves.len())
}

/// Set one coordinate of the named anchors
pub fn align_anchors<H: FontHost>(
    host: &mut H,
    glyph: &str,
    names: &[&str],
    axis: Axis,
    value: f64,
) -> Result<usize, AnchorEditError> {
    let title = match axis {
        Axis::Horizontal => format!("h-align anchors in /{glyph}"),
        Axis::Vertical => format!("v-align anchors in /{glyph}"),
    };
    edit_anchors(host, glyph, names, &title, |p| match axis {
        Axis::Horizontal => Point::new(value, p.y),
        Axis::Vertical => Point::new(p.x, value),
    })
}

/// Put the named anchors on the baseline, x-height or cap height
pub fn move_anchors_to_metric<H: FontHost>(
    host: &mut H,
    glyph: &str,
    names: &[&str],
    line: MetricLine,
) -> Result<usize, AnchorEditError> {
    let y = host
        .info()
        .metric(line)
        .ok_or(AnchorEditError::MissingMetric(line.name()))?;
    let title = format!("align anchors to {} in /{glyph}", line.name());
    edit_anchors(host, glyph, names, &title, |p| Point::new(p.x, y))
}

/// Move the named anchors by whole increments; positions are rounded first
pub fn nudge_anchors<H: FontHost>(
    host: &mut H,
    glyph: &str,
    names: &[&str],
    direction: Vec2,
    modifier: NudgeModifier,
) -> Result<usize, AnchorEditError> {
    let delta = direction * modifier.increment();
    let title = format!("Move anchors in /{glyph}");
    edit_anchors(host, glyph, names, &title, |p| p.round() + delta)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::errors::EditError;
    use crate::font_source::{FontData, FontInfo, GlyphData};

    fn font() -> FontData {
        let mut font = FontData::new().with_glyph(
            GlyphData::new("a", 500.0)
                .with_anchor("top", 240.0, 480.0)
                .with_anchor("bottom", 260.3, 4.0)
                .with_anchor("ogonek", 400.0, 0.0),
        );
        font.info = FontInfo {
            x_height: Some(500.0),
            cap_height: Some(700.0),
            ..Default::default()
        };
        font
    }

    #[test]
    fn test_reference_point() {
        assert_eq!(reference_point(501.0, 700.0, &[]), Point::new(251.0, 350.0));
        assert_eq!(
            reference_point(500.0, 700.0, &[Point::new(10.4, 20.6)]),
            Point::new(10.0, 21.0)
        );
        let selection = [
            Point::new(100.0, 0.0),
            Point::new(300.0, 50.0),
            Point::new(200.0, 400.0),
        ];
        assert_eq!(reference_point(500.0, 700.0, &selection), Point::new(200.0, 200.0));
    }

    #[test]
    fn test_guess_anchor_name() {
        let existing = vec![AnchorData::new("top", 250.0, 700.0)];
        assert_eq!(guess_anchor_name(600.0, 700.0, Point::new(300.0, 650.0), &[]), "top");
        assert_eq!(
            guess_anchor_name(600.0, 700.0, Point::new(300.0, 650.0), &existing),
            "topAttach"
        );
        assert_eq!(guess_anchor_name(600.0, 700.0, Point::new(50.0, 0.0), &[]), "bottomLeft");
        assert_eq!(guess_anchor_name(600.0, 700.0, Point::new(550.0, 350.0), &[]), "centerRight");
    }

    #[test]
    fn test_align_vertical() {
        let mut font = font();
        let moved =
            align_anchors(&mut font, "a", &["top", "bottom"], Axis::Vertical, 350.0).unwrap();
        assert_eq!(moved, 2);
        let glyph = font.get("a").unwrap();
        assert_eq!(glyph.anchor("top").unwrap().position, Point::new(240.0, 350.0));
        assert_eq!(glyph.anchor("bottom").unwrap().position, Point::new(260.3, 350.0));
        assert_eq!(glyph.anchor("ogonek").unwrap().position, Point::new(400.0, 0.0));
        assert_eq!(font.history().undo_titles().collect::<Vec<_>>(), vec!["v-align anchors in /a"]);
    }

    #[test]
    fn test_align_noop_opens_no_edit() {
        let mut font = font();
        let moved = align_anchors(&mut font, "a", &["top"], Axis::Horizontal, 240.0).unwrap();
        assert_eq!(moved, 0);
        assert_eq!(font.history().undo_len(), 0);
    }

    #[test]
    fn test_move_to_metric() {
        let mut font = font();
        move_anchors_to_metric(&mut font, "a", &["top"], MetricLine::XHeight).unwrap();
        move_anchors_to_metric(&mut font, "a", &["bottom"], MetricLine::Baseline).unwrap();
        let glyph = font.get("a").unwrap();
        assert_eq!(glyph.anchor("top").unwrap().position.y, 500.0);
        assert_eq!(glyph.anchor("bottom").unwrap().position.y, 0.0);

        font.info.cap_height = None;
        assert_eq!(
            move_anchors_to_metric(&mut font, "a", &["top"], MetricLine::CapHeight).unwrap_err(),
            AnchorEditError::MissingMetric("cap height")
        );
    }

    #[test]
    fn test_nudge_rounds_then_moves() {
        let mut font = font();
        nudge_anchors(&mut font, "a", &["bottom"], Vec2::new(1.0, 0.0), NudgeModifier::Shift)
            .unwrap();
        nudge_anchors(&mut font, "a", &["top"], Vec2::new(0.0, -1.0), NudgeModifier::None).unwrap();
        let glyph = font.get("a").unwrap();
        assert_eq!(glyph.anchor("bottom").unwrap().position, Point::new(265.0, 4.0));
        assert_eq!(glyph.anchor("top").unwrap().position, Point::new(240.0, 470.0));
    }

    #[test]
    fn test_add_anchor_goes_through_registry() {
        let mut font = font();
        let mut registry = AnchorRegistry::from_font(&font);
        add_anchor(&mut font, &mut registry, "a", "center", Point::new(250.0, 250.0)).unwrap();
        assert!(font.get("a").unwrap().anchor("center").is_some());
        assert_eq!(registry.position("a", "center"), Some(Point::new(250.0, 250.0)));

        let err = add_anchor(&mut font, &mut registry, "a", "top", Point::ZERO).unwrap_err();
        assert!(matches!(err, AnchorEditError::Data(_)));
        assert_eq!(font.get("a").unwrap().anchors.len(), 4);
        assert_eq!(font.history().undo_len(), 1);
    }

    #[test]
    fn test_add_anchor_while_other_edit_open_leaves_registry_alone() {
        let mut font = font().with_glyph(GlyphData::new("b", 400.0));
        let mut registry = AnchorRegistry::from_font(&font);
        font.begin_edit("b", "Edit /b").unwrap();

        let err = add_anchor(&mut font, &mut registry, "a", "center", Point::new(1.0, 2.0))
            .unwrap_err();
        assert!(matches!(err, AnchorEditError::Edit(EditError::AlreadyOpen(_))));
        assert_eq!(registry.position("a", "center"), None);
        assert!(font.get("a").unwrap().anchor("center").is_none());

        font.commit_edit().unwrap();
        add_anchor(&mut font, &mut registry, "a", "center", Point::new(1.0, 2.0)).unwrap();
        assert_eq!(registry.position("a", "center"), Some(Point::new(1.0, 2.0)));
        assert!(font.get("a").unwrap().anchor("center").is_some());
    }
}
