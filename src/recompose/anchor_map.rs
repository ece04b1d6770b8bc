//! The virtual anchor map of a composite under construction
//!
//! While components are placed one after another, the map holds the
//! base-side anchors that are still free to dock onto, already shifted into
//! the composite's coordinate space. Names are unique; re-inserting a name
//! moves it to the end, and lookups scan from the end so the most recently
//! placed component wins.

use kurbo::{Point, Vec2};

use crate::anchors::naming::{is_mark_name, matching_name};
use crate::font_source::AnchorData;

/// Where a mark docks onto the map
#[derive(Clone, Debug, PartialEq)]
pub struct Docking {
    /// The base-side anchor name that was matched
    pub anchor: String,
    /// Rounded component offset
    pub offset: Vec2,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct VirtualAnchorMap {
    entries: Vec<(String, Point)>,
}

/// Anchors sorted by name, which keeps docking order deterministic
fn sorted(anchors: &[AnchorData]) -> Vec<&AnchorData> {
    let mut sorted: Vec<&AnchorData> = anchors.iter().filter(|a| !a.name.is_empty()).collect();
    sorted.sort_by(|a, b| a.name.cmp(&b.name));
    sorted
}

impl VirtualAnchorMap {
    /// Seed from the first component: every base-side anchor at its own
    /// position
    pub fn seeded(anchors: &[AnchorData]) -> Self {
        let mut map = Self::default();
        for anchor in sorted(anchors) {
            if !is_mark_name(&anchor.name) {
                map.insert(&anchor.name, anchor.position);
            }
        }
        map
    }

    fn insert(&mut self, name: &str, position: Point) {
        self.entries.retain(|(n, _)| n != name);
        self.entries.push((name.to_string(), position));
    }

    pub fn get(&self, name: &str) -> Option<Point> {
        self.entries
            .iter()
            .rev()
            .find(|(n, _)| n == name)
            .map(|(_, p)| *p)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    /// Find where a component with these anchors docks.
    ///
    /// Mark anchors are tried in name order; the first one whose base-side
    /// counterpart is in the map decides the offset.
    pub fn dock(&self, component_anchors: &[AnchorData]) -> Option<Docking> {
        sorted(component_anchors)
            .into_iter()
            .filter(|a| is_mark_name(&a.name))
            .find_map(|mark| {
                let base_name = matching_name(&mark.name).ok()?;
                let base = self.get(&base_name)?;
                Some(Docking {
                    anchor: base_name,
                    offset: (base - mark.position).round(),
                })
            })
    }

    /// The map after a component docked: the used anchor is consumed and
    /// the component's own base-side anchors are added, shifted by its
    /// offset. Anchors are taken in reverse name order up to the first mark
    /// anchor.
    pub fn after_docking(mut self, docking: &Docking, component_anchors: &[AnchorData]) -> Self {
        self.entries.retain(|(n, _)| *n != docking.anchor);
        for anchor in sorted(component_anchors).into_iter().rev() {
            if is_mark_name(&anchor.name) {
                break;
            }
            self.insert(&anchor.name, (anchor.position + docking.offset).round());
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn anchors(list: &[(&str, f64, f64)]) -> Vec<AnchorData> {
        list.iter()
            .map(|(n, x, y)| AnchorData::new(*n, *x, *y))
            .collect()
    }

    #[test]
    fn test_seed_skips_mark_anchors() {
        let map = VirtualAnchorMap::seeded(&anchors(&[
            ("top", 100.0, 500.0),
            ("_bottom", 0.0, 0.0),
            ("bottom", 100.0, 0.0),
        ]));
        assert_eq!(map.names().collect::<Vec<_>>(), vec!["bottom", "top"]);
    }

    #[test]
    fn test_dock_computes_offset() {
        let map = VirtualAnchorMap::seeded(&anchors(&[("top", 100.0, 500.0)]));
        let docking = map.dock(&anchors(&[("_top", 50.0, 50.0)])).unwrap();
        assert_eq!(docking.anchor, "top");
        assert_eq!(docking.offset, Vec2::new(50.0, 450.0));
    }

    #[test]
    fn test_dock_rounds_offset() {
        let map = VirtualAnchorMap::seeded(&anchors(&[("top", 100.4, 500.6)]));
        let docking = map.dock(&anchors(&[("_top", 0.0, 0.0)])).unwrap();
        assert_eq!(docking.offset, Vec2::new(100.0, 501.0));
    }

    #[test]
    fn test_dock_without_match() {
        let map = VirtualAnchorMap::seeded(&anchors(&[("top", 100.0, 500.0)]));
        assert_eq!(map.dock(&anchors(&[("_bottom", 0.0, 0.0)])), None);
        // Base-side anchors on the component never dock
        assert_eq!(map.dock(&anchors(&[("top", 0.0, 0.0)])), None);
    }

    #[test]
    fn test_after_docking_replaces_used_anchor() {
        let map = VirtualAnchorMap::seeded(&anchors(&[
            ("top", 100.0, 500.0),
            ("bottom", 100.0, 0.0),
        ]));
        let mark = anchors(&[("_top", 50.0, 50.0), ("top", 50.0, 250.0)]);
        let docking = map.dock(&mark).unwrap();
        let map = map.after_docking(&docking, &mark);
        assert_eq!(map.get("top"), Some(Point::new(100.0, 700.0)));
        assert_eq!(map.get("bottom"), Some(Point::new(100.0, 0.0)));
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_after_docking_stops_at_first_mark_anchor() {
        let map = VirtualAnchorMap::seeded(&anchors(&[("top", 0.0, 500.0)]));
        // Reverse name order: top, _top (stop), Zed never reached
        let mark = anchors(&[("_top", 0.0, 0.0), ("top", 0.0, 200.0), ("Zed", 5.0, 5.0)]);
        let docking = map.dock(&mark).unwrap();
        let map = map.after_docking(&docking, &mark);
        assert_eq!(map.names().collect::<Vec<_>>(), vec!["top"]);
        assert_eq!(map.get("top"), Some(Point::new(0.0, 700.0)));
    }

    #[test]
    fn test_used_anchor_is_consumed() {
        let map = VirtualAnchorMap::seeded(&anchors(&[("top", 0.0, 500.0)]));
        let mark = anchors(&[("_top", 0.0, 0.0)]);
        let docking = map.dock(&mark).unwrap();
        let map = map.after_docking(&docking, &mark);
        assert!(map.is_empty());
        assert_eq!(map.dock(&mark), None);
    }
}
