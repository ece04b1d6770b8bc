//! Anchor and glyph naming conventions
//!
//! A leading underscore marks the attachment point on a mark (`_top`); the
//! same name without it is where that mark docks on a base (`top`).

use crate::core::errors::AnchorNameError;

pub const MARK_PREFIX: char = '_';

/// Glyph names whose dot is part of the name, not a suffix separator
const RESERVED_NAMES: [&str; 2] = [".notdef", ".null"];

pub fn is_mark_name(name: &str) -> bool {
    name.starts_with(MARK_PREFIX)
}

/// Return the opposite-side anchor name: `top` <-> `_top`
///
/// A bare `_` and names with a doubled prefix are rejected, so that
/// toggling twice always gives the original name back.
pub fn matching_name(name: &str) -> Result<String, AnchorNameError> {
    if name.is_empty() {
        return Err(AnchorNameError::Empty);
    }
    if name == "_" || name.starts_with("__") {
        return Err(AnchorNameError::NoMatchingName(name.to_string()));
    }
    Ok(match name.strip_prefix(MARK_PREFIX) {
        Some(base) => base.to_string(),
        None => format!("{MARK_PREFIX}{name}"),
    })
}

/// Glyph name with its suffix removed: `a.sc` -> `a`
pub fn base_name(glyph_name: &str) -> &str {
    if RESERVED_NAMES.contains(&glyph_name) {
        return glyph_name;
    }
    match glyph_name.split_once('.') {
        Some((base, _)) => base,
        None => glyph_name,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matching_name_toggles_prefix() {
        assert_eq!(matching_name("top").unwrap(), "_top");
        assert_eq!(matching_name("_top").unwrap(), "top");
    }

    #[test]
    fn test_degenerate_names_have_no_match() {
        for name in ["_", "__double", "___top"] {
            assert_eq!(
                matching_name(name),
                Err(AnchorNameError::NoMatchingName(name.to_string()))
            );
        }
    }

    #[test]
    fn test_matching_name_is_an_involution() {
        for name in ["top", "_top", "bottomLeft", "_ogonek_1", "ogonek_1", "x", "_x"] {
            let there = matching_name(name).unwrap();
            assert_eq!(matching_name(&there).unwrap(), name);
            assert_ne!(is_mark_name(&there), is_mark_name(name));
        }
    }

    #[test]
    fn test_empty_name_rejected() {
        assert_eq!(matching_name(""), Err(AnchorNameError::Empty));
    }

    #[test]
    fn test_base_name() {
        assert_eq!(base_name("a"), "a");
        assert_eq!(base_name("a.sc"), "a");
        assert_eq!(base_name("f_f_i.liga.alt"), "f_f_i");
        assert_eq!(base_name(".notdef"), ".notdef");
        assert_eq!(base_name(".null"), ".null");
    }
}
