//! Anchor tool
pub mod anchors;
pub mod core;
pub mod data;
pub mod editing;
pub mod font_source;
pub mod kerning;
pub mod logging;
pub mod recompose;
