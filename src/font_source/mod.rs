//! Font source data structures
//!
//! This module contains everything related to the font being edited,
//! as the tools see it: glyphs, anchors, components, kerning tables and
//! the host interface edits go through.

pub mod data;
pub mod host;
pub mod metrics;

// Explicit re-exports for public API
pub use data::{AnchorData, ComponentData, FontData, GlyphData};
pub use host::FontHost;
pub use metrics::{FontInfo, MetricLine};
