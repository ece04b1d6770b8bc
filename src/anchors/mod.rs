//! Anchors: naming, the font-wide registry and editing operations

pub mod align;
pub mod naming;
pub mod registry;

pub use align::{
    add_anchor, align_anchors, guess_anchor_name, move_anchors_to_metric, nudge_anchors,
    reference_point, Axis, NudgeModifier,
};
pub use naming::{base_name, is_mark_name, matching_name};
pub use registry::{AnchorRegistry, HideLists, VisibilityKind};
