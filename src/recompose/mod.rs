//! Composite repositioning
//!
//! Recomputes component offsets and the advance width of composite glyphs.
//! Mark stacks are docked through anchor pairs (`top` on the base, `_top` on
//! the mark); ligature-style composites are set side by side with kerning
//! between neighbouring components.
//!
//! Each glyph is handled in two steps. [`plan_composite`] computes the
//! target state from a read-only view of the font. [`CompositeRepositioner`]
//! then writes only the values that differ, inside a single undo-scoped
//! edit that is opened on the first actual change. A glyph that is already
//! correct is never touched, so running twice in a row is a no-op the
//! second time.

pub mod anchor_map;
pub mod mode;
pub mod plan;

pub use anchor_map::{Docking, VirtualAnchorMap};
pub use mode::{CompositeMode, RecomposeRules};
pub use plan::{plan_composite, ComponentPlacement, CompositePlan};

use kurbo::Vec2;
use tracing::{debug, error, info, warn};

use crate::core::errors::{DataWarning, RecomposeError};
use crate::font_source::FontHost;
use crate::kerning::KerningIndex;

/// What happened to one glyph
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RecomposeOutcome {
    /// Everything was already in place; no edit was opened
    Unchanged,
    /// The glyph has no components
    NoComponents,
    Modified {
        offsets_changed: usize,
        width_changed: bool,
    },
}

impl RecomposeOutcome {
    pub fn is_modified(&self) -> bool {
        matches!(self, RecomposeOutcome::Modified { .. })
    }
}

/// Result of repositioning a list of glyphs
#[derive(Debug, Default)]
pub struct BatchReport {
    pub results: Vec<(String, Result<RecomposeOutcome, RecomposeError>)>,
}

impl BatchReport {
    pub fn modified(&self) -> impl Iterator<Item = &str> {
        self.results
            .iter()
            .filter(|(_, r)| matches!(r, Ok(o) if o.is_modified()))
            .map(|(name, _)| name.as_str())
    }

    pub fn modified_count(&self) -> usize {
        self.modified().count()
    }

    pub fn errors(&self) -> impl Iterator<Item = (&str, &RecomposeError)> {
        self.results
            .iter()
            .filter_map(|(name, r)| r.as_ref().err().map(|e| (name.as_str(), e)))
    }

    pub fn error_count(&self) -> usize {
        self.errors().count()
    }
}

/// Opens the undo scope on the first write and closes it exactly once
struct LazyEdit<'h, H: FontHost> {
    host: &'h mut H,
    glyph: String,
    title: String,
    open: bool,
}

impl<'h, H: FontHost> LazyEdit<'h, H> {
    fn new(host: &'h mut H, glyph: &str) -> Self {
        Self {
            host,
            glyph: glyph.to_string(),
            title: format!("Reposition components in /{glyph}"),
            open: false,
        }
    }

    fn ensure_open(&mut self) -> Result<(), RecomposeError> {
        if !self.open {
            self.host.begin_edit(&self.glyph, &self.title)?;
            self.open = true;
        }
        Ok(())
    }

    fn finish(self) -> Result<bool, RecomposeError> {
        if self.open {
            self.host.commit_edit()?;
        }
        Ok(self.open)
    }

    fn abort(self) {
        if self.open {
            if let Err(e) = self.host.abort_edit() {
                error!("Failed to roll back /{}: {}", self.glyph, e);
            }
        }
    }
}

pub struct CompositeRepositioner<'a> {
    kerning: &'a KerningIndex,
    rules: &'a RecomposeRules,
}

impl<'a> CompositeRepositioner<'a> {
    pub fn new(kerning: &'a KerningIndex, rules: &'a RecomposeRules) -> Self {
        Self { kerning, rules }
    }

    pub fn plan<H: FontHost>(
        &self,
        host: &H,
        glyph: &str,
    ) -> Result<CompositePlan, RecomposeError> {
        plan_composite(host, glyph, self.kerning, self.rules)
    }

    /// Plan and apply one glyph
    pub fn reposition<H: FontHost>(
        &self,
        host: &mut H,
        glyph: &str,
    ) -> Result<RecomposeOutcome, RecomposeError> {
        info!("Repositioning components in '{}' ...", glyph);
        let plan = self.plan(host, glyph)?;
        if plan.placements.is_empty() {
            debug!("'{}' has no components", glyph);
            return Ok(RecomposeOutcome::NoComponents);
        }
        self.apply(host, &plan)
    }

    /// Write a plan into the font.
    ///
    /// The component list must still have the base glyphs the plan was made
    /// for. A mismatch aborts the glyph and restores anything already
    /// written.
    pub fn apply<H: FontHost>(
        &self,
        host: &mut H,
        plan: &CompositePlan,
    ) -> Result<RecomposeOutcome, RecomposeError> {
        let mut edit = LazyEdit::new(host, &plan.glyph);
        match Self::write_plan(&mut edit, plan) {
            Ok(outcome) => {
                let committed = edit.finish()?;
                debug_assert_eq!(committed, outcome.is_modified());
                if committed {
                    info!("... component positions were modified.");
                } else {
                    info!("... everything is fine.");
                }
                Ok(outcome)
            }
            Err(e) => {
                error!("{e}");
                edit.abort();
                Err(e)
            }
        }
    }

    fn write_plan<H: FontHost>(
        edit: &mut LazyEdit<'_, H>,
        plan: &CompositePlan,
    ) -> Result<RecomposeOutcome, RecomposeError> {
        let missing = || RecomposeError::MissingGlyph(plan.glyph.clone());
        let current = edit.host.glyph(&plan.glyph).ok_or_else(missing)?;
        if current.components.len() != plan.placements.len() {
            let detail = DataWarning::ComponentOrderMismatch {
                glyph: plan.glyph.clone(),
                index: current.components.len().min(plan.placements.len()),
                expected: format!("{} components", plan.placements.len()),
                found: format!("{} components", current.components.len()),
            };
            warn!("{detail}");
            return Err(RecomposeError::ComponentOrderMismatch {
                glyph: plan.glyph.clone(),
                detail,
            });
        }

        let mut offsets_changed = 0;
        for (i, placement) in plan.placements.iter().enumerate() {
            let current = edit.host.glyph(&plan.glyph).ok_or_else(missing)?;
            let component = &current.components[i];
            if component.base_glyph != placement.base_glyph {
                let detail = DataWarning::ComponentOrderMismatch {
                    glyph: plan.glyph.clone(),
                    index: i,
                    expected: placement.base_glyph.clone(),
                    found: component.base_glyph.clone(),
                };
                warn!("{detail}");
                return Err(RecomposeError::ComponentOrderMismatch {
                    glyph: plan.glyph.clone(),
                    detail,
                });
            }
            if component.offset == placement.offset {
                continue;
            }

            let from = component.offset;
            edit.ensure_open()?;
            let glyph = edit.host.glyph_mut(&plan.glyph).ok_or_else(missing)?;
            glyph.components[i].offset = placement.offset;
            offsets_changed += 1;
            debug!(
                "    Move component '{}': {} -> {}.",
                placement.base_glyph,
                format_offset(from),
                format_offset(placement.offset)
            );
        }

        let current_width = edit.host.glyph(&plan.glyph).ok_or_else(missing)?.width;
        let width_changed = current_width != plan.width;
        if width_changed {
            edit.ensure_open()?;
            edit.host.glyph_mut(&plan.glyph).ok_or_else(missing)?.width = plan.width;
            debug!("    Setting width: {} -> {}.", current_width, plan.width);
        }

        if offsets_changed == 0 && !width_changed {
            Ok(RecomposeOutcome::Unchanged)
        } else {
            Ok(RecomposeOutcome::Modified {
                offsets_changed,
                width_changed,
            })
        }
    }

    /// Reposition glyphs in the given order. A failing glyph is reported and
    /// skipped; it never leaves an edit open.
    pub fn reposition_all<H: FontHost>(&self, host: &mut H, glyphs: &[String]) -> BatchReport {
        let mut report = BatchReport::default();
        for name in glyphs {
            let result = self.reposition(host, name);
            if let Err(e) = &result {
                warn!("Skipping '{}': {}", name, e);
            }
            report.results.push((name.clone(), result));
        }
        info!(
            "Repositioned {} glyphs: {} modified, {} failed",
            report.results.len(),
            report.modified_count(),
            report.error_count()
        );
        report
    }
}

fn format_offset(offset: Vec2) -> String {
    format!("({}, {})", offset.x, offset.y)
}
