//! Application runner logic
//!
//! Handles the different commands anchor-tool can run

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::anchors::{AnchorRegistry, VisibilityKind};
use crate::core::cli::{AnchorsArgs, CliArgs, Command, RecomposeArgs};
use crate::core::config_file::ConfigFile;
use crate::data::UfoSource;
use crate::kerning::KerningIndex;
use crate::logging;
use crate::recompose::{CompositeRepositioner, RecomposeOutcome};

/// Run anchor-tool with the given CLI arguments.
pub fn run_app(cli_args: CliArgs) -> Result<()> {
    // Handle --new-config flag specially
    if cli_args.new_config {
        return ConfigFile::initialize_config_directory()
            .context("Failed to initialize config directory");
    }

    cli_args.validate().map_err(anyhow::Error::msg)?;
    let _log_guard = logging::init(cli_args.verbose, cli_args.log_file)?;

    let config = match &cli_args.config {
        Some(path) => ConfigFile::load_from(path)
            .with_context(|| format!("Failed to load settings from {}", path.display()))?,
        None => ConfigFile::load().unwrap_or_default(),
    };

    match &cli_args.command {
        Some(Command::Recompose(args)) => run_recompose(args, &config),
        Some(Command::Anchors(args)) => run_anchors(args, &config),
        None => Ok(()),
    }
}

fn run_recompose(args: &RecomposeArgs, config: &ConfigFile) -> Result<()> {
    let mut source = UfoSource::load(&args.font_source)?;
    let kerning = KerningIndex::from_font(&source.data);
    let rules = config.recompose_rules();

    let glyphs = if args.all || args.glyphs.is_empty() {
        source.data.composite_names()
    } else {
        args.glyphs.clone()
    };
    info!(
        "Repositioning {} glyphs in {}",
        glyphs.len(),
        source.data.info.get_display_name()
    );

    let report =
        CompositeRepositioner::new(&kerning, &rules).reposition_all(&mut source.data, &glyphs);

    for (name, result) in &report.results {
        match result {
            Ok(RecomposeOutcome::Modified {
                offsets_changed,
                width_changed,
            }) => {
                let width = if *width_changed { ", width" } else { "" };
                println!("{name}: {offsets_changed} offsets{width} updated");
            }
            Ok(_) => {}
            Err(e) => println!("{name}: {e}"),
        }
    }
    println!(
        "{} of {} glyphs modified, {} failed",
        report.modified_count(),
        report.results.len(),
        report.error_count()
    );

    if args.dry_run {
        info!("Dry run, nothing saved");
        return Ok(());
    }
    if report.modified_count() == 0 {
        return Ok(());
    }

    let output = args.output.as_ref().unwrap_or(&args.font_source);
    let written = source.save(output)?;
    println!("Saved {written} glyphs to {}", output.display());
    Ok(())
}

fn run_anchors(args: &AnchorsArgs, config: &ConfigFile) -> Result<()> {
    let source = UfoSource::load(&args.font_source)?;
    let registry =
        AnchorRegistry::from_font(&source.data).with_hide_lists(config.hide_lists.clone());

    match &args.anchor {
        Some(anchor) => {
            let glyphs = if args.same_name {
                registry.glyphs_with_anchor(anchor).to_vec()
            } else {
                registry.anchored_glyphs_for(&[anchor.as_str()], true)
            };
            // Glyphs carrying a mark-side name are bases; others are marks
            let kind = if crate::anchors::is_mark_name(anchor) {
                VisibilityKind::Glyph
            } else {
                VisibilityKind::Mark
            };
            for glyph in glyphs {
                let shown = registry.visibility(kind, &glyph, false);
                println!("{} {glyph}", if shown { "[x]" } else { "[ ]" });
            }
        }
        None => {
            for name in registry.anchor_names() {
                let shown = registry.visibility(VisibilityKind::Anchor, &name, false);
                let count = registry.glyphs_with_anchor(&name).len();
                println!("{} {name} ({count} glyphs)", if shown { "[x]" } else { "[ ]" });
            }
        }
    }

    if !registry.warnings().is_empty() {
        warn!("{} anchor problems found", registry.warnings().len());
    }
    Ok(())
}
