//! Command line interface for anchor-tool
//!
//! Handles parsing command line arguments and provides
//! validation for user inputs.

use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};

/// anchor-tool CLI arguments
///
/// Examples:
///   anchor-tool recompose MyFont.ufo                 # Fix every composite
///   anchor-tool recompose MyFont.ufo aacute f_f_i    # Fix selected glyphs
///   anchor-tool recompose MyFont.ufo --dry-run       # Report only
///   anchor-tool anchors MyFont.ufo                   # List anchor names
///   anchor-tool anchors MyFont.ufo --anchor top      # Marks that attach to `top`
///   anchor-tool --new-config                         # Write default settings
#[derive(Parser, Debug, Clone)]
#[clap(
    name = "anchor-tool",
    version,
    about = "Anchor and composite tools for UFO font sources",
    long_about = "Repositions components of composite glyphs using anchor pairs and kerning, and inspects the anchors of a UFO font source."
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Initialize user configuration directory with default settings
    #[clap(
        long = "new-config",
        help = "Initialize user config directory with default settings",
        long_help = "Initialize the ~/.config/anchor-tool directory with a settings.json file listing the default ligature names, so they can be customised."
    )]
    pub new_config: bool,

    /// Use a settings file other than ~/.config/anchor-tool/settings.json
    #[clap(long = "config", global = true)]
    pub config: Option<PathBuf>,

    /// Log debug output
    #[clap(long = "verbose", short = 'v', global = true)]
    pub verbose: bool,

    /// Write logs to ~/.config/anchor-tool/logs/ instead of the terminal
    #[clap(long = "log-file", global = true)]
    pub log_file: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Reposition components of composite glyphs
    Recompose(RecomposeArgs),
    /// List anchors and the glyphs that attach through them
    Anchors(AnchorsArgs),
}

#[derive(Args, Debug, Clone)]
pub struct RecomposeArgs {
    /// UFO source to process
    pub font_source: PathBuf,

    /// Glyphs to reposition. Defaults to every composite glyph.
    pub glyphs: Vec<String>,

    /// Process every composite glyph even if names are given
    #[clap(long = "all")]
    pub all: bool,

    /// Report what would change without saving
    #[clap(long = "dry-run", short = 'n')]
    pub dry_run: bool,

    /// Save to a different UFO instead of overwriting the source
    #[clap(long = "output", short = 'o')]
    pub output: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct AnchorsArgs {
    /// UFO source to inspect
    pub font_source: PathBuf,

    /// List glyphs carrying the matching anchor instead of anchor names
    #[clap(long = "anchor", short = 'a')]
    pub anchor: Option<String>,

    /// With --anchor, list glyphs carrying this exact name
    #[clap(long = "same-name")]
    pub same_name: bool,
}

impl CliArgs {
    /// Validate the CLI arguments after parsing
    ///
    /// This ensures that all paths exist and are valid before any work
    /// starts, providing clear error messages for common mistakes.
    pub fn validate(&self) -> Result<(), String> {
        if let Some(path) = &self.config {
            if !path.is_file() {
                return Err(format!(
                    "Settings file does not exist: {}\nMake sure the path is correct.",
                    path.display()
                ));
            }
        }

        match &self.command {
            Some(Command::Recompose(args)) => {
                validate_font_source(&args.font_source)?;
                if let Some(output) = &args.output {
                    if args.dry_run {
                        return Err("--output has no effect together with --dry-run".to_string());
                    }
                    if output.is_file() {
                        return Err(format!(
                            "Output path is a file: {}\nExpected a .ufo directory path.",
                            output.display()
                        ));
                    }
                }
                Ok(())
            }
            Some(Command::Anchors(args)) => {
                validate_font_source(&args.font_source)?;
                if args.anchor.as_deref() == Some("") {
                    return Err("Anchor name must not be empty".to_string());
                }
                Ok(())
            }
            None if self.new_config => Ok(()),
            None => Err("No command given".to_string()),
        }
    }
}

fn validate_font_source(path: &Path) -> Result<(), String> {
    if !path.exists() {
        return Err(format!(
            "Font source does not exist: {}\nMake sure the path is correct and the file exists.",
            path.display()
        ));
    }
    if !path.is_dir() || !path.join("metainfo.plist").exists() {
        return Err(format!(
            "Not a valid UFO directory: missing metainfo.plist in {}\nMake sure this is a valid UFO directory.",
            path.display()
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_recompose() {
        let args = CliArgs::parse_from([
            "anchor-tool",
            "recompose",
            "Font.ufo",
            "aacute",
            "f_f_i",
            "--dry-run",
            "-v",
        ]);
        assert!(args.verbose);
        let Some(Command::Recompose(recompose)) = args.command else {
            panic!("expected recompose command");
        };
        assert_eq!(recompose.font_source, PathBuf::from("Font.ufo"));
        assert_eq!(recompose.glyphs, vec!["aacute", "f_f_i"]);
        assert!(recompose.dry_run);
        assert!(!recompose.all);
    }

    #[test]
    fn test_missing_font_is_rejected() {
        let args = CliArgs::parse_from(["anchor-tool", "anchors", "/nonexistent/Font.ufo"]);
        let err = args.validate().unwrap_err();
        assert!(err.contains("does not exist"));
    }

    #[test]
    fn test_directory_without_metainfo_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().to_string_lossy().to_string();
        let args = CliArgs::parse_from(["anchor-tool", "recompose", path.as_str()]);
        assert!(args.validate().unwrap_err().contains("metainfo.plist"));
    }

    #[test]
    fn test_no_command() {
        assert!(CliArgs::parse_from(["anchor-tool"]).validate().is_err());
        assert!(CliArgs::parse_from(["anchor-tool", "--new-config"]).validate().is_ok());
    }
}
