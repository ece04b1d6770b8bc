//! User configuration file handling
//!
//! Manages settings from ~/.config/anchor-tool/settings.json

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::anchors::HideLists;
use crate::recompose::RecomposeRules;

/// User configuration from ~/.config/anchor-tool/settings.json
///
/// These settings override built-in defaults but are overridden by CLI arguments
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigFile {
    /// Composites whose advance is the sum of their components
    pub ligature_names: Option<Vec<String>>,
    /// Composites whose components are placed side by side
    pub side_by_side_names: Option<Vec<String>>,
    /// Anchors and glyphs hidden from the overlay preview
    pub hide_lists: HideLists,
}

impl ConfigFile {
    /// Get the path to the anchor-tool config directory
    pub fn config_dir() -> PathBuf {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")));
        config_dir.join("anchor-tool")
    }

    /// Get the path to the user config file
    pub fn config_path() -> PathBuf {
        Self::config_dir().join("settings.json")
    }

    /// Load configuration from the user config file
    pub fn load() -> Option<Self> {
        let path = Self::config_path();
        if !path.exists() {
            return None;
        }
        Self::load_from(&path)
    }

    /// Load configuration from a specific file, warning on failure
    pub fn load_from(path: &Path) -> Option<Self> {
        match fs::read_to_string(path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(config) => {
                    debug!("Loaded user settings from {:?}", path);
                    Some(config)
                }
                Err(e) => {
                    warn!("Failed to parse {:?}: {}", path, e);
                    None
                }
            },
            Err(e) => {
                warn!("Failed to read {:?}: {}", path, e);
                None
            }
        }
    }

    /// Save configuration to the user config file
    pub fn save(&self) -> anyhow::Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        // Create parent directory if it doesn't exist
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = serde_json::to_string_pretty(self)?;
        fs::write(path, contents)?;

        debug!("Saved settings to {:?}", path);
        Ok(())
    }

    /// Name lists for the repositioner, with built-in defaults for anything
    /// not configured
    pub fn recompose_rules(&self) -> RecomposeRules {
        let mut rules = RecomposeRules::default();
        if let Some(names) = &self.ligature_names {
            rules.ligature_names = names.iter().cloned().collect();
        }
        if let Some(names) = &self.side_by_side_names {
            rules.side_by_side_names = names.iter().cloned().collect();
        }
        rules
    }

    /// Initialize the user configuration directory
    ///
    /// This creates:
    /// 1. The ~/.config/anchor-tool directory structure
    /// 2. A settings.json file with the default name lists spelled out
    /// 3. A logs/ directory for application logs
    pub fn initialize_config_directory() -> anyhow::Result<()> {
        let config_dir = Self::config_dir();

        fs::create_dir_all(&config_dir)?;
        println!("Created config directory: {:?}", config_dir);

        let logs_dir = config_dir.join("logs");
        fs::create_dir_all(&logs_dir)?;
        println!("Created logs directory: {:?}", logs_dir);

        let settings_path = Self::config_path();
        if !settings_path.exists() {
            let rules = RecomposeRules::default();
            let example = ConfigFile {
                ligature_names: Some(rules.ligature_names.into_iter().collect()),
                side_by_side_names: Some(rules.side_by_side_names.into_iter().collect()),
                ..Default::default()
            };
            example.save()?;
            println!("Created settings file: {:?}", settings_path);
        } else {
            println!("Settings file already exists: {:?}", settings_path);
        }

        println!("\nConfiguration initialized successfully!");
        println!("You can now:");
        println!("  - Edit settings at: {:?}", settings_path);
        println!("  - View application logs in: {:?}", logs_dir);

        Ok(())
    }
}
