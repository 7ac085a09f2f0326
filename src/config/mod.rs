//! Configuration management module
//!
//! Handles the optional YAML defaults file, its JSON schema validation, and
//! merging it with command-line arguments

pub mod schema;
pub mod settings;
pub mod yaml;

use crate::messages::Locale;
use crate::system::System;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::debug;

pub use settings::Settings;

/// File name looked up in the current directory
pub const LOCAL_CONFIG_FILE: &str = "git-sparse-check.yaml";

/// Directory under the platform configuration directory
pub const CONFIG_DIR_NAME: &str = "git-sparse-check";

/// Defaults read from a configuration file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Parent directory the project folder is created in
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_dir: Option<String>,

    /// Git remote URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repository: Option<String>,

    /// Branch to pull
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,

    /// Directories to check out
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub paths: Vec<String>,

    /// Git executable
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub git: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locale: Option<Locale>,

    /// Whether to prompt for missing inputs
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt: Option<bool>,
}

impl Config {
    /// Load configuration from file
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing, unreadable, or invalid
    pub fn load_from_file(system: &dyn System, path: &str) -> anyhow::Result<Self> {
        yaml::load_config(system, path)
    }

    /// Find and load the configuration for this run
    ///
    /// An explicit path must exist. Without one, `./git-sparse-check.yaml` and
    /// then `<config dir>/git-sparse-check/config.yaml` are tried, and having
    /// neither is fine.
    ///
    /// # Errors
    ///
    /// Returns an error if the chosen file cannot be loaded
    pub fn discover(system: &dyn System, explicit: Option<&str>) -> anyhow::Result<Option<Self>> {
        if let Some(path) = explicit {
            return Self::load_from_file(system, path).map(Some);
        }

        for candidate in Self::candidates(system) {
            if system.is_file(&candidate)? {
                debug!("Using configuration file {}", candidate.display());
                return Self::load_from_file(system, &candidate.to_string_lossy()).map(Some);
            }
        }

        debug!("No configuration file found");
        Ok(None)
    }

    fn candidates(system: &dyn System) -> Vec<PathBuf> {
        let mut candidates = Vec::new();
        if let Ok(cwd) = system.current_dir() {
            candidates.push(cwd.join(LOCAL_CONFIG_FILE));
        }
        if let Some(config_dir) = system.config_dir() {
            candidates.push(config_dir.join(CONFIG_DIR_NAME).join("config.yaml"));
        }
        candidates
    }
}
