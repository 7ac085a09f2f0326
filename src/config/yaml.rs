//! YAML configuration loading and parsing

use crate::config::Config;
use crate::error::CheckoutError;
use crate::system::System;
use anyhow::{Context as _, Result};
use std::path::Path;

/// Load and parse YAML configuration from file
///
/// # Errors
///
/// Returns an error if:
/// - The file does not exist or cannot be read
/// - The file is not valid YAML
/// - The document does not match the configuration schema
pub fn load_config(system: &dyn System, path: &str) -> Result<Config> {
    let path_obj = Path::new(path);

    if !system.exists(path_obj)? {
        return Err(CheckoutError::configuration(format!(
            "Configuration file not found: {path}"
        ))
        .into());
    }

    let content = system
        .read_to_string(path_obj)
        .with_context(|| format!("Failed to read configuration file: {path}"))?;

    parse_config(&content).with_context(|| format!("Invalid configuration file: {path}"))
}

/// Parse and validate a YAML configuration document
///
/// An empty document is an empty configuration.
///
/// # Errors
///
/// Returns a configuration error if the document is not valid YAML or does
/// not match the configuration schema
pub fn parse_config(content: &str) -> Result<Config> {
    let document: serde_yaml::Value = serde_yaml::from_str(content).map_err(|e| {
        CheckoutError::configuration(format!("Failed to parse YAML configuration: {e}"))
    })?;

    if document.is_null() {
        return Ok(Config::default());
    }

    let config_value = serde_json::to_value(&document)
        .context("Failed to convert configuration to JSON for validation")?;

    crate::config::schema::validate_against_schema(&config_value)
        .map_err(|e| CheckoutError::configuration(format!("{e:#}")))?;

    serde_json::from_value(config_value).map_err(|e| {
        CheckoutError::configuration(format!("Failed to read configuration values: {e}")).into()
    })
}
