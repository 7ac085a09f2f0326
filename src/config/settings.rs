//! Merging command-line arguments with configuration file defaults

use crate::cli::Args;
use crate::config::Config;
use crate::messages::Locale;
use crate::operations::CheckoutRequest;
use std::path::PathBuf;

/// Everything a run needs, after applying precedence
///
/// Command-line flags (and their environment variables) win over the
/// configuration file, which wins over built-in defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Inputs known before prompting
    pub preset: CheckoutRequest,
    pub git_binary: String,
    pub locale: Locale,
    /// Prompt for inputs missing from `preset`
    pub interactive: bool,
    pub dry_run: bool,
}

impl Settings {
    #[must_use]
    pub fn resolve(args: &Args, config: Option<Config>) -> Self {
        let config = config.unwrap_or_default();

        let config_paths = if config.paths.is_empty() {
            None
        } else {
            Some(config.paths.join(","))
        };

        let preset = CheckoutRequest {
            target_parent_dir: args
                .target_dir
                .clone()
                .or(config.target_dir)
                .map(PathBuf::from),
            repository: args.repository.clone().or(config.repository),
            branch: args.branch.clone().or(config.branch),
            raw_paths: args.paths.clone().or(config_paths),
        };

        Self {
            preset,
            git_binary: args
                .git_binary
                .clone()
                .or(config.git)
                .unwrap_or_else(|| "git".to_owned()),
            locale: args.locale.or(config.locale).unwrap_or_default(),
            interactive: !args.no_prompt && config.prompt.unwrap_or(true),
            dry_run: args.dry_run,
        }
    }
}
