//! The four inputs of a checkout and how they are gathered

use crate::error::CheckoutError;
use crate::git::parse_sparse_paths;
use crate::messages::{Locale, PromptSpec};
use crate::prompt::Prompter;
use crate::system::System;
use crate::utils::resolve_dir;
use anyhow::Result;
use core::fmt;
use std::path::PathBuf;
use tracing::debug;

/// One of the inputs of a checkout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestField {
    TargetDir,
    Repository,
    Branch,
    Paths,
}

impl fmt::Display for RequestField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match *self {
            Self::TargetDir => "target directory",
            Self::Repository => "repository",
            Self::Branch => "branch",
            Self::Paths => "paths",
        };
        f.write_str(name)
    }
}

/// User input for one checkout, any part of which may be missing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckoutRequest {
    pub target_parent_dir: Option<PathBuf>,
    pub repository: Option<String>,
    pub branch: Option<String>,
    /// Comma-separated directories, as typed
    pub raw_paths: Option<String>,
}

/// A request with every input present
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRequest {
    pub target_parent_dir: PathBuf,
    pub repository: String,
    pub branch: String,
    /// Trimmed, non-empty entries in input order
    pub paths: Vec<String>,
}

impl CheckoutRequest {
    /// Fill in the request from `preset`, prompting for what it lacks
    ///
    /// Fields are handled in the order folder, repository, branch, paths.
    /// The first field that ends up missing stops gathering, so no prompt is
    /// shown after a cancelled one. Folders are resolved to absolute paths.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - A prompt cannot be shown or read
    /// - The folder cannot be resolved
    pub fn gather(
        preset: &Self,
        prompter: &dyn Prompter,
        system: &dyn System,
        locale: Locale,
        interactive: bool,
    ) -> Result<Self> {
        let mut request = Self::default();

        let folder = match preset
            .target_parent_dir
            .clone()
            .filter(|dir| !dir.as_os_str().is_empty())
        {
            Some(dir) => Some(dir),
            None if interactive => prompter
                .select_folder(&PromptSpec::new(RequestField::TargetDir, locale))
                .map_err(|e| CheckoutError::prompt(e.to_string()))?,
            None => None,
        };
        let Some(folder) = folder else {
            debug!("No target directory given");
            return Ok(request);
        };
        request.target_parent_dir = Some(resolve_dir(system, &folder)?);

        request.repository = text_input(
            preset.repository.as_deref(),
            RequestField::Repository,
            prompter,
            locale,
            interactive,
        )?;
        if request.repository.is_none() {
            return Ok(request);
        }

        request.branch = text_input(
            preset.branch.as_deref(),
            RequestField::Branch,
            prompter,
            locale,
            interactive,
        )?;
        if request.branch.is_none() {
            return Ok(request);
        }

        request.raw_paths = text_input(
            preset.raw_paths.as_deref(),
            RequestField::Paths,
            prompter,
            locale,
            interactive,
        )?;

        Ok(request)
    }

    /// Check that every input is present
    ///
    /// Blank strings and path lists without a single entry count as missing.
    ///
    /// # Errors
    ///
    /// Returns the first missing field
    pub fn resolve(&self) -> Result<ResolvedRequest, RequestField> {
        let target_parent_dir = self
            .target_parent_dir
            .clone()
            .filter(|dir| !dir.as_os_str().is_empty())
            .ok_or(RequestField::TargetDir)?;
        let repository = present(self.repository.as_deref()).ok_or(RequestField::Repository)?;
        let branch = present(self.branch.as_deref()).ok_or(RequestField::Branch)?;
        let paths = self
            .raw_paths
            .as_deref()
            .map(parse_sparse_paths)
            .filter(|paths| !paths.is_empty())
            .ok_or(RequestField::Paths)?;

        Ok(ResolvedRequest {
            target_parent_dir,
            repository,
            branch,
            paths,
        })
    }
}

fn present(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_owned)
}

fn text_input(
    preset: Option<&str>,
    field: RequestField,
    prompter: &dyn Prompter,
    locale: Locale,
    interactive: bool,
) -> Result<Option<String>> {
    if let Some(value) = present(preset) {
        return Ok(Some(value));
    }
    if !interactive {
        debug!("No {field} given and prompting is disabled");
        return Ok(None);
    }

    let answer = prompter
        .input(&PromptSpec::new(field, locale))
        .map_err(|e| CheckoutError::prompt(e.to_string()))?;
    if answer.is_none() {
        debug!("No {field} entered");
    }
    Ok(present(answer.as_deref()))
}
