//! Path manipulation utilities

use crate::error::CheckoutError;
use crate::system::System;
use anyhow::Result;
use std::path::{Component, Path, PathBuf};

/// Normalize a path by resolving `.` and `..` components
#[must_use]
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut components = Vec::new();

    for component in path.components() {
        match component {
            Component::CurDir => {
                // Skip '.' components
            }
            Component::ParentDir => match components.last() {
                Some(Component::Normal(_)) => {
                    components.pop();
                }
                // `/..` is `/`
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => components.push(component),
            },
            _ => {
                components.push(component);
            }
        }
    }

    components.iter().collect()
}

/// Derive the project folder name from a repository URL
///
/// Takes the last path segment (`/`, `\` and the `:` of scp-like URLs all
/// separate segments, trailing separators are ignored) and cuts it at the
/// first `.`. Returns `None` when nothing is left.
#[must_use]
pub fn project_name(repository: &str) -> Option<&str> {
    let trimmed = repository.trim().trim_end_matches(['/', '\\']);
    let segment = trimmed.rsplit(['/', '\\', ':']).next()?;
    let name = segment.split('.').next()?;

    if name.is_empty() { None } else { Some(name) }
}

/// Compute the project folder for a repository under a parent directory
///
/// # Errors
///
/// Returns a configuration error if no project name can be derived from the URL
pub fn project_dir(parent: &Path, repository: &str) -> Result<PathBuf> {
    let name = project_name(repository).ok_or_else(|| {
        CheckoutError::configuration(format!(
            "Cannot derive a project folder name from repository URL '{repository}'"
        ))
    })?;
    Ok(parent.join(name))
}

/// Resolve a user-supplied directory to an absolute, normalized path
///
/// A leading `~` is replaced by the home directory and relative paths are
/// taken relative to the current directory.
///
/// # Errors
///
/// Returns an error if:
/// - `~` is used but the home directory is unknown
/// - The current directory cannot be determined
pub fn resolve_dir(system: &dyn System, raw: &Path) -> Result<PathBuf> {
    let expanded = match raw.strip_prefix("~") {
        Ok(rest) => system
            .home_dir()
            .ok_or_else(|| {
                CheckoutError::configuration(
                    "Cannot determine home directory for ~ expansion".to_owned(),
                )
            })?
            .join(rest),
        Err(_) => raw.to_path_buf(),
    };

    let absolute = if expanded.is_absolute() {
        expanded
    } else {
        system
            .current_dir()
            .map_err(|e| CheckoutError::configuration(format!("Cannot get current directory: {e}")))?
            .join(expanded)
    };

    Ok(normalize_path(&absolute))
}
