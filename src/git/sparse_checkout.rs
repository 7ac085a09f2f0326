//! The sparse-checkout control file

use crate::system::System;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Result of trying to write the control file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlFile {
    /// The file did not exist and was written
    Written,
    /// The file already existed and was left untouched
    Kept,
}

/// Split a comma-separated path list into trimmed entries
///
/// Order and duplicates are preserved. Entries that are empty after trimming
/// are dropped, since `/` alone would select the whole tree.
#[must_use]
pub fn parse_sparse_paths(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Render the control file content, one `/<path>` line per entry
#[must_use]
pub fn render_control_file(paths: &[String]) -> String {
    paths.iter().map(|path| format!("/{path}\n")).collect()
}

/// Location of the control file inside a project folder
#[must_use]
pub fn control_file_path(project_dir: &Path) -> PathBuf {
    project_dir.join(".git").join("info").join("sparse-checkout")
}

/// Write the control file unless one is already present
///
/// The `.git/info` directory is created when git's template did not provide it.
///
/// # Errors
///
/// Returns an error if:
/// - The existence of the file cannot be determined
/// - The `.git/info` directory cannot be created
/// - The file cannot be written
pub fn write_control_file(
    system: &dyn System,
    project_dir: &Path,
    paths: &[String],
) -> io::Result<ControlFile> {
    let path = control_file_path(project_dir);

    if system.exists(&path)? {
        debug!("Keeping existing {}", path.display());
        return Ok(ControlFile::Kept);
    }

    if let Some(info_dir) = path.parent() {
        system.create_dir_all(info_dir)?;
    }

    system.write(&path, render_control_file(paths).as_bytes())?;
    debug!("Wrote {} with {} entries", path.display(), paths.len());

    Ok(ControlFile::Written)
}
