//! Running the git binary and inspecting repository state

use crate::git::{GitInvocation, REMOTE_NAME};
use anyhow::{Context as _, Result};
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tracing::debug;

/// What is already in place in a project folder
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepoState {
    /// The folder is the root of a git repository
    pub is_repository: bool,
    /// URL of the `origin` remote, if configured
    pub origin_url: Option<String>,
    /// `core.sparseCheckout` is `true` in the repository's local config
    pub sparse_checkout: bool,
}

/// Capability to run git and look at the repository it produces
///
/// # Implementations
/// - `CliGit`: spawns the git binary and inspects with `git2`
/// - `MockGit`: records invocations and simulates their effects
pub trait GitTool: Send + Sync {
    /// Run an invocation in `cwd` with inherited standard streams and wait for it
    ///
    /// Returns the exit code, or `None` when the process was terminated by a
    /// signal. An `Err` means the process could not be spawned at all.
    fn run(&self, invocation: &GitInvocation, cwd: &Path) -> io::Result<Option<i32>>;

    /// Inspect the repository rooted at `dir`
    ///
    /// # Errors
    ///
    /// Returns an error if an existing repository cannot be read
    fn inspect(&self, dir: &Path) -> Result<RepoState>;
}

/// Production implementation of `GitTool` backed by the git binary
#[derive(Debug, Clone)]
pub struct CliGit {
    binary: PathBuf,
}

impl CliGit {
    /// Use the given git executable
    #[must_use]
    #[inline]
    pub fn new<P: Into<PathBuf>>(binary: P) -> Self {
        Self {
            binary: binary.into(),
        }
    }
}

impl Default for CliGit {
    fn default() -> Self {
        Self::new("git")
    }
}

impl GitTool for CliGit {
    fn run(&self, invocation: &GitInvocation, cwd: &Path) -> io::Result<Option<i32>> {
        debug!(
            "Spawning {} {:?} in {}",
            self.binary.display(),
            invocation.args(),
            cwd.display()
        );

        let status = Command::new(&self.binary)
            .args(invocation.args())
            .current_dir(cwd)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()?;

        debug!("{invocation} exited with {status}");
        Ok(status.code())
    }

    fn inspect(&self, dir: &Path) -> Result<RepoState> {
        let repo = match git2::Repository::open(dir) {
            Ok(repo) => repo,
            Err(e) if e.code() == git2::ErrorCode::NotFound => {
                debug!("No repository at {}", dir.display());
                return Ok(RepoState::default());
            }
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("Failed to open repository at {}", dir.display()));
            }
        };

        let origin_url = match repo.find_remote(REMOTE_NAME) {
            Ok(remote) => remote.url().map(str::to_owned),
            Err(e) if e.code() == git2::ErrorCode::NotFound => None,
            Err(e) => {
                return Err(e).context("Failed to read the origin remote");
            }
        };

        let sparse_checkout = repo
            .config()
            .and_then(|config| config.open_level(git2::ConfigLevel::Local))
            .and_then(|local| local.get_bool("core.sparseCheckout"))
            .unwrap_or(false);

        Ok(RepoState {
            is_repository: true,
            origin_url,
            sparse_checkout,
        })
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "These are unit tests")]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_inspect_plain_directory() {
        let temp_dir = TempDir::new().unwrap();
        let state = CliGit::default().inspect(temp_dir.path()).unwrap();
        assert_eq!(state, RepoState::default());
    }

    #[test]
    fn test_inspect_configured_repository() {
        let temp_dir = TempDir::new().unwrap();
        let repo = git2::Repository::init(temp_dir.path()).unwrap();
        repo.remote(REMOTE_NAME, "https://example.com/foo.git")
            .unwrap();
        repo.config()
            .unwrap()
            .open_level(git2::ConfigLevel::Local)
            .unwrap()
            .set_bool("core.sparseCheckout", true)
            .unwrap();

        let state = CliGit::default().inspect(temp_dir.path()).unwrap();
        assert!(state.is_repository);
        assert_eq!(
            state.origin_url.as_deref(),
            Some("https://example.com/foo.git")
        );
        assert!(state.sparse_checkout);
    }

    #[test]
    fn test_missing_binary_is_spawn_error() {
        let temp_dir = TempDir::new().unwrap();
        let git = CliGit::new("definitely-not-a-git-binary");
        let result = git.run(&GitInvocation::init(), temp_dir.path());
        assert!(result.is_err());
    }
}
