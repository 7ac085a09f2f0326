//! Mock git implementation for testing

use super::{GitInvocation, GitStep, GitTool, RepoState};
use anyhow::{Result, anyhow};
use std::collections::{HashMap, HashSet};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

/// A git invocation recorded by `MockGit`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedInvocation {
    pub step: GitStep,
    pub args: Vec<String>,
    pub cwd: PathBuf,
}

/// In-memory implementation of `GitTool` for testing
///
/// Every invocation is recorded. Successful invocations update a simulated
/// repository state per folder, so a second run against the same folder sees
/// what the first one left behind.
///
/// # Example
/// ```
/// use git_sparse_check::git::{GitInvocation, GitStep, GitTool, MockGit};
/// use std::path::Path;
///
/// let git = MockGit::new().with_exit_code(GitStep::Pull, 1);
///
/// assert_eq!(git.run(&GitInvocation::init(), Path::new("/w")).unwrap(), Some(0));
/// assert_eq!(git.run(&GitInvocation::pull("main"), Path::new("/w")).unwrap(), Some(1));
/// assert!(git.inspect(Path::new("/w")).unwrap().is_repository);
/// ```
#[derive(Clone, Default)]
pub struct MockGit {
    state: Arc<RwLock<MockGitState>>,
}

#[derive(Default)]
struct MockGitState {
    invocations: Vec<RecordedInvocation>,
    exit_codes: HashMap<GitStep, Option<i32>>,
    spawn_failures: HashSet<GitStep>,
    repositories: HashMap<PathBuf, RepoState>,
    broken: HashSet<PathBuf>,
}

impl MockGit {
    #[must_use]
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every invocation of `step` exit with `code`
    #[must_use]
    #[inline]
    pub fn with_exit_code(self, step: GitStep, code: i32) -> Self {
        self.write_state(|state| {
            state.exit_codes.insert(step, Some(code));
        });
        self
    }

    /// Make every invocation of `step` end without an exit code (killed by a signal)
    #[must_use]
    #[inline]
    pub fn with_signal(self, step: GitStep) -> Self {
        self.write_state(|state| {
            state.exit_codes.insert(step, None);
        });
        self
    }

    /// Make every invocation of `step` fail to spawn
    #[must_use]
    #[inline]
    pub fn with_spawn_failure(self, step: GitStep) -> Self {
        self.write_state(|state| {
            state.spawn_failures.insert(step);
        });
        self
    }

    /// Pretend `dir` already holds a repository in the given state
    #[must_use]
    #[inline]
    pub fn with_repository<P: AsRef<Path>>(self, dir: P, repo: RepoState) -> Self {
        self.write_state(|state| {
            state.repositories.insert(dir.as_ref().to_path_buf(), repo);
        });
        self
    }

    /// Make inspection of `dir` fail
    #[must_use]
    #[inline]
    pub fn with_broken_repository<P: AsRef<Path>>(self, dir: P) -> Self {
        self.write_state(|state| {
            state.broken.insert(dir.as_ref().to_path_buf());
        });
        self
    }

    /// All invocations in the order they were run
    #[must_use]
    #[inline]
    pub fn invocations(&self) -> Vec<RecordedInvocation> {
        self.state
            .read()
            .map(|state| state.invocations.clone())
            .unwrap_or_default()
    }

    /// The steps of all invocations in the order they were run
    #[must_use]
    #[inline]
    pub fn steps(&self) -> Vec<GitStep> {
        self.invocations().into_iter().map(|inv| inv.step).collect()
    }

    fn write_state<F: FnOnce(&mut MockGitState)>(&self, update: F) {
        if let Ok(mut state) = self.state.write() {
            update(&mut state);
        }
    }
}

impl GitTool for MockGit {
    fn run(&self, invocation: &GitInvocation, cwd: &Path) -> io::Result<Option<i32>> {
        let mut state = self
            .state
            .write()
            .map_err(|e| io::Error::other(e.to_string()))?;

        let step = invocation.step();
        state.invocations.push(RecordedInvocation {
            step,
            args: invocation.args().to_vec(),
            cwd: cwd.to_path_buf(),
        });

        if state.spawn_failures.contains(&step) {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                "No such file or directory (os error 2)",
            ));
        }

        let code = state.exit_codes.get(&step).copied().unwrap_or(Some(0));
        if code != Some(0) {
            return Ok(code);
        }

        let repo = state.repositories.entry(cwd.to_path_buf()).or_default();
        match step {
            GitStep::Init => repo.is_repository = true,
            GitStep::RemoteAdd => repo.origin_url = invocation.args().last().cloned(),
            GitStep::EnableSparseCheckout => repo.sparse_checkout = true,
            GitStep::Pull => {}
        }
        drop(state);

        Ok(Some(0))
    }

    fn inspect(&self, dir: &Path) -> Result<RepoState> {
        let state = self
            .state
            .read()
            .map_err(|e| anyhow!("Mock git state poisoned: {e}"))?;

        if state.broken.contains(dir) {
            return Err(anyhow!("Corrupt repository at {}", dir.display()));
        }

        Ok(state.repositories.get(dir).cloned().unwrap_or_default())
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "These are unit tests")]
mod tests {
    use super::*;

    #[test]
    fn test_records_and_simulates() {
        let git = MockGit::new();
        let dir = Path::new("/work/foo");

        git.run(&GitInvocation::init(), dir).unwrap();
        git.run(&GitInvocation::remote_add("https://example.com/foo.git"), dir)
            .unwrap();
        git.run(&GitInvocation::enable_sparse_checkout(), dir)
            .unwrap();

        let state = git.inspect(dir).unwrap();
        assert!(state.is_repository);
        assert_eq!(
            state.origin_url.as_deref(),
            Some("https://example.com/foo.git")
        );
        assert!(state.sparse_checkout);
        assert_eq!(
            git.steps(),
            [
                GitStep::Init,
                GitStep::RemoteAdd,
                GitStep::EnableSparseCheckout
            ]
        );
    }

    #[test]
    fn test_failed_step_leaves_state_untouched() {
        let git = MockGit::new().with_exit_code(GitStep::Init, 128);
        let dir = Path::new("/work/foo");

        assert_eq!(git.run(&GitInvocation::init(), dir).unwrap(), Some(128));
        assert!(!git.inspect(dir).unwrap().is_repository);
    }

    #[test]
    fn test_spawn_failure() {
        let git = MockGit::new().with_spawn_failure(GitStep::Pull);
        let err = git
            .run(&GitInvocation::pull("main"), Path::new("/w"))
            .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
        assert_eq!(git.steps(), [GitStep::Pull]);
    }
}
