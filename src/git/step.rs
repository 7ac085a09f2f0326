//! The fixed git invocations of a sparse checkout

use core::fmt;

/// Name of the remote the repository is pulled from
pub const REMOTE_NAME: &str = "origin";

/// A step of the checkout pipeline that is delegated to git
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum GitStep {
    /// `git init`
    Init,
    /// `git remote add -f origin <url>`
    RemoteAdd,
    /// `git config core.sparseCheckout true`
    EnableSparseCheckout,
    /// `git pull origin <branch>`
    Pull,
}

impl fmt::Display for GitStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match *self {
            Self::Init => "init",
            Self::RemoteAdd => "remote add",
            Self::EnableSparseCheckout => "config core.sparseCheckout",
            Self::Pull => "pull",
        };
        f.write_str(name)
    }
}

/// A git argument vector tagged with the pipeline step it performs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitInvocation {
    step: GitStep,
    args: Vec<String>,
}

impl GitInvocation {
    fn new<I, S>(step: GitStep, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            step,
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// `git init`
    #[must_use]
    pub fn init() -> Self {
        Self::new(GitStep::Init, ["init"])
    }

    /// `git remote add -f origin <url>`
    #[must_use]
    pub fn remote_add(url: &str) -> Self {
        Self::new(GitStep::RemoteAdd, ["remote", "add", "-f", REMOTE_NAME, url])
    }

    /// `git config core.sparseCheckout true`
    #[must_use]
    pub fn enable_sparse_checkout() -> Self {
        Self::new(
            GitStep::EnableSparseCheckout,
            ["config", "core.sparseCheckout", "true"],
        )
    }

    /// `git pull origin <branch>`
    #[must_use]
    pub fn pull(branch: &str) -> Self {
        Self::new(GitStep::Pull, ["pull", REMOTE_NAME, branch])
    }

    #[must_use]
    #[inline]
    pub const fn step(&self) -> GitStep {
        self.step
    }

    #[must_use]
    #[inline]
    pub fn args(&self) -> &[String] {
        &self.args
    }
}

impl fmt::Display for GitInvocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "git {}", self.args.join(" "))
    }
}
