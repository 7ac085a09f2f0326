//! Custom error types with exit codes

use crate::git::GitStep;
use thiserror::Error;

/// Main error type for git-sparse-check operations
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum CheckoutError {
    /// Configuration Error - missing or invalid configuration
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Prompt Error - reading user input failed
    #[error("Prompt error: {message}")]
    Prompt { message: String },

    /// Filesystem Error - folder or control file could not be created
    #[error("Filesystem error: {message}")]
    Filesystem { message: String },

    /// Spawn Error - the git binary could not be started
    #[error("Failed to run git {step}: {message}")]
    Spawn { step: GitStep, message: String },

    /// Git Error - git exited with a nonzero status
    #[error("git {step} failed{}", .code.map_or_else(String::new, |c| format!(" with exit code {c}")))]
    Git { step: GitStep, code: Option<i32> },

    /// Remote Error - `origin` already points somewhere else
    #[error("Remote origin already points to {existing}, expected {expected}")]
    RemoteMismatch { expected: String, existing: String },
}

impl CheckoutError {
    /// Get the appropriate exit code for this error type
    #[must_use]
    #[inline]
    pub const fn exit_code(&self) -> i32 {
        match *self {
            Self::Configuration { .. } => 1,
            Self::Prompt { .. } => 2,
            Self::Filesystem { .. } => 3,
            Self::Spawn { .. } | Self::Git { .. } | Self::RemoteMismatch { .. } => 4,
        }
    }

    /// Whether the checkout pipeline already showed this failure to the user
    #[must_use]
    #[inline]
    pub const fn is_reported(&self) -> bool {
        matches!(
            *self,
            Self::Filesystem { .. }
                | Self::Spawn { .. }
                | Self::Git { .. }
                | Self::RemoteMismatch { .. }
        )
    }

    /// Create a configuration error
    #[inline]
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a prompt error
    #[inline]
    pub fn prompt<S: Into<String>>(message: S) -> Self {
        Self::Prompt {
            message: message.into(),
        }
    }

    /// Create a filesystem error
    #[inline]
    pub fn filesystem<S: Into<String>>(message: S) -> Self {
        Self::Filesystem {
            message: message.into(),
        }
    }

    /// Create a spawn error for the given step
    #[inline]
    pub fn spawn<S: Into<String>>(step: GitStep, message: S) -> Self {
        Self::Spawn {
            step,
            message: message.into(),
        }
    }

    /// Create a nonzero-exit error for the given step
    #[inline]
    pub const fn git(step: GitStep, code: Option<i32>) -> Self {
        Self::Git { step, code }
    }
}
