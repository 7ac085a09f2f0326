//! Checkout operation coordination

use crate::error::CheckoutError;
use crate::git::{
    ControlFile, GitInvocation, GitStep, GitTool, RepoState, control_file_path,
    render_control_file, write_control_file,
};
use crate::messages::{Locale, Message};
use crate::notify::Notifier;
use crate::operations::{CheckoutRequest, RequestField, ResolvedRequest};
use crate::system::System;
use crate::utils::project_dir;
use anyhow::Result;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// How a checkout ended, when it did not fail
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CheckoutOutcome {
    /// Every step ran or was already done, and the pull succeeded
    Completed {
        project_dir: PathBuf,
        /// Steps skipped because the folder already had them done
        skipped: Vec<GitStep>,
        control_file: ControlFile,
    },
    /// Dry run: nothing was touched
    Planned {
        project_dir: PathBuf,
        /// Invocations a real run would make, in order
        plan: Vec<GitInvocation>,
        /// Steps a real run would skip
        skipped: Vec<GitStep>,
    },
    /// An input was missing, so nothing was done
    Aborted { missing: RequestField },
}

/// Coordinates the complete sparse checkout
///
/// The steps run strictly in order and every failure is shown to the user and
/// ends the checkout. Steps already done in the project folder are skipped, so
/// running again after a failure picks up where the last run stopped.
#[non_exhaustive]
pub struct CheckoutOperation<'src> {
    system: &'src dyn System,
    git: &'src dyn GitTool,
    notifier: &'src dyn Notifier,
    locale: Locale,
    dry_run: bool,
}

impl<'src> CheckoutOperation<'src> {
    #[must_use]
    #[inline]
    pub fn new(
        system: &'src dyn System,
        git: &'src dyn GitTool,
        notifier: &'src dyn Notifier,
        locale: Locale,
    ) -> Self {
        Self {
            system,
            git,
            notifier,
            locale,
            dry_run: false,
        }
    }

    /// Only report what would be done
    #[must_use]
    #[inline]
    pub const fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Execute the checkout
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No project folder name can be derived from the repository URL
    /// - The project folder or the control file cannot be created
    /// - A git step cannot be spawned or exits nonzero
    /// - `origin` is already configured with a different URL
    #[inline]
    pub fn execute(&self, request: &CheckoutRequest) -> Result<CheckoutOutcome> {
        let request = match request.resolve() {
            Ok(resolved) => resolved,
            Err(missing) => {
                debug!("Missing {missing}, nothing to do");
                return Ok(CheckoutOutcome::Aborted { missing });
            }
        };

        let project_dir = project_dir(&request.target_parent_dir, &request.repository)?;
        debug!("Project folder: {}", project_dir.display());

        if !self.dry_run {
            self.ensure_project_dir(&project_dir)?;
        }

        let state = self.inspect(&project_dir);
        let (setup, skipped) = self.plan_setup(&request, &state)?;

        if self.dry_run {
            return Ok(self.preview(&request, project_dir, setup, &skipped));
        }

        for invocation in &setup {
            self.run_step(invocation, &project_dir)?;
        }

        let control_file = self.write_control_file(&project_dir, &request.paths)?;

        self.run_step(&GitInvocation::pull(&request.branch), &project_dir)?;
        self.notify_info(&Message::PullSucceeded);

        Ok(CheckoutOutcome::Completed {
            project_dir,
            skipped,
            control_file,
        })
    }

    /// Read what an earlier run left in the project folder
    ///
    /// A folder that does not exist yet, or cannot be inspected, is treated
    /// as empty so every step runs.
    fn inspect(&self, project_dir: &Path) -> RepoState {
        if !self.system.is_dir(project_dir).unwrap_or(false) {
            return RepoState::default();
        }

        let state = self.git.inspect(project_dir).unwrap_or_else(|e| {
            warn!("Could not inspect {}: {e:#}", project_dir.display());
            RepoState::default()
        });
        debug!("Existing state: {state:?}");
        state
    }

    /// Decide which setup steps still have to run before the pull
    ///
    /// # Errors
    ///
    /// Returns an error if `origin` already points to another repository
    fn plan_setup(
        &self,
        request: &ResolvedRequest,
        state: &RepoState,
    ) -> Result<(Vec<GitInvocation>, Vec<GitStep>)> {
        let mut setup = Vec::new();
        let mut skipped = Vec::new();

        if state.is_repository {
            debug!("Already a repository, skipping git init");
            skipped.push(GitStep::Init);
        } else {
            setup.push(GitInvocation::init());
        }

        match state.origin_url.as_deref() {
            Some(url) if url == request.repository => {
                debug!("Remote origin already set, skipping git remote add");
                skipped.push(GitStep::RemoteAdd);
            }
            Some(existing) => {
                self.notify_error(&Message::RemoteMismatch { existing });
                return Err(CheckoutError::RemoteMismatch {
                    expected: request.repository.clone(),
                    existing: existing.to_owned(),
                }
                .into());
            }
            None => setup.push(GitInvocation::remote_add(&request.repository)),
        }

        if state.sparse_checkout {
            debug!("Sparse checkout already enabled");
            skipped.push(GitStep::EnableSparseCheckout);
        } else {
            setup.push(GitInvocation::enable_sparse_checkout());
        }

        Ok((setup, skipped))
    }

    /// Report the plan without executing it
    fn preview(
        &self,
        request: &ResolvedRequest,
        project_dir: PathBuf,
        setup: Vec<GitInvocation>,
        skipped: &[GitStep],
    ) -> CheckoutOutcome {
        self.notify_info(&Message::DryRunFolder { path: &project_dir });
        for step in skipped {
            self.notify_info(&Message::DryRunSkipped { step: *step });
        }
        for invocation in &setup {
            self.notify_info(&Message::DryRunCommand {
                command: &invocation.to_string(),
            });
        }

        let control_file = control_file_path(&project_dir);
        if self.system.exists(&control_file).unwrap_or(false) {
            self.notify_info(&Message::DryRunControlFileKept {
                path: &control_file,
            });
        } else {
            let entries = render_control_file(&request.paths)
                .lines()
                .collect::<Vec<_>>()
                .join(" ");
            self.notify_info(&Message::DryRunControlFile {
                path: &control_file,
                entries: &entries,
            });
        }

        let pull = GitInvocation::pull(&request.branch);
        self.notify_info(&Message::DryRunCommand {
            command: &pull.to_string(),
        });

        let mut plan = setup;
        plan.push(pull);
        CheckoutOutcome::Planned {
            project_dir,
            plan,
            skipped: skipped.to_vec(),
        }
    }

    fn ensure_project_dir(&self, project_dir: &Path) -> Result<()> {
        let existed = self.system.is_dir(project_dir).unwrap_or(false);
        if existed {
            debug!("Project folder already exists");
            return Ok(());
        }

        match self.system.create_dir_all(project_dir) {
            Ok(()) => {
                self.notify_info(&Message::FolderCreated { path: project_dir });
                Ok(())
            }
            Err(e) => {
                let name = project_dir
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned())
                    .unwrap_or_default();
                self.notify_error(&Message::FolderFailed {
                    name: &name,
                    error: &e.to_string(),
                });
                Err(CheckoutError::filesystem(format!(
                    "Failed to create folder {}: {e}",
                    project_dir.display()
                ))
                .into())
            }
        }
    }

    fn write_control_file(&self, project_dir: &Path, paths: &[String]) -> Result<ControlFile> {
        match write_control_file(self.system, project_dir, paths) {
            Ok(ControlFile::Written) => {
                self.notify_info(&Message::ControlFileCreated);
                Ok(ControlFile::Written)
            }
            Ok(ControlFile::Kept) => Ok(ControlFile::Kept),
            Err(e) => {
                self.notify_error(&Message::ControlFileFailed {
                    error: &e.to_string(),
                });
                Err(CheckoutError::filesystem(format!(
                    "Failed to write {}: {e}",
                    control_file_path(project_dir).display()
                ))
                .into())
            }
        }
    }

    /// Run one git step, reporting and returning its failure
    fn run_step(&self, invocation: &GitInvocation, project_dir: &Path) -> Result<()> {
        let step = invocation.step();
        debug!("Running {invocation}");

        match self.git.run(invocation, project_dir) {
            Ok(Some(0)) => {
                debug!("{invocation} succeeded");
                Ok(())
            }
            Ok(code) => {
                let detail = code.map_or_else(
                    || "terminated by signal".to_owned(),
                    |code| format!("exit code {code}"),
                );
                self.notify_error(&Message::StepFailed {
                    step,
                    detail: Some(&detail),
                });
                Err(CheckoutError::git(step, code).into())
            }
            Err(e) => {
                let detail = e.to_string();
                self.notify_error(&Message::StepFailed {
                    step,
                    detail: Some(&detail),
                });
                Err(CheckoutError::spawn(step, detail).into())
            }
        }
    }

    fn notify_info(&self, message: &Message<'_>) {
        self.notifier.info(&message.render(self.locale));
    }

    fn notify_error(&self, message: &Message<'_>) {
        self.notifier.error(&message.render(self.locale));
    }
}
