//! `git-sparse-check` - A CLI tool for sparse-checking out selected directories
//! of a Git repository
//!
//! This library asks for a target folder, a remote URL, a branch and a list of
//! directories, then drives the git binary through `init`, `remote add`,
//! sparse-checkout configuration and `pull` inside a project folder named
//! after the repository.

pub mod cli;
pub mod config;
pub mod error;
pub mod git;
pub mod messages;
pub mod notify;
pub mod operations;
pub mod prompt;
pub mod system;
pub mod utils;

use anyhow::Result;
use cli::Args;
use config::{Config, Settings};
use git::{CliGit, GitTool};
use messages::Message;
use notify::{Notifier, TracingNotifier};
use operations::{CheckoutOperation, CheckoutOutcome, CheckoutRequest};
use prompt::{Prompter, TerminalPrompter};
use system::{RealSystem, System};

/// Main entry point for the git-sparse-check library
///
/// # Errors
///
/// Returns an error if the configuration cannot be loaded or the checkout fails
pub fn run(args: &Args) -> Result<CheckoutOutcome> {
    let system = RealSystem::new();
    let config = Config::discover(&system, args.config.as_deref())?;
    let settings = Settings::resolve(args, config);

    let git = CliGit::new(settings.git_binary.clone());
    let prompter = TerminalPrompter::stdio();
    let notifier = TracingNotifier;

    run_with(&settings, &system, &git, &prompter, &notifier)
}

/// Run a checkout against the given capabilities
///
/// # Errors
///
/// Returns an error if a prompt fails or the checkout fails
pub fn run_with(
    settings: &Settings,
    system: &dyn System,
    git: &dyn GitTool,
    prompter: &dyn Prompter,
    notifier: &dyn Notifier,
) -> Result<CheckoutOutcome> {
    notifier.info(&Message::Started.render(settings.locale));

    let request = CheckoutRequest::gather(
        &settings.preset,
        prompter,
        system,
        settings.locale,
        settings.interactive,
    )?;

    CheckoutOperation::new(system, git, notifier, settings.locale)
        .dry_run(settings.dry_run)
        .execute(&request)
}
