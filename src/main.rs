//! # `git-sparse-check`
//!
//! `git-sparse-check` creates a project folder named after a Git repository and
//! checks out only selected directories of one branch into it, using git's
//! sparse checkout.
//!
//! ## Usage
//!
//! **Interactive:**
//! ```sh
//! git-sparse-check
//! ```
//!
//! **Fully specified:**
//! ```sh
//! git-sparse-check --target-dir ~/src --repository https://example.com/foo.git \
//!     --branch main --paths web,lib
//! ```
//!
//! Defaults can be kept in `git-sparse-check.yaml`; see `git-sparse-check --help`.

use anyhow::Result;
use clap::Parser as _;
use git_sparse_check::cli::Args;
use git_sparse_check::error::CheckoutError;
use tracing::{debug, error};
use tracing_subscriber::{EnvFilter, fmt};

fn main() -> Result<()> {
    let args = Args::parse();

    let log_level = if args.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    fmt().with_target(false).with_env_filter(filter).init();

    match git_sparse_check::run(&args) {
        Ok(outcome) => {
            debug!("Finished: {outcome:?}");
            std::process::exit(0)
        }
        Err(err) => {
            let checkout_error = err.downcast_ref::<CheckoutError>();
            // Pipeline failures were already shown as localized messages
            if checkout_error.is_some_and(CheckoutError::is_reported) {
                debug!("{err:#}");
            } else {
                error!("{err:#}");
            }
            std::process::exit(checkout_error.map_or(1, CheckoutError::exit_code));
        }
    }
}
