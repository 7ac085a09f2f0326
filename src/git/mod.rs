//! Git operations module
//!
//! Handles the git invocations of a sparse checkout, repository inspection
//! and the sparse-checkout control file

pub mod mock;
pub mod runner;
pub mod sparse_checkout;
pub mod step;

pub use mock::MockGit;
pub use runner::*;
pub use sparse_checkout::*;
pub use step::*;
