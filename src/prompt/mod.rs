//! User prompt capability
//!
//! The checkout asks for its four inputs through a [`Prompter`], so the
//! pipeline runs the same against a terminal or a scripted test double.

use std::io;
use std::path::PathBuf;

pub mod scripted;
pub mod terminal;

pub use crate::messages::PromptSpec;
pub use scripted::ScriptedPrompter;
pub use terminal::TerminalPrompter;

/// Asks the user for input
///
/// Both methods return `Ok(None)` when the user gives no answer; the checkout
/// then stops without reporting an error.
pub trait Prompter {
    /// Ask for a folder
    ///
    /// # Errors
    ///
    /// Returns an error if the prompt cannot be shown or read
    fn select_folder(&self, spec: &PromptSpec) -> io::Result<Option<PathBuf>>;

    /// Ask for free text
    ///
    /// # Errors
    ///
    /// Returns an error if the prompt cannot be shown or read
    fn input(&self, spec: &PromptSpec) -> io::Result<Option<String>>;
}
