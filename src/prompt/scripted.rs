//! Pre-recorded answers for tests and non-interactive runs

use super::{PromptSpec, Prompter};
use std::collections::VecDeque;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

/// Answers prompts from a queue and records what was asked
///
/// Once the queue is empty every prompt gets no answer.
///
/// # Example
/// ```
/// use git_sparse_check::messages::Locale;
/// use git_sparse_check::operations::RequestField;
/// use git_sparse_check::prompt::{PromptSpec, Prompter, ScriptedPrompter};
///
/// let prompter = ScriptedPrompter::new().answer("main");
/// let spec = PromptSpec::new(RequestField::Branch, Locale::En);
///
/// assert_eq!(prompter.input(&spec).unwrap().as_deref(), Some("main"));
/// assert_eq!(prompter.input(&spec).unwrap(), None);
/// assert_eq!(prompter.asked().len(), 2);
/// ```
#[derive(Default)]
pub struct ScriptedPrompter {
    answers: Mutex<VecDeque<Option<String>>>,
    asked: Mutex<Vec<PromptSpec>>,
}

impl ScriptedPrompter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an answer
    #[must_use]
    pub fn answer<S: Into<String>>(self, answer: S) -> Self {
        self.push(Some(answer.into()));
        self
    }

    /// Queue a cancelled prompt
    #[must_use]
    pub fn cancel(self) -> Self {
        self.push(None);
        self
    }

    /// Every prompt shown so far, in order
    #[must_use]
    pub fn asked(&self) -> Vec<PromptSpec> {
        self.asked
            .lock()
            .map(|asked| asked.clone())
            .unwrap_or_default()
    }

    fn push(&self, answer: Option<String>) {
        if let Ok(mut answers) = self.answers.lock() {
            answers.push_back(answer);
        }
    }

    fn next(&self, spec: &PromptSpec) -> io::Result<Option<String>> {
        self.asked
            .lock()
            .map_err(|e| io::Error::other(e.to_string()))?
            .push(spec.clone());

        Ok(self
            .answers
            .lock()
            .map_err(|e| io::Error::other(e.to_string()))?
            .pop_front()
            .flatten())
    }
}

impl Prompter for ScriptedPrompter {
    fn select_folder(&self, spec: &PromptSpec) -> io::Result<Option<PathBuf>> {
        Ok(self.next(spec)?.map(PathBuf::from))
    }

    fn input(&self, spec: &PromptSpec) -> io::Result<Option<String>> {
        self.next(spec)
    }
}
