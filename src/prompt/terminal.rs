//! Line-based prompts on a terminal

use super::{PromptSpec, Prompter};
use std::io::{self, BufRead, StdinLock, Stderr, Write};
use std::path::PathBuf;
use std::sync::Mutex;

/// Prompts on one stream and reads single-line answers from another
///
/// An empty line or end of input counts as no answer.
pub struct TerminalPrompter<R, W> {
    input: Mutex<R>,
    output: Mutex<W>,
}

impl TerminalPrompter<StdinLock<'static>, Stderr> {
    /// Prompt on stderr and read from stdin
    #[must_use]
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stderr())
    }
}

impl<R: BufRead, W: Write> TerminalPrompter<R, W> {
    #[must_use]
    pub const fn new(input: R, output: W) -> Self {
        Self {
            input: Mutex::new(input),
            output: Mutex::new(output),
        }
    }

    fn ask(&self, spec: &PromptSpec) -> io::Result<Option<String>> {
        {
            let mut output = self
                .output
                .lock()
                .map_err(|e| io::Error::other(e.to_string()))?;
            match spec.placeholder.as_deref() {
                Some(placeholder) => write!(output, "{} ({placeholder}): ", spec.prompt)?,
                None => write!(output, "{}: ", spec.prompt)?,
            }
            output.flush()?;
        }

        let mut line = String::new();
        let read = self
            .input
            .lock()
            .map_err(|e| io::Error::other(e.to_string()))?
            .read_line(&mut line)?;

        if read == 0 {
            return Ok(None);
        }

        let answer = line.trim();
        if answer.is_empty() {
            Ok(None)
        } else {
            Ok(Some(answer.to_owned()))
        }
    }
}

impl<R: BufRead, W: Write> Prompter for TerminalPrompter<R, W> {
    fn select_folder(&self, spec: &PromptSpec) -> io::Result<Option<PathBuf>> {
        Ok(self.ask(spec)?.map(PathBuf::from))
    }

    fn input(&self, spec: &PromptSpec) -> io::Result<Option<String>> {
        self.ask(spec)
    }
}
