//! User-visible notifications

use std::sync::{Arc, RwLock};
use tracing::{error, info};

/// Shows informational and error messages to the user
pub trait Notifier: Send + Sync {
    fn info(&self, message: &str);

    fn error(&self, message: &str);
}

/// Production notifier that emits messages through `tracing`
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn info(&self, message: &str) {
        info!("{message}");
    }

    fn error(&self, message: &str) {
        error!("{message}");
    }
}

/// Severity of a recorded notice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Error,
}

/// A message captured by `RecordingNotifier`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: Level,
    pub text: String,
}

/// Notifier that keeps every message for later inspection
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    notices: Arc<RwLock<Vec<Notice>>>,
}

impl RecordingNotifier {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All notices in the order they were shown
    #[must_use]
    pub fn notices(&self) -> Vec<Notice> {
        self.notices
            .read()
            .map(|notices| notices.clone())
            .unwrap_or_default()
    }

    /// Texts of the error notices
    #[must_use]
    pub fn errors(&self) -> Vec<String> {
        self.texts(Level::Error)
    }

    /// Texts of the informational notices
    #[must_use]
    pub fn infos(&self) -> Vec<String> {
        self.texts(Level::Info)
    }

    fn texts(&self, level: Level) -> Vec<String> {
        self.notices()
            .into_iter()
            .filter(|notice| notice.level == level)
            .map(|notice| notice.text)
            .collect()
    }

    fn record(&self, level: Level, message: &str) {
        if let Ok(mut notices) = self.notices.write() {
            notices.push(Notice {
                level,
                text: message.to_owned(),
            });
        }
    }
}

impl Notifier for RecordingNotifier {
    fn info(&self, message: &str) {
        self.record(Level::Info, message);
    }

    fn error(&self, message: &str) {
        self.record(Level::Error, message);
    }
}
