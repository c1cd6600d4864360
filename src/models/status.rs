use chrono::{DateTime, Local};
use std::collections::VecDeque;

/// Oldest entries are dropped past this many
pub const MAX_ENTRIES: usize = 500;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone)]
pub struct StatusEntry {
    pub severity: Severity,
    pub message: String,
    pub timestamp: DateTime<Local>,
}

/// Log of outcome messages shown under the trees
#[derive(Debug, Default)]
pub struct StatusLog {
    entries: VecDeque<StatusEntry>,
}

impl StatusLog {
    pub fn push(&mut self, severity: Severity, message: impl Into<String>) {
        let message = message.into();
        match severity {
            Severity::Error => tracing::error!("{message}"),
            _ => tracing::info!("{message}"),
        }
        if self.entries.len() == MAX_ENTRIES {
            self.entries.pop_front();
        }
        self.entries.push_back(StatusEntry {
            severity,
            message,
            timestamp: Local::now(),
        });
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.push(Severity::Info, message);
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.push(Severity::Success, message);
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.push(Severity::Error, message);
    }

    pub fn entries(&self) -> &VecDeque<StatusEntry> {
        &self.entries
    }

    pub fn last(&self) -> Option<&StatusEntry> {
        self.entries.back()
    }

    /// The newest `count` entries, oldest first.
    pub fn tail(&self, count: usize) -> impl Iterator<Item = &StatusEntry> {
        self.entries
            .iter()
            .skip(self.entries.len().saturating_sub(count))
    }
}
