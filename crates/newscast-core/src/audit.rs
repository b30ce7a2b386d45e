//! Session audit log
//!
//! The audit log records enforcement and provenance actions taken by the
//! interception hooks. Entries are kept newest first so that a report can list
//! the most recent action at the top. Nothing removes an entry: the log lives
//! exactly as long as the session that owns it.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;

/// One human-readable enforcement or provenance action
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AuditLogEntry(String);

impl AuditLogEntry {
    /// Create an entry from its text
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// Entry text
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AuditLogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AuditLogEntry {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for AuditLogEntry {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Ordered audit entries for one session, most recent first
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionAuditLog {
    entries: VecDeque<AuditLogEntry>,
}

impl SessionAuditLog {
    /// Create an empty log
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a new action ahead of every existing entry
    pub fn prepend(&mut self, entry: impl Into<AuditLogEntry>) {
        self.entries.push_front(entry.into());
    }

    /// Most recent entry
    pub fn latest(&self) -> Option<&AuditLogEntry> {
        self.entries.front()
    }

    /// Iterate entries, most recent first
    pub fn iter(&self) -> impl Iterator<Item = &AuditLogEntry> {
        self.entries.iter()
    }

    /// Copy of the entries as plain strings, most recent first
    pub fn snapshot(&self) -> Vec<String> {
        self.entries.iter().map(ToString::to_string).collect()
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the log is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
