//! Per-session state handed to every hook and tool dispatch
//!
//! A `Context` belongs to exactly one conversation. It carries a small
//! key-value store for runtime preferences and the session's
//! [`SessionAuditLog`], which is created lazily the first time a hook touches
//! it and dropped together with the context.

use crate::audit::SessionAuditLog;
use std::collections::HashMap;

/// Well-known context keys
pub mod keys {
    /// Language preference (e.g., "en", "es")
    pub const LANGUAGE: &str = "language";
    /// Session ID for tracking
    pub const SESSION_ID: &str = "session_id";
}

/// Session state passed by reference into each stage call
///
/// # Example
///
/// ```
/// use newscast_core::Context;
///
/// let mut ctx = Context::new().with_session_id("session-123");
/// assert!(!ctx.has_audit_log());
///
/// ctx.audit_log_mut().prepend("Action: example.");
/// assert_eq!(ctx.audit_log().len(), 1);
/// assert_eq!(ctx.session_id(), Some("session-123"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Context {
    data: HashMap<String, serde_json::Value>,
    process_log: Option<SessionAuditLog>,
}

impl Context {
    /// Create a new empty context
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the session ID
    pub fn with_session_id(mut self, session_id: impl Into<String>) -> Self {
        self.insert(keys::SESSION_ID, serde_json::json!(session_id.into()));
        self
    }

    /// Set the language preference
    pub fn with_language(mut self, lang: impl Into<String>) -> Self {
        self.insert(keys::LANGUAGE, serde_json::json!(lang.into()));
        self
    }

    /// Get the session ID
    pub fn session_id(&self) -> Option<&str> {
        self.get(keys::SESSION_ID).and_then(|v| v.as_str())
    }

    /// Get the language preference
    pub fn language(&self) -> Option<&str> {
        self.get(keys::LANGUAGE).and_then(|v| v.as_str())
    }

    // =========== Audit Log ===========

    /// Whether any hook has touched the audit log yet
    pub fn has_audit_log(&self) -> bool {
        self.process_log.is_some()
    }

    /// Mutable access to the audit log, creating it empty if absent
    pub fn audit_log_mut(&mut self) -> &mut SessionAuditLog {
        self.process_log.get_or_insert_with(SessionAuditLog::new)
    }

    /// Read access to the audit log, creating it empty if absent
    pub fn audit_log(&mut self) -> &SessionAuditLog {
        self.audit_log_mut()
    }

    /// Audit log without initialising it
    pub fn peek_audit_log(&self) -> Option<&SessionAuditLog> {
        self.process_log.as_ref()
    }

    // =========== Generic Key-Value Operations ===========

    /// Insert a value into the context
    pub fn insert(&mut self, key: impl Into<String>, value: serde_json::Value) {
        self.data.insert(key.into(), value);
    }

    /// Get a value from the context
    pub fn get(&self, key: &str) -> Option<&serde_json::Value> {
        self.data.get(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_audit_log_is_lazy() {
        let mut ctx = Context::new();
        assert!(!ctx.has_audit_log());
        assert!(ctx.peek_audit_log().is_none());

        assert!(ctx.audit_log().is_empty());
        assert!(ctx.has_audit_log());
    }

    #[test]
    fn test_audit_log_accumulates() {
        let mut ctx = Context::new();
        ctx.audit_log_mut().prepend("one");
        ctx.audit_log_mut().prepend("two");

        assert_eq!(ctx.audit_log().snapshot(), vec!["two", "one"]);
    }

    #[test]
    fn test_builder_chain() {
        let ctx = Context::new()
            .with_language("es")
            .with_session_id("sess-1");

        assert_eq!(ctx.language(), Some("es"));
        assert_eq!(ctx.session_id(), Some("sess-1"));
    }
}
