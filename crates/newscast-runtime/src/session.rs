//! Per-session contexts
//!
//! Each session owns one [`Context`] behind an async mutex. Holding the lock
//! for a whole dispatch keeps calls within a session strictly sequential,
//! while different sessions proceed independently.

use crate::dispatcher::{ToolDispatcher, ToolOutcome};
use chrono::{DateTime, Duration, Utc};
use newscast_core::{Context, Result, ToolCall};
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};
use tokio::sync::Mutex;
use tracing::{debug, info};

struct SessionEntry {
    context: Arc<Mutex<Context>>,
    last_active: DateTime<Utc>,
}

impl SessionEntry {
    fn is_expired(&self, ttl: Duration, now: DateTime<Utc>) -> bool {
        now - self.last_active > ttl
    }
}

fn sweep(sessions: &mut HashMap<String, SessionEntry>, ttl: Duration, now: DateTime<Utc>) -> usize {
    let initial_count = sessions.len();
    sessions.retain(|_, entry| !entry.is_expired(ttl, now));
    initial_count - sessions.len()
}

/// Maps session ids to their contexts
pub struct SessionStore {
    sessions: RwLock<HashMap<String, SessionEntry>>,
    language: Option<String>,
    ttl: Duration,
}

impl SessionStore {
    /// Store with a one hour idle timeout
    pub fn new() -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            language: None,
            ttl: Duration::seconds(3600),
        }
    }

    /// Set the idle time after which a session is swept
    pub fn with_ttl(mut self, ttl_seconds: i64) -> Self {
        self.ttl = Duration::seconds(ttl_seconds);
        self
    }

    /// Language preference stamped on newly created sessions
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    /// Context for `session_id`, created empty on first use
    ///
    /// Starting a new session sweeps sessions idle for longer than the TTL.
    pub fn get_or_create(&self, session_id: &str) -> Arc<Mutex<Context>> {
        let now = Utc::now();
        let mut sessions = self.sessions.write().unwrap_or_else(PoisonError::into_inner);
        if !sessions.contains_key(session_id) {
            let removed = sweep(&mut sessions, self.ttl, now);
            if removed > 0 {
                debug!(removed = removed, "Swept idle sessions");
            }
        }
        let entry = sessions.entry(session_id.to_string()).or_insert_with(|| {
            info!(session_id = %session_id, "Starting session");
            let mut context = Context::new().with_session_id(session_id);
            if let Some(language) = &self.language {
                context = context.with_language(language.clone());
            }
            SessionEntry {
                context: Arc::new(Mutex::new(context)),
                last_active: now,
            }
        });
        entry.last_active = now;
        entry.context.clone()
    }

    /// Context for an existing session
    pub fn get(&self, session_id: &str) -> Option<Arc<Mutex<Context>>> {
        let sessions = self.sessions.read().unwrap_or_else(PoisonError::into_inner);
        sessions.get(session_id).map(|entry| entry.context.clone())
    }

    /// Dispatch a call within `session_id`, creating the session if needed
    ///
    /// The session's context stays locked until the dispatch returns.
    pub async fn dispatch(
        &self,
        dispatcher: &ToolDispatcher,
        session_id: &str,
        call: ToolCall,
    ) -> Result<ToolOutcome> {
        let context = self.get_or_create(session_id);
        let mut ctx = context.lock().await;
        dispatcher.dispatch(call, &mut ctx).await
    }

    /// Tear a session and its audit log down
    ///
    /// Returns whether the session existed.
    pub fn end(&self, session_id: &str) -> bool {
        let mut sessions = self.sessions.write().unwrap_or_else(PoisonError::into_inner);
        let removed = sessions.remove(session_id).is_some();
        if removed {
            info!(session_id = %session_id, "Ended session");
        }
        removed
    }

    /// Ids of all live sessions, sorted
    pub fn session_ids(&self) -> Vec<String> {
        let sessions = self.sessions.read().unwrap_or_else(PoisonError::into_inner);
        let mut ids: Vec<_> = sessions.keys().cloned().collect();
        ids.sort();
        ids
    }

    /// Number of live sessions
    pub fn len(&self) -> usize {
        self.sessions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Whether no session is live
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use newscast_hooks::{HookConfig, HookPipeline, SourcePolicy};
    use newscast_tools::{Tool, ToolRegistry};
    use serde_json::{Value, json};

    struct CitingSearch;

    #[async_trait]
    impl Tool for CitingSearch {
        async fn execute(&self, params: Value) -> Result<Value> {
            let query = params["query"].as_str().unwrap_or_default();
            let host = query.split_whitespace().next().unwrap_or("none");
            Ok(json!(format!("Result from https://{host}.com/story")))
        }

        fn name(&self) -> &str {
            "google_search"
        }

        fn description(&self) -> &str {
            "cites a host derived from the query"
        }

        fn input_schema(&self) -> Value {
            json!({"type": "object"})
        }
    }

    fn dispatcher() -> ToolDispatcher {
        let registry = ToolRegistry::new();
        registry.register(Arc::new(CitingSearch));
        ToolDispatcher::new(
            Arc::new(registry),
            HookPipeline::from_config(&HookConfig {
                source_policy: SourcePolicy::Unrestricted,
                annotate_sources: true,
                ..HookConfig::default()
            }),
        )
    }

    fn search(query: &str) -> ToolCall {
        ToolCall::new("google_search").with_arg("query", query)
    }

    #[tokio::test]
    async fn test_sessions_are_isolated() {
        let store = SessionStore::new();
        let dispatcher = dispatcher();

        store.dispatch(&dispatcher, "alice", search("alpha")).await.unwrap();
        store.dispatch(&dispatcher, "alice", search("beta")).await.unwrap();
        let bob = store.dispatch(&dispatcher, "bob", search("gamma")).await.unwrap();

        assert_eq!(
            bob.result["process_log"],
            json!(["Action: Sourced news from the following domains: gamma.com."])
        );

        let alice = store.get("alice").unwrap();
        let mut alice = alice.lock().await;
        assert_eq!(
            alice.audit_log().snapshot(),
            vec![
                "Action: Sourced news from the following domains: beta.com.",
                "Action: Sourced news from the following domains: alpha.com.",
            ]
        );
    }

    #[tokio::test]
    async fn test_end_discards_log() {
        let store = SessionStore::new().with_language("es");
        let dispatcher = dispatcher();

        store.dispatch(&dispatcher, "s1", search("alpha")).await.unwrap();
        assert!(store.end("s1"));
        assert!(!store.end("s1"));
        assert!(store.get("s1").is_none());

        let fresh = store.get_or_create("s1");
        let fresh = fresh.lock().await;
        assert!(fresh.peek_audit_log().is_none());
        assert_eq!(fresh.language(), Some("es"));
        assert_eq!(fresh.session_id(), Some("s1"));
    }

    #[test]
    fn test_new_session_sweeps_idle_ones() {
        let store = SessionStore::new().with_ttl(-1);
        store.get_or_create("a");
        store.get_or_create("b");
        assert_eq!(store.session_ids(), vec!["b"]);

        let store = SessionStore::new();
        store.get_or_create("a");
        store.get_or_create("b");
        assert_eq!(store.session_ids(), vec!["a", "b"]);
    }

    #[test]
    fn test_get_or_create_reuses_context() {
        let store = SessionStore::new();
        let first = store.get_or_create("a");
        let second = store.get_or_create("a");

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(store.len(), 1);
    }
}
