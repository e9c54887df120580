//! # Integration harness
//!
//! Wires [`UseCases`] over real adapters through [`app::wire`] so scenario
//! tests exercise the whole stack. [`Forum`] uses the in-memory store with
//! scripted ids and a clock that ticks one second per write.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Mutex;

use chrono::{DateTime, Duration, TimeZone, Utc};
use domains::{AddedComment, AddedReply, AddedThread, Result};
use serde_json::json;
use services::UseCases;
use storage_adapters::{IdGenerator, InMemoryStore};

/// Hands out the given ids in order, then falls back to a counter.
struct ScriptedIds {
    script: Mutex<VecDeque<String>>,
    fallback: AtomicI64,
}

impl IdGenerator for ScriptedIds {
    fn next_id(&self) -> String {
        let scripted = self.script.lock().ok().and_then(|mut queue| queue.pop_front());
        scripted.unwrap_or_else(|| format!("gen{}", self.fallback.fetch_add(1, Ordering::SeqCst)))
    }
}

pub fn epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2021, 8, 8, 7, 19, 9)
        .single()
        .unwrap_or_default()
}

pub struct Forum {
    pub use_cases: UseCases,
    pub store: InMemoryStore,
}

impl Forum {
    pub fn new() -> Self {
        Self::scripted(&[])
    }

    /// `ids` are consumed by successive writes of any kind, so
    /// `["123", "123"]` yields `thread-123` then `comment-123`.
    pub fn scripted(ids: &[&str]) -> Self {
        let ids = ScriptedIds {
            script: Mutex::new(ids.iter().map(|id| (*id).to_string()).collect()),
            fallback: AtomicI64::new(1),
        };
        let ticks = AtomicI64::new(0);
        let clock = move || epoch() + Duration::seconds(ticks.fetch_add(1, Ordering::SeqCst));

        let store = InMemoryStore::with_generators(ids, clock);
        Self {
            use_cases: app::wire(store.clone()),
            store,
        }
    }

    /// Same ids, frozen clock: every write shares one timestamp.
    pub fn frozen(ids: &[&str]) -> Self {
        let ids = ScriptedIds {
            script: Mutex::new(ids.iter().map(|id| (*id).to_string()).collect()),
            fallback: AtomicI64::new(1),
        };
        let store = InMemoryStore::with_generators(ids, epoch);
        Self {
            use_cases: app::wire(store.clone()),
            store,
        }
    }

    pub async fn thread(&self, owner: &str) -> Result<AddedThread> {
        self.use_cases
            .add_thread
            .execute(&json!({ "title": "A thread", "body": "Thread body", "owner": owner }))
            .await
    }

    pub async fn comment(&self, thread_id: &str, owner: &str, content: &str) -> Result<AddedComment> {
        self.use_cases
            .add_comment
            .execute(&json!({ "content": content, "threadId": thread_id, "owner": owner }))
            .await
    }

    pub async fn reply(&self, thread_id: &str, comment_id: &str, owner: &str, content: &str) -> Result<AddedReply> {
        self.use_cases
            .add_reply
            .execute(&json!({
                "content": content,
                "threadId": thread_id,
                "commentId": comment_id,
                "owner": owner,
            }))
            .await
    }
}

impl Default for Forum {
    fn default() -> Self {
        Self::new()
    }
}
