//! # In-memory storage
//!
//! A process-local implementation of every storage port, backed by `DashMap`.
//! One [`InMemoryStore`] serves all four traits; clones share the same tables.
//!
//! Likes are indexed by comment, then by owner. The inner map gives the
//! one-like-per-pair invariant the same structural backing the `UNIQUE`
//! constraint gives the PostgreSQL adapter, and a comment's like count is
//! the size of its inner map.

mod comment_likes;
mod comments;
mod replies;
mod threads;

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use domains::CommentLike;

use crate::generators::{Clock, IdGenerator, SystemClock, UuidIds};

#[derive(Debug, Clone)]
struct StoredThread {
    id: String,
    title: String,
    body: String,
    date: DateTime<Utc>,
    owner: String,
}

#[derive(Debug, Clone)]
struct StoredComment {
    id: String,
    thread_id: String,
    owner: String,
    date: DateTime<Utc>,
    content: String,
    is_deleted: bool,
}

#[derive(Debug, Clone)]
struct StoredReply {
    id: String,
    comment_id: String,
    owner: String,
    date: DateTime<Utc>,
    content: String,
    is_deleted: bool,
}

#[derive(Default)]
struct Tables {
    usernames: DashMap<String, String>,
    threads: DashMap<String, StoredThread>,
    comments: DashMap<String, StoredComment>,
    replies: DashMap<String, StoredReply>,
    /// comment id -> owner -> like
    likes: DashMap<String, HashMap<String, CommentLike>>,
}

#[derive(Clone)]
pub struct InMemoryStore {
    tables: Arc<Tables>,
    ids: Arc<dyn IdGenerator>,
    clock: Arc<dyn Clock>,
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::with_generators(UuidIds, SystemClock)
    }

    /// Pins the id and time sources, e.g. for reproducible tests.
    pub fn with_generators(ids: impl IdGenerator + 'static, clock: impl Clock + 'static) -> Self {
        Self {
            tables: Arc::new(Tables::default()),
            ids: Arc::new(ids),
            clock: Arc::new(clock),
        }
    }

    /// Records the display name shown for `user_id`. Users are owned by the
    /// auth subsystem; unknown owners are displayed by id.
    pub fn register_user(&self, user_id: impl Into<String>, username: impl Into<String>) {
        self.tables.usernames.insert(user_id.into(), username.into());
    }

    fn username_of(&self, owner: &str) -> String {
        self.tables
            .usernames
            .get(owner)
            .map(|name| name.value().clone())
            .unwrap_or_else(|| owner.to_string())
    }

    fn next_id(&self, prefix: &str) -> String {
        format!("{prefix}-{}", self.ids.next_id())
    }

    fn like_count(&self, comment_id: &str) -> u64 {
        self.tables
            .likes
            .get(comment_id)
            .map_or(0, |owners| owners.len() as u64)
    }
}
