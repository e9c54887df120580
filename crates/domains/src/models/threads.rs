//! Thread entities: the creation payload, its acknowledgment, and the stored record.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use crate::error::{EntityKind, ValidationError};
use crate::fields::Fields;

/// Caller-supplied fields for a new thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewThread {
    pub title: String,
    pub body: String,
    pub owner: String,
}

impl NewThread {
    pub fn from_fields(payload: &Value) -> Result<Self, ValidationError> {
        let fields = Fields::new(EntityKind::NewThread, payload);
        fields.require(&["title", "body", "owner"])?;

        Ok(Self {
            title: fields.string("title")?,
            body: fields.string("body")?,
            owner: fields.string("owner")?,
        })
    }
}

/// Creation acknowledgment returned by the thread store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AddedThread {
    pub id: String,
    pub title: String,
    pub owner: String,
}

impl AddedThread {
    pub fn from_fields(payload: &Value) -> Result<Self, ValidationError> {
        let fields = Fields::new(EntityKind::AddedThread, payload);
        fields.require(&["id", "title", "owner"])?;

        Ok(Self {
            id: fields.string("id")?,
            title: fields.string("title")?,
            owner: fields.string("owner")?,
        })
    }
}

/// A thread as read back from storage. `username` is the owner's display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Thread {
    pub id: String,
    pub title: String,
    pub body: String,
    pub date: DateTime<Utc>,
    pub owner: String,
    pub username: String,
}

impl Thread {
    pub fn from_fields(payload: &Value) -> Result<Self, ValidationError> {
        let fields = Fields::new(EntityKind::Thread, payload);
        fields.require(&["id", "title", "body", "date", "owner", "username"])?;

        Ok(Self {
            id: fields.string("id")?,
            title: fields.string("title")?,
            body: fields.string("body")?,
            date: fields.timestamp("date")?,
            owner: fields.string("owner")?,
            username: fields.string("username")?,
        })
    }
}

/// Request for the nested thread view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThreadDetailQuery {
    pub thread_id: String,
}

impl ThreadDetailQuery {
    pub fn from_fields(payload: &Value) -> Result<Self, ValidationError> {
        let fields = Fields::new(EntityKind::ThreadDetailQuery, payload);
        fields.require(&["threadId"])?;

        Ok(Self {
            thread_id: fields.string("threadId")?,
        })
    }
}
