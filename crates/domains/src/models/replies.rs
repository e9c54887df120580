//! Reply entities. A reply hangs off exactly one comment for its whole life.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use super::content::{Content, ContentKind};
use crate::error::{EntityKind, ValidationError};
use crate::fields::Fields;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReply {
    pub content: String,
    pub thread_id: String,
    pub comment_id: String,
    pub owner: String,
}

impl NewReply {
    pub fn from_fields(payload: &Value) -> Result<Self, ValidationError> {
        let fields = Fields::new(EntityKind::NewReply, payload);
        fields.require(&["content", "threadId", "commentId", "owner"])?;

        Ok(Self {
            content: fields.string("content")?,
            thread_id: fields.string("threadId")?,
            comment_id: fields.string("commentId")?,
            owner: fields.string("owner")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AddedReply {
    pub id: String,
    pub content: String,
    pub owner: String,
}

impl AddedReply {
    pub fn from_fields(payload: &Value) -> Result<Self, ValidationError> {
        let fields = Fields::new(EntityKind::AddedReply, payload);
        fields.require(&["id", "content", "owner"])?;

        Ok(Self {
            id: fields.string("id")?,
            content: fields.string("content")?,
            owner: fields.string("owner")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteReply {
    pub thread_id: String,
    pub comment_id: String,
    pub reply_id: String,
    pub owner: String,
}

impl DeleteReply {
    pub fn from_fields(payload: &Value) -> Result<Self, ValidationError> {
        let fields = Fields::new(EntityKind::DeleteReply, payload);
        fields.require(&["threadId", "commentId", "replyId", "owner"])?;

        Ok(Self {
            thread_id: fields.string("threadId")?,
            comment_id: fields.string("commentId")?,
            reply_id: fields.string("replyId")?,
            owner: fields.string("owner")?,
        })
    }
}

/// A reply row as storage holds it, before redaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplyRecord {
    pub id: String,
    pub comment_id: String,
    pub owner: String,
    pub username: String,
    pub date: DateTime<Utc>,
    pub content: String,
    pub is_deleted: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Reply {
    pub id: String,
    pub comment_id: String,
    pub owner: String,
    pub username: String,
    pub date: DateTime<Utc>,
    pub content: Content,
}

impl Reply {
    pub fn from_fields(payload: &Value) -> Result<Self, ValidationError> {
        let fields = Fields::new(EntityKind::Reply, payload);
        fields.require(&["id", "commentId", "owner", "username", "date", "content", "isDeleted"])?;

        let record = ReplyRecord {
            id: fields.string("id")?,
            comment_id: fields.string("commentId")?,
            owner: fields.string("owner")?,
            username: fields.string("username")?,
            date: fields.timestamp("date")?,
            content: fields.string("content")?,
            is_deleted: fields.flag("isDeleted")?,
        };
        Ok(record.into())
    }

    #[must_use]
    pub const fn is_deleted(&self) -> bool {
        self.content.is_redacted()
    }
}

impl From<ReplyRecord> for Reply {
    fn from(record: ReplyRecord) -> Self {
        Self {
            content: Content::materialize(ContentKind::Reply, record.content, record.is_deleted),
            id: record.id,
            comment_id: record.comment_id,
            owner: record.owner,
            username: record.username,
            date: record.date,
        }
    }
}
