//! Comment entities.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use super::content::{Content, ContentKind};
use crate::error::{EntityKind, ValidationError};
use crate::fields::Fields;

/// Caller-supplied fields for a new comment on `thread_id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewComment {
    pub content: String,
    pub thread_id: String,
    pub owner: String,
}

impl NewComment {
    pub fn from_fields(payload: &Value) -> Result<Self, ValidationError> {
        let fields = Fields::new(EntityKind::NewComment, payload);
        fields.require(&["content", "threadId", "owner"])?;

        Ok(Self {
            content: fields.string("content")?,
            thread_id: fields.string("threadId")?,
            owner: fields.string("owner")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AddedComment {
    pub id: String,
    pub content: String,
    pub owner: String,
}

impl AddedComment {
    pub fn from_fields(payload: &Value) -> Result<Self, ValidationError> {
        let fields = Fields::new(EntityKind::AddedComment, payload);
        fields.require(&["id", "content", "owner"])?;

        Ok(Self {
            id: fields.string("id")?,
            content: fields.string("content")?,
            owner: fields.string("owner")?,
        })
    }
}

/// Soft-delete request for a comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteComment {
    pub thread_id: String,
    pub comment_id: String,
    pub owner: String,
}

impl DeleteComment {
    pub fn from_fields(payload: &Value) -> Result<Self, ValidationError> {
        let fields = Fields::new(EntityKind::DeleteComment, payload);
        fields.require(&["threadId", "commentId", "owner"])?;

        Ok(Self {
            thread_id: fields.string("threadId")?,
            comment_id: fields.string("commentId")?,
            owner: fields.string("owner")?,
        })
    }
}

/// A comment row exactly as storage holds it, before redaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentRecord {
    pub id: String,
    pub thread_id: String,
    pub owner: String,
    pub username: String,
    pub date: DateTime<Utc>,
    pub content: String,
    pub is_deleted: bool,
    pub like_count: u64,
}

/// A comment as presented to readers.
///
/// Built only through [`From<CommentRecord>`] (or [`Comment::from_fields`], which
/// goes through it), so redaction is applied the same way for every source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: String,
    pub thread_id: String,
    pub owner: String,
    pub username: String,
    pub date: DateTime<Utc>,
    pub content: Content,
    pub like_count: u64,
}

impl Comment {
    pub fn from_fields(payload: &Value) -> Result<Self, ValidationError> {
        let fields = Fields::new(EntityKind::Comment, payload);
        fields.require(&[
            "id",
            "threadId",
            "owner",
            "username",
            "date",
            "content",
            "isDeleted",
            "likeCount",
        ])?;

        let record = CommentRecord {
            id: fields.string("id")?,
            thread_id: fields.string("threadId")?,
            owner: fields.string("owner")?,
            username: fields.string("username")?,
            date: fields.timestamp("date")?,
            content: fields.string("content")?,
            is_deleted: fields.flag("isDeleted")?,
            like_count: fields.count("likeCount")?,
        };
        Ok(record.into())
    }

    #[must_use]
    pub const fn is_deleted(&self) -> bool {
        self.content.is_redacted()
    }
}

impl From<CommentRecord> for Comment {
    fn from(record: CommentRecord) -> Self {
        Self {
            content: Content::materialize(ContentKind::Comment, record.content, record.is_deleted),
            id: record.id,
            thread_id: record.thread_id,
            owner: record.owner,
            username: record.username,
            date: record.date,
            like_count: record.like_count,
        }
    }
}
