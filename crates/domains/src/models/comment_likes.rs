//! Comment likes: the only entity that is created and destroyed repeatedly.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use crate::error::{EntityKind, ValidationError};
use crate::fields::Fields;

/// Like request for `comment_id` (inside `thread_id`) by `owner`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCommentLike {
    pub thread_id: String,
    pub comment_id: String,
    pub owner: String,
}

impl NewCommentLike {
    pub fn from_fields(payload: &Value) -> Result<Self, ValidationError> {
        let fields = Fields::new(EntityKind::NewCommentLike, payload);
        fields.require(&["threadId", "commentId", "owner"])?;

        Ok(Self {
            thread_id: fields.string("threadId")?,
            comment_id: fields.string("commentId")?,
            owner: fields.string("owner")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddedCommentLike {
    pub id: String,
    pub comment_id: String,
    pub owner: String,
}

impl AddedCommentLike {
    pub fn from_fields(payload: &Value) -> Result<Self, ValidationError> {
        let fields = Fields::new(EntityKind::AddedCommentLike, payload);
        fields.require(&["id", "commentId", "owner"])?;

        Ok(Self {
            id: fields.string("id")?,
            comment_id: fields.string("commentId")?,
            owner: fields.string("owner")?,
        })
    }
}

/// A stored like. At most one exists per `(comment_id, owner)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentLike {
    pub id: String,
    pub comment_id: String,
    pub owner: String,
    pub date: DateTime<Utc>,
}

/// Two-state machine per `(comment_id, owner)`; a pair with no record is `Unliked`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LikeState {
    #[default]
    Unliked,
    Liked,
}

impl LikeState {
    /// State after one more toggle.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Unliked => Self::Liked,
            Self::Liked => Self::Unliked,
        }
    }

    #[must_use]
    pub const fn is_liked(self) -> bool {
        matches!(self, Self::Liked)
    }
}
