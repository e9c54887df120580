//! # ForumError
//!
//! Centralized error handling for the forum core.
//! Every use case surfaces one of these kinds, unmodified, to its caller.

use std::fmt;
use thiserror::Error;

/// Entities that can be built from a raw field mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    NewThread,
    AddedThread,
    Thread,
    ThreadDetailQuery,
    NewComment,
    AddedComment,
    Comment,
    DeleteComment,
    NewReply,
    AddedReply,
    Reply,
    DeleteReply,
    NewCommentLike,
    AddedCommentLike,
}

impl EntityKind {
    /// Upper-snake prefix used in validation error codes.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::NewThread => "NEW_THREAD",
            Self::AddedThread => "ADDED_THREAD",
            Self::Thread => "THREAD",
            Self::ThreadDetailQuery => "DETAIL_THREAD",
            Self::NewComment => "NEW_COMMENT",
            Self::AddedComment => "ADDED_COMMENT",
            Self::Comment => "COMMENT",
            Self::DeleteComment => "DELETE_COMMENT",
            Self::NewReply => "NEW_REPLY",
            Self::AddedReply => "ADDED_REPLY",
            Self::Reply => "REPLY",
            Self::DeleteReply => "DELETE_REPLY",
            Self::NewCommentLike => "NEW_COMMENT_LIKE",
            Self::AddedCommentLike => "ADDED_COMMENT_LIKE",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Payload rejected by an entity validator before any storage call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is absent, null or empty.
    #[error("{entity}.NOT_CONTAIN_NEEDED_PROPERTY: missing `{field}`")]
    MissingProperty {
        entity: EntityKind,
        field: &'static str,
    },

    /// A field is present but holds the wrong primitive type.
    #[error("{entity}.NOT_MEET_DATA_TYPE_SPECIFICATION: `{field}` has the wrong type")]
    InvalidType {
        entity: EntityKind,
        field: &'static str,
    },
}

impl ValidationError {
    #[must_use]
    pub const fn entity(&self) -> EntityKind {
        match self {
            Self::MissingProperty { entity, .. } | Self::InvalidType { entity, .. } => *entity,
        }
    }

    /// Stable code for the transport layer, e.g. `NEW_THREAD.NOT_CONTAIN_NEEDED_PROPERTY`.
    #[must_use]
    pub fn code(&self) -> String {
        let suffix = match self {
            Self::MissingProperty { .. } => "NOT_CONTAIN_NEEDED_PROPERTY",
            Self::InvalidType { .. } => "NOT_MEET_DATA_TYPE_SPECIFICATION",
        };
        format!("{}.{suffix}", self.entity())
    }
}

/// Stored resources referenced by the guard chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Thread,
    Comment,
    Reply,
    CommentLike,
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Thread => "thread",
            Self::Comment => "comment",
            Self::Reply => "reply",
            Self::CommentLike => "comment like",
        })
    }
}

/// Coarse category of a [`ForumError`], used by the transport layer to pick a status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    NotFound,
    Authorization,
    Storage,
}

/// The primary error type for all forum operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ForumError {
    /// Payload missing a field or carrying a wrong-typed one
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Referenced thread, comment, reply or like does not exist
    #[error("{resource} not found with ID {id}")]
    NotFound { resource: Resource, id: String },

    /// Caller does not own the resource being mutated
    #[error("unauthorized: {owner} does not own {resource} {id}")]
    Authorization {
        resource: Resource,
        id: String,
        owner: String,
    },

    /// Infrastructure failure reported by a storage adapter (e.g. DB down)
    #[error("internal storage error: {0}")]
    Storage(String),
}

impl ForumError {
    pub fn not_found(resource: Resource, id: impl Into<String>) -> Self {
        Self::NotFound {
            resource,
            id: id.into(),
        }
    }

    pub fn unauthorized(resource: Resource, id: impl Into<String>, owner: impl Into<String>) -> Self {
        Self::Authorization {
            resource,
            id: id.into(),
            owner: owner.into(),
        }
    }

    pub fn storage(err: impl fmt::Display) -> Self {
        Self::Storage(err.to_string())
    }

    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::Authorization { .. } => ErrorKind::Authorization,
            Self::Storage(_) => ErrorKind::Storage,
        }
    }
}

/// A specialized Result type for forum logic.
pub type Result<T> = std::result::Result<T, ForumError>;
