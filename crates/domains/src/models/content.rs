//! Comment and reply bodies as seen by readers.
//!
//! A soft-deleted body is never carried around as swapped text: it becomes
//! [`Content::Redacted`] at materialization time and only renders as a
//! placeholder when displayed or serialized.

use serde::{Serialize, Serializer};
use std::fmt;

pub const DELETED_COMMENT_PLACEHOLDER: &str = "**komentar telah dihapus**";
pub const DELETED_REPLY_PLACEHOLDER: &str = "**balasan telah dihapus**";

/// Which kind of post a body belongs to; decides the placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    Comment,
    Reply,
}

impl ContentKind {
    #[must_use]
    pub const fn placeholder(self) -> &'static str {
        match self {
            Self::Comment => DELETED_COMMENT_PLACEHOLDER,
            Self::Reply => DELETED_REPLY_PLACEHOLDER,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content {
    Visible(String),
    Redacted(ContentKind),
}

impl Content {
    /// The single redaction rule: a deleted body is dropped, a live one is kept verbatim.
    #[must_use]
    pub fn materialize(kind: ContentKind, text: String, is_deleted: bool) -> Self {
        if is_deleted {
            Self::Redacted(kind)
        } else {
            Self::Visible(text)
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Visible(text) => text,
            Self::Redacted(kind) => kind.placeholder(),
        }
    }

    #[must_use]
    pub const fn is_redacted(&self) -> bool {
        matches!(self, Self::Redacted(_))
    }
}

impl fmt::Display for Content {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Content {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deleted_body_is_replaced_per_kind() {
        let comment = Content::materialize(ContentKind::Comment, "lorem".into(), true);
        let reply = Content::materialize(ContentKind::Reply, "ipsum".into(), true);

        assert!(comment.is_redacted());
        assert_eq!(comment.as_str(), DELETED_COMMENT_PLACEHOLDER);
        assert_eq!(reply.as_str(), DELETED_REPLY_PLACEHOLDER);
    }

    #[test]
    fn live_body_is_kept_verbatim() {
        let content = Content::materialize(ContentKind::Comment, "lorem ipsum".into(), false);

        assert_eq!(content, Content::Visible("lorem ipsum".into()));
        assert_eq!(serde_json::to_value(&content).unwrap(), "lorem ipsum");
    }
}
