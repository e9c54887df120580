//! Nested thread view: a thread, its comments, and each comment's replies.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::comments::Comment;
use super::content::Content;
use super::replies::Reply;
use super::threads::Thread;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReplyDetail {
    pub id: String,
    pub content: Content,
    pub date: DateTime<Utc>,
    pub username: String,
}

impl From<Reply> for ReplyDetail {
    fn from(reply: Reply) -> Self {
        Self {
            id: reply.id,
            content: reply.content,
            date: reply.date,
            username: reply.username,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentDetail {
    pub id: String,
    pub username: String,
    pub date: DateTime<Utc>,
    pub content: Content,
    pub like_count: u64,
    pub replies: Vec<ReplyDetail>,
}

impl CommentDetail {
    #[must_use]
    pub fn new(comment: Comment, replies: Vec<ReplyDetail>) -> Self {
        Self {
            id: comment.id,
            username: comment.username,
            date: comment.date,
            content: comment.content,
            like_count: comment.like_count,
            replies,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ThreadDetail {
    pub id: String,
    pub title: String,
    pub body: String,
    pub date: DateTime<Utc>,
    pub username: String,
    pub comments: Vec<CommentDetail>,
}

impl ThreadDetail {
    #[must_use]
    pub fn new(thread: Thread, comments: Vec<CommentDetail>) -> Self {
        Self {
            id: thread.id,
            title: thread.title,
            body: thread.body,
            date: thread.date,
            username: thread.username,
            comments,
        }
    }
}
