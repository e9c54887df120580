//! # Core Traits (Ports)
//!
//! Storage contracts the use cases depend on. Every storage technology
//! implements all four; the core only ever sees `Arc<dyn …>`.

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{
    AddedComment, AddedCommentLike, AddedReply, AddedThread, Comment, LikeState, NewComment,
    NewCommentLike, NewReply, NewThread, Reply, Thread,
};

/// Persistence contract for threads.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait ThreadRepository: Send + Sync {
    async fn add_thread(&self, new_thread: &NewThread) -> Result<AddedThread>;

    /// Fails with `NotFound(Thread)` when no thread has this id.
    async fn verify_thread_exists(&self, id: &str) -> Result<()>;

    async fn get_thread_by_id(&self, id: &str) -> Result<Thread>;
}

/// Persistence contract for comments.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait CommentRepository: Send + Sync {
    async fn add_comment(&self, new_comment: &NewComment) -> Result<AddedComment>;

    /// Soft delete: flips the deletion flag and keeps the row.
    async fn delete_comment(&self, id: &str) -> Result<()>;

    /// Fails with `Authorization` when `owner` did not write the comment.
    async fn verify_comment_owner(&self, id: &str, owner: &str) -> Result<()>;

    async fn verify_comment_exists(&self, id: &str) -> Result<()>;

    /// All comments of a thread, deleted ones included, oldest first, each
    /// carrying its current like count.
    async fn get_comments_by_thread_id(&self, thread_id: &str) -> Result<Vec<Comment>>;
}

/// Persistence contract for replies.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait ReplyRepository: Send + Sync {
    async fn add_reply(&self, new_reply: &NewReply) -> Result<AddedReply>;

    /// Soft delete, like [`CommentRepository::delete_comment`].
    async fn delete_reply(&self, id: &str) -> Result<()>;

    async fn verify_reply_exists(&self, id: &str) -> Result<()>;

    async fn verify_reply_owner(&self, id: &str, owner: &str) -> Result<()>;

    /// Every reply under every comment of the thread, oldest first.
    async fn get_replies_by_thread_id(&self, thread_id: &str) -> Result<Vec<Reply>>;
}

/// Persistence contract for comment likes.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait CommentLikeRepository: Send + Sync {
    async fn add_comment_like(&self, new_like: &NewCommentLike) -> Result<AddedCommentLike>;

    async fn delete_comment_like(&self, comment_id: &str, owner: &str) -> Result<()>;

    /// Fails with `Authorization` when the comment's likes belong to someone
    /// else, `NotFound(CommentLike)` when the comment has no likes at all.
    async fn verify_comment_like_owner(&self, comment_id: &str, owner: &str) -> Result<()>;

    async fn is_comment_liked(&self, comment_id: &str, owner: &str) -> Result<bool>;

    /// Flips the like for `(comment_id, owner)` in one atomic write and
    /// returns the resulting state. Insert under the uniqueness key; on
    /// conflict, delete instead. There is no separate read step.
    async fn toggle_comment_like(&self, new_like: &NewCommentLike) -> Result<LikeState>;
}
