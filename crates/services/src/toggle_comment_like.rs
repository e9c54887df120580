//! Like or unlike a comment.
//!
//! The decision between insert and delete belongs to the store's single
//! conditional write, so two concurrent toggles can never leave two likes for
//! the same `(comment, owner)` pair.

use std::sync::Arc;

use domains::{CommentLikeRepository, CommentRepository, LikeState, NewCommentLike, Result, ThreadRepository};
use serde_json::Value;
use tracing::{debug, info, instrument};

pub struct ToggleCommentLikeUseCase {
    threads: Arc<dyn ThreadRepository>,
    comments: Arc<dyn CommentRepository>,
    likes: Arc<dyn CommentLikeRepository>,
}

impl ToggleCommentLikeUseCase {
    pub fn new(
        threads: Arc<dyn ThreadRepository>,
        comments: Arc<dyn CommentRepository>,
        likes: Arc<dyn CommentLikeRepository>,
    ) -> Self {
        Self {
            threads,
            comments,
            likes,
        }
    }

    /// Expects `{ threadId, commentId, owner }` and returns the pair's new state.
    #[instrument(name = "toggle_comment_like", skip_all)]
    pub async fn execute(&self, payload: &Value) -> Result<LikeState> {
        let new_like = NewCommentLike::from_fields(payload)?;

        self.guard(&new_like)
            .await
            .inspect_err(|err| debug!(%err, "toggle_comment_like rejected"))?;

        let state = self.likes.toggle_comment_like(&new_like).await?;

        info!(
            comment_id = %new_like.comment_id,
            owner = %new_like.owner,
            liked = state.is_liked(),
            "comment like toggled"
        );
        Ok(state)
    }

    async fn guard(&self, new_like: &NewCommentLike) -> Result<()> {
        self.threads.verify_thread_exists(&new_like.thread_id).await?;
        self.comments.verify_comment_exists(&new_like.comment_id).await
    }
}
