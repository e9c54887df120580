//! Soft-delete a comment the caller owns.

use std::sync::Arc;

use domains::{CommentRepository, DeleteComment, Result, ThreadRepository};
use serde_json::Value;
use tracing::{debug, info, instrument};

pub struct DeleteCommentUseCase {
    threads: Arc<dyn ThreadRepository>,
    comments: Arc<dyn CommentRepository>,
}

impl DeleteCommentUseCase {
    pub fn new(threads: Arc<dyn ThreadRepository>, comments: Arc<dyn CommentRepository>) -> Self {
        Self { threads, comments }
    }

    /// Expects `{ threadId, commentId, owner }`.
    ///
    /// Existence is checked top-down before ownership, so a caller naming a
    /// missing thread sees `NotFound(Thread)` and never `Authorization`.
    #[instrument(name = "delete_comment", skip_all)]
    pub async fn execute(&self, payload: &Value) -> Result<()> {
        let request = DeleteComment::from_fields(payload)?;

        self.guard(&request)
            .await
            .inspect_err(|err| debug!(%err, "delete_comment rejected"))?;

        self.comments.delete_comment(&request.comment_id).await?;

        info!(comment_id = %request.comment_id, owner = %request.owner, "comment soft-deleted");
        Ok(())
    }

    async fn guard(&self, request: &DeleteComment) -> Result<()> {
        self.threads.verify_thread_exists(&request.thread_id).await?;
        self.comments.verify_comment_exists(&request.comment_id).await?;
        self.comments
            .verify_comment_owner(&request.comment_id, &request.owner)
            .await
    }
}
