//! Comment on an existing thread.

use std::sync::Arc;

use domains::{AddedComment, CommentRepository, NewComment, Result, ThreadRepository};
use serde_json::Value;
use tracing::{debug, info, instrument};

pub struct AddCommentUseCase {
    threads: Arc<dyn ThreadRepository>,
    comments: Arc<dyn CommentRepository>,
}

impl AddCommentUseCase {
    pub fn new(threads: Arc<dyn ThreadRepository>, comments: Arc<dyn CommentRepository>) -> Self {
        Self { threads, comments }
    }

    /// Expects `{ content, threadId, owner }`.
    #[instrument(name = "add_comment", skip_all)]
    pub async fn execute(&self, payload: &Value) -> Result<AddedComment> {
        let new_comment = NewComment::from_fields(payload)?;

        self.threads
            .verify_thread_exists(&new_comment.thread_id)
            .await
            .inspect_err(|err| debug!(%err, "add_comment rejected"))?;

        let added = self.comments.add_comment(&new_comment).await?;

        info!(comment_id = %added.id, thread_id = %new_comment.thread_id, "comment created");
        Ok(added)
    }
}
