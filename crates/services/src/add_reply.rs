//! Reply to a comment.

use std::sync::Arc;

use domains::{AddedReply, CommentRepository, NewReply, ReplyRepository, Result, ThreadRepository};
use serde_json::Value;
use tracing::{debug, info, instrument};

pub struct AddReplyUseCase {
    threads: Arc<dyn ThreadRepository>,
    comments: Arc<dyn CommentRepository>,
    replies: Arc<dyn ReplyRepository>,
}

impl AddReplyUseCase {
    pub fn new(
        threads: Arc<dyn ThreadRepository>,
        comments: Arc<dyn CommentRepository>,
        replies: Arc<dyn ReplyRepository>,
    ) -> Self {
        Self {
            threads,
            comments,
            replies,
        }
    }

    /// Expects `{ content, threadId, commentId, owner }`.
    #[instrument(name = "add_reply", skip_all)]
    pub async fn execute(&self, payload: &Value) -> Result<AddedReply> {
        let new_reply = NewReply::from_fields(payload)?;

        self.guard(&new_reply)
            .await
            .inspect_err(|err| debug!(%err, "add_reply rejected"))?;

        let added = self.replies.add_reply(&new_reply).await?;

        info!(reply_id = %added.id, comment_id = %new_reply.comment_id, "reply created");
        Ok(added)
    }

    async fn guard(&self, new_reply: &NewReply) -> Result<()> {
        self.threads.verify_thread_exists(&new_reply.thread_id).await?;
        self.comments.verify_comment_exists(&new_reply.comment_id).await
    }
}
