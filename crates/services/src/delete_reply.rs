//! Soft-delete a reply the caller owns.

use std::sync::Arc;

use domains::{CommentRepository, DeleteReply, ReplyRepository, Result, ThreadRepository};
use serde_json::Value;
use tracing::{debug, info, instrument};

pub struct DeleteReplyUseCase {
    threads: Arc<dyn ThreadRepository>,
    comments: Arc<dyn CommentRepository>,
    replies: Arc<dyn ReplyRepository>,
}

impl DeleteReplyUseCase {
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

    /// Expects `{ threadId, commentId, replyId, owner }`.
    #[instrument(name = "delete_reply", skip_all)]
    pub async fn execute(&self, payload: &Value) -> Result<()> {
        let request = DeleteReply::from_fields(payload)?;

        self.guard(&request)
            .await
            .inspect_err(|err| debug!(%err, "delete_reply rejected"))?;

        self.replies.delete_reply(&request.reply_id).await?;

        info!(reply_id = %request.reply_id, owner = %request.owner, "reply soft-deleted");
        Ok(())
    }

    async fn guard(&self, request: &DeleteReply) -> Result<()> {
        self.threads.verify_thread_exists(&request.thread_id).await?;
        self.comments.verify_comment_exists(&request.comment_id).await?;
        self.replies.verify_reply_exists(&request.reply_id).await?;
        self.replies
            .verify_reply_owner(&request.reply_id, &request.owner)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domains::{ForumError, MockCommentRepository, MockReplyRepository, MockThreadRepository, Resource};
    use mockall::Sequence;
    use serde_json::json;

    fn payload() -> Value {
        json!({
            "threadId": "thread-123",
            "commentId": "comment-123",
            "replyId": "comment_reply-123",
            "owner": "user-123",
        })
    }

    #[tokio::test]
    async fn orchestrates_delete_reply() {
        let mut seq = Sequence::new();
        let mut threads = MockThreadRepository::new();
        let mut comments = MockCommentRepository::new();
        let mut replies = MockReplyRepository::new();

        threads
            .expect_verify_thread_exists()
            .withf(|id| id == "thread-123")
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));
        comments
            .expect_verify_comment_exists()
            .withf(|id| id == "comment-123")
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));
        replies
            .expect_verify_reply_exists()
            .withf(|id| id == "comment_reply-123")
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));
        replies
            .expect_verify_reply_owner()
            .withf(|id, owner| id == "comment_reply-123" && owner == "user-123")
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(()));
        replies
            .expect_delete_reply()
            .withf(|id| id == "comment_reply-123")
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));

        let use_case = DeleteReplyUseCase::new(Arc::new(threads), Arc::new(comments), Arc::new(replies));
        use_case.execute(&payload()).await.unwrap();
    }

    #[tokio::test]
    async fn missing_thread_makes_zero_deeper_calls() {
        let mut threads = MockThreadRepository::new();
        let mut comments = MockCommentRepository::new();
        let mut replies = MockReplyRepository::new();

        threads
            .expect_verify_thread_exists()
            .times(1)
            .returning(|id| Err(ForumError::not_found(Resource::Thread, id)));
        comments.expect_verify_comment_exists().times(0);
        replies.expect_verify_reply_exists().times(0);
        replies.expect_verify_reply_owner().times(0);
        replies.expect_delete_reply().times(0);

        let use_case = DeleteReplyUseCase::new(Arc::new(threads), Arc::new(comments), Arc::new(replies));
        let err = use_case.execute(&payload()).await.unwrap_err();

        assert_eq!(err, ForumError::not_found(Resource::Thread, "thread-123"));
    }

    #[tokio::test]
    async fn missing_reply_is_reported_before_ownership() {
        let mut threads = MockThreadRepository::new();
        let mut comments = MockCommentRepository::new();
        let mut replies = MockReplyRepository::new();

        threads.expect_verify_thread_exists().returning(|_| Ok(()));
        comments.expect_verify_comment_exists().returning(|_| Ok(()));
        replies
            .expect_verify_reply_exists()
            .returning(|id| Err(ForumError::not_found(Resource::Reply, id)));
        replies.expect_verify_reply_owner().never();
        replies.expect_delete_reply().never();

        let use_case = DeleteReplyUseCase::new(Arc::new(threads), Arc::new(comments), Arc::new(replies));
        let err = use_case.execute(&payload()).await.unwrap_err();

        assert_eq!(err, ForumError::not_found(Resource::Reply, "comment_reply-123"));
    }

    #[tokio::test]
    async fn foreign_reply_is_not_deleted() {
        let mut threads = MockThreadRepository::new();
        let mut comments = MockCommentRepository::new();
        let mut replies = MockReplyRepository::new();

        threads.expect_verify_thread_exists().returning(|_| Ok(()));
        comments.expect_verify_comment_exists().returning(|_| Ok(()));
        replies.expect_verify_reply_exists().returning(|_| Ok(()));
        replies
            .expect_verify_reply_owner()
            .returning(|id, owner| Err(ForumError::unauthorized(Resource::Reply, id, owner)));
        replies.expect_delete_reply().never();

        let use_case = DeleteReplyUseCase::new(Arc::new(threads), Arc::new(comments), Arc::new(replies));
        let err = use_case.execute(&payload()).await.unwrap_err();

        assert_eq!(
            err,
            ForumError::unauthorized(Resource::Reply, "comment_reply-123", "user-123")
        );
    }
}
