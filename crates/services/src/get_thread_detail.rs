//! Nested thread view assembled from the thread, comment and reply stores.

use std::collections::HashMap;
use std::sync::Arc;

use domains::{
    Comment, CommentDetail, CommentRepository, Reply, ReplyDetail, ReplyRepository, Result, Thread,
    ThreadDetail, ThreadDetailQuery, ThreadRepository,
};
use serde_json::Value;
use tracing::{debug, instrument};

pub struct GetThreadDetailUseCase {
    threads: Arc<dyn ThreadRepository>,
    comments: Arc<dyn CommentRepository>,
    replies: Arc<dyn ReplyRepository>,
}

impl GetThreadDetailUseCase {
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

    /// Expects `{ threadId }`.
    #[instrument(name = "get_thread_detail", skip_all)]
    pub async fn execute(&self, payload: &Value) -> Result<ThreadDetail> {
        let query = ThreadDetailQuery::from_fields(payload)?;
        let thread_id = query.thread_id.as_str();

        self.threads
            .verify_thread_exists(thread_id)
            .await
            .inspect_err(|err| debug!(%err, "get_thread_detail rejected"))?;

        // Independent reads; combined only once all three are back.
        let (thread, comments, replies) = tokio::try_join!(
            self.threads.get_thread_by_id(thread_id),
            self.comments.get_comments_by_thread_id(thread_id),
            self.replies.get_replies_by_thread_id(thread_id),
        )?;

        Ok(assemble(thread, comments, replies))
    }
}

/// Groups replies under their comment. Comments and replies are ordered by
/// `(date, id)` ascending whatever order storage returned them in; deleted
/// entries keep their slot.
fn assemble(thread: Thread, mut comments: Vec<Comment>, mut replies: Vec<Reply>) -> ThreadDetail {
    comments.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.id.cmp(&b.id)));
    replies.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.id.cmp(&b.id)));

    let mut by_comment: HashMap<String, Vec<ReplyDetail>> = HashMap::new();
    for reply in replies {
        by_comment
            .entry(reply.comment_id.clone())
            .or_default()
            .push(ReplyDetail::from(reply));
    }

    let comments: Vec<CommentDetail> = comments
        .into_iter()
        .map(|comment| {
            let replies = by_comment.remove(&comment.id).unwrap_or_default();
            CommentDetail::new(comment, replies)
        })
        .collect();

    if !by_comment.is_empty() {
        // A comment vanished between the reads; its replies have nowhere to go.
        debug!(
            thread_id = %thread.id,
            orphaned = by_comment.values().map(Vec::len).sum::<usize>(),
            "dropping replies without a parent comment"
        );
    }

    ThreadDetail::new(thread, comments)
}
