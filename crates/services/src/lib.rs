//! # services
//!
//! One use case per forum operation. Each takes a plain field mapping, runs
//! its validator, then its guard chain, then at most one write.

mod add_comment;
mod add_reply;
mod add_thread;
mod delete_comment;
mod delete_reply;
mod get_thread_detail;
mod toggle_comment_like;

use std::sync::Arc;

use domains::{CommentLikeRepository, CommentRepository, ReplyRepository, ThreadRepository};

pub use add_comment::AddCommentUseCase;
pub use add_reply::AddReplyUseCase;
pub use add_thread::AddThreadUseCase;
pub use delete_comment::DeleteCommentUseCase;
pub use delete_reply::DeleteReplyUseCase;
pub use get_thread_detail::GetThreadDetailUseCase;
pub use toggle_comment_like::ToggleCommentLikeUseCase;

/// Every use case, wired once from the four stores.
pub struct UseCases {
    pub add_thread: AddThreadUseCase,
    pub add_comment: AddCommentUseCase,
    pub add_reply: AddReplyUseCase,
    pub delete_comment: DeleteCommentUseCase,
    pub delete_reply: DeleteReplyUseCase,
    pub toggle_comment_like: ToggleCommentLikeUseCase,
    pub get_thread_detail: GetThreadDetailUseCase,
}

impl UseCases {
    pub fn new(
        threads: Arc<dyn ThreadRepository>,
        comments: Arc<dyn CommentRepository>,
        replies: Arc<dyn ReplyRepository>,
        likes: Arc<dyn CommentLikeRepository>,
    ) -> Self {
        Self {
            add_thread: AddThreadUseCase::new(threads.clone()),
            add_comment: AddCommentUseCase::new(threads.clone(), comments.clone()),
            add_reply: AddReplyUseCase::new(threads.clone(), comments.clone(), replies.clone()),
            delete_comment: DeleteCommentUseCase::new(threads.clone(), comments.clone()),
            delete_reply: DeleteReplyUseCase::new(threads.clone(), comments.clone(), replies.clone()),
            toggle_comment_like: ToggleCommentLikeUseCase::new(threads.clone(), comments.clone(), likes),
            get_thread_detail: GetThreadDetailUseCase::new(threads, comments, replies),
        }
    }
}
