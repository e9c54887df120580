//! # Domain Models
//!
//! These structs represent the core entities of the forum.
//! "New" entities carry only caller-supplied fields, "Added" entities are the
//! creation acknowledgment, and the plain names are what readers see.

mod comment_likes;
mod comments;
mod content;
mod detail;
mod replies;
mod threads;

pub use comment_likes::{AddedCommentLike, CommentLike, LikeState, NewCommentLike};
pub use comments::{AddedComment, Comment, CommentRecord, DeleteComment, NewComment};
pub use content::{Content, ContentKind, DELETED_COMMENT_PLACEHOLDER, DELETED_REPLY_PLACEHOLDER};
pub use detail::{CommentDetail, ReplyDetail, ThreadDetail};
pub use replies::{AddedReply, DeleteReply, NewReply, Reply, ReplyRecord};
pub use threads::{AddedThread, NewThread, Thread, ThreadDetailQuery};
