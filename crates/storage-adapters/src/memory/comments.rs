use async_trait::async_trait;
use domains::{
    AddedComment, Comment, CommentRecord, CommentRepository, ForumError, NewComment, Resource, Result,
};

use super::{InMemoryStore, StoredComment};

#[async_trait]
impl CommentRepository for InMemoryStore {
    async fn add_comment(&self, new_comment: &NewComment) -> Result<AddedComment> {
        let stored = StoredComment {
            id: self.next_id("comment"),
            thread_id: new_comment.thread_id.clone(),
            owner: new_comment.owner.clone(),
            date: self.clock.now(),
            content: new_comment.content.clone(),
            is_deleted: false,
        };
        let added = AddedComment {
            id: stored.id.clone(),
            content: stored.content.clone(),
            owner: stored.owner.clone(),
        };

        self.tables.comments.insert(stored.id.clone(), stored);
        Ok(added)
    }

    async fn delete_comment(&self, id: &str) -> Result<()> {
        let mut stored = self
            .tables
            .comments
            .get_mut(id)
            .ok_or_else(|| ForumError::not_found(Resource::Comment, id))?;
        stored.is_deleted = true;
        Ok(())
    }

    async fn verify_comment_owner(&self, id: &str, owner: &str) -> Result<()> {
        let stored = self
            .tables
            .comments
            .get(id)
            .ok_or_else(|| ForumError::not_found(Resource::Comment, id))?;

        if stored.owner == owner {
            Ok(())
        } else {
            Err(ForumError::unauthorized(Resource::Comment, id, owner))
        }
    }

    async fn verify_comment_exists(&self, id: &str) -> Result<()> {
        if self.tables.comments.contains_key(id) {
            Ok(())
        } else {
            Err(ForumError::not_found(Resource::Comment, id))
        }
    }

    async fn get_comments_by_thread_id(&self, thread_id: &str) -> Result<Vec<Comment>> {
        let mut stored: Vec<StoredComment> = self
            .tables
            .comments
            .iter()
            .filter(|entry| entry.thread_id == thread_id)
            .map(|entry| entry.value().clone())
            .collect();
        stored.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.id.cmp(&b.id)));

        Ok(stored
            .into_iter()
            .map(|comment| {
                CommentRecord {
                    username: self.username_of(&comment.owner),
                    like_count: self.like_count(&comment.id),
                    id: comment.id,
                    thread_id: comment.thread_id,
                    owner: comment.owner,
                    date: comment.date,
                    content: comment.content,
                    is_deleted: comment.is_deleted,
                }
                .into()
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};
    use domains::{CommentLikeRepository, NewCommentLike, DELETED_COMMENT_PLACEHOLDER};
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    /// Sequential ids and a clock that advances one second per call.
    fn store() -> InMemoryStore {
        let ids = Arc::new(AtomicU32::new(123));
        let ticks = Arc::new(AtomicU32::new(0));
        let start = Utc.with_ymd_and_hms(2021, 8, 8, 7, 19, 9).unwrap();

        InMemoryStore::with_generators(
            move || ids.fetch_add(1, Ordering::SeqCst).to_string(),
            move || start + Duration::seconds(i64::from(ticks.fetch_add(1, Ordering::SeqCst))),
        )
    }

    fn new_comment(thread_id: &str, owner: &str, content: &str) -> NewComment {
        NewComment {
            content: content.into(),
            thread_id: thread_id.into(),
            owner: owner.into(),
        }
    }

    #[tokio::test]
    async fn add_comment_persists_and_acknowledges() {
        let store = store();

        let added = store
            .add_comment(&new_comment("thread-1", "user-123", "lorem"))
            .await
            .unwrap();

        assert_eq!(added.id, "comment-123");
        assert_eq!(added.content, "lorem");
        assert!(store.verify_comment_exists("comment-123").await.is_ok());
    }

    #[tokio::test]
    async fn verify_comment_owner_distinguishes_missing_and_foreign() {
        let store = store();
        store
            .add_comment(&new_comment("thread-1", "user-123", "lorem"))
            .await
            .unwrap();

        assert!(store.verify_comment_owner("comment-123", "user-123").await.is_ok());
        assert_eq!(
            store.verify_comment_owner("comment-123", "user-999").await,
            Err(ForumError::unauthorized(Resource::Comment, "comment-123", "user-999"))
        );
        assert_eq!(
            store.verify_comment_owner("comment-404", "user-123").await,
            Err(ForumError::not_found(Resource::Comment, "comment-404"))
        );
    }

    #[tokio::test]
    async fn delete_comment_keeps_row_and_redacts() {
        let store = store();
        store
            .add_comment(&new_comment("thread-1", "user-123", "lorem"))
            .await
            .unwrap();
        let before = store.get_comments_by_thread_id("thread-1").await.unwrap();

        store.delete_comment("comment-123").await.unwrap();
        store.delete_comment("comment-123").await.unwrap();
        let after = store.get_comments_by_thread_id("thread-1").await.unwrap();

        assert_eq!(after.len(), 1);
        assert!(after[0].is_deleted());
        assert_eq!(after[0].content.as_str(), DELETED_COMMENT_PLACEHOLDER);
        assert_eq!(after[0].id, before[0].id);
        assert_eq!(after[0].owner, before[0].owner);
        assert_eq!(after[0].date, before[0].date);
    }

    #[tokio::test]
    async fn delete_unknown_comment_is_not_found() {
        let err = store().delete_comment("comment-404").await.unwrap_err();

        assert_eq!(err, ForumError::not_found(Resource::Comment, "comment-404"));
    }

    #[tokio::test]
    async fn comments_are_scoped_ordered_and_counted() {
        let store = store();
        store.add_comment(&new_comment("thread-1", "user-a", "first")).await.unwrap();
        store.add_comment(&new_comment("thread-2", "user-b", "elsewhere")).await.unwrap();
        store.add_comment(&new_comment("thread-1", "user-c", "second")).await.unwrap();

        for owner in ["user-a", "user-b"] {
            store
                .add_comment_like(&NewCommentLike {
                    thread_id: "thread-1".into(),
                    comment_id: "comment-125".into(),
                    owner: owner.into(),
                })
                .await
                .unwrap();
        }

        let comments = store.get_comments_by_thread_id("thread-1").await.unwrap();

        let ids: Vec<_> = comments.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, ["comment-123", "comment-125"]);
        assert_eq!(comments[0].like_count, 0);
        assert_eq!(comments[1].like_count, 2);
    }
}
