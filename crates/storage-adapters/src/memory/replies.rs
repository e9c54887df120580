use std::collections::HashSet;

use async_trait::async_trait;
use domains::{AddedReply, ForumError, NewReply, Reply, ReplyRecord, ReplyRepository, Resource, Result};

use super::{InMemoryStore, StoredReply};

#[async_trait]
impl ReplyRepository for InMemoryStore {
    async fn add_reply(&self, new_reply: &NewReply) -> Result<AddedReply> {
        let stored = StoredReply {
            id: self.next_id("comment_reply"),
            comment_id: new_reply.comment_id.clone(),
            owner: new_reply.owner.clone(),
            date: self.clock.now(),
            content: new_reply.content.clone(),
            is_deleted: false,
        };
        let added = AddedReply {
            id: stored.id.clone(),
            content: stored.content.clone(),
            owner: stored.owner.clone(),
        };

        self.tables.replies.insert(stored.id.clone(), stored);
        Ok(added)
    }

    async fn delete_reply(&self, id: &str) -> Result<()> {
        let mut stored = self
            .tables
            .replies
            .get_mut(id)
            .ok_or_else(|| ForumError::not_found(Resource::Reply, id))?;
        stored.is_deleted = true;
        Ok(())
    }

    async fn verify_reply_exists(&self, id: &str) -> Result<()> {
        if self.tables.replies.contains_key(id) {
            Ok(())
        } else {
            Err(ForumError::not_found(Resource::Reply, id))
        }
    }

    async fn verify_reply_owner(&self, id: &str, owner: &str) -> Result<()> {
        let stored = self
            .tables
            .replies
            .get(id)
            .ok_or_else(|| ForumError::not_found(Resource::Reply, id))?;

        if stored.owner == owner {
            Ok(())
        } else {
            Err(ForumError::unauthorized(Resource::Reply, id, owner))
        }
    }

    async fn get_replies_by_thread_id(&self, thread_id: &str) -> Result<Vec<Reply>> {
        let comment_ids: HashSet<String> = self
            .tables
            .comments
            .iter()
            .filter(|entry| entry.thread_id == thread_id)
            .map(|entry| entry.key().clone())
            .collect();

        let mut stored: Vec<StoredReply> = self
            .tables
            .replies
            .iter()
            .filter(|entry| comment_ids.contains(&entry.comment_id))
            .map(|entry| entry.value().clone())
            .collect();
        stored.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.id.cmp(&b.id)));

        Ok(stored
            .into_iter()
            .map(|reply| {
                ReplyRecord {
                    username: self.username_of(&reply.owner),
                    id: reply.id,
                    comment_id: reply.comment_id,
                    owner: reply.owner,
                    date: reply.date,
                    content: reply.content,
                    is_deleted: reply.is_deleted,
                }
                .into()
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use domains::{CommentRepository, NewComment, DELETED_REPLY_PLACEHOLDER};
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    /// Sequential ids, frozen clock: every row shares one timestamp.
    fn store() -> InMemoryStore {
        let ids = Arc::new(AtomicU32::new(1));
        let date = Utc.with_ymd_and_hms(2021, 8, 8, 8, 7, 1).unwrap();

        InMemoryStore::with_generators(move || ids.fetch_add(1, Ordering::SeqCst).to_string(), move || date)
    }

    async fn seed_comment(store: &InMemoryStore, thread_id: &str) -> String {
        store
            .add_comment(&NewComment {
                content: "comment".into(),
                thread_id: thread_id.into(),
                owner: "user-1".into(),
            })
            .await
            .unwrap()
            .id
    }

    fn new_reply(comment_id: &str, owner: &str) -> NewReply {
        NewReply {
            content: "lorem ipsum".into(),
            thread_id: "thread-1".into(),
            comment_id: comment_id.into(),
            owner: owner.into(),
        }
    }

    #[tokio::test]
    async fn add_reply_uses_reply_prefix() {
        let store = store();
        let comment_id = seed_comment(&store, "thread-1").await;

        let added = store.add_reply(&new_reply(&comment_id, "user-123")).await.unwrap();

        assert_eq!(added.id, "comment_reply-2");
        assert_eq!(added.owner, "user-123");
    }

    #[tokio::test]
    async fn reply_guards() {
        let store = store();
        let comment_id = seed_comment(&store, "thread-1").await;
        let reply_id = store.add_reply(&new_reply(&comment_id, "user-123")).await.unwrap().id;

        assert!(store.verify_reply_exists(&reply_id).await.is_ok());
        assert_eq!(
            store.verify_reply_exists("comment_reply-404").await,
            Err(ForumError::not_found(Resource::Reply, "comment_reply-404"))
        );
        assert!(store.verify_reply_owner(&reply_id, "user-123").await.is_ok());
        assert_eq!(
            store.verify_reply_owner(&reply_id, "user-456").await,
            Err(ForumError::unauthorized(Resource::Reply, reply_id.clone(), "user-456"))
        );
    }

    #[tokio::test]
    async fn replies_are_scoped_to_thread_and_tie_broken_by_id() {
        let store = store();
        let here = seed_comment(&store, "thread-1").await;
        let there = seed_comment(&store, "thread-2").await;
        store.add_reply(&new_reply(&here, "user-a")).await.unwrap();
        store.add_reply(&new_reply(&there, "user-b")).await.unwrap();
        store.add_reply(&new_reply(&here, "user-c")).await.unwrap();

        let replies = store.get_replies_by_thread_id("thread-1").await.unwrap();

        let ids: Vec<_> = replies.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["comment_reply-3", "comment_reply-5"]);
        assert!(replies.iter().all(|r| r.comment_id == here));
    }

    #[tokio::test]
    async fn deleted_reply_stays_listed_with_placeholder() {
        let store = store();
        let comment_id = seed_comment(&store, "thread-1").await;
        let reply_id = store.add_reply(&new_reply(&comment_id, "user-123")).await.unwrap().id;

        store.delete_reply(&reply_id).await.unwrap();
        let replies = store.get_replies_by_thread_id("thread-1").await.unwrap();

        assert_eq!(replies.len(), 1);
        assert_eq!(replies[0].content.as_str(), DELETED_REPLY_PLACEHOLDER);
        assert_eq!(replies[0].owner, "user-123");
    }
}
