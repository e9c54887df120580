use std::collections::hash_map::Entry;

use async_trait::async_trait;
use domains::{
    AddedCommentLike, CommentLike, CommentLikeRepository, ForumError, LikeState, NewCommentLike, Resource, Result,
};

use super::InMemoryStore;

impl InMemoryStore {
    fn new_like(&self, new_like: &NewCommentLike) -> CommentLike {
        CommentLike {
            id: self.next_id("comment_like"),
            comment_id: new_like.comment_id.clone(),
            owner: new_like.owner.clone(),
            date: self.clock.now(),
        }
    }
}

fn acknowledge(like: &CommentLike) -> AddedCommentLike {
    AddedCommentLike {
        id: like.id.clone(),
        comment_id: like.comment_id.clone(),
        owner: like.owner.clone(),
    }
}

#[async_trait]
impl CommentLikeRepository for InMemoryStore {
    async fn add_comment_like(&self, new_like: &NewCommentLike) -> Result<AddedCommentLike> {
        let mut owners = self.tables.likes.entry(new_like.comment_id.clone()).or_default();

        // An existing like for the pair is returned as-is.
        let like = owners
            .entry(new_like.owner.clone())
            .or_insert_with(|| self.new_like(new_like));
        Ok(acknowledge(like))
    }

    async fn delete_comment_like(&self, comment_id: &str, owner: &str) -> Result<()> {
        if let Some(mut owners) = self.tables.likes.get_mut(comment_id) {
            owners.remove(owner);
        }
        Ok(())
    }

    async fn verify_comment_like_owner(&self, comment_id: &str, owner: &str) -> Result<()> {
        let Some(owners) = self.tables.likes.get(comment_id) else {
            return Err(ForumError::not_found(Resource::CommentLike, comment_id));
        };

        if owners.contains_key(owner) {
            Ok(())
        } else if owners.is_empty() {
            Err(ForumError::not_found(Resource::CommentLike, comment_id))
        } else {
            Err(ForumError::unauthorized(Resource::CommentLike, comment_id, owner))
        }
    }

    async fn is_comment_liked(&self, comment_id: &str, owner: &str) -> Result<bool> {
        Ok(self
            .tables
            .likes
            .get(comment_id)
            .is_some_and(|owners| owners.contains_key(owner)))
    }

    async fn toggle_comment_like(&self, new_like: &NewCommentLike) -> Result<LikeState> {
        // The comment's shard lock is held for the whole match, so concurrent
        // toggles of one pair serialize.
        let mut owners = self.tables.likes.entry(new_like.comment_id.clone()).or_default();

        match owners.entry(new_like.owner.clone()) {
            Entry::Occupied(existing) => {
                existing.remove();
                Ok(LikeState::Unliked)
            }
            Entry::Vacant(slot) => {
                slot.insert(self.new_like(new_like));
                Ok(LikeState::Liked)
            }
        }
    }
}
