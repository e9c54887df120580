//! # PostgreSQL storage
//!
//! Maps the relational schema in `migrations/` onto the `domains` models.
//! Usernames are resolved with a `LEFT JOIN users`; an owner with no user
//! row is displayed by id.
//!
//! Every `sqlx` failure is logged here and surfaced as
//! [`ForumError::Storage`], so callers never see driver types.

mod comment_likes;
mod comments;
mod replies;
mod threads;

use std::sync::Arc;

use domains::ForumError;
use sqlx::postgres::{PgPool, PgPoolOptions};
use tracing::{error, info};

use crate::generators::{Clock, IdGenerator, SystemClock, UuidIds};

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
    ids: Arc<dyn IdGenerator>,
    clock: Arc<dyn Clock>,
}

impl PgStore {
    /// Opens a pool against `url`. Does not run migrations.
    pub async fn connect(url: &str, max_connections: u32) -> anyhow::Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(url)
            .await?;
        info!(max_connections, "connected to postgres");

        Ok(Self::from_pool(pool))
    }

    pub fn from_pool(pool: PgPool) -> Self {
        Self::with_generators(pool, UuidIds, SystemClock)
    }

    pub fn with_generators(pool: PgPool, ids: impl IdGenerator + 'static, clock: impl Clock + 'static) -> Self {
        Self {
            pool,
            ids: Arc::new(ids),
            clock: Arc::new(clock),
        }
    }

    /// Applies the bundled migrations.
    pub async fn migrate(&self) -> anyhow::Result<()> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }

    fn next_id(&self, prefix: &str) -> String {
        format!("{prefix}-{}", self.ids.next_id())
    }
}

fn storage_error(err: sqlx::Error) -> ForumError {
    error!(%err, "postgres query failed");
    ForumError::storage(err)
}

/// `COUNT(*)` is `BIGINT`; it is never negative.
fn count(value: i64) -> u64 {
    u64::try_from(value).unwrap_or_default()
}


/// Tests against a live database. Run with
/// `FORUM__DATABASE__URL=postgres://… cargo test --features db-postgres -- --ignored`.
#[cfg(test)]
mod live {
    use super::*;
    use domains::{
        CommentLikeRepository, CommentRepository, LikeState, NewComment, NewCommentLike, NewReply, NewThread,
        ReplyRepository, Resource, ThreadRepository, DELETED_COMMENT_PLACEHOLDER,
    };

    async fn store() -> PgStore {
        let url = std::env::var("FORUM__DATABASE__URL").expect("FORUM__DATABASE__URL must be set");
        let store = PgStore::connect(&url, 4).await.unwrap();
        store.migrate().await.unwrap();
        store
    }

    async fn seed(store: &PgStore) -> (String, String) {
        let thread = store
            .add_thread(&NewThread {
                title: "title".into(),
                body: "body".into(),
                owner: "user-live".into(),
            })
            .await
            .unwrap();
        let comment = store
            .add_comment(&NewComment {
                content: "comment".into(),
                thread_id: thread.id.clone(),
                owner: "user-live".into(),
            })
            .await
            .unwrap();
        (thread.id, comment.id)
    }

    #[tokio::test]
    #[ignore = "needs a running PostgreSQL"]
    async fn soft_delete_and_listing() {
        let store = store().await;
        let (thread_id, comment_id) = seed(&store).await;
        store
            .add_reply(&NewReply {
                content: "reply".into(),
                thread_id: thread_id.clone(),
                comment_id: comment_id.clone(),
                owner: "user-live".into(),
            })
            .await
            .unwrap();

        store.delete_comment(&comment_id).await.unwrap();
        let comments = store.get_comments_by_thread_id(&thread_id).await.unwrap();
        let replies = store.get_replies_by_thread_id(&thread_id).await.unwrap();

        assert_eq!(comments.len(), 1);
        assert_eq!(comments[0].content.as_str(), DELETED_COMMENT_PLACEHOLDER);
        assert_eq!(comments[0].username, "user-live");
        assert_eq!(replies.len(), 1);
        assert_eq!(
            store.verify_comment_owner(&comment_id, "someone-else").await,
            Err(ForumError::unauthorized(Resource::Comment, comment_id.clone(), "someone-else"))
        );
    }

    #[tokio::test]
    #[ignore = "needs a running PostgreSQL"]
    async fn toggle_round_trip() {
        let store = store().await;
        let (thread_id, comment_id) = seed(&store).await;
        let like = NewCommentLike {
            thread_id,
            comment_id: comment_id.clone(),
            owner: "user-live".into(),
        };

        assert_eq!(store.toggle_comment_like(&like).await.unwrap(), LikeState::Liked);
        assert!(store.is_comment_liked(&comment_id, "user-live").await.unwrap());
        assert_eq!(store.toggle_comment_like(&like).await.unwrap(), LikeState::Unliked);
        assert!(!store.is_comment_liked(&comment_id, "user-live").await.unwrap());
    }

    /// A second toggle issued while the first is still uncommitted must wait
    /// for it and then undo it, not report a state it did not produce.
    #[tokio::test]
    #[ignore = "needs a running PostgreSQL"]
    async fn overlapping_toggles_each_make_a_transition() {
        let store = store().await;
        let (thread_id, comment_id) = seed(&store).await;
        let like = NewCommentLike {
            thread_id,
            comment_id: comment_id.clone(),
            owner: "user-live".into(),
        };

        let mut open = store.pool.begin().await.unwrap();
        let first = store.toggle_pair(&mut *open, &like).await.unwrap();

        let second = tokio::spawn({
            let store = store.clone();
            let like = like.clone();
            async move { store.toggle_comment_like(&like).await.unwrap() }
        });
        tokio::time::sleep(std::time::Duration::from_millis(200)).await;
        assert!(!second.is_finished());
        open.commit().await.unwrap();

        assert_eq!(first, LikeState::Liked);
        assert_eq!(second.await.unwrap(), LikeState::Unliked);
        assert!(!store.is_comment_liked(&comment_id, "user-live").await.unwrap());
    }

    /// A like inserted outside the toggle path and committed mid-toggle is
    /// picked up on the retry and removed.
    #[tokio::test]
    #[ignore = "needs a running PostgreSQL"]
    async fn toggle_waits_out_an_uncommitted_plain_insert() {
        let store = store().await;
        let (thread_id, comment_id) = seed(&store).await;
        let like = NewCommentLike {
            thread_id,
            comment_id: comment_id.clone(),
            owner: "user-live".into(),
        };

        let mut open = store.pool.begin().await.unwrap();
        sqlx::query("INSERT INTO comment_likes (id, comment_id, owner, date) VALUES ($1, $2, $3, now())")
            .bind(store.next_id("comment_like"))
            .bind(&comment_id)
            .bind("user-live")
            .execute(&mut *open)
            .await
            .unwrap();

        let toggle = tokio::spawn({
            let store = store.clone();
            async move { store.toggle_comment_like(&like).await.unwrap() }
        });
        tokio::time::sleep(std::time::Duration::from_millis(200)).await;
        open.commit().await.unwrap();

        assert_eq!(toggle.await.unwrap(), LikeState::Unliked);
        assert!(!store.is_comment_liked(&comment_id, "user-live").await.unwrap());
    }
}
