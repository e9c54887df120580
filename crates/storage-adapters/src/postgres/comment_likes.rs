use async_trait::async_trait;
use domains::{
    AddedCommentLike, CommentLikeRepository, ForumError, LikeState, NewCommentLike, Resource, Result,
};
use sqlx::{PgConnection, Row};
use tracing::debug;

use super::{storage_error, PgStore};

/// Serializes every toggle of one `(comment_id, owner)` pair until commit.
const LOCK_PAIR: &str = "SELECT true FROM pg_advisory_xact_lock(hashtext($1), hashtext($2))";

/// Insert under `UNIQUE (comment_id, owner)`; on conflict the DELETE runs
/// instead. Each flag reports whether its branch changed a row.
const TOGGLE_LIKE: &str = "\
WITH inserted AS (
    INSERT INTO comment_likes (id, comment_id, owner, date)
    VALUES ($1, $2, $3, $4)
    ON CONFLICT (comment_id, owner) DO NOTHING
    RETURNING id
), removed AS (
    DELETE FROM comment_likes
    WHERE comment_id = $2 AND owner = $3
      AND NOT EXISTS (SELECT 1 FROM inserted)
    RETURNING id
)
SELECT EXISTS (SELECT 1 FROM inserted) AS liked,
       EXISTS (SELECT 1 FROM removed) AS unliked";

/// A like added outside the toggle path can still be uncommitted when the
/// statement takes its snapshot; neither branch fires and it is re-run.
const TOGGLE_ATTEMPTS: usize = 3;

/// The state a toggle statement produced, if any branch changed a row.
fn toggle_outcome(liked: bool, unliked: bool) -> Option<LikeState> {
    match (liked, unliked) {
        (true, _) => Some(LikeState::Liked),
        (false, true) => Some(LikeState::Unliked),
        (false, false) => None,
    }
}

impl PgStore {
    /// Runs one toggle on `conn`, which must be inside a transaction: the
    /// pair lock is released only when that transaction ends.
    pub(super) async fn toggle_pair(&self, conn: &mut PgConnection, new_like: &NewCommentLike) -> Result<LikeState> {
        sqlx::query(LOCK_PAIR)
            .bind(&new_like.comment_id)
            .bind(&new_like.owner)
            .execute(&mut *conn)
            .await
            .map_err(storage_error)?;

        for attempt in 1..=TOGGLE_ATTEMPTS {
            let row = sqlx::query(TOGGLE_LIKE)
                .bind(self.next_id("comment_like"))
                .bind(&new_like.comment_id)
                .bind(&new_like.owner)
                .bind(self.clock.now())
                .fetch_one(&mut *conn)
                .await
                .map_err(storage_error)?;

            if let Some(state) = toggle_outcome(row.get("liked"), row.get("unliked")) {
                return Ok(state);
            }
            debug!(attempt, comment_id = %new_like.comment_id, "like toggle changed nothing, retrying");
        }

        Err(ForumError::storage(format!(
            "like toggle for comment {} made no change after {TOGGLE_ATTEMPTS} attempts",
            new_like.comment_id
        )))
    }
}

#[async_trait]
impl CommentLikeRepository for PgStore {
    async fn add_comment_like(&self, new_like: &NewCommentLike) -> Result<AddedCommentLike> {
        // The no-op update makes RETURNING yield the existing row on conflict.
        let row = sqlx::query(
            "INSERT INTO comment_likes (id, comment_id, owner, date) VALUES ($1, $2, $3, $4) \
             ON CONFLICT (comment_id, owner) DO UPDATE SET owner = EXCLUDED.owner \
             RETURNING id, comment_id, owner",
        )
        .bind(self.next_id("comment_like"))
        .bind(&new_like.comment_id)
        .bind(&new_like.owner)
        .bind(self.clock.now())
        .fetch_one(&self.pool)
        .await
        .map_err(storage_error)?;

        Ok(AddedCommentLike {
            id: row.get("id"),
            comment_id: row.get("comment_id"),
            owner: row.get("owner"),
        })
    }

    async fn delete_comment_like(&self, comment_id: &str, owner: &str) -> Result<()> {
        sqlx::query("DELETE FROM comment_likes WHERE comment_id = $1 AND owner = $2")
            .bind(comment_id)
            .bind(owner)
            .execute(&self.pool)
            .await
            .map_err(storage_error)?;
        Ok(())
    }

    async fn verify_comment_like_owner(&self, comment_id: &str, owner: &str) -> Result<()> {
        let row = sqlx::query(
            "SELECT COUNT(*) AS total, COALESCE(bool_or(owner = $2), false) AS owned \
             FROM comment_likes WHERE comment_id = $1",
        )
        .bind(comment_id)
        .bind(owner)
        .fetch_one(&self.pool)
        .await
        .map_err(storage_error)?;

        let total: i64 = row.get("total");
        let owned: bool = row.get("owned");
        match (owned, total) {
            (true, _) => Ok(()),
            (false, 0) => Err(ForumError::not_found(Resource::CommentLike, comment_id)),
            (false, _) => Err(ForumError::unauthorized(Resource::CommentLike, comment_id, owner)),
        }
    }

    async fn is_comment_liked(&self, comment_id: &str, owner: &str) -> Result<bool> {
        let row = sqlx::query(
            "SELECT EXISTS (SELECT 1 FROM comment_likes WHERE comment_id = $1 AND owner = $2) AS liked",
        )
        .bind(comment_id)
        .bind(owner)
        .fetch_one(&self.pool)
        .await
        .map_err(storage_error)?;

        Ok(row.get("liked"))
    }

    async fn toggle_comment_like(&self, new_like: &NewCommentLike) -> Result<LikeState> {
        let mut tx = self.pool.begin().await.map_err(storage_error)?;
        let state = self.toggle_pair(&mut *tx, new_like).await?;
        tx.commit().await.map_err(storage_error)?;
        Ok(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcome_follows_the_branch_that_fired() {
        assert_eq!(toggle_outcome(true, false), Some(LikeState::Liked));
        assert_eq!(toggle_outcome(false, true), Some(LikeState::Unliked));
        assert_eq!(toggle_outcome(false, false), None);
    }
}
