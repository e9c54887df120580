use async_trait::async_trait;
use domains::{AddedReply, ForumError, NewReply, Reply, ReplyRecord, ReplyRepository, Resource, Result};
use sqlx::Row;

use super::{storage_error, PgStore};

#[async_trait]
impl ReplyRepository for PgStore {
    async fn add_reply(&self, new_reply: &NewReply) -> Result<AddedReply> {
        let row = sqlx::query(
            "INSERT INTO comment_replies (id, comment_id, owner, date, content) VALUES ($1, $2, $3, $4, $5) \
             RETURNING id, content, owner",
        )
        .bind(self.next_id("comment_reply"))
        .bind(&new_reply.comment_id)
        .bind(&new_reply.owner)
        .bind(self.clock.now())
        .bind(&new_reply.content)
        .fetch_one(&self.pool)
        .await
        .map_err(storage_error)?;

        Ok(AddedReply {
            id: row.get("id"),
            content: row.get("content"),
            owner: row.get("owner"),
        })
    }

    async fn delete_reply(&self, id: &str) -> Result<()> {
        let result = sqlx::query("UPDATE comment_replies SET is_deleted = true WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(storage_error)?;

        if result.rows_affected() == 0 {
            return Err(ForumError::not_found(Resource::Reply, id));
        }
        Ok(())
    }

    async fn verify_reply_exists(&self, id: &str) -> Result<()> {
        let found = sqlx::query("SELECT 1 FROM comment_replies WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(storage_error)?;

        found
            .map(|_| ())
            .ok_or_else(|| ForumError::not_found(Resource::Reply, id))
    }

    async fn verify_reply_owner(&self, id: &str, owner: &str) -> Result<()> {
        let stored_owner: String = sqlx::query("SELECT owner FROM comment_replies WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(storage_error)?
            .ok_or_else(|| ForumError::not_found(Resource::Reply, id))?
            .get("owner");

        if stored_owner == owner {
            Ok(())
        } else {
            Err(ForumError::unauthorized(Resource::Reply, id, owner))
        }
    }

    async fn get_replies_by_thread_id(&self, thread_id: &str) -> Result<Vec<Reply>> {
        let rows = sqlx::query(
            "SELECT r.id, r.comment_id, r.owner, COALESCE(u.username, r.owner) AS username, \
                    r.date, r.content, r.is_deleted \
             FROM comment_replies r \
             JOIN comments c ON c.id = r.comment_id \
             LEFT JOIN users u ON u.id = r.owner \
             WHERE c.thread_id = $1 \
             ORDER BY r.date ASC, r.id ASC",
        )
        .bind(thread_id)
        .fetch_all(&self.pool)
        .await
        .map_err(storage_error)?;

        Ok(rows
            .into_iter()
            .map(|row| {
                ReplyRecord {
                    id: row.get("id"),
                    comment_id: row.get("comment_id"),
                    owner: row.get("owner"),
                    username: row.get("username"),
                    date: row.get("date"),
                    content: row.get("content"),
                    is_deleted: row.get("is_deleted"),
                }
                .into()
            })
            .collect())
    }
}
