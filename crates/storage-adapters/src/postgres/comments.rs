use async_trait::async_trait;
use domains::{
    AddedComment, Comment, CommentRecord, CommentRepository, ForumError, NewComment, Resource, Result,
};
use sqlx::Row;

use super::{count, storage_error, PgStore};

#[async_trait]
impl CommentRepository for PgStore {
    async fn add_comment(&self, new_comment: &NewComment) -> Result<AddedComment> {
        let row = sqlx::query(
            "INSERT INTO comments (id, thread_id, owner, date, content) VALUES ($1, $2, $3, $4, $5) \
             RETURNING id, content, owner",
        )
        .bind(self.next_id("comment"))
        .bind(&new_comment.thread_id)
        .bind(&new_comment.owner)
        .bind(self.clock.now())
        .bind(&new_comment.content)
        .fetch_one(&self.pool)
        .await
        .map_err(storage_error)?;

        Ok(AddedComment {
            id: row.get("id"),
            content: row.get("content"),
            owner: row.get("owner"),
        })
    }

    async fn delete_comment(&self, id: &str) -> Result<()> {
        let result = sqlx::query("UPDATE comments SET is_deleted = true WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(storage_error)?;

        if result.rows_affected() == 0 {
            return Err(ForumError::not_found(Resource::Comment, id));
        }
        Ok(())
    }

    async fn verify_comment_owner(&self, id: &str, owner: &str) -> Result<()> {
        let stored_owner: String = sqlx::query("SELECT owner FROM comments WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(storage_error)?
            .ok_or_else(|| ForumError::not_found(Resource::Comment, id))?
            .get("owner");

        if stored_owner == owner {
            Ok(())
        } else {
            Err(ForumError::unauthorized(Resource::Comment, id, owner))
        }
    }

    async fn verify_comment_exists(&self, id: &str) -> Result<()> {
        let found = sqlx::query("SELECT 1 FROM comments WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(storage_error)?;

        found
            .map(|_| ())
            .ok_or_else(|| ForumError::not_found(Resource::Comment, id))
    }

    async fn get_comments_by_thread_id(&self, thread_id: &str) -> Result<Vec<Comment>> {
        let rows = sqlx::query(
            "SELECT c.id, c.thread_id, c.owner, COALESCE(u.username, c.owner) AS username, \
                    c.date, c.content, c.is_deleted, \
                    (SELECT COUNT(*) FROM comment_likes l WHERE l.comment_id = c.id) AS like_count \
             FROM comments c LEFT JOIN users u ON u.id = c.owner \
             WHERE c.thread_id = $1 \
             ORDER BY c.date ASC, c.id ASC",
        )
        .bind(thread_id)
        .fetch_all(&self.pool)
        .await
        .map_err(storage_error)?;

        Ok(rows
            .into_iter()
            .map(|row| {
                CommentRecord {
                    id: row.get("id"),
                    thread_id: row.get("thread_id"),
                    owner: row.get("owner"),
                    username: row.get("username"),
                    date: row.get("date"),
                    content: row.get("content"),
                    is_deleted: row.get("is_deleted"),
                    like_count: count(row.get("like_count")),
                }
                .into()
            })
            .collect())
    }
}
