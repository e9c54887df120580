use async_trait::async_trait;
use domains::{AddedThread, ForumError, NewThread, Resource, Result, Thread, ThreadRepository};
use sqlx::Row;

use super::{storage_error, PgStore};

#[async_trait]
impl ThreadRepository for PgStore {
    async fn add_thread(&self, new_thread: &NewThread) -> Result<AddedThread> {
        let row = sqlx::query(
            "INSERT INTO threads (id, title, body, date, owner) VALUES ($1, $2, $3, $4, $5) \
             RETURNING id, title, owner",
        )
        .bind(self.next_id("thread"))
        .bind(&new_thread.title)
        .bind(&new_thread.body)
        .bind(self.clock.now())
        .bind(&new_thread.owner)
        .fetch_one(&self.pool)
        .await
        .map_err(storage_error)?;

        Ok(AddedThread {
            id: row.get("id"),
            title: row.get("title"),
            owner: row.get("owner"),
        })
    }

    async fn verify_thread_exists(&self, id: &str) -> Result<()> {
        let found = sqlx::query("SELECT 1 FROM threads WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(storage_error)?;

        found
            .map(|_| ())
            .ok_or_else(|| ForumError::not_found(Resource::Thread, id))
    }

    async fn get_thread_by_id(&self, id: &str) -> Result<Thread> {
        let row = sqlx::query(
            "SELECT t.id, t.title, t.body, t.date, t.owner, COALESCE(u.username, t.owner) AS username \
             FROM threads t LEFT JOIN users u ON u.id = t.owner \
             WHERE t.id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(storage_error)?
        .ok_or_else(|| ForumError::not_found(Resource::Thread, id))?;

        Ok(Thread {
            id: row.get("id"),
            title: row.get("title"),
            body: row.get("body"),
            date: row.get("date"),
            owner: row.get("owner"),
            username: row.get("username"),
        })
    }
}
