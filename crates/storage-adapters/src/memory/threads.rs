use async_trait::async_trait;
use domains::{AddedThread, ForumError, NewThread, Resource, Result, Thread, ThreadRepository};

use super::{InMemoryStore, StoredThread};

#[async_trait]
impl ThreadRepository for InMemoryStore {
    async fn add_thread(&self, new_thread: &NewThread) -> Result<AddedThread> {
        let stored = StoredThread {
            id: self.next_id("thread"),
            title: new_thread.title.clone(),
            body: new_thread.body.clone(),
            date: self.clock.now(),
            owner: new_thread.owner.clone(),
        };
        let added = AddedThread {
            id: stored.id.clone(),
            title: stored.title.clone(),
            owner: stored.owner.clone(),
        };

        self.tables.threads.insert(stored.id.clone(), stored);
        Ok(added)
    }

    async fn verify_thread_exists(&self, id: &str) -> Result<()> {
        if self.tables.threads.contains_key(id) {
            Ok(())
        } else {
            Err(ForumError::not_found(Resource::Thread, id))
        }
    }

    async fn get_thread_by_id(&self, id: &str) -> Result<Thread> {
        let stored = self
            .tables
            .threads
            .get(id)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| ForumError::not_found(Resource::Thread, id))?;

        Ok(Thread {
            username: self.username_of(&stored.owner),
            id: stored.id,
            title: stored.title,
            body: stored.body,
            date: stored.date,
            owner: stored.owner,
        })
    }
}
