//! Start a new thread.

use std::sync::Arc;

use domains::{AddedThread, NewThread, Result, ThreadRepository};
use serde_json::Value;
use tracing::{info, instrument};

pub struct AddThreadUseCase {
    threads: Arc<dyn ThreadRepository>,
}

impl AddThreadUseCase {
    pub fn new(threads: Arc<dyn ThreadRepository>) -> Self {
        Self { threads }
    }

    /// Expects `{ title, body, owner }`.
    #[instrument(name = "add_thread", skip_all)]
    pub async fn execute(&self, payload: &Value) -> Result<AddedThread> {
        let new_thread = NewThread::from_fields(payload)?;
        let added = self.threads.add_thread(&new_thread).await?;

        info!(thread_id = %added.id, owner = %added.owner, "thread created");
        Ok(added)
    }
}
