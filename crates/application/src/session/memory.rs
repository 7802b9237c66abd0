//! Non-durable session repository.

use async_trait::async_trait;
use fundus_domain::Session;
use tokio::sync::RwLock;

use crate::ports::{SessionRepository, SessionStoreError};

/// In-memory [`SessionRepository`] with no durability.
///
/// Useful for tests and for clients that should not leave a session on
/// disk.
#[derive(Debug, Default)]
pub struct MemorySessionRepository {
    session: RwLock<Option<Session>>,
}

impl MemorySessionRepository {
    /// Create an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionRepository for MemorySessionRepository {
    async fn load(&self) -> Result<Option<Session>, SessionStoreError> {
        Ok(self.session.read().await.clone())
    }

    async fn save(&self, session: &Session) -> Result<(), SessionStoreError> {
        let mut slot = self.session.write().await;
        *slot = Some(session.clone());
        Ok(())
    }

    async fn clear(&self) -> Result<(), SessionStoreError> {
        let mut slot = self.session.write().await;
        *slot = None;
        Ok(())
    }
}
