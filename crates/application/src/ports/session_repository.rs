//! Session persistence port.

use async_trait::async_trait;
use fundus_domain::Session;
use thiserror::Error;

/// Errors from the session persistence backend.
#[derive(Debug, Error)]
pub enum SessionStoreError {
    /// An I/O operation failed.
    #[error("session storage I/O error: {0}")]
    Io(String),

    /// The stored session could not be (de)serialized.
    #[error("session serialization error: {0}")]
    Serialization(String),
}

/// Port for durable session storage.
///
/// The analog of the browser's origin-scoped local storage: one session
/// document, loaded on startup, written on login and refresh, removed
/// on logout. Implementations make no expiry or encryption guarantees.
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Load the persisted session, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend is unreadable or the stored
    /// document is malformed.
    async fn load(&self) -> Result<Option<Session>, SessionStoreError>;

    /// Persist the session, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns an error if the session cannot be written.
    async fn save(&self, session: &Session) -> Result<(), SessionStoreError>;

    /// Remove the persisted session. Removing an absent session is not
    /// an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails the removal itself.
    async fn clear(&self) -> Result<(), SessionStoreError>;
}
