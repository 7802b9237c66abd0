//! In-memory session store mirrored to durable storage.

use std::sync::Arc;

use fundus_domain::Session;
use tokio::sync::RwLock;
use tracing::warn;

use crate::ports::SessionRepository;

/// Thread-safe holder of the current [`Session`].
///
/// The in-memory copy is authoritative: reads never touch the
/// repository, and repository write failures are logged but do not
/// invalidate the in-memory session. There is no expiry checking and
/// no cross-process synchronization; last writer wins.
#[derive(Clone)]
pub struct SessionStore {
    current: Arc<RwLock<Option<Session>>>,
    repo: Arc<dyn SessionRepository>,
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore").finish_non_exhaustive()
    }
}

impl SessionStore {
    /// Create a store backed by the given repository. The store starts
    /// empty; call [`SessionStore::restore`] to pick up a persisted
    /// session.
    #[must_use]
    pub fn new(repo: Arc<dyn SessionRepository>) -> Self {
        Self {
            current: Arc::new(RwLock::new(None)),
            repo,
        }
    }

    /// Load the persisted session into memory, if one exists.
    pub async fn restore(&self) -> Option<Session> {
        match self.repo.load().await {
            Ok(session) => {
                let mut current = self.current.write().await;
                current.clone_from(&session);
                session
            }
            Err(e) => {
                warn!(error = %e, "failed to restore persisted session");
                None
            }
        }
    }

    /// Install a session, replacing any previous one.
    pub async fn set(&self, session: Session) {
        {
            let mut current = self.current.write().await;
            *current = Some(session.clone());
        }
        if let Err(e) = self.repo.save(&session).await {
            warn!(error = %e, "failed to persist session");
        }
    }

    /// The current session, if any.
    pub async fn get(&self) -> Option<Session> {
        self.current.read().await.clone()
    }

    /// The current access token, if a session exists.
    pub async fn access_token(&self) -> Option<String> {
        self.current
            .read()
            .await
            .as_ref()
            .map(|s| s.access_token.clone())
    }

    /// The current refresh token, if a session exists.
    pub async fn refresh_token(&self) -> Option<String> {
        self.current
            .read()
            .await
            .as_ref()
            .map(|s| s.refresh_token.clone())
    }

    /// Replace only the access token, keeping refresh token and user.
    /// No-op when no session exists.
    pub async fn replace_access_token(&self, access_token: String) {
        let updated = {
            let mut current = self.current.write().await;
            match current.as_mut() {
                Some(session) => {
                    session.access_token = access_token;
                    Some(session.clone())
                }
                None => None,
            }
        };
        if let Some(session) = updated
            && let Err(e) = self.repo.save(&session).await
        {
            warn!(error = %e, "failed to persist refreshed session");
        }
    }

    /// Remove the session. Clearing an empty store is a no-op.
    pub async fn clear(&self) {
        {
            let mut current = self.current.write().await;
            *current = None;
        }
        if let Err(e) = self.repo.clear().await {
            warn!(error = %e, "failed to clear persisted session");
        }
    }

    /// True when a session is present.
    pub async fn is_authenticated(&self) -> bool {
        self.current.read().await.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::MemorySessionRepository;
    use crate::test_support::session;
    use pretty_assertions::assert_eq;

    fn store() -> SessionStore {
        SessionStore::new(Arc::new(MemorySessionRepository::new()))
    }

    #[tokio::test]
    async fn test_set_then_get() {
        let store = store();
        assert!(!store.is_authenticated().await);

        store.set(session("a", "r")).await;
        assert_eq!(store.access_token().await.as_deref(), Some("a"));
        assert_eq!(store.refresh_token().await.as_deref(), Some("r"));
    }

    #[tokio::test]
    async fn test_replace_access_token_keeps_rest() {
        let store = store();
        store.set(session("old", "r")).await;
        store.replace_access_token("new".to_string()).await;

        let current = store.get().await.unwrap();
        assert_eq!(current.access_token, "new");
        assert_eq!(current.refresh_token, "r");
    }

    #[tokio::test]
    async fn test_replace_access_token_without_session_is_noop() {
        let store = store();
        store.replace_access_token("new".to_string()).await;
        assert_eq!(store.get().await, None);
    }

    #[tokio::test]
    async fn test_clear_is_idempotent() {
        let store = store();
        store.set(session("a", "r")).await;

        store.clear().await;
        assert_eq!(store.get().await, None);
        store.clear().await;
        assert_eq!(store.get().await, None);
    }

    #[tokio::test]
    async fn test_restore_round_trips_through_repository() {
        let repo = Arc::new(MemorySessionRepository::new());
        let first = SessionStore::new(Arc::clone(&repo) as Arc<dyn SessionRepository>);
        first.set(session("a", "r")).await;

        let second = SessionStore::new(repo as Arc<dyn SessionRepository>);
        let restored = second.restore().await;
        assert_eq!(restored, Some(session("a", "r")));
        assert!(second.is_authenticated().await);
    }
}
