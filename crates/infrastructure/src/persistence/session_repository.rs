//! File-based session repository implementation.
//!
//! The session is stored as a single JSON document under the platform
//! data directory, e.g. `~/.local/share/fundus/session.json` on Linux.
//! Access and refresh tokens are stored in plain text.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::debug;

use fundus_application::ports::{SessionRepository, SessionStoreError};
use fundus_domain::Session;

/// File-based session repository.
///
/// Stores the session as `session.json`:
/// ```json
/// {
///   "access_token": "eyJ...",
///   "refresh_token": "eyJ...",
///   "user": { "id": 1, "username": "testdoctor", ... }
/// }
/// ```
#[derive(Debug, Clone)]
pub struct FileSessionRepository {
    path: PathBuf,
}

impl FileSessionRepository {
    /// Creates a repository storing the session at the given path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Creates a repository at the platform default location.
    ///
    /// Returns `None` when no data directory can be determined for the
    /// current platform.
    #[must_use]
    pub fn at_default_path() -> Option<Self> {
        dirs::data_dir().map(|dir| Self::new(dir.join("fundus").join("session.json")))
    }

    /// Path of the session file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(e: &std::io::Error) -> SessionStoreError {
        SessionStoreError::Io(e.to_string())
    }
}

#[async_trait]
impl SessionRepository for FileSessionRepository {
    async fn load(&self) -> Result<Option<Session>, SessionStoreError> {
        let content = match tokio::fs::read(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(Self::io_error(&e)),
        };

        let session: Session = serde_json::from_slice(&content)
            .map_err(|e| SessionStoreError::Serialization(e.to_string()))?;

        debug!(path = %self.path.display(), "session loaded from disk");
        Ok(Some(session))
    }

    async fn save(&self, session: &Session) -> Result<(), SessionStoreError> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| Self::io_error(&e))?;
        }

        let content = serde_json::to_vec_pretty(session)
            .map_err(|e| SessionStoreError::Serialization(e.to_string()))?;

        tokio::fs::write(&self.path, content)
            .await
            .map_err(|e| Self::io_error(&e))?;

        debug!(path = %self.path.display(), "session written to disk");
        Ok(())
    }

    async fn clear(&self) -> Result<(), SessionStoreError> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(Self::io_error(&e)),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use fundus_domain::{Role, UserProfile};
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn session() -> Session {
        Session::new(
            "access".to_string(),
            "refresh".to_string(),
            UserProfile {
                id: 1,
                username: "testdoctor".to_string(),
                email: "doctor@example.com".to_string(),
                first_name: "Test".to_string(),
                last_name: "Doctor".to_string(),
                role: Role::Doctor,
                medical_license: "ML-1".to_string(),
                hospital_name: "General".to_string(),
                department: String::new(),
                phone_number: String::new(),
            },
        )
    }

    #[tokio::test]
    async fn test_save_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let repo = FileSessionRepository::new(dir.path().join("session.json"));

        repo.save(&session()).await.unwrap();
        let loaded = repo.load().await.unwrap().unwrap();

        assert_eq!(loaded.access_token, "access");
        assert_eq!(loaded.user.username, "testdoctor");
    }

    #[tokio::test]
    async fn test_load_missing_file_is_none() {
        let dir = TempDir::new().unwrap();
        let repo = FileSessionRepository::new(dir.path().join("absent.json"));

        assert!(repo.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_save_creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let repo = FileSessionRepository::new(dir.path().join("nested/deep/session.json"));

        repo.save(&session()).await.unwrap();
        assert!(repo.path().exists());
    }

    #[tokio::test]
    async fn test_clear_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let repo = FileSessionRepository::new(dir.path().join("session.json"));

        repo.save(&session()).await.unwrap();
        repo.clear().await.unwrap();
        repo.clear().await.unwrap();

        assert!(repo.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_corrupt_file_is_serialization_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.json");
        tokio::fs::write(&path, b"not json").await.unwrap();

        let repo = FileSessionRepository::new(path);
        let err = repo.load().await.unwrap_err();
        assert!(matches!(err, SessionStoreError::Serialization(_)));
    }
}
