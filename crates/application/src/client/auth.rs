//! Authentication operations.

use serde::Deserialize;
use tracing::info;

use fundus_domain::{Session, UserProfile};

use crate::auth::AuthEvent;
use crate::error::ApiResult;
use crate::ports::{HttpMethod, HttpTransport};

use super::ApiClient;

/// Body of a successful login.
#[derive(Debug, Deserialize)]
struct LoginResponse {
    access: String,
    refresh: String,
    user: UserProfile,
}

/// Client for `/auth/` endpoints and local session teardown.
pub struct AuthClient<'a, T: HttpTransport> {
    pub(crate) client: &'a ApiClient<T>,
}

impl<T: HttpTransport> AuthClient<'_, T> {
    /// Log in with username and password.
    ///
    /// On success the session is stored and returned. The call is
    /// dispatched without credentials so that a 401 means "wrong
    /// credentials" and is surfaced as-is rather than triggering a
    /// refresh attempt.
    ///
    /// # Errors
    ///
    /// Returns an [`crate::ApiError`] on rejected credentials, network
    /// failure or a malformed response.
    pub async fn login(&self, username: &str, password: &str) -> ApiResult<Session> {
        let url = self.client.endpoint("auth/login/")?;
        let request = self
            .client
            .request(HttpMethod::Post, url)
            .with_json(serde_json::json!({
                "username": username,
                "password": password,
            }));

        let response = self.client.send_unauthenticated(request).await?;
        let parsed: LoginResponse = ApiClient::<T>::decode(&response)?;

        let session = Session::new(parsed.access, parsed.refresh, parsed.user);
        self.client.store().set(session.clone()).await;
        info!(username, "logged in");
        self.client.emit(&AuthEvent::LoggedIn {
            username: username.to_string(),
        });
        Ok(session)
    }

    /// Fetch the profile of the authenticated user.
    ///
    /// # Errors
    ///
    /// Returns an [`crate::ApiError`] on failure.
    pub async fn profile(&self) -> ApiResult<UserProfile> {
        let url = self.client.endpoint("auth/profile/")?;
        self.client.get_json(url).await
    }

    /// Log out locally: drop the session. Idempotent, never fails; the
    /// backend keeps no server-side session to invalidate.
    pub async fn logout(&self) {
        self.client.store().clear().await;
        self.client.emit(&AuthEvent::LoggedOut);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::error::ApiError;
    use crate::session::{MemorySessionRepository, SessionStore};
    use crate::test_support::ScriptedTransport;
    use fundus_domain::ClientConfig;
    use pretty_assertions::assert_eq;

    const LOGIN_PATH: &str = "/api/auth/login/";
    const PROFILE_PATH: &str = "/api/auth/profile/";

    fn user_json() -> serde_json::Value {
        serde_json::json!({
            "id": 1,
            "username": "testdoctor",
            "email": "testdoctor@example.com",
            "first_name": "Test",
            "last_name": "Doctor",
            "role": "doctor",
            "medical_license": "ML-001",
            "hospital_name": "General Hospital",
            "department": "Ophthalmology",
            "phone_number": ""
        })
    }

    fn client(transport: ScriptedTransport) -> ApiClient<ScriptedTransport> {
        let config = ClientConfig::new("https://host/api/", "https://host/media/")
            .expect("static test config");
        let store = SessionStore::new(Arc::new(MemorySessionRepository::new()));
        ApiClient::new(config, transport, store)
    }

    #[tokio::test]
    async fn test_login_then_profile_round_trip() {
        let transport = ScriptedTransport::new();
        transport.respond_json(
            LOGIN_PATH,
            200,
            serde_json::json!({
                "access": "acc",
                "refresh": "ref",
                "user": user_json(),
            }),
        );
        transport.respond_json(PROFILE_PATH, 200, user_json());

        let client = client(transport);
        let session = client.auth().login("testdoctor", "testpass123").await.unwrap();
        assert_eq!(session.access_token, "acc");

        // The stored session is the one returned.
        let stored = client.store().get().await.unwrap();
        assert_eq!(stored, session);

        // The profile matches the user stored at login.
        let profile = client.auth().profile().await.unwrap();
        assert_eq!(profile, stored.user);
    }

    #[tokio::test]
    async fn test_login_sends_no_bearer_even_with_stale_session() {
        let transport = ScriptedTransport::new();
        transport.respond_json(
            LOGIN_PATH,
            200,
            serde_json::json!({
                "access": "acc",
                "refresh": "ref",
                "user": user_json(),
            }),
        );

        let client = client(transport);
        client
            .store()
            .set(crate::test_support::session("stale", "stale"))
            .await;

        client.auth().login("testdoctor", "testpass123").await.unwrap();
        let requests = client.inner.transport.requests();
        assert_eq!(requests[0].header("authorization"), None);
    }

    #[tokio::test]
    async fn test_rejected_login_surfaces_status() {
        let transport = ScriptedTransport::new();
        transport.respond_json(
            LOGIN_PATH,
            401,
            serde_json::json!({ "detail": "No active account found" }),
        );

        let client = client(transport);
        let error = client
            .auth()
            .login("testdoctor", "wrong")
            .await
            .unwrap_err();
        assert!(matches!(error, ApiError::Status { status: 401, .. }));
        assert_eq!(client.store().get().await, None);
    }

    #[tokio::test]
    async fn test_logout_twice_is_idempotent() {
        let transport = ScriptedTransport::new();
        let client = client(transport);
        client
            .store()
            .set(crate::test_support::session("a", "r"))
            .await;

        client.auth().logout().await;
        assert_eq!(client.store().get().await, None);
        client.auth().logout().await;
        assert_eq!(client.store().get().await, None);
    }
}
