//! Single-flight access token refresh.

use fundus_domain::AuthError;
use serde::Deserialize;
use tokio::sync::Mutex;
use tracing::{error, info};
use url::Url;

use crate::ports::{ApiRequest, HttpMethod, HttpTransport};
use crate::session::SessionStore;

/// Body of a successful refresh exchange.
#[derive(Debug, Deserialize)]
struct RefreshResponse {
    access: String,
}

/// Coordinates access token refresh across concurrent 401 handlers.
///
/// All handlers that saw the same stale token funnel through one gate:
/// the first caller performs the exchange, later callers find the token
/// already replaced and reuse it instead of issuing their own exchange.
/// On any failure the whole session is torn down; there is nothing to
/// salvage from a session whose refresh token was rejected.
#[derive(Debug, Default)]
pub struct RefreshCoordinator {
    gate: Mutex<()>,
}

impl RefreshCoordinator {
    /// Create a coordinator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Obtain a fresh access token after `stale_token` was rejected.
    ///
    /// Returns the token to retry with: either one installed by a
    /// concurrent refresh, or the result of this call's own exchange.
    ///
    /// # Errors
    ///
    /// Returns an [`AuthError`] when no refresh token exists or the
    /// exchange fails; the session store is cleared in both cases.
    pub async fn refresh(
        &self,
        transport: &dyn HttpTransport,
        store: &SessionStore,
        refresh_url: Url,
        timeout_ms: u64,
        stale_token: &str,
    ) -> Result<String, AuthError> {
        let _guard = self.gate.lock().await;

        // A concurrent handler may have finished the exchange while we
        // waited on the gate.
        if let Some(current) = store.access_token().await
            && current != stale_token
        {
            return Ok(current);
        }

        match self
            .exchange(transport, store, refresh_url, timeout_ms)
            .await
        {
            Ok(access_token) => {
                info!("access token refreshed");
                Ok(access_token)
            }
            Err(e) => {
                error!(error = %e, "token refresh failed, clearing session");
                store.clear().await;
                Err(e)
            }
        }
    }

    async fn exchange(
        &self,
        transport: &dyn HttpTransport,
        store: &SessionStore,
        refresh_url: Url,
        timeout_ms: u64,
    ) -> Result<String, AuthError> {
        let Some(refresh_token) = store.refresh_token().await else {
            return Err(AuthError::MissingRefreshToken);
        };

        // The exchange itself is unauthenticated; it carries only the
        // refresh token in its body.
        let request = ApiRequest::new(HttpMethod::Post, refresh_url, timeout_ms)
            .with_json(serde_json::json!({ "refresh": refresh_token }));

        let response = transport
            .execute(request)
            .await
            .map_err(|e| AuthError::Network {
                message: e.to_string(),
            })?;

        if !response.is_success() {
            return Err(AuthError::RefreshRejected {
                status: response.status,
                message: response.text(),
            });
        }

        let parsed: RefreshResponse =
            response.json().map_err(|e| AuthError::MalformedResponse {
                message: e.to_string(),
            })?;

        store.replace_access_token(parsed.access.clone()).await;
        Ok(parsed.access)
    }
}
