//! The API client: dispatcher core and per-resource clients.
//!
//! [`ApiClient`] owns the transport, the session store and the refresh
//! coordinator, and implements the authenticated dispatch pipeline:
//! attach the bearer token, send, and on a 401 refresh the token and
//! retry the original request exactly once. Per-resource clients
//! ([`PatientsClient`], [`ImagesClient`], ...) are stateless views over
//! it, one method per REST endpoint.

mod auth;
mod dashboard;
mod diseases;
mod history;
mod images;
mod patients;
mod predictions;

pub use auth::AuthClient;
pub use dashboard::DashboardClient;
pub use diseases::DiseasesClient;
pub use history::{HistoryClient, HistoryQuery};
pub use images::{ImageQuery, ImagesClient};
pub use patients::{PatientQuery, PatientsClient};
pub use predictions::{PredictionQuery, PredictionsClient};

use std::sync::{Arc, RwLock};

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;

use fundus_domain::ClientConfig;

use crate::auth::{AuthEvent, AuthEventHook, RefreshCoordinator};
use crate::error::{ApiError, ApiResult};
use crate::ports::{ApiRequest, ApiResponse, HttpMethod, HttpTransport, MultipartField};
use crate::session::SessionStore;

struct Inner<T> {
    config: ClientConfig,
    transport: T,
    store: SessionStore,
    refresher: RefreshCoordinator,
    hook: RwLock<Option<AuthEventHook>>,
}

/// Authenticated client for the Fundus REST API.
///
/// Cheap to clone; all clones share the same session.
pub struct ApiClient<T: HttpTransport> {
    inner: Arc<Inner<T>>,
}

impl<T: HttpTransport> Clone for ApiClient<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: HttpTransport> std::fmt::Debug for ApiClient<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("api_base_url", &self.inner.config.api_base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl<T: HttpTransport> ApiClient<T> {
    /// Create a client over the given transport and session store.
    #[must_use]
    pub fn new(config: ClientConfig, transport: T, store: SessionStore) -> Self {
        Self {
            inner: Arc::new(Inner {
                config,
                transport,
                store,
                refresher: RefreshCoordinator::new(),
                hook: RwLock::new(None),
            }),
        }
    }

    /// Register a hook invoked for every [`AuthEvent`]. Replaces any
    /// previous hook.
    pub fn set_event_hook(&self, hook: AuthEventHook) {
        if let Ok(mut slot) = self.inner.hook.write() {
            *slot = Some(hook);
        }
    }

    /// The client configuration.
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    /// The shared session store.
    #[must_use]
    pub fn store(&self) -> &SessionStore {
        &self.inner.store
    }

    /// Authentication operations.
    #[must_use]
    pub const fn auth(&self) -> AuthClient<'_, T> {
        AuthClient { client: self }
    }

    /// Patient CRUD.
    #[must_use]
    pub const fn patients(&self) -> PatientsClient<'_, T> {
        PatientsClient { client: self }
    }

    /// Retinal image operations, including analysis uploads.
    #[must_use]
    pub const fn images(&self) -> ImagesClient<'_, T> {
        ImagesClient { client: self }
    }

    /// Prediction read and confirm operations.
    #[must_use]
    pub const fn predictions(&self) -> PredictionsClient<'_, T> {
        PredictionsClient { client: self }
    }

    /// Disease catalog (read-only).
    #[must_use]
    pub const fn diseases(&self) -> DiseasesClient<'_, T> {
        DiseasesClient { client: self }
    }

    /// Medical history operations.
    #[must_use]
    pub const fn history(&self) -> HistoryClient<'_, T> {
        HistoryClient { client: self }
    }

    /// Dashboard statistics.
    #[must_use]
    pub const fn dashboard(&self) -> DashboardClient<'_, T> {
        DashboardClient { client: self }
    }

    pub(crate) fn emit(&self, event: &AuthEvent) {
        debug!(?event, "auth event");
        if let Ok(slot) = self.inner.hook.read()
            && let Some(hook) = slot.as_ref()
        {
            hook(event);
        }
    }

    pub(crate) fn endpoint(&self, path: &str) -> ApiResult<Url> {
        Ok(self.inner.config.endpoint(path)?)
    }

    pub(crate) fn request(&self, method: HttpMethod, url: Url) -> ApiRequest {
        ApiRequest::new(method, url, self.inner.config.timeout_ms)
    }

    /// Dispatch a request through the authenticated pipeline.
    ///
    /// Attaches the current bearer token when a session exists, and on
    /// a 401 runs the refresh exchange and retries the original request
    /// exactly once. The retried request is rebuilt from the owned
    /// descriptor, so "already retried" is plain control flow rather
    /// than a flag on a shared request object. A 401 on the retry
    /// propagates as a status error.
    pub(crate) async fn send(&self, request: ApiRequest) -> ApiResult<ApiResponse> {
        let token = self.inner.store.access_token().await;

        let mut first = request.clone();
        if let Some(token) = &token {
            first = first.with_header("Authorization", format!("Bearer {token}"));
        }

        debug!(method = first.method.as_str(), url = %first.url, "dispatching request");
        let response = self.inner.transport.execute(first).await?;
        if response.status != 401 {
            return Self::into_result(response);
        }

        warn!(url = %request.url, "request rejected with 401, refreshing access token");
        let refresh_url = self.endpoint("auth/refresh/")?;
        let stale = token.unwrap_or_default();
        match self
            .inner
            .refresher
            .refresh(
                &self.inner.transport,
                &self.inner.store,
                refresh_url,
                self.inner.config.timeout_ms,
                &stale,
            )
            .await
        {
            Ok(fresh) => {
                self.emit(&AuthEvent::TokenRefreshed);
                let retry = request.with_header("Authorization", format!("Bearer {fresh}"));
                let response = self.inner.transport.execute(retry).await?;
                Self::into_result(response)
            }
            Err(e) => {
                self.emit(&AuthEvent::SessionExpired {
                    reason: e.to_string(),
                });
                Err(ApiError::SessionExpired(e))
            }
        }
    }

    /// Dispatch a request without credentials or refresh handling.
    /// Used by login, which must surface a 401 as-is.
    pub(crate) async fn send_unauthenticated(&self, request: ApiRequest) -> ApiResult<ApiResponse> {
        debug!(method = request.method.as_str(), url = %request.url, "dispatching unauthenticated request");
        let response = self.inner.transport.execute(request).await?;
        Self::into_result(response)
    }

    fn into_result(response: ApiResponse) -> ApiResult<ApiResponse> {
        if response.is_success() {
            Ok(response)
        } else {
            Err(ApiError::Status {
                status: response.status,
                body: response.text(),
            })
        }
    }

    pub(crate) fn decode<D: DeserializeOwned>(response: &ApiResponse) -> ApiResult<D> {
        response.json().map_err(|e| ApiError::Decode(e.to_string()))
    }

    pub(crate) async fn get_json<D: DeserializeOwned>(&self, url: Url) -> ApiResult<D> {
        let response = self.send(self.request(HttpMethod::Get, url)).await?;
        Self::decode(&response)
    }

    pub(crate) async fn post_json<B: Serialize, D: DeserializeOwned>(
        &self,
        url: Url,
        body: &B,
    ) -> ApiResult<D> {
        let value = serde_json::to_value(body).map_err(|e| ApiError::Encode(e.to_string()))?;
        let response = self
            .send(self.request(HttpMethod::Post, url).with_json(value))
            .await?;
        Self::decode(&response)
    }

    pub(crate) async fn put_json<B: Serialize, D: DeserializeOwned>(
        &self,
        url: Url,
        body: &B,
    ) -> ApiResult<D> {
        let value = serde_json::to_value(body).map_err(|e| ApiError::Encode(e.to_string()))?;
        let response = self
            .send(self.request(HttpMethod::Put, url).with_json(value))
            .await?;
        Self::decode(&response)
    }

    pub(crate) async fn post_empty<D: DeserializeOwned>(&self, url: Url) -> ApiResult<D> {
        let response = self.send(self.request(HttpMethod::Post, url)).await?;
        Self::decode(&response)
    }

    pub(crate) async fn post_multipart<D: DeserializeOwned>(
        &self,
        url: Url,
        fields: Vec<MultipartField>,
    ) -> ApiResult<D> {
        let response = self
            .send(self.request(HttpMethod::Post, url).with_multipart(fields))
            .await?;
        Self::decode(&response)
    }

    pub(crate) async fn delete(&self, url: Url) -> ApiResult<()> {
        self.send(self.request(HttpMethod::Delete, url)).await?;
        Ok(())
    }
}

/// Append a serializable query to a URL. Empty queries leave the URL
/// untouched.
pub(crate) fn with_query<Q: Serialize>(mut url: Url, query: &Q) -> ApiResult<Url> {
    let encoded = serde_urlencoded::to_string(query).map_err(|e| ApiError::Encode(e.to_string()))?;
    if !encoded.is_empty() {
        url.set_query(Some(&encoded));
    }
    Ok(url)
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::session::MemorySessionRepository;
    use crate::test_support::{session, ScriptedTransport};
    use pretty_assertions::assert_eq;

    const PATIENTS_PATH: &str = "/api/patients/";
    const REFRESH_PATH: &str = "/api/auth/refresh/";

    fn client(transport: ScriptedTransport) -> ApiClient<ScriptedTransport> {
        let config =
            fundus_domain::ClientConfig::new("https://host/api/", "https://host/media/")
                .expect("static test config");
        let store = SessionStore::new(Arc::new(MemorySessionRepository::new()));
        ApiClient::new(config, transport, store)
    }

    fn patient_json(id: i64) -> serde_json::Value {
        serde_json::json!({
            "id": id,
            "patient_id": format!("P-{id:03}"),
            "first_name": "Jane",
            "last_name": "Doe",
            "date_of_birth": "1969-04-12",
            "gender": "F",
            "medical_record_number": format!("MRN-{id}"),
            "created_at": "2024-01-15T10:30:00Z",
            "updated_at": "2024-01-15T10:30:00Z"
        })
    }

    #[tokio::test]
    async fn test_bearer_token_attached_when_session_present() {
        let transport = ScriptedTransport::new();
        transport.respond_json(PATIENTS_PATH, 200, serde_json::json!([patient_json(1)]));

        let client = client(transport);
        client.store().set(session("tok", "ref")).await;

        let patients = client.patients().list(&PatientQuery::default()).await.unwrap();
        assert_eq!(patients.len(), 1);

        let requests = client.inner.transport.requests();
        assert_eq!(requests[0].header("authorization"), Some("Bearer tok"));
    }

    #[tokio::test]
    async fn test_no_session_sends_no_authorization_header() {
        let transport = ScriptedTransport::new();
        transport.respond_json(PATIENTS_PATH, 200, serde_json::json!([]));

        let client = client(transport);
        let patients = client.patients().list(&PatientQuery::default()).await.unwrap();
        assert_eq!(patients.len(), 0);

        let requests = client.inner.transport.requests();
        assert_eq!(requests[0].header("authorization"), None);
    }

    #[tokio::test]
    async fn test_401_refreshes_and_retries_exactly_once() {
        let transport = ScriptedTransport::new();
        transport.respond_json(PATIENTS_PATH, 401, serde_json::json!({ "detail": "expired" }));
        transport.respond_json(REFRESH_PATH, 200, serde_json::json!({ "access": "new" }));
        transport.respond_json(PATIENTS_PATH, 200, serde_json::json!([patient_json(1)]));

        let client = client(transport);
        client.store().set(session("old", "ref")).await;

        let patients = client.patients().list(&PatientQuery::default()).await.unwrap();
        assert_eq!(patients.len(), 1);

        let transport = &client.inner.transport;
        assert_eq!(transport.calls(PATIENTS_PATH), 2);
        assert_eq!(transport.calls(REFRESH_PATH), 1);

        let requests = transport.requests();
        let retried = requests
            .iter()
            .filter(|r| r.url.path() == PATIENTS_PATH)
            .last()
            .unwrap();
        assert_eq!(retried.header("authorization"), Some("Bearer new"));

        // The refreshed token is now the stored one.
        assert_eq!(client.store().access_token().await.as_deref(), Some("new"));
    }

    #[tokio::test]
    async fn test_second_401_after_refresh_propagates() {
        let transport = ScriptedTransport::new();
        transport.respond_json(PATIENTS_PATH, 401, serde_json::json!({ "detail": "expired" }));
        transport.respond_json(REFRESH_PATH, 200, serde_json::json!({ "access": "new" }));
        transport.respond_json(PATIENTS_PATH, 401, serde_json::json!({ "detail": "still expired" }));

        let client = client(transport);
        client.store().set(session("old", "ref")).await;

        let error = client
            .patients()
            .list(&PatientQuery::default())
            .await
            .unwrap_err();
        assert_eq!(error.status(), Some(401));

        // Exactly one refresh, exactly one retry.
        assert_eq!(client.inner.transport.calls(PATIENTS_PATH), 2);
        assert_eq!(client.inner.transport.calls(REFRESH_PATH), 1);
    }

    #[tokio::test]
    async fn test_failed_refresh_clears_session_and_emits_expiry() {
        let transport = ScriptedTransport::new();
        transport.respond_json(PATIENTS_PATH, 401, serde_json::json!({ "detail": "expired" }));
        transport.respond_json(REFRESH_PATH, 401, serde_json::json!({ "detail": "invalid" }));

        let client = client(transport);
        client.store().set(session("old", "ref")).await;

        let events: Arc<Mutex<Vec<AuthEvent>>> = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&events);
        client.set_event_hook(Arc::new(move |event| {
            sink.lock().unwrap().push(event.clone());
        }));

        let error = client
            .patients()
            .list(&PatientQuery::default())
            .await
            .unwrap_err();
        assert!(matches!(error, ApiError::SessionExpired(_)));
        assert_eq!(client.store().get().await, None);

        let events = events.lock().unwrap();
        assert!(matches!(events[0], AuthEvent::SessionExpired { .. }));
    }

    #[tokio::test]
    async fn test_401_without_session_becomes_session_expired() {
        let transport = ScriptedTransport::new();
        transport.respond_json(PATIENTS_PATH, 401, serde_json::json!({ "detail": "no auth" }));

        let client = client(transport);
        let error = client
            .patients()
            .list(&PatientQuery::default())
            .await
            .unwrap_err();
        assert!(matches!(error, ApiError::SessionExpired(_)));
        // No refresh exchange was attempted without a refresh token.
        assert_eq!(client.inner.transport.calls(REFRESH_PATH), 0);
    }

    #[tokio::test]
    async fn test_non_auth_errors_bubble_unmodified() {
        let transport = ScriptedTransport::new();
        transport.respond_json(
            PATIENTS_PATH,
            400,
            serde_json::json!({ "patient_id": ["This field is required."] }),
        );

        let client = client(transport);
        client.store().set(session("tok", "ref")).await;

        let error = client
            .patients()
            .list(&PatientQuery::default())
            .await
            .unwrap_err();
        match error {
            ApiError::Status { status, body } => {
                assert_eq!(status, 400);
                assert!(body.contains("This field is required."));
            }
            other => panic!("expected status error, got {other:?}"),
        }
        // 400 must not trigger a refresh.
        assert_eq!(client.inner.transport.calls(REFRESH_PATH), 0);
    }

    #[test]
    fn test_with_query_skips_empty_queries() {
        let url = Url::parse("https://host/api/patients/").unwrap();
        let query = PatientQuery::default();
        let result = with_query(url.clone(), &query).unwrap();
        assert_eq!(result.as_str(), url.as_str());
    }
}
