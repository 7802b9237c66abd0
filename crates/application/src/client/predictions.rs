//! Prediction read and confirm operations.

use serde::Serialize;
use uuid::Uuid;

use fundus_domain::{Prediction, PredictionStatus};

use crate::error::ApiResult;
use crate::ports::HttpTransport;

use super::{with_query, ApiClient};

/// Query parameters for listing predictions.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PredictionQuery {
    /// Restrict to one processing state.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<PredictionStatus>,
    /// Restrict to normal or abnormal findings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_normal: Option<bool>,
    /// Restrict to confirmed or unconfirmed findings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_confirmed: Option<bool>,
}

impl PredictionQuery {
    /// Restrict to the given processing state.
    #[must_use]
    pub const fn status(mut self, status: PredictionStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Restrict to normal (or abnormal) findings.
    #[must_use]
    pub const fn normal(mut self, is_normal: bool) -> Self {
        self.is_normal = Some(is_normal);
        self
    }

    /// Restrict to confirmed (or unconfirmed) findings.
    #[must_use]
    pub const fn confirmed(mut self, is_confirmed: bool) -> Self {
        self.is_confirmed = Some(is_confirmed);
        self
    }
}

/// Client for the `/predictions/` endpoints.
pub struct PredictionsClient<'a, T: HttpTransport> {
    pub(crate) client: &'a ApiClient<T>,
}

impl<T: HttpTransport> PredictionsClient<'_, T> {
    /// List predictions.
    ///
    /// # Errors
    ///
    /// Returns an [`crate::ApiError`] on failure.
    pub async fn list(&self, query: &PredictionQuery) -> ApiResult<Vec<Prediction>> {
        let url = with_query(self.client.endpoint("predictions/")?, query)?;
        self.client.get_json(url).await
    }

    /// Fetch one prediction.
    ///
    /// # Errors
    ///
    /// Returns an [`crate::ApiError`] on failure.
    pub async fn get(&self, id: Uuid) -> ApiResult<Prediction> {
        let url = self.client.endpoint(&format!("predictions/{id}/"))?;
        self.client.get_json(url).await
    }

    /// Confirm a prediction as a medical professional. Returns the
    /// updated record with reviewer metadata filled in server-side.
    ///
    /// # Errors
    ///
    /// Returns an [`crate::ApiError`] on failure.
    pub async fn confirm(&self, id: Uuid) -> ApiResult<Prediction> {
        let url = self.client.endpoint(&format!("predictions/{id}/confirm/"))?;
        self.client.post_empty(url).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::session::{MemorySessionRepository, SessionStore};
    use crate::test_support::{session, ScriptedTransport};
    use fundus_domain::ClientConfig;
    use pretty_assertions::assert_eq;

    fn client(transport: ScriptedTransport) -> ApiClient<ScriptedTransport> {
        let config = ClientConfig::new("https://host/api/", "https://host/media/")
            .expect("static test config");
        let store = SessionStore::new(Arc::new(MemorySessionRepository::new()));
        ApiClient::new(config, transport, store)
    }

    #[tokio::test]
    async fn test_list_serializes_filters() {
        let transport = ScriptedTransport::new();
        transport.respond_json("/api/predictions/", 200, serde_json::json!([]));

        let client = client(transport);
        client.store().set(session("t", "r")).await;

        let query = PredictionQuery::default()
            .status(PredictionStatus::Completed)
            .normal(false);
        client.predictions().list(&query).await.unwrap();

        let requests = client.inner.transport.requests();
        assert_eq!(
            requests[0].url.query(),
            Some("status=completed&is_normal=false")
        );
    }

    #[tokio::test]
    async fn test_confirm_posts_to_action_url() {
        let id: Uuid = "0193a1de-5cc0-7000-8000-000000000001".parse().unwrap();
        let path = format!("/api/predictions/{id}/confirm/");

        let transport = ScriptedTransport::new();
        transport.respond_json(
            &path,
            200,
            serde_json::json!({
                "id": id,
                "retinal_image": "0193a1de-5cc0-7000-8000-000000000002",
                "is_normal": true,
                "status": "completed",
                "created_at": "2024-03-01T08:00:05Z",
                "is_confirmed": true,
                "reviewed_at": "2024-03-02T09:00:00Z"
            }),
        );

        let client = client(transport);
        client.store().set(session("t", "r")).await;

        let confirmed = client.predictions().confirm(id).await.unwrap();
        assert!(confirmed.is_confirmed);
        assert!(confirmed.reviewed_at.is_some());

        let requests = client.inner.transport.requests();
        assert_eq!(requests[0].method.as_str(), "POST");
        assert_eq!(requests[0].url.path(), path);
    }
}
