//! Medical history operations.

use serde::Serialize;

use fundus_domain::{MedicalHistory, NewMedicalHistory};

use crate::error::ApiResult;
use crate::ports::HttpTransport;

use super::{with_query, ApiClient};

/// Query parameters for listing medical histories.
#[derive(Debug, Clone, Default, Serialize)]
pub struct HistoryQuery {
    /// Restrict to records of one patient.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patient: Option<i64>,
}

impl HistoryQuery {
    /// Restrict to records of the given patient.
    #[must_use]
    pub const fn patient(mut self, id: i64) -> Self {
        self.patient = Some(id);
        self
    }
}

/// Client for the `/medical-history/` endpoints.
pub struct HistoryClient<'a, T: HttpTransport> {
    pub(crate) client: &'a ApiClient<T>,
}

impl<T: HttpTransport> HistoryClient<'_, T> {
    /// List medical history records.
    ///
    /// # Errors
    ///
    /// Returns an [`crate::ApiError`] on failure.
    pub async fn list(&self, query: &HistoryQuery) -> ApiResult<Vec<MedicalHistory>> {
        let url = with_query(self.client.endpoint("medical-history/")?, query)?;
        self.client.get_json(url).await
    }

    /// Fetch one record.
    ///
    /// # Errors
    ///
    /// Returns an [`crate::ApiError`] on failure.
    pub async fn get(&self, id: i64) -> ApiResult<MedicalHistory> {
        let url = self.client.endpoint(&format!("medical-history/{id}/"))?;
        self.client.get_json(url).await
    }

    /// Create a record for a patient.
    ///
    /// # Errors
    ///
    /// Returns an [`crate::ApiError`] on failure.
    pub async fn create(&self, history: &NewMedicalHistory) -> ApiResult<MedicalHistory> {
        let url = self.client.endpoint("medical-history/")?;
        self.client.post_json(url, history).await
    }

    /// Replace a record.
    ///
    /// # Errors
    ///
    /// Returns an [`crate::ApiError`] on failure.
    pub async fn update(&self, id: i64, history: &NewMedicalHistory) -> ApiResult<MedicalHistory> {
        let url = self.client.endpoint(&format!("medical-history/{id}/"))?;
        self.client.put_json(url, history).await
    }
}
