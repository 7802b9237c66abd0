//! Patient CRUD.

use serde::Serialize;

use fundus_domain::{NewPatient, Patient};

use crate::error::ApiResult;
use crate::ports::HttpTransport;

use super::{with_query, ApiClient};

/// Query parameters for listing patients.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PatientQuery {
    /// Free-text search over id, names and medical record number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    /// Ordering field, e.g. `-created_at` or `last_name`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ordering: Option<String>,
}

impl PatientQuery {
    /// Search for the given text.
    #[must_use]
    pub fn search(mut self, text: impl Into<String>) -> Self {
        self.search = Some(text.into());
        self
    }

    /// Order by the given field.
    #[must_use]
    pub fn ordering(mut self, field: impl Into<String>) -> Self {
        self.ordering = Some(field.into());
        self
    }
}

/// Client for the `/patients/` endpoints.
pub struct PatientsClient<'a, T: HttpTransport> {
    pub(crate) client: &'a ApiClient<T>,
}

impl<T: HttpTransport> PatientsClient<'_, T> {
    /// List patients.
    ///
    /// # Errors
    ///
    /// Returns an [`crate::ApiError`] on failure.
    pub async fn list(&self, query: &PatientQuery) -> ApiResult<Vec<Patient>> {
        let url = with_query(self.client.endpoint("patients/")?, query)?;
        self.client.get_json(url).await
    }

    /// Fetch one patient.
    ///
    /// # Errors
    ///
    /// Returns an [`crate::ApiError`] on failure.
    pub async fn get(&self, id: i64) -> ApiResult<Patient> {
        let url = self.client.endpoint(&format!("patients/{id}/"))?;
        self.client.get_json(url).await
    }

    /// Create a patient.
    ///
    /// # Errors
    ///
    /// Returns an [`crate::ApiError`] on failure; validation errors
    /// arrive as a status error with the server's body.
    pub async fn create(&self, patient: &NewPatient) -> ApiResult<Patient> {
        let url = self.client.endpoint("patients/")?;
        self.client.post_json(url, patient).await
    }

    /// Replace a patient record.
    ///
    /// # Errors
    ///
    /// Returns an [`crate::ApiError`] on failure.
    pub async fn update(&self, id: i64, patient: &NewPatient) -> ApiResult<Patient> {
        let url = self.client.endpoint(&format!("patients/{id}/"))?;
        self.client.put_json(url, patient).await
    }

    /// Delete a patient record.
    ///
    /// # Errors
    ///
    /// Returns an [`crate::ApiError`] on failure.
    pub async fn delete(&self, id: i64) -> ApiResult<()> {
        let url = self.client.endpoint(&format!("patients/{id}/"))?;
        self.client.delete(url).await
    }
}
