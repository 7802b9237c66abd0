//! Disease catalog (read-only).

use fundus_domain::Disease;

use crate::error::ApiResult;
use crate::ports::HttpTransport;

use super::ApiClient;

/// Client for the read-only `/diseases/` endpoints.
pub struct DiseasesClient<'a, T: HttpTransport> {
    pub(crate) client: &'a ApiClient<T>,
}

impl<T: HttpTransport> DiseasesClient<'_, T> {
    /// List all known diseases.
    ///
    /// # Errors
    ///
    /// Returns an [`crate::ApiError`] on failure.
    pub async fn list(&self) -> ApiResult<Vec<Disease>> {
        let url = self.client.endpoint("diseases/")?;
        self.client.get_json(url).await
    }

    /// Fetch one disease.
    ///
    /// # Errors
    ///
    /// Returns an [`crate::ApiError`] on failure.
    pub async fn get(&self, id: i64) -> ApiResult<Disease> {
        let url = self.client.endpoint(&format!("diseases/{id}/"))?;
        self.client.get_json(url).await
    }
}
