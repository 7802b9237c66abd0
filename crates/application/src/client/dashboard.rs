//! Dashboard statistics.

use fundus_domain::DashboardStats;

use crate::error::ApiResult;
use crate::ports::HttpTransport;

use super::ApiClient;

/// Client for the `/dashboard/stats/` endpoint.
pub struct DashboardClient<'a, T: HttpTransport> {
    pub(crate) client: &'a ApiClient<T>,
}

impl<T: HttpTransport> DashboardClient<'_, T> {
    /// Fetch aggregate statistics for the dashboard.
    ///
    /// # Errors
    ///
    /// Returns an [`crate::ApiError`] on failure.
    pub async fn stats(&self) -> ApiResult<DashboardStats> {
        let url = self.client.endpoint("dashboard/stats/")?;
        self.client.get_json(url).await
    }
}
