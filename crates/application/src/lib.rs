//! Fundus Application - Client core
//!
//! This crate implements the authenticated request pipeline of the
//! Fundus client: the session store, the dispatcher that attaches
//! bearer credentials, the single-flight refresh coordinator, and thin
//! per-resource clients over the REST API. Transport and persistence
//! are ports implemented by the infrastructure layer.

pub mod auth;
pub mod client;
pub mod error;
pub mod ports;
pub mod session;

pub use auth::{AuthEvent, AuthEventHook, RefreshCoordinator};
pub use client::{
    ApiClient, AuthClient, DashboardClient, DiseasesClient, HistoryClient, HistoryQuery,
    ImageQuery, ImagesClient, PatientQuery, PatientsClient, PredictionQuery, PredictionsClient,
};
pub use error::{ApiError, ApiResult};
pub use session::{MemorySessionRepository, SessionStore};

#[cfg(test)]
pub(crate) mod test_support;
