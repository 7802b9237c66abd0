//! Port definitions (interfaces)
//!
//! Ports define the boundaries between the application core and external
//! systems. Each port is a trait implemented by an adapter in the
//! infrastructure layer.

mod http;
mod session_repository;

pub use http::{
    ApiRequest, ApiResponse, HttpMethod, HttpTransport, MultipartField, RequestBody,
    TransportError,
};
pub use session_repository::{SessionRepository, SessionStoreError};
