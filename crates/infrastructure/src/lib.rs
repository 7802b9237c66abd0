//! Fundus Infrastructure - Adapters and implementations
//!
//! This crate provides concrete implementations of the ports defined in
//! the application layer: a reqwest-based HTTP transport, a file-backed
//! session repository, and an environment-based configuration loader.

pub mod config;
pub mod persistence;
pub mod transport;

pub use config::{env_lookup, load_config, load_config_from};
pub use persistence::FileSessionRepository;
pub use transport::ReqwestTransport;
