//! Session state for the client.
//!
//! This module provides:
//! - [`SessionStore`]: the in-memory authoritative session holder,
//!   mirrored through a [`crate::ports::SessionRepository`] for
//!   durability
//! - [`MemorySessionRepository`]: a non-durable repository for tests
//!   and ephemeral clients

mod memory;
mod store;

pub use memory::MemorySessionRepository;
pub use store::SessionStore;
