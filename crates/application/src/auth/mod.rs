//! Authentication plumbing for the Fundus client.
//!
//! This module provides:
//! - [`RefreshCoordinator`]: single-flight refresh of the access token
//! - [`AuthEvent`]: notifications for login, refresh and session expiry

mod events;
mod refresh;

pub use events::{AuthEvent, AuthEventHook};
pub use refresh::RefreshCoordinator;
