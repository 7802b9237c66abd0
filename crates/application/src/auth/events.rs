//! Authentication lifecycle events.

use std::sync::Arc;

/// Events emitted by the client's authentication pipeline.
///
/// The embedding application subscribes via
/// [`crate::client::ApiClient::set_event_hook`]; on
/// [`AuthEvent::SessionExpired`] it is expected to navigate the user
/// back to its login entry point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthEvent {
    /// A login completed and a session was stored.
    LoggedIn {
        /// Username of the signed-in user.
        username: String,
    },
    /// The access token was renewed; the session is still valid.
    TokenRefreshed,
    /// The session was torn down because refresh was impossible or
    /// rejected. The application should return to its login screen.
    SessionExpired {
        /// Why the session ended.
        reason: String,
    },
    /// The user logged out locally.
    LoggedOut,
}

/// Callback invoked for every [`AuthEvent`].
pub type AuthEventHook = Arc<dyn Fn(&AuthEvent) + Send + Sync>;
