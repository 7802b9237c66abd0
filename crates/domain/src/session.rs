//! Session and user profile types.
//!
//! A [`Session`] is the authenticated state of the client: the bearer
//! access token, the refresh token used to renew it, and the profile of
//! the signed-in user. A session exists iff the client is considered
//! authenticated.

use serde::{Deserialize, Serialize};

/// Role of a healthcare professional, as reported by the backend.
///
/// Unknown roles deserialize to [`Role::Other`] so that new server-side
/// roles never break the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Medical doctor.
    #[default]
    Doctor,
    /// Nurse.
    Nurse,
    /// Imaging technician.
    Technician,
    /// Administrator.
    Admin,
    /// Researcher.
    Researcher,
    /// A role this client version does not know about.
    #[serde(other)]
    Other,
}

/// Profile of the authenticated user.
///
/// This is an opaque payload from the authentication endpoint; no
/// invariants are enforced client-side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Server-side user id.
    pub id: i64,
    /// Login name.
    pub username: String,
    /// E-mail address.
    #[serde(default)]
    pub email: String,
    /// Given name.
    #[serde(default)]
    pub first_name: String,
    /// Family name.
    #[serde(default)]
    pub last_name: String,
    /// Professional role.
    #[serde(default)]
    pub role: Role,
    /// Medical license number, if any.
    #[serde(default)]
    pub medical_license: String,
    /// Hospital the user belongs to.
    #[serde(default)]
    pub hospital_name: String,
    /// Department within the hospital.
    #[serde(default)]
    pub department: String,
    /// Contact phone number.
    #[serde(default)]
    pub phone_number: String,
}

impl UserProfile {
    /// Display name: "First Last" when available, otherwise the username.
    #[must_use]
    pub fn display_name(&self) -> String {
        if self.first_name.is_empty() && self.last_name.is_empty() {
            self.username.clone()
        } else {
            format!("{} {}", self.first_name, self.last_name)
                .trim()
                .to_string()
        }
    }
}

/// The authenticated state for this client instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Short-lived bearer token attached to authenticated requests.
    pub access_token: String,
    /// Long-lived token exchanged for new access tokens.
    pub refresh_token: String,
    /// Profile of the signed-in user.
    pub user: UserProfile,
}

impl Session {
    /// Create a session from the login response parts.
    #[must_use]
    pub const fn new(access_token: String, refresh_token: String, user: UserProfile) -> Self {
        Self {
            access_token,
            refresh_token,
            user,
        }
    }

    /// Returns the Authorization header value for this session.
    #[must_use]
    pub fn authorization_header(&self) -> String {
        format!("Bearer {}", self.access_token)
    }

    /// Replace only the access token, keeping refresh token and user.
    #[must_use]
    pub fn with_access_token(mut self, access_token: String) -> Self {
        self.access_token = access_token;
        self
    }
}
