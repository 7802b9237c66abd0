//! Shared test fixtures: a scripted transport and session builders.
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;
use fundus_domain::{Role, Session, UserProfile};

use crate::ports::{ApiRequest, ApiResponse, HttpTransport, TransportError};

/// A session with the given tokens and a fixed test user.
pub fn session(access: &str, refresh: &str) -> Session {
    Session::new(access.to_string(), refresh.to_string(), user())
}

/// The fixed test user profile.
pub fn user() -> UserProfile {
    UserProfile {
        id: 1,
        username: "testdoctor".to_string(),
        email: "testdoctor@example.com".to_string(),
        first_name: "Test".to_string(),
        last_name: "Doctor".to_string(),
        role: Role::Doctor,
        medical_license: "ML-001".to_string(),
        hospital_name: "General Hospital".to_string(),
        department: "Ophthalmology".to_string(),
        phone_number: String::new(),
    }
}

type Script = Mutex<HashMap<String, VecDeque<Result<ApiResponse, TransportError>>>>;

/// Transport that replays scripted responses keyed by URL path and
/// records every request it sees.
#[derive(Default)]
pub struct ScriptedTransport {
    routes: Script,
    log: Mutex<Vec<ApiRequest>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a JSON response for the given URL path.
    pub fn respond_json(&self, path: &str, status: u16, body: serde_json::Value) {
        let response = ApiResponse::new(
            status,
            HashMap::new(),
            serde_json::to_vec(&body).unwrap(),
        );
        self.routes
            .lock()
            .unwrap()
            .entry(path.to_string())
            .or_default()
            .push_back(Ok(response));
    }

    /// Queue a transport failure for the given URL path.
    pub fn respond_error(&self, path: &str, error: TransportError) {
        self.routes
            .lock()
            .unwrap()
            .entry(path.to_string())
            .or_default()
            .push_back(Err(error));
    }

    /// Number of requests seen for the given URL path.
    pub fn calls(&self, path: &str) -> usize {
        self.log
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.url.path() == path)
            .count()
    }

    /// All recorded requests, in arrival order.
    pub fn requests(&self) -> Vec<ApiRequest> {
        self.log.lock().unwrap().clone()
    }
}

#[async_trait]
impl HttpTransport for ScriptedTransport {
    async fn execute(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        let path = request.url.path().to_string();
        self.log.lock().unwrap().push(request);
        self.routes
            .lock()
            .unwrap()
            .get_mut(&path)
            .and_then(VecDeque::pop_front)
            .unwrap_or_else(|| Err(TransportError::Other(format!("no scripted response for {path}"))))
    }
}
