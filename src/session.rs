//! Login gate for the tracker's session-based authentication.

use std::sync::Arc;

use crate::config::PretomeConfig;
use crate::http::TrackerHttp;

/// Marker the tracker embeds in the login response on bad credentials.
const LOGIN_FAILED_MARKER: &str = "Username or password incorrect";

/// Ensures the HTTP session is logged in before a search.
///
/// Idempotent across calls: any non-empty session cookie short-circuits the
/// login POST. The cookie is not revalidated server-side; a stale session
/// only surfaces later as an empty or malformed search response.
#[derive(Debug, Clone)]
pub struct SessionGate {
    http: Arc<dyn TrackerHttp>,
    login_url: String,
    username: String,
    password: String,
    pin: String,
}

impl SessionGate {
    /// Creates a gate posting to `login_url` with credentials from `config`.
    pub fn new(http: Arc<dyn TrackerHttp>, login_url: String, config: &PretomeConfig) -> Self {
        Self {
            http,
            login_url,
            username: config.username.clone(),
            password: config.password.clone(),
            pin: config.pin.clone(),
        }
    }

    /// Logs in unless the session already has a cookie.
    ///
    /// Returns false on connectivity failure or rejected credentials. One
    /// failure aborts the whole search call; there is no retry here.
    pub async fn ensure_authenticated(&self) -> bool {
        if self.http.has_session_cookie() {
            return true;
        }

        let login_params = [
            ("username", self.username.clone()),
            ("password", self.password.clone()),
            ("login_pin", self.pin.clone()),
        ];

        let Some(response) = self.http.post_form(&self.login_url, &login_params).await else {
            tracing::warn!("Unable to connect to tracker");
            return false;
        };
        if response.body.is_empty() {
            tracing::warn!("Unable to connect to tracker");
            return false;
        }

        if response.body.contains(LOGIN_FAILED_MARKER) {
            tracing::warn!("Invalid username or password. Check your settings");
            return false;
        }

        true
    }
}
