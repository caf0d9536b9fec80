//! HTTP collaborator seam for tracker requests.
//!
//! The provider never talks to reqwest directly; it goes through
//! [`TrackerHttp`] so login and search logic can be exercised against a
//! scripted mock. Timeouts, redirects and cookie persistence are owned by
//! the implementation, not by the provider.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use reqwest::cookie::{CookieStore, Jar};
use url::Url;

/// Response surface the provider needs: a status and the decoded body text.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// HTTP status of the response.
    pub status: StatusCode,
    /// Decoded body text.
    pub body: String,
}

/// HTTP access with a persistent cookie session.
///
/// `None` from either request method means connectivity failure (network
/// error, timeout or a non-success status); the caller treats it as terminal
/// for that one request and never retries here.
#[async_trait]
pub trait TrackerHttp: Send + Sync + fmt::Debug {
    /// Performs a GET against `url`.
    async fn get(&self, url: &str) -> Option<HttpResponse>;

    /// Performs a form-encoded POST against `url`.
    async fn post_form(&self, url: &str, form: &[(&str, String)]) -> Option<HttpResponse>;

    /// True when the session's cookie jar holds any non-empty cookie value
    /// for the tracker.
    fn has_session_cookie(&self) -> bool;
}

/// Production implementation backed by reqwest with a shared cookie jar.
///
/// The jar is the session: it lives as long as the provider instance and is
/// only reset by dropping the client.
pub struct ReqwestHttp {
    client: reqwest::Client,
    jar: Arc<Jar>,
    base_url: Url,
}

impl fmt::Debug for ReqwestHttp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReqwestHttp")
            .field("base_url", &self.base_url.as_str())
            .finish()
    }
}

impl ReqwestHttp {
    /// Request timeout for tracker pages.
    const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

    /// User agent sent with every request.
    const USER_AGENT: &'static str = "pretome-search/0.1.0";

    /// Creates a client with cookie persistence scoped to `base_url`.
    pub fn new(base_url: Url) -> Self {
        let jar = Arc::new(Jar::default());
        let client = reqwest::Client::builder()
            .timeout(Self::REQUEST_TIMEOUT)
            .user_agent(Self::USER_AGENT)
            .redirect(reqwest::redirect::Policy::limited(3))
            .cookie_provider(Arc::clone(&jar))
            .build()
            .expect("HTTP client creation should not fail");

        Self {
            client,
            jar,
            base_url,
        }
    }

    async fn read_body(response: reqwest::Response) -> Option<HttpResponse> {
        let status = response.status();
        if !status.is_success() {
            tracing::debug!("Tracker returned error status: {status}");
            return None;
        }

        match response.text().await {
            Ok(body) => Some(HttpResponse { status, body }),
            Err(e) => {
                tracing::warn!("Failed to read tracker response body: {e}");
                None
            }
        }
    }
}

#[async_trait]
impl TrackerHttp for ReqwestHttp {
    async fn get(&self, url: &str) -> Option<HttpResponse> {
        match self.client.get(url).send().await {
            Ok(response) => Self::read_body(response).await,
            Err(e) => {
                tracing::warn!("HTTP request to {url} failed: {e}");
                None
            }
        }
    }

    async fn post_form(&self, url: &str, form: &[(&str, String)]) -> Option<HttpResponse> {
        match self.client.post(url).form(form).send().await {
            Ok(response) => Self::read_body(response).await,
            Err(e) => {
                tracing::warn!("HTTP request to {url} failed: {e}");
                None
            }
        }
    }

    fn has_session_cookie(&self) -> bool {
        let Some(header) = self.jar.cookies(&self.base_url) else {
            return false;
        };
        let Ok(cookies) = header.to_str() else {
            return false;
        };

        cookies
            .split(';')
            .filter_map(|pair| pair.split_once('='))
            .any(|(_, value)| !value.trim().is_empty())
    }
}
