//! Pretome provider: authentication gate plus the sequential search loop.

use std::sync::Arc;

use async_trait::async_trait;
use url::Url;

use crate::config::PretomeConfig;
use crate::extract::ResultExtractor;
use crate::http::{ReqwestHttp, TrackerHttp};
use crate::session::SessionGate;
use crate::types::{ReleaseRecord, SearchMode, SearchRequest};

/// Tracker site root.
const BASE_URL: &str = "https://pretome.info";

/// Fixed category filter appended to every browse query (TV, pre-encoded).
const SEARCH_CATEGORIES: &str = "&st=1&cat%5B%5D=7";

/// Trait for torrent search providers.
///
/// The host registry holds providers behind this seam; this crate ships the
/// Pretome implementation.
#[async_trait]
pub trait TorrentSearchProvider: Send + Sync + std::fmt::Debug {
    /// Runs every query of every mode and returns all extracted records in
    /// mode-then-query order.
    ///
    /// Never fails outright: authentication failure returns an empty list
    /// and every per-query failure contributes zero records.
    async fn search(&self, requests: &SearchRequest) -> Vec<ReleaseRecord>;
}

/// Search provider for the Pretome private tracker.
///
/// One instance owns one HTTP session (cookie jar); searches on the same
/// instance reuse it and are expected to run sequentially.
#[derive(Debug)]
pub struct PretomeProvider {
    http: Arc<dyn TrackerHttp>,
    gate: SessionGate,
    extractor: ResultExtractor,
    base_url: Url,
}

impl PretomeProvider {
    /// Creates a provider with a cookie-persisting reqwest client.
    pub fn new(config: PretomeConfig) -> Self {
        let base_url: Url = BASE_URL.parse().expect("base URL should be valid");
        let http = Arc::new(ReqwestHttp::new(base_url));
        Self::with_http(config, http)
    }

    /// Creates a provider over a custom HTTP collaborator.
    pub fn with_http(config: PretomeConfig, http: Arc<dyn TrackerHttp>) -> Self {
        let base_url: Url = BASE_URL.parse().expect("base URL should be valid");
        let login_url = base_url
            .join("takelogin.php")
            .expect("login URL should be valid")
            .to_string();
        let gate = SessionGate::new(Arc::clone(&http), login_url, &config);
        let extractor = ResultExtractor::new(base_url.clone(), config.minimum_seeders);

        Self {
            http,
            gate,
            extractor,
            base_url,
        }
    }

    /// Detail page URL for a torrent id.
    pub fn detail_url(&self, torrent_id: &str) -> String {
        format!("{}details.php?id={torrent_id}", self.base_url)
    }

    fn search_url(&self, query: &str) -> String {
        format!(
            "{}browse.php?search={}{}",
            self.base_url,
            urlencoding::encode(query),
            SEARCH_CATEGORIES
        )
    }
}

#[async_trait]
impl TorrentSearchProvider for PretomeProvider {
    async fn search(&self, requests: &SearchRequest) -> Vec<ReleaseRecord> {
        let mut results = Vec::new();
        if !self.gate.ensure_authenticated().await {
            return results;
        }

        for (mode, queries) in requests {
            tracing::debug!("Search mode: {mode}");

            for query in queries {
                if *mode != SearchMode::Rss {
                    tracing::debug!("Search string: {query}");
                }

                let search_url = self.search_url(query);
                match self.http.get(&search_url).await {
                    Some(response) if !response.body.is_empty() => {
                        results.extend(self.extractor.extract(&response.body, *mode));
                    }
                    _ => tracing::debug!("No data returned from tracker"),
                }
            }
        }

        results
    }
}
