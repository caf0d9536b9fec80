//! Data types for tracker search requests and results.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Caller-supplied search request: modes in order, each with its query
/// strings in order. Iteration order is preserved through to the returned
/// record sequence.
pub type SearchRequest = Vec<(SearchMode, Vec<String>)>;

/// Label distinguishing scheduled background scans from on-demand searches.
///
/// The mode never changes what is searched or filtered; RSS scans only skip
/// the per-result and per-discard log lines.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum SearchMode {
    /// Scheduled background scan.
    Rss,
    /// On-demand single episode search.
    Episode,
    /// On-demand season pack search.
    Season,
}

impl std::fmt::Display for SearchMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SearchMode::Rss => "RSS",
            SearchMode::Episode => "Episode",
            SearchMode::Season => "Season",
        };
        write!(f, "{name}")
    }
}

/// Normalized release parsed from one results-table row.
///
/// Emitted records always carry a non-empty title and download URL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReleaseRecord {
    /// Release title as listed on the tracker.
    pub title: String,
    /// Direct `.torrent` download URL.
    pub download_url: String,
    /// Size in bytes, or `-1` when the size column could not be parsed.
    pub size: i64,
    /// Peers seeding the complete release.
    pub seeders: u32,
    /// Peers still downloading.
    pub leechers: u32,
    /// Publish date; the tracker does not expose one in browse results.
    pub pubdate: Option<DateTime<Utc>>,
    /// Info hash; the tracker does not expose one in browse results.
    pub hash: Option<String>,
}
