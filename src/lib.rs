//! Pretome Search - session-authenticated search provider for the Pretome tracker
//!
//! Authenticates against the tracker's web login, submits browse queries and
//! parses the returned HTML into a normalized list of release records. Parsing
//! tolerates per-row failures: one malformed row is logged and skipped without
//! aborting its batch.

#![deny(missing_docs)]
#![deny(clippy::missing_errors_doc)]
#![warn(clippy::too_many_lines)]

pub mod config;
pub mod errors;
pub mod extract;
pub mod http;
pub mod provider;
pub mod session;
pub mod size;
pub mod types;

// Re-export main types
pub use config::PretomeConfig;
pub use errors::RowParseError;
pub use extract::ResultExtractor;
pub use http::{HttpResponse, ReqwestHttp, TrackerHttp};
pub use provider::{PretomeProvider, TorrentSearchProvider};
pub use session::SessionGate;
pub use size::convert_size;
pub use types::{ReleaseRecord, SearchMode, SearchRequest};
