//! Error types for result-row parsing.

use thiserror::Error;

/// Failure parsing a single results-table row.
///
/// Row failures are always recovered at the extraction loop: the row is
/// logged and skipped, sibling rows are unaffected.
#[derive(Debug, Error)]
pub enum RowParseError {
    /// The row's name cell has no styled detail anchor.
    #[error("row has no detail link anchor")]
    MissingDetailAnchor,

    /// The detail anchor carries no href to take the torrent id from.
    #[error("detail anchor has no href attribute")]
    MissingHref,

    /// The row has fewer cells than the expected column layout.
    #[error("row is missing cell {index}")]
    MissingCell {
        /// Zero-based index of the absent cell.
        index: usize,
    },

    /// A peer-count cell did not contain an integer.
    #[error("cell {index} is not a peer count: {source}")]
    InvalidPeerCount {
        /// Zero-based index of the offending cell.
        index: usize,
        /// Underlying integer parse failure.
        source: std::num::ParseIntError,
    },

    /// The download URL could not be joined to the site base.
    #[error("could not build download URL: {0}")]
    DownloadUrl(#[from] url::ParseError),
}
