//! Extraction of release records from browse-page HTML.
//!
//! Each results-table row parses independently: a malformed row is logged
//! and skipped without aborting its batch, and sibling rows still extract.

use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::errors::RowParseError;
use crate::size::convert_size;
use crate::types::{ReleaseRecord, SearchMode};

/// Heading text the tracker renders when a query matches nothing.
const NO_RESULTS_SENTINEL: &str = "No .torrents fit this filter criteria";

/// Inline style identifying the single results table.
const RESULTS_TABLE_STYLE: &str = "border: none; width: 100%;";

/// Inline style of the bold detail anchor inside a row's name cell.
const DETAIL_ANCHOR_STYLE: &str = "font-size: 1.25em; font-weight: bold;";

/// Prefix stripped from the detail href to recover the torrent id.
const DETAIL_HREF_PREFIX: &str = "details.php?id=";

/// Zero-based browse-table column carrying the release size.
const SIZE_CELL: usize = 7;

/// Zero-based browse-table column carrying the seeder count.
const SEEDERS_CELL: usize = 9;

/// Zero-based browse-table column carrying the leecher count.
const LEECHERS_CELL: usize = 10;

/// Parses browse-page HTML into normalized release records.
///
/// Pure apart from logging: output depends only on the HTML, the search mode
/// and the configured seeder threshold.
#[derive(Debug, Clone)]
pub struct ResultExtractor {
    base_url: Url,
    minimum_seeders: u32,
}

impl ResultExtractor {
    /// Creates an extractor joining download links against `base_url`.
    pub fn new(base_url: Url, minimum_seeders: u32) -> Self {
        Self {
            base_url,
            minimum_seeders,
        }
    }

    /// Extracts zero or more records from one browse response, in row order.
    ///
    /// The tracker's explicit "no torrents" heading and a missing results
    /// table both yield an empty list; the former is the documented empty
    /// result, the latter a structural failure logged at error severity.
    pub fn extract(&self, html: &str, mode: SearchMode) -> Vec<ReleaseRecord> {
        let document = Html::parse_document(html);

        let heading_selector = Selector::parse("h2").expect("valid selector");
        if document
            .select(&heading_selector)
            .any(|heading| heading.text().collect::<String>() == NO_RESULTS_SENTINEL)
        {
            tracing::debug!("Data returned from tracker does not contain any torrents");
            return Vec::new();
        }

        let table_selector = Selector::parse(&format!("table[style=\"{RESULTS_TABLE_STYLE}\"]"))
            .expect("valid selector");
        let Some(results_table) = document.select(&table_selector).next() else {
            tracing::error!("Could not find table of torrents");
            return Vec::new();
        };

        let row_selector = Selector::parse("tr.browse").expect("valid selector");
        let mut records = Vec::new();
        for row in results_table.select(&row_selector) {
            match self.parse_row(row, mode) {
                Ok(Some(record)) => records.push(record),
                Ok(None) => {}
                Err(error) => {
                    tracing::error!("Failed to parse result row: {error}");
                }
            }
        }

        records
    }

    /// Parses one table row into at most one record.
    ///
    /// `Ok(None)` means the row was deliberately excluded (missing title or
    /// download link, or below the seeder threshold); `Err` means the row's
    /// markup did not match the expected column layout.
    fn parse_row(
        &self,
        row: ElementRef<'_>,
        mode: SearchMode,
    ) -> Result<Option<ReleaseRecord>, RowParseError> {
        let cell_selector = Selector::parse("td").expect("valid selector");
        let cells: Vec<ElementRef<'_>> = row.select(&cell_selector).collect();

        let anchor_selector = Selector::parse(&format!("a[style=\"{DETAIL_ANCHOR_STYLE}\"]"))
            .expect("valid selector");
        let link = cells
            .get(1)
            .ok_or(RowParseError::MissingCell { index: 1 })?
            .select(&anchor_selector)
            .next()
            .ok_or(RowParseError::MissingDetailAnchor)?;

        let href = link.value().attr("href").ok_or(RowParseError::MissingHref)?;
        let torrent_id = href.replace(DETAIL_HREF_PREFIX, "");

        // The anchor's first text node doubles as the download path segment.
        let display_name = link.text().next().unwrap_or_default();
        let title = match link.value().attr("title") {
            Some(title) if !title.is_empty() => title.to_string(),
            _ => display_name.to_string(),
        };

        let download_url = self
            .base_url
            .join(&format!("download.php/{torrent_id}/{display_name}.torrent"))?
            .to_string();
        if title.is_empty() || download_url.is_empty() {
            return Ok(None);
        }

        let seeders = Self::peer_count(&cells, SEEDERS_CELL)?;
        let leechers = Self::peer_count(&cells, LEECHERS_CELL)?;

        // Filter unseeded releases; the floor is at least one seeder.
        if seeders < self.minimum_seeders.max(1) {
            if mode != SearchMode::Rss {
                tracing::debug!(
                    "Discarding torrent because it doesn't meet the minimum seeders: \
                     {title}. Seeders: {seeders}"
                );
            }
            return Ok(None);
        }

        let size_cell = cells
            .get(SIZE_CELL)
            .ok_or(RowParseError::MissingCell { index: SIZE_CELL })?;
        let size_text = size_cell.text().collect::<String>();
        let size = convert_size(&size_text).unwrap_or(-1);

        if mode != SearchMode::Rss {
            tracing::info!("Found result: {title} with {seeders} seeders and {leechers} leechers");
        }

        Ok(Some(ReleaseRecord {
            title,
            download_url,
            size,
            seeders,
            leechers,
            pubdate: None,
            hash: None,
        }))
    }

    fn peer_count(cells: &[ElementRef<'_>], index: usize) -> Result<u32, RowParseError> {
        let cell = cells.get(index).ok_or(RowParseError::MissingCell { index })?;
        let text = cell.text().next().unwrap_or_default().trim();
        text.parse::<u32>()
            .map_err(|source| RowParseError::InvalidPeerCount { index, source })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extractor(minimum_seeders: u32) -> ResultExtractor {
        ResultExtractor::new(
            "https://pretome.info".parse().unwrap(),
            minimum_seeders,
        )
    }

    fn browse_page(rows: &str) -> String {
        format!(
            "<html><body>\
             <table style=\"border: none; width: 100%;\">\
             <tr><th>Type</th><th>Name</th></tr>\
             {rows}\
             </table>\
             </body></html>"
        )
    }

    fn result_row(id: &str, name: &str, size: &str, seeders: &str, leechers: &str) -> String {
        format!(
            "<tr class=\"browse\">\
             <td>TV</td>\
             <td><a style=\"font-size: 1.25em; font-weight: bold;\" \
             href=\"details.php?id={id}\" title=\"{name}\">{name}</a></td>\
             <td></td><td></td><td></td><td></td><td></td>\
             <td>{size}</td>\
             <td>12</td>\
             <td>{seeders}</td>\
             <td>{leechers}</td>\
             </tr>"
        )
    }

    #[test]
    fn test_single_row_extracts_fully() {
        let html = browse_page(&result_row("1234", "Show.S01E01.720p", "1 GB", "5", "2"));
        let records = extractor(1).extract(&html, SearchMode::Episode);

        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record.title, "Show.S01E01.720p");
        assert_eq!(
            record.download_url,
            "https://pretome.info/download.php/1234/Show.S01E01.720p.torrent"
        );
        assert_eq!(record.size, 1_073_741_824);
        assert_eq!(record.seeders, 5);
        assert_eq!(record.leechers, 2);
        assert_eq!(record.pubdate, None);
        assert_eq!(record.hash, None);
    }

    #[test]
    fn test_no_results_heading_wins_over_table_contents() {
        let rows = result_row("1", "Show.S01E01", "1 GB", "5", "2");
        let html = format!(
            "<html><body><h2>No .torrents fit this filter criteria</h2>\
             <table style=\"border: none; width: 100%;\">{rows}</table></body></html>"
        );
        assert!(extractor(1).extract(&html, SearchMode::Episode).is_empty());
    }

    #[test]
    fn test_missing_results_table() {
        let html = "<html><body><table><tr><td>unrelated</td></tr></table></body></html>";
        assert!(extractor(1).extract(html, SearchMode::Episode).is_empty());
    }

    #[test]
    fn test_seeder_filter_boundary() {
        let rows = [
            result_row("1", "Below.Threshold", "1 GB", "2", "0"),
            result_row("2", "At.Threshold", "1 GB", "3", "0"),
        ]
        .concat();
        let records = extractor(3).extract(&browse_page(&rows), SearchMode::Episode);

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].title, "At.Threshold");
    }

    #[test]
    fn test_zero_minimum_still_filters_unseeded() {
        let rows = [
            result_row("1", "Unseeded", "1 GB", "0", "4"),
            result_row("2", "Seeded", "1 GB", "1", "0"),
        ]
        .concat();
        let records = extractor(0).extract(&browse_page(&rows), SearchMode::Episode);

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].title, "Seeded");
    }

    #[test]
    fn test_filter_applies_in_rss_mode_too() {
        let rows = result_row("1", "Unseeded", "1 GB", "0", "4");
        assert!(extractor(0).extract(&browse_page(&rows), SearchMode::Rss).is_empty());
    }

    #[test]
    fn test_malformed_row_does_not_abort_siblings() {
        let rows = [
            result_row("1", "First.Valid", "1 GB", "5", "2"),
            // Name cell without the styled detail anchor.
            "<tr class=\"browse\"><td>TV</td><td><a href=\"details.php?id=2\">Plain</a></td>\
             <td></td><td></td><td></td><td></td><td></td><td>1 GB</td><td></td>\
             <td>9</td><td>1</td></tr>"
                .to_string(),
            result_row("3", "Second.Valid", "1 GB", "4", "1"),
        ]
        .concat();
        let records = extractor(1).extract(&browse_page(&rows), SearchMode::Episode);

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].title, "First.Valid");
        assert_eq!(records[1].title, "Second.Valid");
    }

    #[test]
    fn test_non_numeric_seeders_skips_only_that_row() {
        let rows = [
            result_row("1", "Bad.Seeders", "1 GB", "many", "2"),
            result_row("2", "Good.Row", "1 GB", "5", "2"),
        ]
        .concat();
        let records = extractor(1).extract(&browse_page(&rows), SearchMode::Episode);

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].title, "Good.Row");
    }

    #[test]
    fn test_unparseable_size_becomes_sentinel() {
        let rows = result_row("1", "Sizeless", "N/A", "5", "2");
        let records = extractor(1).extract(&browse_page(&rows), SearchMode::Episode);

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].size, -1);
    }

    #[test]
    fn test_title_falls_back_to_anchor_text() {
        let rows = "<tr class=\"browse\"><td>TV</td>\
             <td><a style=\"font-size: 1.25em; font-weight: bold;\" \
             href=\"details.php?id=77\">Fallback.Name</a></td>\
             <td></td><td></td><td></td><td></td><td></td><td>1 GB</td><td></td>\
             <td>5</td><td>2</td></tr>";
        let records = extractor(1).extract(&browse_page(rows), SearchMode::Episode);

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].title, "Fallback.Name");
        assert_eq!(
            records[0].download_url,
            "https://pretome.info/download.php/77/Fallback.Name.torrent"
        );
    }

    #[test]
    fn test_rows_outside_browse_class_are_ignored() {
        let rows = [
            "<tr><td>TV</td><td>header repeat</td></tr>".to_string(),
            result_row("1", "Only.One", "1 GB", "5", "2"),
        ]
        .concat();
        let records = extractor(1).extract(&browse_page(&rows), SearchMode::Episode);

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].title, "Only.One");
    }
}
