//! Buckets dated release observations by version label

use std::collections::HashSet;
use std::sync::LazyLock;

use chrono::NaiveDate;
use indexmap::IndexMap;
use regex::Regex;
use serde::Serialize;
use tracing::debug;

use crate::listing::types::{CellRecord, RowRecord};

/// Link reported for rows that have no download link
pub const MISSING_LINK: &str = "link not found";

/// Leading `YYYY-MM-DD` of a sort key or cell text
static DATE_PREFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}").unwrap());

/// A single dated fact about one version label
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VersionObservation {
    pub version: String,
    pub date: NaiveDate,
    pub link: String,
    pub downloads: u64,
}

/// Observations per version label, in first-seen order
pub type Buckets = IndexMap<String, Vec<VersionObservation>>;

/// Parse a leading `YYYY-MM-DD` date
///
/// Returns None when the text does not start with the pattern or the
/// prefix is not a real calendar date (e.g. "2023-13-40").
pub fn parse_date_prefix(text: &str) -> Option<NaiveDate> {
    let prefix = DATE_PREFIX_RE.find(text)?;
    NaiveDate::parse_from_str(prefix.as_str(), "%Y-%m-%d").ok()
}

/// Extract the date of a cell, preferring its sort key over its visible text
pub fn cell_date(cell: &CellRecord) -> Option<NaiveDate> {
    cell.sort_key
        .as_deref()
        .and_then(parse_date_prefix)
        .or_else(|| cell.text.as_deref().map(str::trim).and_then(parse_date_prefix))
}

/// Parse a download count from the digits of `text`
///
/// Separators and labels are dropped ("1,024 downloads" -> 1024). Text
/// without digits, or a number too large for `u64`, counts as 0.
pub fn parse_download_count(text: Option<&str>) -> u64 {
    let Some(text) = text else {
        return 0;
    };
    let digits: String = text.chars().filter(char::is_ascii_digit).collect();
    digits.parse().unwrap_or(0)
}

/// Collect dated observations for candidate versions
///
/// Rows without a version label, or whose label is not a candidate, are
/// skipped. Every dated cell of a kept row yields one observation sharing
/// the row's link and download count.
pub fn aggregate<S: AsRef<str>>(rows: &[RowRecord], candidates: &[S]) -> Buckets {
    let candidates: HashSet<&str> = candidates.iter().map(AsRef::as_ref).collect();
    let mut buckets = Buckets::new();

    for row in rows {
        let Some(version) = row.version.as_deref() else {
            continue;
        };
        if !candidates.contains(version) {
            continue;
        }

        let link = row.link.as_deref().unwrap_or(MISSING_LINK);
        let downloads = parse_download_count(row.downloads.as_deref());

        for date in row.cells.iter().filter_map(cell_date) {
            buckets
                .entry(version.to_string())
                .or_default()
                .push(VersionObservation {
                    version: version.to_string(),
                    date,
                    link: link.to_string(),
                    downloads,
                });
        }
    }

    debug!(
        "Aggregated {} dated observations across {} versions",
        buckets.values().map(Vec::len).sum::<usize>(),
        buckets.len()
    );

    buckets
}
