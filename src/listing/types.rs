//! Row records scraped from a firmware listing

use serde::{Deserialize, Serialize};

/// One table cell that may carry a publication date
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CellRecord {
    /// Structured sort-order value (e.g. the `data-order` attribute)
    pub sort_key: Option<String>,
    /// Visible text, whitespace trimmed
    pub text: Option<String>,
}

impl CellRecord {
    pub fn new(sort_key: Option<&str>, text: Option<&str>) -> Self {
        Self {
            sort_key: sort_key.map(str::to_string),
            text: text.map(str::to_string),
        }
    }

    /// Cell with visible text only
    pub fn text(text: &str) -> Self {
        Self::new(None, Some(text))
    }
}

/// One firmware release row
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RowRecord {
    /// Firmware version label; rows without one are ignored
    pub version: Option<String>,
    /// Every cell of the row, in document order
    pub cells: Vec<CellRecord>,
    /// Download link, if the row has one
    pub link: Option<String>,
    /// Raw text of the download-count cell
    pub downloads: Option<String>,
}

impl RowRecord {
    pub fn new(version: &str) -> Self {
        Self {
            version: Some(version.to_string()),
            ..Default::default()
        }
    }

    pub fn with_cell(mut self, cell: CellRecord) -> Self {
        self.cells.push(cell);
        self
    }

    pub fn with_link(mut self, link: &str) -> Self {
        self.link = Some(link.to_string());
        self
    }

    pub fn with_downloads(mut self, downloads: &str) -> Self {
        self.downloads = Some(downloads.to_string());
        self
    }
}

/// Version labels of all rows that have one, in row order
pub fn version_labels(rows: &[RowRecord]) -> Vec<String> {
    rows.iter().filter_map(|row| row.version.clone()).collect()
}
