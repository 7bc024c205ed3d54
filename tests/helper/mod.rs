//! Listing test utilities
#![allow(dead_code)]

use std::collections::HashMap;

use async_trait::async_trait;

use firmware_resolver::listing::source::ListingSource;
use firmware_resolver::listing::types::{CellRecord, RowRecord};
use firmware_resolver::version::error::ListingError;

/// Mock listing for testing
pub struct MockListing {
    rows: HashMap<String, Vec<RowRecord>>,
}

impl MockListing {
    pub fn new() -> Self {
        Self {
            rows: HashMap::new(),
        }
    }

    pub fn with_rows(mut self, model: &str, rows: Vec<RowRecord>) -> Self {
        self.rows.insert(model.to_string(), rows);
        self
    }
}

#[async_trait]
impl ListingSource for MockListing {
    async fn fetch_rows(&self, model: &str) -> Result<Vec<RowRecord>, ListingError> {
        match self.rows.get(model) {
            Some(rows) => Ok(rows.clone()),
            None => Err(ListingError::NotFound(model.to_string())),
        }
    }
}

/// Listing row with a version cell, a dated cell, a link and a count
pub fn dated_row(version: &str, date: &str, link: &str, downloads: &str) -> RowRecord {
    RowRecord::new(version)
        .with_cell(CellRecord::text(version))
        .with_cell(CellRecord::new(Some(date), Some(date)))
        .with_link(link)
        .with_downloads(downloads)
}
