//! Listing source replaying row records from a JSON file

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::read_json;
use crate::listing::source::ListingSource;
use crate::listing::types::RowRecord;
use crate::version::error::ListingError;

/// Serves the same captured rows for every model
pub struct FileListing {
    path: PathBuf,
}

impl FileListing {
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }
}

#[async_trait::async_trait]
impl ListingSource for FileListing {
    async fn fetch_rows(&self, model: &str) -> Result<Vec<RowRecord>, ListingError> {
        let rows: Vec<RowRecord> = read_json(&self.path)?;
        debug!(
            "Loaded {} rows for {} from {:?}",
            rows.len(),
            model,
            self.path
        );
        Ok(rows)
    }
}
