//! Listing source trait for fetching a model's firmware rows

#[cfg(test)]
use mockall::automock;

use crate::listing::types::RowRecord;
use crate::version::error::ListingError;

/// Trait for fetching the firmware listing of a device model
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait ListingSource: Send + Sync {
    /// Fetches every release row listed for a model
    ///
    /// # Arguments
    /// * `model` - The model identifier as typed by the user (e.g., "lgh860")
    ///
    /// # Returns
    /// * `Ok(Vec<RowRecord>)` - Rows in listing order, possibly empty
    /// * `Err(ListingError)` - If the fetch fails or the page has no firmware table
    async fn fetch_rows(&self, model: &str) -> Result<Vec<RowRecord>, ListingError>;
}
