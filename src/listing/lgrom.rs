//! lgrom.com firmware listing implementation

use std::time::Duration;

use reqwest::Url;
use tracing::{debug, warn};

use crate::config::{DEFAULT_BASE_URL, ListingConfig};
use crate::listing::html::ListingParser;
use crate::listing::source::ListingSource;
use crate::listing::types::RowRecord;
use crate::version::error::ListingError;

/// Listing source backed by the lgrom.com model pages
pub struct LgromListing {
    client: reqwest::Client,
    base_url: String,
    parser: ListingParser,
}

impl LgromListing {
    /// Creates a new LgromListing with a custom base URL
    pub fn new(base_url: &str) -> Self {
        Self::from_config(&ListingConfig {
            base_url: base_url.to_string(),
            ..Default::default()
        })
    }

    /// Creates a new LgromListing from listing configuration
    pub fn from_config(config: &ListingConfig) -> Self {
        Self {
            client: reqwest::Client::builder()
                .user_agent(config.user_agent.as_str())
                .timeout(Duration::from_millis(config.timeout_ms))
                .build()
                .expect("Failed to create HTTP client"),
            base_url: config.base_url.clone(),
            parser: ListingParser::new(),
        }
    }

    /// Builds `{base_url}/firmware/{model}`, percent-encoding the model as one path segment
    fn listing_url(&self, model: &str) -> Result<Url, ListingError> {
        // Dot segments are dropped by `push` and would address the parent page
        if matches!(model, "." | "..") {
            return Err(ListingError::NotFound(model.to_string()));
        }

        let mut url = Url::parse(&self.base_url).map_err(|e| {
            ListingError::InvalidResponse(format!("Invalid base URL {}: {}", self.base_url, e))
        })?;

        let cannot_be_base = || {
            ListingError::InvalidResponse(format!("Base URL cannot be a base: {}", self.base_url))
        };
        url.path_segments_mut()
            .map_err(|_| cannot_be_base())?
            .pop_if_empty()
            .push("firmware")
            .push(model);

        Ok(url)
    }
}

impl Default for LgromListing {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

#[async_trait::async_trait]
impl ListingSource for LgromListing {
    async fn fetch_rows(&self, model: &str) -> Result<Vec<RowRecord>, ListingError> {
        let url = self.listing_url(model)?;

        let response = self.client.get(url.clone()).send().await?;

        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(ListingError::NotFound(model.to_string()));
        }

        if !status.is_success() {
            warn!("Listing returned status {}: {}", status, url);
            return Err(ListingError::InvalidResponse(format!(
                "Unexpected status: {}",
                status
            )));
        }

        let body = response.text().await?;
        let rows = self.parser.parse(&body)?;
        debug!("Parsed {} listing rows for {}", rows.len(), model);

        Ok(rows)
    }
}
