//! Firmware listing page parser
//!
//! Extracts release rows from the listing table of a model page:
//!
//! ```text
//! <tbody class="text-gray-600 fw-bold">
//!   <tr>
//!     <td><a class="text-light">H86020c</a></td>
//!     <td data-order="2023-02-01 10:00:00">01 Feb 2023</td>
//!     <td class="downloads">1,024</td>
//!     <td><a class="btn" href="https://...">Download</a></td>
//!   </tr>
//! </tbody>
//! ```

use scraper::{ElementRef, Html, Selector};

use crate::listing::types::{CellRecord, RowRecord};
use crate::version::error::ListingError;

/// Parser for firmware listing pages
pub struct ListingParser {
    /// Body of the firmware table
    table_body: Selector,
    row: Selector,
    cell: Selector,
    /// Version label anchor inside a row
    version: Selector,
    /// Download button inside a row
    link: Selector,
    /// Download-count cell inside a row
    downloads: Selector,
}

impl ListingParser {
    pub fn new() -> Self {
        Self {
            table_body: Selector::parse("tbody.text-gray-600.fw-bold").unwrap(),
            row: Selector::parse("tr").unwrap(),
            cell: Selector::parse("td").unwrap(),
            version: Selector::parse("a.text-light").unwrap(),
            link: Selector::parse("a.btn[href]").unwrap(),
            downloads: Selector::parse("td.downloads").unwrap(),
        }
    }

    /// Parse a listing page into row records
    ///
    /// Returns `ListingError::TableNotFound` when the page has no firmware
    /// table. A table without rows yields an empty list.
    pub fn parse(&self, html: &str) -> Result<Vec<RowRecord>, ListingError> {
        let document = Html::parse_document(html);
        let body = document
            .select(&self.table_body)
            .next()
            .ok_or(ListingError::TableNotFound)?;

        Ok(body.select(&self.row).map(|row| self.parse_row(row)).collect())
    }

    fn parse_row(&self, row: ElementRef<'_>) -> RowRecord {
        let version = row.select(&self.version).next().map(stripped_text);
        let link = row
            .select(&self.link)
            .next()
            .and_then(|a| a.value().attr("href"))
            .map(str::to_string);
        let downloads = row.select(&self.downloads).next().map(stripped_text);
        let cells = row
            .select(&self.cell)
            .map(|td| CellRecord {
                sort_key: td.value().attr("data-order").map(str::to_string),
                text: Some(stripped_text(td)),
            })
            .collect();

        RowRecord {
            version,
            cells,
            link,
            downloads,
        }
    }
}

impl Default for ListingParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Text of an element with each text node trimmed
fn stripped_text(element: ElementRef<'_>) -> String {
    element.text().map(str::trim).collect()
}
