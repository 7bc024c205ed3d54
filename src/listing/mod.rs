//! Listing layer
//! - types.rs: Row records handed to the resolution engine
//! - source.rs: ListingSource trait definition
//! - html.rs: Listing page parser
//! - lgrom.rs: HTTP listing source for lgrom.com
//! - file.rs: Listing source replaying rows from a JSON file

pub mod file;
pub mod html;
pub mod lgrom;
pub mod source;
pub mod types;

pub use file::FileListing;
pub use html::ListingParser;
pub use lgrom::LgromListing;
pub use source::ListingSource;
pub use types::{CellRecord, RowRecord};
