//! Version resolution engine for firmware listings
//!
//! Picks the best firmware release for a device model from already-parsed
//! listing rows. Pure and synchronous: no I/O, no state between calls.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │    Rank     │────▶│  Selector   │────▶│  Aggregate  │────▶│  Resolver   │
//! │ (key/anchor)│     │ (tied best) │     │(dated rows) │     │(newest/pop.)│
//! └─────────────┘     └─────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! # Modules
//!
//! - [`rank`]: Anchor-relative ranking keys over a fixed alphabet
//! - [`selector`]: Selects every version tied at the maximum key
//! - [`aggregate`]: Buckets dated observations of candidate versions
//! - [`resolver`]: Keeps the globally newest, most downloaded release per version
//! - [`error`]: Error types for resolution and listing fetches

pub mod aggregate;
pub mod error;
pub mod rank;
pub mod resolver;
pub mod selector;

pub use aggregate::{Buckets, MISSING_LINK, VersionObservation, aggregate};
pub use error::{ListingError, ResolveError};
pub use rank::{RankingKey, rank_key};
pub use resolver::{Release, ResolutionResult, resolve};
pub use selector::best_versions;

use crate::listing::types::RowRecord;

/// Narrow `candidates` to the newest, most downloaded release per version
pub fn resolve_candidates<S: AsRef<str>>(
    rows: &[RowRecord],
    candidates: &[S],
) -> ResolutionResult {
    resolve(&aggregate(rows, candidates))
}
