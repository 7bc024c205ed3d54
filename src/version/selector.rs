//! Best version selection under the anchor-relative ranking

use std::collections::HashSet;

use tracing::debug;

use crate::version::error::ResolveError;
use crate::version::rank::{RankingKey, rank_key};

/// Returns the anchor character for a model input (its last character)
pub fn anchor_of(user_input: &str) -> Result<char, ResolveError> {
    user_input.chars().last().ok_or(ResolveError::InvalidInput)
}

/// Select every version whose ranking key equals the maximum key
///
/// # Arguments
/// * `versions` - Version labels as listed, duplicates allowed
/// * `user_input` - The model identifier the user typed; its last character is the anchor
///
/// # Returns
/// * `Ok(Vec<String>)` - Tied best labels, de-duplicated, in first-seen order
/// * `Err(ResolveError::InvalidInput)` - `user_input` is empty
/// * `Err(ResolveError::EmptyInput)` - `versions` is empty
pub fn best_versions<S: AsRef<str>>(
    versions: &[S],
    user_input: &str,
) -> Result<Vec<String>, ResolveError> {
    let anchor = anchor_of(user_input)?;

    let mut seen = HashSet::new();
    let keyed: Vec<(&str, RankingKey)> = versions
        .iter()
        .map(AsRef::as_ref)
        .filter(|v| seen.insert(*v))
        .map(|v| (v, rank_key(v, anchor)))
        .collect();

    let max_key = keyed
        .iter()
        .map(|(_, key)| key)
        .max()
        .ok_or(ResolveError::EmptyInput)?;

    let best: Vec<String> = keyed
        .iter()
        .filter(|(_, key)| key == max_key)
        .map(|(v, _)| v.to_string())
        .collect();

    debug!(
        "Ranked {} versions with anchor {:?}, {} tied at max",
        keyed.len(),
        anchor,
        best.len()
    );

    Ok(best)
}
