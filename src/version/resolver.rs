//! Newest-date / highest-download resolution over aggregated observations
//!
//! The latest date is global: it is taken across every observation of every
//! candidate, so a version whose newest observation is older than another
//! version's is dropped entirely. Versions published on that latest date
//! are all kept, each with its most downloaded link.

use chrono::NaiveDate;
use indexmap::IndexMap;
use indexmap::map::Entry;
use serde::Serialize;
use tracing::debug;

use crate::version::aggregate::{Buckets, VersionObservation};

/// Download link and count chosen for one version
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Release {
    pub link: String,
    pub downloads: u64,
}

/// Versions published on the latest date, with their chosen release
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResolutionResult {
    /// Latest date seen across all observations
    pub date: Option<NaiveDate>,
    /// Surviving versions, in first-seen order
    pub releases: IndexMap<String, Release>,
}

impl ResolutionResult {
    /// Surviving version labels, in mapping order
    pub fn versions(&self) -> Vec<String> {
        self.releases.keys().cloned().collect()
    }

    /// True when no observation carried a date
    pub fn is_empty(&self) -> bool {
        self.releases.is_empty()
    }

    /// Rebuilds one observation per surviving version
    pub fn to_buckets(&self) -> Buckets {
        let Some(date) = self.date else {
            return Buckets::new();
        };
        self.releases
            .iter()
            .map(|(version, release)| {
                let observation = VersionObservation {
                    version: version.clone(),
                    date,
                    link: release.link.clone(),
                    downloads: release.downloads,
                };
                (version.clone(), vec![observation])
            })
            .collect()
    }
}

/// Pick the newest, then most downloaded, observation per version
pub fn resolve(buckets: &Buckets) -> ResolutionResult {
    let mut result = ResolutionResult::default();

    for observation in buckets.values().flatten() {
        let release = Release {
            link: observation.link.clone(),
            downloads: observation.downloads,
        };

        match result.date {
            Some(max_date) if observation.date < max_date => {}
            Some(max_date) if observation.date == max_date => {
                match result.releases.entry(observation.version.clone()) {
                    Entry::Occupied(mut entry) => {
                        if release.downloads > entry.get().downloads {
                            entry.insert(release);
                        }
                    }
                    Entry::Vacant(entry) => {
                        entry.insert(release);
                    }
                }
            }
            _ => {
                result.date = Some(observation.date);
                result.releases.clear();
                result
                    .releases
                    .insert(observation.version.clone(), release);
            }
        }
    }

    debug!(
        "Resolved {} versions on {:?}",
        result.releases.len(),
        result.date
    );

    result
}
