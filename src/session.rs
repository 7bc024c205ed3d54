//! Conversation flow around the resolution engine
//!
//! A [`Session`] carries everything one user conversation needs between
//! steps: the model they typed, the fetched listing rows, and the tied
//! candidates awaiting a newest-date check. The owner (CLI, chat transport)
//! keeps one session per user and feeds it each step:
//!
//! ```text
//! submit_model ──▶ ListingFound ──▶ extract_versions ──┬──▶ Best
//!                                                      └──▶ Ambiguous ──▶ extract_newest ──▶ FinalBest
//! ```

use std::fmt;

use serde::Serialize;
use tracing::{info, warn};

use crate::listing::source::ListingSource;
use crate::listing::types::{RowRecord, version_labels};
use crate::version::error::ListingError;
use crate::version::resolver::ResolutionResult;
use crate::version::{best_versions, resolve_candidates};

/// Step the session is waiting for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No listing yet
    AwaitingModel,
    /// Listing fetched, waiting for confirmation to rank versions
    ListingFetched,
    /// Several versions tied, waiting for confirmation to check dates
    AwaitingNewest,
    /// A final answer was given; a new model may be submitted
    Done,
}

/// Outcome of a session step
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Reply {
    /// The submitted model was blank
    EmptyModel,
    /// The listing could not be fetched for this model
    ModelNotFound,
    /// The listing page has no firmware table
    TableNotFound,
    /// The listing has no firmware rows or no version labels
    NoFirmware,
    /// Listing fetched; confirm to rank versions
    ListingFound { rows: usize },
    /// A single best version was found
    Best { result: ResolutionResult },
    /// Several versions tied; confirm to check publication dates
    Ambiguous { candidates: Vec<String> },
    /// Final answer after the newest-date check
    FinalBest { result: ResolutionResult },
    /// No candidate had a usable publication date
    NoResult,
    /// A step was requested before the one it depends on
    OutOfOrder,
}

impl Reply {
    /// Resolution attached to a final answer
    pub fn result(&self) -> Option<&ResolutionResult> {
        match self {
            Reply::Best { result } | Reply::FinalBest { result } => Some(result),
            _ => None,
        }
    }
}

fn write_releases(f: &mut fmt::Formatter<'_>, result: &ResolutionResult) -> fmt::Result {
    for (version, release) in &result.releases {
        writeln!(f, "{}\n{}", version, release.link)?;
    }
    Ok(())
}

impl fmt::Display for Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reply::EmptyModel => writeln!(f, "Please enter a model number"),
            Reply::ModelNotFound => {
                writeln!(f, "The model is not valid or has no firmware")
            }
            Reply::TableNotFound => writeln!(f, "Firmware table not found"),
            Reply::NoFirmware => writeln!(f, "No firmware found"),
            Reply::ListingFound { rows } => writeln!(
                f,
                "Found {} firmware entries\nConfirm to find the best version",
                rows
            ),
            Reply::Best { result } => {
                writeln!(f, "Best version:")?;
                write_releases(f, result)
            }
            Reply::Ambiguous { candidates } => writeln!(
                f,
                "Several similar versions found: {}\nConfirm to check the newest date",
                candidates.join(", ")
            ),
            Reply::FinalBest { result } => {
                writeln!(f, "Final best version:")?;
                write_releases(f, result)
            }
            Reply::NoResult => writeln!(f, "No result found"),
            Reply::OutOfOrder => writeln!(
                f,
                "Nothing is waiting for confirmation\nEnter a model number to start a new search"
            ),
        }
    }
}

/// Per-conversation context
#[derive(Debug, Clone)]
pub struct Session {
    model: String,
    rows: Vec<RowRecord>,
    candidates: Vec<String>,
    state: SessionState,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            model: String::new(),
            rows: Vec::new(),
            candidates: Vec::new(),
            state: SessionState::AwaitingModel,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn rows(&self) -> &[RowRecord] {
        &self.rows
    }

    pub fn candidates(&self) -> &[String] {
        &self.candidates
    }

    /// Fetch the listing for a model, starting the conversation over
    pub async fn submit_model(&mut self, source: &dyn ListingSource, text: &str) -> Reply {
        let model = text.trim();
        if model.is_empty() {
            return Reply::EmptyModel;
        }

        *self = Self::new();
        self.model = model.to_string();

        let rows = match source.fetch_rows(model).await {
            Ok(rows) => rows,
            Err(ListingError::TableNotFound) => {
                warn!("No firmware table in listing for {}", model);
                return Reply::TableNotFound;
            }
            Err(e) => {
                warn!("Failed to fetch listing for {}: {}", model, e);
                return Reply::ModelNotFound;
            }
        };

        if rows.is_empty() {
            return Reply::NoFirmware;
        }

        info!("Fetched {} listing rows for {}", rows.len(), model);
        let count = rows.len();
        self.rows = rows;
        self.state = SessionState::ListingFetched;

        Reply::ListingFound { rows: count }
    }

    /// Rank the listed versions against the model
    pub fn extract_versions(&mut self) -> Reply {
        if self.state == SessionState::AwaitingModel {
            return Reply::OutOfOrder;
        }

        let versions = version_labels(&self.rows);
        let best = match best_versions(&versions, &self.model) {
            Ok(best) => best,
            Err(e) => {
                warn!("No versions to rank for {}: {}", self.model, e);
                self.state = SessionState::Done;
                return Reply::NoFirmware;
            }
        };

        if let [single] = best.as_slice() {
            info!("Single best version for {}: {}", self.model, single);
            self.state = SessionState::Done;
            let result = resolve_candidates(&self.rows, &best);
            if result.is_empty() {
                return Reply::NoResult;
            }
            return Reply::Best { result };
        }

        info!("{} versions tied for {}", best.len(), self.model);
        self.candidates = best.clone();
        self.state = SessionState::AwaitingNewest;

        Reply::Ambiguous { candidates: best }
    }

    /// Break a tie between candidates by newest date, then downloads
    pub fn extract_newest(&mut self) -> Reply {
        if self.state != SessionState::AwaitingNewest {
            return Reply::OutOfOrder;
        }

        self.state = SessionState::Done;
        let result = resolve_candidates(&self.rows, &self.candidates);
        if result.is_empty() {
            info!("No dated candidate for {}", self.model);
            return Reply::NoResult;
        }

        Reply::FinalBest { result }
    }
}

/// Run a whole conversation for `model`, confirming every prompt
pub async fn run_confirmed(source: &dyn ListingSource, model: &str) -> Vec<Reply> {
    let mut session = Session::new();
    let mut replies = vec![session.submit_model(source, model).await];

    if matches!(replies.last(), Some(Reply::ListingFound { .. })) {
        replies.push(session.extract_versions());
    }
    if matches!(replies.last(), Some(Reply::Ambiguous { .. })) {
        replies.push(session.extract_newest());
    }

    replies
}

/// Resolution carried by the last reply of a conversation, if it ended with one
pub fn final_result(replies: &[Reply]) -> Option<&ResolutionResult> {
    replies.last().and_then(Reply::result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listing::source::MockListingSource;
    use crate::listing::types::CellRecord;
    use crate::version::resolver::Release;
    use rstest::rstest;

    fn row(version: &str, day: &str, link: &str, downloads: &str) -> RowRecord {
        RowRecord::new(version)
            .with_cell(CellRecord::text(version))
            .with_cell(CellRecord::new(Some(day), None))
            .with_link(link)
            .with_downloads(downloads)
    }

    fn source_with(rows: Vec<RowRecord>) -> MockListingSource {
        let mut source = MockListingSource::new();
        source
            .expect_fetch_rows()
            .returning(move |_| Ok(rows.clone()));
        source
    }

    #[tokio::test]
    async fn submit_model_rejects_blank_input_without_fetching() {
        let mut source = MockListingSource::new();
        source.expect_fetch_rows().never();
        let mut session = Session::new();

        assert_eq!(session.submit_model(&source, "   ").await, Reply::EmptyModel);
        assert_eq!(session.state(), SessionState::AwaitingModel);
    }

    #[tokio::test]
    async fn submit_model_trims_and_stores_rows() {
        let mut source = MockListingSource::new();
        source
            .expect_fetch_rows()
            .withf(|model| model == "lgh860")
            .times(1)
            .returning(|_| Ok(vec![row("H86020c", "2023-01-01", "c", "1")]));
        let mut session = Session::new();

        let reply = session.submit_model(&source, "  lgh860 \n").await;

        assert_eq!(reply, Reply::ListingFound { rows: 1 });
        assert_eq!(session.model(), "lgh860");
        assert_eq!(session.rows().len(), 1);
        assert_eq!(session.state(), SessionState::ListingFetched);
    }

    #[tokio::test]
    async fn submit_model_maps_listing_errors() {
        let mut source = MockListingSource::new();
        source
            .expect_fetch_rows()
            .withf(|model| model == "missing")
            .returning(|model| Err(ListingError::NotFound(model.to_string())));
        source
            .expect_fetch_rows()
            .withf(|model| model == "broken")
            .returning(|_| Err(ListingError::TableNotFound));
        source
            .expect_fetch_rows()
            .withf(|model| model == "empty")
            .returning(|_| Ok(vec![]));
        let mut session = Session::new();

        assert_eq!(
            session.submit_model(&source, "missing").await,
            Reply::ModelNotFound
        );
        assert_eq!(
            session.submit_model(&source, "broken").await,
            Reply::TableNotFound
        );
        assert_eq!(
            session.submit_model(&source, "empty").await,
            Reply::NoFirmware
        );
        assert_eq!(session.state(), SessionState::AwaitingModel);
    }

    #[tokio::test]
    async fn single_best_version_resolves_immediately() {
        let source = source_with(vec![
            row("H86010d", "2022-01-01", "d", "9"),
            row("H86020c", "2023-01-01", "c-old", "5"),
            row("H86020c", "2023-01-01", "c", "50"),
        ]);
        let mut session = Session::new();
        session.submit_model(&source, "lgh860").await;

        let reply = session.extract_versions();

        assert!(matches!(reply, Reply::Best { .. }));
        let result = reply.result().unwrap();
        assert_eq!(result.versions(), vec!["H86020c"]);
        assert_eq!(
            result.releases["H86020c"],
            Release {
                link: "c".to_string(),
                downloads: 50
            }
        );
        assert_eq!(session.state(), SessionState::Done);
        assert_eq!(session.extract_newest(), Reply::OutOfOrder);
    }

    #[tokio::test]
    async fn tied_versions_wait_for_newest_date_check() {
        let source = source_with(vec![
            row("X1abc", "2023-01-01", "x", "900"),
            row("Y1abc", "2023-02-01", "y", "1"),
        ]);
        let mut session = Session::new();
        session.submit_model(&source, "m1").await;

        assert_eq!(
            session.extract_versions(),
            Reply::Ambiguous {
                candidates: vec!["X1abc".to_string(), "Y1abc".to_string()]
            }
        );
        assert_eq!(session.state(), SessionState::AwaitingNewest);

        let reply = session.extract_newest();

        assert!(matches!(reply, Reply::FinalBest { .. }));
        assert_eq!(reply.result().unwrap().versions(), vec!["Y1abc"]);
        assert_eq!(reply.to_string(), "Final best version:\nY1abc\ny\n");
    }

    #[tokio::test]
    async fn undated_candidates_produce_no_result() {
        let source = source_with(vec![
            RowRecord::new("X1abc").with_cell(CellRecord::text("soon")),
            RowRecord::new("Y1abc"),
        ]);
        let mut session = Session::new();
        session.submit_model(&source, "m1").await;
        session.extract_versions();

        assert_eq!(session.extract_newest(), Reply::NoResult);
    }

    #[tokio::test]
    async fn rows_without_labels_report_no_firmware() {
        let source = source_with(vec![RowRecord::default().with_link("x")]);
        let mut session = Session::new();
        session.submit_model(&source, "lgh860").await;

        assert_eq!(session.extract_versions(), Reply::NoFirmware);
    }

    #[test]
    fn steps_before_a_listing_are_out_of_order() {
        let mut session = Session::new();

        assert_eq!(session.extract_versions(), Reply::OutOfOrder);
        assert_eq!(session.extract_newest(), Reply::OutOfOrder);
    }

    #[rstest]
    #[case(vec![])]
    #[case(vec![row("H86020c", "2023-01-01", "c", "5")])]
    #[tokio::test]
    async fn confirming_after_the_search_ended_asks_for_a_new_model(
        #[case] rows: Vec<RowRecord>,
    ) {
        let source = source_with(rows);
        let mut session = Session::new();
        session.submit_model(&source, "lgh860").await;
        session.extract_versions();

        let reply = session.extract_newest();

        assert_eq!(reply, Reply::OutOfOrder);
        assert_eq!(
            reply.to_string(),
            "Nothing is waiting for confirmation\nEnter a model number to start a new search\n"
        );
    }

    #[tokio::test]
    async fn final_result_comes_from_the_last_reply() {
        let source = source_with(vec![
            row("X1abc", "2023-01-01", "x", "900"),
            row("Y1abc", "2023-02-01", "y", "1"),
        ]);

        let replies = run_confirmed(&source, "m1").await;

        assert_eq!(replies.len(), 3);
        assert_eq!(
            final_result(&replies).map(|r| r.versions()),
            Some(vec!["Y1abc".to_string()])
        );
    }

    #[rstest]
    #[case(vec![])]
    #[case(vec![Reply::ModelNotFound])]
    #[case(vec![Reply::ListingFound { rows: 1 }, Reply::NoResult])]
    fn final_result_is_none_without_an_answer(#[case] replies: Vec<Reply>) {
        assert_eq!(final_result(&replies), None);
    }

    #[test]
    fn reply_serializes_with_kind_tag() {
        let json = serde_json::to_value(Reply::ListingFound { rows: 3 }).unwrap();

        assert_eq!(json, serde_json::json!({ "kind": "listing_found", "rows": 3 }));
    }
}
