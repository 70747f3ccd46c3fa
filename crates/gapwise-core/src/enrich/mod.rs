//! Best-effort metadata enrichment with a deterministic fallback.
//!
//! Enrichment fills missing genre/importance/duration fields before
//! scoring. It is an injectable capability: the pipeline depends only on
//! the [`MetadataEnricher`] trait, with [`NoopEnricher`] (the heuristic
//! fallback) as the default implementation and [`HttpEnricher`] as the
//! network-backed one. Any enrichment failure routes back to the
//! heuristic; it is never surfaced as an error to the caller.

pub mod http;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::EnrichError;
use crate::memo::{Importance, Memo, MemoKind};

pub use http::HttpEnricher;

/// What the enrichment endpoint gets to see about a memo.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrichmentRequest {
    pub id: String,
    pub title: String,
    pub kind: MemoKind,
    #[serde(default)]
    pub deadline: Option<DateTime<Utc>>,
}

impl EnrichmentRequest {
    /// Build a request for a memo.
    pub fn for_memo(memo: &Memo) -> Self {
        Self {
            id: memo.id.clone(),
            title: memo.title.clone(),
            kind: memo.kind,
            deadline: memo.deadline,
        }
    }
}

/// Fields an enricher may fill in. `None` leaves the memo untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Enrichment {
    pub genre: Option<String>,
    pub importance: Option<Importance>,
    pub session_minutes: Option<i64>,
    pub total_minutes_expected: Option<i64>,
}

impl Enrichment {
    /// Deterministic heuristic defaults: genre from title keywords,
    /// medium importance, per-kind session length.
    pub fn heuristic(request: &EnrichmentRequest) -> Self {
        let title = request.title.to_lowercase();
        let genre = if ["run", "gym", "exercise", "workout", "yoga"]
            .iter()
            .any(|k| title.contains(k))
        {
            Some("fitness".to_string())
        } else if ["read", "book", "study", "course", "practice"]
            .iter()
            .any(|k| title.contains(k))
        {
            Some("learning".to_string())
        } else if ["clean", "laundry", "groceries", "cook", "errand"]
            .iter()
            .any(|k| title.contains(k))
        {
            Some("household".to_string())
        } else {
            None
        };

        let session_minutes = match request.kind {
            MemoKind::Deadline => 45,
            MemoKind::Backlog | MemoKind::Routine => 30,
        };

        Self {
            genre,
            importance: Some(Importance::Medium),
            session_minutes: Some(session_minutes),
            total_minutes_expected: None,
        }
    }
}

/// Injectable enrichment capability.
pub trait MetadataEnricher: Send + Sync {
    /// Unique identifier (e.g. "heuristic", "http").
    fn name(&self) -> &str;

    /// Fill in missing metadata for one memo.
    fn enrich(&self, request: &EnrichmentRequest) -> Result<Enrichment, EnrichError>;
}

/// Default enricher: always answers with the heuristic fallback.
pub struct NoopEnricher;

impl MetadataEnricher for NoopEnricher {
    fn name(&self) -> &str {
        "heuristic"
    }

    fn enrich(&self, request: &EnrichmentRequest) -> Result<Enrichment, EnrichError> {
        Ok(Enrichment::heuristic(request))
    }
}

/// Merge an enrichment into a memo, filling only the missing fields.
pub fn apply_enrichment(memo: &mut Memo, enrichment: &Enrichment) {
    if memo.genre.is_none() {
        memo.genre = enrichment.genre.clone();
    }
    if memo.importance.is_none() {
        memo.importance = enrichment.importance;
    }
    if memo.session_minutes.is_none() {
        memo.session_minutes = enrichment.session_minutes;
    }
    if memo.total_minutes_expected.is_none() {
        memo.total_minutes_expected = enrichment.total_minutes_expected;
    }
}
