//! # Gapwise Core Library
//!
//! This library is the suggestion-to-schedule engine of a personal task
//! assistant: it turns a pool of pending memos -- each with its own urgency
//! semantics (hard deadline, neglected backlog item, recurring goal) --
//! into a concrete, non-overlapping placement inside the day's free-time
//! gaps.
//!
//! ## Architecture
//!
//! - **Memo model**: caller-owned tasks with per-kind urgency semantics,
//!   period tracking for recurring goals, and session-completion updates
//! - **Scoring**: pure per-kind need/importance curves evaluated at a
//!   fixed instant
//! - **Timeline**: gap validation and location labeling from neighboring
//!   calendar events
//! - **Enrichment**: injectable best-effort metadata backend with a
//!   deterministic heuristic fallback
//! - **Scheduler**: mandatory/optional partition, 0/1 knapsack selection,
//!   bounded permutation search, first-fit gap assignment
//!
//! The pipeline is deterministic end to end: identical inputs always yield
//! an identical [`ScheduleResult`], which lets callers skip UI updates when
//! two schedules serialize identically.
//!
//! ## Key Components
//!
//! - [`SuggestionEngine`]: one-call pipeline entrypoint
//! - [`Scorer`]: memo scoring at a fixed instant
//! - [`GapEnricher`]: gap validation and location labeling
//! - [`MetadataEnricher`]: enrichment capability trait

pub mod config;
pub mod enrich;
pub mod error;
pub mod memo;
pub mod pipeline;
pub mod sample;
pub mod scheduler;
pub mod scoring;
pub mod timeline;

pub use config::{EngineConfig, EnrichmentConfig};
pub use enrich::{
    apply_enrichment, Enrichment, EnrichmentRequest, HttpEnricher, MetadataEnricher, NoopEnricher,
};
pub use error::{ConfigError, CoreError, EnrichError, Result};
pub use memo::period::refresh_period;
pub use memo::session::{mark_session_complete, SessionOutcome};
pub use memo::{
    CompletionState, Importance, Memo, MemoKind, MemoStatus, RecurrenceGoal, RecurrencePeriod,
};
pub use pipeline::{PipelineSummary, ScheduleOptions, ScheduleOutcome, SuggestionEngine};
pub use scheduler::{format_schedule, place_suggestions, ScheduleResult, ScheduledBlock};
pub use scoring::{score_memo, Scorer, Suggestion, MANDATORY_NEED_THRESHOLD};
pub use timeline::{CalendarEvent, EnrichedGap, Gap, GapEnricher, Location, LocationPreference};
