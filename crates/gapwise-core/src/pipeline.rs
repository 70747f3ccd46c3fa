//! Top-level pipeline: memos + gaps + calendar events -> daily schedule.
//!
//! One `generate_schedule` call runs the whole chain: period refresh,
//! active filter, optional enrichment, scoring, gap enrichment, and
//! placement. The engine holds configuration and the injected enricher
//! only -- no run state survives a call, so concurrent callers just use
//! separate snapshots.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::enrich::{apply_enrichment, Enrichment, EnrichmentRequest, MetadataEnricher, NoopEnricher};
use crate::memo::{period, Memo};
use crate::scheduler::{place_suggestions, ScheduleResult};
use crate::scoring::{Scorer, Suggestion};
use crate::timeline::{CalendarEvent, Gap, GapEnricher};

/// Per-call options.
#[derive(Debug, Clone, Default)]
pub struct ScheduleOptions {
    /// Skip the enrichment step entirely (scorer defaults apply).
    pub skip_enrichment: bool,
    /// Evaluation instant; defaults to the current time. Fixing it makes
    /// the whole call a pure function of its inputs.
    pub now: Option<DateTime<Utc>>,
}

/// Run counters for observability; never used for control flow.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineSummary {
    pub tasks_processed: usize,
    pub active_tasks: usize,
    pub mandatory_count: usize,
    pub elapsed_ms: u64,
}

/// Everything a `generate_schedule` call returns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleOutcome {
    pub schedule: ScheduleResult,
    pub summary: PipelineSummary,
}

/// The suggestion-to-schedule engine.
///
/// Holds configuration and the enrichment capability; constructed per
/// caller, cheap to keep around, and stateless across calls.
pub struct SuggestionEngine {
    config: EngineConfig,
    enricher: Box<dyn MetadataEnricher>,
}

impl SuggestionEngine {
    /// Engine with default configuration and the heuristic enricher.
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    /// Engine with custom configuration and the heuristic enricher.
    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            config,
            enricher: Box::new(NoopEnricher),
        }
    }

    /// Replace the enrichment backend.
    pub fn with_enricher(mut self, enricher: Box<dyn MetadataEnricher>) -> Self {
        self.enricher = enricher;
        self
    }

    /// Engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Run the full pipeline over snapshots of the caller's memos, the
    /// day's gaps, and the day's calendar events.
    pub fn generate_schedule(
        &self,
        memos: &[Memo],
        gaps: &[Gap],
        events: &[CalendarEvent],
        options: &ScheduleOptions,
    ) -> ScheduleOutcome {
        let started = std::time::Instant::now();
        let now = options.now.unwrap_or_else(Utc::now);

        let mut working: Vec<Memo> = memos.to_vec();
        for memo in &mut working {
            period::refresh_period(memo, now);
        }

        let tasks_processed = working.len();
        working.retain(Memo::is_active);
        let active_tasks = working.len();

        if !options.skip_enrichment && self.config.enrichment.enabled {
            for memo in &mut working {
                if !needs_enrichment(memo) {
                    continue;
                }
                let request = EnrichmentRequest::for_memo(memo);
                match self.enricher.enrich(&request) {
                    Ok(enrichment) => apply_enrichment(memo, &enrichment),
                    Err(err) => {
                        log::warn!("enrichment fallback for memo {}: {err}", memo.id);
                        apply_enrichment(memo, &Enrichment::heuristic(&request));
                    }
                }
            }
        }

        let scorer = Scorer::new(now);
        let mut suggestions: Vec<Suggestion> = working.iter().map(|m| scorer.score(m)).collect();
        suggestions.sort_by(|a, b| a.id.cmp(&b.id));
        let mandatory_count = suggestions
            .iter()
            .filter(|s| s.is_mandatory(self.config.mandatory_need_threshold))
            .count();

        let enriched_gaps = GapEnricher::new()
            .with_min_gap(self.config.min_gap_minutes)
            .enrich(gaps, events, now.date_naive());

        let schedule = place_suggestions(suggestions, &enriched_gaps, &self.config);

        ScheduleOutcome {
            schedule,
            summary: PipelineSummary {
                tasks_processed,
                active_tasks,
                mandatory_count,
                elapsed_ms: started.elapsed().as_millis() as u64,
            },
        }
    }
}

impl Default for SuggestionEngine {
    fn default() -> Self {
        Self::new()
    }
}

fn needs_enrichment(memo: &Memo) -> bool {
    memo.genre.is_none()
        || memo.importance.is_none()
        || memo.session_minutes.is_none()
        || memo.total_minutes_expected.is_none()
}
