//! Placement pipeline: partition, knapsack selection, order search,
//! gap assignment.
//!
//! Given scored suggestions and enriched gaps, this module:
//! - Partitions mandatory (need >= threshold) from optional suggestions
//! - Reserves mandatory duration, then selects optional suggestions by
//!   0/1 knapsack against the remaining capacity
//! - Searches orderings of the combined candidate set (bounded by the
//!   permutation cap) and binds the winner to gaps first-fit
//!
//! Everything here is pure and deterministic: identical inputs always
//! produce an identical [`ScheduleResult`].

mod knapsack;
mod order;

use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::scoring::Suggestion;
use crate::timeline::EnrichedGap;

/// A suggestion bound to a concrete slot inside a gap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledBlock {
    pub suggestion_id: String,
    pub memo_id: String,
    pub gap_id: String,
    /// "HH:mm", inside the bound gap.
    pub start_time: String,
    /// "HH:mm", inside the bound gap.
    pub end_time: String,
}

/// Outcome of one placement run.
///
/// `mandatory_dropped` being non-empty is a caller-visible warning, not an
/// error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleResult {
    /// Blocks in chronological order.
    pub scheduled: Vec<ScheduledBlock>,
    /// Optional suggestions that found no slot, sorted by id.
    pub dropped: Vec<Suggestion>,
    /// Mandatory suggestions that found no slot, sorted by id.
    pub mandatory_dropped: Vec<Suggestion>,
    pub total_scheduled_minutes: i64,
    pub total_dropped_minutes: i64,
    /// Gap capacity left over after placement.
    pub unused_gap_minutes: i64,
    /// Orderings examined by the search; observability only.
    pub permutations_evaluated: u64,
}

impl ScheduleResult {
    /// An empty result over the given capacity.
    pub fn empty(unused_gap_minutes: i64) -> Self {
        Self {
            scheduled: Vec::new(),
            dropped: Vec::new(),
            mandatory_dropped: Vec::new(),
            total_scheduled_minutes: 0,
            total_dropped_minutes: 0,
            unused_gap_minutes,
            permutations_evaluated: 0,
        }
    }

    /// Whether anything was placed at all.
    pub fn is_feasible(&self) -> bool {
        !self.scheduled.is_empty()
    }
}

/// Split suggestions into (mandatory, optional) by the need threshold.
pub fn partition(suggestions: Vec<Suggestion>, threshold: f64) -> (Vec<Suggestion>, Vec<Suggestion>) {
    suggestions
        .into_iter()
        .partition(|s| s.is_mandatory(threshold))
}

/// Place suggestions into gaps under the given configuration.
///
/// Gaps are expected pre-validated and pre-labeled (see
/// [`crate::timeline::GapEnricher`]); order does not matter.
pub fn place_suggestions(
    suggestions: Vec<Suggestion>,
    gaps: &[EnrichedGap],
    config: &EngineConfig,
) -> ScheduleResult {
    let mut gaps: Vec<EnrichedGap> = gaps.to_vec();
    gaps.sort_by(|a, b| {
        a.start_minute
            .cmp(&b.start_minute)
            .then_with(|| a.id.cmp(&b.id))
    });

    let total_capacity: i64 = gaps.iter().map(|g| g.duration_minutes()).sum();

    let (mut mandatory, mut optional) = partition(suggestions, config.mandatory_need_threshold);
    sort_by_score(&mut mandatory);
    sort_by_score(&mut optional);

    // Feasibility short-circuit: if the mandatory set alone exceeds total
    // capacity, no ordering can help.
    let mandatory_minutes: i64 = mandatory.iter().map(|s| s.duration_minutes).sum();
    if mandatory_minutes > total_capacity {
        return finish(
            Vec::new(),
            optional,
            mandatory,
            total_capacity,
            0,
        );
    }

    let selected = knapsack::select_optional(
        &optional,
        total_capacity - mandatory_minutes,
        config.knapsack_resolution_minutes,
    );

    let mut dropped: Vec<Suggestion> = optional
        .iter()
        .filter(|s| !selected.iter().any(|c| c.id == s.id))
        .cloned()
        .collect();
    let mut mandatory_dropped: Vec<Suggestion> = Vec::new();

    // Candidate set for the order search: mandatory first, then selected
    // optional, truncated at the permutation cap.
    let mut candidates: Vec<Suggestion> = Vec::with_capacity(mandatory.len() + selected.len());
    candidates.extend(mandatory);
    candidates.extend(selected);
    if candidates.len() > config.permutation_limit.max(1) {
        for overflow in candidates.split_off(config.permutation_limit.max(1)) {
            if overflow.is_mandatory(config.mandatory_need_threshold) {
                mandatory_dropped.push(overflow);
            } else {
                dropped.push(overflow);
            }
        }
    }

    let flags: Vec<bool> = candidates
        .iter()
        .map(|s| s.is_mandatory(config.mandatory_need_threshold))
        .collect();

    let (best_order, permutations) = order::find_best_order(&candidates, &flags, &gaps);
    let (blocks, unplaced) = order::assign_order(&best_order, &candidates, &gaps);

    for suggestion in unplaced {
        if suggestion.is_mandatory(config.mandatory_need_threshold) {
            mandatory_dropped.push(suggestion);
        } else {
            dropped.push(suggestion);
        }
    }

    finish(blocks, dropped, mandatory_dropped, total_capacity, permutations)
}

fn finish(
    mut blocks: Vec<ScheduledBlock>,
    mut dropped: Vec<Suggestion>,
    mut mandatory_dropped: Vec<Suggestion>,
    total_capacity: i64,
    permutations: u64,
) -> ScheduleResult {
    // "HH:mm" is zero-padded, so the lexicographic order is chronological.
    blocks.sort_by(|a, b| {
        a.start_time
            .cmp(&b.start_time)
            .then_with(|| a.gap_id.cmp(&b.gap_id))
            .then_with(|| a.suggestion_id.cmp(&b.suggestion_id))
    });
    dropped.sort_by(|a, b| a.id.cmp(&b.id));
    mandatory_dropped.sort_by(|a, b| a.id.cmp(&b.id));

    let total_scheduled_minutes = blocks.iter().map(block_minutes).sum();
    let total_dropped_minutes = dropped
        .iter()
        .chain(mandatory_dropped.iter())
        .map(|s| s.duration_minutes)
        .sum();

    ScheduleResult {
        scheduled: blocks,
        dropped,
        mandatory_dropped,
        total_scheduled_minutes,
        total_dropped_minutes,
        unused_gap_minutes: total_capacity - total_scheduled_minutes,
        permutations_evaluated: permutations,
    }
}

fn block_minutes(block: &ScheduledBlock) -> i64 {
    use crate::timeline::gap::parse_hhmm;
    match (parse_hhmm(&block.start_time), parse_hhmm(&block.end_time)) {
        (Some(start), Some(end)) => i64::from(end) - i64::from(start),
        _ => 0,
    }
}

fn sort_by_score(suggestions: &mut [Suggestion]) {
    suggestions.sort_by(|a, b| {
        b.score()
            .partial_cmp(&a.score())
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.id.cmp(&b.id))
    });
}

/// Render a placement result as the human-readable schedule report.
pub fn format_schedule(result: &ScheduleResult) -> String {
    if result.scheduled.is_empty() {
        return "No feasible schedule could be generated.".to_string();
    }

    let mut lines = vec!["Final schedule:".to_string(), "----------------".to_string()];

    for block in &result.scheduled {
        lines.push(format!(
            "- {} - {}  {} (gap {})",
            block.start_time, block.end_time, block.suggestion_id, block.gap_id
        ));
    }

    lines.push(String::new());
    lines.push(format!(
        "Scheduled: {} min. Dropped: {} min.",
        result.total_scheduled_minutes, result.total_dropped_minutes
    ));

    if !result.mandatory_dropped.is_empty() {
        let ids: Vec<&str> = result
            .mandatory_dropped
            .iter()
            .map(|s| s.id.as_str())
            .collect();
        lines.push(format!("WARNING mandatory unplaced: {}", ids.join(", ")));
    }
    if !result.dropped.is_empty() {
        let ids: Vec<&str> = result.dropped.iter().map(|s| s.id.as_str()).collect();
        lines.push(format!("Dropped suggestions: {}", ids.join(", ")));
    }

    lines.push(format!("Unused gap time: {} minutes.", result.unused_gap_minutes));
    lines.push(format!(
        "Permutations evaluated: {}",
        result.permutations_evaluated
    ));
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timeline::{Location, LocationPreference};

    fn suggestion(id: &str, need: f64, importance: f64, duration: i64) -> Suggestion {
        Suggestion {
            id: id.to_string(),
            memo_id: id.to_string(),
            need,
            importance,
            duration_minutes: duration,
            location_preference: LocationPreference::NoPreference,
        }
    }

    fn gap(id: &str, start: u32, end: u32) -> EnrichedGap {
        EnrichedGap {
            id: id.to_string(),
            start_minute: start,
            end_minute: end,
            label: None,
        }
    }

    #[test]
    fn test_partition_by_threshold() {
        let suggestions = vec![
            suggestion("m", 1.2, 0.6, 30),
            suggestion("o", 0.7, 0.6, 30),
            suggestion("edge", 1.0, 0.6, 30),
        ];
        let (mandatory, optional) = partition(suggestions, 1.0);
        let mandatory_ids: Vec<&str> = mandatory.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(mandatory_ids, vec!["m", "edge"]);
        assert_eq!(optional.len(), 1);
    }

    #[test]
    fn test_mandatory_beats_optional_for_single_gap() {
        let config = EngineConfig::default();
        let suggestions = vec![
            suggestion("deadline", 1.1, 0.6, 30),
            suggestion("backlog", 0.6, 0.9, 30),
        ];
        let gaps = vec![gap("g1", 540, 570)]; // 30 minutes

        let result = place_suggestions(suggestions, &gaps, &config);
        assert_eq!(result.scheduled.len(), 1);
        assert_eq!(result.scheduled[0].suggestion_id, "deadline");
        assert_eq!(result.dropped.len(), 1);
        assert_eq!(result.dropped[0].id, "backlog");
        assert!(result.mandatory_dropped.is_empty());
    }

    #[test]
    fn test_infeasible_mandatory_short_circuit() {
        let config = EngineConfig::default();
        let suggestions = vec![
            suggestion("big-mandatory", 1.5, 0.9, 200),
            suggestion("opt", 0.5, 0.5, 20),
        ];
        let gaps = vec![gap("g1", 540, 640)]; // 100 minutes

        let result = place_suggestions(suggestions, &gaps, &config);
        assert!(result.scheduled.is_empty());
        assert_eq!(result.mandatory_dropped.len(), 1);
        assert_eq!(result.dropped.len(), 1);
        assert_eq!(result.permutations_evaluated, 0);
        assert_eq!(result.unused_gap_minutes, 100);
    }

    #[test]
    fn test_no_gaps_drops_everything() {
        let config = EngineConfig::default();
        let suggestions = vec![
            suggestion("mand", 1.2, 0.6, 30),
            suggestion("opt", 0.5, 0.6, 30),
        ];
        let result = place_suggestions(suggestions, &[], &config);
        assert!(result.scheduled.is_empty());
        assert_eq!(result.mandatory_dropped.len(), 1);
        assert_eq!(result.dropped.len(), 1);
        assert_eq!(result.total_dropped_minutes, 60);
    }

    #[test]
    fn test_blocks_sorted_chronologically() {
        let config = EngineConfig::default();
        let suggestions = vec![
            suggestion("a", 0.8, 0.9, 40),
            suggestion("b", 0.7, 0.8, 40),
        ];
        let gaps = vec![gap("late", 900, 950), gap("early", 540, 590)];

        let result = place_suggestions(suggestions, &gaps, &config);
        assert_eq!(result.scheduled.len(), 2);
        assert!(result.scheduled[0].start_time < result.scheduled[1].start_time);
    }

    #[test]
    fn test_permutation_cap_drops_lowest_scored() {
        let mut config = EngineConfig::default();
        config.permutation_limit = 2;
        let suggestions = vec![
            suggestion("high", 0.9, 0.9, 30),
            suggestion("mid", 0.6, 0.6, 30),
            suggestion("low", 0.3, 0.3, 30),
        ];
        let gaps = vec![gap("g1", 540, 720)]; // plenty of room

        let result = place_suggestions(suggestions, &gaps, &config);
        assert_eq!(result.scheduled.len(), 2);
        let scheduled_ids: Vec<&str> = result
            .scheduled
            .iter()
            .map(|b| b.suggestion_id.as_str())
            .collect();
        assert!(scheduled_ids.contains(&"high"));
        assert!(scheduled_ids.contains(&"mid"));
        assert_eq!(result.dropped.len(), 1);
        assert_eq!(result.dropped[0].id, "low");
    }

    #[test]
    fn test_location_gated_suggestion_dropped() {
        let config = EngineConfig::default();
        let mut home_only = suggestion("home-task", 0.6, 0.6, 30);
        home_only.location_preference = LocationPreference::Home;
        let gaps = vec![EnrichedGap {
            id: "work".to_string(),
            start_minute: 540,
            end_minute: 600,
            label: Some(Location::Workplace),
        }];

        let result = place_suggestions(vec![home_only], &gaps, &config);
        assert!(result.scheduled.is_empty());
        assert_eq!(result.dropped.len(), 1);
        assert_eq!(result.unused_gap_minutes, 60);
    }

    #[test]
    fn test_format_schedule_report() {
        let config = EngineConfig::default();
        let suggestions = vec![suggestion("write", 0.8, 0.9, 30)];
        let gaps = vec![gap("g1", 540, 600)];

        let result = place_suggestions(suggestions, &gaps, &config);
        let report = format_schedule(&result);
        assert!(report.contains("write"));
        assert!(report.contains("09:00"));

        let empty = format_schedule(&ScheduleResult::empty(0));
        assert!(empty.contains("No feasible schedule"));
    }
}
