//! Suggestion scoring: per-kind urgency ("need") and importance.
//!
//! Each memo kind has its own urgency curve:
//! - Deadline: need climbs from ~0.1 at creation toward 1.0 at the due
//!   date and keeps rising while overdue; due-today and overdue memos are
//!   clamped to the mandatory threshold. Only this kind becomes mandatory.
//! - Backlog: need grows with neglect time, bounded to [0.25, 0.7].
//! - Routine: need grows as the period advances with the goal unmet,
//!   bounded to [0.3, 0.8].
//!
//! Scoring is a pure function of (memo, now). It never fails: missing or
//! malformed fields fall back to defaults so a badly-filled memo is still
//! scored and schedulable.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::memo::{period, Memo, MemoKind};
use crate::timeline::LocationPreference;

/// Suggestions with need at or above this value must run today.
pub const MANDATORY_NEED_THRESHOLD: f64 = 1.0;

/// Tolerance applied to threshold comparisons.
pub(crate) const NEED_EPSILON: f64 = 1e-6;

/// Ceiling on deadline need while overdue.
const DEADLINE_NEED_CAP: f64 = 2.0;

/// Neglect time at which backlog need saturates.
const BACKLOG_SATURATION_DAYS: f64 = 14.0;

/// Fallback session length when a memo does not specify one (minutes).
const FALLBACK_SESSION_DEADLINE: i64 = 45;
const FALLBACK_SESSION_BACKLOG: i64 = 30;
const FALLBACK_SESSION_ROUTINE: i64 = 30;

pub(crate) fn clamp01(value: f64) -> f64 {
    value.clamp(0.0, 1.0)
}

/// A scored, schedulable unit: one per active memo per pipeline run.
///
/// The id equals the memo id -- the pipeline must stay deterministic, so
/// no generated ids appear anywhere in it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    pub id: String,
    pub memo_id: String,
    pub need: f64,
    pub importance: f64,
    pub duration_minutes: i64,
    pub location_preference: LocationPreference,
}

impl Suggestion {
    /// Knapsack value of this suggestion.
    pub fn score(&self) -> f64 {
        self.need * self.importance
    }

    /// Whether this suggestion must be placed today.
    pub fn is_mandatory(&self, threshold: f64) -> bool {
        self.need >= threshold - NEED_EPSILON
    }
}

/// Computes suggestions from memos at a fixed instant.
pub struct Scorer {
    now: DateTime<Utc>,
}

impl Scorer {
    /// Create a scorer evaluating urgency at `now`.
    pub fn new(now: DateTime<Utc>) -> Self {
        Self { now }
    }

    /// Score a memo into a suggestion.
    pub fn score(&self, memo: &Memo) -> Suggestion {
        let need = match memo.kind {
            MemoKind::Deadline => self.deadline_need(memo),
            MemoKind::Backlog => self.backlog_need(memo),
            MemoKind::Routine => self.routine_need(memo),
        };

        Suggestion {
            id: memo.id.clone(),
            memo_id: memo.id.clone(),
            need,
            importance: memo.importance.unwrap_or_default().weight(),
            duration_minutes: self.session_duration(memo),
            location_preference: memo.location_preference,
        }
    }

    /// Linear ramp from 0.1 at creation to 1.0 at the deadline; keeps
    /// rising while overdue, capped. Due today or overdue clamps to the
    /// mandatory threshold.
    fn deadline_need(&self, memo: &Memo) -> f64 {
        let Some(deadline) = memo.deadline else {
            // No due date supplied: score like a fresh task, never mandatory.
            return 0.1;
        };

        let total = (deadline - memo.created_at).num_minutes().max(1);
        let elapsed = (self.now - memo.created_at).num_minutes().max(0);
        let progress = elapsed as f64 / total as f64;
        let mut need = 0.1 + 0.9 * progress;

        if deadline.date_naive() <= self.now.date_naive() {
            need = need.max(MANDATORY_NEED_THRESHOLD);
        }
        need.min(DEADLINE_NEED_CAP)
    }

    /// Need grows with time since the last touch, saturating after two
    /// weeks of neglect.
    fn backlog_need(&self, memo: &Memo) -> f64 {
        let reference = memo.last_activity.unwrap_or(memo.created_at);
        let neglect_days = (self.now - reference).num_minutes().max(0) as f64 / (24.0 * 60.0);
        0.25 + 0.45 * clamp01(neglect_days / BACKLOG_SATURATION_DAYS)
    }

    /// Need grows as the period advances while the goal is unmet: the
    /// remaining-goal fraction weighted by period progress.
    fn routine_need(&self, memo: &Memo) -> f64 {
        let Some(goal) = memo.recurrence else {
            // Routine without a goal: floor urgency.
            return 0.3;
        };

        let count = goal.count.max(1);
        let done = memo.status.completions_this_period.min(count);
        let remaining_fraction = f64::from(count - done) / f64::from(count);
        let elapsed = period::elapsed_fraction(goal.period, self.now);
        0.3 + 0.5 * clamp01(remaining_fraction * elapsed)
    }

    fn session_duration(&self, memo: &Memo) -> i64 {
        match memo.session_minutes {
            Some(minutes) if minutes > 0 => minutes,
            _ => match memo.kind {
                MemoKind::Deadline => FALLBACK_SESSION_DEADLINE,
                MemoKind::Backlog => FALLBACK_SESSION_BACKLOG,
                MemoKind::Routine => FALLBACK_SESSION_ROUTINE,
            },
        }
    }
}

/// Convenience function to score a single memo.
pub fn score_memo(memo: &Memo, now: DateTime<Utc>) -> Suggestion {
    Scorer::new(now).score(memo)
}
