//! Session completion updates.
//!
//! Pure state transition: no storage or network access. The caller owns the
//! memo store and persists the returned copy.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{CompletionState, Memo, MemoKind};

/// Result of applying a work session to a memo.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionOutcome {
    pub memo: Memo,
    /// The memo transitioned into `Completed` during this update.
    pub is_now_complete: bool,
    /// Routine only: the period's goal count is reached.
    pub goal_reached: bool,
}

/// Apply `minutes_spent` of work to a memo.
///
/// Adds the minutes, stamps `last_activity`, counts a Routine completion,
/// and derives the completion state: Deadline/Backlog complete once
/// `total_minutes_expected` is met, a Routine once the period goal count is
/// reached. A zero-minute session is a strict no-op on the memo.
pub fn mark_session_complete(mut memo: Memo, minutes_spent: i64, now: DateTime<Utc>) -> SessionOutcome {
    let goal_met = |memo: &Memo| {
        memo.recurrence
            .map_or(false, |goal| memo.status.completions_this_period >= goal.count)
    };

    if minutes_spent <= 0 {
        let goal_reached = memo.kind == MemoKind::Routine && goal_met(&memo);
        return SessionOutcome {
            memo,
            is_now_complete: false,
            goal_reached,
        };
    }

    let was_complete = memo.status.completion == CompletionState::Completed;
    memo.status.time_spent_minutes += minutes_spent;
    memo.last_activity = Some(now);

    let mut goal_reached = false;
    match memo.kind {
        MemoKind::Routine => {
            memo.status.completions_this_period =
                memo.status.completions_this_period.saturating_add(1);
            goal_reached = goal_met(&memo);
            memo.status.completion = if goal_reached {
                CompletionState::Completed
            } else {
                CompletionState::InProgress
            };
        }
        MemoKind::Deadline | MemoKind::Backlog => {
            let done = memo
                .total_minutes_expected
                .map_or(false, |total| memo.status.time_spent_minutes >= total);
            memo.status.completion = if done {
                CompletionState::Completed
            } else {
                CompletionState::InProgress
            };
        }
    }

    let is_now_complete = !was_complete && memo.status.completion == CompletionState::Completed;
    SessionOutcome {
        memo,
        is_now_complete,
        goal_reached,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memo::RecurrencePeriod;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 11, 14, 0, 0).unwrap()
    }

    #[test]
    fn test_zero_minutes_is_noop() {
        let memo = Memo::with_id("m1", "Report", MemoKind::Deadline, now()).with_total_minutes(60);
        let outcome = mark_session_complete(memo, 0, now());
        assert_eq!(outcome.memo.status.time_spent_minutes, 0);
        assert_eq!(outcome.memo.status.completion, CompletionState::NotStarted);
        assert!(outcome.memo.last_activity.is_none());
        assert!(!outcome.is_now_complete);
    }

    #[test]
    fn test_partial_session_in_progress() {
        let memo = Memo::with_id("m1", "Report", MemoKind::Deadline, now()).with_total_minutes(90);
        let outcome = mark_session_complete(memo, 30, now());
        assert_eq!(outcome.memo.status.time_spent_minutes, 30);
        assert_eq!(outcome.memo.status.completion, CompletionState::InProgress);
        assert_eq!(outcome.memo.last_activity, Some(now()));
        assert!(!outcome.is_now_complete);
    }

    #[test]
    fn test_total_met_completes() {
        let memo = Memo::with_id("m1", "Report", MemoKind::Backlog, now()).with_total_minutes(60);
        let first = mark_session_complete(memo, 40, now());
        let second = mark_session_complete(first.memo, 25, now());
        assert_eq!(second.memo.status.completion, CompletionState::Completed);
        assert!(second.is_now_complete);
    }

    #[test]
    fn test_routine_goal_counting() {
        let memo = Memo::with_id("r1", "Run", MemoKind::Routine, now())
            .with_recurrence(2, RecurrencePeriod::Week);

        let first = mark_session_complete(memo, 30, now());
        assert_eq!(first.memo.status.completions_this_period, 1);
        assert!(!first.goal_reached);
        assert_eq!(first.memo.status.completion, CompletionState::InProgress);

        let second = mark_session_complete(first.memo, 30, now());
        assert_eq!(second.memo.status.completions_this_period, 2);
        assert!(second.goal_reached);
        assert!(second.is_now_complete);
        assert_eq!(second.memo.status.completion, CompletionState::Completed);
    }

    #[test]
    fn test_no_expected_total_never_autocompletes() {
        let memo = Memo::with_id("b1", "Inbox zero", MemoKind::Backlog, now());
        let outcome = mark_session_complete(memo, 500, now());
        assert_eq!(outcome.memo.status.completion, CompletionState::InProgress);
        assert!(!outcome.is_now_complete);
    }
}
