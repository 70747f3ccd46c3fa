//! Memo types: the caller-owned task model consumed by the pipeline.
//!
//! A memo carries its own urgency semantics through [`MemoKind`]:
//! - `Deadline` -- hard due date, the only kind that can become mandatory
//! - `Backlog` -- neglected item whose urgency grows with idle time
//! - `Routine` -- recurring goal tracked per day/week/month period
//!
//! Memos are long-lived and owned by the caller's store; the engine only
//! ever works on snapshots and returns updated copies.

pub mod period;
pub mod session;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::timeline::LocationPreference;

/// Urgency semantics of a memo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemoKind {
    /// Hard due date.
    Deadline,
    /// Backlog item; urgency grows with neglect.
    Backlog,
    /// Recurring goal (N completions per period).
    Routine,
}

/// User-facing importance label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Importance {
    Low,
    Medium,
    High,
}

impl Importance {
    /// Numeric weight used by the scorer.
    pub fn weight(self) -> f64 {
        match self {
            Self::Low => 0.3,
            Self::Medium => 0.6,
            Self::High => 0.9,
        }
    }
}

impl Default for Importance {
    fn default() -> Self {
        Self::Medium
    }
}

/// Completion state of a memo.
///
/// `Completed` excludes the memo from all future scoring; for a Routine it
/// re-arms when the recurrence period rolls over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompletionState {
    NotStarted,
    InProgress,
    Completed,
}

impl Default for CompletionState {
    fn default() -> Self {
        Self::NotStarted
    }
}

/// Tracking period for a recurrence goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecurrencePeriod {
    Day,
    Week,
    Month,
}

/// Recurrence goal for Routine memos: `count` completions per `period`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecurrenceGoal {
    pub count: u32,
    pub period: RecurrencePeriod,
}

/// Mutable per-memo progress, updated by the session updater and the
/// period tracker.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemoStatus {
    #[serde(default)]
    pub time_spent_minutes: i64,
    #[serde(default)]
    pub completion: CompletionState,
    /// Routine only: completions inside the current period.
    #[serde(default)]
    pub completions_this_period: u32,
    /// Routine only: start of the current tracking period.
    #[serde(default)]
    pub period_start: Option<DateTime<Utc>>,
}

/// A pending task as created by the user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Memo {
    pub id: String,
    pub title: String,
    pub kind: MemoKind,
    pub created_at: DateTime<Utc>,
    /// Deadline memos only.
    #[serde(default)]
    pub deadline: Option<DateTime<Utc>>,
    /// Routine memos only.
    #[serde(default)]
    pub recurrence: Option<RecurrenceGoal>,
    #[serde(default)]
    pub location_preference: LocationPreference,
    #[serde(default)]
    pub genre: Option<String>,
    #[serde(default)]
    pub importance: Option<Importance>,
    /// Preferred single-session length in minutes.
    #[serde(default)]
    pub session_minutes: Option<i64>,
    /// Estimated total effort in minutes (Deadline/Backlog completion).
    #[serde(default)]
    pub total_minutes_expected: Option<i64>,
    #[serde(default)]
    pub last_activity: Option<DateTime<Utc>>,
    #[serde(default)]
    pub status: MemoStatus,
}

impl Memo {
    /// Create a memo with a fresh random id.
    pub fn new(title: impl Into<String>, kind: MemoKind, created_at: DateTime<Utc>) -> Self {
        Self::with_id(uuid::Uuid::new_v4().to_string(), title, kind, created_at)
    }

    /// Create a memo with a caller-chosen id.
    pub fn with_id(
        id: impl Into<String>,
        title: impl Into<String>,
        kind: MemoKind,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            kind,
            created_at,
            deadline: None,
            recurrence: None,
            location_preference: LocationPreference::NoPreference,
            genre: None,
            importance: None,
            session_minutes: None,
            total_minutes_expected: None,
            last_activity: None,
            status: MemoStatus::default(),
        }
    }

    /// Set the deadline.
    pub fn with_deadline(mut self, deadline: DateTime<Utc>) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Set the recurrence goal.
    pub fn with_recurrence(mut self, count: u32, period: RecurrencePeriod) -> Self {
        self.recurrence = Some(RecurrenceGoal {
            count: count.max(1),
            period,
        });
        self
    }

    /// Set the importance label.
    pub fn with_importance(mut self, importance: Importance) -> Self {
        self.importance = Some(importance);
        self
    }

    /// Set the preferred session length.
    pub fn with_session_minutes(mut self, minutes: i64) -> Self {
        self.session_minutes = Some(minutes);
        self
    }

    /// Set the expected total effort.
    pub fn with_total_minutes(mut self, minutes: i64) -> Self {
        self.total_minutes_expected = Some(minutes);
        self
    }

    /// Set the location preference.
    pub fn with_location_preference(mut self, preference: LocationPreference) -> Self {
        self.location_preference = preference;
        self
    }

    /// Whether the memo should still be scored and scheduled.
    pub fn is_active(&self) -> bool {
        self.status.completion != CompletionState::Completed
    }
}
