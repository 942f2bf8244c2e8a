use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Evidence that a tracker was completed on one calendar day.
///
/// At most one completion exists per (tracker, day) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Completion {
    pub id: Uuid,
    pub tracker_id: Uuid,
    pub date: NaiveDate,
}

/// Per-tracker completion state for one selected date, as rendered on a
/// tracker card: done today plus the all-time day count.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionStatus {
    pub completed: bool,
    pub total_days: u64,
}
