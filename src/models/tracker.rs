use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::WeekDay;

/// A habit or one-off event the user wants to track.
///
/// An empty schedule means the tracker is a one-off event and is visible on
/// every date; a non-empty schedule restricts visibility to those weekdays.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tracker {
    pub id: Uuid,
    pub name: String,
    pub emoji: String,
    pub color_hex: String,
    pub schedule: BTreeSet<WeekDay>,
    pub category_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Input data for creating a tracker.
///
/// `category_id: None` assigns the default category.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTracker {
    pub id: Uuid,
    pub name: String,
    pub emoji: String,
    pub color_hex: String,
    pub schedule: BTreeSet<WeekDay>,
    pub category_id: Option<Uuid>,
}
