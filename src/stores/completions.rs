use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::{params, Row};
use uuid::Uuid;

use crate::db::{
    helpers::{parse_date, parse_uuid, to_u64},
    Database,
};
use crate::error::StoreError;
use crate::models::{Completion, CompletionStatus};
use crate::stores::Observers;

/// Timestamps are keyed by their calendar day; time-of-day never reaches
/// the database.
fn day_key(date: DateTime<Utc>) -> NaiveDate {
    date.date_naive()
}

fn row_to_completion(row: &Row) -> Result<Completion, StoreError> {
    let id: String = row.get("id")?;
    let tracker_id: String = row.get("tracker_id")?;
    let date: String = row.get("date")?;

    Ok(Completion {
        id: parse_uuid(&id, "id")?,
        tracker_id: parse_uuid(&tracker_id, "tracker_id")?,
        date: parse_date(&date, "date")?,
    })
}

/// Owns the per-day completion records.
pub struct CompletionStore {
    db: Database,
    observers: Observers,
}

impl CompletionStore {
    pub fn new(db: Database) -> Self {
        Self {
            db,
            observers: Observers::new(),
        }
    }

    /// Registers a callback fired once after every durable completion
    /// change.
    pub fn on_change(&self, callback: impl Fn() + Send + Sync + 'static) {
        self.observers.push(Box::new(callback));
    }

    /// All completions, date ascending.
    pub async fn fetch(&self) -> Result<Vec<Completion>, StoreError> {
        self.db
            .execute(|conn| {
                let mut stmt = conn.prepare(
                    "SELECT id, tracker_id, date FROM completions ORDER BY date ASC",
                )?;
                let mut rows = stmt.query([])?;
                let mut completions = Vec::new();
                while let Some(row) = rows.next()? {
                    completions.push(row_to_completion(row)?);
                }
                Ok(completions)
            })
            .await
    }

    /// Whether a completion exists for the tracker on that calendar day.
    pub async fn is_completed(
        &self,
        tracker_id: Uuid,
        date: DateTime<Utc>,
    ) -> Result<bool, StoreError> {
        let tracker_text = tracker_id.to_string();
        let day = day_key(date).to_string();
        self.db
            .execute(move |conn| {
                let count: i64 = conn.query_row(
                    "SELECT COUNT(*) FROM completions WHERE tracker_id = ?1 AND date = ?2",
                    params![tracker_text, day],
                    |row| row.get(0),
                )?;
                Ok(count > 0)
            })
            .await
    }

    /// Number of days the tracker was ever completed on.
    pub async fn completed_count(&self, tracker_id: Uuid) -> Result<u64, StoreError> {
        let tracker_text = tracker_id.to_string();
        self.db
            .execute(move |conn| {
                let count: i64 = conn.query_row(
                    "SELECT COUNT(*) FROM completions WHERE tracker_id = ?1",
                    params![tracker_text],
                    |row| row.get(0),
                )?;
                to_u64(count, "completion count")
            })
            .await
    }

    /// Completion state for one tracker card: done on `date` plus the
    /// all-time day count, in a single database task.
    pub async fn status(
        &self,
        tracker_id: Uuid,
        date: DateTime<Utc>,
    ) -> Result<CompletionStatus, StoreError> {
        let tracker_text = tracker_id.to_string();
        let day = day_key(date).to_string();
        self.db
            .execute(move |conn| {
                let on_day: i64 = conn.query_row(
                    "SELECT COUNT(*) FROM completions WHERE tracker_id = ?1 AND date = ?2",
                    params![tracker_text, day],
                    |row| row.get(0),
                )?;
                let total: i64 = conn.query_row(
                    "SELECT COUNT(*) FROM completions WHERE tracker_id = ?1",
                    params![tracker_text],
                    |row| row.get(0),
                )?;
                Ok(CompletionStatus {
                    completed: on_day > 0,
                    total_days: to_u64(total, "completion count")?,
                })
            })
            .await
    }

    /// Marks the tracker complete for that calendar day. A day that already
    /// has a completion is left untouched.
    pub async fn add(&self, tracker_id: Uuid, date: DateTime<Utc>) -> Result<(), StoreError> {
        let tracker_text = tracker_id.to_string();
        let day = day_key(date).to_string();
        let inserted = self
            .db
            .execute(move |conn| {
                let existing: i64 = conn.query_row(
                    "SELECT COUNT(*) FROM completions WHERE tracker_id = ?1 AND date = ?2",
                    params![tracker_text, day],
                    |row| row.get(0),
                )?;
                if existing > 0 {
                    return Ok(false);
                }

                conn.execute(
                    "INSERT INTO completions (id, tracker_id, date) VALUES (?1, ?2, ?3)",
                    params![Uuid::new_v4().to_string(), tracker_text, day],
                )?;
                Ok(true)
            })
            .await?;

        if inserted {
            self.observers.notify();
        }
        Ok(())
    }

    /// Un-marks the tracker for that calendar day. A missing completion is a
    /// no-op.
    pub async fn remove(&self, tracker_id: Uuid, date: DateTime<Utc>) -> Result<(), StoreError> {
        let tracker_text = tracker_id.to_string();
        let day = day_key(date).to_string();
        let removed = self
            .db
            .execute(move |conn| {
                let affected = conn.execute(
                    "DELETE FROM completions WHERE tracker_id = ?1 AND date = ?2",
                    params![tracker_text, day],
                )?;
                Ok(affected > 0)
            })
            .await?;

        if removed {
            self.observers.notify();
        }
        Ok(())
    }
}
