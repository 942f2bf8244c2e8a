use chrono::Utc;
use log::debug;
use rusqlite::{params, Row};
use uuid::Uuid;

use crate::db::{
    helpers::{parse_datetime, parse_uuid},
    Database,
};
use crate::error::StoreError;
use crate::models::{NewTracker, Tracker};
use crate::schedule;
use crate::stores::categories::default_category_row;
use crate::stores::Observers;

const SELECT_COLUMNS: &str = "id, name, emoji, color_hex, schedule, category_id, created_at";

fn row_to_tracker(row: &Row) -> Result<Tracker, StoreError> {
    let id: String = row.get("id")?;
    let raw_schedule: String = row.get("schedule")?;
    let category_id: String = row.get("category_id")?;
    let created_at: String = row.get("created_at")?;

    Ok(Tracker {
        id: parse_uuid(&id, "id")?,
        name: row.get("name")?,
        emoji: row.get("emoji")?,
        color_hex: row.get("color_hex")?,
        schedule: schedule::from_storage(&raw_schedule),
        category_id: parse_uuid(&category_id, "category_id")?,
        created_at: parse_datetime(&created_at, "created_at")?,
    })
}

/// Owns the list of trackers.
pub struct TrackerStore {
    db: Database,
    observers: Observers,
}

impl TrackerStore {
    pub fn new(db: Database) -> Self {
        Self {
            db,
            observers: Observers::new(),
        }
    }

    /// Registers a callback fired once after every durable tracker change.
    pub fn on_change(&self, callback: impl Fn() + Send + Sync + 'static) {
        self.observers.push(Box::new(callback));
    }

    /// All trackers, name ascending.
    pub async fn fetch(&self) -> Result<Vec<Tracker>, StoreError> {
        self.db
            .execute(|conn| {
                let mut stmt = conn.prepare(&format!(
                    "SELECT {SELECT_COLUMNS} FROM trackers ORDER BY name ASC"
                ))?;
                let mut rows = stmt.query([])?;
                let mut trackers = Vec::new();
                while let Some(row) = rows.next()? {
                    trackers.push(row_to_tracker(row)?);
                }
                Ok(trackers)
            })
            .await
    }

    pub async fn lookup(&self, id: Uuid) -> Result<Option<Tracker>, StoreError> {
        let id_text = id.to_string();
        self.db
            .execute(move |conn| {
                let mut stmt = conn.prepare(&format!(
                    "SELECT {SELECT_COLUMNS} FROM trackers WHERE id = ?1 LIMIT 1"
                ))?;
                let mut rows = stmt.query(params![id_text])?;
                match rows.next()? {
                    Some(row) => Ok(Some(row_to_tracker(row)?)),
                    None => Ok(None),
                }
            })
            .await
    }

    /// Persists a new tracker.
    ///
    /// The name is trimmed; trimmed-empty is a silent no-op. An empty
    /// schedule stays valid and marks a one-off event tracker. Without an
    /// explicit category the default one is assigned, created on demand; a
    /// dangling category id fails the insert.
    pub async fn create(&self, input: NewTracker) -> Result<(), StoreError> {
        let NewTracker {
            id,
            name,
            emoji,
            color_hex,
            schedule: days,
            category_id,
        } = input;

        let name = name.trim().to_string();
        if name.is_empty() {
            debug!("Ignoring tracker create with empty name");
            return Ok(());
        }

        let schedule_text = schedule::to_storage(&days)?;
        let id_text = id.to_string();
        let category_text = category_id.map(|value| value.to_string());

        self.db
            .execute(move |conn| {
                let category_text = match category_text {
                    Some(value) => value,
                    None => default_category_row(conn, None)?.0.id.to_string(),
                };

                conn.execute(
                    "INSERT INTO trackers (id, name, emoji, color_hex, schedule, category_id, created_at)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                    params![
                        id_text,
                        name,
                        emoji,
                        color_hex,
                        schedule_text,
                        category_text,
                        Utc::now().to_rfc3339(),
                    ],
                )?;
                Ok(())
            })
            .await?;

        self.observers.notify();
        Ok(())
    }

    /// Deletes a tracker; its completions go with it. An unknown id is a
    /// no-op.
    pub async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        let id_text = id.to_string();
        let changed = self
            .db
            .execute(move |conn| {
                let affected =
                    conn.execute("DELETE FROM trackers WHERE id = ?1", params![id_text])?;
                Ok(affected > 0)
            })
            .await?;

        if changed {
            self.observers.notify();
        }
        Ok(())
    }
}
