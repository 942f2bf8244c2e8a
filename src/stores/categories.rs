use chrono::Utc;
use log::debug;
use rusqlite::{params, Connection, Row};
use uuid::Uuid;

use crate::db::{
    helpers::{parse_datetime, parse_uuid},
    Database,
};
use crate::error::StoreError;
use crate::models::Category;
use crate::stores::Observers;

/// Title of the distinguished category assigned when the user picks none.
pub const DEFAULT_CATEGORY_TITLE: &str = "Habits";

fn row_to_category(row: &Row) -> Result<Category, StoreError> {
    let id: String = row.get("id")?;
    let created_at: String = row.get("created_at")?;
    let updated_at: String = row.get("updated_at")?;

    Ok(Category {
        id: parse_uuid(&id, "id")?,
        title: row.get("title")?,
        created_at: parse_datetime(&created_at, "created_at")?,
        updated_at: parse_datetime(&updated_at, "updated_at")?,
    })
}

/// Finds the default category, creating it when absent.
///
/// Runs inside a single database task, so find and create cannot interleave
/// with another caller and at most one default row ever comes into being.
/// `exclude_id` lets category deletion pick a fallback other than the row
/// being deleted. Returns whether the row was created.
pub(crate) fn default_category_row(
    conn: &Connection,
    exclude_id: Option<&str>,
) -> Result<(Category, bool), StoreError> {
    let mut stmt = conn.prepare(
        "SELECT id, title, created_at, updated_at
         FROM categories
         WHERE title = ?1 AND id <> ?2
         ORDER BY created_at ASC
         LIMIT 1",
    )?;
    let mut rows = stmt.query(params![DEFAULT_CATEGORY_TITLE, exclude_id.unwrap_or("")])?;
    if let Some(row) = rows.next()? {
        return Ok((row_to_category(row)?, false));
    }

    let now = Utc::now();
    let category = Category {
        id: Uuid::new_v4(),
        title: DEFAULT_CATEGORY_TITLE.to_string(),
        created_at: now,
        updated_at: now,
    };
    conn.execute(
        "INSERT INTO categories (id, title, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4)",
        params![
            category.id.to_string(),
            category.title,
            now.to_rfc3339(),
            now.to_rfc3339(),
        ],
    )?;

    Ok((category, true))
}

/// Owns the list of tracker categories.
pub struct CategoryStore {
    db: Database,
    observers: Observers,
}

impl CategoryStore {
    pub fn new(db: Database) -> Self {
        Self {
            db,
            observers: Observers::new(),
        }
    }

    /// Registers a callback fired once after every durable category change.
    pub fn on_change(&self, callback: impl Fn() + Send + Sync + 'static) {
        self.observers.push(Box::new(callback));
    }

    /// All categories, title ascending.
    pub async fn fetch(&self) -> Result<Vec<Category>, StoreError> {
        self.db
            .execute(|conn| {
                let mut stmt = conn.prepare(
                    "SELECT id, title, created_at, updated_at
                     FROM categories
                     ORDER BY title ASC",
                )?;
                let mut rows = stmt.query([])?;
                let mut categories = Vec::new();
                while let Some(row) = rows.next()? {
                    categories.push(row_to_category(row)?);
                }
                Ok(categories)
            })
            .await
    }

    /// The default category, created on first use.
    pub async fn default_category(&self) -> Result<Category, StoreError> {
        let (category, created) = self
            .db
            .execute(|conn| default_category_row(conn, None))
            .await?;

        if created {
            self.observers.notify();
        }
        Ok(category)
    }

    /// Creates a category with the trimmed title. An empty title after
    /// trimming is a silent no-op.
    pub async fn create(&self, title: &str) -> Result<(), StoreError> {
        let title = title.trim().to_string();
        if title.is_empty() {
            debug!("Ignoring category create with empty title");
            return Ok(());
        }

        self.db
            .execute(move |conn| {
                let now = Utc::now().to_rfc3339();
                conn.execute(
                    "INSERT INTO categories (id, title, created_at, updated_at)
                     VALUES (?1, ?2, ?3, ?4)",
                    params![Uuid::new_v4().to_string(), title, now, now],
                )?;
                Ok(())
            })
            .await?;

        self.observers.notify();
        Ok(())
    }

    /// Renames a category in place, with the same trim/no-op rule as
    /// `create`. An unknown id is a no-op.
    pub async fn update(&self, id: Uuid, new_title: &str) -> Result<(), StoreError> {
        let new_title = new_title.trim().to_string();
        if new_title.is_empty() {
            debug!("Ignoring category rename to empty title");
            return Ok(());
        }

        let id_text = id.to_string();
        let changed = self
            .db
            .execute(move |conn| {
                let affected = conn.execute(
                    "UPDATE categories
                     SET title = ?1, updated_at = ?2
                     WHERE id = ?3",
                    params![new_title, Utc::now().to_rfc3339(), id_text],
                )?;
                Ok(affected > 0)
            })
            .await?;

        if changed {
            self.observers.notify();
        }
        Ok(())
    }

    /// Deletes a category. Trackers still referencing it move to the default
    /// category first; deleting a category never deletes trackers.
    pub async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        let id_text = id.to_string();
        let changed = self
            .db
            .execute(move |conn| {
                let tracker_count: i64 = conn.query_row(
                    "SELECT COUNT(*) FROM trackers WHERE category_id = ?1",
                    params![id_text],
                    |row| row.get(0),
                )?;

                if tracker_count > 0 {
                    let (fallback, _) = default_category_row(conn, Some(&id_text))?;
                    conn.execute(
                        "UPDATE trackers SET category_id = ?1 WHERE category_id = ?2",
                        params![fallback.id.to_string(), id_text],
                    )?;
                }

                let affected =
                    conn.execute("DELETE FROM categories WHERE id = ?1", params![id_text])?;
                Ok(affected > 0)
            })
            .await?;

        if changed {
            self.observers.notify();
        }
        Ok(())
    }
}
