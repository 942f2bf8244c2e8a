//! Computes the tracker list the UI renders for one selected date: weekday
//! visibility, substring search, and grouping by category title.

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{Category, Tracker, WeekDay};
use crate::stores::DEFAULT_CATEGORY_TITLE;

/// One rendered group: a category title and the trackers visible under it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    pub title: String,
    pub trackers: Vec<Tracker>,
}

/// Filters and groups `trackers` for `selected_date`.
///
/// A tracker is visible when its schedule contains the selected weekday, or
/// when the schedule is empty (a one-off event, visible on any date). A
/// non-empty `search` additionally requires a case-insensitive substring
/// match on the name. Sections ascend by title; within a section the input
/// order is preserved, and empty sections are dropped.
///
/// Pure recomputation over the stores' fetch results; nothing is cached.
/// Future dates are fine here; refusing completion entry for them is the
/// caller's policy.
pub fn compute_sections(
    trackers: &[Tracker],
    categories: &[Category],
    selected_date: DateTime<Utc>,
    search: &str,
) -> Vec<Section> {
    let needed =
        WeekDay::from_calendar_weekday(selected_date.date_naive().weekday().number_from_sunday());
    let query = search.trim().to_lowercase();

    let titles: HashMap<Uuid, &str> = categories
        .iter()
        .map(|category| (category.id, category.title.as_str()))
        .collect();

    let mut groups: BTreeMap<String, Vec<Tracker>> = BTreeMap::new();
    for tracker in trackers {
        if !tracker.schedule.is_empty() && !tracker.schedule.contains(&needed) {
            continue;
        }
        if !query.is_empty() && !tracker.name.to_lowercase().contains(&query) {
            continue;
        }

        // A dangling category reference cannot come out of the stores, but
        // the grouping still has somewhere to put such a tracker.
        let title = titles
            .get(&tracker.category_id)
            .copied()
            .unwrap_or(DEFAULT_CATEGORY_TITLE);
        groups.entry(title.to_string()).or_default().push(tracker.clone());
    }

    groups
        .into_iter()
        .map(|(title, trackers)| Section { title, trackers })
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn category(title: &str) -> Category {
        let now = Utc.with_ymd_and_hms(2026, 8, 1, 0, 0, 0).unwrap();
        Category {
            id: Uuid::new_v4(),
            title: title.into(),
            created_at: now,
            updated_at: now,
        }
    }

    fn tracker(name: &str, schedule: &[WeekDay], category_id: Uuid) -> Tracker {
        Tracker {
            id: Uuid::new_v4(),
            name: name.into(),
            emoji: "🌱".into(),
            color_hex: "#33CF69".into(),
            schedule: schedule.iter().copied().collect(),
            category_id,
            created_at: Utc.with_ymd_and_hms(2026, 8, 1, 0, 0, 0).unwrap(),
        }
    }

    fn monday() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 8, 3, 12, 0, 0).unwrap()
    }

    fn tuesday() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 8, 4, 12, 0, 0).unwrap()
    }

    #[test]
    fn schedules_gate_visibility_by_weekday() {
        let health = category("Health");
        let trackers = [tracker(
            "Run",
            &[WeekDay::Monday, WeekDay::Wednesday],
            health.id,
        )];

        let on_monday = compute_sections(&trackers, &[health.clone()], monday(), "");
        assert_eq!(on_monday.len(), 1);
        assert_eq!(on_monday[0].title, "Health");
        assert_eq!(on_monday[0].trackers[0].name, "Run");

        let on_tuesday = compute_sections(&trackers, &[health], tuesday(), "");
        assert!(on_tuesday.is_empty());
    }

    #[test]
    fn event_trackers_are_visible_on_any_date() {
        let habits = category("Habits");
        let trackers = [tracker("Read", &[], habits.id)];

        for date in [monday(), tuesday()] {
            let sections = compute_sections(&trackers, &[habits.clone()], date, "");
            assert_eq!(sections.len(), 1);
            assert_eq!(sections[0].trackers[0].name, "Read");
        }
    }

    #[test]
    fn search_matches_case_insensitive_substrings() {
        let habits = category("Habits");
        let trackers = [
            tracker("Run", &[], habits.id),
            tracker("Swim", &[], habits.id),
        ];

        let sections = compute_sections(&trackers, &[habits.clone()], monday(), "ru");
        assert_eq!(sections.len(), 1);
        let names: Vec<&str> = sections[0]
            .trackers
            .iter()
            .map(|t| t.name.as_str())
            .collect();
        assert_eq!(names, ["Run"]);

        let trimmed = compute_sections(&trackers, &[habits], monday(), "  RU ");
        assert_eq!(trimmed[0].trackers.len(), 1);
    }

    #[test]
    fn sections_ascend_by_title_and_keep_input_order_within() {
        let work = category("Work");
        let health = category("Health");
        let categories = [work.clone(), health.clone()];
        let trackers = [
            tracker("Standup", &[], work.id),
            tracker("Run", &[], health.id),
            tracker("Stretch", &[], health.id),
        ];

        let sections = compute_sections(&trackers, &categories, monday(), "");
        let titles: Vec<&str> = sections.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, ["Health", "Work"]);

        let health_names: Vec<&str> = sections[0]
            .trackers
            .iter()
            .map(|t| t.name.as_str())
            .collect();
        assert_eq!(health_names, ["Run", "Stretch"]);
    }

    #[test]
    fn unresolvable_category_falls_back_to_default_title() {
        let trackers = [tracker("Orphan", &[], Uuid::new_v4())];
        let sections = compute_sections(&trackers, &[], monday(), "");
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].title, DEFAULT_CATEGORY_TITLE);
    }

    #[test]
    fn no_trackers_means_no_sections() {
        assert!(compute_sections(&[], &[], monday(), "").is_empty());
    }

    #[tokio::test]
    async fn sections_reflect_store_fetch_results() {
        use crate::db::Database;
        use crate::models::NewTracker;
        use crate::stores::{CategoryStore, TrackerStore};

        let dir = tempfile::tempdir().unwrap();
        let db = Database::new(dir.path().join("test.sqlite3")).unwrap();
        let categories = CategoryStore::new(db.clone());
        let trackers = TrackerStore::new(db);

        categories.create("Health").await.unwrap();
        let health = categories.fetch().await.unwrap().remove(0);
        trackers
            .create(NewTracker {
                id: Uuid::new_v4(),
                name: "Run".into(),
                emoji: "🏃".into(),
                color_hex: "#FD4C49".into(),
                schedule: [WeekDay::Monday, WeekDay::Wednesday].into_iter().collect(),
                category_id: Some(health.id),
            })
            .await
            .unwrap();

        let all_trackers = trackers.fetch().await.unwrap();
        let all_categories = categories.fetch().await.unwrap();

        let on_monday = compute_sections(&all_trackers, &all_categories, monday(), "");
        assert_eq!(on_monday.len(), 1);
        assert_eq!(on_monday[0].title, "Health");
        assert_eq!(on_monday[0].trackers[0].name, "Run");

        assert!(compute_sections(&all_trackers, &all_categories, tuesday(), "").is_empty());
    }
}
