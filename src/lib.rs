pub mod db;
pub mod error;
pub mod models;
pub mod schedule;
pub mod sections;
pub mod stores;

pub use db::Database;
pub use error::StoreError;
pub use models::{Category, Completion, CompletionStatus, NewTracker, Tracker, WeekDay};
pub use sections::{compute_sections, Section};
pub use stores::{CategoryStore, CompletionStore, TrackerStore, DEFAULT_CATEGORY_TITLE};
