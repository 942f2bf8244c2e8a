pub mod category;
pub mod completion;
pub mod tracker;
pub mod weekday;

pub use category::Category;
pub use completion::{Completion, CompletionStatus};
pub use tracker::{NewTracker, Tracker};
pub use weekday::WeekDay;
