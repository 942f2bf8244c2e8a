use std::sync::Mutex;

pub mod categories;
pub mod completions;
pub mod trackers;

pub use categories::{CategoryStore, DEFAULT_CATEGORY_TITLE};
pub use completions::CompletionStore;
pub use trackers::TrackerStore;

type ChangeCallback = Box<dyn Fn() + Send + Sync>;

/// Per-store list of change observers.
///
/// Callbacks fire on the caller's task, after the triggering write has been
/// applied by the database worker, so a callback that re-reads the store
/// sees the new state.
pub(crate) struct Observers {
    callbacks: Mutex<Vec<ChangeCallback>>,
}

impl Observers {
    pub(crate) fn new() -> Self {
        Self {
            callbacks: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn push(&self, callback: ChangeCallback) {
        let mut guard = match self.callbacks.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        guard.push(callback);
    }

    pub(crate) fn notify(&self) {
        let guard = match self.callbacks.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        for callback in guard.iter() {
            callback();
        }
    }
}
