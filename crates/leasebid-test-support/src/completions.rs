//! Recording sink for completion callbacks.

use std::sync::Mutex;

/// Records every value handed to it, in arrival order. Share it behind an
/// `Arc` and call [`RecordingCompletions::record`] from the callback under
/// test.
#[derive(Debug, Default)]
pub struct RecordingCompletions<T> {
    recorded: Mutex<Vec<T>>,
}

impl<T: Clone> RecordingCompletions<T> {
    /// Create an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self {
            recorded: Mutex::new(Vec::new()),
        }
    }

    /// Appends `value`.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn record(&self, value: T) {
        self.recorded.lock().unwrap().push(value);
    }

    /// Number of values recorded so far.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn count(&self) -> usize {
        self.recorded.lock().unwrap().len()
    }

    /// Returns a snapshot of all recorded values.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn all(&self) -> Vec<T> {
        self.recorded.lock().unwrap().clone()
    }
}
