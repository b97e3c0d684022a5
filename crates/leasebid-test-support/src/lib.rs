//! Shared test doubles and helpers for the lease bid walkthrough.

mod clock;
mod completions;
mod runtime;

pub use clock::FixedClock;
pub use completions::RecordingCompletions;
pub use runtime::settle;
