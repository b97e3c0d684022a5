//! Phase tables and the pure elapsed-time lookup over them.

use std::time::Duration;

use leasebid_core::error::DomainError;
use serde::Serialize;

/// A named stage of a step and its offset from activation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Phase {
    /// Phase name, e.g. `hashing`.
    pub name: String,
    /// Milliseconds after activation at which the phase begins.
    pub delay_ms: u64,
}

impl Phase {
    /// Creates a phase.
    #[must_use]
    pub fn new(name: impl Into<String>, delay_ms: u64) -> Self {
        Self {
            name: name.into(),
            delay_ms,
        }
    }

    /// The phase offset as a [`Duration`].
    #[must_use]
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

/// An ordered phase table with strictly increasing delays.
///
/// The ordering is checked once, here; everything downstream relies on it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PhaseTimeline {
    phases: Vec<Phase>,
}

impl PhaseTimeline {
    /// Validates and wraps `phases`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidSequence` if any delay is not strictly
    /// greater than the one before it.
    pub fn new(phases: Vec<Phase>) -> Result<Self, DomainError> {
        for (position, pair) in phases.windows(2).enumerate() {
            if pair[1].delay_ms <= pair[0].delay_ms {
                return Err(DomainError::InvalidSequence {
                    position: position + 1,
                    previous_ms: pair[0].delay_ms,
                    delay_ms: pair[1].delay_ms,
                });
            }
        }
        Ok(Self { phases })
    }

    /// Builds a timeline from `(name, delay_ms)` pairs.
    ///
    /// # Errors
    ///
    /// Same as [`PhaseTimeline::new`].
    pub fn from_pairs(pairs: &[(&str, u64)]) -> Result<Self, DomainError> {
        Self::new(
            pairs
                .iter()
                .map(|&(name, delay_ms)| Phase::new(name, delay_ms))
                .collect(),
        )
    }

    /// The phases in firing order.
    #[must_use]
    pub fn phases(&self) -> &[Phase] {
        &self.phases
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.phases.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.phases.len()
    }

    /// The terminal phase, if any.
    #[must_use]
    pub fn terminal(&self) -> Option<&Phase> {
        self.phases.last()
    }

    /// Total time from activation to the terminal phase.
    #[must_use]
    pub fn duration(&self) -> Duration {
        self.terminal().map_or(Duration::ZERO, Phase::delay)
    }

    /// The phase in effect `elapsed` after activation, or `None` before the
    /// first phase begins.
    #[must_use]
    pub fn phase_at(&self, elapsed: Duration) -> Option<&Phase> {
        let passed = self.phases.partition_point(|p| p.delay() <= elapsed);
        passed.checked_sub(1).map(|i| &self.phases[i])
    }
}
