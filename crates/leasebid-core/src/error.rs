//! Domain error types.

use thiserror::Error;
use uuid::Uuid;

/// Top-level domain error type.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    /// A phase table whose delays are not strictly increasing.
    #[error(
        "invalid phase sequence: phase {position} has delay {delay_ms}ms, previous phase has {previous_ms}ms"
    )]
    InvalidSequence {
        /// Zero-based position of the offending phase.
        position: usize,
        /// Delay of the phase before it.
        previous_ms: u64,
        /// Delay of the offending phase.
        delay_ms: u64,
    },

    /// A step index outside the walkthrough.
    #[error("step {step} is out of range (1..={max})")]
    StepOutOfRange {
        /// The requested step.
        step: u32,
        /// The largest accepted value.
        max: u32,
    },

    /// An attempt to move the current step backwards without a reset.
    #[error("cannot move from step {current} back to step {requested}; reset the demo instead")]
    StepRegression {
        /// The current step.
        current: u32,
        /// The requested step.
        requested: u32,
    },

    /// A walkthrough session was not found.
    #[error("walkthrough session not found: {0}")]
    SessionNotFound(Uuid),

    /// A validation error in domain logic.
    #[error("validation error: {0}")]
    Validation(String),
}
