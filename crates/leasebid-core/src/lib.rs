//! Lease Bid Core — shared domain abstractions.
//!
//! Defines the clock, error, event and aggregate vocabulary used by the
//! walkthrough crates. Contains no runtime or transport code.

pub mod aggregate;
pub mod clock;
pub mod error;
pub mod event;
