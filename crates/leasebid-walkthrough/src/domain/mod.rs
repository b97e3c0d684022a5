//! Domain model for the walkthrough.

pub mod aggregates;
pub mod events;
pub mod payload;
pub mod phases;
pub mod sequencer;
pub mod steps;
