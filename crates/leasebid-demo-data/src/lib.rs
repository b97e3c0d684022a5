//! Lease Bid Demo Data — immutable constants consumed by the walkthrough.
//!
//! Nothing here is derived at runtime: every address, hash and signature is
//! a fixed string so the walkthrough renders the same values on every run.

pub mod accounts;
pub mod bids;
pub mod contract;
pub mod format;
pub mod lease;
pub mod snapshot;

pub use snapshot::DemoDataSnapshot;
