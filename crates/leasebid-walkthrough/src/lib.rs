//! Lease Bid Walkthrough — phase sequencing and demo progress.
//!
//! Scripts the two steps of the bidding flow (lessee submits a signed bid,
//! lessor reviews and counter-signs), drives each step through its timed
//! phases and records what every step reported on completion.

pub mod application;
pub mod domain;
