//! Competing bids the lessor reviews in the second step.

use serde::Serialize;

use crate::accounts::LESSEE_ADDRESS;
use crate::contract::LESSEE_BID_SIGNATURE;

/// A signed bid waiting for the lessor's review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Bid {
    /// Address that signed the bid.
    pub bidder: &'static str,
    /// Offered monthly rent in USDC base units.
    pub monthly_rent: u64,
    /// Offered term in months.
    pub term_months: u32,
    /// Bid signature.
    pub signature: &'static str,
}

/// Bids on the listing, in the order they arrived.
pub const OPEN_BIDS: [Bid; 3] = [
    Bid {
        bidder: "0xB42e7A1c9D03f58E6a2C7b10d9F4e83A5c6B0d21",
        monthly_rent: 3_100_000_000,
        term_months: 12,
        signature: "0x91c4e2a7f0b35d8c6e1a9f47b2d03c5e8a6f1b94d7c20e3a5b8f61c9d4e07a2b3f8c5d1e6a09b4c7f2e3d8a5b61c0f9e4d7a2b38c5f1e60d9a4b7c2e8f3d51a0c1b",
    },
    Bid {
        bidder: LESSEE_ADDRESS,
        monthly_rent: 3_250_000_000,
        term_months: 12,
        signature: LESSEE_BID_SIGNATURE,
    },
    Bid {
        bidder: "0x0D5f3B8a2E71c94A6d0e8F2b5C3a17D9e4B6f08C",
        monthly_rent: 3_000_000_000,
        term_months: 18,
        signature: "0x4e8a1d6c3f09b27e5a4c8d1f60b3e92a7c5d0f48e1b6a3c97d2f05e8b4a1c6d3f9e07b2a5c8d41f6e3a90c7b2d5e8f1a4c63b9d0e7f2a5c81d4b6e9f03a7c2d5b1c",
    },
];

/// Returns the bid with the highest monthly rent, first arrival winning ties.
#[must_use]
pub fn best_bid() -> &'static Bid {
    let mut best = &OPEN_BIDS[0];
    for bid in &OPEN_BIDS[1..] {
        if bid.monthly_rent > best.monthly_rent {
            best = bid;
        }
    }
    best
}
