//! Terms of the lease being bid on. Amounts are USDC base units (6 decimals).

use serde::Serialize;

/// Lease terms shown to both parties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LeaseTerms {
    /// Human-readable asset description.
    pub asset: &'static str,
    /// Monthly rent in USDC base units.
    pub monthly_rent: u64,
    /// Security deposit moved into escrow with the bid.
    pub deposit: u64,
    /// Lease length in months.
    pub term_months: u32,
    /// First day of the lease (ISO 8601).
    pub start_date: &'static str,
}

/// The listing's asking terms.
pub const LEASE_TERMS: LeaseTerms = LeaseTerms {
    asset: "Warehouse Unit 14B, 2,400 sq ft",
    monthly_rent: 3_250_000_000,
    deposit: 6_500_000_000,
    term_months: 12,
    start_date: "2026-11-01",
};
