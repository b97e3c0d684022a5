//! Parties and contracts taking part in the bidding flow.

/// The lessee placing the bid.
pub const LESSEE_ADDRESS: &str = "0x7a3F9c2E8b41D05e6C19aB7d3E2f80c4A15b9D62";

/// The lessor who owns the asset and counter-signs the winning bid.
pub const LESSOR_ADDRESS: &str = "0x3cB81f0A97e4D26c5E0b7A19F3d8c42E6a0B5f17";

/// Marketplace contract receiving signed bids.
pub const MARKETPLACE_ADDRESS: &str = "0x9E04c7B3a28F61d5D0e9C4b72A83f1E6c5D0a8B3";

/// Escrow contract holding the lessee's deposit.
pub const ESCROW_ADDRESS: &str = "0x51dA0c8E3f7B29e6C4a1D05b8F3e72A9c6B1d4E0";
