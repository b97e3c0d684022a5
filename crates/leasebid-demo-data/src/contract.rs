//! EIP-712 domain and pre-computed digests for the bid struct.

use serde::Serialize;

use crate::accounts::MARKETPLACE_ADDRESS;

/// Typed-data domain the bid is "signed" under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ContractDomain {
    /// Domain name.
    pub name: &'static str,
    /// Domain version.
    pub version: &'static str,
    /// Chain the marketplace is deployed on.
    pub chain_id: u64,
    /// Contract verifying the signature.
    pub verifying_contract: &'static str,
}

/// The marketplace's typed-data domain.
pub const MARKETPLACE_DOMAIN: ContractDomain = ContractDomain {
    name: "LeaseMarketplace",
    version: "1",
    chain_id: 84_532,
    verifying_contract: MARKETPLACE_ADDRESS,
};

/// Type string of the bid struct.
pub const BID_TYPE: &str =
    "LeaseBid(address bidder,bytes32 listingId,uint256 monthlyRent,uint256 deposit,uint64 termMonths,uint256 nonce)";

/// Listing the demo bids on.
pub const LISTING_ID: &str = "0x4c1f8a2e0b93d6c57e1a4f08b2d9c63e7a05f1b84d2c96e30a7b5f1d8c4e2a90";

/// Domain separator hash.
pub const DOMAIN_SEPARATOR: &str =
    "0x8b73c3c69bb8fe3d512ecc4cf759cc79239f7b179b0ffacaa9a75d522b39400f";

/// Hash of the encoded bid struct.
pub const BID_STRUCT_HASH: &str =
    "0x2f5e1c7a93b04d68e1f2a7c5903b8d6e4a1c0f79b2e8d35a6c4f01b7e9d2a583";

/// Final digest the lessee signs.
pub const BID_DIGEST: &str = "0xd41c9e7b05a38f26c1e04b7d9a2f65c3e8b10d4a7f29c6e53b8a01d7f4c2e96b";

/// Lessee's signature over [`BID_DIGEST`].
pub const LESSEE_BID_SIGNATURE: &str = "0x6f1a3c8e2b7d49f05c1e8a3b6d2f7c94e0a5b18d3c6f2e79a4b0d5c81e3f7a2b4c9d06e1a8f3b7c52d9e4a0f6b1c83d7e2a5f9c04b6d1e8a37f2c5b9d0e4a6f1c1b";

/// Lessor's counter-signature accepting the bid.
pub const LESSOR_COUNTER_SIGNATURE: &str = "0x2c8b5e1f7a3d90c64b2e8f1a5d7c3b96e0f4a2d8c15b7e39f6a0c4d2b8e17f53a9c6d0b3e7f1a4c8d25b9e6f0a3c7d1b84e2f5a9c0d6b3e7f14a8c2d5b9e0f6a31c";

/// Identifier the marketplace assigns to the executed lease.
pub const LEASE_ID: &str = "0x0e7d3b9a1c5f28e46d0b7a3c9f1e52d8b4a06c7e3f9d1b25a8c4e0f6b2d97a31";
