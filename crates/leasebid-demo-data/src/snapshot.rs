//! Serializable bundle of every constant, served to renderers in one call.

use serde::Serialize;

use crate::accounts::{ESCROW_ADDRESS, LESSEE_ADDRESS, LESSOR_ADDRESS, MARKETPLACE_ADDRESS};
use crate::bids::{Bid, OPEN_BIDS};
use crate::contract::{
    BID_DIGEST, BID_STRUCT_HASH, BID_TYPE, ContractDomain, DOMAIN_SEPARATOR, LEASE_ID, LISTING_ID,
    LESSEE_BID_SIGNATURE, LESSOR_COUNTER_SIGNATURE, MARKETPLACE_DOMAIN,
};
use crate::lease::{LEASE_TERMS, LeaseTerms};

/// All demo constants in one serializable value.
#[derive(Debug, Clone, Serialize)]
pub struct DemoDataSnapshot {
    pub lessee: &'static str,
    pub lessor: &'static str,
    pub marketplace: &'static str,
    pub escrow: &'static str,
    pub domain: ContractDomain,
    pub bid_type: &'static str,
    pub listing_id: &'static str,
    pub domain_separator: &'static str,
    pub bid_struct_hash: &'static str,
    pub bid_digest: &'static str,
    pub lessee_bid_signature: &'static str,
    pub lessor_counter_signature: &'static str,
    pub lease_id: &'static str,
    pub lease_terms: LeaseTerms,
    pub open_bids: &'static [Bid],
}

impl DemoDataSnapshot {
    /// Collects the constants.
    #[must_use]
    pub fn collect() -> Self {
        Self {
            lessee: LESSEE_ADDRESS,
            lessor: LESSOR_ADDRESS,
            marketplace: MARKETPLACE_ADDRESS,
            escrow: ESCROW_ADDRESS,
            domain: MARKETPLACE_DOMAIN,
            bid_type: BID_TYPE,
            listing_id: LISTING_ID,
            domain_separator: DOMAIN_SEPARATOR,
            bid_struct_hash: BID_STRUCT_HASH,
            bid_digest: BID_DIGEST,
            lessee_bid_signature: LESSEE_BID_SIGNATURE,
            lessor_counter_signature: LESSOR_COUNTER_SIGNATURE,
            lease_id: LEASE_ID,
            lease_terms: LEASE_TERMS,
            open_bids: &OPEN_BIDS,
        }
    }
}
