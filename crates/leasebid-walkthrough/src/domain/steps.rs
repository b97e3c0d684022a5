//! The scripted steps of the bidding flow.

use std::collections::BTreeMap;

use leasebid_core::error::DomainError;
use leasebid_demo_data::accounts::{ESCROW_ADDRESS, LESSEE_ADDRESS, LESSOR_ADDRESS};
use leasebid_demo_data::bids::best_bid;
use leasebid_demo_data::contract::{
    BID_DIGEST, LEASE_ID, LESSEE_BID_SIGNATURE, LESSOR_COUNTER_SIGNATURE,
};
use leasebid_demo_data::format::format_usdc;
use leasebid_demo_data::lease::LEASE_TERMS;
use serde::Serialize;

use super::payload::CompletionPayload;
use super::phases::PhaseTimeline;

/// Payloads recorded so far, keyed by step index.
pub type CompletedSteps = BTreeMap<u32, CompletionPayload>;

/// Builds a step's completion payload from what earlier steps reported.
pub type PayloadFn = fn(&CompletedSteps) -> CompletionPayload;

/// The party acting in a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Actor {
    Lessee,
    Lessor,
}

/// One unit of the walkthrough.
#[derive(Debug, Clone)]
pub struct StepDefinition {
    /// One-based position in the walkthrough.
    pub index: u32,
    /// Short caption shown by renderers.
    pub title: &'static str,
    pub actor: Actor,
    pub timeline: PhaseTimeline,
    pub build_payload: PayloadFn,
}

/// Step 1: the lessee hashes, signs and escrows a bid.
///
/// # Errors
///
/// Never in practice; the phase table is fixed and ordered.
pub fn lessee_submits_bid() -> Result<StepDefinition, DomainError> {
    Ok(StepDefinition {
        index: 1,
        title: "Lessee submits a signed bid",
        actor: Actor::Lessee,
        timeline: PhaseTimeline::from_pairs(&[
            ("idle", 0),
            ("hashing", 1800),
            ("signing", 3400),
            ("escrow", 4600),
            ("submitted", 5600),
        ])?,
        build_payload: bid_submitted_payload,
    })
}

/// Step 2: the lessor compares open bids and counter-signs the best one.
///
/// # Errors
///
/// Never in practice; the phase table is fixed and ordered.
pub fn lessor_countersigns() -> Result<StepDefinition, DomainError> {
    Ok(StepDefinition {
        index: 2,
        title: "Lessor reviews bids and counter-signs",
        actor: Actor::Lessor,
        timeline: PhaseTimeline::from_pairs(&[
            ("idle", 0),
            ("loading_bids", 1200),
            ("comparing", 2600),
            ("countersigning", 4000),
            ("finalized", 5200),
        ])?,
        build_payload: lease_finalized_payload,
    })
}

/// The full walkthrough in order.
///
/// # Errors
///
/// Propagates phase table validation errors.
pub fn bid_flow() -> Result<Vec<StepDefinition>, DomainError> {
    Ok(vec![lessee_submits_bid()?, lessor_countersigns()?])
}

fn bid_submitted_payload(_completed: &CompletedSteps) -> CompletionPayload {
    CompletionPayload::new()
        .with("bidder", LESSEE_ADDRESS)
        .with("bidDigest", BID_DIGEST)
        .with("bidSignature", LESSEE_BID_SIGNATURE)
        .with("escrowContract", ESCROW_ADDRESS)
        .with("escrowDeposited", format_usdc(LEASE_TERMS.deposit))
}

/// The lessor accepts whoever step 1 reported, falling back to the highest
/// open bid when the walkthrough was entered at step 2.
fn lease_finalized_payload(completed: &CompletedSteps) -> CompletionPayload {
    let fallback = best_bid();
    let (bidder, signature) = completed
        .get(&1)
        .and_then(|bid| Some((bid.get_str("bidder")?, bid.get_str("bidSignature")?)))
        .unwrap_or((fallback.bidder, fallback.signature));

    CompletionPayload::new()
        .with("lessor", LESSOR_ADDRESS)
        .with("acceptedBidder", bidder)
        .with("acceptedBidSignature", signature)
        .with("counterSignature", LESSOR_COUNTER_SIGNATURE)
        .with("leaseId", LEASE_ID)
        .with("monthlyRent", format_usdc(LEASE_TERMS.monthly_rent))
}
