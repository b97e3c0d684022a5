//! Query handlers for the walkthrough.
//!
//! Read-only view DTOs handed to renderers. Each view pairs a step's static
//! definition with its live phase and any recorded payload.

use std::time::Duration;

use leasebid_core::event::DomainEvent;
use serde::Serialize;
use uuid::Uuid;

use crate::application::walkthrough::Walkthrough;
use crate::domain::payload::CompletionPayload;
use crate::domain::phases::Phase;
use crate::domain::steps::Actor;

/// Read-only view of one step.
#[derive(Debug, Clone, Serialize)]
pub struct StepView {
    pub index: u32,
    pub title: &'static str,
    pub actor: Actor,
    pub phases: Vec<Phase>,
    /// Whether the step's sequencer is running.
    pub active: bool,
    /// Phase in effect, `None` while idle.
    pub current_phase: Option<String>,
    /// Milliseconds from activation to the terminal phase.
    pub duration_ms: u64,
    /// Milliseconds since the step was activated.
    pub elapsed_ms: Option<u64>,
    /// Milliseconds left until the terminal phase while active.
    pub remaining_ms: Option<u64>,
    pub complete: bool,
    pub payload: Option<CompletionPayload>,
}

/// Read-only view of a whole walkthrough session.
#[derive(Debug, Clone, Serialize)]
pub struct WalkthroughView {
    pub session_id: Uuid,
    pub current_step: u32,
    pub total_steps: u32,
    pub finished: bool,
    pub suspended: bool,
    pub auto_advance: bool,
    pub steps: Vec<StepView>,
}

/// One journal entry.
#[derive(Debug, Clone, Serialize)]
pub struct EventView {
    pub event_id: Uuid,
    pub event_type: &'static str,
    pub sequence_number: i64,
    pub occurred_at: chrono::DateTime<chrono::Utc>,
    pub payload: serde_json::Value,
}

/// Builds the view of `walkthrough`.
#[must_use]
pub fn get_walkthrough_view(walkthrough: &Walkthrough) -> WalkthroughView {
    let store = walkthrough.store();
    let completed = store.completed_steps();

    let steps = walkthrough.inspect(|steps, sequencers| {
        steps
            .iter()
            .zip(sequencers)
            .map(|(step, sequencer)| {
                let duration = step.timeline.duration();
                let elapsed = sequencer.elapsed();
                StepView {
                    index: step.index,
                    title: step.title,
                    actor: step.actor,
                    phases: step.timeline.phases().to_vec(),
                    active: sequencer.is_active(),
                    current_phase: sequencer.current_phase(),
                    duration_ms: millis(duration),
                    elapsed_ms: elapsed.map(millis),
                    remaining_ms: elapsed.map(|e| millis(duration.saturating_sub(e))),
                    complete: completed.contains_key(&step.index),
                    payload: completed.get(&step.index).cloned(),
                }
            })
            .collect()
    });

    WalkthroughView {
        session_id: walkthrough.session_id(),
        current_step: store.current_step(),
        total_steps: store.total_steps(),
        finished: store.is_finished(),
        suspended: walkthrough.is_suspended(),
        auto_advance: walkthrough.settings().auto_advance,
        steps,
    }
}

fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

/// Returns the session journal, oldest first.
#[must_use]
pub fn get_walkthrough_events(walkthrough: &Walkthrough) -> Vec<EventView> {
    walkthrough
        .store()
        .history()
        .iter()
        .map(|event| EventView {
            event_id: event.metadata.event_id,
            event_type: event.event_type(),
            sequence_number: event.metadata.sequence_number,
            occurred_at: event.metadata.occurred_at,
            payload: event.to_payload(),
        })
        .collect()
}
