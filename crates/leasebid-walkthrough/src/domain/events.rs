//! Domain events for the walkthrough.

use leasebid_core::event::{DomainEvent, EventMetadata};
use serde::{Deserialize, Serialize};

use super::payload::CompletionPayload;

/// Emitted when the current step changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepActivated {
    /// The step that was current before.
    pub previous_step: u32,
    /// The new current step (`total + 1` once every step is done).
    pub step: u32,
}

/// Emitted when a step reports its completion payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepCompleted {
    /// The completed step.
    pub step: u32,
    /// What the step reported.
    pub payload: CompletionPayload,
    /// Whether an earlier payload for this step was overwritten.
    pub replaced: bool,
}

/// Emitted when the demo restarts from the first step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemoReset {
    /// Number of completed steps discarded.
    pub cleared_steps: usize,
}

/// Event type identifier for [`StepActivated`].
pub const STEP_ACTIVATED_EVENT_TYPE: &str = "demo.step_activated";

/// Event type identifier for [`StepCompleted`].
pub const STEP_COMPLETED_EVENT_TYPE: &str = "demo.step_completed";

/// Event type identifier for [`DemoReset`].
pub const DEMO_RESET_EVENT_TYPE: &str = "demo.reset";

/// Event payload variants for the walkthrough.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DemoEventKind {
    StepActivated(StepActivated),
    StepCompleted(StepCompleted),
    DemoReset(DemoReset),
}

/// Domain event envelope for the walkthrough.
#[derive(Debug, Clone)]
pub struct DemoEvent {
    /// Event metadata.
    pub metadata: EventMetadata,
    /// Event-specific payload.
    pub kind: DemoEventKind,
}

impl DomainEvent for DemoEvent {
    fn event_type(&self) -> &'static str {
        match &self.kind {
            DemoEventKind::StepActivated(_) => STEP_ACTIVATED_EVENT_TYPE,
            DemoEventKind::StepCompleted(_) => STEP_COMPLETED_EVENT_TYPE,
            DemoEventKind::DemoReset(_) => DEMO_RESET_EVENT_TYPE,
        }
    }

    fn to_payload(&self) -> serde_json::Value {
        // Serialization of derived Serialize types to Value is infallible.
        serde_json::to_value(&self.kind).expect("DemoEventKind serialization is infallible")
    }

    fn metadata(&self) -> &EventMetadata {
        &self.metadata
    }
}
