//! Aggregate root for walkthrough progress.

use leasebid_core::aggregate::AggregateRoot;
use leasebid_core::clock::Clock;
use leasebid_core::error::DomainError;
use leasebid_core::event::EventMetadata;
use uuid::Uuid;

use super::events::{DemoEvent, DemoEventKind, DemoReset, StepActivated, StepCompleted};
use super::payload::CompletionPayload;
use super::steps::CompletedSteps;

/// The step a fresh or reset walkthrough starts on.
pub const INITIAL_STEP: u32 = 1;

/// Which step is current and what every completed step reported.
///
/// `current_step` stays within `1..=total_steps + 1`, the upper bound meaning
/// every step is done. It moves forward or resets, never backwards.
#[derive(Debug)]
pub struct DemoProgress {
    /// Aggregate identifier (the walkthrough session).
    pub id: Uuid,
    /// Current version (event count).
    pub(crate) version: i64,
    total_steps: u32,
    current_step: u32,
    completed_steps: CompletedSteps,
    /// Uncommitted events pending journaling.
    uncommitted_events: Vec<DemoEvent>,
}

impl DemoProgress {
    /// Creates progress for a walkthrough of `total_steps` steps.
    #[must_use]
    pub fn new(id: Uuid, total_steps: u32) -> Self {
        Self {
            id,
            version: 0,
            total_steps,
            current_step: INITIAL_STEP,
            completed_steps: CompletedSteps::new(),
            uncommitted_events: Vec::new(),
        }
    }

    fn next_sequence_number(&self) -> i64 {
        self.version + 1
    }

    fn record(
        &mut self,
        event_type: &str,
        kind: DemoEventKind,
        correlation_id: Uuid,
        clock: &dyn Clock,
    ) {
        let event = DemoEvent {
            metadata: EventMetadata {
                event_id: Uuid::new_v4(),
                event_type: event_type.to_owned(),
                session_id: self.id,
                sequence_number: self.next_sequence_number(),
                correlation_id,
                occurred_at: clock.now(),
            },
            kind,
        };
        self.apply(&event);
        self.uncommitted_events.push(event);
    }

    /// Makes `step` the current step. Returns `false` when it already was.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::StepOutOfRange` for `0` or anything past the
    /// all-done sentinel, and `DomainError::StepRegression` for a step before
    /// the current one.
    pub fn set_current_step(
        &mut self,
        step: u32,
        correlation_id: Uuid,
        clock: &dyn Clock,
    ) -> Result<bool, DomainError> {
        let max = self.total_steps + 1;
        if step == 0 || step > max {
            return Err(DomainError::StepOutOfRange { step, max });
        }
        if step < self.current_step {
            return Err(DomainError::StepRegression {
                current: self.current_step,
                requested: step,
            });
        }
        if step == self.current_step {
            return Ok(false);
        }

        self.record(
            "demo.step_activated",
            DemoEventKind::StepActivated(StepActivated {
                previous_step: self.current_step,
                step,
            }),
            correlation_id,
            clock,
        );
        Ok(true)
    }

    /// Records `payload` for `step`; a later call for the same step wins.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::StepOutOfRange` if `step` is not a real step.
    pub fn complete_step(
        &mut self,
        step: u32,
        payload: CompletionPayload,
        correlation_id: Uuid,
        clock: &dyn Clock,
    ) -> Result<(), DomainError> {
        if step == 0 || step > self.total_steps {
            return Err(DomainError::StepOutOfRange {
                step,
                max: self.total_steps,
            });
        }

        let replaced = self.completed_steps.contains_key(&step);
        self.record(
            "demo.step_completed",
            DemoEventKind::StepCompleted(StepCompleted {
                step,
                payload,
                replaced,
            }),
            correlation_id,
            clock,
        );
        Ok(())
    }

    /// Clears every payload and returns to the first step.
    pub fn reset(&mut self, correlation_id: Uuid, clock: &dyn Clock) {
        self.record(
            "demo.reset",
            DemoEventKind::DemoReset(DemoReset {
                cleared_steps: self.completed_steps.len(),
            }),
            correlation_id,
            clock,
        );
    }

    #[must_use]
    pub fn current_step(&self) -> u32 {
        self.current_step
    }

    #[must_use]
    pub fn total_steps(&self) -> u32 {
        self.total_steps
    }

    /// Whether the all-done sentinel has been reached.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.current_step > self.total_steps
    }

    #[must_use]
    pub fn is_step_complete(&self, step: u32) -> bool {
        self.completed_steps.contains_key(&step)
    }

    #[must_use]
    pub fn payload(&self, step: u32) -> Option<&CompletionPayload> {
        self.completed_steps.get(&step)
    }

    #[must_use]
    pub fn completed_steps(&self) -> &CompletedSteps {
        &self.completed_steps
    }
}

impl AggregateRoot for DemoProgress {
    type Event = DemoEvent;

    fn aggregate_id(&self) -> Uuid {
        self.id
    }

    fn version(&self) -> i64 {
        self.version
    }

    fn apply(&mut self, event: &Self::Event) {
        match &event.kind {
            DemoEventKind::StepActivated(payload) => {
                self.current_step = payload.step;
            }
            DemoEventKind::StepCompleted(payload) => {
                self.completed_steps
                    .insert(payload.step, payload.payload.clone());
            }
            DemoEventKind::DemoReset(_) => {
                self.completed_steps.clear();
                self.current_step = INITIAL_STEP;
            }
        }
        self.version += 1;
    }

    fn uncommitted_events(&self) -> &[Self::Event] {
        &self.uncommitted_events
    }

    fn take_uncommitted_events(&mut self) -> Vec<Self::Event> {
        std::mem::take(&mut self.uncommitted_events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use leasebid_core::event::DomainEvent;
    use leasebid_test_support::FixedClock;

    fn fixed_clock() -> FixedClock {
        FixedClock(Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap())
    }

    fn bid_payload(bidder: &str) -> CompletionPayload {
        CompletionPayload::new().with("bidder", bidder)
    }

    #[test]
    fn test_new_progress_starts_on_first_step() {
        let progress = DemoProgress::new(Uuid::new_v4(), 2);

        assert_eq!(progress.current_step(), INITIAL_STEP);
        assert!(!progress.is_finished());
        assert!(progress.completed_steps().is_empty());
        assert_eq!(progress.version(), 0);
    }

    #[test]
    fn test_set_current_step_records_step_activated_event() {
        // Arrange
        let session_id = Uuid::new_v4();
        let correlation_id = Uuid::new_v4();
        let clock = fixed_clock();
        let mut progress = DemoProgress::new(session_id, 2);

        // Act
        let changed = progress.set_current_step(2, correlation_id, &clock).unwrap();

        // Assert
        assert!(changed);
        assert_eq!(progress.current_step(), 2);
        let events = progress.uncommitted_events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].event_type(), "demo.step_activated");
        let meta = events[0].metadata();
        assert_eq!(meta.session_id, session_id);
        assert_eq!(meta.sequence_number, 1);
        assert_eq!(meta.correlation_id, correlation_id);
        assert_eq!(meta.occurred_at, clock.0);
    }

    #[test]
    fn test_set_current_step_to_same_step_is_a_no_op() {
        let mut progress = DemoProgress::new(Uuid::new_v4(), 2);

        let changed = progress
            .set_current_step(1, Uuid::new_v4(), &fixed_clock())
            .unwrap();

        assert!(!changed);
        assert!(progress.uncommitted_events().is_empty());
    }

    #[test]
    fn test_set_current_step_accepts_all_done_sentinel() {
        let mut progress = DemoProgress::new(Uuid::new_v4(), 2);

        progress
            .set_current_step(3, Uuid::new_v4(), &fixed_clock())
            .unwrap();

        assert!(progress.is_finished());
    }

    #[test]
    fn test_set_current_step_rejects_out_of_range() {
        let mut progress = DemoProgress::new(Uuid::new_v4(), 2);
        let clock = fixed_clock();

        assert_eq!(
            progress.set_current_step(0, Uuid::new_v4(), &clock),
            Err(DomainError::StepOutOfRange { step: 0, max: 3 })
        );
        assert_eq!(
            progress.set_current_step(4, Uuid::new_v4(), &clock),
            Err(DomainError::StepOutOfRange { step: 4, max: 3 })
        );
        assert_eq!(progress.current_step(), 1);
    }

    #[test]
    fn test_set_current_step_rejects_moving_backwards() {
        let mut progress = DemoProgress::new(Uuid::new_v4(), 2);
        let clock = fixed_clock();
        progress.set_current_step(2, Uuid::new_v4(), &clock).unwrap();

        let result = progress.set_current_step(1, Uuid::new_v4(), &clock);

        assert_eq!(
            result,
            Err(DomainError::StepRegression {
                current: 2,
                requested: 1,
            })
        );
        assert_eq!(progress.current_step(), 2);
    }

    #[test]
    fn test_set_current_step_leaves_completed_steps_alone() {
        let mut progress = DemoProgress::new(Uuid::new_v4(), 2);
        let clock = fixed_clock();
        progress
            .complete_step(1, bid_payload("0xa"), Uuid::new_v4(), &clock)
            .unwrap();

        progress.set_current_step(3, Uuid::new_v4(), &clock).unwrap();

        assert_eq!(progress.completed_steps().len(), 1);
        assert_eq!(progress.payload(1), Some(&bid_payload("0xa")));
    }

    #[test]
    fn test_complete_step_twice_keeps_last_payload() {
        // Arrange
        let mut progress = DemoProgress::new(Uuid::new_v4(), 2);
        let clock = fixed_clock();

        // Act
        progress
            .complete_step(1, bid_payload("0xfirst"), Uuid::new_v4(), &clock)
            .unwrap();
        progress
            .complete_step(1, bid_payload("0xsecond"), Uuid::new_v4(), &clock)
            .unwrap();

        // Assert
        assert_eq!(progress.completed_steps().len(), 1);
        assert_eq!(progress.payload(1), Some(&bid_payload("0xsecond")));
        let events = progress.take_uncommitted_events();
        assert_eq!(events.len(), 2);
        match &events[1].kind {
            DemoEventKind::StepCompleted(completed) => assert!(completed.replaced),
            other => panic!("expected StepCompleted, got {other:?}"),
        }
        assert_eq!(events[1].metadata.sequence_number, 2);
    }

    #[test]
    fn test_complete_step_rejects_unknown_steps() {
        let mut progress = DemoProgress::new(Uuid::new_v4(), 2);
        let clock = fixed_clock();

        assert_eq!(
            progress.complete_step(0, CompletionPayload::new(), Uuid::new_v4(), &clock),
            Err(DomainError::StepOutOfRange { step: 0, max: 2 })
        );
        assert_eq!(
            progress.complete_step(3, CompletionPayload::new(), Uuid::new_v4(), &clock),
            Err(DomainError::StepOutOfRange { step: 3, max: 2 })
        );
        assert!(!progress.is_step_complete(3));
    }

    #[test]
    fn test_reset_clears_payloads_and_returns_to_first_step() {
        // Arrange
        let mut progress = DemoProgress::new(Uuid::new_v4(), 2);
        let clock = fixed_clock();
        progress
            .complete_step(1, bid_payload("0xa"), Uuid::new_v4(), &clock)
            .unwrap();
        progress.set_current_step(2, Uuid::new_v4(), &clock).unwrap();

        // Act
        progress.reset(Uuid::new_v4(), &clock);

        // Assert
        assert_eq!(progress.current_step(), INITIAL_STEP);
        assert!(!progress.is_step_complete(1));
        assert_eq!(progress.payload(1), None);
        let events = progress.take_uncommitted_events();
        match &events.last().unwrap().kind {
            DemoEventKind::DemoReset(reset) => assert_eq!(reset.cleared_steps, 1),
            other => panic!("expected DemoReset, got {other:?}"),
        }
        assert!(progress.uncommitted_events().is_empty());
        assert_eq!(progress.version(), 3);
    }
}
