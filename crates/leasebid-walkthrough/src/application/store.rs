//! Demo progress store.
//!
//! The single source of truth for which step is current and what each
//! completed step reported. Handles are cheap to clone and are shared with
//! every renderer; state changes only through the write operations here.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use leasebid_core::aggregate::AggregateRoot;
use leasebid_core::clock::Clock;
use leasebid_core::error::DomainError;
use leasebid_core::event::DomainEvent;
use tracing::info;
use uuid::Uuid;

use crate::domain::aggregates::DemoProgress;
use crate::domain::events::DemoEvent;
use crate::domain::payload::CompletionPayload;
use crate::domain::steps::CompletedSteps;

struct StoreState {
    progress: DemoProgress,
    journal: Vec<DemoEvent>,
    /// Bumped on every reset.
    generation: u64,
}

impl StoreState {
    fn commit(&mut self) {
        for event in self.progress.take_uncommitted_events() {
            info!(
                session_id = %event.metadata.session_id,
                event_type = event.event_type(),
                sequence_number = event.metadata.sequence_number,
                "demo progress changed"
            );
            self.journal.push(event);
        }
    }
}

struct StoreInner {
    session_id: Uuid,
    clock: Arc<dyn Clock>,
    state: Mutex<StoreState>,
}

/// Shared handle to one session's progress. Ephemeral: nothing outlives the
/// process.
#[derive(Clone)]
pub struct DemoProgressStore {
    inner: Arc<StoreInner>,
}

impl DemoProgressStore {
    /// Creates a store for a walkthrough of `total_steps` steps.
    #[must_use]
    pub fn new(session_id: Uuid, total_steps: u32, clock: Arc<dyn Clock>) -> Self {
        Self {
            inner: Arc::new(StoreInner {
                session_id,
                clock,
                state: Mutex::new(StoreState {
                    progress: DemoProgress::new(session_id, total_steps),
                    journal: Vec::new(),
                    generation: 0,
                }),
            }),
        }
    }

    fn state(&self) -> MutexGuard<'_, StoreState> {
        self.inner
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    #[must_use]
    pub fn session_id(&self) -> Uuid {
        self.inner.session_id
    }

    /// Sets the current step. Returns `false` if it already was `step`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::StepOutOfRange` or `DomainError::StepRegression`
    /// for steps the walkthrough cannot move to.
    pub fn set_current_step(&self, step: u32) -> Result<bool, DomainError> {
        let mut state = self.state();
        let changed =
            state
                .progress
                .set_current_step(step, Uuid::new_v4(), self.inner.clock.as_ref())?;
        state.commit();
        Ok(changed)
    }

    /// Moves to `step + 1` only if `step` is still current. Returns whether
    /// it moved.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::StepOutOfRange` if `step` is already the
    /// all-done sentinel.
    pub fn advance_from(&self, step: u32) -> Result<bool, DomainError> {
        let mut state = self.state();
        if state.progress.current_step() != step {
            return Ok(false);
        }
        let changed = state.progress.set_current_step(
            step + 1,
            Uuid::new_v4(),
            self.inner.clock.as_ref(),
        )?;
        state.commit();
        Ok(changed)
    }

    /// Records a step's payload. Repeated calls overwrite.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::StepOutOfRange` if `step` is not a real step.
    pub fn complete_step(&self, step: u32, payload: CompletionPayload) -> Result<(), DomainError> {
        let mut state = self.state();
        state
            .progress
            .complete_step(step, payload, Uuid::new_v4(), self.inner.clock.as_ref())?;
        state.commit();
        Ok(())
    }

    /// Clears all payloads and returns to the first step.
    pub fn reset(&self) {
        let mut state = self.state();
        state
            .progress
            .reset(Uuid::new_v4(), self.inner.clock.as_ref());
        state.generation += 1;
        state.commit();
    }

    /// Number of resets so far. Work scheduled before a reset compares this
    /// to tell whether it is stale.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.state().generation
    }

    #[must_use]
    pub fn current_step(&self) -> u32 {
        self.state().progress.current_step()
    }

    #[must_use]
    pub fn total_steps(&self) -> u32 {
        self.state().progress.total_steps()
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.state().progress.is_finished()
    }

    #[must_use]
    pub fn is_step_complete(&self, step: u32) -> bool {
        self.state().progress.is_step_complete(step)
    }

    #[must_use]
    pub fn get_payload(&self, step: u32) -> Option<CompletionPayload> {
        self.state().progress.payload(step).cloned()
    }

    /// Copy of every recorded payload.
    #[must_use]
    pub fn completed_steps(&self) -> CompletedSteps {
        self.state().progress.completed_steps().clone()
    }

    /// Every event recorded this session, oldest first.
    #[must_use]
    pub fn history(&self) -> Vec<DemoEvent> {
        self.state().journal.clone()
    }
}

impl fmt::Debug for DemoProgressStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state();
        f.debug_struct("DemoProgressStore")
            .field("session_id", &self.inner.session_id)
            .field("progress", &state.progress)
            .finish_non_exhaustive()
    }
}
