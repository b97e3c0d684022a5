//! Walkthrough coordinator.
//!
//! Owns one progress store and one sequencer per step, and keeps exactly the
//! current step's sequencer running. Lock order is stage, then a sequencer's
//! cycle, then the store; completion handlers never take the stage lock.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use leasebid_core::clock::Clock;
use leasebid_core::error::DomainError;
use tokio::sync::watch;
use tracing::{info, warn};
use uuid::Uuid;

use crate::application::store::DemoProgressStore;
use crate::domain::sequencer::{CompletionHandler, PayloadBuilder, PhaseSequencer};
use crate::domain::steps::StepDefinition;

/// Behavior switches for a walkthrough session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WalkthroughSettings {
    /// Move to the next step as soon as the current one completes.
    pub auto_advance: bool,
}

#[derive(Debug)]
struct Stage {
    sequencers: Vec<PhaseSequencer>,
    suspended: bool,
    shut_down: bool,
}

impl Stage {
    fn deactivate_all(&mut self) {
        for sequencer in &mut self.sequencers {
            sequencer.deactivate();
        }
    }

    /// Runs the sequencer for `current` and stops every other one.
    fn show(&mut self, steps: &[StepDefinition], current: u32) {
        let running = !self.suspended && !self.shut_down;
        for (step, sequencer) in steps.iter().zip(&mut self.sequencers) {
            if !(running && step.index == current) {
                sequencer.deactivate();
            }
        }
        if !running {
            return;
        }
        if let Some(position) = steps.iter().position(|step| step.index == current) {
            self.sequencers[position].activate();
        }
    }
}

struct Inner {
    store: DemoProgressStore,
    steps: Vec<StepDefinition>,
    stage: Mutex<Stage>,
    settings: WalkthroughSettings,
}

impl Inner {
    fn stage(&self) -> MutexGuard<'_, Stage> {
        self.stage.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn sync(&self) {
        let mut stage = self.stage();
        let current = self.store.current_step();
        stage.show(&self.steps, current);
    }
}

/// A running walkthrough session. Clones share the same session; timers stop
/// once the last clone is dropped or [`Walkthrough::shutdown`] is called.
#[derive(Clone)]
pub struct Walkthrough {
    inner: Arc<Inner>,
}

impl Walkthrough {
    /// Builds the session and starts the first step.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` unless step indexes run `1..=N` in
    /// order.
    ///
    /// # Panics
    ///
    /// Panics if called outside a Tokio runtime.
    pub fn start(
        session_id: Uuid,
        steps: Vec<StepDefinition>,
        clock: Arc<dyn Clock>,
        settings: WalkthroughSettings,
    ) -> Result<Self, DomainError> {
        let total_steps = u32::try_from(steps.len())
            .map_err(|_| DomainError::Validation("too many steps".to_owned()))?;
        let in_order = steps
            .iter()
            .zip(1..=total_steps)
            .all(|(step, expected)| step.index == expected);
        if !in_order {
            return Err(DomainError::Validation(
                "step indexes must run from 1 in order".to_owned(),
            ));
        }

        let store = DemoProgressStore::new(session_id, total_steps, clock);
        let inner = Arc::new_cyclic(|weak: &Weak<Inner>| {
            let sequencers = steps
                .iter()
                .map(|step| build_sequencer(session_id, step, &store, weak, settings))
                .collect();
            Inner {
                store,
                steps,
                stage: Mutex::new(Stage {
                    sequencers,
                    suspended: false,
                    shut_down: false,
                }),
                settings,
            }
        });

        info!(%session_id, total_steps, auto_advance = settings.auto_advance, "walkthrough started");
        inner.sync();
        Ok(Self { inner })
    }

    #[must_use]
    pub fn session_id(&self) -> Uuid {
        self.inner.store.session_id()
    }

    /// Read handle to the session's progress.
    #[must_use]
    pub fn store(&self) -> &DemoProgressStore {
        &self.inner.store
    }

    #[must_use]
    pub fn steps(&self) -> &[StepDefinition] {
        &self.inner.steps
    }

    #[must_use]
    pub fn settings(&self) -> WalkthroughSettings {
        self.inner.settings
    }

    /// Makes `step` current and starts its sequence. Returns `false` when it
    /// already was current.
    ///
    /// # Errors
    ///
    /// Propagates the store's range and regression errors; nothing changes
    /// on error.
    pub fn navigate(&self, step: u32) -> Result<bool, DomainError> {
        let mut stage = self.inner.stage();
        let changed = self.inner.store.set_current_step(step)?;
        stage.show(&self.inner.steps, self.inner.store.current_step());
        info!(session_id = %self.session_id(), step, changed, "navigated");
        Ok(changed)
    }

    /// Auto-advance path: moves past `step` unless the session was reset
    /// since the step completed in `generation`.
    fn advance_after_completion(&self, step: u32, generation: u64) -> Result<bool, DomainError> {
        let mut stage = self.inner.stage();
        if self.inner.store.generation() != generation {
            return Ok(false);
        }
        let moved = self.inner.store.advance_from(step)?;
        if moved {
            stage.show(&self.inner.steps, self.inner.store.current_step());
        }
        Ok(moved)
    }

    /// Stops every timer, clears progress and starts again from step 1.
    pub fn reset(&self) {
        let mut stage = self.inner.stage();
        stage.deactivate_all();
        self.inner.store.reset();
        stage.show(&self.inner.steps, self.inner.store.current_step());
        info!(session_id = %self.session_id(), "walkthrough reset");
    }

    /// Stops the running step without touching progress, as when the
    /// renderer goes away.
    pub fn suspend(&self) {
        let mut stage = self.inner.stage();
        stage.suspended = true;
        stage.deactivate_all();
        info!(session_id = %self.session_id(), "walkthrough suspended");
    }

    /// Restarts the current step from its first phase after [`Walkthrough::suspend`].
    pub fn resume(&self) {
        let mut stage = self.inner.stage();
        stage.suspended = false;
        stage.show(&self.inner.steps, self.inner.store.current_step());
        info!(session_id = %self.session_id(), "walkthrough resumed");
    }

    /// Stops every timer for good. Progress stays readable.
    pub fn shutdown(&self) {
        let mut stage = self.inner.stage();
        stage.shut_down = true;
        stage.deactivate_all();
        info!(session_id = %self.session_id(), "walkthrough shut down");
    }

    #[must_use]
    pub fn is_suspended(&self) -> bool {
        self.inner.stage().suspended
    }

    /// Watches the phase of `step`.
    #[must_use]
    pub fn subscribe(&self, step: u32) -> Option<watch::Receiver<Option<String>>> {
        let position = self.position_of(step)?;
        Some(self.inner.stage().sequencers[position].subscribe())
    }

    /// Runs `f` over the steps and their sequencers under the stage lock.
    pub(crate) fn inspect<R>(&self, f: impl FnOnce(&[StepDefinition], &[PhaseSequencer]) -> R) -> R {
        let stage = self.inner.stage();
        f(&self.inner.steps, &stage.sequencers)
    }

    fn position_of(&self, step: u32) -> Option<usize> {
        self.inner.steps.iter().position(|s| s.index == step)
    }
}

impl fmt::Debug for Walkthrough {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Walkthrough")
            .field("store", &self.inner.store)
            .field("settings", &self.inner.settings)
            .finish_non_exhaustive()
    }
}

fn build_sequencer(
    session_id: Uuid,
    step: &StepDefinition,
    store: &DemoProgressStore,
    walkthrough: &Weak<Inner>,
    settings: WalkthroughSettings,
) -> PhaseSequencer {
    let index = step.index;
    let build = step.build_payload;

    let payload_store = store.clone();
    let build_payload: PayloadBuilder = Arc::new(move || build(&payload_store.completed_steps()));

    let completion_store = store.clone();
    let walkthrough = walkthrough.clone();
    let on_complete: CompletionHandler = Arc::new(move |payload| {
        if let Err(error) = completion_store.complete_step(index, payload) {
            warn!(%session_id, step = index, %error, "completion rejected");
            return;
        }
        if !settings.auto_advance {
            return;
        }
        // Reset cannot interleave here: it deactivates this sequencer first,
        // which waits on the lock this handler runs under.
        let generation = completion_store.generation();
        // The stage lock may be held up the stack; advance on a fresh task.
        if let Some(inner) = walkthrough.upgrade() {
            tokio::spawn(async move {
                let walkthrough = Walkthrough { inner };
                if let Err(error) = walkthrough.advance_after_completion(index, generation) {
                    warn!(%session_id, step = index, %error, "auto-advance failed");
                }
            });
        }
    });

    PhaseSequencer::new(
        format!("{session_id}/step-{index}"),
        step.timeline.clone(),
        build_payload,
        on_complete,
    )
}
