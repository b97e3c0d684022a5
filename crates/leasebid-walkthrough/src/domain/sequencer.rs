//! Timed phase sequencer.
//!
//! A sequencer walks one step through its [`PhaseTimeline`] on Tokio timers.
//! Each activation spawns a single task that sleeps until every phase
//! deadline in turn. Activations are numbered; a phase change is applied only
//! while its activation is still the current one, and deactivation bumps the
//! number before aborting the task. A stale timer can therefore never move
//! the phase or report completion.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant};
use tracing::{debug, info};

use super::payload::CompletionPayload;
use super::phases::{Phase, PhaseTimeline};

/// Builds the completion payload at the moment the terminal phase fires.
pub type PayloadBuilder = Arc<dyn Fn() -> CompletionPayload + Send + Sync>;

/// Receives the completion payload.
///
/// Runs while the sequencer's internal lock is held, so it must not call
/// back into the same sequencer.
pub type CompletionHandler = Arc<dyn Fn(CompletionPayload) + Send + Sync>;

#[derive(Debug, Default)]
struct Cycle {
    epoch: u64,
    active: bool,
    completed: bool,
    started_at: Option<Instant>,
}

struct Shared {
    label: String,
    cycle: Mutex<Cycle>,
    phase: watch::Sender<Option<String>>,
    build_payload: PayloadBuilder,
    on_complete: CompletionHandler,
}

impl Shared {
    fn cycle(&self) -> MutexGuard<'_, Cycle> {
        self.cycle.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Enters `phase` on behalf of activation `epoch`. Returns `false` once
    /// that activation is no longer current.
    fn enter(&self, epoch: u64, phase: &Phase, terminal: bool) -> bool {
        let mut cycle = self.cycle();
        if !cycle.active || cycle.epoch != epoch {
            return false;
        }

        debug!(sequencer = %self.label, phase = %phase.name, "phase entered");
        self.phase.send_replace(Some(phase.name.clone()));

        if terminal {
            cycle.completed = true;
            let payload = (self.build_payload)();
            info!(sequencer = %self.label, "phase sequence complete");
            (self.on_complete)(payload);
        }
        true
    }
}

async fn run_cycle(shared: Arc<Shared>, phases: Vec<Phase>, epoch: u64, started_at: Instant) {
    let last = phases.len().saturating_sub(1);
    for (index, phase) in phases.iter().enumerate() {
        time::sleep_until(started_at + phase.delay()).await;
        if !shared.enter(epoch, phase, index == last) {
            return;
        }
    }
}

/// Drives a step through its phases and reports completion at most once per
/// activation.
pub struct PhaseSequencer {
    timeline: PhaseTimeline,
    shared: Arc<Shared>,
    task: Option<JoinHandle<()>>,
}

impl PhaseSequencer {
    /// Creates an inactive sequencer. `label` only appears in logs.
    #[must_use]
    pub fn new(
        label: impl Into<String>,
        timeline: PhaseTimeline,
        build_payload: PayloadBuilder,
        on_complete: CompletionHandler,
    ) -> Self {
        let (phase, _) = watch::channel(None);
        Self {
            timeline,
            shared: Arc::new(Shared {
                label: label.into(),
                cycle: Mutex::new(Cycle::default()),
                phase,
                build_payload,
                on_complete,
            }),
            task: None,
        }
    }

    /// Starts the sequence from its first phase. No-op while already active.
    ///
    /// An empty timeline activates but never changes phase or completes.
    ///
    /// # Panics
    ///
    /// Panics if called outside a Tokio runtime.
    pub fn activate(&mut self) {
        let started_at = Instant::now();
        let epoch = {
            let mut cycle = self.shared.cycle();
            if cycle.active {
                debug!(sequencer = %self.shared.label, "already active");
                return;
            }
            cycle.epoch += 1;
            cycle.active = true;
            cycle.completed = false;
            cycle.started_at = Some(started_at);
            cycle.epoch
        };

        info!(sequencer = %self.shared.label, epoch, phases = self.timeline.len(), "sequencer activated");

        let phases = self.timeline.phases();
        // A zero-delay first phase is in effect before `activate` returns.
        let due_now = usize::from(phases.first().is_some_and(|phase| phase.delay_ms == 0));
        if due_now == 1 {
            self.shared.enter(epoch, &phases[0], phases.len() == 1);
        }
        if due_now == phases.len() {
            return;
        }
        self.task = Some(tokio::spawn(run_cycle(
            Arc::clone(&self.shared),
            phases[due_now..].to_vec(),
            epoch,
            started_at,
        )));
    }

    /// Cancels every pending phase and returns to idle. No-op while inactive.
    pub fn deactivate(&mut self) {
        {
            let mut cycle = self.shared.cycle();
            if !cycle.active {
                return;
            }
            cycle.epoch += 1;
            cycle.active = false;
            cycle.completed = false;
            cycle.started_at = None;
            self.shared.phase.send_replace(None);
        }
        if let Some(task) = self.task.take() {
            task.abort();
        }
        info!(sequencer = %self.shared.label, "sequencer deactivated");
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.shared.cycle().active
    }

    /// Whether the current activation has reached its terminal phase.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.shared.cycle().completed
    }

    /// The phase in effect, or `None` while idle or before the first phase.
    /// Derived from the time since activation, so it is exact even before
    /// the timer task has run.
    #[must_use]
    pub fn current_phase(&self) -> Option<String> {
        let cycle = self.shared.cycle();
        if !cycle.active {
            return None;
        }
        let elapsed = cycle.started_at?.elapsed();
        self.timeline
            .phase_at(elapsed)
            .map(|phase| phase.name.clone())
    }

    /// Time since the current activation began.
    #[must_use]
    pub fn elapsed(&self) -> Option<Duration> {
        self.shared.cycle().started_at.map(|at| at.elapsed())
    }

    /// Watches phase changes. `None` means idle.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Option<String>> {
        self.shared.phase.subscribe()
    }

    #[must_use]
    pub fn timeline(&self) -> &PhaseTimeline {
        &self.timeline
    }
}

impl Drop for PhaseSequencer {
    fn drop(&mut self) {
        self.deactivate();
    }
}

impl fmt::Debug for PhaseSequencer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PhaseSequencer")
            .field("label", &self.shared.label)
            .field("timeline", &self.timeline)
            .field("active", &self.is_active())
            .field("phase", &self.current_phase())
            .finish_non_exhaustive()
    }
}
