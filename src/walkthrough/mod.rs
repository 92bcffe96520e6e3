//! Step walkthrough - drives one recipe through its steps, one timed step at a time
//!
//! [`Walkthrough`] is the pure state machine. [`WalkthroughSession`] owns one together
//! with the periodic tick that feeds it, and guarantees the tick never outlives the
//! session or keeps firing while the walkthrough is not running.

mod session;
mod timer;

pub use session::WalkthroughSession;

use crate::types::Recipe;
use tokio::sync::watch;

/// Snapshot of the walkthrough, published on every transition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WalkthroughState {
    /// Active step; equal to the step count once every step is done
    pub step_index: usize,
    pub elapsed_secs: u64,
    pub running: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle { step: usize, elapsed: u64 },
    Running { step: usize, elapsed: u64 },
    Completed,
}

/// What a single tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Not running; nothing changed
    Ignored,
    Counting,
    /// The step's time ran out and the next step is now active (idle)
    Advanced { finished: usize },
    /// The last step's time ran out
    Completed,
}

pub struct Walkthrough {
    /// Per-step duration in seconds; `None` for a non-positive cook time
    durations: Vec<Option<u64>>,
    state: WalkthroughState,
    tx: watch::Sender<WalkthroughState>,
}

impl Walkthrough {
    pub fn new(recipe: &Recipe) -> Self {
        Self::from_durations(recipe.steps.iter().map(|s| s.cook_seconds()).collect())
    }

    fn from_durations(durations: Vec<Option<u64>>) -> Self {
        let state = WalkthroughState::default();
        let (tx, _) = watch::channel(state);
        Self { durations, state, tx }
    }

    /// Receive a snapshot after every transition
    pub fn subscribe(&self) -> watch::Receiver<WalkthroughState> {
        self.tx.subscribe()
    }

    pub fn state(&self) -> WalkthroughState {
        self.state
    }

    pub fn step_count(&self) -> usize {
        self.durations.len()
    }

    pub fn is_running(&self) -> bool {
        self.state.running
    }

    pub fn phase(&self) -> Phase {
        let WalkthroughState { step_index, elapsed_secs, running } = self.state;
        if step_index >= self.step_count() {
            Phase::Completed
        } else if running {
            Phase::Running { step: step_index, elapsed: elapsed_secs }
        } else {
            Phase::Idle { step: step_index, elapsed: elapsed_secs }
        }
    }

    /// Seconds shown as the step's total. Never zero.
    pub fn display_seconds(&self, step: usize) -> u64 {
        self.durations
            .get(step)
            .copied()
            .flatten()
            .unwrap_or(1)
            .max(1)
    }

    /// Progress of the active step in `[0, 1]`
    pub fn progress(&self) -> f32 {
        if self.state.step_index >= self.step_count() {
            return 1.0;
        }
        let total = self.display_seconds(self.state.step_index);
        (self.state.elapsed_secs as f32 / total as f32).clamp(0.0, 1.0)
    }

    /// Start the active step, or pause it when already running
    pub fn play(&mut self) {
        if self.state.running {
            self.pause();
            return;
        }
        if self.state.step_index < self.step_count() {
            self.state.running = true;
            self.publish();
        }
    }

    pub fn pause(&mut self) {
        if self.state.running {
            self.state.running = false;
            self.publish();
        }
    }

    /// Advance the clock by one second
    pub fn tick(&mut self) -> TickOutcome {
        let current = self.state.step_index;
        if !self.state.running || current >= self.step_count() {
            return TickOutcome::Ignored;
        }

        let finished = match self.durations[current] {
            // Non-positive cook time: the step is already done
            None => true,
            Some(total) => {
                self.state.elapsed_secs += 1;
                self.state.elapsed_secs >= total
            }
        };

        if !finished {
            self.publish();
            return TickOutcome::Counting;
        }

        if current + 1 < self.step_count() {
            self.move_to(current + 1);
            TickOutcome::Advanced { finished: current }
        } else {
            self.move_to(self.step_count());
            TickOutcome::Completed
        }
    }

    /// Skip ahead to a later step. Earlier or current steps are never re-entered.
    pub fn jump_to(&mut self, step: usize) -> bool {
        if step <= self.state.step_index || step >= self.step_count() {
            return false;
        }
        self.move_to(step);
        true
    }

    pub fn reset(&mut self) {
        self.move_to(0);
    }

    /// Every step change stops the clock and clears elapsed time
    fn move_to(&mut self, step: usize) {
        self.state = WalkthroughState {
            step_index: step,
            elapsed_secs: 0,
            running: false,
        };
        self.publish();
    }

    fn publish(&self) {
        let next = self.state;
        self.tx.send_if_modified(|current| {
            if *current == next {
                false
            } else {
                *current = next;
                true
            }
        });
    }
}
