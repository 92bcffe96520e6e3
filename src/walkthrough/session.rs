//! A walkthrough bound to one recipe and its tick source

use super::timer::TickHandle;
use super::{Phase, TickOutcome, Walkthrough, WalkthroughState};
use crate::constants::TICK_INTERVAL;
use crate::types::Recipe;
use std::ops::ControlFlow;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::runtime::Handle;
use tokio::sync::watch;
use tracing::{debug, info};

type Notify = Arc<dyn Fn() + Send + Sync>;

/// Owns the walkthrough of the recipe being viewed. The tick task runs only while the
/// walkthrough is running, and is cancelled on pause, reset, jump, [`close`] and drop.
///
/// [`close`]: WalkthroughSession::close
pub struct WalkthroughSession {
    recipe: Recipe,
    walkthrough: Arc<Mutex<Walkthrough>>,
    state_rx: watch::Receiver<WalkthroughState>,
    ticker: Option<TickHandle>,
    // Cleared by the tick task, under the walkthrough lock, once it decides to stop
    ticker_live: Arc<AtomicBool>,
    runtime: Handle,
    notify: Notify,
}

impl WalkthroughSession {
    /// `notify` is called from the tick task after every tick, e.g. to request a repaint
    pub fn new(recipe: Recipe, runtime: Handle, notify: impl Fn() + Send + Sync + 'static) -> Self {
        let walkthrough = Walkthrough::new(&recipe);
        let state_rx = walkthrough.subscribe();
        debug!(id = %recipe.id, steps = recipe.steps.len(), "Walkthrough opened");
        Self {
            recipe,
            walkthrough: Arc::new(Mutex::new(walkthrough)),
            state_rx,
            ticker: None,
            ticker_live: Arc::new(AtomicBool::new(false)),
            runtime,
            notify: Arc::new(notify),
        }
    }

    pub fn recipe(&self) -> &Recipe {
        &self.recipe
    }

    /// Latest published snapshot
    pub fn state(&self) -> WalkthroughState {
        *self.state_rx.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<WalkthroughState> {
        self.state_rx.clone()
    }

    pub fn phase(&self) -> Phase {
        self.lock().phase()
    }

    /// True once every step of a non-empty recipe has run down
    pub fn recipe_finished(&self) -> bool {
        !self.recipe.steps.is_empty() && self.phase() == Phase::Completed
    }

    pub fn progress(&self) -> f32 {
        self.lock().progress()
    }

    pub fn display_seconds(&self, step: usize) -> u64 {
        self.lock().display_seconds(step)
    }

    /// Play or pause the active step
    pub fn toggle_play(&mut self) {
        self.lock().play();
        self.sync();
    }

    pub fn pause(&mut self) {
        self.lock().pause();
        self.sync();
    }

    pub fn jump_to(&mut self, step: usize) -> bool {
        let moved = self.lock().jump_to(step);
        if moved {
            info!(id = %self.recipe.id, step, "Skipped ahead");
        }
        self.sync();
        moved
    }

    pub fn reset(&mut self) {
        self.lock().reset();
        self.sync();
    }

    pub fn has_active_ticker(&self) -> bool {
        self.ticker.as_ref().is_some_and(|t| !t.is_finished()) && self.ticker_live.load(Ordering::Acquire)
    }

    /// Make the tick task match the running flag: start it when running without one,
    /// drop it otherwise. Called after every action and once per frame.
    pub fn sync(&mut self) {
        let running = self.lock().is_running();
        if !running {
            if self.ticker.take().is_some() {
                debug!(id = %self.recipe.id, "Tick stopped");
            }
            return;
        }
        if self.has_active_ticker() {
            return;
        }

        // A stopping task is replaced, never revived
        self.ticker = None;
        let live = Arc::new(AtomicBool::new(true));
        self.ticker_live = Arc::clone(&live);

        let walkthrough = Arc::clone(&self.walkthrough);
        let notify = Arc::clone(&self.notify);
        let id = self.recipe.id.clone();
        self.ticker = Some(TickHandle::spawn(&self.runtime, TICK_INTERVAL, move || {
            let (outcome, running) = {
                let mut w = walkthrough.lock().unwrap_or_else(PoisonError::into_inner);
                let outcome = w.tick();
                let running = w.is_running();
                if !running {
                    live.store(false, Ordering::Release);
                }
                (outcome, running)
            };
            match outcome {
                TickOutcome::Advanced { finished } => info!(%id, step = finished, "Step finished"),
                TickOutcome::Completed => info!(%id, "All steps complete"),
                TickOutcome::Counting | TickOutcome::Ignored => {}
            }
            notify();
            if running {
                ControlFlow::Continue(())
            } else {
                ControlFlow::Break(())
            }
        }));
        debug!(id = %self.recipe.id, "Tick started");
    }

    /// Tear down the walkthrough: stop the clock and cancel the tick task
    pub fn close(&mut self) {
        self.lock().pause();
        if let Some(ticker) = self.ticker.take() {
            ticker.cancel();
        }
        debug!(id = %self.recipe.id, "Walkthrough closed");
    }

    fn lock(&self) -> MutexGuard<'_, Walkthrough> {
        self.walkthrough.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Drop for WalkthroughSession {
    fn drop(&mut self) {
        self.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{RecipeId, Step};
    use pretty_assertions::assert_eq;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::time::Duration;

    fn recipe(cook_times: &[i64]) -> Recipe {
        Recipe {
            id: RecipeId::new("1"),
            name: "Test".into(),
            description: String::new(),
            total_time: cook_times.iter().sum(),
            steps: cook_times
                .iter()
                .map(|&cook_time| Step {
                    description: "step".into(),
                    ingredients: String::new(),
                    instructions: String::new(),
                    flame: 3,
                    cook_time,
                    image: None,
                })
                .collect(),
        }
    }

    fn session(cook_times: &[i64]) -> (WalkthroughSession, Arc<AtomicU32>) {
        let repaints = Arc::new(AtomicU32::new(0));
        let r = Arc::clone(&repaints);
        let session = WalkthroughSession::new(recipe(cook_times), Handle::current(), move || {
            r.fetch_add(1, Ordering::SeqCst);
        });
        (session, repaints)
    }

    async fn advance(secs: f64) {
        tokio::time::sleep(Duration::from_secs_f64(secs)).await;
    }

    #[tokio::test(start_paused = true)]
    async fn clock_advances_steps_in_real_time() {
        let (mut s, _) = session(&[1, 1]);
        s.toggle_play();
        assert!(s.has_active_ticker());

        advance(59.5).await;
        assert_eq!(s.phase(), Phase::Running { step: 0, elapsed: 59 });

        advance(1.0).await;
        assert_eq!(s.phase(), Phase::Idle { step: 1, elapsed: 0 });
        assert!(!s.has_active_ticker());

        s.sync();
        assert!(s.ticker.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn play_right_after_a_step_finishes_keeps_ticking() {
        let (mut s, _) = session(&[1, 1]);
        s.toggle_play();
        advance(60.5).await;
        assert_eq!(s.phase(), Phase::Idle { step: 1, elapsed: 0 });
        assert!(!s.has_active_ticker());

        // No sync in between: the stopped task must not be mistaken for a live one
        s.toggle_play();
        assert!(s.has_active_ticker());
        advance(2.5).await;
        assert_eq!(s.phase(), Phase::Running { step: 1, elapsed: 2 });
    }

    #[tokio::test(start_paused = true)]
    async fn pause_cancels_pending_tick() {
        let (mut s, repaints) = session(&[5]);
        s.toggle_play();
        advance(3.5).await;
        s.pause();
        assert!(s.ticker.is_none());

        let seen = repaints.load(Ordering::SeqCst);
        advance(10.0).await;
        assert_eq!(s.state(), WalkthroughState { step_index: 0, elapsed_secs: 3, running: false });
        assert_eq!(repaints.load(Ordering::SeqCst), seen);

        s.toggle_play();
        advance(1.5).await;
        assert_eq!(s.state().elapsed_secs, 4);
    }

    #[tokio::test(start_paused = true)]
    async fn reset_and_jump_stop_the_clock() {
        let (mut s, _) = session(&[2, 2, 2]);
        s.toggle_play();
        advance(5.5).await;

        assert!(s.jump_to(2));
        assert!(s.ticker.is_none());
        assert_eq!(s.state(), WalkthroughState { step_index: 2, elapsed_secs: 0, running: false });

        s.toggle_play();
        advance(2.5).await;
        s.reset();
        assert!(s.ticker.is_none());
        advance(5.0).await;
        assert_eq!(s.state(), WalkthroughState::default());
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_the_session_cancels_the_tick() {
        let (mut s, repaints) = session(&[10]);
        let rx = s.subscribe();
        s.toggle_play();
        advance(2.5).await;
        drop(s);

        let seen = repaints.load(Ordering::SeqCst);
        advance(30.0).await;
        assert_eq!(repaints.load(Ordering::SeqCst), seen);
        assert_eq!(rx.borrow().elapsed_secs, 2);
        assert!(!rx.borrow().running);
    }

    #[tokio::test(start_paused = true)]
    async fn zero_minute_step_finishes_on_first_tick() {
        let (mut s, _) = session(&[0, 1]);
        s.toggle_play();
        advance(1.5).await;
        assert_eq!(s.phase(), Phase::Idle { step: 1, elapsed: 0 });
    }

    #[tokio::test(start_paused = true)]
    async fn single_step_reaches_completed() {
        let (mut s, _) = session(&[1]);
        s.toggle_play();
        advance(60.5).await;
        assert_eq!(s.phase(), Phase::Completed);
        assert_eq!(s.progress(), 1.0);
        assert!(s.recipe_finished());
    }

    #[tokio::test(start_paused = true)]
    async fn empty_recipe_is_never_announced_as_finished() {
        let (s, _) = session(&[]);
        assert_eq!(s.phase(), Phase::Completed);
        assert!(!s.recipe_finished());

        let (s, _) = session(&[1]);
        assert!(!s.recipe_finished());
    }
}
