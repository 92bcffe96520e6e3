//! Periodic tick task with scoped cancellation

use std::ops::ControlFlow;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

/// A running periodic task. Cancelled when dropped.
pub struct TickHandle {
    token: CancellationToken,
    task: JoinHandle<()>,
}

impl TickHandle {
    /// Call `on_tick` every `period`, starting one period from now, until it returns
    /// `Break` or the handle is cancelled.
    pub fn spawn<F>(runtime: &Handle, period: Duration, mut on_tick: F) -> Self
    where
        F: FnMut() -> ControlFlow<()> + Send + 'static,
    {
        let token = CancellationToken::new();
        let child = token.clone();

        let task = runtime.spawn(async move {
            let mut interval = tokio::time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    biased;
                    _ = child.cancelled() => break,
                    _ = interval.tick() => {
                        if child.is_cancelled() || on_tick().is_break() {
                            break;
                        }
                    }
                }
            }
        });

        Self { token, task }
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// True once the task has exited, either on its own or after cancellation
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for TickHandle {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    fn counter() -> (Arc<AtomicU32>, impl FnMut() -> ControlFlow<()> + Send + 'static) {
        let count = Arc::new(AtomicU32::new(0));
        let c = Arc::clone(&count);
        (count, move || {
            c.fetch_add(1, Ordering::SeqCst);
            ControlFlow::Continue(())
        })
    }

    #[tokio::test(start_paused = true)]
    async fn ticks_once_per_period() {
        let (count, on_tick) = counter();
        let _handle = TickHandle::spawn(&Handle::current(), Duration::from_secs(1), on_tick);

        tokio::time::sleep(Duration::from_millis(500)).await;
        assert_eq!(count.load(Ordering::SeqCst), 0);

        tokio::time::sleep(Duration::from_secs(3)).await;
        assert_eq!(count.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn drop_stops_ticking() {
        let (count, on_tick) = counter();
        let handle = TickHandle::spawn(&Handle::current(), Duration::from_secs(1), on_tick);

        tokio::time::sleep(Duration::from_millis(2500)).await;
        drop(handle);
        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(count.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn break_ends_task() {
        let count = Arc::new(AtomicU32::new(0));
        let c = Arc::clone(&count);
        let handle = TickHandle::spawn(&Handle::current(), Duration::from_secs(1), move || {
            if c.fetch_add(1, Ordering::SeqCst) + 1 == 2 {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        });

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(count.load(Ordering::SeqCst), 2);
        assert!(handle.is_finished());
    }
}
