// Repeating and one-shot timer tasks.
// Every timer watches a shared shutdown signal; `abort()` cancels a single one.

use std::future::Future;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{Duration, MissedTickBehavior, interval, sleep};

/// What a repeating callback wants next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    Continue,
    Stop,
}

/// Handle to a spawned timer. `T` is the repeating fire count (`u64`) or
/// whether a one-shot fired (`bool`).
pub struct TimerHandle<T> {
    handle: JoinHandle<T>,
}

impl<T> TimerHandle<T> {
    pub fn abort(&self) {
        self.handle.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Waits for the timer to end. `None` if it was aborted or panicked.
    pub async fn join(self) -> Option<T> {
        match self.handle.await {
            Ok(v) => Some(v),
            Err(e) => {
                if !e.is_cancelled() {
                    tracing::warn!(error = %e, "timer task failed");
                }
                None
            }
        }
    }
}

/// Fires `f` now and then every `period` until it returns [`Tick::Stop`] or
/// shutdown is signalled. Resolves to the number of times `f` ran.
pub fn repeating<F, Fut>(
    period: Duration,
    mut shutdown: watch::Receiver<bool>,
    mut f: F,
) -> TimerHandle<u64>
where
    F: FnMut() -> Fut + Send + 'static,
    Fut: Future<Output = Tick> + Send + 'static,
{
    let handle = tokio::spawn(async move {
        let mut tick = interval(period);
        tick.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut fired = 0u64;
        if *shutdown.borrow_and_update() {
            return fired;
        }
        loop {
            tokio::select! {
                biased;
                _ = shutdown.changed() => break,
                _ = tick.tick() => {
                    fired += 1;
                    if f().await == Tick::Stop {
                        break;
                    }
                }
            }
        }
        fired
    });
    TimerHandle { handle }
}

/// Runs `f` once after `delay` unless shutdown comes first. Never re-arms.
pub fn once<F, Fut>(delay: Duration, mut shutdown: watch::Receiver<bool>, f: F) -> TimerHandle<bool>
where
    F: FnOnce() -> Fut + Send + 'static,
    Fut: Future<Output = ()> + Send + 'static,
{
    let handle = tokio::spawn(async move {
        if *shutdown.borrow_and_update() {
            return false;
        }
        tokio::select! {
            biased;
            _ = shutdown.changed() => false,
            _ = sleep(delay) => {
                f().await;
                true
            }
        }
    });
    TimerHandle { handle }
}
