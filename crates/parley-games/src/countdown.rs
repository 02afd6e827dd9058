//! The session countdown: a cancellable, repeating tick task.
//!
//! A running session owns exactly one [`CountdownHandle`]. Dropping or
//! cancelling the handle stops the task; ticks that were already queued
//! carry the old [`SessionId`] and are discarded by the controller.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::session::SessionId;

/// Starts countdown tasks for running sessions.
pub trait TickScheduler: Send {
    /// Start a task that delivers a tick for `session` every `period`.
    fn schedule(&mut self, session: SessionId, period: Duration) -> CountdownHandle;
}

/// Ownership of one scheduled countdown.
#[derive(Debug)]
pub struct CountdownHandle {
    session: SessionId,
    token: CancellationToken,
}

impl CountdownHandle {
    /// Wrap a cancellation token for `session`.
    pub fn new(session: SessionId, token: CancellationToken) -> Self {
        Self { session, token }
    }

    /// The session the ticks are tagged with.
    pub fn session(&self) -> SessionId {
        self.session
    }

    /// Stop the countdown. No further tick is sent after this returns.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// Whether the countdown has been stopped.
    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }
}

impl Drop for CountdownHandle {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

/// Countdown backed by tokio tasks; ticks arrive on an mpsc channel.
#[derive(Debug, Clone)]
pub struct TokioScheduler {
    runtime: Handle,
    ticks: mpsc::UnboundedSender<SessionId>,
}

impl TokioScheduler {
    /// Create a scheduler that spawns on `runtime` and sends ticks to `ticks`.
    pub fn new(runtime: Handle, ticks: mpsc::UnboundedSender<SessionId>) -> Self {
        Self { runtime, ticks }
    }

    /// Create a scheduler together with the receiving end of its tick channel.
    pub fn channel(runtime: Handle) -> (Self, mpsc::UnboundedReceiver<SessionId>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self::new(runtime, tx), rx)
    }
}

impl TickScheduler for TokioScheduler {
    fn schedule(&mut self, session: SessionId, period: Duration) -> CountdownHandle {
        let token = CancellationToken::new();
        let cancelled = token.clone();
        let ticks = self.ticks.clone();
        let start = tokio::time::Instant::now() + period;

        self.runtime.spawn(async move {
            let mut interval = tokio::time::interval_at(start, period);
            interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    biased;
                    () = cancelled.cancelled() => {
                        debug!(%session, "countdown cancelled");
                        break;
                    }
                    _ = interval.tick() => {
                        if ticks.send(session).is_err() {
                            debug!(%session, "tick receiver dropped");
                            break;
                        }
                    }
                }
            }
        });

        CountdownHandle::new(session, token)
    }
}

/// Countdown that never fires on its own; the caller delivers ticks.
///
/// Clones share their bookkeeping, so a test can keep one clone to inspect
/// how many countdowns are still live. Cancelled countdowns are pruned, so
/// a long scripted run keeps only counters for them.
#[derive(Debug, Clone, Default)]
pub struct ManualScheduler {
    ledger: Arc<Mutex<Ledger>>,
}

#[derive(Debug, Default)]
struct Ledger {
    scheduled: usize,
    last: Option<SessionId>,
    live: Vec<CancellationToken>,
}

impl Ledger {
    fn prune(&mut self) {
        self.live.retain(|t| !t.is_cancelled());
    }
}

impl ManualScheduler {
    /// Create an empty manual scheduler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of countdowns not yet cancelled.
    pub fn live(&self) -> usize {
        let mut ledger = self.lock();
        ledger.prune();
        ledger.live.len()
    }

    /// Number of countdowns ever scheduled.
    pub fn scheduled(&self) -> usize {
        self.lock().scheduled
    }

    /// Session of the most recently scheduled countdown.
    pub fn last_session(&self) -> Option<SessionId> {
        self.lock().last
    }

    fn lock(&self) -> MutexGuard<'_, Ledger> {
        self.ledger.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl TickScheduler for ManualScheduler {
    fn schedule(&mut self, session: SessionId, _period: Duration) -> CountdownHandle {
        let token = CancellationToken::new();
        let mut ledger = self.lock();
        ledger.prune();
        ledger.scheduled += 1;
        ledger.last = Some(session);
        ledger.live.push(token.clone());
        CountdownHandle::new(session, token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dropping_handle_cancels() {
        let mut scheduler = ManualScheduler::new();
        let handle = scheduler.schedule(SessionId::new(1), Duration::from_secs(1));
        assert_eq!(scheduler.live(), 1);
        drop(handle);
        assert_eq!(scheduler.live(), 0);
        assert_eq!(scheduler.scheduled(), 1);
    }

    #[test]
    fn cancelled_countdowns_are_pruned() {
        let mut scheduler = ManualScheduler::new();
        for n in 1..=100 {
            drop(scheduler.schedule(SessionId::new(n), Duration::from_secs(1)));
        }
        let _current = scheduler.schedule(SessionId::new(101), Duration::from_secs(1));

        assert_eq!(scheduler.lock().live.len(), 1);
        assert_eq!(scheduler.live(), 1);
        assert_eq!(scheduler.scheduled(), 101);
        assert_eq!(scheduler.last_session(), Some(SessionId::new(101)));
    }

    #[test]
    fn cancel_is_idempotent() {
        let mut scheduler = ManualScheduler::new();
        let handle = scheduler.schedule(SessionId::new(3), Duration::from_secs(1));
        handle.cancel();
        handle.cancel();
        assert!(handle.is_cancelled());
        assert_eq!(handle.session(), SessionId::new(3));
        assert_eq!(scheduler.last_session(), Some(SessionId::new(3)));
    }

    #[tokio::test(start_paused = true)]
    async fn tokio_scheduler_ticks_every_period() {
        let (mut scheduler, mut rx) = TokioScheduler::channel(Handle::current());
        let handle = scheduler.schedule(SessionId::new(7), Duration::from_secs(1));

        for _ in 0..3 {
            let id = rx.recv().await.unwrap();
            assert_eq!(id, SessionId::new(7));
        }
        handle.cancel();
    }

    #[tokio::test(start_paused = true)]
    async fn tokio_scheduler_stops_after_cancel() {
        let (mut scheduler, mut rx) = TokioScheduler::channel(Handle::current());
        let handle = scheduler.schedule(SessionId::new(1), Duration::from_secs(1));

        assert_eq!(rx.recv().await, Some(SessionId::new(1)));
        handle.cancel();

        tokio::time::advance(Duration::from_secs(5)).await;
        for _ in 0..10 {
            tokio::task::yield_now().await;
        }
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn first_tick_waits_one_period() {
        let (mut scheduler, mut rx) = TokioScheduler::channel(Handle::current());
        let _handle = scheduler.schedule(SessionId::new(2), Duration::from_secs(1));

        tokio::time::advance(Duration::from_millis(500)).await;
        tokio::task::yield_now().await;
        assert!(rx.try_recv().is_err());

        tokio::time::advance(Duration::from_millis(600)).await;
        for _ in 0..10 {
            tokio::task::yield_now().await;
        }
        assert_eq!(rx.try_recv().ok(), Some(SessionId::new(2)));
    }
}
