//! Cancellable, re-armable one-shot timer.
//!
//! A timer owns at most one pending task. Arming replaces whatever was
//! pending; cancelling aborts it and advances the timer's epoch so a task
//! that already woke up can tell it has been superseded.
//!
//! The firing task is expected to take the lock that guards the timer and
//! call [`OneShotTimer::claim`] with its token before acting. Cancellation
//! performed under the same lock therefore always wins over a late firing.

use std::future::Future;
use std::time::Duration;

use tokio::task::JoinHandle;

/// Identifies one arming of a [`OneShotTimer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerToken(u64);

/// One-shot timer backed by a tokio task.
#[derive(Debug, Default)]
pub struct OneShotTimer {
    epoch: u64,
    pending: Option<JoinHandle<()>>,
}

impl OneShotTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `on_fire` to run after `delay`, replacing any pending firing.
    ///
    /// Must be called from within a tokio runtime.
    pub fn arm<F, Fut>(&mut self, delay: Duration, on_fire: F) -> TimerToken
    where
        F: FnOnce(TimerToken) -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        self.cancel();
        let token = TimerToken(self.epoch);
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            on_fire(token).await;
        }));
        token
    }

    /// Cancel the pending firing, if any. Returns whether one was pending.
    pub fn cancel(&mut self) -> bool {
        self.epoch = self.epoch.wrapping_add(1);
        match self.pending.take() {
            Some(handle) => {
                handle.abort();
                true
            }
            None => false,
        }
    }

    /// Accept a firing. Succeeds once, and only for the current arming.
    ///
    /// After a successful claim the timer is disarmed without aborting the
    /// calling task, so the caller may re-arm it.
    pub fn claim(&mut self, token: TimerToken) -> bool {
        if self.pending.is_some() && token.0 == self.epoch {
            self.pending = None;
            true
        } else {
            false
        }
    }

    pub fn is_armed(&self) -> bool {
        self.pending.is_some()
    }
}

impl Drop for OneShotTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}
