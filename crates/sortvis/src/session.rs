//! Shared playback session driven by tokio timers.
//!
//! A [`Session`] wraps a [`Playback`] behind an async mutex together with
//! two one-shot timers: the auto-advance timer and the ~10 Hz elapsed-time
//! ticker. Both are only armed while playing and are cancelled under the
//! lock by every transition out of `Playing`.

use std::sync::{Arc, Weak};
use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use sortvis_engine::{AlgorithmId, Step};
use tokio::sync::{broadcast, Mutex};

use crate::config::VisConfig;
use crate::error::Result;
use crate::playback::{Playback, PlaybackState, PlaybackStatus, Speed};
use crate::timer::OneShotTimer;

/// Interval of the elapsed-time ticker.
pub const TICK_INTERVAL: Duration = Duration::from_millis(100);

const UPDATE_CHANNEL_CAPACITY: usize = 64;

/// Status plus current step, pushed to subscribers on every change.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionUpdate {
    pub status: PlaybackStatus,
    pub step: Step,
}

impl From<&Playback> for SessionUpdate {
    fn from(playback: &Playback) -> Self {
        Self {
            status: PlaybackStatus::from(playback),
            step: playback.view(),
        }
    }
}

struct Inner {
    playback: Playback,
    rng: StdRng,
    advance: OneShotTimer,
    ticker: OneShotTimer,
}

impl Inner {
    fn cancel_timers(&mut self) {
        self.advance.cancel();
        self.ticker.cancel();
    }
}

/// Cloneable handle to one playback session.
#[derive(Clone)]
pub struct Session {
    inner: Arc<Mutex<Inner>>,
    updates: broadcast::Sender<SessionUpdate>,
}

impl Session {
    /// Create a session with a random array as described by `config`.
    pub fn new(config: &VisConfig) -> Result<Self> {
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let mut playback = Playback::with_random_array(&mut rng, config.algorithm, config.array_size)?;
        playback.set_speed(config.speed);
        Ok(Self::with_rng(playback, rng))
    }

    /// Wrap an existing controller.
    pub fn from_playback(playback: Playback) -> Self {
        Self::with_rng(playback, StdRng::from_entropy())
    }

    fn with_rng(playback: Playback, rng: StdRng) -> Self {
        let (updates, _) = broadcast::channel(UPDATE_CHANNEL_CAPACITY);
        Self {
            inner: Arc::new(Mutex::new(Inner {
                playback,
                rng,
                advance: OneShotTimer::new(),
                ticker: OneShotTimer::new(),
            })),
            updates,
        }
    }

    /// Receive a [`SessionUpdate`] after every state change.
    pub fn subscribe(&self) -> broadcast::Receiver<SessionUpdate> {
        self.updates.subscribe()
    }

    /// Current status and step.
    pub async fn snapshot(&self) -> SessionUpdate {
        SessionUpdate::from(&self.inner.lock().await.playback)
    }

    pub async fn status(&self) -> PlaybackStatus {
        PlaybackStatus::from(&self.inner.lock().await.playback)
    }

    /// Current visual state.
    pub async fn view(&self) -> Step {
        self.inner.lock().await.playback.view()
    }

    /// Run `f` against the controller without mutating it.
    pub async fn inspect<T>(&self, f: impl FnOnce(&Playback) -> T) -> T {
        f(&self.inner.lock().await.playback)
    }

    /// Start or resume auto-advance.
    pub async fn start(&self) -> PlaybackStatus {
        let mut guard = self.inner.lock().await;
        let inner = &mut *guard;

        inner.playback.start(now());
        if inner.playback.is_playing() {
            tracing::info!(
                algorithm = %inner.playback.algorithm(),
                steps = inner.playback.total_steps(),
                delay_ms = inner.playback.step_delay().as_millis() as u64,
                "playback started"
            );
            if !inner.advance.is_armed() {
                arm_advance(inner, Arc::downgrade(&self.inner), self.updates.clone());
            }
            if !inner.ticker.is_armed() {
                arm_ticker(inner, Arc::downgrade(&self.inner), self.updates.clone());
            }
        }
        self.publish(&inner.playback)
    }

    pub async fn pause(&self) -> PlaybackStatus {
        let mut guard = self.inner.lock().await;
        let inner = &mut *guard;

        inner.playback.refresh_elapsed(now());
        inner.playback.pause();
        if !inner.playback.is_playing() {
            inner.cancel_timers();
        }
        tracing::info!(index = inner.playback.current_index(), "playback paused");
        self.publish(&inner.playback)
    }

    /// Halt, reset statistics and draw a new array.
    pub async fn stop(&self) -> PlaybackStatus {
        let mut guard = self.inner.lock().await;
        let inner = &mut *guard;

        inner.cancel_timers();
        inner.playback.stop(&mut inner.rng);
        tracing::info!("playback stopped");
        self.publish(&inner.playback)
    }

    /// Advance one step manually. Ignored while playing.
    pub async fn step_forward(&self) -> PlaybackStatus {
        let mut guard = self.inner.lock().await;
        let inner = &mut *guard;

        inner.playback.step_forward();
        self.publish(&inner.playback)
    }

    /// Draw a new array of the current size.
    pub async fn generate_array(&self) -> PlaybackStatus {
        let mut guard = self.inner.lock().await;
        let inner = &mut *guard;

        inner.cancel_timers();
        inner.playback.generate_array(&mut inner.rng);
        tracing::info!(size = inner.playback.array_size(), "generated array");
        self.publish(&inner.playback)
    }

    /// Change the array size and draw a new array.
    pub async fn set_array_size(&self, size: usize) -> Result<PlaybackStatus> {
        let mut guard = self.inner.lock().await;
        let inner = &mut *guard;

        inner.playback.set_array_size(size, &mut inner.rng)?;
        inner.cancel_timers();
        tracing::info!(size, "array size changed");
        Ok(self.publish(&inner.playback))
    }

    /// Switch algorithm, discarding the current run.
    pub async fn select_algorithm(&self, algorithm: AlgorithmId) -> PlaybackStatus {
        let mut guard = self.inner.lock().await;
        let inner = &mut *guard;

        inner.cancel_timers();
        inner.playback.select_algorithm(algorithm);
        tracing::info!(%algorithm, "algorithm selected");
        self.publish(&inner.playback)
    }

    /// Change speed; takes effect from the next scheduled step.
    pub async fn set_speed(&self, speed: Speed) -> PlaybackStatus {
        let mut guard = self.inner.lock().await;
        guard.playback.set_speed(speed);
        self.publish(&guard.playback)
    }

    fn publish(&self, playback: &Playback) -> PlaybackStatus {
        publish(&self.updates, playback)
    }
}

fn now() -> Instant {
    tokio::time::Instant::now().into_std()
}

fn publish(updates: &broadcast::Sender<SessionUpdate>, playback: &Playback) -> PlaybackStatus {
    let update = SessionUpdate::from(playback);
    let status = update.status.clone();
    // No subscribers is fine
    let _ = updates.send(update);
    status
}

/// Schedule the next auto-advance. The firing re-arms itself while the
/// session keeps playing.
fn arm_advance(
    inner: &mut Inner,
    shared: Weak<Mutex<Inner>>,
    updates: broadcast::Sender<SessionUpdate>,
) {
    let delay = inner.playback.step_delay();
    inner.advance.arm(delay, move |token| async move {
        let Some(shared) = shared.upgrade() else {
            return;
        };
        let mut guard = shared.lock().await;
        let inner = &mut *guard;
        if !inner.advance.claim(token) {
            return;
        }

        inner.playback.refresh_elapsed(now());
        inner.playback.advance();

        if inner.playback.state() == PlaybackState::Playing {
            arm_advance(inner, Arc::downgrade(&shared), updates.clone());
        } else {
            inner.ticker.cancel();
            tracing::info!(
                steps = inner.playback.total_steps(),
                elapsed_secs = inner.playback.stats().elapsed_secs,
                "playback completed"
            );
        }
        publish(&updates, &inner.playback);
    });
}

fn arm_ticker(
    inner: &mut Inner,
    shared: Weak<Mutex<Inner>>,
    updates: broadcast::Sender<SessionUpdate>,
) {
    inner.ticker.arm(TICK_INTERVAL, move |token| async move {
        let Some(shared) = shared.upgrade() else {
            return;
        };
        let mut guard = shared.lock().await;
        let inner = &mut *guard;
        if !inner.ticker.claim(token) {
            return;
        }

        inner.playback.refresh_elapsed(now());
        if inner.playback.is_playing() {
            arm_ticker(inner, Arc::downgrade(&shared), updates.clone());
        }
        publish(&updates, &inner.playback);
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Session over a fixed array at maximum speed (50 ms per step).
    async fn fast_session(algorithm: AlgorithmId, array: &[i32]) -> Session {
        let mut playback = Playback::new(algorithm, array.to_vec());
        playback.set_speed(Speed::MAX);
        Session::from_playback(playback)
    }

    async fn timers_armed(session: &Session) -> (bool, bool) {
        let inner = session.inner.lock().await;
        (inner.advance.is_armed(), inner.ticker.is_armed())
    }

    #[tokio::test(start_paused = true)]
    async fn playing_session_completes_on_its_own() {
        let session = fast_session(AlgorithmId::Bubble, &[5, 3, 8, 1]).await;
        let status = session.start().await;
        assert_eq!(status.state, PlaybackState::Playing);
        let total = status.total_steps;

        tokio::time::sleep(Duration::from_millis(50 * total as u64 + 25)).await;

        let status = session.status().await;
        assert_eq!(status.state, PlaybackState::Completed);
        assert_eq!(status.current_step, total - 1);
        assert_eq!(status.stats.progress, 100);
        assert!(status.stats.elapsed_secs > 0.0);
        assert_eq!(session.view().await.array, vec![1, 3, 5, 8]);
        assert_eq!(timers_armed(&session).await, (false, false));
    }

    #[tokio::test(start_paused = true)]
    async fn advances_once_per_delay() {
        let session = fast_session(AlgorithmId::Merge, &[9, 8, 7, 6, 5, 4, 3, 2]).await;
        session.start().await;

        tokio::time::sleep(Duration::from_millis(125)).await;
        assert_eq!(session.status().await.current_step, 2);

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(session.status().await.current_step, 3);
    }

    #[tokio::test(start_paused = true)]
    async fn pause_cancels_pending_advance() {
        let session = fast_session(AlgorithmId::Insertion, &[9, 8, 7, 6, 5, 4, 3, 2]).await;
        session.start().await;
        tokio::time::sleep(Duration::from_millis(125)).await;

        let paused = session.pause().await;
        assert_eq!(paused.state, PlaybackState::Paused);
        assert_eq!(timers_armed(&session).await, (false, false));

        tokio::time::sleep(Duration::from_secs(5)).await;
        let status = session.status().await;
        assert_eq!(status.current_step, paused.current_step);
        assert_eq!(status.stats.elapsed_secs, paused.stats.elapsed_secs);

        // Resume continues from where it stopped
        session.start().await;
        tokio::time::sleep(Duration::from_millis(75)).await;
        assert_eq!(session.status().await.current_step, paused.current_step + 1);
    }

    #[tokio::test(start_paused = true)]
    async fn stop_resets_and_never_fires_again() {
        let mut playback = Playback::with_random_array(
            &mut StdRng::seed_from_u64(1),
            AlgorithmId::Selection,
            20,
        )
        .unwrap();
        playback.set_speed(Speed::MAX);
        let session = Session::from_playback(playback);
        let before = session.view().await.array;

        session.start().await;
        tokio::time::sleep(Duration::from_millis(225)).await;
        let status = session.stop().await;

        assert_eq!(status.state, PlaybackState::Idle);
        assert_eq!(status.current_step, 0);
        assert_eq!(status.total_steps, 0);
        assert!(status.history.is_empty());
        assert_eq!(timers_armed(&session).await, (false, false));

        tokio::time::sleep(Duration::from_secs(2)).await;
        let after = session.status().await;
        assert_eq!(after.current_step, 0);
        assert_eq!(after.state, PlaybackState::Idle);
        assert_ne!(session.view().await.array, before);
    }

    #[tokio::test(start_paused = true)]
    async fn stop_on_small_explicit_array_returns_to_idle() {
        let session = fast_session(AlgorithmId::Bubble, &[5, 3, 8, 1]).await;
        session.start().await;
        tokio::time::sleep(Duration::from_millis(75)).await;

        let status = session.stop().await;
        assert_eq!(status.state, PlaybackState::Idle);
        assert_eq!(status.array_size, sortvis_engine::MIN_ARRAY_SIZE);
        assert_eq!(timers_armed(&session).await, (false, false));

        tokio::time::sleep(Duration::from_secs(5)).await;
        let after = session.status().await;
        assert_eq!(after.state, PlaybackState::Idle);
        assert_eq!(after.current_step, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn switching_algorithm_discards_run() {
        let session = fast_session(AlgorithmId::Bubble, &[4, 3, 2, 1]).await;
        session.start().await;
        tokio::time::sleep(Duration::from_millis(75)).await;

        let status = session.select_algorithm(AlgorithmId::Quick).await;
        assert_eq!(status.state, PlaybackState::Idle);
        assert_eq!(status.total_steps, 0);
        assert_eq!(status.algorithm, AlgorithmId::Quick);

        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(session.status().await.current_step, 0);
        assert_eq!(session.view().await.array, vec![4, 3, 2, 1]);
    }

    #[tokio::test(start_paused = true)]
    async fn manual_step_ignored_while_playing() {
        let session = fast_session(AlgorithmId::Bubble, &[4, 3, 2, 1]).await;
        session.start().await;
        let status = session.step_forward().await;
        assert_eq!(status.current_step, 0);
        assert!(!status.can_step_forward);
    }

    #[tokio::test(start_paused = true)]
    async fn speed_change_applies_to_next_delay() {
        let session = fast_session(AlgorithmId::Bubble, &[9, 8, 7, 6, 5, 4, 3, 2]).await;
        session.start().await;
        session.set_speed(Speed::new(1)).await;

        // First firing was armed at 50 ms; the next one waits 900 ms
        tokio::time::sleep(Duration::from_millis(75)).await;
        assert_eq!(session.status().await.current_step, 1);
        tokio::time::sleep(Duration::from_millis(500)).await;
        assert_eq!(session.status().await.current_step, 1);
        tokio::time::sleep(Duration::from_millis(450)).await;
        assert_eq!(session.status().await.current_step, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn subscribers_receive_updates() {
        let session = fast_session(AlgorithmId::Bubble, &[2, 1]).await;
        let mut updates = session.subscribe();

        session.step_forward().await;
        let update = updates.recv().await.unwrap();
        assert_eq!(update.status.current_step, 1);
        assert_eq!(update.step.swapping, vec![0, 1]);
    }

    #[tokio::test(start_paused = true)]
    async fn dropped_session_stops_its_timers() {
        let session = fast_session(AlgorithmId::Bubble, &[9, 8, 7, 6, 5, 4, 3, 2]).await;
        let mut updates = session.subscribe();
        session.start().await;
        drop(session);

        tokio::time::sleep(Duration::from_secs(5)).await;
        // Only the start notification was ever sent
        assert!(updates.try_recv().is_ok());
        assert!(matches!(
            updates.try_recv(),
            Err(broadcast::error::TryRecvError::Closed)
        ));
    }

    #[tokio::test]
    async fn seeded_sessions_draw_identical_arrays() {
        let config = VisConfig {
            seed: Some(99),
            ..VisConfig::default()
        };
        let a = Session::new(&config).unwrap().view().await.array;
        let b = Session::new(&config).unwrap().view().await.array;
        assert_eq!(a, b);
        assert_eq!(a.len(), config.array_size);
    }
}
