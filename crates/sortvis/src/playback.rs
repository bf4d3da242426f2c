//! Playback controls for a sorting run.

use std::collections::{BTreeSet, VecDeque};
use std::time::{Duration, Instant};

use rand::Rng;
use serde::{Deserialize, Serialize};
use sortvis_engine::{
    generate_random_array_with, generate_steps, random_values, AlgorithmId, Step, StepKind,
    MAX_ARRAY_SIZE, MIN_ARRAY_SIZE,
};

use crate::error::Result;

/// Number of step descriptions kept in the trailing history.
pub const HISTORY_LEN: usize = 5;

/// Array size used until the user picks another.
pub const DEFAULT_ARRAY_SIZE: usize = 30;

/// Narrative shown before a run has been computed.
pub const READY_ACTION: &str = "Ready to sort";

/// Animation speed on a 1..=10 scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub struct Speed(u8);

impl Speed {
    pub const MIN: Self = Self(1);
    pub const MAX: Self = Self(10);

    /// Create a speed, clamped to `1..=10`.
    pub fn new(value: u8) -> Self {
        Self(value.clamp(Self::MIN.0, Self::MAX.0))
    }

    pub fn value(&self) -> u8 {
        self.0
    }

    /// Delay between auto-advanced steps: `max(50ms, 1000ms - speed * 100ms)`.
    pub fn step_delay(&self) -> Duration {
        let ms = 1000u64.saturating_sub(u64::from(self.0) * 100).max(50);
        Duration::from_millis(ms)
    }
}

impl Default for Speed {
    fn default() -> Self {
        Self(5)
    }
}

impl From<u8> for Speed {
    fn from(value: u8) -> Self {
        Self::new(value)
    }
}

impl From<Speed> for u8 {
    fn from(speed: Speed) -> Self {
        speed.0
    }
}

/// Current state of playback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaybackState {
    /// No run computed for the current array and algorithm
    Idle,
    /// Run computed, positioned at the first step
    Ready,
    /// Auto-advancing
    Playing,
    /// Halted mid-run
    Paused,
    /// Positioned at the last step
    Completed,
}

/// Cumulative statistics for the steps played so far.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PlaybackStats {
    pub comparisons: u64,
    pub array_accesses: u64,
    /// Wall-clock seconds since the most recent fresh start
    pub elapsed_secs: f64,
    /// Percentage of the run played, 0..=100
    pub progress: u8,
}

/// Playback controller for a sorting run.
///
/// Owns the array, the selected algorithm and the eagerly computed step
/// list. Timing is supplied by the caller: this type never sleeps.
#[derive(Debug)]
pub struct Playback {
    algorithm: AlgorithmId,
    array_size: usize,
    array: Vec<i32>,
    steps: Vec<Step>,
    current: usize,
    state: PlaybackState,
    speed: Speed,
    stats: PlaybackStats,
    history: VecDeque<String>,
    started_at: Option<Instant>,
}

impl Playback {
    /// Create a controller over an explicit array.
    pub fn new(algorithm: AlgorithmId, array: Vec<i32>) -> Self {
        Self {
            algorithm,
            array_size: array.len(),
            array,
            steps: Vec::new(),
            current: 0,
            state: PlaybackState::Idle,
            speed: Speed::default(),
            stats: PlaybackStats::default(),
            history: VecDeque::with_capacity(HISTORY_LEN),
            started_at: None,
        }
    }

    /// Create a controller over a freshly drawn array of `size` values.
    pub fn with_random_array<R: Rng + ?Sized>(
        rng: &mut R,
        algorithm: AlgorithmId,
        size: usize,
    ) -> Result<Self> {
        let array = generate_random_array_with(rng, size)?;
        Ok(Self::new(algorithm, array))
    }

    pub fn algorithm(&self) -> AlgorithmId {
        self.algorithm
    }

    pub fn array(&self) -> &[i32] {
        &self.array
    }

    pub fn array_size(&self) -> usize {
        self.array_size
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn speed(&self) -> Speed {
        self.speed
    }

    pub fn stats(&self) -> PlaybackStats {
        self.stats
    }

    /// Index of the step currently shown.
    pub fn current_index(&self) -> usize {
        self.current
    }

    /// Number of steps in the active run (0 when none is computed).
    pub fn total_steps(&self) -> usize {
        self.steps.len()
    }

    /// Last few step descriptions, oldest first.
    pub fn history(&self) -> impl Iterator<Item = &str> {
        self.history.iter().map(String::as_str)
    }

    pub fn is_playing(&self) -> bool {
        self.state == PlaybackState::Playing
    }

    /// Whether a run has been computed for the current inputs.
    pub fn has_run(&self) -> bool {
        !self.steps.is_empty()
    }

    /// Delay before the next auto-advance at the configured speed.
    pub fn step_delay(&self) -> Duration {
        self.speed.step_delay()
    }

    pub fn set_speed(&mut self, speed: Speed) {
        self.speed = speed;
    }

    /// Draw a new array of the configured size and discard the run.
    ///
    /// A size outside the generator's range, as left by an explicit array
    /// passed to [`Playback::new`], is clamped into it.
    pub fn generate_array<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.array_size = self.array_size.clamp(MIN_ARRAY_SIZE, MAX_ARRAY_SIZE);
        self.array = random_values(rng, self.array_size);
        self.reset();
    }

    /// Change the array size and draw a new array of that size.
    ///
    /// Out-of-range sizes are rejected and leave the session untouched.
    pub fn set_array_size<R: Rng + ?Sized>(&mut self, size: usize, rng: &mut R) -> Result<()> {
        let array = generate_random_array_with(rng, size)?;
        self.array_size = size;
        self.array = array;
        self.reset();
        Ok(())
    }

    /// Switch algorithm, keeping the array and discarding the run.
    pub fn select_algorithm(&mut self, algorithm: AlgorithmId) {
        self.algorithm = algorithm;
        self.reset();
    }

    /// Compute the run for the current array and algorithm if missing.
    pub fn prepare(&mut self) {
        if self.steps.is_empty() {
            self.steps = generate_steps(self.algorithm, &self.array);
            self.current = 0;
            tracing::debug!(
                algorithm = %self.algorithm,
                size = self.array.len(),
                steps = self.steps.len(),
                "prepared run"
            );
        }
        if self.state == PlaybackState::Idle {
            self.state = PlaybackState::Ready;
        }
    }

    /// Start or resume playback.
    ///
    /// The start instant is only recorded on a fresh start; resuming keeps
    /// the original one. Starting a completed run replays it from the top.
    pub fn start(&mut self, now: Instant) {
        match self.state {
            PlaybackState::Playing => return,
            PlaybackState::Completed => {
                self.current = 0;
                self.stats = PlaybackStats::default();
                self.history.clear();
                self.started_at = None;
            }
            PlaybackState::Idle | PlaybackState::Ready | PlaybackState::Paused => self.prepare(),
        }

        if self.started_at.is_none() {
            self.started_at = Some(now);
        }

        if self.can_advance() {
            self.state = PlaybackState::Playing;
        } else {
            self.finish();
        }
    }

    /// Pause playback. No-op unless playing.
    pub fn pause(&mut self) {
        if self.state == PlaybackState::Playing {
            self.state = PlaybackState::Paused;
        }
    }

    /// Stop playback and reset with a fresh random array. Valid from every
    /// state.
    pub fn stop<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.generate_array(rng);
    }

    /// Manually advance one step. Ignored while playing.
    ///
    /// Computes the run first when none exists yet.
    pub fn step_forward(&mut self) -> Option<&Step> {
        if self.is_playing() {
            return None;
        }
        self.prepare();
        self.advance()
    }

    /// Whether a manual step is currently possible.
    pub fn can_step_forward(&self) -> bool {
        if self.is_playing() {
            return false;
        }
        if self.steps.is_empty() {
            // Every algorithm records at least one comparison for n >= 2
            self.array.len() > 1
        } else {
            self.can_advance()
        }
    }

    /// Move to the next step and fold it into the statistics.
    ///
    /// Shared by manual stepping and auto-advance. Reaching the last step
    /// completes the run.
    pub fn advance(&mut self) -> Option<&Step> {
        if !self.can_advance() {
            return None;
        }
        self.current += 1;

        let step = &self.steps[self.current];
        let is_comparison = step.is_comparison();
        let accesses = step.array_accesses() as u64;
        let action = step.action.clone();

        if self.history.len() == HISTORY_LEN {
            self.history.pop_front();
        }
        self.history.push_back(action);

        if is_comparison {
            self.stats.comparisons += 1;
        }
        self.stats.array_accesses += accesses;
        self.stats.progress = self.progress_percent();

        if !self.can_advance() {
            self.finish();
        } else if self.state != PlaybackState::Playing {
            self.state = PlaybackState::Paused;
        }

        tracing::trace!(index = self.current, "advanced");
        self.steps.get(self.current)
    }

    /// Recompute elapsed time while playing.
    pub fn refresh_elapsed(&mut self, now: Instant) {
        if !self.is_playing() {
            return;
        }
        if let Some(started) = self.started_at {
            self.stats.elapsed_secs = now.saturating_duration_since(started).as_secs_f64();
        }
    }

    /// Step at the current index, if a run exists.
    pub fn current_step(&self) -> Option<&Step> {
        self.steps.get(self.current)
    }

    /// Current visual state: the current step, or the raw array when no
    /// run has been computed.
    pub fn view(&self) -> Step {
        self.current_step().cloned().unwrap_or_else(|| Step {
            array: self.array.clone(),
            comparing: Vec::new(),
            swapping: Vec::new(),
            sorted: BTreeSet::new(),
            action: READY_ACTION.to_string(),
            kind: StepKind::Note,
        })
    }

    fn can_advance(&self) -> bool {
        self.current + 1 < self.steps.len()
    }

    fn progress_percent(&self) -> u8 {
        let last = self.steps.len().saturating_sub(1);
        if last == 0 {
            return 100;
        }
        (self.current as f64 / last as f64 * 100.0).round() as u8
    }

    fn finish(&mut self) {
        self.stats.progress = self.progress_percent();
        self.state = PlaybackState::Completed;
        tracing::debug!(algorithm = %self.algorithm, steps = self.steps.len(), "run completed");
    }

    fn reset(&mut self) {
        self.steps.clear();
        self.current = 0;
        self.state = PlaybackState::Idle;
        self.stats = PlaybackStats::default();
        self.history.clear();
        self.started_at = None;
    }
}

/// Playback status for sending to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaybackStatus {
    pub state: PlaybackState,
    pub algorithm: AlgorithmId,
    pub array_size: usize,
    pub speed: Speed,
    pub current_step: usize,
    pub total_steps: usize,
    pub stats: PlaybackStats,
    pub history: Vec<String>,
    pub can_step_forward: bool,
}

impl From<&Playback> for PlaybackStatus {
    fn from(playback: &Playback) -> Self {
        Self {
            state: playback.state,
            algorithm: playback.algorithm,
            array_size: playback.array_size,
            speed: playback.speed,
            current_step: playback.current,
            total_steps: playback.total_steps(),
            stats: playback.stats,
            history: playback.history.iter().cloned().collect(),
            can_step_forward: playback.can_step_forward(),
        }
    }
}
