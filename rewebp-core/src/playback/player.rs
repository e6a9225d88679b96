use std::sync::{Arc, Mutex, Weak};
use std::time::Duration;

use crate::playback::timer::ScheduledTask;

/// Floor for per-frame delays, matching the shortest interval display
/// refresh can honor.
const MIN_FRAME_DELAY_MS: u32 = 16;

/// Delay before the next displayed frame: the frame's duration (floored at
/// 16 ms) divided by the playback-rate multiplier.
pub fn frame_delay(duration_ms: u32, rate: f64) -> Duration {
    let rate = if rate > 0.0 { rate } else { 1.0 };
    let ms = f64::from(duration_ms.max(MIN_FRAME_DELAY_MS)) / rate;
    Duration::from_secs_f64(ms / 1000.0)
}

/// Next frame index, wrapping at the end of the sequence.
pub fn advance(index: usize, len: usize) -> usize {
    if len == 0 { 0 } else { (index + 1) % len }
}

/// Previous frame index, wrapping at the start of the sequence.
pub fn retreat(index: usize, len: usize) -> usize {
    if len == 0 { 0 } else { (index + len - 1) % len }
}

type OnFrame = dyn Fn(usize) + Send + Sync;

/// Timer-driven playback over a frame sequence.
///
/// One cancellable [`ScheduledTask`] is active at a time: after each
/// displayed frame the player re-arms itself with a delay derived from that
/// frame's duration and the playback rate. Every state change (pause, seek,
/// step, rate change) cancels the active timer and, where playback
/// continues, arms a fresh one. The frame callback receives the index of
/// each newly displayed frame.
pub struct Player {
    inner: Arc<Mutex<PlayerInner>>,
    on_frame: Arc<OnFrame>,
}

#[derive(Debug)]
struct PlayerInner {
    durations_ms: Vec<u32>,
    index: usize,
    rate: f64,
    playing: bool,
    // Bumped on every state change; stale timer callbacks check it and bail
    // instead of re-arming.
    epoch: u64,
    timer: Option<ScheduledTask>,
}

impl Player {
    /// Build a paused player over the given per-frame durations.
    pub fn new<F>(durations_ms: Vec<u32>, on_frame: F) -> Self
    where
        F: Fn(usize) + Send + Sync + 'static,
    {
        Self {
            inner: Arc::new(Mutex::new(PlayerInner {
                durations_ms,
                index: 0,
                rate: 1.0,
                playing: false,
                epoch: 0,
                timer: None,
            })),
            on_frame: Arc::new(on_frame),
        }
    }

    /// Start (or restart) timed playback. Single-frame sequences stay still.
    pub fn play(&self) {
        {
            let mut state = self.lock();
            state.playing = true;
            state.epoch += 1;
        }
        Self::arm(&self.inner, &self.on_frame);
    }

    /// Stop playback, cancelling the active timer.
    pub fn pause(&self) {
        let mut state = self.lock();
        state.playing = false;
        state.epoch += 1;
        state.timer = None;
    }

    /// Flip between playing and paused; returns whether playback is now on.
    pub fn toggle(&self) -> bool {
        let playing = self.is_playing();
        if playing { self.pause() } else { self.play() }
        !playing
    }

    /// Pause and jump to `index` (clamped into range), reporting the frame.
    pub fn seek(&self, index: usize) {
        let shown = {
            let mut state = self.lock();
            state.playing = false;
            state.epoch += 1;
            state.timer = None;
            state.index = index.min(state.durations_ms.len().saturating_sub(1));
            state.index
        };
        (self.on_frame)(shown);
    }

    /// Pause and show the next frame.
    pub fn step_forward(&self) {
        self.step(advance);
    }

    /// Pause and show the previous frame.
    pub fn step_back(&self) {
        self.step(retreat);
    }

    /// Change the playback-rate multiplier and resume playback.
    pub fn set_rate(&self, rate: f64) {
        {
            let mut state = self.lock();
            state.rate = if rate > 0.0 { rate } else { 1.0 };
            state.playing = true;
            state.epoch += 1;
        }
        Self::arm(&self.inner, &self.on_frame);
    }

    /// Index of the currently displayed frame.
    pub fn current_index(&self) -> usize {
        self.lock().index
    }

    /// Whether timed playback is active.
    pub fn is_playing(&self) -> bool {
        self.lock().playing
    }

    /// Current playback-rate multiplier.
    pub fn rate(&self) -> f64 {
        self.lock().rate
    }

    fn step(&self, move_index: fn(usize, usize) -> usize) {
        let shown = {
            let mut state = self.lock();
            state.playing = false;
            state.epoch += 1;
            state.timer = None;
            state.index = move_index(state.index, state.durations_ms.len());
            state.index
        };
        (self.on_frame)(shown);
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, PlayerInner> {
        self.inner.lock().expect("player state poisoned")
    }

    fn arm(inner: &Arc<Mutex<PlayerInner>>, on_frame: &Arc<OnFrame>) {
        let mut state = inner.lock().expect("player state poisoned");
        state.timer = None;
        if !state.playing || state.durations_ms.len() <= 1 {
            return;
        }
        let delay = frame_delay(state.durations_ms[state.index], state.rate);
        let epoch = state.epoch;
        let weak: Weak<Mutex<PlayerInner>> = Arc::downgrade(inner);
        let callback = Arc::clone(on_frame);
        state.timer = Some(ScheduledTask::spawn(delay, move || {
            let Some(inner) = weak.upgrade() else { return };
            let shown = {
                let mut state = inner.lock().expect("player state poisoned");
                if state.epoch != epoch || !state.playing {
                    return;
                }
                state.index = advance(state.index, state.durations_ms.len());
                state.index
            };
            callback(shown);
            Self::arm(&inner, &callback);
        }));
    }
}

impl std::fmt::Debug for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.lock();
        f.debug_struct("Player")
            .field("frames", &state.durations_ms.len())
            .field("index", &state.index)
            .field("rate", &state.rate)
            .field("playing", &state.playing)
            .finish()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/playback/player.rs"]
mod tests;
