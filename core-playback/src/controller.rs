//! # Playback Controller
//!
//! Timed state machine that walks a [`BlockSequence`] at a fixed rate.
//!
//! ## States
//!
//! - `Idle`: no sequence, or an empty one
//! - `Paused`: non-empty sequence, position held
//! - `Playing`: non-empty sequence, one recurring tick active
//!
//! ## Ticking
//!
//! `play()` spawns a single task that waits one interval (`1000 / rate` ms)
//! and then advances the position, repeating until it reaches the last block
//! or is cancelled. Each armed tick owns a [`CancellationToken`] (held as a
//! [`DropGuard`]) and a generation number. Every transition that stops or
//! re-arms the tick bumps the generation and drops the guard. The tick
//! re-checks its generation under the state lock before touching anything,
//! so a tick that already woke up can never act after the transition that
//! cancelled it.
//!
//! ## Usage
//!
//! ```ignore
//! use core_playback::PlaybackController;
//! use core_text::segment;
//!
//! let controller = PlaybackController::new(5);
//! controller.load_sequence(segment("the quick brown fox", 1));
//! controller.play();
//! // 200 ms later
//! assert_eq!(controller.current_index(), Some(1));
//! ```

use std::sync::{Arc, Weak};

use core_async::sync::{CancellationToken, DropGuard};
use core_async::task;
use core_async::time::{self, Duration};
use core_runtime::config::clamp_rate;
use core_runtime::events::{CoreEvent, EventBus, PlaybackEvent};
use core_text::BlockSequence;
use parking_lot::Mutex;
use tracing::{debug, trace, warn};

use crate::state::{PlaybackSnapshot, PlaybackStatus};

type SharedState = Arc<Mutex<ControllerState>>;

/// Owns the playback position and the recurring tick.
///
/// Commands are synchronous and atomic with respect to the tick. Dropping
/// the controller cancels any pending tick.
pub struct PlaybackController {
    state: SharedState,
}

struct ControllerState {
    sequence: Option<Arc<BlockSequence>>,
    index: usize,
    is_playing: bool,
    rate: u32,
    generation: u64,
    tick: Option<DropGuard>,
    events: Option<EventBus>,
}

impl PlaybackController {
    /// Create an idle controller. `rate` is clamped to 1..=10.
    pub fn new(rate: u32) -> Self {
        Self::build(rate, None)
    }

    /// Create an idle controller that publishes [`PlaybackEvent`]s on `events`.
    pub fn with_events(rate: u32, events: EventBus) -> Self {
        Self::build(rate, Some(events))
    }

    fn build(rate: u32, events: Option<EventBus>) -> Self {
        Self {
            state: Arc::new(Mutex::new(ControllerState {
                sequence: None,
                index: 0,
                is_playing: false,
                rate: clamp_rate(rate),
                generation: 0,
                tick: None,
                events,
            })),
        }
    }

    // ========================================================================
    // Commands
    // ========================================================================

    /// Replace the sequence and reset to its first block, paused.
    ///
    /// An empty sequence leaves the controller idle.
    pub fn load_sequence(&self, sequence: impl Into<Arc<BlockSequence>>) {
        let sequence = sequence.into();
        let mut state = self.state.lock();
        state.stop_tick();
        state.is_playing = false;
        state.index = 0;
        let total_blocks = sequence.len();
        state.sequence = Some(sequence);

        debug!(total_blocks, "Sequence loaded");
        state.emit(PlaybackEvent::SequenceLoaded { total_blocks });
    }

    /// Start advancing from the current block.
    ///
    /// No-op when idle, already playing, or already on the last block.
    pub fn play(&self) {
        let mut state = self.state.lock();
        state.play(Arc::downgrade(&self.state));
    }

    /// Stop advancing. No-op unless playing.
    pub fn pause(&self) {
        self.state.lock().pause();
    }

    /// `pause()` when playing, `play()` otherwise.
    pub fn toggle(&self) {
        let mut state = self.state.lock();
        if state.is_playing {
            state.pause();
        } else {
            state.play(Arc::downgrade(&self.state));
        }
    }

    /// Jump to `index`, clamped to the sequence. Play state is unchanged.
    /// No-op when idle.
    pub fn seek_to(&self, index: usize) {
        self.state.lock().seek_to(index);
    }

    /// Move one block back. No-op on the first block or when idle.
    pub fn step_back(&self) {
        let mut state = self.state.lock();
        if let Some(previous) = state.index.checked_sub(1) {
            state.seek_to(previous);
        }
    }

    /// Pause and return to the first block. Stays idle without content.
    pub fn reset(&self) {
        let mut state = self.state.lock();
        if state.total_blocks() == 0 {
            return;
        }
        state.pause();
        state.seek_to(0);
    }

    /// Change the display rate (clamped to 1..=10).
    ///
    /// While playing, the tick is cancelled and re-armed at the new interval;
    /// time already elapsed in the old interval is discarded.
    pub fn set_rate(&self, rate: u32) {
        let rate = clamp_rate(rate);
        let mut state = self.state.lock();
        if state.rate == rate {
            return;
        }
        state.rate = rate;
        debug!(rate, "Rate changed");
        state.emit(PlaybackEvent::RateChanged { rate });

        if state.is_playing {
            state.arm_tick(Arc::downgrade(&self.state));
        }
    }

    /// Drop the sequence and return to idle.
    pub fn unload(&self) {
        let mut state = self.state.lock();
        state.pause();
        state.sequence = None;
        state.index = 0;
        debug!("Sequence unloaded");
    }

    // ========================================================================
    // Read model
    // ========================================================================

    pub fn status(&self) -> PlaybackStatus {
        self.state.lock().status()
    }

    pub fn is_playing(&self) -> bool {
        self.state.lock().is_playing
    }

    /// `None` while idle.
    pub fn current_index(&self) -> Option<usize> {
        self.state.lock().current_index()
    }

    pub fn current_block(&self) -> Option<String> {
        self.state.lock().current_block()
    }

    pub fn total_blocks(&self) -> usize {
        self.state.lock().total_blocks()
    }

    pub fn rate(&self) -> u32 {
        self.state.lock().rate
    }

    /// The loaded sequence, if any.
    pub fn sequence(&self) -> Option<Arc<BlockSequence>> {
        self.state.lock().sequence.clone()
    }

    /// `(current_index + 1) / total_blocks`, or 0 while idle.
    pub fn progress_fraction(&self) -> f64 {
        self.snapshot().progress_fraction()
    }

    /// Time between two blocks at the current rate.
    pub fn tick_interval(&self) -> Duration {
        tick_interval(self.state.lock().rate)
    }

    /// Estimated time until the last block is shown at the current rate.
    pub fn remaining_time(&self) -> Duration {
        let state = self.state.lock();
        let remaining = state
            .current_index()
            .map_or(0, |index| state.total_blocks() - 1 - index);
        tick_interval(state.rate) * remaining as u32
    }

    pub fn snapshot(&self) -> PlaybackSnapshot {
        let state = self.state.lock();
        PlaybackSnapshot {
            status: state.status(),
            current_index: state.current_index(),
            total_blocks: state.total_blocks(),
            is_playing: state.is_playing,
            rate: state.rate,
            current_block: state.current_block(),
        }
    }
}

impl Default for PlaybackController {
    fn default() -> Self {
        Self::new(core_runtime::config::ReaderConfig::default().rate)
    }
}

impl Drop for PlaybackController {
    fn drop(&mut self) {
        self.state.lock().stop_tick();
    }
}

impl std::fmt::Debug for PlaybackController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.lock();
        f.debug_struct("PlaybackController")
            .field("status", &state.status())
            .field("index", &state.index)
            .field("total_blocks", &state.total_blocks())
            .field("rate", &state.rate)
            .finish()
    }
}

fn tick_interval(rate: u32) -> Duration {
    Duration::from_millis(1000 / u64::from(clamp_rate(rate)))
}

impl ControllerState {
    fn total_blocks(&self) -> usize {
        self.sequence.as_ref().map_or(0, |seq| seq.len())
    }

    fn status(&self) -> PlaybackStatus {
        match (self.total_blocks(), self.is_playing) {
            (0, _) => PlaybackStatus::Idle,
            (_, true) => PlaybackStatus::Playing,
            (_, false) => PlaybackStatus::Paused,
        }
    }

    fn current_index(&self) -> Option<usize> {
        (self.total_blocks() > 0).then_some(self.index)
    }

    fn current_block(&self) -> Option<String> {
        self.sequence
            .as_ref()
            .and_then(|seq| seq.get(self.index))
            .map(|block| block.as_str().to_string())
    }

    fn emit(&self, event: PlaybackEvent) {
        if let Some(events) = &self.events {
            events.emit(CoreEvent::Playback(event)).ok();
        }
    }

    fn play(&mut self, handle: Weak<Mutex<ControllerState>>) {
        if self.is_playing {
            return;
        }
        let total_blocks = self.total_blocks();
        if total_blocks == 0 {
            trace!("Play ignored: nothing loaded");
            return;
        }
        if self.index + 1 >= total_blocks {
            debug!(index = self.index, "Play ignored: already on the last block");
            return;
        }
        if !task::has_runtime() {
            warn!("Play ignored: no async runtime to drive the tick");
            return;
        }

        self.is_playing = true;
        self.arm_tick(handle);
        debug!(index = self.index, rate = self.rate, "Playback started");
        self.emit(PlaybackEvent::Started { index: self.index });
    }

    fn pause(&mut self) {
        if !self.is_playing {
            return;
        }
        self.stop_tick();
        self.is_playing = false;
        debug!(index = self.index, "Playback paused");
        self.emit(PlaybackEvent::Paused { index: self.index });
    }

    fn seek_to(&mut self, index: usize) {
        let total_blocks = self.total_blocks();
        if total_blocks == 0 {
            return;
        }
        let index = index.min(total_blocks - 1);
        if index == self.index {
            return;
        }
        self.index = index;
        self.emit(PlaybackEvent::PositionChanged {
            index,
            total_blocks,
        });
    }

    /// Invalidate the current tick, if any.
    fn stop_tick(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        self.tick = None;
    }

    /// Replace the current tick with a fresh one at the current rate.
    fn arm_tick(&mut self, handle: Weak<Mutex<ControllerState>>) {
        self.stop_tick();
        let token = CancellationToken::new();
        let generation = self.generation;
        let period = tick_interval(self.rate);

        task::spawn(run_tick(handle, generation, period, token.clone()));
        self.tick = Some(token.drop_guard());
        trace!(generation, period_ms = period.as_millis() as u64, "Tick armed");
    }

    /// Advance one block. Returns `false` when the tick should stop.
    fn advance(&mut self, generation: u64) -> bool {
        if generation != self.generation || !self.is_playing {
            return false;
        }
        let total_blocks = self.total_blocks();
        if self.index + 1 >= total_blocks {
            self.stop_tick();
            self.is_playing = false;
            debug!(index = self.index, "Playback finished");
            self.emit(PlaybackEvent::Finished { index: self.index });
            return false;
        }

        self.index += 1;
        trace!(index = self.index, "Tick");
        self.emit(PlaybackEvent::PositionChanged {
            index: self.index,
            total_blocks,
        });
        true
    }
}

async fn run_tick(
    handle: Weak<Mutex<ControllerState>>,
    generation: u64,
    period: Duration,
    token: CancellationToken,
) {
    let mut ticks = time::delayed_interval(period);
    loop {
        core_async::select! {
            _ = token.cancelled() => break,
            _ = ticks.tick() => {}
        }

        let Some(state) = handle.upgrade() else {
            break;
        };
        let keep_going = state.lock().advance(generation);
        if !keep_going {
            break;
        }
    }
    trace!(generation, "Tick stopped");
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_text::segment;

    fn loaded(text: &str, block_size: usize) -> PlaybackController {
        let controller = PlaybackController::new(5);
        controller.load_sequence(segment(text, block_size));
        controller
    }

    #[test]
    fn test_new_is_idle() {
        let controller = PlaybackController::new(0);
        assert_eq!(controller.status(), PlaybackStatus::Idle);
        assert_eq!(controller.current_index(), None);
        assert_eq!(controller.current_block(), None);
        assert_eq!(controller.rate(), 1);
        assert_eq!(controller.progress_fraction(), 0.0);
    }

    #[test]
    fn test_load_empty_sequence_stays_idle() {
        let controller = loaded("   ", 3);
        assert_eq!(controller.status(), PlaybackStatus::Idle);
        assert_eq!(controller.total_blocks(), 0);
        controller.play();
        assert!(!controller.is_playing());
    }

    #[test]
    fn test_play_without_runtime_stays_paused() {
        let controller = loaded("a b c", 1);
        controller.play();
        assert_eq!(controller.status(), PlaybackStatus::Paused);
    }

    #[test]
    fn test_navigation_while_paused() {
        let controller = loaded("a b c d e", 1);
        controller.seek_to(3);
        assert_eq!(controller.current_block().as_deref(), Some("d"));

        controller.seek_to(99);
        assert_eq!(controller.current_index(), Some(4));

        controller.step_back();
        controller.step_back();
        assert_eq!(controller.current_index(), Some(2));

        controller.reset();
        assert_eq!(controller.current_index(), Some(0));
        controller.step_back();
        assert_eq!(controller.current_index(), Some(0));
    }

    #[test]
    fn test_rate_and_timing_model() {
        let controller = loaded("a b c d e", 1);
        assert_eq!(controller.tick_interval(), Duration::from_millis(200));
        assert_eq!(controller.remaining_time(), Duration::from_millis(800));

        controller.set_rate(42);
        assert_eq!(controller.rate(), 10);
        controller.seek_to(3);
        assert_eq!(controller.remaining_time(), Duration::from_millis(100));
    }

    #[test]
    fn test_unload() {
        let controller = loaded("a b c", 1);
        controller.seek_to(2);
        controller.unload();
        assert_eq!(controller.status(), PlaybackStatus::Idle);
        assert!(controller.sequence().is_none());
        controller.reset();
        assert_eq!(controller.status(), PlaybackStatus::Idle);
    }
}
