// SPDX-License-Identifier: MPL-2.0
//! Frame sequencer sub-component: current frame, direction and autoplay.
//!
//! The sequencer never owns a timer itself. While [`State::is_playing`] is true
//! the orchestrator exposes an `every(interval)` subscription whose ticks come
//! back here as [`Message::Tick`]; dropping the subscription is what cancels
//! autoplay.

use crate::config::{
    DEFAULT_FAST_INTERVAL_MS, DEFAULT_FEW_FRAMES_THRESHOLD, DEFAULT_MANY_FRAMES_THRESHOLD,
    DEFAULT_SLOW_INTERVAL_MS,
};
use crate::ui::state::{Direction, FrameCursor};
use std::time::Duration;

/// Per-frame autoplay interval policy.
///
/// Sparse captures play slowly, dense ones quickly, and in between the
/// interval is chosen so one revolution takes a comparable amount of time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AutoplayCadence {
    slow: Duration,
    fast: Duration,
    few_frames: usize,
    many_frames: usize,
}

impl AutoplayCadence {
    /// Creates a cadence; swapped bounds are put back in order.
    #[must_use]
    pub fn new(slow: Duration, fast: Duration, few_frames: usize, many_frames: usize) -> Self {
        let (fast, slow) = if fast <= slow { (fast, slow) } else { (slow, fast) };
        let (few_frames, many_frames) = if few_frames <= many_frames {
            (few_frames, many_frames)
        } else {
            (many_frames, few_frames)
        };
        Self {
            slow,
            fast,
            few_frames,
            many_frames,
        }
    }

    #[must_use]
    pub fn slow(self) -> Duration {
        self.slow
    }

    #[must_use]
    pub fn fast(self) -> Duration {
        self.fast
    }

    /// Interval between two autoplay ticks for a set of `frame_count` frames.
    #[must_use]
    pub fn interval_for(self, frame_count: usize) -> Duration {
        if frame_count <= self.few_frames {
            return self.slow;
        }
        if frame_count >= self.many_frames {
            return self.fast;
        }

        // Strictly between the thresholds, so the span is non-zero.
        let span = (self.many_frames - self.few_frames) as f64;
        let t = (frame_count - self.few_frames) as f64 / span;

        let sparse_revolution = self.slow.as_secs_f64() * self.few_frames as f64;
        let dense_revolution = self.fast.as_secs_f64() * self.many_frames as f64;
        let revolution = sparse_revolution + (dense_revolution - sparse_revolution) * t;

        let per_frame = Duration::from_secs_f64(revolution / frame_count as f64);
        per_frame.clamp(self.fast, self.slow)
    }
}

impl Default for AutoplayCadence {
    fn default() -> Self {
        Self::new(
            Duration::from_millis(DEFAULT_SLOW_INTERVAL_MS),
            Duration::from_millis(DEFAULT_FAST_INTERVAL_MS),
            DEFAULT_FEW_FRAMES_THRESHOLD,
            DEFAULT_MANY_FRAMES_THRESHOLD,
        )
    }
}

/// Autoplay state machine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Playback {
    #[default]
    Idle,
    Playing,
}

/// Sequencer state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct State {
    cursor: FrameCursor,
    direction: Direction,
    playback: Playback,
}

/// Messages for the sequencer sub-component.
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    /// Start or stop autoplay.
    ToggleAutoplay,
    /// Flip the autoplay direction.
    ToggleDirection,
    /// One autoplay period elapsed.
    Tick,
    /// Move by a signed number of frames.
    Step(i64),
    /// Jump to an index (wrapped into range).
    SetFrame(usize),
    /// Stop autoplay without touching the frame.
    Stop,
    /// Back to frame 0, stopped. Direction is kept.
    Reset,
}

/// Effects produced by the sequencer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    FrameChanged(usize),
    PlaybackChanged(bool),
    DirectionChanged(Direction),
}

impl State {
    /// Creates a stopped sequencer over `frame_count` frames starting at
    /// `index` (clamped).
    #[must_use]
    pub fn new(frame_count: usize, index: usize, direction: Direction) -> Self {
        Self {
            cursor: FrameCursor::clamped(index, frame_count),
            direction,
            playback: Playback::Idle,
        }
    }

    /// Handle a sequencer message.
    #[allow(clippy::needless_pass_by_value)]
    pub fn handle(&mut self, msg: Message) -> Effect {
        match msg {
            Message::ToggleAutoplay => match self.playback {
                Playback::Playing => {
                    self.playback = Playback::Idle;
                    Effect::PlaybackChanged(false)
                }
                Playback::Idle if self.cursor.len() > 1 => {
                    self.playback = Playback::Playing;
                    Effect::PlaybackChanged(true)
                }
                Playback::Idle => Effect::None,
            },
            Message::ToggleDirection => {
                self.direction = self.direction.flipped();
                Effect::DirectionChanged(self.direction)
            }
            Message::Tick => {
                // A late tick after a stop must not move the frame.
                if self.playback != Playback::Playing || self.cursor.len() <= 1 {
                    self.playback = Playback::Idle;
                    return Effect::None;
                }
                self.move_by(self.direction.sign())
            }
            Message::Step(delta) => self.move_by(delta),
            Message::SetFrame(index) => {
                let before = self.cursor.index();
                self.cursor.set(index);
                self.frame_effect(before)
            }
            Message::Stop => self.stop(),
            Message::Reset => {
                let before = self.cursor.index();
                let stopped = self.stop();
                self.cursor.reset();
                match self.frame_effect(before) {
                    Effect::None => stopped,
                    changed => changed,
                }
            }
        }
    }

    fn move_by(&mut self, delta: i64) -> Effect {
        let before = self.cursor.index();
        self.cursor.step(delta);
        self.frame_effect(before)
    }

    fn stop(&mut self) -> Effect {
        if self.playback == Playback::Playing {
            self.playback = Playback::Idle;
            Effect::PlaybackChanged(false)
        } else {
            Effect::None
        }
    }

    fn frame_effect(&self, before: usize) -> Effect {
        if self.cursor.index() == before {
            Effect::None
        } else {
            Effect::FrameChanged(self.cursor.index())
        }
    }

    #[must_use]
    pub fn index(&self) -> usize {
        self.cursor.index()
    }

    #[must_use]
    pub fn frame_count(&self) -> usize {
        self.cursor.len()
    }

    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    #[must_use]
    pub fn playback(&self) -> Playback {
        self.playback
    }

    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.playback == Playback::Playing
    }

    /// Fraction of the set shown so far, `(index + 1) / len`.
    #[must_use]
    pub fn progress(&self) -> f32 {
        self.cursor.progress()
    }
}
