// SPDX-License-Identifier: MPL-2.0
//! Frame index arithmetic.
//!
//! All movement through a frame set is modular: stepping past either end
//! wraps to the other one, so the index is always valid for the frame count.

use serde::{Deserialize, Serialize};

/// Rotation direction used by autoplay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(into = "i8", try_from = "i8")]
pub enum Direction {
    #[default]
    Forward,
    Backward,
}

impl Direction {
    /// Returns `+1` or `-1`.
    #[must_use]
    pub fn sign(self) -> i64 {
        match self {
            Direction::Forward => 1,
            Direction::Backward => -1,
        }
    }

    #[must_use]
    pub fn flipped(self) -> Self {
        match self {
            Direction::Forward => Direction::Backward,
            Direction::Backward => Direction::Forward,
        }
    }

    /// Parses a persisted sign; anything other than ±1 is rejected.
    #[must_use]
    pub fn from_sign(sign: i8) -> Option<Self> {
        match sign {
            1 => Some(Direction::Forward),
            -1 => Some(Direction::Backward),
            _ => None,
        }
    }
}

impl From<Direction> for i8 {
    fn from(direction: Direction) -> Self {
        direction.sign() as i8
    }
}

impl TryFrom<i8> for Direction {
    type Error = String;

    fn try_from(value: i8) -> Result<Self, Self::Error> {
        Direction::from_sign(value).ok_or_else(|| format!("invalid direction: {value}"))
    }
}

/// Current position inside a frame set of `len` frames.
///
/// An empty cursor (`len == 0`) always reports index 0 and ignores movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameCursor {
    index: usize,
    len: usize,
}

impl FrameCursor {
    #[must_use]
    pub fn new(len: usize) -> Self {
        Self { index: 0, len }
    }

    /// Builds a cursor at `index`, clamped into `[0, len - 1]`.
    #[must_use]
    pub fn clamped(index: usize, len: usize) -> Self {
        Self {
            index: if len == 0 { 0 } else { index.min(len - 1) },
            len,
        }
    }

    #[must_use]
    pub fn index(self) -> usize {
        self.index
    }

    #[must_use]
    pub fn len(self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(self) -> bool {
        self.len == 0
    }

    /// Moves by `delta` frames with wrap-around.
    ///
    /// `index = ((index + delta) mod len + len) mod len`
    pub fn step(&mut self, delta: i64) {
        if self.len == 0 {
            return;
        }
        let len = self.len as i64;
        self.index = (self.index as i64 + delta).rem_euclid(len) as usize;
    }

    /// Jumps to `index`, wrapping values past the end.
    pub fn set(&mut self, index: usize) {
        if self.len == 0 {
            return;
        }
        self.index = index % self.len;
    }

    pub fn reset(&mut self) {
        self.index = 0;
    }

    /// Fraction of the revolution shown so far, `(index + 1) / len`.
    #[must_use]
    pub fn progress(self) -> f32 {
        if self.len == 0 {
            0.0
        } else {
            (self.index + 1) as f32 / self.len as f32
        }
    }
}
