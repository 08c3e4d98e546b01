use anyhow::ensure;
use serde::{Deserialize, Serialize};

use super::*;

/// Immutable window geometry: frame length and window length, both in frame
/// sequence units.
///
/// A *tumbling* window has `window_length == frame_length`; a *sliding*
/// window covers `window_length / frame_length` consecutive frames and
/// advances one frame at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowDefinition {
    frame_length: i64,
    window_length: i64,
}

impl WindowDefinition {
    /// Create a sliding window definition.
    ///
    /// `window_length` must be a positive integer multiple of `frame_length`.
    pub fn sliding(frame_length: i64, window_length: i64) -> Result<Self> {
        ensure!(frame_length > 0, "frame length must be positive");
        ensure!(window_length > 0, "window length must be positive");
        ensure!(
            window_length % frame_length == 0,
            "window length {} is not a multiple of frame length {}",
            window_length,
            frame_length
        );
        Ok(Self {
            frame_length,
            window_length,
        })
    }

    /// Create a tumbling window definition (window length == frame length).
    pub fn tumbling(frame_length: i64) -> Result<Self> {
        Self::sliding(frame_length, frame_length)
    }

    pub fn frame_length(&self) -> i64 {
        self.frame_length
    }

    pub fn window_length(&self) -> i64 {
        self.window_length
    }

    /// Whether windows coincide with frames (no overlap).
    pub fn is_tumbling(&self) -> bool {
        self.window_length == self.frame_length
    }

    /// Number of frames covered by one window.
    pub fn frames_per_window(&self) -> i64 {
        self.window_length / self.frame_length
    }

    /// The smallest frame sequence strictly greater than `seq` and aligned to
    /// the frame grid. Floor division, so negative sequences align correctly.
    pub fn higher_frame_seq(&self, seq: FrameSeq) -> FrameSeq {
        (seq.div_euclid(self.frame_length) + 1) * self.frame_length
    }
}

impl std::fmt::Display for WindowDefinition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "WindowDefinition(frame={}, window={})",
            self.frame_length, self.window_length
        )
    }
}
