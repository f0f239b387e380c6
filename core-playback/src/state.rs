//! Playback status and read-model snapshot.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Coarse state of the playback controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlaybackStatus {
    /// No sequence loaded, or the loaded sequence is empty.
    Idle,
    /// Non-empty sequence, not advancing.
    Paused,
    /// Non-empty sequence, one recurring tick active.
    Playing,
}

impl PlaybackStatus {
    /// Returns `true` if a sequence with at least one block is loaded.
    pub fn has_content(&self) -> bool {
        !matches!(self, Self::Idle)
    }
}

impl fmt::Display for PlaybackStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::Paused => "paused",
            Self::Playing => "playing",
        };
        f.write_str(name)
    }
}

/// Consistent point-in-time view of the controller.
///
/// Taken under the controller lock, so every field describes the same
/// moment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaybackSnapshot {
    pub status: PlaybackStatus,
    /// `None` while idle.
    pub current_index: Option<usize>,
    pub total_blocks: usize,
    pub is_playing: bool,
    /// Blocks per second.
    pub rate: u32,
    pub current_block: Option<String>,
}

impl PlaybackSnapshot {
    /// Fraction of the sequence shown so far: `(index + 1) / total`, or 0
    /// while idle.
    pub fn progress_fraction(&self) -> f64 {
        match self.current_index {
            Some(index) if self.total_blocks > 0 => {
                (index + 1) as f64 / self.total_blocks as f64
            }
            _ => 0.0,
        }
    }

    /// Returns `true` if the current block is the last one.
    pub fn is_at_end(&self) -> bool {
        self.current_index
            .is_some_and(|index| index + 1 == self.total_blocks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(current_index: Option<usize>, total_blocks: usize) -> PlaybackSnapshot {
        PlaybackSnapshot {
            status: if total_blocks == 0 {
                PlaybackStatus::Idle
            } else {
                PlaybackStatus::Paused
            },
            current_index,
            total_blocks,
            is_playing: false,
            rate: 3,
            current_block: None,
        }
    }

    #[test]
    fn test_progress_fraction() {
        assert_eq!(snapshot(None, 0).progress_fraction(), 0.0);
        assert_eq!(snapshot(Some(0), 4).progress_fraction(), 0.25);
        assert_eq!(snapshot(Some(3), 4).progress_fraction(), 1.0);
    }

    #[test]
    fn test_is_at_end() {
        assert!(!snapshot(None, 0).is_at_end());
        assert!(!snapshot(Some(1), 3).is_at_end());
        assert!(snapshot(Some(2), 3).is_at_end());
    }

    #[test]
    fn test_status_display() {
        assert_eq!(PlaybackStatus::Playing.to_string(), "playing");
        assert!(PlaybackStatus::Paused.has_content());
        assert!(!PlaybackStatus::Idle.has_content());
    }
}
