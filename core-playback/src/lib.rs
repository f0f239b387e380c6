//! # Playback Module
//!
//! Advances through a segmented text at a fixed number of blocks per second.
//!
//! ## Overview
//!
//! This module handles:
//! - The Idle / Paused / Playing state machine
//! - A single recurring tick per play-through, cancelled on every transition
//! - Navigation (seek, step back, reset) and live rate changes
//! - A consistent read model via [`PlaybackSnapshot`]
//!
//! Block size changes are not handled here: the caller re-segments and loads
//! the new sequence, which resets the position.

pub mod controller;
pub mod state;

pub use controller::PlaybackController;
pub use state::{PlaybackSnapshot, PlaybackStatus};
