//! # Core Runtime Module
//!
//! Foundational runtime infrastructure shared by the speed reader crates:
//! - Reader configuration with defaults, validation and clamping
//! - Event bus for content and playback notifications
//! - Logging and tracing bootstrap
//!
//! ## Overview
//!
//! Nothing in this crate knows how text is segmented or how playback is
//! timed. It defines the vocabulary (configuration ranges, event payloads)
//! and the plumbing (broadcast bus, tracing subscriber) that `core-text`,
//! `core-playback` and `core-service` build on.

pub mod config;
pub mod error;
pub mod events;
pub mod logging;

pub use error::{Error, Result};
