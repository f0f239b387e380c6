//! Workspace umbrella crate.
//!
//! This crate exposes feature flags that map to the individual workspace
//! crates (`core-service`, `core-text`, `core-playback`). Host applications
//! can depend on `speedread-workspace` and enable the documented features
//! without wiring each crate individually.
//!
//! - `service` (default): the [`ReaderService`](core_service::ReaderService)
//!   façade with extraction, segmentation, playback and events.
//! - `segmenter`: only the pure text segmenter.
//! - `playback`: only the timed playback controller.

#[cfg(feature = "service")]
pub use core_service;

#[cfg(feature = "segmenter")]
pub use core_text;

#[cfg(feature = "playback")]
pub use core_playback;
