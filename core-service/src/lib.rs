//! Core service façade for the speed reader.
//!
//! [`ReaderService`] is the single entry point a host application talks to.
//! It wires a host-provided [`DocumentExtractor`](bridge_traits::DocumentExtractor)
//! (optional; pasted text needs none) to the segmenter in `core-text` and the
//! playback state machine in `core-playback`, and publishes every change on
//! an event bus.
//!
//! ```ignore
//! use core_service::ReaderService;
//! use core_runtime::config::ReaderConfig;
//!
//! let reader = ReaderService::new(ReaderConfig::default());
//! let report = reader.load_text("the quick brown fox jumps over the lazy dog", 0);
//! assert_eq!(report.stats.block_count, 3);
//! reader.play();
//! ```

pub mod error;
pub mod service;

pub use error::{ReaderError, Result};
pub use service::{ContentWarning, LoadReport, ReaderService, ReaderSnapshot};
