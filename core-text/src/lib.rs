//! # Text Segmentation Module
//!
//! Turns raw prose into the fixed-size word groups shown during playback.
//!
//! ## Overview
//!
//! This module handles:
//! - Whitespace tokenization (any Unicode whitespace, runs collapsed)
//! - Grouping tokens into [`Block`]s of a configured size
//! - Derived [`ContentStats`] for the presentation layer
//!
//! Everything here is pure and synchronous. Re-segmenting is always a full
//! pass over the text; callers hold on to the source text and call
//! [`segment`] again whenever the block size changes.
//!
//! ```rust
//! use core_text::segment;
//!
//! let blocks = segment("the quick brown fox jumps over the lazy dog", 3);
//! let shown: Vec<&str> = blocks.iter().map(|b| b.as_str()).collect();
//! assert_eq!(shown, ["the quick brown", "fox jumps over", "the lazy dog"]);
//! ```

pub mod segmenter;
pub mod stats;

pub use segmenter::{normalize_whitespace, segment, tokenize, Block, BlockSequence};
pub use stats::ContentStats;
