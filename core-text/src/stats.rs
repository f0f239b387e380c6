//! Derived, read-only statistics about loaded content.

use serde::{Deserialize, Serialize};

use crate::segmenter::{normalize_whitespace, BlockSequence};

/// Counts shown alongside the reader.
///
/// Recomputed whenever the text or the block size changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ContentStats {
    /// Pages (or equivalent units) of the source document; `0` for pasted text.
    pub unit_count: u32,
    /// Total tokens in the text.
    pub word_count: usize,
    /// Characters in the whitespace-normalized text.
    pub character_count: usize,
    /// Blocks at the current block size.
    pub block_count: usize,
}

impl ContentStats {
    /// Compute stats for `text` as segmented into `blocks`.
    pub fn compute(text: &str, blocks: &BlockSequence, unit_count: u32) -> Self {
        Self {
            unit_count,
            word_count: blocks.token_count(),
            character_count: normalized_char_count(text),
            block_count: blocks.len(),
        }
    }

    /// Same content, different segmentation.
    pub fn with_block_count(self, block_count: usize) -> Self {
        Self {
            block_count,
            ..self
        }
    }
}

/// Number of characters `text` has once whitespace is normalized.
pub fn normalized_char_count(text: &str) -> usize {
    normalize_whitespace(text).chars().count()
}
