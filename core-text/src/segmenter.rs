//! Whitespace tokenization and block grouping.

use serde::Serialize;
use std::fmt;
use std::ops::Index;
use tracing::trace;

/// Split `text` into tokens: maximal runs of non-whitespace characters.
///
/// Any Unicode whitespace separates tokens and runs of it collapse, so the
/// result never contains empty strings.
pub fn tokenize(text: &str) -> Vec<&str> {
    text.split_whitespace().collect()
}

/// Strip leading/trailing whitespace and collapse internal runs to a single
/// space. Case, punctuation and accents are left alone.
pub fn normalize_whitespace(text: &str) -> String {
    tokenize(text).join(" ")
}

/// One displayable group of consecutive tokens joined by single spaces.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Block {
    text: String,
    #[serde(skip)]
    token_count: usize,
}

impl Block {
    fn from_tokens(tokens: &[&str]) -> Self {
        Self {
            text: tokens.join(" "),
            token_count: tokens.len(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn tokens(&self) -> impl Iterator<Item = &str> + '_ {
        self.text.split(' ')
    }

    pub fn token_count(&self) -> usize {
        self.token_count
    }
}

impl AsRef<str> for Block {
    fn as_ref(&self) -> &str {
        &self.text
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl PartialEq<&str> for Block {
    fn eq(&self, other: &&str) -> bool {
        self.text == *other
    }
}

/// Ordered, 0-indexed blocks covering every token of the source exactly once.
///
/// Every block holds exactly `block_size` tokens except possibly the last,
/// which may be shorter. Immutable once built; a new block size means a new
/// sequence.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct BlockSequence {
    blocks: Vec<Block>,
    block_size: usize,
    token_count: usize,
}

impl BlockSequence {
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Block> {
        self.blocks.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Block> {
        self.blocks.iter()
    }

    /// Block size the sequence was built with (after clamping to at least 1).
    pub fn block_size(&self) -> usize {
        self.block_size
    }

    /// Total number of tokens across all blocks.
    pub fn token_count(&self) -> usize {
        self.token_count
    }

    /// All tokens, in original order.
    pub fn tokens(&self) -> impl Iterator<Item = &str> + '_ {
        self.blocks.iter().flat_map(Block::tokens)
    }

    pub fn last_index(&self) -> Option<usize> {
        self.blocks.len().checked_sub(1)
    }
}

impl Index<usize> for BlockSequence {
    type Output = Block;

    fn index(&self, index: usize) -> &Block {
        &self.blocks[index]
    }
}

impl<'a> IntoIterator for &'a BlockSequence {
    type Item = &'a Block;
    type IntoIter = std::slice::Iter<'a, Block>;

    fn into_iter(self) -> Self::IntoIter {
        self.blocks.iter()
    }
}

/// Group the tokens of `text` into blocks of `block_size` tokens.
///
/// Text without tokens yields an empty sequence; that is not an error, the
/// caller decides how to surface it. A `block_size` of 0 is treated as 1.
/// Deterministic: the same input always yields the same sequence.
pub fn segment(text: &str, block_size: usize) -> BlockSequence {
    let block_size = block_size.max(1);
    let tokens = tokenize(text);
    let blocks: Vec<Block> = tokens.chunks(block_size).map(Block::from_tokens).collect();

    trace!(
        tokens = tokens.len(),
        blocks = blocks.len(),
        block_size,
        "Segmented text"
    );

    BlockSequence {
        blocks,
        block_size,
        token_count: tokens.len(),
    }
}
