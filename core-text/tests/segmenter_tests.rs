//! Integration tests for text segmentation
//!
//! Covers the segmentation contract as seen from the reader: determinism,
//! token coverage, boundary inputs and the shape of the last block.

use core_text::{normalize_whitespace, segment, tokenize, ContentStats};

const SAMPLES: &[&str] = &[
    "",
    "   ",
    "one",
    "a b c",
    "the quick brown fox jumps over the lazy dog",
    "  Leading and trailing\twhitespace\n\n  with   runs  ",
    "Punctuation, stays attached; \"quotes\" too — and dashes.",
    "Ünïcödé wörds\u{2009}thin\u{3000}ideographic space",
];

fn shown(text: &str, block_size: usize) -> Vec<String> {
    segment(text, block_size)
        .iter()
        .map(|b| b.as_str().to_string())
        .collect()
}

#[test]
fn test_segment_is_deterministic() {
    for text in SAMPLES {
        for size in 1..=10 {
            assert_eq!(segment(text, size), segment(text, size));
        }
    }
}

#[test]
fn test_blocks_cover_every_token_in_order() {
    for text in SAMPLES {
        for size in 1..=10 {
            let seq = segment(text, size);
            let joined = seq
                .iter()
                .map(|b| b.as_str())
                .collect::<Vec<_>>()
                .join(" ");

            assert_eq!(tokenize(&joined), tokenize(text), "size {} on {:?}", size, text);
            assert_eq!(seq.tokens().collect::<Vec<_>>(), tokenize(text));
            assert_eq!(seq.token_count(), tokenize(text).len());
        }
    }
}

#[test]
fn test_only_last_block_may_be_short() {
    let text = "w1 w2 w3 w4 w5 w6 w7 w8 w9 w10 w11";
    for size in 1..=10 {
        let seq = segment(text, size);
        let (last, rest) = seq
            .iter()
            .collect::<Vec<_>>()
            .split_last()
            .map(|(l, r)| (l.token_count(), r.iter().map(|b| b.token_count()).collect::<Vec<_>>()))
            .unwrap();

        assert!(rest.iter().all(|&n| n == size));
        assert!((1..=size).contains(&last));
        assert_eq!(seq.len(), (11 + size - 1) / size);
    }
}

#[test]
fn test_empty_and_blank_text() {
    for size in [1, 3, 10] {
        assert!(segment("", size).is_empty());
        assert!(segment("   ", size).is_empty());
        assert!(segment("\n\t \u{00A0}", size).is_empty());
    }
}

#[test]
fn test_partial_last_block() {
    assert_eq!(shown("a b c", 2), ["a b", "c"]);
}

#[test]
fn test_nine_words_in_threes() {
    assert_eq!(
        shown("the quick brown fox jumps over the lazy dog", 3),
        ["the quick brown", "fox jumps over", "the lazy dog"]
    );
}

#[test]
fn test_block_size_larger_than_text() {
    assert_eq!(shown("just two", 10), ["just two"]);
}

#[test]
fn test_whitespace_is_only_normalization() {
    let text = "  Hello,\tWORLD!\n\nÇa   va?  ";
    assert_eq!(shown(text, 2), ["Hello, WORLD!", "Ça va?"]);
    assert_eq!(normalize_whitespace(text), "Hello, WORLD! Ça va?");
}

#[test]
fn test_resegmenting_same_text() {
    let text = "one two three four five six seven";
    let small = segment(text, 2);
    let large = segment(text, 5);

    assert_eq!(small.len(), 4);
    assert_eq!(large.len(), 2);
    assert_eq!(small.block_size(), 2);
    assert_eq!(large.block_size(), 5);
    assert!(small.tokens().eq(large.tokens()));
}

#[test]
fn test_stats_follow_segmentation() {
    let text = "the quick brown fox jumps over the lazy dog";
    let stats = ContentStats::compute(text, &segment(text, 4), 0);

    assert_eq!(stats.word_count, 9);
    assert_eq!(stats.character_count, text.len());
    assert_eq!(stats.block_count, 3);
    assert_eq!(stats.unit_count, 0);
}
