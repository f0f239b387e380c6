//! # Reader Service
//!
//! Command and read-model interface consumed by the presentation layer.
//!
//! [`ReaderService`] owns the active text, the current block size and the
//! [`PlaybackController`]. Every change to the text or the block size runs
//! a full segmentation pass and loads the result into the controller, which
//! pauses playback and returns to the first block.
//!
//! Numeric inputs are clamped, never rejected. The only fallible command is
//! [`ReaderService::load_document`], which surfaces extraction failures and
//! leaves the current content untouched when one occurs.

use std::fmt;
use std::sync::Arc;

use bridge_traits::extraction::{DocumentExtractor, ExtractionError};
use bytes::Bytes;
use core_playback::{PlaybackController, PlaybackSnapshot};
use core_runtime::config::{clamp_block_size, ReaderConfig};
use core_runtime::events::{ContentEvent, CoreEvent, EventBus, EventStream};
use core_runtime::logging::excerpt;
use core_text::stats::normalized_char_count;
use core_text::{normalize_whitespace, segment, ContentStats};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

use crate::error::{ReaderError, Result};

/// Non-fatal conditions reported when content is accepted.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContentWarning {
    /// The text contains no words; playback stays idle.
    #[error("The text contains no words to display")]
    EmptyContent,
}

/// Outcome of accepting a text source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadReport {
    pub stats: ContentStats,
    pub warning: Option<ContentWarning>,
}

impl LoadReport {
    /// Returns `true` if the content produced no blocks.
    pub fn is_empty(&self) -> bool {
        self.warning == Some(ContentWarning::EmptyContent)
    }
}

/// Everything the presentation layer renders, taken in one call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReaderSnapshot {
    pub playback: PlaybackSnapshot,
    pub block_size: usize,
    /// `None` until content has been accepted.
    pub stats: Option<ContentStats>,
    pub progress_fraction: f64,
}

struct ContentState {
    /// Whitespace-normalized active text.
    text: Option<String>,
    stats: Option<ContentStats>,
    block_size: usize,
}

/// Speed reader façade exposed to host applications.
pub struct ReaderService {
    config: ReaderConfig,
    extractor: Option<Arc<dyn DocumentExtractor>>,
    events: EventBus,
    content: Mutex<ContentState>,
    playback: PlaybackController,
}

impl ReaderService {
    /// Create a service without a document extractor; only pasted text can
    /// be loaded. Out-of-range configuration values are clamped.
    pub fn new(config: ReaderConfig) -> Self {
        let config = config.clamped();
        let events = EventBus::new(config.event_buffer_size);
        let playback = PlaybackController::with_events(config.rate, events.clone());

        Self {
            content: Mutex::new(ContentState {
                text: None,
                stats: None,
                block_size: config.block_size,
            }),
            config,
            extractor: None,
            events,
            playback,
        }
    }

    /// Create a service from a JSON configuration document.
    ///
    /// # Errors
    ///
    /// Returns [`ReaderError::Config`] if the document is malformed or holds
    /// out-of-range values.
    pub fn from_config_json(json: &str) -> Result<Self> {
        let config = ReaderConfig::from_json(json)?;
        Ok(Self::new(config))
    }

    /// Attach the backend used by [`load_document`](Self::load_document).
    pub fn with_extractor(mut self, extractor: Arc<dyn DocumentExtractor>) -> Self {
        self.extractor = Some(extractor);
        self
    }

    // ========================================================================
    // Content commands
    // ========================================================================

    /// Accept pasted or pre-extracted text and segment it at the current
    /// block size. Playback is reset to the first block, paused.
    ///
    /// Text without words is accepted with [`ContentWarning::EmptyContent`]
    /// and leaves playback idle.
    #[instrument(skip(self, text), fields(preview = %excerpt(text, 32)))]
    pub fn load_text(&self, text: &str, unit_count: u32) -> LoadReport {
        let mut content = self.content.lock();
        let text = normalize_whitespace(text);
        let blocks = segment(&text, content.block_size);
        let stats = ContentStats::compute(&text, &blocks, unit_count);

        content.text = Some(text);
        content.stats = Some(stats);
        self.playback.load_sequence(blocks);

        if stats.block_count == 0 {
            let warning = ContentWarning::EmptyContent;
            warn!("{}", warning);
            self.emit(ContentEvent::Empty {
                message: warning.to_string(),
            });
            return LoadReport {
                stats,
                warning: Some(warning),
            };
        }

        info!(
            words = stats.word_count,
            blocks = stats.block_count,
            unit_count,
            "Content loaded"
        );
        self.emit(ContentEvent::Loaded {
            unit_count: stats.unit_count,
            word_count: stats.word_count,
            character_count: stats.character_count,
            block_count: stats.block_count,
        });

        LoadReport {
            stats,
            warning: None,
        }
    }

    /// Extract text from a document with the configured extractor and load
    /// it.
    ///
    /// The extractor is invoked exactly once. Documents whose normalized text
    /// is shorter than `min_document_chars` are rejected as
    /// [`ExtractionError::NoExtractableText`].
    ///
    /// # Errors
    ///
    /// - [`ReaderError::CapabilityMissing`] if no extractor is configured
    /// - [`ReaderError::Extraction`] if extraction fails; the current content
    ///   and position are kept
    #[instrument(skip(self, document), fields(bytes = tracing::field::Empty))]
    pub async fn load_document(&self, document: impl Into<Bytes>) -> Result<LoadReport> {
        let document = document.into();
        tracing::Span::current().record("bytes", document.len());

        let extractor = self
            .extractor
            .as_ref()
            .ok_or_else(|| ReaderError::CapabilityMissing {
                capability: "DocumentExtractor".to_string(),
                message: "No document extractor configured; only pasted text can be loaded"
                    .to_string(),
            })?;

        let extracted = match extractor.extract(document).await {
            Ok(extracted) => extracted,
            Err(err) => return Err(self.extraction_failed(extractor.name(), err)),
        };

        let characters = normalized_char_count(&extracted.text);
        if characters < self.config.min_document_chars {
            debug!(
                characters,
                minimum = self.config.min_document_chars,
                "Document text below minimum length"
            );
            return Err(self.extraction_failed(
                extractor.name(),
                ExtractionError::NoExtractableText,
            ));
        }

        Ok(self.load_text(&extracted.text, extracted.unit_count))
    }

    /// Discard the active content and return to idle.
    #[instrument(skip(self))]
    pub fn clear(&self) {
        let mut content = self.content.lock();
        content.text = None;
        content.stats = None;
        self.playback.unload();
        info!("Content cleared");
        self.emit(ContentEvent::Cleared);
    }

    /// Change the words per block (clamped to 1..=10).
    ///
    /// With content active, the text is segmented again and playback pauses
    /// on the first block of the new sequence. An unchanged value is a no-op.
    #[instrument(skip(self))]
    pub fn set_block_size(&self, block_size: usize) {
        let block_size = clamp_block_size(block_size);
        let mut content = self.content.lock();
        if content.block_size == block_size {
            return;
        }
        content.block_size = block_size;

        let Some(text) = content.text.as_deref() else {
            debug!(block_size, "Block size stored; no content loaded");
            return;
        };
        let blocks = segment(text, block_size);
        let block_count = blocks.len();
        content.stats = content
            .stats
            .map(|stats| stats.with_block_count(block_count));
        self.playback.load_sequence(blocks);

        debug!(block_size, block_count, "Content resegmented");
        self.emit(ContentEvent::Resegmented {
            block_size,
            block_count,
        });
    }

    // ========================================================================
    // Playback commands
    // ========================================================================

    /// Change the display rate in blocks per second (clamped to 1..=10).
    pub fn set_rate(&self, rate: u32) {
        self.playback.set_rate(rate);
    }

    pub fn play(&self) {
        self.playback.play();
    }

    pub fn pause(&self) {
        self.playback.pause();
    }

    pub fn toggle(&self) {
        self.playback.toggle();
    }

    pub fn step_back(&self) {
        self.playback.step_back();
    }

    pub fn reset(&self) {
        self.playback.reset();
    }

    pub fn seek_to(&self, index: usize) {
        self.playback.seek_to(index);
    }

    // ========================================================================
    // Read model
    // ========================================================================

    pub fn current_block(&self) -> Option<String> {
        self.playback.current_block()
    }

    pub fn current_index(&self) -> Option<usize> {
        self.playback.current_index()
    }

    pub fn total_blocks(&self) -> usize {
        self.playback.total_blocks()
    }

    pub fn is_playing(&self) -> bool {
        self.playback.is_playing()
    }

    /// `(current_index + 1) / total_blocks`, or 0 with nothing to play.
    pub fn progress_fraction(&self) -> f64 {
        self.playback.progress_fraction()
    }

    pub fn stats(&self) -> Option<ContentStats> {
        self.content.lock().stats
    }

    pub fn block_size(&self) -> usize {
        self.content.lock().block_size
    }

    pub fn rate(&self) -> u32 {
        self.playback.rate()
    }

    /// Configuration the service was created with (after clamping).
    pub fn config(&self) -> &ReaderConfig {
        &self.config
    }

    pub fn snapshot(&self) -> ReaderSnapshot {
        let content = self.content.lock();
        let playback = self.playback.snapshot();
        ReaderSnapshot {
            progress_fraction: playback.progress_fraction(),
            playback,
            block_size: content.block_size,
            stats: content.stats,
        }
    }

    /// Subscribe to content and playback events.
    pub fn subscribe(&self) -> EventStream {
        EventStream::new(self.events.subscribe())
    }

    fn emit(&self, event: ContentEvent) {
        self.events.emit(CoreEvent::Content(event)).ok();
    }

    fn extraction_failed(&self, extractor: &str, err: ExtractionError) -> ReaderError {
        warn!(extractor, error = %err, "Document rejected");
        self.emit(ContentEvent::ExtractionFailed {
            message: err.to_string(),
            recoverable: err.is_transient(),
        });
        ReaderError::Extraction(err)
    }
}

impl Default for ReaderService {
    fn default() -> Self {
        Self::new(ReaderConfig::default())
    }
}

impl fmt::Debug for ReaderService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReaderService")
            .field("config", &self.config)
            .field(
                "extractor",
                &self.extractor.as_ref().map(|extractor| extractor.name()),
            )
            .field("playback", &self.playback)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_clamps_configuration() {
        let config = ReaderConfig {
            block_size: 0,
            rate: 99,
            ..ReaderConfig::default()
        };
        let service = ReaderService::new(config);

        assert_eq!(service.block_size(), 1);
        assert_eq!(service.rate(), 10);
        assert_eq!(service.config().rate, 10);
    }

    #[test]
    fn test_from_config_json() {
        let service = ReaderService::from_config_json(r#"{ "block_size": 2 }"#).unwrap();
        assert_eq!(service.block_size(), 2);

        let err = ReaderService::from_config_json(r#"{ "rate": 0 }"#).unwrap_err();
        assert!(matches!(err, ReaderError::Config(_)));
    }

    #[test]
    fn test_block_size_without_content_is_stored() {
        let service = ReaderService::default();
        service.set_block_size(7);
        assert_eq!(service.block_size(), 7);
        assert_eq!(service.total_blocks(), 0);

        service.load_text("a b c d e f g h", 0);
        assert_eq!(service.total_blocks(), 2);
    }

    #[test]
    fn test_clear() {
        let service = ReaderService::default();
        service.load_text("one two three four", 0);
        service.seek_to(1);

        service.clear();
        assert_eq!(service.stats(), None);
        assert_eq!(service.current_index(), None);
        assert_eq!(service.progress_fraction(), 0.0);
    }

    #[test]
    fn test_snapshot_progress() {
        let service = ReaderService::default();
        service.load_text("a b c d e f", 0);
        service.seek_to(1);

        let snapshot = service.snapshot();
        assert_eq!(snapshot.block_size, 3);
        assert_eq!(snapshot.playback.current_block.as_deref(), Some("d e f"));
        assert_eq!(snapshot.progress_fraction, 1.0);
        assert_eq!(snapshot.stats.map(|s| s.word_count), Some(6));
    }
}
