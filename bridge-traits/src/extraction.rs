//! Document extraction bridge.
//!
//! The core never parses documents itself. A host-provided
//! [`DocumentExtractor`] receives the raw bytes of an accepted document and
//! returns its plain text together with a unit count (pages for paginated
//! formats, `0` when the format has no such notion). The core consumes only
//! those two values and never retries a failed extraction.

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;

/// Errors reported by a [`DocumentExtractor`].
///
/// The core surfaces these verbatim to the presentation layer and leaves its
/// own state untouched when one occurs.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractionError {
    /// The document is not in a format this extractor understands.
    #[error("Unsupported document format: {0}")]
    UnsupportedFormat(String),

    /// The document bytes are not valid in the expected text encoding.
    #[error("Invalid text encoding: {0}")]
    InvalidEncoding(String),

    /// The document parsed but yielded (almost) no text, e.g. a scanned PDF.
    #[error("Document contains no extractable text; it may be a scanned document or contain only images")]
    NoExtractableText,

    /// The document is damaged or truncated.
    #[error("Corrupted document: {0}")]
    Corrupted(String),

    /// The extraction backend itself failed (worker crash, version mismatch).
    #[error("Extraction backend failed: {0}")]
    Backend(String),
}

impl ExtractionError {
    /// Returns `true` if the same document may succeed on a later attempt.
    ///
    /// Only backend failures qualify; format and content problems are
    /// properties of the document itself.
    pub fn is_transient(&self) -> bool {
        matches!(self, ExtractionError::Backend(_))
    }
}

/// Plain text produced from a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedDocument {
    /// Extracted text, not yet whitespace-normalized.
    pub text: String,
    /// Number of pages (or equivalent units); `0` for unpaginated sources.
    pub unit_count: u32,
}

impl ExtractedDocument {
    pub fn new(text: impl Into<String>, unit_count: u32) -> Self {
        Self {
            text: text.into(),
            unit_count,
        }
    }

    /// A document without pagination.
    pub fn unpaginated(text: impl Into<String>) -> Self {
        Self::new(text, 0)
    }
}

/// Converts raw document bytes into plain text.
///
/// # Example
///
/// ```ignore
/// use bridge_traits::extraction::DocumentExtractor;
///
/// async fn word_count(extractor: &dyn DocumentExtractor, bytes: bytes::Bytes) -> usize {
///     match extractor.extract(bytes).await {
///         Ok(doc) => doc.text.split_whitespace().count(),
///         Err(_) => 0,
///     }
/// }
/// ```
#[async_trait]
pub trait DocumentExtractor: Send + Sync {
    /// Extract plain text and a unit count from `document`.
    async fn extract(&self, document: Bytes) -> Result<ExtractedDocument, ExtractionError>;

    /// Short human-readable name of the backend, used in logs.
    fn name(&self) -> &str {
        "extractor"
    }
}

/// Extractor for documents that already are UTF-8 text.
///
/// A leading byte-order mark is dropped. The unit count is always `0`.
#[derive(Debug, Clone, Default)]
pub struct PlainTextExtractor;

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

#[async_trait]
impl DocumentExtractor for PlainTextExtractor {
    async fn extract(&self, document: Bytes) -> Result<ExtractedDocument, ExtractionError> {
        let body = document.strip_prefix(UTF8_BOM).unwrap_or(&document[..]);
        let text = std::str::from_utf8(body)
            .map_err(|e| ExtractionError::InvalidEncoding(e.to_string()))?;
        Ok(ExtractedDocument::unpaginated(text))
    }

    fn name(&self) -> &str {
        "plain-text"
    }
}
