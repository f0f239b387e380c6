//! # Host Bridge Traits
//!
//! Contracts between the speed reader core and the collaborators it does not
//! own.
//!
//! ## Overview
//!
//! The core turns plain text into timed word blocks. Everything upstream of
//! plain text (PDF parsing, OCR, file pickers) and everything downstream of
//! structured log records belongs to the host. Each trait in this crate marks
//! one of those seams.
//!
//! ## Traits
//!
//! - [`DocumentExtractor`](extraction::DocumentExtractor) - Turns raw document
//!   bytes into plain text plus a unit (page) count
//! - [`LoggerSink`](time::LoggerSink) - Forwards structured logs to host logging
//!
//! Reference implementations ship alongside the traits:
//! [`PlainTextExtractor`](extraction::PlainTextExtractor) for UTF-8 text
//! documents and [`ConsoleLogger`](time::ConsoleLogger) for development.
//!
//! ## Error Handling
//!
//! Extraction failures use [`ExtractionError`](extraction::ExtractionError),
//! which the core propagates verbatim. Other bridge operations use
//! [`BridgeError`](error::BridgeError).
//!
//! ## Thread Safety
//!
//! All bridge traits require `Send + Sync` so implementations can be shared
//! across async tasks behind an `Arc`.
//!
//! ## Example
//!
//! ```ignore
//! use bridge_traits::extraction::{DocumentExtractor, ExtractedDocument, ExtractionError};
//! use async_trait::async_trait;
//! use bytes::Bytes;
//!
//! pub struct PdfExtractor;
//!
//! #[async_trait]
//! impl DocumentExtractor for PdfExtractor {
//!     async fn extract(&self, document: Bytes) -> Result<ExtractedDocument, ExtractionError> {
//!         // Parse pages, join their text runs...
//!         todo!()
//!     }
//! }
//! ```

pub mod error;
pub mod extraction;
pub mod time;

pub use error::BridgeError;

// Re-export commonly used types
pub use extraction::{DocumentExtractor, ExtractedDocument, ExtractionError, PlainTextExtractor};
pub use time::{ConsoleLogger, LogEntry, LogLevel, LoggerSink};
