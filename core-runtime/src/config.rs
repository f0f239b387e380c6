//! # Reader Configuration
//!
//! Settings that shape how text is chunked and how fast it is shown.
//!
//! ## Overview
//!
//! [`ReaderConfig`] holds the initial block size (words per displayed group),
//! the display rate (blocks per second), the minimum amount of text a
//! document must yield to be accepted, and the event bus capacity. It can be
//! built in code with [`ReaderConfig::builder`], deserialized from JSON with
//! per-field defaults, or left at [`Default`].
//!
//! ## Validation vs. clamping
//!
//! Construction paths (`build`, `from_json`) validate and report out-of-range
//! values as [`Error::Config`]; malformed JSON is [`Error::Parse`]. Live
//! reconfiguration goes through [`clamp_block_size`] / [`clamp_rate`]
//! instead and never fails.
//!
//! ## Usage
//!
//! ```rust
//! use core_runtime::config::ReaderConfig;
//!
//! let config = ReaderConfig::builder()
//!     .block_size(2)
//!     .rate(5)
//!     .build()
//!     .expect("valid configuration");
//!
//! assert_eq!(config.tick_interval_ms(), 200);
//! ```

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Smallest number of words shown together.
pub const MIN_BLOCK_SIZE: usize = 1;
/// Largest number of words shown together.
pub const MAX_BLOCK_SIZE: usize = 10;
/// Slowest display rate, in blocks per second.
pub const MIN_RATE: u32 = 1;
/// Fastest display rate, in blocks per second.
pub const MAX_RATE: u32 = 10;

/// Coerce a requested block size into `MIN_BLOCK_SIZE..=MAX_BLOCK_SIZE`.
pub fn clamp_block_size(block_size: usize) -> usize {
    block_size.clamp(MIN_BLOCK_SIZE, MAX_BLOCK_SIZE)
}

/// Coerce a requested rate into `MIN_RATE..=MAX_RATE`.
pub fn clamp_rate(rate: u32) -> u32 {
    rate.clamp(MIN_RATE, MAX_RATE)
}

/// Speed reader configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReaderConfig {
    /// Words per displayed block.
    ///
    /// Default: 3.
    #[serde(default = "default_block_size")]
    pub block_size: usize,

    /// Blocks displayed per second. The tick interval is `1000 / rate` ms.
    ///
    /// Default: 3.
    #[serde(default = "default_rate")]
    pub rate: u32,

    /// Minimum number of characters a document's normalized text must have
    /// for the document to be accepted. Pasted text is exempt.
    ///
    /// Default: 10.
    #[serde(default = "default_min_document_chars")]
    pub min_document_chars: usize,

    /// Capacity of the event bus; slower subscribers see `Lagged`.
    ///
    /// Default: 100.
    #[serde(default = "default_event_buffer_size")]
    pub event_buffer_size: usize,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            block_size: default_block_size(),
            rate: default_rate(),
            min_document_chars: default_min_document_chars(),
            event_buffer_size: default_event_buffer_size(),
        }
    }
}

impl ReaderConfig {
    /// Start building a configuration from defaults.
    pub fn builder() -> ReaderConfigBuilder {
        ReaderConfigBuilder::default()
    }

    /// Parse a JSON document. Missing fields take their defaults; the result
    /// is validated.
    ///
    /// ```rust
    /// use core_runtime::config::ReaderConfig;
    ///
    /// let config = ReaderConfig::from_json(r#"{ "rate": 8 }"#).unwrap();
    /// assert_eq!(config.rate, 8);
    /// assert_eq!(config.block_size, 3);
    /// ```
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate all values against their allowed ranges.
    pub fn validate(&self) -> Result<()> {
        if !(MIN_BLOCK_SIZE..=MAX_BLOCK_SIZE).contains(&self.block_size) {
            return Err(Error::Config(format!(
                "block_size must be between {} and {}, got {}",
                MIN_BLOCK_SIZE, MAX_BLOCK_SIZE, self.block_size
            )));
        }

        if !(MIN_RATE..=MAX_RATE).contains(&self.rate) {
            return Err(Error::Config(format!(
                "rate must be between {} and {}, got {}",
                MIN_RATE, MAX_RATE, self.rate
            )));
        }

        if self.event_buffer_size == 0 {
            return Err(Error::Config("event_buffer_size must be > 0".to_string()));
        }

        Ok(())
    }

    /// Return a copy with every value coerced into range.
    pub fn clamped(&self) -> Self {
        Self {
            block_size: clamp_block_size(self.block_size),
            rate: clamp_rate(self.rate),
            min_document_chars: self.min_document_chars,
            event_buffer_size: self.event_buffer_size.max(1),
        }
    }

    /// Tick interval in milliseconds for the configured rate.
    pub fn tick_interval_ms(&self) -> u64 {
        1000 / u64::from(clamp_rate(self.rate))
    }
}

/// Builder for [`ReaderConfig`].
#[derive(Debug, Default)]
pub struct ReaderConfigBuilder {
    block_size: Option<usize>,
    rate: Option<u32>,
    min_document_chars: Option<usize>,
    event_buffer_size: Option<usize>,
}

impl ReaderConfigBuilder {
    /// Set the initial words per block (1..=10).
    pub fn block_size(mut self, block_size: usize) -> Self {
        self.block_size = Some(block_size);
        self
    }

    /// Set the initial blocks per second (1..=10).
    pub fn rate(mut self, rate: u32) -> Self {
        self.rate = Some(rate);
        self
    }

    /// Set the minimum normalized character count for documents.
    pub fn min_document_chars(mut self, chars: usize) -> Self {
        self.min_document_chars = Some(chars);
        self
    }

    /// Set the event bus capacity.
    pub fn event_buffer_size(mut self, capacity: usize) -> Self {
        self.event_buffer_size = Some(capacity);
        self
    }

    /// Build and validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] naming the first out-of-range field.
    pub fn build(self) -> Result<ReaderConfig> {
        let defaults = ReaderConfig::default();
        let config = ReaderConfig {
            block_size: self.block_size.unwrap_or(defaults.block_size),
            rate: self.rate.unwrap_or(defaults.rate),
            min_document_chars: self
                .min_document_chars
                .unwrap_or(defaults.min_document_chars),
            event_buffer_size: self.event_buffer_size.unwrap_or(defaults.event_buffer_size),
        };
        config.validate()?;
        Ok(config)
    }
}

// ============================================================================
// Default Functions (for serde)
// ============================================================================

fn default_block_size() -> usize {
    3
}

fn default_rate() -> u32 {
    3
}

fn default_min_document_chars() -> usize {
    10
}

fn default_event_buffer_size() -> usize {
    crate::events::DEFAULT_EVENT_BUFFER_SIZE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ReaderConfig::default();
        assert_eq!(config.block_size, 3);
        assert_eq!(config.rate, 3);
        assert_eq!(config.min_document_chars, 10);
        assert_eq!(config.event_buffer_size, 100);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_overrides() {
        let config = ReaderConfig::builder()
            .block_size(5)
            .rate(10)
            .min_document_chars(0)
            .event_buffer_size(16)
            .build()
            .unwrap();

        assert_eq!(config.block_size, 5);
        assert_eq!(config.rate, 10);
        assert_eq!(config.min_document_chars, 0);
        assert_eq!(config.event_buffer_size, 16);
    }

    #[test]
    fn test_builder_rejects_out_of_range_block_size() {
        let err = ReaderConfig::builder().block_size(11).build().unwrap_err();
        assert!(err.to_string().contains("block_size"));

        let err = ReaderConfig::builder().block_size(0).build().unwrap_err();
        assert!(err.to_string().contains("block_size"));
    }

    #[test]
    fn test_builder_rejects_out_of_range_rate() {
        let err = ReaderConfig::builder().rate(0).build().unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        assert!(err.to_string().contains("rate"));
    }

    #[test]
    fn test_builder_rejects_zero_event_buffer() {
        assert!(ReaderConfig::builder()
            .event_buffer_size(0)
            .build()
            .is_err());
    }

    #[test]
    fn test_from_json_partial() {
        let config = ReaderConfig::from_json(r#"{ "block_size": 1 }"#).unwrap();
        assert_eq!(config.block_size, 1);
        assert_eq!(config.rate, 3);
    }

    #[test]
    fn test_from_json_invalid() {
        assert!(matches!(
            ReaderConfig::from_json("not json"),
            Err(Error::Parse(_))
        ));
        assert!(matches!(
            ReaderConfig::from_json(r#"{ "rate": 42 }"#),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_clamping() {
        assert_eq!(clamp_block_size(0), 1);
        assert_eq!(clamp_block_size(4), 4);
        assert_eq!(clamp_block_size(99), 10);
        assert_eq!(clamp_rate(0), 1);
        assert_eq!(clamp_rate(11), 10);

        let wild = ReaderConfig {
            block_size: 0,
            rate: 50,
            min_document_chars: 10,
            event_buffer_size: 0,
        };
        let tame = wild.clamped();
        assert_eq!(tame.block_size, 1);
        assert_eq!(tame.rate, 10);
        assert_eq!(tame.event_buffer_size, 1);
        assert!(tame.validate().is_ok());
    }

    #[test]
    fn test_tick_interval() {
        let mut config = ReaderConfig::default();
        assert_eq!(config.tick_interval_ms(), 333);

        config.rate = 10;
        assert_eq!(config.tick_interval_ms(), 100);

        config.rate = 5;
        assert_eq!(config.tick_interval_ms(), 200);
    }

    #[test]
    fn test_serde_round_trip_keeps_values() {
        let config = ReaderConfig::builder().block_size(7).rate(2).build().unwrap();
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(ReaderConfig::from_json(&json).unwrap(), config);
    }
}
