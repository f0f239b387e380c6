//! # Event Bus System
//!
//! Broadcasts what happened inside the reader core using
//! `tokio::sync::broadcast`, so a presentation layer can re-render without
//! polling.
//!
//! ## Overview
//!
//! The event bus system consists of:
//! - **Event Types**: [`ContentEvent`] (text accepted, resegmented, rejected)
//!   and [`PlaybackEvent`] (position and play/pause changes)
//! - **EventBus**: Central broadcast channel for publishing events
//! - **EventStream**: Wrapper for consuming events with filtering
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────┐   emit   ┌───────────┐  subscribe  ┌──────────────┐
//! │ ReaderService ├─────────>│           ├────────────>│ UI renderer  │
//! └───────────────┘          │ EventBus  │             └──────────────┘
//! ┌───────────────┐   emit   │ (broadcast│  subscribe  ┌──────────────┐
//! │ Playback tick ├─────────>│  channel) ├────────────>│ Progress bar │
//! └───────────────┘          └───────────┘             └──────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use core_runtime::events::{CoreEvent, EventBus, PlaybackEvent};
//!
//! # #[tokio::main]
//! # async fn main() {
//! let bus = EventBus::new(16);
//! let mut subscriber = bus.subscribe();
//!
//! bus.emit(CoreEvent::Playback(PlaybackEvent::Started { index: 0 })).ok();
//!
//! let event = subscriber.recv().await.unwrap();
//! assert_eq!(event.description(), "Playback started");
//! # }
//! ```
//!
//! ## Error Handling
//!
//! - **`RecvError::Lagged(n)`**: the subscriber missed `n` events (for
//!   example, position updates at 10 blocks/s while the UI thread stalled).
//!   Non-fatal; the next `recv` continues with newer events. The reader's
//!   snapshot is always authoritative, so a lagging UI simply re-reads it.
//! - **`RecvError::Closed`**: all senders dropped; treat as shutdown.
//!
//! Publishers ignore the "no subscribers" error: emitting into a bus nobody
//! listens to is normal for a headless reader.

use serde::{Deserialize, Serialize};
use std::fmt;
use tokio::sync::broadcast;

// Re-export commonly used types
pub use tokio::sync::broadcast::error::{RecvError, SendError};
pub use tokio::sync::broadcast::Receiver;

/// Default buffer size for the event bus channel.
pub const DEFAULT_EVENT_BUFFER_SIZE: usize = 100;

// ============================================================================
// Core Event Types
// ============================================================================

/// Top-level event enum published through the event bus.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", content = "payload")]
pub enum CoreEvent {
    /// Text source and segmentation events
    Content(ContentEvent),
    /// Playback position and state events
    Playback(PlaybackEvent),
}

impl CoreEvent {
    /// Returns a human-readable description of the event.
    pub fn description(&self) -> &str {
        match self {
            CoreEvent::Content(e) => e.description(),
            CoreEvent::Playback(e) => e.description(),
        }
    }

    /// Returns the severity level of the event.
    pub fn severity(&self) -> EventSeverity {
        match self {
            CoreEvent::Content(ContentEvent::ExtractionFailed { .. }) => EventSeverity::Error,
            CoreEvent::Content(ContentEvent::Empty { .. }) => EventSeverity::Warning,
            CoreEvent::Content(ContentEvent::Loaded { .. }) => EventSeverity::Info,
            CoreEvent::Playback(PlaybackEvent::Finished { .. }) => EventSeverity::Info,
            _ => EventSeverity::Debug,
        }
    }
}

/// Event severity levels for filtering and logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EventSeverity {
    Debug,
    Info,
    Warning,
    Error,
}

// ============================================================================
// Content Events
// ============================================================================

/// Events about the active text source and its block sequence.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "event")]
pub enum ContentEvent {
    /// A new text source was accepted and segmented.
    Loaded {
        /// Pages (or equivalent) reported by extraction; 0 for pasted text.
        unit_count: u32,
        /// Total tokens in the text.
        word_count: usize,
        /// Characters in the whitespace-normalized text.
        character_count: usize,
        /// Blocks produced at the current block size.
        block_count: usize,
    },
    /// The active text was segmented again after a block size change.
    Resegmented {
        /// The new words-per-block value.
        block_size: usize,
        /// Blocks produced at the new size.
        block_count: usize,
    },
    /// The accepted text produced no blocks; nothing to play.
    Empty {
        /// User-facing warning text.
        message: String,
    },
    /// Document extraction failed; the previous content is still active.
    ExtractionFailed {
        /// Human-readable error message.
        message: String,
        /// Whether retrying the same document may succeed.
        recoverable: bool,
    },
    /// The user discarded the active content.
    Cleared,
}

impl ContentEvent {
    fn description(&self) -> &str {
        match self {
            ContentEvent::Loaded { .. } => "Content loaded",
            ContentEvent::Resegmented { .. } => "Content resegmented",
            ContentEvent::Empty { .. } => "Content has nothing to play",
            ContentEvent::ExtractionFailed { .. } => "Document extraction failed",
            ContentEvent::Cleared => "Content cleared",
        }
    }
}

// ============================================================================
// Playback Events
// ============================================================================

/// Events emitted by the playback controller.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "event")]
pub enum PlaybackEvent {
    /// A block sequence was loaded; position reset to the first block.
    SequenceLoaded {
        /// Number of blocks in the new sequence (0 means idle).
        total_blocks: usize,
    },
    /// Playback started from `index`.
    Started {
        /// Position when playback started.
        index: usize,
    },
    /// Playback paused at `index` (by command or reconfiguration).
    Paused {
        /// Position when paused.
        index: usize,
    },
    /// Current block changed (tick, seek, step back, reset).
    PositionChanged {
        /// New current block index.
        index: usize,
        /// Sequence length.
        total_blocks: usize,
    },
    /// Playback reached the last block and stopped on its own.
    Finished {
        /// Index of the last block.
        index: usize,
    },
    /// Display rate changed.
    RateChanged {
        /// New blocks-per-second value.
        rate: u32,
    },
}

impl PlaybackEvent {
    fn description(&self) -> &str {
        match self {
            PlaybackEvent::SequenceLoaded { .. } => "Block sequence loaded",
            PlaybackEvent::Started { .. } => "Playback started",
            PlaybackEvent::Paused { .. } => "Playback paused",
            PlaybackEvent::PositionChanged { .. } => "Playback position changed",
            PlaybackEvent::Finished { .. } => "Playback finished",
            PlaybackEvent::RateChanged { .. } => "Playback rate changed",
        }
    }
}

// ============================================================================
// Event Bus
// ============================================================================

/// Central event bus for publishing and subscribing to events.
///
/// Cloning an `EventBus` yields another handle to the same channel, which is
/// how the playback ticker publishes from its own task.
#[derive(Clone)]
pub struct EventBus {
    sender: broadcast::Sender<CoreEvent>,
}

impl EventBus {
    /// Creates a new event bus with the specified buffer size.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero (a `tokio::sync::broadcast` constraint).
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publishes an event to all subscribers.
    ///
    /// Returns the number of subscribers that received the event, or an
    /// error if there are no active subscribers.
    pub fn emit(&self, event: CoreEvent) -> Result<usize, SendError<CoreEvent>> {
        self.sender.send(event)
    }

    /// Creates a new subscriber. Past events are not replayed.
    pub fn subscribe(&self) -> Receiver<CoreEvent> {
        self.sender.subscribe()
    }

    /// Returns the number of active subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_EVENT_BUFFER_SIZE)
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("subscriber_count", &self.subscriber_count())
            .finish()
    }
}

// ============================================================================
// Event Stream Wrapper
// ============================================================================

/// Type alias for event filter functions.
type EventFilter = Box<dyn Fn(&CoreEvent) -> bool + Send + Sync>;

/// A wrapper around `broadcast::Receiver` with optional filtering.
///
/// # Example
///
/// ```rust
/// use core_runtime::events::{CoreEvent, EventBus, EventStream};
///
/// let bus = EventBus::new(16);
/// let playback_only = EventStream::new(bus.subscribe())
///     .filter(|event| matches!(event, CoreEvent::Playback(_)));
/// ```
pub struct EventStream {
    receiver: Receiver<CoreEvent>,
    filter: Option<EventFilter>,
}

impl EventStream {
    /// Creates a new event stream from a receiver.
    pub fn new(receiver: Receiver<CoreEvent>) -> Self {
        Self {
            receiver,
            filter: None,
        }
    }

    /// Adds a filter; only matching events are returned.
    pub fn filter<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&CoreEvent) -> bool + Send + Sync + 'static,
    {
        self.filter = Some(Box::new(predicate));
        self
    }

    fn accepts(&self, event: &CoreEvent) -> bool {
        self.filter.as_ref().map_or(true, |filter| filter(event))
    }

    /// Receives the next event that passes the filter.
    ///
    /// # Errors
    ///
    /// Returns `RecvError::Lagged(n)` if the subscriber fell behind by `n` events.
    /// Returns `RecvError::Closed` if all senders have been dropped.
    pub async fn recv(&mut self) -> Result<CoreEvent, RecvError> {
        loop {
            let event = self.receiver.recv().await?;
            if self.accepts(&event) {
                return Ok(event);
            }
        }
    }

    /// Attempts to receive a matching event without waiting.
    ///
    /// Returns `None` if no matching event is currently available.
    pub fn try_recv(&mut self) -> Option<Result<CoreEvent, RecvError>> {
        loop {
            match self.receiver.try_recv() {
                Ok(event) => {
                    if self.accepts(&event) {
                        return Some(Ok(event));
                    }
                }
                Err(broadcast::error::TryRecvError::Empty) => return None,
                Err(broadcast::error::TryRecvError::Lagged(n)) => {
                    return Some(Err(RecvError::Lagged(n)))
                }
                Err(broadcast::error::TryRecvError::Closed) => return Some(Err(RecvError::Closed)),
            }
        }
    }

    /// Drains every matching event that is ready right now.
    ///
    /// Lag notifications are skipped; a closed channel ends the drain.
    pub fn drain_ready(&mut self) -> Vec<CoreEvent> {
        let mut events = Vec::new();
        while let Some(result) = self.try_recv() {
            match result {
                Ok(event) => events.push(event),
                Err(RecvError::Lagged(_)) => continue,
                Err(RecvError::Closed) => break,
            }
        }
        events
    }
}

impl fmt::Debug for EventStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventStream")
            .field("has_filter", &self.filter.is_some())
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================
