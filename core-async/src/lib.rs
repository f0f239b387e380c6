//! Async runtime facade for the speed reader core.
//!
//! All core-* crates depend on this crate instead of reaching for Tokio
//! directly. The playback timer, the event bus and the extraction futures
//! share one executor and one clock, so tests can pause and advance time.
//!
//! # Modules
//!
//! - `task`: Task spawning and join handles
//! - `time`: Sleep, intervals and tick scheduling policy
//! - `sync`: Channels, locks and cooperative cancellation
//! - `runtime`: Runtime handles and a blocking entry point
//!
//! # Examples
//!
//! ```rust
//! use core_async::task;
//! use core_async::time::{sleep, Duration};
//!
//! async fn example() {
//!     let handle = task::spawn(async {
//!         sleep(Duration::from_millis(10)).await;
//!         42
//!     });
//!     assert_eq!(handle.await.unwrap(), 42);
//! }
//! ```

pub mod runtime;
pub mod sync;
pub mod task;
pub mod time;

// Re-export commonly used items at crate root for convenience
pub use task::spawn;
pub use time::{sleep, Duration, Instant};

/// Waits on multiple concurrent branches, returning when the first completes.
pub use tokio::select;
