//! Task spawning and execution.
//!
//! Thin wrappers around `tokio::task`. The playback ticker is the main
//! consumer: it is spawned once per `play()` and cancelled on every
//! transition that leaves the playing state.
//!
//! # Examples
//!
//! ```rust
//! use core_async::task;
//!
//! async fn example() {
//!     let handle = task::spawn(async { 42 });
//!     assert_eq!(handle.await.unwrap(), 42);
//!
//!     let aborted = task::spawn(std::future::pending::<()>());
//!     aborted.abort();
//!     assert!(aborted.await.unwrap_err().is_cancelled());
//! }
//! ```

pub use tokio::task::{spawn_blocking, yield_now, AbortHandle, JoinError, JoinHandle};

/// Spawns a new asynchronous task on the current Tokio runtime.
///
/// # Panics
///
/// Panics when called outside of a Tokio runtime context, like
/// `tokio::spawn`.
pub fn spawn<F>(future: F) -> JoinHandle<F::Output>
where
    F: std::future::Future + Send + 'static,
    F::Output: Send + 'static,
{
    tokio::task::spawn(future)
}

/// Returns `true` when the caller is running inside a Tokio runtime.
///
/// Components that arm timers check this first and stay paused when driven
/// from a plain synchronous context.
pub fn has_runtime() -> bool {
    tokio::runtime::Handle::try_current().is_ok()
}

/// Result type for task operations.
pub type Result<T> = std::result::Result<T, JoinError>;
