//! Synchronization primitives.
//!
//! Async-aware primitives from `tokio::sync` plus cooperative cancellation
//! from `tokio-util`. A [`CancellationToken`] is handed to every background
//! task so that its owner can stop it deterministically.
//!
//! # Examples
//!
//! ```rust
//! use core_async::sync::CancellationToken;
//!
//! async fn example() {
//!     let token = CancellationToken::new();
//!     let child = token.clone();
//!
//!     let worker = core_async::spawn(async move {
//!         child.cancelled().await;
//!         "stopped"
//!     });
//!
//!     token.cancel();
//!     assert_eq!(worker.await.unwrap(), "stopped");
//! }
//! ```

pub use tokio::sync::{broadcast, mpsc, oneshot, watch, Mutex, MutexGuard, Notify, RwLock};

pub use tokio_util::sync::{CancellationToken, DropGuard};
