//! Time-related abstractions.
//!
//! Re-exports `tokio::time` so that every timer in the core runs on the
//! runtime clock. Tests built with Tokio's `test-util` feature can pause that
//! clock (`#[tokio::test(start_paused = true)]`) and every interval created
//! through this module follows it.
//!
//! # Examples
//!
//! ```rust
//! use core_async::time::{interval, Duration, MissedTickBehavior};
//!
//! async fn example() {
//!     let mut ticks = interval(Duration::from_millis(100));
//!     ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);
//!     ticks.tick().await; // completes immediately
//!     ticks.tick().await; // completes 100ms later
//! }
//! ```

pub use tokio::time::{
    interval, interval_at, sleep, sleep_until, timeout, Instant, Interval, MissedTickBehavior,
    Sleep, Timeout,
};

pub use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Creates an interval whose first tick fires one full `period` from now.
///
/// Unlike `tokio::time::interval`, the first tick does not complete
/// immediately. Missed ticks use [`MissedTickBehavior::Delay`], so a stalled
/// executor never produces a burst of ticks.
///
/// # Panics
///
/// Panics if `period` is zero, like `tokio::time::interval_at`.
pub fn delayed_interval(period: Duration) -> Interval {
    let mut ticks = interval_at(Instant::now() + period, period);
    ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);
    ticks
}

/// Returns the current time as milliseconds since UNIX_EPOCH.
///
/// Falls back to `0` if the system clock reports a time before the epoch.
pub fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as u64)
        .unwrap_or(0)
}
