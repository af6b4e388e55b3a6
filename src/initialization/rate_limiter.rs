//! Rate limiter initialization.
//!
//! This module provides a tick-based rate limiter that serializes request
//! admission across all concurrent workers.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, Mutex};
use tokio::time::{interval, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

/// Tick-based rate limiter admitting at most R operations per second.
///
/// A background task drives a ticker firing every `1/R` seconds and feeds a
/// channel with capacity 1, so at most one idle tick is banked; every other
/// admission happens strictly on the tick cadence. `wait()` receives one
/// tick, which serializes admission: only one waiter proceeds per tick, no
/// matter how many workers are blocked.
///
/// # Behavior
///
/// - `wait()` is safe to call from many concurrent workers
/// - Admission order among waiters follows lock acquisition order
/// - `stop()` cancels the background ticker task; pending waiters beyond
///   the banked tick stay blocked, so it must only be called once no more
///   admissions are needed
pub struct RateLimiter {
    ticks: Mutex<mpsc::Receiver<()>>,
    shutdown: CancellationToken,
}

impl RateLimiter {
    /// Blocks the calling task until the next admission slot is available.
    pub async fn wait(&self) {
        let mut ticks = self.ticks.lock().await;
        let _ = ticks.recv().await;
    }

    /// Stops the background ticker task.
    pub fn stop(&self) {
        self.shutdown.cancel();
    }
}

/// Initializes the tick-based rate limiter.
///
/// If `rps` is 0, rate limiting is disabled and `None` is returned.
///
/// # Arguments
///
/// * `rps` - Maximum operations per second (0 disables rate limiting)
pub fn init_rate_limiter(rps: u32) -> Option<Arc<RateLimiter>> {
    if rps == 0 {
        return None;
    }

    let (tx, rx) = mpsc::channel(1);
    let shutdown = CancellationToken::new();
    let shutdown_task = shutdown.clone();
    let period = Duration::from_secs_f64(1.0 / f64::from(rps));

    tokio::spawn(async move {
        let mut ticker = interval(period);
        // Delay (not burst) missed ticks: a slow consumer must never be
        // followed by a flurry of admissions above the configured rate
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    tokio::select! {
                        result = tx.send(()) => {
                            if result.is_err() {
                                // Receiver dropped, nobody left to admit
                                break;
                            }
                        }
                        _ = shutdown_task.cancelled() => break,
                    }
                }
                _ = shutdown_task.cancelled() => {
                    log::debug!("Rate limiter background task shutting down");
                    break;
                }
            }
        }
    });

    Some(Arc::new(RateLimiter {
        ticks: Mutex::new(rx),
        shutdown,
    }))
}
