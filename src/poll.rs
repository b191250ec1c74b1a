//! Condition polling primitive.
//!
//! Everything in this suite that waits on the remote DOM goes through
//! [`poll_until`]: evaluate a predicate, hand back its value the moment it
//! turns truthy, or fail with [`Error::Timeout`] once the deadline passes.
//! The predicate performs a fresh observation on every call; nothing is
//! cached between polls.

use std::future::Future;
use std::time::Duration;

use tokio::time::{sleep, Instant};

use crate::error::{Error, Result};

/// Interval between predicate evaluations unless the caller overrides it.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Default budget for a single wait, mirrors the deployed app's slowest
/// server-rendered pages.
pub const DEFAULT_WAIT_TIMEOUT: Duration = Duration::from_secs(15);

/// Poll `check` at [`DEFAULT_POLL_INTERVAL`] until it yields a value or
/// `timeout` elapses.
///
/// `what` names the awaited condition and ends up in the timeout error, so
/// a failed run reads "timed out waiting for toast containing 'saved'"
/// instead of a bare duration.
pub async fn poll_until<T, F, Fut>(what: &str, timeout: Duration, check: F) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Option<T>>,
{
    poll_every(what, timeout, DEFAULT_POLL_INTERVAL, check).await
}

/// [`poll_until`] with an explicit interval.
///
/// The predicate runs at least once even when `timeout` is zero, so a
/// zero-budget call is a plain presence check. A truthy result returns
/// immediately without sleeping, and no sleep follows the final failing
/// check either.
pub async fn poll_every<T, F, Fut>(
    what: &str,
    timeout: Duration,
    interval: Duration,
    mut check: F,
) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Option<T>>,
{
    let start = Instant::now();
    let deadline = start + timeout;

    loop {
        if let Some(found) = check().await {
            return Ok(found);
        }
        if Instant::now() >= deadline {
            return Err(Error::Timeout {
                waiting_for: what.to_string(),
                elapsed: start.elapsed(),
            });
        }
        sleep(interval).await;
    }
}
