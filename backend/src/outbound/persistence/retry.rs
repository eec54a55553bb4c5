//! Bounded connect-with-retry for the database, and the watcher that keeps
//! re-probing it for the lifetime of the process.

use std::time::Duration;

use tracing::{error, info, warn};

use super::mongo::{ConnectionProbe, MongoError};

/// Pause between health pings once the database is connected, and between
/// retry rounds while it is not.
pub const WATCH_INTERVAL: Duration = Duration::from_secs(5);

/// How many times, and how far apart, a failed connection is retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_retries: u32,
    delay: Duration,
}

impl Default for RetryPolicy {
    /// Two retries, 500 ms apart.
    fn default() -> Self {
        Self {
            max_retries: 2,
            delay: Duration::from_millis(500),
        }
    }
}

impl RetryPolicy {
    /// Custom policy.
    #[must_use]
    pub const fn new(max_retries: u32, delay: Duration) -> Self {
        Self { max_retries, delay }
    }

    /// Retries after the first attempt.
    #[must_use]
    pub const fn max_retries(&self) -> u32 {
        self.max_retries
    }

    /// Pause before each retry.
    #[must_use]
    pub const fn delay(&self) -> Duration {
        self.delay
    }
}

/// Probe the database until it answers or the retry budget is spent.
///
/// The retry counter starts at zero on every call, so a later reconnect gets
/// a fresh budget.
///
/// # Errors
///
/// Returns the last probe error once `policy.max_retries()` retries have
/// failed.
pub async fn connect_with_retry<P>(probe: &P, policy: RetryPolicy) -> Result<(), MongoError>
where
    P: ConnectionProbe + ?Sized,
{
    let mut retries = 0;
    loop {
        match probe.ping().await {
            Ok(()) => {
                info!(retries, "connected to mongoDB");
                return Ok(());
            }
            Err(err) if retries < policy.max_retries() => {
                retries += 1;
                warn!(error = %err, retry = retries, "database connection failed; retrying");
                tokio::time::sleep(policy.delay()).await;
            }
            Err(err) => {
                error!(error = %err, retries, "Error in database connection");
                return Err(err);
            }
        }
    }
}

/// Track database reachability until the task is dropped.
///
/// Each round runs [`connect_with_retry`] with a fresh budget and passes the
/// outcome to `report`. While connected, the server is pinged every
/// `interval`. A failed ping reports `false` and starts a new round.
pub async fn watch_connection<P, F>(probe: &P, policy: RetryPolicy, interval: Duration, report: F)
where
    P: ConnectionProbe + ?Sized,
    F: Fn(bool),
{
    loop {
        let connected = connect_with_retry(probe, policy).await.is_ok();
        report(connected);
        if !connected {
            error!("serving without a database connection");
            tokio::time::sleep(interval).await;
            continue;
        }

        loop {
            tokio::time::sleep(interval).await;
            if let Err(err) = probe.ping().await {
                warn!(error = %err, "lost database connection");
                report(false);
                break;
            }
        }
    }
}
