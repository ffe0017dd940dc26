//! Retry loop around a blocking fetch attempt.

use crate::fetch::FetchError;

use super::classify::classify;
use super::policy::{RetryDecision, RetryPolicy};

/// Runs `attempt` until it succeeds or the policy gives up, sleeping between tries.
/// Blocks the current thread.
pub fn run_with_retry<T, F>(policy: &RetryPolicy, mut attempt: F) -> Result<T, FetchError>
where
    F: FnMut() -> Result<T, FetchError>,
{
    let mut n = 1u32;
    loop {
        match attempt() {
            Ok(v) => return Ok(v),
            Err(e) => match policy.decide(n, classify(&e)) {
                RetryDecision::NoRetry => return Err(e),
                RetryDecision::RetryAfter(d) => {
                    tracing::debug!(
                        attempt = n,
                        delay_ms = d.as_millis() as u64,
                        "fetch failed: {e}; retrying"
                    );
                    std::thread::sleep(d);
                    n += 1;
                }
            },
        }
    }
}
