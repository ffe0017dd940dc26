//! Retry and backoff for the curl message channel.
//!
//! The capture core never retries; a channel that wants resilience wraps its
//! transfers in [`run_with_retry`]. Errors are classified (timeouts,
//! throttling, connection failures) and retried with capped exponential
//! backoff.

mod classify;
mod policy;
mod run;

pub use classify::{classify, classify_curl_error, classify_http_status};
pub use policy::{ErrorKind, RetryDecision, RetryPolicy};
pub use run::run_with_retry;
