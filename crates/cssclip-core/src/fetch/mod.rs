//! Message channel: how the capture core obtains remote content.
//!
//! The walker only sees the [`FetchText`] trait and never performs network
//! I/O itself. [`CurlFetcher`] is the libcurl-backed channel used by the CLI;
//! [`MemoryFetcher`] serves canned bodies (tests, offline replays).

mod http;
mod memory;

pub use self::http::{CurlFetcher, FetchOptions};
pub use self::memory::MemoryFetcher;

use futures::future::BoxFuture;

/// Rejection reported by a message channel.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// Curl reported an error (timeout, connection, etc.).
    #[error(transparent)]
    Curl(#[from] ::curl::Error),
    /// HTTP response had a non-2xx status.
    #[error("HTTP {0}")]
    Http(u32),
    /// The blocking fetch task panicked or was cancelled.
    #[error("fetch task join: {0}")]
    Join(String),
}

/// Fetches the text of a stylesheet.
pub trait FetchText: Send + Sync {
    fn fetch_text<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<String, FetchError>>;
}

/// Fetches the raw bytes of a binary asset (fonts, images).
pub trait FetchBytes: Send + Sync {
    fn fetch_bytes<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<Vec<u8>, FetchError>>;
}

/// Decodes a fetched stylesheet body: strips a UTF-8 BOM, replaces invalid sequences.
pub fn decode_text(bytes: &[u8]) -> String {
    let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
    String::from_utf8_lossy(bytes).into_owned()
}
