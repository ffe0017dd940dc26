//! libcurl-backed message channel.
//!
//! Each GET runs on a blocking thread (`spawn_blocking`) and goes through the
//! retry policy, so transient network failures are retried here rather than
//! in the capture core.

use std::time::Duration;

use futures::future::BoxFuture;
use url::Url;

use crate::retry::{run_with_retry, RetryPolicy};

use super::{decode_text, FetchBytes, FetchError, FetchText};

/// Transfer options applied to every request.
#[derive(Debug, Clone)]
pub struct FetchOptions {
    pub connect_timeout: Duration,
    /// Upper bound for the whole transfer.
    pub timeout: Duration,
    pub max_redirections: u32,
    pub user_agent: String,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(15),
            timeout: Duration::from_secs(60),
            max_redirections: 10,
            user_agent: concat!("cssclip/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// Message channel that performs real GET requests with libcurl.
///
/// Supports `http`, `https` and `file` URLs.
#[derive(Debug, Clone, Default)]
pub struct CurlFetcher {
    options: FetchOptions,
    policy: RetryPolicy,
}

impl CurlFetcher {
    pub fn new(options: FetchOptions, policy: RetryPolicy) -> Self {
        Self { options, policy }
    }

    /// GETs `url` on the current thread, retrying per policy.
    /// Call from `spawn_blocking` if used from async code.
    pub fn get_blocking(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        run_with_retry(&self.policy, || get_once(url, &self.options))
    }

    async fn get(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let this = self.clone();
        let url = url.to_string();
        tokio::task::spawn_blocking(move || this.get_blocking(&url))
            .await
            .map_err(|e| FetchError::Join(e.to_string()))?
    }
}

impl FetchText for CurlFetcher {
    fn fetch_text<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<String, FetchError>> {
        Box::pin(async move {
            let bytes = self.get(url).await?;
            tracing::debug!(url, bytes = bytes.len(), "stylesheet fetched");
            Ok(decode_text(&bytes))
        })
    }
}

impl FetchBytes for CurlFetcher {
    fn fetch_bytes<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<Vec<u8>, FetchError>> {
        Box::pin(self.get(url))
    }
}

/// One GET attempt: follows redirects, collects the body, checks the status.
fn get_once(url: &str, options: &FetchOptions) -> Result<Vec<u8>, FetchError> {
    let mut body = Vec::new();

    let mut easy = curl::easy::Easy::new();
    easy.url(url)?;
    easy.follow_location(true)?;
    easy.max_redirections(options.max_redirections)?;
    easy.connect_timeout(options.connect_timeout)?;
    easy.timeout(options.timeout)?;
    easy.useragent(&options.user_agent)?;
    easy.accept_encoding("")?; // any encoding curl can decode

    {
        let mut transfer = easy.transfer();
        transfer.write_function(|data| {
            body.extend_from_slice(data);
            Ok(data.len())
        })?;
        transfer.perform()?;
    }

    if is_http(url) {
        let code = easy.response_code()?;
        if !(200..300).contains(&code) {
            return Err(FetchError::Http(code));
        }
    }
    Ok(body)
}

fn is_http(url: &str) -> bool {
    Url::parse(url)
        .map(|u| matches!(u.scheme(), "http" | "https"))
        .unwrap_or(false)
}
