//! In-memory message channel.

use std::collections::HashMap;
use std::sync::Mutex;

use futures::future::BoxFuture;

use super::{FetchBytes, FetchError, FetchText};

/// Serves bodies from a URL -> body map and records every request.
///
/// Unknown URLs are rejected with `HTTP 404`.
#[derive(Debug, Default)]
pub struct MemoryFetcher {
    bodies: HashMap<String, Vec<u8>>,
    requests: Mutex<Vec<String>>,
}

impl MemoryFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or replaces) the body served for `url`.
    pub fn with(mut self, url: &str, body: impl Into<Vec<u8>>) -> Self {
        self.bodies.insert(url.to_string(), body.into());
        self
    }

    /// URLs requested so far, in order.
    pub fn requests(&self) -> Vec<String> {
        self.requests
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }

    fn lookup(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(url.to_string());
        }
        self.bodies.get(url).cloned().ok_or(FetchError::Http(404))
    }
}

impl FetchText for MemoryFetcher {
    fn fetch_text<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<String, FetchError>> {
        Box::pin(async move { self.lookup(url).map(|b| super::decode_text(&b)) })
    }
}

impl FetchBytes for MemoryFetcher {
    fn fetch_bytes<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<Vec<u8>, FetchError>> {
        Box::pin(async move { self.lookup(url) })
    }
}
