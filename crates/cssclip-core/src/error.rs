//! Error kinds produced while capturing a stylesheet graph.

use crate::fetch::FetchError;

/// Failure (or skipped reference) encountered by the capture walker.
///
/// Only `Fetch` and `ImportTooDeep` abort a capture; `MalformedUrl` and
/// `UnsupportedImportForm` are logged and the offending text is left as is.
#[derive(Debug, thiserror::Error)]
pub enum CaptureError {
    /// Reference value is empty or cannot be resolved against its base.
    #[error("malformed url: {raw:?}")]
    MalformedUrl { raw: String },

    /// The message channel rejected a fetch.
    #[error("fetch {url} failed: {source}")]
    Fetch {
        url: String,
        #[source]
        source: FetchError,
    },

    /// `@import` written in a form the scanner does not recognise.
    #[error("unsupported @import form: {statement:?}")]
    UnsupportedImportForm { statement: String },

    /// Non-cyclic import chain nested deeper than the configured ceiling.
    #[error("import chain too deep at {url} (depth {depth})")]
    ImportTooDeep { url: String, depth: usize },
}

impl CaptureError {
    pub fn malformed(raw: &str) -> Self {
        CaptureError::MalformedUrl {
            raw: raw.to_string(),
        }
    }

    /// True for errors that abort the whole capture call.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            CaptureError::Fetch { .. } | CaptureError::ImportTooDeep { .. }
        )
    }
}
