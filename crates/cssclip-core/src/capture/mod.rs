//! Import graph walker: the two capture entry points.
//!
//! `capture_text` rewrites CSS text the caller already has (a `<style>` block
//! or a stylesheet body); `capture_link` fetches a stylesheet first and
//! treats it as an asset of its own. Both recurse through `@import` chains,
//! fetching each new stylesheet through the message channel, and collect a
//! flat list of tasks for everything that must be saved.
//!
//! All mutable state lives in a context owned by the top-level call, so
//! independent captures never interfere.

mod context;
mod rewrite;
mod walk;

use serde::Serialize;

use crate::error::CaptureError;
use crate::fetch::FetchText;
use crate::task::Task;
use crate::url_model::{is_capturable_scheme, resolve_url, split_fragment, CssHome, StorageInfo};

use context::CaptureContext;

/// Default ceiling on non-cyclic `@import` nesting.
pub const DEFAULT_MAX_IMPORT_DEPTH: usize = 32;

/// Which optional asset kinds are captured.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureConfig {
    pub save_web_font: bool,
    pub save_css_image: bool,
    pub max_import_depth: usize,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            save_web_font: false,
            save_css_image: false,
            max_import_depth: DEFAULT_MAX_IMPORT_DEPTH,
        }
    }
}

/// Inputs shared by both entry points.
#[derive(Debug, Clone)]
pub struct CaptureParams {
    /// URL the CSS text is relative to.
    pub base_url: String,
    /// URL of the captured HTML document.
    pub doc_url: String,
    /// Identifier of this capture session, used as the asset name stem.
    pub clip_id: String,
    pub storage: StorageInfo,
    pub config: CaptureConfig,
}

/// Result of [`capture_text`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CapturedCss {
    /// The input text with every captured reference rewritten.
    pub css_text: String,
    /// Every resource reachable from the text, in discovery order.
    pub tasks: Vec<Task>,
}

/// Captures CSS text whose base URL is `params.base_url`.
///
/// The text itself is not fetched and gets no task; imported stylesheets,
/// fonts and images do. Fails only when a fetch fails or imports nest too
/// deep; broken references are skipped.
pub async fn capture_text<F>(
    fetcher: &F,
    text: &str,
    params: &CaptureParams,
) -> Result<CapturedCss, CaptureError>
where
    F: FetchText + ?Sized,
{
    tracing::info!(base = %params.base_url, clip = %params.clip_id, "capturing css text");
    let mut ctx = CaptureContext::new(params);
    let home = CssHome::of(&params.base_url, &params.doc_url);
    let css_text = walk::walk(fetcher, &mut ctx, text, &params.base_url, home, 0).await?;
    let tasks = ctx.into_tasks();
    tracing::info!(tasks = tasks.len(), "css text captured");
    Ok(CapturedCss { css_text, tasks })
}

/// Fetches the stylesheet at `link` (relative to `params.base_url`) and captures it.
///
/// The first task is the stylesheet itself, carrying its rewritten body;
/// the rest are everything it references.
pub async fn capture_link<F>(
    fetcher: &F,
    link: &str,
    params: &CaptureParams,
) -> Result<Vec<Task>, CaptureError>
where
    F: FetchText + ?Sized,
{
    let (url, _) = split_fragment(&resolve_url(link, &params.base_url)?);
    if !is_capturable_scheme(&url) {
        return Err(CaptureError::malformed(link));
    }
    tracing::info!(url = %url, clip = %params.clip_id, "capturing css link");
    let mut ctx = CaptureContext::new(params);
    walk::capture_import(fetcher, &mut ctx, &url, 1).await?;
    let tasks = ctx.into_tasks();
    tracing::info!(tasks = tasks.len(), "css link captured");
    Ok(tasks)
}
