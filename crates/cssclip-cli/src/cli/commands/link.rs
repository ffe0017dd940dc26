//! `cssclip link` – fetch a stylesheet and capture it with everything it references.

use anyhow::{Context, Result};
use cssclip_core::capture::capture_link;
use cssclip_core::config::ClipConfig;
use std::path::Path;
use url::Url;

use super::shared::{capture_params, fetcher, persist_if_requested, print_tasks};
use crate::cli::CaptureArgs;

pub async fn run_link(
    cfg: &ClipConfig,
    link: &str,
    base_url: Option<&str>,
    doc_url: Option<&str>,
    args: &CaptureArgs,
) -> Result<()> {
    let link = link_url(link, base_url.is_some())?;
    let base_url = base_url.unwrap_or(&link);
    let params = capture_params(cfg, args, base_url, doc_url.unwrap_or(base_url));
    let fetcher = fetcher(cfg);

    let tasks = capture_link(&fetcher, &link, &params)
        .await
        .with_context(|| format!("capture {link}"))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&tasks)?);
    } else {
        print_tasks(&tasks);
    }

    persist_if_requested(args, &fetcher, &tasks).await
}

/// Turns a bare local path into a `file://` URL; everything else is passed through.
///
/// With an explicit base URL the link may be relative, so it is left alone.
fn link_url(link: &str, has_base: bool) -> Result<String> {
    if has_base || Url::parse(link).is_ok() {
        return Ok(link.to_string());
    }
    let path = Path::new(link)
        .canonicalize()
        .with_context(|| format!("{link} is neither a URL nor an existing file"))?;
    let url = Url::from_file_path(&path)
        .map_err(|()| anyhow::anyhow!("cannot express {} as a file URL", path.display()))?;
    Ok(url.into())
}
