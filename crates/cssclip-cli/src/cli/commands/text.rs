//! `cssclip text` – capture CSS text read from a local file.

use anyhow::{Context, Result};
use cssclip_core::capture::capture_text;
use cssclip_core::config::ClipConfig;
use std::path::Path;

use super::shared::{capture_params, fetcher, persist_if_requested, print_tasks};
use crate::cli::CaptureArgs;

pub async fn run_text(
    cfg: &ClipConfig,
    path: &Path,
    base_url: &str,
    doc_url: Option<&str>,
    output: Option<&Path>,
    args: &CaptureArgs,
) -> Result<()> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("read {}", path.display()))?;
    let params = capture_params(cfg, args, base_url, doc_url.unwrap_or(base_url));
    let fetcher = fetcher(cfg);

    let captured = capture_text(&fetcher, &text, &params)
        .await
        .with_context(|| format!("capture {}", path.display()))?;

    if let Some(out) = output {
        std::fs::write(out, &captured.css_text)
            .with_context(|| format!("write {}", out.display()))?;
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&captured)?);
    } else {
        if output.is_none() {
            print!("{}", captured.css_text);
            if !captured.css_text.ends_with('\n') {
                println!();
            }
        }
        print_tasks(&captured.tasks);
    }

    persist_if_requested(args, &fetcher, &captured.tasks).await
}
