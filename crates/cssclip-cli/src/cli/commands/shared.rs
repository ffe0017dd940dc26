//! Pieces used by both capturing commands: parameters, fetcher, output.

use anyhow::Result;
use cssclip_core::capture::CaptureParams;
use cssclip_core::config::ClipConfig;
use cssclip_core::fetch::CurlFetcher;
use cssclip_core::registry::{persist_all, DirRegistry};
use cssclip_core::task::Task;
use cssclip_core::url_model::StorageInfo;

use crate::cli::CaptureArgs;

/// Builds capture parameters from config with CLI flags layered on top.
pub(super) fn capture_params(
    cfg: &ClipConfig,
    args: &CaptureArgs,
    base_url: &str,
    doc_url: &str,
) -> CaptureParams {
    let mut config = cfg.capture_config();
    config.save_web_font |= args.save_web_font;
    config.save_css_image |= args.save_css_image;
    let asset_relative_path = args
        .asset_relative_path
        .clone()
        .unwrap_or_else(|| cfg.asset_relative_path.clone());
    CaptureParams {
        base_url: base_url.to_string(),
        doc_url: doc_url.to_string(),
        clip_id: args.clip_id.clone(),
        storage: StorageInfo {
            asset_folder: args.asset_folder.clone(),
            asset_relative_path,
        },
        config,
    }
}

pub(super) fn fetcher(cfg: &ClipConfig) -> CurlFetcher {
    CurlFetcher::new(cfg.fetch_options(), cfg.retry_policy())
}

/// Prints one line per task: storage filename, MIME type, source URL.
pub(super) fn print_tasks(tasks: &[Task]) {
    if tasks.is_empty() {
        println!("No assets captured.");
        return;
    }
    println!("{:<32} {:<24} {}", "FILENAME", "MIME", "URL");
    for t in tasks {
        println!("{:<32} {:<24} {}", t.filename, t.mime_type, t.url);
    }
}

/// Persists tasks below `args.out`, if given. Fails when any task could not be stored.
pub(super) async fn persist_if_requested(
    args: &CaptureArgs,
    fetcher: &CurlFetcher,
    tasks: &[Task],
) -> Result<()> {
    let Some(out) = &args.out else {
        return Ok(());
    };
    let registry = DirRegistry::new(out, fetcher.clone());
    let summary = persist_all(&registry, tasks).await;
    eprintln!(
        "Saved {} of {} task(s) under {}",
        summary.saved.len(),
        tasks.len(),
        registry.root().display()
    );
    for (url, err) in &summary.failed {
        eprintln!("  failed: {url}: {err}");
    }
    if !summary.failed.is_empty() {
        anyhow::bail!("{} task(s) could not be saved", summary.failed.len());
    }
    Ok(())
}
