//! `cssclip scan` – list the references found in a CSS file.

use anyhow::{Context, Result};
use cssclip_core::scan::scan;
use std::path::Path;

pub fn run_scan(path: &Path) -> Result<()> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("read {}", path.display()))?;
    let refs = scan(&text);
    if refs.is_empty() {
        println!("No references found.");
        return Ok(());
    }
    println!("{:<8} {:<14} {:<6} {:<40} {}", "KIND", "SPAN", "QUOTE", "RAW", "MEDIA");
    for r in refs {
        println!(
            "{:<8} {:<14} {:<6} {:<40} {}",
            r.kind.as_str(),
            format!("{}..{}", r.span.start, r.span.end),
            r.quote.as_str(),
            r.raw,
            r.media.as_deref().unwrap_or("-")
        );
    }
    Ok(())
}
