//! Asset task builder: decides whether a reference becomes a task and names it.

use crate::capture::CaptureConfig;
use crate::scan::RefKind;
use crate::task::Task;
use crate::url_model::{asset_name, extension_from_url, mime_from_extension, StorageInfo};

/// Hands out `<clip id>-<seq>.<ext>` names in allocation order.
#[derive(Debug, Clone)]
pub struct NameAllocator {
    clip_id: String,
    next_seq: u32,
}

impl NameAllocator {
    pub fn new(clip_id: &str) -> Self {
        Self {
            clip_id: clip_id.to_string(),
            next_seq: 1,
        }
    }

    /// Allocates the next name for `url`. Stylesheets without an extension get `.css`.
    pub fn allocate(&mut self, url: &str, kind: RefKind) -> String {
        let ext = extension_for(url, kind);
        let name = asset_name(&self.clip_id, self.next_seq, ext.as_deref());
        self.next_seq += 1;
        name
    }
}

fn extension_for(url: &str, kind: RefKind) -> Option<String> {
    match (extension_from_url(url), kind) {
        (Some(ext), _) => Some(ext),
        (None, RefKind::Import) => Some("css".to_string()),
        (None, _) => None,
    }
}

/// Whether references of `kind` are captured under `config`.
pub fn should_capture(kind: RefKind, config: &CaptureConfig) -> bool {
    match kind {
        RefKind::Import => true,
        RefKind::FontUrl => config.save_web_font,
        RefKind::ImageUrl => config.save_css_image,
    }
}

/// Builds the task for a font or image reference.
///
/// Returns `None` when capture of that kind is disabled; the caller then
/// erases the reference to `url("")`. Binary payloads are fetched later by
/// the registry, so the task carries only the URL.
pub fn build_asset_task(
    url: &str,
    kind: RefKind,
    config: &CaptureConfig,
    names: &mut NameAllocator,
    storage: &StorageInfo,
) -> Option<Task> {
    if !should_capture(kind, config) {
        return None;
    }
    let name = names.allocate(url, kind);
    let mime_type = mime_from_extension(extension_for(url, kind).as_deref());
    Some(Task {
        url: url.to_string(),
        filename: storage.storage_path(&name),
        mime_type: mime_type.to_string(),
        text: None,
    })
}

/// Builds the task slot for an imported stylesheet; its body is filled in
/// once the import has been walked.
pub fn stylesheet_task(url: &str, names: &mut NameAllocator, storage: &StorageInfo) -> Task {
    let name = names.allocate(url, RefKind::Import);
    Task {
        url: url.to_string(),
        filename: storage.storage_path(&name),
        mime_type: "text/css".to_string(),
        text: Some(String::new()),
    }
}
