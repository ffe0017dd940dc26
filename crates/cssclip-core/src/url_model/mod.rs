//! URL modeling: reference resolution, asset naming and storage paths.
//!
//! Turns raw `url(...)`/`@import` values into absolute URLs, derives stable
//! local names for captured assets, and computes the path a rewritten
//! reference must use to reach the saved copy from disk.

mod mime;
mod path;
mod resolve;
mod sanitize;

pub use mime::mime_from_extension;
pub use path::{
    extension_from_url, filename_from_url_path, relative_asset_path, CssHome, StorageInfo,
};
pub use resolve::{is_capturable_scheme, is_inline_reference, resolve_url, split_fragment};
pub use sanitize::sanitize_name_segment;

/// Stem used when the clip id sanitizes to nothing.
const DEFAULT_STEM: &str = "clip";

/// Builds the local name of the `seq`-th asset of a capture session.
///
/// The name is `<clip id>-<seq>` plus the original extension, if any. The clip
/// id is sanitized so the name never contains `/` or `.` besides the
/// extension separator.
///
/// # Examples
///
/// - `asset_name("001", 3, Some("woff"))` → `"001-3.woff"`
/// - `asset_name("a/b.c", 1, None)` → `"a_b_c-1"`
pub fn asset_name(clip_id: &str, seq: u32, extension: Option<&str>) -> String {
    let stem = sanitize_name_segment(clip_id);
    let stem = if stem.is_empty() { DEFAULT_STEM } else { &stem };
    match extension {
        Some(ext) if !ext.is_empty() => format!("{stem}-{seq}.{ext}"),
        _ => format!("{stem}-{seq}"),
    }
}
