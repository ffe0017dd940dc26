//! URL path helpers and storage-relative path computation.

use serde::{Deserialize, Serialize};
use url::Url;

/// Where the artifacts of one capture session are stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageInfo {
    /// Storage path of the shared asset folder (e.g. `category-a/clippings/assets`).
    pub asset_folder: String,
    /// Path from the document's folder to the asset folder (e.g. `assets`).
    pub asset_relative_path: String,
}

impl Default for StorageInfo {
    fn default() -> Self {
        Self {
            asset_folder: "assets".to_string(),
            asset_relative_path: "assets".to_string(),
        }
    }
}

impl StorageInfo {
    /// Storage path of an asset named `name` (used as the task filename).
    pub fn storage_path(&self, name: &str) -> String {
        join_segments(&self.asset_folder, name)
    }
}

/// Folder that will eventually hold a piece of CSS text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CssHome {
    /// CSS inlined in the captured HTML document.
    Document,
    /// CSS saved as its own file inside the asset folder.
    AssetFolder,
}

impl CssHome {
    /// CSS whose base URL is the document's own URL lives in the document;
    /// everything else is saved as a sibling of the other assets.
    pub fn of(base_url: &str, doc_url: &str) -> Self {
        let same = match (Url::parse(base_url), Url::parse(doc_url)) {
            (Ok(mut base), Ok(mut doc)) => {
                base.set_fragment(None);
                doc.set_fragment(None);
                base == doc
            }
            _ => base_url.trim() == doc_url.trim(),
        };
        if same {
            CssHome::Document
        } else {
            CssHome::AssetFolder
        }
    }
}

/// Path a rewritten reference must use to reach asset `name` from CSS stored in `home`.
///
/// - `Document`: `<asset_relative_path>/<name>`, since assets sit in a folder
///   relative to the document.
/// - `AssetFolder`: `<name>`, since stylesheet and asset share the folder.
pub fn relative_asset_path(home: CssHome, storage: &StorageInfo, name: &str) -> String {
    match home {
        CssHome::Document => join_segments(&storage.asset_relative_path, name),
        CssHome::AssetFolder => name.to_string(),
    }
}

fn join_segments(dir: &str, name: &str) -> String {
    let dir = dir.trim_end_matches('/');
    if dir.is_empty() || dir == "." {
        name.to_string()
    } else {
        format!("{dir}/{name}")
    }
}

/// Extracts the last path segment from a URL.
///
/// Returns `None` if the URL cannot be parsed or the path is empty/root.
pub fn filename_from_url_path(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    let segment = parsed.path().split('/').filter(|s| !s.is_empty()).last()?;
    if segment == "." || segment == ".." {
        return None;
    }
    Some(segment.to_string())
}

/// Lowercased extension of the URL's last path segment, if it looks like one
/// (1-8 ASCII alphanumerics).
pub fn extension_from_url(url: &str) -> Option<String> {
    let segment = filename_from_url_path(url)?;
    let (stem, ext) = segment.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() || ext.len() > 8 {
        return None;
    }
    if !ext.chars().all(|c| c.is_ascii_alphanumeric()) {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn storage() -> StorageInfo {
        StorageInfo {
            asset_folder: "category-a/clippings/assets".to_string(),
            asset_relative_path: "assets".to_string(),
        }
    }

    #[test]
    fn home_is_document_when_base_equals_doc() {
        assert_eq!(
            CssHome::of("https://a.org/index.html", "https://a.org/index.html"),
            CssHome::Document
        );
        assert_eq!(
            CssHome::of("https://a.org/index.html#top", "https://a.org/index.html"),
            CssHome::Document
        );
    }

    #[test]
    fn home_is_asset_folder_for_external_css() {
        assert_eq!(
            CssHome::of("https://a.org/style.css", "https://a.org/index.html"),
            CssHome::AssetFolder
        );
        assert_eq!(
            CssHome::of("https://cdn.a.org/style.css", "https://a.org/index.html"),
            CssHome::AssetFolder
        );
    }

    #[test]
    fn relative_path_from_document() {
        assert_eq!(
            relative_asset_path(CssHome::Document, &storage(), "001-1.woff"),
            "assets/001-1.woff"
        );
    }

    #[test]
    fn relative_path_from_asset_folder() {
        assert_eq!(
            relative_asset_path(CssHome::AssetFolder, &storage(), "001-1.woff"),
            "001-1.woff"
        );
    }

    #[test]
    fn empty_relative_segment() {
        let s = StorageInfo {
            asset_folder: "clip".to_string(),
            asset_relative_path: String::new(),
        };
        assert_eq!(relative_asset_path(CssHome::Document, &s, "x.png"), "x.png");
    }

    #[test]
    fn storage_path_joins_folder() {
        assert_eq!(
            storage().storage_path("001-2.css"),
            "category-a/clippings/assets/001-2.css"
        );
    }

    #[test]
    fn url_path_segments() {
        assert_eq!(
            filename_from_url_path("https://a.org/a/b/font.woff2?v=3").as_deref(),
            Some("font.woff2")
        );
        assert_eq!(filename_from_url_path("https://a.org/"), None);
    }

    #[test]
    fn extensions() {
        assert_eq!(extension_from_url("https://a.org/x/Bg.PNG").as_deref(), Some("png"));
        assert_eq!(extension_from_url("https://a.org/f.woff2#iefix").as_deref(), Some("woff2"));
        assert_eq!(extension_from_url("https://a.org/font"), None);
        assert_eq!(extension_from_url("https://a.org/.hidden"), None);
        assert_eq!(extension_from_url("https://a.org/x.we!rd"), None);
    }
}
