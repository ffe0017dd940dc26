//! Task: one captured resource handed to the asset registry.

use serde::{Deserialize, Serialize};

/// A resource that must be persisted for the capture to work offline.
///
/// Stylesheets carry their rewritten body in `text`; fonts and images carry
/// only the URL and are fetched by the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Absolute URL the resource was captured from.
    pub url: String,
    /// Storage path, `<asset folder>/<name>`.
    pub filename: String,
    pub mime_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl Task {
    /// Last segment of the storage path (the name references are rewritten to).
    pub fn name(&self) -> &str {
        self.filename.rsplit('/').next().unwrap_or(&self.filename)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_is_last_segment() {
        let t = Task {
            url: "https://a.org/x.css".to_string(),
            filename: "category-a/clippings/assets/001-1.css".to_string(),
            mime_type: "text/css".to_string(),
            text: Some(String::new()),
        };
        assert_eq!(t.name(), "001-1.css");
    }

    #[test]
    fn json_shape() {
        let t = Task {
            url: "https://a.org/f.woff".to_string(),
            filename: "assets/001-1.woff".to_string(),
            mime_type: "font/woff".to_string(),
            text: None,
        };
        let v = serde_json::to_value(&t).unwrap();
        assert_eq!(v["mimeType"], "font/woff");
        assert_eq!(v["filename"], "assets/001-1.woff");
        assert!(v.get("text").is_none());
        let back: Task = serde_json::from_value(v).unwrap();
        assert_eq!(back, t);
    }
}
