use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::capture::{CaptureConfig, DEFAULT_MAX_IMPORT_DEPTH};
use crate::fetch::FetchOptions;
use crate::retry::RetryPolicy;

/// Retry policy parameters for the curl channel (optional `[retry]` section).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Maximum number of attempts per request (including the first).
    pub max_attempts: u32,
    /// Base delay in seconds for exponential backoff (e.g. 0.25 = 250ms).
    pub base_delay_secs: f64,
    /// Maximum backoff delay in seconds.
    pub max_delay_secs: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay_secs: 0.25,
            max_delay_secs: 10,
        }
    }
}

/// Transfer settings for the curl channel (optional `[fetch]` section).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    pub connect_timeout_secs: u64,
    pub timeout_secs: u64,
    /// Overrides the default `cssclip/<version>` user agent.
    pub user_agent: Option<String>,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            connect_timeout_secs: 15,
            timeout_secs: 60,
            user_agent: None,
        }
    }
}

/// Global configuration loaded from `~/.config/cssclip/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClipConfig {
    /// Capture fonts referenced from `@font-face` rules.
    pub save_web_font: bool,
    /// Capture images referenced from declarations (`background`, `border-image`, ...).
    pub save_css_image: bool,
    /// Ceiling on non-cyclic `@import` nesting.
    pub max_import_depth: usize,
    /// Path from the document's folder to the asset folder.
    pub asset_relative_path: String,
    pub fetch: Option<FetchConfig>,
    pub retry: Option<RetryConfig>,
}

impl Default for ClipConfig {
    fn default() -> Self {
        Self {
            save_web_font: false,
            save_css_image: false,
            max_import_depth: DEFAULT_MAX_IMPORT_DEPTH,
            asset_relative_path: "assets".to_string(),
            fetch: None,
            retry: None,
        }
    }
}

impl ClipConfig {
    pub fn capture_config(&self) -> CaptureConfig {
        CaptureConfig {
            save_web_font: self.save_web_font,
            save_css_image: self.save_css_image,
            max_import_depth: self.max_import_depth,
        }
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::from_config(&self.retry.clone().unwrap_or_default())
    }

    pub fn fetch_options(&self) -> FetchOptions {
        let fetch = self.fetch.clone().unwrap_or_default();
        let mut opts = FetchOptions {
            connect_timeout: Duration::from_secs(fetch.connect_timeout_secs),
            timeout: Duration::from_secs(fetch.timeout_secs),
            ..FetchOptions::default()
        };
        if let Some(ua) = fetch.user_agent {
            opts.user_agent = ua;
        }
        opts
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("cssclip")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<ClipConfig> {
    load_or_init_at(&config_path()?)
}

/// Like [`load_or_init`] for an explicit path.
pub fn load_or_init_at(path: &Path) -> Result<ClipConfig> {
    if !path.exists() {
        let default_cfg = ClipConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml).with_context(|| format!("write {}", path.display()))?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: ClipConfig =
        toml::from_str(&data).with_context(|| format!("parse {}", path.display()))?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let cfg = ClipConfig::default();
        assert!(!cfg.save_web_font);
        assert!(!cfg.save_css_image);
        assert_eq!(cfg.max_import_depth, 32);
        assert_eq!(cfg.asset_relative_path, "assets");
        assert_eq!(cfg.capture_config(), CaptureConfig::default());
    }

    #[test]
    fn config_toml_custom_values() {
        let toml = r#"
            save_web_font = true
            save_css_image = true
            max_import_depth = 8
            asset_relative_path = "files"
        "#;
        let cfg: ClipConfig = toml::from_str(toml).unwrap();
        assert!(cfg.save_web_font);
        assert!(cfg.save_css_image);
        assert_eq!(cfg.max_import_depth, 8);
        assert_eq!(cfg.asset_relative_path, "files");
        assert!(cfg.fetch.is_none());
        assert!(cfg.retry.is_none());
    }

    #[test]
    fn config_toml_partial_uses_defaults() {
        let toml = r#"
            save_css_image = true

            [retry]
            max_attempts = 5
        "#;
        let cfg: ClipConfig = toml::from_str(toml).unwrap();
        assert!(!cfg.save_web_font);
        assert!(cfg.save_css_image);
        assert_eq!(cfg.max_import_depth, DEFAULT_MAX_IMPORT_DEPTH);
        assert_eq!(cfg.asset_relative_path, "assets");
        let retry = cfg.retry.as_ref().unwrap();
        assert_eq!(retry.max_attempts, 5);
        assert_eq!(retry.max_delay_secs, 10);
    }

    #[test]
    fn config_toml_fetch_and_retry() {
        let toml = r#"
            save_web_font = false
            save_css_image = false
            max_import_depth = 32
            asset_relative_path = "assets"

            [fetch]
            connect_timeout_secs = 5
            timeout_secs = 20
            user_agent = "clipper/1.0"

            [retry]
            max_attempts = 4
            base_delay_secs = 0.5
            max_delay_secs = 15
        "#;
        let cfg: ClipConfig = toml::from_str(toml).unwrap();
        let opts = cfg.fetch_options();
        assert_eq!(opts.connect_timeout, Duration::from_secs(5));
        assert_eq!(opts.timeout, Duration::from_secs(20));
        assert_eq!(opts.user_agent, "clipper/1.0");
        let policy = cfg.retry_policy();
        assert_eq!(policy.max_attempts, 4);
        assert_eq!(policy.base_delay, Duration::from_millis(500));
        assert_eq!(policy.max_delay, Duration::from_secs(15));
    }

    #[test]
    fn load_or_init_creates_then_reads() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let created = load_or_init_at(&path).unwrap();
        assert!(path.exists());
        assert!(!created.save_web_font);

        std::fs::write(
            &path,
            "save_web_font = true\nmax_import_depth = 4\nasset_relative_path = \"a\"\n",
        )
        .unwrap();
        let loaded = load_or_init_at(&path).unwrap();
        assert!(loaded.save_web_font);
        assert_eq!(loaded.max_import_depth, 4);
    }

    #[test]
    fn load_reads_hand_written_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "max_import_depth = 6\n").unwrap();
        let loaded = load_or_init_at(&path).unwrap();
        assert_eq!(loaded.max_import_depth, 6);
        assert!(!loaded.save_web_font);
        assert_eq!(loaded.asset_relative_path, "assets");
    }
}
