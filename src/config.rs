//! Site configuration module.
//!
//! Handles loading and validating `config.toml`. Configuration is flat: one
//! file in the working directory (or passed via `--config`), sparse —
//! override just the values you want. Unknown keys are rejected to catch
//! typos early.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [site]
//! title = "Mind's Eye Photography"
//! tagline = "Where Moments Meet Imagination"
//!
//! [api]
//! base_url = "http://localhost:5000"   # Content manager root
//! timeout_secs = 10                    # Per-request timeout
//!
//! [assets]
//! prefix = "/data"                     # Static-asset path prefix
//!
//! [gallery]
//! page_size = 12                       # Images per portfolio page
//!
//! [fallbacks]
//! # Hand-authored baselines shown when remote content is empty or
//! # unavailable. Never an error screen.
//! about_title = "About the Photographer"
//! about_body = "..."
//! background_color = "#0f172a"
//! featured_note = "No featured image has been set yet."
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `config.toml`.
///
/// All fields have sensible defaults. User config files need only specify
/// the values they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Site identity shown in headers and page titles.
    pub site: SiteIdentity,
    /// Content-manager API transport settings.
    pub api: ApiConfig,
    /// Static-asset resolution settings.
    pub assets: AssetsConfig,
    /// Gallery presentation settings.
    pub gallery: GalleryConfig,
    /// Hand-authored fallback baselines.
    pub fallbacks: FallbacksConfig,
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.gallery.page_size == 0 {
            return Err(ConfigError::Validation(
                "gallery.page_size must be at least 1".into(),
            ));
        }
        if self.api.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "api.timeout_secs must be at least 1".into(),
            ));
        }
        if self.api.base_url.trim().is_empty() {
            return Err(ConfigError::Validation("api.base_url must not be empty".into()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteIdentity {
    pub title: String,
    pub tagline: String,
}

impl Default for SiteIdentity {
    fn default() -> Self {
        Self {
            title: "Mind's Eye Photography".to_string(),
            tagline: "Where Moments Meet Imagination".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ApiConfig {
    /// Root URL of the content-management API.
    pub base_url: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
            timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AssetsConfig {
    /// Path prefix bare filenames resolve against.
    pub prefix: String,
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            prefix: "/data".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GalleryConfig {
    /// Images per portfolio page.
    pub page_size: usize,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            page_size: crate::gallery::DEFAULT_PAGE_SIZE,
        }
    }
}

/// Baselines presented when remote content is empty or unavailable.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FallbacksConfig {
    pub about_title: String,
    /// Markdown subset (bold, italic, line breaks).
    pub about_body: String,
    /// Solid color behind the home view when no background image resolves.
    pub background_color: String,
    /// Placeholder copy for the featured view when nothing is set.
    pub featured_note: String,
}

impl Default for FallbacksConfig {
    fn default() -> Self {
        Self {
            about_title: "About the Photographer".to_string(),
            about_body: "Welcome! This portfolio is maintained through an external \
                         content manager; the biography has not been published yet."
                .to_string(),
            background_color: "#0f172a".to_string(),
            featured_note: "No featured image has been set yet.".to_string(),
        }
    }
}

/// Load configuration. An explicit path must exist; without one,
/// `config.toml` in the current directory is used when present, stock
/// defaults otherwise.
pub fn load_config(path: Option<&Path>) -> Result<SiteConfig, ConfigError> {
    let content = match path {
        Some(p) => fs::read_to_string(p)?,
        None => match fs::read_to_string("config.toml") {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let config = SiteConfig::default();
                config.validate()?;
                return Ok(config);
            }
            Err(e) => return Err(e.into()),
        },
    };
    let config: SiteConfig = toml::from_str(&content)?;
    config.validate()?;
    Ok(config)
}

/// Stock `config.toml` with all options documented, printed by
/// `showfolio gen-config`.
pub fn stock_config_toml() -> String {
    let defaults = FallbacksConfig::default();
    format!(
        r##"# showfolio configuration
# All options are optional - defaults shown below.

[site]
title = "Mind's Eye Photography"
tagline = "Where Moments Meet Imagination"

[api]
# Root URL of the content-management API.
base_url = "http://localhost:5000"
# Per-request timeout in seconds. One failed attempt falls back; no retries.
timeout_secs = 10

[assets]
# Bare image filenames resolve to <prefix>/<filename>.
prefix = "/data"

[gallery]
# Images per portfolio page.
page_size = 12

[fallbacks]
# Hand-authored baselines shown when remote content is empty or
# unavailable. Failures are logged, never rendered.
about_title = "About the Photographer"
about_body = "{about_body}"
background_color = "#0f172a"
featured_note = "No featured image has been set yet."
"##,
        about_body = defaults.about_body
    )
}
