//! Site configuration management.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// Scroll offset (in pixels) past which the scroll-to-top control appears.
pub const DEFAULT_SHOW_UNDER: f64 = 160.0;

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Site-wide settings.
    pub site: SiteConfig,

    /// Build settings.
    #[serde(default)]
    pub build: BuildConfig,

    /// RSS feed settings.
    #[serde(default)]
    pub rss: RssConfig,

    /// Scroll-to-top control settings.
    #[serde(default)]
    pub scroll_up: ScrollUpConfig,
}

/// Site-wide configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Site title.
    pub title: String,

    /// Base URL for the site (e.g., "https://nance.io").
    pub base_url: String,

    /// Site description for meta tags and the feed.
    #[serde(default)]
    pub description: Option<String>,

    /// Language code for the `lang` attribute.
    #[serde(default = "default_language")]
    pub language: String,
}

/// Build configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildConfig {
    /// Directory holding JSON page bundles.
    #[serde(default = "default_bundle_dir")]
    pub bundle_dir: String,

    /// Output directory for generated site.
    #[serde(default = "default_output_dir")]
    pub output_dir: String,

    /// Static assets copied verbatim into the output.
    #[serde(default = "default_static_dir")]
    pub static_dir: String,
}

/// RSS feed configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RssConfig {
    /// Whether RSS feed is enabled.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Maximum number of items in feed.
    #[serde(default = "default_rss_limit")]
    pub limit: usize,
}

/// Scroll-to-top control configuration.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ScrollUpConfig {
    /// Offset in pixels the page must be scrolled past before the control shows.
    #[serde(default = "default_show_under")]
    pub show_under: f64,
}

fn default_language() -> String {
    "en".to_string()
}

fn default_bundle_dir() -> String {
    "bundles".to_string()
}

fn default_output_dir() -> String {
    "public".to_string()
}

fn default_static_dir() -> String {
    "static".to_string()
}

fn default_true() -> bool {
    true
}

fn default_rss_limit() -> usize {
    20
}

fn default_show_under() -> f64 {
    DEFAULT_SHOW_UNDER
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            bundle_dir: default_bundle_dir(),
            output_dir: default_output_dir(),
            static_dir: default_static_dir(),
        }
    }
}

impl Default for RssConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            limit: default_rss_limit(),
        }
    }
}

impl Default for ScrollUpConfig {
    fn default() -> Self {
        Self {
            show_under: DEFAULT_SHOW_UNDER,
        }
    }
}

impl Config {
    /// Build a configuration from just a title and base URL, with defaults elsewhere.
    pub fn new(title: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            site: SiteConfig {
                title: title.into(),
                base_url: base_url.into(),
                description: None,
                language: default_language(),
            },
            build: BuildConfig::default(),
            rss: RssConfig::default(),
            scroll_up: ScrollUpConfig::default(),
        }
    }

    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(CoreError::config(format!(
                "Configuration file not found: {}",
                path.display()
            )));
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content).map_err(|e| {
            CoreError::config_with_source(
                format!("Failed to parse config file: {}", path.display()),
                e,
            )
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration with `NANCEIO__SECTION__KEY` environment overrides.
    pub fn load_with_env(path: &Path) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::from(path))
            .add_source(config::Environment::with_prefix("NANCEIO").separator("__"))
            .build()?;

        let config: Config = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.site.title.is_empty() {
            return Err(CoreError::config("site.title cannot be empty"));
        }

        if self.site.base_url.is_empty() {
            return Err(CoreError::config("site.base_url cannot be empty"));
        }

        let show_under = self.scroll_up.show_under;
        if !show_under.is_finite() || show_under < 0.0 {
            return Err(CoreError::config(format!(
                "scroll_up.show_under must be a non-negative number, got {show_under}"
            )));
        }

        if self.site.base_url.ends_with('/') {
            tracing::warn!("site.base_url should not have a trailing slash");
        }

        Ok(())
    }

    /// Get the full URL for a path.
    pub fn url_for(&self, path: &str) -> String {
        let base = self.site.base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{base}/{path}")
    }
}
