//! Site configuration module.
//!
//! Handles loading, validating, and merging `config.toml`. The file lives in
//! the content root and is layered over stock defaults, so it only needs the
//! keys it wants to change.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! site_title = "Portfolio"
//!
//! [gallery]
//! fade_ms = 150             # Lightbox cross-fade between images
//! eager_images = 6          # Thumbnails loaded immediately; the rest lazily
//!
//! [carousel]
//! autoplay_interval_ms = 10000
//!
//! [input]
//! swipe_threshold = 50      # Minimum horizontal travel (CSS px) for a swipe
//!
//! [colors.light]
//! background = "#ffffff"
//! text = "#1a1a1a"
//! text_muted = "#666666"    # Captions, project summaries
//! border = "#e0e0e0"
//! accent = "#2f5d8a"        # Active dot, buttons
//!
//! [colors.dark]
//! background = "#111111"
//! text = "#eeeeee"
//! text_muted = "#999999"
//! border = "#333333"
//! accent = "#7fb2e5"
//! ```
//!
//! ## Behaviour vs. presentation
//!
//! `[gallery]`, `[carousel]` and `[input]` steer the controllers at runtime.
//! They are bundled as a [`ViewerConfig`] and embedded in the generated page
//! as JSON, where the browser binding reads them back. Everything else only
//! affects the generated markup and CSS.
//!
//! Unknown keys are rejected to catch typos early.

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
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Page title and header text.
    pub site_title: String,
    /// Lightbox settings.
    pub gallery: GalleryConfig,
    /// Project carousel settings.
    pub carousel: CarouselConfig,
    /// Touch input settings.
    pub input: InputConfig,
    /// Color schemes for light and dark modes.
    pub colors: ColorConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            site_title: "Portfolio".to_string(),
            gallery: GalleryConfig::default(),
            carousel: CarouselConfig::default(),
            input: InputConfig::default(),
            colors: ColorConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.site_title.trim().is_empty() {
            return Err(ConfigError::Validation(
                "site_title must not be empty".into(),
            ));
        }
        self.viewer().validate()
    }

    /// The runtime behaviour subset handed to the browser.
    pub fn viewer(&self) -> ViewerConfig {
        ViewerConfig {
            gallery: self.gallery.clone(),
            carousel: self.carousel.clone(),
            input: self.input.clone(),
        }
    }
}

/// Controller settings shared between the generator and the browser binding.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ViewerConfig {
    pub gallery: GalleryConfig,
    pub carousel: CarouselConfig,
    pub input: InputConfig,
}

impl ViewerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.carousel.autoplay_interval_ms == 0 {
            return Err(ConfigError::Validation(
                "carousel.autoplay_interval_ms must be greater than 0".into(),
            ));
        }
        let threshold = self.input.swipe_threshold;
        if !threshold.is_finite() || threshold < 0.0 {
            return Err(ConfigError::Validation(
                "input.swipe_threshold must be a non-negative number".into(),
            ));
        }
        Ok(())
    }

    /// Parse and validate the JSON the generator embeds in the page.
    pub fn parse_embedded(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// The embedded config, or defaults when it is absent, malformed, or
    /// fails validation. A rejected config is logged, never fatal.
    pub fn from_embedded(text: Option<&str>) -> Self {
        match text.map(Self::parse_embedded) {
            None => Self::default(),
            Some(Ok(config)) => config,
            Some(Err(e)) => {
                tracing::warn!(error = %e, "ignoring embedded viewer config");
                Self::default()
            }
        }
    }

    pub fn fade(&self) -> Duration {
        Duration::from_millis(self.gallery.fade_ms)
    }

    pub fn autoplay_interval(&self) -> Duration {
        Duration::from_millis(self.carousel.autoplay_interval_ms)
    }
}

/// Lightbox settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GalleryConfig {
    /// Cross-fade between images in the lightbox, in milliseconds. `0` swaps
    /// instantly.
    pub fade_ms: u64,
    /// Number of leading thumbnails given a real `src`; the rest load lazily.
    pub eager_images: usize,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            fade_ms: 150,
            eager_images: 6,
        }
    }
}

/// Project carousel settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CarouselConfig {
    /// Autoplay period in milliseconds.
    pub autoplay_interval_ms: u64,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            autoplay_interval_ms: 10_000,
        }
    }
}

/// Touch input settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InputConfig {
    /// Horizontal travel a touch must exceed to count as a swipe.
    pub swipe_threshold: f64,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            swipe_threshold: crate::input::SWIPE_THRESHOLD,
        }
    }
}

/// Color configuration for light and dark modes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorConfig {
    /// Light mode color scheme.
    pub light: ColorScheme,
    /// Dark mode color scheme.
    pub dark: ColorScheme,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            light: ColorScheme::default_light(),
            dark: ColorScheme::default_dark(),
        }
    }
}

/// Individual color scheme (light or dark).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorScheme {
    pub background: String,
    pub text: String,
    /// Secondary text (captions, project summaries).
    pub text_muted: String,
    pub border: String,
    /// Active indicator dot and controls.
    pub accent: String,
}

impl ColorScheme {
    pub fn default_light() -> Self {
        Self {
            background: "#ffffff".to_string(),
            text: "#1a1a1a".to_string(),
            text_muted: "#666666".to_string(),
            border: "#e0e0e0".to_string(),
            accent: "#2f5d8a".to_string(),
        }
    }

    pub fn default_dark() -> Self {
        Self {
            background: "#111111".to_string(),
            text: "#eeeeee".to_string(),
            text_muted: "#999999".to_string(),
            border: "#333333".to_string(),
            accent: "#7fb2e5".to_string(),
        }
    }
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self::default_light()
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(SiteConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// Tables merge key by key; any other overlay value replaces the base value.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `config.toml` from a directory as a raw TOML value, if present.
pub fn load_raw_config(dir: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = dir.join("config.toml");
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    Ok(Some(toml::from_str(&content)?))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<SiteConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `config.toml` in the content root, over stock defaults.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    resolve_config(stock_defaults_value(), load_raw_config(root)?)
}

/// Returns a fully-commented stock `config.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Portfolio Viewer Configuration
# ==============================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys will cause an error.

# Page title and header text.
site_title = "Portfolio"

# ---------------------------------------------------------------------------
# Gallery lightbox
# ---------------------------------------------------------------------------
[gallery]
# Cross-fade between images in the lightbox, in milliseconds (0 = instant).
fade_ms = 150

# Thumbnails given a real src up front. Later ones load when scrolled into view.
eager_images = 6

# ---------------------------------------------------------------------------
# Project carousel
# ---------------------------------------------------------------------------
[carousel]
# Time each project stays on screen before autoplay advances, in milliseconds.
autoplay_interval_ms = 10000

# ---------------------------------------------------------------------------
# Touch input
# ---------------------------------------------------------------------------
[input]
# Horizontal travel (CSS px) a touch must exceed to count as a swipe.
swipe_threshold = 50.0

# ---------------------------------------------------------------------------
# Colors - Light mode (prefers-color-scheme: light)
# ---------------------------------------------------------------------------
[colors.light]
background = "#ffffff"
text = "#1a1a1a"
text_muted = "#666666"    # Captions, project summaries
border = "#e0e0e0"
accent = "#2f5d8a"        # Active dot, buttons

# ---------------------------------------------------------------------------
# Colors - Dark mode (prefers-color-scheme: dark)
# ---------------------------------------------------------------------------
[colors.dark]
background = "#111111"
text = "#eeeeee"
text_muted = "#999999"
border = "#333333"
accent = "#7fb2e5"
"##
}

/// Generate CSS custom properties from color config.
pub fn generate_color_css(colors: &ColorConfig) -> String {
    format!(
        r#":root {{
    --color-bg: {light_bg};
    --color-text: {light_text};
    --color-text-muted: {light_text_muted};
    --color-border: {light_border};
    --color-accent: {light_accent};
}}

@media (prefers-color-scheme: dark) {{
    :root {{
        --color-bg: {dark_bg};
        --color-text: {dark_text};
        --color-text-muted: {dark_text_muted};
        --color-border: {dark_border};
        --color-accent: {dark_accent};
    }}
}}"#,
        light_bg = colors.light.background,
        light_text = colors.light.text,
        light_text_muted = colors.light.text_muted,
        light_border = colors.light.border,
        light_accent = colors.light.accent,
        dark_bg = colors.dark.background,
        dark_text = colors.dark.text,
        dark_text_muted = colors.dark.text_muted,
        dark_border = colors.dark.border,
        dark_accent = colors.dark.accent,
    )
}
