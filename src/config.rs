//! Site configuration module.
//!
//! Handles loading, validating, and merging the `config.toml` that sits next
//! to `data.json` in the site directory. Stock defaults are the base layer;
//! the user file only needs the keys it wants to override.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! data_file = "data.json"   # Page document, relative to the site directory
//! assets_dir = "assets"     # Copied verbatim to the output directory
//!
//! [page]
//! title = "Links"           # Document title until profile.name replaces it
//! lang = "en"
//! icon_stylesheet = "https://cdnjs.cloudflare.com/ajax/libs/font-awesome/6.5.1/css/all.min.css"
//!
//! [features]
//! gallery = true            # Render the optional gallery section
//! platform_classes = true   # Add social-link-<platform> classes
//!
//! [links]
//! stagger_ms = 100          # Per-card animation delay increment
//!
//! [gallery]
//! interval_ms = 3000        # Auto-scroll period
//! gap_px = 16               # Gap between gallery items
//! end_tolerance_px = 10     # Distance from the end that counts as "at the end"
//!
//! [colors]
//! accent = "#7c5cff"        # --accent
//! background = "#0f0f13"    # --bg-color
//! text = "#f4f4f6"          # --text-color
//!
//! [processing]
//! max_processes = 4         # Max parallel image probes (omit for auto = CPU cores)
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Name of the config file inside the site directory.
pub const CONFIG_FILENAME: &str = "config.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("TOML serialize error: {0}")]
    TomlSer(#[from] toml::ser::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `config.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Page document, relative to the site directory.
    pub data_file: String,
    /// Static assets directory, relative to the site directory.
    pub assets_dir: String,
    pub page: PageConfig,
    pub features: FeaturesConfig,
    pub links: LinksConfig,
    pub gallery: GalleryConfig,
    pub colors: ColorConfig,
    pub processing: ProcessingConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            data_file: "data.json".to_string(),
            assets_dir: "assets".to_string(),
            page: PageConfig::default(),
            features: FeaturesConfig::default(),
            links: LinksConfig::default(),
            gallery: GalleryConfig::default(),
            colors: ColorConfig::default(),
            processing: ProcessingConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.data_file.trim().is_empty() {
            return Err(ConfigError::Validation(
                "data_file must not be empty".into(),
            ));
        }
        if self.gallery.interval_ms == 0 {
            return Err(ConfigError::Validation(
                "gallery.interval_ms must be greater than 0".into(),
            ));
        }
        if self.links.stagger_ms > 10_000 {
            return Err(ConfigError::Validation(
                "links.stagger_ms must be at most 10000".into(),
            ));
        }
        Ok(())
    }
}

/// Document-level settings for the page shell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PageConfig {
    /// Title shown until a profile name replaces it.
    pub title: String,
    pub lang: String,
    /// Stylesheet providing the icon classes used by `icon` fields.
    /// Empty string disables the `<link>` tag.
    pub icon_stylesheet: String,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            title: "Links".to_string(),
            lang: "en".to_string(),
            icon_stylesheet:
                "https://cdnjs.cloudflare.com/ajax/libs/font-awesome/6.5.1/css/all.min.css"
                    .to_string(),
        }
    }
}

/// Optional page behaviours.
///
/// These replace what used to be two near-identical page variants: one with
/// a gallery and platform classes, one without.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FeaturesConfig {
    /// Render the gallery section when `data.json` has one.
    pub gallery: bool,
    /// Add a `social-link-<platform>` styling class to social links.
    pub platform_classes: bool,
}

impl Default for FeaturesConfig {
    fn default() -> Self {
        Self {
            gallery: true,
            platform_classes: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LinksConfig {
    /// Animation delay increment between consecutive link cards.
    pub stagger_ms: u32,
}

impl Default for LinksConfig {
    fn default() -> Self {
        Self { stagger_ms: 100 }
    }
}

/// Gallery auto-scroll settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GalleryConfig {
    /// Period between auto-scroll ticks.
    pub interval_ms: u32,
    /// Horizontal gap between gallery items, added to each advance.
    pub gap_px: u32,
    /// A scroll position this close to the end counts as the end.
    pub end_tolerance_px: u32,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            interval_ms: 3000,
            gap_px: 16,
            end_tolerance_px: 10,
        }
    }
}

/// Default values for the style variables a `theme` may override.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorConfig {
    /// `--accent`
    pub accent: String,
    /// `--bg-color`
    pub background: String,
    /// `--text-color`
    pub text: String,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            accent: "#7c5cff".to_string(),
            background: "#0f0f13".to_string(),
            text: "#f4f4f6".to_string(),
        }
    }
}

/// Parallel processing settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Maximum number of parallel image probes.
    /// When absent, defaults to the number of CPU cores.
    /// Values larger than the core count are clamped down.
    pub max_processes: Option<usize>,
}

/// Resolve the effective thread count from config.
///
/// - `None` → use all available cores
/// - `Some(n)` → use `min(n, cores)`, at least 1
pub fn effective_threads(config: &ProcessingConfig) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    config
        .max_processes
        .map(|n| n.clamp(1, cores))
        .unwrap_or(cores)
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    Ok(toml::Value::try_from(SiteConfig::default())?)
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
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

/// Load `config.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
pub fn load_raw_config(dir: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = dir.join(CONFIG_FILENAME);
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
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

/// Load config from `config.toml` in the site directory.
pub fn load_config(site_dir: &Path) -> Result<SiteConfig, ConfigError> {
    let base = stock_defaults_value()?;
    let overlay = load_raw_config(site_dir)?;
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `config.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# linkpage configuration
# =======================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys will cause an error.

# Page document, relative to the site directory.
data_file = "data.json"

# Static assets (avatar, gallery images, favicon) copied to the output root.
assets_dir = "assets"

# ---------------------------------------------------------------------------
# Page shell
# ---------------------------------------------------------------------------
[page]
# Document title until profile.name replaces it.
title = "Links"
lang = "en"
# Stylesheet providing the icon classes referenced by "icon" fields.
# Set to "" to leave it out.
icon_stylesheet = "https://cdnjs.cloudflare.com/ajax/libs/font-awesome/6.5.1/css/all.min.css"

# ---------------------------------------------------------------------------
# Optional features
# ---------------------------------------------------------------------------
[features]
# Render the image gallery when data.json has a "gallery" list.
gallery = true
# Add a social-link-<platform> class to each social icon.
platform_classes = true

# ---------------------------------------------------------------------------
# Link cards
# ---------------------------------------------------------------------------
[links]
# Animation delay added per card (card N starts N * stagger_ms later).
stagger_ms = 100

# ---------------------------------------------------------------------------
# Gallery auto-scroll
# ---------------------------------------------------------------------------
[gallery]
# Milliseconds between automatic advances.
interval_ms = 3000
# Gap between gallery items in pixels (must match the stylesheet).
gap_px = 16
# Within this many pixels of the end, the next tick snaps back to the start.
end_tolerance_px = 10

# ---------------------------------------------------------------------------
# Default colors (a "theme" in data.json overrides these)
# ---------------------------------------------------------------------------
[colors]
accent = "#7c5cff"
background = "#0f0f13"
text = "#f4f4f6"

# ---------------------------------------------------------------------------
# Processing
# ---------------------------------------------------------------------------
[processing]
# Maximum parallel workers used to read local gallery image sizes.
# Omit or comment out to auto-detect (= number of CPU cores).
# max_processes = 4
"##
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_values() {
        let config = SiteConfig::default();
        assert_eq!(config.data_file, "data.json");
        assert_eq!(config.assets_dir, "assets");
        assert_eq!(config.links.stagger_ms, 100);
        assert_eq!(config.gallery.interval_ms, 3000);
        assert_eq!(config.gallery.gap_px, 16);
        assert_eq!(config.gallery.end_tolerance_px, 10);
        assert!(config.features.gallery);
        assert!(config.features.platform_classes);
    }

    #[test]
    fn parse_partial_config() {
        let toml = r##"
[colors]
accent = "#ff0000"
"##;
        let config: SiteConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.colors.accent, "#ff0000");
        assert_eq!(config.colors.background, "#0f0f13");
        assert_eq!(config.gallery.interval_ms, 3000);
    }

    #[test]
    fn parse_feature_flags() {
        let toml = r#"
[features]
gallery = false
"#;
        let config: SiteConfig = toml::from_str(toml).unwrap();
        assert!(!config.features.gallery);
        assert!(config.features.platform_classes);
    }

    // =========================================================================
    // load_config tests
    // =========================================================================

    #[test]
    fn load_config_returns_default_when_no_file() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config, SiteConfig::default());
    }

    #[test]
    fn load_config_reads_file() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join(CONFIG_FILENAME),
            r#"
data_file = "bio.json"

[gallery]
interval_ms = 5000
"#,
        )
        .unwrap();

        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.data_file, "bio.json");
        assert_eq!(config.gallery.interval_ms, 5000);
        // Unspecified values stay at their defaults
        assert_eq!(config.gallery.gap_px, 16);
    }

    #[test]
    fn load_config_invalid_toml_is_error() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(CONFIG_FILENAME), "this is not valid toml [[[").unwrap();

        let result = load_config(tmp.path());
        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }

    #[test]
    fn load_config_validates_values() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join(CONFIG_FILENAME),
            r#"
[gallery]
interval_ms = 0
"#,
        )
        .unwrap();

        let result = load_config(tmp.path());
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    // =========================================================================
    // merge_toml tests
    // =========================================================================

    #[test]
    fn merge_toml_table_merge() {
        let base: toml::Value = toml::from_str(
            r#"
[gallery]
interval_ms = 3000
gap_px = 16
"#,
        )
        .unwrap();
        let overlay: toml::Value = toml::from_str(
            r#"
[gallery]
gap_px = 24
"#,
        )
        .unwrap();
        let merged = merge_toml(base, overlay);
        let gallery = merged.get("gallery").unwrap();
        assert_eq!(gallery.get("gap_px").unwrap().as_integer(), Some(24));
        assert_eq!(gallery.get("interval_ms").unwrap().as_integer(), Some(3000));
    }

    #[test]
    fn merge_toml_scalar_replaces_table() {
        let base: toml::Value = toml::from_str("[a]\nb = 1").unwrap();
        let overlay: toml::Value = toml::from_str("a = 5").unwrap();
        let merged = merge_toml(base, overlay);
        assert_eq!(merged.get("a").unwrap().as_integer(), Some(5));
    }

    // =========================================================================
    // Unknown key rejection / validation
    // =========================================================================

    #[test]
    fn unknown_key_rejected() {
        let result: Result<SiteConfig, _> = toml::from_str("[gallery]\nintervall_ms = 10");
        let err = result.unwrap_err().to_string();
        assert!(err.contains("unknown field"));
    }

    #[test]
    fn unknown_section_rejected() {
        let result: Result<SiteConfig, _> = toml::from_str("[galery]\ninterval_ms = 10");
        assert!(result.is_err());
    }

    #[test]
    fn validate_empty_data_file() {
        let mut config = SiteConfig::default();
        config.data_file = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_stagger_upper_bound() {
        let mut config = SiteConfig::default();
        config.links.stagger_ms = 10_000;
        assert!(config.validate().is_ok());
        config.links.stagger_ms = 10_001;
        assert!(config.validate().is_err());
    }

    #[test]
    fn effective_threads_user_constrains_down() {
        let config = ProcessingConfig {
            max_processes: Some(1),
        };
        assert_eq!(effective_threads(&config), 1);
    }

    #[test]
    fn effective_threads_zero_means_one() {
        let config = ProcessingConfig {
            max_processes: Some(0),
        };
        assert_eq!(effective_threads(&config), 1);
    }

    // =========================================================================
    // stock_config_toml tests
    // =========================================================================

    #[test]
    fn stock_config_toml_roundtrips_to_defaults() {
        let config: SiteConfig = toml::from_str(stock_config_toml()).unwrap();
        assert_eq!(config, SiteConfig::default());
    }

    #[test]
    fn stock_defaults_value_has_all_sections() {
        let val = stock_defaults_value().unwrap();
        for section in ["page", "features", "links", "gallery", "colors", "processing"] {
            assert!(val.get(section).is_some(), "missing [{section}]");
        }
    }
}
