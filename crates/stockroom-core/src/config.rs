//! Configuration types for stockroom.
//!
//! [`Config::load`] reads `~/.config/stockroom/config.toml`, creating it with
//! hardcoded defaults if it does not yet exist. [`Config::load_from`] layers an
//! explicit file instead. [`Config::defaults`] returns the same defaults
//! without touching the filesystem (useful in tests).

use serde::Deserialize;
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG: &str = r#"
[ui]
bold_ids               = true
gallery_pane_width_pct = 35

[gallery]
base_path     = "../../static/images"
current_image = ".current-image"
images = [
    "homepage/warehouse.jpg",
    "homepage/shelves.jpg",
    "homepage/dispatch.jpg",
    "cats/cat1.png",
]

[search]
input = "search-box"

[[datasets]]
name         = "manufacturers"
list_id      = "manufacturer-list"
route_prefix = "/warehouse/manufacturers"
fields       = ["id", "name", "phone_number"]

[[datasets]]
name         = "medicines"
list_id      = "medicine-list"
route_prefix = "/warehouse/medicines"
fields       = ["id", "name"]

[[datasets]]
name         = "sales"
list_id      = "sale-list"
route_prefix = "/warehouse/sales"
fields       = ["id", "date_time"]

[[datasets]]
name         = "salts"
list_id      = "salt-list"
route_prefix = "/warehouse/salts"
fields       = ["id", "name"]
"#;

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

/// Top-level application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub gallery: GalleryConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub datasets: Vec<DatasetConfig>,
}

/// `[ui]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_bold_ids")]
    pub bold_ids: bool,
    #[serde(default = "default_gallery_pane_width_pct")]
    pub gallery_pane_width_pct: u16,
}

fn default_bold_ids() -> bool { true }
fn default_gallery_pane_width_pct() -> u16 { 35 }

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            bold_ids: default_bold_ids(),
            gallery_pane_width_pct: default_gallery_pane_width_pct(),
        }
    }
}

/// `[gallery]` section: where thumbnails resolve and which element shows them.
#[derive(Debug, Clone, Deserialize)]
pub struct GalleryConfig {
    #[serde(default = "default_base_path")]
    pub base_path: String,
    #[serde(default = "default_current_image")]
    pub current_image: String,
    /// Thumbnail paths relative to `base_path`, in display order.
    #[serde(default)]
    pub images: Vec<String>,
}

fn default_base_path() -> String { "../../static/images".to_string() }
fn default_current_image() -> String { ".current-image".to_string() }

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            base_path: default_base_path(),
            current_image: default_current_image(),
            images: Vec::new(),
        }
    }
}

/// `[search]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchConfig {
    /// Identifier of the search box element.
    #[serde(default = "default_search_input")]
    pub input: String,
}

fn default_search_input() -> String { "search-box".to_string() }

impl Default for SearchConfig {
    fn default() -> Self {
        Self { input: default_search_input() }
    }
}

/// One `[[datasets]]` entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DatasetConfig {
    pub name: String,
    /// Identifier of the destination result list.
    pub list_id: String,
    pub route_prefix: String,
    /// Fields searched and displayed, in order.
    pub fields: Vec<String>,
    /// JSON file holding an array of records. Falls back to the embedded demo
    /// data of the same name when unset.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Config {
    /// Load from `~/.config/stockroom/config.toml`, layered on top of the
    /// built-in defaults. Creates the file with defaults if it does not exist.
    pub fn load() -> anyhow::Result<Self> {
        let path = config_path();

        if !path.exists() {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&path, DEFAULT_CONFIG.trim_start())?;
        }

        Self::load_from(&path)
    }

    /// Layer `path` on top of the built-in defaults. A missing file is not an
    /// error.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let cfg: Self = config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .add_source(config::File::from(path).required(false))
            .build()?
            .try_deserialize()?;
        tracing::debug!(path = %path.display(), datasets = cfg.datasets.len(), "config loaded");
        Ok(cfg)
    }

    /// Return the built-in defaults without touching the filesystem.
    pub fn defaults() -> Self {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .build()
            .expect("built-in default config must be valid TOML")
            .try_deserialize()
            .expect("built-in default config must deserialize correctly")
    }

    pub fn dataset(&self, name: &str) -> Option<&DatasetConfig> {
        self.datasets.iter().find(|d| d.name == name)
    }
}

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

fn config_path() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".to_string()))
                .join(".config")
        })
        .join("stockroom")
        .join("config.toml")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_load() {
        let cfg = Config::defaults();
        assert!(cfg.ui.bold_ids);
        assert_eq!(cfg.gallery.base_path, "../../static/images");
        assert_eq!(cfg.gallery.current_image, ".current-image");
        assert_eq!(cfg.search.input, "search-box");
        assert_eq!(cfg.datasets.len(), 4);
        assert!(cfg.gallery.images.contains(&"cats/cat1.png".to_string()));
    }

    #[test]
    fn default_manufacturer_fields() {
        let cfg = Config::defaults();
        let m = cfg.dataset("manufacturers").unwrap();
        assert_eq!(m.fields, vec!["id", "name", "phone_number"]);
        assert_eq!(m.list_id, "manufacturer-list");
        assert_eq!(m.path, None);
        assert!(cfg.dataset("nope").is_none());
    }

    #[test]
    fn user_file_overrides_gallery() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[gallery]\nbase_path = \"/srv/images\"\n").unwrap();

        let cfg = Config::load_from(&path).unwrap();
        assert_eq!(cfg.gallery.base_path, "/srv/images");
        assert_eq!(cfg.gallery.current_image, ".current-image");
    }

    #[test]
    fn missing_user_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = Config::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(cfg.search.input, "search-box");
    }
}
