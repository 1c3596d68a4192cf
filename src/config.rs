//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/dirtree/dirtree.toml`
//! 3. Environment variables: `DIRTREE_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::application::ApplicationError;
use crate::render::RenderOptions;

/// Unified configuration for dirtree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Annotate rendered trees with aggregate sizes
    pub show_sizes: bool,
    /// Suffix printed after sizes (default: none)
    pub size_unit: String,
    /// Layout file used when none is given on the command line
    pub layout: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            show_sizes: true,
            size_unit: String::new(),
            layout: None,
        }
    }
}

/// Raw settings for intermediate parsing (Option to detect "not specified").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub show_sizes: Option<bool>,
    pub size_unit: Option<String>,
    pub layout: Option<PathBuf>,
}

/// Get the XDG config directory for dirtree.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "dirtree").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("dirtree.toml"))
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Overlay wins where it specifies a value.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            show_sizes: overlay.show_sizes.unwrap_or(self.show_sizes),
            size_unit: overlay
                .size_unit
                .clone()
                .unwrap_or_else(|| self.size_unit.clone()),
            layout: overlay.layout.clone().or_else(|| self.layout.clone()),
        }
    }

    /// Load settings with layered precedence.
    pub fn load() -> Result<Self, ApplicationError> {
        Self::load_from(global_config_path().as_deref())
    }

    /// Load settings using `config_file` in place of the global config.
    pub fn load_from(config_file: Option<&Path>) -> Result<Self, ApplicationError> {
        // 1. Start with defaults
        let mut current = Self::default();

        // 2. Config file, if present
        if let Some(path) = config_file {
            if path.exists() {
                debug!(path = %path.display(), "loading config file");
                let raw = load_raw_settings(path)?;
                current = current.merge_with(&raw);
            }
        }

        // 3. Environment variables (explicit override)
        let mut settings = Self::apply_env_overrides(current)?;

        // 4. Expand ~ and $VARS in paths
        settings.expand_paths();

        Ok(settings)
    }

    fn expand_paths(&mut self) {
        if let Some(layout) = &self.layout {
            self.layout = Some(PathBuf::from(expand_env_vars(
                layout.to_string_lossy().as_ref(),
            )));
        }
    }

    /// Apply DIRTREE_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(Environment::with_prefix("DIRTREE").try_parsing(true))
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_bool("show_sizes") {
            settings.show_sizes = val;
        }
        if let Ok(val) = config.get_string("size_unit") {
            settings.size_unit = val;
        }
        if let Ok(val) = config.get_string("layout") {
            settings.layout = Some(PathBuf::from(val));
        }

        Ok(settings)
    }

    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            show_sizes: self.show_sizes,
            size_unit: self.size_unit.clone(),
        }
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# dirtree configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/dirtree/dirtree.toml
#   Env:    DIRTREE_* environment variables (explicit overrides)

# Annotate rendered trees with aggregate sizes
# show_sizes = true

# Suffix printed after sizes
# size_unit = "B"

# Layout used when no layout file is passed
# layout = "~/layouts/home.toml"
"#
        .to_string()
    }
}

/// Expand `~`, `$VAR` and `${VAR}` in a path string; left as is when a
/// variable is undefined.
pub fn expand_env_vars(path: &str) -> String {
    shellexpand::full(path)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| path.to_string())
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_defaults_when_created_then_sizes_shown_without_unit() {
        let settings = Settings::default();
        assert!(settings.show_sizes);
        assert!(settings.size_unit.is_empty());
        assert!(settings.layout.is_none());
    }

    #[test]
    fn given_partial_overlay_when_merging_then_keeps_unspecified_fields() {
        let base = Settings {
            show_sizes: true,
            size_unit: "B".into(),
            layout: Some(PathBuf::from("a.toml")),
        };
        let overlay = RawSettings {
            show_sizes: Some(false),
            ..Default::default()
        };

        let merged = base.merge_with(&overlay);
        assert!(!merged.show_sizes);
        assert_eq!(merged.size_unit, "B");
        assert_eq!(merged.layout, Some(PathBuf::from("a.toml")));
    }

    #[test]
    fn given_settings_when_serialized_then_roundtrips_through_raw() {
        let settings = Settings {
            show_sizes: false,
            size_unit: "KiB".into(),
            layout: None,
        };
        let text = settings.to_toml().unwrap();
        let raw: RawSettings = toml::from_str(&text).unwrap();
        assert_eq!(Settings::default().merge_with(&raw), settings);
    }

    #[test]
    fn given_tilde_in_layout_when_expand_paths_then_expands_to_home() {
        let mut settings = Settings {
            layout: Some(PathBuf::from("~/layouts/home.toml")),
            ..Default::default()
        };

        settings.expand_paths();

        let home = std::env::var("HOME").expect("HOME should be set");
        let layout = settings.layout.unwrap();
        let layout_str = layout.to_string_lossy();
        assert!(
            layout_str.starts_with(&home),
            "layout should start with home dir: {}",
            layout_str
        );
        assert!(
            !layout_str.contains('~'),
            "layout should not contain tilde: {}",
            layout_str
        );
        assert!(layout.ends_with("layouts/home.toml"));
    }

    #[test]
    fn given_no_layout_when_expand_paths_then_stays_unset() {
        let mut settings = Settings::default();
        settings.expand_paths();
        assert!(settings.layout.is_none());
    }

    #[test]
    fn given_template_when_parsed_then_is_valid_toml() {
        let raw: RawSettings = toml::from_str(&Settings::template()).unwrap();
        assert!(raw.show_sizes.is_none());
    }
}
