use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use msgstyle_core::{AppearanceMode, Palette, Rgba, TypeScale};
use serde::{Deserialize, Serialize};

pub mod error;
pub mod prefs;

pub use error::ConfigError;
pub use prefs::{
    format_timeout, FilePreferences, MemoryPreferences, PreferenceKey, PreferenceStore,
    PrivacyConfig, SCREEN_LOCK_TIMEOUTS,
};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub appearance: AppearanceConfig,
    #[serde(default)]
    pub fonts: FontConfig,
    /// Palette overrides: `token`, `token_light` or `token_dark` to a hex color.
    #[serde(default)]
    pub colors: BTreeMap<String, String>,
    #[serde(default)]
    pub privacy: PrivacyConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppearanceConfig {
    #[serde(default)]
    pub mode: AppearanceMode,
}

fn default_scale() -> f32 {
    1.0
}

fn default_max_clamped_size() -> f32 {
    TypeScale::DEFAULT_MAX_CLAMPED_SIZE
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FontConfig {
    #[serde(default = "default_scale")]
    pub scale: f32,
    #[serde(default = "default_max_clamped_size")]
    pub max_clamped_size: f32,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            scale: default_scale(),
            max_clamped_size: default_max_clamped_size(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content =
                std::fs::read_to_string(path).context("Failed to read config file")?;
            let config = toml::from_str(&content).context("Failed to parse config file")?;
            tracing::debug!(path = %path.display(), "loaded config");
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("msgstyle")
    }

    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.toml")
    }

    pub fn ensure_dirs() -> Result<()> {
        std::fs::create_dir_all(Self::config_dir())?;
        Ok(())
    }

    pub fn save(&self) -> Result<()> {
        Self::ensure_dirs()?;
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, content).context("Failed to write config file")?;
        Ok(())
    }

    /// Persist only the appearance mode, keeping everything else in the file.
    pub fn save_appearance(path: &Path, mode: AppearanceMode) -> Result<()> {
        let mut config = Self::load_from(path)?;
        config.appearance.mode = mode;
        config.save_to(path)?;
        tracing::debug!(path = %path.display(), %mode, "saved appearance mode");
        Ok(())
    }

    /// The standard palette with `[colors]` overrides applied.
    pub fn palette(&self) -> Result<Palette, ConfigError> {
        let mut palette = Palette::STANDARD;
        let mut used = 0;

        for (name, slot) in palette.tokens_mut() {
            if let Some(color) = self.color_override(name)? {
                slot.light = color;
                slot.dark = color;
                used += 1;
            }
            if let Some(color) = self.color_override(&format!("{name}_light"))? {
                slot.light = color;
                used += 1;
            }
            if let Some(color) = self.color_override(&format!("{name}_dark"))? {
                slot.dark = color;
                used += 1;
            }
        }

        if used != self.colors.len() {
            let mut known = Palette::STANDARD;
            let names: Vec<&str> = known.tokens_mut().iter().map(|(n, _)| *n).collect();
            if let Some(unknown) = self
                .colors
                .keys()
                .find(|key| !is_token_key(key, &names))
            {
                return Err(ConfigError::UnknownColorToken(unknown.clone()));
            }
        }

        Ok(palette)
    }

    fn color_override(&self, key: &str) -> Result<Option<Rgba>, ConfigError> {
        match self.colors.get(key) {
            Some(hex) => Rgba::from_hex(hex)
                .map(Some)
                .map_err(|source| ConfigError::InvalidColor {
                    key: key.to_string(),
                    source,
                }),
            None => Ok(None),
        }
    }

    pub fn type_scale(&self) -> Result<TypeScale, ConfigError> {
        if !(self.fonts.scale > 0.0) {
            return Err(ConfigError::InvalidFontScale(self.fonts.scale));
        }
        Ok(TypeScale {
            scale: self.fonts.scale,
            max_clamped_size: self.fonts.max_clamped_size,
        })
    }
}

fn is_token_key(key: &str, names: &[&str]) -> bool {
    let base = key
        .strip_suffix("_light")
        .or_else(|| key.strip_suffix("_dark"))
        .unwrap_or(key);
    names.contains(&key) || names.contains(&base)
}
