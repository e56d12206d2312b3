use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::StyleError;

/// Active appearance of the host UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppearanceMode {
    Light,
    #[default]
    Dark,
}

impl AppearanceMode {
    pub const ALL: &[AppearanceMode] = &[AppearanceMode::Light, AppearanceMode::Dark];

    pub fn name(self) -> &'static str {
        match self {
            AppearanceMode::Light => "light",
            AppearanceMode::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            AppearanceMode::Light => AppearanceMode::Dark,
            AppearanceMode::Dark => AppearanceMode::Light,
        }
    }
}

impl fmt::Display for AppearanceMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AppearanceMode {
    type Err = StyleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(AppearanceMode::Light),
            "dark" => Ok(AppearanceMode::Dark),
            _ => Err(StyleError::UnknownMode(s.to_string())),
        }
    }
}

/// A concrete sRGB color with straight (non-premultiplied) alpha.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Grayscale color; `level` 0 is black and 255 is white.
    pub const fn white(level: u8, alpha: u8) -> Self {
        Self::rgba(level, level, level, alpha)
    }

    pub fn is_opaque(self) -> bool {
        self.a == 255
    }

    /// Alpha-blend this color over an opaque background.
    pub fn composite_over(self, background: Rgba) -> Rgba {
        if self.is_opaque() {
            return self;
        }
        Rgba::rgb(
            blend(self.r, background.r, self.a),
            blend(self.g, background.g, self.a),
            blend(self.b, background.b, self.a),
        )
    }

    pub fn from_hex(s: &str) -> Result<Self, StyleError> {
        let invalid = || StyleError::InvalidHex(s.to_string());
        let hex = s.trim();
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if !hex.is_ascii() || (hex.len() != 6 && hex.len() != 8) {
            return Err(invalid());
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
        let a = if hex.len() == 8 { channel(6)? } else { 255 };
        Ok(Rgba::rgba(channel(0)?, channel(2)?, channel(4)?, a))
    }

    pub fn to_hex(self) -> String {
        if self.is_opaque() {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

fn blend(fg: u8, bg: u8, alpha: u8) -> u8 {
    let a = alpha as u16;
    ((fg as u16 * a + bg as u16 * (255 - a)) / 255) as u8
}

/// A color with independent light and dark variants.
///
/// Resolution is deferred until render time, so a configuration holding a
/// `ThemedColor` follows a live light/dark switch without being rebuilt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ThemedColor {
    pub light: Rgba,
    pub dark: Rgba,
}

impl ThemedColor {
    pub const fn new(light: Rgba, dark: Rgba) -> Self {
        Self { light, dark }
    }

    /// A theme-independent color.
    pub const fn fixed(color: Rgba) -> Self {
        Self {
            light: color,
            dark: color,
        }
    }

    pub fn resolve(&self, mode: AppearanceMode) -> Rgba {
        match mode {
            AppearanceMode::Light => self.light,
            AppearanceMode::Dark => self.dark,
        }
    }

    pub fn is_fixed(&self) -> bool {
        self.light == self.dark
    }
}

impl From<Rgba> for ThemedColor {
    fn from(color: Rgba) -> Self {
        ThemedColor::fixed(color)
    }
}
