use std::fmt;
use std::str::FromStr;

use crate::error::StyleError;

/// Dynamic-type text categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextStyle {
    Body,
    Body2,
    /// Body text whose size stops growing past the clamp limit.
    BodyClamped,
    Caption,
    Headline,
}

impl TextStyle {
    pub const ALL: &[TextStyle] = &[
        TextStyle::Body,
        TextStyle::Body2,
        TextStyle::BodyClamped,
        TextStyle::Caption,
        TextStyle::Headline,
    ];

    pub fn name(self) -> &'static str {
        match self {
            TextStyle::Body => "body",
            TextStyle::Body2 => "body2",
            TextStyle::BodyClamped => "body-clamped",
            TextStyle::Caption => "caption",
            TextStyle::Headline => "headline",
        }
    }
}

impl fmt::Display for TextStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TextStyle {
    type Err = StyleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        TextStyle::ALL
            .iter()
            .copied()
            .find(|style| style.name() == normalized)
            .ok_or_else(|| StyleError::UnknownTextStyle(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum FontWeight {
    #[default]
    Regular,
    Medium,
    Semibold,
    Bold,
}

/// A semantic font: a text category plus a weight, sized later by a [`TypeScale`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FontDescriptor {
    pub style: TextStyle,
    pub weight: FontWeight,
}

impl FontDescriptor {
    pub const fn new(style: TextStyle) -> Self {
        Self {
            style,
            weight: FontWeight::Regular,
        }
    }

    /// The default base font for message text.
    pub const fn body() -> Self {
        Self::new(TextStyle::Body)
    }

    pub const fn body2() -> Self {
        Self::new(TextStyle::Body2)
    }

    pub const fn body_clamped() -> Self {
        Self::new(TextStyle::BodyClamped)
    }

    pub const fn with_weight(mut self, weight: FontWeight) -> Self {
        self.weight = weight;
        self
    }

    pub fn is_bold(&self) -> bool {
        self.weight >= FontWeight::Semibold
    }
}

impl Default for FontDescriptor {
    fn default() -> Self {
        Self::body()
    }
}

/// Point sizes for each [`TextStyle`] at a user-selected scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TypeScale {
    pub scale: f32,
    pub max_clamped_size: f32,
}

impl TypeScale {
    pub const DEFAULT_MAX_CLAMPED_SIZE: f32 = 21.0;

    pub fn point_size(&self, style: TextStyle) -> f32 {
        let base = match style {
            TextStyle::Body | TextStyle::BodyClamped => 17.0,
            TextStyle::Body2 => 15.0,
            TextStyle::Caption => 12.0,
            TextStyle::Headline => 17.0,
        };
        let size = base * self.scale;
        match style {
            TextStyle::BodyClamped => size.min(self.max_clamped_size),
            _ => size,
        }
    }

    pub fn font_size(&self, font: &FontDescriptor) -> f32 {
        self.point_size(font.style)
    }
}

impl Default for TypeScale {
    fn default() -> Self {
        Self {
            scale: 1.0,
            max_clamped_size: Self::DEFAULT_MAX_CLAMPED_SIZE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_style_names_parse() {
        for style in TextStyle::ALL {
            assert_eq!(style.name().parse::<TextStyle>().unwrap(), *style);
        }
        assert_eq!(
            "Body_Clamped".parse::<TextStyle>().unwrap(),
            TextStyle::BodyClamped
        );
        assert!(matches!(
            "title".parse::<TextStyle>(),
            Err(StyleError::UnknownTextStyle(_))
        ));
    }

    #[test]
    fn clamped_body_stops_growing() {
        let scale = TypeScale {
            scale: 2.0,
            ..Default::default()
        };
        assert_eq!(scale.point_size(TextStyle::Body), 34.0);
        assert_eq!(scale.point_size(TextStyle::BodyClamped), 21.0);
    }

    #[test]
    fn clamp_does_not_apply_below_limit() {
        let scale = TypeScale::default();
        assert_eq!(scale.point_size(TextStyle::BodyClamped), 17.0);
        assert_eq!(scale.font_size(&FontDescriptor::body2()), 15.0);
    }

    #[test]
    fn semibold_and_up_count_as_bold() {
        assert!(!FontDescriptor::body().is_bold());
        assert!(!FontDescriptor::body().with_weight(FontWeight::Medium).is_bold());
        assert!(FontDescriptor::body().with_weight(FontWeight::Semibold).is_bold());
    }
}
