use msgstyle_core::{AppearanceMode, Palette, Rgba};
use ratatui::style::Color;

/// Concrete terminal colors for one appearance mode.
#[derive(Debug, Clone)]
pub struct Theme {
    pub mode: AppearanceMode,
    pub palette: Palette,
}

impl Theme {
    pub fn new(mode: AppearanceMode, palette: Palette) -> Self {
        Self { mode, palette }
    }

    pub fn backdrop(&self) -> Rgba {
        self.palette.background.resolve(self.mode)
    }

    /// Convert a resolved color, flattening any alpha over the page background.
    pub fn color(&self, rgba: Rgba) -> Color {
        to_color(rgba, self.backdrop())
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::new(AppearanceMode::default(), Palette::STANDARD)
    }
}

pub fn to_color(rgba: Rgba, backdrop: Rgba) -> Color {
    let flat = rgba.composite_over(backdrop.composite_over(Rgba::rgb(0, 0, 0)));
    Color::Rgb(flat.r, flat.g, flat.b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use msgstyle_core::palette;

    #[test]
    fn page_background_follows_mode() {
        let light = Theme::new(AppearanceMode::Light, Palette::STANDARD);
        let dark = Theme::new(AppearanceMode::Dark, Palette::STANDARD);
        assert_eq!(light.color(light.backdrop()), Color::Rgb(255, 255, 255));
        assert_eq!(dark.color(dark.backdrop()), Color::Rgb(0, 0, 0));
    }

    #[test]
    fn translucent_colors_are_flattened() {
        let light = Theme::new(AppearanceMode::Light, Palette::STANDARD);
        assert_eq!(light.color(palette::BLACK_ALPHA_25), Color::Rgb(191, 191, 191));
    }

    #[test]
    fn same_token_differs_between_modes() {
        let text = Palette::STANDARD.primary_text;
        let light = Theme::new(AppearanceMode::Light, Palette::STANDARD);
        let dark = Theme::new(AppearanceMode::Dark, Palette::STANDARD);
        assert_ne!(
            light.color(text.resolve(light.mode)),
            dark.color(text.resolve(dark.mode))
        );
    }
}
