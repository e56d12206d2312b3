use msgstyle_core::{FontDescriptor, ResolvedRun, Style as TextStyle, TextStyle as Category};
use ratatui::prelude::*;

use crate::theme::Theme;

/// Glyph drawn in place of each char of a hidden spoiler.
pub const SPOILER_GLYPH: char = '░';

pub fn font_modifiers(font: FontDescriptor) -> Modifier {
    let mut modifiers = Modifier::empty();
    if font.is_bold() || font.style == Category::Headline {
        modifiers |= Modifier::BOLD;
    }
    if font.style == Category::Caption {
        modifiers |= Modifier::DIM;
    }
    modifiers
}

pub fn style_modifiers(style: TextStyle) -> Modifier {
    let mut modifiers = Modifier::empty();
    if style.bold {
        modifiers |= Modifier::BOLD;
    }
    if style.italic {
        modifiers |= Modifier::ITALIC;
    }
    if style.strikethrough {
        modifiers |= Modifier::CROSSED_OUT;
    }
    modifiers
}

pub fn run_style(run: &ResolvedRun, font: FontDescriptor, theme: &Theme) -> Style {
    let mut style = Style::default().fg(theme.color(run.foreground));
    if let Some(bg) = run.background {
        style = style.bg(theme.color(bg));
    }
    if run.obscured {
        return style;
    }
    style.add_modifier(font_modifiers(font) | style_modifiers(run.style))
}

#[cfg(test)]
mod tests {
    use super::*;
    use msgstyle_core::{FontWeight, Rgba};

    fn run(style: TextStyle, obscured: bool) -> ResolvedRun {
        ResolvedRun {
            text: "x".to_string(),
            style,
            foreground: Rgba::rgb(1, 2, 3),
            background: Some(Rgba::rgb(4, 5, 6)),
            obscured,
        }
    }

    #[test]
    fn heavy_fonts_are_bold() {
        assert!(font_modifiers(FontDescriptor::body().with_weight(FontWeight::Bold))
            .contains(Modifier::BOLD));
        assert_eq!(font_modifiers(FontDescriptor::body()), Modifier::empty());
    }

    #[test]
    fn inline_styles_map_to_modifiers() {
        let style = TextStyle {
            italic: true,
            strikethrough: true,
            ..Default::default()
        };
        let m = style_modifiers(style);
        assert!(m.contains(Modifier::ITALIC | Modifier::CROSSED_OUT));
        assert!(!m.contains(Modifier::BOLD));
    }

    #[test]
    fn obscured_runs_drop_modifiers() {
        let theme = Theme::default();
        let bold = TextStyle {
            bold: true,
            ..Default::default()
        };
        let style = run_style(&run(bold, true), FontDescriptor::body(), &theme);
        assert_eq!(style.add_modifier, Modifier::empty());
        assert_eq!(style.fg, Some(Color::Rgb(1, 2, 3)));
        assert_eq!(style.bg, Some(Color::Rgb(4, 5, 6)));

        let shown = run_style(&run(bold, false), FontDescriptor::body(), &theme);
        assert!(shown.add_modifier.contains(Modifier::BOLD));
    }
}
