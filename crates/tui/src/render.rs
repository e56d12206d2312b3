use msgstyle_core::{hydrate_with, DisplayConfiguration, FontDescriptor, MessageBody, ResolvedRun};
use ratatui::prelude::*;
use unicode_width::UnicodeWidthChar;

use crate::theme::Theme;
use crate::typography::{run_style, SPOILER_GLYPH};

/// Render a message body as terminal lines for the given configuration and theme.
pub fn render_body(
    body: &MessageBody,
    config: &DisplayConfiguration,
    theme: &Theme,
) -> Vec<Line<'static>> {
    let hydrated = hydrate_with(body, config, &theme.palette);
    to_lines(&hydrated.resolve(theme.mode), hydrated.font(), theme)
}

/// Split resolved runs into lines at `\n`, obfuscating hidden spoiler text.
pub fn to_lines(runs: &[ResolvedRun], font: FontDescriptor, theme: &Theme) -> Vec<Line<'static>> {
    let mut lines = vec![Line::default()];

    for run in runs {
        let style = run_style(run, font, theme);
        for (i, piece) in run.text.split('\n').enumerate() {
            if i > 0 {
                lines.push(Line::default());
            }
            if piece.is_empty() {
                continue;
            }
            let content = if run.obscured {
                obfuscate(piece)
            } else {
                piece.to_string()
            };
            if let Some(line) = lines.last_mut() {
                line.spans.push(Span::styled(content, style));
            }
        }
    }

    lines
}

/// One glyph per display column of `text`, so hidden spoilers keep their width.
fn obfuscate(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if c.is_whitespace() {
            out.push(c);
        } else {
            let cells = c.width().unwrap_or(0);
            out.extend(std::iter::repeat(SPOILER_GLYPH).take(cells));
        }
    }
    out
}

/// Width and height in cells of `body` laid out with `font`.
///
/// Everything is measured revealed; hidden spoilers, mentions and search hits
/// occupy the same space as plain text.
pub fn measure(body: &MessageBody, font: FontDescriptor) -> (u16, u16) {
    let config = DisplayConfiguration::for_measurement(font);
    let lines = render_body(body, &config, &Theme::default());
    let width = lines.iter().map(Line::width).max().unwrap_or(0);
    (
        u16::try_from(width).unwrap_or(u16::MAX),
        u16::try_from(lines.len()).unwrap_or(u16::MAX),
    )
}
