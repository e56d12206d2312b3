use std::io::Write;

use anyhow::Result;
use crossterm::style::{
    Attribute, Color as TermColor, ContentStyle, Print, PrintStyledContent, ResetColor,
    StyledContent,
};
use crossterm::QueueableCommand;
use ratatui::prelude::*;

/// Write styled lines to a terminal stream, one `Line` per output line.
pub fn print_lines<W: Write>(out: &mut W, lines: &[Line<'_>]) -> Result<()> {
    for line in lines {
        for span in &line.spans {
            out.queue(PrintStyledContent(styled(span)))?;
        }
        out.queue(ResetColor)?;
        out.queue(Print("\n"))?;
    }
    out.flush()?;
    Ok(())
}

fn styled(span: &Span<'_>) -> StyledContent<String> {
    let mut style = ContentStyle::new();
    style.foreground_color = span.style.fg.and_then(term_color);
    style.background_color = span.style.bg.and_then(term_color);

    let modifiers = span.style.add_modifier;
    for (modifier, attribute) in [
        (Modifier::BOLD, Attribute::Bold),
        (Modifier::DIM, Attribute::Dim),
        (Modifier::ITALIC, Attribute::Italic),
        (Modifier::CROSSED_OUT, Attribute::CrossedOut),
    ] {
        if modifiers.contains(modifier) {
            style.attributes.set(attribute);
        }
    }

    StyledContent::new(style, span.content.to_string())
}

fn term_color(color: Color) -> Option<TermColor> {
    match color {
        Color::Rgb(r, g, b) => Some(TermColor::Rgb { r, g, b }),
        Color::Reset => None,
        _ => {
            tracing::debug!(?color, "non-rgb color left to terminal default");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_text_and_newlines() {
        let lines = vec![
            Line::from(vec![
                Span::raw("plain "),
                Span::styled("bold", Style::default().fg(Color::Rgb(1, 2, 3)).bold()),
            ]),
            Line::from("second"),
        ];
        let mut out = Vec::new();
        print_lines(&mut out, &lines).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("plain "));
        assert!(text.contains("bold"));
        assert!(text.contains("second"));
        assert!(text.contains("\x1b[38;2;1;2;3m"));
        assert_eq!(text.matches('\n').count(), 2);
    }

    #[test]
    fn modifiers_become_attributes() {
        let span = Span::styled("x", Style::default().italic());
        let content = styled(&span);
        assert!(content.style().attributes.has(Attribute::Italic));
        assert!(!content.style().attributes.has(Attribute::Bold));
    }
}
