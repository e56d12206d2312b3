//! Apply a [`DisplayConfiguration`] to a [`MessageBody`].
//!
//! Hydration cuts the text into runs at every range boundary and records what
//! each run is (mention, spoiler, search hit, inline style). Color resolution
//! is a separate step so a hydrated body can be re-resolved after a theme
//! switch.

use std::collections::BTreeSet;

use crate::body::{MessageBody, RangeKind, Style, StyleId};
use crate::color::{AppearanceMode, Rgba, ThemedColor};
use crate::display::DisplayConfiguration;
use crate::font::FontDescriptor;
use crate::palette::Palette;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpoilerState {
    Revealed,
    Hidden,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Run {
    pub text: String,
    pub style: Style,
    pub mention: bool,
    pub spoiler: Option<SpoilerState>,
    pub search_hit: bool,
}

impl Run {
    pub fn is_hidden(&self) -> bool {
        self.spoiler == Some(SpoilerState::Hidden)
    }
}

/// A run with concrete colors for one appearance mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRun {
    pub text: String,
    pub style: Style,
    pub foreground: Rgba,
    pub background: Option<Rgba>,
    /// Text must be drawn obfuscated; `text` is still the original content.
    pub obscured: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HydratedBody {
    runs: Vec<Run>,
    font: FontDescriptor,
    text_color: ThemedColor,
    mention_bg: Option<ThemedColor>,
    revealed_spoiler_bg: Option<ThemedColor>,
    search_fg: Option<ThemedColor>,
    search_bg: Option<ThemedColor>,
    obfuscation: ThemedColor,
}

impl HydratedBody {
    pub fn runs(&self) -> &[Run] {
        &self.runs
    }

    pub fn font(&self) -> FontDescriptor {
        self.font
    }

    pub fn plain_text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }

    pub fn resolve(&self, mode: AppearanceMode) -> Vec<ResolvedRun> {
        self.runs.iter().map(|run| self.resolve_run(run, mode)).collect()
    }

    fn resolve_run(&self, run: &Run, mode: AppearanceMode) -> ResolvedRun {
        let mut foreground = self.text_color.resolve(mode);
        let mut background = None;

        if run.mention {
            background = self.mention_bg.map(|c| c.resolve(mode));
        }
        if run.search_hit {
            if let Some(fg) = self.search_fg {
                foreground = fg.resolve(mode);
            }
            if let Some(bg) = self.search_bg {
                background = Some(bg.resolve(mode));
            }
        }

        let obscured = match run.spoiler {
            Some(SpoilerState::Hidden) => {
                let cover = self.obfuscation.resolve(mode);
                foreground = cover;
                background = Some(cover);
                true
            }
            Some(SpoilerState::Revealed) => {
                if let Some(bg) = self.revealed_spoiler_bg {
                    background = Some(bg.resolve(mode));
                }
                false
            }
            None => false,
        };

        ResolvedRun {
            text: run.text.clone(),
            style: run.style,
            foreground,
            background,
            obscured,
        }
    }
}

pub fn hydrate(body: &MessageBody, config: &DisplayConfiguration) -> HydratedBody {
    hydrate_with(body, config, &Palette::STANDARD)
}

pub fn hydrate_with(
    body: &MessageBody,
    config: &DisplayConfiguration,
    palette: &Palette,
) -> HydratedBody {
    let chars: Vec<char> = body.text().chars().collect();
    let search = config.search_ranges();

    let mut cuts = BTreeSet::new();
    cuts.insert(0);
    cuts.insert(chars.len());
    for range in body.ranges() {
        cuts.insert(range.start);
        cuts.insert(range.end());
    }
    if let Some(search) = search {
        for hit in &search.matched {
            cuts.insert(hit.start.min(chars.len()));
            cuts.insert(hit.end.min(chars.len()));
        }
    }

    let cuts: Vec<usize> = cuts.into_iter().collect();
    let mut runs: Vec<Run> = Vec::new();

    for pair in cuts.windows(2) {
        let (start, end) = (pair[0], pair[1]);
        if start >= end {
            continue;
        }

        let mut style = Style::default();
        let mut mention = false;
        let mut spoiler: Option<&StyleId> = None;
        for range in body.ranges() {
            if range.start > start || range.end() < end {
                continue;
            }
            match &range.kind {
                RangeKind::Mention { .. } => mention = true,
                RangeKind::Spoiler { id } => spoiler = spoiler.or(Some(id)),
                RangeKind::Style(s) => style = style.union(*s),
            }
        }

        let spoiler = spoiler.map(|id| {
            if config.is_spoiler_revealed(id) {
                SpoilerState::Revealed
            } else {
                SpoilerState::Hidden
            }
        });
        let search_hit = search.is_some_and(|s| s.contains(start));
        let text: String = chars[start..end].iter().collect();

        let run = Run {
            text,
            style,
            mention,
            spoiler,
            search_hit,
        };
        match runs.last_mut() {
            Some(prev) if same_attributes(prev, &run) => prev.text.push_str(&run.text),
            _ => runs.push(run),
        }
    }

    tracing::trace!(runs = runs.len(), "hydrated message body");

    HydratedBody {
        runs,
        font: config.base_font(),
        text_color: config.base_text_color(),
        mention_bg: config.mention_background_color(),
        revealed_spoiler_bg: config.revealed_spoiler_background_color(),
        search_fg: search.map(|s| s.foreground),
        search_bg: search.map(|s| s.background),
        obfuscation: palette.spoiler_obfuscation,
    }
}

fn same_attributes(a: &Run, b: &Run) -> bool {
    a.style == b.style
        && a.mention == b.mention
        && a.spoiler == b.spoiler
        && a.search_hit == b.search_hit
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::{BodyRange, SearchRanges};
    use crate::palette;

    fn sample() -> MessageBody {
        MessageBody::new(
            "hey @Ana the ending is a twist",
            vec![
                BodyRange::mention(4, 4, "Ana"),
                BodyRange::spoiler(13, 17, "7"),
            ],
        )
        .unwrap()
    }

    fn revealed(ids: &[&str]) -> BTreeSet<StyleId> {
        ids.iter().map(|s| StyleId::from(*s)).collect()
    }

    #[test]
    fn splits_at_range_boundaries() {
        let body = sample();
        let hydrated = hydrate(&body, &DisplayConfiguration::composing());
        let texts: Vec<&str> = hydrated.runs().iter().map(|r| r.text.as_str()).collect();
        assert_eq!(texts, vec!["hey ", "@Ana", " the ", "ending is a twist"]);
        assert_eq!(hydrated.plain_text(), body.text());
        assert!(hydrated.runs()[1].mention);
    }

    #[test]
    fn spoiler_state_follows_the_configuration() {
        let body = sample();
        let shown = hydrate(&body, &DisplayConfiguration::message_bubble(true, revealed(&["7"]), None));
        assert_eq!(shown.runs()[3].spoiler, Some(SpoilerState::Revealed));

        let hidden = hydrate(&body, &DisplayConfiguration::message_bubble(true, revealed(&["8"]), None));
        assert!(hidden.runs()[3].is_hidden());

        let quoted = hydrate(
            &body,
            &DisplayConfiguration::quoted_reply(FontDescriptor::body(), Palette::STANDARD.primary_text),
        );
        assert!(quoted.runs()[3].is_hidden());
    }

    #[test]
    fn hidden_spoiler_is_obscured_over_everything() {
        let body = MessageBody::new(
            "see @Bo",
            vec![BodyRange::mention(4, 3, "Bo"), BodyRange::spoiler(0, 7, "s")],
        )
        .unwrap();
        let search = SearchRanges::for_query(body.text(), "see");
        let config = DisplayConfiguration::message_bubble(true, BTreeSet::new(), Some(search));
        let resolved = hydrate(&body, &config).resolve(AppearanceMode::Dark);
        let cover = Palette::STANDARD.spoiler_obfuscation.resolve(AppearanceMode::Dark);
        for run in &resolved {
            assert!(run.obscured);
            assert_eq!(run.foreground, cover);
            assert_eq!(run.background, Some(cover));
        }
    }

    #[test]
    fn revealed_spoiler_gets_its_background() {
        let body = sample();
        let resolved = hydrate(&body, &DisplayConfiguration::composing()).resolve(AppearanceMode::Light);
        let spoiler = &resolved[3];
        assert!(!spoiler.obscured);
        assert_eq!(spoiler.background, Some(palette::GRAY_20));
        assert_eq!(resolved[0].background, None);
        assert_eq!(resolved[1].background, Some(palette::GRAY_20));
    }

    #[test]
    fn mentions_without_background_render_plain() {
        let body = sample();
        let config = DisplayConfiguration::quoted_reply(
            FontDescriptor::body(),
            Palette::STANDARD.primary_text,
        );
        let resolved = hydrate(&body, &config).resolve(AppearanceMode::Light);
        assert_eq!(resolved[1].background, None);
        assert_eq!(resolved[1].foreground, palette::LIGHT_PRIMARY);
    }

    #[test]
    fn search_hits_are_highlighted() {
        let body = MessageBody::plain("find the needle here");
        let search = SearchRanges::for_query(body.text(), "needle");
        let config = DisplayConfiguration::message_bubble(false, BTreeSet::new(), Some(search));
        let hydrated = hydrate(&body, &config);
        let texts: Vec<&str> = hydrated.runs().iter().map(|r| r.text.as_str()).collect();
        assert_eq!(texts, vec!["find the ", "needle", " here"]);
        let resolved = hydrated.resolve(AppearanceMode::Light);
        assert_eq!(resolved[1].background, Some(palette::SEARCH_YELLOW));
        assert_eq!(resolved[1].foreground, palette::BLACK);
        assert_eq!(resolved[0].foreground, palette::WHITE);
    }

    #[test]
    fn overlapping_styles_combine() {
        let bold = Style {
            bold: true,
            ..Default::default()
        };
        let italic = Style {
            italic: true,
            ..Default::default()
        };
        let body = MessageBody::new(
            "abcdef",
            vec![BodyRange::style(0, 4, bold), BodyRange::style(2, 4, italic)],
        )
        .unwrap();
        let hydrated = hydrate(&body, &DisplayConfiguration::composing());
        let runs = hydrated.runs();
        assert_eq!(runs.len(), 3);
        assert_eq!(runs[1].text, "cd");
        assert!(runs[1].style.bold && runs[1].style.italic);
        assert!(!runs[2].style.bold && runs[2].style.italic);
    }

    #[test]
    fn same_hydration_resolves_per_mode() {
        let body = sample();
        let hydrated = hydrate(&body, &DisplayConfiguration::long_message_view(BTreeSet::new()));
        let light = hydrated.resolve(AppearanceMode::Light);
        let dark = hydrated.resolve(AppearanceMode::Dark);
        assert_eq!(light[0].foreground, palette::LIGHT_PRIMARY);
        assert_eq!(dark[0].foreground, palette::DARK_PRIMARY);
        assert_eq!(dark[1].background, Some(palette::SIGNAL_BLUE_DARK));
    }

    #[test]
    fn empty_body_has_no_runs() {
        let hydrated = hydrate(&MessageBody::plain(""), &DisplayConfiguration::composing());
        assert!(hydrated.runs().is_empty());
    }
}
