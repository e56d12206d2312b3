use std::collections::HashSet;
use std::fmt;
use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::color::ThemedColor;
use crate::error::StyleError;
use crate::palette::Palette;

/// Opaque identifier correlating a spoiler span across reveal tracking and layout.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StyleId(String);

impl StyleId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for StyleId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for StyleId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl fmt::Display for StyleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Inline text styles. Overlapping style ranges combine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Style {
    pub bold: bool,
    pub italic: bool,
    pub strikethrough: bool,
    pub monospace: bool,
}

impl Style {
    pub fn union(self, other: Style) -> Style {
        Style {
            bold: self.bold || other.bold,
            italic: self.italic || other.italic,
            strikethrough: self.strikethrough || other.strikethrough,
            monospace: self.monospace || other.monospace,
        }
    }

    pub fn is_plain(&self) -> bool {
        *self == Style::default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RangeKind {
    Mention { name: String },
    Spoiler { id: StyleId },
    Style(Style),
}

/// A span of the body text, in chars.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BodyRange {
    pub start: usize,
    pub len: usize,
    pub kind: RangeKind,
}

impl BodyRange {
    pub fn new(start: usize, len: usize, kind: RangeKind) -> Self {
        Self { start, len, kind }
    }

    pub fn mention(start: usize, len: usize, name: impl Into<String>) -> Self {
        Self::new(start, len, RangeKind::Mention { name: name.into() })
    }

    pub fn spoiler(start: usize, len: usize, id: impl Into<StyleId>) -> Self {
        Self::new(start, len, RangeKind::Spoiler { id: id.into() })
    }

    pub fn style(start: usize, len: usize, style: Style) -> Self {
        Self::new(start, len, RangeKind::Style(style))
    }

    pub fn end(&self) -> usize {
        self.start.saturating_add(self.len)
    }

    pub fn span(&self) -> Range<usize> {
        self.start..self.end()
    }
}

#[derive(Debug, Deserialize)]
struct RawBody {
    text: String,
    #[serde(default)]
    ranges: Vec<BodyRange>,
}

/// Message text plus the mention, spoiler and style ranges laid over it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageBody {
    text: String,
    ranges: Vec<BodyRange>,
}

impl MessageBody {
    pub fn new(text: impl Into<String>, ranges: Vec<BodyRange>) -> Result<Self, StyleError> {
        let text = text.into();
        let len = text.chars().count();
        let mut spoiler_ids = HashSet::new();

        for range in &ranges {
            if range.len == 0 {
                return Err(StyleError::EmptyRange(range.start));
            }
            match range.start.checked_add(range.len) {
                Some(end) if end <= len => {}
                _ => {
                    return Err(StyleError::RangeOutOfBounds {
                        start: range.start,
                        end: range.end(),
                        len,
                    })
                }
            }
            if let RangeKind::Spoiler { id } = &range.kind {
                if !spoiler_ids.insert(id.clone()) {
                    return Err(StyleError::DuplicateSpoilerId(id.clone()));
                }
            }
        }

        Ok(Self { text, ranges })
    }

    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ranges: Vec::new(),
        }
    }

    pub fn from_json(json: &str) -> Result<Self, StyleError> {
        let raw: RawBody = serde_json::from_str(json)?;
        Self::new(raw.text, raw.ranges)
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn ranges(&self) -> &[BodyRange] {
        &self.ranges
    }

    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn spoiler_ids(&self) -> Vec<&StyleId> {
        self.ranges
            .iter()
            .filter_map(|r| match &r.kind {
                RangeKind::Spoiler { id } => Some(id),
                _ => None,
            })
            .collect()
    }
}

/// Substrings to highlight as search matches, in chars.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRanges {
    pub matched: Vec<Range<usize>>,
    pub background: ThemedColor,
    pub foreground: ThemedColor,
}

impl SearchRanges {
    pub fn new(matched: Vec<Range<usize>>) -> Self {
        Self::with_palette(matched, &Palette::STANDARD)
    }

    pub fn with_palette(matched: Vec<Range<usize>>, palette: &Palette) -> Self {
        Self {
            matched,
            background: palette.search_match_bg,
            foreground: palette.search_match_fg,
        }
    }

    /// Non-overlapping, case-insensitive matches of `query` in `text`.
    pub fn for_query(text: &str, query: &str) -> Self {
        Self::new(find_matches(text, query))
    }

    pub fn contains(&self, offset: usize) -> bool {
        self.matched.iter().any(|r| r.contains(&offset))
    }

    pub fn is_empty(&self) -> bool {
        self.matched.is_empty()
    }
}

fn find_matches(text: &str, query: &str) -> Vec<Range<usize>> {
    let needle: Vec<char> = query.chars().flat_map(char::to_lowercase).collect();
    if needle.is_empty() {
        return Vec::new();
    }
    // Compare per char so offsets stay in chars even when lowercasing expands.
    let hay: Vec<char> = text.chars().collect();
    let mut matches = Vec::new();
    let mut i = 0;
    while i < hay.len() {
        match match_len_at(&hay[i..], &needle) {
            Some(len) => {
                matches.push(i..i + len);
                i += len;
            }
            None => i += 1,
        }
    }
    matches
}

fn match_len_at(hay: &[char], needle: &[char]) -> Option<usize> {
    let mut pos = 0;
    for (consumed, c) in hay.iter().enumerate() {
        for lower in c.to_lowercase() {
            if pos == needle.len() || needle[pos] != lower {
                return None;
            }
            pos += 1;
        }
        if pos == needle.len() {
            return Some(consumed + 1);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_out_of_bounds_range() {
        let err = MessageBody::new("hello", vec![BodyRange::spoiler(3, 5, "1")]).unwrap_err();
        assert!(matches!(
            err,
            StyleError::RangeOutOfBounds {
                start: 3,
                end: 8,
                len: 5
            }
        ));
    }

    #[test]
    fn rejects_range_whose_end_overflows() {
        let json = format!(
            r#"{{"text": "hello", "ranges": [{{"start": {}, "len": 2, "kind": {{"spoiler": {{"id": "1"}}}}}}]}}"#,
            usize::MAX
        );
        let err = MessageBody::from_json(&json).unwrap_err();
        assert!(matches!(
            err,
            StyleError::RangeOutOfBounds {
                start: usize::MAX,
                end: usize::MAX,
                len: 5
            }
        ));
    }

    #[test]
    fn rejects_empty_range() {
        let err = MessageBody::new("hello", vec![BodyRange::mention(1, 0, "Ana")]).unwrap_err();
        assert!(matches!(err, StyleError::EmptyRange(1)));
    }

    #[test]
    fn rejects_duplicate_spoiler_ids() {
        let err = MessageBody::new(
            "one two",
            vec![BodyRange::spoiler(0, 3, "7"), BodyRange::spoiler(4, 3, "7")],
        )
        .unwrap_err();
        assert!(matches!(err, StyleError::DuplicateSpoilerId(id) if id.as_str() == "7"));
    }

    #[test]
    fn bounds_are_counted_in_chars() {
        let body = MessageBody::new("héllo", vec![BodyRange::spoiler(0, 5, "a")]).unwrap();
        assert_eq!(body.char_len(), 5);
    }

    #[test]
    fn parses_json_body() {
        let json = r#"{
            "text": "hey @Ana the ending is a twist",
            "ranges": [
                {"start": 4, "len": 4, "kind": {"mention": {"name": "Ana"}}},
                {"start": 13, "len": 17, "kind": {"spoiler": {"id": "7"}}},
                {"start": 0, "len": 3, "kind": {"style": {"bold": true}}}
            ]
        }"#;
        let body = MessageBody::from_json(json).unwrap();
        assert_eq!(body.ranges().len(), 3);
        assert_eq!(body.spoiler_ids(), vec![&StyleId::from("7")]);
        assert_eq!(
            body.ranges()[2].kind,
            RangeKind::Style(Style {
                bold: true,
                ..Default::default()
            })
        );
    }

    #[test]
    fn json_body_without_ranges() {
        let body = MessageBody::from_json(r#"{"text": "plain"}"#).unwrap();
        assert!(body.ranges().is_empty());
    }

    #[test]
    fn invalid_json_is_reported() {
        assert!(matches!(
            MessageBody::from_json("{"),
            Err(StyleError::Json(_))
        ));
    }

    #[test]
    fn search_is_case_insensitive_and_non_overlapping() {
        let ranges = SearchRanges::for_query("Aaa aAA", "aa");
        assert_eq!(ranges.matched, vec![0..2, 4..6]);
        assert!(ranges.contains(1));
        assert!(!ranges.contains(2));
    }

    #[test]
    fn search_offsets_are_chars() {
        let ranges = SearchRanges::for_query("café CAFÉ", "café");
        assert_eq!(ranges.matched, vec![0..4, 5..9]);
    }

    #[test]
    fn empty_query_matches_nothing() {
        assert!(SearchRanges::for_query("anything", "").is_empty());
    }

    #[test]
    fn style_union_combines_flags() {
        let bold = Style {
            bold: true,
            ..Default::default()
        };
        let italic = Style {
            italic: true,
            ..Default::default()
        };
        let both = bold.union(italic);
        assert!(both.bold && both.italic);
        assert!(!both.is_plain());
        assert!(Style::default().is_plain());
    }
}
