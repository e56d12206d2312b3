//! Static color tables shared by every display context.
//!
//! The raw swatches are plain [`Rgba`] constants; the semantic tokens pair
//! them into [`ThemedColor`]s. [`Palette`] groups the tokens so a caller can
//! replace individual entries (see the config crate's `[colors]` table)
//! while [`Palette::STANDARD`] stays the immutable default.

use crate::color::{Rgba, ThemedColor};

pub const BLACK: Rgba = Rgba::rgb(0, 0, 0);
pub const WHITE: Rgba = Rgba::rgb(255, 255, 255);

pub const GRAY_05: Rgba = Rgba::rgb(0xe9, 0xe9, 0xe9);
pub const GRAY_20: Rgba = Rgba::rgb(0xc6, 0xc6, 0xc6);
pub const GRAY_25: Rgba = Rgba::rgb(0xb9, 0xb9, 0xb9);
pub const GRAY_60: Rgba = Rgba::rgb(0x5e, 0x5e, 0x5e);
pub const GRAY_75: Rgba = Rgba::rgb(0x3b, 0x3b, 0x3b);
pub const GRAY_90: Rgba = Rgba::rgb(0x1b, 0x1b, 0x1b);

pub const BLACK_ALPHA_20: Rgba = Rgba::white(0, 51);
pub const BLACK_ALPHA_25: Rgba = Rgba::white(0, 64);

pub const SIGNAL_BLUE_DARK: Rgba = Rgba::rgb(0x18, 0x51, 0xb4);
pub const SEARCH_YELLOW: Rgba = Rgba::rgb(0xff, 0xd6, 0x24);

pub const LIGHT_PRIMARY: Rgba = GRAY_90;
pub const DARK_PRIMARY: Rgba = GRAY_05;
pub const LIGHT_SECONDARY: Rgba = GRAY_60;
pub const DARK_SECONDARY: Rgba = GRAY_25;

/// Page backgrounds, used when compositing translucent colors.
pub const LIGHT_BACKGROUND: Rgba = WHITE;
pub const DARK_BACKGROUND: Rgba = BLACK;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub primary_text: ThemedColor,
    pub secondary_text_and_icon: ThemedColor,
    pub bubble_text_incoming: ThemedColor,
    pub bubble_text_outgoing: ThemedColor,
    pub incoming_mention_bg: ThemedColor,
    pub outgoing_mention_bg: ThemedColor,
    pub long_message_mention_bg: ThemedColor,
    pub attachment_text: ThemedColor,
    pub attachment_highlight_bg: ThemedColor,
    pub group_story_reply_text: ThemedColor,
    pub group_story_reply_mention_bg: ThemedColor,
    pub media_caption_text: ThemedColor,
    pub search_match_bg: ThemedColor,
    pub search_match_fg: ThemedColor,
    pub spoiler_obfuscation: ThemedColor,
    pub background: ThemedColor,
}

impl Palette {
    pub const STANDARD: Palette = Palette {
        primary_text: ThemedColor::new(LIGHT_PRIMARY, DARK_PRIMARY),
        secondary_text_and_icon: ThemedColor::new(LIGHT_SECONDARY, DARK_SECONDARY),
        bubble_text_incoming: ThemedColor::new(GRAY_90, GRAY_05),
        bubble_text_outgoing: ThemedColor::fixed(WHITE),
        incoming_mention_bg: ThemedColor::new(GRAY_20, GRAY_60),
        outgoing_mention_bg: ThemedColor::fixed(BLACK_ALPHA_25),
        long_message_mention_bg: ThemedColor::new(BLACK_ALPHA_20, SIGNAL_BLUE_DARK),
        attachment_text: ThemedColor::fixed(DARK_PRIMARY),
        attachment_highlight_bg: ThemedColor::fixed(GRAY_75),
        group_story_reply_text: ThemedColor::fixed(GRAY_05),
        group_story_reply_mention_bg: ThemedColor::fixed(GRAY_60),
        media_caption_text: ThemedColor::fixed(WHITE),
        search_match_bg: ThemedColor::fixed(SEARCH_YELLOW),
        search_match_fg: ThemedColor::fixed(BLACK),
        spoiler_obfuscation: ThemedColor::new(GRAY_20, GRAY_60),
        background: ThemedColor::new(LIGHT_BACKGROUND, DARK_BACKGROUND),
    };

    /// Token names as they appear in configuration, paired with a mutable slot.
    pub fn tokens_mut(&mut self) -> [(&'static str, &mut ThemedColor); 16] {
        [
            ("primary_text", &mut self.primary_text),
            ("secondary_text_and_icon", &mut self.secondary_text_and_icon),
            ("bubble_text_incoming", &mut self.bubble_text_incoming),
            ("bubble_text_outgoing", &mut self.bubble_text_outgoing),
            ("incoming_mention_bg", &mut self.incoming_mention_bg),
            ("outgoing_mention_bg", &mut self.outgoing_mention_bg),
            ("long_message_mention_bg", &mut self.long_message_mention_bg),
            ("attachment_text", &mut self.attachment_text),
            ("attachment_highlight_bg", &mut self.attachment_highlight_bg),
            ("group_story_reply_text", &mut self.group_story_reply_text),
            (
                "group_story_reply_mention_bg",
                &mut self.group_story_reply_mention_bg,
            ),
            ("media_caption_text", &mut self.media_caption_text),
            ("search_match_bg", &mut self.search_match_bg),
            ("search_match_fg", &mut self.search_match_fg),
            ("spoiler_obfuscation", &mut self.spoiler_obfuscation),
            ("background", &mut self.background),
        ]
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::STANDARD
    }
}
