use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use crate::body::{SearchRanges, StyleId};
use crate::color::{Rgba, ThemedColor};
use crate::display::{DisplayConfiguration, SpoilerPolicy};
use crate::error::StyleError;
use crate::font::FontDescriptor;
use crate::palette::{self, Palette};

/// Every place styled message text is rendered, with the inputs each accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayContext {
    Measurement {
        font: FontDescriptor,
    },
    UnstyledText {
        font: FontDescriptor,
        text_color: Rgba,
    },
    MessageBubble {
        is_incoming: bool,
        revealed_spoiler_ids: BTreeSet<StyleId>,
        search_ranges: Option<SearchRanges>,
    },
    Composing,
    ComposingAttachment,
    QuotedReply {
        font: FontDescriptor,
        text_color: ThemedColor,
    },
    LongMessageView {
        revealed_spoiler_ids: BTreeSet<StyleId>,
    },
    /// Revealing spoilers in group story replies is not supported; they always render hidden.
    GroupStoryReply,
    ComposingGroupStoryReply,
    ConversationListSnippet {
        font: FontDescriptor,
        text_color: ThemedColor,
    },
    ConversationListSearchResultSnippet,
    MediaCaption {
        revealed_spoiler_ids: BTreeSet<StyleId>,
    },
}

impl DisplayContext {
    pub fn kind(&self) -> ContextKind {
        match self {
            DisplayContext::Measurement { .. } => ContextKind::Measurement,
            DisplayContext::UnstyledText { .. } => ContextKind::UnstyledText,
            DisplayContext::MessageBubble { .. } => ContextKind::MessageBubble,
            DisplayContext::Composing => ContextKind::Composing,
            DisplayContext::ComposingAttachment => ContextKind::ComposingAttachment,
            DisplayContext::QuotedReply { .. } => ContextKind::QuotedReply,
            DisplayContext::LongMessageView { .. } => ContextKind::LongMessageView,
            DisplayContext::GroupStoryReply => ContextKind::GroupStoryReply,
            DisplayContext::ComposingGroupStoryReply => ContextKind::ComposingGroupStoryReply,
            DisplayContext::ConversationListSnippet { .. } => {
                ContextKind::ConversationListSnippet
            }
            DisplayContext::ConversationListSearchResultSnippet => {
                ContextKind::ConversationListSearchResultSnippet
            }
            DisplayContext::MediaCaption { .. } => ContextKind::MediaCaption,
        }
    }

    pub fn resolve(self) -> DisplayConfiguration {
        self.resolve_with(&Palette::STANDARD)
    }

    /// Map the context to its configuration, drawing themed tokens from `palette`.
    pub fn resolve_with(self, palette: &Palette) -> DisplayConfiguration {
        let body = FontDescriptor::body();
        match self {
            DisplayContext::Measurement { font } => {
                DisplayConfiguration::new(font, ThemedColor::fixed(palette::BLACK))
                    .policy(SpoilerPolicy::RevealAll)
            }
            DisplayContext::UnstyledText { font, text_color } => {
                DisplayConfiguration::new(font, ThemedColor::fixed(text_color))
                    .policy(SpoilerPolicy::RevealAll)
            }
            DisplayContext::MessageBubble {
                is_incoming,
                revealed_spoiler_ids,
                search_ranges,
            } => {
                let (text, mention_bg) = if is_incoming {
                    (palette.bubble_text_incoming, palette.incoming_mention_bg)
                } else {
                    (palette.bubble_text_outgoing, palette.outgoing_mention_bg)
                };
                DisplayConfiguration::new(body, text)
                    .mention_background(mention_bg)
                    .revealing(revealed_spoiler_ids)
                    .searching(search_ranges)
            }
            DisplayContext::Composing => {
                DisplayConfiguration::new(body, palette.bubble_text_incoming)
                    .mention_background(palette.incoming_mention_bg)
                    .revealed_spoiler_background(palette.incoming_mention_bg)
                    .policy(SpoilerPolicy::RevealAll)
            }
            DisplayContext::ComposingAttachment => {
                DisplayConfiguration::new(body, palette.attachment_text)
                    .mention_background(palette.attachment_highlight_bg)
                    .revealed_spoiler_background(palette.attachment_highlight_bg)
                    .policy(SpoilerPolicy::RevealAll)
            }
            DisplayContext::QuotedReply { font, text_color } => {
                DisplayConfiguration::new(font, text_color).policy(SpoilerPolicy::Forbidden)
            }
            DisplayContext::LongMessageView {
                revealed_spoiler_ids,
            } => DisplayConfiguration::new(body, palette.primary_text)
                .mention_background(palette.long_message_mention_bg)
                .revealing(revealed_spoiler_ids),
            DisplayContext::GroupStoryReply => {
                DisplayConfiguration::new(body, palette.group_story_reply_text)
                    .mention_background(palette.group_story_reply_mention_bg)
                    .policy(SpoilerPolicy::Forbidden)
            }
            DisplayContext::ComposingGroupStoryReply => {
                DisplayConfiguration::new(body, palette.group_story_reply_text)
                    .mention_background(palette.group_story_reply_mention_bg)
                    .revealed_spoiler_background(palette.group_story_reply_mention_bg)
                    .policy(SpoilerPolicy::RevealAll)
            }
            DisplayContext::ConversationListSnippet { font, text_color } => {
                DisplayConfiguration::new(font, text_color)
            }
            DisplayContext::ConversationListSearchResultSnippet => {
                DisplayConfiguration::new(FontDescriptor::body2(), palette.secondary_text_and_icon)
            }
            DisplayContext::MediaCaption {
                revealed_spoiler_ids,
            } => DisplayConfiguration::new(FontDescriptor::body_clamped(), palette.media_caption_text)
                .revealing(revealed_spoiler_ids),
        }
    }
}

/// Field-less tag for each [`DisplayContext`] variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContextKind {
    Measurement,
    UnstyledText,
    MessageBubble,
    Composing,
    ComposingAttachment,
    QuotedReply,
    LongMessageView,
    GroupStoryReply,
    ComposingGroupStoryReply,
    ConversationListSnippet,
    ConversationListSearchResultSnippet,
    MediaCaption,
}

impl ContextKind {
    pub const ALL: &[ContextKind] = &[
        ContextKind::Measurement,
        ContextKind::UnstyledText,
        ContextKind::MessageBubble,
        ContextKind::Composing,
        ContextKind::ComposingAttachment,
        ContextKind::QuotedReply,
        ContextKind::LongMessageView,
        ContextKind::GroupStoryReply,
        ContextKind::ComposingGroupStoryReply,
        ContextKind::ConversationListSnippet,
        ContextKind::ConversationListSearchResultSnippet,
        ContextKind::MediaCaption,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ContextKind::Measurement => "measurement",
            ContextKind::UnstyledText => "unstyled-text",
            ContextKind::MessageBubble => "message-bubble",
            ContextKind::Composing => "composing",
            ContextKind::ComposingAttachment => "composing-attachment",
            ContextKind::QuotedReply => "quoted-reply",
            ContextKind::LongMessageView => "long-message-view",
            ContextKind::GroupStoryReply => "group-story-reply",
            ContextKind::ComposingGroupStoryReply => "composing-group-story-reply",
            ContextKind::ConversationListSnippet => "conversation-list-snippet",
            ContextKind::ConversationListSearchResultSnippet => {
                "conversation-list-search-result-snippet"
            }
            ContextKind::MediaCaption => "media-caption",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            ContextKind::Measurement => "Sizing only; all spoilers laid out revealed",
            ContextKind::UnstyledText => "Plain text sharing the rendering pipeline",
            ContextKind::MessageBubble => "Incoming or outgoing conversation bubble",
            ContextKind::Composing => "Draft being typed; spoilers always visible",
            ContextKind::ComposingAttachment => "Attachment caption draft, fixed dark styling",
            ContextKind::QuotedReply => "Quoted reply preview; spoilers never revealed",
            ContextKind::LongMessageView => "Full message detail view",
            ContextKind::GroupStoryReply => "Group story reply; spoiler reveal unsupported",
            ContextKind::ComposingGroupStoryReply => "Group story reply draft",
            ContextKind::ConversationListSnippet => "Conversation list preview line",
            ContextKind::ConversationListSearchResultSnippet => {
                "Conversation search result snippet"
            }
            ContextKind::MediaCaption => "Caption over media, fixed white text",
        }
    }

    /// Whether the context accepts a caller-supplied reveal set.
    pub fn accepts_reveal_set(self) -> bool {
        matches!(
            self,
            ContextKind::MessageBubble | ContextKind::LongMessageView | ContextKind::MediaCaption
        )
    }

    pub fn accepts_search_ranges(self) -> bool {
        self == ContextKind::MessageBubble
    }

    /// Whether the caller chooses font and text color.
    pub fn accepts_font(self) -> bool {
        matches!(
            self,
            ContextKind::Measurement
                | ContextKind::UnstyledText
                | ContextKind::QuotedReply
                | ContextKind::ConversationListSnippet
        )
    }
}

impl fmt::Display for ContextKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ContextKind {
    type Err = StyleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace(['_', ' '], "-");
        ContextKind::ALL
            .iter()
            .copied()
            .find(|k| k.name() == normalized)
            .ok_or_else(|| StyleError::UnknownContext(s.to_string()))
    }
}
