//! Immutable render settings for styled message text.
//!
//! A [`DisplayConfiguration`] is built fresh for each piece of text being laid
//! out, through one of the named constructors below (or equivalently through
//! [`DisplayContext::resolve`](crate::context::DisplayContext::resolve)). It
//! never changes after construction; colors stay themed until the renderer
//! resolves them against the current [`AppearanceMode`].

use std::collections::BTreeSet;

use crate::body::{SearchRanges, StyleId};
use crate::color::{AppearanceMode, Rgba, ThemedColor};
use crate::context::DisplayContext;
use crate::font::FontDescriptor;

/// How a context treats spoiler ranges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpoilerPolicy {
    /// Spoilers are never revealed, whatever else the configuration says.
    Forbidden,
    /// Every spoiler is revealed; the explicit id set is ignored.
    RevealAll,
    /// Only spoilers whose id is in the revealed set are shown.
    Selective,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayConfiguration {
    base_font: FontDescriptor,
    base_text_color: ThemedColor,
    mention_background_color: Option<ThemedColor>,
    revealed_spoiler_ids: BTreeSet<StyleId>,
    revealed_spoiler_background_color: Option<ThemedColor>,
    spoiler_policy: SpoilerPolicy,
    search_ranges: Option<SearchRanges>,
}

impl DisplayConfiguration {
    pub(crate) fn new(base_font: FontDescriptor, base_text_color: ThemedColor) -> Self {
        Self {
            base_font,
            base_text_color,
            mention_background_color: None,
            revealed_spoiler_ids: BTreeSet::new(),
            revealed_spoiler_background_color: None,
            spoiler_policy: SpoilerPolicy::Selective,
            search_ranges: None,
        }
    }

    pub(crate) fn mention_background(mut self, color: ThemedColor) -> Self {
        self.mention_background_color = Some(color);
        self
    }

    pub(crate) fn revealed_spoiler_background(mut self, color: ThemedColor) -> Self {
        self.revealed_spoiler_background_color = Some(color);
        self
    }

    pub(crate) fn revealing(mut self, ids: BTreeSet<StyleId>) -> Self {
        self.revealed_spoiler_ids = ids;
        self
    }

    pub(crate) fn policy(mut self, policy: SpoilerPolicy) -> Self {
        self.spoiler_policy = policy;
        self
    }

    pub(crate) fn searching(mut self, ranges: Option<SearchRanges>) -> Self {
        self.search_ranges = ranges;
        self
    }

    pub fn base_font(&self) -> FontDescriptor {
        self.base_font
    }

    pub fn base_text_color(&self) -> ThemedColor {
        self.base_text_color
    }

    pub fn mention_background_color(&self) -> Option<ThemedColor> {
        self.mention_background_color
    }

    pub fn revealed_spoiler_ids(&self) -> &BTreeSet<StyleId> {
        &self.revealed_spoiler_ids
    }

    pub fn revealed_spoiler_background_color(&self) -> Option<ThemedColor> {
        self.revealed_spoiler_background_color
    }

    pub fn reveal_all_spoilers(&self) -> bool {
        self.spoiler_policy == SpoilerPolicy::RevealAll
    }

    pub fn spoiler_policy(&self) -> SpoilerPolicy {
        self.spoiler_policy
    }

    pub fn search_ranges(&self) -> Option<&SearchRanges> {
        self.search_ranges.as_ref()
    }

    /// Effective reveal decision for one spoiler range.
    ///
    /// A context that forbids reveal wins over "reveal all", which wins over
    /// the explicit id set.
    pub fn is_spoiler_revealed(&self, id: &StyleId) -> bool {
        match self.spoiler_policy {
            SpoilerPolicy::Forbidden => false,
            SpoilerPolicy::RevealAll => true,
            SpoilerPolicy::Selective => self.revealed_spoiler_ids.contains(id),
        }
    }

    pub fn text_color(&self, mode: AppearanceMode) -> Rgba {
        self.base_text_color.resolve(mode)
    }

    pub fn mention_background_for(&self, mode: AppearanceMode) -> Option<Rgba> {
        self.mention_background_color.map(|c| c.resolve(mode))
    }

    pub fn revealed_spoiler_background_for(&self, mode: AppearanceMode) -> Option<Rgba> {
        self.revealed_spoiler_background_color
            .map(|c| c.resolve(mode))
    }

    // Named constructors, one per display context.

    /// For sizing only. Unrevealed spoilers, mentions and search hits take the
    /// same space as plain text, so everything is laid out revealed.
    pub fn for_measurement(font: FontDescriptor) -> Self {
        DisplayContext::Measurement { font }.resolve()
    }

    pub fn for_unstyled_text(font: FontDescriptor, text_color: Rgba) -> Self {
        DisplayContext::UnstyledText { font, text_color }.resolve()
    }

    pub fn message_bubble(
        is_incoming: bool,
        revealed_spoiler_ids: BTreeSet<StyleId>,
        search_ranges: Option<SearchRanges>,
    ) -> Self {
        DisplayContext::MessageBubble {
            is_incoming,
            revealed_spoiler_ids,
            search_ranges,
        }
        .resolve()
    }

    pub fn composing() -> Self {
        DisplayContext::Composing.resolve()
    }

    pub fn composing_attachment() -> Self {
        DisplayContext::ComposingAttachment.resolve()
    }

    /// Spoilers in quoted replies are never revealed; there is no reveal set
    /// to pass.
    pub fn quoted_reply(font: FontDescriptor, text_color: ThemedColor) -> Self {
        DisplayContext::QuotedReply { font, text_color }.resolve()
    }

    pub fn long_message_view(revealed_spoiler_ids: BTreeSet<StyleId>) -> Self {
        DisplayContext::LongMessageView {
            revealed_spoiler_ids,
        }
        .resolve()
    }

    pub fn group_story_reply() -> Self {
        DisplayContext::GroupStoryReply.resolve()
    }

    pub fn composing_group_story_reply() -> Self {
        DisplayContext::ComposingGroupStoryReply.resolve()
    }

    pub fn conversation_list_snippet(font: FontDescriptor, text_color: ThemedColor) -> Self {
        DisplayContext::ConversationListSnippet { font, text_color }.resolve()
    }

    pub fn conversation_list_search_result_snippet() -> Self {
        DisplayContext::ConversationListSearchResultSnippet.resolve()
    }

    pub fn media_caption(revealed_spoiler_ids: BTreeSet<StyleId>) -> Self {
        DisplayContext::MediaCaption {
            revealed_spoiler_ids,
        }
        .resolve()
    }
}
