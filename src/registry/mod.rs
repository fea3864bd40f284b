// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tagpick-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tagpick and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Item registry.
//!
//! Owns the raw input text, the active delimiter and the current [`ItemSequence`]. Every change to
//! either input regenerates the sequence wholesale and bumps its epoch; there is no diffing.

use std::sync::OnceLock;

use regex::Regex;

use crate::engine::ItemSurface;
use crate::model::{Delimiter, Item, ItemHandle, ItemSequence};

fn blank_segment_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\s*$").expect("static regex"))
}

/// Splits `raw` on `delimiter`, dropping empty and whitespace-only segments.
///
/// Kept segments are verbatim, including any surrounding whitespace.
pub fn split_items(raw: &str, delimiter: Delimiter) -> Vec<Item> {
    let needle = delimiter.character() as u8;
    debug_assert!(delimiter.character().is_ascii());

    let bytes = raw.as_bytes();
    let mut items = Vec::new();
    let mut start = 0usize;
    for end in memchr::memchr_iter(needle, bytes).chain(std::iter::once(bytes.len())) {
        let segment = &raw[start..end];
        if !blank_segment_re().is_match(segment) {
            items.push(Item::new(segment));
        }
        start = end + 1;
    }
    items
}

/// Removes line breaks; Enter triggers a selection instead of starting a new line.
pub fn strip_newlines(raw: &str) -> String {
    raw.chars().filter(|ch| !matches!(ch, '\n' | '\r')).collect()
}

#[derive(Debug, Clone, Default)]
pub struct ItemRegistry {
    raw_text: String,
    delimiter: Delimiter,
    items: ItemSequence,
}

impl ItemRegistry {
    pub fn new(delimiter: Delimiter) -> Self {
        Self {
            raw_text: String::new(),
            delimiter,
            items: ItemSequence::default(),
        }
    }

    pub fn raw_text(&self) -> &str {
        &self.raw_text
    }

    pub fn delimiter(&self) -> Delimiter {
        self.delimiter
    }

    pub fn items(&self) -> &ItemSequence {
        &self.items
    }

    pub fn epoch(&self) -> u64 {
        self.items.epoch()
    }

    pub fn label(&self, item: ItemHandle) -> Option<&str> {
        self.items.get(item).map(Item::label)
    }

    /// Replaces the raw text and delimiter and regenerates every item.
    pub fn rebuild(&mut self, raw_text: &str, delimiter: Delimiter) -> &ItemSequence {
        if raw_text != self.raw_text {
            self.raw_text.clear();
            self.raw_text.push_str(raw_text);
        }
        self.delimiter = delimiter;

        let epoch = self.items.epoch().wrapping_add(1);
        self.items = ItemSequence::new(epoch, split_items(&self.raw_text, delimiter));
        tracing::trace!(
            epoch,
            items = self.items.len(),
            delimiter = %delimiter,
            "item registry rebuilt"
        );
        &self.items
    }

    /// Text-change signal: re-split under the current delimiter.
    pub fn set_text(&mut self, raw_text: &str) -> &ItemSequence {
        let delimiter = self.delimiter;
        self.rebuild(raw_text, delimiter)
    }

    /// Delimiter-change signal: re-split the existing text under `delimiter`.
    pub fn set_delimiter(&mut self, delimiter: Delimiter) -> &ItemSequence {
        let raw_text = self.raw_text.clone();
        self.rebuild(&raw_text, delimiter)
    }

    pub fn clear(&mut self) -> &ItemSequence {
        self.set_text("")
    }
}

impl ItemSurface for ItemRegistry {
    fn item_count(&self) -> usize {
        self.items.len()
    }

    fn item_at(&self, index: usize) -> Option<ItemHandle> {
        self.items.handle(index)
    }

    fn set_highlighted(&mut self, item: ItemHandle, highlighted: bool) -> bool {
        self.items
            .get_mut(item)
            .is_some_and(|item| item.set_highlighted(highlighted))
    }

    fn clear_highlights(&mut self) {
        self.items.clear_highlights();
    }
}
