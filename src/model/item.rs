// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tagpick-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tagpick and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use smol_str::SmolStr;

/// One selectable tag.
///
/// Items have no identity beyond their position in the current [`ItemSequence`]; the registry
/// regenerates them wholesale on every input change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    label: SmolStr,
    highlighted: bool,
}

impl Item {
    pub fn new(label: impl AsRef<str>) -> Self {
        Self {
            label: SmolStr::new(label.as_ref()),
            highlighted: false,
        }
    }

    pub fn label(&self) -> &str {
        self.label.as_str()
    }

    pub fn is_highlighted(&self) -> bool {
        self.highlighted
    }

    /// Returns `true` when the flag actually changed.
    pub(crate) fn set_highlighted(&mut self, highlighted: bool) -> bool {
        let changed = self.highlighted != highlighted;
        self.highlighted = highlighted;
        changed
    }
}

/// Names one item of one registry build.
///
/// A handle taken before a rebuild keeps its old `epoch`; mutations through it are ignored once
/// the sequence it pointed into has been replaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemHandle {
    epoch: u64,
    index: usize,
}

impl ItemHandle {
    pub const fn new(epoch: u64, index: usize) -> Self {
        Self { epoch, index }
    }

    pub const fn epoch(self) -> u64 {
        self.epoch
    }

    pub const fn index(self) -> usize {
        self.index
    }
}

/// Ordered items derived from one raw input under one delimiter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemSequence {
    epoch: u64,
    items: Vec<Item>,
}

impl ItemSequence {
    pub fn new(epoch: u64, items: Vec<Item>) -> Self {
        Self { epoch, items }
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn iter(&self) -> impl Iterator<Item = &Item> {
        self.items.iter()
    }

    pub fn labels(&self) -> Vec<&str> {
        self.items.iter().map(Item::label).collect()
    }

    pub fn handle(&self, index: usize) -> Option<ItemHandle> {
        (index < self.items.len()).then(|| ItemHandle::new(self.epoch, index))
    }

    pub fn get(&self, handle: ItemHandle) -> Option<&Item> {
        if handle.epoch != self.epoch {
            return None;
        }
        self.items.get(handle.index)
    }

    pub(crate) fn get_mut(&mut self, handle: ItemHandle) -> Option<&mut Item> {
        if handle.epoch != self.epoch {
            return None;
        }
        self.items.get_mut(handle.index)
    }

    pub fn highlighted(&self) -> impl Iterator<Item = ItemHandle> + '_ {
        self.items
            .iter()
            .enumerate()
            .filter(|(_, item)| item.highlighted)
            .map(|(index, _)| ItemHandle::new(self.epoch, index))
    }

    pub fn highlighted_count(&self) -> usize {
        self.items.iter().filter(|item| item.highlighted).count()
    }

    pub(crate) fn clear_highlights(&mut self) {
        for item in &mut self.items {
            item.highlighted = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Item, ItemHandle, ItemSequence};

    fn sequence(epoch: u64, labels: &[&str]) -> ItemSequence {
        ItemSequence::new(epoch, labels.iter().map(Item::new).collect())
    }

    #[test]
    fn handle_from_other_epoch_is_stale() {
        let seq = sequence(2, &["a", "b"]);
        assert!(seq.get(ItemHandle::new(1, 0)).is_none());
        assert_eq!(seq.get(ItemHandle::new(2, 1)).map(Item::label), Some("b"));
    }

    #[test]
    fn handle_out_of_range_is_none() {
        let seq = sequence(0, &["a"]);
        assert_eq!(seq.handle(0), Some(ItemHandle::new(0, 0)));
        assert_eq!(seq.handle(1), None);
    }

    #[test]
    fn set_highlighted_reports_changes_only() {
        let mut item = Item::new("x");
        assert!(!item.set_highlighted(false));
        assert!(item.set_highlighted(true));
        assert!(!item.set_highlighted(true));
        assert!(item.is_highlighted());
    }

    #[test]
    fn highlighted_iterates_flagged_items() {
        let mut seq = sequence(5, &["a", "b", "c"]);
        let handle = seq.handle(2).expect("handle");
        seq.get_mut(handle).expect("item").set_highlighted(true);

        assert_eq!(seq.highlighted().collect::<Vec<_>>(), vec![handle]);
        assert_eq!(seq.highlighted_count(), 1);

        seq.clear_highlights();
        assert_eq!(seq.highlighted_count(), 0);
    }
}
