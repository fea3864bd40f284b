// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tagpick-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tagpick and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use crate::model::ItemHandle;

/// The live item collection the selection engine animates.
///
/// Implementations may change length or contents between calls; the engine re-queries on every
/// pick and never caches handles across ticks except for the per-pick unhighlight.
pub trait ItemSurface {
    fn item_count(&self) -> usize;

    fn item_at(&self, index: usize) -> Option<ItemHandle>;

    /// Sets the highlight flag of `item`.
    ///
    /// Stale or unknown handles are ignored. Returns `true` when a flag changed.
    fn set_highlighted(&mut self, item: ItemHandle, highlighted: bool) -> bool;

    fn clear_highlights(&mut self);
}
