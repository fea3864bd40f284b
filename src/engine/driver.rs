// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tagpick-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tagpick and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Headless driver: runs one selection against tokio's clock.

use rand::Rng;
use tokio::time::{sleep_until, Instant};

use super::{ItemSurface, SelectionEngine, SelectionOutcome};

/// Starts a run and sleeps from deadline to deadline until it finishes.
///
/// Returns `None` only if the engine ran out of timers without finalizing, which cannot happen
/// for a run started here.
pub async fn run_to_completion<R, S>(
    engine: &mut SelectionEngine<R>,
    surface: &mut S,
) -> Option<SelectionOutcome>
where
    R: Rng,
    S: ItemSurface + ?Sized,
{
    let origin = Instant::now();
    engine.run_selection(origin.elapsed(), surface);

    while let Some(deadline) = engine.next_deadline() {
        sleep_until(origin + deadline).await;
        if let Some(outcome) = engine.advance(origin.elapsed(), surface) {
            return Some(outcome);
        }
    }
    None
}
