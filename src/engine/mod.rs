// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tagpick-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tagpick and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Randomized-selection animation engine.
//!
//! A run flickers a highlight over the live item collection for a fixed number of ticks and then
//! commits exactly one uniformly random winner. Runs are identified by a monotonically increasing
//! [`RunId`]; every scheduled action carries the run it belongs to and is dropped once a newer run
//! has started. Starting a run also clears the timer queue outright, so a superseded run can
//! never touch the highlight state of its successor.
//!
//! The engine is driven from outside: callers pass the current time to [`SelectionEngine::advance`]
//! (the TUI derives it from `Instant`, tests and the headless driver use virtual or tokio time).

use std::time::Duration;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::model::ItemHandle;

pub mod driver;
pub mod surface;
pub mod timers;


pub use surface::ItemSurface;
pub use timers::{Fired, TimerId, TimerQueue};

pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(100);
pub const DEFAULT_TICK_COUNT: u32 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionConfig {
    pub tick_interval: Duration,
    pub tick_count: u32,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            tick_interval: DEFAULT_TICK_INTERVAL,
            tick_count: DEFAULT_TICK_COUNT,
        }
    }
}

impl SelectionConfig {
    /// Time from trigger to the final pick: `tick_interval * (tick_count + 1)`, 3.1 s by default.
    ///
    /// The final pick lands one interval after the last tick, once that tick's own unhighlight has
    /// fired, rather than on the last tick itself. Saturates at `Duration::MAX`.
    pub fn run_duration(&self) -> Duration {
        self.tick_interval
            .checked_mul(self.tick_count.saturating_add(1))
            .unwrap_or(Duration::MAX)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Running,
    Finalizing,
}

impl Phase {
    pub fn label(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Running => "running",
            Self::Finalizing => "finalizing",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RunId(u64);

impl RunId {
    pub fn get(self) -> u64 {
        self.0
    }
}

/// Result of a completed run. `winner` is `None` when the collection was empty at the final pick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionOutcome {
    pub run: RunId,
    pub winner: Option<ItemHandle>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TimerAction {
    Tick {
        run: RunId,
    },
    Unhighlight {
        run: RunId,
        tick: u32,
        item: ItemHandle,
    },
    Finalize {
        run: RunId,
    },
}

#[derive(Debug)]
struct Session {
    run: RunId,
    ticks: u32,
    tick_timer: Option<TimerId>,
    finalize_timer: Option<TimerId>,
}

pub struct SelectionEngine<R = SmallRng> {
    config: SelectionConfig,
    rng: R,
    timers: TimerQueue<TimerAction>,
    generation: u64,
    phase: Phase,
    session: Option<Session>,
    last_winner: Option<ItemHandle>,
}

impl SelectionEngine<SmallRng> {
    pub fn new(config: SelectionConfig) -> Self {
        Self::with_rng(config, SmallRng::from_os_rng())
    }

    /// Deterministic engine for replays and tests.
    pub fn seeded(config: SelectionConfig, seed: u64) -> Self {
        Self::with_rng(config, SmallRng::seed_from_u64(seed))
    }
}

impl<R: Rng> SelectionEngine<R> {
    pub fn with_rng(config: SelectionConfig, rng: R) -> Self {
        Self {
            config,
            rng,
            timers: TimerQueue::new(),
            generation: 0,
            phase: Phase::Idle,
            session: None,
            last_winner: None,
        }
    }

    pub fn config(&self) -> &SelectionConfig {
        &self.config
    }

    /// Takes effect for the next run.
    pub fn set_config(&mut self, config: SelectionConfig) {
        self.config = config;
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_idle(&self) -> bool {
        self.phase == Phase::Idle
    }

    pub fn current_run(&self) -> Option<RunId> {
        self.session.as_ref().map(|session| session.run)
    }

    pub fn last_winner(&self) -> Option<ItemHandle> {
        self.last_winner
    }

    pub fn ticks_elapsed(&self) -> u32 {
        self.session.as_ref().map_or(0, |session| session.ticks)
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    pub fn next_deadline(&self) -> Option<Duration> {
        self.timers.next_deadline()
    }

    /// Starts a new run at `now`, superseding any run in flight.
    pub fn run_selection<S: ItemSurface + ?Sized>(
        &mut self,
        now: Duration,
        surface: &mut S,
    ) -> RunId {
        if let Some(previous) = self.session.take() {
            tracing::debug!(
                run = previous.run.0,
                ticks = previous.ticks,
                finalizing = previous.finalize_timer.is_some(),
                "superseding selection run"
            );
        }
        self.timers.clear();

        self.generation = self.generation.wrapping_add(1);
        let run = RunId(self.generation);
        self.last_winner = None;
        surface.clear_highlights();

        let interval = self.config.tick_interval;
        let mut session = Session {
            run,
            ticks: 0,
            tick_timer: None,
            finalize_timer: None,
        };

        if self.config.tick_count == 0 {
            let finalize = self
                .timers
                .schedule_once(now + interval, TimerAction::Finalize { run });
            session.finalize_timer = Some(finalize);
            self.phase = Phase::Finalizing;
        } else {
            let tick = self
                .timers
                .schedule_repeating(now + interval, interval, TimerAction::Tick { run });
            session.tick_timer = Some(tick);
            self.phase = Phase::Running;
        }
        self.session = Some(session);

        tracing::info!(
            run = run.0,
            items = surface.item_count(),
            tick_ms = interval.as_millis() as u64,
            ticks = self.config.tick_count,
            "selection run started"
        );
        run
    }

    /// Fires every timer due at `now`.
    ///
    /// Returns the outcome when the active run reached its final pick during this call.
    pub fn advance<S: ItemSurface + ?Sized>(
        &mut self,
        now: Duration,
        surface: &mut S,
    ) -> Option<SelectionOutcome> {
        let mut outcome = None;
        while let Some(fired) = self.timers.pop_due(now) {
            match fired.action {
                TimerAction::Tick { run } => self.on_tick(run, fired.at, surface),
                TimerAction::Unhighlight { run, tick, item } => {
                    self.on_unhighlight(run, tick, item, surface)
                }
                TimerAction::Finalize { run } => {
                    if let Some(done) = self.on_finalize(run, surface) {
                        outcome = Some(done);
                    }
                }
            }
        }
        outcome
    }

    fn on_tick<S: ItemSurface + ?Sized>(&mut self, run: RunId, at: Duration, surface: &mut S) {
        let Some(session) = self.session.as_mut().filter(|session| session.run == run) else {
            tracing::trace!(run = run.0, "dropping stale tick");
            return;
        };
        if self.phase != Phase::Running {
            return;
        }

        session.ticks += 1;
        let tick = session.ticks;

        surface.clear_highlights();
        let picked = pick_uniform(&mut self.rng, surface);
        if let Some(item) = picked {
            surface.set_highlighted(item, true);
            self.timers.schedule_once(
                at + self.config.tick_interval,
                TimerAction::Unhighlight { run, tick, item },
            );
        }
        tracing::debug!(run = run.0, tick, picked = ?picked.map(ItemHandle::index), "selection tick");

        if tick >= self.config.tick_count {
            if let Some(id) = session.tick_timer.take() {
                self.timers.cancel(id);
            }
            session.finalize_timer = Some(
                self.timers
                    .schedule_once(at + self.config.tick_interval, TimerAction::Finalize { run }),
            );
            self.phase = Phase::Finalizing;
        }
    }

    fn on_unhighlight<S: ItemSurface + ?Sized>(
        &mut self,
        run: RunId,
        tick: u32,
        item: ItemHandle,
        surface: &mut S,
    ) {
        let current = self
            .session
            .as_ref()
            .is_some_and(|session| session.run == run && session.ticks == tick);
        if !current {
            // A newer tick (or run) already reset the highlights; this item may be its pick.
            tracing::trace!(run = run.0, tick, "dropping superseded unhighlight");
            return;
        }
        surface.set_highlighted(item, false);
    }

    fn on_finalize<S: ItemSurface + ?Sized>(
        &mut self,
        run: RunId,
        surface: &mut S,
    ) -> Option<SelectionOutcome> {
        if self.current_run() != Some(run) {
            tracing::trace!(run = run.0, "dropping stale finalize");
            return None;
        }

        self.timers.clear();
        surface.clear_highlights();
        let winner = pick_uniform(&mut self.rng, surface);
        if let Some(item) = winner {
            surface.set_highlighted(item, true);
        }

        self.session = None;
        self.phase = Phase::Idle;
        self.last_winner = winner;

        tracing::info!(
            run = run.0,
            winner = ?winner.map(ItemHandle::index),
            "selection run finished"
        );
        Some(SelectionOutcome { run, winner })
    }
}

fn pick_uniform<R: Rng, S: ItemSurface + ?Sized>(rng: &mut R, surface: &S) -> Option<ItemHandle> {
    let count = surface.item_count();
    if count == 0 {
        return None;
    }
    surface.item_at(rng.random_range(0..count))
}
