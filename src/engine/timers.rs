// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tagpick-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tagpick and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Deadline-ordered timer queue for a single-threaded event loop.
//!
//! Time is a [`Duration`] offset from an arbitrary origin chosen by the caller. The queue never
//! reads a clock itself, so the same code runs against `Instant`-derived offsets in the TUI and
//! against virtual time in tests.

use std::collections::{BTreeMap, HashMap};
use std::time::Duration;

/// Lower bound for repeating periods; a zero period would re-fire forever within one `pop_due`.
pub const MIN_PERIOD: Duration = Duration::from_millis(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

/// A timer that came due.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fired<A> {
    pub id: TimerId,
    /// The deadline the timer was scheduled for (not the time it was popped).
    pub at: Duration,
    pub action: A,
}

#[derive(Debug, Clone)]
struct Entry<A> {
    id: TimerId,
    period: Option<Duration>,
    action: A,
}

type Key = (Duration, u64);

#[derive(Debug)]
pub struct TimerQueue<A> {
    next_id: u64,
    next_seq: u64,
    pending: BTreeMap<Key, Entry<A>>,
    keys: HashMap<TimerId, Key>,
}

impl<A> Default for TimerQueue<A> {
    fn default() -> Self {
        Self {
            next_id: 0,
            next_seq: 0,
            pending: BTreeMap::new(),
            keys: HashMap::new(),
        }
    }
}

impl<A: Clone> TimerQueue<A> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule_once(&mut self, at: Duration, action: A) -> TimerId {
        self.insert(at, None, action)
    }

    pub fn schedule_repeating(&mut self, first: Duration, period: Duration, action: A) -> TimerId {
        self.insert(first, Some(period.max(MIN_PERIOD)), action)
    }

    pub fn cancel(&mut self, id: TimerId) -> bool {
        let Some(key) = self.keys.remove(&id) else {
            return false;
        };
        self.pending.remove(&key).is_some()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
        self.keys.clear();
    }

    pub fn is_pending(&self, id: TimerId) -> bool {
        self.keys.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn next_deadline(&self) -> Option<Duration> {
        self.pending.keys().next().map(|(at, _)| *at)
    }

    /// Pops the earliest timer whose deadline is `<= now`.
    ///
    /// Ties fire in scheduling order. A repeating timer is re-armed at `deadline + period` before
    /// it is returned, so anything the caller schedules while handling it lands behind it.
    pub fn pop_due(&mut self, now: Duration) -> Option<Fired<A>> {
        let key = *self.pending.keys().next()?;
        if key.0 > now {
            return None;
        }

        let entry = self.pending.remove(&key)?;
        self.keys.remove(&entry.id);

        if let Some(period) = entry.period {
            let seq = self.bump_seq();
            let next_key = (key.0 + period, seq);
            self.keys.insert(entry.id, next_key);
            self.pending.insert(next_key, entry.clone());
        }

        Some(Fired {
            id: entry.id,
            at: key.0,
            action: entry.action,
        })
    }

    fn insert(&mut self, at: Duration, period: Option<Duration>, action: A) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        let key = (at, self.bump_seq());
        self.keys.insert(id, key);
        self.pending.insert(key, Entry { id, period, action });
        id
    }

    fn bump_seq(&mut self) -> u64 {
        let seq = self.next_seq;
        self.next_seq = self.next_seq.wrapping_add(1);
        seq
    }
}
