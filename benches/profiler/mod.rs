// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tagpick-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tagpick and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Shared criterion setup. Tunables come from the environment so CI can shorten runs.

use std::str::FromStr;
use std::time::Duration;

use criterion::Criterion;
use pprof::criterion::{Output, PProfProfiler};

fn env_or<T: FromStr>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|raw| raw.trim().parse::<T>().ok())
        .unwrap_or(default)
}

pub fn criterion() -> Criterion {
    let frequency = env_or::<i32>("TAGPICK_PROFILE_FREQ", 100).clamp(1, 1000);
    let sample_size = env_or::<usize>("TAGPICK_BENCH_SAMPLES", 50).clamp(10, 200);
    let warmup_ms = env_or::<u64>("TAGPICK_BENCH_WARMUP_MS", 1500).clamp(100, 60_000);
    let measure_ms = env_or::<u64>("TAGPICK_BENCH_MEASURE_MS", 4000).clamp(500, 120_000);

    Criterion::default()
        .sample_size(sample_size)
        .warm_up_time(Duration::from_millis(warmup_ms))
        .measurement_time(Duration::from_millis(measure_ms))
        .with_profiler(PProfProfiler::new(frequency, Output::Flamegraph(None)))
}
