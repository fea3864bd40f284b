// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tagpick-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tagpick and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Tagpick: random choice picker with an animated highlight (registry + selection engine + TUI).

pub mod config;
pub mod engine;
pub mod error;
pub mod model;
pub mod registry;
pub mod tui;
