// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tagpick-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tagpick and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Core data model.
//!
//! Items are derived from raw input by the registry; delimiters pick the split rule.

pub mod delimiter;
pub mod item;

pub use delimiter::{Delimiter, ParseDelimiterError};
pub use item::{Item, ItemHandle, ItemSequence};
