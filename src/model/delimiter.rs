// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tagpick-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tagpick and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Separator used to split raw input into items.
///
/// Exactly one delimiter is active at a time; it lives in the
/// [`ItemRegistry`](crate::registry::ItemRegistry) rather than in ambient state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Delimiter {
    #[default]
    Space,
    Comma,
    Period,
}

impl Delimiter {
    /// All recognized delimiters, in menu order.
    pub const ALL: [Delimiter; 3] = [Self::Space, Self::Comma, Self::Period];

    pub const fn character(self) -> char {
        match self {
            Self::Space => ' ',
            Self::Comma => ',',
            Self::Period => '.',
        }
    }

    pub const fn title(self) -> &'static str {
        match self {
            Self::Space => "Space",
            Self::Comma => "Comma",
            Self::Period => "Period",
        }
    }

    /// Glyph shown in the delimiter menu and the input title.
    pub const fn glyph(self) -> &'static str {
        match self {
            Self::Space => "␣",
            Self::Comma => ",",
            Self::Period => ".",
        }
    }

    pub fn from_char(ch: char) -> Option<Self> {
        Self::ALL.into_iter().find(|delimiter| delimiter.character() == ch)
    }

    /// Position in [`Delimiter::ALL`].
    pub fn menu_index(self) -> usize {
        Self::ALL
            .iter()
            .position(|delimiter| *delimiter == self)
            .unwrap_or(0)
    }
}

impl fmt::Display for Delimiter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown delimiter `{0}` (expected space, comma or period)")]
pub struct ParseDelimiterError(String);

impl FromStr for Delimiter {
    type Err = ParseDelimiterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        if let (Some(ch), None) = (chars.next(), chars.next()) {
            if let Some(delimiter) = Self::from_char(ch) {
                return Ok(delimiter);
            }
        }

        match s.trim().to_ascii_lowercase().as_str() {
            "space" => Ok(Self::Space),
            "comma" => Ok(Self::Comma),
            "period" | "dot" => Ok(Self::Period),
            _ => Err(ParseDelimiterError(s.to_owned())),
        }
    }
}
