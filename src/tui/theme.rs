// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tagpick-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tagpick and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Tag colours, optionally overridden by an 18-column palette CSV in the environment
//! (`fg,bg` followed by the 16 ANSI colours, as terminal themes export them).

use std::env;

use ratatui::style::{Color, Modifier, Style};

pub(crate) const PALETTE_ENV: &str = "TAGPICK_TUI_PALETTE";
pub(crate) const PALETTE_ENV_FALLBACK: &str = "TAGPICK_PALETTE";

const CSV_COLUMNS: usize = 18;

/// The colours a tagpick screen actually paints with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Swatch {
    Ink,
    Flicker,
    Tag,
    Muted,
    Frame,
    Winner,
}

impl Swatch {
    /// Column of the matching ANSI colour in the palette CSV.
    const fn csv_column(self) -> usize {
        match self {
            Self::Ink => 2,
            Self::Flicker => 7,
            Self::Tag => 8,
            Self::Muted => 10,
            Self::Frame => 12,
            Self::Winner => 13,
        }
    }

    const fn terminal_default(self) -> Color {
        match self {
            Self::Ink => Color::Black,
            Self::Flicker => Color::Magenta,
            Self::Tag => Color::Cyan,
            Self::Muted => Color::DarkGray,
            Self::Frame => Color::LightGreen,
            Self::Winner => Color::LightYellow,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub(crate) struct TuiTheme {
    palette: Option<TuiPalette>,
}

impl TuiTheme {
    pub(crate) fn from_env() -> Result<Self, ThemeError> {
        let palette = palette_override_from_env()?;
        Ok(Self { palette })
    }

    pub(crate) fn base_style(&self) -> Style {
        match &self.palette {
            Some(palette) => Style::default().fg(palette.fg()).bg(palette.bg()),
            None => Style::default(),
        }
    }

    fn color(&self, swatch: Swatch) -> Color {
        self.palette
            .as_ref()
            .map_or(swatch.terminal_default(), |palette| palette.swatch(swatch))
    }

    pub(crate) fn panel_border_style(&self, focused: bool) -> Style {
        let swatch = if focused { Swatch::Frame } else { Swatch::Muted };
        self.base_style().fg(self.color(swatch))
    }

    pub(crate) fn selection_style(&self) -> Style {
        self.base_style()
            .add_modifier(Modifier::REVERSED | Modifier::BOLD)
    }

    pub(crate) fn tag_style(&self) -> Style {
        self.base_style()
            .fg(self.color(Swatch::Ink))
            .bg(self.color(Swatch::Tag))
    }

    /// Style for the highlighted tag: the flicker while running, the winner once idle.
    pub(crate) fn highlight_style(&self, settled: bool) -> Style {
        let swatch = if settled { Swatch::Winner } else { Swatch::Flicker };
        self.base_style()
            .fg(self.color(Swatch::Ink))
            .bg(self.color(swatch))
            .add_modifier(Modifier::BOLD)
    }

    pub(crate) fn muted_style(&self) -> Style {
        self.base_style().fg(self.color(Swatch::Muted))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct TuiPalette {
    columns: [Color; CSV_COLUMNS],
}

impl TuiPalette {
    fn parse_csv(value: &str) -> Result<Self, String> {
        let cells = value.split(',').collect::<Vec<_>>();
        if cells.len() != CSV_COLUMNS {
            return Err(format!(
                "expected {CSV_COLUMNS} comma-separated colors (fg, bg, then 16 ANSI colors), got {}",
                cells.len()
            ));
        }

        let mut columns = [Color::Reset; CSV_COLUMNS];
        for (column, cell) in columns.iter_mut().zip(cells) {
            *column = parse_color(cell)?;
        }
        Ok(Self { columns })
    }

    fn fg(&self) -> Color {
        self.columns[0]
    }

    fn bg(&self) -> Color {
        self.columns[1]
    }

    fn swatch(&self, swatch: Swatch) -> Color {
        self.columns[swatch.csv_column()]
    }
}

/// The first palette variable that is set wins. An empty value disables the override.
fn palette_override_from_env() -> Result<Option<TuiPalette>, ThemeError> {
    for name in [PALETTE_ENV, PALETTE_ENV_FALLBACK] {
        let Some(raw) = env::var_os(name) else {
            continue;
        };
        let Some(value) = raw.to_str() else {
            return Err(ThemeError::InvalidEnv {
                name: name.to_owned(),
                value: "<non-unicode>".to_owned(),
            });
        };

        let value = value.trim();
        if value.is_empty() {
            return Ok(None);
        }
        return TuiPalette::parse_csv(value)
            .map(Some)
            .map_err(|reason| ThemeError::InvalidEnv {
                name: name.to_owned(),
                value: format!("{value} ({reason})"),
            });
    }
    Ok(None)
}

/// Accepts `#rrggbb`, `0xrrggbb`, bare `rrggbb` and X11 `rgb:rr/gg/bb` (or `rrrr` channels).
fn parse_color(cell: &str) -> Result<Color, String> {
    let value = cell.trim().to_ascii_lowercase();
    if value.is_empty() {
        return Err("empty color".to_owned());
    }

    let channels = match value.strip_prefix("rgb:") {
        Some(spec) => spec
            .split('/')
            .map(parse_x11_channel)
            .collect::<Result<Vec<_>, _>>()?,
        None => {
            let hex = value
                .strip_prefix('#')
                .or_else(|| value.strip_prefix("0x"))
                .unwrap_or(&value);
            if hex.len() != 6 || !hex.is_ascii() {
                return Err(format!("invalid hex color: {value} (expected #rrggbb)"));
            }
            (0..3)
                .map(|idx| {
                    u8::from_str_radix(&hex[idx * 2..idx * 2 + 2], 16)
                        .map_err(|_| format!("invalid hex color: {value}"))
                })
                .collect::<Result<Vec<_>, _>>()?
        }
    };

    match channels.as_slice() {
        [r, g, b] => Ok(Color::Rgb(*r, *g, *b)),
        _ => Err(format!("invalid rgb: color {value} (expected three channels)")),
    }
}

fn parse_x11_channel(part: &str) -> Result<u8, String> {
    let invalid = || format!("invalid rgb: channel {part} (expected 2 or 4 hex digits)");
    match part.len() {
        2 => u8::from_str_radix(part, 16).map_err(|_| invalid()),
        4 => u16::from_str_radix(part, 16)
            .map(|wide| (wide >> 8) as u8)
            .map_err(|_| invalid()),
        _ => Err(invalid()),
    }
}

#[derive(Debug, Clone, thiserror::Error)]
pub(crate) enum ThemeError {
    #[error("invalid env {name}={value}")]
    InvalidEnv { name: String, value: String },
}

impl From<ThemeError> for crate::error::PickerError {
    fn from(value: ThemeError) -> Self {
        Self::Theme(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::{
        palette_override_from_env, parse_color, Swatch, ThemeError, TuiPalette, TuiTheme,
        PALETTE_ENV, PALETTE_ENV_FALLBACK,
    };
    use ratatui::style::{Color, Modifier};
    use rstest::rstest;
    use std::env;

    /// 18 columns of grey with distinct fg/bg and a distinct winner column.
    fn palette_csv(winner: &str) -> String {
        let mut cells = vec!["#111111".to_owned(), "#222222".to_owned()];
        cells.extend((0..16).map(|idx| format!("#{:02x}{:02x}{:02x}", idx * 8, idx * 8, idx * 8)));
        cells[Swatch::Winner.csv_column()] = winner.to_owned();
        cells.join(",")
    }

    #[test]
    fn default_theme_distinguishes_flicker_from_winner() {
        let theme = TuiTheme::default();
        let flicker = theme.highlight_style(false);
        let winner = theme.highlight_style(true);

        assert_eq!(flicker.bg, Some(Color::Magenta));
        assert_eq!(winner.bg, Some(Color::LightYellow));
        assert!(winner.add_modifier.contains(Modifier::BOLD));
        assert_ne!(theme.tag_style().bg, winner.bg);
    }

    #[test]
    fn palette_columns_feed_the_tag_styles() {
        let palette = TuiPalette::parse_csv(&palette_csv("rgb:ff/cc/00")).expect("palette");
        assert_eq!(palette.fg(), Color::Rgb(0x11, 0x11, 0x11));
        assert_eq!(palette.bg(), Color::Rgb(0x22, 0x22, 0x22));

        let theme = TuiTheme {
            palette: Some(palette),
        };
        assert_eq!(theme.highlight_style(true).bg, Some(Color::Rgb(0xff, 0xcc, 0x00)));
        // Cyan is ANSI 6, column 8.
        assert_eq!(theme.tag_style().bg, Some(Color::Rgb(48, 48, 48)));
        assert_eq!(theme.base_style().bg, Some(Color::Rgb(0x22, 0x22, 0x22)));
    }

    #[rstest]
    #[case("#A0b1C2", Color::Rgb(0xa0, 0xb1, 0xc2))]
    #[case("0Xa0b1c2", Color::Rgb(0xa0, 0xb1, 0xc2))]
    #[case(" a0b1c2 ", Color::Rgb(0xa0, 0xb1, 0xc2))]
    #[case("rgb:ffff/8000/0000", Color::Rgb(0xff, 0x80, 0x00))]
    fn parse_color_accepts_hex_and_x11_forms(#[case] cell: &str, #[case] expected: Color) {
        assert_eq!(parse_color(cell), Ok(expected));
    }

    #[rstest]
    #[case("")]
    #[case("#12345")]
    #[case("#gg0000")]
    #[case("#ééé")]
    #[case("rgb:ff/00")]
    #[case("rgb:f/00/00")]
    fn parse_color_rejects_malformed_cells(#[case] cell: &str) {
        assert!(parse_color(cell).is_err(), "accepted {cell:?}");
    }

    #[test]
    fn parse_csv_rejects_wrong_column_count() {
        let err = TuiPalette::parse_csv("nope").unwrap_err();
        assert!(err.contains("expected 18"));
    }

    // Only this test touches the palette variables, so it owns them for its whole body.
    #[test]
    fn palette_override_reads_primary_then_fallback_env() {
        env::remove_var(PALETTE_ENV);
        env::remove_var(PALETTE_ENV_FALLBACK);
        assert!(palette_override_from_env().expect("unset").is_none());

        env::set_var(PALETTE_ENV_FALLBACK, palette_csv("#00ff00"));
        let fallback = palette_override_from_env().expect("fallback").expect("palette");
        assert_eq!(fallback.swatch(Swatch::Winner), Color::Rgb(0, 0xff, 0));

        env::set_var(PALETTE_ENV, palette_csv("#0000ff"));
        let primary = palette_override_from_env().expect("primary").expect("palette");
        assert_eq!(primary.swatch(Swatch::Winner), Color::Rgb(0, 0, 0xff));

        env::set_var(PALETTE_ENV, "  ");
        assert!(palette_override_from_env().expect("blank").is_none());

        env::set_var(PALETTE_ENV, "red,green");
        match palette_override_from_env() {
            Err(ThemeError::InvalidEnv { name, value }) => {
                assert_eq!(name, PALETTE_ENV);
                assert!(value.starts_with("red,green ("), "value: {value}");
            }
            other => panic!("expected InvalidEnv, got: {other:?}"),
        }

        env::remove_var(PALETTE_ENV);
        env::remove_var(PALETTE_ENV_FALLBACK);
    }
}
