// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tagpick-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tagpick and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

/// Input, tag, footer, menu, and help helpers used by TUI rendering.
const MENU_WIDTH: u16 = 18;

/// Hard-wraps `text` into rows of `width` chars.
///
/// A trailing empty row is added when the cursor sits just past a full row.
fn wrap_input(text: &str, width: usize, cursor: usize) -> Vec<String> {
    let width = width.max(1);
    let chars = text.chars().collect::<Vec<_>>();
    let mut rows = chars
        .chunks(width)
        .map(|chunk| chunk.iter().collect::<String>())
        .collect::<Vec<_>>();

    let (cursor_row, _) = cursor_position(cursor, width);
    while rows.len() <= cursor_row {
        rows.push(String::new());
    }
    rows
}

fn cursor_position(cursor: usize, width: usize) -> (usize, usize) {
    let width = width.max(1);
    (cursor / width, cursor % width)
}

/// Grows with the wrapped input (plus borders), up to half the terminal.
fn input_box_height(rows: usize, area_height: u16) -> u16 {
    let max = (area_height / 2).max(MIN_INPUT_HEIGHT);
    let wanted = rows.saturating_add(2).min(u16::MAX as usize) as u16;
    wanted.clamp(MIN_INPUT_HEIGHT, max)
}

fn input_title(delimiter: Delimiter) -> Line<'static> {
    Line::from(vec![
        Span::raw("─ Choices ".to_owned()),
        Span::styled(
            format!("[{}]", delimiter.glyph()),
            Style::default().fg(Color::LightGreen),
        ),
        Span::raw(" ".to_owned()),
    ])
}

fn tags_title(app: &App) -> Line<'static> {
    let count = app.registry.items().len();
    let noun = if count == 1 { "tag" } else { "tags" };
    Line::from(format!("─ {count} {noun} "))
}

/// Packs tag widths left to right into rows no wider than `max_width`.
///
/// A tag wider than the row gets a row of its own.
fn tag_rows(widths: &[usize], max_width: usize) -> Vec<std::ops::Range<usize>> {
    let mut rows = Vec::new();
    let mut start = 0usize;
    let mut used = 0usize;

    for (idx, &width) in widths.iter().enumerate() {
        let needed = if idx == start { width } else { used + 1 + width };
        if idx > start && needed > max_width {
            rows.push(start..idx);
            start = idx;
            used = width;
        } else {
            used = needed;
        }
    }
    if start < widths.len() {
        rows.push(start..widths.len());
    }
    rows
}

fn tag_lines(app: &App, max_width: usize) -> Vec<Line<'static>> {
    let items = app.registry.items();
    if items.is_empty() {
        let hint = format!(
            "Type choices separated by {}, then press Enter.",
            app.registry.delimiter().title().to_lowercase()
        );
        return vec![Line::from(Span::styled(hint, app.theme.muted_style()))];
    }

    let settled = app.engine.is_idle();
    let tag_style = app.theme.tag_style();
    let highlight_style = app.theme.highlight_style(settled);

    let widths = items
        .iter()
        .map(|item| item.label().chars().count() + 2)
        .collect::<Vec<_>>();
    let mut lines = Vec::new();
    for row in tag_rows(&widths, max_width.max(1)) {
        let mut spans = Vec::with_capacity(row.len() * 2);
        for item in &items.items()[row] {
            if !spans.is_empty() {
                spans.push(Span::raw(" "));
            }
            let style = if item.is_highlighted() {
                highlight_style
            } else {
                tag_style
            };
            spans.push(Span::styled(format!(" {} ", item.label()), style));
        }
        lines.push(Line::from(spans));
        // Blank row between tag rows keeps backgrounds from touching.
        lines.push(Line::from(""));
    }
    lines.pop();
    lines
}

fn phase_value(app: &App) -> String {
    match app.engine.phase() {
        Phase::Running => format!(
            "{} {}/{}",
            Phase::Running.label(),
            app.engine.ticks_elapsed(),
            app.engine.config().tick_count
        ),
        phase => phase.label().to_owned(),
    }
}

fn footer_help_line(app: &App, toast_suffix: &str) -> Line<'static> {
    let mut spans = Vec::<Span<'static>>::new();

    if app.menu.is_some() {
        push_footer_entry(&mut spans, "DELIM", "↑/↓ Enter");
        push_footer_entry(&mut spans, "PICK", "␣ , .");
        push_footer_entry(&mut spans, "CLOSE", "Esc");
    } else {
        push_footer_entry(&mut spans, "PICK", "Enter");
        push_footer_entry(&mut spans, "DELIM", "Tab");
        push_footer_entry(&mut spans, "CLEAR", "^L");
        push_footer_entry(&mut spans, "YANK", "^Y");
        push_footer_entry(&mut spans, "HELP", "F1");
        push_footer_entry(&mut spans, "QUIT", "^C");
    }
    push_footer_entry(&mut spans, "TAGS", &app.registry.items().len().to_string());
    push_footer_entry(&mut spans, "STATE", &phase_value(app));

    if !toast_suffix.is_empty() {
        spans.push(Span::styled(
            toast_suffix.to_owned(),
            Style::default().fg(Color::Yellow),
        ));
    }
    Line::from(spans)
}

fn footer_brand_line() -> Line<'static> {
    Line::from(vec![Span::styled(
        FOOTER_BRAND.to_owned(),
        Style::default().fg(FOOTER_BRAND_COLOR),
    )])
}

fn push_footer_entry(spans: &mut Vec<Span<'static>>, label: &str, value: &str) {
    if !spans.is_empty() {
        spans.push(Span::styled(
            " | ".to_owned(),
            Style::default().fg(FOOTER_LABEL_COLOR),
        ));
    }
    spans.push(Span::styled(
        format!("{}:", footer_label_ucfirst(label)),
        Style::default().fg(FOOTER_LABEL_COLOR),
    ));
    spans.push(Span::styled(
        value.to_owned(),
        Style::default()
            .fg(FOOTER_KEY_COLOR)
            .add_modifier(Modifier::BOLD),
    ));
}

fn footer_label_ucfirst(label: &str) -> String {
    let lower = label.to_lowercase();
    let mut chars = lower.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };
    let mut out = first.to_uppercase().collect::<String>();
    out.push_str(chars.as_str());
    out
}

/// Dropdown anchored to the top-right corner of the input box.
fn menu_rect(input_area: Rect, frame_area: Rect) -> Rect {
    let height = Delimiter::ALL.len() as u16 + 2;
    let width = MENU_WIDTH.min(frame_area.width);
    let x = input_area
        .right()
        .saturating_sub(width)
        .saturating_sub(1)
        .max(frame_area.x);
    let y = input_area.y.saturating_add(1);
    Rect {
        x,
        y,
        width,
        height: height.min(frame_area.bottom().saturating_sub(y)),
    }
}

fn render_delimiter_menu(frame: &mut Frame<'_>, app: &App, menu: DelimiterMenu, input_area: Rect) {
    let area = menu_rect(input_area, frame.area());
    if area.height == 0 {
        return;
    }
    frame.render_widget(Clear, area);

    let active = app.registry.delimiter();
    let items = Delimiter::ALL
        .iter()
        .map(|delimiter| {
            let marker = if *delimiter == active { "●" } else { " " };
            ListItem::new(format!("{marker} {} {}", delimiter.glyph(), delimiter.title()))
        })
        .collect::<Vec<_>>();
    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(app.theme.panel_border_style(true))
                .title("─ Split on "),
        )
        .style(app.theme.base_style())
        .highlight_style(app.theme.selection_style());

    let mut state = ListState::default();
    state.select(Some(menu.cursor));
    frame.render_stateful_widget(list, area, &mut state);
}

fn help_key_style() -> Style {
    Style::default()
        .fg(FOOTER_KEY_COLOR)
        .add_modifier(Modifier::BOLD)
}

fn centered_rect(width_percent: u16, height_percent: u16, area: Rect) -> Rect {
    let vertical_margin = (100u16.saturating_sub(height_percent)) / 2;
    let horizontal_margin = (100u16.saturating_sub(width_percent)) / 2;

    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(vertical_margin),
            Constraint::Percentage(height_percent),
            Constraint::Percentage(vertical_margin),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(horizontal_margin),
            Constraint::Percentage(width_percent),
            Constraint::Percentage(horizontal_margin),
        ])
        .split(vertical[1])[1]
}

fn help_kv(key: &str, desc: &str, key_width: usize, key_style: Style) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{key:>width$}", width = key_width), key_style),
        Span::raw("  "),
        Span::raw(desc.to_owned()),
    ])
}

const HELP_ENTRIES: &[(&str, &str)] = &[
    ("Enter", "Pick a random choice"),
    ("Tab", "Choose delimiter"),
    ("␣ , .", "Pick delimiter (menu open)"),
    ("Ctrl-L", "Clear all choices"),
    ("Ctrl-Y", "Copy winner (OSC52)"),
    ("F1/Esc", "Close help"),
    ("Ctrl-C/Ctrl-Q", "Quit"),
];

fn render_help(frame: &mut Frame<'_>, main_area: Rect) {
    let area = centered_rect(70, 60, main_area);
    frame.render_widget(Clear, area);

    let key_style = help_key_style();
    let key_col_width = HELP_ENTRIES
        .iter()
        .map(|(key, _)| key.chars().count())
        .max()
        .unwrap_or(0);

    let mut lines = Vec::<Line<'static>>::new();
    lines.push(Line::from(Span::styled(
        "--- Keys ---",
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    )));
    lines.extend(
        HELP_ENTRIES
            .iter()
            .map(|(key, desc)| help_kv(key, desc, key_col_width, key_style)),
    );
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Blank entries are ignored. Pasted line breaks are dropped.",
        Style::default().fg(Color::DarkGray),
    )));

    let block = Block::default()
        .borders(Borders::ALL)
        .title("─ Help ─")
        .border_style(Style::default().fg(Color::Green))
        .title_style(
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        );
    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}
