// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tagpick-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tagpick and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Terminal UI.
//!
//! Provides the interactive picker shell (ratatui + crossterm): an auto-resizing input box, the
//! rendered tags, a delimiter menu and a footer. The event loop polls crossterm with a timeout
//! derived from the selection engine's next deadline, so the animation advances without a
//! separate timer thread.

use std::{
    io,
    time::{Duration, Instant},
};

use crossterm::{
    event::{
        self, DisableBracketedPaste, EnableBracketedPaste, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers,
    },
    execute,
    style::Print,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
};

use crate::engine::{Phase, SelectionConfig, SelectionEngine, SelectionOutcome};
use crate::model::Delimiter;
use crate::registry::{strip_newlines, ItemRegistry};

mod theme;

use theme::TuiTheme;

const FOOTER_LABEL_COLOR: Color = Color::Gray;
const FOOTER_KEY_COLOR: Color = Color::Cyan;
const FOOTER_BRAND_COLOR: Color = Color::White;
const FOOTER_BRAND: &str = "tagpick";
const IDLE_POLL: Duration = Duration::from_millis(250);
const TOAST_TTL: Duration = Duration::from_secs(2);
const MIN_INPUT_HEIGHT: u16 = 3;

/// Startup state for the interactive picker.
#[derive(Debug, Clone, Default)]
pub struct TuiOptions {
    pub initial_text: String,
    pub delimiter: Delimiter,
    pub selection: SelectionConfig,
    pub seed: Option<u64>,
}

/// Runs the interactive terminal UI until the user quits.
pub fn run(options: TuiOptions) -> crate::error::Result<()> {
    let theme = TuiTheme::from_env()?;
    let mut terminal = TerminalSession::new()?;
    let mut app = App::new(options, theme);
    tracing::info!(
        items = app.registry.items().len(),
        delimiter = %app.registry.delimiter(),
        "tui started"
    );

    while !app.should_quit {
        app.advance_to(app.now());
        terminal.draw(|frame| draw(frame, &mut app))?;

        if let Some(text) = app.take_clipboard_request() {
            match copy_to_clipboard(&text) {
                Ok(backend) => app.set_toast(format!("Yanked winner ({backend})")),
                Err(err) => {
                    tracing::warn!(error = %err, "clipboard write failed");
                    app.set_toast(format!("Clipboard error: {err}"));
                }
            }
        }

        if event::poll(app.poll_timeout())? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => app.handle_key(key),
                Event::Paste(text) => app.insert_text(&text),
                _ => {}
            }
        }
    }

    tracing::info!("tui stopped");
    Ok(())
}

fn draw(frame: &mut Frame<'_>, app: &mut App) {
    let area = frame.area();
    let inner_width = area.width.saturating_sub(2).max(1) as usize;
    let input_lines = wrap_input(&app.input, inner_width, app.cursor);
    let input_height = input_box_height(input_lines.len(), area.height);

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(input_height),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(area);
    let input_area = layout[0];
    let tags_area = layout[1];
    let status_area = layout[2];

    let visible_rows = input_area.height.saturating_sub(2).max(1) as usize;
    let (cursor_row, cursor_col) = cursor_position(app.cursor, inner_width);
    let scroll = cursor_row.saturating_sub(visible_rows - 1);

    let input = Paragraph::new(
        input_lines
            .into_iter()
            .map(Line::from)
            .collect::<Vec<_>>(),
    )
    .style(app.theme.base_style())
    .scroll((scroll as u16, 0))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(app.theme.panel_border_style(app.menu.is_none() && !app.show_help))
            .title(input_title(app.registry.delimiter())),
    );
    frame.render_widget(input, input_area);

    if app.menu.is_none() && !app.show_help {
        let x = input_area.x.saturating_add(1).saturating_add(cursor_col as u16);
        let y = input_area
            .y
            .saturating_add(1)
            .saturating_add((cursor_row - scroll) as u16);
        frame.set_cursor_position((
            x.min(input_area.right().saturating_sub(2)),
            y.min(input_area.bottom().saturating_sub(2)),
        ));
    }

    let tags_inner_width = tags_area.width.saturating_sub(2) as usize;
    let tags = Paragraph::new(tag_lines(app, tags_inner_width))
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(app.theme.panel_border_style(false))
                .title(tags_title(app)),
        );
    frame.render_widget(tags, tags_area);

    let toast_snapshot = app.toast.as_ref().map(|toast| (toast.message.clone(), toast.expires_at));
    let toast_suffix = match toast_snapshot {
        Some((message, expires_at)) if expires_at > Instant::now() => format!(" | {message}"),
        Some(_) => {
            app.toast = None;
            String::new()
        }
        None => String::new(),
    };
    let status = Paragraph::new(footer_help_line(app, &toast_suffix));
    frame.render_widget(status, status_area);
    let brand = Paragraph::new(footer_brand_line()).alignment(Alignment::Right);
    frame.render_widget(brand, status_area);

    if let Some(menu) = app.menu {
        render_delimiter_menu(frame, app, menu, input_area);
    }
    if app.show_help {
        render_help(frame, area);
    }
}

// Extracted input/tag/footer/help rendering helpers.
include!("chrome.rs");

#[derive(Debug, Clone)]
struct Toast {
    message: String,
    expires_at: Instant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct DelimiterMenu {
    cursor: usize,
}

struct App {
    registry: ItemRegistry,
    engine: SelectionEngine,
    input: String,
    /// Cursor position in chars, `0..=input.chars().count()`.
    cursor: usize,
    menu: Option<DelimiterMenu>,
    show_help: bool,
    toast: Option<Toast>,
    theme: TuiTheme,
    origin: Instant,
    winner_label: Option<String>,
    pending_clipboard: Option<String>,
    should_quit: bool,
}

impl App {
    fn new(options: TuiOptions, theme: TuiTheme) -> Self {
        let engine = match options.seed {
            Some(seed) => SelectionEngine::seeded(options.selection, seed),
            None => SelectionEngine::new(options.selection),
        };
        let input = strip_newlines(&options.initial_text);
        let mut registry = ItemRegistry::new(options.delimiter);
        registry.set_text(&input);

        Self {
            registry,
            engine,
            cursor: input.chars().count(),
            input,
            menu: None,
            show_help: false,
            toast: None,
            theme,
            origin: Instant::now(),
            winner_label: None,
            pending_clipboard: None,
            should_quit: false,
        }
    }

    fn now(&self) -> Duration {
        self.origin.elapsed()
    }

    /// Time until the engine needs attention, capped so the UI still redraws toasts.
    fn poll_timeout(&self) -> Duration {
        match self.engine.next_deadline() {
            Some(deadline) => deadline.saturating_sub(self.now()).min(IDLE_POLL),
            None => IDLE_POLL,
        }
    }

    fn advance_to(&mut self, now: Duration) {
        if let Some(outcome) = self.engine.advance(now, &mut self.registry) {
            self.finish_selection(outcome);
        }
    }

    fn finish_selection(&mut self, outcome: SelectionOutcome) {
        self.winner_label = outcome
            .winner
            .and_then(|winner| self.registry.label(winner))
            .map(str::to_owned);
        match &self.winner_label {
            Some(label) => self.set_toast(format!("Picked: {}", label.trim())),
            None => self.set_toast("Nothing to pick"),
        }
    }

    fn trigger_selection(&mut self) {
        let now = self.now();
        self.trigger_selection_at(now);
    }

    fn trigger_selection_at(&mut self, now: Duration) {
        self.winner_label = None;
        self.engine.run_selection(now, &mut self.registry);
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('c') | KeyCode::Char('q') => self.should_quit = true,
                KeyCode::Char('l') => self.clear_input(),
                KeyCode::Char('y') => self.yank_winner(),
                _ => {}
            }
            return;
        }

        if self.show_help {
            if matches!(key.code, KeyCode::Esc | KeyCode::F(1) | KeyCode::Enter) {
                self.show_help = false;
            }
            return;
        }

        if self.menu.is_some() && self.handle_menu_key(key.code) {
            return;
        }

        match key.code {
            KeyCode::Enter => self.trigger_selection(),
            KeyCode::Tab => self.open_menu(),
            KeyCode::F(1) => self.show_help = true,
            KeyCode::Backspace => self.delete_before_cursor(),
            KeyCode::Delete => self.delete_at_cursor(),
            KeyCode::Left => self.cursor = self.cursor.saturating_sub(1),
            KeyCode::Right => self.cursor = (self.cursor + 1).min(self.input_len()),
            KeyCode::Home => self.cursor = 0,
            KeyCode::End => self.cursor = self.input_len(),
            KeyCode::Char(ch) => self.insert_text(ch.encode_utf8(&mut [0u8; 4])),
            _ => {}
        }
    }

    /// Returns `true` when the key was consumed by the menu.
    ///
    /// Any key the menu does not understand closes it and falls through to the input.
    fn handle_menu_key(&mut self, code: KeyCode) -> bool {
        let Some(menu) = self.menu.as_mut() else {
            return false;
        };
        let last = Delimiter::ALL.len() - 1;

        match code {
            KeyCode::Up => menu.cursor = menu.cursor.checked_sub(1).unwrap_or(last),
            KeyCode::Down => menu.cursor = if menu.cursor >= last { 0 } else { menu.cursor + 1 },
            KeyCode::Enter => {
                let choice = Delimiter::ALL[menu.cursor];
                self.choose_delimiter(choice);
            }
            KeyCode::Esc | KeyCode::Tab => self.menu = None,
            KeyCode::Char(ch) => match Delimiter::from_char(ch) {
                Some(choice) => self.choose_delimiter(choice),
                None => {
                    self.menu = None;
                    return false;
                }
            },
            _ => {
                self.menu = None;
                return false;
            }
        }
        true
    }

    fn open_menu(&mut self) {
        self.menu = Some(DelimiterMenu {
            cursor: self.registry.delimiter().menu_index(),
        });
    }

    fn choose_delimiter(&mut self, delimiter: Delimiter) {
        self.menu = None;
        if delimiter == self.registry.delimiter() {
            return;
        }
        self.registry.set_delimiter(delimiter);
        self.winner_label = None;
        tracing::debug!(%delimiter, items = self.registry.items().len(), "delimiter changed");
        self.set_toast(format!("Delimiter: {}", delimiter.title()));
    }

    fn input_len(&self) -> usize {
        self.input.chars().count()
    }

    fn insert_text(&mut self, text: &str) {
        let text = strip_newlines(text);
        if text.is_empty() {
            return;
        }
        let at = byte_offset(&self.input, self.cursor);
        self.input.insert_str(at, &text);
        self.cursor += text.chars().count();
        self.input_changed();
    }

    fn delete_before_cursor(&mut self) {
        if self.cursor == 0 {
            return;
        }
        let at = byte_offset(&self.input, self.cursor - 1);
        self.input.remove(at);
        self.cursor -= 1;
        self.input_changed();
    }

    fn delete_at_cursor(&mut self) {
        if self.cursor >= self.input_len() {
            return;
        }
        let at = byte_offset(&self.input, self.cursor);
        self.input.remove(at);
        self.input_changed();
    }

    fn clear_input(&mut self) {
        self.input.clear();
        self.cursor = 0;
        self.winner_label = None;
        self.registry.clear();
        self.set_toast("Cleared");
    }

    /// Rebuilding drops the winner highlight, so the yankable winner goes with it.
    fn input_changed(&mut self) {
        self.registry.set_text(&self.input);
        self.winner_label = None;
    }

    fn yank_winner(&mut self) {
        match &self.winner_label {
            Some(label) => self.pending_clipboard = Some(label.trim().to_owned()),
            None => self.set_toast("No winner yet"),
        }
    }

    fn take_clipboard_request(&mut self) -> Option<String> {
        self.pending_clipboard.take()
    }

    fn set_toast(&mut self, message: impl Into<String>) {
        self.toast = Some(Toast {
            message: message.into(),
            expires_at: Instant::now() + TOAST_TTL,
        });
    }
}

fn byte_offset(text: &str, char_index: usize) -> usize {
    text.char_indices()
        .nth(char_index)
        .map_or(text.len(), |(idx, _)| idx)
}

struct TerminalSession {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
}

impl TerminalSession {
    fn new() -> io::Result<Self> {
        enable_raw_mode()?;

        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableBracketedPaste).map_err(|err| {
            teardown_terminal();
            err
        })?;

        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend).map_err(|err| {
            teardown_terminal();
            err
        })?;
        terminal.clear().map_err(|err| {
            teardown_terminal();
            err
        })?;

        Ok(Self { terminal })
    }

    fn draw(&mut self, draw_fn: impl FnOnce(&mut Frame<'_>)) -> io::Result<()> {
        self.terminal.draw(draw_fn)?;
        Ok(())
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = self.terminal.show_cursor();
        teardown_terminal();
    }
}

fn teardown_terminal() {
    let _ = disable_raw_mode();
    let mut stdout = io::stdout();
    let _ = execute!(stdout, DisableBracketedPaste, LeaveAlternateScreen);
}

fn copy_to_clipboard(text: &str) -> Result<&'static str, String> {
    let mut stdout = io::stdout();
    execute!(stdout, Print(osc52_sequence(text))).map_err(|err| err.to_string())?;
    Ok("osc52")
}

fn osc52_sequence(text: &str) -> String {
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine as _;

    let encoded = STANDARD.encode(text.as_bytes());
    format!("\x1b]52;c;{encoded}\x1b\\")
}
