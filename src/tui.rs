//! TUI (Terminal User Interface) module for the word game
//!
//! This module provides the interactive tile grid and on-screen keyboard using Ratatui.
//!
//! # Architecture
//! - `TuiInterface`: owns the terminal, turns crossterm key events into
//!   `UserAction`s and redraws from the last `Round` it was handed
//! - `map_key`: pure key translation, shared by the input loop and tests
//!
//! # Layout
//! Title, tile grid (one row per allowed attempt), keyboard, message panel,
//! status line, instructions.

use crate::cli::KEYBOARD_ROWS;
use crate::evaluator::{Feedback, LetterStatus};
use crate::game_state::{GameInterface, KeyInput, UserAction};
use crate::round::Round;
use crate::wordbank::WORD_LENGTH;
use crate::{debug_log, info_log};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use std::io;
use std::time::Duration;

const EVENT_POLL_TIMEOUT_MS: u64 = 100;
const REVEAL_DELAY_MS: u64 = 100;
const ROW_SPACING: u16 = 2;
const KEYBOARD_HEIGHT: u16 = 8;
const ENTER_LABEL: &str = "ENTER";
const DELETE_LABEL: &str = "DEL";

// Style constants for consistent UI
const HEADER_STYLE: Style = Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD);
const ERROR_STYLE: Style = Style::new().fg(Color::Red);
const SUCCESS_STYLE: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);
const MESSAGE_STYLE: Style = Style::new().fg(Color::Cyan);

#[derive(Clone, Copy, PartialEq, Debug)]
enum TileState {
    Empty,
    Entered,
    Scored(Feedback),
}

impl TileState {
    fn colors(self) -> (Color, Color) {
        match self {
            Self::Empty | Self::Entered => (Color::DarkGray, Color::White),
            Self::Scored(Feedback::Correct) => (Color::Green, Color::Black),
            Self::Scored(Feedback::Present) => (Color::Yellow, Color::Black),
            Self::Scored(Feedback::Absent) => (Color::Gray, Color::White),
        }
    }
}

fn key_colors(status: Option<Feedback>) -> (Color, Color) {
    match status {
        Some(feedback) => TileState::Scored(feedback).colors(),
        None => (Color::Reset, Color::White),
    }
}

/// Translate a raw key press. Control and Alt chords are swallowed apart
/// from Ctrl+N (new round) and Ctrl+C (quit).
pub fn map_key(key: KeyEvent, round_over: bool) -> Option<UserAction> {
    let has_ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let has_alt = key.modifiers.contains(KeyModifiers::ALT);

    match key.code {
        KeyCode::Char('n' | 'N') if has_ctrl => Some(UserAction::NewGame),
        KeyCode::Char('c' | 'C') if has_ctrl => Some(UserAction::Exit),
        _ if has_ctrl || has_alt => None,
        KeyCode::Esc => Some(UserAction::Exit),
        KeyCode::Char('n' | 'N') if round_over => Some(UserAction::NewGame),
        KeyCode::Char(c) if c.is_ascii_alphabetic() => {
            Some(UserAction::Key(KeyInput::Letter(c.to_ascii_uppercase())))
        }
        KeyCode::Enter => Some(UserAction::Key(KeyInput::Submit)),
        KeyCode::Backspace => Some(UserAction::Key(KeyInput::Delete)),
        _ => None,
    }
}

/// Context for rendering the UI - groups related parameters to avoid too many function arguments.
struct RenderContext<'a> {
    round: Option<&'a Round>,
    message: &'a str,
    error_message: &'a str,
    status: &'a str,
    round_over: bool,
}

/// Main TUI interface component.
///
/// Manages terminal rendering, input handling and message display.
pub struct TuiInterface {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    round: Option<Round>,
    message: String,
    error_message: String,
    status: String,
    round_over: bool,
}

impl TuiInterface {
    pub fn new() -> Result<Self, io::Error> {
        info_log!("TuiInterface::new() - Initializing TUI");
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, cursor::Hide)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        info_log!("Terminal setup complete: raw mode, alternate screen, cursor hidden");

        Ok(Self {
            terminal,
            round: None,
            message: String::new(),
            error_message: String::new(),
            status: "Ready".to_string(),
            round_over: false,
        })
    }

    pub fn cleanup(&mut self) -> Result<(), io::Error> {
        disable_raw_mode()?;
        execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            cursor::Show
        )?;
        Ok(())
    }

    fn draw(&mut self) -> Result<(), io::Error> {
        let ctx = RenderContext {
            round: self.round.as_ref(),
            message: &self.message,
            error_message: &self.error_message,
            status: &self.status,
            round_over: self.round_over,
        };

        self.terminal.draw(|f| {
            Self::render_static(f, &ctx);
        })?;
        Ok(())
    }

    /// Log and handle draw errors appropriately
    fn draw_or_log(&mut self) {
        if let Err(e) = self.draw() {
            log::warn!("Draw error: {e}");
        }
    }

    fn render_static(f: &mut Frame, ctx: &RenderContext) {
        let rows = ctx.round.map_or(0, Round::max_attempts) as u16;
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),                    // Title
                Constraint::Length(rows * ROW_SPACING + 2), // Tile grid
                Constraint::Length(KEYBOARD_HEIGHT),      // Keyboard
                Constraint::Min(3),                       // Messages
                Constraint::Length(3),                    // Status line
                Constraint::Length(3),                    // Instructions
            ])
            .split(f.area());

        Self::render_title(f, chunks[0]);
        if let Some(round) = ctx.round {
            Self::render_board(f, chunks[1], round);
            Self::render_keyboard(f, chunks[2], round.status());
        }
        let message_style = Self::message_style(ctx.round);
        Self::render_messages(f, chunks[3], ctx.message, message_style, ctx.error_message);
        Self::render_status(f, chunks[4], ctx.status);
        Self::render_instructions(f, chunks[5], ctx.round_over);
    }

    fn render_title(f: &mut Frame, area: Rect) {
        let title = Paragraph::new("WORDLE")
            .style(HEADER_STYLE)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(title, area);
    }

    fn render_board(f: &mut Frame, area: Rect, round: &Round) {
        let block = Block::default()
            .title(format!(
                "Attempts {}/{}",
                round.history().len(),
                round.max_attempts()
            ))
            .borders(Borders::ALL);
        let inner = block.inner(area);
        f.render_widget(block, area);

        let mut row_index = 0;
        for (attempt, feedback) in round.rows() {
            let tiles: Vec<(char, TileState)> = attempt
                .chars()
                .zip(feedback)
                .map(|(c, fb)| (c, TileState::Scored(fb)))
                .collect();
            Self::render_tile_row(f, inner, row_index, &tiles, false);
            row_index += 1;
        }

        if !round.is_round_over() {
            let typed: Vec<char> = round.current().chars().collect();
            let tiles: Vec<(char, TileState)> = (0..WORD_LENGTH)
                .map(|i| match typed.get(i) {
                    Some(&c) => (c, TileState::Entered),
                    None => (' ', TileState::Empty),
                })
                .collect();
            Self::render_tile_row(f, inner, row_index, &tiles, true);
            row_index += 1;
        }

        let empty = [(' ', TileState::Empty); WORD_LENGTH];
        while row_index < round.max_attempts() {
            Self::render_tile_row(f, inner, row_index, &empty, false);
            row_index += 1;
        }
    }

    #[allow(clippy::cast_possible_truncation)]
    fn render_tile_row(
        f: &mut Frame,
        area: Rect,
        row_index: usize,
        tiles: &[(char, TileState)],
        is_current: bool,
    ) {
        let y = area.y + (row_index as u16 * ROW_SPACING);
        if y >= area.y + area.height {
            return;
        }

        let last_typed = tiles
            .iter()
            .rposition(|(_, state)| *state == TileState::Entered);
        let mut spans = vec![Span::raw("  ")];
        for (i, (letter, state)) in tiles.iter().enumerate() {
            let (bg_color, fg_color) = state.colors();
            let mut style = Style::default().fg(fg_color).bg(bg_color);
            // Pop the most recently typed tile.
            if is_current && last_typed == Some(i) {
                style = style.add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
            }
            spans.push(Span::styled(format!(" {letter} "), style));
            spans.push(Span::raw(" "));
        }

        Self::render_line(f, area, y, spans);
    }

    fn render_line(f: &mut Frame, area: Rect, y: u16, spans: Vec<Span>) {
        let line = Line::from(spans);
        let paragraph = Paragraph::new(line);
        f.render_widget(
            paragraph,
            Rect {
                x: area.x,
                y,
                width: area.width,
                height: 1,
            },
        );
    }

    fn render_keyboard(f: &mut Frame, area: Rect, status: &LetterStatus) {
        let block = Block::default().title("Keyboard").borders(Borders::ALL);
        let inner = block.inner(area);
        f.render_widget(block, area);

        for (row_index, row) in KEYBOARD_ROWS.iter().enumerate() {
            let is_last = row_index == KEYBOARD_ROWS.len() - 1;
            let mut spans = vec![Span::raw(" ".repeat(row_index + 1))];
            if is_last {
                spans.push(Span::styled(format!(" {ENTER_LABEL} "), HEADER_STYLE));
                spans.push(Span::raw(" "));
            }
            for c in row.chars() {
                let (bg_color, fg_color) = key_colors(status.status_of(c));
                spans.push(Span::styled(
                    format!(" {c} "),
                    Style::default().fg(fg_color).bg(bg_color),
                ));
                spans.push(Span::raw(" "));
            }
            if is_last {
                spans.push(Span::styled(format!(" {DELETE_LABEL} "), HEADER_STYLE));
            }

            #[allow(clippy::cast_possible_truncation)]
            let y = inner.y + (row_index as u16 * ROW_SPACING);
            if y < inner.y + inner.height {
                Self::render_line(f, inner, y, spans);
            }
        }
    }

    fn message_style(round: Option<&Round>) -> Style {
        if round.is_some_and(Round::is_won) {
            SUCCESS_STYLE
        } else {
            MESSAGE_STYLE
        }
    }

    fn render_messages(
        f: &mut Frame,
        area: Rect,
        message: &str,
        message_style: Style,
        error_message: &str,
    ) {
        let mut lines = Vec::new();
        if !message.is_empty() {
            lines.push(Line::from(vec![Span::styled(message, message_style)]));
        }
        if !error_message.is_empty() {
            lines.push(Line::from(vec![Span::styled(error_message, ERROR_STYLE)]));
        }

        let paragraph = Paragraph::new(lines)
            .block(Block::default().title("Information").borders(Borders::ALL))
            .wrap(Wrap { trim: true });
        f.render_widget(paragraph, area);
    }

    fn render_instructions(f: &mut Frame, area: Rect, round_over: bool) {
        let text = if round_over {
            "N: New Game | ESC: Quit"
        } else {
            "Type letters | ENTER: Submit | BACKSPACE: Delete | CTRL+N: New Game | ESC: Quit"
        };

        let paragraph = Paragraph::new(text)
            .style(Style::default().fg(Color::Gray))
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    fn render_status(f: &mut Frame, area: Rect, status: &str) {
        let status_text = if status.is_empty() { "Ready" } else { status };
        let paragraph = Paragraph::new(status_text)
            .style(HEADER_STYLE)
            .block(Block::default().borders(Borders::ALL).title("Status"));
        f.render_widget(paragraph, area);
    }

    fn handle_input(&mut self) -> Result<Option<UserAction>, io::Error> {
        if !event::poll(Duration::from_millis(EVENT_POLL_TIMEOUT_MS))? {
            return Ok(None);
        }

        match event::read()? {
            Event::Key(key) => {
                // Only process Press events, ignore Release and Repeat to avoid double input
                if key.kind != KeyEventKind::Press {
                    return Ok(None);
                }
                debug_log!(
                    "handle_input() - Key event received: code={:?}, modifiers={:?}",
                    key.code,
                    key.modifiers
                );
                let action = map_key(key, self.round_over);
                if action.is_none()
                    && let KeyCode::Char(c) = key.code
                    && !c.is_ascii_alphabetic()
                    && !c.is_control()
                {
                    self.error_message = format!("Only letters are allowed! ('{c}' is not a letter)");
                    self.draw_or_log();
                }
                Ok(action)
            }
            Event::Resize(_, _) => {
                self.draw_or_log();
                Ok(None)
            }
            other => {
                log::trace!("handle_input() - Ignoring event: {other:?}");
                Ok(None)
            }
        }
    }
}

impl GameInterface for TuiInterface {
    fn render(&mut self, round: &Round) {
        self.round = Some(round.clone());
        self.error_message.clear();
        if !round.is_round_over() {
            self.status = format!("{} attempt(s) left", round.attempts_left());
        }
        self.draw_or_log();
    }

    fn read_action(&mut self) -> Option<UserAction> {
        match self.handle_input() {
            Ok(action) => {
                if action.is_some() {
                    info_log!("read_action() - Action received: {:?}", action);
                }
                action
            }
            Err(e) => {
                log::error!("read_action() - Error handling input ({e}), returning Exit");
                Some(UserAction::Exit)
            }
        }
    }

    fn display_rejected(&mut self, word: &str) {
        self.error_message = format!("Not in my dictionary: {word}");
        self.draw_or_log();
    }

    fn display_incomplete(&mut self, _round: &Round) {
        self.error_message = "Not enough letters!".to_string();
        self.draw_or_log();
    }

    fn display_win(&mut self, round: &Round) {
        self.round_over = true;
        self.message = format!("Solved in {} attempt(s)!", round.history().len());
        self.status = format!("Game Over - Solution: {}", round.secret());
        self.draw_or_log();
    }

    fn display_loss(&mut self, round: &Round) {
        self.round_over = true;
        self.status = "Game Over - Out of attempts".to_string();
        self.draw_or_log();
        // Let the last row land before revealing the word.
        std::thread::sleep(Duration::from_millis(REVEAL_DELAY_MS));
        self.message = format!("The word was {}", round.secret());
        self.draw_or_log();
    }

    fn display_new_game_message(&mut self, word_count: usize) {
        self.round_over = false;
        self.message = format!("New game started. Secret drawn from {word_count} words.");
        self.error_message.clear();
    }

    fn display_exit_message(&mut self) {
        self.message = "Exiting...".to_string();
        self.status = "Exiting application...".to_string();
        self.draw_or_log();
    }
}

impl Drop for TuiInterface {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wordbank::{WordBank, load_wordbank_from_str};
    use ratatui::backend::TestBackend;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn chord(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    fn screen_text(round: Option<&Round>, message: &str) -> String {
        let mut terminal = Terminal::new(TestBackend::new(90, 40)).unwrap();
        let ctx = RenderContext {
            round,
            message,
            error_message: "",
            status: "",
            round_over: false,
        };
        terminal
            .draw(|f| TuiInterface::render_static(f, &ctx))
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_map_letters_and_controls() {
        assert_eq!(
            map_key(press(KeyCode::Char('a')), false),
            Some(UserAction::Key(KeyInput::Letter('A')))
        );
        assert_eq!(
            map_key(press(KeyCode::Enter), false),
            Some(UserAction::Key(KeyInput::Submit))
        );
        assert_eq!(
            map_key(press(KeyCode::Backspace), false),
            Some(UserAction::Key(KeyInput::Delete))
        );
        assert_eq!(map_key(press(KeyCode::Esc), false), Some(UserAction::Exit));
    }

    #[test]
    fn test_map_ignores_modified_and_non_letters() {
        assert_eq!(map_key(chord(KeyCode::Char('a'), KeyModifiers::ALT), false), None);
        assert_eq!(map_key(chord(KeyCode::Char('r'), KeyModifiers::CONTROL), false), None);
        assert_eq!(map_key(press(KeyCode::Tab), false), None);
        assert_eq!(map_key(press(KeyCode::Char('3')), false), None);
    }

    #[test]
    fn test_map_shift_is_a_letter() {
        assert_eq!(
            map_key(chord(KeyCode::Char('Q'), KeyModifiers::SHIFT), false),
            Some(UserAction::Key(KeyInput::Letter('Q')))
        );
    }

    #[test]
    fn test_map_new_game_keys() {
        assert_eq!(
            map_key(chord(KeyCode::Char('n'), KeyModifiers::CONTROL), false),
            Some(UserAction::NewGame)
        );
        assert_eq!(
            map_key(chord(KeyCode::Char('c'), KeyModifiers::CONTROL), false),
            Some(UserAction::Exit)
        );
        // A bare N is a letter while playing and a restart once the round is over.
        assert_eq!(
            map_key(press(KeyCode::Char('n')), false),
            Some(UserAction::Key(KeyInput::Letter('N')))
        );
        assert_eq!(map_key(press(KeyCode::Char('n')), true), Some(UserAction::NewGame));
    }

    #[test]
    fn test_tile_colors() {
        assert_eq!(TileState::Scored(Feedback::Correct).colors().0, Color::Green);
        assert_eq!(TileState::Scored(Feedback::Present).colors().0, Color::Yellow);
        assert_eq!(TileState::Scored(Feedback::Absent).colors().0, Color::Gray);
        assert_eq!(key_colors(None).0, Color::Reset);
    }

    #[test]
    fn test_render_board_and_keyboard() {
        let bank = WordBank::new(load_wordbank_from_str("crane\nslate"));
        let mut round = Round::new("CRANE", 6);
        for c in "slate".chars() {
            round.append_letter(c);
        }
        round.submit_attempt(&bank).unwrap();
        round.append_letter('c');

        let text = screen_text(Some(&round), "hello there");
        assert!(text.contains("WORDLE"));
        assert!(text.contains("Attempts 1/6"));
        assert!(text.contains(" S "));
        assert!(text.contains(ENTER_LABEL));
        assert!(text.contains(DELETE_LABEL));
        assert!(text.contains("hello there"));
    }

    #[test]
    fn test_win_message_uses_success_style() {
        let bank = WordBank::new(load_wordbank_from_str("crane\nslate"));
        let mut round = Round::new("CRANE", 6);
        assert_eq!(TuiInterface::message_style(Some(&round)), MESSAGE_STYLE);

        for c in "crane".chars() {
            round.append_letter(c);
        }
        round.submit_attempt(&bank).unwrap();
        assert_eq!(TuiInterface::message_style(Some(&round)), SUCCESS_STYLE);
        assert_eq!(TuiInterface::message_style(None), MESSAGE_STYLE);
    }

    #[test]
    fn test_render_without_round() {
        let text = screen_text(None, "");
        assert!(text.contains("WORDLE"));
        assert!(text.contains("Ready"));
    }
}
