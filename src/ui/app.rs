//! Main TUI application state and logic

use crate::parser::ast::SourceLocation;
use crate::parser::lexer::LexerOptions;
use crate::parser::parse::ParseOutcome;
use crate::report::text::{tree_lines, TreeLine};
use crate::report::tree_locations;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use rustc_hash::FxHashSet;
use std::io;

/// Rows moved by PgUp/PgDn
const PAGE: usize = 10;

/// Which pane is currently focused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPane {
    Source,
    Tokens,
    Tree,
}

impl FocusedPane {
    /// Move focus to the next pane (clockwise: source -> tokens -> tree)
    pub fn next(self) -> Self {
        match self {
            FocusedPane::Source => FocusedPane::Tokens,
            FocusedPane::Tokens => FocusedPane::Tree,
            FocusedPane::Tree => FocusedPane::Source,
        }
    }

    /// Move focus to the previous pane (counter-clockwise)
    pub fn prev(self) -> Self {
        match self {
            FocusedPane::Source => FocusedPane::Tree,
            FocusedPane::Tokens => FocusedPane::Source,
            FocusedPane::Tree => FocusedPane::Tokens,
        }
    }
}

/// The main application state
pub struct App {
    /// The source code that was parsed
    pub source_code: String,

    /// Token trace and tree (or error) of the parse
    pub outcome: ParseOutcome,

    /// Options the source was lexed with, reused for highlighting
    pub options: LexerOptions,

    /// Currently focused pane
    pub focused_pane: FocusedPane,

    /// Per-pane scroll offsets
    pub source_scroll: usize,
    pub tokens_scroll: usize,
    pub tree_scroll: usize,

    /// Index into `outcome.tokens`
    pub selected_token: usize,

    /// Whether the source pane should scroll to the selected token's line
    pub follow_selection: bool,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Status message to display
    pub status_message: String,

    tree_lines: Vec<TreeLine>,
    tree_locations: FxHashSet<SourceLocation>,
}

impl App {
    /// Create a new app over a finished parse of `source_code`
    pub fn new(source_code: String, outcome: ParseOutcome, options: LexerOptions) -> Self {
        let (lines, locations) = match outcome.program() {
            Some(program) => (tree_lines(program), tree_locations(program)),
            None => (Vec::new(), FxHashSet::default()),
        };

        let status_message = match (outcome.program(), outcome.error()) {
            (Some(program), _) => format!("Parsed {} statement(s)", program.len()),
            (None, Some(error)) => error.to_string(),
            (None, None) => String::from("Ready!"),
        };

        App {
            source_code,
            outcome,
            options,
            focused_pane: FocusedPane::Tokens,
            source_scroll: 0,
            tokens_scroll: 0,
            tree_scroll: 0,
            selected_token: 0,
            follow_selection: true,
            should_quit: false,
            status_message,
            tree_lines: lines,
            tree_locations: locations,
        }
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    self.handle_key_event(key);
                }
            }
        }

        Ok(())
    }

    /// Render the UI
    pub fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();

        // Create layout: source on the left, tokens over tree on the right, status bar at bottom
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(size);

        let pane_area = main_chunks[0];
        let status_area = main_chunks[1];

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(pane_area);

        let right_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(columns[1]);

        let error = self.outcome.error();
        let selected_line = self
            .outcome
            .tokens
            .get(self.selected_token)
            .map(|token| token.location.line);

        super::panes::render_source_pane(
            frame,
            columns[0],
            &self.source_code,
            self.options,
            error.map(|e| e.location.line),
            selected_line,
            self.follow_selection,
            self.focused_pane == FocusedPane::Source,
            &mut self.source_scroll,
        );

        super::panes::render_tokens_pane(
            frame,
            right_rows[0],
            &self.outcome.tokens,
            self.selected_token,
            &self.tree_locations,
            error.map(|e| e.location),
            self.focused_pane == FocusedPane::Tokens,
            &mut self.tokens_scroll,
        );

        super::panes::render_tree_pane(
            frame,
            right_rows[1],
            &self.tree_lines,
            error,
            self.focused_pane == FocusedPane::Tree,
            &mut self.tree_scroll,
        );

        // Render status bar
        super::panes::render_status_bar(
            frame,
            status_area,
            &self.status_message,
            self.outcome.is_success(),
            self.selected_token,
            self.outcome.tokens.len(),
        );
    }

    /// Handle keyboard events
    pub fn handle_key_event(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Tab => {
                self.focused_pane = self.focused_pane.next();
            }
            KeyCode::BackTab => {
                self.focused_pane = self.focused_pane.prev();
            }
            KeyCode::Up => self.move_by(-1),
            KeyCode::Down => self.move_by(1),
            KeyCode::PageUp => self.move_by(-(PAGE as isize)),
            KeyCode::PageDown => self.move_by(PAGE as isize),
            KeyCode::Home => self.move_by(isize::MIN),
            KeyCode::End => self.move_by(isize::MAX),
            KeyCode::Char('e') | KeyCode::Char('E') => self.jump_to_error(),
            _ => {}
        }
    }

    /// Move the selection or scroll the focused pane. Offsets past the end are
    /// clamped here for the selection and during rendering for scrolling.
    fn move_by(&mut self, delta: isize) {
        match self.focused_pane {
            FocusedPane::Tokens => {
                let last = self.outcome.tokens.len().saturating_sub(1);
                self.selected_token = offset(self.selected_token, delta).min(last);
                self.follow_selection = true;
                if let Some(token) = self.outcome.tokens.get(self.selected_token) {
                    self.status_message = format!("{} at {}", token.kind, token.location);
                }
            }
            FocusedPane::Source => {
                self.source_scroll = offset(self.source_scroll, delta);
                self.follow_selection = false;
            }
            FocusedPane::Tree => {
                self.tree_scroll = offset(self.tree_scroll, delta);
            }
        }
    }

    /// Select the token the parser stopped at
    fn jump_to_error(&mut self) {
        let Some(error) = self.outcome.error() else {
            self.status_message = "No parse error".to_string();
            return;
        };

        match self
            .outcome
            .tokens
            .iter()
            .rposition(|token| token.location == error.location && !token.kind.is_whitespace())
        {
            Some(idx) => {
                self.selected_token = idx;
                self.follow_selection = true;
                self.focused_pane = FocusedPane::Tokens;
                self.status_message = error.message();
            }
            None => {
                self.status_message = format!("Error at {} has no token", error.location);
            }
        }
    }
}

fn offset(value: usize, delta: isize) -> usize {
    if delta < 0 {
        value.saturating_sub(delta.unsigned_abs())
    } else {
        value.saturating_add(delta.unsigned_abs())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse::parse;
    use crossterm::event::KeyModifiers;
    use ratatui::backend::TestBackend;

    fn app(source: &str) -> App {
        let options = LexerOptions::default();
        App::new(source.to_string(), parse(source, options), options)
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key_event(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn draw(app: &mut App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|f| app.render(f)).unwrap();
        let buffer = terminal.backend().buffer();
        let width = buffer.area.width as usize;
        buffer
            .content()
            .chunks(width)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_focus_cycles() {
        let mut app = app("x = 1");
        assert_eq!(app.focused_pane, FocusedPane::Tokens);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.focused_pane, FocusedPane::Tree);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.focused_pane, FocusedPane::Source);
        press(&mut app, KeyCode::BackTab);
        assert_eq!(app.focused_pane, FocusedPane::Tree);
    }

    #[test]
    fn test_selection_is_clamped() {
        // x, space, =, space, 1, eof
        let mut app = app("x = 1");
        press(&mut app, KeyCode::Up);
        assert_eq!(app.selected_token, 0);
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Down);
        assert_eq!(app.selected_token, 2);
        assert_eq!(app.status_message, "Assign at 1:3");
        press(&mut app, KeyCode::PageDown);
        assert_eq!(app.selected_token, 5);
        press(&mut app, KeyCode::Home);
        assert_eq!(app.selected_token, 0);
        press(&mut app, KeyCode::End);
        assert_eq!(app.selected_token, 5);
    }

    #[test]
    fn test_jump_to_error() {
        let mut app = app("x = 1\nprint 1 2");
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Char('e'));

        assert_eq!(app.focused_pane, FocusedPane::Tokens);
        let token = &app.outcome.tokens[app.selected_token];
        assert_eq!(token.text, "2");
        assert_eq!(token.location, SourceLocation::new(2, 9));
        assert!(app.status_message.starts_with("Expected new line"));
    }

    #[test]
    fn test_jump_without_error() {
        let mut app = app("print 1");
        press(&mut app, KeyCode::Char('e'));
        assert_eq!(app.selected_token, 0);
        assert_eq!(app.status_message, "No parse error");
    }

    #[test]
    fn test_quit() {
        let mut app = app("print 1");
        assert!(!app.should_quit);
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }

    #[test]
    fn test_render_success() {
        let mut app = app("x = 1 + 2\nprint x");
        let screen = draw(&mut app);

        assert!(screen.contains(" Source Code "));
        assert!(screen.contains(" Tokens (14) "));
        assert!(screen.contains(" Syntax Tree "));
        assert!(screen.contains("└─ program"));
        assert!(screen.contains("└─ print"));
        assert!(screen.contains("Identifier"));
        assert!(screen.contains(" OK "));
        assert!(screen.contains("Parsed 2 statement(s)"));
    }

    #[test]
    fn test_render_failure() {
        let mut app = app("x = (1 + 2");
        let screen = draw(&mut app);

        assert!(screen.contains(" ERROR "));
        assert!(screen.contains("Parse error at 1:11"));
        assert!(!screen.contains("└─ program"));
    }

    #[test]
    fn test_source_scroll_is_clamped() {
        let mut app = app("print 1");
        app.focused_pane = FocusedPane::Source;
        press(&mut app, KeyCode::PageDown);
        assert!(!app.follow_selection);
        draw(&mut app);
        assert_eq!(app.source_scroll, 0);
    }
}
