//! Source code pane rendering with syntax highlighting
//!
//! This module renders the source code pane, which displays the parsed
//! script with syntax highlighting and parse indicators.
//!
//! # Features
//!
//! - Highlighting driven by one [`Lexer`] pass over the whole source, so
//!   colours always agree with the token pane
//! - Error line shown in the error colour
//! - Line of the selected token highlighted
//! - Line numbering
//!
//! [`Lexer`]: crate::parser::lexer::Lexer

use crate::parser::lexer::{Lexer, LexerOptions, TokenKind};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Highlight the whole source in one lexer pass, one [`Line`] per source line.
///
/// Tokens that span a line break (a `#...#` string over two lines) are split
/// at the break and keep their style on both sides.
fn highlight_source(source: &str, options: LexerOptions) -> Vec<Line<'static>> {
    let mut lines = vec![Line::default()];

    for token in Lexer::with_options(source, options).tokenize() {
        match token.kind {
            TokenKind::Eof => continue,
            TokenKind::Newline => {
                lines.push(Line::default());
                continue;
            }
            _ => {}
        }

        let style = DEFAULT_THEME.token_style(token.kind);
        for (idx, piece) in token.text.split('\n').enumerate() {
            if idx > 0 {
                lines.push(Line::default());
            }
            let piece = piece.trim_end_matches('\r');
            if piece.is_empty() {
                continue;
            }
            if let Some(line) = lines.last_mut() {
                line.spans
                    .push(Span::styled(piece.replace('\t', "    "), style));
            }
        }
    }

    lines
}

/// Keep `line` (1-based) inside the visible window.
fn scroll_into_view(scroll: &mut usize, line: usize, visible_height: usize) {
    let idx = line.saturating_sub(1);
    if idx < *scroll {
        *scroll = idx;
    } else if idx >= *scroll + visible_height {
        *scroll = idx + 1 - visible_height;
    }
}

/// Render the source code pane
#[allow(clippy::too_many_arguments)]
pub fn render_source_pane(
    frame: &mut Frame,
    area: Rect,
    source_code: &str,
    options: LexerOptions,
    error_line: Option<usize>,
    selected_line: Option<usize>,
    follow_selection: bool,
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let block = Block::default()
        .title(" Source Code ")
        .borders(Borders::ALL)
        .border_style(DEFAULT_THEME.border_style(is_focused));

    let total_lines = source_code.lines().count();
    let mut lines = highlight_source(source_code, options);
    lines.truncate(total_lines);

    let visible_height = area.height.saturating_sub(2).max(1) as usize; // Account for borders (2), min 1

    if follow_selection {
        if let Some(line) = selected_line {
            scroll_into_view(scroll_offset, line, visible_height);
        }
    }

    // Clamp scroll offset to valid range
    let max_scroll = total_lines.saturating_sub(visible_height);
    *scroll_offset = (*scroll_offset).min(max_scroll);

    let visible_lines: Vec<Line> = lines
        .into_iter()
        .enumerate()
        .skip(*scroll_offset)
        .take(visible_height)
        .map(|(idx, mut content_line)| {
            let line_num = idx + 1;
            let is_error = error_line == Some(line_num);
            let is_selected = selected_line == Some(line_num);
            let line_num_str = format!("{:4} ", line_num);

            let num_style = if is_error {
                // ERROR LINE: white on red, overriding the highlighting
                let error_style = Style::default()
                    .bg(DEFAULT_THEME.error)
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD);
                for span in &mut content_line.spans {
                    span.style = error_style;
                }
                Style::default()
                    .fg(DEFAULT_THEME.error)
                    .add_modifier(Modifier::BOLD)
            } else if is_selected {
                let selected_style = Style::default().bg(DEFAULT_THEME.current_line_bg);
                for span in &mut content_line.spans {
                    span.style = span.style.patch(selected_style);
                }
                Style::default()
                    .fg(DEFAULT_THEME.secondary)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(DEFAULT_THEME.comment) // Line numbers
            };

            let mut final_spans = vec![Span::styled(line_num_str, num_style)];
            final_spans.extend(content_line.spans);

            Line::from(final_spans)
        })
        .collect();

    let paragraph = Paragraph::new(visible_lines).block(block);
    frame.render_widget(paragraph, area);
}
