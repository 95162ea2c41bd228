//! Token trace pane rendering
//!
//! One row per token the lexer produced, whitespace included, in the same
//! column layout as the text report. Tokens that ended up in the syntax tree
//! are drawn bold, the token the parser stopped at is drawn in the error
//! colour.

use crate::parser::ast::SourceLocation;
use crate::parser::lexer::Token;
use crate::report::format_value;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Padding, Paragraph},
    Frame,
};
use rustc_hash::FxHashSet;

/// Render the token pane
#[allow(clippy::too_many_arguments)]
pub fn render_tokens_pane(
    frame: &mut Frame,
    area: Rect,
    tokens: &[Token],
    selected: usize,
    in_tree: &FxHashSet<SourceLocation>,
    error_location: Option<SourceLocation>,
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let block = Block::default()
        .title(format!(" Tokens ({}) ", tokens.len()))
        .borders(Borders::ALL)
        .border_style(DEFAULT_THEME.border_style(is_focused));

    if tokens.is_empty() {
        let paragraph = Paragraph::new("(no tokens)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    }

    let block = block.padding(Padding::new(1, 0, 0, 0));
    let visible_height = area.height.saturating_sub(2).max(1) as usize;

    // Keep the selection visible
    if selected < *scroll_offset {
        *scroll_offset = selected;
    } else if selected >= *scroll_offset + visible_height {
        *scroll_offset = selected + 1 - visible_height;
    }
    *scroll_offset = (*scroll_offset).min(tokens.len().saturating_sub(visible_height));

    let items: Vec<ListItem> = tokens
        .iter()
        .enumerate()
        .skip(*scroll_offset)
        .take(visible_height)
        .map(|(idx, token)| {
            let is_selected = idx == selected;
            let is_error =
                error_location == Some(token.location) && !token.kind.is_whitespace();

            let mut value_style = if is_error {
                Style::default().fg(DEFAULT_THEME.error)
            } else {
                DEFAULT_THEME.token_style(token.kind)
            };
            if in_tree.contains(&token.location) && !token.kind.is_whitespace() {
                value_style = value_style.add_modifier(Modifier::BOLD);
            }

            let marker = if is_selected { "▶ " } else { "  " };
            let mut line = Line::from(vec![
                Span::styled(marker, Style::default().fg(DEFAULT_THEME.secondary)),
                Span::styled(
                    format!("{:<14}", token.kind.name()),
                    Style::default().fg(DEFAULT_THEME.comment),
                ),
                Span::styled(
                    format!("{:<8}", token.location.to_string()),
                    Style::default().fg(DEFAULT_THEME.comment),
                ),
                Span::styled(format_value(&token.text), value_style),
            ]);

            if is_selected {
                line = line.style(Style::default().bg(DEFAULT_THEME.current_line_bg));
            }
            ListItem::new(line)
        })
        .collect();

    let list = List::new(items).block(block);
    frame.render_widget(list, area);
}
