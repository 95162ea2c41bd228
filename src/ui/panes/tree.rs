//! Syntax tree pane rendering

use crate::parser::parse::ParseError;
use crate::report::text::TreeLine;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Padding, Paragraph, Wrap},
    Frame,
};

/// Split a tree row into its connector prefix and its label.
fn split_connector(text: &str) -> (&str, &str) {
    match text.find(|c: char| !matches!(c, ' ' | '└' | '├' | '─')) {
        Some(idx) => text.split_at(idx),
        None => (text, ""),
    }
}

fn tree_item(line: &TreeLine) -> ListItem<'_> {
    let (prefix, label) = split_connector(&line.text);
    let label_style = if line.heading {
        Style::default()
            .fg(DEFAULT_THEME.secondary)
            .add_modifier(Modifier::ITALIC)
    } else if line.leaf {
        Style::default().fg(DEFAULT_THEME.fg)
    } else {
        Style::default()
            .fg(DEFAULT_THEME.keyword)
            .add_modifier(Modifier::BOLD)
    };

    ListItem::new(Line::from(vec![
        Span::styled(prefix, Style::default().fg(DEFAULT_THEME.comment)),
        Span::styled(label, label_style),
    ]))
}

/// Render the syntax tree pane, or the parse error when there is no tree
pub fn render_tree_pane(
    frame: &mut Frame,
    area: Rect,
    lines: &[TreeLine],
    error: Option<&ParseError>,
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let block = Block::default()
        .title(" Syntax Tree ")
        .borders(Borders::ALL)
        .border_style(DEFAULT_THEME.border_style(is_focused));

    if let Some(error) = error {
        let text = vec![
            Line::from(Span::styled(
                format!("Parse error at {}", error.location),
                Style::default()
                    .fg(DEFAULT_THEME.error)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(
                error.message(),
                Style::default().fg(DEFAULT_THEME.fg),
            )),
        ];
        let paragraph = Paragraph::new(text)
            .block(block.padding(Padding::new(1, 1, 0, 0)))
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
        return;
    }

    let block = block.padding(Padding::new(1, 0, 0, 0));
    let visible_height = area.height.saturating_sub(2).max(1) as usize;

    // Clamp scroll offset only if content exceeds visible area
    if lines.len() > visible_height {
        *scroll_offset = (*scroll_offset).min(lines.len() - visible_height);
    } else {
        *scroll_offset = 0;
    }

    let items: Vec<ListItem> = lines
        .iter()
        .skip(*scroll_offset)
        .take(visible_height)
        .map(tree_item)
        .collect();

    let list = List::new(items).block(block);
    frame.render_widget(list, area);
}
