use crate::parser::lexer::TokenKind;
use ratatui::style::{Color, Modifier, Style};

pub struct Theme {
    pub fg: Color,
    pub primary: Color,   // Blue
    pub secondary: Color, // Orange
    pub comment: Color,   // Grey
    pub success: Color,   // Green
    pub error: Color,     // Red
    pub keyword: Color,
    pub string: Color,
    pub number: Color,
    pub border_focused: Color,
    pub border_normal: Color,
    pub current_line_bg: Color,
    pub operator: Color, // Cyan for operators
}

pub const DEFAULT_THEME: Theme = Theme {
    fg: Color::Rgb(205, 214, 244),
    primary: Color::Rgb(137, 180, 250),   // Blue
    secondary: Color::Rgb(250, 179, 135), // Orange
    comment: Color::Rgb(108, 112, 134),
    success: Color::Rgb(166, 227, 161),
    error: Color::Rgb(243, 139, 168),
    keyword: Color::Rgb(137, 180, 250),        // Blue for keywords
    string: Color::Rgb(166, 227, 161),         // Green for strings
    number: Color::Rgb(250, 179, 135),         // Orange for numbers
    border_focused: Color::Rgb(249, 226, 175), // Yellow border for focus
    border_normal: Color::Rgb(108, 112, 134),  // Grey border for normal
    current_line_bg: Color::Rgb(50, 50, 70),   // Slightly lighter BG for current line
    operator: Color::Rgb(148, 226, 213),
};

impl Theme {
    /// Foreground style for a token of the given kind
    pub fn token_style(&self, kind: TokenKind) -> Style {
        match kind {
            k if k.is_keyword() => Style::default()
                .fg(self.keyword)
                .add_modifier(Modifier::BOLD),
            TokenKind::Integer | TokenKind::Float | TokenKind::Boolean => {
                Style::default().fg(self.number)
            }
            TokenKind::String => Style::default().fg(self.string),
            TokenKind::Comment => Style::default().fg(self.comment),
            TokenKind::Unknown => Style::default().fg(self.error),
            TokenKind::ParenOpen
            | TokenKind::ParenClose
            | TokenKind::BraceOpen
            | TokenKind::BraceClose => Style::default().fg(self.primary),
            TokenKind::Identifier => Style::default().fg(self.fg),
            k if k.is_whitespace() || k == TokenKind::Eof => Style::default(),
            _ => Style::default().fg(self.operator),
        }
    }

    pub fn border_style(&self, is_focused: bool) -> Style {
        if is_focused {
            Style::default()
                .fg(self.border_focused)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(self.border_normal)
        }
    }
}
