//! Lexer (tokenizer) for curiousx source code
//!
//! Scans the source one character at a time and hands out classified
//! [`Token`]s on demand. Whitespace is tokenized too (`Space`, `Tab`,
//! `Newline`) so that diagnostics can show the complete stream; the parser
//! pulls through [`Lexer::next_non_whitespace_token`] instead and learns about
//! line breaks from [`Lexer::crossed_newline`].

use super::ast::SourceLocation;
use serde::Serialize;
use std::fmt;

/// All token kinds produced by the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TokenKind {
    Eof,
    Newline,
    Space,
    Tab,

    // Punctuation
    ParenOpen,  // (
    ParenClose, // )
    BraceOpen,  // {
    BraceClose, // }
    Semicolon,  // ;

    // Arithmetic
    Plus,     // +
    Minus,    // -
    Multiply, // *
    Divide,   // /

    // Comparison
    LessThan,     // <
    GreaterThan,  // >
    LessEqual,    // <=
    GreaterEqual, // >=
    Equal,        // ==
    NotEqual,     // !=

    Assign, // =
    Not,    // !

    // Literals
    String,
    Integer,
    Float,
    Boolean,

    Identifier,

    // Keywords
    Print,
    If,
    Else,
    Let,

    /// `// ...` up to the end of the line, when enabled
    Comment,
    /// Unrecognised character or unterminated string
    Unknown,
    /// Synthetic marker for the start of a program
    Program,
}

impl TokenKind {
    pub fn name(self) -> &'static str {
        match self {
            TokenKind::Eof => "Eof",
            TokenKind::Newline => "Newline",
            TokenKind::Space => "Space",
            TokenKind::Tab => "Tab",
            TokenKind::ParenOpen => "ParenOpen",
            TokenKind::ParenClose => "ParenClose",
            TokenKind::BraceOpen => "BraceOpen",
            TokenKind::BraceClose => "BraceClose",
            TokenKind::Semicolon => "Semicolon",
            TokenKind::Plus => "Plus",
            TokenKind::Minus => "Minus",
            TokenKind::Multiply => "Multiply",
            TokenKind::Divide => "Divide",
            TokenKind::LessThan => "LessThan",
            TokenKind::GreaterThan => "GreaterThan",
            TokenKind::LessEqual => "LessEqual",
            TokenKind::GreaterEqual => "GreaterEqual",
            TokenKind::Equal => "Equal",
            TokenKind::NotEqual => "NotEqual",
            TokenKind::Assign => "Assign",
            TokenKind::Not => "Not",
            TokenKind::String => "String",
            TokenKind::Integer => "Integer",
            TokenKind::Float => "Float",
            TokenKind::Boolean => "Boolean",
            TokenKind::Identifier => "Identifier",
            TokenKind::Print => "Print",
            TokenKind::If => "If",
            TokenKind::Else => "Else",
            TokenKind::Let => "Let",
            TokenKind::Comment => "Comment",
            TokenKind::Unknown => "Unknown",
            TokenKind::Program => "Program",
        }
    }

    /// Space, tab or newline
    pub fn is_whitespace(self) -> bool {
        matches!(self, TokenKind::Space | TokenKind::Tab | TokenKind::Newline)
    }

    /// Tokens that become a leaf node on their own
    pub fn is_value(self) -> bool {
        matches!(
            self,
            TokenKind::Identifier
                | TokenKind::Integer
                | TokenKind::Float
                | TokenKind::String
                | TokenKind::Boolean
        )
    }

    pub fn is_relational(self) -> bool {
        matches!(
            self,
            TokenKind::LessThan
                | TokenKind::GreaterThan
                | TokenKind::LessEqual
                | TokenKind::GreaterEqual
                | TokenKind::Equal
                | TokenKind::NotEqual
        )
    }

    pub fn is_keyword(self) -> bool {
        matches!(
            self,
            TokenKind::Print | TokenKind::If | TokenKind::Else | TokenKind::Let
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A classified lexical unit with its raw text and position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    pub text: String,
    pub location: SourceLocation,
    pub kind: TokenKind,
}

impl Token {
    pub fn new(text: impl Into<String>, location: SourceLocation, kind: TokenKind) -> Self {
        Self {
            text: text.into(),
            location,
            kind,
        }
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Eof => write!(f, "end of file"),
            TokenKind::Newline => write!(f, "new line"),
            TokenKind::Integer => write!(f, "integer literal {}", self.text),
            TokenKind::Float => write!(f, "float literal {}", self.text),
            TokenKind::Boolean => write!(f, "boolean literal {}", self.text),
            TokenKind::String => write!(f, "string literal {}", self.text),
            TokenKind::Identifier => write!(f, "identifier '{}'", self.text),
            TokenKind::Comment => write!(f, "comment"),
            TokenKind::Program => write!(f, "start of program"),
            _ => write!(f, "'{}'", self.text),
        }
    }
}

/// Lexer settings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LexerOptions {
    /// Treat `//` as the start of a comment running to the end of the line.
    pub line_comments: bool,
}

/// Saved cursor for a single character of lookahead
#[derive(Debug, Clone, Copy, Default)]
struct Checkpoint {
    position: usize,
    line: usize,
    column: usize,
}

/// Lexer for curiousx source code
pub struct Lexer {
    input: Vec<char>,
    position: usize,
    line: usize,
    column: usize,
    checkpoint: Checkpoint,
    options: LexerOptions,
    crossed_newline: bool,
    trace: Option<Vec<Token>>,
}

impl Lexer {
    /// Create a new lexer for the given source string.
    pub fn new(input: &str) -> Self {
        Self::with_options(input, LexerOptions::default())
    }

    pub fn with_options(input: &str, options: LexerOptions) -> Self {
        Self {
            input: input.chars().collect(),
            position: 0,
            line: 1,
            column: 1,
            checkpoint: Checkpoint::default(),
            options,
            crossed_newline: false,
            trace: None,
        }
    }

    /// Keep a copy of every token produced from now on, whitespace included.
    pub fn record_trace(mut self) -> Self {
        self.trace = Some(Vec::new());
        self
    }

    /// Hand out the recorded tokens, leaving the trace empty.
    pub fn take_trace(&mut self) -> Vec<Token> {
        self.trace.as_mut().map(std::mem::take).unwrap_or_default()
    }

    /// Tokenize the entire input, whitespace included, up to and including `Eof`.
    pub fn tokenize(&mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token();
            let done = token.is(TokenKind::Eof);
            tokens.push(token);
            if done {
                return tokens;
            }
        }
    }

    /// Scan exactly one token. Keeps returning `Eof` once the input is exhausted.
    pub fn next_token(&mut self) -> Token {
        let token = self.scan_token();
        if let Some(trace) = self.trace.as_mut() {
            trace.push(token.clone());
        }
        token
    }

    /// Next token that is not a space, tab or newline.
    pub fn next_non_whitespace_token(&mut self) -> Token {
        self.crossed_newline = false;
        loop {
            let token = self.next_token();
            match token.kind {
                TokenKind::Newline => self.crossed_newline = true,
                TokenKind::Space | TokenKind::Tab => {}
                _ => return token,
            }
        }
    }

    /// Whether the last [`Lexer::next_non_whitespace_token`] call skipped a newline.
    pub fn crossed_newline(&self) -> bool {
        self.crossed_newline
    }

    /// Location the next scan starts at
    pub fn current_location(&self) -> SourceLocation {
        SourceLocation::new(self.line, self.column)
    }

    fn scan_token(&mut self) -> Token {
        let loc = self.current_location();
        let start = self.position;
        let Some(ch) = self.advance() else {
            return Token::new("", loc, TokenKind::Eof);
        };

        let kind = match ch {
            '\n' => TokenKind::Newline,
            '\t' => TokenKind::Tab,
            ' ' => {
                while self.peek() == Some(' ') {
                    self.advance();
                }
                TokenKind::Space
            }
            '(' => TokenKind::ParenOpen,
            ')' => TokenKind::ParenClose,
            '{' => TokenKind::BraceOpen,
            '}' => TokenKind::BraceClose,
            '+' => TokenKind::Plus,
            '-' => TokenKind::Minus,
            '*' => TokenKind::Multiply,
            ';' => TokenKind::Semicolon,
            '/' => {
                if self.options.line_comments && self.follows('/') {
                    while self.peek().is_some_and(|c| c != '\n') {
                        self.advance();
                    }
                    TokenKind::Comment
                } else {
                    TokenKind::Divide
                }
            }
            '>' => self.with_equals(TokenKind::GreaterEqual, TokenKind::GreaterThan),
            '<' => self.with_equals(TokenKind::LessEqual, TokenKind::LessThan),
            '=' => self.with_equals(TokenKind::Equal, TokenKind::Assign),
            '!' => self.with_equals(TokenKind::NotEqual, TokenKind::Not),
            '#' => self.string_literal(),
            c if is_word_char(c) => {
                while self.peek().is_some_and(is_word_char) {
                    self.advance();
                }
                classify_word(&self.slice(start))
            }
            _ => TokenKind::Unknown,
        };

        Token::new(self.slice(start), loc, kind)
    }

    /// Two-character operator if the next character is `=`, otherwise the
    /// single-character one with the lookahead undone.
    fn with_equals(&mut self, pair: TokenKind, single: TokenKind) -> TokenKind {
        if self.follows('=') {
            pair
        } else {
            single
        }
    }

    /// Consume the next character if it is `expected`, restoring the cursor otherwise.
    fn follows(&mut self, expected: char) -> bool {
        self.save_checkpoint();
        if self.advance() == Some(expected) {
            return true;
        }
        self.restore_checkpoint();
        false
    }

    /// `#...#` with no escapes. Stops at the end of input when unterminated.
    fn string_literal(&mut self) -> TokenKind {
        while let Some(ch) = self.advance() {
            if ch == '#' {
                return TokenKind::String;
            }
        }
        TokenKind::Unknown
    }

    fn save_checkpoint(&mut self) {
        self.checkpoint = Checkpoint {
            position: self.position,
            line: self.line,
            column: self.column,
        };
    }

    fn restore_checkpoint(&mut self) {
        self.position = self.checkpoint.position;
        self.line = self.checkpoint.line;
        self.column = self.checkpoint.column;
    }

    fn slice(&self, start: usize) -> String {
        self.input[start..self.position].iter().collect()
    }

    /// Peek at current character without consuming
    fn peek(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    /// Advance to next character
    fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.position += 1;

        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }

        Some(ch)
    }
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '.'
}

fn is_numeric(c: char) -> bool {
    c.is_ascii_digit() || c == '.'
}

fn classify_word(word: &str) -> TokenKind {
    if word.chars().all(is_numeric) {
        return if word.chars().all(|c| c.is_ascii_digit()) {
            TokenKind::Integer
        } else {
            TokenKind::Float
        };
    }

    match word {
        "print" | "Print" => TokenKind::Print,
        "if" => TokenKind::If,
        "else" => TokenKind::Else,
        "let" => TokenKind::Let,
        "true" | "false" => TokenKind::Boolean,
        _ => TokenKind::Identifier,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        Lexer::new(source)
            .tokenize()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    fn single(source: &str) -> Token {
        let tokens = Lexer::new(source).tokenize();
        assert_eq!(tokens.len(), 2, "expected one token in {:?}: {:?}", source, tokens);
        assert_eq!(tokens[1].kind, TokenKind::Eof);
        tokens[0].clone()
    }

    #[test]
    fn test_fixed_spelling_tokens() {
        let cases = [
            ("(", TokenKind::ParenOpen),
            (")", TokenKind::ParenClose),
            ("{", TokenKind::BraceOpen),
            ("}", TokenKind::BraceClose),
            ("+", TokenKind::Plus),
            ("-", TokenKind::Minus),
            ("*", TokenKind::Multiply),
            ("/", TokenKind::Divide),
            (";", TokenKind::Semicolon),
            ("<", TokenKind::LessThan),
            (">", TokenKind::GreaterThan),
            ("<=", TokenKind::LessEqual),
            (">=", TokenKind::GreaterEqual),
            ("==", TokenKind::Equal),
            ("!=", TokenKind::NotEqual),
            ("=", TokenKind::Assign),
            ("!", TokenKind::Not),
        ];

        for (source, kind) in cases {
            let token = single(source);
            assert_eq!(token.kind, kind, "kind of {:?}", source);
            assert_eq!(token.text, source);
            assert_eq!(token.location, SourceLocation::new(1, 1));
        }
    }

    #[test]
    fn test_lookahead_is_undone() {
        let tokens = Lexer::new("!x").tokenize();
        assert_eq!(tokens[0].kind, TokenKind::Not);
        assert_eq!(tokens[0].text, "!");
        assert_eq!(tokens[1].kind, TokenKind::Identifier);
        assert_eq!(tokens[1].text, "x");
        assert_eq!(tokens[1].location, SourceLocation::new(1, 2));
    }

    #[test]
    fn test_lookahead_does_not_swallow_newline() {
        let tokens = Lexer::new("<\nx").tokenize();
        assert_eq!(tokens[0].kind, TokenKind::LessThan);
        assert_eq!(tokens[1].kind, TokenKind::Newline);
        assert_eq!(tokens[2].location, SourceLocation::new(2, 1));
    }

    #[test]
    fn test_numbers() {
        assert_eq!(single("123").kind, TokenKind::Integer);
        assert_eq!(single("12.5").kind, TokenKind::Float);

        // Still only digits and dots, so still a float
        let token = single("12.5.6");
        assert_eq!(token.kind, TokenKind::Float);
        assert_eq!(token.text, "12.5.6");
    }

    #[test]
    fn test_keywords() {
        assert_eq!(single("print").kind, TokenKind::Print);
        assert_eq!(single("Print").kind, TokenKind::Print);
        assert_eq!(single("if").kind, TokenKind::If);
        assert_eq!(single("else").kind, TokenKind::Else);
        assert_eq!(single("let").kind, TokenKind::Let);
        assert_eq!(single("true").kind, TokenKind::Boolean);
        assert_eq!(single("false").kind, TokenKind::Boolean);

        assert_eq!(single("printer").kind, TokenKind::Identifier);
        assert_eq!(single("ifx").kind, TokenKind::Identifier);
        assert_eq!(single("IF").kind, TokenKind::Identifier);
        assert_eq!(single("a.b").kind, TokenKind::Identifier);
        assert_eq!(single("x1").kind, TokenKind::Identifier);
    }

    #[test]
    fn test_positions() {
        let tokens = Lexer::new("a\nbb").tokenize();
        assert_eq!(tokens[0].text, "a");
        assert_eq!(tokens[0].location, SourceLocation::new(1, 1));
        assert_eq!(tokens[1].kind, TokenKind::Newline);
        assert_eq!(tokens[2].text, "bb");
        assert_eq!(tokens[2].location, SourceLocation::new(2, 1));
        assert_eq!(tokens[3].location, SourceLocation::new(2, 3));
    }

    #[test]
    fn test_whitespace() {
        let tokens = Lexer::new("a   \tb").tokenize();
        assert_eq!(tokens[1].kind, TokenKind::Space);
        assert_eq!(tokens[1].text, "   ");
        assert_eq!(tokens[2].kind, TokenKind::Tab);
        assert_eq!(tokens[3].location, SourceLocation::new(1, 6));
    }

    #[test]
    fn test_string_literal() {
        let token = single("#hello world#");
        assert_eq!(token.kind, TokenKind::String);
        assert_eq!(token.text, "#hello world#");

        let tokens = Lexer::new("#a\nb# x").tokenize();
        assert_eq!(tokens[0].kind, TokenKind::String);
        assert_eq!(tokens[2].location, SourceLocation::new(2, 4));
    }

    #[test]
    fn test_unterminated_string_stops_at_end() {
        let tokens = Lexer::new("x = #abc").tokenize();
        let last = &tokens[tokens.len() - 2];
        assert_eq!(last.kind, TokenKind::Unknown);
        assert_eq!(last.text, "#abc");
        assert_eq!(tokens.last().map(|t| t.kind), Some(TokenKind::Eof));
    }

    #[test]
    fn test_unknown_characters() {
        assert_eq!(
            kinds("a_b@"),
            vec![
                TokenKind::Identifier,
                TokenKind::Unknown,
                TokenKind::Identifier,
                TokenKind::Unknown,
                TokenKind::Eof
            ]
        );
        assert_eq!(single("\r").kind, TokenKind::Unknown);
    }

    #[test]
    fn test_eof_is_idempotent() {
        let mut lexer = Lexer::new("x");
        assert_eq!(lexer.next_token().kind, TokenKind::Identifier);
        for _ in 0..3 {
            let token = lexer.next_token();
            assert_eq!(token.kind, TokenKind::Eof);
            assert!(token.text.is_empty());
            assert_eq!(token.location, SourceLocation::new(1, 2));
        }
    }

    #[test]
    fn test_non_whitespace_tracks_newlines() {
        let mut lexer = Lexer::new("a b\n  c");
        assert_eq!(lexer.next_non_whitespace_token().text, "a");
        assert!(!lexer.crossed_newline());
        assert_eq!(lexer.next_non_whitespace_token().text, "b");
        assert!(!lexer.crossed_newline());
        assert_eq!(lexer.next_non_whitespace_token().text, "c");
        assert!(lexer.crossed_newline());
        assert_eq!(lexer.next_non_whitespace_token().kind, TokenKind::Eof);
        assert!(!lexer.crossed_newline());
    }

    #[test]
    fn test_current_location() {
        let mut lexer = Lexer::new("ab\ncd");
        assert_eq!(lexer.current_location(), SourceLocation::new(1, 1));
        lexer.next_token();
        assert_eq!(lexer.current_location(), SourceLocation::new(1, 3));
        lexer.next_token();
        assert_eq!(lexer.current_location(), SourceLocation::new(2, 1));
    }

    #[test]
    fn test_trace_records_everything() {
        let mut lexer = Lexer::new("a \n b").record_trace();
        while !lexer.next_non_whitespace_token().is(TokenKind::Eof) {}
        let trace: Vec<TokenKind> = lexer.take_trace().into_iter().map(|t| t.kind).collect();
        assert_eq!(
            trace,
            vec![
                TokenKind::Identifier,
                TokenKind::Space,
                TokenKind::Newline,
                TokenKind::Space,
                TokenKind::Identifier,
                TokenKind::Eof
            ]
        );
        assert!(lexer.take_trace().is_empty());
    }

    #[test]
    fn test_line_comments() {
        assert_eq!(
            kinds("a // b"),
            vec![
                TokenKind::Identifier,
                TokenKind::Space,
                TokenKind::Divide,
                TokenKind::Divide,
                TokenKind::Space,
                TokenKind::Identifier,
                TokenKind::Eof
            ]
        );

        let options = LexerOptions {
            line_comments: true,
        };
        let tokens = Lexer::with_options("a // b\nc / d", options).tokenize();
        assert_eq!(tokens[2].kind, TokenKind::Comment);
        assert_eq!(tokens[2].text, "// b");
        assert_eq!(tokens[3].kind, TokenKind::Newline);
        assert_eq!(tokens[6].kind, TokenKind::Divide);
    }
}
