//! Main parser coordinator
//!
//! This module provides the [`Parser`] struct and core parsing infrastructure,
//! including error types, helper methods, and the main parse entry point.
//!
//! # Parser Architecture
//!
//! The Parser uses a recursive descent approach with the following organization:
//! - This module: Parser struct, token window, statement separation, and the program loop
//! - `statements`: statements, conditionals, comparisons, blocks, and `print`
//! - `expressions`: assignment, sums, terms, and factors
//!
//! # Implementation
//!
//! Parser methods are split across multiple files using `impl Parser` blocks,
//! allowing each module to extend the Parser with related functionality while
//! maintaining access to the shared parser state.
//!
//! Tokens are pulled from the [`Lexer`] on demand. The parser only ever sees
//! non-whitespace tokens; whether a line break sat between two of them is
//! carried alongside in `line_break_before`.

use crate::parser::ast::*;
use crate::parser::lexer::{Lexer, LexerOptions, Token, TokenKind};
use thiserror::Error;
use tracing::{debug, trace};

/// What went wrong during a parse
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    #[error("Expected new line before {found}")]
    MissingSeparator { found: String },

    #[error("'if' statement cannot start a program and must start on a new line")]
    MisplacedIf,

    #[error("Expected opening parenthesis, found {found}")]
    ExpectedOpenParen { found: String },

    #[error("Expected closing parenthesis, found {found}")]
    ExpectedCloseParen { found: String },

    #[error("Expected opening braces for block, found {found}")]
    ExpectedOpenBrace { found: String },

    #[error("Expected closing braces at end of block, found {found}")]
    ExpectedCloseBrace { found: String },

    #[error("Unexpected 'else' keyword. 'else' must be preceded by 'if'")]
    UnexpectedElse,

    #[error("Unexpected closing parenthesis ')'. Did you forget an opening parenthesis or is this an empty parenthesis?")]
    UnexpectedCloseParen,

    #[error("Unexpected end of file. Expression is incomplete")]
    UnexpectedEof,

    #[error("Assignment is not allowed within print statement")]
    UnexpectedAssign,

    #[error("Unterminated string literal {text}")]
    UnterminatedString { text: String },

    #[error("Unrecognized character {text:?}")]
    UnknownCharacter { text: String },

    #[error("Unexpected token '{text}' in factor. Expected a value, variable, or '('")]
    UnexpectedToken { text: String },

    #[error("Program contains no statements")]
    EmptyProgram,

    #[error("Nesting is deeper than {limit} levels")]
    NestingTooDeep { limit: usize },
}

/// Deepest allowed stack of parenthesized groups and blocks
pub const MAX_NESTING_DEPTH: usize = 100;

/// Parser error type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Parse error at line {}, column {}: {kind}", .location.line, .location.column)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub location: SourceLocation,
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, location: SourceLocation) -> Self {
        Self { kind, location }
    }

    /// Human-readable cause without the location prefix
    pub fn message(&self) -> String {
        self.kind.to_string()
    }
}

/// Everything a parse produced: the full token trace and the tree or the error.
#[derive(Debug, Clone)]
pub struct ParseOutcome {
    /// Every token the lexer produced, whitespace included, in order.
    pub tokens: Vec<Token>,
    pub result: Result<Program, ParseError>,
}

impl ParseOutcome {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }

    pub fn program(&self) -> Option<&Program> {
        self.result.as_ref().ok()
    }

    pub fn error(&self) -> Option<&ParseError> {
        self.result.as_ref().err()
    }
}

/// Parse `source` with a fresh parser and collect its token trace.
pub fn parse(source: &str, options: LexerOptions) -> ParseOutcome {
    let mut parser = Parser::with_options(source, options);
    let result = parser.parse_program();
    ParseOutcome {
        tokens: parser.take_tokens(),
        result,
    }
}

/// Recursive descent parser for curiousx
pub struct Parser {
    lexer: Lexer,
    pub(crate) current: Token,
    pub(crate) previous: Token,
    pub(crate) line_break_before: bool,
    depth: usize,
}

impl Parser {
    pub fn new(source: &str) -> Self {
        Self::with_options(source, LexerOptions::default())
    }

    pub fn with_options(source: &str, options: LexerOptions) -> Self {
        let mut lexer = Lexer::with_options(source, options).record_trace();
        let current = lexer.next_non_whitespace_token();
        let line_break_before = lexer.crossed_newline();
        Self {
            lexer,
            current,
            previous: Token::program_start(),
            line_break_before,
            depth: 0,
        }
    }

    /// Tokens produced so far, handed over to the caller.
    pub fn take_tokens(&mut self) -> Vec<Token> {
        self.lexer.take_trace()
    }

    /// Parse the entire program
    pub fn parse_program(&mut self) -> Result<Program, ParseError> {
        let result = self.parse_statements();
        match &result {
            Ok(program) => debug!(statements = program.len(), "parsed program"),
            Err(error) => debug!(%error, "parse failed"),
        }
        result
    }

    fn parse_statements(&mut self) -> Result<Program, ParseError> {
        let mut program = Program::program();

        self.skip_comments();
        while !self.check(TokenKind::Eof) {
            let statement = self.parse_statement()?;
            debug!(kind = statement.kind().name(), location = %statement.location(), "parsed statement");
            program.children.push(statement);

            if !self.at_statement_separator() {
                return Err(self.error(ParseErrorKind::MissingSeparator {
                    found: self.current.to_string(),
                }));
            }
            self.skip_comments();
        }

        if program.is_empty() {
            return Err(self.error(ParseErrorKind::EmptyProgram));
        }
        Ok(program)
    }

    /// A statement must be followed by a line break, a comment or the end of input.
    fn at_statement_separator(&self) -> bool {
        matches!(
            self.current.kind,
            TokenKind::Newline | TokenKind::Eof | TokenKind::Comment
        ) || self.line_break_before
    }

    /// True at the very start of the program or right after a line break
    pub(crate) fn at_line_start(&self) -> bool {
        self.line_break_before || self.previous.is(TokenKind::Program)
    }

    // ===== Helper methods =====

    /// Move the window one non-whitespace token forward, returning the token left behind.
    pub(crate) fn advance(&mut self) -> Token {
        let next = self.lexer.next_non_whitespace_token();
        self.line_break_before = self.lexer.crossed_newline();
        trace!(kind = %next.kind, location = %next.location, "next token");
        let consumed = std::mem::replace(&mut self.current, next);
        self.previous = consumed.clone();
        consumed
    }

    pub(crate) fn check(&self, kind: TokenKind) -> bool {
        self.current.is(kind)
    }

    pub(crate) fn skip_comments(&mut self) {
        while self.check(TokenKind::Comment) {
            self.advance();
        }
    }

    /// Consume a token of `kind` or fail with the error built from what was found.
    pub(crate) fn expect(
        &mut self,
        kind: TokenKind,
        error: impl FnOnce(String) -> ParseErrorKind,
    ) -> Result<Token, ParseError> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(self.error(error(self.current.to_string())))
        }
    }

    /// Enter a `(` group or a block, failing at the current token once too deep.
    pub(crate) fn enter_nested(&mut self) -> Result<(), ParseError> {
        if self.depth >= MAX_NESTING_DEPTH {
            return Err(self.error(ParseErrorKind::NestingTooDeep {
                limit: MAX_NESTING_DEPTH,
            }));
        }
        self.depth += 1;
        Ok(())
    }

    pub(crate) fn exit_nested(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    /// Error located at the current token
    pub(crate) fn error(&self, kind: ParseErrorKind) -> ParseError {
        ParseError::new(kind, self.current.location)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_statements_on_separate_lines() {
        let mut parser = Parser::new("x = 1\ny = 2\n\nprint x + y\n");
        let program = parser.parse_program().unwrap();

        assert_eq!(program.role, BlockRole::Program);
        assert_eq!(program.len(), 3);
        assert!(program.children[2].is_print());
    }

    #[test]
    fn test_statements_need_a_line_break() {
        let mut parser = Parser::new("x = 1 y = 2");
        let err = parser.parse_program().unwrap_err();

        assert_eq!(
            err.kind,
            ParseErrorKind::MissingSeparator {
                found: "identifier 'y'".to_string()
            }
        );
        assert_eq!(err.location, SourceLocation::new(1, 7));
    }

    #[test]
    fn test_empty_program_is_an_error() {
        for source in ["", "\n\n  \t\n"] {
            let err = Parser::new(source).parse_program().unwrap_err();
            assert_eq!(err.kind, ParseErrorKind::EmptyProgram);
        }
    }

    #[test]
    fn test_comments_separate_statements() {
        let options = LexerOptions {
            line_comments: true,
        };
        let source = "// leading\nx = 1 // trailing\n// alone\nprint x";
        let program = Parser::with_options(source, options)
            .parse_program()
            .unwrap();

        assert_eq!(program.len(), 2);
    }

    #[test]
    fn test_error_display_has_location() {
        let err = Parser::new("print )").parse_program().unwrap_err();
        let text = err.to_string();

        assert!(text.starts_with("Parse error at line 1, column 7: "));
        assert!(text.ends_with(&err.message()));
    }

    #[test]
    fn test_error_messages() {
        let cases = [
            (
                "if (1) { if (2) { print 2 } }",
                "'if' statement cannot start a program and must start on a new line",
            ),
            ("= 3", "Assignment is not allowed within print statement"),
            ("x = 1 +", "Unexpected end of file. Expression is incomplete"),
            (
                "if (1) print 1",
                "Expected opening braces for block, found 'print'",
            ),
            (
                "if (1) {",
                "Expected closing braces at end of block, found end of file",
            ),
            (
                "x = 1 y = 2",
                "Expected new line before identifier 'y'",
            ),
        ];

        for (source, message) in cases {
            let err = Parser::new(source).parse_program().unwrap_err();
            assert_eq!(err.message(), message, "{:?}", source);
        }
    }

    #[test]
    fn test_outcome_keeps_whitespace_tokens() {
        let outcome = parse("x = 1\n", LexerOptions::default());
        let kinds: Vec<TokenKind> = outcome.tokens.iter().map(|t| t.kind).collect();

        assert!(outcome.is_success());
        assert_eq!(
            kinds,
            vec![
                TokenKind::Identifier,
                TokenKind::Space,
                TokenKind::Assign,
                TokenKind::Space,
                TokenKind::Integer,
                TokenKind::Newline,
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn test_outcome_stops_at_first_error() {
        let outcome = parse("print ) 1 2 3", LexerOptions::default());

        assert!(outcome.program().is_none());
        assert_eq!(
            outcome.error().map(|e| e.kind.clone()),
            Some(ParseErrorKind::UnexpectedCloseParen)
        );
        assert_eq!(outcome.tokens.last().map(|t| t.kind), Some(TokenKind::ParenClose));
    }
}
