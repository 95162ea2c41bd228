//! Expression parsing implementation
//!
//! # Precedence
//!
//! From loosest to tightest:
//!
//! ```text
//! expression ::= sum ('=' expression)?          right-associative assignment
//! sum        ::= term (('+' | '-') term)*
//! term       ::= factor (('*' | '/') factor)*
//! factor     ::= identifier | integer | float | string | boolean
//!              | '(' expression ')'
//! ```
//!
//! Every binary operator becomes a [`BinaryNode`] carrying the operator token;
//! every factor token becomes a leaf.
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::ast::*;
use crate::parser::lexer::TokenKind;
use crate::parser::parse::{ParseError, ParseErrorKind, Parser};

impl Parser {
    /// Parse expression (top-level entry point)
    pub(crate) fn parse_expression(&mut self) -> Result<Node, ParseError> {
        self.parse_assignment()
    }

    /// Parse assignment (right-associative)
    ///
    /// Chains like `a = b = c` are collected first and folded from the right,
    /// so their length does not grow the call stack.
    fn parse_assignment(&mut self) -> Result<Node, ParseError> {
        let mut pending = Vec::new();
        let mut value = self.parse_sum()?;

        while self.check(TokenKind::Assign) {
            let op = self.advance();
            pending.push((value, op));
            value = self.parse_sum()?;
        }

        while let Some((target, op)) = pending.pop() {
            value = BinaryNode::new(op, target, value).into();
        }

        Ok(value)
    }

    /// Parse additive (+ -)
    fn parse_sum(&mut self) -> Result<Node, ParseError> {
        let mut left = self.parse_term()?;

        while matches!(self.current.kind, TokenKind::Plus | TokenKind::Minus) {
            let op = self.advance();
            let right = self.parse_term()?;
            left = BinaryNode::new(op, left, right).into();
        }

        Ok(left)
    }

    /// Parse multiplicative (* /)
    fn parse_term(&mut self) -> Result<Node, ParseError> {
        let mut left = self.parse_factor()?;

        while matches!(self.current.kind, TokenKind::Multiply | TokenKind::Divide) {
            let op = self.advance();
            let right = self.parse_factor()?;
            left = BinaryNode::new(op, left, right).into();
        }

        Ok(left)
    }

    /// Parse factor (literals, variables, parenthesized expressions)
    fn parse_factor(&mut self) -> Result<Node, ParseError> {
        if self.current.kind.is_value() {
            return Ok(BinaryNode::leaf(self.advance()).into());
        }

        let kind = match self.current.kind {
            TokenKind::ParenOpen => {
                self.enter_nested()?;
                self.advance();
                let expr = self.parse_expression()?;
                self.expect(TokenKind::ParenClose, |found| {
                    ParseErrorKind::ExpectedCloseParen { found }
                })?;
                self.exit_nested();
                return Ok(expr);
            }
            TokenKind::Else => ParseErrorKind::UnexpectedElse,
            TokenKind::ParenClose => ParseErrorKind::UnexpectedCloseParen,
            TokenKind::Eof => ParseErrorKind::UnexpectedEof,
            TokenKind::Assign => ParseErrorKind::UnexpectedAssign,
            TokenKind::Unknown if self.current.text.starts_with('#') => {
                ParseErrorKind::UnterminatedString {
                    text: self.current.text.clone(),
                }
            }
            TokenKind::Unknown => ParseErrorKind::UnknownCharacter {
                text: self.current.text.clone(),
            },
            _ => ParseErrorKind::UnexpectedToken {
                text: self.current.text.clone(),
            },
        };

        Err(self.error(kind))
    }
}
