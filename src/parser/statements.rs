//! Statement parsing implementation
//!
//! This module handles parsing of all curiousx statement types:
//!
//! - Conditionals: `if (a > b) { ... } else { ... }`
//! - Print statements: `print a + 1`
//! - Expression statements: assignments and bare expressions
//!
//! # Grammar
//!
//! ```text
//! statement   ::= conditional | print | expression
//! conditional ::= 'if' comparison block ('else' block)?
//! comparison  ::= '(' expression (relop expression)? ')'
//! block       ::= '{' statement* '}'
//! print       ::= 'print' expression
//! ```
//!
//! Line breaks never reach these rules, so a block may open on the line after
//! its condition and `else` may sit on the line after the closing brace.
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::ast::*;
use crate::parser::lexer::TokenKind;
use crate::parser::parse::{ParseError, ParseErrorKind, Parser};

impl Parser {
    /// Parse a statement
    pub(crate) fn parse_statement(&mut self) -> Result<Node, ParseError> {
        match self.current.kind {
            TokenKind::Comment => {
                self.advance();
                self.parse_statement()
            }
            TokenKind::If => self.parse_conditional(),
            TokenKind::Print => self.parse_print_statement(),
            _ => self.parse_expression(),
        }
    }

    /// Parse if statement
    fn parse_conditional(&mut self) -> Result<Node, ParseError> {
        if !self.at_line_start() {
            return Err(self.error(ParseErrorKind::MisplacedIf));
        }

        let if_token = self.advance();
        let condition = self.parse_comparison()?;
        let then_branch = self.parse_block(BlockRole::Then)?;

        let else_branch = if self.check(TokenKind::Else) {
            self.advance();
            Some(self.parse_block(BlockRole::Else)?)
        } else {
            None
        };

        Ok(Node::Conditional(ConditionalNode {
            token: if_token,
            condition: Box::new(condition),
            then_branch,
            else_branch,
        }))
    }

    /// Parse the parenthesized condition of an `if`
    fn parse_comparison(&mut self) -> Result<Node, ParseError> {
        self.expect(TokenKind::ParenOpen, |found| {
            ParseErrorKind::ExpectedOpenParen { found }
        })?;

        let mut left = self.parse_expression()?;

        if self.current.kind.is_relational() {
            let op = self.advance();
            let right = self.parse_expression()?;
            left = BinaryNode::new(op, left, right).into();
        }

        self.expect(TokenKind::ParenClose, |found| {
            ParseErrorKind::ExpectedCloseParen { found }
        })?;

        Ok(left)
    }

    /// Parse a brace-delimited block of statements
    fn parse_block(&mut self, role: BlockRole) -> Result<BlockNode, ParseError> {
        self.enter_nested()?;
        let open = self.expect(TokenKind::BraceOpen, |found| {
            ParseErrorKind::ExpectedOpenBrace { found }
        })?;
        let mut block = BlockNode::new(role, open);

        loop {
            self.skip_comments();
            match self.current.kind {
                TokenKind::BraceClose => break,
                TokenKind::Eof => {
                    return Err(self.error(ParseErrorKind::ExpectedCloseBrace {
                        found: self.current.to_string(),
                    }));
                }
                _ => block.children.push(self.parse_statement()?),
            }
        }

        self.advance(); // consume '}'
        self.exit_nested();
        Ok(block)
    }

    /// Parse print statement: exactly one expression, wrapped in a block
    fn parse_print_statement(&mut self) -> Result<Node, ParseError> {
        let print_token = self.advance();
        let expr = self.parse_expression()?;

        let mut block = BlockNode::new(BlockRole::Print, print_token);
        block.children.push(expr);
        Ok(block.into())
    }
}
