//! curiousx source code parser
//!
//! This module transforms curiousx source text into an Abstract Syntax Tree (AST):
//! - [`lexer`]: Tokenization (source text → tokens)
//! - [`parse`]: Parser struct, errors, and the program loop (tokens → AST)
//! - [`statements`] / [`expressions`]: the grammar rules
//! - [`ast`]: AST node definitions
//!
//! # Language
//!
//! - Statements: assignments and expressions, `print`, `if`/`else` with braced blocks
//! - Expressions: `+ - * /`, parentheses, assignment, comparisons inside `if (...)`
//! - Values: integers, floats, `#strings#`, `true`/`false`, identifiers
//! - One statement per line
//!
//! # Parser Implementation
//!
//! Hand-written recursive descent parser, one method per grammar rule.
//! No external parser generator dependencies.

pub mod ast;
pub mod expressions;
pub mod lexer;
pub mod parse;
pub mod statements;
