//! # Introduction
//!
//! curiousx turns the source of a small scripting language into a syntax
//! tree and shows the result: as JSON, as a plain-text dump, or in a
//! terminal viewer built with [ratatui](https://docs.rs/ratatui).
//!
//! ## Pipeline
//!
//! ```text
//! Source → Lexer → Parser → ParseOutcome { tokens, result } → report / TUI
//! ```
//!
//! 1. [`parser`] tokenises the source and builds the tree, stopping at the
//!    first syntax error.
//! 2. [`report`] renders a [`parser::parse::ParseOutcome`] as JSON or text.
//! 3. [`ui`] is the ratatui viewer; not part of the stable library API.
//! 4. [`cli`] holds the binary's arguments.
//!
//! ## Language
//!
//! Assignments and arithmetic (`x = 1 + 2 * y`), `print expr`, and
//! `if (a < b) { ... } else { ... }`. One statement per line. Strings are
//! written `#like this#`.
//!
//! ```
//! use curiousx::parser::lexer::LexerOptions;
//! use curiousx::parser::parse::parse;
//!
//! let outcome = parse("x = 1 + 2\nprint x", LexerOptions::default());
//! assert_eq!(outcome.program().map(|p| p.len()), Some(2));
//! ```

pub mod cli;
pub mod parser;
pub mod report;
pub mod ui;
