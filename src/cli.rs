//! Command-line arguments for the `curiousx` binary

use crate::parser::lexer::LexerOptions;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// How the parse result is presented
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Interactive terminal viewer
    #[default]
    Tui,
    /// Token table and tree dump
    Text,
    /// Report with `Lexer`, `success`, `AST` and `error` fields
    Json,
}

/// curiousx - tokenize and parse a script, then show tokens and syntax tree
#[derive(Debug, Parser)]
#[command(name = "curiousx", author, version, about, long_about = None)]
pub struct Args {
    /// Source file to parse
    pub file: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Tui)]
    pub format: OutputFormat,

    /// Write text or JSON output to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Treat `//` as the start of a line comment
    #[arg(long)]
    pub line_comments: bool,
}

impl Args {
    pub fn lexer_options(&self) -> LexerOptions {
        LexerOptions {
            line_comments: self.line_comments,
        }
    }
}
