//! Renderings of a finished parse
//!
//! Both renderings consume a [`ParseOutcome`] and nothing else:
//!
//! - [`json`]: machine-readable report (`Lexer`, `success`, `AST`, `error`)
//! - [`text`]: token table followed by an indented tree dump
//!
//! The terminal viewer in [`crate::ui`] reuses [`text::tree_lines`] and
//! [`format_value`] so that all three views agree.
//!
//! [`ParseOutcome`]: crate::parser::parse::ParseOutcome

pub mod json;
pub mod text;

use crate::parser::ast::{Program, SourceLocation};
use rustc_hash::FxHashSet;

/// Display form of a token's raw text: `<empty>`, `\n`, `\t` or `[text]`.
pub fn format_value(text: &str) -> String {
    match text {
        "" => "<empty>".to_string(),
        "\n" => "\\n".to_string(),
        "\t" => "\\t".to_string(),
        _ => format!("[{}]", text),
    }
}

/// Locations of every token that ended up in the tree, block markers excluded.
pub fn tree_locations(program: &Program) -> FxHashSet<SourceLocation> {
    let mut locations = FxHashSet::default();
    program.walk(&mut |node| {
        locations.insert(node.location());
    });
    locations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::lexer::LexerOptions;
    use crate::parser::parse::parse;

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(""), "<empty>");
        assert_eq!(format_value("\n"), "\\n");
        assert_eq!(format_value("\t"), "\\t");
        assert_eq!(format_value("x"), "[x]");
    }

    #[test]
    fn test_tree_locations() {
        let outcome = parse("x = 1 + 2\nprint x", LexerOptions::default());
        let locations = tree_locations(outcome.program().unwrap());

        // x, =, 1, +, 2, print, x
        assert_eq!(locations.len(), 7);
        assert!(locations.contains(&SourceLocation::new(1, 9)));
        assert!(locations.contains(&SourceLocation::new(2, 7)));
        assert!(!locations.contains(&SourceLocation::new(1, 2)));
    }
}
