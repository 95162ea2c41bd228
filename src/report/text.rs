//! Plain-text report: token table and tree dump

use super::format_value;
use crate::parser::ast::{BlockNode, Node, Program};
use crate::parser::lexer::Token;
use crate::parser::parse::ParseOutcome;
use std::fmt::Write;

/// One row of the tree dump
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeLine {
    pub text: String,
    /// `Condition:` / `then Branch:` / `Else Branch:` labels
    pub heading: bool,
    /// Terminal values (no operands)
    pub leaf: bool,
}

impl TreeLine {
    fn node(depth: usize, label: &str, leaf: bool) -> Self {
        Self {
            text: format!("{}└─ {}", indent(depth), label),
            heading: false,
            leaf,
        }
    }

    fn heading(depth: usize, connector: &str, label: &str) -> Self {
        Self {
            text: format!("{}  {} {}", indent(depth), connector, label),
            heading: true,
            leaf: false,
        }
    }
}

fn indent(depth: usize) -> String {
    " ".repeat(depth * 2)
}

/// Full report: token table, then the tree or the error.
pub fn render(outcome: &ParseOutcome) -> String {
    let mut out = token_table(&outcome.tokens);

    out.push_str("==== AST Output ====\n\n");
    match &outcome.result {
        Ok(program) => {
            for line in tree_lines(program) {
                out.push_str(&line.text);
                out.push('\n');
            }
        }
        Err(error) => {
            let _ = writeln!(out, "An error occurred: {}", error);
        }
    }
    out
}

/// `==== Lexer Output ====` table of every token
pub fn token_table(tokens: &[Token]) -> String {
    let mut out = String::from("==== Lexer Output ====\n\n");
    let _ = writeln!(out, "{:<20}{:<20}Value", "Token", "Position");
    let _ = writeln!(out, "{}", "-".repeat(70));

    for token in tokens {
        let _ = writeln!(
            out,
            "{:<20}{:<20}{}",
            token.kind.name(),
            token.location.to_string(),
            format_value(&token.text)
        );
    }
    out.push('\n');
    out
}

/// Indented dump of the tree, one entry per line
pub fn tree_lines(program: &Program) -> Vec<TreeLine> {
    let mut lines = Vec::new();
    draw_block(program, 0, &mut lines);
    lines
}

fn draw_block(block: &BlockNode, depth: usize, lines: &mut Vec<TreeLine>) {
    lines.push(TreeLine::node(depth, block.role.label(), false));
    for child in &block.children {
        draw_node(child, depth + 1, lines);
    }
}

fn draw_node(node: &Node, depth: usize, lines: &mut Vec<TreeLine>) {
    match node {
        Node::Binary(binary) => {
            lines.push(TreeLine::node(depth, &binary.token.text, binary.is_leaf()));
            if let Some((left, right)) = binary.operands.as_deref() {
                draw_node(left, depth + 1, lines);
                draw_node(right, depth + 1, lines);
            }
        }
        Node::Conditional(cond) => {
            lines.push(TreeLine::node(depth, &cond.token.text, false));
            lines.push(TreeLine::heading(depth, "├─", "Condition:"));
            draw_node(&cond.condition, depth + 2, lines);
            lines.push(TreeLine::heading(depth, "├─", "then Branch:"));
            draw_block(&cond.then_branch, depth + 2, lines);
            lines.push(TreeLine::heading(depth, "└─", "Else Branch:"));
            if let Some(else_branch) = &cond.else_branch {
                draw_block(else_branch, depth + 2, lines);
            }
        }
        Node::Block(block) => draw_block(block, depth, lines),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::lexer::LexerOptions;
    use crate::parser::parse::parse;

    #[test]
    fn test_tree_dump() {
        let outcome = parse("if (a > 1) {\n  x = a * 2\n}", LexerOptions::default());
        let lines: Vec<String> = tree_lines(outcome.program().unwrap())
            .into_iter()
            .map(|line| line.text)
            .collect();

        assert_eq!(
            lines,
            vec![
                "└─ program",
                "  └─ if",
                "    ├─ Condition:",
                "      └─ >",
                "        └─ a",
                "        └─ 1",
                "    ├─ then Branch:",
                "      └─ then",
                "        └─ =",
                "          └─ x",
                "          └─ *",
                "            └─ a",
                "            └─ 2",
                "    └─ Else Branch:",
            ]
        );
    }

    #[test]
    fn test_leaf_and_heading_flags() {
        let outcome = parse("print 1", LexerOptions::default());
        let lines = tree_lines(outcome.program().unwrap());

        assert_eq!(lines.len(), 3);
        assert!(!lines[1].leaf);
        assert!(lines[2].leaf);
        assert!(lines.iter().all(|line| !line.heading));
    }

    #[test]
    fn test_render_success() {
        let outcome = parse("print #hi#\n", LexerOptions::default());
        let text = render(&outcome);

        assert!(text.starts_with("==== Lexer Output ====\n\n"));
        assert!(text.contains("Print               1:1                 [print]\n"));
        assert!(text.contains("Newline             1:11                \\n\n"));
        assert!(text.contains("Eof                 2:1                 <empty>\n"));
        assert!(text.contains("==== AST Output ====\n\n└─ program\n  └─ print\n    └─ #hi#\n"));
    }

    #[test]
    fn test_render_failure() {
        let outcome = parse("x = = 1", LexerOptions::default());
        let text = render(&outcome);

        assert!(text.ends_with(
            "==== AST Output ====\n\nAn error occurred: Parse error at line 1, column 5: Assignment is not allowed within print statement\n"
        ));
    }
}
