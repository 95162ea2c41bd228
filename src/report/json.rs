//! JSON report
//!
//! ```text
//! {
//!   "Lexer":   [{ "type": "Identifier", "location": "1:1", "value": "x" }, ...],
//!   "success": true,
//!   "AST":     { "type": "PrintProgram", "role": "program", "token": {...}, "children": [...] },
//!   "error":   "An error occurred: ..."      (only on failure)
//! }
//! ```

use crate::parser::ast::{BlockNode, Node, NodeKind};
use crate::parser::lexer::Token;
use crate::parser::parse::ParseOutcome;
use serde::Serialize;
use serde_json::{json, Value};

/// One entry of the `Lexer` array
#[derive(Debug, Serialize)]
pub struct TokenRecord<'a> {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub location: String,
    pub value: &'a str,
}

impl<'a> From<&'a Token> for TokenRecord<'a> {
    fn from(token: &'a Token) -> Self {
        Self {
            kind: token.kind.name(),
            location: token.location.to_string(),
            value: &token.text,
        }
    }
}

/// Serializable view over a [`ParseOutcome`]
#[derive(Debug, Serialize)]
pub struct JsonReport<'a> {
    #[serde(rename = "Lexer")]
    pub lexer: Vec<TokenRecord<'a>>,
    pub success: bool,
    #[serde(rename = "AST", skip_serializing_if = "Option::is_none")]
    pub ast: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<'a> JsonReport<'a> {
    pub fn new(outcome: &'a ParseOutcome) -> Self {
        Self {
            lexer: outcome.tokens.iter().map(TokenRecord::from).collect(),
            success: outcome.is_success(),
            ast: outcome.program().map(block_to_json),
            error: outcome
                .error()
                .map(|error| format!("An error occurred: {}", error)),
        }
    }
}

/// Pretty-printed JSON for the whole outcome
pub fn to_string_pretty(outcome: &ParseOutcome) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&JsonReport::new(outcome))
}

fn token_to_json(token: &Token) -> Value {
    json!({
        "type": token.kind.name(),
        "value": token.text,
        "location": token.location.to_string(),
    })
}

pub fn node_to_json(node: &Node) -> Value {
    match node {
        Node::Binary(binary) => json!({
            "type": node.kind().name(),
            "token": token_to_json(&binary.token),
            "left": binary.left().map(node_to_json),
            "right": binary.right().map(node_to_json),
        }),
        Node::Conditional(cond) => json!({
            "type": node.kind().name(),
            "token": token_to_json(&cond.token),
            "condition": node_to_json(&cond.condition),
            "ifNode": block_to_json(&cond.then_branch),
            "elseNode": cond.else_branch.as_ref().map(block_to_json),
        }),
        Node::Block(block) => block_to_json(block),
    }
}

pub fn block_to_json(block: &BlockNode) -> Value {
    let children: Vec<Value> = block.children.iter().map(node_to_json).collect();
    json!({
        "type": NodeKind::Block.name(),
        "role": block.role,
        "token": token_to_json(&block.token),
        "children": children,
    })
}
