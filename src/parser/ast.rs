// AST (Abstract Syntax Tree) definitions for the curiousx language

use crate::parser::lexer::{Token, TokenKind};
use serde::Serialize;
use std::fmt;

/// Source location information for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
}

impl SourceLocation {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl Default for SourceLocation {
    fn default() -> Self {
        Self::new(1, 1)
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Tag reported to collaborators for each node variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum NodeKind {
    BinaryOperation,
    ConditionalOperation,
    /// Program, `print` and branch blocks all report as `PrintProgram`
    #[serde(rename = "PrintProgram")]
    Block,
}

impl NodeKind {
    pub fn name(self) -> &'static str {
        match self {
            NodeKind::BinaryOperation => "BinaryOperation",
            NodeKind::ConditionalOperation => "ConditionalOperation",
            NodeKind::Block => "PrintProgram",
        }
    }
}

/// What a block node stands for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockRole {
    Program,
    Then,
    Else,
    Print,
}

impl BlockRole {
    pub fn label(self) -> &'static str {
        match self {
            BlockRole::Program => "program",
            BlockRole::Then => "then",
            BlockRole::Else => "else",
            BlockRole::Print => "print",
        }
    }
}

/// A value or a binary relation.
///
/// The two operands live in one optional pair, so a node either has both
/// (arithmetic, comparison, assignment) or neither (literal or identifier).
#[derive(Debug, Clone, PartialEq)]
pub struct BinaryNode {
    pub token: Token,
    pub operands: Option<Box<(Node, Node)>>,
}

impl BinaryNode {
    /// Terminal value built straight from a factor token.
    pub fn leaf(token: Token) -> Self {
        Self {
            token,
            operands: None,
        }
    }

    pub fn new(token: Token, left: Node, right: Node) -> Self {
        Self {
            token,
            operands: Some(Box::new((left, right))),
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.operands.is_none()
    }

    pub fn left(&self) -> Option<&Node> {
        self.operands.as_deref().map(|(left, _)| left)
    }

    pub fn right(&self) -> Option<&Node> {
        self.operands.as_deref().map(|(_, right)| right)
    }
}

/// `if` statement with its branches
#[derive(Debug, Clone, PartialEq)]
pub struct ConditionalNode {
    pub token: Token,
    pub condition: Box<Node>,
    pub then_branch: BlockNode,
    pub else_branch: Option<BlockNode>,
}

/// Ordered sequence of statements.
///
/// `token` is the synthetic program marker for the root, the opening brace
/// for `then`/`else` branches and the keyword itself for `print`.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockNode {
    pub role: BlockRole,
    pub token: Token,
    pub children: Vec<Node>,
}

impl BlockNode {
    pub fn new(role: BlockRole, token: Token) -> Self {
        Self {
            role,
            token,
            children: Vec::new(),
        }
    }

    /// Empty program root anchored at the start of the source.
    pub fn program() -> Self {
        Self::new(BlockRole::Program, Token::program_start())
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

/// AST nodes representing statements and expressions
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Binary(BinaryNode),
    Conditional(ConditionalNode),
    Block(BlockNode),
}

impl Node {
    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Binary(_) => NodeKind::BinaryOperation,
            Node::Conditional(_) => NodeKind::ConditionalOperation,
            Node::Block(_) => NodeKind::Block,
        }
    }

    /// The token the node was built from
    pub fn token(&self) -> &Token {
        match self {
            Node::Binary(node) => &node.token,
            Node::Conditional(node) => &node.token,
            Node::Block(node) => &node.token,
        }
    }

    pub fn location(&self) -> SourceLocation {
        self.token().location
    }

    /// True for the `print` wrapper block
    pub fn is_print(&self) -> bool {
        matches!(self, Node::Block(block) if block.role == BlockRole::Print)
    }

    /// Visit this node and every descendant, parents first.
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a Node)) {
        visit(self);
        match self {
            Node::Binary(node) => {
                if let Some((left, right)) = node.operands.as_deref() {
                    left.walk(visit);
                    right.walk(visit);
                }
            }
            Node::Conditional(node) => {
                node.condition.walk(visit);
                node.then_branch.walk(visit);
                if let Some(else_branch) = &node.else_branch {
                    else_branch.walk(visit);
                }
            }
            Node::Block(node) => {
                for child in &node.children {
                    child.walk(visit);
                }
            }
        }
    }
}

impl BlockNode {
    /// Visit every node below this block, parents first.
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a Node)) {
        for child in &self.children {
            child.walk(visit);
        }
    }
}

impl From<BinaryNode> for Node {
    fn from(node: BinaryNode) -> Self {
        Node::Binary(node)
    }
}

impl From<ConditionalNode> for Node {
    fn from(node: ConditionalNode) -> Self {
        Node::Conditional(node)
    }
}

impl From<BlockNode> for Node {
    fn from(node: BlockNode) -> Self {
        Node::Block(node)
    }
}

/// Top-level program structure
pub type Program = BlockNode;

impl Token {
    /// Synthetic marker that precedes the first real token of a program.
    pub fn program_start() -> Self {
        Token::new("program", SourceLocation::default(), TokenKind::Program)
    }
}
