use std::borrow::Cow;
use std::io;

use ptree::{Style, TreeItem};

/// A lexeme together with its zero-based source position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    line: usize,
    column: usize,
    value: String,
}

impl Token {
    pub fn new(line: usize, column: usize, value: impl Into<String>) -> Self {
        Token {
            line,
            column,
            value: value.into(),
        }
    }

    pub fn line(&self) -> usize {
        self.line
    }

    pub fn column(&self) -> usize {
        self.column
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

/// A parse-tree node: either a leaf wrapping a single token, or a branch
/// owning an ordered list of children. A node never carries both.
///
/// Equality is structural. `Node` intentionally does not implement `Hash`;
/// position-derived identity is not meaningful for set membership.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Leaf { key: String, token: Token },
    Branch { key: String, children: Vec<Node> },
}

impl Node {
    pub fn leaf(key: impl Into<String>, token: Token) -> Self {
        Node::Leaf {
            key: key.into(),
            token,
        }
    }

    pub fn branch(key: impl Into<String>, children: Vec<Node>) -> Self {
        Node::Branch {
            key: key.into(),
            children,
        }
    }

    pub fn key(&self) -> &str {
        match self {
            Node::Leaf { key, .. } => key,
            Node::Branch { key, .. } => key,
        }
    }

    pub fn token(&self) -> Option<&Token> {
        match self {
            Node::Leaf { token, .. } => Some(token),
            Node::Branch { .. } => None,
        }
    }

    pub fn children(&self) -> &[Node] {
        match self {
            Node::Leaf { .. } => &[],
            Node::Branch { children, .. } => children,
        }
    }

    /// Token length for leaves; for branches, the column span of the last
    /// source line covered by the subtree. A childless branch has length 0.
    pub fn len(&self) -> usize {
        match self {
            Node::Leaf { token, .. } => token.value().len(),
            Node::Branch { children, .. } if children.is_empty() => 0,
            node => end(node).1 - begin(node).1,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// `(line, column)` where the subtree starts on its last source line.
/// Panics on a childless branch.
pub fn begin(node: &Node) -> (usize, usize) {
    match node {
        Node::Leaf { token, .. } => (token.line(), token.column()),
        Node::Branch { children, .. } => {
            let spans: Vec<(usize, usize)> = children.iter().map(begin).collect();
            let line = spans.iter().map(|(line, _)| *line).max().unwrap();
            let column = spans
                .iter()
                .filter(|(l, _)| *l == line)
                .map(|(_, column)| *column)
                .min()
                .unwrap();
            (line, column)
        }
    }
}

/// `(line, column)` one past the subtree's end on its last source line.
/// Panics on a childless branch.
pub fn end(node: &Node) -> (usize, usize) {
    match node {
        Node::Leaf { token, .. } => (token.line(), token.column() + token.value().len()),
        Node::Branch { children, .. } => {
            let spans: Vec<(usize, usize)> = children.iter().map(end).collect();
            let line = spans.iter().map(|(line, _)| *line).max().unwrap();
            let column = spans
                .iter()
                .filter(|(l, _)| *l == line)
                .map(|(_, column)| *column)
                .max()
                .unwrap();
            (line, column)
        }
    }
}

impl TreeItem for Node {
    type Child = Node;

    fn write_self<W: io::Write>(&self, f: &mut W, _: &Style) -> io::Result<()> {
        match self {
            Node::Leaf { key, token } => write!(f, "{} {:?}", key, token.value()),
            Node::Branch { key, .. } => write!(f, "{}", key),
        }
    }

    fn children(&self) -> Cow<[Node]> {
        Cow::Borrowed(self.children())
    }
}
