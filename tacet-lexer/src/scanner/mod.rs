use std::error::Error;
use std::fmt::{self, Display};

use tacet_ast::{Node, Token};

use crate::regex::Regex;

/// No matcher matched at a source position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannerError {
    line: usize,
    column: usize,
    message: String,
}

impl ScannerError {
    pub fn new(line: usize, column: usize, message: impl Into<String>) -> Self {
        ScannerError {
            line,
            column,
            message: message.into(),
        }
    }

    pub fn line(&self) -> usize {
        self.line
    }

    pub fn column(&self) -> usize {
        self.column
    }
}

impl Display for ScannerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{} {}", self.line, self.column, self.message)
    }
}

impl Error for ScannerError {}

/// A named lexical rule. The scanner tries matchers in list order; the
/// first match wins regardless of length.
#[derive(Debug, Clone)]
pub struct Matcher {
    key: String,
    regex: Regex,
}

impl Matcher {
    pub fn new(key: impl Into<String>, regex: Regex) -> Self {
        Matcher {
            key: key.into(),
            regex,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    fn matched_node(&self, line: usize, column: usize, sequence: &str) -> Option<Node> {
        self.regex.matched(sequence).map(|value| {
            Node::leaf(self.key.clone(), Token::new(line, column, value))
        })
    }
}

/// Tokenizes every line independently into leaf nodes. Lines are scanned
/// left to right; the cursor advances by the length of each match.
pub fn scan(lines: &[&str], matchers: &[Matcher]) -> Result<Vec<Node>, ScannerError> {
    let mut nodes = Vec::new();
    for (line_index, line) in lines.iter().enumerate() {
        scan_line(line_index, line, matchers, &mut nodes)?;
    }
    Ok(nodes)
}

fn scan_line(
    line_index: usize,
    line: &str,
    matchers: &[Matcher],
    nodes: &mut Vec<Node>,
) -> Result<(), ScannerError> {
    let mut column = 0;
    while column < line.len() {
        let node = scan_next(line_index, column, &line[column..], matchers)?;
        column += node.len();
        nodes.push(node);
    }
    Ok(())
}

fn scan_next(
    line_index: usize,
    column: usize,
    sequence: &str,
    matchers: &[Matcher],
) -> Result<Node, ScannerError> {
    for matcher in matchers {
        if let Some(node) = matcher.matched_node(line_index, column, sequence) {
            assert!(!node.is_empty(), "scanner matches must consume input");
            return Ok(node);
        }
    }
    let offending = sequence.chars().next().unwrap();
    Err(ScannerError::new(
        line_index,
        column,
        format!("unexpected token: {:?}", offending),
    ))
}
