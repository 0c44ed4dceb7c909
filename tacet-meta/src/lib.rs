//! The bootstrap front-end: a grammar description language scanned and
//! parsed by the LR(1) core itself, then compiled into a [`Grammar`].

use std::error::Error;
use std::fmt::{self, Display};

use once_cell::sync::Lazy;
use tacet_ast::Node;
use tacet_lexer::{scan, ScannerError};
use tacet_parser::driver::{parse, ParserError};
use tacet_parser::grammar::{augment, Grammar, Rule};
use tacet_parser::graph::graph_for;
use tacet_parser::table::{table_for, ParseTable};

mod compiler;
mod matchers;

pub use compiler::compile;
pub use matchers::matchers;

/// Compiling a grammar description failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetaError {
    Scanner(ScannerError),
    Parser(ParserError),
    /// A definition expands to an alternative with no symbols; empty
    /// productions are unrepresentable.
    EmptyProduction { key: String },
    /// A definition expands to exactly itself.
    CyclicDefinition { key: String },
}

impl Display for MetaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetaError::Scanner(error) => write!(f, "{}", error),
            MetaError::Parser(error) => write!(f, "{}", error),
            MetaError::EmptyProduction { key } => {
                write!(f, "definition {:?} produces an empty alternative", key)
            }
            MetaError::CyclicDefinition { key } => {
                write!(f, "definition {:?} produces only itself", key)
            }
        }
    }
}

impl Error for MetaError {}

impl From<ScannerError> for MetaError {
    fn from(error: ScannerError) -> Self {
        MetaError::Scanner(error)
    }
}

impl From<ParserError> for MetaError {
    fn from(error: ParserError) -> Self {
        MetaError::Parser(error)
    }
}

fn bootstrap_rules() -> Vec<Rule> {
    vec![
        Rule::new("GRAMMAR", ["LINE", "GRAMMAR"]),
        Rule::new("GRAMMAR", ["LINE"]),
        Rule::new("LINE", ["DEFINITION", "eol"]),
        Rule::new("LINE", ["comment", "eol"]),
        Rule::new("LINE", ["eol"]),
        Rule::new("DEFINITION", ["identifier", "=", "OPTION"]),
        Rule::new("OPTION", ["SEQUENCE", "|", "OPTION"]),
        Rule::new("OPTION", ["SEQUENCE"]),
        Rule::new("SEQUENCE", ["ANCHOR", ",", "SEQUENCE"]),
        Rule::new("SEQUENCE", ["ANCHOR"]),
        Rule::new("ANCHOR", ["string"]),
        Rule::new("ANCHOR", ["identifier"]),
        Rule::new("ANCHOR", ["[", "OPTION", "]"]),
        Rule::new("ANCHOR", ["{", "OPTION", "}"]),
    ]
}

static META_GRAMMAR: Lazy<Grammar> = Lazy::new(|| {
    augment(&Grammar::new(bootstrap_rules()), "GRAMMAR")
});

static META_TABLE: Lazy<ParseTable> = Lazy::new(|| {
    let grammar = meta_grammar();
    let graph = graph_for(grammar);
    table_for(grammar, &graph).expect("bootstrap grammar is LR(1)")
});

/// The augmented bootstrap grammar.
pub fn meta_grammar() -> &'static Grammar {
    &META_GRAMMAR
}

/// The parse table of the bootstrap grammar, built once on first use.
pub fn meta_table() -> &'static ParseTable {
    &META_TABLE
}

/// Scans and parses a grammar description into its raw parse tree. A
/// missing final newline is supplied.
pub fn parse_grammar(source: &str) -> Result<Node, MetaError> {
    let mut source = source.to_string();
    if !source.is_empty() && !source.ends_with('\n') {
        source.push('\n');
    }
    let lines: Vec<&str> = source.split_inclusive('\n').collect();
    let tokens: Vec<Node> = scan(&lines, &matchers())?
        .into_iter()
        .filter(|token| token.key() != matchers::SPACE)
        .collect();
    Ok(parse(&tokens, meta_grammar(), meta_table())?)
}

/// Compiles a grammar description into a [`Grammar`]: one rule per
/// alternative per definition.
pub fn compile_grammar(source: &str) -> Result<Grammar, MetaError> {
    compile(parse_grammar(source)?)
}

#[cfg(test)]
mod tests;
