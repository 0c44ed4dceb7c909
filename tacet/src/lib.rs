use std::error::Error;
use std::fmt::{self, Display};
use std::path::PathBuf;

use owo_colors::OwoColorize;

use tacet_lexer::{Matcher, Regex, ScannerError};
use tacet_meta::{compile_grammar, MetaError};
use tacet_parser::driver::{parse, ParserError};
use tacet_parser::grammar::{augment, Grammar};
use tacet_parser::graph::graph_for;
use tacet_parser::table::{table_for, ConflictError, ParseTable};

pub use tacet_ast::{prune, skip, squash, Node, Token};

/// Dropped from the token stream before parsing.
const SPACE: &str = "space";

#[derive(Debug)]
pub enum Severity {
    Error,
}

impl Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "{}", "error".bright_red().bold()),
        }
    }
}

/// Any failure of the grammar-to-tree pipeline, tagged with a severity for
/// rendering.
#[derive(Debug)]
pub struct TacetError {
    severity: Severity,
    error: TacetErrorType,
}

#[derive(Debug)]
enum TacetErrorType {
    Meta(MetaError),
    Conflict(ConflictError),
    Scanner(ScannerError),
    Parser(ParserError),
    UnknownStart { start: String },
    IO { file: PathBuf, error: std::io::Error },
}

impl TacetError {
    pub fn io(file: PathBuf, error: std::io::Error) -> Self {
        TacetError {
            severity: Severity::Error,
            error: TacetErrorType::IO { file, error },
        }
    }

    fn new(error: TacetErrorType) -> Self {
        TacetError {
            severity: Severity::Error,
            error,
        }
    }
}

impl TacetErrorType {
    fn message(&self) -> &'static str {
        match self {
            TacetErrorType::Meta(_) => "failed to compile grammar",
            TacetErrorType::Conflict(_) => "grammar is not LR(1)",
            TacetErrorType::Scanner(_) => "failed to tokenize input",
            TacetErrorType::Parser(_) => "failed to parse input",
            TacetErrorType::UnknownStart { .. } => "start symbol has no rules",
            TacetErrorType::IO { .. } => "failed to read file",
        }
    }
}

impl Display for TacetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}: {}", self.severity, self.error.message())?;
        match &self.error {
            TacetErrorType::Meta(error) => write!(f, "     {}", error),
            TacetErrorType::Conflict(error) => write!(f, "     {}", error),
            TacetErrorType::Scanner(error) => write!(f, "     {}", error),
            TacetErrorType::Parser(error) => write!(f, "     {}", error),
            TacetErrorType::UnknownStart { start } => {
                write!(f, "     symbol: {}", start.bold())
            }
            TacetErrorType::IO { file, error } => {
                write!(f, "     file: {}\n     reason: {}", file.display(), error)
            }
        }
    }
}

impl Error for TacetError {}

impl From<MetaError> for TacetError {
    fn from(error: MetaError) -> Self {
        TacetError::new(TacetErrorType::Meta(error))
    }
}

impl From<ConflictError> for TacetError {
    fn from(error: ConflictError) -> Self {
        TacetError::new(TacetErrorType::Conflict(error))
    }
}

impl From<ScannerError> for TacetError {
    fn from(error: ScannerError) -> Self {
        TacetError::new(TacetErrorType::Scanner(error))
    }
}

impl From<ParserError> for TacetError {
    fn from(error: ParserError) -> Self {
        TacetError::new(TacetErrorType::Parser(error))
    }
}

/// A ready-to-run parser: a compiled, augmented grammar with its table and
/// the literal lexicon derived from the grammar's terminals. Immutable, so
/// one pipeline can serve any number of inputs.
pub struct Pipeline {
    grammar: Grammar,
    table: ParseTable,
    matchers: Vec<Matcher>,
}

impl Pipeline {
    /// Compiles a grammar description and prepares the parse table for the
    /// given start symbol.
    pub fn for_grammar(source: &str, start: &str) -> Result<Pipeline, TacetError> {
        let grammar = compile_grammar(source)?;
        if grammar.is_terminal(start) {
            return Err(TacetError::new(TacetErrorType::UnknownStart {
                start: start.to_string(),
            }));
        }
        let matchers = literal_lexicon(&grammar);
        let grammar = augment(&grammar, start);
        let graph = graph_for(&grammar);
        let table = table_for(&grammar, &graph)?;
        Ok(Pipeline {
            grammar,
            table,
            matchers,
        })
    }

    pub fn grammar(&self) -> &Grammar {
        &self.grammar
    }

    pub fn table(&self) -> &ParseTable {
        &self.table
    }

    /// Tokenizes and parses `source` into a tree.
    pub fn run(&self, source: &str) -> Result<Node, TacetError> {
        let lines: Vec<&str> = source.lines().collect();
        let tokens: Vec<Node> = tacet_lexer::scan(&lines, &self.matchers)?
            .into_iter()
            .filter(|token| token.key() != SPACE)
            .collect();
        Ok(parse(&tokens, &self.grammar, &self.table)?)
    }
}

/// One literal matcher per terminal of the grammar, longest literal first
/// so that no terminal shadows a longer one, plus a dropped space rule.
pub fn literal_lexicon(grammar: &Grammar) -> Vec<Matcher> {
    let mut terminals: Vec<&str> = grammar
        .symbols()
        .into_iter()
        .filter(|symbol| grammar.is_terminal(symbol))
        .collect();
    terminals.sort_by(|a, b| b.len().cmp(&a.len()).then(a.cmp(b)));
    let mut matchers: Vec<Matcher> = terminals
        .into_iter()
        .map(|terminal| Matcher::new(terminal, Regex::literal(terminal)))
        .collect();
    matchers.push(Matcher::new(SPACE, Regex::at_least(Regex::literal(" "), 1)));
    matchers
}
