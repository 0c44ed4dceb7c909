//! The lexicon of the grammar description language, in priority order.

use tacet_lexer::{expand, Matcher, Regex};

/// Dropped before parsing.
pub const SPACE: &str = "space";

pub fn matchers() -> Vec<Matcher> {
    let mut matchers = vec![comments(), strings(), identifiers(), spaces()];
    matchers.extend(symbols());
    matchers.push(eol());
    matchers
}

fn comments() -> Matcher {
    let comment = Regex::seq(vec![
        Regex::literal("#"),
        Regex::literal(" "),
        Regex::at_least(Regex::first_of(expand(' ', '~', None)), 1),
    ]);
    Matcher::new("comment", comment)
}

fn strings() -> Matcher {
    let single_quoted = Regex::seq(vec![
        Regex::literal("'"),
        Regex::at_least(Regex::first_of(expand(' ', '~', Some('\''))), 1),
        Regex::literal("'"),
    ]);
    let double_quoted = Regex::seq(vec![
        Regex::literal("\""),
        Regex::at_least(Regex::first_of(expand(' ', '~', Some('"'))), 1),
        Regex::literal("\""),
    ]);
    Matcher::new("string", Regex::first_of(vec![single_quoted, double_quoted]))
}

fn identifiers() -> Matcher {
    // terminals are lowercase, nonterminal references uppercase
    let mut terminal_chars = expand('a', 'z', None);
    terminal_chars.push(Regex::literal("_"));
    let terminal = Regex::at_least(Regex::first_of(terminal_chars), 1);

    let mut reference_chars = expand('A', 'Z', None);
    reference_chars.push(Regex::literal("_"));
    let reference = Regex::at_least(Regex::first_of(reference_chars), 1);

    Matcher::new("identifier", Regex::first_of(vec![terminal, reference]))
}

fn spaces() -> Matcher {
    Matcher::new(SPACE, Regex::at_least(Regex::literal(" "), 1))
}

fn symbols() -> Vec<Matcher> {
    ["=", "|", ",", "[", "]", "{", "}"]
        .into_iter()
        .map(|value| Matcher::new(value, Regex::literal(value)))
        .collect()
}

fn eol() -> Matcher {
    Matcher::new("eol", Regex::literal("\n"))
}
