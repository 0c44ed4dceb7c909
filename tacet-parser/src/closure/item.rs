use std::collections::BTreeSet;
use std::fmt::{self, Display};

use crate::grammar::{Grammar, AUGMENTED_EOF};

/// An LR(1) item: a rule, a dot position counting the symbols already
/// processed, and a non-empty set of lookahead terminals. Equality and hash
/// cover all three fields.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RuleState {
    rule_index: usize,
    dot: usize,
    lookaheads: BTreeSet<String>,
}

impl RuleState {
    pub fn new<S: Into<String>>(
        rule_index: usize,
        dot: usize,
        lookaheads: impl IntoIterator<Item = S>,
    ) -> Self {
        let lookaheads: BTreeSet<String> = lookaheads.into_iter().map(Into::into).collect();
        assert!(
            !lookaheads.is_empty(),
            "item must carry at least one lookahead"
        );
        assert!(
            lookaheads.iter().all(|lookahead| !lookahead.is_empty()),
            "lookaheads must not be empty"
        );
        RuleState {
            rule_index,
            dot,
            lookaheads,
        }
    }

    /// The initial item of an augmented grammar: the start rule with the dot
    /// at 0 and the end-of-input terminal as its only lookahead.
    pub fn start(grammar: &Grammar) -> Self {
        assert!(grammar.is_augmented(), "grammar must be augmented");
        RuleState::new(grammar.len() - 1, 0, [AUGMENTED_EOF])
    }

    pub fn rule_index(&self) -> usize {
        self.rule_index
    }

    pub fn dot(&self) -> usize {
        self.dot
    }

    pub fn lookaheads(&self) -> &BTreeSet<String> {
        &self.lookaheads
    }

    pub fn is_reducible(&self, grammar: &Grammar) -> bool {
        self.dot >= grammar.rule_at(self.rule_index).symbols().len()
    }

    /// The symbol right after the dot, if any.
    pub fn next_symbol<'a>(&self, grammar: &'a Grammar) -> Option<&'a str> {
        grammar
            .rule_at(self.rule_index)
            .symbols()
            .get(self.dot)
            .map(String::as_str)
    }

    fn follow_symbols<'a>(&self, grammar: &'a Grammar) -> &'a [String] {
        let symbols = grammar.rule_at(self.rule_index).symbols();
        &symbols[(self.dot + 1).min(symbols.len())..]
    }

    /// The same item with the dot advanced over one symbol.
    pub fn advanced(&self) -> RuleState {
        RuleState {
            rule_index: self.rule_index,
            dot: self.dot + 1,
            lookaheads: self.lookaheads.clone(),
        }
    }

    /// Expands the nonterminal after the dot: one item per rule of that
    /// nonterminal, dot at 0, lookaheads taken from FIRST of the remaining
    /// symbols, or inherited from this item when nothing remains. Reducible
    /// items and items with a terminal after the dot expand to nothing.
    pub fn follow_states(&self, grammar: &Grammar) -> BTreeSet<RuleState> {
        let next = match self.next_symbol(grammar) {
            Some(symbol) => symbol,
            None => return BTreeSet::new(),
        };
        let indexes = grammar.indexes_of(next);
        if indexes.is_empty() {
            return BTreeSet::new();
        }
        let mut lookaheads = grammar.first(self.follow_symbols(grammar));
        if lookaheads.is_empty() {
            lookaheads = self.lookaheads.clone();
        }
        indexes
            .into_iter()
            .map(|index| RuleState::new(index, 0, lookaheads.iter().cloned()))
            .collect()
    }

    pub fn display<'a>(&'a self, grammar: &'a Grammar) -> RuleStateDisplay<'a> {
        RuleStateDisplay {
            state: self,
            grammar,
        }
    }
}

/// Renders an item as `KEY -> a • b [x y]`.
pub struct RuleStateDisplay<'a> {
    state: &'a RuleState,
    grammar: &'a Grammar,
}

impl Display for RuleStateDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = self.grammar.rule_at(self.state.rule_index);
        let mut symbols: Vec<&str> = rule.symbols()[..self.state.dot]
            .iter()
            .map(String::as_str)
            .collect();
        symbols.push("•");
        symbols.extend(rule.symbols()[self.state.dot..].iter().map(String::as_str));
        let lookaheads: Vec<&str> = self.state.lookaheads.iter().map(String::as_str).collect();
        write!(
            f,
            "{} -> {} [{}]",
            rule.key(),
            symbols.join(" "),
            lookaheads.join(" ")
        )
    }
}
