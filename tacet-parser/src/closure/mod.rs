use std::collections::{BTreeMap, BTreeSet};
use std::fmt::{self, Display};

use crate::grammar::Grammar;

mod item;

pub use item::{RuleState, RuleStateDisplay};

/// A canonical set of LR(1) items: lookaheads of items agreeing on
/// `(rule_index, dot)` are merged, so equal closures compare and hash equal
/// no matter how they were assembled.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Closure {
    states: BTreeSet<RuleState>,
}

impl Closure {
    pub fn canonical(states: impl IntoIterator<Item = RuleState>) -> Self {
        let mut merged: BTreeMap<(usize, usize), BTreeSet<String>> = BTreeMap::new();
        for state in states {
            merged
                .entry((state.rule_index(), state.dot()))
                .or_default()
                .extend(state.lookaheads().iter().cloned());
        }
        let states = merged
            .into_iter()
            .map(|((rule_index, dot), lookaheads)| RuleState::new(rule_index, dot, lookaheads))
            .collect();
        Closure { states }
    }

    pub fn iter(&self) -> impl Iterator<Item = &RuleState> {
        self.states.iter()
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn contains(&self, state: &RuleState) -> bool {
        self.states.contains(state)
    }

    pub fn display<'a>(&'a self, grammar: &'a Grammar) -> ClosureDisplay<'a> {
        ClosureDisplay {
            closure: self,
            grammar,
        }
    }
}

/// Lists the closure's items sorted by rule index, one per line.
pub struct ClosureDisplay<'a> {
    closure: &'a Closure,
    grammar: &'a Grammar,
}

impl Display for ClosureDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut states: Vec<&RuleState> = self.closure.iter().collect();
        states.sort_by_key(|state| (state.rule_index(), state.dot()));
        for (index, state) in states.into_iter().enumerate() {
            if index > 0 {
                writeln!(f)?;
            }
            write!(f, "    {}", state.display(self.grammar))?;
        }
        Ok(())
    }
}

/// The smallest canonical closure containing `seeds` that is closed under
/// nonterminal expansion after the dot.
pub fn closure_for(grammar: &Grammar, seeds: impl IntoIterator<Item = RuleState>) -> Closure {
    let mut states: BTreeSet<RuleState> = seeds.into_iter().collect();
    let mut pending: Vec<RuleState> = states.iter().cloned().collect();
    while let Some(state) = pending.pop() {
        for follow in state.follow_states(grammar) {
            if states.insert(follow.clone()) {
                pending.push(follow);
            }
        }
    }
    Closure::canonical(states)
}

/// Per symbol after the dot, the closure reached by advancing the dot of
/// every matching item over that symbol.
pub fn successors_for(grammar: &Grammar, closure: &Closure) -> BTreeMap<String, Closure> {
    let mut groups: BTreeMap<String, BTreeSet<RuleState>> = BTreeMap::new();
    for state in closure.iter() {
        if let Some(symbol) = state.next_symbol(grammar) {
            groups
                .entry(symbol.to_string())
                .or_default()
                .insert(state.advanced());
        }
    }
    groups
        .into_iter()
        .map(|(symbol, seeds)| (symbol, closure_for(grammar, seeds)))
        .collect()
}

#[cfg(test)]
mod tests;
