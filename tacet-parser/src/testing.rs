use std::collections::BTreeSet;

use crate::closure::{Closure, RuleState};
use crate::grammar::AUGMENTED_EOF;

/// Builds an item from compact notation: each lookahead is one character,
/// with `'$'` standing for the end-of-input terminal.
pub fn rule_state(rule_index: usize, dot: usize, lookaheads: &str) -> RuleState {
    let lookaheads: BTreeSet<String> = lookaheads
        .chars()
        .map(|ch| {
            if ch == '$' {
                AUGMENTED_EOF.to_string()
            } else {
                ch.to_string()
            }
        })
        .collect();
    RuleState::new(rule_index, dot, lookaheads)
}

pub fn closure(states: &[(usize, usize, &str)]) -> Closure {
    Closure::canonical(
        states
            .iter()
            .map(|(rule_index, dot, lookaheads)| rule_state(*rule_index, *dot, lookaheads)),
    )
}
