use std::collections::hash_map::DefaultHasher;
use std::collections::BTreeSet;
use std::hash::{Hash, Hasher};

use super::*;
use crate::grammar::{Rule, AUGMENTED_EOF};
use crate::testing::{closure, rule_state};

fn hash_of(state: &RuleState) -> u64 {
    let mut hasher = DefaultHasher::new();
    state.hash(&mut hasher);
    hasher.finish()
}

fn follow_states(grammar: &Grammar, state: &RuleState) -> BTreeSet<RuleState> {
    state.follow_states(grammar)
}

#[test]
#[should_panic]
fn given_no_lookaheads_then_error() {
    RuleState::new(0, 0, Vec::<String>::new());
}

#[test]
#[should_panic]
fn given_empty_lookahead_then_error() {
    RuleState::new(0, 0, [""]);
}

#[test]
fn given_equal_states_then_equal() {
    assert_eq!(rule_state(0, 0, "x"), rule_state(0, 0, "x"));
    assert_eq!(rule_state(1, 2, "34"), rule_state(1, 2, "34"));
}

#[test]
fn given_different_rule_index_then_not_equal() {
    assert_ne!(rule_state(0, 2, "34"), rule_state(1, 2, "34"));
}

#[test]
fn given_different_dot_then_not_equal() {
    assert_ne!(rule_state(1, 0, "34"), rule_state(1, 2, "34"));
}

#[test]
fn given_different_lookaheads_then_not_equal() {
    assert_ne!(rule_state(1, 2, "3"), rule_state(1, 2, "34"));
    assert_ne!(rule_state(1, 2, "04"), rule_state(1, 2, "34"));
}

#[test]
fn given_equal_states_then_same_hash() {
    assert_eq!(hash_of(&rule_state(1, 2, "34")), hash_of(&rule_state(1, 2, "34")));
}

#[test]
fn given_unprocessed_terminal_then_not_reducible_and_next_symbol_is_terminal() {
    let grammar = Grammar::new([Rule::new("A", ["a", "A"])]);
    let state = rule_state(0, 0, "$");
    assert!(!state.is_reducible(&grammar));
    assert_eq!(Some("a"), state.next_symbol(&grammar));
}

#[test]
fn given_unprocessed_reference_then_not_reducible_and_next_symbol_is_reference() {
    let grammar = Grammar::new([Rule::new("A", ["a", "A"])]);
    let state = rule_state(0, 1, "$");
    assert!(!state.is_reducible(&grammar));
    assert_eq!(Some("A"), state.next_symbol(&grammar));
}

#[test]
fn given_processed_rule_then_reducible() {
    let grammar = Grammar::new([Rule::new("A", ["a", "A"])]);
    let state = rule_state(0, 2, "$");
    assert!(state.is_reducible(&grammar));
    assert_eq!(None, state.next_symbol(&grammar));
}

#[test]
fn given_unprocessed_terminal_then_no_follow_states() {
    let grammar = Grammar::new([Rule::new("A", ["a"])]);
    let state = rule_state(0, 0, "a");
    assert!(follow_states(&grammar, &state).is_empty());
}

#[test]
fn given_unprocessed_reference_then_initial_reference_states() {
    let grammar = Grammar::new([Rule::new("A", ["B"]), Rule::new("B", ["b"])]);
    let state = rule_state(0, 0, "b");
    let expected = BTreeSet::from([rule_state(1, 0, "b")]);
    assert_eq!(expected, follow_states(&grammar, &state));
}

#[test]
fn given_last_unprocessed_reference_then_lookaheads_of_parent() {
    let grammar = Grammar::new([
        Rule::new("A", ["x", "B"]),
        Rule::new("A", ["B", "x"]),
        Rule::new("B", ["x"]),
    ]);
    let state = rule_state(0, 1, "a");
    let expected = BTreeSet::from([rule_state(2, 0, "a")]);
    assert_eq!(expected, follow_states(&grammar, &state));
}

#[test]
fn given_reference_followed_by_terminal_then_lookahead_is_terminal() {
    let grammar = Grammar::new([Rule::new("A", ["B", "a"]), Rule::new("B", ["x"])]);
    let state = rule_state(0, 0, "x");
    let expected = BTreeSet::from([rule_state(1, 0, "a")]);
    assert_eq!(expected, follow_states(&grammar, &state));
}

#[test]
fn given_reference_followed_by_reference_then_lookahead_is_first_set() {
    let grammar = Grammar::new([
        Rule::new("A", ["B", "X"]),
        Rule::new("B", ["x"]),
        Rule::new("X", ["a"]),
        Rule::new("X", ["b"]),
    ]);
    let state = rule_state(0, 0, "x");
    let expected = BTreeSet::from([rule_state(1, 0, "ab")]);
    assert_eq!(expected, follow_states(&grammar, &state));
}

#[test]
fn given_reference_followed_by_recursion_then_lookahead_is_first_set() {
    let grammar = Grammar::new([Rule::new("X", ["a"]), Rule::new("X", ["b", "X", "X"])]);
    let state = rule_state(1, 1, "x");
    let expected = BTreeSet::from([rule_state(0, 0, "ab"), rule_state(1, 0, "ab")]);
    assert_eq!(expected, follow_states(&grammar, &state));
}

#[test]
fn given_grammar_with_single_rule_then_complete_closure() {
    let grammar = Grammar::new([Rule::new("X", ["x"])]);
    let result = closure_for(&grammar, [rule_state(0, 0, "$")]);
    assert_eq!(closure(&[(0, 0, "$")]), result);
}

#[test]
fn given_states_followed_by_terminals_then_complete_closure() {
    let grammar = Grammar::new([
        Rule::new("A", ["X", "a"]),
        Rule::new("A", ["A", "X"]),
        Rule::new("X", ["x"]),
    ]);
    let result = closure_for(&grammar, [rule_state(0, 1, "$"), rule_state(1, 2, "$")]);
    assert_eq!(closure(&[(0, 1, "$"), (1, 2, "$")]), result);
}

#[test]
fn given_states_followed_by_references_then_closure_includes_references() {
    let grammar = Grammar::new([
        Rule::new("A", ["x", "B"]),
        Rule::new("B", ["C"]),
        Rule::new("C", ["x"]),
    ]);
    let result = closure_for(&grammar, [rule_state(0, 1, "$")]);
    assert_eq!(closure(&[(0, 1, "$"), (1, 0, "$"), (2, 0, "$")]), result);
}

#[test]
fn given_state_followed_by_two_references_then_lookahead_of_reference() {
    let grammar = Grammar::new([Rule::new("A", ["B", "B"]), Rule::new("B", ["b"])]);
    let result = closure_for(&grammar, [rule_state(0, 0, "$")]);
    assert_eq!(closure(&[(0, 0, "$"), (1, 0, "b")]), result);
}

#[test]
fn given_states_followed_by_recursion_then_closure_includes_all_lookaheads() {
    let grammar = Grammar::new([Rule::new("A", ["a", "A"]), Rule::new("A", ["A", "A"])]);
    let result = closure_for(&grammar, [rule_state(0, 1, "$")]);
    let expected = closure(&[(0, 1, "$"), (1, 0, "$a"), (0, 0, "$a")]);
    assert_eq!(expected, result);
}

#[test]
fn given_states_in_cycles_then_closure_includes_all_lookaheads() {
    let grammar = Grammar::new([
        Rule::new("C", ["A"]),
        Rule::new("A", ["B", "B"]),
        Rule::new("B", ["C"]),
        Rule::new("C", ["c"]),
        Rule::new("A", ["a"]),
        Rule::new("B", ["b"]),
    ]);
    let result = closure_for(&grammar, [rule_state(1, 1, "$")]);
    let expected = closure(&[
        (1, 1, "$"),
        (2, 0, "$cab"),
        (5, 0, "$cab"),
        (0, 0, "$cab"),
        (3, 0, "$cab"),
        (1, 0, "$cab"),
        (4, 0, "$cab"),
    ]);
    assert_eq!(expected, result);
}

#[test]
fn given_lookaheads_then_closure_merges_lookaheads() {
    let grammar = Grammar::new([
        Rule::new("A", ["a"]),
        Rule::new("A", ["B", "B"]),
        Rule::new("B", ["b"]),
        Rule::new("B", ["A", "B"]),
    ]);
    let result = closure_for(&grammar, [rule_state(1, 1, "xy")]);
    let expected = closure(&[
        (1, 1, "xy"),
        (2, 0, "xyba"),
        (3, 0, "xyba"),
        (0, 0, "ba"),
        (1, 0, "ba"),
    ]);
    assert_eq!(expected, result);
}

#[test]
fn closure_canonicalization_merges_equal_cores() {
    let result = Closure::canonical([rule_state(0, 0, "a"), rule_state(0, 0, "b")]);
    assert_eq!(1, result.len());
    assert!(result.contains(&rule_state(0, 0, "ab")));
}

#[test]
fn given_reducible_state_then_no_successor_for_it() {
    let grammar = Grammar::new([
        Rule::new("A", ["X", "a"]),
        Rule::new("A", ["A", "X"]),
        Rule::new("X", ["x"]),
    ]);
    let source = closure(&[(0, 1, "$"), (1, 1, "$"), (0, 2, "$")]);
    let successors = successors_for(&grammar, &source);
    assert_eq!(2, successors.len());
    assert_eq!(closure(&[(0, 2, "$")]), successors["a"]);
    assert_eq!(closure(&[(1, 2, "$")]), successors["X"]);
}

#[test]
fn given_start_state_then_start_item_of_augmented_grammar() {
    use crate::grammar::augment;
    let grammar = augment(&Grammar::new([Rule::new("A", ["a"])]), "A");
    let start = RuleState::start(&grammar);
    assert_eq!(RuleState::new(1, 0, [AUGMENTED_EOF]), start);
}

#[test]
#[should_panic]
fn given_non_augmented_grammar_then_no_start_state() {
    let grammar = Grammar::new([Rule::new("A", ["a"])]);
    RuleState::start(&grammar);
}

#[test]
fn display_marks_the_dot_and_lookaheads() {
    let grammar = Grammar::new([Rule::new("A", ["a", "B"]), Rule::new("B", ["b"])]);
    let state = rule_state(0, 1, "xy");
    assert_eq!("A -> a • B [x y]", state.display(&grammar).to_string());
}
