use std::error::Error;
use std::fmt::{self, Display};

use tacet_ast::Node;

use crate::grammar::{Grammar, Rule, AUGMENTED_EOF};
use crate::table::{Action, ParseTable};

/// A parse attempt failed. The driver performs no error recovery; the
/// first failure is final.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParserError {
    /// No action for the current token in the current state.
    UnexpectedToken { token: Node },
    /// No action for the end of input in the current state.
    UnexpectedEndOfInput,
    /// A reduction asked for more nodes than the stack holds.
    TooFewNodes { rule: Rule },
    /// A popped node did not match the rule symbol at its position.
    UnexpectedNode { rule: Rule, key: String },
    /// The stack held more than the result when the accept action fired.
    UnprocessedNodes { keys: Vec<String> },
}

impl Display for ParserError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParserError::UnexpectedToken { token } => match token.token() {
                Some(t) => write!(
                    f,
                    "{}:{} unexpected token: {:?}",
                    t.line(),
                    t.column(),
                    t.value()
                ),
                None => write!(f, "unexpected token: {:?}", token.key()),
            },
            ParserError::UnexpectedEndOfInput => write!(f, "unexpected end of input"),
            ParserError::TooFewNodes { rule } => {
                write!(f, "unable to apply rule {}: too few nodes", rule)
            }
            ParserError::UnexpectedNode { rule, key } => {
                write!(f, "unable to apply rule {}: unexpected node {:?}", rule, key)
            }
            ParserError::UnprocessedNodes { keys } => {
                write!(f, "found unprocessed nodes: {}", keys.join(" "))
            }
        }
    }
}

impl Error for ParserError {}

/// Runs the shift/reduce loop over `tokens` and returns the parse tree.
/// A virtual end-of-input token follows the last real one; it is consulted
/// for actions but never shifted onto the stack.
pub fn parse(tokens: &[Node], grammar: &Grammar, table: &ParseTable) -> Result<Node, ParserError> {
    assert!(table.num_rows() > 0, "table must not be empty");
    let mut stack: Vec<(usize, Node)> = Vec::new();
    let mut row = 0;
    let mut index = 0;
    loop {
        let key = match tokens.get(index) {
            Some(token) => token.key(),
            None => AUGMENTED_EOF,
        };
        match table.action(row, key) {
            None if index < tokens.len() => {
                return Err(ParserError::UnexpectedToken {
                    token: tokens[index].clone(),
                })
            }
            None => return Err(ParserError::UnexpectedEndOfInput),
            Some(Action::Accept(_)) => break,
            Some(Action::Shift(target)) => {
                stack.push((row, tokens[index].clone()));
                row = *target;
                index += 1;
            }
            Some(Action::Goto(target)) => row = *target,
            Some(Action::Reduce(rule_index)) => {
                let rule = grammar.rule_at(*rule_index);
                let (head_row, node) = reduce(&mut stack, rule)?;
                row = head_row;
                let key = node.key().to_string();
                stack.push((row, node));
                match table.action(row, &key) {
                    Some(Action::Goto(target)) => row = *target,
                    action => panic!("expected goto for {:?} but was {:?}", key, action),
                }
            }
        }
    }
    if stack.len() != 1 {
        return Err(ParserError::UnprocessedNodes {
            keys: stack.iter().map(|(_, node)| node.key().to_string()).collect(),
        });
    }
    let (_, node) = stack.pop().unwrap();
    Ok(node)
}

/// Pops one node per rule symbol and seals them into a fresh branch. The
/// returned row is the state below the popped nodes.
fn reduce(stack: &mut Vec<(usize, Node)>, rule: &Rule) -> Result<(usize, Node), ParserError> {
    let arity = rule.symbols().len();
    if arity > stack.len() {
        return Err(ParserError::TooFewNodes { rule: rule.clone() });
    }
    let head = stack.split_off(stack.len() - arity);
    let row = head[0].0;
    let mut children = Vec::with_capacity(arity);
    for (symbol, (_, node)) in rule.symbols().iter().zip(head) {
        if symbol != node.key() {
            return Err(ParserError::UnexpectedNode {
                rule: rule.clone(),
                key: node.key().to_string(),
            });
        }
        children.push(node);
    }
    Ok((row, Node::branch(rule.key(), children)))
}
