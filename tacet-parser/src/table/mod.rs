use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{self, Display};

use crate::grammar::{Grammar, AUGMENTED_EOF, AUGMENTED_START};
use crate::graph::ClosureGraph;

/// One cell of the parse table. Shift/Goto carry a target state index;
/// Reduce/Accept carry a rule index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Shift(usize),
    Reduce(usize),
    Goto(usize),
    Accept(usize),
}

impl Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Shift(state) => write!(f, "shift {}", state),
            Action::Reduce(rule) => write!(f, "reduce {}", rule),
            Action::Goto(state) => write!(f, "goto {}", state),
            Action::Accept(rule) => write!(f, "accept {}", rule),
        }
    }
}

/// Two distinct actions were assigned to the same cell: the grammar is not
/// LR(1).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConflictError {
    row: usize,
    column: String,
    current: Action,
    conflicting: Action,
}

impl ConflictError {
    pub fn row(&self) -> usize {
        self.row
    }

    pub fn column(&self) -> &str {
        &self.column
    }
}

impl Display for ConflictError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "actions for state {} and symbol {:?} are {} and {}",
            self.row, self.column, self.current, self.conflicting
        )
    }
}

impl Error for ConflictError {}

/// Action/GOTO table indexed by `(state row, symbol column)`. Columns cover
/// every grammar symbol plus the end-of-input terminal, but not the
/// synthetic start symbol.
#[derive(Debug, Clone)]
pub struct ParseTable {
    columns: BTreeMap<String, Vec<Option<Action>>>,
}

impl ParseTable {
    pub fn new(num_rows: usize, symbols: &[&str]) -> Self {
        let mut columns = BTreeMap::new();
        for symbol in symbols.iter().copied().chain(std::iter::once(AUGMENTED_EOF)) {
            if symbol != AUGMENTED_START {
                columns
                    .entry(symbol.to_string())
                    .or_insert_with(|| vec![None; num_rows]);
            }
        }
        ParseTable { columns }
    }

    pub fn num_rows(&self) -> usize {
        // the end-of-input column always exists
        self.columns[AUGMENTED_EOF].len()
    }

    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    /// The action at `(row, column)`. Unknown columns yield `None` like any
    /// other empty cell.
    pub fn action(&self, row: usize, column: &str) -> Option<&Action> {
        self.columns
            .get(column)
            .and_then(|cells| cells.get(row))
            .and_then(|cell| cell.as_ref())
    }

    /// Writes a cell. Re-writing an equal action is idempotent; writing a
    /// different one surfaces the shift/reduce or reduce/reduce conflict.
    pub fn set_action(
        &mut self,
        row: usize,
        column: &str,
        action: Action,
    ) -> Result<(), ConflictError> {
        let cells = match self.columns.get_mut(column) {
            Some(cells) => cells,
            None => panic!("unknown symbol {:?}", column),
        };
        match &cells[row] {
            None => {
                cells[row] = Some(action);
                Ok(())
            }
            Some(current) if *current == action => Ok(()),
            Some(current) => Err(ConflictError {
                row,
                column: column.to_string(),
                current: *current,
                conflicting: action,
            }),
        }
    }
}

impl Display for ParseTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let widths: Vec<usize> = self
            .columns
            .keys()
            .map(|column| column.len().max(5))
            .collect();
        write!(f, "{:>4}", "")?;
        for (column, width) in self.columns.keys().zip(&widths) {
            write!(f, "|{:<width$}", column, width = *width)?;
        }
        for row in 0..self.num_rows() {
            writeln!(f)?;
            write!(f, "{:>4}", row)?;
            for (cells, width) in self.columns.values().zip(&widths) {
                let text = match cells[row] {
                    Some(Action::Shift(state)) => format!("s{}", state),
                    Some(Action::Reduce(rule)) => format!("r{}", rule),
                    Some(Action::Goto(state)) => format!("g{}", state),
                    Some(Action::Accept(rule)) => format!("a{}", rule),
                    None => String::new(),
                };
                write!(f, "|{:<width$}", text, width = *width)?;
            }
        }
        Ok(())
    }
}

/// Derives the parse table of an augmented grammar from its closure graph.
/// Fails with [`ConflictError`] on the first cell that would hold two
/// distinct actions.
pub fn table_for(grammar: &Grammar, graph: &ClosureGraph) -> Result<ParseTable, ConflictError> {
    let mut table = ParseTable::new(graph.num_closures(), &grammar.symbols());
    for (row, closure) in graph.closures().iter().enumerate() {
        for state in closure.iter() {
            let rule = grammar.rule_at(state.rule_index());
            if state.is_reducible(grammar) {
                if rule.key() == AUGMENTED_START {
                    table.set_action(row, AUGMENTED_EOF, Action::Accept(state.rule_index()))?;
                } else {
                    for column in state.lookaheads() {
                        table.set_action(row, column, Action::Reduce(state.rule_index()))?;
                    }
                }
            } else {
                let column = state.next_symbol(grammar).unwrap();
                // every symbol after a dot has an out-edge in the graph
                let target = graph.successor(row, column).unwrap();
                let action = if grammar.is_terminal(column) {
                    Action::Shift(target)
                } else {
                    Action::Goto(target)
                };
                table.set_action(row, column, action)?;
            }
        }
    }
    Ok(table)
}
