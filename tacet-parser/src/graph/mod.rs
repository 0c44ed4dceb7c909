use std::collections::HashMap;
use std::fmt::{self, Display};

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction::Outgoing;

use crate::closure::{closure_for, successors_for, Closure, RuleState};
use crate::grammar::Grammar;

/// The canonical LR(1) collection: an insertion-ordered set of closures
/// plus, per source closure, at most one `symbol -> target` edge per symbol.
#[derive(Debug)]
pub struct ClosureGraph {
    graph: DiGraph<(), String>,
    closures: Vec<Closure>,
    indexes: HashMap<Closure, usize>,
}

impl ClosureGraph {
    pub fn new() -> Self {
        ClosureGraph {
            graph: DiGraph::new(),
            closures: Vec::new(),
            indexes: HashMap::new(),
        }
    }

    pub fn closures(&self) -> &[Closure] {
        &self.closures
    }

    pub fn num_closures(&self) -> usize {
        self.closures.len()
    }

    pub fn num_edges(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn contains(&self, closure: &Closure) -> bool {
        self.indexes.contains_key(closure)
    }

    pub fn index_of(&self, closure: &Closure) -> Option<usize> {
        self.indexes.get(closure).copied()
    }

    /// Adds a closure unless already present; returns its index either way.
    pub fn add_closure(&mut self, closure: Closure) -> usize {
        if let Some(index) = self.indexes.get(&closure) {
            return *index;
        }
        let node = self.graph.add_node(());
        // nodes are only ever added, so node indices match insertion order
        debug_assert_eq!(node.index(), self.closures.len());
        self.indexes.insert(closure.clone(), node.index());
        self.closures.push(closure);
        node.index()
    }

    /// Adds `source -> target` labelled with `symbol`, inserting both
    /// closures if needed. A source may have only one edge per symbol.
    pub fn add_edge(&mut self, source: Closure, symbol: impl Into<String>, target: Closure) {
        let symbol = symbol.into();
        let source = self.add_closure(source);
        let target = self.add_closure(target);
        assert!(
            self.successor(source, &symbol).is_none(),
            "duplicate edge for symbol {:?}",
            symbol
        );
        self.graph
            .add_edge(NodeIndex::new(source), NodeIndex::new(target), symbol);
    }

    pub fn successor(&self, source: usize, symbol: &str) -> Option<usize> {
        self.graph
            .edges_directed(NodeIndex::new(source), Outgoing)
            .find(|edge| edge.weight() == symbol)
            .map(|edge| edge.target().index())
    }

    pub fn display<'a>(&'a self, grammar: &'a Grammar) -> ClosureGraphDisplay<'a> {
        ClosureGraphDisplay {
            graph: self,
            grammar,
        }
    }
}

impl Default for ClosureGraph {
    fn default() -> Self {
        ClosureGraph::new()
    }
}

/// Lists every closure with its index and items.
pub struct ClosureGraphDisplay<'a> {
    graph: &'a ClosureGraph,
    grammar: &'a Grammar,
}

impl Display for ClosureGraphDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, closure) in self.graph.closures().iter().enumerate() {
            if index > 0 {
                writeln!(f)?;
                writeln!(f)?;
            }
            write!(f, "CLOSURE {}:\n{}", index, closure.display(self.grammar))?;
        }
        Ok(())
    }
}

/// Builds the closure graph of an augmented grammar. The closure of the
/// start item always ends up at index 0.
pub fn graph_for(grammar: &Grammar) -> ClosureGraph {
    assert!(grammar.is_augmented(), "grammar must be augmented");
    let mut graph = ClosureGraph::new();
    let mut fringe = vec![closure_for(grammar, [RuleState::start(grammar)])];
    while let Some(source) = fringe.pop() {
        graph.add_closure(source.clone());
        for (symbol, target) in successors_for(grammar, &source) {
            if !graph.contains(&target) && !fringe.contains(&target) {
                fringe.push(target.clone());
            }
            graph.add_edge(source.clone(), symbol, target);
        }
    }
    graph
}
