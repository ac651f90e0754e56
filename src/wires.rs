use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;
use std::collections::HashMap;
use tracing::debug;

use crate::error::ParseError;

pub const UNIT_CAPACITY: i64 = 1;

/// Undirected simple graph of named components; every wire carries unit capacity.
#[derive(Clone, Debug, Default)]
pub struct WireGraph {
    graph: UnGraph<String, i64>,
    index: HashMap<String, NodeIndex>,
}

impl WireGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses one `node: neighbor neighbor ...` record per line.
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        let mut wires = WireGraph::new();
        for (i, line) in input.trim().lines().enumerate() {
            let line_no = i + 1;
            let Some((left, right)) = line.trim_end().split_once(": ") else {
                return Err(ParseError::MissingSeparator {
                    line: line_no,
                    separator: ": ",
                });
            };
            let left = left.trim();
            if left.is_empty() {
                return Err(ParseError::EmptyName { line: line_no });
            }
            for to in right.split_whitespace() {
                wires.add_edge(left, to);
            }
        }
        if wires.node_count() == 0 {
            return Err(ParseError::Empty);
        }
        debug!(
            nodes = wires.node_count(),
            edges = wires.edge_count(),
            "parsed wiring"
        );
        Ok(wires)
    }

    pub fn add_node(&mut self, name: &str) -> NodeIndex {
        if let Some(&node) = self.index.get(name) {
            return node;
        }
        let node = self.graph.add_node(name.to_owned());
        self.index.insert(name.to_owned(), node);
        node
    }

    /// Returns false for self-loops and wires that already exist.
    pub fn add_edge(&mut self, a: &str, b: &str) -> bool {
        let a = self.add_node(a);
        let b = self.add_node(b);
        if a == b || self.graph.find_edge(a, b).is_some() {
            return false;
        }
        self.graph.add_edge(a, b, UNIT_CAPACITY);
        true
    }

    pub fn remove_edge(&mut self, a: &str, b: &str) -> bool {
        let (Some(a), Some(b)) = (self.node_index(a), self.node_index(b)) else {
            return false;
        };
        match self.graph.find_edge(a, b) {
            Some(edge) => self.graph.remove_edge(edge).is_some(),
            None => false,
        }
    }

    pub fn node_index(&self, name: &str) -> Option<NodeIndex> {
        self.index.get(name).copied()
    }
    pub fn name(&self, node: NodeIndex) -> &str {
        &self.graph[node]
    }
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }
    pub fn nodes(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph.node_indices()
    }
    pub fn neighbors(&self, node: NodeIndex) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph.neighbors(node)
    }
    pub fn degree(&self, node: NodeIndex) -> usize {
        self.graph.neighbors(node).count()
    }
    /// `(a, b, capacity)` once per wire.
    pub fn edges(&self) -> impl Iterator<Item = (NodeIndex, NodeIndex, i64)> + '_ {
        self.graph
            .edge_references()
            .map(|edge| (edge.source(), edge.target(), *edge.weight()))
    }
}
