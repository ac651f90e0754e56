use thiserror::Error;

/// Errors raised while reading hail records or wiring diagrams.
///
/// Line numbers are 1-based.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("line {line}: missing separator {separator:?}")]
    MissingSeparator { line: usize, separator: &'static str },

    #[error("line {line}: expected 3 comma-separated values, got {found}")]
    FieldCount { line: usize, found: usize },

    #[error("line {line}: invalid integer {value:?}")]
    InvalidNumber { line: usize, value: String },

    #[error("line {line}: empty node name")]
    EmptyName { line: usize },

    #[error("input contains no records")]
    Empty,
}

/// Errors raised by cut and partition queries on a wiring graph.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("node {0:?} is not in the graph")]
    UnknownNode(String),

    #[error("source and sink are both {0:?}")]
    SameTerminal(String),

    #[error("a cut needs at least two nodes, graph has {0}")]
    TooSmall(usize),

    #[error("expected exactly two components after the cut, found {0}")]
    ComponentCount(usize),
}
