//! Two exact puzzle solvers.
//!
//! * Stone: find the one trajectory that meets every observed hailstone, by reducing the
//!   position/velocity/time equations to an exact linear system over rationals.
//! * Wires: cut a component graph at its minimum edge cut and measure the two halves.

pub mod common;
pub mod cut;
pub mod error;
pub mod hail;
pub mod linear;
pub mod model;
pub mod report;
pub mod solver;
pub mod system;
pub mod wires;

pub use cut::{connected_components, minimum_cut, minimum_edge_cut, split, Cut, Partition};
pub use error::{GraphError, ParseError};
pub use hail::{parse_hail, reference_hail, xy_crossings, Observation};
pub use model::Model;
pub use report::{CutReport, PartitionReport, StoneReport};
pub use solver::{check, SolveOutcome};
pub use system::{Equation, System, Var};
pub use wires::WireGraph;
