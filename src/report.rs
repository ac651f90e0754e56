use num_rational::BigRational;
use std::fmt::Display;

use crate::common::Axis;
use crate::cut::{Cut, Partition};
use crate::error::GraphError;
use crate::model::Model;
use crate::system::Var;

/// The stone trajectory as printed: six labelled components, then the position sum.
#[derive(Debug, Clone, PartialEq)]
pub struct StoneReport {
    pub position: [BigRational; 3],
    pub velocity: [BigRational; 3],
}

impl StoneReport {
    pub fn from_model(model: &Model<Var>) -> Option<Self> {
        let get = |var: Var| model.get(&var).cloned();
        Some(StoneReport {
            position: [
                get(Var::Position(Axis::X))?,
                get(Var::Position(Axis::Y))?,
                get(Var::Position(Axis::Z))?,
            ],
            velocity: [
                get(Var::Velocity(Axis::X))?,
                get(Var::Velocity(Axis::Y))?,
                get(Var::Velocity(Axis::Z))?,
            ],
        })
    }
    pub fn sum(&self) -> BigRational {
        self.position.iter().cloned().sum()
    }
}

impl Display for StoneReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let labels = ["X", "Y", "Z"];
        for (label, value) in labels.iter().zip(&self.position) {
            writeln!(f, "Stone {label}: {value}")?;
        }
        for (label, value) in labels.iter().zip(&self.velocity) {
            writeln!(f, "Stone {label} Velocity: {value}")?;
        }
        write!(f, "Sum: {}", self.sum())
    }
}

pub struct CutReport<'a>(pub &'a Cut);

impl Display for CutReport<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Left graph length: {}", self.0.source_side.len())?;
        writeln!(f, "Right graph length: {}", self.0.sink_side.len())?;
        write!(f, "Total: {}", self.0.product())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PartitionReport {
    pub total: usize,
}

impl PartitionReport {
    pub fn new(partition: &Partition) -> Result<Self, GraphError> {
        Ok(PartitionReport {
            total: partition.product()?,
        })
    }
}

impl Display for PartitionReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Total: {}", self.total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cut::{minimum_cut, split};
    use crate::wires::WireGraph;

    fn rat(n: i64) -> BigRational {
        BigRational::from_integer(n.into())
    }

    #[test]
    fn test_stone_report() {
        let model: Model<Var> = Var::STONE
            .into_iter()
            .zip([24, 13, 10, -3, 1, 2].map(rat))
            .chain([(Var::Time(0), rat(5))])
            .collect();
        let report = StoneReport::from_model(&model).unwrap();
        assert_eq!(
            report.to_string(),
            "Stone X: 24
Stone Y: 13
Stone Z: 10
Stone X Velocity: -3
Stone Y Velocity: 1
Stone Z Velocity: 2
Sum: 47"
        );
    }

    #[test]
    fn test_stone_report_keeps_fractions_exact() {
        let mut model: Model<Var> = Var::STONE.into_iter().map(|var| (var, rat(0))).collect();
        model.update(&Var::Position(Axis::Y), BigRational::new(1.into(), 3.into()));
        model.update(&Var::Position(Axis::Z), BigRational::new(1.into(), 6.into()));
        let report = StoneReport::from_model(&model).unwrap();
        assert!(report.to_string().contains("Stone Y: 1/3\n"));
        assert_eq!(report.sum(), BigRational::new(1.into(), 2.into()));
    }

    #[test]
    fn test_incomplete_model_has_no_report() {
        let model: Model<Var> = [(Var::Position(Axis::X), rat(1))].into_iter().collect();
        assert!(StoneReport::from_model(&model).is_none());
    }

    #[test]
    fn test_cut_and_partition_reports() {
        let wires = WireGraph::parse("a: b c\nb: c\nc: d\nd: e f\ne: f\nf: g").unwrap();
        let cut = minimum_cut(&wires, "a", "g").unwrap();
        assert_eq!(
            CutReport(&cut).to_string(),
            "Left graph length: 3\nRight graph length: 4\nTotal: 12"
        );
        let partition = split(wires).unwrap();
        assert_eq!(
            PartitionReport::new(&partition).unwrap().to_string(),
            "Total: 6"
        );
    }
}
