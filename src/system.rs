use num_bigint::BigInt;
use std::fmt::Display;
use tracing::debug;

use crate::common::Axis;
use crate::hail::Observation;
use crate::model::Model;

/// An unknown of the stone system.
#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub enum Var {
    Position(Axis),
    Velocity(Axis),
    Time(usize),
}

impl Var {
    pub const STONE: [Var; 6] = [
        Var::Position(Axis::X),
        Var::Position(Axis::Y),
        Var::Position(Axis::Z),
        Var::Velocity(Axis::X),
        Var::Velocity(Axis::Y),
        Var::Velocity(Axis::Z),
    ];
}

impl Display for Var {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Var::Position(axis) => write!(f, "{axis}"),
            Var::Velocity(axis) => write!(f, "{axis}v"),
            Var::Time(i) => write!(f, "t{i}"),
        }
    }
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Equation {
    // stone[axis] + stone_v[axis] * t == position + velocity * t
    pub axis: Axis,
    pub observation: usize,
    pub position: BigInt,
    pub velocity: BigInt,
}

impl Equation {
    pub fn time(&self) -> Var {
        Var::Time(self.observation)
    }
    pub fn vars(&self) -> [Var; 3] {
        [
            Var::Position(self.axis),
            Var::Velocity(self.axis),
            self.time(),
        ]
    }
}

impl Display for Equation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let [p, v, t] = self.vars();
        write!(
            f,
            "{p} + {v}*{t} == {} + {}*{t}",
            self.position, self.velocity
        )
    }
}

/// The conjunction of equalities tying one shared stone trajectory to every observation.
///
/// Built once from the observations, with three equations and one private time unknown per
/// observation. Solvability is not checked here.
#[derive(Clone, Debug)]
pub struct System {
    observations: Vec<Observation>,
    equations: Vec<Equation>,
}

impl System {
    pub fn new(observations: Vec<Observation>) -> Self {
        let equations: Vec<Equation> = observations
            .iter()
            .enumerate()
            .flat_map(|(i, obs)| {
                Axis::ALL.into_iter().map(move |axis| Equation {
                    axis,
                    observation: i,
                    position: obs.position[axis.index()].clone(),
                    velocity: obs.velocity[axis.index()].clone(),
                })
            })
            .collect();
        debug!(
            observations = observations.len(),
            equations = equations.len(),
            "assembled stone system"
        );
        System {
            observations,
            equations,
        }
    }
    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }
    pub fn equations(&self) -> impl Iterator<Item = &Equation> + '_ {
        self.equations.iter()
    }
    pub fn unknowns(&self) -> Vec<Var> {
        Var::STONE
            .into_iter()
            .chain((0..self.observations.len()).map(Var::Time))
            .collect()
    }
    pub fn check_model(&self, model: &Model<Var>) -> bool {
        self.equations().all(|equation| model.check_equation(equation))
    }
}
