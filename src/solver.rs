use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Zero};
use tracing::{debug, warn};

use crate::common::{cross, sub, unit, Axis, Vec3};
use crate::hail::Observation;
use crate::linear::{LinearSystem, Reduction};
use crate::model::Model;
use crate::system::{System, Var};

#[derive(Debug, Clone, PartialEq)]
pub enum SolveOutcome {
    Sat(Model<Var>),
    Unsat,
    Unknown(String),
}

impl SolveOutcome {
    pub fn model(&self) -> Option<&Model<Var>> {
        match self {
            SolveOutcome::Sat(model) => Some(model),
            _ => None,
        }
    }
}

fn rat(n: &BigInt) -> BigRational {
    BigRational::from_integer(n.clone())
}

// (p - h_i) x (v - w_i) == 0 for every i; subtracting the identity of `base` cancels p x v:
// p x (w_i - w_0) + (h_i - h_0) x v == h_i x w_i - h_0 x w_0
fn push_pair_rows(rows: &mut LinearSystem, base: &Observation, other: &Observation) {
    let dw = sub(&other.velocity, &base.velocity);
    let dh = sub(&other.position, &base.position);
    let rhs = sub(
        &cross(&other.position, &other.velocity),
        &cross(&base.position, &base.velocity),
    );
    let p_columns: Vec<Vec3> = Axis::ALL.iter().map(|&j| cross(&unit(j), &dw)).collect();
    let v_columns: Vec<Vec3> = Axis::ALL.iter().map(|&j| cross(&dh, &unit(j))).collect();
    for k in Axis::ALL {
        let k = k.index();
        let coefficients = p_columns
            .iter()
            .chain(&v_columns)
            .map(|column| rat(&column[k]))
            .collect();
        rows.push_row(coefficients, rat(&rhs[k]));
    }
}

// p + v t == h + w t; any axis with v != w pins t
fn recover_time(obs: &Observation, p: &[BigRational], v: &[BigRational]) -> BigRational {
    Axis::ALL
        .iter()
        .map(|axis| axis.index())
        .find_map(|k| {
            let closing = &v[k] - rat(&obs.velocity[k]);
            if closing.is_zero() {
                None
            } else {
                Some((rat(&obs.position[k]) - &p[k]) / closing)
            }
        })
        .unwrap_or_else(BigRational::zero)
}

// stone meets observation i at time i: p + v i == h_i + w_i i, linear once the times are fixed
fn pinned_times(observations: &[Observation]) -> Option<Model<Var>> {
    let mut rows = LinearSystem::new(Var::STONE.len());
    for (i, obs) in observations.iter().enumerate() {
        let t = BigInt::from(i);
        for axis in Axis::ALL {
            let k = axis.index();
            let mut coefficients = vec![BigRational::zero(); Var::STONE.len()];
            coefficients[k] = BigRational::one();
            coefficients[k + 3] = rat(&t);
            rows.push_row(coefficients, rat(&(&obs.position[k] + &obs.velocity[k] * &t)));
        }
    }
    let stone = match rows.reduce() {
        Reduction::Unique(stone) | Reduction::Underdetermined { particular: stone, .. } => stone,
        Reduction::Inconsistent => return None,
    };
    let times = (0..observations.len()).map(|i| (Var::Time(i), rat(&BigInt::from(i))));
    Some(Var::STONE.into_iter().zip(stone).chain(times).collect())
}

/// Finds the stone trajectory satisfying every equation of `system`, exactly.
///
/// The bilinear system is reduced to a linear one in the six stone unknowns. A unique candidate
/// is checked against every equation of the system before it is reported as a model. A rank
/// below six means many trajectories may fit; one is sought with the collision times fixed to
/// `0, 1, 2, ...`, and the outcome is `Unknown` only when that trajectory fails the system.
pub fn check(system: &System) -> SolveOutcome {
    let observations = system.observations();
    let Some((base, rest)) = observations.split_first() else {
        return SolveOutcome::Unknown("no observations".to_owned());
    };
    let mut rows = LinearSystem::new(Var::STONE.len());
    for other in rest {
        push_pair_rows(&mut rows, base, other);
    }
    debug!(rows = rows.len(), "reducing stone system");
    let stone = match rows.reduce() {
        Reduction::Unique(stone) => stone,
        Reduction::Inconsistent => {
            debug!("linear reduction is inconsistent");
            return SolveOutcome::Unsat;
        }
        Reduction::Underdetermined { rank, .. } => {
            debug!(rank, "stone system is underdetermined, fixing collision times");
            return match pinned_times(observations) {
                Some(model) if system.check_model(&model) => SolveOutcome::Sat(model),
                _ => {
                    warn!(rank, "stone system is underdetermined");
                    SolveOutcome::Unknown(format!(
                        "observations determine only {rank} of 6 stone unknowns"
                    ))
                }
            };
        }
    };
    let (p, v) = stone.split_at(3);
    let mut model: Model<Var> = Var::STONE.into_iter().zip(stone.iter().cloned()).collect();
    for (i, obs) in observations.iter().enumerate() {
        let t = recover_time(obs, p, v);
        debug!(observation = i, time = %t, "recovered collision time");
        model.update(&Var::Time(i), t);
    }
    if !system.check_model(&model) {
        debug!("unique candidate fails the stone equations");
        return SolveOutcome::Unsat;
    }
    SolveOutcome::Sat(model)
}
