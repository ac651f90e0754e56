use itertools::Itertools;
use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{Signed, Zero};
use std::fmt::Display;
use tracing::debug;

use crate::common::{vec3, Vec3};
use crate::error::ParseError;

/// A hailstone sighting: where it was and how it moves per time unit.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Observation {
    pub position: Vec3,
    pub velocity: Vec3,
}

impl Observation {
    pub fn new(position: Vec3, velocity: Vec3) -> Self {
        Observation { position, velocity }
    }
}

impl Display for Observation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let [px, py, pz] = &self.position;
        let [vx, vy, vz] = &self.velocity;
        write!(f, "{px}, {py}, {pz} @ {vx}, {vy}, {vz}")
    }
}

/// The three sightings the stone solver runs on when no input is given.
pub fn reference_hail() -> Vec<Observation> {
    vec![
        Observation::new(
            vec3(275325627102914, 177556324137106, 279758114394131),
            vec3(249, 405, -531),
        ),
        Observation::new(
            vec3(284428334220238, 231958436807561, 189800593445547),
            vec3(237, 140, -111),
        ),
        Observation::new(
            vec3(208260774362545, 354915461185166, 308973039318009),
            vec3(128, -159, -65),
        ),
    ]
}

fn parse_triple(text: &str, line: usize) -> Result<Vec3, ParseError> {
    let fields: Vec<&str> = text.split(',').map(str::trim).collect();
    let Some((x, y, z)) = fields.iter().copied().collect_tuple() else {
        return Err(ParseError::FieldCount {
            line,
            found: fields.len(),
        });
    };
    let parse = |value: &str| {
        value
            .parse::<BigInt>()
            .map_err(|_| ParseError::InvalidNumber {
                line,
                value: value.to_owned(),
            })
    };
    Ok([parse(x)?, parse(y)?, parse(z)?])
}

pub fn parse_observation(text: &str, line: usize) -> Result<Observation, ParseError> {
    let Some((position, velocity)) = text.split_once(" @ ") else {
        return Err(ParseError::MissingSeparator {
            line,
            separator: " @ ",
        });
    };
    Ok(Observation::new(
        parse_triple(position, line)?,
        parse_triple(velocity, line)?,
    ))
}

/// Parses one `px, py, pz @ vx, vy, vz` record per non-blank line.
pub fn parse_hail(input: &str) -> Result<Vec<Observation>, ParseError> {
    let hail: Vec<Observation> = input
        .lines()
        .enumerate()
        .filter(|(_, text)| !text.trim().is_empty())
        .map(|(index, text)| parse_observation(text, index + 1))
        .collect::<Result<_, _>>()?;
    if hail.is_empty() {
        return Err(ParseError::Empty);
    }
    debug!(count = hail.len(), "parsed hail");
    Ok(hail)
}

// a + s * da == b + u * db, solved in the xy plane
fn xy_crossing(a: &Observation, b: &Observation) -> Option<[BigRational; 2]> {
    let da = &a.velocity;
    let db = &b.velocity;
    let denominator = &da[0] * &db[1] - &da[1] * &db[0];
    if denominator.is_zero() {
        return None;
    }
    let rx = &b.position[0] - &a.position[0];
    let ry = &b.position[1] - &a.position[1];
    let s = BigRational::new(&rx * &db[1] - &ry * &db[0], denominator.clone());
    let u = BigRational::new(&rx * &da[1] - &ry * &da[0], denominator);
    if s.is_negative() || u.is_negative() {
        return None;
    }
    let at = |axis: usize| {
        BigRational::from_integer(a.position[axis].clone())
            + &s * BigRational::from_integer(da[axis].clone())
    };
    Some([at(0), at(1)])
}

/// Counts pairs of hailstones whose future xy paths cross inside `[min, max]` on both axes.
pub fn xy_crossings(hail: &[Observation], min: &BigInt, max: &BigInt) -> usize {
    let min = BigRational::from_integer(min.clone());
    let max = BigRational::from_integer(max.clone());
    hail.iter()
        .tuple_combinations()
        .filter_map(|(a, b)| xy_crossing(a, b))
        .filter(|point| point.iter().all(|c| *c >= min && *c <= max))
        .count()
}
