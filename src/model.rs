use num_rational::BigRational;
use std::collections::HashMap;

use crate::common::VarId;
use crate::system::{Equation, Var};

/// An exact assignment of values to unknowns.
#[derive(Debug, Clone, PartialEq)]
pub struct Model<T: VarId>(HashMap<T, BigRational>);

impl<T: VarId> Model<T> {
    pub fn new() -> Model<T> {
        Model(HashMap::new())
    }
    pub fn update(&mut self, var: &T, val: BigRational) {
        self.0.insert(var.clone(), val);
    }
    pub fn get(&self, var: &T) -> Option<&BigRational> {
        self.0.get(var)
    }
    pub fn len(&self) -> usize {
        self.0.len()
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Model<Var> {
    /// False when the equation does not hold or one of its unknowns is unassigned.
    pub fn check_equation(&self, equation: &Equation) -> bool {
        let [p, v, t] = equation.vars();
        let (Some(p), Some(v), Some(t)) = (self.get(&p), self.get(&v), self.get(&t)) else {
            return false;
        };
        let hail_p = BigRational::from_integer(equation.position.clone());
        let hail_v = BigRational::from_integer(equation.velocity.clone());
        p + v * t == hail_p + hail_v * t
    }
}

impl<T: VarId> FromIterator<(T, BigRational)> for Model<T> {
    fn from_iter<I: IntoIterator<Item = (T, BigRational)>>(iter: I) -> Self {
        Model(HashMap::from_iter(iter))
    }
}

impl<T: VarId> Default for Model<T> {
    fn default() -> Self {
        Self::new()
    }
}
