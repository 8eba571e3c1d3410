//! Configuration-space primitives: states, bounds, and the bounded space

use std::ops::{Add, Div, Mul, Sub};

/// State in an n-dimensional Euclidean configuration space.
///
/// Two states compare equal iff every component is bitwise equal.
#[derive(Debug, Clone, PartialEq)]
pub struct State {
    pub vals: Vec<f64>,
}

impl State {
    pub fn new(vals: Vec<f64>) -> Self {
        State { vals }
    }

    /// State at the origin of a `dim`-dimensional space.
    pub fn zeros(dim: usize) -> Self {
        State { vals: vec![0.0; dim] }
    }

    pub fn dim(&self) -> usize {
        self.vals.len()
    }

    /// Euclidean norm.
    pub fn norm(&self) -> f64 {
        self.vals.iter().map(|v| v * v).sum::<f64>().sqrt()
    }

    /// Euclidean distance to `other`.
    pub fn distance_from(&self, other: &State) -> f64 {
        debug_assert_eq!(self.dim(), other.dim());
        self.vals
            .iter()
            .zip(&other.vals)
            .map(|(a, b)| (a - b).powi(2))
            .sum::<f64>()
            .sqrt()
    }
}

impl From<Vec<f64>> for State {
    fn from(vals: Vec<f64>) -> Self {
        State { vals }
    }
}

impl From<&[f64]> for State {
    fn from(vals: &[f64]) -> Self {
        State { vals: vals.to_vec() }
    }
}

impl Add for &State {
    type Output = State;

    fn add(self, rhs: &State) -> State {
        debug_assert_eq!(self.dim(), rhs.dim());
        State::new(self.vals.iter().zip(&rhs.vals).map(|(a, b)| a + b).collect())
    }
}

impl Sub for &State {
    type Output = State;

    fn sub(self, rhs: &State) -> State {
        debug_assert_eq!(self.dim(), rhs.dim());
        State::new(self.vals.iter().zip(&rhs.vals).map(|(a, b)| a - b).collect())
    }
}

impl Mul<f64> for &State {
    type Output = State;

    fn mul(self, rhs: f64) -> State {
        State::new(self.vals.iter().map(|a| a * rhs).collect())
    }
}

/// Componentwise scalar division. Division by zero is the caller's bug.
impl Div<f64> for &State {
    type Output = State;

    fn div(self, rhs: f64) -> State {
        State::new(self.vals.iter().map(|a| a / rhs).collect())
    }
}

/// Closed interval of allowed values for one dimension.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bound {
    pub low: f64,
    pub high: f64,
}

impl Bound {
    pub fn new(low: f64, high: f64) -> Self {
        debug_assert!(low <= high);
        Bound { low, high }
    }
}

/// Bounded n-dimensional configuration space.
#[derive(Debug, Clone)]
pub struct Space {
    bounds: Vec<Bound>,
}

impl Space {
    pub fn new(bounds: Vec<Bound>) -> Self {
        Space { bounds }
    }

    pub fn dim(&self) -> usize {
        self.bounds.len()
    }

    pub fn bound(&self, i: usize) -> &Bound {
        &self.bounds[i]
    }
}
