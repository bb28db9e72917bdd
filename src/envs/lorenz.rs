use std::ops::{Add, Mul, Sub};

use ndarray::Array1;
use serde::{Deserialize, Serialize};

use crate::error::{LorenzError, Result};

/// A point in Lorenz phase space.
///
/// `x` is the convective overturning rate, `y` the horizontal temperature
/// variation and `z` the vertical temperature variation.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct State {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl State {
    pub const ORIGIN: State = State {
        x: 0.,
        y: 0.,
        z: 0.,
    };

    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn norm(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    pub fn distance(&self, other: &State) -> f64 {
        (*self - *other).norm()
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    /// Largest absolute coordinate.
    pub fn max_abs(&self) -> f64 {
        self.x.abs().max(self.y.abs()).max(self.z.abs())
    }

    pub fn to_array(&self) -> Array1<f64> {
        Array1::from(vec![self.x, self.y, self.z])
    }

    pub fn coords(&self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }
}

impl Add for State {
    type Output = State;

    fn add(self, rhs: State) -> State {
        State::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for State {
    type Output = State;

    fn sub(self, rhs: State) -> State {
        State::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f64> for State {
    type Output = State;

    fn mul(self, k: f64) -> State {
        State::new(self.x * k, self.y * k, self.z * k)
    }
}

impl From<[f64; 3]> for State {
    fn from(v: [f64; 3]) -> Self {
        State::new(v[0], v[1], v[2])
    }
}

impl TryFrom<&Array1<f64>> for State {
    type Error = LorenzError;

    fn try_from(v: &Array1<f64>) -> Result<Self> {
        if v.len() != 3 {
            return Err(LorenzError::DimensionMismatch {
                expected: 3,
                got: v.len(),
            });
        }

        Ok(State::new(v[0], v[1], v[2]))
    }
}

/// Lorenz coefficients, fixed for the lifetime of a trajectory.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Parameters {
    pub sigma: f64,
    pub rho: f64,
    pub beta: f64,
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            sigma: 10.0,
            rho: 28.0,
            beta: 8.0 / 3.0,
        }
    }
}

impl Parameters {
    pub fn new(sigma: f64, rho: f64, beta: f64) -> Self {
        Self { sigma, rho, beta }
    }

    /// Rejects non-finite coefficients. Signs are not checked, negative
    /// coefficients still define a (non-physical) flow.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [("sigma", self.sigma), ("rho", self.rho), ("beta", self.beta)] {
            if !value.is_finite() {
                return Err(LorenzError::invalid(name, value, "must be finite"));
            }
        }

        Ok(())
    }

    /// Equilibria of the flow: the origin, plus C+ and C- once rho > 1.
    pub fn fixed_points(&self) -> Vec<State> {
        if self.rho <= 1.0 {
            return vec![State::ORIGIN];
        }

        let c = (self.beta * (self.rho - 1.0)).sqrt();
        vec![
            State::ORIGIN,
            State::new(c, c, self.rho - 1.0),
            State::new(-c, -c, self.rho - 1.0),
        ]
    }
}

/// Right-hand side of the Lorenz equations.
pub fn derivatives(state: &State, params: &Parameters) -> State {
    let State { x, y, z } = *state;

    State {
        x: params.sigma * (y - x),
        y: x * (params.rho - z) - y,
        z: x * y - params.beta * z,
    }
}
