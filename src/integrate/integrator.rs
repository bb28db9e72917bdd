use serde::{Deserialize, Serialize};

use crate::envs::lorenz::{Parameters, State};

use super::{euler::Euler, rk4::Rk4};

/// Fixed-step scheme advancing a Lorenz state by one increment of `dt`.
pub trait Integrator {
    fn step(&self, state: State, params: &Parameters, dt: f64) -> State;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scheme {
    #[default]
    Rk4,
    Euler,
}

impl Integrator for Scheme {
    fn step(&self, state: State, params: &Parameters, dt: f64) -> State {
        match self {
            Scheme::Rk4 => Rk4.step(state, params, dt),
            Scheme::Euler => Euler.step(state, params, dt),
        }
    }
}

impl<I: Integrator + ?Sized> Integrator for &I {
    fn step(&self, state: State, params: &Parameters, dt: f64) -> State {
        (**self).step(state, params, dt)
    }
}
