//! Two trajectories advanced in lockstep from nearby initial conditions.
//!
//! Index `i` of both trajectories sits at the same simulated time, so the
//! per-index distance shows how fast the perturbation grows.

use log::{debug, info};
use ndarray::Array1;
use serde::{Deserialize, Serialize};

use crate::{
    envs::lorenz::{Parameters, State},
    f,
    integrate::{Integrator, Rk4},
    trajectory::{Trajectory, generate_with},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Coordinate {
    X,
    Y,
    Z,
}

/// `state` with `epsilon` added to one coordinate. Canonically x + 1e-5.
pub fn perturbed(state: State, coordinate: Coordinate, epsilon: f64) -> State {
    let mut out = state;
    match coordinate {
        Coordinate::X => out.x += epsilon,
        Coordinate::Y => out.y += epsilon,
        Coordinate::Z => out.z += epsilon,
    }
    out
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DivergencePair {
    pub params: Parameters,
    pub a: Trajectory,
    pub b: Trajectory,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DivergenceReport {
    pub initial_distance: f64,
    pub final_distance: f64,
    pub max_distance: Option<f64>,
    /// Index of the largest distance.
    pub max_index: Option<usize>,
    /// `final / initial`; `None` when the two runs start at the same point.
    pub growth_ratio: Option<f64>,
    /// Finite-time estimate `ln(final / initial) / t_end` of the largest
    /// Lyapunov exponent.
    pub lyapunov_estimate: Option<f64>,
}

impl DivergencePair {
    pub fn len(&self) -> usize {
        self.a.len()
    }

    pub fn is_empty(&self) -> bool {
        self.a.is_empty()
    }

    pub fn dt(&self) -> f64 {
        self.a.dt()
    }

    /// Euclidean distance between corresponding states.
    pub fn distances(&self) -> Array1<f64> {
        f::pairwise_l2(&self.a.to_array(), &self.b.to_array())
    }

    pub fn distance_at(&self, i: usize) -> Option<f64> {
        Some(self.a.get(i)?.distance(self.b.get(i)?))
    }

    pub fn report(&self) -> DivergenceReport {
        let distances = self.distances();
        let initial = distances.first().copied().unwrap_or(0.);
        let last = distances.last().copied().unwrap_or(0.);

        let growth_ratio = (initial > 0.).then(|| last / initial);
        let t_end = self.a.steps() as f64 * self.dt();
        let lyapunov_estimate = growth_ratio
            .filter(|r| *r > 0. && r.is_finite() && t_end > 0.)
            .map(|r| r.ln() / t_end);

        DivergenceReport {
            initial_distance: initial,
            final_distance: last,
            max_distance: f::nan_max(&distances),
            max_index: f::argmax(&distances),
            growth_ratio,
            lyapunov_estimate,
        }
    }
}

/// Two RK4 chains sharing `params`, `dt` and `steps`.
pub fn generate_pair(
    initial_a: State,
    initial_b: State,
    params: Parameters,
    dt: f64,
    steps: usize,
) -> DivergencePair {
    generate_pair_with(&Rk4, initial_a, initial_b, params, dt, steps)
}

pub fn generate_pair_with<I>(
    integrator: &I,
    initial_a: State,
    initial_b: State,
    params: Parameters,
    dt: f64,
    steps: usize,
) -> DivergencePair
where
    I: Integrator + Sync,
{
    debug!(
        "generating divergence pair: a={:?} b={:?} distance={:e}",
        initial_a,
        initial_b,
        initial_a.distance(&initial_b)
    );

    let run = |initial| generate_with(integrator, initial, params, dt, steps);

    #[cfg(feature = "parallel")]
    let (a, b) = rayon::join(|| run(initial_a), || run(initial_b));

    #[cfg(not(feature = "parallel"))]
    let (a, b) = (run(initial_a), run(initial_b));

    let pair = DivergencePair { params, a, b };

    if let Some(d) = pair.distance_at(steps) {
        info!("divergence after {} steps: {:e}", steps, d);
    }

    pair
}

/// Runs both chains on the calling thread.
pub fn generate_pair_sequential(
    initial_a: State,
    initial_b: State,
    params: Parameters,
    dt: f64,
    steps: usize,
) -> DivergencePair {
    DivergencePair {
        params,
        a: generate_with(&Rk4, initial_a, params, dt, steps),
        b: generate_with(&Rk4, initial_b, params, dt, steps),
    }
}
