use log::{debug, warn};
use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};

use crate::{
    envs::lorenz::{Parameters, State},
    error::{LorenzError, Result},
    integrate::{Integrator, Rk4},
};

/// Time-ordered states produced by repeated integration. Index 0 is the
/// initial condition, index `i` sits at simulated time `i * dt`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trajectory {
    dt: f64,
    states: Vec<State>,
}

impl Trajectory {
    pub(crate) fn from_parts(dt: f64, states: Vec<State>) -> Self {
        Self { dt, states }
    }

    pub fn dt(&self) -> f64 {
        self.dt
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Number of integration steps, one less than the number of states.
    pub fn steps(&self) -> usize {
        self.states.len().saturating_sub(1)
    }

    pub fn states(&self) -> &[State] {
        &self.states
    }

    pub fn get(&self, i: usize) -> Option<&State> {
        self.states.get(i)
    }

    pub fn first(&self) -> Option<&State> {
        self.states.first()
    }

    pub fn last(&self) -> Option<&State> {
        self.states.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, State> {
        self.states.iter()
    }

    pub fn is_finite(&self) -> bool {
        self.states.iter().all(State::is_finite)
    }

    pub fn xs(&self) -> Array1<f64> {
        self.states.iter().map(|s| s.x).collect()
    }

    pub fn ys(&self) -> Array1<f64> {
        self.states.iter().map(|s| s.y).collect()
    }

    pub fn zs(&self) -> Array1<f64> {
        self.states.iter().map(|s| s.z).collect()
    }

    pub fn times(&self) -> Array1<f64> {
        (0..self.states.len()).map(|i| i as f64 * self.dt).collect()
    }

    /// Shape `(len, 3)`, one row per state.
    pub fn to_array(&self) -> Array2<f64> {
        let mut out = Array2::zeros((self.states.len(), 3));
        for (mut row, s) in out.rows_mut().into_iter().zip(self.states.iter()) {
            row[0] = s.x;
            row[1] = s.y;
            row[2] = s.z;
        }
        out
    }

    pub fn into_states(self) -> Vec<State> {
        self.states
    }
}

impl<'a> IntoIterator for &'a Trajectory {
    type Item = &'a State;
    type IntoIter = std::slice::Iter<'a, State>;

    fn into_iter(self) -> Self::IntoIter {
        self.states.iter()
    }
}

/// `steps + 1` states from `initial` using RK4.
pub fn generate(initial: State, params: Parameters, dt: f64, steps: usize) -> Trajectory {
    generate_with(&Rk4, initial, params, dt, steps)
}

pub fn generate_with(
    integrator: &impl Integrator,
    initial: State,
    params: Parameters,
    dt: f64,
    steps: usize,
) -> Trajectory {
    debug!(
        "generating trajectory: initial={:?} params={:?} dt={} steps={}",
        initial, params, dt, steps
    );

    let mut states = Vec::with_capacity(steps + 1);
    states.push(initial);

    let mut state = initial;
    for _ in 0..steps {
        state = integrator.step(state, &params, dt);
        states.push(state);
    }

    if !state.is_finite() {
        warn!("trajectory left the finite range after {} steps", steps);
    }

    Trajectory::from_parts(dt, states)
}

/// Checks a step configuration before integrating.
pub fn validate_inputs(initial: &State, params: &Parameters, dt: f64) -> Result<()> {
    for (name, value) in [("x0", initial.x), ("y0", initial.y), ("z0", initial.z)] {
        if !value.is_finite() {
            return Err(LorenzError::invalid(name, value, "must be finite"));
        }
    }

    params.validate()?;

    if !dt.is_finite() || dt <= 0. {
        return Err(LorenzError::invalid("dt", dt, "must be finite and positive"));
    }

    Ok(())
}

/// Like [`generate_with`], but fails fast on non-finite input or a
/// non-positive `dt`.
pub fn generate_checked(
    integrator: &impl Integrator,
    initial: State,
    params: Parameters,
    dt: f64,
    steps: usize,
) -> Result<Trajectory> {
    validate_inputs(&initial, &params, dt)?;
    Ok(generate_with(integrator, initial, params, dt, steps))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::integrate::{Euler, Scheme};

    #[test]
    fn zero_steps_is_initial_only() {
        let initial = State::new(1., 2., 3.);
        let t = generate(initial, Parameters::default(), 0.01, 0);
        assert_eq!(t.states(), &[initial]);
        assert_eq!(t.steps(), 0);
    }

    #[test]
    fn columns_and_array_agree() {
        let t = generate(State::new(1., 1., 1.), Parameters::default(), 0.01, 20);
        let a = t.to_array();

        assert_eq!(a.dim(), (21, 3));
        assert_eq!(a.column(0).to_owned(), t.xs());
        assert_eq!(a.column(1).to_owned(), t.ys());
        assert_eq!(a.column(2).to_owned(), t.zs());
        assert!((t.times()[20] - 0.2).abs() < 1e-12);
    }

    #[test]
    fn scheme_dispatch_matches_concrete_integrator() {
        let initial = State::new(0.1, 0., 0.);
        let a = generate_with(&Scheme::Euler, initial, Parameters::default(), 0.01, 100);
        let b = generate_with(&Euler, initial, Parameters::default(), 0.01, 100);
        assert_eq!(a, b);
    }

    #[test]
    fn checked_rejects_bad_dt() {
        let res = generate_checked(&Rk4, State::new(1., 1., 1.), Parameters::default(), 0., 10);
        assert!(matches!(
            res,
            Err(LorenzError::InvalidParameter { name: "dt", .. })
        ));

        let res = generate_checked(
            &Rk4,
            State::new(1., 1., 1.),
            Parameters::default(),
            f64::INFINITY,
            10,
        );
        assert!(res.is_err());
    }

    #[test]
    fn checked_rejects_non_finite_initial_state() {
        let res = generate_checked(
            &Rk4,
            State::new(f64::NAN, 0., 0.),
            Parameters::default(),
            0.01,
            10,
        );
        assert!(matches!(
            res,
            Err(LorenzError::InvalidParameter { name: "x0", .. })
        ));
    }

    #[test]
    fn checked_matches_unchecked_on_valid_input() {
        let initial = State::new(1., 1., 1.);
        let a = generate_checked(&Rk4, initial, Parameters::default(), 0.01, 50).unwrap();
        let b = generate(initial, Parameters::default(), 0.01, 50);
        assert_eq!(a, b);
    }
}
