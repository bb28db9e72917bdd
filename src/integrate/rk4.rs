use crate::envs::lorenz::{Parameters, State, derivatives};

use super::integrator::Integrator;

/// Classic explicit fourth-order Runge-Kutta.
#[derive(Debug, Clone, Copy, Default)]
pub struct Rk4;

impl Integrator for Rk4 {
    fn step(&self, state: State, params: &Parameters, dt: f64) -> State {
        step(state, params, dt)
    }
}

/// One RK4 step of the Lorenz flow. Never fails: a `dt` that is too large
/// or degenerate coefficients produce inf/NaN coordinates, which are
/// returned as is.
pub fn step(state: State, params: &Parameters, dt: f64) -> State {
    let half = 0.5 * dt;

    let k1 = derivatives(&state, params);
    let k2 = derivatives(&(state + k1 * half), params);
    let k3 = derivatives(&(state + k2 * half), params);
    let k4 = derivatives(&(state + k3 * dt), params);

    state + (k1 + k2 * 2. + k3 * 2. + k4) * (dt / 6.)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origin_is_fixed() {
        let next = step(State::ORIGIN, &Parameters::default(), 0.01);
        assert_eq!(next, State::ORIGIN);
    }

    #[test]
    fn zero_dt_is_identity() {
        let s = State::new(1., 2., 3.);
        assert_eq!(step(s, &Parameters::default(), 0.), s);
    }

    #[test]
    fn huge_dt_is_not_an_error() {
        let mut s = State::new(1., 1., 1.);
        for _ in 0..50 {
            s = step(s, &Parameters::default(), 10.);
        }
        assert!(!s.is_finite());
    }
}
