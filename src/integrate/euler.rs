use crate::envs::lorenz::{Parameters, State, derivatives};

use super::integrator::Integrator;

/// Forward Euler. First order, kept for comparison against RK4.
#[derive(Debug, Clone, Copy, Default)]
pub struct Euler;

impl Integrator for Euler {
    fn step(&self, state: State, params: &Parameters, dt: f64) -> State {
        state + derivatives(&state, params) * dt
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::integrate::rk4;

    #[test]
    fn matches_hand_computed_step() {
        let params = Parameters::default();
        let s = Euler.step(State::new(1., 1., 1.), &params, 0.01);

        // f(1,1,1) = (0, 26, 1 - 8/3)
        assert_eq!(s.x, 1.);
        assert!((s.y - 1.26).abs() < 1e-12);
        assert!((s.z - (1. + 0.01 * (1. - 8. / 3.))).abs() < 1e-12);
    }

    #[test]
    fn close_to_rk4_over_one_small_step() {
        let params = Parameters::default();
        let s = State::new(1., 1., 1.);
        let dt = 1e-3;

        let e = Euler.step(s, &params, dt);
        let r = rk4::step(s, &params, dt);

        // local error of Euler is O(dt^2)
        assert!(e.distance(&r) < 1e-3);
    }
}
