use std::collections::VecDeque;

use log::{debug, trace};
use rand::{Rng, distr::Uniform};

use crate::{
    envs::lorenz::{Parameters, State},
    error::{LorenzError, Result},
    integrate::{Integrator, Scheme},
    trajectory::Trajectory,
};

pub const DEFAULT_MAX_POINTS: usize = 10_000;

/// Interactive session: run, pause, reset and perturb a single trajectory.
///
/// History is bounded by `max_points`; once full, the oldest points are
/// dropped while simulated time keeps increasing.
#[derive(Debug, Clone)]
pub struct Simulator {
    pub params: Parameters,
    pub dt: f64,
    pub scheme: Scheme,

    max_points: usize,
    states: VecDeque<State>,
    times: VecDeque<f64>,
    steps_taken: usize,
}

impl Simulator {
    pub fn new(initial: State, params: Parameters, dt: f64) -> Self {
        let mut sim = Self {
            params,
            dt,
            scheme: Scheme::Rk4,
            max_points: DEFAULT_MAX_POINTS,
            states: VecDeque::new(),
            times: VecDeque::new(),
            steps_taken: 0,
        };
        sim.reset(initial);
        sim
    }

    /// Caps the history at `max_points` (at least one point is kept).
    pub fn with_max_points(mut self, max_points: usize) -> Self {
        self.max_points = max_points.max(1);
        self.trim();
        self
    }

    pub fn with_scheme(mut self, scheme: Scheme) -> Self {
        self.scheme = scheme;
        self
    }

    /// Restart from `initial` at time 0.
    pub fn reset(&mut self, initial: State) {
        debug!("simulator reset to {:?}", initial);
        self.states.clear();
        self.times.clear();
        self.states.push_back(initial);
        self.times.push_back(0.);
        self.steps_taken = 0;
    }

    /// Restart from the current state plus a uniform random offset in
    /// `[-epsilon, epsilon]` on every coordinate.
    pub fn perturb(&mut self, epsilon: f64, rng: &mut impl Rng) -> Result<State> {
        if !epsilon.is_finite() || epsilon < 0. {
            return Err(LorenzError::invalid(
                "epsilon",
                epsilon,
                "must be finite and non-negative",
            ));
        }

        // the sampler needs a finite range width, 2 * epsilon
        let uniform = Uniform::new_inclusive(-epsilon, epsilon).map_err(|_| {
            LorenzError::invalid("epsilon", epsilon, "range width overflows")
        })?;

        let offset = State::new(rng.sample(&uniform), rng.sample(&uniform), rng.sample(&uniform));
        let initial = self.current() + offset;

        debug!("simulator perturbed by {:?}", offset);
        self.reset(initial);
        Ok(initial)
    }

    /// Swap coefficients mid-run. History is kept and subsequent steps use
    /// the new values; call [`Simulator::reset`] for a clean restart.
    pub fn set_params(&mut self, params: Parameters) {
        debug!("simulator params {:?} -> {:?}", self.params, params);
        self.params = params;
    }

    /// Advance `n` steps from the most recent state.
    pub fn step(&mut self, n: usize) -> State {
        let mut state = self.current();
        let mut t = self.time();

        for _ in 0..n {
            state = self.scheme.step(state, &self.params, self.dt);
            t += self.dt;
            self.states.push_back(state);
            self.times.push_back(t);
        }

        self.steps_taken += n;
        self.trim();

        trace!("simulator at t={:.3} state={:?}", t, state);
        state
    }

    pub fn max_points(&self) -> usize {
        self.max_points
    }

    fn trim(&mut self) {
        while self.states.len() > self.max_points.max(1) {
            self.states.pop_front();
            self.times.pop_front();
        }
    }

    pub fn current(&self) -> State {
        // reset() leaves one point and trim() keeps at least one
        self.states.back().copied().unwrap_or_default()
    }

    pub fn time(&self) -> f64 {
        self.times.back().copied().unwrap_or(0.)
    }

    pub fn steps_taken(&self) -> usize {
        self.steps_taken
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn history(&self) -> impl ExactSizeIterator<Item = &State> + '_ {
        self.states.iter()
    }

    pub fn times(&self) -> impl ExactSizeIterator<Item = &f64> + '_ {
        self.times.iter()
    }

    /// Copy of the retained history. Its own time axis starts at the oldest
    /// retained point; see [`Simulator::times`] for absolute times.
    pub fn trajectory(&self) -> Trajectory {
        Trajectory::from_parts(self.dt, self.states.iter().copied().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trajectory;
    use rand::{SeedableRng, rngs::StdRng};

    fn sim() -> Simulator {
        Simulator::new(State::new(0.1, 0., 0.), Parameters::default(), 0.01)
    }

    #[test]
    fn step_matches_generate() {
        let mut s = sim();
        s.step(5);
        s.step(5);

        let t = trajectory::generate(State::new(0.1, 0., 0.), Parameters::default(), 0.01, 10);
        assert_eq!(s.trajectory(), t);
        assert_eq!(s.steps_taken(), 10);
        assert!((s.time() - 0.1).abs() < 1e-12);
    }

    #[test]
    fn history_is_capped() {
        let mut s = sim().with_max_points(100);
        let last = s.step(250);

        assert_eq!(s.len(), 100);
        assert_eq!(s.times().len(), 100);
        assert_eq!(s.current(), last);
        assert!((s.time() - 2.5).abs() < 1e-9);
        assert!((s.times().next().copied().unwrap() - 1.51).abs() < 1e-9);
    }

    #[test]
    fn reset_clears_history() {
        let mut s = sim();
        s.step(20);
        s.reset(State::new(1., 2., 3.));

        assert_eq!(s.len(), 1);
        assert_eq!(s.current(), State::new(1., 2., 3.));
        assert_eq!(s.time(), 0.);
        assert_eq!(s.steps_taken(), 0);
    }

    #[test]
    fn perturb_stays_within_epsilon() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut s = sim();
        let before = s.step(300);

        let after = s.perturb(1e-2, &mut rng).unwrap();
        assert!((after - before).max_abs() <= 1e-2);
        assert_eq!(s.len(), 1);
        assert_eq!(s.current(), after);
    }

    #[test]
    fn perturb_rejects_negative_epsilon() {
        let mut rng = StdRng::seed_from_u64(7);
        assert!(sim().perturb(-1., &mut rng).is_err());
        assert!(sim().perturb(f64::NAN, &mut rng).is_err());
    }

    #[test]
    fn zero_epsilon_restarts_in_place() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut s = sim();
        let before = s.step(10);
        assert_eq!(s.perturb(0., &mut rng).unwrap(), before);
    }

    #[test]
    fn set_params_applies_to_later_steps_only() {
        let mut s = sim();
        s.step(10);
        let kept = s.trajectory();

        s.set_params(Parameters::new(10., 14., 8. / 3.));
        s.step(10);

        assert_eq!(&s.trajectory().states()[..11], kept.states());

        let mut fresh = sim();
        fresh.step(20);
        assert_ne!(fresh.current(), s.current());
    }

    #[test]
    fn perturb_rejects_overflowing_range() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut s = sim();
        let before = s.step(10);

        assert!(matches!(
            s.perturb(f64::MAX, &mut rng),
            Err(LorenzError::InvalidParameter { name: "epsilon", .. })
        ));
        assert_eq!(s.current(), before);
        assert_eq!(s.len(), 11);
    }

    #[test]
    fn zero_cap_still_keeps_the_head() {
        let mut s = sim().with_max_points(0);
        assert_eq!(s.max_points(), 1);

        let last = s.step(10);
        assert_eq!(s.len(), 1);
        assert_eq!(s.current(), last);
        assert!((s.time() - 0.1).abs() < 1e-12);
    }
}
