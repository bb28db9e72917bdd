use crate::{
    envs::lorenz::{Parameters, State},
    integrate::{Integrator, Rk4},
};

/// Incremental step generator a render loop can poll.
///
/// Each `next()` advances one fixed step and yields the new state, so a
/// frame tick can pull one or a few states without re-entering shared
/// state. The iterator never ends; bound it with `take`.
#[derive(Debug, Clone)]
pub struct Stepper<I: Integrator = Rk4> {
    integrator: I,
    params: Parameters,
    dt: f64,
    current: State,
    steps_taken: usize,
}

impl Stepper<Rk4> {
    pub fn new(initial: State, params: Parameters, dt: f64) -> Self {
        Self::with_integrator(Rk4, initial, params, dt)
    }
}

impl<I: Integrator> Stepper<I> {
    pub fn with_integrator(integrator: I, initial: State, params: Parameters, dt: f64) -> Self {
        Self {
            integrator,
            params,
            dt,
            current: initial,
            steps_taken: 0,
        }
    }

    pub fn current(&self) -> State {
        self.current
    }

    pub fn params(&self) -> &Parameters {
        &self.params
    }

    pub fn dt(&self) -> f64 {
        self.dt
    }

    pub fn steps_taken(&self) -> usize {
        self.steps_taken
    }

    /// Simulated time of `current()`.
    pub fn time(&self) -> f64 {
        self.steps_taken as f64 * self.dt
    }

    /// Advances `n` steps and returns the state reached.
    pub fn advance(&mut self, n: usize) -> State {
        for _ in 0..n {
            self.step_once();
        }
        self.current
    }

    fn step_once(&mut self) -> State {
        self.current = self.integrator.step(self.current, &self.params, self.dt);
        self.steps_taken += 1;
        self.current
    }
}

impl<I: Integrator> Iterator for Stepper<I> {
    type Item = State;

    fn next(&mut self) -> Option<State> {
        Some(self.step_once())
    }
}
