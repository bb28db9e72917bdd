//! Numerical core of the Lorenz system: a fixed-step RK4 integrator,
//! trajectory generation and the two-trajectory divergence comparison
//! behind the butterfly effect.
//!
//! ```
//! use butterfly::prelude::*;
//!
//! let params = Parameters::default();
//! let a = State::new(1., 1., 1.);
//! let b = perturbed(a, Coordinate::X, 1e-5);
//!
//! let pair = generate_pair(a, b, params, 0.01, 3000);
//! assert!(pair.report().final_distance > 1.0);
//! ```

pub mod config;
pub mod divergence;
pub mod envs;
pub mod error;
pub mod f;
pub mod integrate;
pub mod simulator;
pub mod stepper;
pub mod trajectory;
pub mod util;

pub mod prelude {
    pub use crate::divergence::{
        Coordinate, DivergencePair, DivergenceReport, generate_pair, generate_pair_with, perturbed,
    };
    pub use crate::envs::lorenz::{Parameters, State, derivatives};
    pub use crate::error::{LorenzError, Result};
    pub use crate::integrate::{Euler, Integrator, Rk4, Scheme, step};
    pub use crate::simulator::Simulator;
    pub use crate::stepper::Stepper;
    pub use crate::trajectory::{Trajectory, generate, generate_checked, generate_with};
}
