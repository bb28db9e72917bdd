pub mod euler;
pub mod integrator;
pub mod rk4;

pub use euler::Euler;
pub use integrator::{Integrator, Scheme};
pub use rk4::{Rk4, step};
