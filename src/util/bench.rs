use ndarray::Array1;

use crate::{f, trajectory::Trajectory};

/// Comparison metrics between trajectories of equal length.
pub struct Bench {}

impl Bench {
    fn deltas(a: &Trajectory, b: &Trajectory) -> Array1<f64> {
        assert_eq!(a.len(), b.len(), "trajectories differ in length");
        f::pairwise_l2(&a.to_array(), &b.to_array())
    }

    pub fn max_abs_error(a: &Trajectory, b: &Trajectory) -> f64 {
        assert_eq!(a.len(), b.len(), "trajectories differ in length");
        (&a.to_array() - &b.to_array())
            .mapv(f64::abs)
            .fold(0., |acc: f64, v| acc.max(*v))
    }

    pub fn rmse(a: &Trajectory, b: &Trajectory) -> f64 {
        let d = Bench::deltas(a, b);
        if d.is_empty() {
            return 0.;
        }
        d.mapv(|v| v.powi(2)).mean().unwrap_or(0.).sqrt()
    }

    /// Largest absolute coordinate over the whole trajectory.
    pub fn max_abs_coordinate(t: &Trajectory) -> f64 {
        t.iter().map(|s| s.max_abs()).fold(0., f64::max)
    }

    pub fn score(a: &Trajectory, b: &Trajectory) {
        println!("\n=== Trajectory Comparison ===");
        println!("points      = {}", a.len());
        println!("max |err|   = {:.6e}", Bench::max_abs_error(a, b));
        println!("rmse        = {:.6e}", Bench::rmse(a, b));
        println!("max |coord| = {:.3}", Bench::max_abs_coordinate(a));
    }
}
