//! Turning a trajectory into per-frame data for an external renderer.

use ndarray::Array1;

use crate::{
    envs::lorenz::{Parameters, derivatives},
    trajectory::Trajectory,
};

/// Trailing window shown live; older points stay in the trajectory.
pub const DEFAULT_VIEW_WINDOW: usize = 2_000;

/// The last `n` states (all of them when the trajectory is shorter).
pub fn view_window(traj: &Trajectory, n: usize) -> Trajectory {
    let start = traj.len().saturating_sub(n);
    Trajectory::from_parts(traj.dt(), traj.states()[start..].to_vec())
}

/// Points to skip per frame so `len` points fit in `total_frames`.
pub fn frame_stride(len: usize, total_frames: usize) -> usize {
    if total_frames == 0 {
        return 1;
    }
    (len / total_frames).max(1)
}

/// Index of the head point for every frame, clamped to the last point.
pub fn frame_indices(len: usize, total_frames: usize) -> Vec<usize> {
    if len == 0 {
        return vec![];
    }

    let stride = frame_stride(len, total_frames);
    (0..total_frames).map(|frame| (frame * stride).min(len - 1)).collect()
}

/// `[start, end)` of a trail of at most `tail` points ending at `head`.
pub fn trail(head: usize, tail: usize) -> (usize, usize) {
    (head.saturating_sub(tail), head)
}

/// Flow speed `|f(s)|` at every state.
pub fn speeds(traj: &Trajectory, params: &Parameters) -> Array1<f64> {
    traj.iter().map(|s| derivatives(s, params).norm()).collect()
}

/// Distance from the origin of every state.
pub fn magnitudes(traj: &Trajectory) -> Array1<f64> {
    traj.iter().map(|s| s.norm()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{envs::lorenz::State, trajectory::generate};

    #[test]
    fn window_keeps_tail() {
        let t = generate(State::new(1., 1., 1.), Parameters::default(), 0.01, 50);
        let w = view_window(&t, 10);
        assert_eq!(w.len(), 10);
        assert_eq!(w.last(), t.last());

        assert_eq!(view_window(&t, 1000).len(), 51);
    }

    #[test]
    fn stride_fits_frames() {
        assert_eq!(frame_stride(10_000, 300), 33);
        assert_eq!(frame_stride(100, 300), 1);
        assert_eq!(frame_stride(100, 0), 1);

        let idx = frame_indices(100, 300);
        assert_eq!(idx.len(), 300);
        assert_eq!(idx[99], 99);
        assert_eq!(idx[299], 99);
        assert!(frame_indices(0, 10).is_empty());
    }

    #[test]
    fn trail_clamps_at_start() {
        assert_eq!(trail(10, 3000), (0, 10));
        assert_eq!(trail(5000, 3000), (2000, 5000));
    }

    #[test]
    fn origin_has_zero_speed() {
        let t = generate(State::ORIGIN, Parameters::default(), 0.01, 3);
        assert!(speeds(&t, &Parameters::default()).iter().all(|v| *v == 0.));
        assert!(magnitudes(&t).iter().all(|v| *v == 0.));
    }
}
