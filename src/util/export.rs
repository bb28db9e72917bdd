use std::io::Write;

use serde::Serialize;

use crate::{
    divergence::DivergencePair, envs::lorenz::State, error::Result, trajectory::Trajectory,
};

/// Rows of `t,x,y,z`.
pub fn write_states_csv<'a, W: Write>(
    w: W,
    times: impl IntoIterator<Item = f64>,
    states: impl IntoIterator<Item = &'a State>,
) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(w);
    wtr.write_record(["t", "x", "y", "z"])?;

    for (t, s) in times.into_iter().zip(states) {
        wtr.write_record([t, s.x, s.y, s.z].map(|v| v.to_string()))?;
    }

    wtr.flush()?;
    Ok(())
}

pub fn write_trajectory_csv<W: Write>(w: W, traj: &Trajectory) -> Result<()> {
    write_states_csv(w, traj.times().iter().copied(), traj.iter())
}

/// Rows of `t,x_a,y_a,z_a,x_b,y_b,z_b,distance`.
pub fn write_pair_csv<W: Write>(w: W, pair: &DivergencePair) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(w);
    wtr.write_record(["t", "x_a", "y_a", "z_a", "x_b", "y_b", "z_b", "distance"])?;

    let distances = pair.distances();
    for (i, (a, b)) in pair.a.iter().zip(pair.b.iter()).enumerate() {
        let t = i as f64 * pair.dt();
        wtr.write_record([t, a.x, a.y, a.z, b.x, b.y, b.z, distances[i]].map(|v| v.to_string()))?;
    }

    wtr.flush()?;
    Ok(())
}

/// Pretty JSON followed by a newline. Flushes `w`, so write errors surface
/// here and not when a buffered writer is dropped.
pub fn write_json<W: Write, T: Serialize + ?Sized>(mut w: W, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut w, value)?;
    w.write_all(b"\n")?;
    w.flush()?;
    Ok(())
}
