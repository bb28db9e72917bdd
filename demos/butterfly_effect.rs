use butterfly::{
    prelude::*,
    util::{bench::Bench, frames},
};

fn main() {
    env_logger::init();

    let params = Parameters::default();
    let dt = 0.01;
    let steps = 3_000;

    let a = State::new(0.1, 0., 0.);
    let b = perturbed(a, Coordinate::X, 1e-5);
    let pair = generate_pair(a, b, params, dt, steps);

    let distances = pair.distances();
    for i in (0..=steps).step_by(250) {
        println!("t={:>5.2} distance={:.3e}", i as f64 * dt, distances[i]);
    }

    let report = pair.report();
    println!("\n{:#?}", report);

    Bench::score(&pair.a, &pair.b);

    let speeds = frames::speeds(&pair.a, &params);
    let fastest = butterfly::f::argmax(&speeds).unwrap_or(0);
    println!(
        "fastest point: t={:.2} state={:?} speed={:.1}",
        fastest as f64 * dt,
        pair.a.states()[fastest],
        speeds[fastest]
    );

    let window = frames::view_window(&pair.a, frames::DEFAULT_VIEW_WINDOW);
    let heads = frames::frame_indices(window.len(), 300);
    let (start, end) = frames::trail(heads.last().copied().unwrap_or(0), 300);
    println!(
        "{} frames over the last {} points, final trail [{}, {})",
        heads.len(),
        window.len(),
        start,
        end
    );

    // Render-loop style: poll a stepper five steps per tick.
    let mut stepper = Stepper::new(a, params, dt);
    for tick in 0..5 {
        let head = stepper.advance(5);
        println!("tick {} t={:.2} head={:?}", tick, stepper.time(), head);
    }
}
