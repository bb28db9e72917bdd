//! butterfly CLI: generate Lorenz trajectories and write them out for a
//! renderer.
//!
//! Usage:
//!   butterfly trajectory --steps 10000 --format csv --out lorenz.csv
//!   butterfly pair --epsilon 1e-5 --steps 3000 --format json
//!   butterfly simulate --ticks 400 --steps-per-tick 5 --perturb-every 100

use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::PathBuf,
};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use env_logger::Env;
use log::info;
use rand::{SeedableRng, rngs::StdRng};

use butterfly::{
    config::RunConfig,
    divergence::{Coordinate, generate_pair_with, perturbed},
    integrate::Scheme,
    simulator::Simulator,
    trajectory::generate_checked,
    util::{bench::Bench, export},
};

#[derive(Parser)]
#[command(name = "butterfly", version, about = "Lorenz attractor trajectories and divergence")]
struct Cli {
    /// TOML run configuration; flags override its values
    #[arg(long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Integrate one trajectory
    Trajectory {
        #[command(flatten)]
        run: RunArgs,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Integrate two trajectories from nearby starts and track their distance
    Pair {
        #[command(flatten)]
        run: RunArgs,
        /// Offset added to the second start
        #[arg(long, allow_negative_numbers = true)]
        epsilon: Option<f64>,
        /// Coordinate receiving the offset
        #[arg(long, value_enum, default_value_t = CoordinateArg::X)]
        axis: CoordinateArg,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Drive an interactive-style session tick by tick
    Simulate {
        #[command(flatten)]
        run: RunArgs,
        /// Number of ticks to run
        #[arg(long, default_value = "400")]
        ticks: usize,
        /// Integration steps per tick
        #[arg(long)]
        steps_per_tick: Option<usize>,
        /// History cap
        #[arg(long)]
        max_points: Option<usize>,
        /// Perturb and restart every N ticks (0 disables)
        #[arg(long, default_value = "0")]
        perturb_every: usize,
        /// Perturbation half-width
        #[arg(long, allow_negative_numbers = true)]
        epsilon: Option<f64>,
        /// Seed for perturbations
        #[arg(long, default_value = "42")]
        seed: u64,
        #[command(flatten)]
        output: OutputArgs,
    },
}

#[derive(Args)]
struct RunArgs {
    #[arg(long)]
    sigma: Option<f64>,
    #[arg(long)]
    rho: Option<f64>,
    #[arg(long)]
    beta: Option<f64>,
    /// Time step
    #[arg(long)]
    dt: Option<f64>,
    /// Number of integration steps
    #[arg(long)]
    steps: Option<usize>,
    #[arg(long, allow_hyphen_values = true)]
    x0: Option<f64>,
    #[arg(long, allow_hyphen_values = true)]
    y0: Option<f64>,
    #[arg(long, allow_hyphen_values = true)]
    z0: Option<f64>,
    #[arg(long, value_enum)]
    scheme: Option<SchemeArg>,
}

impl RunArgs {
    fn apply(&self, config: &mut RunConfig) {
        let overrides = [
            (&mut config.sigma, self.sigma),
            (&mut config.rho, self.rho),
            (&mut config.beta, self.beta),
            (&mut config.dt, self.dt),
            (&mut config.x0, self.x0),
            (&mut config.y0, self.y0),
            (&mut config.z0, self.z0),
        ];
        for (slot, value) in overrides {
            if let Some(v) = value {
                *slot = v;
            }
        }

        if let Some(steps) = self.steps {
            config.steps = steps;
        }
        if let Some(scheme) = self.scheme {
            config.scheme = scheme.into();
        }
    }
}

#[derive(Args)]
struct OutputArgs {
    #[arg(long, value_enum, default_value_t = Format::Csv)]
    format: Format,
    /// Output file (stdout if omitted)
    #[arg(short, long, value_name = "FILE")]
    out: Option<PathBuf>,
}

impl OutputArgs {
    fn writer(&self) -> Result<Box<dyn Write>> {
        Ok(match &self.out {
            Some(path) => Box::new(BufWriter::new(
                File::create(path).with_context(|| format!("create {}", path.display()))?,
            )),
            None => Box::new(BufWriter::new(io::stdout().lock())),
        })
    }
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum Format {
    Csv,
    Json,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum SchemeArg {
    Rk4,
    Euler,
}

impl From<SchemeArg> for Scheme {
    fn from(s: SchemeArg) -> Self {
        match s {
            SchemeArg::Rk4 => Scheme::Rk4,
            SchemeArg::Euler => Scheme::Euler,
        }
    }
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum CoordinateArg {
    X,
    Y,
    Z,
}

impl From<CoordinateArg> for Coordinate {
    fn from(c: CoordinateArg) -> Self {
        match c {
            CoordinateArg::X => Coordinate::X,
            CoordinateArg::Y => Coordinate::Y,
            CoordinateArg::Z => Coordinate::Z,
        }
    }
}

fn load_config(path: &Option<PathBuf>, run: &RunArgs) -> Result<RunConfig> {
    let mut config = match path {
        Some(p) => RunConfig::load(p).with_context(|| format!("load config {}", p.display()))?,
        None => RunConfig::default(),
    };
    run.apply(&mut config);
    config.validate().context("invalid run configuration")?;
    Ok(config)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Trajectory { run, output } => {
            let config = load_config(&cli.config, &run)?;
            let traj = generate_checked(
                &config.scheme,
                config.initial(),
                config.params(),
                config.dt,
                config.steps,
            )?;
            info!(
                "{} states, max |coord| = {:.3}",
                traj.len(),
                Bench::max_abs_coordinate(&traj)
            );

            let w = output.writer()?;
            match output.format {
                Format::Csv => export::write_trajectory_csv(w, &traj)?,
                Format::Json => export::write_json(w, &traj)?,
            }
        }
        Commands::Pair {
            run,
            epsilon,
            axis,
            output,
        } => {
            let mut config = load_config(&cli.config, &run)?;
            if let Some(e) = epsilon {
                config.epsilon = e;
            }
            config.validate()?;

            let a = config.initial();
            let b = perturbed(a, axis.into(), config.epsilon);
            let pair = generate_pair_with(&config.scheme, a, b, config.params(), config.dt, config.steps);

            let report = pair.report();
            info!(
                "distance {:e} -> {:e}, lyapunov estimate {:?}",
                report.initial_distance, report.final_distance, report.lyapunov_estimate
            );

            let w = output.writer()?;
            match output.format {
                Format::Csv => export::write_pair_csv(w, &pair)?,
                Format::Json => export::write_json(
                    w,
                    &serde_json::json!({ "pair": pair, "report": report }),
                )?,
            }
        }
        Commands::Simulate {
            run,
            ticks,
            steps_per_tick,
            max_points,
            perturb_every,
            epsilon,
            seed,
            output,
        } => {
            let mut config = load_config(&cli.config, &run)?;
            if let Some(n) = steps_per_tick {
                config.steps_per_tick = n;
            }
            if let Some(n) = max_points {
                config.max_points = n;
            }
            if let Some(e) = epsilon {
                config.epsilon = e;
            }
            config.validate()?;

            let mut rng = StdRng::seed_from_u64(seed);
            let mut sim = Simulator::new(config.initial(), config.params(), config.dt)
                .with_scheme(config.scheme)
                .with_max_points(config.max_points);

            for tick in 1..=ticks {
                sim.step(config.steps_per_tick);
                if perturb_every > 0 && tick % perturb_every == 0 {
                    let restart = sim.perturb(config.epsilon.abs(), &mut rng)?;
                    info!("tick {}: perturbed, restarting from {:?}", tick, restart);
                }
            }
            info!("{} points retained at t = {:.2}", sim.len(), sim.time());

            let w = output.writer()?;
            match output.format {
                Format::Csv => export::write_states_csv(w, sim.times().copied(), sim.history())?,
                Format::Json => export::write_json(w, &sim.trajectory())?,
            }
        }
    }

    Ok(())
}
