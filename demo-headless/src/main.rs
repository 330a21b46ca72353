//! Headless heat diffusion demo
//!
//! Runs the full time march without any terminal rendering and reports
//! interior temperature statistics at a configurable interval. Useful for
//! benchmarking the solver and for checking parameter sets before pointing
//! the terminal demo at them.
//!
//! Logging is controlled with `RUST_LOG`, e.g.
//! `RUST_LOG=heat_sim_core=debug cargo run --package demo-headless`.

use std::process::ExitCode;

use clap::Parser;
use heat_sim_core::{HeatSolver, SimulationConfig, TemperatureField};
use tracing_subscriber::EnvFilter;

/// Heat diffusion batch runner with configurable parameters
#[derive(Parser, Debug)]
#[command(name = "heat-sim-headless")]
#[command(about = "2D transient heat diffusion, batch mode", long_about = None)]
struct Args {
    /// Thermal diffusivity in m²/s (default: steel with 1% carbon)
    #[arg(short, long, default_value_t = 1.172e-5)]
    k: f64,

    /// Plate length in meters
    #[arg(long, default_value_t = 0.5)]
    lx: f64,

    /// Plate width in meters
    #[arg(long, default_value_t = 0.5)]
    ly: f64,

    /// Grid resolution in x
    #[arg(long, default_value_t = 80)]
    nx: usize,

    /// Grid resolution in y
    #[arg(long, default_value_t = 24)]
    ny: usize,

    /// Timestep in seconds
    #[arg(long, default_value_t = 0.1)]
    dt: f64,

    /// Final simulated time in seconds
    #[arg(long, default_value_t = 10000.0)]
    tf: f64,

    /// Initial plate temperature in Kelvin
    #[arg(long, default_value_t = 273.0)]
    temp0: f64,

    /// Top boundary temperature in Kelvin
    #[arg(long, default_value_t = 1000.0)]
    temp_top: f64,

    /// Bottom boundary temperature in Kelvin
    #[arg(long, default_value_t = 273.0)]
    temp_bottom: f64,

    /// Left boundary temperature in Kelvin
    #[arg(long, default_value_t = 1000.0)]
    temp_left: f64,

    /// Right boundary temperature in Kelvin
    #[arg(long, default_value_t = 273.0)]
    temp_right: f64,

    /// Timesteps between progress reports
    #[arg(short, long, default_value_t = 500)]
    report_interval: usize,

    /// Print the effective configuration as JSON and exit
    #[arg(long)]
    dump_config: bool,
}

impl Args {
    fn to_config(&self) -> SimulationConfig {
        SimulationConfig {
            k: self.k,
            lx: self.lx,
            ly: self.ly,
            nx: self.nx,
            ny: self.ny,
            dt: self.dt,
            tf: self.tf,
            temp0: self.temp0,
            temp_top: self.temp_top,
            temp_bottom: self.temp_bottom,
            temp_left: self.temp_left,
            temp_right: self.temp_right,
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let config = args.to_config();

    if args.dump_config {
        match serde_json::to_string_pretty(&config) {
            Ok(json) => {
                println!("{json}");
                return ExitCode::SUCCESS;
            }
            Err(e) => {
                eprintln!("failed to serialize config: {e}");
                return ExitCode::FAILURE;
            }
        }
    }

    let mut solver = match HeatSolver::new(config) {
        Ok(solver) => solver,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let params = solver.params();
    println!("=== Heat Diffusion Demo ===");
    println!(
        "{}x{} grid, dx={:.4} m, dy={:.4} m, {} timesteps of {} s",
        params.nx, params.ny, params.dx, params.dy, params.num_tsteps, params.dt
    );
    println!("Courant numbers: r1={:.4}, r2={:.4}", params.r1, params.r2);

    let report_interval = args.report_interval.max(1);
    solver.run_with(|field, t| {
        if t % report_interval == 0 {
            let (min, max) = interior_min_max(field, t);
            println!(
                "t={:>8} ({:>10.1} s)  interior min {:>7.1} K  max {:>7.1} K",
                t,
                t as f64 * params.dt,
                min,
                max
            );
        }
    });

    let (min, max) = solver.min_max(params.num_tsteps);
    println!(
        "done: {} timesteps, final interior range {:.1} K .. {:.1} K",
        params.num_tsteps, min, max
    );
    ExitCode::SUCCESS
}

/// Interior min/max of one timestep slice, excluding the boundary ring.
fn interior_min_max(field: &TemperatureField, t: usize) -> (f64, f64) {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for j in 1..field.ny() - 1 {
        for i in 1..field.nx() - 1 {
            let v = field.get(i, j, t);
            min = min.min(v);
            max = max.max(v);
        }
    }
    (min, max)
}
