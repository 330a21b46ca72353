//! Interactive terminal heat diffusion demo
//!
//! Sizes the grid to the current terminal, runs the explicit
//! finite-difference march, and paints the evolving temperature field as
//! colored cells on an alternate screen. Frames are drawn synchronously
//! between timesteps, so the solver never races the renderer.
//!
//! # Usage
//!
//! ```bash
//! cargo run --release --package demo-terminal
//! ```
//!
//! Press `q` or `Esc` to stop early. All physical parameters can be
//! overridden on the command line; defaults reproduce the steel-plate
//! scenario (hot top and left edges at 1000 K).

mod render;

use std::io::{self, Write};
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    cursor,
    event::{self, Event, KeyCode},
    execute, terminal,
};
use heat_sim_core::{HeatSolver, SimulationConfig};

/// Terminal heat diffusion simulator
#[derive(Parser, Debug)]
#[command(name = "heat-sim-terminal")]
#[command(about = "2D transient heat diffusion rendered in the terminal", long_about = None)]
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

    /// Timesteps between drawn frames
    #[arg(short, long, default_value_t = 500)]
    refresh_every: usize,

    /// Delay after each drawn frame in milliseconds
    #[arg(long, default_value_t = 0)]
    frame_delay_ms: u64,

    /// Glyph painted per cell
    #[arg(long, default_value = "■")]
    glyph: String,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let (cols, rows) = match terminal::size() {
        Ok(size) => size,
        Err(e) => {
            eprintln!("failed to query terminal size: {e}");
            return ExitCode::FAILURE;
        }
    };

    let config = SimulationConfig {
        k: args.k,
        lx: args.lx,
        ly: args.ly,
        nx: cols as usize,
        ny: rows as usize,
        dt: args.dt,
        tf: args.tf,
        temp0: args.temp0,
        temp_top: args.temp_top,
        temp_bottom: args.temp_bottom,
        temp_left: args.temp_left,
        temp_right: args.temp_right,
    };

    let mut solver = match HeatSolver::new(config) {
        Ok(solver) => solver,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    match run_ui(&mut solver, &args) {
        Ok(()) => {
            let t = solver.timestep();
            let (min, max) = solver.min_max(t);
            println!(
                "stopped at t={} ({:.1} s simulated); interior {:.1} K .. {:.1} K",
                t,
                t as f64 * args.dt,
                min,
                max
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("render error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Run the march inside an alternate screen, restoring the terminal on every
/// exit path.
fn run_ui(solver: &mut HeatSolver, args: &Args) -> io::Result<()> {
    let mut stdout = io::stdout();
    terminal::enable_raw_mode()?;
    execute!(
        stdout,
        terminal::EnterAlternateScreen,
        cursor::Hide,
        terminal::Clear(terminal::ClearType::All)
    )?;

    let result = draw_loop(&mut stdout, solver, args);

    execute!(stdout, cursor::Show, terminal::LeaveAlternateScreen)?;
    terminal::disable_raw_mode()?;
    result
}

fn draw_loop<W: Write>(out: &mut W, solver: &mut HeatSolver, args: &Args) -> io::Result<()> {
    let refresh_every = args.refresh_every.max(1);
    let num_tsteps = solver.params().num_tsteps;

    // Frame 0: the initial condition
    render::draw_frame(out, solver.field(), 0, &args.glyph)?;

    while !solver.is_complete() {
        let t = solver.step();
        if t % refresh_every == 0 || t == num_tsteps {
            render::draw_frame(out, solver.field(), t, &args.glyph)?;
            if args.frame_delay_ms > 0 {
                std::thread::sleep(Duration::from_millis(args.frame_delay_ms));
            }
            if quit_requested()? {
                break;
            }
        }
    }
    Ok(())
}

/// Non-blocking check for `q` or `Esc`.
fn quit_requested() -> io::Result<bool> {
    while event::poll(Duration::ZERO)? {
        if let Event::Key(key) = event::read()? {
            if matches!(key.code, KeyCode::Char('q') | KeyCode::Esc) {
                return Ok(true);
            }
        }
    }
    Ok(false)
}
