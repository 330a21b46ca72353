//! Explicit finite-difference time march for the 2D heat equation
//!
//! Forward-Euler in time, centered differences in space (5-point stencil):
//!
//! ```text
//! T[i,j,t+1] = T[i,j,t] + k*dt*( (T[i+1,j,t] - 2T[i,j,t] + T[i-1,j,t])/dx²
//!                              + (T[i,j+1,t] - 2T[i,j,t] + T[i,j-1,t])/dy² )
//! ```
//!
//! The scheme is conditionally stable: both Courant numbers `k*dt/dx²` and
//! `k*dt/dy²` must stay at or below 0.5, checked before anything is
//! allocated. Boundary cells carry fixed Dirichlet temperatures for the
//! whole run and are never updated by the stencil.
//!
//! Within one timestep every write targets `t+1` and every read comes from
//! the already-finalized `t` data, so the spatial sweep parallelizes cleanly
//! across rows; timesteps themselves are strictly sequential.

use rayon::prelude::*;
use tracing::{debug, info};

use crate::config::SimulationConfig;
use crate::error::SolverError;
use crate::field::TemperatureField;

/// Stability bound on each Courant number for the explicit 2D scheme.
pub const COURANT_LIMIT: f64 = 0.5;

/// Quantities derived from a [`SimulationConfig`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverParams {
    /// Grid resolution in x
    pub nx: usize,
    /// Grid resolution in y
    pub ny: usize,
    /// Cell spacing in x, `lx/nx` (m)
    pub dx: f64,
    /// Cell spacing in y, `ly/ny` (m)
    pub dy: f64,
    /// Courant number in x, `k*dt/dx²`
    pub r1: f64,
    /// Courant number in y, `k*dt/dy²`
    pub r2: f64,
    /// Thermal diffusivity (m²/s)
    pub k: f64,
    /// Timestep size (s)
    pub dt: f64,
    /// Number of timesteps, `floor(tf/dt)`
    pub num_tsteps: usize,
}

impl SolverParams {
    /// Derive cell spacings and Courant numbers from a configuration.
    pub fn from_config(config: &SimulationConfig) -> Self {
        let dx = config.lx / config.nx as f64;
        let dy = config.ly / config.ny as f64;
        Self {
            nx: config.nx,
            ny: config.ny,
            dx,
            dy,
            r1: config.k * config.dt / (dx * dx),
            r2: config.k * config.dt / (dy * dy),
            k: config.k,
            dt: config.dt,
            num_tsteps: config.num_tsteps(),
        }
    }

    /// Enforce the explicit-scheme stability bound.
    ///
    /// A hard precondition, not a warning: `r1 > 0.5` or `r2 > 0.5` means
    /// the forward-Euler discretization diverges regardless of input data.
    pub fn check_stability(&self) -> Result<(), SolverError> {
        if self.r1 > COURANT_LIMIT || self.r2 > COURANT_LIMIT {
            return Err(SolverError::Stability {
                r1: self.r1,
                r2: self.r2,
            });
        }
        Ok(())
    }
}

/// Time-marching solver owning the temperature field history.
///
/// Construction validates the configuration, runs the stability gate,
/// allocates the field, and writes the initial and boundary conditions.
/// After that each [`step`](Self::step) fills one more timestep of the
/// history until `num_tsteps` is reached.
#[derive(Debug)]
pub struct HeatSolver {
    config: SimulationConfig,
    params: SolverParams,
    field: TemperatureField,
    /// Row-major (`j*nx + i`) copy of the current timestep slice
    current: Vec<f64>,
    /// Scratch buffer for the slice being computed
    next: Vec<f64>,
    t: usize,
}

impl HeatSolver {
    /// Set up a run: validate, gate on stability, allocate, apply initial
    /// and boundary conditions.
    ///
    /// The stability check happens before the field allocation, so an
    /// unstable configuration costs nothing and corrupts nothing.
    pub fn new(config: SimulationConfig) -> Result<Self, SolverError> {
        config.validate()?;
        let params = SolverParams::from_config(&config);
        params.check_stability()?;

        let mut field = TemperatureField::new(params.nx, params.ny, params.num_tsteps)?;
        info!(
            "heat solver initialized: {}x{} grid, {} timesteps, r1={:.4}, r2={:.4}",
            params.nx, params.ny, params.num_tsteps, params.r1, params.r2
        );

        apply_initial_condition(&mut field, config.temp0);
        apply_dirichlet_boundaries(&mut field, &config);

        let current = field.snapshot(0);
        let next = current.clone();

        Ok(Self {
            config,
            params,
            field,
            current,
            next,
            t: 0,
        })
    }

    /// Derived numerical parameters for this run.
    pub fn params(&self) -> SolverParams {
        self.params
    }

    /// The configuration the run was built from.
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Read access to the temperature history.
    pub fn field(&self) -> &TemperatureField {
        &self.field
    }

    /// Index of the most recently completed timestep.
    pub fn timestep(&self) -> usize {
        self.t
    }

    /// Whether the full run has been computed.
    pub fn is_complete(&self) -> bool {
        self.t >= self.params.num_tsteps
    }

    /// Advance the field by one timestep, returning the new timestep index.
    ///
    /// A no-op once `num_tsteps` has been reached. The spatial sweep runs in
    /// parallel across grid rows; all reads come from the finalized timestep
    /// `t`, all writes go to `t+1`.
    pub fn step(&mut self) -> usize {
        if self.is_complete() {
            return self.t;
        }

        let nx = self.params.nx;
        let ny = self.params.ny;
        let dx2 = self.params.dx * self.params.dx;
        let dy2 = self.params.dy * self.params.dy;
        let k_dt = self.params.k * self.params.dt;

        let current = &self.current;
        self.next
            .par_chunks_mut(nx)
            .enumerate()
            .for_each(|(j, row)| {
                let base = j * nx;
                if j == 0 || j == ny - 1 {
                    // Boundary rows are fixed in time
                    row.copy_from_slice(&current[base..base + nx]);
                    return;
                }
                for (i, cell) in row.iter_mut().enumerate() {
                    let idx = base + i;
                    if i == 0 || i == nx - 1 {
                        *cell = current[idx];
                        continue;
                    }
                    let t0 = current[idx];
                    let d2t_dx2 = (current[idx + 1] - 2.0 * t0 + current[idx - 1]) / dx2;
                    let d2t_dy2 = (current[idx + nx] - 2.0 * t0 + current[idx - nx]) / dy2;
                    *cell = t0 + k_dt * (d2t_dx2 + d2t_dy2);
                }
            });

        // Record the interior into the history; the boundary ring at t+1 was
        // already written during initialization.
        let t_next = self.t + 1;
        for j in 1..ny - 1 {
            for i in 1..nx - 1 {
                self.field.set(i, j, t_next, self.next[j * nx + i]);
            }
        }

        std::mem::swap(&mut self.current, &mut self.next);
        self.t = t_next;
        self.t
    }

    /// March all remaining timesteps.
    pub fn run(&mut self) {
        while !self.is_complete() {
            self.step();
        }
        debug!("time march complete at t={}", self.t);
    }

    /// March all remaining timesteps, calling `observer` after each one.
    ///
    /// The observer sees the field with the just-completed timestep index.
    /// Rendering synchronously from here between timesteps is the supported
    /// way to draw frames: the solver never writes while the observer reads.
    pub fn run_with<F>(&mut self, mut observer: F)
    where
        F: FnMut(&TemperatureField, usize),
    {
        while !self.is_complete() {
            let t = self.step();
            observer(&self.field, t);
        }
    }

    /// Minimum and maximum interior temperature at timestep `t`.
    pub fn min_max(&self, t: usize) -> (f64, f64) {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for j in 1..self.params.ny - 1 {
            for i in 1..self.params.nx - 1 {
                let v = self.field.get(i, j, t);
                min = min.min(v);
                max = max.max(v);
            }
        }
        (min, max)
    }
}

/// Set every cell's timestep-0 value to the uniform initial temperature.
///
/// Covers the full grid; boundary cells are overwritten immediately after by
/// the Dirichlet assignment.
fn apply_initial_condition(field: &mut TemperatureField, temp0: f64) {
    let (nx, ny) = (field.nx(), field.ny());
    for i in 0..nx {
        for j in 0..ny {
            field.set(i, j, 0, temp0);
        }
    }
}

/// Fix the four edges to their Dirichlet temperatures for every timestep.
///
/// Assignment order matters at the corners: top/bottom rows first, then
/// left/right columns, so corner cells end up holding the left/right edge
/// temperature (last assignment wins). Downstream consumers depend on this
/// tie-break being stable.
fn apply_dirichlet_boundaries(field: &mut TemperatureField, config: &SimulationConfig) {
    let (nx, ny) = (field.nx(), field.ny());
    let num_tsteps = field.num_tsteps();

    for i in 0..nx {
        for t in 0..=num_tsteps {
            field.set(i, 0, t, config.temp_top);
            field.set(i, ny - 1, t, config.temp_bottom);
        }
    }
    for j in 0..ny {
        for t in 0..=num_tsteps {
            field.set(0, j, t, config.temp_left);
            field.set(nx - 1, j, t, config.temp_right);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Small, comfortably stable configuration: dx = dy = 0.2, r = 0.25.
    fn small_config() -> SimulationConfig {
        SimulationConfig {
            k: 1.0,
            lx: 1.0,
            ly: 1.0,
            nx: 5,
            ny: 5,
            dt: 0.01,
            tf: 0.1,
            temp0: 300.0,
            temp_top: 400.0,
            temp_bottom: 200.0,
            temp_left: 350.0,
            temp_right: 250.0,
        }
    }

    #[test]
    fn test_params_derivation() {
        let params = SolverParams::from_config(&small_config());
        assert_eq!(params.num_tsteps, 10);
        assert!((params.dx - 0.2).abs() < 1e-15);
        assert!((params.r1 - 0.25).abs() < 1e-12);
        assert!((params.r2 - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_stability_gate_rejects_large_dt() {
        let config = SimulationConfig {
            dt: 1.0,
            ..small_config()
        };
        match HeatSolver::new(config) {
            Err(SolverError::Stability { r1, r2 }) => {
                assert!(r1 > COURANT_LIMIT);
                assert!(r2 > COURANT_LIMIT);
            }
            other => panic!("expected stability error, got {other:?}"),
        }
    }

    #[test]
    fn test_initial_condition_covers_full_interior() {
        let solver = HeatSolver::new(small_config()).unwrap();
        let field = solver.field();
        for i in 1..4 {
            for j in 1..4 {
                assert_eq!(field.get(i, j, 0), 300.0);
            }
        }
    }

    #[test]
    fn test_step_is_noop_after_completion() {
        let mut solver = HeatSolver::new(small_config()).unwrap();
        solver.run();
        assert!(solver.is_complete());
        assert_eq!(solver.step(), solver.params().num_tsteps);
    }

    #[test]
    fn test_observer_sees_every_timestep() {
        let mut solver = HeatSolver::new(small_config()).unwrap();
        let mut seen = Vec::new();
        solver.run_with(|_, t| seen.push(t));
        assert_eq!(seen, (1..=10).collect::<Vec<_>>());
    }
}
