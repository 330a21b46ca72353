//! Simulation configuration
//!
//! A flat set of named numeric parameters consumed by the solver. The grid
//! resolution (`nx`, `ny`) is deliberately a plain pair of integers: the
//! reference setup derives it from the active terminal size, but the core
//! never queries a terminal itself.

use serde::{Deserialize, Serialize};

use crate::error::SolverError;

/// Physical and numerical parameters for one simulation run.
///
/// Temperatures are in Kelvin, lengths in meters, times in seconds.
/// `Default` reproduces the classic steel-plate scenario: a 0.5 m square
/// plate of 1%-carbon steel at 273 K with two hot (1000 K) and two cold
/// (273 K) edges.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Thermal diffusivity of the material (m²/s)
    pub k: f64,
    /// Physical domain extent in x (m)
    pub lx: f64,
    /// Physical domain extent in y (m)
    pub ly: f64,
    /// Grid resolution in x (number of cells)
    pub nx: usize,
    /// Grid resolution in y (number of cells)
    pub ny: usize,
    /// Timestep size (s)
    pub dt: f64,
    /// Final simulated time (s)
    pub tf: f64,
    /// Uniform initial temperature (K)
    pub temp0: f64,
    /// Dirichlet temperature along the top edge, `j = 0` (K)
    pub temp_top: f64,
    /// Dirichlet temperature along the bottom edge, `j = ny-1` (K)
    pub temp_bottom: f64,
    /// Dirichlet temperature along the left edge, `i = 0` (K)
    pub temp_left: f64,
    /// Dirichlet temperature along the right edge, `i = nx-1` (K)
    pub temp_right: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            k: 1.172e-5, // steel with 1% carbon
            lx: 0.5,
            ly: 0.5,
            nx: 80,
            ny: 24,
            dt: 0.1,
            tf: 10000.0,
            temp0: 273.0,
            temp_top: 1000.0,
            temp_bottom: 273.0,
            temp_left: 1000.0,
            temp_right: 273.0,
        }
    }
}

impl SimulationConfig {
    /// Number of timesteps in the run, `floor(tf/dt)`.
    ///
    /// The stored history has one more entry per cell (the initial state at
    /// `t = 0`).
    pub fn num_tsteps(&self) -> usize {
        (self.tf / self.dt).floor() as usize
    }

    /// Check that the parameters describe a well-posed run.
    ///
    /// The grid must have at least one interior cell (`nx >= 3`, `ny >= 3`)
    /// and the physical scales must be strictly positive. This does not
    /// include the stability check, which belongs to the solver.
    pub fn validate(&self) -> Result<(), SolverError> {
        if self.nx < 3 {
            return Err(SolverError::InvalidConfig {
                param: "nx",
                reason: format!("need at least 3 cells for an interior, got {}", self.nx),
            });
        }
        if self.ny < 3 {
            return Err(SolverError::InvalidConfig {
                param: "ny",
                reason: format!("need at least 3 cells for an interior, got {}", self.ny),
            });
        }
        for (param, value) in [
            ("k", self.k),
            ("lx", self.lx),
            ("ly", self.ly),
            ("dt", self.dt),
            ("tf", self.tf),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(SolverError::InvalidConfig {
                    param,
                    reason: format!("must be finite and positive, got {value}"),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = SimulationConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.num_tsteps(), 100000);
    }

    #[test]
    fn test_rejects_degenerate_grid() {
        let config = SimulationConfig {
            nx: 2,
            ..SimulationConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(matches!(err, SolverError::InvalidConfig { param: "nx", .. }));
    }

    #[test]
    fn test_rejects_nonpositive_timestep() {
        let config = SimulationConfig {
            dt: 0.0,
            ..SimulationConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(matches!(err, SolverError::InvalidConfig { param: "dt", .. }));
    }

    #[test]
    fn test_num_tsteps_floors() {
        let config = SimulationConfig {
            dt: 0.3,
            tf: 1.0,
            ..SimulationConfig::default()
        };
        assert_eq!(config.num_tsteps(), 3);
    }
}
