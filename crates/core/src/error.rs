//! Error taxonomy for the heat diffusion core
//!
//! Stability and allocation failures are terminal for a run: there is no
//! retry or degraded mode (no automatic `dt` reduction). Both are detected
//! before any simulation work and leave no partially initialized state
//! behind. Out-of-range field access is a caller contract violation, not an
//! error variant; see [`crate::field::TemperatureField`].

use std::error::Error;
use std::fmt;

/// Errors produced while setting up a simulation run.
#[derive(Debug, Clone, PartialEq)]
pub enum SolverError {
    /// The explicit scheme is unstable for the requested parameters.
    ///
    /// Raised before any field allocation when either Courant number
    /// `k*dt/dx²` or `k*dt/dy²` exceeds 0.5. Recoverable by the caller:
    /// reduce `dt`, coarsen the grid, or pick a less diffusive material.
    Stability {
        /// Courant number in the x direction (`k*dt/dx²`)
        r1: f64,
        /// Courant number in the y direction (`k*dt/dy²`)
        r2: f64,
    },
    /// The temperature field could not be allocated.
    ///
    /// The full time history costs `nx*ny*(num_tsteps+1)` doubles up front,
    /// so long horizons on large grids can exhaust memory. No partial field
    /// remains reachable after this error.
    Allocation {
        /// Number of grid cells requested (`nx*ny`)
        cells: usize,
        /// Number of timesteps requested
        timesteps: usize,
    },
    /// A configuration parameter failed validation.
    InvalidConfig {
        /// Name of the offending parameter (e.g. `"dt"`, `"nx"`)
        param: &'static str,
        /// Description of the validation failure
        reason: String,
    },
}

impl fmt::Display for SolverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stability { r1, r2 } => write!(
                f,
                "unstable explicit scheme: Courant numbers r1={r1:.4}, r2={r2:.4} \
                 (both must be <= 0.5; reduce dt or coarsen the grid)"
            ),
            Self::Allocation { cells, timesteps } => write!(
                f,
                "failed to allocate temperature field for {cells} cells over \
                 {timesteps} timesteps"
            ),
            Self::InvalidConfig { param, reason } => {
                write!(f, "invalid configuration parameter '{param}': {reason}")
            }
        }
    }
}

impl Error for SolverError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stability_message_names_courant_numbers() {
        let err = SolverError::Stability { r1: 0.75, r2: 0.25 };
        let msg = err.to_string();
        assert!(msg.contains("0.7500"));
        assert!(msg.contains("0.2500"));
        assert!(msg.contains("0.5"));
    }

    #[test]
    fn test_variants_stay_distinguishable() {
        let stability = SolverError::Stability { r1: 1.0, r2: 1.0 };
        let allocation = SolverError::Allocation {
            cells: 100,
            timesteps: 10,
        };
        assert_ne!(stability, allocation);
    }
}
