//! Heat Simulation Core Library
//!
//! Simulates 2D transient heat diffusion over a rectangular plate with an
//! explicit finite-difference scheme (forward-Euler in time, 5-point stencil
//! in space) under fixed Dirichlet boundary temperatures.
//!
//! The library owns the numerics only. It takes the grid resolution as plain
//! integers (the demos derive it from the terminal size), exposes read-only
//! per-cell, per-timestep access for external renderers, and reports
//! stability and allocation failures as distinguishable errors. Colors,
//! cursor positioning, and refresh cadence live entirely in the consuming
//! binaries.

pub mod config;
pub mod error;
pub mod field;
pub mod solver;

pub use config::SimulationConfig;
pub use error::SolverError;
pub use field::TemperatureField;
pub use solver::{HeatSolver, SolverParams, COURANT_LIMIT};
