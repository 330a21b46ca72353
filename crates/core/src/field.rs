//! Temperature field with full time history
//!
//! Stores the temperature of every grid cell at every timestep of the run.
//! Keeping the whole history (rather than only the latest step) is a
//! deliberate choice: any timestep can be inspected or replayed after the
//! march, at the cost of `O(nx*ny*num_tsteps)` memory.
//!
//! Storage is a single contiguous `Vec<f64>` with each cell's series laid
//! out consecutively, so the stencil sweep walks memory predictably and
//! there is no per-cell allocation bookkeeping.

use crate::error::SolverError;

/// Dense temperature history over a fixed `nx × ny` grid.
///
/// Cell `(i, j)` with `0 <= i < nx`, `0 <= j < ny` owns a series of
/// `num_tsteps + 1` values indexed by timestep `t`; the value at index `t`
/// is the temperature at simulated time `t*dt`. Dimensions never change
/// after construction, and the field exclusively owns all storage (freed on
/// drop).
#[derive(Debug, Clone)]
pub struct TemperatureField {
    data: Vec<f64>,
    nx: usize,
    ny: usize,
    num_tsteps: usize,
}

impl TemperatureField {
    /// Allocate a field for `nx*ny` cells over `num_tsteps + 1` timesteps,
    /// initialized to zero.
    ///
    /// The whole history is allocated up front; callers must size `tf/dt`
    /// conservatively for large grids. Allocation failure surfaces as
    /// [`SolverError::Allocation`] with no partial field left behind.
    pub fn new(nx: usize, ny: usize, num_tsteps: usize) -> Result<Self, SolverError> {
        let alloc_err = || SolverError::Allocation {
            cells: nx.saturating_mul(ny),
            timesteps: num_tsteps,
        };
        let len = nx
            .checked_mul(ny)
            .and_then(|cells| cells.checked_mul(num_tsteps + 1))
            .ok_or_else(alloc_err)?;

        let mut data = Vec::new();
        data.try_reserve_exact(len).map_err(|_| alloc_err())?;
        data.resize(len, 0.0);

        Ok(Self {
            data,
            nx,
            ny,
            num_tsteps,
        })
    }

    /// Grid resolution in x.
    pub fn nx(&self) -> usize {
        self.nx
    }

    /// Grid resolution in y.
    pub fn ny(&self) -> usize {
        self.ny
    }

    /// Number of timesteps in the run (series length is `num_tsteps + 1`).
    pub fn num_tsteps(&self) -> usize {
        self.num_tsteps
    }

    /// Flat index of `(i, j, t)` in the backing buffer.
    #[inline]
    fn idx(&self, i: usize, j: usize, t: usize) -> usize {
        (i * self.ny + j) * (self.num_tsteps + 1) + t
    }

    /// Temperature at cell `(i, j)` at timestep `t`.
    ///
    /// Bounds are a caller contract, checked only in debug builds so the
    /// stencil inner loop stays free of branch overhead in release. An
    /// out-of-range access is a programming error, not a recoverable
    /// condition.
    #[inline]
    pub fn get(&self, i: usize, j: usize, t: usize) -> f64 {
        debug_assert!(
            i < self.nx && j < self.ny && t <= self.num_tsteps,
            "field access out of bounds: ({i}, {j}, {t})"
        );
        self.data[self.idx(i, j, t)]
    }

    /// Write the temperature at cell `(i, j)` at timestep `t`.
    ///
    /// Same bounds contract as [`Self::get`].
    #[inline]
    pub fn set(&mut self, i: usize, j: usize, t: usize, value: f64) {
        debug_assert!(
            i < self.nx && j < self.ny && t <= self.num_tsteps,
            "field access out of bounds: ({i}, {j}, {t})"
        );
        let idx = self.idx(i, j, t);
        self.data[idx] = value;
    }

    /// Whether `(i, j)` lies on the boundary ring.
    ///
    /// Boundary cells hold a fixed Dirichlet temperature for all timesteps
    /// and are never touched by the stencil update.
    #[inline]
    pub fn is_boundary(&self, i: usize, j: usize) -> bool {
        i == 0 || i == self.nx - 1 || j == 0 || j == self.ny - 1
    }

    /// Copy one timestep slice in row-major order (`j * nx + i`).
    ///
    /// This is the replay/inspection surface the full history exists for;
    /// renderers sample it to draw a frame without touching solver state.
    pub fn snapshot(&self, t: usize) -> Vec<f64> {
        debug_assert!(t <= self.num_tsteps, "timestep out of bounds: {t}");
        let mut slice = Vec::with_capacity(self.nx * self.ny);
        for j in 0..self.ny {
            for i in 0..self.nx {
                slice.push(self.get(i, j, t));
            }
        }
        slice
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_creation() {
        let field = TemperatureField::new(10, 20, 5).unwrap();
        assert_eq!(field.nx(), 10);
        assert_eq!(field.ny(), 20);
        assert_eq!(field.num_tsteps(), 5);
        for t in 0..=5 {
            assert_eq!(field.get(3, 7, t), 0.0);
        }
    }

    #[test]
    fn test_get_set_roundtrip() {
        let mut field = TemperatureField::new(8, 8, 3).unwrap();
        field.set(2, 5, 1, 451.0);
        assert_eq!(field.get(2, 5, 1), 451.0);
        // Neighboring series entries stay untouched
        assert_eq!(field.get(2, 5, 0), 0.0);
        assert_eq!(field.get(2, 5, 2), 0.0);
        assert_eq!(field.get(2, 4, 1), 0.0);
    }

    #[test]
    fn test_series_are_independent() {
        let mut field = TemperatureField::new(4, 4, 2).unwrap();
        for t in 0..=2 {
            field.set(1, 1, t, 100.0 + t as f64);
        }
        assert_eq!(field.get(1, 1, 0), 100.0);
        assert_eq!(field.get(1, 1, 1), 101.0);
        assert_eq!(field.get(1, 1, 2), 102.0);
    }

    #[test]
    fn test_boundary_classification() {
        let field = TemperatureField::new(5, 4, 1).unwrap();
        assert!(field.is_boundary(0, 2));
        assert!(field.is_boundary(4, 2));
        assert!(field.is_boundary(2, 0));
        assert!(field.is_boundary(2, 3));
        assert!(field.is_boundary(0, 0));
        assert!(!field.is_boundary(1, 1));
        assert!(!field.is_boundary(3, 2));
    }

    #[test]
    fn test_snapshot_row_major_layout() {
        let mut field = TemperatureField::new(3, 2, 1).unwrap();
        field.set(2, 0, 1, 7.0);
        field.set(0, 1, 1, 9.0);
        let slice = field.snapshot(1);
        assert_eq!(slice.len(), 6);
        assert_eq!(slice[2], 7.0); // (i=2, j=0) -> index 0*3 + 2
        assert_eq!(slice[3], 9.0); // (i=0, j=1) -> index 1*3 + 0
    }

    #[test]
    fn test_allocation_overflow_is_reported() {
        let err = TemperatureField::new(usize::MAX, 2, 2).unwrap_err();
        assert!(matches!(err, SolverError::Allocation { .. }));
    }

    #[cfg(debug_assertions)]
    #[test]
    #[should_panic(expected = "field access out of bounds")]
    fn test_debug_bounds_check() {
        let field = TemperatureField::new(4, 4, 1).unwrap();
        let _ = field.get(4, 0, 0);
    }
}
