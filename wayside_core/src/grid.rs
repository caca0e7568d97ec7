//! Fixed-grid spatial index over track fixes.
//!
//! Buckets fixes into square lat/lon cells so a nearest-fix query touches
//! only the 3×3 cell neighborhood around the query point instead of the
//! whole track.
//!
//! This is **not** a guaranteed-nearest search: a fix more than one cell
//! width outside the query cell is never enumerated, so the true nearest
//! fix can be missed when points cluster just beyond the 3×3 window. The
//! default cell size (0.001° ≈ 111 m at the equator) is deliberately much
//! smaller than the matching thresholds in use, which makes such misses
//! rare; changing either knob changes the ratio this approximation assumes.
//! Cells are also anisotropic away from the equator, since a degree of
//! longitude shrinks toward the poles; that error is accepted too.

use crate::error::CoreError;
use crate::types::TrackFix;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Integer cell coordinates, `(floor(lat/cell), floor(lon/cell))`.
pub type CellKey = (i64, i64);

/// Grid index configuration.
#[derive(Debug, Clone, Copy)]
pub struct GridConfig {
    /// Cell edge length in degrees.
    pub cell_size_deg: f64,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self { cell_size_deg: 0.001 }
    }
}

impl GridConfig {
    /// A validated config with the given cell size.
    pub fn with_cell_size(cell_size_deg: f64) -> Result<Self, CoreError> {
        if !cell_size_deg.is_finite() || cell_size_deg <= 0.0 {
            return Err(CoreError::InvalidCellSize(cell_size_deg));
        }
        Ok(Self { cell_size_deg })
    }
}

/// Read-only after construction; owns its fixes for the run.
#[derive(Debug)]
pub struct GridIndex {
    cell_size_deg: f64,
    /// Primary index: cell -> positions into `fixes`, in insertion order.
    cells: HashMap<CellKey, Vec<usize>>,
    fixes: Vec<TrackFix>,
}

impl GridIndex {
    /// Build an index over the given fixes.
    ///
    /// Fixes with non-finite coordinates are assumed to have been filtered
    /// by the ingestion layer; any that slip through land in whatever cell
    /// the float cast produces and simply never win a distance comparison.
    pub fn build(fixes: Vec<TrackFix>, config: GridConfig) -> Self {
        let mut index = GridIndex {
            cell_size_deg: config.cell_size_deg,
            cells: HashMap::new(),
            fixes: Vec::with_capacity(fixes.len()),
        };
        for fix in fixes {
            index.insert(fix);
        }
        index
    }

    fn insert(&mut self, fix: TrackFix) {
        let key = self.cell_key(fix.lat, fix.lon);
        let slot = self.fixes.len();
        self.fixes.push(fix);
        self.cells.entry(key).or_default().push(slot);
    }

    fn cell_key(&self, lat: f64, lon: f64) -> CellKey {
        (
            (lat / self.cell_size_deg).floor() as i64,
            (lon / self.cell_size_deg).floor() as i64,
        )
    }

    /// Candidate fixes for a query point: every fix in the query point's
    /// cell and its 8 immediate neighbors. Empty cells contribute nothing.
    pub fn query(&self, lat: f64, lon: f64) -> impl Iterator<Item = &TrackFix> {
        let (row, col) = self.cell_key(lat, lon);
        (-1..=1i64)
            .flat_map(move |dr| (-1..=1i64).map(move |dc| (row + dr, col + dc)))
            .filter_map(move |key| self.cells.get(&key))
            .flatten()
            .map(move |&slot| &self.fixes[slot])
    }

    /// Number of fixes held by the index.
    pub fn len(&self) -> usize {
        self.fixes.len()
    }

    /// True when the index holds no fixes at all.
    pub fn is_empty(&self) -> bool {
        self.fixes.is_empty()
    }

    /// All fixes in ingestion order.
    pub fn fixes(&self) -> &[TrackFix] {
        &self.fixes
    }

    /// Occupancy statistics for logging and diagnostics.
    pub fn stats(&self) -> GridStats {
        let occupied_cells = self.cells.len();
        let avg_fixes_per_cell = if occupied_cells > 0 {
            self.fixes.len() as f64 / occupied_cells as f64
        } else {
            0.0
        };
        GridStats {
            total_fixes: self.fixes.len(),
            occupied_cells,
            avg_fixes_per_cell,
            cell_size_deg: self.cell_size_deg,
        }
    }
}

/// Statistics about the spatial index.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridStats {
    pub total_fixes: usize,
    pub occupied_cells: usize,
    pub avg_fixes_per_cell: f64,
    pub cell_size_deg: f64,
}
