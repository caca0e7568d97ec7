//! Error types for the matching core.

use thiserror::Error;

/// Errors that can occur before matching starts.
///
/// Nothing inside the matching loop itself is fatal: once the threshold is
/// validated, every row-level problem degrades to an unmatched record.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The caller-supplied distance threshold must be a finite number > 0.
    #[error("invalid match threshold: {0} m (must be finite and > 0)")]
    InvalidThreshold(f64),

    /// The grid cell size must be a finite number > 0.
    #[error("invalid cell size: {0}° (must be finite and > 0)")]
    InvalidCellSize(f64),
}
