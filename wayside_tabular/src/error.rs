//! Error types for tabular ingestion.
//!
//! Everything here is an *input* error: caught before the index is built and
//! surfaced as a single descriptive failure. Row-level problems never appear
//! as errors; they degrade to dropped track rows or explicitly-unmatched
//! assets inside the readers.

use thiserror::Error;

/// Errors raised while turning a tabular source into typed rows.
#[derive(Debug, Error)]
pub enum TabularError {
    /// A required column could not be resolved against any known alias.
    #[error("{dataset} data is missing a required column: {column} (accepted names: {aliases})")]
    MissingColumn {
        dataset: &'static str,
        column: &'static str,
        aliases: String,
    },

    /// The file held no usable rows at all.
    #[error("{dataset} data contains no usable rows")]
    EmptyDataset { dataset: &'static str },

    /// The underlying CSV reader failed (I/O, malformed quoting, ...).
    #[error("failed to read csv: {0}")]
    Csv(#[from] csv::Error),

    /// File could not be opened.
    #[error("failed to open file: {0}")]
    Io(#[from] std::io::Error),
}
