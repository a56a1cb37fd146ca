//! Purpose: Define the stable public Rust API boundary for jsonstat.
//! Exports: Decode entry points, dataset/dimension types, and the error model.
//! Role: Public, additive-only surface; hides the collect/link pipeline internals.
//! Invariants: This module is the only public path to decoding.
//! Invariants: Each call decodes one document with its own state; calls may run concurrently.

use crate::json::parse;
use std::io::Read;
use tracing::debug;

pub use crate::core::dataset::Dataset;
pub use crate::core::dimension::{Category, Dimension, DimensionDescriptor, Role};
pub use crate::core::error::{Error, ErrorKind, to_exit_code};

/// Decode one JSON-stat v2 dataset object from a string.
pub fn from_str(input: &str) -> Result<Dataset, Error> {
    parse::from_str(input).inspect(log_decoded)
}

pub fn from_slice(input: &[u8]) -> Result<Dataset, Error> {
    parse::from_slice(input).inspect(log_decoded)
}

/// Decode from a reader. The whole document is consumed before any result is returned.
pub fn from_reader<R: Read>(reader: R) -> Result<Dataset, Error> {
    parse::from_reader(reader).inspect(log_decoded)
}

fn log_decoded(dataset: &Dataset) {
    debug!(
        label = dataset.label().unwrap_or_default(),
        dimensions = dataset.dimensions().len(),
        values = dataset.values().len(),
        "decoded dataset"
    );
}
