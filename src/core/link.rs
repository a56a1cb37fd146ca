//! Purpose: Second decode phase; turn a collected `RawDataset` into a consistent `Dataset`.
//! Exports: `link`, plus `serde::Deserialize` for `Dataset`.
//! Role: Pure pipeline: registry -> role assignment -> validation -> assembly.
//! Invariants: No I/O and no shared state; the same input always yields the same output.
//! Invariants: Fail-fast; the first error aborts and no partial dataset escapes.
use crate::core::collect::{Collector, RawDataset};
use crate::core::dataset::Dataset;
use crate::core::error::Error;
use crate::core::registry::DimensionRegistry;
use crate::core::roles::assign_roles;
use crate::core::validate::order_dimensions;
use serde::de::{self, DeserializeSeed, Deserializer};
use serde::Deserialize;
use tracing::debug;

pub fn link(raw: RawDataset) -> Result<Dataset, Error> {
    let RawDataset {
        label,
        source,
        updated,
        value,
        dimension,
        id,
        size,
        role,
    } = raw;

    let mut registry = DimensionRegistry::new(dimension.unwrap_or_default());
    assign_roles(&mut registry, &role.unwrap_or_default())?;
    let dimensions = order_dimensions(
        registry,
        &id.unwrap_or_default(),
        &size.unwrap_or_default(),
    )?;

    let values = value.unwrap_or_default();
    debug!(
        dimensions = dimensions.len(),
        values = values.len(),
        "linked dataset"
    );
    Ok(Dataset::assemble(label, source, updated, values, dimensions))
}

impl<'de> Deserialize<'de> for Dataset {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let mut failed = None;
        let raw = Collector::new(&mut failed)
            .deserialize(deserializer)
            .map_err(|err| match failed {
                Some(field) => de::Error::custom(format!(
                    "malformed field `{}`: {err}",
                    field.as_str()
                )),
                None => err,
            })?;
        link(raw).map_err(de::Error::custom)
    }
}
