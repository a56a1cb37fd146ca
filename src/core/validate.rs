//! Purpose: Cross-check the `id` list against the dimension registry and fix dimension order.
//! Exports: `order_dimensions`.
//! Role: Last linking step before assembly; the only place final dimension order is decided.
//! Invariants: Output order equals `id` order; `dimension` key order never leaks through.
//! Invariants: `|id| == |dimension|` and every id is registered, else the call fails.
//! Notes: The `size` list is never enforced against category counts; drift is only logged.
use crate::core::dimension::Dimension;
use crate::core::error::{Error, ErrorKind};
use crate::core::registry::DimensionRegistry;
use tracing::debug;

pub fn order_dimensions(
    mut registry: DimensionRegistry,
    ids: &[String],
    sizes: &[i64],
) -> Result<Vec<Dimension>, Error> {
    if ids.len() != registry.len() {
        return Err(Error::new(ErrorKind::DimensionMismatch)
            .with_message(format!(
                "`id` lists {} dimension(s) but `dimension` defines {}",
                ids.len(),
                registry.len()
            ))
            .with_hint("List every key of `dimension` exactly once in `id`."));
    }

    let mut ordered = Vec::with_capacity(ids.len());
    for id in ids {
        let descriptor = registry.take(id).ok_or_else(|| {
            Error::new(ErrorKind::UnknownDimension)
                .with_message(format!("the dimension with id `{id}` does not exist"))
                .with_field("id")
                .with_dimension(id.as_str())
                .with_hint("Every entry of `id` must be a key of `dimension`.")
        })?;
        ordered.push(Dimension::new(id.as_str(), descriptor));
    }

    log_size_drift(&ordered, sizes);
    Ok(ordered)
}

fn log_size_drift(dimensions: &[Dimension], sizes: &[i64]) {
    if sizes.len() != dimensions.len() {
        debug!(
            declared = sizes.len(),
            dimensions = dimensions.len(),
            "size list length differs from dimension count"
        );
    }
    for (dimension, declared) in dimensions.iter().zip(sizes) {
        if i64::try_from(dimension.size()).ok() != Some(*declared) {
            debug!(
                dimension = dimension.id(),
                declared = *declared,
                categories = dimension.size(),
                "declared size differs from category count"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::order_dimensions;
    use crate::core::dimension::DimensionDescriptor;
    use crate::core::error::ErrorKind;
    use crate::core::registry::DimensionRegistry;
    use std::collections::BTreeMap;

    fn registry(ids: &[&str]) -> DimensionRegistry {
        let entries = ids
            .iter()
            .map(|id| (id.to_string(), DimensionDescriptor::default()))
            .collect::<BTreeMap<_, _>>();
        DimensionRegistry::new(entries)
    }

    fn ids(ids: &[&str]) -> Vec<String> {
        ids.iter().map(|id| id.to_string()).collect()
    }

    #[test]
    fn order_follows_id_list() {
        let ordered =
            order_dimensions(registry(&["a", "b", "c"]), &ids(&["c", "a", "b"]), &[])
                .expect("ordered");
        let order = ordered.iter().map(|d| d.id()).collect::<Vec<_>>();
        assert_eq!(order, ["c", "a", "b"]);
    }

    #[test]
    fn cardinality_mismatch_is_reported() {
        let err = order_dimensions(registry(&["a"]), &ids(&["a", "b"]), &[]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DimensionMismatch);
        assert!(err.message().expect("message").contains("2 dimension(s)"));
    }

    #[test]
    fn unregistered_id_is_unknown() {
        let err = order_dimensions(registry(&["a", "b"]), &ids(&["a", "z"]), &[]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownDimension);
        assert_eq!(err.dimension(), Some("z"));
        assert_eq!(err.field(), Some("id"));
    }

    // The size list is deliberately not enforced against category counts.
    #[test]
    fn size_list_is_not_enforced() {
        let ordered = order_dimensions(registry(&["a"]), &ids(&["a"]), &[99, 7]).expect("ordered");
        assert_eq!(ordered[0].size(), 0);
    }

    #[test]
    fn negative_sizes_are_not_enforced() {
        let ordered = order_dimensions(registry(&["a"]), &ids(&["a"]), &[-1]).expect("ordered");
        assert_eq!(ordered.len(), 1);
    }

    #[test]
    fn empty_inputs_give_no_dimensions() {
        let ordered = order_dimensions(registry(&[]), &[], &[]).expect("ordered");
        assert!(ordered.is_empty());
    }
}
