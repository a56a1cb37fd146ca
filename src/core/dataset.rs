//! Purpose: The assembled, immutable dataset and its read-only accessors.
//! Exports: `Dataset`.
//! Role: Sole durable output of decoding; built only by `link`.
//! Invariants: Dimension order is the canonical `id` order.
//! Invariants: No mutation after assembly; every accessor borrows.
use crate::core::dimension::{Dimension, Role};
use time::OffsetDateTime;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Dataset {
    label: Option<String>,
    source: Option<String>,
    updated: Option<OffsetDateTime>,
    values: Vec<Option<f64>>,
    dimensions: Vec<Dimension>,
}

impl Dataset {
    pub(crate) fn assemble(
        label: Option<String>,
        source: Option<String>,
        updated: Option<OffsetDateTime>,
        values: Vec<Option<f64>>,
        dimensions: Vec<Dimension>,
    ) -> Self {
        Self {
            label,
            source,
            updated,
            values,
            dimensions,
        }
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    pub fn updated(&self) -> Option<OffsetDateTime> {
        self.updated
    }

    /// Observations in row-major order; `None` marks a missing value.
    pub fn values(&self) -> &[Option<f64>] {
        &self.values
    }

    pub fn dimensions(&self) -> &[Dimension] {
        &self.dimensions
    }

    pub fn dimension(&self, id: &str) -> Option<&Dimension> {
        self.dimensions.iter().find(|dimension| dimension.id() == id)
    }

    pub fn dimension_ids(&self) -> Vec<&str> {
        self.dimensions.iter().map(Dimension::id).collect()
    }

    pub fn sizes(&self) -> Vec<usize> {
        self.dimensions.iter().map(Dimension::size).collect()
    }

    /// Ids of the dimensions carrying `role`, in dimension order.
    pub fn role_dimensions(&self, role: Role) -> Vec<&str> {
        self.dimensions
            .iter()
            .filter(|dimension| dimension.role() == Some(role))
            .map(Dimension::id)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::Dataset;
    use crate::core::dimension::{Category, Dimension, DimensionDescriptor, Role};
    use std::collections::BTreeMap;

    fn dimension(id: &str, categories: &[&str], role: Option<Role>) -> Dimension {
        let mut descriptor = DimensionDescriptor {
            category: Category::new(
                categories.iter().map(|c| c.to_string()).collect(),
                BTreeMap::new(),
            ),
            ..DimensionDescriptor::default()
        };
        if let Some(role) = role {
            descriptor.with_role(role);
        }
        Dimension::new(id, descriptor)
    }

    #[test]
    fn default_dataset_is_empty() {
        let dataset = Dataset::default();
        assert_eq!(dataset.label(), None);
        assert_eq!(dataset.source(), None);
        assert_eq!(dataset.updated(), None);
        assert!(dataset.values().is_empty());
        assert!(dataset.dimensions().is_empty());
    }

    #[test]
    fn accessors_follow_dimension_order() {
        let dataset = Dataset::assemble(
            Some("Population".to_string()),
            None,
            None,
            vec![Some(1.0), None, Some(3.0), Some(4.0)],
            vec![
                dimension("region", &["north", "south"], Some(Role::Geo)),
                dimension("year", &["2023", "2024"], Some(Role::Time)),
                dimension("sex", &["all"], None),
            ],
        );
        assert_eq!(dataset.label(), Some("Population"));
        assert_eq!(dataset.dimension_ids(), ["region", "year", "sex"]);
        assert_eq!(dataset.sizes(), [2, 2, 1]);
        assert_eq!(dataset.role_dimensions(Role::Time), ["year"]);
        assert!(dataset.role_dimensions(Role::Metric).is_empty());
        assert_eq!(dataset.dimension("sex").expect("sex").role(), None);
        assert!(dataset.dimension("age").is_none());
    }
}
