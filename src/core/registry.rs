// Lookup table from dimension id to descriptor, owned by one linking pass.
use crate::core::dimension::DimensionDescriptor;
use std::collections::BTreeMap;

#[derive(Clone, Debug, Default)]
pub struct DimensionRegistry {
    entries: BTreeMap<String, DimensionDescriptor>,
}

impl DimensionRegistry {
    pub fn new(entries: BTreeMap<String, DimensionDescriptor>) -> Self {
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut DimensionDescriptor> {
        self.entries.get_mut(id)
    }

    /// Moves a descriptor out; a second take of the same id yields `None`.
    pub fn take(&mut self, id: &str) -> Option<DimensionDescriptor> {
        self.entries.remove(id)
    }
}

#[cfg(test)]
mod tests {
    use super::DimensionRegistry;
    use crate::core::dimension::DimensionDescriptor;
    use std::collections::BTreeMap;

    #[test]
    fn take_moves_descriptor_out() {
        let mut entries = BTreeMap::new();
        entries.insert("month".to_string(), DimensionDescriptor::default());
        let mut registry = DimensionRegistry::new(entries);
        assert_eq!(registry.len(), 1);
        assert!(registry.take("month").is_some());
        assert!(registry.take("month").is_none());
        assert_eq!(registry.len(), 0);
    }
}
