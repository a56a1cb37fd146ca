//! Purpose: Dimension descriptors, categories, and the fixed role enumeration.
//! Exports: `Role`, `Category`, `DimensionDescriptor`, `Dimension`.
//! Role: Value types shared by the collector (descriptors) and the dataset (dimensions).
//! Invariants: Role names resolve case-insensitively; anything else is `InvalidRole`.
//! Invariants: A dimension's size is the number of its category ids.
use crate::core::error::{Error, ErrorKind};
use crate::core::ordered::OrderedPairs;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Role {
    Time,
    Geo,
    Metric,
    Classification,
}

impl Role {
    pub const ALL: [Role; 4] = [Role::Time, Role::Geo, Role::Metric, Role::Classification];

    /// Lower-case wire name, as written in a `role` object.
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Time => "time",
            Role::Geo => "geo",
            Role::Metric => "metric",
            Role::Classification => "classification",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = Error;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name.to_uppercase().as_str() {
            "TIME" => Ok(Role::Time),
            "GEO" => Ok(Role::Geo),
            "METRIC" => Ok(Role::Metric),
            "CLASSIFICATION" => Ok(Role::Classification),
            _ => {
                let known = Role::ALL
                    .iter()
                    .map(|role| role.as_str())
                    .collect::<Vec<_>>()
                    .join(", ");
                Err(Error::new(ErrorKind::InvalidRole)
                    .with_message(format!("unknown role `{name}`"))
                    .with_role(name)
                    .with_hint(format!("Role names are one of: {known} (case-insensitive).")))
            }
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CategoryIndex {
    Ids(Vec<String>),
    Positions(OrderedPairs<usize>),
}

#[derive(Deserialize)]
struct RawCategory {
    #[serde(default)]
    index: Option<CategoryIndex>,
    #[serde(default)]
    label: Option<OrderedPairs<String>>,
}

/// Category set of one dimension: ids in index order plus their labels.
#[derive(Clone, Debug, Default, Eq, PartialEq, Deserialize)]
#[serde(from = "RawCategory")]
pub struct Category {
    ids: Vec<String>,
    labels: BTreeMap<String, String>,
}

impl From<RawCategory> for Category {
    fn from(raw: RawCategory) -> Self {
        let labels = raw.label.map(OrderedPairs::into_inner).unwrap_or_default();
        let ids = match raw.index {
            Some(CategoryIndex::Ids(ids)) => ids,
            Some(CategoryIndex::Positions(positions)) => {
                let mut positions = positions.into_inner();
                positions.sort_by_key(|(_, position)| *position);
                positions.into_iter().map(|(id, _)| id).collect()
            }
            None => labels.iter().map(|(id, _)| id.clone()).collect(),
        };
        Self {
            ids,
            labels: labels.into_iter().collect(),
        }
    }
}

impl Category {
    pub fn new(ids: Vec<String>, labels: BTreeMap<String, String>) -> Self {
        Self { ids, labels }
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn label(&self, id: &str) -> Option<&str> {
        self.labels.get(id).map(String::as_str)
    }

    pub fn labels(&self) -> &BTreeMap<String, String> {
        &self.labels
    }

    /// Position of a category id within the index.
    pub fn position(&self, id: &str) -> Option<usize> {
        self.ids.iter().position(|candidate| candidate == id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// One entry of the `dimension` object, before it is bound to an id.
#[derive(Clone, Debug, Default, Eq, PartialEq, Deserialize)]
pub struct DimensionDescriptor {
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub category: Category,
    #[serde(skip)]
    pub role: Option<Role>,
}

impl DimensionDescriptor {
    pub fn with_role(&mut self, role: Role) {
        self.role = Some(role);
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Dimension {
    id: String,
    label: Option<String>,
    role: Option<Role>,
    category: Category,
}

impl Dimension {
    pub fn new(id: impl Into<String>, descriptor: DimensionDescriptor) -> Self {
        Self {
            id: id.into(),
            label: descriptor.label,
            role: descriptor.role,
            category: descriptor.category,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn role(&self) -> Option<Role> {
        self.role
    }

    pub fn size(&self) -> usize {
        self.category.len()
    }

    pub fn category(&self) -> &Category {
        &self.category
    }
}

#[cfg(test)]
mod tests {
    use super::{Category, DimensionDescriptor, Role};
    use crate::core::error::ErrorKind;

    #[test]
    fn role_names_are_case_insensitive() {
        for name in ["metric", "METRIC", "Metric", "mEtRiC"] {
            assert_eq!(name.parse::<Role>().expect("role"), Role::Metric);
        }
        assert_eq!("Classification".parse::<Role>().expect("role"), Role::Classification);
    }

    #[test]
    fn role_names_fold_unicode_case() {
        assert_eq!("t\u{131}me".parse::<Role>().expect("role"), Role::Time);
        assert_eq!(
            "\u{ff2d}etric".parse::<Role>().unwrap_err().kind(),
            ErrorKind::InvalidRole
        );
    }

    #[test]
    fn unknown_role_is_invalid() {
        let err = "bogus".parse::<Role>().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidRole);
        assert_eq!(err.role(), Some("bogus"));
        assert!(err.hint().expect("hint").contains("geo"));
    }

    #[test]
    fn category_index_array_keeps_order() {
        let category: Category = serde_json::from_str(
            r#"{"index":["b","a"],"label":{"a":"Alpha","b":"Beta"}}"#,
        )
        .expect("category");
        assert_eq!(category.ids(), ["b", "a"]);
        assert_eq!(category.label("a"), Some("Alpha"));
        assert_eq!(category.position("a"), Some(1));
    }

    #[test]
    fn category_index_object_sorts_by_position() {
        let category: Category =
            serde_json::from_str(r#"{"index":{"y":1,"x":0,"z":2}}"#).expect("category");
        assert_eq!(category.ids(), ["x", "y", "z"]);
        assert!(category.labels().is_empty());
    }

    #[test]
    fn category_without_index_uses_label_keys() {
        let category: Category =
            serde_json::from_str(r#"{"label":{"only":"Only one"},"unit":{}}"#).expect("category");
        assert_eq!(category.ids(), ["only"]);
        assert_eq!(category.len(), 1);
    }

    #[test]
    fn descriptor_ignores_unknown_members() {
        let descriptor: DimensionDescriptor = serde_json::from_str(
            r#"{"label":"Month","category":{"index":["2024-01"]},"link":{},"extension":1}"#,
        )
        .expect("descriptor");
        assert_eq!(descriptor.label.as_deref(), Some("Month"));
        assert_eq!(descriptor.category.len(), 1);
        assert_eq!(descriptor.role, None);
    }

    #[test]
    fn descriptor_rejects_wrong_shape() {
        assert!(serde_json::from_str::<DimensionDescriptor>(r#"{"label":3}"#).is_err());
        assert!(serde_json::from_str::<DimensionDescriptor>(r#""month""#).is_err());
    }
}
