//! Purpose: Collect the top-level fields of a JSON-stat dataset object in one pass.
//! Exports: `Field`, `RawDataset`, `Collector`.
//! Role: First decode phase; buffers each recognized field as present/absent, links nothing.
//! Invariants: Fields are read in arrival order; each value is consumed exactly once.
//! Invariants: Unrecognized keys and `href`/`link`/`version`/`class` are skipped without error.
//! Invariants: A failed recognized field is recorded in the collector's slot before the error returns.
use crate::core::dimension::DimensionDescriptor;
use crate::core::ordered::OrderedPairs;
use serde::de::{self, DeserializeSeed, Deserializer, IgnoredAny, MapAccess, Visitor};
use serde::Deserialize;
use std::collections::{BTreeMap, HashSet};
use std::fmt;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Field {
    Label,
    Source,
    Href,
    Updated,
    Value,
    Dimension,
    Id,
    Size,
    Role,
    Link,
    Version,
    Class,
    Other,
}

impl Field {
    pub fn from_key(key: &str) -> Self {
        match key {
            "label" => Field::Label,
            "source" => Field::Source,
            "href" => Field::Href,
            "updated" => Field::Updated,
            "value" => Field::Value,
            "dimension" => Field::Dimension,
            "id" => Field::Id,
            "size" => Field::Size,
            "role" => Field::Role,
            "link" => Field::Link,
            "version" => Field::Version,
            "class" => Field::Class,
            _ => Field::Other,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Field::Label => "label",
            Field::Source => "source",
            Field::Href => "href",
            Field::Updated => "updated",
            Field::Value => "value",
            Field::Dimension => "dimension",
            Field::Id => "id",
            Field::Size => "size",
            Field::Role => "role",
            Field::Link => "link",
            Field::Version => "version",
            Field::Class => "class",
            Field::Other => "other",
        }
    }
}

/// Every field the collector understands, each `None` until seen.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RawDataset {
    pub label: Option<String>,
    pub source: Option<String>,
    pub updated: Option<OffsetDateTime>,
    pub value: Option<Vec<Option<f64>>>,
    pub dimension: Option<BTreeMap<String, DimensionDescriptor>>,
    pub id: Option<Vec<String>>,
    pub size: Option<Vec<i64>>,
    pub role: Option<Vec<(String, Vec<String>)>>,
}

struct Timestamp(OffsetDateTime);

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        OffsetDateTime::parse(&text, &Rfc3339)
            .map(Timestamp)
            .map_err(|err| de::Error::custom(format!("invalid RFC 3339 timestamp `{text}`: {err}")))
    }
}

/// `id` read as a set: later repeats are dropped, first-arrival order is kept.
struct IdSet(Vec<String>);

impl<'de> Deserialize<'de> for IdSet {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let ids = Vec::<String>::deserialize(deserializer)?;
        let mut seen = HashSet::with_capacity(ids.len());
        let unique = ids
            .into_iter()
            .filter(|id| seen.insert(id.clone()))
            .collect();
        Ok(IdSet(unique))
    }
}

/// Seed that collects a dataset object and reports which field failed, if any.
pub struct Collector<'a> {
    failed: &'a mut Option<Field>,
}

impl<'a> Collector<'a> {
    pub fn new(failed: &'a mut Option<Field>) -> Self {
        Self { failed }
    }

    fn read<'de, M, T>(&mut self, access: &mut M, field: Field) -> Result<T, M::Error>
    where
        M: MapAccess<'de>,
        T: Deserialize<'de>,
    {
        access.next_value::<T>().inspect_err(|_| {
            *self.failed = Some(field);
        })
    }
}

impl<'de> DeserializeSeed<'de> for Collector<'_> {
    type Value = RawDataset;

    fn deserialize<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(self)
    }
}

impl<'de> Visitor<'de> for Collector<'_> {
    type Value = RawDataset;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a JSON-stat dataset object")
    }

    fn visit_map<M>(mut self, mut access: M) -> Result<Self::Value, M::Error>
    where
        M: MapAccess<'de>,
    {
        let mut raw = RawDataset::default();
        while let Some(key) = access.next_key::<String>()? {
            let field = Field::from_key(&key);
            match field {
                Field::Label => raw.label = Some(self.read(&mut access, field)?),
                Field::Source => raw.source = Some(self.read(&mut access, field)?),
                Field::Updated => {
                    let Timestamp(updated) = self.read(&mut access, field)?;
                    raw.updated = Some(updated);
                }
                Field::Value => raw.value = Some(self.read(&mut access, field)?),
                Field::Dimension => raw.dimension = Some(self.read(&mut access, field)?),
                Field::Id => {
                    let IdSet(ids) = self.read(&mut access, field)?;
                    raw.id = Some(ids);
                }
                Field::Size => raw.size = Some(self.read(&mut access, field)?),
                Field::Role => {
                    let roles: OrderedPairs<Vec<String>> = self.read(&mut access, field)?;
                    raw.role = Some(roles.into_inner());
                }
                Field::Href | Field::Link | Field::Version | Field::Class | Field::Other => {
                    access.next_value::<IgnoredAny>()?;
                }
            }
        }
        Ok(raw)
    }
}
