//! Purpose: Shared dataset JSON serializers for the CLI commands.
//! Exports: `summary_json` and `normalized_json`.
//! Role: Keep output envelope shape consistent across `inspect` and `normalize`.
//! Invariants: Stable key names for v0 payloads; optional keys are omitted, never null.
//! Invariants: `normalized_json` output decodes back to an equal dataset.

use jsonstat::api::{Dataset, Dimension, Error, ErrorKind, Role};
use serde_json::{Map, Value, json};
use time::format_description::well_known::Rfc3339;

pub(crate) fn summary_json(dataset: &Dataset) -> Result<Value, Error> {
    let mut map = Map::new();
    if let Some(label) = dataset.label() {
        map.insert("label".to_string(), json!(label));
    }
    if let Some(source) = dataset.source() {
        map.insert("source".to_string(), json!(source));
    }
    if let Some(updated) = updated_json(dataset)? {
        map.insert("updated".to_string(), updated);
    }
    let missing = dataset.values().iter().filter(|value| value.is_none()).count();
    map.insert("value_count".to_string(), json!(dataset.values().len()));
    map.insert("missing_count".to_string(), json!(missing));
    map.insert(
        "dimensions".to_string(),
        Value::Array(dataset.dimensions().iter().map(dimension_summary_json).collect()),
    );
    Ok(Value::Object(map))
}

fn dimension_summary_json(dimension: &Dimension) -> Value {
    let mut map = Map::new();
    map.insert("id".to_string(), json!(dimension.id()));
    if let Some(label) = dimension.label() {
        map.insert("label".to_string(), json!(label));
    }
    map.insert("size".to_string(), json!(dimension.size()));
    if let Some(role) = dimension.role() {
        map.insert("role".to_string(), json!(role.as_str()));
    }
    Value::Object(map)
}

pub(crate) fn normalized_json(dataset: &Dataset) -> Result<Value, Error> {
    let mut map = Map::new();
    map.insert("version".to_string(), json!("2.0"));
    map.insert("class".to_string(), json!("dataset"));
    if let Some(label) = dataset.label() {
        map.insert("label".to_string(), json!(label));
    }
    if let Some(source) = dataset.source() {
        map.insert("source".to_string(), json!(source));
    }
    if let Some(updated) = updated_json(dataset)? {
        map.insert("updated".to_string(), updated);
    }
    map.insert("id".to_string(), json!(dataset.dimension_ids()));
    map.insert("size".to_string(), json!(dataset.sizes()));

    let mut roles = Map::new();
    for role in Role::ALL {
        let ids = dataset.role_dimensions(role);
        if !ids.is_empty() {
            roles.insert(role.as_str().to_string(), json!(ids));
        }
    }
    if !roles.is_empty() {
        map.insert("role".to_string(), Value::Object(roles));
    }

    let mut dimensions = Map::new();
    for dimension in dataset.dimensions() {
        dimensions.insert(dimension.id().to_string(), dimension_json(dimension));
    }
    map.insert("dimension".to_string(), Value::Object(dimensions));
    map.insert("value".to_string(), json!(dataset.values()));
    Ok(Value::Object(map))
}

fn dimension_json(dimension: &Dimension) -> Value {
    let category = dimension.category();
    let mut inner = Map::new();
    inner.insert("index".to_string(), json!(category.ids()));
    if !category.labels().is_empty() {
        inner.insert("label".to_string(), json!(category.labels()));
    }

    let mut map = Map::new();
    if let Some(label) = dimension.label() {
        map.insert("label".to_string(), json!(label));
    }
    map.insert("category".to_string(), Value::Object(inner));
    Value::Object(map)
}

fn updated_json(dataset: &Dataset) -> Result<Option<Value>, Error> {
    let Some(updated) = dataset.updated() else {
        return Ok(None);
    };
    let text = updated.format(&Rfc3339).map_err(|err| {
        Error::new(ErrorKind::Internal)
            .with_message("failed to format `updated` as RFC 3339")
            .with_source(err)
    })?;
    Ok(Some(json!(text)))
}

#[cfg(test)]
mod tests {
    use super::{normalized_json, summary_json};
    use jsonstat::api::from_str;

    const DOC: &str = r#"{
        "version": "2.0",
        "class": "dataset",
        "label": "Population by region and year",
        "source": "Statistics Norway",
        "updated": "2024-03-01T10:00:00Z",
        "id": ["year", "region"],
        "size": [2, 2],
        "role": {"time": ["year"], "GEO": ["region"]},
        "dimension": {
            "region": {"label": "Region", "category": {"index": {"n": 0, "s": 1}, "label": {"n": "North", "s": "South"}}},
            "year": {"category": {"index": ["2023", "2024"]}}
        },
        "value": [1, null, 3.5, 4]
    }"#;

    #[test]
    fn summary_has_stable_fields() {
        let dataset = from_str(DOC).expect("dataset");
        let value = summary_json(&dataset).expect("summary");
        assert_eq!(value["label"], "Population by region and year");
        assert_eq!(value["updated"], "2024-03-01T10:00:00Z");
        assert_eq!(value["value_count"], 4);
        assert_eq!(value["missing_count"], 1);
        assert_eq!(value["dimensions"][0]["id"], "year");
        assert_eq!(value["dimensions"][0]["role"], "time");
        assert_eq!(value["dimensions"][1]["label"], "Region");
        assert_eq!(value["dimensions"][1]["size"], 2);
        assert!(value["dimensions"][0].get("label").is_none());
    }

    #[test]
    fn normalized_output_decodes_to_equal_dataset() {
        let dataset = from_str(DOC).expect("dataset");
        let value = normalized_json(&dataset).expect("normalized");
        assert_eq!(value["id"], serde_json::json!(["year", "region"]));
        assert_eq!(value["size"], serde_json::json!([2, 2]));
        assert_eq!(value["role"]["geo"], serde_json::json!(["region"]));
        assert_eq!(value["value"][1], serde_json::Value::Null);

        let again = from_str(&value.to_string()).expect("redecode");
        assert_eq!(again, dataset);
    }

    #[test]
    fn empty_dataset_normalizes_minimally() {
        let dataset = from_str("{}").expect("dataset");
        let value = normalized_json(&dataset).expect("normalized");
        assert!(value.get("label").is_none());
        assert!(value.get("role").is_none());
        assert_eq!(value["id"], serde_json::json!([]));
        assert_eq!(value["value"], serde_json::json!([]));
    }
}
