use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// One metadata entry, keyed by field name.
pub type Record = BTreeMap<String, FieldValue>;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Scalar(String),
    List(Vec<ListItem>),
    /// Numbers, booleans, nulls and nested objects.
    Other(Value),
}

/// One entry of a list field. Entries are decoded independently so a
/// malformed one never hides its neighbours.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ListItem {
    Text(String),
    Link(Link),
    Other(Value),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Link {
    pub rel: String,
    pub href: String,
}

impl ListItem {
    pub fn as_link(&self) -> Option<&Link> {
        match self {
            ListItem::Link(link) => Some(link),
            _ => None,
        }
    }

    fn to_cell(&self) -> String {
        match self {
            ListItem::Text(s) => s.clone(),
            ListItem::Link(link) => link.href.clone(),
            ListItem::Other(value) => value_cell(value),
        }
    }
}

impl FieldValue {
    /// Render the value as a single CSV cell.
    pub fn to_cell(&self) -> String {
        match self {
            FieldValue::Scalar(s) => s.clone(),
            FieldValue::List(items) => items
                .iter()
                .map(ListItem::to_cell)
                .collect::<Vec<_>>()
                .join(", "),
            FieldValue::Other(value) => value_cell(value),
        }
    }
}

fn value_cell(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// The records endpoint answers with either a bare array or an object
/// wrapping the array in `results`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ApiResponse {
    Bare(Vec<RawRecord>),
    Wrapped {
        #[serde(default)]
        results: Vec<RawRecord>,
    },
}

/// Some entries arrive wrapped in a one-element list.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum RawRecord {
    Single(Record),
    Nested(Vec<Record>),
}

impl RawRecord {
    pub fn normalize(self) -> Option<Record> {
        match self {
            RawRecord::Single(record) => Some(record),
            RawRecord::Nested(records) => records.into_iter().next(),
        }
    }
}

impl ApiResponse {
    pub fn into_records(self) -> Vec<Record> {
        let raw = match self {
            ApiResponse::Bare(raw) => raw,
            ApiResponse::Wrapped { results } => results,
        };
        raw.into_iter().filter_map(RawRecord::normalize).collect()
    }
}
