//! Wire-shape records returned by the object-relational service.
//!
//! Relational fields arrive either as an `[id, "display label"]` pair or as
//! the literal `false` when the relation is unset. They are decoded into an
//! explicit tagged option instead of being truthiness-checked downstream.

use chrono::NaiveDate;
use serde::de::{self, Deserializer};
use serde::ser::SerializeTuple;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

/// A resolved foreign-key reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationRef {
    pub id: i64,
    pub display_name: String,
}

/// One row of a record-list fetch, field names as on the wire.
#[derive(Debug, Clone, Deserialize)]
pub struct RawRecord {
    pub id: i64,
    pub name: String,
    #[serde(default, deserialize_with = "relation_or_absent")]
    pub partner_id: Option<RelationRef>,
    #[serde(default, deserialize_with = "relation_or_absent")]
    pub user_id: Option<RelationRef>,
    #[serde(default, deserialize_with = "relation_or_absent")]
    pub stage_id: Option<RelationRef>,
    #[serde(default, deserialize_with = "date_or_absent")]
    pub date_start: Option<NaiveDate>,
    /// End date; the wire name is historical.
    #[serde(default, deserialize_with = "date_or_absent", rename = "date")]
    pub date_end: Option<NaiveDate>,
    #[serde(default = "default_active")]
    pub active: bool,
    #[serde(default)]
    pub task_count: u32,
    #[serde(default)]
    pub task_count_with_subtasks: u32,
}

fn default_active() -> bool {
    true
}

/// Accepts `[id, "label"]`, `false` or `null`.
fn relation_or_absent<'de, D>(deserializer: D) -> Result<Option<RelationRef>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    match value {
        Value::Null | Value::Bool(false) => Ok(None),
        Value::Array(items) => {
            let id = items
                .first()
                .and_then(Value::as_i64)
                .ok_or_else(|| de::Error::custom("relation pair is missing a numeric id"))?;
            let display_name = items
                .get(1)
                .and_then(Value::as_str)
                .ok_or_else(|| de::Error::custom("relation pair is missing a display label"))?
                .to_string();
            Ok(Some(RelationRef { id, display_name }))
        }
        other => Err(de::Error::custom(format!(
            "unexpected relation encoding: {other}"
        ))),
    }
}

/// Accepts `"YYYY-MM-DD"`, `false` or `null`.
fn date_or_absent<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    match value {
        Value::Null | Value::Bool(false) => Ok(None),
        Value::String(s) => s
            .parse::<NaiveDate>()
            .map(Some)
            .map_err(|e| de::Error::custom(format!("invalid date {s:?}: {e}"))),
        other => Err(de::Error::custom(format!(
            "unexpected date encoding: {other}"
        ))),
    }
}

/// One predicate of a record filter, serialized as a `[field, op, value]`
/// triple the way the host query language expects it.
#[derive(Debug, Clone, PartialEq)]
pub struct DomainTerm {
    pub field: String,
    pub op: String,
    pub value: Value,
}

impl DomainTerm {
    pub fn new(field: &str, op: &str, value: impl Into<Value>) -> Self {
        Self {
            field: field.to_string(),
            op: op.to_string(),
            value: value.into(),
        }
    }

    /// Equality predicate, the common case.
    pub fn eq(field: &str, value: impl Into<Value>) -> Self {
        Self::new(field, "=", value)
    }
}

impl Serialize for DomainTerm {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut triple = serializer.serialize_tuple(3)?;
        triple.serialize_element(&self.field)?;
        triple.serialize_element(&self.op)?;
        triple.serialize_element(&self.value)?;
        triple.end()
    }
}
