//! Record model — one row of a dataset, keyed by field name.
//!
//! Records carry no schema. Each value is a JSON value and is turned into text
//! in one of two ways:
//!
//! - **search text** ([`Record::search_text`]) is what the filter lowercases
//!   and matches against. `null` and objects have no search text.
//! - **display text** ([`Record::display_text`]) is what a result row shows.
//!   It never fails for a present field: `null` shows as `null` and objects as
//!   compact JSON.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Name of the field every record must carry.
pub const ID_FIELD: &str = "id";

/// A single dataset row: an arbitrary mapping from field name to value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(Map<String, Value>);

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter, mostly for fixtures and demo data.
    pub fn with(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(field.into(), value.into());
        self
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// All fields in key order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Display text of the `id` field.
    pub fn id(&self) -> Result<String> {
        self.0.get(ID_FIELD).map(display_value).ok_or(Error::MissingId)
    }

    /// Text the search filter matches against, before lowercasing.
    pub fn search_text(&self, field: &str) -> Result<String> {
        let value = self.require(field)?;
        value_text(value).ok_or_else(|| Error::NotStringifiable {
            id: self.id_for_error(),
            field: field.to_string(),
        })
    }

    /// Text shown for `field` in a rendered row.
    pub fn display_text(&self, field: &str) -> Result<String> {
        self.require(field).map(display_value)
    }

    fn require(&self, field: &str) -> Result<&Value> {
        self.0.get(field).ok_or_else(|| Error::MissingField {
            id: self.id_for_error(),
            field: field.to_string(),
        })
    }

    fn id_for_error(&self) -> String {
        self.id().unwrap_or_else(|_| "<no id>".to_string())
    }
}

impl From<Map<String, Value>> for Record {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

// ---------------------------------------------------------------------------
// Value → text
// ---------------------------------------------------------------------------

/// Text form of a scalar (or array of scalars). `None` for `null` and objects.
pub fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(number_text(n)),
        Value::Bool(b) => Some(b.to_string()),
        Value::Array(items) => Some(
            items
                .iter()
                .map(|item| match item {
                    Value::Null => String::new(),
                    other => display_value(other),
                })
                .collect::<Vec<_>>()
                .join(","),
        ),
        Value::Null | Value::Object(_) => None,
    }
}

/// Text form used for display; total over every JSON value.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Object(_) => value.to_string(),
        other => value_text(other).unwrap_or_default(),
    }
}

/// Integral floats print without a fractional part (`2.0` → `2`), matching how
/// the ids arrive from the warehouse database.
fn number_text(n: &serde_json::Number) -> String {
    if n.is_i64() || n.is_u64() {
        return n.to_string();
    }
    match n.as_f64() {
        Some(f) if f == 0.0 => "0".to_string(),
        Some(f) if f.is_finite() && f.fract() == 0.0 && f.abs() < 1e21 => format!("{f:.0}"),
        Some(f) => format!("{f}"),
        None => n.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn scalar_text() {
        assert_eq!(value_text(&json!("Lipitor")).as_deref(), Some("Lipitor"));
        assert_eq!(value_text(&json!(42)).as_deref(), Some("42"));
        assert_eq!(value_text(&json!(-3)).as_deref(), Some("-3"));
        assert_eq!(value_text(&json!(15.5)).as_deref(), Some("15.5"));
        assert_eq!(value_text(&json!(20.0)).as_deref(), Some("20"));
        assert_eq!(value_text(&json!(true)).as_deref(), Some("true"));
    }

    #[test]
    fn arrays_join_with_commas() {
        assert_eq!(value_text(&json!([1, "a", null])).as_deref(), Some("1,a,"));
    }

    #[test]
    fn null_and_objects_have_no_search_text() {
        assert_eq!(value_text(&Value::Null), None);
        assert_eq!(value_text(&json!({"a": 1})), None);
    }

    #[test]
    fn display_is_total() {
        assert_eq!(display_value(&Value::Null), "null");
        assert_eq!(display_value(&json!({"a": 1})), r#"{"a":1}"#);
    }

    #[test]
    fn id_reads_numeric_and_string_ids() {
        assert_eq!(Record::new().with("id", 7).id().unwrap(), "7");
        assert_eq!(Record::new().with("id", "med-7").id().unwrap(), "med-7");
        assert!(matches!(Record::new().id(), Err(Error::MissingId)));
    }

    #[test]
    fn missing_field_names_record_and_field() {
        let record = Record::new().with("id", 3);
        match record.search_text("name") {
            Err(Error::MissingField { id, field }) => {
                assert_eq!(id, "3");
                assert_eq!(field, "name");
            }
            other => panic!("expected MissingField, got {other:?}"),
        }
    }

    #[test]
    fn null_field_is_not_searchable_but_displays() {
        let record = Record::new().with("id", 1).with("address", Value::Null);
        assert!(matches!(
            record.search_text("address"),
            Err(Error::NotStringifiable { .. })
        ));
        assert_eq!(record.display_text("address").unwrap(), "null");
    }

    #[test]
    fn deserializes_from_json_object() {
        let record: Record = serde_json::from_value(json!({"id": 1, "name": "Salt"})).unwrap();
        assert_eq!(record.display_text("name").unwrap(), "Salt");
        assert_eq!(record.len(), 2);
    }
}
