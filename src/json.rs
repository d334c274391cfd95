//! Conversion between datasets and in-memory JSON values.
//!
//! Supported shapes:
//! - A JSON array of objects: `[{"a":1}, {"a":2}]`
//! - A single object, treated as one record
//!
//! Reading and writing the JSON text is left to the caller.

use crate::dataset::TabularDataSet;
use crate::error::{DataSetError, DataSetResult};
use crate::types::{Record, Value};

impl Value {
    /// Convert a JSON value into a cell value.
    ///
    /// Integers that fit `i64` become [`Value::Int64`], other numbers [`Value::Float64`]. Arrays
    /// and objects are kept as their compact JSON text in a [`Value::Utf8`].
    pub fn from_json(v: &serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(*b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Int64(i),
                None => n.as_f64().map(Value::Float64).unwrap_or(Value::Null),
            },
            serde_json::Value::String(s) => Value::Utf8(s.clone()),
            other => Value::Utf8(other.to_string()),
        }
    }

    /// Convert a cell value into JSON. [`Value::Absent`] has no JSON form and returns `None`.
    ///
    /// Non-finite floats become `null`.
    pub fn to_json(&self) -> Option<serde_json::Value> {
        let v = match self {
            Value::Absent => return None,
            Value::Null => serde_json::Value::Null,
            Value::Int64(v) => serde_json::Value::from(*v),
            Value::Float64(v) => serde_json::Number::from_f64(*v)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Value::Bool(v) => serde_json::Value::Bool(*v),
            Value::Utf8(s) => serde_json::Value::String(s.clone()),
        };
        Some(v)
    }
}

impl TabularDataSet {
    /// Build a dataset from a JSON array of objects (or a single object).
    ///
    /// Goes through [`TabularDataSet::from_dicts`], so the header is the union of object keys in
    /// order of first appearance.
    pub fn from_json_records(input: &serde_json::Value) -> DataSetResult<Self> {
        let items = match input {
            serde_json::Value::Array(items) => items.as_slice(),
            serde_json::Value::Object(_) => std::slice::from_ref(input),
            _ => {
                return Err(DataSetError::InvalidRecord {
                    message: "json must be an object or an array of objects".to_string(),
                });
            }
        };

        let records = items
            .iter()
            .enumerate()
            .map(|(idx0, item)| -> DataSetResult<Record> {
                let obj = item.as_object().ok_or_else(|| DataSetError::InvalidRecord {
                    message: format!("row {} is not a json object", idx0 + 1),
                })?;
                Ok(obj
                    .iter()
                    .map(|(k, v)| (k.clone(), Value::from_json(v)))
                    .collect::<Record>())
            })
            .collect::<DataSetResult<Vec<_>>>()?;

        Ok(Self::from_dicts(records))
    }

    /// Render the data rows as a JSON array of objects in header order.
    ///
    /// [`Value::Absent`] cells are left out of their object.
    pub fn to_json_records(&self) -> serde_json::Value {
        let rows = self
            .as_dictionaries(None)
            .map(|record| {
                let obj: serde_json::Map<String, serde_json::Value> = record
                    .into_iter()
                    .filter_map(|(k, v)| v.to_json().map(|j| (k, j)))
                    .collect();
                serde_json::Value::Object(obj)
            })
            .collect();
        serde_json::Value::Array(rows)
    }
}
