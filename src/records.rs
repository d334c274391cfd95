//! Conversions between [`Record`]s and positional rows.
//!
//! These helpers are what [`crate::dataset::TabularDataSet`] uses to build a grid out of records
//! and to hand rows to callbacks as records.

use indexmap::IndexSet;

use crate::types::{Record, Value};

/// Every key of every record, in order, repeats included.
pub fn all_keys(records: &[Record]) -> impl Iterator<Item = &str> {
    records
        .iter()
        .flat_map(|record| record.keys().map(String::as_str))
}

/// Union of record keys, ordered by first appearance (record by record, then key by key).
pub fn header_of(records: &[Record]) -> Vec<String> {
    let unique: IndexSet<&str> = all_keys(records).collect();
    unique.into_iter().map(str::to_string).collect()
}

/// Project `record` onto `header`, using `default` for keys the record does not have.
pub fn ordered_row(record: &Record, header: &[String], default: &Value) -> Vec<Value> {
    header
        .iter()
        .map(|name| record.get(name).cloned().unwrap_or_else(|| default.clone()))
        .collect()
}

/// [`ordered_row`] for every record.
pub fn records_to_rows(records: &[Record], header: &[String], default: &Value) -> Vec<Vec<Value>> {
    records
        .iter()
        .map(|record| ordered_row(record, header, default))
        .collect()
}

/// View a positional row as a record.
///
/// Positions past the end of a short row read as [`Value::Absent`]; cells past the end of the
/// header are ignored. A duplicated header name keeps its first position.
pub fn record_of(header: &[String], row: &[Value]) -> Record {
    let mut record = Record::with_capacity(header.len());
    for (i, name) in header.iter().enumerate() {
        if record.contains_key(name) {
            continue;
        }
        record.insert(name.clone(), row.get(i).cloned().unwrap_or_default());
    }
    record
}
