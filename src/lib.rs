//! `tabular-dataset` is a small in-memory table: a header of column names over positional rows
//! ([`dataset::TabularDataSet`]), convertible to and from records (name -> value maps), with
//! in-place column/row transformations and a key-based merge of two tables.
//!
//! There is no I/O layer. Callers load data into a grid, records, or a JSON value and hand it
//! over; results come back the same way.
//!
//! ## Values
//!
//! Cells are [`types::Value`]s. [`types::Value::Absent`] means "no value" (a key a record did
//! not have, a column added after the row was written) and is distinct from
//! [`types::Value::Null`], a null stored as data. Merges only fill `Absent` cells by default.
//!
//! ## Quick example: records in, transformations, records out
//!
//! ```rust
//! use tabular_dataset::dataset::TabularDataSet;
//! use tabular_dataset::types::{Record, Value};
//!
//! let records: Vec<Record> = vec![
//!     Record::from_iter([("id".to_string(), Value::from(1)), ("name".to_string(), Value::from("ada"))]),
//!     Record::from_iter([("id".to_string(), Value::from(2)), ("city".to_string(), Value::from("paris"))]),
//! ];
//! let mut ds = TabularDataSet::from_dicts(records);
//! assert_eq!(ds.header(), ["id", "name", "city"]);
//!
//! // Derived column computed from each row's record.
//! ds.add_derived_column("id_x10", |r| Value::from(r["id"].as_i64().unwrap_or(0) * 10));
//!
//! // New keys become new columns.
//! ds.append_row([("id", Value::from(3)), ("zip", Value::from("75001"))]);
//! assert_eq!(ds.header(), ["id", "name", "city", "id_x10", "zip"]);
//!
//! // `filter` removes the rows the predicate matches.
//! let removed = ds.filter(|r| r["name"].is_absent());
//! assert_eq!(removed, 2);
//!
//! let out: Vec<Record> = ds.as_dictionaries(None).collect();
//! assert_eq!(out[0]["id_x10"], Value::Int64(10));
//! ```
//!
//! ## Modules
//!
//! - [`dataset`]: the [`dataset::TabularDataSet`] type and its operations
//! - [`processing`]: merge and concatenation of two datasets
//! - [`records`]: record <-> row conversion helpers
//! - [`json`]: conversion to and from `serde_json::Value`
//! - [`observability`]: observer hooks for composite operations
//! - [`types`]: cell values and records
//! - [`error`]: error types

pub mod dataset;
pub mod error;
pub mod json;
pub mod observability;
pub mod processing;
pub mod records;
pub mod types;

pub use dataset::TabularDataSet;
pub use error::{DataSetError, DataSetResult};
