//! Operations that combine two datasets.
//!
//! These are built only on [`crate::dataset::TabularDataSet`]'s public API (deep copy, record
//! iteration, row append, column addition) and never modify their inputs.
//!
//! Currently implemented:
//!
//! - [`merge()`] / [`merge_with_options()`]: key-based merge that fills absent cells
//! - [`concat()`]: row concatenation (the `+` operator)
//!
//! ## Example: merge two record sets by name
//!
//! ```rust
//! use tabular_dataset::dataset::TabularDataSet;
//! use tabular_dataset::processing::merge;
//! use tabular_dataset::types::{Record, Value};
//!
//! fn record(name: &str, column: &str, value: i64) -> Record {
//!     Record::from_iter([
//!         ("name".to_string(), Value::from(name)),
//!         (column.to_string(), Value::from(value)),
//!     ])
//! }
//!
//! let people = TabularDataSet::from_dicts(vec![record("bob", "age", 30), record("ann", "age", 41)]);
//! let scores = TabularDataSet::from_dicts(vec![record("ann", "score", 9), record("cid", "score", 4)]);
//!
//! let merged = merge(&people, &scores, |r| r.get("name").map(Value::to_string));
//! assert_eq!(merged.header(), ["name", "age", "score"]);
//! assert_eq!(merged.row_count(), 3);
//! assert_eq!(merged.cell(1, "score").unwrap(), &Value::Int64(9));
//! assert_eq!(merged.cell(2, "age").unwrap(), &Value::Absent);
//! ```

pub mod concat;
pub mod merge;

pub use concat::{concat, concat_observed};
pub use merge::{FillPolicy, MergeOptions, merge, merge_with_options};
