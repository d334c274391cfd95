//! Key-based merge of two [`TabularDataSet`]s.

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::dataset::TabularDataSet;
use crate::observability::{DataSetEvent, DataSetObserver, MergeStats};
use crate::types::{DEFAULT_INDEX_FIELD, Record, Value};

/// Which cells of a matched left-hand row the right-hand side may fill.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FillPolicy {
    /// Only [`Value::Absent`] cells.
    #[default]
    AbsentOnly,
    /// [`Value::Absent`] and stored [`Value::Null`] cells.
    AbsentOrNull,
}

impl FillPolicy {
    fn accepts(self, current: &Value) -> bool {
        match self {
            FillPolicy::AbsentOnly => current.is_absent(),
            FillPolicy::AbsentOrNull => current.is_absent() || current.is_null(),
        }
    }
}

/// Options controlling [`merge_with_options`].
///
/// Use [`Default`] for the plain [`merge`] behavior. The observer is not part of the serialized
/// form.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MergeOptions {
    /// Field carrying the row position in the left-hand records given to the key function.
    pub index_field: String,
    /// Which existing cells a matched right-hand row may fill.
    pub fill_policy: FillPolicy,
    /// Optional observer notified with [`DataSetEvent::MergeFinished`].
    #[serde(skip)]
    pub observer: Option<Arc<dyn DataSetObserver>>,
}

impl fmt::Debug for MergeOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MergeOptions")
            .field("index_field", &self.index_field)
            .field("fill_policy", &self.fill_policy)
            .field("observer_set", &self.observer.is_some())
            .finish()
    }
}

impl Default for MergeOptions {
    fn default() -> Self {
        Self {
            index_field: DEFAULT_INDEX_FIELD.to_string(),
            fill_policy: FillPolicy::default(),
            observer: None,
        }
    }
}

/// Merge `right` into a copy of `left`, correlating rows by `key_fn`.
///
/// Equivalent to [`merge_with_options`] with [`MergeOptions::default`].
///
/// ```rust
/// use tabular_dataset::dataset::TabularDataSet;
/// use tabular_dataset::processing::merge;
/// use tabular_dataset::types::Value;
///
/// let left = TabularDataSet::from_grid(vec![
///     vec!["name".into(), "score".into()],
///     vec!["ada".into(), Value::Absent],
/// ]);
/// let right = TabularDataSet::from_grid(vec![
///     vec!["name".into(), "score".into()],
///     vec!["ada".into(), 9.into()],
///     vec!["grace".into(), 7.into()],
/// ]);
///
/// let merged = merge(&left, &right, |r| r.get("name").map(|v| v.to_string()));
/// assert_eq!(merged.row_count(), 2);
/// assert_eq!(merged.cell(0, "score").unwrap(), &Value::Int64(9));
/// ```
pub fn merge<F, K>(left: &TabularDataSet, right: &TabularDataSet, key_fn: F) -> TabularDataSet
where
    F: FnMut(&Record) -> K,
    K: Eq + Hash,
{
    merge_with_options(left, right, key_fn, &MergeOptions::default())
}

/// Merge `right` into a copy of `left`, correlating rows by `key_fn`.
///
/// - Every left-hand row is indexed by `key_fn` applied to its record (which also carries
///   [`MergeOptions::index_field`]). If several left rows share a key, the last one is matched.
/// - A right-hand row whose key has no match is appended with
///   [`TabularDataSet::append_row`], adding any new columns.
/// - For a matched right-hand row, each of its columns is added if new, then its value is written
///   into the matched row only where the current cell is accepted by
///   [`MergeOptions::fill_policy`]. Left-hand values are never overwritten otherwise, and an
///   [`Value::Absent`] right-hand value never fills anything.
///
/// Output rows: the left rows in order, then unmatched right rows in order. Neither input is
/// modified.
pub fn merge_with_options<F, K>(
    left: &TabularDataSet,
    right: &TabularDataSet,
    mut key_fn: F,
    options: &MergeOptions,
) -> TabularDataSet
where
    F: FnMut(&Record) -> K,
    K: Eq + Hash,
{
    let mut merged = left.deep_copy();
    let left_columns = merged.column_count();

    let existing: HashMap<K, usize> = merged
        .as_dictionaries(Some(options.index_field.as_str()))
        .enumerate()
        .map(|(row, record)| (key_fn(&record), row))
        .collect();

    let mut stats = MergeStats::default();
    for record in right.as_dictionaries(None) {
        let Some(&row) = existing.get(&key_fn(&record)) else {
            merged.append_row(record);
            stats.appended_rows += 1;
            continue;
        };

        stats.matched_rows += 1;
        for (column, value) in record {
            merged.add_column(&column);
            if value.is_absent() {
                continue;
            }
            let Some(idx) = merged.column_index(&column) else {
                continue;
            };
            let fillable = merged.data_rows()[row]
                .get(idx)
                .is_none_or(|current| options.fill_policy.accepts(current));
            if fillable {
                merged.write_cell(row, idx, value);
                stats.filled_cells += 1;
            }
        }
    }
    stats.added_columns = merged.column_count().saturating_sub(left_columns);

    debug!(
        rows = merged.row_count(),
        matched = stats.matched_rows,
        appended = stats.appended_rows,
        filled = stats.filled_cells,
        "merged datasets"
    );
    if let Some(observer) = &options.observer {
        observer.on_event(&DataSetEvent::MergeFinished {
            rows: merged.row_count(),
            stats,
        });
    }
    merged
}
