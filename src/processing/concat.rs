//! Row concatenation of two [`TabularDataSet`]s.

use tracing::debug;

use crate::dataset::TabularDataSet;
use crate::observability::{DataSetEvent, DataSetObserver};

/// Returns a copy of `left` with every row of `right` appended.
///
/// This is the free-function form of `&left + &right`. Columns only `right` has are added to the
/// result, with [`crate::types::Value::Absent`] in the rows that came from `left`.
pub fn concat(left: &TabularDataSet, right: &TabularDataSet) -> TabularDataSet {
    let out = left + right;
    debug!(
        left_rows = left.row_count(),
        right_rows = right.row_count(),
        columns = out.column_count(),
        "concatenated datasets"
    );
    out
}

/// [`concat`], reporting [`DataSetEvent::ConcatFinished`] to `observer`.
pub fn concat_observed(
    left: &TabularDataSet,
    right: &TabularDataSet,
    observer: &dyn DataSetObserver,
) -> TabularDataSet {
    let out = concat(left, right);
    observer.on_event(&DataSetEvent::ConcatFinished {
        left_rows: left.row_count(),
        right_rows: right.row_count(),
        columns: out.column_count(),
    });
    out
}
