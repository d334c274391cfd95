//! The [`TabularDataSet`] type: a header of column names over positional rows.

use std::ops::Add;
use std::slice;

use tracing::{debug, trace};

use crate::error::{DataSetError, DataSetResult};
use crate::records::{header_of, record_of, records_to_rows};
use crate::types::{DEFAULT_INDEX_FIELD, Record, Value};

static ABSENT: Value = Value::Absent;

/// In-memory tabular dataset.
///
/// Storage is a header (column names, duplicates tolerated; lookups use the first match) plus
/// row-major cells. Rows may be physically shorter than the header; missing trailing cells read
/// as [`Value::Absent`].
///
/// All mutations happen in place. Use [`TabularDataSet::deep_copy`] (or `clone`) to keep an
/// untouched original.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TabularDataSet {
    header: Vec<String>,
    rows: Vec<Vec<Value>>,
}

/// A row paired with its record view, handed to column callbacks.
///
/// Callbacks read by name through `indexed` while writes go back positionally into `raw`.
struct DataPair<'a> {
    raw: &'a mut Vec<Value>,
    indexed: Record,
}

fn data_pairs<'a>(
    header: &'a [String],
    rows: &'a mut [Vec<Value>],
) -> impl Iterator<Item = DataPair<'a>> + 'a {
    rows.iter_mut().map(move |raw| {
        let indexed = record_of(header, raw);
        DataPair { raw, indexed }
    })
}

impl TabularDataSet {
    /// Create a dataset from a header and data rows. No shape validation is done.
    pub fn new(header: Vec<String>, rows: Vec<Vec<Value>>) -> Self {
        Self { header, rows }
    }

    /// Create a dataset from a raw grid whose first row is the header.
    ///
    /// Header cells that are not [`Value::Utf8`] use their display form as the column name.
    pub fn from_grid(grid: Vec<Vec<Value>>) -> Self {
        let mut grid = grid.into_iter();
        let header = grid
            .next()
            .map(|cells| {
                cells
                    .into_iter()
                    .map(|cell| match cell {
                        Value::Utf8(name) => name,
                        other => other.to_string(),
                    })
                    .collect()
            })
            .unwrap_or_default();
        Self {
            header,
            rows: grid.collect(),
        }
    }

    /// Build a dataset from records.
    ///
    /// The header is the union of all keys in order of first appearance; keys a record lacks are
    /// filled with [`Value::Absent`].
    pub fn from_dicts<I>(records: I) -> Self
    where
        I: IntoIterator<Item = Record>,
    {
        Self::from_dicts_with_default(records, Value::Absent)
    }

    /// Like [`TabularDataSet::from_dicts`], filling missing keys with `default`.
    pub fn from_dicts_with_default<I>(records: I, default: Value) -> Self
    where
        I: IntoIterator<Item = Record>,
    {
        let records: Vec<Record> = records.into_iter().collect();
        let header = header_of(&records);
        let rows = records_to_rows(&records, &header, &default);
        Self { header, rows }
    }

    /// Column names in order.
    pub fn header(&self) -> &[String] {
        &self.header
    }

    /// Data rows (everything below the header).
    pub fn data_rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    /// Number of data rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of header columns.
    pub fn column_count(&self) -> usize {
        self.header.len()
    }

    /// Position of the first header column named `name`.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.header.iter().position(|h| h == name)
    }

    /// Returns `true` if the header contains `name`.
    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// The cell at `column` in data row `row_index`. Cells past the end of a short row are
    /// [`Value::Absent`].
    pub fn cell(&self, row_index: usize, column: &str) -> DataSetResult<&Value> {
        let idx = self.first_index_of(column)?;
        let row = self.rows.get(row_index).ok_or(DataSetError::RowOutOfRange {
            row: row_index,
            rows: self.rows.len(),
        })?;
        Ok(row.get(idx).unwrap_or(&ABSENT))
    }

    /// The raw grid: header as a row of [`Value::Utf8`] followed by the data rows.
    pub fn to_grid(&self) -> Vec<Vec<Value>> {
        if self.header.is_empty() && self.rows.is_empty() {
            return Vec::new();
        }
        let mut grid = Vec::with_capacity(self.rows.len() + 1);
        grid.push(self.header.iter().cloned().map(Value::Utf8).collect());
        grid.extend(self.rows.iter().cloned());
        grid
    }

    /// Consume the dataset into `(header, rows)`.
    pub fn into_parts(self) -> (Vec<String>, Vec<Vec<Value>>) {
        (self.header, self.rows)
    }

    /// Fully independent copy of this dataset.
    pub fn deep_copy(&self) -> Self {
        self.clone()
    }

    /// Append an empty column named `name`, giving every row an [`Value::Absent`] cell.
    ///
    /// Does nothing if the header already has `name`. Returns whether a column was added.
    pub fn add_column(&mut self, name: &str) -> bool {
        if self.has_column(name) {
            return false;
        }
        self.add_derived_column(name, |_| Value::Absent);
        true
    }

    /// Append a column whose value in each row is `method(record)`.
    ///
    /// `method` sees the row as it was before the new cell is added, so it never sees its own
    /// column. If `name` was already in the header, that earlier column is dropped afterwards:
    /// the column ends up recomputed at the end of the header.
    pub fn add_derived_column<F>(&mut self, name: &str, mut method: F)
    where
        F: FnMut(&Record) -> Value,
    {
        let existed = self.has_column(name);
        let width = self.header.len();
        for pair in data_pairs(&self.header, &mut self.rows) {
            let value = method(&pair.indexed);
            pair.raw.resize(width, Value::Absent);
            pair.raw.push(value);
        }
        self.header.push(name.to_string());
        trace!(column = name, rows = self.rows.len(), "derived column added");

        if existed {
            // First match is the pre-existing column, not the one just pushed.
            if let Some(first) = self.column_index(name) {
                self.remove_at(first);
            }
        }
    }

    /// Remove the first column named `name` from the header and every row.
    pub fn remove_column(&mut self, name: &str) -> DataSetResult<()> {
        let idx = self.first_index_of(name)?;
        self.remove_at(idx);
        debug!(column = name, "column removed");
        Ok(())
    }

    fn remove_at(&mut self, idx: usize) {
        self.header.remove(idx);
        for row in &mut self.rows {
            if idx < row.len() {
                row.remove(idx);
            }
        }
    }

    /// Remove every data row for which `predicate` returns `true`.
    ///
    /// The predicate sees each row as a record carrying an extra [`DEFAULT_INDEX_FIELD`] entry
    /// with the row's 1-based position. Rows are removed by position, so identical rows are
    /// judged independently. Returns the number of removed rows.
    pub fn filter<F>(&mut self, mut predicate: F) -> usize
    where
        F: FnMut(&Record) -> bool,
    {
        let matches: Vec<bool> = self
            .as_dictionaries(Some(DEFAULT_INDEX_FIELD))
            .map(|record| predicate(&record))
            .collect();
        let before = self.rows.len();
        let mut matches = matches.into_iter();
        self.rows.retain(|_| !matches.next().unwrap_or(false));
        let removed = before - self.rows.len();
        debug!(removed, remaining = self.rows.len(), "rows filtered");
        removed
    }

    /// Overwrite cells of data row `row_index` (0-based) with the values in `patch`.
    ///
    /// Every column and the row index are checked before anything is written, so a failed update
    /// leaves the dataset untouched.
    pub fn update<I, K, V>(&mut self, row_index: usize, patch: I) -> DataSetResult<()>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<Value>,
    {
        let rows = self.rows.len();
        if row_index >= rows {
            return Err(DataSetError::RowOutOfRange {
                row: row_index,
                rows,
            });
        }
        let writes = patch
            .into_iter()
            .map(|(k, v)| -> DataSetResult<(usize, Value)> {
                Ok((self.first_index_of(k.as_ref())?, v.into()))
            })
            .collect::<DataSetResult<Vec<_>>>()?;

        let row = &mut self.rows[row_index];
        for (idx, value) in writes {
            set_cell(row, idx, value);
        }
        Ok(())
    }

    /// Recompute column `old_name` as `method(record)` for every row, then rename it to
    /// `new_name` in place.
    ///
    /// Each row's record is taken before that row's cell is overwritten. To rename without
    /// recomputing, use [`TabularDataSet::rename_column`].
    pub fn replace_column<F>(
        &mut self,
        old_name: &str,
        new_name: &str,
        mut method: F,
    ) -> DataSetResult<()>
    where
        F: FnMut(&Record) -> Value,
    {
        let idx = self.first_index_of(old_name)?;
        for pair in data_pairs(&self.header, &mut self.rows) {
            let value = method(&pair.indexed);
            set_cell(pair.raw, idx, value);
        }
        self.header[idx] = new_name.to_string();
        Ok(())
    }

    /// Rename the first column named `old_name`. Cell data is untouched.
    pub fn rename_column(&mut self, old_name: &str, new_name: &str) -> DataSetResult<()> {
        let idx = self.first_index_of(old_name)?;
        self.header[idx] = new_name.to_string();
        Ok(())
    }

    /// Drop every data row, keeping the header.
    pub fn clear_data(&mut self) {
        self.rows.clear();
    }

    /// Append a row given as (column, value) pairs.
    ///
    /// Keys the header does not have yet become new trailing columns (in the record's order)
    /// before the row is added; existing rows get [`Value::Absent`] for them. Columns the record
    /// does not mention are [`Value::Absent`] in the new row.
    pub fn append_row<I, K, V>(&mut self, record: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        let mut cells = Vec::new();
        for (k, v) in record {
            let k = k.into();
            self.add_column(&k);
            cells.push((k, v.into()));
        }

        let mut row = vec![Value::Absent; self.header.len()];
        for (k, v) in cells {
            if let Some(idx) = self.column_index(&k) {
                row[idx] = v;
            }
        }
        self.rows.push(row);
    }

    /// Iterate the data rows as records.
    ///
    /// The iterator is lazy and borrows the dataset; call again to start over. With
    /// `index_field`, every record also carries that field set to the row's 1-based position
    /// (replacing a column of the same name).
    pub fn as_dictionaries<'a>(&'a self, index_field: Option<&'a str>) -> Records<'a> {
        Records {
            header: &self.header,
            rows: self.rows.iter(),
            index_field,
            position: 0,
        }
    }

    pub(crate) fn write_cell(&mut self, row_index: usize, column_index: usize, value: Value) {
        if let Some(row) = self.rows.get_mut(row_index) {
            set_cell(row, column_index, value);
        }
    }

    fn first_index_of(&self, name: &str) -> DataSetResult<usize> {
        self.column_index(name)
            .ok_or_else(|| DataSetError::column_not_found(name))
    }
}

fn set_cell(row: &mut Vec<Value>, idx: usize, value: Value) {
    if row.len() <= idx {
        row.resize(idx + 1, Value::Absent);
    }
    row[idx] = value;
}

/// Lazy iterator over a dataset's rows as [`Record`]s, from [`TabularDataSet::as_dictionaries`].
#[derive(Debug, Clone)]
pub struct Records<'a> {
    header: &'a [String],
    rows: slice::Iter<'a, Vec<Value>>,
    index_field: Option<&'a str>,
    position: usize,
}

impl Iterator for Records<'_> {
    type Item = Record;

    fn next(&mut self) -> Option<Record> {
        let row = self.rows.next()?;
        self.position += 1;
        let mut record = record_of(self.header, row);
        if let Some(field) = self.index_field {
            record.insert(field.to_string(), Value::Int64(self.position as i64));
        }
        Some(record)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.rows.size_hint()
    }
}

impl ExactSizeIterator for Records<'_> {}

/// Concatenate: a copy of `self` with every row of `other` appended through
/// [`TabularDataSet::append_row`]. Columns only `other` has are added to the result.
impl Add<&TabularDataSet> for &TabularDataSet {
    type Output = TabularDataSet;

    fn add(self, other: &TabularDataSet) -> TabularDataSet {
        self.deep_copy() + other
    }
}

impl Add<&TabularDataSet> for TabularDataSet {
    type Output = TabularDataSet;

    fn add(mut self, other: &TabularDataSet) -> TabularDataSet {
        for record in other.as_dictionaries(None) {
            self.append_row(record);
        }
        self
    }
}

impl Add for TabularDataSet {
    type Output = TabularDataSet;

    fn add(self, other: TabularDataSet) -> TabularDataSet {
        self + &other
    }
}
