use thiserror::Error;

/// Convenience result type for dataset operations.
pub type DataSetResult<T> = Result<T, DataSetError>;

/// Error type returned by [`crate::dataset::TabularDataSet`] operations.
///
/// Failures are local and synchronous: a lookup that names a column or row the dataset does not
/// have, or record input that is not shaped like records.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DataSetError {
    /// The named column is not present in the header.
    #[error("column not found: '{column}'")]
    ColumnNotFound { column: String },

    /// A data row index is past the end of the data rows.
    #[error("row index {row} out of range ({rows} data rows)")]
    RowOutOfRange { row: usize, rows: usize },

    /// Record input could not be interpreted as a list of records.
    #[error("invalid record: {message}")]
    InvalidRecord { message: String },
}

impl DataSetError {
    pub(crate) fn column_not_found(column: impl Into<String>) -> Self {
        Self::ColumnNotFound {
            column: column.into(),
        }
    }
}
