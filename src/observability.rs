//! Observer hooks for composite dataset operations (merge, concatenation).
//!
//! Implementors can record metrics, forward to logs, or collect events in tests. The library never
//! installs a `tracing` subscriber itself; [`TracingObserver`] only emits events.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use tracing::info;

/// Counters reported when a merge finishes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MergeStats {
    /// Right-hand rows whose key matched a left-hand row.
    pub matched_rows: usize,
    /// Right-hand rows appended because their key had no match.
    pub appended_rows: usize,
    /// Cells of matched rows that were filled from the right-hand side.
    pub filled_cells: usize,
    /// Columns the result has that the left-hand dataset did not.
    pub added_columns: usize,
}

/// Events emitted by composite operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSetEvent {
    /// A merge produced its result.
    MergeFinished { rows: usize, stats: MergeStats },
    /// A concatenation produced its result.
    ConcatFinished {
        left_rows: usize,
        right_rows: usize,
        columns: usize,
    },
}

/// Observer interface for dataset events.
pub trait DataSetObserver: Send + Sync {
    fn on_event(&self, event: &DataSetEvent);
}

/// An observer that fans out callbacks to a list of observers.
#[derive(Default)]
pub struct CompositeObserver {
    observers: Vec<Arc<dyn DataSetObserver>>,
}

impl CompositeObserver {
    /// Create a new composite observer from a list of observers.
    pub fn new(observers: Vec<Arc<dyn DataSetObserver>>) -> Self {
        Self { observers }
    }
}

impl fmt::Debug for CompositeObserver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositeObserver")
            .field("observers_len", &self.observers.len())
            .finish()
    }
}

impl DataSetObserver for CompositeObserver {
    fn on_event(&self, event: &DataSetEvent) {
        for o in &self.observers {
            o.on_event(event);
        }
    }
}

/// Forwards events to `tracing` at info level.
#[derive(Debug, Default)]
pub struct TracingObserver;

impl DataSetObserver for TracingObserver {
    fn on_event(&self, event: &DataSetEvent) {
        match event {
            DataSetEvent::MergeFinished { rows, stats } => info!(
                rows,
                matched = stats.matched_rows,
                appended = stats.appended_rows,
                filled = stats.filled_cells,
                added_columns = stats.added_columns,
                "merge finished"
            ),
            DataSetEvent::ConcatFinished {
                left_rows,
                right_rows,
                columns,
            } => info!(left_rows, right_rows, columns, "concat finished"),
        }
    }
}
