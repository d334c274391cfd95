use std::sync::{Arc, Mutex};

use tabular_dataset::TabularDataSet;
use tabular_dataset::observability::{
    CompositeObserver, DataSetEvent, DataSetObserver, MergeStats, TracingObserver,
};
use tabular_dataset::processing::{MergeOptions, concat_observed, merge, merge_with_options};
use tabular_dataset::types::{Record, Value};
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn grid(header: &[&str], rows: Vec<Vec<Value>>) -> TabularDataSet {
    let mut grid = vec![header.iter().map(|h| Value::from(*h)).collect::<Vec<_>>()];
    grid.extend(rows);
    TabularDataSet::from_grid(grid)
}

fn name_key(record: &Record) -> String {
    record["name"].to_string()
}

#[derive(Default)]
struct RecordingObserver {
    events: Mutex<Vec<DataSetEvent>>,
}

impl DataSetObserver for RecordingObserver {
    fn on_event(&self, event: &DataSetEvent) {
        self.events.lock().unwrap().push(event.clone());
    }
}

#[test]
fn merge_keeps_left_values_and_fills_gaps() {
    init_tracing();
    let a = grid(
        &["name", "value", "value2"],
        vec![
            vec!["bob".into(), 3.into(), Value::Absent],
            vec!["brett".into(), 2.into(), 5.into()],
            vec!["biff".into(), 2.into(), Value::Absent],
        ],
    );
    let b = grid(
        &["name", "value2", "v3"],
        vec![
            vec!["bill".into(), 4.into(), 5.into()],
            vec!["brett".into(), 6.into(), 5.into()],
            vec!["biff".into(), 7.into(), 5.into()],
        ],
    );

    let merged = merge(&a, &b, name_key);

    assert_eq!(merged.header(), ["name", "value", "value2", "v3"]);
    let names: Vec<String> = merged.as_dictionaries(None).map(|r| name_key(&r)).collect();
    assert_eq!(names, ["bob", "brett", "biff", "bill"]);
    assert_eq!(merged.cell(1, "value2").unwrap(), &Value::Int64(5));
    assert_eq!(merged.cell(2, "value2").unwrap(), &Value::Int64(7));
    assert_eq!(merged.cell(0, "v3").unwrap(), &Value::Absent);
    assert_eq!(merged.cell(3, "value").unwrap(), &Value::Absent);
    assert_eq!(merged.cell(3, "v3").unwrap(), &Value::Int64(5));
}

#[test]
fn unmatched_duplicate_right_keys_each_append() {
    let a = grid(&["name"], vec![vec!["bob".into()]]);
    let b = grid(&["name", "x"], vec![vec!["zed".into(), 1.into()], vec!["zed".into(), 2.into()]]);
    let merged = merge(&a, &b, name_key);
    assert_eq!(merged.row_count(), 3);
    assert_eq!(merged.cell(2, "x").unwrap(), &Value::Int64(2));
}

#[test]
fn merge_into_empty_left_appends_everything() {
    let b = grid(&["name"], vec![vec!["a".into()], vec!["b".into()]]);
    let merged = merge(&TabularDataSet::default(), &b, name_key);
    assert_eq!(merged, b);
}

#[test]
fn composite_observer_sees_merge_and_concat() {
    init_tracing();
    let recording = Arc::new(RecordingObserver::default());
    let observers: Vec<Arc<dyn DataSetObserver>> =
        vec![recording.clone(), Arc::new(TracingObserver)];
    let composite = Arc::new(CompositeObserver::new(observers));
    let options = MergeOptions {
        observer: Some(composite.clone()),
        ..Default::default()
    };

    let a = grid(&["name", "v"], vec![vec!["bob".into(), Value::Absent]]);
    let b = grid(&["name", "v"], vec![vec!["bob".into(), 1.into()]]);
    let merged = merge_with_options(&a, &b, name_key, &options);
    let _ = concat_observed(&merged, &b, &*composite);

    let events = recording.events.lock().unwrap().clone();
    assert_eq!(
        events,
        vec![
            DataSetEvent::MergeFinished {
                rows: 1,
                stats: MergeStats {
                    matched_rows: 1,
                    appended_rows: 0,
                    filled_cells: 1,
                    added_columns: 0,
                },
            },
            DataSetEvent::ConcatFinished {
                left_rows: 1,
                right_rows: 1,
                columns: 2,
            },
        ]
    );
}
