use tabular_dataset::types::{Record, Value};
use tabular_dataset::{DataSetError, TabularDataSet};

fn record(pairs: &[(&str, Value)]) -> Record {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
}

fn people() -> Vec<Record> {
    vec![
        record(&[("id", 1.into()), ("name", "Ada".into()), ("score", 98.5.into())]),
        record(&[("id", 2.into()), ("name", "Grace".into()), ("score", 87.25.into())]),
        record(&[("id", 3.into()), ("name", "Linus".into()), ("score", Value::Null)]),
    ]
}

#[test]
fn uniform_records_round_trip_in_order() {
    let ds = TabularDataSet::from_dicts(people());
    assert_eq!(ds.as_dictionaries(None).collect::<Vec<_>>(), people());
}

#[test]
fn ragged_records_read_back_absent() {
    let ds = TabularDataSet::from_dicts(vec![
        record(&[("a", 1.into())]),
        record(&[("b", 2.into()), ("a", 3.into())]),
    ]);
    let out: Vec<Record> = ds.as_dictionaries(None).collect();
    assert_eq!(ds.header(), ["a", "b"]);
    assert_eq!(out[0]["b"], Value::Absent);
    assert_eq!(out[1]["b"], Value::Int64(2));
}

#[test]
fn from_dicts_with_default_fills_missing_keys() {
    let ds = TabularDataSet::from_dicts_with_default(
        vec![record(&[("a", 1.into())]), record(&[("b", 2.into())])],
        Value::Null,
    );
    assert_eq!(ds.data_rows()[0], vec![Value::Int64(1), Value::Null]);
    assert_eq!(ds.data_rows()[1], vec![Value::Null, Value::Int64(2)]);
}

#[test]
fn empty_record_list_gives_empty_dataset() {
    let ds = TabularDataSet::from_dicts(Vec::new());
    assert!(ds.header().is_empty());
    assert_eq!(ds.as_dictionaries(None).count(), 0);
}

#[test]
fn derive_then_rederive_keeps_column_count() {
    let mut ds = TabularDataSet::from_dicts(people());
    ds.add_derived_column("passed", |r| Value::from(r["score"].as_f64().map(|s| s >= 90.0)));
    assert_eq!(ds.column_count(), 4);
    assert_eq!(ds.cell(0, "passed").unwrap(), &Value::Bool(true));
    assert_eq!(ds.cell(1, "passed").unwrap(), &Value::Bool(false));
    assert_eq!(ds.cell(2, "passed").unwrap(), &Value::Null);

    ds.add_derived_column("name", |r| Value::from(r["name"].to_string().to_uppercase()));
    assert_eq!(ds.column_count(), 4);
    assert_eq!(ds.header(), ["id", "score", "passed", "name"]);
    assert_eq!(ds.cell(1, "name").unwrap(), &Value::from("GRACE"));
}

#[test]
fn remove_column_shrinks_every_row() {
    let mut ds = TabularDataSet::from_dicts(people());
    ds.remove_column("name").unwrap();
    assert_eq!(ds.header(), ["id", "score"]);
    assert!(ds.data_rows().iter().all(|row| row.len() == 2));
}

#[test]
fn append_row_with_new_column_extends_old_rows() {
    let mut ds = TabularDataSet::from_dicts(vec![
        record(&[("a", 1.into()), ("b", 2.into())]),
        record(&[("a", 1.into()), ("b", 2.into())]),
    ]);
    ds.append_row([("c", 0)]);
    assert_eq!(ds.column_count(), 3);
    assert_eq!(
        ds.data_rows()[2],
        vec![Value::Absent, Value::Absent, Value::Int64(0)]
    );
    assert_eq!(ds.data_rows()[0][2], Value::Absent);
    assert_eq!(ds.data_rows()[1][2], Value::Absent);
}

#[test]
fn filter_uses_the_index_field_and_reports_removed_rows() {
    let mut ds = TabularDataSet::from_dicts(people());
    let removed = ds.filter(|r| r["__index"].as_i64() == Some(1) || r["score"].is_null());
    assert_eq!(removed, 2);
    assert_eq!(ds.row_count(), 1);
    assert_eq!(ds.cell(0, "name").unwrap(), &Value::from("Grace"));
}

#[test]
fn update_and_replace_fail_on_missing_columns() {
    let mut ds = TabularDataSet::from_dicts(people());
    assert_eq!(
        ds.update(0, [("nope", 1)]).unwrap_err(),
        DataSetError::ColumnNotFound {
            column: "nope".to_string()
        }
    );
    assert!(ds.rename_column("nope", "x").is_err());
    assert!(ds.replace_column("nope", "x", |_| Value::Null).is_err());
    assert_eq!(ds, TabularDataSet::from_dicts(people()));
}

#[test]
fn error_messages_name_the_column() {
    let mut ds = TabularDataSet::from_dicts(people());
    let msg = ds.remove_column("missing").unwrap_err().to_string();
    assert_eq!(msg, "column not found: 'missing'");
}

#[test]
fn addition_of_a_copy_doubles_rows() {
    let ds = TabularDataSet::from_dicts(people());
    let doubled = &ds + &ds.deep_copy();
    assert_eq!(doubled.header(), ds.header());
    assert_eq!(doubled.row_count(), 6);
    let mut expected = people();
    expected.extend(people());
    assert_eq!(doubled.as_dictionaries(None).collect::<Vec<_>>(), expected);
}

#[test]
fn owned_addition_consumes_both_sides() {
    let left = TabularDataSet::from_dicts(vec![record(&[("a", 1.into())])]);
    let right = TabularDataSet::from_dicts(vec![record(&[("b", 2.into())])]);
    let out = left + right;
    assert_eq!(out.header(), ["a", "b"]);
    assert_eq!(out.data_rows()[1], vec![Value::Absent, Value::Int64(2)]);
}

#[test]
fn clear_data_keeps_header() {
    let mut ds = TabularDataSet::from_dicts(people());
    ds.clear_data();
    assert!(ds.data_rows().is_empty());
    assert_eq!(ds.header(), ["id", "name", "score"]);
}

#[test]
fn grid_round_trip() {
    let ds = TabularDataSet::from_dicts(people());
    let grid = ds.to_grid();
    assert_eq!(grid.len(), 4);
    assert_eq!(grid[0][1], Value::from("name"));
    assert_eq!(TabularDataSet::from_grid(grid), ds);
}
