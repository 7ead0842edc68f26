//! Integration tests for grouped aggregation.

use nframe_aggregate::{aggregate, AggregateSpec};
use nframe_table::{Column, ColumnPath, Error, GroupedTable, Selector, Table, Value};

fn weather_grouped() -> GroupedTable {
    let table = Table::new(vec![
        Column::of(
            "city",
            vec![
                "Moscow", "London", "Moscow", "London", "Moscow", "London", "Moscow", "London",
                "Moscow", "London", "Moscow", "London",
            ],
        ),
        Column::of("day", vec![1i64, 1, 3, 3, 6, 6, 4, 4, 2, 2, 5, 5]),
        Column::of("temp", vec![14i64, 10, 18, 16, 16, 23, 13, 22, 20, 15, 10, 18]),
    ])
    .unwrap();
    table.group_by(&Selector::name("city")).unwrap()
}

fn value(table: &Table, row: usize, name: &str) -> Value {
    table.value_at(row, &ColumnPath::name(name)).unwrap()
}

#[test]
fn count_sum_min_max_per_group() {
    let grouped = weather_grouped();
    let result = aggregate(
        &grouped,
        &[
            AggregateSpec::count_rows("n"),
            AggregateSpec::sum("total", "temp"),
            AggregateSpec::min("coldest", "temp"),
            AggregateSpec::max("warmest", "temp"),
        ],
    )
    .unwrap();

    assert_eq!(result.nrow(), 2);
    assert_eq!(
        result.column_names(),
        ["city", "n", "total", "coldest", "warmest"]
    );

    // Moscow: 14+18+16+13+20+10
    assert_eq!(value(&result, 0, "n"), Value::Int(6));
    assert_eq!(value(&result, 0, "total"), Value::Int(91));
    assert_eq!(value(&result, 0, "coldest"), Value::Int(10));
    assert_eq!(value(&result, 0, "warmest"), Value::Int(20));

    // London: 10+16+23+22+15+18
    assert_eq!(value(&result, 1, "total"), Value::Int(104));
    assert_eq!(value(&result, 1, "warmest"), Value::Int(23));
}

#[test]
fn mean_widens_to_float() {
    let grouped = weather_grouped();
    let result = aggregate(&grouped, &[AggregateSpec::mean("avg", "temp")]).unwrap();

    let moscow = value(&result, 0, "avg").as_float().unwrap();
    assert!((moscow - 91.0 / 6.0).abs() < 1e-9);
    let london = value(&result, 1, "avg").as_float().unwrap();
    assert!((london - 104.0 / 6.0).abs() < 1e-9);
}

#[test]
fn counts_split_nulls_from_values() {
    let table = Table::new(vec![
        Column::of("k", vec!["a", "a", "b"]),
        Column::of("v", vec![Some(1i64), None, None]),
    ])
    .unwrap();
    let grouped = table.group_by(&Selector::name("k")).unwrap();
    let result = aggregate(
        &grouped,
        &[
            AggregateSpec::count("present", "v"),
            AggregateSpec::count_nulls("missing", "v"),
            AggregateSpec::sum("total", "v"),
        ],
    )
    .unwrap();

    assert_eq!(value(&result, 0, "present"), Value::Int(1));
    assert_eq!(value(&result, 0, "missing"), Value::Int(1));
    assert_eq!(value(&result, 0, "total"), Value::Int(1));

    // The all-null group sums to null.
    assert_eq!(value(&result, 1, "present"), Value::Int(0));
    assert_eq!(value(&result, 1, "total"), Value::Null);
}

#[test]
fn aliases_collide_with_keys_and_get_suffixed() {
    let grouped = weather_grouped();
    let result = aggregate(&grouped, &[AggregateSpec::count_rows("city")]).unwrap();
    assert_eq!(result.column_names(), ["city", "city1"]);
}

#[test]
fn sum_over_strings_is_a_type_mismatch() {
    let grouped = weather_grouped();
    let err = aggregate(&grouped, &[AggregateSpec::sum("s", "city")]).unwrap_err();
    assert!(matches!(err, Error::TypeMismatch { .. }));
}

#[test]
fn unknown_column_is_a_schema_error() {
    let grouped = weather_grouped();
    let err = aggregate(&grouped, &[AggregateSpec::sum("s", "missing")]).unwrap_err();
    assert!(matches!(err, Error::Schema(_)));
}

#[test]
fn min_and_max_order_strings_lexicographically() {
    let table = Table::new(vec![
        Column::of("k", vec!["x", "x"]),
        Column::of("s", vec!["pear", "apple"]),
    ])
    .unwrap();
    let grouped = table.group_by(&Selector::name("k")).unwrap();
    let result = aggregate(
        &grouped,
        &[
            AggregateSpec::min("first", "s"),
            AggregateSpec::max("last", "s"),
        ],
    )
    .unwrap();
    assert_eq!(value(&result, 0, "first"), Value::from("apple"));
    assert_eq!(value(&result, 0, "last"), Value::from("pear"));
}
