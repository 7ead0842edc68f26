//! Integration tests for group-by, distinct and grouped-table consumption.

use nframe_table::{
    Column, ColumnKind, ColumnPath, Error, Selector, Table, Value,
};

/// Twelve days of temperatures, cities interleaved.
fn weather_table() -> Table {
    Table::new(vec![
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
    .unwrap()
}

fn int_values(table: &Table, name: &str) -> Vec<i64> {
    table.rows().map(|r| r.int(name).unwrap()).collect()
}

#[test]
fn group_by_keeps_first_occurrence_key_order() {
    let table = weather_table();
    let grouped = table.group_by(&Selector::name("city")).unwrap();

    assert_eq!(grouped.len(), 2);
    let keys = grouped.keys();
    let cities: Vec<String> = keys
        .rows()
        .map(|r| r.str("city").unwrap().to_string())
        .collect();
    assert_eq!(cities, ["Moscow", "London"], "first-seen key order");
}

#[test]
fn group_cells_preserve_original_row_order() {
    let table = weather_table();
    let grouped = table.group_by(&Selector::name("city")).unwrap();

    let moscow = grouped.group(0).unwrap();
    assert_eq!(int_values(moscow, "day"), [1, 3, 6, 4, 2, 5]);
    assert_eq!(int_values(moscow, "temp"), [14, 18, 16, 13, 20, 10]);

    let london = grouped.group(1).unwrap();
    assert_eq!(int_values(london, "day"), [1, 3, 6, 4, 2, 5]);
}

#[test]
fn group_by_conserves_row_count() {
    let table = weather_table();
    let grouped = table.group_by(&Selector::name("city")).unwrap();
    let total: usize = grouped.groups().iter().map(Table::nrow).sum();
    assert_eq!(total, table.nrow());
}

#[test]
fn group_by_partition_is_exhaustive_and_disjoint() {
    let table = weather_table();
    let grouped = table
        .group_by(&Selector::names(["city", "day"]))
        .unwrap();

    // Every (city, day) pair is unique here, so every group has one row.
    assert_eq!(grouped.len(), 12);
    let total: usize = grouped.groups().iter().map(Table::nrow).sum();
    assert_eq!(total, 12);
}

#[test]
fn spec_worked_example() {
    // city=[Moscow,London,Moscow], day=[1,1,2], temp=[14,10,18]
    let table = Table::new(vec![
        Column::of("city", vec!["Moscow", "London", "Moscow"]),
        Column::of("day", vec![1i64, 1, 2]),
        Column::of("temp", vec![14i64, 10, 18]),
    ])
    .unwrap();

    let grouped = table.group_by(&Selector::name("city")).unwrap();
    assert_eq!(grouped.len(), 2);

    let moscow = grouped.group(0).unwrap();
    assert_eq!(int_values(moscow, "day"), [1, 2]);
    assert_eq!(int_values(moscow, "temp"), [14, 18]);

    let london = grouped.group(1).unwrap();
    assert_eq!(int_values(london, "day"), [1]);
}

#[test]
fn null_keys_group_together() {
    let table = Table::new(vec![
        Column::of("k", vec![Some("a"), None, Some("a"), None]),
        Column::of("v", vec![1i64, 2, 3, 4]),
    ])
    .unwrap();
    let grouped = table.group_by(&Selector::name("k")).unwrap();

    assert_eq!(grouped.len(), 2);
    assert_eq!(
        grouped.keys().value_at(1, &ColumnPath::name("k")).unwrap(),
        Value::Null
    );
    assert_eq!(int_values(grouped.group(1).unwrap(), "v"), [2, 4]);
}

#[test]
fn nested_keys_surface_at_shortened_paths() {
    let address = Table::new(vec![
        Column::of("city", vec!["London", "Tokyo", "London"]),
        Column::of("zip", vec!["E1", "100", "N7"]),
    ])
    .unwrap();
    let table = Table::new(vec![
        Column::of("name", vec!["Alice", "Bob", "Carol"]),
        Column::group("address", address),
    ])
    .unwrap();

    let grouped = table.group_by(&Selector::path("address/city")).unwrap();
    assert_eq!(grouped.len(), 2);
    assert_eq!(grouped.keys().column_names(), ["city"]);
    assert_eq!(
        grouped.keys().value_at(0, &ColumnPath::name("city")).unwrap(),
        Value::from("London")
    );
}

#[test]
fn groups_column_name_avoids_key_collisions() {
    let table = Table::new(vec![
        Column::of("groups", vec!["a", "b", "a"]),
        Column::of("v", vec![1i64, 2, 3]),
    ])
    .unwrap();
    let grouped = table.group_by(&Selector::name("groups")).unwrap();
    assert_eq!(grouped.groups_column_name(), "groups1");
    assert_eq!(grouped.table().column_names(), ["groups", "groups1"]);
}

#[test]
fn grouping_by_a_frame_column_is_a_schema_error() {
    let table = weather_table();
    let grouped = table.group_by(&Selector::name("city")).unwrap().into_table();
    let err = grouped.group_by(&Selector::name("groups")).unwrap_err();
    assert!(matches!(err, Error::Schema(_)));
}

#[test]
fn group_by_needs_at_least_one_key() {
    let table = weather_table();
    let err = table.group_by(&Selector::Cols(vec![])).unwrap_err();
    assert!(matches!(err, Error::InvalidArgument(_)));
}

#[test]
fn group_by_unknown_column_is_a_schema_error() {
    let table = weather_table();
    let err = table.group_by(&Selector::name("country")).unwrap_err();
    assert!(matches!(err, Error::Schema(_)));
}

#[test]
fn group_by_empty_table_yields_zero_groups() {
    let table = Table::new(vec![
        Column::of("city", Vec::<&str>::new()),
        Column::of("temp", Vec::<i64>::new()),
    ])
    .unwrap();
    let grouped = table.group_by(&Selector::name("city")).unwrap();
    assert_eq!(grouped.len(), 0);
    assert_eq!(grouped.keys().column_names(), ["city"]);
}

#[test]
fn grouped_contents_are_frame_cells() {
    let table = weather_table();
    let grouped = table.group_by(&Selector::name("city")).unwrap();
    let frame_col = grouped
        .table()
        .column_by_name(grouped.groups_column_name())
        .unwrap();
    assert_eq!(frame_col.kind(), ColumnKind::Frame);
}

#[test]
fn concat_flattens_groups_in_group_order() {
    let table = weather_table();
    let grouped = table.group_by(&Selector::name("city")).unwrap();
    let flattened = grouped.concat().unwrap();

    assert_eq!(flattened.nrow(), 12);
    let cities: Vec<String> = flattened
        .rows()
        .map(|r| r.str("city").unwrap().to_string())
        .collect();
    assert_eq!(&cities[..6], ["Moscow"; 6]);
    assert_eq!(&cities[6..], ["London"; 6]);
}

#[test]
fn distinct_by_keeps_first_occurrences() {
    let table = weather_table();
    let distinct = table.distinct_by(&Selector::name("city")).unwrap();

    assert_eq!(distinct.nrow(), 2);
    assert_eq!(int_values(&distinct, "day"), [1, 1]);
    assert_eq!(int_values(&distinct, "temp"), [14, 10], "rows 0 and 1 survive");
}

#[test]
fn distinct_is_idempotent() {
    let table = weather_table();
    let once = table.distinct_by(&Selector::name("city")).unwrap();
    let twice = once.distinct_by(&Selector::name("city")).unwrap();
    assert_eq!(once, twice);
}

#[test]
fn distinct_over_unique_rows_is_identity() {
    let table = weather_table();
    let distinct = table.distinct().unwrap();
    assert_eq!(distinct, table);
}

#[test]
fn count_distinct_matches_materialized_cardinality() {
    let table = weather_table();
    assert_eq!(table.count_distinct_by(&Selector::name("city")).unwrap(), 2);
    assert_eq!(table.count_distinct_by(&Selector::name("day")).unwrap(), 6);
    assert_eq!(table.count_distinct().unwrap(), 12);
}

#[test]
fn distinct_treats_nulls_as_equal_keys() {
    let table = Table::new(vec![
        Column::of("k", vec![None::<&str>, None, Some("a")]),
        Column::of("v", vec![1i64, 2, 3]),
    ])
    .unwrap();
    let distinct = table.distinct_by(&Selector::name("k")).unwrap();
    assert_eq!(distinct.nrow(), 2);
    assert_eq!(int_values(&distinct, "v"), [1, 3]);
}

#[test]
fn grouping_a_grouped_table_by_keys_works() {
    // Group keys of a previous grouping are ordinary columns.
    let table = weather_table();
    let grouped = table.group_by(&Selector::name("city")).unwrap();
    let regrouped = grouped.keys().group_by(&Selector::name("city")).unwrap();
    assert_eq!(regrouped.len(), 2);
}
