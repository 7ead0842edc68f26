//! Hash join implementation.
//!
//! Build phase: index the right table's rows by key tuple into a multimap
//! (several right rows may share a key, producing a cross product of
//! matches). Probe phase: scan left rows in order and emit row pairs per
//! the join kind; Right and Full joins afterwards append the right rows
//! that never matched, in right-table order, with the left side
//! null-padded.
//!
//! The output is assembled from the matched index pairs: the left table is
//! gathered wholesale (nested groups included), the key columns are merged
//! in place via tree insertion, and the right payload columns are appended
//! with collision-renamed names.

use rustc_hash::FxHashMap;

use nframe_result::{Error, Result};
use nframe_table::key::{key_tuples, KeyTuple};
use nframe_table::{
    insert_columns, Column, ColumnNameGenerator, ColumnPath, ColumnToInsert, Selector, Table,
    Value, ValueColumn,
};

use crate::{JoinKey, JoinOptions, JoinType};

pub(crate) fn hash_join(
    left: &Table,
    right: &Table,
    keys: &[JoinKey],
    options: &JoinOptions,
) -> Result<Table> {
    let derived_keys;
    let keys: &[JoinKey] = if keys.is_empty() {
        derived_keys = common_keys(left, right)?;
        &derived_keys
    } else {
        keys
    };

    // Resolve and validate every key before any row is scanned.
    let left_key_columns = key_columns(left, keys.iter().map(|k| &k.left))?;
    let right_key_columns = key_columns(right, keys.iter().map(|k| &k.right))?;

    let left_keys = key_tuples(&left_key_columns, left.nrow());
    let right_keys = key_tuples(&right_key_columns, right.nrow());

    // Build phase: multimap over the right side.
    let mut table_map: FxHashMap<KeyTuple, Vec<usize>> = FxHashMap::default();
    for (row, key) in right_keys.into_iter().enumerate() {
        table_map.entry(key).or_default().push(row);
    }
    tracing::debug!(
        build_rows = right.nrow(),
        distinct_keys = table_map.len(),
        "join build phase complete"
    );

    // Semi and Anti never touch right columns; they reduce to a left-row
    // selection.
    match options.join_type {
        JoinType::Semi => {
            let indices: Vec<usize> = left_keys
                .iter()
                .enumerate()
                .filter(|(_, key)| table_map.contains_key(*key))
                .map(|(row, _)| row)
                .collect();
            return left.take_rows(&indices);
        }
        JoinType::Anti => {
            let indices: Vec<usize> = left_keys
                .iter()
                .enumerate()
                .filter(|(_, key)| !table_map.contains_key(*key))
                .map(|(row, _)| row)
                .collect();
            return left.take_rows(&indices);
        }
        _ => {}
    }

    // Probe phase: left rows in order, one output row per matching right
    // row (or one null-padded row for Left/Full misses).
    let mut left_indices: Vec<Option<usize>> = Vec::new();
    let mut right_indices: Vec<Option<usize>> = Vec::new();
    let mut right_matched = vec![false; right.nrow()];
    for (row, key) in left_keys.iter().enumerate() {
        match table_map.get(key) {
            Some(matches) => {
                for &m in matches {
                    left_indices.push(Some(row));
                    right_indices.push(Some(m));
                    right_matched[m] = true;
                }
            }
            None => {
                if matches!(options.join_type, JoinType::Left | JoinType::Full) {
                    left_indices.push(Some(row));
                    right_indices.push(None);
                }
            }
        }
    }
    // Never-matched right rows follow all left-driven rows, in right order.
    if matches!(options.join_type, JoinType::Right | JoinType::Full) {
        for (row, matched) in right_matched.iter().enumerate() {
            if !matched {
                left_indices.push(None);
                right_indices.push(Some(row));
            }
        }
    }

    // Assemble: gather the left schema, merge key columns in place, append
    // the right payload.
    let gathered = left.take_rows_opt(&left_indices)?;
    let key_inserts = keys
        .iter()
        .zip(left_key_columns.iter().zip(&right_key_columns))
        .map(|(key, (left_col, right_col))| match (left_col, right_col) {
            (Column::Value(lv), Column::Value(rv)) => {
                let merged = merge_key_column(lv, &left_indices, rv, &right_indices);
                Ok(ColumnToInsert::new(key.left.clone(), Column::Value(merged)))
            }
            _ => Err(Error::Schema(format!(
                "join key '{}' must be a value column",
                key.left
            ))),
        })
        .collect::<Result<Vec<_>>>()?;
    let mut out = insert_columns(&gathered, key_inserts)?;

    let right_key_selector = Selector::Cols(
        keys.iter()
            .map(|k| Selector::Path(k.right.clone()))
            .collect(),
    );
    let right_payload = right.remove(&right_key_selector)?;
    let right_gathered = right_payload.take_rows_opt(&right_indices)?;
    let mut gen = ColumnNameGenerator::with_reserved(out.column_names());
    for column in right_gathered.columns() {
        let name = gen.add_unique(column.name());
        out = out.with_column(column.clone().with_name(name))?;
    }
    tracing::debug!(
        rows = out.nrow(),
        join_type = %options.join_type,
        "join complete"
    );
    Ok(out)
}

/// Resolve key paths to value columns, in key order.
fn key_columns<'a, 'k>(
    table: &'a Table,
    paths: impl Iterator<Item = &'k ColumnPath>,
) -> Result<Vec<&'a Column>> {
    paths
        .map(|path| {
            let column = table.column_at(path)?;
            match column {
                Column::Value(_) => Ok(column),
                other => Err(Error::Schema(format!(
                    "join key '{}' must be a value column, found a {} column",
                    path,
                    other.kind()
                ))),
            }
        })
        .collect()
}

/// Keys over the top-level value-column names both tables share, in
/// left-table order.
fn common_keys(left: &Table, right: &Table) -> Result<Vec<JoinKey>> {
    let keys: Vec<JoinKey> = left
        .columns()
        .iter()
        .filter(|c| matches!(c, Column::Value(_)))
        .filter(|c| matches!(right.column_by_name(c.name()), Some(Column::Value(_))))
        .map(|c| JoinKey::on(c.name()))
        .collect();
    if keys.is_empty() {
        return Err(Error::InvalidArgument(
            "no common columns to join on; pass explicit join keys".into(),
        ));
    }
    Ok(keys)
}

/// A key column of the output: the left key value where a left row is
/// present, otherwise the right key value (unmatched right rows).
fn merge_key_column(
    left: &ValueColumn,
    left_indices: &[Option<usize>],
    right: &ValueColumn,
    right_indices: &[Option<usize>],
) -> ValueColumn {
    let values = left_indices
        .iter()
        .zip(right_indices)
        .map(|(l, r)| match (l, r) {
            (Some(l), _) => left.value(*l),
            (None, Some(r)) => right.value(*r),
            (None, None) => Value::Null,
        })
        .collect();
    ValueColumn::new(left.name(), values)
}
