//! Key tuples: the hash/equality normalization of row values used by
//! group-by, distinct and join.

use std::sync::Arc;

use rayon::prelude::*;

use nframe_result::{Error, Result};

use crate::column::Column;
use crate::constants::PARALLEL_ROW_THRESHOLD;
use crate::path::ColumnPath;
use crate::value::Value;

/// A single key component, with hash and equality defined for every kind.
///
/// Nulls are regular matchable values: `Null == Null` is true. Floats are
/// compared and hashed by bit pattern, so `NaN` keys compare equal to
/// themselves and `-0.0` is distinct from `0.0`. A group-column cell
/// contributes its leaf values as a nested `Row`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum KeyValue {
    Null,
    Bool(bool),
    Int(i64),
    /// Bit representation of an `f64`.
    Float(u64),
    Str(Arc<str>),
    /// One nested group cell: the key values of the group's columns.
    Row(Vec<KeyValue>),
}

impl KeyValue {
    pub fn from_value(value: &Value) -> KeyValue {
        match value {
            Value::Null => KeyValue::Null,
            Value::Bool(v) => KeyValue::Bool(*v),
            Value::Int(v) => KeyValue::Int(*v),
            Value::Float(v) => KeyValue::Float(v.to_bits()),
            Value::Str(v) => KeyValue::Str(v.clone()),
        }
    }
}

/// One row's key: the ordered key values of the selected columns.
pub type KeyTuple = Vec<KeyValue>;

/// Key value of `column` at `row`.
///
/// Frame columns must be rejected with [`ensure_keyable`] before rows are
/// scanned; for them this returns `Null`.
pub fn key_value(column: &Column, row: usize) -> KeyValue {
    match column {
        Column::Value(col) => KeyValue::from_value(&col.value(row)),
        Column::Group(col) => KeyValue::Row(
            col.table()
                .columns()
                .iter()
                .map(|child| key_value(child, row))
                .collect(),
        ),
        Column::Frame(_) => KeyValue::Null,
    }
}

/// Key tuples for every row of a table, in row order.
///
/// Large inputs compute per-row tuples in parallel; the output order is
/// identical to the sequential scan.
pub fn key_tuples(columns: &[&Column], nrow: usize) -> Vec<KeyTuple> {
    let tuple = |row: usize| -> KeyTuple { columns.iter().map(|c| key_value(c, row)).collect() };
    if nrow >= PARALLEL_ROW_THRESHOLD {
        (0..nrow).into_par_iter().map(tuple).collect()
    } else {
        (0..nrow).map(tuple).collect()
    }
}

/// Reject columns that cannot serve as keys: frame columns, directly or
/// anywhere under a selected group column.
pub fn ensure_keyable(column: &Column, path: &ColumnPath) -> Result<()> {
    match column {
        Column::Value(_) => Ok(()),
        Column::Group(col) => {
            for child in col.table().columns() {
                ensure_keyable(child, &path.child(child.name()))?;
            }
            Ok(())
        }
        Column::Frame(_) => Err(Error::Schema(format!(
            "frame column '{path}' cannot be used as a key"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_keys_match() {
        assert_eq!(KeyValue::from_value(&Value::Null), KeyValue::Null);
        assert_eq!(KeyValue::Null, KeyValue::Null);
    }

    #[test]
    fn float_keys_compare_by_bits() {
        let nan = KeyValue::from_value(&Value::Float(f64::NAN));
        assert_eq!(nan, KeyValue::from_value(&Value::Float(f64::NAN)));
        assert_ne!(
            KeyValue::from_value(&Value::Float(0.0)),
            KeyValue::from_value(&Value::Float(-0.0)),
        );
    }
}
