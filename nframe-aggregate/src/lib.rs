//! Per-group aggregation over grouped tables.
//!
//! An [`AggregateSpec`] names one output column and the reduction that
//! fills it; [`aggregate`] evaluates a list of specs against every group of
//! a [`GroupedTable`] and returns a flat table of key columns followed by
//! one value column per spec.
//!
//! Nulls are skipped by every reduction; a group with no non-null values
//! yields `Null`. `Sum` stays integral over integer columns and widens to
//! float as soon as a float value participates. `Min`/`Max` order numbers
//! numerically (mixed int/float allowed), strings lexicographically and
//! booleans false-before-true; mixing kinds is a type mismatch.

#![forbid(unsafe_code)]

use std::cmp::Ordering;

use nframe_result::{Error, Result};
use nframe_table::{
    Column, ColumnNameGenerator, ColumnPath, GroupedTable, Table, Value, ValueColumn,
};

/// Type of aggregate operation.
#[derive(Clone, Debug, PartialEq)]
pub enum AggregateKind {
    /// Number of rows in the group.
    CountRows,
    /// Number of non-null values of a column.
    Count { path: ColumnPath },
    /// Number of null values of a column.
    CountNulls { path: ColumnPath },
    Sum { path: ColumnPath },
    Min { path: ColumnPath },
    Max { path: ColumnPath },
    Mean { path: ColumnPath },
}

impl AggregateKind {
    /// The column this aggregate reads, if any.
    pub fn path(&self) -> Option<&ColumnPath> {
        match self {
            AggregateKind::CountRows => None,
            AggregateKind::Count { path }
            | AggregateKind::CountNulls { path }
            | AggregateKind::Sum { path }
            | AggregateKind::Min { path }
            | AggregateKind::Max { path }
            | AggregateKind::Mean { path } => Some(path),
        }
    }
}

/// Specification for one aggregate output column.
#[derive(Clone, Debug)]
pub struct AggregateSpec {
    /// Output column name; uniquified against key names on collision.
    pub alias: String,
    pub kind: AggregateKind,
}

impl AggregateSpec {
    pub fn count_rows(alias: impl Into<String>) -> Self {
        Self {
            alias: alias.into(),
            kind: AggregateKind::CountRows,
        }
    }

    pub fn count(alias: impl Into<String>, path: impl Into<ColumnPath>) -> Self {
        Self {
            alias: alias.into(),
            kind: AggregateKind::Count { path: path.into() },
        }
    }

    pub fn count_nulls(alias: impl Into<String>, path: impl Into<ColumnPath>) -> Self {
        Self {
            alias: alias.into(),
            kind: AggregateKind::CountNulls { path: path.into() },
        }
    }

    pub fn sum(alias: impl Into<String>, path: impl Into<ColumnPath>) -> Self {
        Self {
            alias: alias.into(),
            kind: AggregateKind::Sum { path: path.into() },
        }
    }

    pub fn min(alias: impl Into<String>, path: impl Into<ColumnPath>) -> Self {
        Self {
            alias: alias.into(),
            kind: AggregateKind::Min { path: path.into() },
        }
    }

    pub fn max(alias: impl Into<String>, path: impl Into<ColumnPath>) -> Self {
        Self {
            alias: alias.into(),
            kind: AggregateKind::Max { path: path.into() },
        }
    }

    pub fn mean(alias: impl Into<String>, path: impl Into<ColumnPath>) -> Self {
        Self {
            alias: alias.into(),
            kind: AggregateKind::Mean { path: path.into() },
        }
    }
}

/// Evaluate `specs` against every group: one output row per group, key
/// columns first, then one value column per spec.
pub fn aggregate(grouped: &GroupedTable, specs: &[AggregateSpec]) -> Result<Table> {
    let groups = grouped.groups();
    let mut out = grouped.keys();
    let mut gen = ColumnNameGenerator::with_reserved(out.column_names());
    for spec in specs {
        let values = groups
            .iter()
            .map(|group| compute(&spec.kind, group))
            .collect::<Result<Vec<_>>>()?;
        let name = gen.add_unique(&spec.alias);
        out = out.with_column(Column::Value(ValueColumn::new(name, values)))?;
    }
    Ok(out)
}

fn compute(kind: &AggregateKind, group: &Table) -> Result<Value> {
    match kind {
        AggregateKind::CountRows => Ok(Value::Int(group.nrow() as i64)),
        AggregateKind::Count { path } => {
            let col = value_column_at(group, path)?;
            let count = col.values().iter().filter(|v| !v.is_null()).count();
            Ok(Value::Int(count as i64))
        }
        AggregateKind::CountNulls { path } => {
            let col = value_column_at(group, path)?;
            let count = col.values().iter().filter(|v| v.is_null()).count();
            Ok(Value::Int(count as i64))
        }
        AggregateKind::Sum { path } => {
            let col = value_column_at(group, path)?;
            sum_values(col.values())
        }
        AggregateKind::Min { path } => {
            let col = value_column_at(group, path)?;
            extremum(col.values(), Ordering::Less)
        }
        AggregateKind::Max { path } => {
            let col = value_column_at(group, path)?;
            extremum(col.values(), Ordering::Greater)
        }
        AggregateKind::Mean { path } => {
            let col = value_column_at(group, path)?;
            let mut sum = 0f64;
            let mut count = 0usize;
            for value in col.values() {
                if value.is_null() {
                    continue;
                }
                sum += value.as_float()?;
                count += 1;
            }
            if count == 0 {
                Ok(Value::Null)
            } else {
                Ok(Value::Float(sum / count as f64))
            }
        }
    }
}

fn value_column_at<'a>(table: &'a Table, path: &ColumnPath) -> Result<&'a ValueColumn> {
    match table.column_at(path)? {
        Column::Value(col) => Ok(col),
        other => Err(Error::type_mismatch(
            "value column",
            format!("{} column", other.kind()),
        )),
    }
}

/// Integral sum over integers, widening to float when any float
/// participates; `Null` over an empty or all-null column.
fn sum_values(values: &[Value]) -> Result<Value> {
    let mut int_sum = 0i64;
    let mut float_sum = 0f64;
    let mut saw_float = false;
    let mut saw_value = false;
    for value in values {
        match value {
            Value::Null => {}
            Value::Int(v) => {
                int_sum += v;
                saw_value = true;
            }
            Value::Float(v) => {
                float_sum += v;
                saw_float = true;
                saw_value = true;
            }
            other => return Err(Error::type_mismatch("numeric value", other.kind_name())),
        }
    }
    if !saw_value {
        Ok(Value::Null)
    } else if saw_float {
        Ok(Value::Float(float_sum + int_sum as f64))
    } else {
        Ok(Value::Int(int_sum))
    }
}

fn extremum(values: &[Value], keep: Ordering) -> Result<Value> {
    let mut best: Option<Value> = None;
    for value in values {
        if value.is_null() {
            continue;
        }
        best = Some(match best {
            None => value.clone(),
            Some(current) => {
                if compare_values(value, &current)? == keep {
                    value.clone()
                } else {
                    current
                }
            }
        });
    }
    Ok(best.unwrap_or(Value::Null))
}

/// Total order within a kind: numbers numerically (int/float mixed),
/// strings lexicographically, booleans false-before-true.
fn compare_values(a: &Value, b: &Value) -> Result<Ordering> {
    match (a, b) {
        (Value::Int(x), Value::Int(y)) => Ok(x.cmp(y)),
        (Value::Int(_) | Value::Float(_), Value::Int(_) | Value::Float(_)) => {
            let x = a.as_float()?;
            let y = b.as_float()?;
            Ok(x.total_cmp(&y))
        }
        (Value::Str(x), Value::Str(y)) => Ok(x.cmp(y)),
        (Value::Bool(x), Value::Bool(y)) => Ok(x.cmp(y)),
        _ => Err(Error::TypeMismatch {
            expected: "comparable values of one kind".into(),
            actual: format!("{a} and {b}"),
        }),
    }
}
