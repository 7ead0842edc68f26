//! Columns: named, typed, fixed-length value sequences of three closed kinds.

use std::fmt;
use std::sync::Arc;

use crate::table::Table;
use crate::types::DataType;
use crate::value::Value;

/// Kind of a column, as reported to inspection consumers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnKind {
    /// Scalar values of one declared type.
    Value,
    /// A nested table with the same row count as the parent; cell `i` is
    /// row `i` of that table.
    Group,
    /// One independent sub-table per row, with arbitrary row counts.
    Frame,
}

impl fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ColumnKind::Value => "value",
            ColumnKind::Group => "group",
            ColumnKind::Frame => "frame",
        };
        write!(f, "{name}")
    }
}

/// Scalar column: an immutable sequence of values of one declared type.
///
/// The backing storage is shared (`Arc`), so derived tables that keep a
/// column unchanged reuse it without copying.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueColumn {
    name: String,
    dtype: DataType,
    values: Arc<Vec<Value>>,
}

impl ValueColumn {
    /// Build a column, inferring the declared type from the data.
    pub fn new(name: impl Into<String>, values: Vec<Value>) -> Self {
        let dtype = DataType::infer(&values);
        Self {
            name: name.into(),
            dtype,
            values: Arc::new(values),
        }
    }

    /// Build a column with an explicitly declared type.
    pub fn with_dtype(name: impl Into<String>, dtype: DataType, values: Vec<Value>) -> Self {
        Self {
            name: name.into(),
            dtype,
            values: Arc::new(values),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn dtype(&self) -> DataType {
        self.dtype
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Value at `row`; `Null` past the end.
    pub fn value(&self, row: usize) -> Value {
        self.values.get(row).cloned().unwrap_or(Value::Null)
    }

    pub fn has_nulls(&self) -> bool {
        self.values.iter().any(Value::is_null)
    }

    fn take(&self, indices: &[usize]) -> ValueColumn {
        let values = indices.iter().map(|&i| self.value(i)).collect();
        ValueColumn {
            name: self.name.clone(),
            dtype: self.dtype,
            values: Arc::new(values),
        }
    }

    fn take_opt(&self, indices: &[Option<usize>]) -> ValueColumn {
        let values = indices
            .iter()
            .map(|i| i.map(|i| self.value(i)).unwrap_or(Value::Null))
            .collect();
        ValueColumn {
            name: self.name.clone(),
            dtype: self.dtype,
            values: Arc::new(values),
        }
    }
}

/// Group column: a nested table sharing the parent's row count.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupColumn {
    name: String,
    table: Table,
}

impl GroupColumn {
    pub fn new(name: impl Into<String>, table: Table) -> Self {
        Self {
            name: name.into(),
            table,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn into_table(self) -> Table {
        self.table
    }
}

/// Frame column: one independent sub-table per row.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameColumn {
    name: String,
    frames: Arc<Vec<Table>>,
}

impl FrameColumn {
    pub fn new(name: impl Into<String>, frames: Vec<Table>) -> Self {
        Self {
            name: name.into(),
            frames: Arc::new(frames),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn frames(&self) -> &[Table] {
        &self.frames
    }

    pub fn frame(&self, row: usize) -> Option<&Table> {
        self.frames.get(row)
    }
}

/// A column of one of three closed kinds.
///
/// Every algorithm in the engine pattern-matches this enum exhaustively, so
/// a fourth kind is a compile-time break rather than a silent runtime gap.
#[derive(Debug, Clone, PartialEq)]
pub enum Column {
    Value(ValueColumn),
    Group(GroupColumn),
    Frame(FrameColumn),
}

impl Column {
    /// A value column from anything convertible to [`Value`]s, with the
    /// declared type inferred from the data.
    pub fn of<N, V>(name: N, values: impl IntoIterator<Item = V>) -> Column
    where
        N: Into<String>,
        V: Into<Value>,
    {
        Column::Value(ValueColumn::new(
            name,
            values.into_iter().map(Into::into).collect(),
        ))
    }

    pub fn group(name: impl Into<String>, table: Table) -> Column {
        Column::Group(GroupColumn::new(name, table))
    }

    pub fn frames(name: impl Into<String>, frames: Vec<Table>) -> Column {
        Column::Frame(FrameColumn::new(name, frames))
    }

    pub fn name(&self) -> &str {
        match self {
            Column::Value(col) => col.name(),
            Column::Group(col) => col.name(),
            Column::Frame(col) => col.name(),
        }
    }

    pub fn with_name(self, name: impl Into<String>) -> Column {
        match self {
            Column::Value(mut col) => {
                col.name = name.into();
                Column::Value(col)
            }
            Column::Group(mut col) => {
                col.name = name.into();
                Column::Group(col)
            }
            Column::Frame(mut col) => {
                col.name = name.into();
                Column::Frame(col)
            }
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Column::Value(col) => col.values.len(),
            Column::Group(col) => col.table.nrow(),
            Column::Frame(col) => col.frames.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn kind(&self) -> ColumnKind {
        match self {
            Column::Value(_) => ColumnKind::Value,
            Column::Group(_) => ColumnKind::Group,
            Column::Frame(_) => ColumnKind::Frame,
        }
    }

    /// Declared type for value columns; `None` for group and frame columns.
    pub fn dtype(&self) -> Option<DataType> {
        match self {
            Column::Value(col) => Some(col.dtype()),
            Column::Group(_) | Column::Frame(_) => None,
        }
    }

    /// Whether any leaf value under this column is null.
    pub fn has_nulls(&self) -> bool {
        match self {
            Column::Value(col) => col.has_nulls(),
            Column::Group(col) => col.table().columns().iter().any(Column::has_nulls),
            Column::Frame(_) => false,
        }
    }

    pub fn as_value(&self) -> Option<&ValueColumn> {
        match self {
            Column::Value(col) => Some(col),
            _ => None,
        }
    }

    pub fn as_group(&self) -> Option<&GroupColumn> {
        match self {
            Column::Group(col) => Some(col),
            _ => None,
        }
    }

    pub fn as_frame(&self) -> Option<&FrameColumn> {
        match self {
            Column::Frame(col) => Some(col),
            _ => None,
        }
    }

    /// Reorder/select rows by index. The result is a fresh sequence in the
    /// given order; group columns gather recursively.
    pub(crate) fn take(&self, indices: &[usize]) -> Column {
        match self {
            Column::Value(col) => Column::Value(col.take(indices)),
            Column::Group(col) => Column::Group(GroupColumn {
                name: col.name.clone(),
                table: col.table.gather(indices),
            }),
            Column::Frame(col) => {
                let frames = indices
                    .iter()
                    .map(|&i| col.frames.get(i).cloned().unwrap_or_default())
                    .collect();
                Column::Frame(FrameColumn {
                    name: col.name.clone(),
                    frames: Arc::new(frames),
                })
            }
        }
    }

    /// Like [`Column::take`], with `None` entries producing null cells
    /// (an empty sub-table for frame columns).
    pub(crate) fn take_opt(&self, indices: &[Option<usize>]) -> Column {
        match self {
            Column::Value(col) => Column::Value(col.take_opt(indices)),
            Column::Group(col) => Column::Group(GroupColumn {
                name: col.name.clone(),
                table: col.table.gather_opt(indices),
            }),
            Column::Frame(col) => {
                let frames = indices
                    .iter()
                    .map(|i| {
                        i.and_then(|i| col.frames.get(i).cloned())
                            .unwrap_or_default()
                    })
                    .collect();
                Column::Frame(FrameColumn {
                    name: col.name.clone(),
                    frames: Arc::new(frames),
                })
            }
        }
    }
}
