//! The immutable table: an ordered sequence of top-level columns.

use rustc_hash::{FxHashMap, FxHashSet};

use nframe_result::{Error, Result};

use crate::column::{Column, ColumnKind, ValueColumn};
use crate::insert::{insert_columns, ColumnToInsert};
use crate::name_gen::ColumnNameGenerator;
use crate::path::ColumnPath;
use crate::remove::remove_columns;
use crate::row::RowRef;
use crate::selector::{shorten_paths, Selector};
use crate::types::DataType;
use crate::value::Value;

/// An immutable table of named columns.
///
/// Invariants, enforced at construction:
/// - every column (recursively, through group columns) has length equal to
///   the table's row count;
/// - sibling column names are unique at each nesting level.
///
/// Every operation returns a new table; sources are never mutated. Derived
/// tables share unchanged column storage with their source.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    pub(crate) columns: Vec<Column>,
    pub(crate) nrow: usize,
}

/// One entry of the depth-first column-tree enumeration.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnInfo {
    pub path: ColumnPath,
    pub kind: ColumnKind,
    /// Declared type for value columns; `None` for group and frame columns.
    pub dtype: Option<DataType>,
    pub has_nulls: bool,
}

impl Table {
    /// Build a table from top-level columns.
    ///
    /// The row count is the length of the first column; every other column
    /// must match it.
    pub fn new(columns: Vec<Column>) -> Result<Table> {
        let nrow = columns.first().map(Column::len).unwrap_or(0);
        Table::with_row_count(columns, nrow)
    }

    /// Build a table with an explicit row count.
    ///
    /// Required when `columns` is empty: a zero-column table still carries a
    /// row count, which is what tree insertion validates new leaves against.
    pub fn with_row_count(columns: Vec<Column>, nrow: usize) -> Result<Table> {
        for column in &columns {
            if column.len() != nrow {
                return Err(Error::Structure(format!(
                    "column '{}' has {} rows, expected {}",
                    column.name(),
                    column.len(),
                    nrow
                )));
            }
        }
        {
            let mut names: FxHashSet<&str> = FxHashSet::default();
            for column in &columns {
                if !names.insert(column.name()) {
                    return Err(Error::Structure(format!(
                        "duplicate column name '{}'",
                        column.name()
                    )));
                }
            }
        }
        Ok(Table { columns, nrow })
    }

    /// A table with no columns and the given row count.
    pub fn empty(nrow: usize) -> Table {
        Table {
            columns: Vec::new(),
            nrow,
        }
    }

    /// Build a table from `(path, column)` pairs, creating nested group
    /// columns from the paths.
    ///
    /// Pairs sharing a leading path segment land in the same group column.
    /// Colliding top-level names are uniquified with an integer suffix.
    pub fn from_pairs(pairs: Vec<(ColumnPath, Column)>) -> Result<Table> {
        let Some(nrow) = pairs.first().map(|(_, c)| c.len()) else {
            return Ok(Table::default());
        };

        let mut gen = ColumnNameGenerator::new();
        let mut group_names: FxHashMap<String, String> = FxHashMap::default();
        let mut inserts = Vec::with_capacity(pairs.len());
        for (path, column) in pairs {
            let Some(head) = path.first() else {
                return Err(Error::Structure("empty column path".into()));
            };
            if path.len() == 1 {
                let name = gen.add_unique(head);
                inserts.push(ColumnToInsert::new(ColumnPath::name(name), column));
            } else {
                // Reuse one unique name per distinct group head so pairs
                // sharing a prefix share the group column.
                let head = head.to_owned();
                let mapped = group_names
                    .entry(head.clone())
                    .or_insert_with(|| gen.add_unique(&head))
                    .clone();
                let mut segments: Vec<String> = path.segments().to_vec();
                segments[0] = mapped;
                inserts.push(ColumnToInsert::new(ColumnPath::new(segments), column));
            }
        }
        insert_columns(&Table::empty(nrow), inserts)
    }

    /// Build a table from row objects through a caller-supplied field
    /// extraction.
    ///
    /// Column order is the order fields are first seen; fields missing from
    /// a row become nulls; types are inferred from the extracted values.
    /// Nested paths produce group columns.
    pub fn from_row_objects<R, F>(rows: impl IntoIterator<Item = R>, extract: F) -> Result<Table>
    where
        F: Fn(&R) -> Vec<(ColumnPath, Value)>,
    {
        let mut order: Vec<ColumnPath> = Vec::new();
        let mut data: FxHashMap<ColumnPath, Vec<Value>> = FxHashMap::default();
        let mut nrow = 0usize;

        for row in rows {
            for (path, value) in extract(&row) {
                let values = data.entry(path.clone()).or_insert_with(|| {
                    order.push(path.clone());
                    Vec::new()
                });
                if values.len() > nrow {
                    return Err(Error::Structure(format!(
                        "duplicate field '{path}' in one row"
                    )));
                }
                values.resize(nrow, Value::Null);
                values.push(value);
            }
            nrow += 1;
        }
        for values in data.values_mut() {
            values.resize(nrow, Value::Null);
        }

        let pairs = order
            .into_iter()
            .map(|path| {
                let values = data.remove(&path).unwrap_or_default();
                let name = path.last().unwrap_or_default().to_owned();
                (path, Column::Value(ValueColumn::new(name, values)))
            })
            .collect();
        Table::from_pairs(pairs)
    }

    pub fn nrow(&self) -> usize {
        self.nrow
    }

    pub fn ncol(&self) -> usize {
        self.columns.len()
    }

    /// True when the table has no columns or no rows.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty() || self.nrow == 0
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, index: usize) -> Option<&Column> {
        self.columns.get(index)
    }

    pub fn column_by_name(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name() == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_by_name(name).is_some()
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(Column::name).collect()
    }

    /// Resolve a path through nested group columns to a column reference.
    pub fn column_at(&self, path: &ColumnPath) -> Result<&Column> {
        let segments = path.segments();
        if segments.is_empty() {
            return Err(Error::Schema("empty column path".into()));
        }
        let mut table = self;
        for (depth, segment) in segments.iter().enumerate() {
            let column = table.column_by_name(segment).ok_or_else(|| {
                Error::Schema(format!(
                    "column '{}' not found",
                    ColumnPath::new(segments[..=depth].to_vec())
                ))
            })?;
            if depth + 1 == segments.len() {
                return Ok(column);
            }
            match column {
                Column::Group(group) => table = group.table(),
                other => {
                    return Err(Error::Schema(format!(
                        "'{}' is a {} column, not a column group",
                        ColumnPath::new(segments[..=depth].to_vec()),
                        other.kind()
                    )));
                }
            }
        }
        unreachable!("loop returns on the last segment")
    }

    /// Scalar value at `(row, path)`.
    pub fn value_at(&self, row: usize, path: &ColumnPath) -> Result<Value> {
        if row >= self.nrow {
            return Err(Error::InvalidArgument(format!(
                "row {row} out of bounds for table with {} rows",
                self.nrow
            )));
        }
        match self.column_at(path)? {
            Column::Value(col) => Ok(col.value(row)),
            other => Err(Error::type_mismatch(
                "value column",
                format!("{} column", other.kind()),
            )),
        }
    }

    /// Depth-first pre-order enumeration of the full column tree.
    ///
    /// Group columns are descended after their own entry; frame columns are
    /// leaves. This order is the traversal-order contract for selectors.
    pub fn columns_dfs(&self) -> Vec<ColumnInfo> {
        fn walk(table: &Table, prefix: &ColumnPath, out: &mut Vec<ColumnInfo>) {
            for column in table.columns() {
                let path = prefix.child(column.name());
                out.push(ColumnInfo {
                    path: path.clone(),
                    kind: column.kind(),
                    dtype: column.dtype(),
                    has_nulls: column.has_nulls(),
                });
                if let Column::Group(group) = column {
                    walk(group.table(), &path, out);
                }
            }
        }
        let mut out = Vec::new();
        walk(self, &ColumnPath::empty(), &mut out);
        out
    }

    /// Gather rows by index without bounds checks; callers validate.
    pub(crate) fn gather(&self, indices: &[usize]) -> Table {
        Table {
            columns: self.columns.iter().map(|c| c.take(indices)).collect(),
            nrow: indices.len(),
        }
    }

    pub(crate) fn gather_opt(&self, indices: &[Option<usize>]) -> Table {
        Table {
            columns: self.columns.iter().map(|c| c.take_opt(indices)).collect(),
            nrow: indices.len(),
        }
    }

    /// Select rows by index, in the given order. Indices may repeat.
    pub fn take_rows(&self, indices: &[usize]) -> Result<Table> {
        if let Some(&bad) = indices.iter().find(|&&i| i >= self.nrow) {
            return Err(Error::InvalidArgument(format!(
                "row {bad} out of bounds for table with {} rows",
                self.nrow
            )));
        }
        Ok(self.gather(indices))
    }

    /// Like [`Table::take_rows`], with `None` entries producing null-padded
    /// rows (every value cell null, every frame cell an empty sub-table).
    pub fn take_rows_opt(&self, indices: &[Option<usize>]) -> Result<Table> {
        if let Some(bad) = indices.iter().flatten().find(|&&i| i >= self.nrow) {
            return Err(Error::InvalidArgument(format!(
                "row {bad} out of bounds for table with {} rows",
                self.nrow
            )));
        }
        Ok(self.gather_opt(indices))
    }

    /// Iterate rows as lightweight cursors.
    pub fn rows(&self) -> impl Iterator<Item = RowRef<'_>> {
        (0..self.nrow).map(move |i| RowRef::new(self, i))
    }

    pub fn row(&self, index: usize) -> Result<RowRef<'_>> {
        if index >= self.nrow {
            return Err(Error::InvalidArgument(format!(
                "row {index} out of bounds for table with {} rows",
                self.nrow
            )));
        }
        Ok(RowRef::new(self, index))
    }

    /// Rows satisfying the predicate, in original order.
    pub fn filter(&self, predicate: impl Fn(&RowRef<'_>) -> bool) -> Table {
        let indices: Vec<usize> = self
            .rows()
            .filter(|row| predicate(row))
            .map(|row| row.index())
            .collect();
        self.gather(&indices)
    }

    /// First row satisfying the predicate, if any.
    pub fn find(&self, predicate: impl Fn(&RowRef<'_>) -> bool) -> Option<RowRef<'_>> {
        self.rows().find(|row| predicate(row))
    }

    pub fn first(&self) -> Result<RowRef<'_>> {
        self.row(0)
            .map_err(|_| Error::EmptyResult("table has no rows".into()))
    }

    pub fn last(&self) -> Result<RowRef<'_>> {
        match self.nrow {
            0 => Err(Error::EmptyResult("table has no rows".into())),
            n => self.row(n - 1),
        }
    }

    /// The only row of the table.
    ///
    /// Empty tables report [`Error::EmptyResult`]; tables with more than one
    /// row report [`Error::InvalidArgument`].
    pub fn single(&self) -> Result<RowRef<'_>> {
        match self.nrow {
            0 => Err(Error::EmptyResult("table has no rows".into())),
            1 => self.row(0),
            n => Err(Error::InvalidArgument(format!(
                "table has {n} rows, expected exactly one"
            ))),
        }
    }

    pub fn first_where(&self, predicate: impl Fn(&RowRef<'_>) -> bool) -> Result<RowRef<'_>> {
        self.find(predicate)
            .ok_or_else(|| Error::EmptyResult("no row matches the predicate".into()))
    }

    pub fn last_where(&self, predicate: impl Fn(&RowRef<'_>) -> bool) -> Result<RowRef<'_>> {
        self.rows()
            .filter(|row| predicate(row))
            .last()
            .ok_or_else(|| Error::EmptyResult("no row matches the predicate".into()))
    }

    pub fn single_where(&self, predicate: impl Fn(&RowRef<'_>) -> bool) -> Result<RowRef<'_>> {
        let mut matches = self.rows().filter(|row| predicate(row));
        let first = matches
            .next()
            .ok_or_else(|| Error::EmptyResult("no row matches the predicate".into()))?;
        if matches.next().is_some() {
            return Err(Error::InvalidArgument(
                "more than one row matches the predicate".into(),
            ));
        }
        Ok(first)
    }

    /// The first `n` rows (all of them when `n >= nrow`).
    pub fn take(&self, n: usize) -> Table {
        let end = n.min(self.nrow);
        self.gather(&(0..end).collect::<Vec<_>>())
    }

    /// All rows except the first `n`.
    pub fn drop(&self, n: usize) -> Table {
        let start = n.min(self.nrow);
        self.gather(&(start..self.nrow).collect::<Vec<_>>())
    }

    /// The last `n` rows.
    pub fn take_last(&self, n: usize) -> Table {
        self.drop(self.nrow.saturating_sub(n))
    }

    /// All rows except the last `n`.
    pub fn drop_last(&self, n: usize) -> Table {
        self.take(self.nrow.saturating_sub(n))
    }

    pub fn head(&self, n: usize) -> Table {
        self.take(n)
    }

    pub fn tail(&self, n: usize) -> Table {
        self.take_last(n)
    }

    /// Add a top-level column, replacing any existing column with the same
    /// name in place.
    pub fn with_column(&self, column: Column) -> Result<Table> {
        let path = ColumnPath::name(column.name());
        insert_columns(self, vec![ColumnToInsert::new(path, column)])
    }

    pub fn with_columns(&self, columns: Vec<Column>) -> Result<Table> {
        let inserts = columns
            .into_iter()
            .map(|c| ColumnToInsert::new(ColumnPath::name(c.name()), c))
            .collect();
        insert_columns(self, inserts)
    }

    /// Rename a top-level column.
    pub fn rename(&self, old: &str, new: &str) -> Result<Table> {
        if !self.has_column(old) {
            return Err(Error::Schema(format!("column '{old}' not found")));
        }
        let columns = self
            .columns
            .iter()
            .map(|c| {
                if c.name() == old {
                    c.clone().with_name(new)
                } else {
                    c.clone()
                }
            })
            .collect();
        Table::with_row_count(columns, self.nrow)
    }

    /// Keep only the selected columns, surfacing nested selections at their
    /// shortest unambiguous path.
    pub fn select(&self, selector: &Selector) -> Result<Table> {
        let mut nodes = selector.resolve(self)?;
        shorten_paths(&mut nodes);
        let inserts = nodes
            .into_iter()
            .map(|n| ColumnToInsert::new(n.path, n.column.clone()))
            .collect();
        insert_columns(&Table::empty(self.nrow), inserts)
    }

    /// Remove the selected columns, discarding the removal descriptors.
    pub fn remove(&self, selector: &Selector) -> Result<Table> {
        remove_columns(self, selector).map(|(table, _)| table)
    }

    /// Concatenate tables with identical schemas vertically.
    pub fn concat(tables: &[Table]) -> Result<Table> {
        let Some(first) = tables.first() else {
            return Ok(Table::default());
        };
        for table in &tables[1..] {
            if table.ncol() != first.ncol() {
                return Err(Error::Structure(format!(
                    "cannot concat tables with {} and {} columns",
                    first.ncol(),
                    table.ncol()
                )));
            }
        }
        let nrow = tables.iter().map(Table::nrow).sum();
        let columns = (0..first.ncol())
            .map(|i| {
                let parts: Vec<&Column> = tables.iter().map(|t| &t.columns[i]).collect();
                concat_columns(&parts)
            })
            .collect::<Result<Vec<_>>>()?;
        Table::with_row_count(columns, nrow)
    }
}

fn concat_columns(parts: &[&Column]) -> Result<Column> {
    let first = parts[0];
    for part in &parts[1..] {
        if part.name() != first.name() || part.kind() != first.kind() {
            return Err(Error::Structure(format!(
                "cannot concat column '{}' ({}) with column '{}' ({})",
                first.name(),
                first.kind(),
                part.name(),
                part.kind()
            )));
        }
    }
    match first {
        Column::Value(_) => {
            let mut values = Vec::new();
            for part in parts {
                if let Column::Value(col) = part {
                    values.extend_from_slice(col.values());
                }
            }
            Ok(Column::Value(ValueColumn::new(first.name(), values)))
        }
        Column::Group(_) => {
            let tables: Vec<Table> = parts
                .iter()
                .filter_map(|p| p.as_group())
                .map(|g| g.table().clone())
                .collect();
            let nested = Table::concat(&tables)?;
            Ok(Column::group(first.name(), nested))
        }
        Column::Frame(_) => {
            let mut frames = Vec::new();
            for part in parts {
                if let Column::Frame(col) = part {
                    frames.extend_from_slice(col.frames());
                }
            }
            Ok(Column::frames(first.name(), frames))
        }
    }
}
