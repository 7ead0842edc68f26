//! Column-tree insertion: grafting columns at arbitrary nesting depth.

use rustc_hash::{FxHashMap, FxHashSet};

use nframe_result::{Error, Result};

use crate::column::{Column, GroupColumn};
use crate::path::ColumnPath;
use crate::table::Table;

/// Descriptor for one column to graft into a table tree.
#[derive(Debug, Clone)]
pub struct ColumnToInsert {
    /// Where the column goes; the last segment names the leaf.
    pub path: ColumnPath,
    pub column: Column,
    /// Sibling index to restore when a removed column is re-inserted;
    /// `None` appends after existing siblings.
    pub position: Option<usize>,
}

impl ColumnToInsert {
    pub fn new(path: impl Into<ColumnPath>, column: Column) -> Self {
        Self {
            path: path.into(),
            column,
            position: None,
        }
    }

    pub fn at_position(path: impl Into<ColumnPath>, column: Column, position: usize) -> Self {
        Self {
            path: path.into(),
            column,
            position: Some(position),
        }
    }
}

/// Graft `inserts` into `table`, creating intermediate group columns along
/// each path as needed.
///
/// A descriptor whose full path already names a column replaces it in place
/// (position preserved); new columns append after their siblings unless a
/// position is given. Descriptors sharing a path prefix are grouped so the
/// shared group column is built once. Branches not named by any descriptor
/// are untouched and share storage with the source.
///
/// Fails with a structure error when two descriptors target the identical
/// final path, when a path descends through a non-group column, or when a
/// leaf's length differs from the table's row count.
pub fn insert_columns(table: &Table, inserts: Vec<ColumnToInsert>) -> Result<Table> {
    {
        let mut seen: FxHashSet<&ColumnPath> = FxHashSet::default();
        for insert in &inserts {
            if insert.path.is_empty() {
                return Err(Error::Structure("empty insert path".into()));
            }
            if !seen.insert(&insert.path) {
                return Err(Error::Structure(format!(
                    "two columns inserted at path '{}'",
                    insert.path
                )));
            }
        }
    }
    tracing::trace!(count = inserts.len(), "inserting columns");
    insert_level(table.columns(), table.nrow(), inserts)
}

fn insert_level(
    existing: &[Column],
    nrow: usize,
    inserts: Vec<ColumnToInsert>,
) -> Result<Table> {
    // Bucket descriptors by head segment, keeping first-seen head order for
    // the append phase.
    let mut order: Vec<String> = Vec::new();
    let mut buckets: FxHashMap<String, Vec<ColumnToInsert>> = FxHashMap::default();
    for insert in inserts {
        let head = insert
            .path
            .first()
            .map(str::to_owned)
            .unwrap_or_default();
        if !buckets.contains_key(&head) {
            order.push(head.clone());
        }
        buckets.entry(head).or_default().push(insert);
    }

    let mut out: Vec<Column> = Vec::with_capacity(existing.len());
    for column in existing {
        let Some(bucket) = buckets.remove(column.name()) else {
            out.push(column.clone());
            continue;
        };
        let (leaves, deeper) = split_bucket(bucket);
        if let Some(leaf) = leaves.into_iter().next() {
            if !deeper.is_empty() {
                return Err(Error::Structure(format!(
                    "column '{}' is both replaced and descended into",
                    column.name()
                )));
            }
            out.push(replacement(column.name(), leaf, nrow)?);
            continue;
        }
        let Column::Group(group) = column else {
            return Err(Error::Structure(format!(
                "column '{}' is a {} column, not a column group",
                column.name(),
                column.kind()
            )));
        };
        let nested = insert_level(group.table().columns(), nrow, strip_heads(deeper))?;
        out.push(Column::Group(GroupColumn::new(column.name(), nested)));
    }

    // Leftover buckets are brand-new columns or groups.
    let mut positioned: Vec<(usize, Column)> = Vec::new();
    let mut appended: Vec<Column> = Vec::new();
    for head in order {
        let Some(bucket) = buckets.remove(&head) else {
            continue;
        };
        let (leaves, deeper) = split_bucket(bucket);
        let (position, column) = if let Some(leaf) = leaves.into_iter().next() {
            if !deeper.is_empty() {
                return Err(Error::Structure(format!(
                    "'{head}' is inserted both as a column and as a column group"
                )));
            }
            (leaf.position, replacement(&head, leaf, nrow)?)
        } else {
            let position = deeper.iter().filter_map(|d| d.position).min();
            let nested = insert_level(&[], nrow, strip_heads(deeper))?;
            (position, Column::Group(GroupColumn::new(head, nested)))
        };
        match position {
            Some(p) => positioned.push((p, column)),
            None => appended.push(column),
        }
    }
    positioned.sort_by_key(|(p, _)| *p);
    for (p, column) in positioned {
        let at = p.min(out.len());
        out.insert(at, column);
    }
    out.extend(appended);

    Table::with_row_count(out, nrow)
}

/// Split a bucket into descriptors ending here and descriptors going deeper.
fn split_bucket(bucket: Vec<ColumnToInsert>) -> (Vec<ColumnToInsert>, Vec<ColumnToInsert>) {
    bucket.into_iter().partition(|d| d.path.len() == 1)
}

fn strip_heads(deeper: Vec<ColumnToInsert>) -> Vec<ColumnToInsert> {
    deeper
        .into_iter()
        .map(|d| {
            let path = d.path.drop_first();
            ColumnToInsert {
                path,
                column: d.column,
                position: d.position,
            }
        })
        .collect()
}

/// The inserted leaf, renamed to the path's last segment and length-checked.
fn replacement(name: &str, leaf: ColumnToInsert, nrow: usize) -> Result<Column> {
    if leaf.column.len() != nrow {
        return Err(Error::Structure(format!(
            "inserted column '{}' has {} rows, expected {}",
            name,
            leaf.column.len(),
            nrow
        )));
    }
    Ok(leaf.column.with_name(name))
}
