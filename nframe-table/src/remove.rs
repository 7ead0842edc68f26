//! Column-tree removal: pruning columns at arbitrary nesting depth.

use rustc_hash::FxHashSet;

use nframe_result::Result;

use crate::column::{Column, GroupColumn};
use crate::path::ColumnPath;
use crate::selector::Selector;
use crate::table::Table;

/// A column removed from a table, with enough context to re-insert it at
/// its original location.
#[derive(Debug, Clone)]
pub struct RemovedColumn {
    pub column: Column,
    /// Full path from the root, including the column's own name.
    pub path: ColumnPath,
    /// Sibling index the column occupied at its level.
    pub index: usize,
}

/// Remove the columns matched by `selector` (depth-first pre-order),
/// returning the pruned table and a descriptor per removed column.
///
/// A group column is dropped entirely only when the selection empties it;
/// unselected siblings survive even when everything around them is removed.
/// Removing a selected group column removes its whole subtree and records
/// it as a single descriptor.
pub fn remove_columns(table: &Table, selector: &Selector) -> Result<(Table, Vec<RemovedColumn>)> {
    let selected = selector.resolve(table)?;
    let paths: FxHashSet<ColumnPath> = selected.into_iter().map(|node| node.path).collect();

    let mut removed = Vec::new();
    let columns = remove_level(table.columns(), &ColumnPath::empty(), &paths, &mut removed)?;
    tracing::trace!(count = removed.len(), "removed columns");
    let table = Table::with_row_count(columns, table.nrow())?;
    Ok((table, removed))
}

fn remove_level(
    existing: &[Column],
    prefix: &ColumnPath,
    paths: &FxHashSet<ColumnPath>,
    removed: &mut Vec<RemovedColumn>,
) -> Result<Vec<Column>> {
    let mut out = Vec::with_capacity(existing.len());
    for (index, column) in existing.iter().enumerate() {
        let path = prefix.child(column.name());
        if paths.contains(&path) {
            removed.push(RemovedColumn {
                column: column.clone(),
                path,
                index,
            });
            continue;
        }
        // Descend only when a selected path runs through this group.
        let selected_below = paths
            .iter()
            .any(|p| p.starts_with(&path) && p.len() > path.len());
        match column {
            Column::Group(group) if selected_below => {
                let kept = remove_level(group.table().columns(), &path, paths, removed)?;
                if kept.is_empty() {
                    // The selection emptied this group; collapse it.
                    continue;
                }
                let nested = Table::with_row_count(kept, group.table().nrow())?;
                out.push(Column::Group(GroupColumn::new(column.name(), nested)));
            }
            _ => out.push(column.clone()),
        }
    }
    Ok(out)
}
