//! Stable group-by engine and the grouped-table wrapper.

use std::collections::hash_map::Entry;

use rustc_hash::FxHashMap;

use nframe_result::{Error, Result};

use crate::column::Column;
use crate::constants::GROUPS_COLUMN_NAME;
use crate::insert::{insert_columns, ColumnToInsert};
use crate::key::{ensure_keyable, key_tuples, KeyTuple};
use crate::name_gen::ColumnNameGenerator;
use crate::selector::{shorten_paths, Selector};
use crate::table::Table;

/// A table of distinct key columns plus one reserved frame column whose
/// cell `i` holds the sub-table of all source rows sharing key tuple `i`.
///
/// Produced only by [`Table::group_by`]; never mutated — every consuming
/// operation yields a new value.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupedTable {
    table: Table,
    groups_name: String,
}

impl Table {
    /// Partition rows by equality of the selected key tuple.
    ///
    /// Keys appear in first-occurrence order, and each group preserves the
    /// original relative order of its rows (a stable partition, not a
    /// re-sort). Nested key selections surface at their shortest
    /// unambiguous path in the key columns. Nulls are regular key values:
    /// rows with null keys group together.
    pub fn group_by(&self, selector: &Selector) -> Result<GroupedTable> {
        let mut nodes = selector.resolve(self)?;
        if nodes.is_empty() {
            return Err(Error::InvalidArgument(
                "group_by requires at least one key column".into(),
            ));
        }
        for node in &nodes {
            ensure_keyable(node.column, &node.path)?;
        }
        shorten_paths(&mut nodes);

        let key_columns: Vec<&Column> = nodes.iter().map(|n| n.column).collect();
        let keys = key_tuples(&key_columns, self.nrow);

        // Insertion-ordered partition: the first row seen for a key tuple
        // opens its group.
        let mut index: FxHashMap<KeyTuple, usize> = FxHashMap::default();
        let mut groups: Vec<Vec<usize>> = Vec::new();
        for (row, key) in keys.into_iter().enumerate() {
            match index.entry(key) {
                Entry::Occupied(entry) => {
                    groups[*entry.get()].push(row);
                }
                Entry::Vacant(entry) => {
                    entry.insert(groups.len());
                    groups.push(vec![row]);
                }
            }
        }
        tracing::debug!(
            rows = self.nrow,
            groups = groups.len(),
            "partitioned rows by key"
        );

        // One representative row per group materializes the key columns.
        let key_indices: Vec<usize> = groups.iter().map(|g| g[0]).collect();
        let inserts = nodes
            .iter()
            .map(|n| ColumnToInsert::new(n.path.clone(), n.column.take(&key_indices)))
            .collect();
        let keys_table = insert_columns(&Table::empty(key_indices.len()), inserts)?;

        // Row permutation: group contents, concatenated in group order.
        let permutation: Vec<usize> = groups.iter().flatten().copied().collect();
        let sorted = self.gather(&permutation);
        let mut frames = Vec::with_capacity(groups.len());
        let mut start = 0usize;
        for group in &groups {
            let end = start + group.len();
            frames.push(sorted.gather(&(start..end).collect::<Vec<_>>()));
            start = end;
        }

        let mut gen = ColumnNameGenerator::with_reserved(keys_table.column_names());
        let groups_name = gen.add_unique(GROUPS_COLUMN_NAME);
        let table = keys_table.with_column(Column::frames(groups_name.clone(), frames))?;
        Ok(GroupedTable { table, groups_name })
    }
}

impl GroupedTable {
    /// Number of groups.
    pub fn len(&self) -> usize {
        self.table.nrow()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The underlying table: key columns plus the group-contents frame
    /// column.
    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn into_table(self) -> Table {
        self.table
    }

    /// Name of the reserved group-contents column.
    pub fn groups_column_name(&self) -> &str {
        &self.groups_name
    }

    /// The key columns only, one row per group.
    pub fn keys(&self) -> Table {
        let columns = self
            .table
            .columns()
            .iter()
            .filter(|c| c.name() != self.groups_name)
            .cloned()
            .collect();
        Table {
            columns,
            nrow: self.table.nrow(),
        }
    }

    /// Per-group sub-tables, in group order.
    pub fn groups(&self) -> &[Table] {
        self.table
            .column_by_name(&self.groups_name)
            .and_then(Column::as_frame)
            .map(|f| f.frames())
            .unwrap_or(&[])
    }

    pub fn group(&self, index: usize) -> Option<&Table> {
        self.groups().get(index)
    }

    /// Flatten the group contents back into a single table: all groups'
    /// rows, in group order.
    pub fn concat(&self) -> Result<Table> {
        Table::concat(self.groups())
    }
}
