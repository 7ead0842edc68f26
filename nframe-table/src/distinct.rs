//! Distinct rows and distinct-key counting.
//!
//! Shares the key-tuple machinery of the group-by engine: the distinct rows
//! of a table are exactly one representative row per group, taken in
//! first-occurrence order.

use rustc_hash::FxHashSet;

use nframe_result::Result;

use crate::column::Column;
use crate::key::{ensure_keyable, key_tuples, KeyTuple};
use crate::selector::Selector;
use crate::table::Table;

impl Table {
    /// Rows distinct over all top-level columns, keeping the first
    /// occurrence of each key in original row order.
    pub fn distinct(&self) -> Result<Table> {
        self.distinct_by(&Selector::All)
    }

    /// Full rows, distinct over the selected key columns.
    pub fn distinct_by(&self, selector: &Selector) -> Result<Table> {
        let nodes = selector.resolve(self)?;
        if nodes.is_empty() {
            return Ok(self.clone());
        }
        for node in &nodes {
            ensure_keyable(node.column, &node.path)?;
        }
        let key_columns: Vec<&Column> = nodes.iter().map(|n| n.column).collect();
        let keys = key_tuples(&key_columns, self.nrow());

        let mut seen: FxHashSet<KeyTuple> = FxHashSet::default();
        let mut indices = Vec::new();
        for (row, key) in keys.into_iter().enumerate() {
            if seen.insert(key) {
                indices.push(row);
            }
        }
        Ok(self.gather(&indices))
    }

    /// Number of distinct key tuples over all top-level columns, without
    /// materializing the reduced table.
    pub fn count_distinct(&self) -> Result<usize> {
        self.count_distinct_by(&Selector::All)
    }

    pub fn count_distinct_by(&self, selector: &Selector) -> Result<usize> {
        let nodes = selector.resolve(self)?;
        if nodes.is_empty() {
            return Ok(usize::from(self.nrow() > 0));
        }
        for node in &nodes {
            ensure_keyable(node.column, &node.path)?;
        }
        let key_columns: Vec<&Column> = nodes.iter().map(|n| n.column).collect();
        let keys = key_tuples(&key_columns, self.nrow());
        let seen: FxHashSet<KeyTuple> = keys.into_iter().collect();
        Ok(seen.len())
    }
}
