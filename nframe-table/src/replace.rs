//! In-place column replacement, composed from removal and insertion.

use nframe_result::Result;

use crate::column::Column;
use crate::insert::{insert_columns, ColumnToInsert};
use crate::remove::remove_columns;
use crate::selector::Selector;
use crate::table::Table;

/// A pending replacement of the columns matched by a selector.
///
/// Produced by [`Table::replace`]; consumed by [`ReplaceClause::with`].
#[derive(Debug)]
pub struct ReplaceClause<'a> {
    table: &'a Table,
    selector: Selector,
}

impl Table {
    /// Start replacing the selected columns: `table.replace(sel).with(f)`
    /// updates them in place, keeping their path and sibling position.
    pub fn replace(&self, selector: Selector) -> ReplaceClause<'_> {
        ReplaceClause {
            table: self,
            selector,
        }
    }
}

impl ReplaceClause<'_> {
    /// Apply `transform` to each matched column and put the result back at
    /// the exact original path and position. The leaf keeps the original
    /// name (the path's last segment) regardless of the transformed
    /// column's own name.
    pub fn with(self, transform: impl Fn(&Column) -> Result<Column>) -> Result<Table> {
        let (pruned, removed) = remove_columns(self.table, &self.selector)?;
        let inserts = removed
            .iter()
            .map(|r| {
                let column = transform(&r.column)?;
                Ok(ColumnToInsert::at_position(r.path.clone(), column, r.index))
            })
            .collect::<Result<Vec<_>>>()?;
        insert_columns(&pruned, inserts)
    }
}
