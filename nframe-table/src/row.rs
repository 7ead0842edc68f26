//! Lightweight row cursors.

use std::fmt;
use std::sync::Arc;

use nframe_result::{Error, Result};

use crate::path::ColumnPath;
use crate::table::Table;
use crate::value::Value;

/// A `(table, row index)` cursor passed to row predicates and returned by
/// row lookups. Copying is free; no row data is materialized.
#[derive(Clone, Copy)]
pub struct RowRef<'a> {
    table: &'a Table,
    index: usize,
}

impl<'a> RowRef<'a> {
    pub(crate) fn new(table: &'a Table, index: usize) -> Self {
        Self { table, index }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn table(&self) -> &'a Table {
        self.table
    }

    /// Value of a top-level column in this row.
    pub fn value(&self, name: &str) -> Result<Value> {
        self.table.value_at(self.index, &ColumnPath::name(name))
    }

    /// Value of a possibly nested column in this row.
    pub fn value_at(&self, path: &ColumnPath) -> Result<Value> {
        self.table.value_at(self.index, path)
    }

    pub fn bool(&self, name: &str) -> Result<bool> {
        self.value(name)?.as_bool()
    }

    pub fn int(&self, name: &str) -> Result<i64> {
        self.value(name)?.as_int()
    }

    pub fn float(&self, name: &str) -> Result<f64> {
        self.value(name)?.as_float()
    }

    pub fn str(&self, name: &str) -> Result<Arc<str>> {
        match self.value(name)? {
            Value::Str(s) => Ok(s),
            other => Err(Error::type_mismatch("str", other.kind_name())),
        }
    }

    pub fn is_null(&self, name: &str) -> Result<bool> {
        Ok(self.value(name)?.is_null())
    }
}

// The table itself is intentionally not printed.
impl fmt::Debug for RowRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RowRef").field("index", &self.index).finish()
    }
}
