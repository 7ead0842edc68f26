//! Immutable, hierarchically-structured in-memory tables.
//!
//! A [`Table`] is an ordered sequence of named columns of three closed
//! kinds:
//!
//! - **value** columns hold scalars (including null) of one declared type;
//! - **group** columns hold a nested table with the parent's row count,
//!   giving struct-of-arrays nesting addressable by [`ColumnPath`];
//! - **frame** columns hold one independent sub-table per row, which is how
//!   grouped results carry their per-key row sets.
//!
//! Tables are immutable values: every operation returns a new table, and
//! derived tables share unchanged column storage with their source. Row
//! reordering always materializes a fresh, explicit order.
//!
//! The engines layered on the model:
//!
//! - tree surgery ([`insert_columns`], [`remove_columns`],
//!   [`Table::replace`]) grafts or prunes columns at arbitrary nesting
//!   depth while leaving unrelated branches untouched;
//! - [`Table::group_by`] partitions rows by key-tuple equality with
//!   first-occurrence key order and stable within-group order;
//! - [`Table::distinct_by`] / [`Table::count_distinct_by`] reuse the same
//!   key-equality machinery for row deduplication.
//!
//! Null handling is uniform across all of them: null is a regular,
//! matchable key value.

#![forbid(unsafe_code)]

pub mod column;
pub mod constants;
mod distinct;
pub mod group;
pub mod insert;
pub mod key;
pub mod name_gen;
pub mod path;
pub mod remove;
pub mod replace;
pub mod row;
pub mod selector;
pub mod table;
pub mod types;
pub mod value;

pub use column::{Column, ColumnKind, FrameColumn, GroupColumn, ValueColumn};
pub use group::GroupedTable;
pub use insert::{insert_columns, ColumnToInsert};
pub use name_gen::ColumnNameGenerator;
pub use path::ColumnPath;
pub use remove::{remove_columns, RemovedColumn};
pub use replace::ReplaceClause;
pub use row::RowRef;
pub use selector::{ColumnWithPath, Selector};
pub use table::{ColumnInfo, Table};
pub use types::DataType;
pub use value::Value;

pub use nframe_result::{Error, Result};
