//! nframe: immutable nested dataframes.
//!
//! This crate is the primary entrypoint for the nframe toolkit. It
//! re-exports the data model and engines from the underlying `nframe-*`
//! crates, providing a unified API surface.
//!
//! # Quick Start
//!
//! Build a table and group it by a key column:
//!
//! ```rust
//! use nframe::{Column, Selector, Table};
//!
//! let table = Table::new(vec![
//!     Column::of("city", vec!["Moscow", "London", "Moscow"]),
//!     Column::of("day", vec![1i64, 1, 2]),
//!     Column::of("temp", vec![14i64, 10, 18]),
//! ])
//! .unwrap();
//!
//! let grouped = table.group_by(&Selector::name("city")).unwrap();
//! assert_eq!(grouped.len(), 2);
//! assert_eq!(grouped.group(0).unwrap().nrow(), 2);
//! ```
//!
//! Join two tables on a shared key:
//!
//! ```rust
//! use nframe::{inner_join, Column, JoinKey, Table};
//!
//! let left = Table::new(vec![
//!     Column::of("id", vec![1i64, 2, 3]),
//!     Column::of("name", vec!["A", "B", "C"]),
//! ])
//! .unwrap();
//! let right = Table::new(vec![
//!     Column::of("id", vec![2i64, 3, 4]),
//!     Column::of("score", vec![20i64, 30, 40]),
//! ])
//! .unwrap();
//!
//! let joined = inner_join(&left, &right, &[JoinKey::on("id")]).unwrap();
//! assert_eq!(joined.nrow(), 2);
//! assert_eq!(joined.column_names(), ["id", "name", "score"]);
//! ```
//!
//! # Architecture
//!
//! nframe is organized as a layered workspace:
//!
//! - **Data model & single-table engines** (`nframe-table`): columns, paths,
//!   tables, tree surgery, group-by, distinct.
//! - **Joins** (`nframe-join`): the hash join engine and its configuration.
//! - **Aggregation** (`nframe-aggregate`): per-group reductions.
//! - **Errors** (`nframe-result`): the unified error and result types.

#![forbid(unsafe_code)]

pub use nframe_result::{Error, Result};

pub use nframe_table::{
    insert_columns, remove_columns, Column, ColumnInfo, ColumnKind, ColumnNameGenerator,
    ColumnPath, ColumnToInsert, ColumnWithPath, DataType, FrameColumn, GroupColumn, GroupedTable,
    RemovedColumn, ReplaceClause, RowRef, Selector, Table, Value, ValueColumn,
};

pub use nframe_join::{
    exclude_join, filter_join, full_join, inner_join, join, left_join, right_join, JoinKey,
    JoinOptions, JoinType,
};

pub use nframe_aggregate::{aggregate, AggregateKind, AggregateSpec};
