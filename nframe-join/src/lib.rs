//! Relational join engine for nframe tables.
//!
//! This crate exposes the shared join configuration types ([`JoinKey`],
//! [`JoinType`], [`JoinOptions`]) and the entry point [`join`], which routes
//! through the hash join implementation. Six row-combination policies run
//! over the same matched-pairs computation:
//!
//! | kind | unmatched left | unmatched right |
//! |---|---|---|
//! | inner | dropped | dropped |
//! | left | kept, right columns null | dropped |
//! | right | dropped | kept, left columns null |
//! | full | kept | kept |
//! | semi (filter) | matched left rows only, right columns excluded | — |
//! | anti (exclude) | unmatched left rows only | — |
//!
//! Matching is null-aware: two null key cells are equal. Right key columns
//! are merged into the left key columns; remaining right columns append
//! after the left schema, renamed with an integer suffix on collision.

#![forbid(unsafe_code)]

mod hash_join;

use std::fmt;

use nframe_result::Result;
use nframe_table::{ColumnPath, Table};

/// Type of join to perform.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum JoinType {
    /// Emit only matching row pairs.
    Inner,
    /// Emit all left rows; unmatched left rows have NULL right columns.
    Left,
    /// Emit all right rows; unmatched right rows have NULL left columns.
    Right,
    /// Emit all rows from both sides; unmatched rows have NULLs.
    Full,
    /// Emit left rows that have at least one match (no right columns).
    Semi,
    /// Emit left rows that have no match (no right columns).
    Anti,
}

impl fmt::Display for JoinType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JoinType::Inner => write!(f, "INNER"),
            JoinType::Left => write!(f, "LEFT"),
            JoinType::Right => write!(f, "RIGHT"),
            JoinType::Full => write!(f, "FULL"),
            JoinType::Semi => write!(f, "SEMI"),
            JoinType::Anti => write!(f, "ANTI"),
        }
    }
}

/// Join key pair describing which columns to equate.
///
/// Both paths must resolve to value columns. Nulls are regular matchable
/// values: a null left key equals a null right key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct JoinKey {
    /// Path of the key column in the left table.
    pub left: ColumnPath,
    /// Path of the key column in the right table.
    pub right: ColumnPath,
}

impl JoinKey {
    pub fn new(left: impl Into<ColumnPath>, right: impl Into<ColumnPath>) -> Self {
        Self {
            left: left.into(),
            right: right.into(),
        }
    }

    /// Key with the same column name on both sides.
    pub fn on(name: &str) -> Self {
        let path = ColumnPath::name(name);
        Self {
            left: path.clone(),
            right: path,
        }
    }
}

/// Join configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct JoinOptions {
    pub join_type: JoinType,
}

impl JoinOptions {
    pub fn inner() -> Self {
        Self {
            join_type: JoinType::Inner,
        }
    }

    pub fn left() -> Self {
        Self {
            join_type: JoinType::Left,
        }
    }

    pub fn right() -> Self {
        Self {
            join_type: JoinType::Right,
        }
    }

    pub fn full() -> Self {
        Self {
            join_type: JoinType::Full,
        }
    }

    pub fn semi() -> Self {
        Self {
            join_type: JoinType::Semi,
        }
    }

    pub fn anti() -> Self {
        Self {
            join_type: JoinType::Anti,
        }
    }
}

impl Default for JoinOptions {
    fn default() -> Self {
        Self::inner()
    }
}

/// Join two tables on the given key pairs.
///
/// An empty key slice joins on the top-level value-column names the two
/// tables share, in left-table order. Keys referencing unknown columns fail
/// with a schema error before any row is scanned.
pub fn join(left: &Table, right: &Table, keys: &[JoinKey], options: &JoinOptions) -> Result<Table> {
    hash_join::hash_join(left, right, keys, options)
}

pub fn inner_join(left: &Table, right: &Table, keys: &[JoinKey]) -> Result<Table> {
    join(left, right, keys, &JoinOptions::inner())
}

pub fn left_join(left: &Table, right: &Table, keys: &[JoinKey]) -> Result<Table> {
    join(left, right, keys, &JoinOptions::left())
}

pub fn right_join(left: &Table, right: &Table, keys: &[JoinKey]) -> Result<Table> {
    join(left, right, keys, &JoinOptions::right())
}

pub fn full_join(left: &Table, right: &Table, keys: &[JoinKey]) -> Result<Table> {
    join(left, right, keys, &JoinOptions::full())
}

/// Semi-join: left rows with at least one match, right columns excluded.
pub fn filter_join(left: &Table, right: &Table, keys: &[JoinKey]) -> Result<Table> {
    join(left, right, keys, &JoinOptions::semi())
}

/// Anti-join: left rows with no match.
pub fn exclude_join(left: &Table, right: &Table, keys: &[JoinKey]) -> Result<Table> {
    join(left, right, keys, &JoinOptions::anti())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn join_type_display() {
        assert_eq!(JoinType::Inner.to_string(), "INNER");
        assert_eq!(JoinType::Anti.to_string(), "ANTI");
    }

    #[test]
    fn join_key_on_uses_both_sides() {
        let key = JoinKey::on("id");
        assert_eq!(key.left, ColumnPath::name("id"));
        assert_eq!(key.right, ColumnPath::name("id"));
    }
}
