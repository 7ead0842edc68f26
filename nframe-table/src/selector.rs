//! Column selectors: how callers name sets of columns in a table tree.

use rustc_hash::{FxHashMap, FxHashSet};

use nframe_result::{Error, Result};

use crate::column::Column;
use crate::path::ColumnPath;
use crate::table::Table;

/// Selects columns from a table tree.
///
/// `Name` and `Path` must resolve to an existing column or the selection
/// fails with a schema error; `Predicate` may match any subset of the tree
/// (including none), visited in depth-first pre-order.
#[derive(Debug, Clone)]
pub enum Selector {
    /// Every top-level column, in stored order.
    All,
    /// A top-level column by name.
    Name(String),
    /// A column at an exact path.
    Path(ColumnPath),
    /// Ordered union of selectors. Duplicate matches collapse to the first
    /// occurrence; a match inside an already-matched group column is folded
    /// into its ancestor.
    Cols(Vec<Selector>),
    /// Full-tree predicate over `(path, column)`.
    Predicate(fn(&ColumnPath, &Column) -> bool),
}

impl Selector {
    pub fn name(name: impl Into<String>) -> Selector {
        Selector::Name(name.into())
    }

    pub fn path(path: impl Into<ColumnPath>) -> Selector {
        Selector::Path(path.into())
    }

    /// Union of top-level names, in the given order.
    pub fn names<I, S>(names: I) -> Selector
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Selector::Cols(names.into_iter().map(Selector::name).collect())
    }

    /// Resolve to the topmost matching nodes.
    ///
    /// The result order follows the selector (for `Cols`, the listed order;
    /// for `All` and `Predicate`, depth-first pre-order). A node whose
    /// ancestor group column is also selected is dropped in favor of the
    /// ancestor.
    pub fn resolve<'a>(&self, table: &'a Table) -> Result<Vec<ColumnWithPath<'a>>> {
        let mut nodes = Vec::new();
        self.collect(table, &mut nodes)?;

        let mut seen: FxHashSet<ColumnPath> = FxHashSet::default();
        nodes.retain(|node| seen.insert(node.path.clone()));

        let paths: Vec<ColumnPath> = nodes.iter().map(|n| n.path.clone()).collect();
        nodes.retain(|node| {
            !paths
                .iter()
                .any(|p| p != &node.path && node.path.starts_with(p))
        });
        Ok(nodes)
    }

    fn collect<'a>(&self, table: &'a Table, out: &mut Vec<ColumnWithPath<'a>>) -> Result<()> {
        match self {
            Selector::All => {
                for column in table.columns() {
                    out.push(ColumnWithPath {
                        column,
                        path: ColumnPath::name(column.name()),
                    });
                }
                Ok(())
            }
            Selector::Name(name) => {
                let column = table
                    .column_by_name(name)
                    .ok_or_else(|| Error::Schema(format!("column '{name}' not found")))?;
                out.push(ColumnWithPath {
                    column,
                    path: ColumnPath::name(column.name()),
                });
                Ok(())
            }
            Selector::Path(path) => {
                let column = table.column_at(path)?;
                out.push(ColumnWithPath {
                    column,
                    path: path.clone(),
                });
                Ok(())
            }
            Selector::Cols(selectors) => {
                for selector in selectors {
                    selector.collect(table, out)?;
                }
                Ok(())
            }
            Selector::Predicate(predicate) => {
                collect_matching(table, &ColumnPath::empty(), *predicate, out);
                Ok(())
            }
        }
    }
}

fn collect_matching<'a>(
    table: &'a Table,
    prefix: &ColumnPath,
    predicate: fn(&ColumnPath, &Column) -> bool,
    out: &mut Vec<ColumnWithPath<'a>>,
) {
    for column in table.columns() {
        let path = prefix.child(column.name());
        if predicate(&path, column) {
            out.push(ColumnWithPath {
                column,
                path: path.clone(),
            });
        }
        if let Column::Group(group) = column {
            collect_matching(group.table(), &path, predicate, out);
        }
    }
}

/// A selected column together with its path from the root.
#[derive(Debug, Clone)]
pub struct ColumnWithPath<'a> {
    pub column: &'a Column,
    pub path: ColumnPath,
}

/// Shorten node paths to their minimal distinct trailing suffix, so nested
/// selections surface near the top of a result without colliding.
///
/// Two nodes that still collide at full path length are left as-is; the
/// downstream insertion reports the ambiguity.
pub(crate) fn shorten_paths(nodes: &mut [ColumnWithPath<'_>]) {
    let mut lens = vec![1usize; nodes.len()];
    loop {
        let mut groups: FxHashMap<ColumnPath, Vec<usize>> = FxHashMap::default();
        for (i, node) in nodes.iter().enumerate() {
            groups.entry(node.path.suffix(lens[i])).or_default().push(i);
        }
        let mut changed = false;
        for indices in groups.values() {
            if indices.len() < 2 {
                continue;
            }
            for &i in indices {
                if lens[i] < nodes[i].path.len() {
                    lens[i] += 1;
                    changed = true;
                }
            }
        }
        if !changed {
            break;
        }
    }
    for (i, node) in nodes.iter_mut().enumerate() {
        node.path = node.path.suffix(lens[i]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Table {
        let address = Table::new(vec![
            Column::of("city", vec!["London", "Tokyo"]),
            Column::of("zip", vec!["E1", "100"]),
        ])
        .unwrap();
        Table::new(vec![
            Column::of("name", vec!["Alice", "Bob"]),
            Column::group("address", address),
        ])
        .unwrap()
    }

    #[test]
    fn resolve_preserves_selector_order() {
        let table = sample();
        let selector = Selector::Cols(vec![
            Selector::path("address/city"),
            Selector::name("name"),
        ]);
        let nodes = selector.resolve(&table).unwrap();
        assert_eq!(nodes.len(), 2);
        assert_eq!(nodes[0].path, ColumnPath::parse("address/city"));
        assert_eq!(nodes[1].path, ColumnPath::name("name"));
    }

    #[test]
    fn resolve_folds_descendants_into_selected_group() {
        let table = sample();
        let selector = Selector::Cols(vec![
            Selector::path("address/city"),
            Selector::name("address"),
        ]);
        let nodes = selector.resolve(&table).unwrap();
        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].path, ColumnPath::name("address"));
    }

    #[test]
    fn unknown_name_is_a_schema_error() {
        let table = sample();
        let err = Selector::name("missing").resolve(&table).unwrap_err();
        assert!(matches!(err, Error::Schema(_)));
    }

    #[test]
    fn predicate_walks_the_full_tree() {
        let table = sample();
        let selector = Selector::Predicate(|path, _| path.last() == Some("zip"));
        let nodes = selector.resolve(&table).unwrap();
        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].path, ColumnPath::parse("address/zip"));
    }

    #[test]
    fn shorten_paths_keeps_distinct_suffixes_minimal() {
        let table = sample();
        let selector = Selector::Cols(vec![
            Selector::path("address/city"),
            Selector::name("name"),
        ]);
        let mut nodes = selector.resolve(&table).unwrap();
        shorten_paths(&mut nodes);
        assert_eq!(nodes[0].path, ColumnPath::name("city"));
        assert_eq!(nodes[1].path, ColumnPath::name("name"));
    }
}
