use thiserror::Error;

/// Unified error type for all nframe operations.
///
/// Errors propagate upward through the call stack using Rust's `?` operator.
/// Internal code can match on specific variants for fine-grained handling; at
/// API boundaries the `Display` implementation renders a user-facing message.
///
/// `Error` is `Send` and `Sync`, so errors can cross thread boundaries (e.g.
/// out of a parallel key-computation pass).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A structural invariant of a table was (or would be) violated.
    ///
    /// Raised for row-length mismatches across columns at construction time,
    /// duplicate sibling column names, insert paths that descend through a
    /// non-group column, and two insert descriptors targeting the identical
    /// final path.
    #[error("structure error: {0}")]
    Structure(String),

    /// A selector, column path or join condition referenced a column that
    /// does not exist, or a column of an unusable kind (e.g. a frame column
    /// used as a grouping key).
    ///
    /// Schema errors are reported before any row is scanned.
    #[error("schema error: {0}")]
    Schema(String),

    /// `first`, `last` or `single` found zero matching rows.
    #[error("empty result: {0}")]
    EmptyResult(String),

    /// Invalid user input or API parameter.
    ///
    /// Covers `single` over more than one row, out-of-bounds row indexes,
    /// empty grouping keys, and join calls with no usable key columns.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A value was read back with an incompatible expected type, or an
    /// operation required a column kind it did not get (e.g. a scalar read
    /// of a group cell, an aggregate over a non-numeric column).
    #[error("type mismatch: expected {expected}, found {actual}")]
    TypeMismatch { expected: String, actual: String },
}

impl Error {
    /// Shorthand for a [`Error::TypeMismatch`] from two descriptions.
    pub fn type_mismatch(expected: impl Into<String>, actual: impl Into<String>) -> Self {
        Error::TypeMismatch {
            expected: expected.into(),
            actual: actual.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        let err = Error::Structure("column 'a' has 2 rows, expected 3".into());
        assert_eq!(
            err.to_string(),
            "structure error: column 'a' has 2 rows, expected 3"
        );

        let err = Error::type_mismatch("int", "str");
        assert_eq!(err.to_string(), "type mismatch: expected int, found str");
    }
}
