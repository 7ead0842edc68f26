//! Common types for the table core.

use std::fmt;

use crate::value::Value;

/// Declared type of a value column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataType {
    Bool,
    Int,
    Float,
    Str,
    /// Mixed or unknown; the type of an all-null column.
    Any,
}

impl DataType {
    /// Infer a column type from data.
    ///
    /// Nulls are ignored; mixed `Int`/`Float` widens to `Float`; any other
    /// mix, or a column with no non-null values, is `Any`.
    pub fn infer(values: &[Value]) -> DataType {
        let mut acc: Option<DataType> = None;
        for value in values {
            let Some(t) = value.dtype() else { continue };
            acc = Some(match acc {
                None => t,
                Some(prev) if prev == t => prev,
                Some(DataType::Int) if t == DataType::Float => DataType::Float,
                Some(DataType::Float) if t == DataType::Int => DataType::Float,
                Some(_) => DataType::Any,
            });
            if acc == Some(DataType::Any) {
                break;
            }
        }
        acc.unwrap_or(DataType::Any)
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DataType::Bool => "bool",
            DataType::Int => "int",
            DataType::Float => "float",
            DataType::Str => "str",
            DataType::Any => "any",
        };
        write!(f, "{name}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inference() {
        assert_eq!(
            DataType::infer(&[Value::Int(1), Value::Null, Value::Int(2)]),
            DataType::Int
        );
        assert_eq!(
            DataType::infer(&[Value::Int(1), Value::Float(2.5)]),
            DataType::Float
        );
        assert_eq!(
            DataType::infer(&[Value::Int(1), Value::from("a")]),
            DataType::Any
        );
        assert_eq!(DataType::infer(&[Value::Null, Value::Null]), DataType::Any);
        assert_eq!(DataType::infer(&[]), DataType::Any);
    }
}
