//! Column paths: name sequences addressing columns through nested groups.

use std::fmt;

/// Location of a column in a table tree, one name per nesting level.
///
/// Paths render and parse with `/` as the separator, e.g. `"address/city"`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ColumnPath(Vec<String>);

impl ColumnPath {
    pub fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ColumnPath(segments.into_iter().map(Into::into).collect())
    }

    /// A single-segment path.
    pub fn name(name: impl Into<String>) -> Self {
        ColumnPath(vec![name.into()])
    }

    /// Parse a `/`-separated path.
    pub fn parse(path: &str) -> Self {
        ColumnPath(path.split('/').map(str::to_owned).collect())
    }

    pub(crate) fn empty() -> Self {
        ColumnPath(Vec::new())
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn first(&self) -> Option<&str> {
        self.0.first().map(String::as_str)
    }

    pub fn last(&self) -> Option<&str> {
        self.0.last().map(String::as_str)
    }

    /// The path without its first segment.
    pub fn drop_first(&self) -> ColumnPath {
        ColumnPath(self.0.iter().skip(1).cloned().collect())
    }

    /// This path extended by one child name.
    pub fn child(&self, name: &str) -> ColumnPath {
        let mut segments = self.0.clone();
        segments.push(name.to_owned());
        ColumnPath(segments)
    }

    /// The last `n` segments (the whole path when it is shorter).
    pub fn suffix(&self, n: usize) -> ColumnPath {
        let start = self.0.len().saturating_sub(n);
        ColumnPath(self.0[start..].to_vec())
    }

    pub fn starts_with(&self, prefix: &ColumnPath) -> bool {
        self.0.len() >= prefix.0.len() && self.0.iter().zip(&prefix.0).all(|(a, b)| a == b)
    }
}

impl fmt::Display for ColumnPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join("/"))
    }
}

impl From<&str> for ColumnPath {
    fn from(path: &str) -> Self {
        ColumnPath::parse(path)
    }
}

impl From<String> for ColumnPath {
    fn from(path: String) -> Self {
        ColumnPath::parse(&path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_and_display() {
        let path = ColumnPath::parse("address/city");
        assert_eq!(path.segments(), ["address", "city"]);
        assert_eq!(path.to_string(), "address/city");
        assert_eq!(path.last(), Some("city"));
        assert_eq!(path.drop_first(), ColumnPath::name("city"));
    }

    #[test]
    fn prefix_and_suffix() {
        let path = ColumnPath::parse("a/b/c");
        assert!(path.starts_with(&ColumnPath::parse("a/b")));
        assert!(!path.starts_with(&ColumnPath::parse("b")));
        assert_eq!(path.suffix(1), ColumnPath::name("c"));
        assert_eq!(path.suffix(5), path);
    }
}
