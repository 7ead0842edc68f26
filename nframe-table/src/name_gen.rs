//! Sibling-unique column name generation.

use rustc_hash::FxHashSet;

/// Generates sibling-unique column names by appending the smallest unused
/// positive integer suffix (`name`, `name1`, `name2`, ...).
///
/// Used wherever columns from different sources land next to each other:
/// join output schemas and pair-based table construction.
#[derive(Debug, Default)]
pub struct ColumnNameGenerator {
    used: FxHashSet<String>,
}

impl ColumnNameGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// A generator with `names` already taken.
    pub fn with_reserved<'a>(names: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            used: names.into_iter().map(str::to_owned).collect(),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.used.contains(name)
    }

    /// Reserve `name` as-is when free, otherwise the first free suffixed
    /// variant. Returns the reserved name.
    pub fn add_unique(&mut self, name: &str) -> String {
        if self.used.insert(name.to_owned()) {
            return name.to_owned();
        }
        let mut k = 1usize;
        loop {
            let candidate = format!("{name}{k}");
            if self.used.insert(candidate.clone()) {
                return candidate;
            }
            k += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suffixes_count_up_from_one() {
        let mut gen = ColumnNameGenerator::new();
        assert_eq!(gen.add_unique("age"), "age");
        assert_eq!(gen.add_unique("age"), "age1");
        assert_eq!(gen.add_unique("age"), "age2");
    }

    #[test]
    fn skips_reserved_names() {
        let mut gen = ColumnNameGenerator::with_reserved(["name", "name1"]);
        assert_eq!(gen.add_unique("name"), "name2");
        assert_eq!(gen.add_unique("other"), "other");
    }
}
