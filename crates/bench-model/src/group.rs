//! Grouped benchmark results.

use crate::value::{BenchMap, BenchValue};

/// A named collection of nested benchmark results.
///
/// Groups pair a set of string tags with a mapping of labeled nested
/// values, and may nest arbitrarily deep (a group's data can contain
/// further groups).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Group {
    /// Tags describing the group as a whole.
    pub tags: Vec<String>,
    /// Labeled nested results. Labels are full values, not just strings.
    pub data: BenchMap,
}

impl Group {
    /// Create an empty group with the given tags.
    pub fn new<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tags: tags.into_iter().map(Into::into).collect(),
            data: BenchMap::new(),
        }
    }

    /// Insert a labeled result.
    pub fn insert(&mut self, label: impl Into<BenchValue>, value: impl Into<BenchValue>) {
        self.data.insert(label, value);
    }

    /// Look up a result by label.
    pub fn get(&self, label: &BenchValue) -> Option<&BenchValue> {
        self.data.get(label)
    }

    /// Number of entries in the group.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the group holds no entries.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
