use {indexmap::IndexSet, log::trace};

/// An ordered set of strings: first-insertion order is kept and exact duplicates are dropped.
///
/// Used for the actions, resources and principal identifiers of a statement so that the rendered form is stable
/// no matter how often a caller repeats a permission.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Accumulator {
    items: IndexSet<String>,
}

impl Accumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an item. Returns `false` if it was already present.
    pub fn insert<S: Into<String>>(&mut self, item: S) -> bool {
        let item = item.into();
        let inserted = self.items.insert(item);
        if !inserted {
            trace!("Ignoring duplicate item");
        }
        inserted
    }

    #[inline]
    pub fn contains(&self, item: &str) -> bool {
        self.items.contains(item)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &String> {
        self.items.iter()
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.items.iter().cloned().collect()
    }
}

impl<S: Into<String>> Extend<S> for Accumulator {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for item in iter {
            self.insert(item);
        }
    }
}

impl<S: Into<String>> FromIterator<S> for Accumulator {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut result = Self::new();
        result.extend(iter);
        result
    }
}
