//! Insertion-ordered sets of states.

use std::collections::HashSet;
use std::hash::Hash;

/// A deduplicated set that remembers insertion order.
///
/// Membership is answered through hashing; iteration follows the order in
/// which members were first inserted, so anything derived from a set (graph
/// nodes and edges in particular) is reproducible.
///
/// # Example
///
/// ```rust
/// use switchyard::core::OrderedSet;
///
/// let set: OrderedSet<&str> = ["b", "a", "b"].into_iter().collect();
/// assert_eq!(set.len(), 2);
/// assert_eq!(set.iter().copied().collect::<Vec<_>>(), vec!["b", "a"]);
/// assert!(set.contains(&"a"));
/// ```
#[derive(Clone, Debug)]
pub struct OrderedSet<T: Clone + Eq + Hash> {
    items: Vec<T>,
    index: HashSet<T>,
}

impl<T: Clone + Eq + Hash> OrderedSet<T> {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            index: HashSet::new(),
        }
    }

    /// Insert a value, returning `false` if it was already present.
    pub fn insert(&mut self, value: T) -> bool {
        if self.index.contains(&value) {
            return false;
        }
        self.index.insert(value.clone());
        self.items.push(value);
        true
    }

    pub fn contains(&self, value: &T) -> bool {
        self.index.contains(value)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterate members in first-insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }
}

impl<T: Clone + Eq + Hash> Default for OrderedSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + Eq + Hash> PartialEq for OrderedSet<T> {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index
    }
}

impl<T: Clone + Eq + Hash> Eq for OrderedSet<T> {}

impl<T: Clone + Eq + Hash> FromIterator<T> for OrderedSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl<T: Clone + Eq + Hash, const N: usize> From<[T; N]> for OrderedSet<T> {
    fn from(values: [T; N]) -> Self {
        values.into_iter().collect()
    }
}

impl<T: Clone + Eq + Hash> Extend<T> for OrderedSet<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<'a, T: Clone + Eq + Hash> IntoIterator for &'a OrderedSet<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_deduplicates() {
        let mut set = OrderedSet::new();
        assert!(set.insert(1));
        assert!(set.insert(2));
        assert!(!set.insert(1));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn iteration_follows_first_insertion() {
        let set: OrderedSet<u8> = vec![3, 1, 3, 2, 1].into_iter().collect();
        assert_eq!(set.iter().copied().collect::<Vec<_>>(), vec![3, 1, 2]);
    }

    #[test]
    fn equality_ignores_order() {
        let a: OrderedSet<u8> = vec![1, 2].into_iter().collect();
        let b: OrderedSet<u8> = vec![2, 1].into_iter().collect();
        assert_eq!(a, b);
    }

    #[test]
    fn empty_set_reports_empty() {
        let set: OrderedSet<u8> = OrderedSet::default();
        assert!(set.is_empty());
        assert!(!set.contains(&0));
    }
}
