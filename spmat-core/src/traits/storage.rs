//! Storage policy traits
//!
//! Stores are generic over a storage policy chosen at construction time:
//! the row container used by map-backed matrices, and the ordering kept by
//! coordinate-backed matrices. Both are resolved statically, so the hot
//! `vmult` loops are monomorphized per policy.

use alloc::collections::btree_map::{self, BTreeMap};
use alloc::vec::Vec;

/// Associative container holding one row of a map-backed matrix
///
/// Maps a column index to the stored value. Column indices are unique
/// within a row.
pub trait RowMap<T>: Default {
    /// Iterator over `(column, &value)` pairs in container order
    type Iter<'a>: Iterator<Item = (usize, &'a T)>
    where
        Self: 'a,
        T: 'a;

    /// Whether [`RowMap::iter`] yields columns in ascending order
    const ORDERED: bool;

    /// Look up the value stored at `col`
    fn get(&self, col: usize) -> Option<&T>;

    /// Return the value at `col`, inserting `value` first if absent
    ///
    /// The flag is `true` when a new entry was created.
    fn get_or_insert(&mut self, col: usize, value: T) -> (&mut T, bool);

    /// Number of stored entries in the row
    fn len(&self) -> usize;

    /// Whether the row stores no entries
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterate over stored entries in container order
    fn iter(&self) -> Self::Iter<'_>;

    /// Largest stored column index, if any
    fn max_col(&self) -> Option<usize>;

    /// Stored entries with columns in ascending order
    fn sorted_entries(&self) -> Vec<(usize, T)>
    where
        T: Copy,
    {
        let mut entries: Vec<(usize, T)> = self.iter().map(|(j, &v)| (j, v)).collect();
        if !Self::ORDERED {
            entries.sort_unstable_by_key(|&(j, _)| j);
        }
        entries
    }
}

/// Iterator adapter turning `(&usize, &T)` map items into `(usize, &T)`
pub struct RowIter<I> {
    inner: I,
}

impl<'a, T: 'a, I> Iterator for RowIter<I>
where
    I: Iterator<Item = (&'a usize, &'a T)>,
{
    type Item = (usize, &'a T);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(&j, v)| (j, v))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> RowMap<T> for BTreeMap<usize, T> {
    type Iter<'a>
        = RowIter<btree_map::Iter<'a, usize, T>>
    where
        T: 'a;

    const ORDERED: bool = true;

    #[inline]
    fn get(&self, col: usize) -> Option<&T> {
        BTreeMap::get(self, &col)
    }

    #[inline]
    fn get_or_insert(&mut self, col: usize, value: T) -> (&mut T, bool) {
        match self.entry(col) {
            btree_map::Entry::Occupied(entry) => (entry.into_mut(), false),
            btree_map::Entry::Vacant(entry) => (entry.insert(value), true),
        }
    }

    #[inline]
    fn len(&self) -> usize {
        BTreeMap::len(self)
    }

    fn iter(&self) -> Self::Iter<'_> {
        RowIter {
            inner: BTreeMap::iter(self),
        }
    }

    fn max_col(&self) -> Option<usize> {
        self.last_key_value().map(|(&j, _)| j)
    }
}

#[cfg(feature = "hashbrown")]
impl<T> RowMap<T> for hashbrown::HashMap<usize, T> {
    type Iter<'a>
        = RowIter<hashbrown::hash_map::Iter<'a, usize, T>>
    where
        T: 'a;

    const ORDERED: bool = false;

    #[inline]
    fn get(&self, col: usize) -> Option<&T> {
        hashbrown::HashMap::get(self, &col)
    }

    #[inline]
    fn get_or_insert(&mut self, col: usize, value: T) -> (&mut T, bool) {
        match self.entry(col) {
            hashbrown::hash_map::Entry::Occupied(entry) => (entry.into_mut(), false),
            hashbrown::hash_map::Entry::Vacant(entry) => (entry.insert(value), true),
        }
    }

    #[inline]
    fn len(&self) -> usize {
        hashbrown::HashMap::len(self)
    }

    fn iter(&self) -> Self::Iter<'_> {
        RowIter {
            inner: hashbrown::HashMap::iter(self),
        }
    }

    fn max_col(&self) -> Option<usize> {
        self.keys().copied().max()
    }
}

/// Ordering policy of a coordinate-backed matrix
pub trait CooOrdering: Default + Copy + core::fmt::Debug {
    /// Whether triples are kept in (row, column) order after every write
    const SORTED: bool;
}

/// Triples kept in strictly ascending (row, column) order
///
/// Lookups are `O(log nnz)`; inserting a new entry shifts the tail.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Sorted;

/// Triples kept in insertion order
///
/// Lookups scan linearly; new entries are appended.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Unsorted;

impl CooOrdering for Sorted {
    const SORTED: bool = true;
}

impl CooOrdering for Unsorted {
    const SORTED: bool = false;
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn test_btree_row_insert_once() {
        let mut row: BTreeMap<usize, f64> = BTreeMap::new();
        let (value, inserted) = row.get_or_insert(4, 0.0);
        *value = 2.5;
        assert!(inserted);

        let (value, inserted) = row.get_or_insert(4, 0.0);
        assert!(!inserted);
        assert_eq!(*value, 2.5);
        assert_eq!(RowMap::len(&row), 1);
        assert_eq!(row.max_col(), Some(4));
    }

    #[cfg(feature = "hashbrown")]
    #[test]
    fn test_hash_row_sorted_entries() {
        let mut row: hashbrown::HashMap<usize, i32> = hashbrown::HashMap::new();
        for j in [9usize, 2, 5, 0] {
            *row.get_or_insert(j, 0).0 = j as i32;
        }
        assert_eq!(
            row.sorted_entries(),
            vec![(0, 0), (2, 2), (5, 5), (9, 9)]
        );
        assert_eq!(row.max_col(), Some(9));
    }

    #[test]
    fn test_ordering_flags() {
        assert!(Sorted::SORTED);
        assert!(!Unsorted::SORTED);
    }
}
