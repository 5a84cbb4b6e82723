//! Sets of positions inside a term

use bit_set::BitSet;
use std::iter::FromIterator;

/// A set of term positions with efficient bitwise operations.
///
/// A PosSet is a thin abstraction over [BitSet], providing the subset of its API
/// needed to manipulate the fixed positions of a [Term](crate::Term).
/// Union, intersection and differences are bitwise operations.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Debug)]
pub struct PosSet {
    positions: BitSet,
}

impl PosSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a position to this set
    pub fn insert(&mut self, pos: usize) -> bool {
        self.positions.insert(pos)
    }

    /// Remove a position from this set
    pub fn remove(&mut self, pos: usize) -> bool {
        self.positions.remove(pos)
    }

    /// Test if a specific position is in this set
    pub fn contains(&self, pos: usize) -> bool {
        self.positions.contains(pos)
    }

    /// Add all positions from the other set
    pub fn union_with(&mut self, other: &Self) {
        self.positions.union_with(&other.positions);
    }

    /// Keep only the positions contained in exactly one of the two sets
    pub fn symmetric_difference_with(&mut self, other: &Self) {
        self.positions.symmetric_difference_with(&other.positions);
    }

    /// Return true if this set contains all positions of the other set
    pub fn contains_all(&self, other: &Self) -> bool {
        self.positions.is_superset(&other.positions)
    }

    /// Return the number of positions in this set
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Return the largest position in this set, if any
    pub fn last_position(&self) -> Option<usize> {
        self.positions.iter().last()
    }

    pub fn iter(&self) -> bit_set::Iter<'_, u32> {
        self.positions.iter()
    }
}

impl FromIterator<usize> for PosSet {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        Self {
            positions: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a PosSet {
    type Item = usize;
    type IntoIter = bit_set::Iter<'a, u32>;

    fn into_iter(self) -> Self::IntoIter {
        self.positions.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_operations() {
        let mut a = PosSet::from_iter([0, 2, 5]);
        let b = PosSet::from_iter([2, 3]);

        assert_eq!(a.len(), 3);
        assert!(a.contains(5));
        assert!(!a.contains(3));
        assert_eq!(a.last_position(), Some(5));

        let mut diff = a.clone();
        diff.symmetric_difference_with(&b);
        assert_eq!(diff.iter().collect::<Vec<_>>(), vec![0, 3, 5]);

        a.union_with(&b);
        assert!(a.contains_all(&b));
        assert_eq!(a.len(), 4);

        a.remove(0);
        assert!(!a.contains(0));
        assert!(PosSet::new().is_empty());
    }

    #[test]
    fn equality_ignores_capacity() {
        let mut a = PosSet::from_iter([1, 40]);
        a.remove(40);
        let b = PosSet::from_iter([1]);
        assert_eq!(a, b);
    }
}
