//! Group terms by weight.

use crate::expand::expand_all;
use crate::*;

use itertools::Itertools;
use std::collections::{BTreeMap, BTreeSet};
use std::str::FromStr;

pub(crate) static TERM_SEPARATORS: [char; 4] = [',', ';', '|', '\n'];

/// Terms of the same width, grouped by weight (number of positions fixed at `1`).
///
/// The weight is only a bucket key: all terms sharing a weight are stored together.
/// Each bucket is a set, inserting the same term twice has no effect.
/// Two terms differing by a single fixed position always belong to buckets
/// of consecutive weights, which are enumerated by [WeightGroups::adjacent_pairs].
///
/// A collection of raw terms is parsed from a list of terms separated by `,`, `;`, `|` or
/// new lines. Parsed terms are expanded into concrete terms before grouping.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WeightGroups {
    width: Option<usize>,
    buckets: BTreeMap<usize, BTreeSet<Term>>,
}

impl WeightGroups {
    /// Group a collection of terms without expanding them
    pub fn from_terms(terms: impl IntoIterator<Item = Term>) -> Result<Self, QmError> {
        let mut groups = Self::default();
        for t in terms {
            groups.insert(t)?;
        }
        Ok(groups)
    }

    /// Expand a collection of terms and group the resulting concrete terms
    pub fn expanded<'a>(terms: impl IntoIterator<Item = &'a Term>) -> Result<Self, QmError> {
        Self::from_terms(expand_all(terms)?)
    }

    /// Add a term in the bucket matching its weight.
    ///
    /// Returns false if this term was already in the group.
    pub fn insert(&mut self, term: Term) -> Result<bool, QmError> {
        let expected = *self.width.get_or_insert(term.width());
        QmError::check_width(expected, term.width())?;
        Ok(self.buckets.entry(term.weight()).or_default().insert(term))
    }

    /// Width shared by all terms, if any term was inserted
    pub fn width(&self) -> Option<usize> {
        self.width
    }

    /// Total number of terms in all buckets
    pub fn len(&self) -> usize {
        self.buckets.values().map(|b| b.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Iterate over the populated weights, in increasing order
    pub fn weights(&self) -> impl Iterator<Item = usize> + '_ {
        self.buckets.keys().copied()
    }

    pub fn bucket(&self, weight: usize) -> Option<&BTreeSet<Term>> {
        self.buckets.get(&weight)
    }

    pub fn contains(&self, term: &Term) -> bool {
        self.bucket(term.weight()).map_or(false, |b| b.contains(term))
    }

    /// Iterate over all terms, by increasing weight
    pub fn iter(&self) -> impl Iterator<Item = &Term> + '_ {
        self.buckets.values().flatten()
    }

    /// Iterate over the pairs of populated buckets with weights `w` and `w+1`.
    ///
    /// Buckets separated by a larger gap can not contain combinable terms and are never paired.
    pub fn adjacent_pairs(&self) -> impl Iterator<Item = (&BTreeSet<Term>, &BTreeSet<Term>)> + '_ {
        self.buckets
            .iter()
            .tuple_windows()
            .filter(|((w1, _), (w2, _))| *w1 + 1 == **w2)
            .map(|((_, lower), (_, upper))| (lower, upper))
    }
}

impl<'a> IntoIterator for &'a WeightGroups {
    type Item = &'a Term;
    type IntoIter = std::iter::Flatten<std::collections::btree_map::Values<'a, usize, BTreeSet<Term>>>;

    fn into_iter(self) -> Self::IntoIter {
        self.buckets.values().flatten()
    }
}

impl IntoIterator for WeightGroups {
    type Item = Term;
    type IntoIter = std::iter::Flatten<std::collections::btree_map::IntoValues<usize, BTreeSet<Term>>>;

    fn into_iter(self) -> Self::IntoIter {
        self.buckets.into_values().flatten()
    }
}

impl FromStr for WeightGroups {
    type Err = QmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let terms = s
            .split(&TERM_SEPARATORS[..])
            .filter(|elt| !elt.trim().is_empty())
            .map(Term::from_str)
            .collect::<Result<Vec<_>, _>>()?;
        Self::expanded(&terms)
    }
}

#[cfg(test)]
mod tests {
    use crate::group::*;

    #[test]
    fn grouping() -> Result<(), QmError> {
        let groups: WeightGroups = "0000;0001,0011|0010\n0110".parse()?;
        assert_eq!(groups.width(), Some(4));
        assert_eq!(groups.len(), 5);
        assert_eq!(groups.weights().collect::<Vec<_>>(), vec![0, 1, 2]);
        assert_eq!(groups.bucket(1).map(|b| b.len()), Some(2));
        assert!(groups.contains(&"0110".parse()?));
        assert!(!groups.contains(&"0111".parse()?));
        Ok(())
    }

    #[test]
    fn duplicates_are_merged() -> Result<(), QmError> {
        let mut groups: WeightGroups = "1-0;10-".parse()?;
        assert_eq!(groups.len(), 3);
        assert!(!groups.insert("100".parse()?)?);
        assert!(groups.insert("111".parse()?)?);
        assert_eq!(groups.len(), 4);
        Ok(())
    }

    #[test]
    fn mixed_widths_are_rejected() -> Result<(), QmError> {
        let mut groups = WeightGroups::default();
        groups.insert("101".parse()?)?;
        assert_eq!(
            groups.insert("1010".parse()?),
            Err(QmError::ShapeMismatch {
                expected: 3,
                found: 4
            })
        );
        assert!("01;011".parse::<WeightGroups>().is_err());
        Ok(())
    }

    #[test]
    fn only_adjacent_buckets_are_paired() -> Result<(), QmError> {
        let groups: WeightGroups = "0000;0011;0111;1111".parse()?;
        let pairs: Vec<_> = groups.adjacent_pairs().collect();
        // weights 0, 2, 3, 4: only (2,3) and (3,4) are adjacent
        assert_eq!(pairs.len(), 2);
        assert!(pairs[0].0.contains(&"0011".parse()?));
        assert!(pairs[1].1.contains(&"1111".parse()?));

        let sparse: WeightGroups = "0000;0011;1111".parse()?;
        assert_eq!(sparse.adjacent_pairs().count(), 0);
        Ok(())
    }

    #[test]
    fn empty_input() -> Result<(), QmError> {
        let groups: WeightGroups = "".parse()?;
        assert!(groups.is_empty());
        assert_eq!(groups.width(), None);
        assert_eq!(groups.into_iter().count(), 0);
        Ok(())
    }
}
