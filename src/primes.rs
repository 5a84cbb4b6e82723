//! Generation of prime implicants by iterated pairwise combination (Quine-McCluskey).

use crate::group::TERM_SEPARATORS;
use crate::*;

use log::{debug, info, trace};
use rayon::prelude::*;
use std::collections::btree_set::{IntoIter, Iter};
use std::collections::{BTreeSet, HashSet};
use std::fmt;
use std::str::FromStr;

/// Number of candidate pairs in a round above which the default configuration uses threads.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 4096;

/// Set of prime implicants of a Boolean function.
///
/// A prime implicant is a term which could not be combined with any other term during
/// the round in which it was inspected. The set contains all prime implicants: it is
/// generally larger than a minimal cover of the function.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Primes {
    patterns: BTreeSet<Term>,
    rounds: usize,
}

impl Primes {
    /// Get the number of prime implicants
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Return whether there are no prime implicant (the function is always false)
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn iter(&self) -> Iter<'_, Term> {
        self.patterns.iter()
    }

    pub fn contains(&self, term: &Term) -> bool {
        self.patterns.contains(term)
    }

    /// Test if a concrete term is covered by at least one prime implicant
    pub fn covers(&self, minterm: &Term) -> Result<bool, QmError> {
        for p in &self.patterns {
            if p.contains(minterm)? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Number of combination rounds needed to reach the fixed point
    pub fn rounds(&self) -> usize {
        self.rounds
    }
}

impl<'a> IntoIterator for &'a Primes {
    type Item = &'a Term;
    type IntoIter = Iter<'a, Term>;

    fn into_iter(self) -> Self::IntoIter {
        self.patterns.iter()
    }
}

impl IntoIterator for Primes {
    type Item = Term;
    type IntoIter = IntoIter<Term>;

    fn into_iter(self) -> Self::IntoIter {
        self.patterns.into_iter()
    }
}

impl FromStr for Primes {
    type Err = QmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let terms = s
            .split(&TERM_SEPARATORS[..])
            .filter(|elt| !elt.trim().is_empty())
            .map(Term::from_str)
            .collect::<Result<Vec<_>, _>>()?;
        prime_implicants(&terms)
    }
}

impl fmt::Display for Primes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for p in &self.patterns {
            writeln!(f, "{}", p)?;
        }
        write!(f, "")
    }
}

/// Strategy for the pairwise scan of a combination round.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Parallelism {
    /// Always scan the pairs on the current thread
    Sequential,

    /// Scan the pairs on the rayon thread pool when a round has at least this number of candidate pairs
    Threshold(usize),

    /// Always scan the pairs on the rayon thread pool
    Always,
}

impl Parallelism {
    fn use_threads(self, candidates: usize) -> bool {
        match self {
            Parallelism::Sequential => false,
            Parallelism::Threshold(n) => candidates >= n,
            Parallelism::Always => true,
        }
    }
}

impl Default for Parallelism {
    fn default() -> Self {
        Parallelism::Threshold(DEFAULT_PARALLEL_THRESHOLD)
    }
}

/// A successful combination of two terms from adjacent buckets
struct Merge<'a> {
    lower: &'a Term,
    upper: &'a Term,
    combined: Term,
}

/// Prime implicant engine.
///
/// The engine repeatedly combines terms of adjacent weights until no new term emerges.
/// Terms involved in at least one combination are dropped, the others are prime implicants.
/// The configuration only affects how each round is computed, never its result.
///
/// ```
/// use qmkit::{Minimizer, Parallelism, Term};
/// # use qmkit::QmError;
/// # fn main() -> Result<(), QmError> {
/// let terms: Vec<Term> = vec!["1-01".parse()?];
/// let minimizer = Minimizer::default().with_parallelism(Parallelism::Sequential);
/// let primes = minimizer.minimize(&terms)?;
///
/// assert_eq!(primes.len(), 1);
/// assert!(primes.contains(&"1X01".parse()?));
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Minimizer {
    parallelism: Parallelism,
}

impl Minimizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_parallelism(mut self, parallelism: Parallelism) -> Self {
        self.parallelism = parallelism;
        self
    }

    pub fn parallelism(&self) -> Parallelism {
        self.parallelism
    }

    /// Expand raw terms (possibly containing don't-care) and compute their prime implicants
    pub fn minimize<'a>(&self, terms: impl IntoIterator<Item = &'a Term>) -> Result<Primes, QmError> {
        self.prime_implicants(WeightGroups::expanded(terms)?)
    }

    /// Compute all prime implicants, starting from a group of terms.
    pub fn prime_implicants(&self, groups: WeightGroups) -> Result<Primes, QmError> {
        let inputs = groups.len();
        let mut primes = Primes::default();
        let mut current = groups;
        while !current.is_empty() {
            primes.rounds += 1;
            current = self.round(&current, &mut primes)?;
        }
        info!(
            "{} prime implicants from {} terms in {} rounds",
            primes.len(),
            inputs,
            primes.rounds
        );
        Ok(primes)
    }

    /// Run a single combination round.
    ///
    /// The unmarked terms of the current group are added to the primes,
    /// the combined terms are returned as the group for the next round.
    fn round(&self, groups: &WeightGroups, primes: &mut Primes) -> Result<WeightGroups, QmError> {
        let merges = self.combine_adjacent(groups)?;

        let mut marked: HashSet<&Term> = HashSet::with_capacity(2 * merges.len());
        let mut next = WeightGroups::default();
        for merge in merges {
            trace!("{} + {} => {}", merge.lower, merge.upper, merge.combined);
            marked.insert(merge.lower);
            marked.insert(merge.upper);
            next.insert(merge.combined)?;
        }

        let before = primes.len();
        primes
            .patterns
            .extend(groups.iter().filter(|t| !marked.contains(t)).cloned());

        debug!(
            "round {}: {} terms in {} buckets, {} marked, {} new primes, {} combined terms",
            primes.rounds,
            groups.len(),
            groups.weights().count(),
            marked.len(),
            primes.len() - before,
            next.len()
        );
        Ok(next)
    }

    /// Try to combine all pairs of terms taken in adjacent buckets
    fn combine_adjacent<'a>(&self, groups: &'a WeightGroups) -> Result<Vec<Merge<'a>>, QmError> {
        let candidates: usize = groups
            .adjacent_pairs()
            .map(|(lower, upper)| lower.len() * upper.len())
            .sum();

        let scanned: Vec<Vec<Merge>> = if self.parallelism.use_threads(candidates) {
            let pairs: Vec<_> = groups.adjacent_pairs().collect();
            pairs
                .par_iter()
                .flat_map(|&(lower, upper)| {
                    lower
                        .par_iter()
                        .map(move |t| combine_with_bucket(t, upper))
                })
                .collect::<Result<_, _>>()?
        } else {
            groups
                .adjacent_pairs()
                .flat_map(|(lower, upper)| {
                    lower.iter().map(move |t| combine_with_bucket(t, upper))
                })
                .collect::<Result<_, _>>()?
        };
        Ok(scanned.into_iter().flatten().collect())
    }
}

/// Combine a term with all the terms of the next bucket
fn combine_with_bucket<'a>(
    term: &'a Term,
    bucket: &'a BTreeSet<Term>,
) -> Result<Vec<Merge<'a>>, QmError> {
    let mut result = vec![];
    for other in bucket {
        if let Some(combined) = term.combine(other)? {
            result.push(Merge {
                lower: term,
                upper: other,
                combined,
            });
        }
    }
    Ok(result)
}

/// Compute the prime implicants of a list of raw terms with the default configuration.
///
/// ```
/// use qmkit::{prime_implicants, Term};
/// # use qmkit::QmError;
/// # fn main() -> Result<(), QmError> {
/// let terms = ["0000", "0001", "0011", "0010", "0110"]
///     .iter()
///     .map(|s| s.parse())
///     .collect::<Result<Vec<Term>, _>>()?;
///
/// let primes = prime_implicants(&terms)?;
/// assert_eq!(primes.len(), 2);
/// assert!(primes.contains(&"00--".parse()?));
/// assert!(primes.contains(&"0-10".parse()?));
/// # Ok(())
/// # }
/// ```
pub fn prime_implicants<'a>(terms: impl IntoIterator<Item = &'a Term>) -> Result<Primes, QmError> {
    Minimizer::default().minimize(terms)
}

#[cfg(test)]
mod tests {
    use crate::expand::expand_all;
    use crate::primes::*;
    use proptest::prelude::*;

    fn parse_all(descr: &[&str]) -> Result<Vec<Term>, QmError> {
        descr.iter().map(|s| s.parse()).collect()
    }

    fn sorted_strings(primes: &Primes) -> Vec<String> {
        primes
            .iter()
            .map(|t| t.to_string())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    #[test_log::test]
    fn hand_computed_table() -> Result<(), QmError> {
        // round 1: 000-, 00-0, 00-1, 001-, 0-10
        // round 2: 000- + 001- and 00-0 + 00-1 give 00--, 0-10 is prime
        // round 3: 00-- is prime
        let primes: Primes = "0000;0001;0011;0010;0110".parse()?;
        assert_eq!(sorted_strings(&primes), vec!["0-10", "00--"]);
        assert_eq!(primes.rounds(), 3);
        Ok(())
    }

    #[test_log::test]
    fn classic_example() -> Result<(), QmError> {
        // f(a,b,c,d) = sum m(4,8,10,11,12,15) + d(9,14)
        // with don't-care minterms included in the on-set
        let primes: Primes = "0100;1000;1010;1011;1100;1111;1001;1110".parse()?;
        assert_eq!(
            sorted_strings(&primes),
            vec!["-100", "1--0", "1-1-", "10--"]
        );
        Ok(())
    }

    #[test]
    fn dont_care_input_is_merged_back() -> Result<(), QmError> {
        let primes = prime_implicants(&parse_all(&["1-01"])?)?;
        assert_eq!(sorted_strings(&primes), vec!["1-01"]);
        assert_eq!(primes.rounds(), 2);
        Ok(())
    }

    #[test]
    fn trivial_inputs() -> Result<(), QmError> {
        let empty = prime_implicants(&Vec::<Term>::new())?;
        assert!(empty.is_empty());
        assert_eq!(empty.rounds(), 0);

        let single = prime_implicants(&parse_all(&["0110"])?)?;
        assert_eq!(sorted_strings(&single), vec!["0110"]);
        assert_eq!(single.rounds(), 1);

        let all = prime_implicants(&parse_all(&["---"])?)?;
        assert_eq!(sorted_strings(&all), vec!["---"]);
        Ok(())
    }

    #[test]
    fn non_adjacent_buckets_never_combine() -> Result<(), QmError> {
        let groups: WeightGroups = "0000;0011;1111".parse()?;
        let inputs: BTreeSet<Term> = groups.iter().cloned().collect();
        let primes = Minimizer::default().prime_implicants(groups)?;
        assert_eq!(primes.into_iter().collect::<BTreeSet<_>>(), inputs);
        Ok(())
    }

    #[test]
    fn groups_are_not_expanded_by_the_engine() -> Result<(), QmError> {
        // pre-grouped terms keep their don't-care: 1-0 and 1-1 combine directly
        let groups = WeightGroups::from_terms(parse_all(&["1-0", "1-1"])?)?;
        let primes = Minimizer::default().prime_implicants(groups)?;
        assert_eq!(sorted_strings(&primes), vec!["1--"]);
        Ok(())
    }

    #[test]
    fn mixed_widths_are_rejected() -> Result<(), QmError> {
        let terms = parse_all(&["0101", "010"])?;
        assert_eq!(
            prime_implicants(&terms),
            Err(QmError::ShapeMismatch {
                expected: 4,
                found: 3
            })
        );
        assert!("01x;0z1".parse::<Primes>().is_err());
        Ok(())
    }

    #[test]
    fn primes_cover_their_inputs() -> Result<(), QmError> {
        let terms = parse_all(&["0-01", "1100", "111-", "0000"])?;
        let primes = prime_implicants(&terms)?;
        for minterm in expand_all(&terms)? {
            assert!(primes.covers(&minterm)?);
        }
        assert!(!primes.covers(&"1011".parse()?)?);
        assert!(primes.covers(&"10".parse()?).is_err());
        Ok(())
    }

    #[test]
    fn display() -> Result<(), QmError> {
        let primes: Primes = "0000;0001;0011;0010;0110".parse()?;
        let printed = format!("{}", primes);
        assert!(printed.ends_with('\n'));
        let lines: BTreeSet<&str> = printed.lines().collect();
        assert_eq!(lines, BTreeSet::from(["00--", "0-10"]));
        Ok(())
    }

    #[test]
    fn parallel_scan_gives_the_same_primes() -> Result<(), QmError> {
        let terms = parse_all(&["0-0-1", "11-00", "1-111", "00110", "0101-", "10-01"])?;
        let sequential = Minimizer::new()
            .with_parallelism(Parallelism::Sequential)
            .minimize(&terms)?;
        let parallel = Minimizer::new()
            .with_parallelism(Parallelism::Always)
            .minimize(&terms)?;
        assert_eq!(sequential, parallel);
        assert_eq!(
            Minimizer::new().parallelism(),
            Parallelism::Threshold(DEFAULT_PARALLEL_THRESHOLD)
        );
        Ok(())
    }

    proptest! {
        #[test]
        fn set_semantics(descr in prop::collection::vec("[01-]{5}", 0..12)) {
            let terms: Vec<Term> = descr.iter().map(|s| s.parse().unwrap()).collect();
            let mut reversed = terms.clone();
            reversed.reverse();

            let first = prime_implicants(&terms).unwrap();
            let again = prime_implicants(&reversed).unwrap();
            prop_assert_eq!(&first, &again);

            let parallel = Minimizer::new()
                .with_parallelism(Parallelism::Always)
                .minimize(&terms)
                .unwrap();
            prop_assert_eq!(&first, &parallel);
        }

        #[test]
        fn primes_are_maximal(descr in prop::collection::vec("[01-]{4}", 1..8)) {
            let terms: Vec<Term> = descr.iter().map(|s| s.parse().unwrap()).collect();
            let minterms = expand_all(&terms).unwrap();
            let primes = prime_implicants(&terms).unwrap();

            for minterm in &minterms {
                prop_assert!(primes.covers(minterm).unwrap());
            }
            for p in &primes {
                // every prime only covers input minterms
                for covered in p.expand() {
                    prop_assert!(minterms.contains(&covered));
                }
                // no prime is contained in another one
                for q in &primes {
                    prop_assert!(p == q || !q.contains(p).unwrap());
                }
            }
        }
    }
}
