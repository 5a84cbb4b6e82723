//! Expansion of don't-care positions into concrete terms.

use crate::*;

use std::collections::BTreeSet;
use std::iter::FusedIterator;

/// Lazy iterator over all concrete terms represented by a [Term].
///
/// For a term with `k` don't-care positions, it yields exactly `2^k` distinct concrete terms.
/// The order is deterministic: the don't-care positions behave as a binary counter
/// starting from all `0`, where the lowest position changes the fastest.
///
/// ```
/// use qmkit::Term;
/// # use qmkit::QmError;
/// # fn main() -> Result<(), QmError> {
/// let t: Term = "1-0-".parse()?;
/// let expanded: Vec<String> = t.expand().map(|t| t.to_string()).collect();
/// assert_eq!(expanded, ["1000", "1100", "1001", "1101"]);
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct Expansion {
    next: Option<Term>,
    free: Vec<usize>,
    remaining: Option<usize>,
}

impl Expansion {
    pub(crate) fn new(term: &Term) -> Self {
        let free: Vec<usize> = term.dont_care_positions().collect();
        let mut first = term.clone();
        for &pos in &free {
            first.zeros.insert(pos);
        }
        let remaining = u32::try_from(free.len())
            .ok()
            .and_then(|k| 1usize.checked_shl(k));
        Self {
            next: Some(first),
            free,
            remaining,
        }
    }

    /// Move the counter to the next assignment of the free positions
    fn advance(&self, current: &Term) -> Option<Term> {
        let mut next = current.clone();
        for &pos in &self.free {
            if next.ones.remove(pos) {
                // carry to the next free position
                next.zeros.insert(pos);
            } else {
                next.zeros.remove(pos);
                next.ones.insert(pos);
                return Some(next);
            }
        }
        None
    }
}

impl Iterator for Expansion {
    type Item = Term;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next.take()?;
        self.next = self.advance(&current);
        self.remaining = self.remaining.map(|r| r.saturating_sub(1));
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.next.is_none() {
            return (0, Some(0));
        }
        match self.remaining {
            Some(r) => (r, Some(r)),
            None => (0, None),
        }
    }
}

impl FusedIterator for Expansion {}

/// Expand a collection of terms into the set of concrete terms they represent.
///
/// Overlapping terms produce the same concrete terms: they are kept only once.
/// All terms must have the same width.
pub fn expand_all<'a, I>(terms: I) -> Result<BTreeSet<Term>, QmError>
where
    I: IntoIterator<Item = &'a Term>,
{
    let mut width = None;
    let mut result = BTreeSet::new();
    for term in terms {
        let expected = *width.get_or_insert(term.width());
        QmError::check_width(expected, term.width())?;
        result.extend(term.expand());
    }
    Ok(result)
}
