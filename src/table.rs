//! Truth tables: input terms associated to an output label.

use crate::*;

use log::debug;
use std::fmt;
use std::slice::Iter;
use std::str::FromStr;

/// Output value of a row in a [TruthTable].
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Output {
    Off,
    On,
    DontCare,
}

impl TryFrom<char> for Output {
    type Error = QmError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        match Symbol::from_char(c) {
            Some(Symbol::Zero) => Ok(Output::Off),
            Some(Symbol::One) => Ok(Output::On),
            Some(Symbol::DontCare) => Ok(Output::DontCare),
            None => Err(QmError::InvalidSymbol {
                symbol: c,
                position: 0,
            }),
        }
    }
}

impl FromStr for Output {
    type Err = QmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.trim().chars();
        let output = chars.next().ok_or(QmError::MissingOutput)?.try_into()?;
        match chars.next() {
            None => Ok(output),
            Some(symbol) => Err(QmError::InvalidSymbol {
                symbol,
                position: 1,
            }),
        }
    }
}

impl fmt::Display for Output {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Output::Off => write!(f, "0"),
            Output::On => write!(f, "1"),
            Output::DontCare => write!(f, "X"),
        }
    }
}

/// Boolean function given as a list of input terms with their output value.
///
/// All rows share the same width. Only the rows with an [Output::On] value are used
/// to compute the prime implicants: rows with a don't-care output are kept in the table
/// but do not extend the set of combinable terms.
///
/// ```
/// use qmkit::{Minimizer, TruthTable};
/// # use qmkit::QmError;
/// # fn main() -> Result<(), QmError> {
/// let mut table = TruthTable::default();
/// table.push_str("00", "1")?;
/// table.push_str("01", "1")?;
/// table.push_str("10", "X")?;
/// table.push_str("11", "0")?;
///
/// let primes = table.minimize(&Minimizer::default())?;
/// assert_eq!(primes.len(), 1);
/// assert!(primes.contains(&"0-".parse()?));
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, Default)]
pub struct TruthTable {
    width: Option<usize>,
    rows: Vec<(Term, Output)>,
}

impl TruthTable {
    /// Add a row, the term must have the same width as the previous rows
    pub fn push(&mut self, term: Term, output: Output) -> Result<(), QmError> {
        let expected = *self.width.get_or_insert(term.width());
        QmError::check_width(expected, term.width())?;
        self.rows.push((term, output));
        Ok(())
    }

    /// Build a table from a list of rows, rejecting the first row with an inconsistent width
    pub fn from_rows(rows: impl IntoIterator<Item = (Term, Output)>) -> Result<Self, QmError> {
        let mut table = TruthTable::default();
        table.try_extend(rows)?;
        Ok(table)
    }

    /// Add all rows, stopping at the first row with an inconsistent width.
    ///
    /// The rows preceding the faulty one are kept.
    pub fn try_extend(
        &mut self,
        rows: impl IntoIterator<Item = (Term, Output)>,
    ) -> Result<(), QmError> {
        for (term, output) in rows {
            self.push(term, output)?;
        }
        Ok(())
    }

    /// Parse and add a row
    pub fn push_str(&mut self, term: &str, output: &str) -> Result<(), QmError> {
        self.push(term.parse()?, output.parse()?)
    }

    pub fn width(&self) -> Option<usize> {
        self.width
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> Iter<'_, (Term, Output)> {
        self.rows.iter()
    }

    fn with_output(&self, output: Output) -> impl Iterator<Item = &Term> + '_ {
        self.rows
            .iter()
            .filter(move |(_, o)| *o == output)
            .map(|(t, _)| t)
    }

    /// Iterate over the input terms for which the function is true
    pub fn on_set(&self) -> impl Iterator<Item = &Term> + '_ {
        self.with_output(Output::On)
    }

    /// Iterate over the input terms for which the output is unconstrained
    pub fn dont_care_set(&self) -> impl Iterator<Item = &Term> + '_ {
        self.with_output(Output::DontCare)
    }

    /// Compute the prime implicants of the on-set of this table
    pub fn minimize(&self, minimizer: &Minimizer) -> Result<Primes, QmError> {
        debug!(
            "minimizing {} rows: {} on, {} don't-care output rows ignored",
            self.len(),
            self.on_set().count(),
            self.dont_care_set().count()
        );
        minimizer.minimize(self.on_set())
    }
}
