use crate::expand::Expansion;
use crate::*;

use std::fmt;
use std::str::FromStr;

/// Value of a single position in a [Term].
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Symbol {
    Zero,
    One,
    DontCare,
}

impl Symbol {
    /// Recognize a symbol: `0`, `1`, or one of `X`, `x`, `-` for don't-care.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '0' => Some(Symbol::Zero),
            '1' => Some(Symbol::One),
            'X' | 'x' | '-' => Some(Symbol::DontCare),
            _ => None,
        }
    }

    pub fn to_char(self) -> char {
        match self {
            Symbol::Zero => '0',
            Symbol::One => '1',
            Symbol::DontCare => '-',
        }
    }
}

impl From<bool> for Symbol {
    fn from(b: bool) -> Self {
        if b {
            Symbol::One
        } else {
            Symbol::Zero
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self, f.alternate()) {
            (Symbol::DontCare, true) => write!(f, "X"),
            _ => write!(f, "{}", self.to_char()),
        }
    }
}

/// A fixed-width sequence of `0`, `1` and don't-care symbols.
///
/// It is represented as two sets of fixed positions (fixed at `1` and fixed at `0`),
/// all other positions below the width are don't-care. A term without don't-care
/// is a single point of the Boolean input space (a minterm when the function is true there).
///
/// Terms are parsed from strings where the position in the string defines the position
/// in the term: `0`, `1`, and `X`, `x` or `-` for don't-care. To make the strings easier
/// to read, spaces, tabs and single quotes are ignored. For example "0-10X" and "0-1 0x"
/// are equivalent.
///
/// Terms of different widths are never silently compared: operations involving two terms
/// report a [QmError::ShapeMismatch] instead.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Term {
    pub(crate) width: usize,
    pub(crate) ones: PosSet,
    pub(crate) zeros: PosSet,
}

impl Term {
    /// Create a term where all positions are don't-care
    pub fn dont_care(width: usize) -> Self {
        Self {
            width,
            ones: PosSet::default(),
            zeros: PosSet::default(),
        }
    }

    /// Create a concrete term from the list of positions set at `1`, all others being `0`.
    pub fn concrete(width: usize, ones: impl IntoIterator<Item = usize>) -> Result<Self, QmError> {
        let ones: PosSet = ones.into_iter().collect();
        if let Some(max) = ones.last_position() {
            if max >= width {
                return Err(QmError::ShapeMismatch {
                    expected: width,
                    found: max + 1,
                });
            }
        }
        let zeros = (0..width).filter(|p| !ones.contains(*p)).collect();
        Ok(Self { width, ones, zeros })
    }

    /// Number of positions (input variables) in this term
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of positions fixed at `1`
    pub fn weight(&self) -> usize {
        self.ones.len()
    }

    /// Number of don't-care positions
    pub fn dont_cares(&self) -> usize {
        self.width - self.ones.len() - self.zeros.len()
    }

    pub fn is_concrete(&self) -> bool {
        self.dont_cares() == 0
    }

    /// Iterate over the don't-care positions, in increasing order
    pub fn dont_care_positions(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.width).filter(move |p| !self.ones.contains(*p) && !self.zeros.contains(*p))
    }

    /// Retrieve the symbol at a given position, if it is inside the term
    pub fn symbol(&self, pos: usize) -> Option<Symbol> {
        if pos >= self.width {
            None
        } else if self.ones.contains(pos) {
            Some(Symbol::One)
        } else if self.zeros.contains(pos) {
            Some(Symbol::Zero)
        } else {
            Some(Symbol::DontCare)
        }
    }

    /// Replace the symbol at a given position.
    pub fn set(&mut self, pos: usize, symbol: Symbol) -> Result<(), QmError> {
        if pos >= self.width {
            return Err(QmError::ShapeMismatch {
                expected: self.width,
                found: pos + 1,
            });
        }
        match symbol {
            Symbol::One => {
                self.zeros.remove(pos);
                self.ones.insert(pos);
            }
            Symbol::Zero => {
                self.ones.remove(pos);
                self.zeros.insert(pos);
            }
            Symbol::DontCare => {
                self.ones.remove(pos);
                self.zeros.remove(pos);
            }
        }
        Ok(())
    }

    /// Positions which are not don't-care
    fn fixed(&self) -> PosSet {
        let mut fixed = self.ones.clone();
        fixed.union_with(&self.zeros);
        fixed
    }

    /// Combine two terms differing by a single fixed position.
    ///
    /// Both terms must have the same don't-care positions and be fixed at opposite values
    /// on exactly one other position. The combined term is identical to both inputs except
    /// at this position, which becomes don't-care. A don't-care facing a fixed value is not
    /// a single-bit difference: such terms do not combine.
    ///
    /// ```
    /// use qmkit::Term;
    /// # use qmkit::QmError;
    /// # fn main() -> Result<(), QmError> {
    /// let a: Term = "1100".parse()?;
    /// let b: Term = "1101".parse()?;
    /// let c: Term = "1001".parse()?;
    ///
    /// assert_eq!(a.combine(&b)?, Some("110X".parse()?));
    /// assert_eq!(a.combine(&c)?, None);
    /// # Ok(())
    /// # }
    /// ```
    pub fn combine(&self, other: &Self) -> Result<Option<Self>, QmError> {
        QmError::check_width(self.width, other.width)?;
        if self.fixed() != other.fixed() {
            return Ok(None);
        }

        // With identical fixed positions, the conflicts are the positions set at 1 in only one term
        let mut conflicts = self.ones.clone();
        conflicts.symmetric_difference_with(&other.ones);
        if conflicts.len() != 1 {
            return Ok(None);
        }

        let mut combined = self.clone();
        if let Some(pos) = conflicts.iter().next() {
            combined.ones.remove(pos);
            combined.zeros.remove(pos);
        }
        Ok(Some(combined))
    }

    /// Test if this term contains the given term, i.e. if all its fixed positions are
    /// fixed at the same value in the other term.
    pub fn contains(&self, other: &Self) -> Result<bool, QmError> {
        QmError::check_width(self.width, other.width)?;
        Ok(other.ones.contains_all(&self.ones) && other.zeros.contains_all(&self.zeros))
    }

    /// Iterate over all concrete terms obtained by fixing the don't-care positions.
    pub fn expand(&self) -> Expansion {
        Expansion::new(self)
    }
}

impl FromStr for Term {
    type Err = QmError;

    fn from_str(descr: &str) -> Result<Term, QmError> {
        let mut term = Term::default();
        for (position, c) in descr.chars().enumerate() {
            match c {
                ' ' | '\t' | '\'' => continue, // skip spacing and ' for formatting
                _ => {
                    let symbol =
                        Symbol::from_char(c).ok_or(QmError::InvalidSymbol { symbol: c, position })?;
                    let pos = term.width;
                    term.width += 1;
                    match symbol {
                        Symbol::One => term.ones.insert(pos),
                        Symbol::Zero => term.zeros.insert(pos),
                        Symbol::DontCare => false,
                    };
                }
            }
        }
        Ok(term)
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for pos in 0..self.width {
            match self.symbol(pos) {
                Some(Symbol::DontCare) if f.alternate() => write!(f, "X")?,
                Some(s) => write!(f, "{}", s.to_char())?,
                None => (),
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Term({})", self)
    }
}
