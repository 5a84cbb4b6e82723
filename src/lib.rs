//! Compute the prime implicants of Boolean functions with the Quine-McCluskey method.
//!
//! A Boolean function over `n` input variables is given by the list of input combinations
//! for which it is true. Each combination is a [Term]: a sequence of `n` symbols among
//! `0`, `1` and don't-care (written `X` or `-`). A term with don't-care positions stands
//! for all the concrete terms obtained by fixing them to `0` or `1`.
//!
//! ```
//! use qmkit::Term;
//! # use qmkit::QmError;
//! # fn main() -> Result<(), QmError> {
//!
//! let t: Term = "1X01".parse()?;
//! assert_eq!(t.width(), 4);
//! assert_eq!(t.weight(), 2);
//! assert_eq!(t.dont_cares(), 1);
//!
//! // A term stands for all concrete terms matching its fixed positions
//! let expanded: Vec<Term> = t.expand().collect();
//! assert_eq!(expanded, vec!["1001".parse()?, "1101".parse()?]);
//! # Ok(())
//! # }
//! ```
//!
//! # Grouping by weight
//!
//! Two terms can only combine if they differ by a single fixed position, their weights
//! (number of `1`) then differ by exactly one. Concrete terms are stored in
//! [weight groups](WeightGroups) so that only buckets of adjacent weights are compared.
//!
//! ```
//! use qmkit::WeightGroups;
//! # use qmkit::QmError;
//! # fn main() -> Result<(), QmError> {
//!
//! // Raw terms are expanded before grouping, duplicates are merged
//! let groups: WeightGroups = "0000; 00X1; 0011".parse()?;
//! assert_eq!(groups.len(), 3);
//! assert_eq!(groups.weights().collect::<Vec<_>>(), vec![0, 1, 2]);
//! # Ok(())
//! # }
//! ```
//!
//! # Prime implicants
//!
//! The [Minimizer] combines terms of adjacent weights, round after round, until no new term
//! emerges. Terms which were not combined in their round are the prime implicants of the function.
//! Note that all prime implicants are returned: selecting a minimal cover among them is not
//! performed by this crate.
//!
//! ```
//! use qmkit::{Minimizer, Primes, Term};
//! # use qmkit::QmError;
//! # fn main() -> Result<(), QmError> {
//!
//! let terms = ["0000", "0001", "0011", "0010", "0110"]
//!     .iter()
//!     .map(|s| s.parse())
//!     .collect::<Result<Vec<Term>, _>>()?;
//!
//! let primes: Primes = Minimizer::default().minimize(&terms)?;
//! assert_eq!(primes.len(), 2);
//! for p in &primes {
//!     println!("{}", p);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Truth tables
//!
//! A [TruthTable] associates input terms to an [Output] value. Only the rows with a true output
//! are used to compute the prime implicants, rows with a don't-care output are kept aside.
//!
//! Terms of different widths are never compared: they are reported as a [QmError::ShapeMismatch].

mod error;
mod expand;
mod group;
mod positions;
mod primes;
mod table;
mod term;

// Export public structures and API
pub use error::QmError;
pub use expand::{expand_all, Expansion};
pub use group::WeightGroups;
pub use positions::PosSet;
pub use primes::{prime_implicants, Minimizer, Parallelism, Primes, DEFAULT_PARALLEL_THRESHOLD};
pub use table::{Output, TruthTable};
pub use term::{Symbol, Term};
