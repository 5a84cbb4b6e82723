use thiserror::Error;

/// Errors raised while ingesting or comparing terms.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QmError {
    /// Two terms (or a term and a collection) have different widths
    #[error("Term of width {found} does not match the expected width {expected}")]
    ShapeMismatch { expected: usize, found: usize },

    /// A symbol outside of {0, 1, X} was found
    #[error("Invalid symbol '{symbol}' at position {position}")]
    InvalidSymbol { symbol: char, position: usize },

    /// An output label is empty
    #[error("Missing output label")]
    MissingOutput,
}

impl QmError {
    pub(crate) fn check_width(expected: usize, found: usize) -> Result<(), QmError> {
        if expected == found {
            Ok(())
        } else {
            Err(QmError::ShapeMismatch { expected, found })
        }
    }
}
