use std::{
    error::Error,
    fmt::{self, Display},
};

use rand_distr::{NormalError, uniform::Error as UniformError};

/// The result type used in the entire crate.
pub type Result<T> = std::result::Result<T, MlErr>;

/// The crate's error type.
#[derive(Debug, Clone, PartialEq)]
pub enum MlErr {
    /// A length invariant was violated (e.g. a layer's input or two chained layers).
    SizeMismatch {
        what: &'static str,
        got: usize,
        expected: usize,
    },
    /// An input is invalid for semantic or domain reasons.
    InvalidInput(&'static str),
    /// An activation layer was asked for its gradient before any forward pass.
    BackwardBeforeForward { dim: usize },
    /// A random distribution could not be constructed.
    Distribution(String),
}

impl Display for MlErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MlErr::SizeMismatch {
                what,
                got,
                expected,
            } => write!(f, "size mismatch for {what}: got {got}, expected {expected}"),
            MlErr::InvalidInput(msg) => write!(f, "invalid input: {msg}"),
            MlErr::BackwardBeforeForward { dim } => write!(
                f,
                "backward called on an activation of dim {dim} before any forward pass"
            ),
            MlErr::Distribution(msg) => write!(f, "invalid distribution: {msg}"),
        }
    }
}

impl Error for MlErr {}

impl From<NormalError> for MlErr {
    fn from(value: NormalError) -> Self {
        Self::Distribution(value.to_string())
    }
}

impl From<UniformError> for MlErr {
    fn from(value: UniformError) -> Self {
        Self::Distribution(value.to_string())
    }
}

/// Fails with `MlErr::SizeMismatch` unless `got == expected`.
///
/// # Arguments
/// * `what` - Human-readable context for the mismatch (e.g. "dense input").
/// * `got` - Observed length.
/// * `expected` - Required length.
pub(crate) fn ensure_len(what: &'static str, got: usize, expected: usize) -> Result<()> {
    if got != expected {
        return Err(MlErr::SizeMismatch {
            what,
            got,
            expected,
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ensure_len_accepts_equal_lengths() {
        assert!(ensure_len("x", 3, 3).is_ok());
    }

    #[test]
    fn ensure_len_reports_both_lengths() {
        let err = ensure_len("dense input", 2, 5).unwrap_err();
        assert_eq!(
            err,
            MlErr::SizeMismatch {
                what: "dense input",
                got: 2,
                expected: 5
            }
        );
        assert_eq!(
            err.to_string(),
            "size mismatch for dense input: got 2, expected 5"
        );
    }
}
