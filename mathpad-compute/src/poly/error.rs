use mathpad_attrs::ErrorKind;
use mathpad_error::{Error, ErrorKind};

/// The expression could not be rewritten as a polynomial in its unknowns.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "expression is not a polynomial",
    labels = [format!("{} here", self.reason)],
    help = "only sums of whole-number powers of the unknowns can be solved",
)]
pub struct NotPolynomial {
    /// What made the expression non-polynomial.
    pub reason: &'static str,
}

/// Expanding the expression would produce more terms than a polynomial may hold.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "expression is too large to expand",
    labels = ["expanding this"],
    help = format!("the expansion would need more than {} products of terms", self.limit),
)]
pub struct TooManyTerms {
    /// The largest number of term products allowed in one multiplication.
    pub limit: usize,
}

/// A failure to normalise an expression into a [`Poly`](super::Poly).
#[derive(Debug)]
pub enum PolyError {
    /// The expression is not a polynomial, or a part of it could not be evaluated.
    Invalid(Error),

    /// The expression is a polynomial, but too large to expand.
    TooLarge(Error),
}

impl PolyError {
    /// Returns the underlying error.
    pub fn into_inner(self) -> Error {
        match self {
            Self::Invalid(err) | Self::TooLarge(err) => err,
        }
    }
}

impl From<Error> for PolyError {
    fn from(err: Error) -> Self {
        Self::Invalid(err)
    }
}
