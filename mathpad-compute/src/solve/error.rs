use mathpad_attrs::ErrorKind;
use mathpad_error::ErrorKind;
use crate::numerical::error::Error;
use thiserror::Error as ThisError;

/// The equation is a polynomial, but not one of the forms the solver handles.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("cannot solve {}", self.reason),
    labels = ["this equation"],
    help = "the solver handles linear and quadratic equations in one unknown, and pairs of linear equations in two unknowns",
)]
pub struct UnsupportedEquationForm {
    /// What made the equation unsupported.
    pub reason: String,
}

/// The category of a failed calculation. Each category has a fixed, user-facing message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ThisError)]
pub enum CalcErrorKind {
    /// The input could not be parsed or evaluated.
    #[error("Invalid expression")]
    InvalidExpression,

    /// An equation could not be normalised into a polynomial.
    #[error("Error simplifying equation")]
    Simplify,

    /// An equation was normalised, but its form is not supported by the solver.
    #[error("Cannot solve equation")]
    Unsolvable,
}

/// A failed calculation.
///
/// The [`Display`](std::fmt::Display) implementation gives the short message meant for the
/// result area. The underlying [`Error`] is kept, along with the text its spans point into, for
/// hosts that want to build a full report.
#[derive(Debug, ThisError)]
#[error("{kind}")]
pub struct CalcError {
    /// The category of the failure.
    pub kind: CalcErrorKind,

    /// The text that the spans of `error` point into. For equations, this is the difference
    /// `(left)-(right)` rather than the original input.
    pub source_text: String,

    /// The detailed error.
    #[source]
    pub error: Error,
}

impl CalcError {
    /// Creates a new calculation error.
    pub fn new(kind: CalcErrorKind, source_text: impl Into<String>, error: Error) -> Self {
        Self { kind, source_text: source_text.into(), error }
    }

    /// Renders the full report of the underlying error.
    pub fn report(&self) -> String {
        self.error.report_to_string("input", &self.source_text)
    }
}
