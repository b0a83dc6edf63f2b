use crate::{
    evaluator::Evaluator,
    numerical::{error::Error, fmt::{FormatOptions, NumberFormatter}},
    poly::{error::PolyError, Monomial, Poly},
};
use mathpad_parser::parser::{expr::Expr, Parser};
use std::fmt;
use super::error::{CalcError, CalcErrorKind, UnsupportedEquationForm};

/// Discriminants smaller than this fraction of the larger of `b²` and `4ac` are treated as zero,
/// giving a double root.
const DISCRIMINANT_EPSILON: f64 = 1e-12;

/// Determinants smaller than this fraction of the products they are computed from are treated as
/// zero.
pub(super) const DETERMINANT_EPSILON: f64 = 1e-12;

/// The solution set of an equation or a system of equations.
#[derive(Debug, Clone, PartialEq)]
pub enum Solution {
    /// Exactly one solution, such as `x = 2`.
    Single {
        /// The unknown.
        var: String,

        /// Its value.
        value: f64,
    },

    /// Two distinct real roots of a quadratic, with the `+√d` root first.
    Pair {
        /// The unknown.
        var: String,

        /// The roots, in the order they are printed.
        roots: [f64; 2],
    },

    /// One value for each unknown of a system, in alphabetical order of the unknowns.
    System(Vec<(String, f64)>),

    /// The equation holds for every value of the unknown.
    AllValues,

    /// The equation holds for no value of the unknown.
    NoSolution,

    /// A quadratic with a negative discriminant.
    NoRealSolutions,

    /// A system whose determinant is zero.
    NoUniqueSolution,
}

impl Solution {
    /// Returns a formatter that prints the solution with the given options.
    pub fn formatted(&self, options: FormatOptions) -> SolutionFormatter<'_> {
        SolutionFormatter { solution: self, options }
    }
}

impl fmt::Display for Solution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.formatted(FormatOptions::default()).fmt(f)
    }
}

/// Formatter for a [`Solution`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolutionFormatter<'a> {
    /// The solution to format.
    pub solution: &'a Solution,

    /// The options to use when formatting each value.
    pub options: FormatOptions,
}

impl SolutionFormatter<'_> {
    fn number(&self, value: f64) -> NumberFormatter {
        NumberFormatter { value, options: self.options }
    }
}

impl fmt::Display for SolutionFormatter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.solution {
            Solution::Single { var, value } => write!(f, "{} = {}", var, self.number(*value)),
            Solution::Pair { var, roots: [first, second] } => write!(
                f,
                "{} = {}, {} = {}",
                var,
                self.number(*first),
                var,
                self.number(*second),
            ),
            Solution::System(values) => {
                for (i, (var, value)) in values.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{} = {}", var, self.number(*value))?;
                }
                Ok(())
            },
            Solution::AllValues => write!(f, "All values are solutions"),
            Solution::NoSolution => write!(f, "No solution"),
            Solution::NoRealSolutions => write!(f, "No real solutions"),
            Solution::NoUniqueSolution => write!(f, "No unique solution"),
        }
    }
}

/// Parses and normalises one side of an equation already written in `expr = 0` form, such as
/// `(2*x+3)-(7)`. Polynomials too large to expand cannot be solved; every other failure is a
/// simplification failure.
pub(super) fn normalise<E: Evaluator + ?Sized>(difference: &str, evaluator: &E) -> Result<Poly, CalcError> {
    let simplify_error = |error: Error| CalcError::new(CalcErrorKind::Simplify, difference, error);
    let expr = Parser::new(difference)
        .try_parse_full::<Expr>()
        .map_err(|err| simplify_error(err.into()))?;
    Poly::from_expr(&expr, evaluator).map_err(|err| match err {
        PolyError::Invalid(error) => simplify_error(error),
        PolyError::TooLarge(error) => CalcError::new(CalcErrorKind::Unsolvable, difference, error),
    })
}

/// Solves an equation given as the difference of its two sides, such as `(2*x+3)-(7)` for
/// `2x + 3 = 7`.
pub fn solve_equation<E: Evaluator + ?Sized>(difference: &str, evaluator: &E) -> Result<Solution, CalcError> {
    let poly = normalise(difference, evaluator)?;
    solve_poly(&poly).map_err(|reason| CalcError::new(
        CalcErrorKind::Unsolvable,
        difference,
        Error::new(vec![0..difference.len()], UnsupportedEquationForm { reason }),
    ))
}

/// Solves `poly = 0` for its single unknown. Returns the reason the polynomial is unsupported
/// otherwise.
pub fn solve_poly(poly: &Poly) -> Result<Solution, String> {
    let variables = poly.variables();
    let mut variables = variables.into_iter();
    let (var, extra) = (variables.next(), variables.next());

    let Some(var) = var else {
        // no unknowns left: the equation is either an identity or a contradiction
        return Ok(if poly.is_zero() { Solution::AllValues } else { Solution::NoSolution });
    };

    if extra.is_some() {
        return Err("an equation with more than one unknown".to_string());
    }

    let a = poly.coeff(&Monomial::var(var, 2));
    let b = poly.coeff(&Monomial::var(var, 1));
    let c = poly.coeff(&Monomial::one());

    match poly.degree() {
        1 => Ok(Solution::Single { var: var.to_string(), value: -c / b }),
        2 => {
            let discriminant = b * b - 4.0 * a * c;
            if discriminant.abs() <= DISCRIMINANT_EPSILON * (b * b).max((4.0 * a * c).abs()) {
                Ok(Solution::Single { var: var.to_string(), value: -b / (2.0 * a) })
            } else if discriminant < 0.0 {
                Ok(Solution::NoRealSolutions)
            } else {
                let root = discriminant.sqrt();
                Ok(Solution::Pair {
                    var: var.to_string(),
                    roots: [(-b + root) / (2.0 * a), (-b - root) / (2.0 * a)],
                })
            }
        },
        degree => Err(format!("an equation of degree {}", degree)),
    }
}
