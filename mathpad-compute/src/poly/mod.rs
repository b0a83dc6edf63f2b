//! A canonical polynomial form for equations.
//!
//! The parser's [`Expr`] mirrors how an expression was written, which makes it convenient for
//! evaluation but not for solving. [`Poly`] flattens an expression into a sum of monomials, each
//! with an `f64` coefficient, so that `x^2 - 5x + 6` and `(x - 2)(x - 3)` normalise to the same
//! value. Sub-expressions without unknowns, such as `pi` or `sqrt(2)`, are folded into
//! coefficients through an [`Evaluator`].

pub mod error;

use crate::{evaluator::Evaluator, numerical::error::Error};
use error::{NotPolynomial, PolyError, TooManyTerms};
use mathpad_parser::parser::{
    expr::Expr,
    literal::Literal,
    token::op::{BinOpKind, UnaryOpKind},
};
use std::{
    collections::{BTreeMap, BTreeSet},
    fmt,
    ops::{Add, Mul, Neg, Sub},
};

/// When like terms are combined, a sum smaller than this fraction of the largest term that went
/// into it is rounding error, and the term is dropped.
const EPSILON: f64 = 1e-12;

/// The largest exponent accepted when expanding a power of a polynomial.
pub const MAX_EXPONENT: u32 = 64;

/// The largest number of term products computed by one multiplication of polynomials.
pub const MAX_PRODUCTS: usize = 1 << 16;

/// A product of unknowns raised to positive whole-number powers, such as `x^2 y`. The empty
/// monomial is the constant term.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Monomial(BTreeMap<String, u32>);

impl Monomial {
    /// The monomial of the constant term.
    pub fn one() -> Self {
        Self::default()
    }

    /// The monomial `name^power`. A power of zero gives the constant monomial.
    pub fn var(name: &str, power: u32) -> Self {
        let mut factors = BTreeMap::new();
        if power > 0 {
            factors.insert(name.to_string(), power);
        }
        Self(factors)
    }

    /// Returns the total degree of the monomial.
    pub fn degree(&self) -> u32 {
        self.0.values().sum()
    }

    /// Returns the unknowns in the monomial, in alphabetical order.
    pub fn variables(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Returns the power of the given unknown in this monomial.
    pub fn power_of(&self, name: &str) -> u32 {
        self.0.get(name).copied().unwrap_or(0)
    }
}

impl Mul<&Monomial> for &Monomial {
    type Output = Monomial;

    fn mul(self, rhs: &Monomial) -> Monomial {
        let mut factors = self.0.clone();
        for (name, power) in &rhs.0 {
            *factors.entry(name.clone()).or_insert(0) += power;
        }
        Monomial(factors)
    }
}

impl fmt::Display for Monomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (name, power) in &self.0 {
            match power {
                1 => write!(f, "{}", name)?,
                _ => write!(f, "{}^{}", name, power)?,
            }
        }
        Ok(())
    }
}

/// A polynomial with `f64` coefficients: a map from each monomial to its coefficient. Zero
/// coefficients are never stored.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Poly {
    terms: BTreeMap<Monomial, f64>,
}

impl Poly {
    /// The zero polynomial.
    pub fn zero() -> Self {
        Self::default()
    }

    /// A constant polynomial.
    pub fn constant(value: f64) -> Self {
        Self::from_terms([(Monomial::one(), value)])
    }

    /// The polynomial consisting of a single unknown.
    pub fn variable(name: &str) -> Self {
        Self::from_terms([(Monomial::var(name, 1), 1.0)])
    }

    /// Builds a polynomial from its terms, combining like terms.
    ///
    /// A combined term is dropped if it is zero, or if it is negligible next to the terms it was
    /// summed from, as in `0.1x + 0.2x - 0.3x`. Small coefficients that did not come from
    /// cancellation, such as the `1e-13` in `x / 10000000000000`, are kept. NaN coefficients are
    /// kept so that invalid arithmetic is not silently discarded.
    pub fn from_terms(terms: impl IntoIterator<Item = (Monomial, f64)>) -> Self {
        let mut sums = BTreeMap::<Monomial, (f64, f64)>::new();
        for (monomial, coeff) in terms {
            let (sum, largest) = sums.entry(monomial).or_insert((0.0, 0.0));
            *sum += coeff;
            *largest = largest.max(coeff.abs());
        }

        let terms = sums
            .into_iter()
            .filter(|&(_, (sum, largest))| !is_negligible(sum, largest))
            .map(|(monomial, (sum, _))| (monomial, sum))
            .collect();
        Self { terms }
    }

    /// Returns the terms of the polynomial, ordered by monomial.
    pub fn terms(&self) -> &BTreeMap<Monomial, f64> {
        &self.terms
    }

    /// Returns the coefficient of the given monomial, which is zero if the term is absent.
    pub fn coeff(&self, monomial: &Monomial) -> f64 {
        self.terms.get(monomial).copied().unwrap_or(0.0)
    }

    /// Returns true if this is the zero polynomial.
    pub fn is_zero(&self) -> bool {
        self.terms.is_empty()
    }

    /// Returns the value of the polynomial if it has no unknowns.
    pub fn as_constant(&self) -> Option<f64> {
        match self.terms.len() {
            0 => Some(0.0),
            1 => self.terms.get(&Monomial::one()).copied(),
            _ => None,
        }
    }

    /// Returns the total degree of the polynomial. The zero polynomial has degree zero.
    pub fn degree(&self) -> u32 {
        self.terms.keys().map(Monomial::degree).max().unwrap_or(0)
    }

    /// Returns the unknowns that appear in the polynomial, in alphabetical order.
    pub fn variables(&self) -> BTreeSet<&str> {
        self.terms.keys().flat_map(Monomial::variables).collect()
    }

    /// Multiplies every coefficient by the given factor.
    pub fn scale(mut self, factor: f64) -> Self {
        for coeff in self.terms.values_mut() {
            *coeff *= factor;
        }
        self.terms.retain(|_, coeff| *coeff != 0.0);
        self
    }

    /// Multiplies two polynomials, or returns [`None`] if that would take more than
    /// [`MAX_PRODUCTS`] products of terms.
    pub fn checked_mul(&self, rhs: &Poly) -> Option<Self> {
        if self.terms.len().saturating_mul(rhs.terms.len()) > MAX_PRODUCTS {
            return None;
        }
        Some(self * rhs)
    }

    /// Raises the polynomial to a whole-number power by repeated squaring, or returns [`None`]
    /// if one of the multiplications would be too large.
    pub fn checked_pow(&self, mut exponent: u32) -> Option<Self> {
        let mut result = Self::constant(1.0);
        let mut base = self.clone();
        while exponent > 0 {
            if exponent & 1 == 1 {
                result = result.checked_mul(&base)?;
            }
            exponent >>= 1;
            if exponent > 0 {
                base = base.checked_mul(&base)?;
            }
        }
        Some(result)
    }

    /// Normalises a parsed expression into a polynomial.
    ///
    /// Names the evaluator reports as free symbols become unknowns; every sub-expression without
    /// unknowns is evaluated numerically and becomes a coefficient. Expressions that cannot be
    /// written as a polynomial (an unknown inside a function, division by an unknown, or a
    /// non-whole-number exponent) produce a [`NotPolynomial`] error pointing at the offending
    /// sub-expression. Products and powers whose expansion would be too large produce
    /// [`PolyError::TooLarge`].
    pub fn from_expr<E: Evaluator + ?Sized>(expr: &Expr, evaluator: &E) -> Result<Self, PolyError> {
        let too_large = || PolyError::TooLarge(Error::new(vec![expr.span()], TooManyTerms {
            limit: MAX_PRODUCTS,
        }));

        match expr {
            Expr::Literal(Literal::Number(num)) => Ok(Self::constant(num.value)),
            Expr::Literal(Literal::Symbol(sym)) => {
                if evaluator.is_free_symbol(&sym.name) {
                    Ok(Self::variable(&sym.name))
                } else {
                    Ok(Self::constant(evaluator.evaluate_expr(expr)?))
                }
            },
            Expr::Paren(paren) => Self::from_expr(&paren.expr, evaluator),
            Expr::Call(call) => {
                for arg in &call.args {
                    if Self::from_expr(arg, evaluator)?.as_constant().is_none() {
                        return Err(Error::new(vec![arg.span()], NotPolynomial {
                            reason: "an unknown inside a function call",
                        }).into());
                    }
                }
                Ok(Self::constant(evaluator.evaluate_expr(expr)?))
            },
            Expr::Unary(unary) => {
                let operand = Self::from_expr(&unary.operand, evaluator)?;
                Ok(match unary.op.kind {
                    UnaryOpKind::Neg => -operand,
                    UnaryOpKind::Pos => operand,
                })
            },
            Expr::Binary(binary) => {
                let lhs = Self::from_expr(&binary.lhs, evaluator)?;
                let rhs = Self::from_expr(&binary.rhs, evaluator)?;
                match binary.op.kind {
                    BinOpKind::Add => Ok(lhs + rhs),
                    BinOpKind::Sub => Ok(lhs - rhs),
                    BinOpKind::Mul => lhs.checked_mul(&rhs).ok_or_else(too_large),
                    BinOpKind::Div => match (lhs.as_constant(), rhs.as_constant()) {
                        (Some(lhs), Some(rhs)) => Ok(Self::constant(lhs / rhs)),
                        (None, Some(rhs)) if rhs != 0.0 => Ok(lhs.scale(rhs.recip())),
                        (None, Some(_)) => Err(Error::new(vec![binary.rhs.span()], NotPolynomial {
                            reason: "a division by zero",
                        }).into()),
                        (_, None) => Err(Error::new(vec![binary.rhs.span()], NotPolynomial {
                            reason: "a division by an unknown",
                        }).into()),
                    },
                    BinOpKind::Exp => match (lhs.as_constant(), rhs.as_constant()) {
                        (Some(lhs), Some(rhs)) => Ok(Self::constant(lhs.powf(rhs))),
                        (None, Some(rhs)) if is_whole_exponent(rhs) => {
                            lhs.checked_pow(rhs as u32).ok_or_else(too_large)
                        },
                        (None, Some(_)) => Err(Error::new(vec![binary.rhs.span()], NotPolynomial {
                            reason: "an exponent that is not a small whole number",
                        }).into()),
                        (_, None) => Err(Error::new(vec![binary.rhs.span()], NotPolynomial {
                            reason: "an unknown in an exponent",
                        }).into()),
                    },
                }
            },
        }
    }
}

/// Returns true if a sum of like terms is zero, or rounding error next to the largest of the
/// terms that were summed.
fn is_negligible(sum: f64, largest: f64) -> bool {
    sum == 0.0 || (sum.is_finite() && sum.abs() <= EPSILON * largest)
}

/// Returns true if the number can be used as the exponent of a polynomial.
fn is_whole_exponent(n: f64) -> bool {
    n.fract() == 0.0 && (0.0..=MAX_EXPONENT as f64).contains(&n)
}

impl Add for Poly {
    type Output = Poly;

    fn add(self, rhs: Poly) -> Poly {
        Poly::from_terms(self.terms.into_iter().chain(rhs.terms))
    }
}

impl Sub for Poly {
    type Output = Poly;

    fn sub(self, rhs: Poly) -> Poly {
        self + -rhs
    }
}

impl Neg for Poly {
    type Output = Poly;

    fn neg(self) -> Poly {
        self.scale(-1.0)
    }
}

impl Mul<&Poly> for &Poly {
    type Output = Poly;

    fn mul(self, rhs: &Poly) -> Poly {
        Poly::from_terms(self.terms.iter().flat_map(|(lhs_monomial, lhs_coeff)| {
            rhs.terms.iter().map(move |(rhs_monomial, rhs_coeff)| {
                (lhs_monomial * rhs_monomial, lhs_coeff * rhs_coeff)
            })
        }))
    }
}

/// Prints the polynomial from the highest degree term to the constant, such as `x^2 - 5x + 6`.
impl fmt::Display for Poly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            return write!(f, "0");
        }

        let mut terms = self.terms.iter().collect::<Vec<_>>();
        terms.sort_by(|(a, _), (b, _)| b.degree().cmp(&a.degree()).then_with(|| a.cmp(b)));

        for (i, (monomial, coeff)) in terms.into_iter().enumerate() {
            let magnitude = coeff.abs();
            match (i, coeff.is_sign_negative()) {
                (0, true) => write!(f, "-")?,
                (0, false) => (),
                (_, true) => write!(f, " - ")?,
                (_, false) => write!(f, " + ")?,
            }

            if monomial.degree() == 0 || magnitude != 1.0 {
                write!(f, "{}", magnitude)?;
            }
            write!(f, "{}", monomial)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::numerical::ctxt::Ctxt;
    use mathpad_error::ErrorKind;
    use mathpad_parser::parser::Parser;
    use pretty_assertions::assert_eq;
    use super::*;

    fn poly(source: &str) -> Result<Poly, PolyError> {
        let expr = Parser::new(source)
            .try_parse_full::<Expr>()
            .map_err(|err| PolyError::Invalid(err.into()))?;
        Poly::from_expr(&expr, &Ctxt::default())
    }

    #[test]
    fn linear_difference() {
        let p = poly("(2*x+3)-(7)").unwrap();
        assert_eq!(p.coeff(&Monomial::var("x", 1)), 2.0);
        assert_eq!(p.coeff(&Monomial::one()), -4.0);
        assert_eq!(p.degree(), 1);
    }

    #[test]
    fn expands_products() {
        assert_eq!(poly("(x-2)(x-3)").unwrap(), poly("x^2-5x+6").unwrap());
        assert_eq!(poly("(x+1)^2").unwrap().to_string(), "x^2 + 2x + 1");
    }

    #[test]
    fn like_terms_cancel() {
        let p = poly("(x+1)-(x+1)").unwrap();
        assert!(p.is_zero());
        assert_eq!(p.as_constant(), Some(0.0));
    }

    #[test]
    fn constants_are_folded() {
        let p = poly("pi x + sqrt(4)").unwrap();
        assert_eq!(p.coeff(&Monomial::var("x", 1)), std::f64::consts::PI);
        assert_eq!(p.coeff(&Monomial::one()), 2.0);
    }

    #[test]
    fn division_by_constant() {
        let p = poly("(x)/(2)").unwrap();
        assert_eq!(p.coeff(&Monomial::var("x", 1)), 0.5);
    }

    #[test]
    fn several_unknowns() {
        let p = poly("2x + 3y - x y").unwrap();
        assert_eq!(p.variables().into_iter().collect::<Vec<_>>(), vec!["x", "y"]);
        assert_eq!(p.degree(), 2);
    }

    #[test]
    fn not_polynomial() {
        for (source, span) in [
            ("sin(x)", 4..5),
            ("1/x", 2..3),
            ("2^x", 2..3),
            ("x^0.5", 2..5),
            ("x^-1", 2..4),
        ] {
            let PolyError::Invalid(err) = poly(source).unwrap_err() else {
                panic!("expected a non-polynomial for {}", source);
            };
            assert_eq!(err.kind.message(), "expression is not a polynomial", "source: {}", source);
            assert_eq!(err.spans, vec![span], "source: {}", source);
        }
    }

    #[test]
    fn small_coefficients_are_kept() {
        let p = poly("(x)/(10000000000000)").unwrap();
        assert_eq!(p.coeff(&Monomial::var("x", 1)), 1e-13);
        assert_eq!(p.degree(), 1);

        let p = poly("0.000000000000001x^2 + 0.000000000000002x").unwrap();
        assert_eq!(p.degree(), 2);
        assert_eq!(p.variables().len(), 1);
    }

    #[test]
    fn rounding_error_cancels() {
        let p = poly("0.1x + 0.2x - 0.3x + 1").unwrap();
        assert_eq!(p.as_constant(), Some(1.0));
    }

    #[test]
    fn large_expansion_is_rejected() {
        let err = poly("(a+b+c+d+f+g+h)^64").unwrap_err();
        let PolyError::TooLarge(err) = err else {
            panic!("expected the expansion to be rejected");
        };
        assert_eq!(err.kind.message(), "expression is too large to expand");
        assert_eq!(err.spans, vec![0..18]);
    }

    #[test]
    fn single_unknown_powers_expand() {
        let p = poly("(x+1)^64").unwrap();
        assert_eq!(p.degree(), 64);
        assert_eq!(p.terms().len(), 65);
    }
}
