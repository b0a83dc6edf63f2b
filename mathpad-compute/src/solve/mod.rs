//! Classification of calculator input, and the equation solver.
//!
//! [`calculate`] is the single entry point used by the editor. Input is classified in this order:
//!
//! 1. more than one non-empty line, each containing `=`: a system of equations;
//! 2. any other input containing `=`: a single equation;
//! 3. input without unknowns: evaluated directly;
//! 4. anything else: returned unevaluated.

pub mod equation;
pub mod error;
pub mod system;

use crate::{
    evaluator::Evaluator,
    numerical::{error::Error, fmt::{FormatOptions, NumberFormatter}},
};
use mathpad_parser::parser::{expr::Expr, literal::Literal, Parser};
use std::fmt;
use tracing::debug;

pub use equation::{solve_equation, solve_poly, Solution, SolutionFormatter};
pub use error::{CalcError, CalcErrorKind};
pub use system::solve_system;

/// How an input will be calculated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// Several lines, each an equation.
    System,

    /// A single equation.
    Equation,

    /// An expression without unknowns.
    Direct,

    /// An expression with unknowns, which has no numeric value.
    Unevaluated,
}

/// The result of a successful calculation.
#[derive(Debug, Clone, PartialEq)]
pub enum Answer {
    /// The value of an expression without unknowns.
    Value(f64),

    /// The solution of an equation or system.
    Solution(Solution),

    /// An expression with unknowns, returned as written.
    Unevaluated(String),
}

impl Answer {
    /// Returns a formatter that prints the answer with the given options.
    pub fn formatted(&self, options: FormatOptions) -> AnswerFormatter<'_> {
        AnswerFormatter { answer: self, options }
    }
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.formatted(FormatOptions::default()).fmt(f)
    }
}

/// Formatter for an [`Answer`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnswerFormatter<'a> {
    /// The answer to format.
    pub answer: &'a Answer,

    /// The options to use when formatting numbers.
    pub options: FormatOptions,
}

impl fmt::Display for AnswerFormatter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.answer {
            Answer::Value(value) => NumberFormatter { value: *value, options: self.options }.fmt(f),
            Answer::Solution(solution) => solution.formatted(self.options).fmt(f),
            Answer::Unevaluated(input) => write!(f, "{}", input),
        }
    }
}

/// Splits an equation at its first `=`, trimming both sides.
pub(crate) fn split_equation(input: &str) -> Option<(&str, &str)> {
    input.split_once('=').map(|(left, right)| (left.trim(), right.trim()))
}

/// Returns the non-empty lines of the input, trimmed.
fn lines(input: &str) -> Vec<&str> {
    input.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect()
}

/// Returns true if the expression mentions a name the evaluator has no value for.
fn has_free_symbols<E: Evaluator + ?Sized>(expr: &Expr, evaluator: &E) -> bool {
    expr.post_order_iter().any(|expr| match expr {
        Expr::Literal(Literal::Symbol(sym)) => evaluator.is_free_symbol(&sym.name),
        _ => false,
    })
}

/// Decides how the input will be calculated. Input that does not parse is classified as
/// [`Classification::Direct`], so that evaluating it reports the parse error.
pub fn classify<E: Evaluator + ?Sized>(input: &str, evaluator: &E) -> Classification {
    let lines = lines(input);
    if lines.len() > 1 && lines.iter().all(|line| line.contains('=')) {
        Classification::System
    } else if input.contains('=') {
        Classification::Equation
    } else {
        match Parser::new(input).try_parse_full::<Expr>() {
            Ok(expr) if has_free_symbols(&expr, evaluator) => Classification::Unevaluated,
            _ => Classification::Direct,
        }
    }
}

/// Calculates the input: evaluates it, solves it, or returns it unevaluated.
///
/// # Example
///
/// ```
/// use mathpad_compute::{numerical::ctxt::Ctxt, solve::calculate};
///
/// let ctxt = Ctxt::default();
/// assert_eq!(calculate("3+4*2", &ctxt).unwrap().to_string(), "11");
/// assert_eq!(calculate("2x + 3 = 7", &ctxt).unwrap().to_string(), "x = 2");
/// ```
pub fn calculate<E: Evaluator + ?Sized>(input: &str, evaluator: &E) -> Result<Answer, CalcError> {
    let classification = classify(input, evaluator);
    debug!(?classification, input, "classified input");

    match classification {
        Classification::System => solve_system(&lines(input), evaluator).map(Answer::Solution),
        Classification::Equation => {
            let (left, right) = split_equation(input).unwrap_or((input, ""));
            let difference = format!("({})-({})", left, right);
            solve_equation(&difference, evaluator).map(Answer::Solution)
        },
        Classification::Direct => {
            let invalid = |error: Error| CalcError::new(CalcErrorKind::InvalidExpression, input, error);
            let expr = Parser::new(input)
                .try_parse_full::<Expr>()
                .map_err(|err| invalid(err.into()))?;
            evaluator.evaluate_expr(&expr)
                .map(Answer::Value)
                .map_err(invalid)
        },
        Classification::Unevaluated => Ok(Answer::Unevaluated(input.trim().to_string())),
    }
}

#[cfg(test)]
mod tests {
    use assert_float_eq::{afe_abs, afe_relative_error_msg, afe_is_relative_eq, assert_float_relative_eq};
    use crate::numerical::{ctxt::Ctxt, fmt::Scientific};
    use pretty_assertions::assert_eq;
    use super::*;

    fn calc(input: &str) -> Result<Answer, CalcError> {
        calculate(input, &Ctxt::default())
    }

    #[test]
    fn classification() {
        let ctxt = Ctxt::default();
        assert_eq!(classify("x+y=3\nx-y=1", &ctxt), Classification::System);
        assert_eq!(classify("x+y=3\n\n", &ctxt), Classification::Equation);
        assert_eq!(classify("2pi", &ctxt), Classification::Direct);
        assert_eq!(classify("2x", &ctxt), Classification::Unevaluated);
        assert_eq!(classify("(1+", &ctxt), Classification::Direct);
    }

    #[test]
    fn direct_evaluation() {
        assert_eq!(calc("3+4*2").unwrap(), Answer::Value(11.0));
        assert_eq!(calc("(1)/(2)").unwrap().to_string(), "0.5");
    }

    #[test]
    fn equation() {
        assert_eq!(calc("2x+3=7").unwrap().to_string(), "x = 2");
        assert_eq!(calc("x^2 = 5x - 6").unwrap().to_string(), "x = 3, x = 2");
    }

    #[test]
    fn system() {
        assert_eq!(calc("x+y=3\nx-y=1").unwrap().to_string(), "x = 2, y = 1");
    }

    #[test]
    fn unevaluated() {
        assert_eq!(calc(" 2x+1 ").unwrap(), Answer::Unevaluated("2x+1".to_string()));
    }

    #[test]
    fn invalid_expression() {
        let err = calc("3*()").unwrap_err();
        assert_eq!(err.to_string(), "Invalid expression");
        assert_eq!(err.kind, CalcErrorKind::InvalidExpression);
        assert_eq!(err.error.to_string(), "missing expression inside parenthesis");

        assert_eq!(calc("").unwrap_err().to_string(), "Invalid expression");
        assert_eq!(calc("foo(2)").unwrap_err().to_string(), "Invalid expression");
    }

    #[test]
    fn report_points_into_source() {
        let err = calc("1 + sine(2)").unwrap_err();
        assert_eq!(err.source_text, "1 + sine(2)");
        assert_eq!(err.error.spans, vec![4..8]);
        assert!(err.error.to_string().contains("sine"));
        assert!(!err.report().is_empty());
    }

    #[test]
    fn formatting_options_reach_the_answer() {
        let options = Scientific::E.inside(FormatOptions::default());
        let answer = calc("3 * 10^12").unwrap();
        assert_eq!(answer.formatted(options).to_string(), "3E12");
    }

    #[test]
    fn equation_with_tiny_coefficient() {
        let Answer::Solution(Solution::Single { value, .. }) = calc("(x)/(10000000000000)=1").unwrap() else {
            panic!("expected a single solution");
        };
        assert_float_relative_eq!(value, 1e13);
    }

    #[test]
    fn empty_input_reports() {
        let err = calc("").unwrap_err();
        assert_eq!(err.kind, CalcErrorKind::InvalidExpression);
        assert!(err.report().contains(&err.error.to_string()));
    }

    #[test]
    fn malformed_number() {
        let err = calc("1.2.3").unwrap_err();
        assert_eq!(err.kind, CalcErrorKind::InvalidExpression);
        assert_eq!(err.error.spans, vec![0..5]);
    }
}
