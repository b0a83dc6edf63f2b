mod binary;
mod call;
mod expr;
mod literal;
mod unary;

use super::{ctxt::Ctxt, error::Error};

/// Any type that can be evaluated to produce a number.
pub trait Eval {
    /// Evaluate the expression to produce a number, using the given context.
    fn eval(&self, ctxt: &Ctxt) -> Result<f64, Error>;

    /// Evaluate the expression to produce a number, using the default context.
    fn eval_default(&self) -> Result<f64, Error> {
        self.eval(&Default::default())
    }
}

/// Eval tests depend on the parser, so ensure that parser tests pass before running these.
#[cfg(test)]
mod tests {
    use assert_float_eq::{afe_abs, afe_relative_error_msg, afe_is_relative_eq, assert_float_relative_eq};
    use crate::numerical::trig_mode::TrigMode;
    use mathpad_error::ErrorKind;
    use super::*;

    use mathpad_parser::parser::{expr::Expr, Parser};

    fn eval_str(source: &str) -> Result<f64, Error> {
        let mut parser = Parser::new(source);
        let expr = parser.try_parse_full::<Expr>().unwrap();
        expr.eval_default()
    }

    #[test]
    fn binary_expr() {
        assert_eq!(eval_str("1 + 2").unwrap(), 3.0);
    }

    #[test]
    fn precedence() {
        assert_eq!(eval_str("3+4*2").unwrap(), 11.0);
    }

    #[test]
    fn binary_and_unary() {
        assert_eq!(eval_str("3 * -5 / 8 + 6").unwrap(), 4.125);
    }

    #[test]
    fn parenthesized() {
        assert_eq!(eval_str("((1 + 9) / 5) * 3").unwrap(), 6.0);
    }

    #[test]
    fn fraction_projection() {
        assert_eq!(eval_str("(1)/(2)").unwrap(), 0.5);
    }

    #[test]
    fn implicit_multiplication() {
        assert_float_relative_eq!(eval_str("2pi").unwrap(), std::f64::consts::TAU);
        assert_eq!(eval_str("3(4+1)").unwrap(), 15.0);
    }

    #[test]
    fn negation_and_power() {
        assert_eq!(eval_str("-2^2").unwrap(), -4.0);
        assert_eq!(eval_str("2^-1").unwrap(), 0.5);
        assert_eq!(eval_str("2^3^2").unwrap(), 512.0);
    }

    #[test]
    fn division_by_zero_is_infinite() {
        assert_eq!(eval_str("1/0").unwrap(), f64::INFINITY);
        assert!(eval_str("0/0").unwrap().is_nan());
    }

    #[test]
    fn func_call() {
        assert_float_relative_eq!(eval_str("sqrt(16) + log(8, 2)").unwrap(), 7.0);
    }

    #[test]
    fn degrees() {
        let ctxt = Ctxt::default().with_trig_mode(TrigMode::Degrees);
        let expr = Parser::new("sin(30)").try_parse_full::<Expr>().unwrap();
        assert_float_relative_eq!(expr.eval(&ctxt).unwrap(), 0.5);
    }

    #[test]
    fn undefined_variable() {
        let err = eval_str("2x").unwrap_err();
        assert_eq!(err.kind.message(), "`x` has no value here");
        assert_eq!(err.spans, vec![1..2]);
    }

    #[test]
    fn undefined_function_suggests() {
        let err = eval_str("sine(1)").unwrap_err();
        assert_eq!(err.kind.message(), "the `sine` function does not exist");
        assert_eq!(err.spans, vec![0..4]);
    }

    #[test]
    fn argument_count() {
        let err = eval_str("max(1)").unwrap_err();
        assert_eq!(err.kind.message(), "missing argument #2 for the `max` function");
        assert_eq!(err.spans, vec![0..4, 5..6]);

        let err = eval_str("sqrt(1, 2)").unwrap_err();
        assert_eq!(err.kind.message(), "too many arguments were given to the `sqrt` function");
    }
}
