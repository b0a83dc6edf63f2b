use mathpad_parser::parser::{expr::Expr, Parser};
use crate::numerical::{ctxt::Ctxt, error::Error, eval::Eval};

/// A numeric backend that can evaluate expressions with no unknowns.
///
/// The solver only needs to know which names stand for unknowns and how to evaluate everything
/// else, so any backend that can answer those two questions can be plugged into it. [`Ctxt`] is
/// the default implementation.
pub trait Evaluator {
    /// Evaluates a parsed expression to a number.
    fn evaluate_expr(&self, expr: &Expr) -> Result<f64, Error>;

    /// Returns true if the name is an unknown, i.e. it has no value and is not a function.
    fn is_free_symbol(&self, name: &str) -> bool;

    /// Parses and evaluates an expression in evaluable form, such as `(1)/(2)`.
    fn evaluate_numeric(&self, source: &str) -> Result<f64, Error> {
        let expr = Parser::new(source).try_parse_full::<Expr>()?;
        self.evaluate_expr(&expr)
    }
}

impl Evaluator for Ctxt {
    fn evaluate_expr(&self, expr: &Expr) -> Result<f64, Error> {
        expr.eval(self)
    }

    fn is_free_symbol(&self, name: &str) -> bool {
        Ctxt::is_free_symbol(self, name)
    }
}
