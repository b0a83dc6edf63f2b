use mathpad_parser::parser::{expr::Expr, paren::Paren};
use crate::numerical::{ctxt::Ctxt, error::Error, eval::Eval};

impl Eval for Expr {
    fn eval(&self, ctxt: &Ctxt) -> Result<f64, Error> {
        match self {
            Expr::Literal(literal) => literal.eval(ctxt),
            Expr::Paren(paren) => paren.eval(ctxt),
            Expr::Call(call) => call.eval(ctxt),
            Expr::Unary(unary) => unary.eval(ctxt),
            Expr::Binary(binary) => binary.eval(ctxt),
        }
    }
}

impl Eval for Paren {
    fn eval(&self, ctxt: &Ctxt) -> Result<f64, Error> {
        self.expr.eval(ctxt)
    }
}
