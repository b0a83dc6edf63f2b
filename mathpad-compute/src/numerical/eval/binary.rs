use mathpad_parser::parser::{binary::Binary, token::op::BinOpKind};
use crate::numerical::{ctxt::Ctxt, error::Error, eval::Eval};

impl Eval for Binary {
    fn eval(&self, ctxt: &Ctxt) -> Result<f64, Error> {
        let left = self.lhs.eval(ctxt)?;
        let right = self.rhs.eval(ctxt)?;

        // IEEE semantics throughout: `1/0` is infinite and `0/0` is NaN
        Ok(match self.op.kind {
            BinOpKind::Add => left + right,
            BinOpKind::Sub => left - right,
            BinOpKind::Mul => left * right,
            BinOpKind::Div => left / right,
            BinOpKind::Exp => left.powf(right),
        })
    }
}
