use mathpad_parser::parser::{token::op::UnaryOpKind, unary::Unary};
use crate::numerical::{ctxt::Ctxt, error::Error, eval::Eval};

impl Eval for Unary {
    fn eval(&self, ctxt: &Ctxt) -> Result<f64, Error> {
        let operand = self.operand.eval(ctxt)?;
        Ok(match self.op.kind {
            UnaryOpKind::Neg => -operand,
            UnaryOpKind::Pos => operand,
        })
    }
}
