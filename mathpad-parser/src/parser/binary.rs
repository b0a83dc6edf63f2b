use std::{fmt, ops::Range};
use super::{
    expr::Expr,
    error::Error,
    token::op::{BinOp, BinOpKind},
    unary::Unary,
    Associativity,
    Parser,
    Precedence,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A binary expression, such as `1 + 2`. Binary expressions can include nested expressions.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Binary {
    /// The left-hand side of the binary expression.
    pub lhs: Box<Expr>,

    /// The operator of the binary expression.
    pub op: BinOp,

    /// The right-hand side of the binary expression.
    pub rhs: Box<Expr>,

    /// The region of the source code that this binary expression was parsed from.
    pub span: Range<usize>,
}

impl Binary {
    /// Returns the span of the binary expression.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    /// Looks at the next token to find the operator that would join `lhs` to whatever follows.
    /// The cursor is not moved.
    ///
    /// If the next token starts an operand instead, as in `2x` or `3(x + 1)`, an implicit
    /// multiplication operator is returned, spanning the gap between the two operands.
    fn peek_op(input: &Parser, lhs_end: usize) -> Option<BinOp> {
        let token = input.peek_token()?;
        if let Some(kind) = BinOpKind::from_token(token.kind) {
            Some(BinOp { kind, implicit: false, span: token.span.clone() })
        } else if token.kind.starts_operand() {
            Some(BinOp { kind: BinOpKind::Mul, implicit: true, span: lhs_end..token.span.start })
        } else {
            None
        }
    }

    /// After parsing the left-hand-side, the operator, and the right-hand-side of a potential
    /// binary expression, parse ahead to see if the right-hand-side is incomplete.
    fn complete_rhs(input: &mut Parser, lhs: Expr, op: BinOp, mut rhs: Expr) -> Result<Expr, Error> {
        let precedence = op.precedence();

        // before creating the `lhs op rhs` node, check the precedence of the following operator;
        // `3 + 4 * 5` must not become `(3 + 4) * 5`
        while let Some(next_op) = Self::peek_op(input, rhs.span().end) {
            let binds_tighter = next_op.precedence() > precedence
                || (next_op.precedence() == precedence && next_op.associativity() == Associativity::Right);
            if !binds_tighter {
                break;
            }
            rhs = Self::parse_expr(input, rhs, next_op.precedence())?;
        }

        let span = lhs.span().start..rhs.span().end;
        Ok(Expr::Binary(Binary {
            lhs: Box::new(lhs),
            op,
            rhs: Box::new(rhs),
            span,
        }))
    }

    /// Parses a chain of binary operations, starting with the already-parsed `lhs`. Only
    /// operators with a precedence of at least `precedence` are consumed.
    pub fn parse_expr(input: &mut Parser, mut lhs: Expr, precedence: Precedence) -> Result<Expr, Error> {
        while let Some(op) = Self::peek_op(input, lhs.span().end) {
            if op.precedence() < precedence {
                break;
            }

            if !op.implicit {
                input.next_token()?;
            }

            let rhs = Unary::parse_or_lower(input)?;
            lhs = Self::complete_rhs(input, lhs, op, rhs)?;
        }

        Ok(lhs)
    }
}

impl fmt::Display for Binary {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}{}", self.lhs, self.op, self.rhs)
    }
}
