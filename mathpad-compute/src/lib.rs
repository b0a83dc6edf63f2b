//! Numeric evaluation and equation solving for mathpad.
//!
//! Expressions are parsed with [`mathpad_parser`] and evaluated over `f64` by the
//! [`numerical`] module. Equations are normalised into a [`poly::Poly`] and solved by the
//! [`solve`] module, which also classifies raw input through [`calculate`].
//!
//! The solver does not depend on [`Ctxt`](numerical::ctxt::Ctxt) directly. It talks to any
//! [`Evaluator`], so another numeric backend can be plugged in.

pub mod consts;
pub mod evaluator;
pub mod funcs;
pub mod numerical;
pub mod poly;
pub mod solve;

pub use evaluator::Evaluator;
pub use numerical::ctxt::Ctxt;
pub use solve::{calculate, Answer, CalcError, CalcErrorKind, Solution};
