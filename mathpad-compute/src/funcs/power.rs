//! Roots, exponentials and logarithms.

use crate::numerical::{
    builtin::{check_args, error::BuiltinError, Builtin, BuiltinParam, ParamKind},
    trig_mode::TrigMode,
};

/// Square root.
#[derive(Debug)]
pub struct Sqrt;

impl Sqrt {
    pub fn eval_static(n: f64) -> f64 {
        n.sqrt()
    }
}

unary_builtin!(Sqrt "sqrt" |n| Self::eval_static(n));

/// Cube root. Unlike `n^(1/3)`, this is defined for negative `n`.
#[derive(Debug)]
pub struct Cbrt;

impl Cbrt {
    pub fn eval_static(n: f64) -> f64 {
        n.cbrt()
    }
}

unary_builtin!(Cbrt "cbrt" |n| Self::eval_static(n));

/// Euler's number raised to the given power.
#[derive(Debug)]
pub struct Exp;

impl Exp {
    pub fn eval_static(n: f64) -> f64 {
        n.exp()
    }
}

unary_builtin!(Exp "exp" |n| Self::eval_static(n));

/// Natural logarithm.
#[derive(Debug)]
pub struct Ln;

impl Ln {
    pub fn eval_static(n: f64) -> f64 {
        n.ln()
    }
}

unary_builtin!(Ln "ln" |n| Self::eval_static(n));

/// Logarithm with an optional base, which defaults to 10.
#[derive(Debug)]
pub struct Log;

impl Log {
    pub fn eval_static(n: f64, base: f64) -> f64 {
        if base == 10.0 {
            n.log10()
        } else {
            n.log(base)
        }
    }
}

impl Builtin for Log {
    fn name(&self) -> &'static str {
        "log"
    }

    fn sig(&self) -> &'static [BuiltinParam] {
        &[
            BuiltinParam { name: "n", kind: ParamKind::Required },
            BuiltinParam { name: "base", kind: ParamKind::Optional },
        ]
    }

    fn sig_str(&self) -> &'static str {
        "log(n, base = 10)"
    }

    fn eval(&self, _: TrigMode, args: Vec<f64>) -> Result<f64, BuiltinError> {
        check_args(self, args.len())?;
        Ok(Self::eval_static(args[0], args.get(1).copied().unwrap_or(10.0)))
    }
}
