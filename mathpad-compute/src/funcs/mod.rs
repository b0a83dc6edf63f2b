//! All builtin functions provided by the numerical evaluator.
//!
//! Each function is implemented as a unit `struct` with an associated `eval_static` method, which
//! can be used to evaluate the function in Rust code directly. The [`Builtin`] trait is also
//! implemented for each function, so that it can be called from an expression at runtime after
//! its arguments are checked.
//!
//! # Example
//!
//! ```
//! use mathpad_compute::funcs::trigonometry::Sin;
//! use mathpad_compute::numerical::eval::Eval;
//! use mathpad_parser::parser::{expr::Expr, Parser};
//!
//! // evaluate sin(pi / 2) using `eval_static`
//! let result = Sin::eval_static(std::f64::consts::PI / 2.0);
//! assert_eq!(result, 1.0);
//!
//! // evaluate sin(pi / 2) using the `Builtin` trait
//! let expr = Parser::new("sin(pi / 2)").try_parse_full::<Expr>().unwrap();
//! assert_eq!(expr.eval_default().unwrap(), 1.0);
//! ```

/// Implements [`Builtin`] for a unit struct whose function takes a single number. The closure-like
/// body receives the trigonometric mode (optionally) and the argument.
macro_rules! unary_builtin {
    ($upname:ident $name:literal |$n:ident| $body:expr) => {
        unary_builtin!($upname $name |_trig_mode, $n| $body);
    };
    ($upname:ident $name:literal |$mode:ident, $n:ident| $body:expr) => {
        impl $crate::numerical::builtin::Builtin for $upname {
            fn name(&self) -> &'static str {
                $name
            }

            fn sig(&self) -> &'static [$crate::numerical::builtin::BuiltinParam] {
                $crate::numerical::builtin::UNARY_SIG
            }

            fn sig_str(&self) -> &'static str {
                concat!($name, "(n)")
            }

            fn eval(
                &self,
                $mode: $crate::numerical::trig_mode::TrigMode,
                args: Vec<f64>,
            ) -> Result<f64, $crate::numerical::builtin::error::BuiltinError> {
                $crate::numerical::builtin::check_args(self, args.len())?;
                let $n = args[0];
                Ok($body)
            }
        }
    };
}

pub mod miscellaneous;
pub mod power;
pub mod round;
pub mod trigonometry;

use crate::numerical::builtin::Builtin;
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// The table of every builtin function, keyed by name.
static ALL: Lazy<HashMap<&'static str, &'static dyn Builtin>> = Lazy::new(|| {
    use miscellaneous::*;
    use power::*;
    use round::*;
    use trigonometry::*;

    macro_rules! build {
        ($($upname:ident),* $(,)?) => {
            [
                $(
                    &$upname as &'static dyn Builtin,
                )*
            ]
                .into_iter()
                .map(|builtin| (builtin.name(), builtin))
                .collect()
        };
    }

    build! {
        Sin, Cos, Tan, Cot, Sec, Csc,
        Asin, Acos, Atan, Arcsin, Arccos, Arctan,
        Sinh, Cosh, Tanh,
        Sqrt, Cbrt, Exp, Ln, Log,
        Abs, Floor, Ceil, Round,
        Min, Max,
    }
});

/// Returns all builtin functions that can be numerically evaluated.
pub fn all() -> &'static HashMap<&'static str, &'static dyn Builtin> {
    &ALL
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_builtin_is_registered_under_its_own_name() {
        for (name, builtin) in all() {
            assert_eq!(*name, builtin.name());
        }
        assert_eq!(all().len(), 26);
    }
}
