//! Functions of more than one number.

use crate::numerical::{
    builtin::{check_args, error::BuiltinError, Builtin, BuiltinParam, ParamKind},
    trig_mode::TrigMode,
};

const PAIR_SIG: &[BuiltinParam] = &[
    BuiltinParam { name: "a", kind: ParamKind::Required },
    BuiltinParam { name: "b", kind: ParamKind::Required },
];

/// Build a builtin function of two numbers.
macro_rules! build_pair {
    ($($name:literal $upname:ident; $func:expr),* $(,)?) => {
        $(
            #[derive(Debug)]
            pub struct $upname;

            impl $upname {
                pub fn eval_static(a: f64, b: f64) -> f64 {
                    #[allow(clippy::redundant_closure_call)]
                    ($func)(a, b)
                }
            }

            impl Builtin for $upname {
                fn name(&self) -> &'static str {
                    $name
                }

                fn sig(&self) -> &'static [BuiltinParam] {
                    PAIR_SIG
                }

                fn sig_str(&self) -> &'static str {
                    concat!($name, "(a, b)")
                }

                fn eval(&self, _: TrigMode, args: Vec<f64>) -> Result<f64, BuiltinError> {
                    check_args(self, args.len())?;
                    Ok(Self::eval_static(args[0], args[1]))
                }
            }
        )*
    };
}

build_pair! {
    "min" Min; f64::min,
    "max" Max; f64::max,
}
