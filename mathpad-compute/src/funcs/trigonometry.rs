//! General trigonometric and hyperbolic trigonometric functions.

/// Build a trigonometric function that takes in a single angle, measured in the context's
/// trigonometric mode.
macro_rules! build_radian_input {
    ($($name:literal $upname:ident; $func:expr),* $(,)?) => {
        $(
            #[derive(Debug)]
            pub struct $upname;

            impl $upname {
                pub fn eval_static(n: f64) -> f64 {
                    // NOTE: the closure call is contained within the macro, so we allow
                    // the clippy::redundant_closure_call lint
                    #[allow(clippy::redundant_closure_call)]
                    ($func)(n)
                }
            }

            unary_builtin!($upname $name |trig_mode, n| Self::eval_static(trig_mode.to_radians(n)));
        )*
    };
}

/// Build an inverse trigonometric function, whose output angle is given in the context's
/// trigonometric mode.
macro_rules! build_radian_output {
    ($($name:literal $upname:ident; $func:expr),* $(,)?) => {
        $(
            #[derive(Debug)]
            pub struct $upname;

            impl $upname {
                pub fn eval_static(n: f64) -> f64 {
                    #[allow(clippy::redundant_closure_call)]
                    ($func)(n)
                }
            }

            unary_builtin!($upname $name |trig_mode, n| trig_mode.from_radians(Self::eval_static(n)));
        )*
    };
}

/// Build a hyperbolic trigonometric function.
macro_rules! build_hyperbolic {
    ($($name:literal $upname:ident; $func:expr),* $(,)?) => {
        $(
            #[derive(Debug)]
            pub struct $upname;

            impl $upname {
                pub fn eval_static(n: f64) -> f64 {
                    #[allow(clippy::redundant_closure_call)]
                    ($func)(n)
                }
            }

            unary_builtin!($upname $name |n| Self::eval_static(n));
        )*
    };
}

build_radian_input! {
    "sin" Sin; f64::sin,
    "cos" Cos; f64::cos,
    "tan" Tan; f64::tan,
    "cot" Cot; |n: f64| n.tan().recip(),
    "sec" Sec; |n: f64| n.cos().recip(),
    "csc" Csc; |n: f64| n.sin().recip(),
}

build_radian_output! {
    "asin" Asin; f64::asin,
    "acos" Acos; f64::acos,
    "atan" Atan; f64::atan,
    "arcsin" Arcsin; f64::asin,
    "arccos" Arccos; f64::acos,
    "arctan" Arctan; f64::atan,
}

build_hyperbolic! {
    "sinh" Sinh; f64::sinh,
    "cosh" Cosh; f64::cosh,
    "tanh" Tanh; f64::tanh,
}
