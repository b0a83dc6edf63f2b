//! Numerical evaluation of parsed expressions over `f64`.
//!
//! All arithmetic follows IEEE-754 semantics: division by zero produces an infinity, and invalid
//! operations (such as `sqrt(-1)`) produce NaN rather than an error. Errors are reserved for
//! expressions that cannot be evaluated at all, such as an unknown function.

pub mod builtin;
pub mod ctxt;
pub mod error;
pub mod eval;
pub mod fmt;
pub mod trig_mode;
