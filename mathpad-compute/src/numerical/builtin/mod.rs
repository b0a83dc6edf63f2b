pub mod error;

use error::BuiltinError;
use super::{error::kind::{MissingArgument, TooManyArguments}, trig_mode::TrigMode};

/// A function parameter to a builtin function.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BuiltinParam {
    /// The name of the parameter.
    pub name: &'static str,

    /// Whether the parameter is required or optional.
    pub kind: ParamKind,
}

/// The kind of the function parameter; either required or optional.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParamKind {
    Required,
    Optional,
}

/// The signature shared by every builtin that takes a single number.
pub const UNARY_SIG: &[BuiltinParam] = &[BuiltinParam { name: "n", kind: ParamKind::Required }];

/// A trait implemented by all builtin functions.
pub trait Builtin: std::fmt::Debug + Send + Sync {
    /// Returns the name of the function.
    // NOTE: this is a `&self` method and not an associated constant to make the trait object-safe
    fn name(&self) -> &'static str;

    /// The function's signature, indicating all parameters and whether they are required or
    /// optional.
    fn sig(&self) -> &'static [BuiltinParam];

    /// The function's signature as a string, used for error messages.
    fn sig_str(&self) -> &'static str;

    /// Evaluates the function. Arguments have already been evaluated, and are checked against the
    /// signature by the implementation.
    fn eval(&self, trig_mode: TrigMode, args: Vec<f64>) -> Result<f64, BuiltinError>;

    /// Returns the number of required parameters.
    fn num_required(&self) -> usize {
        self.sig()
            .iter()
            .filter(|param| param.kind == ParamKind::Required)
            .count()
    }
}

/// Checks that the given number of arguments fits the signature of the builtin.
pub fn check_args(builtin: &dyn Builtin, given: usize) -> Result<(), BuiltinError> {
    let expected = builtin.sig().len();
    let required = builtin.num_required();

    if given > expected {
        Err(BuiltinError::TooManyArguments(TooManyArguments {
            name: builtin.name().to_string(),
            expected,
            given,
            signature: builtin.sig_str().to_string(),
        }))
    } else if given < required {
        Err(BuiltinError::MissingArgument(MissingArgument {
            name: builtin.name().to_string(),
            index: given,
            expected,
            given,
            signature: builtin.sig_str().to_string(),
        }))
    } else {
        Ok(())
    }
}
