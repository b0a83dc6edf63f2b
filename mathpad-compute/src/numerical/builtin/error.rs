use mathpad_error::ErrorKind;
use mathpad_parser::parser::call::Call;
use crate::numerical::error::{kind::{MissingArgument, TooManyArguments}, Error};

/// Represents an error that can occur while evaluating a builtin function.
#[derive(Debug)]
pub enum BuiltinError {
    /// The function was called with too many arguments.
    TooManyArguments(TooManyArguments),

    /// An argument to the function call is missing.
    MissingArgument(MissingArgument),
}

impl BuiltinError {
    /// Convert the [`BuiltinError`] into an [`Error`], using the given function call to provide
    /// spans.
    pub fn into_error(self, call: &Call) -> Error {
        let kind = match self {
            BuiltinError::TooManyArguments(e) => Box::new(e) as Box<dyn ErrorKind>,
            BuiltinError::MissingArgument(e) => Box::new(e) as Box<dyn ErrorKind>,
        };
        Error {
            spans: call.outer_span().to_vec(),
            kind,
        }
    }
}
