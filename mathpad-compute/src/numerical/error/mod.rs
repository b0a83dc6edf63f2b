pub mod kind;

pub use mathpad_error::Error;
