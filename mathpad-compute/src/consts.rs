//! Named constants available in every default [`Ctxt`](crate::numerical::ctxt::Ctxt).

/// Euler's number.
pub const E: f64 = std::f64::consts::E;

/// The golden ratio.
pub const PHI: f64 = 1.618_033_988_749_895;

/// The ratio of a circle's circumference to its diameter.
pub const PI: f64 = std::f64::consts::PI;

/// The ratio of a circle's circumference to its radius.
pub const TAU: f64 = std::f64::consts::TAU;

/// Returns the names and values of all constants, in the order they are added to a context.
pub fn all() -> [(&'static str, f64); 4] {
    [("e", E), ("phi", PHI), ("pi", PI), ("tau", TAU)]
}
