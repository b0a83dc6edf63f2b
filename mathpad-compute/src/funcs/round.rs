//! Rounding and absolute value.

/// Absolute value.
#[derive(Debug)]
pub struct Abs;

impl Abs {
    pub fn eval_static(n: f64) -> f64 {
        n.abs()
    }
}

unary_builtin!(Abs "abs" |n| Self::eval_static(n));

/// Rounds towards negative infinity.
#[derive(Debug)]
pub struct Floor;

impl Floor {
    pub fn eval_static(n: f64) -> f64 {
        n.floor()
    }
}

unary_builtin!(Floor "floor" |n| Self::eval_static(n));

/// Rounds towards positive infinity.
#[derive(Debug)]
pub struct Ceil;

impl Ceil {
    pub fn eval_static(n: f64) -> f64 {
        n.ceil()
    }
}

unary_builtin!(Ceil "ceil" |n| Self::eval_static(n));

/// Rounds to the nearest integer, with halves rounded away from zero.
#[derive(Debug)]
pub struct Round;

impl Round {
    pub fn eval_static(n: f64) -> f64 {
        n.round()
    }
}

unary_builtin!(Round "round" |n| Self::eval_static(n));

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn halves_round_away_from_zero() {
        assert_eq!(Round::eval_static(2.5), 3.0);
        assert_eq!(Round::eval_static(-2.5), -3.0);
    }

    #[test]
    fn floor_and_ceil_of_negative() {
        assert_eq!(Floor::eval_static(-1.5), -2.0);
        assert_eq!(Ceil::eval_static(-1.5), -1.0);
    }
}
