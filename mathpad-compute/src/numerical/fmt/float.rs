//! Utility functions to format floating-point numbers.

use std::fmt::Formatter;
use super::{FormatOptions, NumberFormat, Scientific};

/// Returns true if the given float is small or large enough that it should be formatted in
/// scientific notation.
pub fn should_use_scientific(n: f64) -> bool {
    let abs = n.abs();
    abs != 0.0 && (abs < 1e-6 || abs >= 1e+12)
}

/// Trims trailing zeros and a trailing decimal point from a string assumed to represent a single
/// number in decimal notation.
fn trim_trailing(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}

/// Formats a float as a standard number.
fn fmt_decimal(f: &mut Formatter<'_>, n: f64, precision: usize) -> std::fmt::Result {
    if n.is_nan() {
        return write!(f, "NaN");
    } else if n.is_infinite() {
        return write!(f, "{}∞", if n.is_sign_negative() { "-" } else { "" });
    }

    let s = if n.fract() == 0.0 {
        format!("{:.0}", n)
    } else {
        format!("{:.*}", precision, n)
    };

    // rounding can leave a negative zero behind, as in `-0.00001`
    match trim_trailing(&s) {
        "-0" => write!(f, "0"),
        s => write!(f, "{}", s),
    }
}

/// Formats a float in scientific notation.
fn fmt_scientific(
    f: &mut Formatter<'_>,
    n: f64,
    scientific_suffix: Scientific,
    precision: usize,
) -> std::fmt::Result {
    if !n.is_finite() || n == 0.0 {
        return fmt_decimal(f, n, precision);
    }

    // `{:e}` always produces `<mantissa>e<exponent>`
    let s = format!("{:.*e}", precision, n);
    let (mantissa, exponent) = s.split_once('e').unwrap_or((&s, "0"));

    write!(f, "{}{}{}",
        trim_trailing(mantissa),
        match scientific_suffix {
            Scientific::Times => " × 10^",
            Scientific::E => "E",
        },
        exponent,
    )
}

/// Formats a float with the given options.
pub fn fmt(f: &mut Formatter<'_>, n: f64, options: FormatOptions) -> std::fmt::Result {
    match options.number {
        NumberFormat::Auto => {
            if should_use_scientific(n) {
                fmt_scientific(f, n, options.scientific, options.precision)
            } else {
                fmt_decimal(f, n, options.precision)
            }
        },
        NumberFormat::Decimal => fmt_decimal(f, n, options.precision),
        NumberFormat::Scientific => fmt_scientific(f, n, options.scientific, options.precision),
    }
}
