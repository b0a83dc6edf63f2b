mod float;

use std::fmt::{Display, Formatter};

pub use float::should_use_scientific;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Formatting options for numbers.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FormatOptions {
    /// How to format a number.
    pub number: NumberFormat,

    /// Which suffix notation to use for scientific notation.
    ///
    /// This option is ignored if [`number`] is [`NumberFormat::Decimal`].
    ///
    /// [`number`]: FormatOptions::number
    pub scientific: Scientific,

    /// The number of decimal places to round to. Trailing zeros are trimmed after rounding, and
    /// integer-valued numbers are always printed without a fractional part.
    ///
    /// This option **does not** control the precision of the number during calculation, only the
    /// number of digits to display during formatting.
    pub precision: usize,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            number: NumberFormat::default(),
            scientific: Scientific::default(),
            precision: 4,
        }
    }
}

impl FormatOptions {
    /// Wraps the given [`FormatOptions`] into a builder for further customization.
    pub fn into_builder(self) -> FormatOptionsBuilder {
        FormatOptionsBuilder(self)
    }
}

/// The different ways to format a number.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum NumberFormat {
    /// Chooses between decimal and scientific notation based on the magnitude of the number.
    ///
    /// Non-zero numbers whose magnitude is below `1e-6` or at least `1e12` are represented in
    /// scientific notation, while all other numbers are formatted in decimal notation.
    ///
    /// This is the default option.
    #[default]
    Auto,

    /// Formats the number as a decimal, with no regard to the magnitude of the number.
    Decimal,

    /// Formats the number in scientific notation.
    ///
    /// The formatting of this option can be further customized using the [`scientific`] option in
    /// the [`FormatOptions`] struct.
    ///
    /// [`scientific`]: FormatOptions::scientific
    Scientific,
}

impl NumberFormat {
    /// Utility function to create a new [`FormatOptions`] with the same formating options as the
    /// given [`FormatOptions`], but with the number format set to this value.
    pub fn inside(self, options: FormatOptions) -> FormatOptions {
        FormatOptions {
            number: self,
            ..options
        }
    }
}

/// The different ways to format the suffix of scientific notation.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Scientific {
    /// Formats the number in scientific notation, using the suffix `× 10^` to denote the exponent.
    ///
    /// This formatting option includes a non-ASCII `×` character. Use the [`Scientific::E`] option
    /// to format the number in the popular `E` notation, which can be more easily parseable.
    ///
    /// This is the default option.
    #[default]
    Times,

    /// Formats the number in scientific notation, using `E` notation to denote the exponent.
    ///
    /// `E` is used instead of `e` to avoid ambiguity with Euler's number.
    E,
}

impl Scientific {
    /// Utility function to create a new [`FormatOptions`] with the same formating options as the
    /// given [`FormatOptions`], but with the scientific notation format set to this value.
    pub fn inside(self, options: FormatOptions) -> FormatOptions {
        FormatOptions {
            scientific: self,
            ..options
        }
    }
}

/// Helper struct to build a [`FormatOptions`] struct.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct FormatOptionsBuilder(FormatOptions);

impl FormatOptionsBuilder {
    /// Creates a new builder with the default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the number format. See [`NumberFormat`] for more information.
    pub fn number(mut self, number: NumberFormat) -> Self {
        self.0.number = number;
        self
    }

    /// Sets the scientific notation suffix. See [`Scientific`] for more information.
    pub fn scientific(mut self, scientific: Scientific) -> Self {
        self.0.scientific = scientific;
        self
    }

    /// Sets the number of decimal places to round to. See [`FormatOptions::precision`] for more
    /// information.
    pub fn precision(mut self, precision: usize) -> Self {
        self.0.precision = precision;
        self
    }

    /// Builds the [`FormatOptions`] struct.
    pub fn build(self) -> FormatOptions {
        self.0
    }
}

/// Formatter for a number.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumberFormatter {
    /// The number to format.
    pub value: f64,

    /// The options to use when formatting.
    pub options: FormatOptions,
}

impl Display for NumberFormatter {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        float::fmt(f, self.value, self.options)
    }
}

/// Formats the number with the given options.
pub fn format_number(value: f64, options: FormatOptions) -> String {
    NumberFormatter { value, options }.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn auto(value: f64) -> String {
        format_number(value, FormatOptions::default())
    }

    #[test]
    fn integers_have_no_decimals() {
        assert_eq!(auto(11.0), "11");
        assert_eq!(auto(-3.0), "-3");
        assert_eq!(auto(123456789012.0), "123456789012");
    }

    #[test]
    fn fractions_are_rounded_and_trimmed() {
        assert_eq!(auto(0.5), "0.5");
        assert_eq!(auto(1.0 / 3.0), "0.3333");
        assert_eq!(auto(2.675), "2.675");
        assert_eq!(auto(0.1 + 0.2), "0.3");
    }

    #[test]
    fn negative_zero() {
        assert_eq!(auto(-0.0), "0");
        assert_eq!(auto(-0.00001), "0");
    }

    #[test]
    fn non_finite() {
        assert_eq!(auto(f64::INFINITY), "∞");
        assert_eq!(auto(f64::NEG_INFINITY), "-∞");
        assert_eq!(auto(f64::NAN), "NaN");
    }

    #[test]
    fn auto_switches_to_scientific() {
        assert_eq!(auto(1.5e12), "1.5 × 10^12");
        assert_eq!(auto(-2e-7), "-2 × 10^-7");
        assert_eq!(auto(0.0), "0");
    }

    #[test]
    fn e_notation() {
        let options = FormatOptionsBuilder::new()
            .scientific(Scientific::E)
            .build();
        assert_eq!(format_number(1.5e12, options), "1.5E12");
    }

    #[test]
    fn forced_notation() {
        let scientific = NumberFormat::Scientific.inside(FormatOptions::default());
        assert_eq!(format_number(1234.5, scientific), "1.2345 × 10^3");

        let decimal = NumberFormat::Decimal.inside(FormatOptions::default());
        assert_eq!(format_number(1.5e12, decimal), "1500000000000");
    }

    #[test]
    fn custom_precision() {
        let options = FormatOptionsBuilder::new().precision(2).build();
        assert_eq!(format_number(std::f64::consts::PI, options), "3.14");
    }
}
