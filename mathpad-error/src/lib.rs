//! Contains the common [`ErrorKind`] trait used by all errors to display user-facing error
//! messages.
//!
//! Errors in mathpad always point into the *evaluable form* of an expression, the flat string
//! produced from the expression tree. Hosts that only want a short message can use
//! [`ErrorKind::message`] (or the [`Display`] implementation of [`Error`]); hosts with a terminal
//! can build a full [`ariadne`] report with [`Error::build_report`].

extern crate self as mathpad_error;

use ariadne::{Color, Report, Source};
use std::{fmt::{self, Debug, Display, Formatter}, ops::Range};

/// The color to use to highlight expressions.
pub const EXPR: Color = Color::RGB(52, 235, 152);

/// Represents any kind of error that can occur during some operation.
pub trait ErrorKind: Debug + Send {
    /// The one-line message at the top of the error.
    fn message(&self) -> String;

    /// Builds the report for this error.
    fn build_report<'a>(
        &self,
        src_id: &'a str,
        spans: &[Range<usize>],
    ) -> Report<(&'a str, Range<usize>)>;
}

/// An error associated with regions of source code that can be highlighted.
#[derive(Debug)]
pub struct Error {
    /// The regions of the source code that this error originated from.
    pub spans: Vec<Range<usize>>,

    /// The kind of error that occurred.
    pub kind: Box<dyn ErrorKind>,
}

impl Error {
    /// Creates a new error with the given spans and kind.
    pub fn new(spans: Vec<Range<usize>>, kind: impl ErrorKind + 'static) -> Self {
        Self { spans, kind: Box::new(kind) }
    }

    /// Build a report from this error kind.
    pub fn build_report<'a>(&self, src_id: &'a str) -> Report<(&'a str, Range<usize>)> {
        self.kind.build_report(src_id, &self.spans)
    }

    /// Renders the full report for this error into a string, without writing to stderr.
    ///
    /// Spans are clamped to the characters of `input`. When `input` is empty, the report carries
    /// only the message, since there is nothing to label.
    pub fn report_to_string(&self, src_id: &str, input: &str) -> String {
        let len = input.chars().count();
        let spans = if len == 0 {
            Vec::new()
        } else {
            self.spans
                .iter()
                .map(|span| {
                    let start = span.start.min(len - 1);
                    start..span.end.clamp(start + 1, len)
                })
                .collect()
        };

        let mut buf = Vec::new();
        self.kind
            .build_report(src_id, &spans)
            .write((src_id, Source::from(input)), &mut buf)
            .expect("writing a report into a `Vec` cannot fail");
        String::from_utf8_lossy(&buf).into_owned()
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind.message())
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use mathpad_attrs::ErrorKind;
    use super::*;

    #[derive(Debug, Clone, ErrorKind, PartialEq)]
    #[error(
        message = format!("`{}` went wrong", self.what),
        labels = ["right here"],
        help = "try something else",
    )]
    struct Oops {
        what: &'static str,
    }

    #[test]
    fn display_uses_message() {
        let err = Error::new(vec![0..3], Oops { what: "abc" });
        assert_eq!(err.to_string(), "`abc` went wrong");
    }

    #[test]
    fn report_contains_labels() {
        let err = Error::new(vec![2..5], Oops { what: "sin" });
        let report = err.report_to_string("input", "1+sin(");
        let plain = String::from_utf8(strip_ansi_escapes::strip(report)).unwrap();
        assert!(plain.contains("`sin` went wrong"));
        assert!(plain.contains("right here"));
        assert!(plain.contains("try something else"));
    }

    fn plain(report: String) -> String {
        String::from_utf8(strip_ansi_escapes::strip(report)).unwrap()
    }

    #[test]
    fn report_without_spans() {
        let err = Error::new(vec![], Oops { what: "nothing" });
        let report = plain(err.report_to_string("input", ""));
        assert!(report.contains("`nothing` went wrong"));
    }

    #[test]
    fn report_empty_span_on_empty_input() {
        let err = Error::new(vec![0..0], Oops { what: "eof" });
        let report = plain(err.report_to_string("input", ""));
        assert!(report.contains("`eof` went wrong"));
        assert!(!report.contains("right here"));
    }

    #[test]
    fn report_span_past_end() {
        let err = Error::new(vec![2..2], Oops { what: "eof" });
        let report = plain(err.report_to_string("input", "1+"));
        assert!(report.contains("`eof` went wrong"));
        assert!(report.contains("right here"));
    }
}
