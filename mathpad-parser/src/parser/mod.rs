pub mod binary;
pub mod call;
pub mod error;
pub mod expr;
pub mod iter;
pub mod literal;
pub mod paren;
pub mod token;
pub mod unary;

use error::{Error, kind};
use mathpad_error::ErrorKind;
use super::tokenizer::{tokenize_complete, Token};
use std::ops::Range;

/// Attempts to parse a value from the given stream of tokens, returning early from the enclosing
/// function if parsing succeeds or fails with a fatal error.
///
/// If parsing fails with a non-fatal error, the macro evaluates to that error, so that the caller
/// can try another alternative or return it.
#[macro_export]
macro_rules! try_parse_catch_fatal {
    ($expr:expr) => {
        match $expr {
            Ok(value) => return Ok(value),
            Err(err) if err.fatal => return Err(err),
            Err(err) => err,
        }
    };
}

/// A high-level parser for evaluable expressions. This is the type to use to parse an arbitrary
/// piece of code into an abstract syntax tree.
#[derive(Debug, Clone)]
pub struct Parser<'source> {
    /// The tokens that this parser is currently parsing.
    tokens: Box<[Token<'source>]>,

    /// The index of the **next** token to be parsed.
    cursor: usize,
}

impl<'source> Parser<'source> {
    /// Create a new parser for the given source.
    pub fn new(source: &'source str) -> Self {
        Self {
            tokens: tokenize_complete(source),
            cursor: 0,
        }
    }

    /// Creates an error that points at the current token, or the end of the source code if the
    /// cursor is at the end of the stream.
    pub fn error(&self, kind: impl ErrorKind + 'static) -> Error {
        Error::new(self.span(), kind)
    }

    /// Creates a fatal error that points at the current token, or the end of the source code if
    /// the cursor is at the end of the stream.
    pub fn error_fatal(&self, kind: impl ErrorKind + 'static) -> Error {
        Error::new_fatal(self.span(), kind)
    }

    /// Returns a span pointing at the end of the source code.
    pub fn eof_span(&self) -> Range<usize> {
        self.tokens.last().map_or(0..0, |token| token.span.end..token.span.end)
    }

    /// Returns the span of the current token, or the end of the source code if the cursor is at
    /// the end of the stream.
    pub fn span(&self) -> Range<usize> {
        self.tokens
            .get(self.cursor)
            .map_or(self.eof_span(), |token| token.span.clone())
    }

    /// Returns the previous token. The cursor is not moved. Returns [`None`] if the cursor is at
    /// the beginning of the stream.
    pub fn prev_token(&self) -> Option<&Token<'source>> {
        self.tokens.get(self.cursor.checked_sub(1)?)
    }

    /// Returns the next non-whitespace token without advancing the cursor.
    pub fn peek_token(&self) -> Option<&Token<'source>> {
        self.tokens[self.cursor.min(self.tokens.len())..]
            .iter()
            .find(|token| !token.is_whitespace())
    }

    /// Returns the next token to be parsed, then advances the cursor. Whitespace tokens are
    /// skipped.
    ///
    /// Returns an EOF error if there are no more tokens.
    pub fn next_token(&mut self) -> Result<Token<'source>, Error> {
        while self.cursor < self.tokens.len() {
            let token = &self.tokens[self.cursor];
            self.cursor += 1;
            if token.is_whitespace() {
                continue;
            } else {
                // cloning is cheap: only Range<_> is cloned
                return Ok(token.clone());
            }
        }

        Err(self.error(kind::UnexpectedEof))
    }

    /// Speculatively parses a value from the given stream of tokens. This function can be used
    /// in the [`Parse::parse`] implementation of a type with the given [`Parser`], as it will
    /// automatically backtrack the cursor position if parsing fails.
    ///
    /// If parsing is successful, the stream is advanced past the consumed tokens and the parsed
    /// value is returned. Otherwise, the stream is left unchanged and an error is returned.
    pub fn try_parse<T: Parse>(&mut self) -> Result<T, Error> {
        self.try_parse_with_fn(T::parse)
    }

    /// Speculatively parses a value from the given stream of tokens, using a custom parsing
    /// function to parse the value. The cursor is restored if parsing fails.
    pub fn try_parse_with_fn<T, F>(&mut self, f: F) -> Result<T, Error>
    where
        F: FnOnce(&mut Parser<'source>) -> Result<T, Error>,
    {
        let start = self.cursor;
        match f(self) {
            Ok(value) => Ok(value),
            err => {
                self.cursor = start;
                err
            },
        }
    }

    /// Speculatively parses multiple values (at least one) from the given stream of tokens, each
    /// delimited by a certain token type.
    ///
    /// If parsing is successful, the stream is advanced past the consumed tokens and the parsed
    /// values are returned. Otherwise, the stream is left unchanged and an error is returned.
    pub fn try_parse_delimited<T: Parse, D: Parse>(&mut self) -> Result<Vec<T>, Error> {
        let start = self.cursor;
        let mut values = Vec::new();

        loop {
            match self.try_parse::<T>() {
                Ok(value) => values.push(value),
                Err(err) => {
                    self.cursor = start;
                    return Err(err);
                },
            }

            if self.try_parse::<D>().is_err() {
                return Ok(values);
            }
        }
    }

    /// Attempts to parse a value from the given stream of tokens. All the tokens must be consumed
    /// by the parser; if not, an error is returned.
    pub fn try_parse_full<T: Parse>(&mut self) -> Result<T, Error> {
        let value = T::parse(self)?;
        if self.peek_token().is_none() {
            Ok(value)
        } else {
            // point at the leftover token, not the whitespace before it
            while self.tokens.get(self.cursor).is_some_and(Token::is_whitespace) {
                self.cursor += 1;
            }
            Err(self.error(kind::ExpectedEof))
        }
    }
}

/// Any type that can be parsed from a source of tokens.
pub trait Parse: Sized {
    /// Parses a value from the given stream of tokens, advancing the stream past the consumed
    /// tokens if parsing is successful.
    ///
    /// This function should be used by consumers of the library.
    fn parse(input: &mut Parser) -> Result<Self, Error>;
}

/// The associativity of a binary or unary operation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Associativity {
    /// The binary / unary operation is left-associative.
    ///
    /// For binary operations, this means `a op b op c` is evaluated as `(a op b) op c`.
    Left,

    /// The binary / unary operation is right-associative.
    ///
    /// For binary operations, this means `a op b op c` is evaluated as `a op (b op c)`. For unary
    /// operations, this means `op op a` is evaluated as `op (op a)`.
    Right,
}

/// The precedence of an operation, in order from lowest precedence (evaluated last) to highest
/// precedence (evaluated first).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
    /// Any precedence.
    Any,

    /// Precedence of addition (`+`) and subtraction (`-`), which separate terms.
    Term,

    /// Precedence of multiplication (`*`) and division (`/`), including implicit
    /// multiplication, which separate factors.
    Factor,

    /// Precedence of unary negation and unary plus.
    Neg,

    /// Precedence of exponentiation (`^`).
    Exp,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    use binary::Binary;
    use call::Call;
    use expr::Expr;
    use literal::{Literal, LitNum, LitSym};
    use paren::Paren;
    use token::op::{BinOp, BinOpKind, UnaryOp, UnaryOpKind};
    use unary::Unary;

    fn num(value: f64, span: Range<usize>) -> Expr {
        Expr::Literal(Literal::Number(LitNum { value, span }))
    }

    fn sym(name: &str, span: Range<usize>) -> Expr {
        Expr::Literal(Literal::Symbol(LitSym { name: name.to_string(), span }))
    }

    fn bin(lhs: Expr, kind: BinOpKind, implicit: bool, op_span: Range<usize>, rhs: Expr) -> Expr {
        let span = lhs.span().start..rhs.span().end;
        Expr::Binary(Binary {
            lhs: Box::new(lhs),
            op: BinOp { kind, implicit, span: op_span },
            rhs: Box::new(rhs),
            span,
        })
    }

    #[test]
    fn literal_int() {
        let mut parser = Parser::new("16");
        let expr = parser.try_parse_full::<Expr>().unwrap();
        assert_eq!(expr, num(16.0, 0..2));
    }

    #[test]
    fn literal_float() {
        let mut parser = Parser::new("3.14");
        let expr = parser.try_parse_full::<Expr>().unwrap();
        assert_eq!(expr, num(3.14, 0..4));
    }

    #[test]
    fn precedence() {
        let mut parser = Parser::new("3+4*2");
        let expr = parser.try_parse_full::<Expr>().unwrap();
        assert_eq!(expr, bin(
            num(3.0, 0..1),
            BinOpKind::Add,
            false,
            1..2,
            bin(num(4.0, 2..3), BinOpKind::Mul, false, 3..4, num(2.0, 4..5)),
        ));
    }

    #[test]
    fn left_associative_subtraction() {
        let mut parser = Parser::new("1-2-3");
        let expr = parser.try_parse_full::<Expr>().unwrap();
        assert_eq!(expr, bin(
            bin(num(1.0, 0..1), BinOpKind::Sub, false, 1..2, num(2.0, 2..3)),
            BinOpKind::Sub,
            false,
            3..4,
            num(3.0, 4..5),
        ));
    }

    #[test]
    fn right_associative_power() {
        let mut parser = Parser::new("2^3^2");
        let expr = parser.try_parse_full::<Expr>().unwrap();
        assert_eq!(expr, bin(
            num(2.0, 0..1),
            BinOpKind::Exp,
            false,
            1..2,
            bin(num(3.0, 2..3), BinOpKind::Exp, false, 3..4, num(2.0, 4..5)),
        ));
    }

    #[test]
    fn implicit_multiplication() {
        let mut parser = Parser::new("2x^2");
        let expr = parser.try_parse_full::<Expr>().unwrap();
        assert_eq!(expr, bin(
            num(2.0, 0..1),
            BinOpKind::Mul,
            true,
            1..1,
            bin(sym("x", 1..2), BinOpKind::Exp, false, 2..3, num(2.0, 3..4)),
        ));
    }

    #[test]
    fn negation_binds_looser_than_power() {
        let mut parser = Parser::new("-x^2");
        let expr = parser.try_parse_full::<Expr>().unwrap();
        assert_eq!(expr, Expr::Unary(Unary {
            operand: Box::new(bin(sym("x", 1..2), BinOpKind::Exp, false, 2..3, num(2.0, 3..4))),
            op: UnaryOp { kind: UnaryOpKind::Neg, span: 0..1 },
            span: 0..4,
        }));
    }

    #[test]
    fn fraction_projection() {
        let mut parser = Parser::new("(1)/(2)");
        let expr = parser.try_parse_full::<Expr>().unwrap();
        assert_eq!(expr, bin(
            Expr::Paren(Paren { expr: Box::new(num(1.0, 1..2)), span: 0..3 }),
            BinOpKind::Div,
            false,
            3..4,
            Expr::Paren(Paren { expr: Box::new(num(2.0, 5..6)), span: 4..7 }),
        ));
    }

    #[test]
    fn function_call() {
        let mut parser = Parser::new("log(8, 2)");
        let expr = parser.try_parse_full::<Expr>().unwrap();
        assert_eq!(expr, Expr::Call(Call {
            name: LitSym { name: "log".to_string(), span: 0..3 },
            args: vec![num(8.0, 4..5), num(2.0, 7..8)],
            span: 0..9,
            paren_span: 3..9,
        }));
    }

    #[test]
    fn call_without_arguments() {
        let mut parser = Parser::new("sin()");
        let expr = parser.try_parse_full::<Expr>().unwrap();
        let Expr::Call(call) = expr else { panic!("expected a call") };
        assert!(call.args.is_empty());
    }

    #[test]
    fn unclosed_parenthesis() {
        let mut parser = Parser::new("(1+2");
        let err = parser.try_parse_full::<Expr>().unwrap_err();
        assert_eq!(err.kind.message(), "unclosed parenthesis");
        assert_eq!(err.spans, vec![0..1]);
    }

    #[test]
    fn stray_close_parenthesis() {
        let mut parser = Parser::new("1+2)");
        let err = parser.try_parse_full::<Expr>().unwrap_err();
        assert_eq!(err.kind.message(), "expected end of expression");
    }

    #[test]
    fn empty_parenthesis() {
        let mut parser = Parser::new("3*()");
        let err = parser.try_parse_full::<Expr>().unwrap_err();
        assert_eq!(err.kind.message(), "missing expression inside parenthesis");
    }

    #[test]
    fn dangling_operator() {
        let mut parser = Parser::new("3+");
        let err = parser.try_parse_full::<Expr>().unwrap_err();
        assert_eq!(err.kind.message(), "unexpected end of expression");
    }

    #[test]
    fn repeated_decimal_point() {
        let mut parser = Parser::new("2+1.2.3");
        let err = parser.try_parse_full::<Expr>().unwrap_err();
        assert_eq!(err.kind.message(), "invalid number `1.2.3`");
        assert_eq!(err.spans, vec![2..7]);
        assert!(err.fatal);
    }

    #[test]
    fn empty_input() {
        let mut parser = Parser::new("");
        assert!(parser.try_parse_full::<Expr>().is_err());
    }
}
