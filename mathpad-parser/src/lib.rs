//! Tokenizer and parser for the *evaluable form* of a mathpad expression: the flat infix string
//! produced by projecting an expression tree, such as `(1)/(2)+sqrt(3x)`.
//!
//! The grammar is intentionally small. It covers numbers, symbols, function calls, parentheses,
//! the binary operators `+ - * / ^`, unary `+` / `-`, and implicit multiplication (`2x`,
//! `3(x+1)`). Equation splitting on `=` happens before parsing, in `mathpad-compute`.

pub mod parser;
pub mod tokenizer;
