//! A structural editor for math expressions.
//!
//! The expression being edited is a [`Tree`] of typed nodes rather than a string. Keys and
//! pointer events become commands of a [`Calculator`], which edit the tree through the
//! [`edit`] engine. The tree is projected two ways: to LaTeX for display by [`render`], and to
//! evaluable text by [`evaluable`], which `mathpad-compute` evaluates or solves.
//!
//! ```
//! use mathpad_editor::{edit::Direction, node::NodeKind, Calculator};
//!
//! let mut calculator = Calculator::new();
//! calculator.insert_structure(NodeKind::Fraction, None);
//! calculator.insert_literal(NodeKind::Number, "1");
//! calculator.navigate(Direction::Right);
//! calculator.insert_literal(NodeKind::Number, "2");
//!
//! assert_eq!(calculator.to_evaluable_string(), "(1)/(2)");
//! assert_eq!(calculator.calculate(), "0.5");
//! ```
//!
//! # Features
//!
//! - `serde`: Derives `Serialize` and `Deserialize` for nodes, trees, history entries and options.

pub mod calculator;
pub mod edit;
pub mod evaluable;
pub mod key;
pub mod node;
pub mod options;
pub mod render;
pub mod tree;

pub use calculator::{Calculator, HistoryEntry};
pub use key::{Command, Key};
pub use options::{CalculatorOptions, CalculatorOptionsBuilder};
pub use tree::Tree;
