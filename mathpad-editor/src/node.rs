//! The nodes of an expression tree.

use std::{fmt, str::FromStr};
use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The value carried by the root group and by the invisible groups that wrap a slot's content.
pub const GROUP: &str = "group";

/// The value carried by a group the user typed as explicit parentheses.
pub const PARENTHESES: &str = "parentheses";

/// The value of the operator that ends one line of the expression and starts the next. Lines are
/// solved together as a system of equations.
pub const SEPARATOR: &str = ";";

/// Identifies a node in a [`Tree`](crate::tree::Tree).
///
/// Identifiers are allocated by the tree and are never reused within it, so an identifier held by
/// a host stays meaningful (or unknown) after any edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NodeId(pub(crate) u64);

impl NodeId {
    /// The identifier of the root group.
    pub const ROOT: NodeId = NodeId(0);

    /// Returns true if this is the identifier of the root group.
    pub fn is_root(self) -> bool {
        self == Self::ROOT
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_root() {
            write!(f, "root")
        } else {
            write!(f, "n{}", self.0)
        }
    }
}

/// The text is not a node identifier.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("`{0}` is not a node id; expected `root` or `n<number>`")]
pub struct ParseNodeIdError(pub String);

impl FromStr for NodeId {
    type Err = ParseNodeIdError;

    /// Parses an identifier in the form produced by [`Display`](fmt::Display).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "root" {
            return Ok(Self::ROOT);
        }
        s.strip_prefix('n')
            .and_then(|number| number.parse().ok())
            .filter(|&number| number != 0)
            .map(NodeId)
            .ok_or_else(|| ParseNodeIdError(s.to_string()))
    }
}

/// The kind of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum NodeKind {
    Number,
    Operator,
    Function,
    Fraction,
    Sqrt,
    Power,
    Variable,
    Placeholder,
    Group,
    Superscript,
    Subscript,
}

impl NodeKind {
    /// Returns true if nodes of this kind never have children.
    pub fn is_leaf(self) -> bool {
        matches!(self, Self::Number | Self::Operator | Self::Variable | Self::Placeholder)
    }

    /// Returns true if nodes of this kind can have children.
    pub fn is_container(self) -> bool {
        !self.is_leaf()
    }

    /// The number of children a populated node of this kind has, or [`None`] if it can have any
    /// number of children.
    pub fn slots(self) -> Option<usize> {
        match self {
            Self::Fraction | Self::Power => Some(2),
            Self::Sqrt | Self::Superscript | Self::Subscript => Some(1),
            Self::Function | Self::Group => None,
            Self::Number | Self::Operator | Self::Variable | Self::Placeholder => Some(0),
        }
    }

    /// Returns true if a node of this kind may have the given number of children.
    pub fn allows_children(self, count: usize) -> bool {
        match self.slots() {
            Some(slots) => count == 0 || count == slots,
            None => true,
        }
    }

    /// Returns true if each child of this kind of node stands for one whole operand. A second
    /// operand cannot be placed beside a child directly; both must be wrapped in a group first.
    pub fn owns_slots(self) -> bool {
        matches!(
            self,
            Self::Fraction | Self::Power | Self::Sqrt | Self::Superscript | Self::Subscript | Self::Function
        )
    }

    /// The name of the kind, which is also the value of structural containers.
    pub fn name(self) -> &'static str {
        match self {
            Self::Number => "number",
            Self::Operator => "operator",
            Self::Function => "function",
            Self::Fraction => "fraction",
            Self::Sqrt => "sqrt",
            Self::Power => "power",
            Self::Variable => "variable",
            Self::Placeholder => "placeholder",
            Self::Group => "group",
            Self::Superscript => "superscript",
            Self::Subscript => "subscript",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A node of an expression tree.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ExpressionNode {
    /// The identifier of the node.
    pub id: NodeId,

    /// The kind of the node.
    pub kind: NodeKind,

    /// The digits of a number, the symbol of a variable or operator, the name of a function, or
    /// the name of a structure.
    pub value: String,

    /// The children of the node, in order. A fraction's children are its numerator and
    /// denominator, and a power's are its base and exponent.
    pub children: Vec<NodeId>,

    /// The position of the caret, if this node is active.
    ///
    /// For leaves, this is a character offset into [`ExpressionNode::value`]. For containers,
    /// [`None`] places the caret inside the container and any [`Some`] value places it after the
    /// whole structure.
    pub cursor_offset: Option<usize>,
}

impl ExpressionNode {
    /// Creates a new node with no children and no caret.
    pub fn new(id: NodeId, kind: NodeKind, value: impl Into<String>) -> Self {
        Self {
            id,
            kind,
            value: value.into(),
            children: Vec::new(),
            cursor_offset: None,
        }
    }

    /// Returns true if this node is a group the user typed as parentheses.
    pub fn is_parentheses(&self) -> bool {
        self.kind == NodeKind::Group && self.value == PARENTHESES
    }

    /// Returns true if this node is an invisible group wrapping the content of a slot.
    pub fn is_slot_wrapper(&self) -> bool {
        self.kind == NodeKind::Group && self.value == GROUP && !self.id.is_root()
    }

    /// Returns true if the caret of this container is inside it, rather than after it.
    pub fn caret_inside(&self) -> bool {
        self.kind.is_container() && self.cursor_offset.is_none()
    }

    /// Returns true if another child can be appended to this container without breaking its
    /// arity.
    pub fn has_capacity(&self) -> bool {
        match self.kind.slots() {
            Some(slots) => self.children.len() < slots,
            None => self.kind.is_container(),
        }
    }

    /// The caret position at the end of this node: after the last character of a leaf, or inside
    /// a container.
    pub(crate) fn end_offset(&self) -> Option<usize> {
        if self.kind.is_leaf() {
            Some(self.value.chars().count())
        } else {
            None
        }
    }
}
