//! Projection of an expression tree to LaTeX markup, with the caret and hover highlight drawn in.
//!
//! The output targets KaTeX. The caret is drawn from the active node's
//! [`cursor_offset`](crate::node::ExpressionNode::cursor_offset) while walking the tree, so no
//! markup is ever edited after it is produced.

use crate::{
    node::{ExpressionNode, NodeId, NodeKind, SEPARATOR},
    tree::Tree,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The caret glyph.
pub const CARET: &str = r"\textcolor{blue}{|}";

/// The glyph of an empty slot.
pub const PLACEHOLDER: &str = r"\square ";

/// Functions rendered with their own LaTeX operator, such as `\sin`.
const NAMED_OPERATORS: [&str; 12] = [
    "sin", "cos", "tan", "cot", "sec", "csc",
    "arcsin", "arccos", "arctan",
    "sinh", "cosh", "tanh",
];

/// Options for [`render`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RenderOptions {
    /// Wraps every node in `\htmlId{mp-<id>}{...}`, so that a host can map pointer events on the
    /// rendered output back to nodes. KaTeX needs its `trust` option enabled to honor `\htmlId`.
    pub node_ids: bool,
}

/// Renders the tree to LaTeX, drawing the caret in the active node and highlighting the hovered
/// node.
pub fn render(
    tree: &Tree,
    active: Option<NodeId>,
    hover: Option<NodeId>,
    options: RenderOptions,
) -> String {
    Renderer { tree, active, hover, options }.node(NodeId::ROOT)
}

/// Renders a function name, as a named operator if LaTeX has one.
fn function_name(name: &str) -> String {
    let name = match name {
        "asin" => "arcsin",
        "acos" => "arccos",
        "atan" => "arctan",
        name => name,
    };
    if NAMED_OPERATORS.contains(&name) {
        format!(r"\{}", name)
    } else {
        format!(r"\operatorname{{{}}}", name)
    }
}

/// Inserts the caret into a literal at a character offset. A missing offset places the caret at
/// the end.
fn splice_caret(value: &str, offset: Option<usize>) -> String {
    let at = offset
        .and_then(|offset| value.char_indices().nth(offset))
        .map(|(index, _)| index)
        .unwrap_or(value.len());
    format!("{}{}{}", &value[..at], CARET, &value[at..])
}

struct Renderer<'a> {
    tree: &'a Tree,
    active: Option<NodeId>,
    hover: Option<NodeId>,
    options: RenderOptions,
}

impl Renderer<'_> {
    fn node(&self, id: NodeId) -> String {
        let Some(node) = self.tree.get(id) else {
            return String::new();
        };

        let body = self.body(node, self.active == Some(id));
        let body = if self.hover == Some(id) {
            format!(r"\textcolor{{orange}}{{{}}}", body)
        } else {
            body
        };

        if self.options.node_ids {
            format!(r"\htmlId{{mp-{}}}{{{}}}", id, body)
        } else {
            body
        }
    }

    /// Renders the children of a node, joined by the separator.
    fn children(&self, node: &ExpressionNode, separator: &str) -> String {
        node.children.iter()
            .map(|&child| self.node(child))
            .collect::<Vec<_>>()
            .join(separator)
    }

    /// Renders the given slot of a structure. When the structure is active and empty, the caret
    /// goes in its first slot.
    fn slot(&self, node: &ExpressionNode, index: usize, active: bool) -> String {
        match node.children.get(index) {
            Some(&child) => self.node(child),
            None if active && index == 0 && node.caret_inside() => CARET.to_string(),
            None => String::new(),
        }
    }

    fn body(&self, node: &ExpressionNode, active: bool) -> String {
        match node.kind {
            NodeKind::Number | NodeKind::Variable => if active {
                splice_caret(&node.value, node.cursor_offset)
            } else {
                node.value.clone()
            },
            NodeKind::Operator => {
                let symbol = match node.value.as_str() {
                    "*" => r"\times ",
                    "/" => r"\div ",
                    SEPARATOR => r"\newline ",
                    value => value,
                };
                if active {
                    format!("{}{}", CARET, symbol)
                } else {
                    symbol.to_string()
                }
            },
            NodeKind::Placeholder => if active {
                format!("{}{}", PLACEHOLDER, CARET)
            } else {
                PLACEHOLDER.to_string()
            },
            NodeKind::Function => {
                let args = self.children(node, ",");
                let name = function_name(&node.value);
                match (active, node.caret_inside()) {
                    (true, true) => format!(r"{}\left({}{}\right)", name, args, CARET),
                    (true, false) => format!(r"{}\left({}\right){}", name, args, CARET),
                    (false, _) => format!(r"{}\left({}\right)", name, args),
                }
            },
            NodeKind::Group if node.id.is_root() => {
                let children = self.children(node, "");
                if active {
                    format!("{}{}", children, CARET)
                } else {
                    children
                }
            },
            NodeKind::Group if node.is_parentheses() => {
                let children = self.children(node, "");
                match (active, node.caret_inside()) {
                    (true, true) => format!(r"\left({}{}\right)", children, CARET),
                    (true, false) => format!(r"\left({}\right){}", children, CARET),
                    (false, _) => format!(r"\left({}\right)", children),
                }
            },
            NodeKind::Group => {
                let children = self.children(node, "");
                if active {
                    format!("{}{}", children, CARET)
                } else {
                    children
                }
            },
            NodeKind::Fraction | NodeKind::Power | NodeKind::Sqrt
                | NodeKind::Superscript | NodeKind::Subscript => {
                let first = self.slot(node, 0, active);
                let structure = match node.kind {
                    NodeKind::Fraction => format!(r"\frac{{{}}}{{{}}}", first, self.slot(node, 1, active)),
                    NodeKind::Power => format!("{{{}}}^{{{}}}", first, self.slot(node, 1, active)),
                    NodeKind::Sqrt => format!(r"\sqrt{{{}}}", first),
                    NodeKind::Superscript => format!("^{{{}}}", first),
                    _ => format!("_{{{}}}", first),
                };

                let caret_after = active && (!node.caret_inside() || !node.children.is_empty());
                if caret_after {
                    format!("{}{}", structure, CARET)
                } else {
                    structure
                }
            },
        }
    }
}
