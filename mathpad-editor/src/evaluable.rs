//! Projection of an expression tree to the linear text understood by the evaluator, such as
//! `(1)/(2)+sqrt(4)`.

use crate::{
    node::{ExpressionNode, NodeId, NodeKind, SEPARATOR},
    tree::Tree,
};

/// Converts the tree to evaluable text.
///
/// Empty slots become `0`. Structures are fully parenthesized, so the text never depends on the
/// evaluator's operator precedence to keep a fraction or power together.
pub fn to_evaluable(tree: &Tree) -> String {
    node(tree, NodeId::ROOT)
}

fn node(tree: &Tree, id: NodeId) -> String {
    let Some(node) = tree.get(id) else {
        return String::new();
    };

    match node.kind {
        NodeKind::Operator if node.value == SEPARATOR => "\n".to_string(),
        NodeKind::Number | NodeKind::Variable | NodeKind::Operator => node.value.clone(),
        NodeKind::Placeholder => "0".to_string(),
        NodeKind::Function => {
            let args = node.children.iter()
                .map(|&child| self::node(tree, child))
                .collect::<Vec<_>>()
                .join(",");
            format!("{}({})", node.value, args)
        },
        NodeKind::Fraction => match node.children.as_slice() {
            [numerator, denominator] => format!(
                "({})/({})",
                self::node(tree, *numerator),
                self::node(tree, *denominator),
            ),
            _ => "0".to_string(),
        },
        NodeKind::Power => match node.children.as_slice() {
            [base, exponent] => format!("({})^({})", self::node(tree, *base), self::node(tree, *exponent)),
            _ => "0".to_string(),
        },
        NodeKind::Sqrt => format!("sqrt({})", slot(tree, node)),
        NodeKind::Superscript => match node.children.first() {
            Some(&child) => format!("^({})", self::node(tree, child)),
            None => String::new(),
        },
        NodeKind::Subscript => String::new(),
        NodeKind::Group => {
            let children = sequence(tree, node);
            if node.id.is_root() {
                children
            } else {
                format!("({})", children)
            }
        },
    }
}

/// The content of a single-slot structure, or `0` if it is empty.
fn slot(tree: &Tree, node: &ExpressionNode) -> String {
    match node.children.first() {
        Some(&child) => self::node(tree, child),
        None => "0".to_string(),
    }
}

/// Concatenates the children of a group.
///
/// Adjacent variables are separate nodes, but `xy` would read as a single name, and `x(` as a
/// call to a function named `x`. An explicit `*` goes between a variable and whatever follows it
/// when the following text starts with a letter or an opening parenthesis.
fn sequence(tree: &Tree, node: &ExpressionNode) -> String {
    let mut out = String::new();
    let mut after_variable = false;
    for &child in &node.children {
        let text = self::node(tree, child);
        let joins = text.starts_with(|c: char| c.is_ascii_alphabetic() || c == '(');
        if after_variable && joins {
            out.push('*');
        }
        out.push_str(&text);

        if !text.is_empty() {
            after_variable = tree.get(child).is_some_and(|child| child.kind == NodeKind::Variable);
        }
    }
    out
}
