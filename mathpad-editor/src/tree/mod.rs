//! The expression tree store.
//!
//! A [`Tree`] is an arena of [`ExpressionNode`]s keyed by [`NodeId`]. Nodes do not store their
//! parent; [`Tree::parent_info`] finds it by scanning the arena, which is cheap at the size of a
//! hand-typed expression.

mod error;

use crate::node::{ExpressionNode, NodeId, NodeKind, GROUP};
use std::collections::{BTreeMap, HashMap};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub use error::StructuralViolation;

/// The position of a node within its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParentInfo {
    /// The parent of the node.
    pub parent: NodeId,

    /// The index of the node in its parent's children.
    pub index: usize,
}

/// An expression tree.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Tree {
    nodes: BTreeMap<NodeId, ExpressionNode>,
    next_id: u64,
}

impl Default for Tree {
    fn default() -> Self {
        Self::new()
    }
}

impl Tree {
    /// Creates a tree holding only an empty root group.
    pub fn new() -> Self {
        let root = ExpressionNode::new(NodeId::ROOT, NodeKind::Group, GROUP);
        Self {
            nodes: BTreeMap::from([(NodeId::ROOT, root)]),
            next_id: 1,
        }
    }

    /// Removes every node except the root, and empties the root. The identifier allocator is
    /// kept, so identifiers are not reused.
    pub(crate) fn clear(&mut self) {
        self.nodes.retain(|id, _| id.is_root());
        if let Some(root) = self.get_mut(NodeId::ROOT) {
            root.children.clear();
            root.cursor_offset = None;
        }
    }

    /// Returns the node with the given identifier.
    pub fn get(&self, id: NodeId) -> Option<&ExpressionNode> {
        self.nodes.get(&id)
    }

    pub(crate) fn get_mut(&mut self, id: NodeId) -> Option<&mut ExpressionNode> {
        self.nodes.get_mut(&id)
    }

    /// Returns the root group.
    pub fn root(&self) -> Option<&ExpressionNode> {
        self.get(NodeId::ROOT)
    }

    /// Returns true if the tree contains a node with the given identifier.
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Returns the number of nodes in the tree, including the root.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the root group has no children.
    pub fn is_empty(&self) -> bool {
        self.children(NodeId::ROOT).is_empty()
    }

    /// Returns the children of the given node, or an empty slice if the node does not exist.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map(|node| node.children.as_slice()).unwrap_or_default()
    }

    /// Returns an iterator over every node in the tree, in identifier order.
    pub fn nodes(&self) -> impl Iterator<Item = &ExpressionNode> {
        self.nodes.values()
    }

    /// Finds the parent of the given node and the node's index within it. Returns [`None`] for
    /// the root and for unknown identifiers.
    pub fn parent_info(&self, id: NodeId) -> Option<ParentInfo> {
        self.nodes.values().find_map(|node| {
            node.children.iter()
                .position(|&child| child == id)
                .map(|index| ParentInfo { parent: node.id, index })
        })
    }

    /// Returns the ancestors of the given node, nearest first.
    pub fn ancestors(&self, id: NodeId) -> Vec<NodeId> {
        let mut ancestors = Vec::new();
        let mut current = id;
        while let Some(ParentInfo { parent, .. }) = self.parent_info(current) {
            // a cycle would only be possible in a tree that already fails `check_invariants`
            if ancestors.contains(&parent) {
                break;
            }
            ancestors.push(parent);
            current = parent;
        }
        ancestors
    }

    /// Returns true if both trees have the same nodes with the same content, ignoring the caret.
    pub fn same_structure(&self, other: &Tree) -> bool {
        self.nodes.len() == other.nodes.len()
            && self.nodes.values().zip(other.nodes.values()).all(|(a, b)| {
                a.id == b.id && a.kind == b.kind && a.value == b.value && a.children == b.children
            })
    }

    /// Returns every node reachable from the root, depth-first with parents before children.
    pub fn pre_order(&self) -> Vec<NodeId> {
        self.descendants(NodeId::ROOT)
    }

    /// Returns the given node followed by its whole subtree, in pre-order. Returns an empty list
    /// for unknown identifiers.
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut order = Vec::new();
        if !self.contains(id) {
            return order;
        }

        let mut stack = vec![id];
        while let Some(id) = stack.pop() {
            if order.contains(&id) {
                continue;
            }
            order.push(id);
            stack.extend(self.children(id).iter().rev().filter(|&&child| self.contains(child)));
        }
        order
    }

    /// Adds a detached node to the arena and returns its identifier. The caller is responsible
    /// for attaching it.
    pub(crate) fn alloc(&mut self, kind: NodeKind, value: impl Into<String>) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        self.nodes.insert(id, ExpressionNode::new(id, kind, value));
        id
    }

    /// Inserts a child into the given parent at the given index, clamped to the end.
    pub(crate) fn insert_child(&mut self, parent: NodeId, index: usize, child: NodeId) {
        if let Some(node) = self.get_mut(parent) {
            let index = index.min(node.children.len());
            node.children.insert(index, child);
        }
    }

    /// Appends a child to the given parent.
    pub(crate) fn push_child(&mut self, parent: NodeId, child: NodeId) {
        if let Some(node) = self.get_mut(parent) {
            node.children.push(child);
        }
    }

    /// Puts `new` in the place of `old` in old's parent. The old node stays in the arena,
    /// detached.
    pub(crate) fn replace_in_parent(&mut self, old: NodeId, new: NodeId) -> Option<ParentInfo> {
        let info = self.parent_info(old)?;
        if let Some(slot) = self.get_mut(info.parent).and_then(|parent| parent.children.get_mut(info.index)) {
            *slot = new;
        }
        Some(info)
    }

    /// Detaches the given node from its parent and removes it and its whole subtree from the
    /// arena. Returns the removed identifiers. The root is never removed.
    pub(crate) fn remove_subtree(&mut self, id: NodeId) -> Vec<NodeId> {
        if id.is_root() {
            return Vec::new();
        }

        if let Some(info) = self.parent_info(id) {
            if let Some(parent) = self.get_mut(info.parent) {
                parent.children.remove(info.index);
            }
        }

        let removed = self.descendants(id);
        for id in &removed {
            self.nodes.remove(id);
        }
        removed
    }

    /// Checks the structural invariants of the tree: a single root group, every other node with
    /// exactly one parent and reachable from the root, and every node with a valid number of
    /// children for its kind.
    pub fn check_invariants(&self) -> Result<(), StructuralViolation> {
        let root = self.root().ok_or(StructuralViolation::MissingRoot)?;
        if root.kind != NodeKind::Group {
            return Err(StructuralViolation::RootNotGroup(root.kind));
        }

        let mut parents = HashMap::new();
        for node in self.nodes.values() {
            if !node.kind.allows_children(node.children.len()) {
                return Err(StructuralViolation::Arity {
                    id: node.id,
                    kind: node.kind,
                    count: node.children.len(),
                });
            }

            for &child in &node.children {
                if !self.contains(child) {
                    return Err(StructuralViolation::UnknownChild { parent: node.id, child });
                }
                if child.is_root() {
                    return Err(StructuralViolation::RootHasParent(node.id));
                }
                if parents.insert(child, node.id).is_some() {
                    return Err(StructuralViolation::MultipleParents(child));
                }
            }
        }

        let reachable = self.pre_order();
        if let Some(orphan) = self.nodes.keys().find(|id| !reachable.contains(id)) {
            return Err(StructuralViolation::Orphan(*orphan));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    /// Builds `root[3, fraction[1, 2]]`.
    fn sample() -> (Tree, [NodeId; 4]) {
        let mut tree = Tree::new();
        let three = tree.alloc(NodeKind::Number, "3");
        let fraction = tree.alloc(NodeKind::Fraction, "fraction");
        let one = tree.alloc(NodeKind::Number, "1");
        let two = tree.alloc(NodeKind::Number, "2");
        tree.push_child(NodeId::ROOT, three);
        tree.push_child(NodeId::ROOT, fraction);
        tree.push_child(fraction, one);
        tree.push_child(fraction, two);
        (tree, [three, fraction, one, two])
    }

    #[test]
    fn new_tree() {
        let tree = Tree::new();
        assert_eq!(tree.len(), 1);
        assert!(tree.is_empty());
        assert_eq!(tree.check_invariants(), Ok(()));
        assert_eq!(tree.parent_info(NodeId::ROOT), None);
    }

    #[test]
    fn parent_lookup() {
        let (tree, [three, fraction, _, two]) = sample();
        assert_eq!(tree.parent_info(three), Some(ParentInfo { parent: NodeId::ROOT, index: 0 }));
        assert_eq!(tree.parent_info(two), Some(ParentInfo { parent: fraction, index: 1 }));
        assert_eq!(tree.parent_info(NodeId(99)), None);
        assert_eq!(tree.ancestors(two), vec![fraction, NodeId::ROOT]);
    }

    #[test]
    fn traversal() {
        let (tree, [three, fraction, one, two]) = sample();
        assert_eq!(tree.pre_order(), vec![NodeId::ROOT, three, fraction, one, two]);
        assert_eq!(tree.descendants(fraction), vec![fraction, one, two]);
        assert_eq!(tree.descendants(NodeId(99)), vec![]);
    }

    #[test]
    fn remove_subtree() {
        let (mut tree, [three, fraction, one, two]) = sample();
        assert_eq!(tree.remove_subtree(fraction), vec![fraction, one, two]);
        assert_eq!(tree.children(NodeId::ROOT), &[three]);
        assert_eq!(tree.len(), 2);
        assert_eq!(tree.check_invariants(), Ok(()));

        assert_eq!(tree.remove_subtree(NodeId::ROOT), vec![]);
        assert!(tree.contains(NodeId::ROOT));
    }

    #[test]
    fn ids_are_not_reused() {
        let (mut tree, [three, ..]) = sample();
        tree.remove_subtree(three);
        let next = tree.alloc(NodeKind::Number, "4");
        assert_ne!(next, three);
        assert!(next > three);
    }

    #[test]
    fn detects_violations() {
        let (mut tree, [three, fraction, one, _]) = sample();
        tree.get_mut(fraction).unwrap().children.pop();
        assert_eq!(
            tree.check_invariants(),
            Err(StructuralViolation::Arity { id: fraction, kind: NodeKind::Fraction, count: 1 }),
        );

        let (mut tree, [three_b, ..]) = sample();
        tree.push_child(NodeId::ROOT, three_b);
        assert_eq!(tree.check_invariants(), Err(StructuralViolation::MultipleParents(three_b)));

        let (mut tree, _) = sample();
        let orphan = tree.alloc(NodeKind::Variable, "x");
        assert_eq!(tree.check_invariants(), Err(StructuralViolation::Orphan(orphan)));

        let (mut tree, _) = sample();
        tree.push_child(three, NodeId(42));
        assert_eq!(tree.check_invariants(), Err(StructuralViolation::Arity {
            id: three,
            kind: NodeKind::Number,
            count: 1,
        }));

        let (mut tree, _) = sample();
        tree.get_mut(one).unwrap().kind = NodeKind::Group;
        tree.push_child(one, NodeId(42));
        assert_eq!(
            tree.check_invariants(),
            Err(StructuralViolation::UnknownChild { parent: one, child: NodeId(42) }),
        );
    }

    #[test]
    fn replace_in_parent() {
        let (mut tree, [three, ..]) = sample();
        let x = tree.alloc(NodeKind::Variable, "x");
        assert_eq!(tree.replace_in_parent(three, x), Some(ParentInfo { parent: NodeId::ROOT, index: 0 }));
        tree.remove_subtree(three);
        assert_eq!(tree.children(NodeId::ROOT)[0], x);
        assert_eq!(tree.check_invariants(), Ok(()));
    }
}
