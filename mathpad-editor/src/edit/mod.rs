//! The tree editing engine.
//!
//! An [`EditState`] is one snapshot of the editor: the tree, the active node receiving input and
//! the selected node. Every command is a method that mutates the snapshot in place; the
//! [`Calculator`](crate::Calculator) applies commands to a clone and commits the clone only if
//! the command succeeds, so a failed command never leaves a half-edited tree behind.
//!
//! New nodes are placed by the insertion-point policy of [`EditState::insert_literal`].

mod delete;
mod error;
mod insert;
mod navigate;

use crate::{
    node::{ExpressionNode, NodeId},
    tree::{StructuralViolation, Tree},
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub use error::EditError;
pub use navigate::{CycleDirection, Direction};

/// A snapshot of the editor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EditState {
    /// The expression tree.
    pub(crate) tree: Tree,

    /// The node receiving input.
    pub(crate) active: Option<NodeId>,

    /// The node marked as selected.
    pub(crate) selected: Option<NodeId>,
}

impl EditState {
    /// Creates an empty state: an empty root and no active node.
    pub fn new() -> Self {
        Self::default()
    }

    /// The expression tree.
    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    /// The node receiving input, if any.
    pub fn active(&self) -> Option<NodeId> {
        self.active
    }

    /// The active node itself, if any.
    pub fn active_node(&self) -> Option<&ExpressionNode> {
        self.active.and_then(|id| self.tree.get(id))
    }

    /// The selected node, if any.
    pub fn selected(&self) -> Option<NodeId> {
        self.selected
    }

    /// Makes the given node active with the given caret position. The caret of the previously
    /// active node is cleared.
    fn activate_at(&mut self, id: NodeId, offset: Option<usize>) {
        if let Some(previous) = self.active.and_then(|id| self.tree.get_mut(id)) {
            previous.cursor_offset = None;
        }
        if let Some(node) = self.tree.get_mut(id) {
            node.cursor_offset = offset;
        }
        self.active = Some(id);
    }

    /// Makes the given node active, with the caret at its end.
    fn activate(&mut self, id: NodeId) {
        let offset = self.tree.get(id).and_then(ExpressionNode::end_offset);
        self.activate_at(id, offset);
    }

    /// Makes the given node active and selected, with the caret at its end.
    fn activate_and_select(&mut self, id: NodeId) {
        self.activate(id);
        self.selected = Some(id);
    }

    /// Makes the given node active and selected, as if the user clicked it.
    pub fn set_active(&mut self, id: NodeId) -> Result<(), EditError> {
        if !self.tree.contains(id) {
            return Err(EditError::UnknownNode(id));
        }
        self.activate_and_select(id);
        Ok(())
    }

    /// Makes the given node active and selected, with the caret at a specific position.
    ///
    /// For leaves, the offset is a character offset into the node's value and is clamped to its
    /// length. For containers, any offset places the caret after the structure.
    pub fn set_active_at(&mut self, id: NodeId, offset: usize) -> Result<(), EditError> {
        let node = self.tree.get(id).ok_or(EditError::UnknownNode(id))?;
        let offset = match node.end_offset() {
            Some(end) => offset.min(end),
            None => offset,
        };
        self.activate_at(id, Some(offset));
        self.selected = Some(id);
        Ok(())
    }

    /// Clears the tree and the cursor. Identifiers handed out before clearing are not reused.
    pub fn clear(&mut self) {
        self.tree.clear();
        self.active = None;
        self.selected = None;
    }

    /// Checks the structural invariants of the tree, and that the cursor points into it.
    pub fn check_invariants(&self) -> Result<(), StructuralViolation> {
        self.tree.check_invariants()?;
        for id in [self.active, self.selected].into_iter().flatten() {
            if !self.tree.contains(id) {
                return Err(StructuralViolation::DanglingCursor(id));
            }
        }
        Ok(())
    }
}
