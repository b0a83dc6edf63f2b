use crate::node::{NodeId, NodeKind};
use super::{EditError, EditState};
use tracing::debug;

impl EditState {
    /// Makes the given node active and selected, with the caret after it.
    fn activate_after(&mut self, id: NodeId) {
        let offset = self.tree.get(id)
            .map(|node| node.end_offset().unwrap_or(0));
        self.activate_at(id, offset);
        self.selected = Some(id);
    }

    /// Puts a fresh placeholder in place of the given node, removes the node's subtree, and makes
    /// the placeholder active.
    fn replace_with_placeholder(&mut self, id: NodeId) {
        let placeholder = self.tree.alloc(NodeKind::Placeholder, "");
        self.tree.replace_in_parent(id, placeholder);
        self.tree.remove_subtree(id);
        self.activate_and_select(placeholder);
    }

    /// Deletes the active node.
    ///
    /// - Inside a slot of a fraction, power, square root, superscript or subscript, a node is
    /// replaced by a placeholder, and deleting a placeholder deletes the whole structure.
    /// - If the node is the last one in an invisible slot wrapper, the wrapper is replaced by a
    /// placeholder.
    /// - Otherwise, the node and its subtree are removed, and the caret moves to the previous
    /// sibling, the first remaining sibling, or the parent, in that order of preference.
    ///
    /// Does nothing if there is no active node or the root is active.
    pub fn delete(&mut self) -> Result<(), EditError> {
        let Some(active) = self.active else {
            return Ok(());
        };
        if !self.tree.contains(active) {
            return Err(EditError::UnknownNode(active));
        }
        if !active.is_root() {
            self.delete_node(active);
        }
        Ok(())
    }

    fn delete_node(&mut self, target: NodeId) {
        let Some(info) = self.tree.parent_info(target) else {
            return;
        };
        let Some((in_slot, emptied_wrapper)) = self.tree.get(info.parent)
            .map(|parent| (
                parent.kind.slots().is_some(),
                parent.is_slot_wrapper() && parent.children.len() == 1,
            ))
        else {
            return;
        };
        let is_placeholder = self.tree.get(target)
            .is_some_and(|node| node.kind == NodeKind::Placeholder);

        if in_slot {
            if is_placeholder {
                debug!(%target, structure = %info.parent, "deleting empty slot's structure");
                self.delete_node(info.parent);
            } else {
                debug!(%target, "clearing slot");
                self.replace_with_placeholder(target);
            }
            return;
        }

        if emptied_wrapper {
            debug!(%target, wrapper = %info.parent, "clearing wrapped slot");
            self.replace_with_placeholder(info.parent);
            return;
        }

        let removed = self.tree.remove_subtree(target);
        debug!(%target, removed = removed.len(), "deleted subtree");

        let siblings = self.tree.children(info.parent);
        let next = match info.index.checked_sub(1) {
            Some(previous) => siblings.get(previous),
            None => siblings.first(),
        };
        match next.copied() {
            Some(sibling) => self.activate_after(sibling),
            None => {
                self.activate_at(info.parent, None);
                self.selected = Some(info.parent);
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::edit::Direction;
    use pretty_assertions::assert_eq;
    use super::*;

    /// Types `1 + fraction(2 / 3x)` into the root, and returns the state with the fraction.
    fn with_fraction() -> (EditState, NodeId) {
        let mut state = EditState::new();
        state.insert_literal(NodeKind::Number, "1").unwrap();
        state.insert_literal(NodeKind::Operator, "+").unwrap();
        state.insert_structure(NodeKind::Fraction, None).unwrap();
        let fraction = state.tree().children(NodeId::ROOT)[2];
        state.insert_literal(NodeKind::Number, "2").unwrap();
        state.navigate(Direction::Right).unwrap();
        state.insert_literal(NodeKind::Number, "3").unwrap();
        state.insert_literal(NodeKind::Variable, "x").unwrap();
        (state, fraction)
    }

    #[test]
    fn deletes_subtrees_recursively() {
        let (mut state, fraction) = with_fraction();
        let subtree = state.tree().descendants(fraction);
        assert_eq!(subtree.len(), 5, "fraction, 2, wrapper, 3, x");
        let plus = state.tree().children(NodeId::ROOT)[1];

        state.set_active(fraction).unwrap();
        state.delete().unwrap();
        for id in subtree {
            assert!(!state.tree().contains(id), "{} should be removed", id);
        }
        assert_eq!(state.active(), Some(plus));
        assert_eq!(state.tree().len(), 3);
        assert_eq!(state.check_invariants(), Ok(()));
    }

    #[test]
    fn first_child_falls_back_to_sibling_then_parent() {
        let mut state = EditState::new();
        state.insert_structure(NodeKind::Group, None).unwrap();
        let group = state.tree().children(NodeId::ROOT)[0];
        state.insert_literal(NodeKind::Number, "4").unwrap();
        state.insert_literal(NodeKind::Number, "5").unwrap();
        let [four, five] = [state.tree().children(group)[0], state.tree().children(group)[1]];

        state.set_active(four).unwrap();
        state.delete().unwrap();
        assert_eq!(state.active(), Some(five));

        state.delete().unwrap();
        assert_eq!(state.active(), Some(group));
        assert!(state.tree().get(group).unwrap().caret_inside());
        assert_eq!(state.check_invariants(), Ok(()));
    }

    #[test]
    fn slot_content_becomes_placeholder() {
        let mut state = EditState::new();
        state.insert_structure(NodeKind::Power, None).unwrap();
        let power = state.tree().children(NodeId::ROOT)[0];
        state.insert_literal(NodeKind::Variable, "x").unwrap();

        state.delete().unwrap();
        let base = state.tree().children(power)[0];
        assert_eq!(state.tree().get(base).unwrap().kind, NodeKind::Placeholder);
        assert_eq!(state.active(), Some(base));
        assert_eq!(state.tree().children(power).len(), 2);

        // deleting the empty slot removes the whole power
        state.delete().unwrap();
        assert!(!state.tree().contains(power));
        assert!(state.tree().is_empty());
        assert_eq!(state.active(), Some(NodeId::ROOT));
        assert_eq!(state.check_invariants(), Ok(()));
    }

    #[test]
    fn emptied_wrapper_becomes_placeholder() {
        let (mut state, fraction) = with_fraction();
        let denominator = state.tree().children(fraction)[1];
        assert!(state.tree().get(denominator).unwrap().is_slot_wrapper());

        state.delete().unwrap();
        assert_eq!(state.tree().children(denominator).len(), 1);
        state.delete().unwrap();

        assert!(!state.tree().contains(denominator));
        let placeholder = state.tree().children(fraction)[1];
        assert_eq!(state.tree().get(placeholder).unwrap().kind, NodeKind::Placeholder);
        assert_eq!(state.active(), Some(placeholder));
        assert_eq!(state.check_invariants(), Ok(()));
    }

    #[test]
    fn nested_structures_shrink_one_level_at_a_time() {
        let mut state = EditState::new();
        state.insert_structure(NodeKind::Sqrt, None).unwrap();
        let sqrt = state.tree().children(NodeId::ROOT)[0];
        state.insert_structure(NodeKind::Fraction, None).unwrap();
        let fraction = state.tree().children(sqrt)[0];

        state.delete().unwrap();
        assert!(!state.tree().contains(fraction));
        let placeholder = state.tree().children(sqrt)[0];
        assert_eq!(state.active(), Some(placeholder));
        assert_eq!(state.check_invariants(), Ok(()));
    }

    #[test]
    fn function_arguments_are_removed() {
        let mut state = EditState::new();
        state.insert_structure(NodeKind::Function, Some("sin")).unwrap();
        let sin = state.active().unwrap();
        state.insert_literal(NodeKind::Variable, "x").unwrap();

        state.delete().unwrap();
        assert!(state.tree().children(sin).is_empty());
        assert_eq!(state.active(), Some(sin));
        assert_eq!(state.check_invariants(), Ok(()));
    }

    #[test]
    fn root_is_never_deleted() {
        let mut state = EditState::new();
        state.delete().unwrap();
        state.set_active(NodeId::ROOT).unwrap();
        state.delete().unwrap();
        assert!(state.tree().contains(NodeId::ROOT));
        assert_eq!(state.active(), Some(NodeId::ROOT));
    }
}
