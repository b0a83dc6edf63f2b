use crate::node::{NodeId, NodeKind, GROUP, PARENTHESES, SEPARATOR};
use super::{EditError, EditState};
use tracing::debug;

/// Where a new node goes, relative to the active node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InsertionPoint {
    /// Appended to the root group.
    Root,

    /// In place of a placeholder.
    Replace(NodeId),

    /// Appended to a container with room left.
    Append(NodeId),

    /// Right after a node, in its parent. If `wrap` is set, the parent owns its children as
    /// slots, and the node is first wrapped in an invisible group.
    After { node: NodeId, parent: NodeId, index: usize, wrap: bool },
}

/// Checks that a value is valid for a literal of the given kind.
fn validate_literal(kind: NodeKind, value: &str) -> Result<(), EditError> {
    let valid = match kind {
        NodeKind::Number => value.chars().all(|c| c.is_ascii_digit() || c == '.'),
        NodeKind::Variable => value.chars().all(|c| c.is_ascii_alphabetic()),
        NodeKind::Operator => value != SEPARATOR && !value.chars().any(char::is_whitespace),
        kind => return Err(EditError::NotALiteral(kind)),
    };

    if valid && !value.is_empty() {
        Ok(())
    } else {
        Err(EditError::InvalidLiteral { kind, value: value.to_string() })
    }
}

impl EditState {
    /// Decides where a new node goes, evaluating these rules in order against the active node:
    ///
    /// 1. no active node: append to the root;
    /// 2. a placeholder: replace it;
    /// 3. an empty sqrt or function with the caret inside: become its first child;
    /// 4. a container with the caret inside and room left: append to it;
    /// 5. otherwise: insert right after the active node.
    fn insertion_point(&self) -> Result<InsertionPoint, EditError> {
        let Some(active) = self.active else {
            return Ok(InsertionPoint::Root);
        };
        let node = self.tree.get(active).ok_or(EditError::UnknownNode(active))?;

        if node.kind == NodeKind::Placeholder && self.tree.parent_info(active).is_some() {
            return Ok(InsertionPoint::Replace(active));
        }

        let appends = node.caret_inside() && match node.kind {
            NodeKind::Function => node.children.is_empty(),
            _ => node.has_capacity(),
        };
        if appends {
            return Ok(InsertionPoint::Append(active));
        }

        Ok(match self.tree.parent_info(active) {
            Some(info) => InsertionPoint::After {
                node: active,
                parent: info.parent,
                index: info.index,
                wrap: self.tree.get(info.parent).is_some_and(|parent| parent.kind.owns_slots()),
            },
            None => InsertionPoint::Root,
        })
    }

    /// Attaches a detached node at the given insertion point.
    fn place(&mut self, point: InsertionPoint, new: NodeId) {
        match point {
            InsertionPoint::Root => self.tree.push_child(NodeId::ROOT, new),
            InsertionPoint::Replace(placeholder) => {
                self.tree.replace_in_parent(placeholder, new);
                self.tree.remove_subtree(placeholder);
            },
            InsertionPoint::Append(container) => {
                self.tree.push_child(container, new);

                // a two-slot structure is never left with a single child
                let pad = self.tree.get(container)
                    .is_some_and(|node| node.kind.slots() == Some(2) && node.children.len() == 1);
                if pad {
                    let placeholder = self.tree.alloc(NodeKind::Placeholder, "");
                    self.tree.push_child(container, placeholder);
                }
            },
            InsertionPoint::After { node, parent, index, wrap } => {
                if wrap {
                    let wrapper = self.tree.alloc(NodeKind::Group, GROUP);
                    self.tree.replace_in_parent(node, wrapper);
                    self.tree.push_child(wrapper, node);
                    self.tree.push_child(wrapper, new);
                } else {
                    self.tree.insert_child(parent, index + 1, new);
                }
            },
        }
    }

    /// Inserts a number, operator or variable at the insertion point. The new node becomes
    /// active and selected, with the caret at its end.
    pub fn insert_literal(&mut self, kind: NodeKind, value: &str) -> Result<(), EditError> {
        validate_literal(kind, value)?;
        let point = self.insertion_point()?;

        let id = self.tree.alloc(kind, value);
        self.place(point, id);
        self.activate_and_select(id);
        debug!(%id, %kind, value, ?point, "inserted literal");
        Ok(())
    }

    /// Creates a detached structure pre-populated with placeholders, returning the structure and
    /// its first placeholder.
    fn build_structure(&mut self, kind: NodeKind, value: &str) -> (NodeId, Option<NodeId>) {
        let slots = match kind {
            NodeKind::Function => 0,
            NodeKind::Group => 1,
            kind => kind.slots().unwrap_or(0),
        };

        let id = self.tree.alloc(kind, value);
        let placeholders = (0..slots)
            .map(|_| {
                let placeholder = self.tree.alloc(NodeKind::Placeholder, "");
                self.tree.push_child(id, placeholder);
                placeholder
            })
            .collect::<Vec<_>>();
        (id, placeholders.first().copied())
    }

    /// Inserts a structure at the insertion point.
    ///
    /// Fractions and powers get two placeholders; square roots, superscripts, subscripts and
    /// parentheses (a [`NodeKind::Group`]) get one. The first placeholder becomes active. A
    /// function gets no children and becomes active itself, so that its first argument is typed
    /// directly into it.
    pub fn insert_structure(
        &mut self,
        kind: NodeKind,
        function_name: Option<&str>,
    ) -> Result<(), EditError> {
        let value = match kind {
            NodeKind::Fraction | NodeKind::Power | NodeKind::Sqrt
                | NodeKind::Superscript | NodeKind::Subscript => kind.name(),
            NodeKind::Group => PARENTHESES,
            NodeKind::Function => match function_name {
                Some(name) if !name.is_empty() && name.chars().all(|c| c.is_ascii_alphabetic()) => name,
                Some(name) if !name.is_empty() => return Err(EditError::InvalidLiteral {
                    kind,
                    value: name.to_string(),
                }),
                _ => return Err(EditError::MissingFunctionName),
            },
            kind => return Err(EditError::NotAStructure(kind)),
        };

        let point = self.insertion_point()?;
        let (id, first) = self.build_structure(kind, value);
        self.place(point, id);
        self.activate_and_select(first.unwrap_or(id));
        debug!(%id, %kind, value, ?point, "inserted structure");
        Ok(())
    }

    /// Replaces an active `/` operator with a fraction structure, whose numerator placeholder
    /// becomes active. If the active node is not a `/` operator, a fraction is inserted as usual.
    pub fn division_to_fraction(&mut self) -> Result<(), EditError> {
        let division = self.active_node()
            .filter(|node| node.kind == NodeKind::Operator && node.value == "/")
            .map(|node| node.id);
        let Some(division) = division else {
            return self.insert_structure(NodeKind::Fraction, None);
        };

        let (fraction, numerator) = self.build_structure(NodeKind::Fraction, NodeKind::Fraction.name());
        if self.tree.replace_in_parent(division, fraction).is_none() {
            self.tree.push_child(NodeId::ROOT, fraction);
        }
        self.tree.remove_subtree(division);
        self.activate_and_select(numerator.unwrap_or(fraction));
        debug!(%division, %fraction, "replaced division with fraction");
        Ok(())
    }

    /// Starts a new line. A separator is inserted into the root group, right after the top-level
    /// node holding the caret, and becomes active.
    pub fn insert_separator(&mut self) -> Result<(), EditError> {
        let top_level = self.active
            .filter(|&active| self.tree.contains(active))
            .and_then(|active| {
                std::iter::once(active)
                    .chain(self.tree.ancestors(active))
                    .take_while(|id| !id.is_root())
                    .last()
            });
        let index = top_level
            .and_then(|node| self.tree.parent_info(node))
            .map(|info| info.index + 1);

        let id = self.tree.alloc(NodeKind::Operator, SEPARATOR);
        match index {
            Some(index) => self.tree.insert_child(NodeId::ROOT, index, id),
            None => self.tree.push_child(NodeId::ROOT, id),
        }
        self.activate_and_select(id);
        debug!(%id, ?top_level, "inserted separator");
        Ok(())
    }

    /// Appends a new placeholder argument to the function enclosing the caret, and makes it
    /// active. Typing `,` in an empty function gives it an empty first argument as well.
    ///
    /// Does nothing if the caret is not inside a function.
    pub fn insert_argument(&mut self) -> Result<(), EditError> {
        let Some(active) = self.active else {
            return Ok(());
        };
        let node = self.tree.get(active).ok_or(EditError::UnknownNode(active))?;

        let function = if node.kind == NodeKind::Function && node.caret_inside() {
            Some(active)
        } else {
            self.tree.ancestors(active)
                .into_iter()
                .find(|&id| self.tree.get(id).is_some_and(|node| node.kind == NodeKind::Function))
        };
        let Some(function) = function else {
            debug!("no function to add an argument to");
            return Ok(());
        };

        if self.tree.children(function).is_empty() {
            let first = self.tree.alloc(NodeKind::Placeholder, "");
            self.tree.push_child(function, first);
        }
        let placeholder = self.tree.alloc(NodeKind::Placeholder, "");
        self.tree.push_child(function, placeholder);
        self.activate_and_select(placeholder);
        debug!(%function, %placeholder, "inserted argument");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::node::ExpressionNode;
    use pretty_assertions::assert_eq;
    use super::*;

    fn node(state: &EditState, id: NodeId) -> &ExpressionNode {
        state.tree().get(id).unwrap()
    }

    fn kinds(state: &EditState, id: NodeId) -> Vec<(NodeKind, String)> {
        state.tree()
            .children(id)
            .iter()
            .map(|&child| (node(state, child).kind, node(state, child).value.clone()))
            .collect()
    }

    #[test]
    fn appends_to_root_without_active_node() {
        let mut state = EditState::new();
        state.insert_literal(NodeKind::Number, "3").unwrap();
        let three = state.active().unwrap();
        assert_eq!(state.tree().children(NodeId::ROOT), &[three]);
        assert_eq!(state.selected(), Some(three));
        assert_eq!(node(&state, three).cursor_offset, Some(1));
    }

    #[test]
    fn siblings_follow_the_active_node() {
        let mut state = EditState::new();
        for (kind, value) in [
            (NodeKind::Number, "3"),
            (NodeKind::Operator, "+"),
            (NodeKind::Number, "4"),
        ] {
            state.insert_literal(kind, value).unwrap();
        }
        assert_eq!(kinds(&state, NodeId::ROOT), vec![
            (NodeKind::Number, "3".to_string()),
            (NodeKind::Operator, "+".to_string()),
            (NodeKind::Number, "4".to_string()),
        ]);

        // inserting after a node in the middle splices into the list
        let plus = state.tree().children(NodeId::ROOT)[1];
        state.set_active(plus).unwrap();
        state.insert_literal(NodeKind::Variable, "x").unwrap();
        let values = kinds(&state, NodeId::ROOT).into_iter().map(|(_, v)| v).collect::<Vec<_>>();
        assert_eq!(values, ["3", "+", "x", "4"]);
    }

    #[test]
    fn placeholder_is_replaced() {
        let mut state = EditState::new();
        state.insert_structure(NodeKind::Sqrt, None).unwrap();
        let placeholder = state.active().unwrap();
        let sqrt = state.tree().children(NodeId::ROOT)[0];
        assert_eq!(node(&state, placeholder).kind, NodeKind::Placeholder);

        state.insert_literal(NodeKind::Number, "9").unwrap();
        assert!(!state.tree().contains(placeholder));
        assert_eq!(kinds(&state, sqrt), vec![(NodeKind::Number, "9".to_string())]);
    }

    #[test]
    fn empty_sqrt_takes_the_number_as_child() {
        let mut state = EditState::new();
        state.insert_structure(NodeKind::Sqrt, None).unwrap();
        let sqrt = state.tree().children(NodeId::ROOT)[0];

        // commands never leave a sqrt childless, so build one by hand
        let placeholder = state.active().unwrap();
        state.tree.remove_subtree(placeholder);
        state.set_active(sqrt).unwrap();
        assert!(node(&state, sqrt).caret_inside());

        state.insert_literal(NodeKind::Number, "4").unwrap();
        let four = state.active().unwrap();
        assert_eq!(state.tree().children(sqrt), &[four]);
        assert_eq!(state.tree().children(NodeId::ROOT), &[sqrt]);
        assert_eq!(state.check_invariants(), Ok(()));
    }

    #[test]
    fn full_structure_gets_a_sibling() {
        let mut state = EditState::new();
        state.insert_structure(NodeKind::Sqrt, None).unwrap();
        state.insert_literal(NodeKind::Number, "4").unwrap();
        let sqrt = state.tree().children(NodeId::ROOT)[0];

        state.set_active(sqrt).unwrap();
        state.insert_literal(NodeKind::Operator, "+").unwrap();
        assert_eq!(state.tree().children(NodeId::ROOT).len(), 2);
        assert_eq!(state.tree().children(sqrt).len(), 1);
    }

    #[test]
    fn slot_content_is_wrapped() {
        let mut state = EditState::new();
        state.insert_structure(NodeKind::Fraction, None).unwrap();
        let fraction = state.tree().children(NodeId::ROOT)[0];
        state.insert_literal(NodeKind::Number, "1").unwrap();
        state.insert_literal(NodeKind::Operator, "+").unwrap();
        state.insert_literal(NodeKind::Variable, "x").unwrap();

        let children = state.tree().children(fraction);
        assert_eq!(children.len(), 2);
        let wrapper = node(&state, children[0]);
        assert!(wrapper.is_slot_wrapper());
        assert_eq!(kinds(&state, wrapper.id), vec![
            (NodeKind::Number, "1".to_string()),
            (NodeKind::Operator, "+".to_string()),
            (NodeKind::Variable, "x".to_string()),
        ]);
        assert_eq!(node(&state, children[1]).kind, NodeKind::Placeholder);
        assert_eq!(state.check_invariants(), Ok(()));
    }

    #[test]
    fn structures_start_with_placeholders() {
        for (kind, count) in [
            (NodeKind::Fraction, 2),
            (NodeKind::Power, 2),
            (NodeKind::Sqrt, 1),
            (NodeKind::Superscript, 1),
            (NodeKind::Subscript, 1),
            (NodeKind::Group, 1),
        ] {
            let mut state = EditState::new();
            state.insert_structure(kind, None).unwrap();
            let structure = state.tree().children(NodeId::ROOT)[0];
            let children = state.tree().children(structure);
            assert_eq!(children.len(), count, "{}", kind);
            assert_eq!(state.active(), Some(children[0]), "{}", kind);
            assert_eq!(state.check_invariants(), Ok(()));
        }

        let mut state = EditState::new();
        state.insert_structure(NodeKind::Group, None).unwrap();
        let group = state.tree().children(NodeId::ROOT)[0];
        assert!(node(&state, group).is_parentheses());
    }

    #[test]
    fn functions_take_arguments_directly() {
        let mut state = EditState::new();
        state.insert_structure(NodeKind::Function, Some("log")).unwrap();
        let log = state.active().unwrap();
        assert_eq!(node(&state, log).value, "log");
        assert!(state.tree().children(log).is_empty());

        state.insert_literal(NodeKind::Number, "8").unwrap();
        state.insert_literal(NodeKind::Number, "1").unwrap();
        assert_eq!(state.tree().children(log).len(), 1, "one argument");

        state.insert_argument().unwrap();
        state.insert_literal(NodeKind::Number, "2").unwrap();
        let args = state.tree().children(log);
        assert_eq!(args.len(), 2);
        assert_eq!(node(&state, args[1]).value, "2");
        assert_eq!(state.check_invariants(), Ok(()));
    }

    #[test]
    fn argument_in_empty_function() {
        let mut state = EditState::new();
        state.insert_structure(NodeKind::Function, Some("max")).unwrap();
        let max = state.active().unwrap();
        state.insert_argument().unwrap();
        assert_eq!(state.tree().children(max).len(), 2);
        assert_eq!(state.active(), Some(state.tree().children(max)[1]));
    }

    #[test]
    fn argument_outside_function_is_ignored() {
        let mut state = EditState::new();
        state.insert_literal(NodeKind::Number, "1").unwrap();
        let before = state.clone();
        state.insert_argument().unwrap();
        assert_eq!(state, before);
    }

    #[test]
    fn division_becomes_fraction() {
        let mut state = EditState::new();
        state.insert_literal(NodeKind::Number, "1").unwrap();
        state.insert_literal(NodeKind::Operator, "/").unwrap();
        let division = state.active().unwrap();
        state.division_to_fraction().unwrap();

        assert!(!state.tree().contains(division));
        let fraction = state.tree().children(NodeId::ROOT)[1];
        assert_eq!(node(&state, fraction).kind, NodeKind::Fraction);
        assert_eq!(state.active(), Some(state.tree().children(fraction)[0]));
        assert_eq!(state.check_invariants(), Ok(()));
    }

    #[test]
    fn rejects_bad_input() {
        let mut state = EditState::new();
        assert_eq!(
            state.insert_literal(NodeKind::Number, "1a"),
            Err(EditError::InvalidLiteral { kind: NodeKind::Number, value: "1a".to_string() }),
        );
        assert_eq!(
            state.insert_literal(NodeKind::Fraction, "1"),
            Err(EditError::NotALiteral(NodeKind::Fraction)),
        );
        assert_eq!(
            state.insert_structure(NodeKind::Number, None),
            Err(EditError::NotAStructure(NodeKind::Number)),
        );
        assert_eq!(
            state.insert_structure(NodeKind::Function, None),
            Err(EditError::MissingFunctionName),
        );
        assert!(state.tree().is_empty());
    }

    #[test]
    fn separator_goes_to_the_root() {
        let mut state = EditState::new();
        state.insert_literal(NodeKind::Variable, "x").unwrap();
        state.insert_structure(NodeKind::Fraction, None).unwrap();
        state.insert_literal(NodeKind::Number, "1").unwrap();
        let fraction = state.tree().children(NodeId::ROOT)[1];

        // the caret is inside the numerator, but the line break belongs to the root
        state.insert_separator().unwrap();
        let separator = state.active().unwrap();
        assert_eq!(state.tree().children(NodeId::ROOT)[2], separator);
        assert_eq!(node(&state, separator).value, SEPARATOR);
        assert_eq!(state.tree().children(fraction).len(), 2);

        state.insert_literal(NodeKind::Variable, "y").unwrap();
        assert_eq!(state.tree().children(NodeId::ROOT).len(), 4);
        assert_eq!(state.check_invariants(), Ok(()));
    }

    #[test]
    fn separator_in_an_empty_tree() {
        let mut state = EditState::new();
        state.insert_separator().unwrap();
        assert_eq!(kinds(&state, NodeId::ROOT), vec![(NodeKind::Operator, SEPARATOR.to_string())]);
    }

    #[test]
    fn separator_is_not_a_literal() {
        let mut state = EditState::new();
        assert_eq!(
            state.insert_literal(NodeKind::Operator, SEPARATOR),
            Err(EditError::InvalidLiteral { kind: NodeKind::Operator, value: SEPARATOR.to_string() }),
        );
    }
}
