use crate::node::NodeId;
use super::{EditError, EditState};
use tracing::debug;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A direction for structural navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Direction {
    /// The previous sibling.
    Left,

    /// The next sibling.
    Right,

    /// The parent.
    Up,

    /// The first child.
    Down,
}

/// A direction for cycling through every node of the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum CycleDirection {
    Forward,
    Backward,
}

impl EditState {
    /// Moves the active node in the given direction. Moving past the first or last sibling, up
    /// from the root, or down from a node without children does nothing.
    ///
    /// With no active node, moving down enters the root's first child.
    pub fn navigate(&mut self, direction: Direction) -> Result<(), EditError> {
        let Some(active) = self.active else {
            if direction == Direction::Down {
                if let Some(&first) = self.tree.children(NodeId::ROOT).first() {
                    self.activate(first);
                }
            }
            return Ok(());
        };
        if !self.tree.contains(active) {
            return Err(EditError::UnknownNode(active));
        }

        let info = self.tree.parent_info(active);
        let target = match direction {
            Direction::Left => info.and_then(|info| {
                let index = info.index.checked_sub(1)?;
                self.tree.children(info.parent).get(index).copied()
            }),
            Direction::Right => info.and_then(|info| {
                self.tree.children(info.parent).get(info.index + 1).copied()
            }),
            Direction::Up => info.map(|info| info.parent),
            Direction::Down => self.tree.children(active).first().copied(),
        };

        if let Some(target) = target {
            self.activate(target);
            debug!(?direction, from = %active, to = %target, "navigated");
        }
        Ok(())
    }

    /// Moves the active node to the next or previous node in pre-order, wrapping around at both
    /// ends. With no active node, cycling forward starts at the root and backward at the last
    /// node.
    pub fn cycle(&mut self, direction: CycleDirection) -> Result<(), EditError> {
        let order = self.tree.pre_order();
        let position = match self.active {
            Some(active) => Some(order.iter()
                .position(|&id| id == active)
                .ok_or(EditError::UnknownNode(active))?),
            None => None,
        };

        let len = order.len();
        let next = match (position, direction) {
            (None, CycleDirection::Forward) => order.first(),
            (None, CycleDirection::Backward) => order.last(),
            (Some(index), CycleDirection::Forward) => order.get((index + 1) % len),
            (Some(index), CycleDirection::Backward) => order.get((index + len - 1) % len),
        };

        if let Some(&next) = next {
            self.activate(next);
        }
        Ok(())
    }

    /// Closes the nearest parentheses enclosing the caret: the caret moves up to the parentheses
    /// group, then right. If the group is the last of its siblings, the caret is placed after
    /// the group, so that the next insertion follows it.
    ///
    /// Does nothing if the caret is not inside parentheses.
    pub fn close_paren(&mut self) -> Result<(), EditError> {
        let Some(active) = self.active else {
            return Ok(());
        };
        let node = self.tree.get(active).ok_or(EditError::UnknownNode(active))?;

        let group = if node.is_parentheses() && node.caret_inside() {
            Some(active)
        } else {
            self.tree.ancestors(active)
                .into_iter()
                .find(|&id| self.tree.get(id).is_some_and(|node| node.is_parentheses()))
        };
        let Some(group) = group else {
            debug!("no parentheses to close");
            return Ok(());
        };

        let next = self.tree.parent_info(group)
            .and_then(|info| self.tree.children(info.parent).get(info.index + 1).copied());
        match next {
            Some(next) => self.activate(next),
            None => self.activate_at(group, Some(0)),
        }
        debug!(%group, "closed parentheses");
        Ok(())
    }
}
