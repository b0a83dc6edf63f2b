use crate::node::{NodeId, NodeKind};
use thiserror::Error;

/// A broken structural invariant of a [`Tree`](super::Tree).
///
/// The editing engine never produces these; they indicate a bug in the engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StructuralViolation {
    #[error("the tree has no root group")]
    MissingRoot,

    #[error("the root node is a {0}, not a group")]
    RootNotGroup(NodeKind),

    #[error("the root node is the child of {0}")]
    RootHasParent(NodeId),

    #[error("node {parent} lists {child} as a child, but {child} does not exist")]
    UnknownChild { parent: NodeId, child: NodeId },

    #[error("node {0} has more than one parent")]
    MultipleParents(NodeId),

    #[error("node {0} is not reachable from the root")]
    Orphan(NodeId),

    #[error("{kind} node {id} has {count} children")]
    Arity { id: NodeId, kind: NodeKind, count: usize },

    #[error("the cursor refers to {0}, which does not exist")]
    DanglingCursor(NodeId),
}
