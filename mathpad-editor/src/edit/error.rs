use crate::node::{NodeId, NodeKind};
use thiserror::Error;

/// An edit command that cannot be applied. The state is left untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    #[error("there is no node {0}")]
    UnknownNode(NodeId),

    #[error("a {0} cannot be inserted as a literal")]
    NotALiteral(NodeKind),

    #[error("a {0} is not a structure")]
    NotAStructure(NodeKind),

    #[error("`{value}` is not a valid {kind}")]
    InvalidLiteral { kind: NodeKind, value: String },

    #[error("a function needs a name")]
    MissingFunctionName,
}
