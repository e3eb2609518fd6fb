//! Error types for spellmark.

use std::fmt;

use crate::dom::NodeId;

/// Result type alias for spellmark operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for document-tree operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The node id does not resolve to a live node in the arena.
    NodeNotFound(NodeId),
    /// A text-node operation was attempted on an element node.
    NotATextNode(NodeId),
    /// An element-node operation was attempted on a text node.
    NotAnElement(NodeId),
    /// The node has no parent (detached or the root).
    DetachedNode(NodeId),
    /// The node already has a parent and must be detached first.
    AlreadyAttached(NodeId),
    /// Character offset past the end of a text node.
    OffsetOutOfBounds { offset: usize, len: usize },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NodeNotFound(id) => write!(f, "node {id:?} not found"),
            Self::NotATextNode(id) => write!(f, "node {id:?} is not a text node"),
            Self::NotAnElement(id) => write!(f, "node {id:?} is not an element"),
            Self::DetachedNode(id) => write!(f, "node {id:?} is detached"),
            Self::AlreadyAttached(id) => write!(f, "node {id:?} is already attached"),
            Self::OffsetOutOfBounds { offset, len } => {
                write!(f, "offset {offset} out of bounds for text of {len} chars")
            }
        }
    }
}

impl std::error::Error for Error {}
