//! Error types

use crate::element::NodeId;

/// Errors raised by document operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomError {
    /// The node was removed from the document (or never belonged to it).
    #[error("node {0:?} does not exist")]
    NodeNotFound(NodeId),

    /// The operation needs an element but the node is a text node.
    #[error("node {0:?} is not an element")]
    NotAnElement(NodeId),

    /// A selector could not be parsed.
    #[error("invalid selector `{selector}`: {reason}")]
    InvalidSelector { selector: String, reason: String },

    /// A markup fragment could not be parsed.
    #[error("invalid markup at byte {position}: {message}")]
    Markup { position: u64, message: String },

    /// The requested tree mutation would produce an invalid tree.
    #[error("hierarchy request error: {0}")]
    HierarchyRequest(String),
}

impl DomError {
    pub(crate) fn selector(selector: &str, reason: impl Into<String>) -> Self {
        Self::InvalidSelector {
            selector: selector.to_string(),
            reason: reason.into(),
        }
    }
}

/// Result alias for document operations.
pub type Result<T> = std::result::Result<T, DomError>;
