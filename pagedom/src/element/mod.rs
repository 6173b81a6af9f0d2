mod builder;
mod node;

pub use builder::{Child, Element};
pub use node::{ElementData, NodeId, NodeKind};

pub(crate) use node::{split_classes, Node};
