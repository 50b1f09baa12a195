pub mod graph;
pub mod node;
mod outline;

pub use graph::{Collections, Subtree, SymbolGraph};
pub use node::{FileInfo, Node, NodeId, Payload};
