pub mod graph;
pub mod symbol;

pub use graph::*;
pub use symbol::*;
