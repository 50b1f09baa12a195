pub mod audit;
pub mod config;
pub mod discover;
pub mod doxygen;
pub mod emit;
pub mod error;
pub mod logging;
pub mod model;
pub mod pipeline;
pub mod reparent;
pub mod scope;
pub mod sort;
pub mod xref;

pub use config::{Config, ConfigBuilder, ContentHook, DefaultContentHook, FnContentHook};
pub use error::{DoxtreeError, Result};
pub use model::{NodeId, SymbolGraph};
pub use pipeline::{GenerationReport, Generator};
