pub mod error;
pub mod models;
pub mod source;

pub use error::{ApiError, ApiResult};
pub use models::*;
pub use source::{CompoundSource, DetailSource};
