use crate::error::ApiResult;
use crate::models::CompoundRecord;

/// Query interface of the external indexer.
pub trait CompoundSource {
    /// All top-level compound records, in the indexer's own order.
    fn compounds(&self) -> ApiResult<Vec<CompoundRecord>>;
}

/// Accessor for the per-refid detail document the indexer writes next to its index.
///
/// The returned text is opaque; callers scrape it for the patterns they need.
pub trait DetailSource {
    fn detail(&self, refid: &str) -> ApiResult<String>;
}

impl CompoundSource for Vec<CompoundRecord> {
    fn compounds(&self) -> ApiResult<Vec<CompoundRecord>> {
        Ok(self.clone())
    }
}

impl DetailSource for std::collections::HashMap<String, String> {
    fn detail(&self, refid: &str) -> ApiResult<String> {
        self.get(refid)
            .cloned()
            .ok_or_else(|| crate::error::ApiError::NotFound(refid.to_string()))
    }
}
