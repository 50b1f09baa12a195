use doxtree_api::{ApiError, ApiResult, CompoundRecord, CompoundSource};
use std::path::Path;

/// Compound records supplied as a JSON array.
#[derive(Debug, Clone, Default)]
pub struct JsonRecords {
    records: Vec<CompoundRecord>,
}

impl JsonRecords {
    pub fn parse(text: &str) -> ApiResult<Self> {
        let records = serde_json::from_str(text)
            .map_err(|e| ApiError::InvalidArgument(format!("invalid compound records: {e}")))?;
        Ok(Self { records })
    }

    pub fn from_path(path: &Path) -> ApiResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| ApiError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::parse(&text)
    }
}

impl From<Vec<CompoundRecord>> for JsonRecords {
    fn from(records: Vec<CompoundRecord>) -> Self {
        Self { records }
    }
}

impl CompoundSource for JsonRecords {
    fn compounds(&self) -> ApiResult<Vec<CompoundRecord>> {
        Ok(self.records.clone())
    }
}
