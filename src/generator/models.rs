use serde::{Deserialize, Serialize};

use crate::classifier::{DatasetTag, QueryKind};

// Input data for SQL generation
#[derive(Debug, Clone, Deserialize)]
pub struct NlQueryRequest {
    pub question: String,
}

// History item for tracking generated queries
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryHistoryItem {
    pub question: String,
    pub sql: String,
    pub kind: QueryKind,
    pub dataset: DatasetTag,
    pub backend: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}
