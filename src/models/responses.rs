use serde::{Deserialize, Serialize};
use crate::models::domain::RankedResult;

/// Response for a ranking request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankResponse {
    pub results: Vec<RankedResult>,
    pub total_documents: usize,
    pub ranked_documents: usize,
    pub ranked_at: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}
