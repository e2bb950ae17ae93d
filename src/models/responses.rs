use serde::Serialize;
use crate::core::ranking::RankingOutcome;
use crate::models::domain::{BrandProfile, ScoredMatch};

/// Output document of the batch runner
#[derive(Debug, Clone, Serialize)]
pub struct BatchResponse {
    #[serde(rename = "runId")]
    pub run_id: uuid::Uuid,
    #[serde(rename = "generatedAt")]
    pub generated_at: chrono::DateTime<chrono::Utc>,
    pub version: String,
    pub result: BatchResult,
}

impl BatchResponse {
    pub fn new(result: BatchResult) -> Self {
        Self {
            run_id: uuid::Uuid::new_v4(),
            generated_at: chrono::Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            result,
        }
    }
}

/// Engine output, tagged by direction like the request
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "direction", rename_all = "snake_case")]
pub enum BatchResult {
    BrandFit {
        outcome: RankingOutcome,
    },
    PropertyFit {
        matches: Vec<ScoredMatch<BrandProfile>>,
        #[serde(rename = "totalCandidates")]
        total_candidates: usize,
    },
}
