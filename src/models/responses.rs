use serde::{Deserialize, Serialize};

use crate::models::domain::{OverlapView, ScoredCandidate};
use crate::models::ScoreBreakdown;

/// Response for the pair score endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreResponse {
    pub score: u8,
    pub breakdown: ScoreBreakdown,
}

/// Response for the overlaps endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OverlapsResponse {
    pub overlaps: Vec<OverlapView>,
}

/// Response for the profile pair endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PairResponse {
    pub score: u8,
    pub breakdown: ScoreBreakdown,
    pub overlaps: Vec<OverlapView>,
    #[serde(rename = "moonHalfWeight")]
    pub moon_half_weight: bool,
}

/// Response for the rank endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankResponse {
    pub matches: Vec<ScoredCandidate>,
    pub total: usize,
    #[serde(rename = "totalCandidates")]
    pub total_candidates: usize,
    #[serde(rename = "hasMore")]
    pub has_more: bool,
}

/// Response for the annotate endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnnotateResponse {
    pub comment: String,
    pub lang: String,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    #[serde(rename = "cacheEntries")]
    pub cache_entries: u64,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
