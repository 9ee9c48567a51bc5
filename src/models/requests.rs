use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::core::commentary::Perspective;
use crate::models::domain::{Interval, MatchProfile, RadixSnapshot};
use crate::models::ScoreBreakdown;

/// Request to score a single pair of charts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreRequest {
    #[serde(alias = "a_radix", rename = "aRadix")]
    pub a_radix: RadixSnapshot,
    #[serde(alias = "b_radix", rename = "bRadix")]
    pub b_radix: RadixSnapshot,
    #[serde(alias = "a_birth_time_known", rename = "aBirthTimeKnown", default = "default_true")]
    pub a_birth_time_known: bool,
    #[serde(alias = "b_birth_time_known", rename = "bBirthTimeKnown", default = "default_true")]
    pub b_birth_time_known: bool,
    #[serde(alias = "lang_primary_equal", rename = "langPrimaryEqual", default)]
    pub lang_primary_equal: bool,
    #[serde(alias = "lang_secondary_equal", rename = "langSecondaryEqual", default)]
    pub lang_secondary_equal: bool,
}

fn default_true() -> bool {
    true
}

/// Request to intersect two availability lists
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct OverlapsRequest {
    #[serde(alias = "windows_a", rename = "windowsA", default)]
    pub windows_a: Vec<Interval>,
    #[serde(alias = "windows_b", rename = "windowsB", default)]
    pub windows_b: Vec<Interval>,
    #[validate(range(min = 1, max = 30))]
    #[serde(alias = "lookahead_days", rename = "lookaheadDays")]
    pub lookahead_days: Option<u32>,
    #[validate(range(min = 1, max = 50))]
    #[serde(alias = "max_items", rename = "maxItems")]
    pub max_items: Option<usize>,
    #[serde(alias = "a_tz", rename = "aTz", default)]
    pub a_tz: Option<String>,
    #[serde(alias = "b_tz", rename = "bTz", default)]
    pub b_tz: Option<String>,
}

/// Request to score two stored profiles against each other
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PairRequest {
    pub a: MatchProfile,
    pub b: MatchProfile,
    #[validate(range(min = 1, max = 30))]
    #[serde(alias = "lookahead_days", rename = "lookaheadDays", default)]
    pub lookahead_days: Option<u32>,
    #[validate(range(min = 1, max = 50))]
    #[serde(alias = "max_overlaps", rename = "maxOverlaps", default)]
    pub max_overlaps: Option<usize>,
}

/// Request to rank candidates for a target user
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RankRequest {
    pub target: MatchProfile,
    #[serde(default)]
    pub candidates: Vec<MatchProfile>,
    #[validate(range(min = 1))]
    #[serde(default)]
    pub limit: Option<u16>,
    #[serde(default)]
    pub offset: usize,
    #[validate(range(max = 100))]
    #[serde(alias = "min_score", rename = "minScore", default)]
    pub min_score: Option<u8>,
    #[validate(range(min = 1, max = 30))]
    #[serde(alias = "lookahead_days", rename = "lookaheadDays", default)]
    pub lookahead_days: Option<u32>,
    #[validate(range(min = 1, max = 50))]
    #[serde(alias = "max_overlaps", rename = "maxOverlaps", default)]
    pub max_overlaps: Option<usize>,
}

/// Request to generate commentary for a scored pair
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AnnotateRequest {
    pub breakdown: ScoreBreakdown,
    pub perspective: Perspective,
    #[validate(length(min = 2, max = 16))]
    #[serde(default)]
    pub lang: Option<String>,
    #[serde(alias = "viewer_lang_primary", rename = "viewerLangPrimary", default)]
    pub viewer_lang_primary: Option<String>,
}
