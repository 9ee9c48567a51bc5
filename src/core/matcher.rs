use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};

use crate::core::{
    availability::{
        intersect_hourly_windows, localize_overlaps, DEFAULT_LOOKAHEAD_DAYS, DEFAULT_MAX_OVERLAPS,
    },
    clock::{Clock, SystemClock},
    languages::{
        language_set, languages_disjoint, primary_equal, secondary_equal, shared_languages,
    },
    synastry::{score_pair, PairFlags},
};
use crate::error::MatchError;
use crate::models::{MatchProfile, OverlapView, RadixSnapshot, ScoreBreakdown, ScoredCandidate};

/// Knobs for one ranking run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankOptions {
    pub lookahead_days: u32,
    pub max_overlaps: usize,
    pub min_score: Option<u8>,
    pub offset: usize,
    pub limit: usize,
    /// Candidates whose last login is older than this are skipped
    pub inactive_after_days: u32,
}

impl Default for RankOptions {
    fn default() -> Self {
        Self {
            lookahead_days: DEFAULT_LOOKAHEAD_DAYS,
            max_overlaps: DEFAULT_MAX_OVERLAPS,
            min_score: None,
            offset: 0,
            limit: 20,
            inactive_after_days: 30,
        }
    }
}

/// Result of the ranking process
#[derive(Debug)]
pub struct RankResult {
    pub matches: Vec<ScoredCandidate>,
    /// Scored candidates passing `min_score`, before pagination
    pub total: usize,
    pub total_candidates: usize,
    pub has_more: bool,
}

/// Score and shared slots for one explicit pair of profiles
#[derive(Debug, Clone)]
pub struct PairResult {
    pub score: u8,
    pub breakdown: ScoreBreakdown,
    pub overlaps: Vec<OverlapView>,
    pub flags: PairFlags,
}

fn birth_times_known(a: &MatchProfile, a_radix: &RadixSnapshot, b: &MatchProfile, b_radix: &RadixSnapshot) -> bool {
    a.birth_time_known && b.birth_time_known && a_radix.birth_time_known() && b_radix.birth_time_known()
}

fn require_radix<'a>(profile: &'a MatchProfile) -> Result<&'a RadixSnapshot, MatchError> {
    profile.radix.as_ref().ok_or_else(|| {
        MatchError::InvalidRequest(format!("user {} has no radix computed yet", profile.user_id))
    })
}

/// Candidate ranking orchestrator
///
/// # Pipeline Stages
/// 1. Self, radix-less and inactive candidates are dropped
/// 2. Candidates sharing no language with the target are dropped
/// 3. Synastry scoring and availability intersection
/// 4. Minimum score, ordering and pagination
#[derive(Clone)]
pub struct Matcher {
    clock: Arc<dyn Clock>,
}

impl Matcher {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }

    pub fn with_system_clock() -> Self {
        Self::new(Arc::new(SystemClock))
    }

    /// Rank candidates for a target user
    ///
    /// # Arguments
    /// * `target` - The user matches are found for; must carry a radix
    /// * `candidates` - Potential partners
    /// * `options` - Horizon, caps and pagination
    ///
    /// # Returns
    /// RankResult with the requested page of scored candidates
    pub fn rank(
        &self,
        target: &MatchProfile,
        candidates: Vec<MatchProfile>,
        options: &RankOptions,
    ) -> Result<RankResult, MatchError> {
        let target_radix = require_radix(target)?;
        target_radix.validate()?;

        let now = self.clock.now();
        let cutoff = now
            .checked_sub_signed(Duration::days(i64::from(options.inactive_after_days)))
            .unwrap_or(DateTime::<Utc>::MIN_UTC);
        let target_langs = language_set(target);
        let total_candidates = candidates.len();

        let mut scored: Vec<ScoredCandidate> = candidates
            .into_iter()
            // Stage 1: self, missing radix, activity
            .filter(|c| c.user_id != target.user_id)
            .filter(|c| c.radix.is_some())
            .filter(|c| c.last_login_at.map_or(true, |at| at >= cutoff))
            // Stage 2: language intersection
            .filter_map(|c| {
                let langs = language_set(&c);
                if languages_disjoint(&target_langs, &langs) {
                    None
                } else {
                    Some((c, langs))
                }
            })
            // Stage 3: score and intersect availability
            .filter_map(|(candidate, langs)| {
                let radix = candidate.radix.as_ref()?;
                let shared = shared_languages(&target_langs, &langs);
                let flags = PairFlags {
                    moon_half_weight: !birth_times_known(target, target_radix, &candidate, radix),
                    lang_primary_equal: !shared.is_empty(),
                    lang_secondary_equal: false,
                };

                let result = match score_pair(target_radix, radix, flags) {
                    Ok(result) => result,
                    Err(e) => {
                        tracing::warn!("Skipping candidate {}: {}", candidate.user_id, e);
                        return None;
                    }
                };

                let overlaps = intersect_hourly_windows(
                    &target.availability,
                    &candidate.availability,
                    now,
                    options.lookahead_days,
                    options.max_overlaps,
                );
                let overlaps =
                    localize_overlaps(&overlaps, target.live_tz.as_deref(), candidate.live_tz.as_deref());

                Some(ScoredCandidate {
                    primary_equal: primary_equal(target, &candidate),
                    user_id: candidate.user_id,
                    score: result.score,
                    breakdown: result.breakdown,
                    overlaps,
                    display_name: candidate.display_name,
                    shared_languages: shared,
                })
            })
            // Stage 4a: minimum score
            .filter(|c| options.min_score.map_or(true, |min| c.score >= min))
            .collect();

        // Stage 4b: best score first, input order kept on ties
        scored.sort_by(|a, b| b.score.cmp(&a.score));

        let total = scored.len();
        let start = options.offset.min(total);
        let end = start.saturating_add(options.limit).min(total);
        let matches: Vec<ScoredCandidate> = scored.drain(start..end).collect();

        tracing::debug!(
            "Ranked {} of {} candidates for {}, returning {}",
            total,
            total_candidates,
            target.user_id,
            matches.len()
        );

        Ok(RankResult {
            matches,
            total,
            total_candidates,
            has_more: end < total,
        })
    }
}

impl Matcher {
    /// Score two known profiles against each other
    ///
    /// Unlike ranking, the language bonuses come from exact primary and
    /// secondary equality, and no candidate filter applies. Both profiles
    /// must carry a valid radix.
    pub fn pair(
        &self,
        a: &MatchProfile,
        b: &MatchProfile,
        lookahead_days: u32,
        max_overlaps: usize,
    ) -> Result<PairResult, MatchError> {
        let a_radix = require_radix(a)?;
        let b_radix = require_radix(b)?;

        let flags = PairFlags {
            moon_half_weight: !birth_times_known(a, a_radix, b, b_radix),
            lang_primary_equal: primary_equal(a, b),
            lang_secondary_equal: secondary_equal(a, b),
        };
        let result = score_pair(a_radix, b_radix, flags)?;

        let overlaps = intersect_hourly_windows(
            &a.availability,
            &b.availability,
            self.clock.now(),
            lookahead_days,
            max_overlaps,
        );

        tracing::debug!(
            "Scored pair {} / {}: {} with {} overlaps",
            a.user_id,
            b.user_id,
            result.score,
            overlaps.len()
        );

        Ok(PairResult {
            score: result.score,
            breakdown: result.breakdown,
            overlaps: localize_overlaps(&overlaps, a.live_tz.as_deref(), b.live_tz.as_deref()),
            flags,
        })
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::with_system_clock()
    }
}
