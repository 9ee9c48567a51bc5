use actix_web::{web, HttpResponse, Responder};
use validator::Validate;
use crate::config::MatchingSettings;
use crate::core::availability::{intersect_hourly_windows, localize_overlaps};
use crate::core::commentary::{annotate, resolve_language};
use crate::core::{Clock, CommentaryGenerator, Matcher, PairFlags, RankOptions, score_pair};
use crate::error::MatchError;
use crate::models::{
    AnnotateRequest, AnnotateResponse, ErrorResponse, HealthResponse, OverlapsRequest,
    OverlapsResponse, PairRequest, PairResponse, RankRequest, RankResponse, ScoreRequest,
    ScoreResponse,
};
use crate::services::ScoreCache;
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub matcher: Matcher,
    pub clock: Arc<dyn Clock>,
    pub cache: Arc<ScoreCache>,
    pub commentary: Arc<dyn CommentaryGenerator>,
    pub matching: MatchingSettings,
}

/// Configure all match-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/match/score", web::post().to(score))
        .route("/match/overlaps", web::post().to(overlaps))
        .route("/match/pair", web::post().to(pair))
        .route("/match/rank", web::post().to(rank))
        .route("/match/annotate", web::post().to(annotate_pair));
}

fn validation_failed(errors: validator::ValidationErrors) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse {
        error: "Validation failed".to_string(),
        message: errors.to_string(),
        status_code: 400,
    })
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
        cache_entries: state.cache.stats().entries,
    })
}

/// Score a pair of charts
///
/// POST /api/v1/match/score
///
/// Request body:
/// ```json
/// {
///   "aRadix": {"bodies": {"SUN": {"lon": 10.5}, "MOON": {"lon": 200.0}, "VENUS": {"lon": 33.0}, "MARS": {"lon": 120.0}}},
///   "bRadix": {"bodies": {"SUN": {"lon": 190.0}, "MOON": {"lon": 80.0}, "VENUS": {"lon": 300.0}, "MARS": {"lon": 15.0}}},
///   "aBirthTimeKnown": true,
///   "bBirthTimeKnown": false,
///   "langPrimaryEqual": true,
///   "langSecondaryEqual": false
/// }
/// ```
async fn score(
    state: web::Data<AppState>,
    req: web::Json<ScoreRequest>,
) -> Result<HttpResponse, MatchError> {
    let req = req.into_inner();
    let key = ScoreCache::key(&req)?;

    if let Some(cached) = state.cache.get(key).await {
        return Ok(HttpResponse::Ok().json(cached));
    }

    let birth_times_known = req.a_birth_time_known
        && req.b_birth_time_known
        && req.a_radix.birth_time_known()
        && req.b_radix.birth_time_known();
    let flags = PairFlags {
        moon_half_weight: !birth_times_known,
        lang_primary_equal: req.lang_primary_equal,
        lang_secondary_equal: req.lang_secondary_equal,
    };

    let result = score_pair(&req.a_radix, &req.b_radix, flags)?;
    let response = ScoreResponse {
        score: result.score,
        breakdown: result.breakdown,
    };

    state.cache.insert(key, response.clone()).await;
    Ok(HttpResponse::Ok().json(response))
}

/// Intersect two availability lists into whole-hour meetup slots
///
/// POST /api/v1/match/overlaps
async fn overlaps(
    state: web::Data<AppState>,
    req: web::Json<OverlapsRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for overlaps request: {:?}", errors);
        return validation_failed(errors);
    }

    let overlaps = intersect_hourly_windows(
        &req.windows_a,
        &req.windows_b,
        state.clock.now(),
        req.lookahead_days.unwrap_or(state.matching.lookahead_days),
        req.max_items.unwrap_or(state.matching.max_overlaps),
    );
    let overlaps = localize_overlaps(&overlaps, req.a_tz.as_deref(), req.b_tz.as_deref());

    HttpResponse::Ok().json(OverlapsResponse { overlaps })
}

/// Score two profiles and list their shared slots
///
/// POST /api/v1/match/pair
///
/// Language bonuses come from equal primary and secondary languages; the
/// Moon is half-weighted unless both birth times are known.
async fn pair(
    state: web::Data<AppState>,
    req: web::Json<PairRequest>,
) -> Result<HttpResponse, MatchError> {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for pair request: {:?}", errors);
        return Ok(validation_failed(errors));
    }

    let result = state.matcher.pair(
        &req.a,
        &req.b,
        req.lookahead_days.unwrap_or(state.matching.lookahead_days),
        req.max_overlaps.unwrap_or(state.matching.max_overlaps),
    )?;

    Ok(HttpResponse::Ok().json(PairResponse {
        score: result.score,
        breakdown: result.breakdown,
        overlaps: result.overlaps,
        moon_half_weight: result.flags.moon_half_weight,
    }))
}

/// Rank candidates for a target user
///
/// POST /api/v1/match/rank
///
/// Pagination is echoed in the `X-Total-Count`, `X-Limit`, `X-Offset`
/// and `X-Has-More` headers.
async fn rank(
    state: web::Data<AppState>,
    req: web::Json<RankRequest>,
) -> Result<HttpResponse, MatchError> {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for rank request: {:?}", errors);
        return Ok(validation_failed(errors));
    }

    let req = req.into_inner();
    let matching = &state.matching;
    let limit = req.limit.unwrap_or(matching.default_limit).min(matching.max_limit) as usize;

    let options = RankOptions {
        lookahead_days: req.lookahead_days.unwrap_or(matching.lookahead_days),
        max_overlaps: req.max_overlaps.unwrap_or(matching.max_overlaps),
        min_score: req.min_score,
        offset: req.offset,
        limit,
        inactive_after_days: matching.inactive_after_days,
    };

    tracing::info!(
        "Ranking {} candidates for user: {}, limit: {}, offset: {}",
        req.candidates.len(),
        req.target.user_id,
        limit,
        req.offset
    );

    let result = state.matcher.rank(&req.target, req.candidates, &options)?;

    Ok(HttpResponse::Ok()
        .insert_header(("X-Total-Count", result.total.to_string()))
        .insert_header(("X-Limit", limit.to_string()))
        .insert_header(("X-Offset", req.offset.to_string()))
        .insert_header(("X-Has-More", result.has_more.to_string()))
        .json(RankResponse {
            matches: result.matches,
            total: result.total,
            total_candidates: result.total_candidates,
            has_more: result.has_more,
        }))
}

/// Generate commentary on a scored pair for one side
///
/// POST /api/v1/match/annotate
async fn annotate_pair(
    state: web::Data<AppState>,
    req: web::Json<AnnotateRequest>,
) -> Result<HttpResponse, MatchError> {
    if let Err(errors) = req.validate() {
        return Ok(validation_failed(errors));
    }

    let lang = resolve_language(req.lang.as_deref(), req.viewer_lang_primary.as_deref());
    let comment = annotate(state.commentary.as_ref(), &req.breakdown, req.perspective, &lang)
        .await
        .map_err(|e| {
            tracing::error!("Commentary failed for perspective {:?}: {}", req.perspective, e);
            e
        })?;

    Ok(HttpResponse::Ok().json(AnnotateResponse { comment, lang }))
}
