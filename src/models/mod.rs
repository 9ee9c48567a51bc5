// Model exports
pub mod breakdown;
pub mod domain;
pub mod requests;
pub mod responses;

pub use breakdown::{
    AngleBreakdown, CoreBreakdown, HouseBreakdown, LangBreakdown, Modality, ScoreBreakdown,
    SecondaryBreakdown, SunModality,
};
pub use domain::{
    Body, BodyPosition, Houses, Interval, MatchProfile, OverlapView, RadixMeta, RadixSnapshot,
    ScoredCandidate,
};
pub use requests::{AnnotateRequest, OverlapsRequest, PairRequest, RankRequest, ScoreRequest};
pub use responses::{
    AnnotateResponse, ErrorResponse, HealthResponse, OverlapsResponse, PairResponse, RankResponse,
    ScoreResponse,
};
