//! SoulTribe Match - synastry compatibility scoring and meetup overlap service
//!
//! This library scores pairs of natal charts on a 0-100 scale, intersects
//! availability windows into whole-hour meetup slots and ranks candidate
//! partners for a user.

pub mod config;
pub mod core;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{intersect_hourly_windows, score_pair, Matcher, PairFlags, RankOptions};
pub use error::MatchError;
pub use models::{Interval, MatchProfile, RadixSnapshot, ScoreBreakdown, ScoredCandidate};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        // Verify that the library exports work correctly
        assert_eq!(crate::core::angular_distance(350.0, 10.0), 20.0);
        assert!(RadixSnapshot::default().validate().is_err());
    }
}
