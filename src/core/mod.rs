// Core algorithm exports
pub mod aspects;
pub mod availability;
pub mod clock;
pub mod commentary;
pub mod houses;
pub mod languages;
pub mod matcher;
pub mod synastry;

pub use aspects::{angular_distance, match_aspect, ORB_LUMINARY, ORB_OTHER};
pub use availability::{intersect_hourly_windows, localize_overlaps};
pub use clock::{Clock, FixedClock, SystemClock};
pub use commentary::{annotate, CliCommentaryGenerator, CommentaryGenerator, Perspective};
pub use houses::{house_index_of, normalize_cusps, Cusps};
pub use matcher::{Matcher, PairResult, RankOptions, RankResult};
pub use synastry::{score_pair, PairFlags, SynastryScore};
