use crate::core::aspects::{angular_distance, aspect_between, find_aspect, ORB_LUMINARY, ORB_OTHER};
use crate::core::houses::{house_overlay, normalize_cusps, HousedChart};
use crate::error::MatchError;
use crate::models::{
    AngleBreakdown, Body, CoreBreakdown, LangBreakdown, RadixSnapshot, ScoreBreakdown,
    SecondaryBreakdown,
};

/// Neutral pairings land near the middle of the 0-100 scale
pub const SCORE_OFFSET: f64 = 50.0;
pub const MOON_UNCERTAIN_FACTOR: f64 = 0.5;
pub const SAME_ELEMENT_BONUS: i32 = 4;
pub const LANG_PRIMARY_BONUS: i32 = 10;
pub const LANG_SECONDARY_BONUS: i32 = 4;

pub const SUN_ASC_WEIGHT: i32 = 6;
pub const MOON_ASC_WEIGHT: i32 = 5;
pub const ASC_ASC_WEIGHT: i32 = 7;
pub const SUN_MC_WEIGHT: i32 = 5;
pub const MC_MC_WEIGHT: i32 = 5;

/// Caller-supplied flags for one pairing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PairFlags {
    /// Either party's birth time is unknown
    pub moon_half_weight: bool,
    pub lang_primary_equal: bool,
    pub lang_secondary_equal: bool,
}

/// Final score with its itemised breakdown
#[derive(Debug, Clone, PartialEq)]
pub struct SynastryScore {
    pub score: u8,
    pub breakdown: ScoreBreakdown,
}

/// Classical element of a zodiac sign
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Element {
    Fire,
    Earth,
    Air,
    Water,
}

const ELEMENTS: [Element; 4] = [Element::Fire, Element::Earth, Element::Air, Element::Water];

/// Element of the sign containing `lon` (sign = floor(lon / 30))
pub fn element_of(lon: f64) -> Element {
    let sign = (lon.rem_euclid(360.0) / 30.0).floor() as usize;
    ELEMENTS[sign % 4]
}

/// Luminary and Venus/Mars longitudes read from a validated radix
#[derive(Debug, Clone, Copy)]
struct ChartPoints {
    sun: f64,
    moon: f64,
    venus: f64,
    mars: f64,
}

impl ChartPoints {
    fn read(radix: &RadixSnapshot) -> Result<Self, MatchError> {
        radix.validate()?;
        Ok(Self {
            sun: radix.longitude(Body::Sun)?,
            moon: radix.longitude(Body::Moon)?,
            venus: radix.longitude(Body::Venus)?,
            mars: radix.longitude(Body::Mars)?,
        })
    }
}

/// Score the synastry between charts A and B
///
/// Scoring combines, in order:
/// 1. Luminary aspects (6° orb), Moon terms halved when a birth time is unknown
/// 2. Venus/Mars cross aspects (4° orb) and a same-element Sun bonus
/// 3. Language bonuses from the caller's flags
/// 4. House overlay bonuses when both charts carry usable cusps
/// 5. ASC/MC contacts when both charts expose those angles
///
/// The result is `round(clamp(50 + raw, 0, 100))`.
pub fn score_pair(
    radix_a: &RadixSnapshot,
    radix_b: &RadixSnapshot,
    flags: PairFlags,
) -> Result<SynastryScore, MatchError> {
    let a = ChartPoints::read(radix_a)?;
    let b = ChartPoints::read(radix_b)?;

    let core = CoreBreakdown {
        sun_sun: aspect_between(a.sun, b.sun, ORB_LUMINARY),
        moon_moon: aspect_between(a.moon, b.moon, ORB_LUMINARY),
        sun_moon_ab: aspect_between(a.sun, b.moon, ORB_LUMINARY),
        sun_moon_ba: aspect_between(a.moon, b.sun, ORB_LUMINARY),
        moon_factor: if flags.moon_half_weight { MOON_UNCERTAIN_FACTOR } else { 1.0 },
    };

    let secondary = SecondaryBreakdown {
        venus_mars: aspect_between(a.venus, b.mars, ORB_OTHER),
        mars_venus: aspect_between(a.mars, b.venus, ORB_OTHER),
        same_sun_element: if element_of(a.sun) == element_of(b.sun) {
            SAME_ELEMENT_BONUS
        } else {
            0
        },
    };

    let lang = LangBreakdown {
        primary: if flags.lang_primary_equal { LANG_PRIMARY_BONUS } else { 0 },
        secondary: if flags.lang_secondary_equal { LANG_SECONDARY_BONUS } else { 0 },
    };

    let houses = match (
        radix_a.raw_cusps().and_then(normalize_cusps),
        radix_b.raw_cusps().and_then(normalize_cusps),
    ) {
        (Some(cusps_a), Some(cusps_b)) => Some(house_overlay(
            HousedChart { sun: a.sun, moon: a.moon, cusps: &cusps_a },
            HousedChart { sun: b.sun, moon: b.moon, cusps: &cusps_b },
        )),
        _ => None,
    };
    let house_bonus = houses.map_or(0, |h| h.house_bonus_total);

    let angles = angle_contacts(&a, radix_a, &b, radix_b);

    let raw = core.total()
        + secondary.total() as f64
        + lang.total() as f64
        + house_bonus as f64
        + angles.total() as f64;
    let score = (SCORE_OFFSET + raw).clamp(0.0, 100.0).round_ties_even() as u8;

    tracing::trace!(
        score,
        raw,
        core = core.total(),
        secondary = secondary.total(),
        houses = house_bonus,
        angles = angles.total(),
        "Scored synastry pair"
    );

    Ok(SynastryScore {
        score,
        breakdown: ScoreBreakdown {
            core,
            secondary,
            lang,
            houses,
            angles,
            raw,
        },
    })
}

/// Any tabled aspect within the 4° orb awards the contact's fixed weight
#[inline]
fn contact(x: f64, y: f64, weight: i32) -> Option<i32> {
    find_aspect(angular_distance(x, y), ORB_OTHER).map(|_| weight)
}

fn angle_contacts(
    a: &ChartPoints,
    radix_a: &RadixSnapshot,
    b: &ChartPoints,
    radix_b: &RadixSnapshot,
) -> AngleBreakdown {
    let mut angles = AngleBreakdown::default();

    if let (Some(asc_a), Some(asc_b)) = (radix_a.asc(), radix_b.asc()) {
        angles.sun_a_asc_b = contact(a.sun, asc_b, SUN_ASC_WEIGHT);
        angles.sun_b_asc_a = contact(b.sun, asc_a, SUN_ASC_WEIGHT);
        angles.moon_a_asc_b = contact(a.moon, asc_b, MOON_ASC_WEIGHT);
        angles.moon_b_asc_a = contact(b.moon, asc_a, MOON_ASC_WEIGHT);
        angles.asc_asc = contact(asc_a, asc_b, ASC_ASC_WEIGHT);
    }

    if let (Some(mc_a), Some(mc_b)) = (radix_a.mc(), radix_b.mc()) {
        angles.sun_a_mc_b = contact(a.sun, mc_b, SUN_MC_WEIGHT);
        angles.sun_b_mc_a = contact(b.sun, mc_a, SUN_MC_WEIGHT);
        angles.mc_mc = contact(mc_a, mc_b, MC_MC_WEIGHT);
    }

    angles
}
