use chrono::{DateTime, FixedOffset, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

use crate::error::MatchError;

/// Celestial bodies carried by a radix snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Body {
    Sun,
    Moon,
    Mercury,
    Venus,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
    Pluto,
}

impl Body {
    /// Bodies the scorer reads
    pub const SCORED: [Body; 4] = [Body::Sun, Body::Moon, Body::Venus, Body::Mars];

    pub fn as_str(&self) -> &'static str {
        match self {
            Body::Sun => "SUN",
            Body::Moon => "MOON",
            Body::Mercury => "MERCURY",
            Body::Venus => "VENUS",
            Body::Mars => "MARS",
            Body::Jupiter => "JUPITER",
            Body::Saturn => "SATURN",
            Body::Uranus => "URANUS",
            Body::Neptune => "NEPTUNE",
            Body::Pluto => "PLUTO",
        }
    }
}

/// Ecliptic position of a body
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodyPosition {
    pub lon: f64,
}

/// House system data; absent when birth time or place is unknown
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Houses {
    #[serde(default)]
    pub system: Option<String>,
    #[serde(default)]
    pub cusps: Option<Vec<Option<f64>>>,
    #[serde(default)]
    pub asc: Option<f64>,
    #[serde(default)]
    pub mc: Option<f64>,
}

/// Provenance recorded by the ephemeris job
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RadixMeta {
    #[serde(default = "default_true")]
    pub birth_time_known: bool,
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lon: Option<f64>,
    #[serde(default)]
    pub algo: Option<String>,
}

/// Natal chart snapshot computed by the ephemeris job
///
/// Bodies are keyed by their upper-case names (`SUN`, `MOON`, ...). Unknown
/// keys are tolerated and carried through untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RadixSnapshot {
    pub bodies: BTreeMap<String, BodyPosition>,
    #[serde(default)]
    pub houses: Option<Houses>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<RadixMeta>,
}

impl RadixSnapshot {
    /// Build a snapshot from body longitudes, without houses
    pub fn from_longitudes<I>(bodies: I) -> Self
    where
        I: IntoIterator<Item = (Body, f64)>,
    {
        Self {
            bodies: bodies
                .into_iter()
                .map(|(body, lon)| (body.as_str().to_string(), BodyPosition { lon }))
                .collect(),
            ..Default::default()
        }
    }

    pub fn with_houses(mut self, houses: Houses) -> Self {
        self.houses = Some(houses);
        self
    }

    /// Longitude of a body, failing if it is missing or not finite
    pub fn longitude(&self, body: Body) -> Result<f64, MatchError> {
        let position = self
            .bodies
            .get(body.as_str())
            .ok_or_else(|| MatchError::invalid_radix(body.as_str(), "missing body"))?;

        if !position.lon.is_finite() {
            return Err(MatchError::invalid_radix(body.as_str(), "longitude is not finite"));
        }
        Ok(position.lon)
    }

    /// Check everything the scorer relies on
    pub fn validate(&self) -> Result<(), MatchError> {
        for body in Body::SCORED {
            self.longitude(body)?;
        }

        if let Some(houses) = &self.houses {
            if houses.asc.is_some_and(|v| !v.is_finite()) {
                return Err(MatchError::invalid_radix("houses.asc", "angle is not finite"));
            }
            if houses.mc.is_some_and(|v| !v.is_finite()) {
                return Err(MatchError::invalid_radix("houses.mc", "angle is not finite"));
            }
        }

        Ok(())
    }

    pub fn asc(&self) -> Option<f64> {
        self.houses.as_ref().and_then(|h| h.asc)
    }

    pub fn mc(&self) -> Option<f64> {
        self.houses.as_ref().and_then(|h| h.mc)
    }

    pub fn raw_cusps(&self) -> Option<&[Option<f64>]> {
        self.houses
            .as_ref()
            .and_then(|h| h.cusps.as_deref())
    }

    pub fn birth_time_known(&self) -> bool {
        self.meta.as_ref().map_or(true, |m| m.birth_time_known)
    }
}

impl Default for RadixMeta {
    fn default() -> Self {
        Self {
            birth_time_known: true,
            lat: None,
            lon: None,
            algo: None,
        }
    }
}

fn default_true() -> bool { true }

/// Half-open availability window `[start, end)` in UTC
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Interval {
    #[serde(rename = "start_dt_utc", deserialize_with = "deserialize_utc")]
    pub start: DateTime<Utc>,
    #[serde(rename = "end_dt_utc", deserialize_with = "deserialize_utc")]
    pub end: DateTime<Utc>,
}

impl Interval {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    pub fn duration(&self) -> chrono::Duration {
        self.end - self.start
    }
}

/// A shared UTC slot plus each side's wall-clock view of it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverlapView {
    #[serde(flatten)]
    pub window: Interval,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub a_local_start: Option<DateTime<FixedOffset>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub a_local_end: Option<DateTime<FixedOffset>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub a_tz: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub b_local_start: Option<DateTime<FixedOffset>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub b_local_end: Option<DateTime<FixedOffset>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub b_tz: Option<String>,
}

impl From<Interval> for OverlapView {
    fn from(window: Interval) -> Self {
        Self {
            window,
            a_local_start: None,
            a_local_end: None,
            a_tz: None,
            b_local_start: None,
            b_local_end: None,
            b_tz: None,
        }
    }
}

/// Accept RFC 3339 timestamps with any offset, or naive timestamps read as UTC
fn deserialize_utc<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_utc(&raw).map_err(serde::de::Error::custom)
}

pub fn parse_utc(raw: &str) -> Result<DateTime<Utc>, String> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f"))
        .map(|naive| naive.and_utc())
        .map_err(|e| format!("invalid timestamp '{}': {}", raw, e))
}

/// Profile of a user taking part in matching
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchProfile {
    #[serde(rename = "userId")]
    pub user_id: String,
    #[serde(rename = "displayName", default)]
    pub display_name: Option<String>,
    #[serde(rename = "birthTimeKnown", default = "default_true")]
    pub birth_time_known: bool,
    #[serde(rename = "langPrimary", default)]
    pub lang_primary: Option<String>,
    #[serde(rename = "langSecondary", default)]
    pub lang_secondary: Option<String>,
    #[serde(default)]
    pub languages: Vec<String>,
    #[serde(rename = "lastLoginAt", default)]
    pub last_login_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub radix: Option<RadixSnapshot>,
    #[serde(default)]
    pub availability: Vec<Interval>,
    /// IANA zone the user lives in, used for local overlap times
    #[serde(rename = "liveTz", default)]
    pub live_tz: Option<String>,
}

/// Scored candidate returned by the ranking pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredCandidate {
    #[serde(rename = "userId")]
    pub user_id: String,
    pub score: u8,
    pub breakdown: super::ScoreBreakdown,
    pub overlaps: Vec<OverlapView>,
    #[serde(rename = "displayName")]
    pub display_name: Option<String>,
    #[serde(rename = "sharedLanguages")]
    pub shared_languages: Vec<String>,
    #[serde(rename = "primaryEqual")]
    pub primary_equal: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_radix_deserializes_stored_shape() {
        let json = r#"{
            "bodies": {"SUN": {"lon": 12.5}, "MOON": {"lon": 200.0},
                       "VENUS": {"lon": 40.0}, "MARS": {"lon": 100.0}},
            "houses": {"system": "Placidus", "cusps": [0,30,60,null,120,150,180,210,240,270,300,330],
                       "asc": 0.0, "mc": 270.0},
            "notes": "computed upstream",
            "meta": {"birth_time_known": false}
        }"#;

        let radix: RadixSnapshot = serde_json::from_str(json).unwrap();
        assert_eq!(radix.longitude(Body::Sun).unwrap(), 12.5);
        assert_eq!(radix.raw_cusps().unwrap()[3], None);
        assert_eq!(radix.mc(), Some(270.0));
        assert!(!radix.birth_time_known());
        assert!(radix.validate().is_ok());
    }

    #[test]
    fn test_validate_reports_missing_body() {
        let radix = RadixSnapshot::from_longitudes([(Body::Sun, 0.0), (Body::Moon, 0.0)]);
        match radix.validate() {
            Err(MatchError::InvalidRadix { field, .. }) => assert_eq!(field, "VENUS"),
            other => panic!("expected invalid radix, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_rejects_non_finite_longitude() {
        let radix = RadixSnapshot::from_longitudes(Body::SCORED.map(|b| (b, f64::NAN)));
        assert!(matches!(radix.validate(), Err(MatchError::InvalidRadix { .. })));
    }

    #[test]
    fn test_interval_accepts_offsets_and_naive_times() {
        let json = r#"{"start_dt_utc": "2025-03-01T12:00:00+02:00", "end_dt_utc": "2025-03-01T12:30:00"}"#;
        let interval: Interval = serde_json::from_str(json).unwrap();

        assert_eq!(interval.start, Utc.with_ymd_and_hms(2025, 3, 1, 10, 0, 0).unwrap());
        assert_eq!(interval.end, Utc.with_ymd_and_hms(2025, 3, 1, 12, 30, 0).unwrap());
    }

    #[test]
    fn test_profile_reads_live_tz() {
        let json = r#"{"userId": "u1", "liveTz": "Europe/Lisbon"}"#;
        let profile: MatchProfile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.live_tz.as_deref(), Some("Europe/Lisbon"));

        let bare: MatchProfile = serde_json::from_str(r#"{"userId": "u2"}"#).unwrap();
        assert!(bare.live_tz.is_none());
    }
}
