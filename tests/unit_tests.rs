// Unit tests for SoulTribe Match

use chrono::{DateTime, Duration, TimeZone, Utc};
use soultribe_match::core::{
    angular_distance, house_index_of, intersect_hourly_windows, match_aspect, normalize_cusps,
    score_pair, PairFlags, ORB_LUMINARY, ORB_OTHER,
};
use soultribe_match::models::{Body, Houses, Interval, RadixSnapshot};

fn at(hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 10, hour, minute, 0).unwrap()
}

fn window(start: (u32, u32), end: (u32, u32)) -> Interval {
    Interval::new(at(start.0, start.1), at(end.0, end.1))
}

fn radix(sun: f64, moon: f64, venus: f64, mars: f64) -> RadixSnapshot {
    RadixSnapshot::from_longitudes([
        (Body::Sun, sun),
        (Body::Moon, moon),
        (Body::Venus, venus),
        (Body::Mars, mars),
    ])
}

fn equal_houses(asc: f64) -> Houses {
    Houses {
        system: Some("E".to_string()),
        cusps: Some((0..12).map(|i| Some((asc + 30.0 * i as f64) % 360.0)).collect()),
        asc: Some(asc),
        mc: Some((asc + 270.0) % 360.0),
    }
}

#[test]
fn test_angular_distance_bounds_and_symmetry() {
    let mut a = -400.0;
    while a < 800.0 {
        let mut b = -370.0;
        while b < 750.0 {
            let d = angular_distance(a, b);
            assert!((0.0..=180.0).contains(&d), "distance {} out of range for {} {}", d, a, b);
            assert_eq!(d, angular_distance(b, a));
            b += 37.5;
        }
        a += 23.0;
    }
}

#[test]
fn test_angular_distance_full_turn() {
    assert_eq!(angular_distance(10.0, 370.0), 0.0);
    assert_eq!(angular_distance(10.0, 10.0), 0.0);
    assert_eq!(angular_distance(0.0, 180.0), 180.0);
}

#[test]
fn test_match_aspect_orbs() {
    assert_eq!(match_aspect(0.0, ORB_LUMINARY), 8);
    assert_eq!(match_aspect(90.0, ORB_OTHER), -8);
    assert_eq!(match_aspect(45.0, ORB_OTHER), 0);
    assert_eq!(match_aspect(64.0, ORB_OTHER), 6);
    assert_eq!(match_aspect(64.0, ORB_LUMINARY), 6);
    assert_eq!(match_aspect(95.0, ORB_OTHER), 0);
    assert_eq!(match_aspect(95.0, ORB_LUMINARY), -8);
    assert_eq!(match_aspect(175.0, ORB_LUMINARY), -7);
    assert_eq!(match_aspect(150.0, ORB_LUMINARY), 0);
}

#[test]
fn test_house_index_equal_spacing() {
    let raw: Vec<Option<f64>> = (0..12).map(|i| Some(30.0 * i as f64)).collect();
    let cusps = normalize_cusps(&raw).unwrap();

    assert_eq!(house_index_of(&cusps, 15.0), Some(0));
    assert_eq!(house_index_of(&cusps, 359.0), Some(11));
    assert_eq!(house_index_of(&cusps, 30.0), Some(1));
    assert_eq!(house_index_of(&cusps, 375.0), Some(0));
}

#[test]
fn test_house_index_without_cusps() {
    let cusps = normalize_cusps(&[None; 12]).unwrap();
    assert_eq!(house_index_of(&cusps, 100.0), None);

    assert!(normalize_cusps(&[Some(0.0); 11]).is_none());
}

#[test]
fn test_core_scenario_breakdown() {
    let a = radix(0.0, 90.0, 200.0, 300.0);
    let b = radix(0.0, 90.0, 345.0, 245.0);

    let result = score_pair(&a, &b, PairFlags::default()).unwrap();
    let core = result.breakdown.core;

    assert_eq!(core.sun_sun, 8);
    assert_eq!(core.moon_moon, 8);
    assert_eq!(core.sun_moon_ab, -8);
    assert_eq!(core.sun_moon_ba, -8);
    assert_eq!(core.moon_factor, 1.0);
    assert_eq!(result.breakdown.secondary.same_sun_element, 4);
    assert_eq!(result.breakdown.raw, 4.0);
    assert_eq!(result.score, 54);
    assert!(result.breakdown.houses.is_none());
    assert!(result.breakdown.angles.is_empty());
}

#[test]
fn test_score_symmetry_with_houses() {
    let charts = [
        radix(12.0, 250.0, 80.0, 140.0).with_houses(equal_houses(100.0)),
        radix(133.0, 70.0, 262.0, 19.0).with_houses(equal_houses(305.0)),
        radix(300.0, 181.0, 5.0, 222.0),
    ];
    let flag_sets = [
        PairFlags::default(),
        PairFlags { moon_half_weight: true, lang_primary_equal: true, lang_secondary_equal: false },
        PairFlags { moon_half_weight: false, lang_primary_equal: true, lang_secondary_equal: true },
    ];

    for a in &charts {
        for b in &charts {
            for flags in flag_sets {
                let ab = score_pair(a, b, flags).unwrap();
                let ba = score_pair(b, a, flags).unwrap();
                assert_eq!(ab.score, ba.score);
                assert_eq!(ab.breakdown.raw, ba.breakdown.raw);
            }
        }
    }
}

#[test]
fn test_score_always_in_range() {
    for seed in 0..60 {
        let s = seed as f64;
        let a = radix(s * 7.0, s * 13.0, s * 29.0, s * 31.0).with_houses(equal_houses(s * 11.0));
        let b = radix(s * 17.0, s * 3.0, s * 41.0, s * 5.0).with_houses(equal_houses(s * 19.0));
        let flags = PairFlags { moon_half_weight: seed % 2 == 0, lang_primary_equal: true, lang_secondary_equal: true };

        let result = score_pair(&a, &b, flags).unwrap();
        assert!(result.score <= 100);
    }
}

#[test]
fn test_intersect_alignment_examples() {
    let now = at(8, 0);

    let overlaps = intersect_hourly_windows(&[window((10, 0), (12, 0))], &[window((11, 0), (13, 0))], now, 3, 5);
    assert_eq!(overlaps, vec![window((11, 0), (12, 0))]);

    let overlaps = intersect_hourly_windows(&[window((10, 0), (10, 40))], &[window((10, 10), (10, 50))], now, 3, 5);
    assert!(overlaps.is_empty());
}

#[test]
fn test_intersect_is_idempotent() {
    let now = at(8, 0);
    let a = vec![window((9, 15), (12, 45)), window((14, 0), (18, 30))];
    let b = vec![window((8, 30), (10, 30)), window((11, 0), (17, 0))];

    let once = intersect_hourly_windows(&a, &b, now, 3, 10);
    let twice = intersect_hourly_windows(&once, &once, now, 3, 10);
    assert_eq!(once, twice);

    for slot in &once {
        assert!(slot.duration() >= Duration::hours(1));
        assert_eq!(slot.duration().num_seconds() % 3600, 0);
    }
}

#[test]
fn test_intersect_respects_max_items() {
    let now = at(0, 0);
    let a: Vec<Interval> = (0..10)
        .map(|i| Interval::new(now + Duration::hours(2 * i), now + Duration::hours(2 * i + 1)))
        .collect();

    let overlaps = intersect_hourly_windows(&a, &a, now, 3, 4);
    assert_eq!(overlaps.len(), 4);
    assert!(overlaps.windows(2).all(|w| w[0].start < w[1].start));
}
